use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::services::StatsService;

static STATS_SERVICE: Lazy<StatsService> = Lazy::new(StatsService::new_lazy);

pub async fn overview(req: HttpRequest) -> ActixResult<HttpResponse> {
    STATS_SERVICE.overview(&req).await
}

pub async fn occupancy(req: HttpRequest) -> ActixResult<HttpResponse> {
    STATS_SERVICE.occupancy(&req).await
}

pub async fn departments(req: HttpRequest) -> ActixResult<HttpResponse> {
    STATS_SERVICE.departments(&req).await
}

// 配置路由
pub fn configure_stats_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/stats")
            .route("/overview", web::get().to(overview))
            .route("/occupancy", web::get().to(occupancy))
            .route("/departments", web::get().to(departments)),
    );
}
