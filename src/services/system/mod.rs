use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};

use crate::config::AppConfig;
use crate::models::{ApiResponse, AppStartTime, system::responses::HealthResponse};

pub struct SystemService;

impl SystemService {
    pub fn new_lazy() -> Self {
        Self
    }

    pub(crate) fn get_config(&self) -> &AppConfig {
        AppConfig::get()
    }

    // 存活检查
    pub async fn health(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        let uptime_seconds = request
            .app_data::<web::Data<AppStartTime>>()
            .map(|start| {
                chrono::Utc::now()
                    .signed_duration_since(start.start_datetime)
                    .num_seconds()
            })
            .unwrap_or(0);

        Ok(HttpResponse::Ok().json(ApiResponse::success(
            HealthResponse {
                status: "ok".to_string(),
                system_name: self.get_config().app.system_name.clone(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                uptime_seconds,
            },
            "Service is healthy",
        )))
    }
}
