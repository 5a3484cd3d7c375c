use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::models::enrollments::requests::{
    CreateEnrollmentRequest, EnrollmentListParams, JoinClassRequest,
};
use crate::services::EnrollmentService;
use crate::utils::SafeEnrollmentIdI64;

static ENROLLMENT_SERVICE: Lazy<EnrollmentService> = Lazy::new(EnrollmentService::new_lazy);

pub async fn list_enrollments(
    req: HttpRequest,
    query: web::Query<EnrollmentListParams>,
) -> ActixResult<HttpResponse> {
    ENROLLMENT_SERVICE
        .list_enrollments(&req, query.into_inner())
        .await
}

pub async fn enroll(
    req: HttpRequest,
    enrollment_data: web::Json<CreateEnrollmentRequest>,
) -> ActixResult<HttpResponse> {
    ENROLLMENT_SERVICE
        .enroll(&req, enrollment_data.into_inner())
        .await
}

pub async fn join_class(
    req: HttpRequest,
    join_data: web::Json<JoinClassRequest>,
) -> ActixResult<HttpResponse> {
    ENROLLMENT_SERVICE
        .join_class(&req, join_data.into_inner())
        .await
}

pub async fn get_enrollment(
    req: HttpRequest,
    enrollment_id: SafeEnrollmentIdI64,
) -> ActixResult<HttpResponse> {
    ENROLLMENT_SERVICE
        .get_enrollment(&req, enrollment_id.0)
        .await
}

pub async fn delete_enrollment(
    req: HttpRequest,
    enrollment_id: SafeEnrollmentIdI64,
) -> ActixResult<HttpResponse> {
    ENROLLMENT_SERVICE
        .delete_enrollment(&req, enrollment_id.0)
        .await
}

// 配置路由
pub fn configure_enrollments_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/enrollments")
            .service(
                web::resource("")
                    .route(web::get().to(list_enrollments))
                    .route(web::post().to(enroll)),
            )
            .service(web::resource("/join").route(web::post().to(join_class)))
            .service(
                web::resource("/{enrollment_id}")
                    .route(web::get().to(get_enrollment))
                    .route(web::delete().to(delete_enrollment)),
            ),
    );
}
