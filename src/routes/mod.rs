pub mod classes;

pub mod departments;

pub mod enrollments;

pub mod stats;

pub mod subjects;

pub mod system;

pub mod users;

pub use classes::configure_classes_routes;
pub use departments::configure_departments_routes;
pub use enrollments::configure_enrollments_routes;
pub use stats::configure_stats_routes;
pub use subjects::configure_subjects_routes;
pub use system::configure_system_routes;
pub use users::configure_user_routes;

/// 注册全部 API 路由
pub fn configure_api_routes(cfg: &mut actix_web::web::ServiceConfig) {
    cfg.configure(configure_user_routes)
        .configure(configure_departments_routes)
        .configure(configure_subjects_routes)
        .configure(configure_classes_routes)
        .configure(configure_enrollments_routes)
        .configure(configure_stats_routes)
        .configure(configure_system_routes);
}
