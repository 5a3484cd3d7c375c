//! HTTP 接口集成测试

use std::sync::Arc;

use actix_web::{App, http::StatusCode, test, web};
use serde_json::{Value, json};

use rust_campus_next::config::DatabaseConfig;
use rust_campus_next::models::{AppStartTime, ErrorCode};
use rust_campus_next::routes::configure_api_routes;
use rust_campus_next::storage::{Storage, sea_orm_storage::SeaOrmStorage};
use rust_campus_next::utils::{json_error_handler, query_error_handler};

async fn storage() -> Arc<dyn Storage> {
    let config = DatabaseConfig {
        url: ":memory:".to_string(),
        pool_size: 1,
        timeout: 5,
    };
    Arc::new(SeaOrmStorage::connect(&config).await.unwrap())
}

macro_rules! app {
    ($storage:expr) => {
        test::init_service(
            App::new()
                .app_data(web::QueryConfig::default().error_handler(query_error_handler))
                .app_data(web::JsonConfig::default().error_handler(json_error_handler))
                .app_data(web::Data::new($storage.clone()))
                .app_data(web::Data::new(AppStartTime {
                    start_datetime: chrono::Utc::now(),
                }))
                .configure(configure_api_routes),
        )
        .await
    };
}

macro_rules! call {
    ($app:expr, $req:expr) => {{
        let resp = test::call_service(&$app, $req.to_request()).await;
        let status = resp.status();
        let body: Value = test::read_body_json(resp).await;
        (status, body)
    }};
}

fn post(uri: &str, body: Value) -> test::TestRequest {
    test::TestRequest::post().uri(uri).set_json(body)
}

fn code(body: &Value) -> i64 {
    body["code"].as_i64().unwrap()
}

#[actix_web::test]
async fn enrollment_flow_over_http() {
    let storage = storage().await;
    let app = app!(storage);

    let (status, body) = call!(
        app,
        post("/api/v1/departments", json!({"code": "MATH", "name": "Mathematics"}))
    );
    assert_eq!(status, StatusCode::CREATED);
    let department_id = body["data"]["id"].as_i64().unwrap();

    let (status, body) = call!(
        app,
        post(
            "/api/v1/subjects",
            json!({"department_id": department_id, "code": "MATH201", "name": "Linear Algebra"})
        )
    );
    assert_eq!(status, StatusCode::CREATED);
    let subject_id = body["data"]["id"].as_i64().unwrap();

    for (id, role) in [
        ("prof", "teacher"),
        ("s1", "student"),
        ("s2", "student"),
        ("s3", "student"),
    ] {
        let (status, _) = call!(
            app,
            post(
                "/api/v1/users",
                json!({"id": id, "name": id, "email": format!("{id}@school.test"), "role": role})
            )
        );
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, body) = call!(
        app,
        post(
            "/api/v1/classes",
            json!({"subject_id": subject_id, "teacher_id": "prof", "name": "Morning", "capacity": 2})
        )
    );
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["status"], "active");
    let class_id = body["data"]["id"].as_i64().unwrap();
    let invite_code = body["data"]["invite_code"].as_str().unwrap().to_string();
    assert_eq!(invite_code.len(), 6);

    let (status, body) = call!(
        app,
        test::TestRequest::get().uri(&format!("/api/v1/classes/code/{invite_code}"))
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["id"], class_id);

    let (status, body) = call!(
        app,
        post(
            "/api/v1/enrollments/join",
            json!({"student_id": "s1", "invite_code": invite_code})
        )
    );
    assert_eq!(status, StatusCode::CREATED);
    assert!(body["data"]["id"].as_i64().unwrap() > 0);

    let (status, body) = call!(
        app,
        post("/api/v1/enrollments", json!({"student_id": "s1", "class_id": class_id}))
    );
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(code(&body), ErrorCode::EnrollmentDuplicate as i64);

    let (status, _) = call!(
        app,
        post("/api/v1/enrollments", json!({"student_id": "s2", "class_id": class_id}))
    );
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = call!(
        app,
        post("/api/v1/enrollments", json!({"student_id": "s3", "class_id": class_id}))
    );
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(code(&body), ErrorCode::EnrollmentCapacityExceeded as i64);
    assert_eq!(body["data"]["capacity"], 2);

    // 班级已满时先报告容量，不再检查重复选课
    let (status, body) = call!(
        app,
        post("/api/v1/enrollments", json!({"student_id": "s1", "class_id": class_id}))
    );
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(code(&body), ErrorCode::EnrollmentCapacityExceeded as i64);

    // 有选课记录的班级不能删除
    let (status, body) = call!(
        app,
        test::TestRequest::delete().uri(&format!("/api/v1/classes/{class_id}"))
    );
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(code(&body), ErrorCode::ClassHasEnrollments as i64);

    let (status, body) = call!(
        app,
        test::TestRequest::get().uri("/api/v1/stats/occupancy")
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["summary"]["full"], 1);
    assert_eq!(body["data"]["items"][0]["level"], "full");
}

#[actix_web::test]
async fn admission_rejections() {
    let storage = storage().await;
    let app = app!(storage);

    let (status, body) = call!(
        app,
        post("/api/v1/enrollments", json!({"student_id": "nobody", "class_id": 42}))
    );
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(code(&body), ErrorCode::EnrollmentClassInvalid as i64);

    let (status, body) = call!(
        app,
        post(
            "/api/v1/enrollments/join",
            json!({"student_id": "nobody", "invite_code": "NOPE00"})
        )
    );
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(code(&body), ErrorCode::ClassInviteCodeInvalid as i64);

    let (status, body) = call!(
        app,
        post("/api/v1/enrollments", json!({"student_id": "  ", "class_id": 1}))
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(code(&body), ErrorCode::ValidationFailed as i64);
}

#[actix_web::test]
async fn malformed_requests_get_envelope() {
    let storage = storage().await;
    let app = app!(storage);

    let (status, body) = call!(app, test::TestRequest::get().uri("/api/v1/classes/abc"));
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(code(&body), ErrorCode::BadRequest as i64);

    let (status, body) = call!(app, test::TestRequest::get().uri("/api/v1/classes/0"));
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(code(&body), ErrorCode::BadRequest as i64);

    let (status, body) = call!(
        app,
        post("/api/v1/enrollments", json!({"student_id": "s1"}))
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(code(&body), ErrorCode::ValidationFailed as i64);

    let (status, body) = call!(app, test::TestRequest::get().uri("/api/v1/classes/7"));
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(code(&body), ErrorCode::ClassNotFound as i64);
}

#[actix_web::test]
async fn class_creation_checks_references() {
    let storage = storage().await;
    let app = app!(storage);

    let (status, body) = call!(
        app,
        post(
            "/api/v1/classes",
            json!({"subject_id": 1, "teacher_id": "prof", "name": "Ghost", "capacity": 10})
        )
    );
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(code(&body), ErrorCode::SubjectNotFound as i64);

    let (status, body) = call!(
        app,
        post(
            "/api/v1/classes",
            json!({"subject_id": 1, "teacher_id": "prof", "name": "Ghost", "capacity": 0})
        )
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(code(&body), ErrorCode::ClassCapacityInvalid as i64);

    let (status, body) = call!(
        app,
        post("/api/v1/departments", json!({"code": "bad code!", "name": "Broken"}))
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(code(&body), ErrorCode::DepartmentCodeInvalid as i64);
}

#[actix_web::test]
async fn health_reports_ok() {
    let storage = storage().await;
    let app = app!(storage);

    let (status, body) = call!(app, test::TestRequest::get().uri("/api/v1/system/health"));
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "ok");
    assert!(body["data"]["uptime_seconds"].as_i64().unwrap() >= 0);
}
