use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::EnrollmentService;
use crate::domain::AdmissionError;
use crate::models::{
    ApiResponse, ErrorCode,
    enrollments::{
        requests::{CreateEnrollmentRequest, JoinClassRequest},
        responses::{CapacityExceededDetail, EnrollmentCreatedResponse},
    },
};
use crate::services::{invalid, not_found, storage_error_response};

pub async fn enroll(
    service: &EnrollmentService,
    request: &HttpRequest,
    enrollment_data: CreateEnrollmentRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    let student_id = enrollment_data.student_id.trim();
    if student_id.is_empty() {
        return Ok(invalid(ErrorCode::ValidationFailed, "student_id is required"));
    }

    let result = service
        .admission(storage)
        .admit(student_id, enrollment_data.class_id)
        .await;
    Ok(admission_response(result))
}

pub async fn join_class(
    service: &EnrollmentService,
    request: &HttpRequest,
    join_data: JoinClassRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    let student_id = join_data.student_id.trim();
    let invite_code = join_data.invite_code.trim();
    if student_id.is_empty() || invite_code.is_empty() {
        return Ok(invalid(
            ErrorCode::ValidationFailed,
            "student_id and invite_code are required",
        ));
    }

    let class = match storage.get_class_by_code(invite_code).await {
        Ok(Some(class)) => class,
        Ok(None) => {
            return Ok(not_found(
                ErrorCode::ClassInviteCodeInvalid,
                "Invite code not found",
            ));
        }
        Err(e) => return Ok(storage_error_response("Failed to resolve invite code", &e)),
    };

    let result = service.admission(storage).admit(student_id, class.id).await;
    Ok(admission_response(result))
}

fn admission_response(result: Result<i64, AdmissionError>) -> HttpResponse {
    match result {
        Ok(id) => HttpResponse::Created().json(ApiResponse::success(
            EnrollmentCreatedResponse { id },
            "Enrolled successfully",
        )),
        Err(e) => admission_error_response(&e),
    }
}

/// 准入失败的响应
pub(crate) fn admission_error_response(err: &AdmissionError) -> HttpResponse {
    match err {
        AdmissionError::InvalidClass => {
            not_found(ErrorCode::EnrollmentClassInvalid, "Class does not exist")
        }
        AdmissionError::ClassNotOpen => HttpResponse::Conflict().json(ApiResponse::error_empty(
            ErrorCode::EnrollmentClassNotOpen,
            "Class is not open for enrollment",
        )),
        AdmissionError::CapacityExceeded { capacity } => {
            HttpResponse::Conflict().json(ApiResponse::error(
                ErrorCode::EnrollmentCapacityExceeded,
                CapacityExceededDetail {
                    capacity: *capacity,
                },
                format!("Class is full (capacity {capacity})"),
            ))
        }
        AdmissionError::InvalidStudent => {
            not_found(ErrorCode::EnrollmentStudentInvalid, "Student does not exist")
        }
        AdmissionError::DuplicateEnrollment => {
            HttpResponse::Conflict().json(ApiResponse::error_empty(
                ErrorCode::EnrollmentDuplicate,
                "Student is already enrolled in this class",
            ))
        }
        AdmissionError::StorageUnavailable(detail) => {
            error!("Enrollment admission failed: {}", detail);
            HttpResponse::ServiceUnavailable().json(ApiResponse::error_empty(
                ErrorCode::ServiceUnavailable,
                "Storage unavailable, please retry later",
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;

    #[test]
    fn test_status_codes() {
        let cases = [
            (AdmissionError::InvalidClass, StatusCode::NOT_FOUND),
            (AdmissionError::ClassNotOpen, StatusCode::CONFLICT),
            (
                AdmissionError::CapacityExceeded { capacity: 2 },
                StatusCode::CONFLICT,
            ),
            (AdmissionError::InvalidStudent, StatusCode::NOT_FOUND),
            (AdmissionError::DuplicateEnrollment, StatusCode::CONFLICT),
            (
                AdmissionError::StorageUnavailable("down".into()),
                StatusCode::SERVICE_UNAVAILABLE,
            ),
        ];

        for (err, status) in cases {
            assert_eq!(admission_error_response(&err).status(), status, "{err:?}");
        }
    }
}
