pub mod admit;
pub mod delete;
pub mod get;
pub mod list;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::domain::EnrollmentAdmission;
use crate::models::enrollments::requests::{
    CreateEnrollmentRequest, EnrollmentListParams, JoinClassRequest,
};
use crate::storage::Storage;

pub struct EnrollmentService {
    storage: Option<Arc<dyn Storage>>,
}

impl EnrollmentService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub fn with_storage(storage: Arc<dyn Storage>) -> Self {
        Self {
            storage: Some(storage),
        }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> ActixResult<Arc<dyn Storage>> {
        match &self.storage {
            Some(storage) => Ok(storage.clone()),
            None => super::storage_from_request(request),
        }
    }

    pub(crate) fn admission(&self, storage: Arc<dyn Storage>) -> EnrollmentAdmission<dyn Storage> {
        EnrollmentAdmission::new(storage)
    }

    // 通过班级 ID 选课
    pub async fn enroll(
        &self,
        request: &HttpRequest,
        enrollment_data: CreateEnrollmentRequest,
    ) -> ActixResult<HttpResponse> {
        admit::enroll(self, request, enrollment_data).await
    }

    // 通过邀请码加入班级
    pub async fn join_class(
        &self,
        request: &HttpRequest,
        join_data: JoinClassRequest,
    ) -> ActixResult<HttpResponse> {
        admit::join_class(self, request, join_data).await
    }

    pub async fn list_enrollments(
        &self,
        request: &HttpRequest,
        query: EnrollmentListParams,
    ) -> ActixResult<HttpResponse> {
        list::list_enrollments(self, request, query).await
    }

    pub async fn get_enrollment(
        &self,
        request: &HttpRequest,
        enrollment_id: i64,
    ) -> ActixResult<HttpResponse> {
        get::get_enrollment(self, request, enrollment_id).await
    }

    pub async fn delete_enrollment(
        &self,
        request: &HttpRequest,
        enrollment_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_enrollment(self, request, enrollment_id).await
    }
}
