pub mod create;
pub mod delete;
pub mod get;
pub mod invite_code;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::config::AppConfig;
use crate::domain::InviteCodeAllocator;
use crate::models::classes::requests::{ClassQueryParams, CreateClassRequest, UpdateClassRequest};
use crate::storage::Storage;

pub struct ClassService {
    storage: Option<Arc<dyn Storage>>,
}

impl ClassService {
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

    pub(crate) fn allocator(&self, storage: Arc<dyn Storage>) -> InviteCodeAllocator<dyn Storage> {
        InviteCodeAllocator::new(storage, &AppConfig::get().classes)
    }

    // 获取班级列表
    pub async fn list_classes(
        &self,
        request: &HttpRequest,
        query: ClassQueryParams,
    ) -> ActixResult<HttpResponse> {
        list::list_classes(self, request, query).await
    }

    pub async fn create_class(
        &self,
        request: &HttpRequest,
        class_data: CreateClassRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_class(self, request, class_data).await
    }

    // 根据班级 ID 获取班级信息
    pub async fn get_class(&self, request: &HttpRequest, class_id: i64) -> ActixResult<HttpResponse> {
        get::get_class(self, request, class_id).await
    }

    // 根据班级邀请码获取班级信息
    pub async fn get_class_by_code(
        &self,
        request: &HttpRequest,
        code: String,
    ) -> ActixResult<HttpResponse> {
        get::get_class_by_code(self, request, code).await
    }

    // 更新班级信息
    pub async fn update_class(
        &self,
        request: &HttpRequest,
        class_id: i64,
        update_data: UpdateClassRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_class(self, request, class_id, update_data).await
    }

    // 重新分配邀请码
    pub async fn regenerate_invite_code(
        &self,
        request: &HttpRequest,
        class_id: i64,
    ) -> ActixResult<HttpResponse> {
        invite_code::regenerate_invite_code(self, request, class_id).await
    }

    // 根据班级 ID 删除班级
    pub async fn delete_class(
        &self,
        request: &HttpRequest,
        class_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_class(self, request, class_id).await
    }
}
