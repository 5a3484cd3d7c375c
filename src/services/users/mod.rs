pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::users::requests::{CreateUserRequest, UpdateUserRequest, UserListParams};
use crate::storage::Storage;

pub struct UserService {
    storage: Option<Arc<dyn Storage>>,
}

impl UserService {
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

    pub async fn list_users(
        &self,
        request: &HttpRequest,
        query: UserListParams,
    ) -> ActixResult<HttpResponse> {
        list::list_users(self, request, query).await
    }

    pub async fn create_user(
        &self,
        request: &HttpRequest,
        user_data: CreateUserRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_user(self, request, user_data).await
    }

    pub async fn get_user(&self, request: &HttpRequest, user_id: String) -> ActixResult<HttpResponse> {
        get::get_user(self, request, user_id).await
    }

    pub async fn update_user(
        &self,
        request: &HttpRequest,
        user_id: String,
        update_data: UpdateUserRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_user(self, request, user_id, update_data).await
    }

    // 仍在任教的用户不能删除
    pub async fn delete_user(
        &self,
        request: &HttpRequest,
        user_id: String,
    ) -> ActixResult<HttpResponse> {
        delete::delete_user(self, request, user_id).await
    }
}
