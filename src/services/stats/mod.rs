//! 只读统计

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::{ApiResponse, stats::responses::OccupancyReport};
use crate::storage::Storage;

use super::storage_error_response;

pub struct StatsService {
    storage: Option<Arc<dyn Storage>>,
}

impl StatsService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> ActixResult<Arc<dyn Storage>> {
        match &self.storage {
            Some(storage) => Ok(storage.clone()),
            None => super::storage_from_request(request),
        }
    }

    // 系统总览
    pub async fn overview(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request)?;

        match storage.stats_overview().await {
            Ok(stats) => Ok(HttpResponse::Ok().json(ApiResponse::success(
                stats,
                "Overview retrieved successfully",
            ))),
            Err(e) => Ok(storage_error_response("Failed to compute overview", &e)),
        }
    }

    // 班级占用情况
    pub async fn occupancy(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request)?;

        match storage.list_class_occupancy().await {
            Ok(rows) => Ok(HttpResponse::Ok().json(ApiResponse::success(
                OccupancyReport::from_rows(rows),
                "Occupancy retrieved successfully",
            ))),
            Err(e) => Ok(storage_error_response("Failed to compute occupancy", &e)),
        }
    }

    // 院系统计
    pub async fn departments(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request)?;

        match storage.list_department_stats().await {
            Ok(stats) => Ok(HttpResponse::Ok().json(ApiResponse::success(
                stats,
                "Department statistics retrieved successfully",
            ))),
            Err(e) => Ok(storage_error_response(
                "Failed to compute department statistics",
                &e,
            )),
        }
    }
}
