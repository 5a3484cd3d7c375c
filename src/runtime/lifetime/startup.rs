use actix_cors::Cors;

use crate::config::{AppConfig, CorsConfig};
use crate::errors::Result;
use crate::storage::Storage;
use std::sync::Arc;
use tracing::{info, warn};

pub struct StartupContext {
    pub storage: Arc<dyn Storage>,
}

/// 输出当前数据概况
async fn log_storage_overview(storage: &Arc<dyn Storage>) {
    match storage.stats_overview().await {
        Ok(overview) => {
            info!(
                "Storage ready: {} user(s), {} department(s), {} subject(s), {} class(es), {} enrollment(s)",
                overview.total_users,
                overview.departments,
                overview.subjects,
                overview.classes,
                overview.enrollments
            );
        }
        Err(e) => {
            warn!("Failed to load storage overview: {}", e);
        }
    }
}

/// 准备服务器启动的上下文
pub async fn prepare_server_startup() -> Result<StartupContext> {
    let config = AppConfig::get();

    let storage = crate::storage::create_storage().await?;
    warn!("Storage backend initialized and migrations completed");

    log_storage_overview(&storage).await;

    info!(
        "Invite codes: length {}, uppercase {}, max attempts {}",
        config.classes.invite_code_length,
        config.classes.invite_code_uppercase,
        config.classes.invite_code_max_attempts
    );

    Ok(StartupContext { storage })
}

/// 按配置构建 CORS 中间件，来源或请求头包含 "*" 时放开限制
pub fn build_cors(cors: &CorsConfig) -> Cors {
    let mut builder = Cors::default()
        .allowed_methods(cors.allowed_methods.iter().map(String::as_str))
        .max_age(cors.max_age);

    if cors.allowed_origins.iter().any(|origin| origin == "*") {
        builder = builder.allow_any_origin();
    } else {
        for origin in &cors.allowed_origins {
            builder = builder.allowed_origin(origin);
        }
    }

    if cors.allowed_headers.iter().any(|header| header == "*") {
        builder.allow_any_header()
    } else {
        builder.allowed_headers(cors.allowed_headers.iter().map(String::as_str))
    }
}
