use serde::Serialize;
use ts_rs::TS;

// 存活检查
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "system.ts")]
pub struct HealthResponse {
    pub status: String,
    pub system_name: String,
    pub version: String,
    pub uptime_seconds: i64,
}
