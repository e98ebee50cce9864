use crate::config::AppConfig;
use crate::storage::Storage;
use std::sync::Arc;
use tracing::{debug, warn};

pub struct StartupContext {
    pub storage: Arc<dyn Storage>,
}

/// 准备服务器启动的上下文
/// 安装 TLS 加密后端，连接数据库并执行迁移
pub async fn prepare_server_startup() -> StartupContext {
    rustls::crypto::ring::default_provider()
        .install_default()
        .expect("Failed to install rustls crypto provider");

    let storage = crate::storage::create_storage()
        .await
        .expect("Failed to create storage backend");
    warn!("Storage backend initialized and migrations completed");

    let assignment = &AppConfig::get().assignment;
    debug!(
        default_max_submissions = assignment.default_max_submissions,
        max_commit_retries = assignment.max_commit_retries,
        "Assignment engine settings loaded"
    );

    StartupContext { storage }
}
