//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。

mod assignments;
mod evaluators;
mod hackathons;
mod submissions;
mod users;

#[cfg(test)]
pub(crate) mod testing;

use crate::config::{AppConfig, DatabaseConfig};
use crate::errors::{HackathonError, Result};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::time::Duration;
use tracing::{debug, info};

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 根据全局配置创建存储实例并运行迁移
    pub async fn new_async() -> Result<Self> {
        let config = &AppConfig::get().database;
        let db_url = Self::build_database_url(&config.url)?;

        let db = if db_url.starts_with("sqlite:") {
            Self::connect_sqlite(&db_url, config).await?
        } else {
            Self::connect_generic(&db_url, config).await?
        };

        let storage = Self::from_connection(db).await?;
        info!("评委分配存储初始化完成，数据库: {}", db_url);
        Ok(storage)
    }

    /// 使用已有连接创建存储实例，迁移会在这里执行
    pub async fn from_connection(db: DatabaseConnection) -> Result<Self> {
        Migrator::up(&db, None)
            .await
            .map_err(|e| HackathonError::database_operation(format!("数据库迁移失败: {e}")))?;
        debug!("数据库迁移已完成");

        Ok(Self { db })
    }

    /// SQLite 连接（WAL 模式，启用外键）
    async fn connect_sqlite(url: &str, config: &DatabaseConfig) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| HackathonError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            .foreign_keys(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            // 分配提交会在短事务中竞争写锁
            .busy_timeout(Duration::from_secs(config.timeout.max(1)))
            .pragma("temp_store", "memory");

        let pool = SqlitePoolOptions::new()
            .max_connections(config.pool_size)
            .min_connections(1)
            .acquire_timeout(Duration::from_secs(config.timeout))
            .idle_timeout(Duration::from_secs(300))
            .connect_with(opt)
            .await
            .map_err(|e| HackathonError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// PostgreSQL / MySQL 连接
    async fn connect_generic(url: &str, config: &DatabaseConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(config.pool_size)
            .min_connections(config.pool_size.min(5))
            .connect_timeout(Duration::from_secs(config.timeout))
            .acquire_timeout(Duration::from_secs(config.timeout))
            .idle_timeout(Duration::from_secs(600))
            .sqlx_logging(false);

        Database::connect(opt)
            .await
            .map_err(|e| HackathonError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 从 URL 推断数据库类型
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite:") {
            Ok(url.to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") {
            Ok(format!("sqlite://{url}?mode=rwc"))
        } else if url == ":memory:" {
            Ok("sqlite::memory:".to_string())
        } else if ["postgres://", "postgresql://", "mysql://", "mariadb://"]
            .iter()
            .any(|scheme| url.starts_with(scheme))
        {
            Ok(url.to_string())
        } else {
            Err(HackathonError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite:, postgres://, mysql://, 或 .db/.sqlite 文件路径"
            )))
        }
    }
}

// Storage trait 实现
use crate::models::{
    assignments::entities::{BindingOutcome, BindingWrite, JudgeAssignment},
    evaluators::{entities::Evaluator, requests::EvaluatorListQuery},
    hackathons::entities::Hackathon,
    submissions::entities::Submission,
    users::entities::User,
};
use crate::storage::Storage;
use async_trait::async_trait;
use std::collections::HashSet;

#[async_trait]
impl Storage for SeaOrmStorage {
    // 用户模块
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>> {
        self.get_user_by_id_impl(id).await
    }

    // 黑客松模块
    async fn get_hackathon_by_id(&self, hackathon_id: i64) -> Result<Option<Hackathon>> {
        self.get_hackathon_by_id_impl(hackathon_id).await
    }

    // 评委模块
    async fn list_evaluators(
        &self,
        hackathon_id: i64,
        query: EvaluatorListQuery,
    ) -> Result<Vec<Evaluator>> {
        self.list_evaluators_impl(hackathon_id, query).await
    }

    // 提交模块
    async fn list_round_submissions(
        &self,
        hackathon_id: i64,
        round_index: i32,
    ) -> Result<Vec<Submission>> {
        self.list_round_submissions_impl(hackathon_id, round_index)
            .await
    }

    async fn list_scored_submission_ids(
        &self,
        hackathon_id: i64,
        round_index: i32,
    ) -> Result<HashSet<i64>> {
        self.list_scored_submission_ids_impl(hackathon_id, round_index)
            .await
    }

    // 分配模块
    async fn list_judge_assignments(&self, hackathon_id: i64) -> Result<Vec<JudgeAssignment>> {
        self.list_judge_assignments_impl(hackathon_id).await
    }

    async fn commit_submission_binding(&self, write: BindingWrite) -> Result<BindingOutcome> {
        self.commit_submission_binding_impl(write).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_database_url_infers_scheme() {
        assert_eq!(
            SeaOrmStorage::build_database_url("hackjudge.db").unwrap(),
            "sqlite://hackjudge.db?mode=rwc"
        );
        assert_eq!(
            SeaOrmStorage::build_database_url(":memory:").unwrap(),
            "sqlite::memory:"
        );
        assert_eq!(
            SeaOrmStorage::build_database_url("postgres://u:p@localhost/judge").unwrap(),
            "postgres://u:p@localhost/judge"
        );
    }

    #[test]
    fn test_build_database_url_rejects_unknown() {
        let err = SeaOrmStorage::build_database_url("redis://localhost").unwrap_err();
        assert_eq!(err.code(), "E003");
    }
}
