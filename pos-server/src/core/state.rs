use std::collections::HashMap;
use std::sync::Arc;

use dashmap::DashMap;
use sqlx::SqlitePool;

use shared::message::SyncPayload;

use crate::core::Config;
use crate::db::DbService;
use crate::sync::SyncHub;
use crate::utils::AppError;

/// 资源版本管理器
///
/// 使用 DashMap 实现无锁并发的版本号管理。
/// 每种资源类型维护独立的版本号，支持原子递增。
///
/// # 使用场景
///
/// 用于 broadcast_sync 时自动生成递增的版本号，
/// 客户端通过版本号判断是否漏收了变更（出现跳号则全量刷新）。
#[derive(Debug, Default)]
pub struct ResourceVersions {
    versions: DashMap<String, u64>,
}

impl ResourceVersions {
    /// 创建空的版本管理器
    pub fn new() -> Self {
        Self {
            versions: DashMap::new(),
        }
    }

    /// 递增指定资源的版本号并返回新值
    ///
    /// 如果资源不存在，从 0 开始递增（返回 1）
    pub fn increment(&self, resource: &str) -> u64 {
        let mut entry = self.versions.entry(resource.to_string()).or_insert(0);
        *entry += 1;
        *entry
    }

    /// 获取指定资源的当前版本号
    ///
    /// 如果资源不存在，返回 0
    pub fn get(&self, resource: &str) -> u64 {
        self.versions.get(resource).map(|v| *v).unwrap_or(0)
    }

    /// 所有资源的版本快照 (WS hello 消息用)
    pub fn snapshot(&self) -> HashMap<String, u64> {
        self.versions
            .iter()
            .map(|e| (e.key().clone(), *e.value()))
            .collect()
    }
}

/// 服务器状态 - 持有所有服务的共享引用
///
/// 使用 Arc/浅拷贝，克隆成本极低。
///
/// | 字段 | 说明 |
/// |------|------|
/// | config | 配置项 (不可变) |
/// | pool | SQLite 连接池 |
/// | sync_hub | 同步广播 hub |
/// | resource_versions | 资源版本管理 |
#[derive(Clone)]
pub struct ServerState {
    /// 服务器配置
    pub config: Config,
    /// SQLite 连接池
    pub pool: SqlitePool,
    /// 同步广播 hub
    pub sync_hub: SyncHub,
    /// 资源版本管理器 (用于 broadcast_sync 自动递增版本号)
    pub resource_versions: Arc<ResourceVersions>,
    /// 启动时间戳 (毫秒，健康检查用)
    pub started_at: i64,
}

impl ServerState {
    /// 初始化服务器状态
    ///
    /// 按顺序初始化：
    /// 1. 工作目录结构 (确保目录存在)
    /// 2. 数据库 (work_dir/database/pos.db，自动执行迁移)
    /// 3. 同步 hub
    pub async fn initialize(config: &Config) -> Result<Self, AppError> {
        // 0. Ensure work_dir structure exists
        config
            .ensure_work_dir_structure()
            .map_err(|e| AppError::internal(format!("Failed to create work directory: {e}")))?;

        // 1. Initialize DB
        let db_path = config.database_dir().join("pos.db");
        let db_service = DbService::new(&db_path.to_string_lossy()).await?;

        Ok(Self::with_pool(config.clone(), db_service.pool))
    }

    /// 从现成的连接池构造状态 (测试用内存库走这里)
    pub fn with_pool(config: Config, pool: SqlitePool) -> Self {
        let sync_hub = SyncHub::with_capacity(config.sync_channel_capacity);
        Self {
            config,
            pool,
            sync_hub,
            resource_versions: Arc::new(ResourceVersions::new()),
            started_at: shared::util::now_millis(),
        }
    }

    /// 广播同步消息
    ///
    /// 向所有连接的客户端广播资源变更通知。
    /// 版本号由 ResourceVersions 自动递增管理。
    ///
    /// # 参数
    /// - `resource`: 资源类型 (如 "order", "product", "staff_call")
    /// - `action`: 变更类型 ("created", "updated", "deleted")
    /// - `id`: 资源 ID
    /// - `table_id`: 关联桌台 (订单/呼叫类资源；目录类传 None)
    /// - `data`: 资源数据 (deleted 时为 None)
    pub fn broadcast_sync<T: serde::Serialize>(
        &self,
        resource: &str,
        action: &str,
        id: i64,
        table_id: Option<i64>,
        data: Option<&T>,
    ) {
        let version = self.resource_versions.increment(resource);
        let payload = SyncPayload {
            resource: resource.to_string(),
            version,
            action: action.to_string(),
            id: id.to_string(),
            table_id,
            data: data.and_then(|d| serde_json::to_value(d).ok()),
        };
        self.sync_hub.publish(payload);
    }

    /// 当前所有资源版本快照 (WS hello)
    pub fn versions_snapshot(&self) -> HashMap<String, u64> {
        self.resource_versions.snapshot()
    }
}
