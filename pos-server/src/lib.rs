//! POS Server - 咖啡店自助点单系统服务端
//!
//! # 架构概述
//!
//! 本模块是服务端的主入口，提供以下核心功能：
//!
//! - **数据库** (`db`): 嵌入式 SQLite 存储 (sqlx, WAL)
//! - **HTTP API** (`api`): RESTful API 接口 (管理端 + 顾客端)
//! - **实时同步** (`sync`): WebSocket 变更通知
//! - **二维码导出** (`qr`): 桌台点单二维码 PNG/ZIP
//!
//! # 模块结构
//!
//! ```text
//! pos-server/src/
//! ├── core/          # 配置、状态、服务器
//! ├── api/           # HTTP 路由和处理器
//! ├── db/            # 数据库层 (repositories)
//! ├── sync/          # 同步广播 hub
//! ├── qr/            # 二维码渲染
//! └── utils/         # 工具函数
//! ```

pub mod api;
pub mod core;
pub mod db;
pub mod qr;
pub mod sync;
pub mod utils;

// Re-export 公共类型
pub use crate::core::{Config, Server, ServerState};
pub use sync::SyncHub;
pub use utils::{AppError, AppResult};

// Re-export unified error types from shared
pub use utils::{ApiResponse, ErrorCategory, ErrorCode};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

pub fn print_banner() {
    println!(
        r#"
   ____  ____  _____
  / __ \/ __ \/ ___/
 / /_/ / / / /\__ \
/ ____/ /_/ /___/ /
\/     \____//____/  cafe edition
    "#
    );
}

/// 设置运行环境 (dotenv + 日志)
pub fn setup_environment() -> anyhow::Result<()> {
    // Load .env file (missing file is fine)
    let _ = dotenvy::dotenv();

    utils::logger::init_logger();
    Ok(())
}
