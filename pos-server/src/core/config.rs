use std::path::PathBuf;

/// 服务器配置
///
/// # 环境变量
///
/// 所有配置项都可以通过环境变量覆盖：
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | WORK_DIR | /var/lib/cafe-pos | 工作目录 (数据库、日志) |
/// | HTTP_PORT | 3000 | HTTP 服务端口 |
/// | PUBLIC_BASE_URL | http://localhost:3000 | 二维码指向的外部地址 |
/// | ENVIRONMENT | development | 运行环境 |
/// | SYNC_CHANNEL_CAPACITY | 256 | 同步广播通道容量 |
///
/// # 示例
///
/// ```ignore
/// WORK_DIR=/data/pos HTTP_PORT=8080 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// 工作目录，存储数据库、日志等文件
    pub work_dir: String,
    /// HTTP API 服务端口
    pub http_port: u16,
    /// 顾客扫码后打开的外部地址 (QR 码内容前缀)
    pub public_base_url: String,
    /// 运行环境: development | staging | production
    pub environment: String,
    /// 同步广播通道容量 (缓冲突发变更)
    pub sync_channel_capacity: usize,
    /// 顾客订单历史回看窗口 (小时)
    pub order_history_hours: i64,
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// 如果环境变量未设置，使用默认值
    pub fn from_env() -> Self {
        Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "/var/lib/cafe-pos".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            public_base_url: std::env::var("PUBLIC_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:3000".into()),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            sync_channel_capacity: std::env::var("SYNC_CHANNEL_CAPACITY")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(256),
            order_history_hours: std::env::var("ORDER_HISTORY_HOURS")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(24),
        }
    }

    /// 使用自定义值覆盖部分配置
    ///
    /// 常用于测试场景
    pub fn with_overrides(work_dir: impl Into<String>, http_port: u16) -> Self {
        let mut config = Self::from_env();
        config.work_dir = work_dir.into();
        config.http_port = http_port;
        config
    }

    /// 是否生产环境
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// 是否开发环境
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// 数据库目录 (work_dir/database)
    pub fn database_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("database")
    }

    /// 日志目录 (work_dir/logs)
    pub fn log_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("logs")
    }

    /// 确保工作目录结构存在
    pub fn ensure_work_dir_structure(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(self.database_dir())?;
        std::fs::create_dir_all(self.log_dir())?;
        Ok(())
    }

    /// 桌台点单页地址 (QR 码内容)
    pub fn order_page_url(&self, table_id: i64) -> String {
        format!(
            "{}/order/{}",
            self.public_base_url.trim_end_matches('/'),
            table_id
        )
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_page_url_strips_trailing_slash() {
        let mut config = Config::from_env();
        config.public_base_url = "https://cafe.example.com/".into();
        assert_eq!(
            config.order_page_url(42),
            "https://cafe.example.com/order/42"
        );
    }
}
