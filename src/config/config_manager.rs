// ==========================================
// 组卷引擎 - 配置管理器
// ==========================================
// 职责: 配置加载、查询、覆写管理
// 存储: config_kv 表 (key-value + scope)
// ==========================================

use crate::config::generation_config_trait::GenerationConfigReader;
use crate::db::{configure_sqlite_connection, open_sqlite_connection};
use rusqlite::{params, Connection, OptionalExtension};
use std::error::Error;
use std::sync::{Arc, Mutex};

/// 配置作用域（当前仅支持 global）
pub const GLOBAL_SCOPE: &str = "global";

/// 单次组卷最大总题量默认值
pub const DEFAULT_MAX_TOTAL_ITEMS: u32 = 200;

// ==========================================
// 配置键
// ==========================================
pub mod config_keys {
    // 组卷
    pub const MAX_TOTAL_ITEMS: &str = "paper_max_total_items";
}

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
pub struct ConfigManager {
    conn: Arc<Mutex<Connection>>,
}

type ConfigResult<T> = Result<T, Box<dyn Error + Send + Sync>>;

impl ConfigManager {
    /// 创建新的 ConfigManager 实例
    ///
    /// # 参数
    /// - db_path: 数据库文件路径
    pub fn new(db_path: &str) -> ConfigResult<Self> {
        let conn = open_sqlite_connection(db_path)?;
        let manager = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        manager.ensure_table()?;
        Ok(manager)
    }

    /// 从已有连接创建 ConfigManager
    ///
    /// 说明：为保证连接行为一致,会对传入连接再次应用统一 PRAGMA（幂等）。
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> ConfigResult<Self> {
        {
            let conn_guard = conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;
            configure_sqlite_connection(&conn_guard)?;
        }

        let manager = Self { conn };
        manager.ensure_table()?;
        Ok(manager)
    }

    fn ensure_table(&self) -> ConfigResult<()> {
        let conn = self.conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS config_kv (
              scope_id TEXT NOT NULL,
              key TEXT NOT NULL,
              value TEXT NOT NULL,
              updated_at TEXT NOT NULL DEFAULT (datetime('now')),
              PRIMARY KEY (scope_id, key)
            );
            "#,
        )?;
        Ok(())
    }

    /// 读取 global scope 的配置值
    ///
    /// # 返回
    /// - Some(String): 配置值
    /// - None: 配置不存在
    pub fn get_global_config_value(&self, key: &str) -> ConfigResult<Option<String>> {
        let conn = self.conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;

        let value = conn
            .query_row(
                "SELECT value FROM config_kv WHERE scope_id = ?1 AND key = ?2",
                params![GLOBAL_SCOPE, key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    /// 写入 global scope 的配置值（存在则覆盖）
    pub fn set_global_config_value(&self, key: &str, value: &str) -> ConfigResult<()> {
        let conn = self.conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;
        conn.execute(
            r#"
            INSERT INTO config_kv (scope_id, key, value) VALUES (?1, ?2, ?3)
            ON CONFLICT(scope_id, key) DO UPDATE SET
                value = excluded.value,
                updated_at = datetime('now')
            "#,
            params![GLOBAL_SCOPE, key, value],
        )?;
        Ok(())
    }

    /// 读取配置值,带默认值
    fn get_config_or_default(&self, key: &str, default: &str) -> ConfigResult<String> {
        Ok(self
            .get_global_config_value(key)?
            .unwrap_or_else(|| default.to_string()))
    }
}

impl GenerationConfigReader for ConfigManager {
    fn get_max_total_items(&self) -> ConfigResult<u32> {
        let value = self.get_config_or_default(
            config_keys::MAX_TOTAL_ITEMS,
            &DEFAULT_MAX_TOTAL_ITEMS.to_string(),
        )?;
        match value.trim().parse::<u32>() {
            Ok(n) if n > 0 => Ok(n),
            _ => Ok(DEFAULT_MAX_TOTAL_ITEMS),
        }
    }
}
