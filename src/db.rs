// ==========================================
// 组卷引擎 - SQLite 连接初始化
// ==========================================
// 目标:
// - 统一所有连接的 PRAGMA 行为（外键约束每个连接单独开启）
// - 统一 busy_timeout,减少并发写入时的偶发 busy 错误
// - 通过 PRAGMA user_version 标记库结构版本
// ==========================================

use rusqlite::Connection;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::warn;

/// 默认 busy_timeout（毫秒）
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

/// 当前代码期望的库结构版本
///
/// 只做告警,不做自动迁移
pub const CURRENT_SCHEMA_VERSION: i64 = 1;

/// 配置 SQLite 连接的统一 PRAGMA
pub fn configure_sqlite_connection(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(Duration::from_millis(DEFAULT_BUSY_TIMEOUT_MS))?;
    Ok(())
}

/// 打开 SQLite 连接并应用统一配置
pub fn open_sqlite_connection(db_path: &str) -> rusqlite::Result<Connection> {
    let conn = Connection::open(db_path)?;
    configure_sqlite_connection(&conn)?;
    stamp_schema_version(&conn)?;
    Ok(conn)
}

/// 打开可在多个仓储间共享的连接
pub fn open_shared_connection(db_path: &str) -> rusqlite::Result<Arc<Mutex<Connection>>> {
    Ok(Arc::new(Mutex::new(open_sqlite_connection(db_path)?)))
}

/// 读取库结构版本（新库为 0）
pub fn read_schema_version(conn: &Connection) -> rusqlite::Result<i64> {
    conn.query_row("PRAGMA user_version", [], |row| row.get(0))
}

/// 新库写入当前版本;旧版本或更高版本只告警
fn stamp_schema_version(conn: &Connection) -> rusqlite::Result<()> {
    let version = read_schema_version(conn)?;
    if version == 0 {
        conn.pragma_update(None, "user_version", CURRENT_SCHEMA_VERSION)?;
    } else if version != CURRENT_SCHEMA_VERSION {
        warn!(
            found = version,
            expected = CURRENT_SCHEMA_VERSION,
            "数据库结构版本与当前程序不一致"
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_new_database_is_stamped() {
        let temp_file = NamedTempFile::new().unwrap();
        let path = temp_file.path().to_str().unwrap();

        let conn = open_sqlite_connection(path).unwrap();
        assert_eq!(read_schema_version(&conn).unwrap(), CURRENT_SCHEMA_VERSION);

        let fk: i64 = conn
            .query_row("PRAGMA foreign_keys", [], |row| row.get(0))
            .unwrap();
        assert_eq!(fk, 1);
    }

    #[test]
    fn test_existing_version_is_kept() {
        let temp_file = NamedTempFile::new().unwrap();
        let path = temp_file.path().to_str().unwrap();
        {
            let conn = Connection::open(path).unwrap();
            conn.pragma_update(None, "user_version", 7).unwrap();
        }

        let conn = open_sqlite_connection(path).unwrap();
        assert_eq!(read_schema_version(&conn).unwrap(), 7);
    }
}
