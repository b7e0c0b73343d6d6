// ==========================================
// 组卷引擎 - 仓储层错误类型
// ==========================================
// 工具: thiserror 派生宏
// 约束: 约束冲突按 SQLite 扩展错误码区分,不解析错误文本
// ==========================================

use rusqlite::ffi;
use thiserror::Error;

/// 仓储层错误类型
#[derive(Error, Debug)]
pub enum RepositoryError {
    #[error("记录未找到: {entity} with id={id}")]
    NotFound { entity: String, id: String },

    #[error("数据库锁获取失败: {0}")]
    LockError(String),

    #[error("数据库繁忙: {0}")]
    Busy(String),

    #[error("数据库查询失败: {0}")]
    DatabaseQueryError(String),

    #[error("唯一约束违反: {0}")]
    UniqueConstraintViolation(String),

    #[error("外键约束违反: {0}")]
    ForeignKeyViolation(String),

    // 库中存有无法识别的值（例如未知难度标签）
    #[error("记录损坏 (column={column}): {message}")]
    CorruptRecord { column: usize, message: String },
}

impl From<rusqlite::Error> for RepositoryError {
    fn from(err: rusqlite::Error) -> Self {
        match err {
            rusqlite::Error::SqliteFailure(code, msg) => {
                let text = msg.unwrap_or_else(|| code.to_string());
                match code.extended_code {
                    ffi::SQLITE_CONSTRAINT_UNIQUE | ffi::SQLITE_CONSTRAINT_PRIMARYKEY => {
                        RepositoryError::UniqueConstraintViolation(text)
                    }
                    ffi::SQLITE_CONSTRAINT_FOREIGNKEY => RepositoryError::ForeignKeyViolation(text),
                    _ if code.code == rusqlite::ErrorCode::DatabaseBusy
                        || code.code == rusqlite::ErrorCode::DatabaseLocked =>
                    {
                        RepositoryError::Busy(text)
                    }
                    _ => RepositoryError::DatabaseQueryError(text),
                }
            }
            rusqlite::Error::FromSqlConversionFailure(column, _, source) => {
                RepositoryError::CorruptRecord {
                    column,
                    message: source.to_string(),
                }
            }
            other => RepositoryError::DatabaseQueryError(other.to_string()),
        }
    }
}

/// Result 类型别名
pub type RepositoryResult<T> = Result<T, RepositoryError>;
