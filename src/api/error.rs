// ==========================================
// 组卷引擎 - API层错误类型
// ==========================================
// 职责: 定义API层错误类型,将仓储/引擎错误转换为展示层可直接使用的错误
// 红线: 组卷拒绝必须原样携带错误类别与维度数值
// ==========================================

use crate::engine::error::GenerationError;
use crate::repository::error::RepositoryError;
use thiserror::Error;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // 业务规则错误
    // ==========================================
    #[error("无效输入: {0}")]
    InvalidInput(String),

    #[error("资源未找到: {0}")]
    NotFound(String),

    #[error("业务规则违反: {0}")]
    BusinessRuleViolation(String),

    /// 组卷被拒绝（校验失败或抽题不足）
    #[error("组卷失败[{kind}]: {message}")]
    GenerationRejected {
        kind: String,
        message: String,
        details: serde_json::Value,
    },

    // ==========================================
    // 数据访问错误
    // ==========================================
    #[error("数据库错误: {0}")]
    DatabaseError(String),

    #[error("数据库连接失败: {0}")]
    DatabaseConnectionError(String),

    // ==========================================
    // 通用错误
    // ==========================================
    #[error("内部错误: {0}")]
    InternalError(String),
}

// ==========================================
// 从 RepositoryError 转换
// ==========================================
impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound { entity, id } => {
                ApiError::NotFound(format!("{}(id={})不存在", entity, id))
            }
            RepositoryError::LockError(msg) => {
                ApiError::DatabaseConnectionError(format!("数据库锁获取失败: {}", msg))
            }
            RepositoryError::Busy(msg) => ApiError::DatabaseError(format!("数据库繁忙: {}", msg)),
            RepositoryError::DatabaseQueryError(msg) => ApiError::DatabaseError(msg),
            RepositoryError::UniqueConstraintViolation(msg) => {
                ApiError::BusinessRuleViolation(format!("唯一约束违反: {}", msg))
            }
            RepositoryError::ForeignKeyViolation(msg) => {
                ApiError::BusinessRuleViolation(format!("外键约束违反: {}", msg))
            }
            RepositoryError::CorruptRecord { column, message } => {
                ApiError::DatabaseError(format!("记录损坏(第{}列): {}", column, message))
            }
        }
    }
}

// ==========================================
// 从 GenerationError 转换
// ==========================================
impl From<GenerationError> for ApiError {
    fn from(err: GenerationError) -> Self {
        match err {
            GenerationError::Repository(inner) => ApiError::from(inner),
            rejection => ApiError::GenerationRejected {
                kind: rejection.kind().to_string(),
                message: rejection.to_string(),
                details: rejection.details(),
            },
        }
    }
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;
