// ==========================================
// 组卷引擎 - API 层
// ==========================================
// 职责: 面向展示层的业务接口,参数校验与错误转换
// ==========================================

pub mod error;
pub mod paper_api;

pub use error::{ApiError, ApiResult};
pub use paper_api::PaperApi;
