// ==========================================
// 组卷引擎 - 领域模型层
// ==========================================
// 职责: 定义题目、组卷请求、分配方案、试卷等领域实体
// 红线: 不含数据访问逻辑,不含引擎逻辑
// ==========================================

pub mod distribution;
pub mod item;
pub mod paper;
pub mod types;

// 重导出核心类型
pub use distribution::{AllocationPlan, AreaSlot, DistributionRequest};
pub use item::{Item, QuestionGroup};
pub use paper::{GeneratedPaper, PaperItem};
pub use types::{DifficultyLevel, ParseDifficultyError};
