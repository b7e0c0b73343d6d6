// ==========================================
// 组卷引擎 - 引擎层
// ==========================================
// 职责: 实现组卷规则,不拼 SQL
// 红线: 所有拒绝必须输出可解释原因
// ==========================================

pub mod error;
pub mod orchestrator;
pub mod planner;
pub mod selector;
pub mod snapshot;
pub mod statistics;
pub mod validator;

// 重导出核心引擎
pub use error::{GenerationError, Shortfall};
pub use orchestrator::PaperGenerator;
pub use planner::AllocationPlanner;
pub use selector::ItemSelector;
pub use snapshot::CatalogSnapshot;
pub use statistics::{PoolStatistics, StatisticsAggregator};
pub use validator::DistributionValidator;
