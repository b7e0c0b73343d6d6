// ==========================================
// 分层抽样组卷引擎 - 核心库
// ==========================================
// 技术栈: Rust + SQLite
// 系统定位: 按难度/知识点分布从题库抽题组卷
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 数据仓储层 - 题库与试卷存储
pub mod repository;

// 引擎层 - 统计/校验/分配/抽题
pub mod engine;

// 配置层 - 系统配置
pub mod config;

// 数据库基础设施（连接初始化/PRAGMA 统一）
pub mod db;

// 日志系统
pub mod logging;

// API 层 - 业务接口
pub mod api;

// 应用层 - 共享状态
pub mod app;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::{
    AllocationPlan, AreaSlot, DifficultyLevel, DistributionRequest, GeneratedPaper, Item,
    PaperItem, QuestionGroup,
};

// 仓储
pub use repository::{
    Catalog, PaperStore, RepositoryError, SqliteCatalogRepository, SqlitePaperRepository,
};

// 引擎
pub use engine::{
    AllocationPlanner, CatalogSnapshot, DistributionValidator, GenerationError, ItemSelector,
    PaperGenerator, PoolStatistics, Shortfall, StatisticsAggregator,
};

// API
pub use api::{ApiError, ApiResult, PaperApi};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "分层抽样组卷引擎";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
        assert!(!APP_NAME.is_empty());
    }
}
