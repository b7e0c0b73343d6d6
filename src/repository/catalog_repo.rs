// ==========================================
// 组卷引擎 - 题库 Repository Trait
// ==========================================
// 职责: 定义组卷引擎所需的题库只读接口
// 红线: 引擎只读题库,不增删改题目
// ==========================================

use crate::domain::item::{Item, QuestionGroup};
use crate::domain::types::DifficultyLevel;
use crate::repository::error::RepositoryResult;

// ==========================================
// Catalog Trait
// ==========================================
// 用途: 题目查询与计数（单次组卷调用内须保持一致）
// 实现者: SqliteCatalogRepository（使用 rusqlite）
pub trait Catalog: Send + Sync {
    /// 查询题组内题目
    ///
    /// # 参数
    /// - group_id: 题组ID
    /// - difficulty: 可选难度过滤
    /// - area: 可选知识点过滤
    ///
    /// # 返回
    /// 按 item_id 升序的题目列表
    fn query_items(
        &self,
        group_id: &str,
        difficulty: Option<DifficultyLevel>,
        area: Option<&str>,
    ) -> RepositoryResult<Vec<Item>>;

    /// 统计题组内题目数（过滤条件同 query_items）
    fn count_items(
        &self,
        group_id: &str,
        difficulty: Option<DifficultyLevel>,
        area: Option<&str>,
    ) -> RepositoryResult<usize>;

    /// 查询题组信息（用于试卷冗余题组名称）
    fn find_group(&self, group_id: &str) -> RepositoryResult<Option<QuestionGroup>>;
}
