// ==========================================
// 组卷引擎 - 试卷 Repository Trait
// ==========================================
// 职责: 定义试卷持久化接口
// 红线: 整卷写入原子化,不与历史读取交错
// ==========================================

use crate::domain::paper::GeneratedPaper;
use crate::repository::error::RepositoryResult;

// ==========================================
// PaperStore Trait
// ==========================================
// 实现者: SqlitePaperRepository（使用 rusqlite）
pub trait PaperStore: Send + Sync {
    /// 追加一份试卷（事务化）
    ///
    /// # 返回
    /// - Ok(String): 试卷ID
    fn append_paper(&self, paper: &GeneratedPaper) -> RepositoryResult<String>;

    /// 列出试卷（按生成时间倒序）
    ///
    /// # 参数
    /// - group_id: 可选题组过滤
    fn list_papers(&self, group_id: Option<&str>) -> RepositoryResult<Vec<GeneratedPaper>>;

    /// 按ID查询试卷
    fn find_paper(&self, paper_id: &str) -> RepositoryResult<Option<GeneratedPaper>>;

    /// 删除整份试卷
    ///
    /// # 返回
    /// - Err(RepositoryError::NotFound): 试卷不存在
    fn delete_paper(&self, paper_id: &str) -> RepositoryResult<()>;

    /// 人工移除试卷中的单道题目（不重新分配）
    ///
    /// # 返回
    /// - Err(RepositoryError::NotFound): 试卷或题目不存在
    fn remove_paper_item(&self, paper_id: &str, item_id: &str) -> RepositoryResult<()>;
}
