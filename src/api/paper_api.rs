// ==========================================
// 组卷引擎 - 试卷 API
// ==========================================
// 职责: 题库统计查询、组卷、试卷历史管理
// 红线: 展示层原样展示组卷错误类别与维度数值
// ==========================================

use std::sync::Arc;
use tracing::{info, warn};

use crate::api::error::{ApiError, ApiResult};
use crate::config::{ConfigManager, GenerationConfigReader};
use crate::domain::distribution::{AllocationPlan, DistributionRequest};
use crate::domain::paper::GeneratedPaper;
use crate::domain::types::DifficultyLevel;
use crate::engine::{PaperGenerator, PoolStatistics};
use crate::repository::{Catalog, PaperStore, SqliteCatalogRepository, SqlitePaperRepository};

// ==========================================
// PaperApi - 试卷 API
// ==========================================

/// 试卷API
///
/// 职责：
/// 1. 组卷前的题库统计
/// 2. 组卷（请求规模限制 + 引擎错误转换）
/// 3. 试卷查询、整卷删除、人工移除单题
pub struct PaperApi {
    catalog_repo: Arc<SqliteCatalogRepository>,
    paper_repo: Arc<SqlitePaperRepository>,
    config_manager: Arc<ConfigManager>,
    generator: PaperGenerator<SqliteCatalogRepository, SqlitePaperRepository>,
}

impl PaperApi {
    /// 创建新的PaperApi实例
    pub fn new(
        catalog_repo: Arc<SqliteCatalogRepository>,
        paper_repo: Arc<SqlitePaperRepository>,
        config_manager: Arc<ConfigManager>,
    ) -> Self {
        let generator = PaperGenerator::new(catalog_repo.clone(), paper_repo.clone());
        Self {
            catalog_repo,
            paper_repo,
            config_manager,
            generator,
        }
    }

    // ==========================================
    // 题库统计
    // ==========================================

    /// 查询题组可用题量统计
    pub fn get_pool_statistics(&self, group_id: &str) -> ApiResult<PoolStatistics> {
        let group_id = Self::require_group_id(group_id)?;
        Ok(self.generator.compute_stats(group_id)?)
    }

    /// 按条件统计题目数
    pub fn count_items(
        &self,
        group_id: &str,
        difficulty: Option<DifficultyLevel>,
        area: Option<&str>,
    ) -> ApiResult<usize> {
        let group_id = Self::require_group_id(group_id)?;
        Ok(self.catalog_repo.count_items(group_id, difficulty, area)?)
    }

    // ==========================================
    // 组卷
    // ==========================================

    /// 预览分配方案（不抽题不落库）
    pub fn preview_plan(&self, request: &DistributionRequest) -> ApiResult<AllocationPlan> {
        let request = self.check_request(request)?;
        Ok(self.generator.preview_plan(&request)?)
    }

    /// 组卷并保存
    pub fn generate_paper(&self, request: &DistributionRequest) -> ApiResult<GeneratedPaper> {
        let request = self.check_request(request)?;

        match self.generator.generate(&request) {
            Ok(paper) => Ok(paper),
            Err(e) => {
                warn!(
                    group_id = %request.group_id,
                    kind = e.kind(),
                    error = %e,
                    "组卷失败"
                );
                Err(e.into())
            }
        }
    }

    // ==========================================
    // 试卷历史
    // ==========================================

    /// 列出试卷（可按题组过滤,按生成时间倒序）
    pub fn list_papers(&self, group_id: Option<&str>) -> ApiResult<Vec<GeneratedPaper>> {
        let group_id = group_id.map(str::trim).filter(|g| !g.is_empty());
        Ok(self.paper_repo.list_papers(group_id)?)
    }

    /// 查询试卷详情
    pub fn get_paper(&self, paper_id: &str) -> ApiResult<GeneratedPaper> {
        self.paper_repo
            .find_paper(paper_id)?
            .ok_or_else(|| ApiError::NotFound(format!("试卷(id={})不存在", paper_id)))
    }

    /// 删除整份试卷
    pub fn delete_paper(&self, paper_id: &str) -> ApiResult<()> {
        self.paper_repo.delete_paper(paper_id)?;
        info!(paper_id = %paper_id, "试卷已删除");
        Ok(())
    }

    /// 人工移除试卷中的单道题目（不重新组卷）
    pub fn remove_paper_item(&self, paper_id: &str, item_id: &str) -> ApiResult<()> {
        self.paper_repo.remove_paper_item(paper_id, item_id)?;
        info!(paper_id = %paper_id, item_id = %item_id, "试卷题目已移除");
        Ok(())
    }

    // ==========================================
    // 参数校验
    // ==========================================

    fn require_group_id(group_id: &str) -> ApiResult<&str> {
        let trimmed = group_id.trim();
        if trimmed.is_empty() {
            return Err(ApiError::InvalidInput("题组ID不能为空".to_string()));
        }
        Ok(trimmed)
    }

    /// 校验请求并返回规范化副本（题组ID去除首尾空白）
    fn check_request(&self, request: &DistributionRequest) -> ApiResult<DistributionRequest> {
        let group_id = Self::require_group_id(&request.group_id)?;

        let max_total = self
            .config_manager
            .get_max_total_items()
            .map_err(|e| ApiError::InternalError(format!("读取组卷配置失败: {}", e)))?;
        let total = request.total_requested();
        if total > max_total as u64 {
            return Err(ApiError::InvalidInput(format!(
                "请求总题量 {} 超过上限 {}",
                total, max_total
            )));
        }

        Ok(DistributionRequest {
            group_id: group_id.to_string(),
            ..request.clone()
        })
    }
}
