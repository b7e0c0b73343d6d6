// ==========================================
// 组卷引擎 - 组卷编排器
// ==========================================
// 流程: 读取快照 -> 校验 -> 规划 -> 抽题 -> 落库
// 状态: Request -> Validating -> {Invalid | Valid} -> Planning -> Selecting
//       -> {Shortfall | Success}
// 红线: 所有失败状态均为终态,不重试、不部分提交
// 红线: 校验、规划、抽题共用同一份题库快照
// ==========================================

use chrono::Local;
use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::domain::distribution::{AllocationPlan, DistributionRequest};
use crate::domain::item::Item;
use crate::domain::paper::{GeneratedPaper, PaperItem};
use crate::engine::error::GenerationError;
use crate::engine::planner::AllocationPlanner;
use crate::engine::selector::ItemSelector;
use crate::engine::snapshot::CatalogSnapshot;
use crate::engine::statistics::{PoolStatistics, StatisticsAggregator};
use crate::engine::validator::DistributionValidator;
use crate::repository::catalog_repo::Catalog;
use crate::repository::paper_repo::PaperStore;

// ==========================================
// PaperGenerator - 组卷编排器
// ==========================================

pub struct PaperGenerator<C, S>
where
    C: Catalog + ?Sized,
    S: PaperStore + ?Sized,
{
    catalog: Arc<C>,
    store: Arc<S>,
    aggregator: StatisticsAggregator,
    validator: DistributionValidator,
    planner: AllocationPlanner,
    selector: ItemSelector,
}

impl<C, S> PaperGenerator<C, S>
where
    C: Catalog + ?Sized,
    S: PaperStore + ?Sized,
{
    /// 创建新的编排器实例
    ///
    /// # 参数
    /// - catalog: 题库（只读）
    /// - store: 试卷仓储
    pub fn new(catalog: Arc<C>, store: Arc<S>) -> Self {
        Self {
            catalog,
            store,
            aggregator: StatisticsAggregator::new(),
            validator: DistributionValidator::new(),
            planner: AllocationPlanner::new(),
            selector: ItemSelector::new(),
        }
    }

    /// 题组可用题量统计（组卷前提示用）
    pub fn compute_stats(&self, group_id: &str) -> Result<PoolStatistics, GenerationError> {
        Ok(self.aggregator.compute_stats(&*self.catalog, group_id)?)
    }

    /// 预览分配方案（校验 + 规划,不抽题不落库）
    pub fn preview_plan(
        &self,
        request: &DistributionRequest,
    ) -> Result<AllocationPlan, GenerationError> {
        let (_, plan) = self.validated_plan(request)?;
        Ok(plan)
    }

    /// 执行完整组卷流程
    ///
    /// # 返回
    /// - Ok(GeneratedPaper): 已持久化的试卷
    /// - Err(GenerationError): 校验失败 / 抽题不足 / 仓储错误（均未落库）
    pub fn generate(
        &self,
        request: &DistributionRequest,
    ) -> Result<GeneratedPaper, GenerationError> {
        let group_id = request.group_id.as_str();

        // ==========================================
        // 步骤1-2: 快照 + 校验 + 规划
        // ==========================================
        let (snapshot, plan) = self.validated_plan(request)?;

        // ==========================================
        // 步骤3: 抽题
        // ==========================================
        debug!(group_id = %group_id, cells = plan.len(), "开始抽题");
        let selected = self.selector.select(&plan, &snapshot, group_id)?;

        // ==========================================
        // 步骤4: 组装试卷并落库
        // ==========================================
        let paper = self.assemble_paper(group_id, &selected)?;
        self.store.append_paper(&paper)?;

        info!(
            group_id = %group_id,
            paper_id = %paper.paper_id,
            item_count = paper.item_count(),
            "组卷完成"
        );

        Ok(paper)
    }

    fn validated_plan(
        &self,
        request: &DistributionRequest,
    ) -> Result<(CatalogSnapshot, AllocationPlan), GenerationError> {
        let group_id = request.group_id.as_str();

        let snapshot = CatalogSnapshot::capture(&*self.catalog, group_id)?;
        info!(
            group_id = %group_id,
            pool_size = snapshot.len(),
            requested = request.total_requested(),
            "开始组卷"
        );

        self.validator.validate(group_id, request, &snapshot)?;

        let plan = self.planner.plan_request(request);
        info!(
            group_id = %group_id,
            cells = plan.len(),
            planned_total = plan.planned_total(),
            stratified = plan.is_stratified(),
            "分配方案生成完成"
        );

        Ok((snapshot, plan))
    }

    fn assemble_paper(
        &self,
        group_id: &str,
        selected: &[Item],
    ) -> Result<GeneratedPaper, GenerationError> {
        let group_name = match self.catalog.find_group(group_id)? {
            Some(group) => group.group_name,
            None => {
                warn!(group_id = %group_id, "题组信息缺失,以题组ID作为名称");
                group_id.to_string()
            }
        };

        let items = selected
            .iter()
            .enumerate()
            .map(|(idx, item)| PaperItem::snapshot(idx as u32 + 1, item))
            .collect();

        Ok(GeneratedPaper {
            paper_id: Uuid::new_v4().to_string(),
            group_id: group_id.to_string(),
            group_name,
            items,
            created_at: Local::now().naive_local(),
        })
    }
}
