// ==========================================
// 组卷引擎 - 题库统计
// ==========================================
// 职责: 按难度、按知识点、按 (难度, 知识点) 单元格统计可用题量
// 红线: 纯函数,无副作用,题组内题目数线性时间
// ==========================================
// 用途: 组卷前提示调用方 + 作为校验输入
// ==========================================

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

use crate::domain::item::Item;
use crate::domain::types::DifficultyLevel;
use crate::engine::snapshot::CatalogSnapshot;
use crate::repository::catalog_repo::Catalog;
use crate::repository::error::RepositoryResult;

// ==========================================
// PoolStatistics - 题组可用题量统计
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolStatistics {
    /// 题组ID
    pub group_id: String,

    /// 题目总数
    pub total_items: usize,

    /// 各难度题量（四个难度均列出,含 0）
    pub per_difficulty_count: BTreeMap<DifficultyLevel, usize>,

    /// 各知识点题量
    pub per_area_count: BTreeMap<String, usize>,

    /// 单元格题量 (difficulty -> area -> count)
    pub per_cell_count: BTreeMap<DifficultyLevel, BTreeMap<String, usize>>,
}

impl PoolStatistics {
    /// 某难度可用题量（不限知识点）
    pub fn available_at(&self, difficulty: DifficultyLevel) -> usize {
        self.per_difficulty_count
            .get(&difficulty)
            .copied()
            .unwrap_or(0)
    }

    /// 某 (难度, 知识点) 单元格可用题量
    pub fn available_in_cell(&self, difficulty: DifficultyLevel, area: &str) -> usize {
        self.per_cell_count
            .get(&difficulty)
            .and_then(|areas| areas.get(area))
            .copied()
            .unwrap_or(0)
    }
}

// ==========================================
// StatisticsAggregator - 统计聚合器
// ==========================================
// 无状态
#[derive(Debug, Clone, Copy, Default)]
pub struct StatisticsAggregator;

impl StatisticsAggregator {
    pub fn new() -> Self {
        Self
    }

    /// 读取题库并统计
    pub fn compute_stats<C: Catalog + ?Sized>(
        &self,
        catalog: &C,
        group_id: &str,
    ) -> RepositoryResult<PoolStatistics> {
        let snapshot = CatalogSnapshot::capture(catalog, group_id)?;
        Ok(self.summarize_snapshot(&snapshot))
    }

    /// 基于已读取的快照统计
    pub fn summarize_snapshot(&self, snapshot: &CatalogSnapshot) -> PoolStatistics {
        self.summarize(snapshot.group_id(), snapshot.items())
    }

    /// 统计题目列表中属于 group_id 的题目
    pub fn summarize(&self, group_id: &str, items: &[Item]) -> PoolStatistics {
        let mut stats = PoolStatistics {
            group_id: group_id.to_string(),
            per_difficulty_count: DifficultyLevel::ALL.iter().map(|&d| (d, 0)).collect(),
            ..Default::default()
        };

        for item in items.iter().filter(|item| item.group_id == group_id) {
            stats.total_items += 1;
            *stats.per_difficulty_count.entry(item.difficulty).or_insert(0) += 1;
            *stats
                .per_area_count
                .entry(item.knowledge_area.clone())
                .or_insert(0) += 1;
            *stats
                .per_cell_count
                .entry(item.difficulty)
                .or_default()
                .entry(item.knowledge_area.clone())
                .or_insert(0) += 1;
        }

        debug!(
            group_id = %group_id,
            total_items = stats.total_items,
            areas = stats.per_area_count.len(),
            "题库统计完成"
        );

        stats
    }
}
