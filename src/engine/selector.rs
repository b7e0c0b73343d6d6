// ==========================================
// 组卷引擎 - 抽题器
// ==========================================
// 职责: 按分配方案从快照中无放回抽题
// 规则:
// 1. 先检查所有计划量 > 0 的单元格,可用量不足记为缺口并继续检查其余单元格
// 2. 存在任何缺口 -> 整体失败,返回全部缺口（不返回部分试卷）
// 3. 无缺口 -> 每个单元格 Fisher-Yates 洗牌后取前 k 道
// 4. 输出按 难度 -> 知识点 固定顺序拼接
// ==========================================

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, warn};

use crate::domain::distribution::{AllocationPlan, AreaSlot};
use crate::domain::item::Item;
use crate::domain::types::DifficultyLevel;
use crate::engine::error::{GenerationError, Shortfall};
use crate::engine::snapshot::CatalogSnapshot;

// ==========================================
// ItemSelector - 抽题器
// ==========================================
#[derive(Debug, Clone, Copy, Default)]
pub struct ItemSelector;

impl ItemSelector {
    pub fn new() -> Self {
        Self
    }

    /// 按方案抽题（线程本地随机源）
    pub fn select(
        &self,
        plan: &AllocationPlan,
        snapshot: &CatalogSnapshot,
        group_id: &str,
    ) -> Result<Vec<Item>, GenerationError> {
        self.select_with_rng(plan, snapshot, group_id, &mut rand::thread_rng())
    }

    /// 按方案抽题（指定随机源）
    pub fn select_with_rng<R: Rng + ?Sized>(
        &self,
        plan: &AllocationPlan,
        snapshot: &CatalogSnapshot,
        group_id: &str,
        rng: &mut R,
    ) -> Result<Vec<Item>, GenerationError> {
        // 第一遍: 收集候选并检查缺口
        let mut candidates: Vec<(DifficultyLevel, &AreaSlot, u32, Vec<&Item>)> = Vec::new();
        let mut shortfalls = Vec::new();

        for (difficulty, slot, planned) in plan.cells().filter(|&(_, _, k)| k > 0) {
            let eligible: Vec<&Item> = snapshot
                .items()
                .iter()
                .filter(|item| {
                    item.group_id == group_id
                        && item.difficulty == difficulty
                        && slot.matches(&item.knowledge_area)
                })
                .collect();

            if eligible.len() < planned as usize {
                warn!(
                    difficulty = %difficulty,
                    area = %slot,
                    requested = planned,
                    available = eligible.len(),
                    "单元格可用题量不足"
                );
                shortfalls.push(Shortfall {
                    difficulty,
                    area: slot.clone(),
                    requested: planned,
                    available: eligible.len(),
                });
                continue;
            }

            candidates.push((difficulty, slot, planned, eligible));
        }

        if !shortfalls.is_empty() {
            return Err(GenerationError::CellShortfall { shortfalls });
        }

        // 第二遍: 洗牌抽取
        let mut selected = Vec::new();
        for (difficulty, slot, planned, mut eligible) in candidates {
            eligible.shuffle(&mut *rng);
            selected.extend(eligible.into_iter().take(planned as usize).cloned());
            debug!(difficulty = %difficulty, area = %slot, count = planned, "单元格抽题完成");
        }

        Ok(selected)
    }
}
