// ==========================================
// 组卷引擎 - 分配规划器
// ==========================================
// 职责: 将已校验的组卷请求转换为 (难度, 知识点) 单元格计划
// 规则: cell(d, a) = round_half_up(C(d) * w(a) / Σw)
// 注: 各单元格独立取整,不回补到 C(d),偏差上限为知识点个数
// 注: 无有效知识点权重时,每个难度生成一个 AnyArea 单元格,题量 = C(d)
// ==========================================

use std::collections::BTreeMap;
use tracing::debug;

use crate::domain::distribution::{AllocationPlan, AreaSlot, DistributionRequest};
use crate::domain::types::DifficultyLevel;

#[cfg(test)]
mod tests;

/// 四舍五入（0.5 进位）的整数除法: round(numerator / denominator)
///
/// 在 u128 上计算,C(d) 与 w(a) 取 u32 上限时也不会溢出
fn round_half_up(numerator: u128, denominator: u128) -> u128 {
    (2 * numerator + denominator) / (2 * denominator)
}

// ==========================================
// AllocationPlanner - 分配规划器
// ==========================================
// 无状态
#[derive(Debug, Clone, Copy, Default)]
pub struct AllocationPlanner;

impl AllocationPlanner {
    pub fn new() -> Self {
        Self
    }

    /// 按请求生成分配方案
    pub fn plan_request(&self, request: &DistributionRequest) -> AllocationPlan {
        self.plan(&request.per_difficulty_count, &request.per_area_weight)
    }

    /// 生成分配方案
    ///
    /// # 参数
    /// - per_difficulty_count: 各难度题量
    /// - per_area_weight: 各知识点相对权重
    ///
    /// # 返回
    /// 仅包含 C(d) > 0 且 w(a) > 0 的单元格（取整后为 0 的单元格保留）
    pub fn plan(
        &self,
        per_difficulty_count: &BTreeMap<DifficultyLevel, u32>,
        per_area_weight: &BTreeMap<String, u32>,
    ) -> AllocationPlan {
        let mut plan = AllocationPlan::new();

        let total_weight: u64 = per_area_weight.values().map(|&w| w as u64).sum();

        for (&difficulty, &count) in per_difficulty_count.iter().filter(|&(_, &c)| c > 0) {
            if total_weight == 0 {
                plan.insert(difficulty, AreaSlot::AnyArea, count);
                continue;
            }

            for (area, &weight) in per_area_weight.iter().filter(|&(_, &w)| w > 0) {
                let cell = round_half_up(
                    u128::from(count) * u128::from(weight),
                    u128::from(total_weight),
                );
                // w <= Σw,故 cell <= count,不会溢出 u32
                plan.insert(difficulty, AreaSlot::Area(area.clone()), cell as u32);
            }

            let planned = plan.planned_for_difficulty(difficulty);
            if planned != count as u64 {
                debug!(
                    difficulty = %difficulty,
                    requested = count,
                    planned = planned,
                    "单元格独立取整导致难度题量偏差"
                );
            }
        }

        plan
    }
}
