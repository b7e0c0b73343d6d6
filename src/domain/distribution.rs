// ==========================================
// 组卷引擎 - 组卷请求与分配方案
// ==========================================
// DistributionRequest: 调用方提交的目标构成（瞬态,不持久化）
// AllocationPlan: 由请求派生的 (难度, 知识点) 单元格目标（仅存活于一次组卷调用）
// ==========================================

use serde::{Deserialize, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

use crate::domain::types::DifficultyLevel;

// ==========================================
// DistributionRequest - 组卷请求
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistributionRequest {
    /// 题组ID
    pub group_id: String,
    /// 各难度题量 (difficulty -> count)
    pub per_difficulty_count: BTreeMap<DifficultyLevel, u32>,
    /// 各知识点相对权重 (area -> weight),为空表示不按知识点分层
    pub per_area_weight: BTreeMap<String, u32>,
}

impl DistributionRequest {
    pub fn new(group_id: impl Into<String>) -> Self {
        Self {
            group_id: group_id.into(),
            ..Default::default()
        }
    }

    pub fn with_difficulty(mut self, difficulty: DifficultyLevel, count: u32) -> Self {
        self.per_difficulty_count.insert(difficulty, count);
        self
    }

    pub fn with_area_weight(mut self, area: impl Into<String>, weight: u32) -> Self {
        self.per_area_weight.insert(area.into(), weight);
        self
    }

    /// 请求总题量
    pub fn total_requested(&self) -> u64 {
        self.per_difficulty_count.values().map(|&c| c as u64).sum()
    }

    /// 知识点权重之和
    pub fn total_weight(&self) -> u64 {
        self.per_area_weight.values().map(|&w| w as u64).sum()
    }

    /// 题量非零的难度（按难度升序）
    pub fn requested_difficulties(&self) -> impl Iterator<Item = (DifficultyLevel, u32)> + '_ {
        self.per_difficulty_count
            .iter()
            .filter(|&(_, &count)| count > 0)
            .map(|(&difficulty, &count)| (difficulty, count))
    }

    /// 权重非零的知识点（按标签排序）
    pub fn weighted_areas(&self) -> impl Iterator<Item = (&str, u32)> + '_ {
        self.per_area_weight
            .iter()
            .filter(|&(_, &weight)| weight > 0)
            .map(|(area, &weight)| (area.as_str(), weight))
    }

    /// 是否存在非零知识点权重
    pub fn has_weighted_area(&self) -> bool {
        self.per_area_weight.values().any(|&w| w > 0)
    }
}

// ==========================================
// AreaSlot - 单元格的知识点维度
// ==========================================
// AnyArea: 未给出知识点权重时,该难度从全部知识点中抽取
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AreaSlot {
    AnyArea,
    Area(String),
}

impl AreaSlot {
    /// 题目知识点是否落在该单元格
    pub fn matches(&self, knowledge_area: &str) -> bool {
        match self {
            AreaSlot::AnyArea => true,
            AreaSlot::Area(label) => label == knowledge_area,
        }
    }

    pub fn label(&self) -> Option<&str> {
        match self {
            AreaSlot::AnyArea => None,
            AreaSlot::Area(label) => Some(label.as_str()),
        }
    }
}

impl fmt::Display for AreaSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AreaSlot::AnyArea => write!(f, "不限知识点"),
            AreaSlot::Area(label) => write!(f, "{}", label),
        }
    }
}

// ==========================================
// AllocationPlan - 分配方案
// ==========================================
// 键: (难度, 知识点单元格) -> 计划题量
// 只能由 AllocationPlanner 构造,保证同一难度下不会同时出现 AnyArea 与具体知识点
// 序列化为 [{difficulty, area, count}] 列表
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AllocationPlan {
    #[serde(serialize_with = "serialize_cells")]
    cells: BTreeMap<(DifficultyLevel, AreaSlot), u32>,
}

/// 单元格的序列化视图（area 为 null 表示不限知识点）
#[derive(Serialize)]
struct PlanCellView<'a> {
    difficulty: DifficultyLevel,
    area: Option<&'a str>,
    count: u32,
}

fn serialize_cells<S: Serializer>(
    cells: &BTreeMap<(DifficultyLevel, AreaSlot), u32>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_seq(cells.iter().map(|((difficulty, slot), &count)| PlanCellView {
        difficulty: *difficulty,
        area: slot.label(),
        count,
    }))
}

impl AllocationPlan {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert(&mut self, difficulty: DifficultyLevel, slot: AreaSlot, count: u32) {
        self.cells.insert((difficulty, slot), count);
    }

    /// 按 难度 -> 知识点 顺序遍历所有单元格（含计划量为 0 的单元格）
    pub fn cells(&self) -> impl Iterator<Item = (DifficultyLevel, &AreaSlot, u32)> + '_ {
        self.cells
            .iter()
            .map(|((difficulty, slot), &count)| (*difficulty, slot, count))
    }

    /// 查询单元格计划量（不存在视为 0）
    pub fn planned(&self, difficulty: DifficultyLevel, slot: &AreaSlot) -> u32 {
        self.cells
            .get(&(difficulty, slot.clone()))
            .copied()
            .unwrap_or(0)
    }

    /// 某难度下的计划总量
    pub fn planned_for_difficulty(&self, difficulty: DifficultyLevel) -> u64 {
        self.cells()
            .filter(|(d, _, _)| *d == difficulty)
            .map(|(_, _, count)| count as u64)
            .sum()
    }

    /// 计划总题量
    pub fn planned_total(&self) -> u64 {
        self.cells.values().map(|&c| c as u64).sum()
    }

    /// 是否按知识点分层
    pub fn is_stratified(&self) -> bool {
        self.cells
            .keys()
            .any(|(_, slot)| matches!(slot, AreaSlot::Area(_)))
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}
