// ==========================================
// 组卷引擎 - 引擎层错误类型
// ==========================================
// 红线: 组卷全有或全无,任何校验失败/抽题不足都同步返回调用方
// 红线: 错误必须携带维度名称与 需要/可用 数量,调用方无需重新推导
// ==========================================

use serde::Serialize;
use serde_json::{json, Value};
use thiserror::Error;

use crate::domain::distribution::AreaSlot;
use crate::domain::types::DifficultyLevel;
use crate::repository::error::RepositoryError;

// ==========================================
// Shortfall - 单元格缺口
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Shortfall {
    pub difficulty: DifficultyLevel,
    pub area: AreaSlot,
    pub requested: u32,
    pub available: usize,
}

fn describe_shortfalls(shortfalls: &[Shortfall]) -> String {
    shortfalls
        .iter()
        .map(|s| {
            format!(
                "[{}/{}] 需要 {}, 可用 {}",
                s.difficulty, s.area, s.requested, s.available
            )
        })
        .collect::<Vec<_>>()
        .join("; ")
}

/// 组卷错误类型
#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("组卷请求为空: 各难度题量之和必须大于 0")]
    EmptyRequest,

    #[error("题组 {group_id} 没有可用题目")]
    EmptyPool { group_id: String },

    #[error("难度 {difficulty} 题量不足: 需要 {requested}, 可用 {available}")]
    InsufficientDifficultyPool {
        difficulty: DifficultyLevel,
        requested: u32,
        available: usize,
    },

    #[error("难度 {difficulty} 下知识点 {area} 没有可用题目")]
    NoItemsForAreaDifficulty {
        difficulty: DifficultyLevel,
        area: String,
    },

    #[error("未指定有效的知识点题量: 权重之和={total_weight}, 计划总题量={planned_total}")]
    NoAreaCountsSpecified { total_weight: u64, planned_total: u64 },

    #[error("抽题不足: {}", describe_shortfalls(.shortfalls))]
    CellShortfall { shortfalls: Vec<Shortfall> },

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl GenerationError {
    /// 稳定的错误类别编码（供展示层分支处理）
    pub fn kind(&self) -> &'static str {
        match self {
            GenerationError::EmptyRequest => "EMPTY_REQUEST",
            GenerationError::EmptyPool { .. } => "EMPTY_POOL",
            GenerationError::InsufficientDifficultyPool { .. } => "INSUFFICIENT_DIFFICULTY_POOL",
            GenerationError::NoItemsForAreaDifficulty { .. } => "NO_ITEMS_FOR_AREA_DIFFICULTY",
            GenerationError::NoAreaCountsSpecified { .. } => "NO_AREA_COUNTS_SPECIFIED",
            GenerationError::CellShortfall { .. } => "CELL_SHORTFALL",
            GenerationError::Repository(_) => "REPOSITORY",
        }
    }

    /// 结构化错误详情
    pub fn details(&self) -> Value {
        match self {
            GenerationError::EmptyRequest => json!({}),
            GenerationError::EmptyPool { group_id } => json!({ "group_id": group_id }),
            GenerationError::InsufficientDifficultyPool {
                difficulty,
                requested,
                available,
            } => json!({
                "difficulty": difficulty,
                "requested": requested,
                "available": available,
            }),
            GenerationError::NoItemsForAreaDifficulty { difficulty, area } => json!({
                "difficulty": difficulty,
                "area": area,
            }),
            GenerationError::NoAreaCountsSpecified {
                total_weight,
                planned_total,
            } => json!({
                "total_weight": total_weight,
                "planned_total": planned_total,
            }),
            GenerationError::CellShortfall { shortfalls } => {
                let cells: Vec<Value> = shortfalls
                    .iter()
                    .map(|s| {
                        json!({
                            "difficulty": s.difficulty,
                            "area": s.area.label(),
                            "requested": s.requested,
                            "available": s.available,
                        })
                    })
                    .collect();
                json!({ "shortfalls": cells })
            }
            GenerationError::Repository(err) => json!({ "message": err.to_string() }),
        }
    }

    /// 是否为请求/题库层面的业务拒绝（而非基础设施故障）
    pub fn is_rejection(&self) -> bool {
        !matches!(self, GenerationError::Repository(_))
    }
}
