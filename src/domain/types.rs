// ==========================================
// 组卷引擎 - 领域类型定义
// ==========================================
// 难度等级为有序枚举: Easy < Medium < Hard < VeryHard
// 知识点为开放文本标签,不在此处枚举
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ==========================================
// 难度等级 (Difficulty Level)
// ==========================================
// 序列化格式: SCREAMING_SNAKE_CASE (与数据库一致)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DifficultyLevel {
    Easy,     // 容易
    Medium,   // 中等
    Hard,     // 较难
    VeryHard, // 困难
}

impl DifficultyLevel {
    /// 全部难度等级（按序）
    pub const ALL: [DifficultyLevel; 4] = [
        DifficultyLevel::Easy,
        DifficultyLevel::Medium,
        DifficultyLevel::Hard,
        DifficultyLevel::VeryHard,
    ];

    /// 数据库存储编码
    pub fn as_str(&self) -> &'static str {
        match self {
            DifficultyLevel::Easy => "EASY",
            DifficultyLevel::Medium => "MEDIUM",
            DifficultyLevel::Hard => "HARD",
            DifficultyLevel::VeryHard => "VERY_HARD",
        }
    }
}

impl fmt::Display for DifficultyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// 难度编码解析失败
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("无法识别的难度等级: {0}")]
pub struct ParseDifficultyError(pub String);

impl FromStr for DifficultyLevel {
    type Err = ParseDifficultyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "EASY" => Ok(DifficultyLevel::Easy),
            "MEDIUM" => Ok(DifficultyLevel::Medium),
            "HARD" => Ok(DifficultyLevel::Hard),
            "VERY_HARD" | "VERYHARD" => Ok(DifficultyLevel::VeryHard),
            _ => Err(ParseDifficultyError(s.to_string())),
        }
    }
}
