// ==========================================
// 组卷引擎 - 题目与题组领域模型
// ==========================================
// 红线: 题目由题库维护,引擎只读
// ==========================================

use serde::{Deserialize, Serialize};

use crate::domain::types::DifficultyLevel;

// ==========================================
// QuestionGroup - 题组
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionGroup {
    pub group_id: String,   // 题组ID
    pub group_name: String, // 题组名称
}

// ==========================================
// Item - 题目
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub item_id: String,             // 题目ID (全局唯一)
    pub group_id: String,            // 所属题组
    pub content: String,             // 题目内容 (不透明)
    pub difficulty: DifficultyLevel, // 难度等级
    pub knowledge_area: String,      // 知识点标签
}

impl Item {
    pub fn new(
        item_id: impl Into<String>,
        group_id: impl Into<String>,
        content: impl Into<String>,
        difficulty: DifficultyLevel,
        knowledge_area: impl Into<String>,
    ) -> Self {
        Self {
            item_id: item_id.into(),
            group_id: group_id.into(),
            content: content.into(),
            difficulty,
            knowledge_area: knowledge_area.into(),
        }
    }
}
