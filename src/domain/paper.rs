// ==========================================
// 组卷引擎 - 试卷领域模型
// ==========================================
// 红线: 试卷题目为按值拷贝的快照,题库后续修改/删除不得回溯影响历史试卷
// 红线: 试卷生成后不可变,仅允许整卷删除或人工移除单题
// ==========================================

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::domain::item::Item;
use crate::domain::types::DifficultyLevel;

// ==========================================
// PaperItem - 试卷题目快照
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaperItem {
    pub seq_no: u32,                 // 卷内序号 (从 1 开始)
    pub item_id: String,             // 来源题目ID
    pub content: String,             // 题目内容 (快照)
    pub difficulty: DifficultyLevel, // 难度 (快照)
    pub knowledge_area: String,      // 知识点 (快照)
}

impl PaperItem {
    /// 从题库题目拷贝快照
    pub fn snapshot(seq_no: u32, item: &Item) -> Self {
        Self {
            seq_no,
            item_id: item.item_id.clone(),
            content: item.content.clone(),
            difficulty: item.difficulty,
            knowledge_area: item.knowledge_area.clone(),
        }
    }
}

// ==========================================
// GeneratedPaper - 已生成试卷
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedPaper {
    pub paper_id: String,         // 试卷ID
    pub group_id: String,         // 题组ID
    pub group_name: String,       // 题组名称 (生成时冗余)
    pub items: Vec<PaperItem>,    // 题目快照 (有序)
    pub created_at: NaiveDateTime, // 生成时间
}

impl GeneratedPaper {
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// 按难度统计题量
    pub fn count_by_difficulty(&self) -> BTreeMap<DifficultyLevel, usize> {
        let mut counts = BTreeMap::new();
        for item in &self.items {
            *counts.entry(item.difficulty).or_insert(0) += 1;
        }
        counts
    }

    /// 按知识点统计题量
    pub fn count_by_area(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for item in &self.items {
            *counts.entry(item.knowledge_area.clone()).or_insert(0) += 1;
        }
        counts
    }

    pub fn contains_item(&self, item_id: &str) -> bool {
        self.items.iter().any(|i| i.item_id == item_id)
    }
}
