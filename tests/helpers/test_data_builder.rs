// ==========================================
// 测试数据构建器 - 用于集成测试
// ==========================================

use exam_paper_gen::domain::{DifficultyLevel, DistributionRequest, Item};

// ==========================================
// Item 构建器
// ==========================================

pub struct ItemBuilder {
    item_id: String,
    group_id: String,
    content: Option<String>,
    difficulty: DifficultyLevel,
    knowledge_area: String,
}

impl ItemBuilder {
    pub fn new(item_id: &str) -> Self {
        Self {
            item_id: item_id.to_string(),
            group_id: "G1".to_string(),
            content: None,
            difficulty: DifficultyLevel::Easy,
            knowledge_area: "AreaX".to_string(),
        }
    }

    pub fn group(mut self, group_id: &str) -> Self {
        self.group_id = group_id.to_string();
        self
    }

    pub fn content(mut self, content: &str) -> Self {
        self.content = Some(content.to_string());
        self
    }

    pub fn difficulty(mut self, difficulty: DifficultyLevel) -> Self {
        self.difficulty = difficulty;
        self
    }

    pub fn area(mut self, area: &str) -> Self {
        self.knowledge_area = area.to_string();
        self
    }

    pub fn build(self) -> Item {
        let content = self
            .content
            .unwrap_or_else(|| format!("题目 {}", self.item_id));
        Item::new(
            self.item_id,
            self.group_id,
            content,
            self.difficulty,
            self.knowledge_area,
        )
    }
}

// ==========================================
// DistributionRequest 构建器
// ==========================================

pub struct RequestBuilder {
    request: DistributionRequest,
}

impl RequestBuilder {
    pub fn new(group_id: &str) -> Self {
        Self {
            request: DistributionRequest::new(group_id),
        }
    }

    pub fn easy(self, count: u32) -> Self {
        self.difficulty(DifficultyLevel::Easy, count)
    }

    pub fn medium(self, count: u32) -> Self {
        self.difficulty(DifficultyLevel::Medium, count)
    }

    pub fn hard(self, count: u32) -> Self {
        self.difficulty(DifficultyLevel::Hard, count)
    }

    pub fn very_hard(self, count: u32) -> Self {
        self.difficulty(DifficultyLevel::VeryHard, count)
    }

    pub fn difficulty(mut self, difficulty: DifficultyLevel, count: u32) -> Self {
        self.request = self.request.with_difficulty(difficulty, count);
        self
    }

    pub fn weight(mut self, area: &str, weight: u32) -> Self {
        self.request = self.request.with_area_weight(area, weight);
        self
    }

    pub fn build(self) -> DistributionRequest {
        self.request
    }
}
