// ==========================================
// 组卷引擎 - 题库快照
// ==========================================
// 红线: 一次组卷只读取一次题库,校验/规划/抽题共用同一快照,
//       避免校验与抽题之间题库被修改
// ==========================================

use crate::domain::distribution::AreaSlot;
use crate::domain::item::Item;
use crate::domain::types::DifficultyLevel;
use crate::repository::catalog_repo::Catalog;
use crate::repository::error::RepositoryResult;

/// 单个题组的题库快照
#[derive(Debug, Clone, Default)]
pub struct CatalogSnapshot {
    group_id: String,
    items: Vec<Item>,
}

impl CatalogSnapshot {
    /// 从题库读取题组全部题目
    pub fn capture<C: Catalog + ?Sized>(catalog: &C, group_id: &str) -> RepositoryResult<Self> {
        let items = catalog.query_items(group_id, None, None)?;
        Ok(Self::from_items(group_id, items))
    }

    /// 由现成题目列表构造快照（非本题组题目被丢弃）
    pub fn from_items(group_id: impl Into<String>, items: Vec<Item>) -> Self {
        let group_id = group_id.into();
        let items = items
            .into_iter()
            .filter(|item| item.group_id == group_id)
            .collect();
        Self { group_id, items }
    }

    pub fn group_id(&self) -> &str {
        &self.group_id
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// 单元格内的可选题目（保持快照顺序）
    pub fn eligible(&self, difficulty: DifficultyLevel, slot: &AreaSlot) -> Vec<&Item> {
        self.items
            .iter()
            .filter(|item| item.difficulty == difficulty && slot.matches(&item.knowledge_area))
            .collect()
    }
}
