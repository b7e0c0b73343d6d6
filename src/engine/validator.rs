// ==========================================
// 组卷引擎 - 组卷请求校验器
// ==========================================
// 职责: 对照题库快照检查组卷请求,首个失败即返回
// 校验顺序（固定）:
// 1. 各难度题量之和 >= 1                 -> EmptyRequest
// 2. 题组至少有一道题                    -> EmptyPool
// 3. 每个请求难度的可用题量 >= 请求量    -> InsufficientDifficultyPool
// 4. 有非零权重时,每个 (请求难度 × 加权知识点) 至少有一道题
//                                        -> NoItemsForAreaDifficulty
// 5. 给出知识点权重时,权重之和及计划总题量均须非零
//                                        -> NoAreaCountsSpecified
// ==========================================
// 注: 第 4 步只确认存在性,单元格题量是否足够由抽题器最终确认
// ==========================================

use tracing::{debug, warn};

use crate::domain::distribution::DistributionRequest;
use crate::engine::error::GenerationError;
use crate::engine::planner::AllocationPlanner;
use crate::engine::snapshot::CatalogSnapshot;
use crate::engine::statistics::StatisticsAggregator;

// ==========================================
// DistributionValidator - 组卷请求校验器
// ==========================================
#[derive(Debug, Clone, Copy, Default)]
pub struct DistributionValidator {
    aggregator: StatisticsAggregator,
    planner: AllocationPlanner,
}

impl DistributionValidator {
    pub fn new() -> Self {
        Self::default()
    }

    /// 校验组卷请求
    ///
    /// # 参数
    /// - group_id: 题组ID（只统计该题组的题目）
    /// - request: 组卷请求
    /// - snapshot: 题库快照
    ///
    /// # 返回
    /// - Ok(()): 请求可进入规划
    /// - Err(GenerationError): 首个失败项
    pub fn validate(
        &self,
        group_id: &str,
        request: &DistributionRequest,
        snapshot: &CatalogSnapshot,
    ) -> Result<(), GenerationError> {
        let result = self.check(group_id, request, snapshot);
        match &result {
            Ok(()) => debug!(group_id = %group_id, "组卷请求校验通过"),
            Err(e) => warn!(group_id = %group_id, kind = e.kind(), error = %e, "组卷请求校验失败"),
        }
        result
    }

    fn check(
        &self,
        group_id: &str,
        request: &DistributionRequest,
        snapshot: &CatalogSnapshot,
    ) -> Result<(), GenerationError> {
        // 1. 请求非空
        if request.total_requested() == 0 {
            return Err(GenerationError::EmptyRequest);
        }

        let stats = self.aggregator.summarize(group_id, snapshot.items());

        // 2. 题组非空
        if stats.total_items == 0 {
            return Err(GenerationError::EmptyPool {
                group_id: group_id.to_string(),
            });
        }

        // 3. 难度边际可用量
        for (difficulty, requested) in request.requested_difficulties() {
            let available = stats.available_at(difficulty);
            if available < requested as usize {
                return Err(GenerationError::InsufficientDifficultyPool {
                    difficulty,
                    requested,
                    available,
                });
            }
        }

        // 4. 单元格存在性
        if request.has_weighted_area() {
            for (difficulty, _) in request.requested_difficulties() {
                for (area, _) in request.weighted_areas() {
                    if stats.available_in_cell(difficulty, area) == 0 {
                        return Err(GenerationError::NoItemsForAreaDifficulty {
                            difficulty,
                            area: area.to_string(),
                        });
                    }
                }
            }
        }

        // 5. 知识点题量非零
        if !request.per_area_weight.is_empty() {
            let total_weight = request.total_weight();
            let planned_total = if total_weight == 0 {
                0
            } else {
                self.planner.plan_request(request).planned_total()
            };
            if planned_total == 0 {
                return Err(GenerationError::NoAreaCountsSpecified {
                    total_weight,
                    planned_total,
                });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::item::Item;
    use crate::domain::types::DifficultyLevel;

    fn pool(cells: &[(DifficultyLevel, &str, usize)]) -> CatalogSnapshot {
        let mut items = Vec::new();
        for &(difficulty, area, n) in cells {
            for i in 0..n {
                let id = format!("{}-{}-{}", difficulty, area, i);
                items.push(Item::new(id, "G1", "内容", difficulty, area));
            }
        }
        CatalogSnapshot::from_items("G1", items)
    }

    fn validate(request: &DistributionRequest, snapshot: &CatalogSnapshot) -> Result<(), GenerationError> {
        DistributionValidator::new().validate("G1", request, snapshot)
    }

    #[test]
    fn test_all_zero_request_is_empty_request() {
        let snapshot = pool(&[(DifficultyLevel::Easy, "A", 3)]);
        let request = DistributionRequest::new("G1")
            .with_difficulty(DifficultyLevel::Easy, 0)
            .with_difficulty(DifficultyLevel::Medium, 0)
            .with_difficulty(DifficultyLevel::Hard, 0)
            .with_difficulty(DifficultyLevel::VeryHard, 0);

        assert!(matches!(validate(&request, &snapshot), Err(GenerationError::EmptyRequest)));
    }

    #[test]
    fn test_empty_request_checked_before_empty_pool() {
        let request = DistributionRequest::new("G1");
        let empty = CatalogSnapshot::from_items("G1", Vec::new());
        assert!(matches!(validate(&request, &empty), Err(GenerationError::EmptyRequest)));
    }

    #[test]
    fn test_group_without_items_is_empty_pool() {
        let request = DistributionRequest::new("G1").with_difficulty(DifficultyLevel::Easy, 1);
        let empty = CatalogSnapshot::from_items("G1", Vec::new());

        match validate(&request, &empty) {
            Err(GenerationError::EmptyPool { group_id }) => assert_eq!(group_id, "G1"),
            other => panic!("期望 EmptyPool, 实际 {:?}", other),
        }
    }

    #[test]
    fn test_items_of_other_groups_are_ignored() {
        let snapshot = pool(&[(DifficultyLevel::Easy, "A", 3)]);
        let request = DistributionRequest::new("G2").with_difficulty(DifficultyLevel::Easy, 1);
        let result = DistributionValidator::new().validate("G2", &request, &snapshot);
        assert!(matches!(result, Err(GenerationError::EmptyPool { .. })));
    }

    #[test]
    fn test_insufficient_difficulty_reports_numbers() {
        let snapshot = pool(&[(DifficultyLevel::Easy, "A", 5), (DifficultyLevel::Hard, "A", 1)]);
        let request = DistributionRequest::new("G1")
            .with_difficulty(DifficultyLevel::Easy, 2)
            .with_difficulty(DifficultyLevel::Hard, 3);

        match validate(&request, &snapshot) {
            Err(GenerationError::InsufficientDifficultyPool {
                difficulty,
                requested,
                available,
            }) => {
                assert_eq!(difficulty, DifficultyLevel::Hard);
                assert_eq!(requested, 3);
                assert_eq!(available, 1);
            }
            other => panic!("期望 InsufficientDifficultyPool, 实际 {:?}", other),
        }
    }

    #[test]
    fn test_missing_cell_reports_both_dimensions() {
        let snapshot = pool(&[(DifficultyLevel::Easy, "A", 5), (DifficultyLevel::Easy, "B", 0)]);
        let request = DistributionRequest::new("G1")
            .with_difficulty(DifficultyLevel::Easy, 2)
            .with_area_weight("A", 1)
            .with_area_weight("B", 1);

        match validate(&request, &snapshot) {
            Err(GenerationError::NoItemsForAreaDifficulty { difficulty, area }) => {
                assert_eq!(difficulty, DifficultyLevel::Easy);
                assert_eq!(area, "B");
            }
            other => panic!("期望 NoItemsForAreaDifficulty, 实际 {:?}", other),
        }
    }

    #[test]
    fn test_zero_weight_area_is_not_checked_for_existence() {
        let snapshot = pool(&[(DifficultyLevel::Easy, "A", 5)]);
        let request = DistributionRequest::new("G1")
            .with_difficulty(DifficultyLevel::Easy, 2)
            .with_area_weight("A", 1)
            .with_area_weight("B", 0);

        assert!(validate(&request, &snapshot).is_ok());
    }

    #[test]
    fn test_all_zero_weights_is_no_area_counts() {
        let snapshot = pool(&[(DifficultyLevel::Easy, "A", 5)]);
        let request = DistributionRequest::new("G1")
            .with_difficulty(DifficultyLevel::Easy, 2)
            .with_area_weight("A", 0);

        assert!(matches!(
            validate(&request, &snapshot),
            Err(GenerationError::NoAreaCountsSpecified {
                total_weight: 0,
                planned_total: 0
            })
        ));
    }

    #[test]
    fn test_weights_rounding_to_zero_is_no_area_counts() {
        // 1 * 1/3 = 0.33 -> 0（三格）
        let snapshot = pool(&[
            (DifficultyLevel::Easy, "A", 1),
            (DifficultyLevel::Easy, "B", 1),
            (DifficultyLevel::Easy, "C", 1),
        ]);
        let request = DistributionRequest::new("G1")
            .with_difficulty(DifficultyLevel::Easy, 1)
            .with_area_weight("A", 1)
            .with_area_weight("B", 1)
            .with_area_weight("C", 1);

        assert!(matches!(
            validate(&request, &snapshot),
            Err(GenerationError::NoAreaCountsSpecified {
                total_weight: 3,
                planned_total: 0
            })
        ));
    }

    #[test]
    fn test_no_weights_is_valid_any_area_request() {
        let snapshot = pool(&[(DifficultyLevel::Medium, "A", 2), (DifficultyLevel::Medium, "B", 2)]);
        let request = DistributionRequest::new("G1").with_difficulty(DifficultyLevel::Medium, 4);
        assert!(validate(&request, &snapshot).is_ok());
    }

    #[test]
    fn test_validation_is_idempotent() {
        let snapshot = pool(&[(DifficultyLevel::Easy, "A", 1)]);
        let bad = DistributionRequest::new("G1").with_difficulty(DifficultyLevel::Easy, 2);
        let good = DistributionRequest::new("G1").with_difficulty(DifficultyLevel::Easy, 1);

        let first = validate(&bad, &snapshot).map_err(|e| e.to_string());
        let second = validate(&bad, &snapshot).map_err(|e| e.to_string());
        assert_eq!(first, second);
        assert!(validate(&good, &snapshot).is_ok());
        assert!(validate(&good, &snapshot).is_ok());
    }
}
