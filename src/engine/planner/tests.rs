use super::*;

// ==========================================
// 测试辅助函数
// ==========================================

fn counts(entries: &[(DifficultyLevel, u32)]) -> BTreeMap<DifficultyLevel, u32> {
    entries.iter().copied().collect()
}

fn weights(entries: &[(&str, u32)]) -> BTreeMap<String, u32> {
    entries.iter().map(|&(a, w)| (a.to_string(), w)).collect()
}

fn area(label: &str) -> AreaSlot {
    AreaSlot::Area(label.to_string())
}

// ==========================================
// 比例分配
// ==========================================

#[test]
fn test_single_area_takes_whole_difficulty_count() {
    let plan = AllocationPlanner::new().plan(
        &counts(&[(DifficultyLevel::Easy, 5)]),
        &weights(&[("AreaX", 1)]),
    );

    assert_eq!(plan.len(), 1);
    assert_eq!(plan.planned(DifficultyLevel::Easy, &area("AreaX")), 5);
}

#[test]
fn test_equal_weights_split_evenly() {
    let plan = AllocationPlanner::new().plan(
        &counts(&[(DifficultyLevel::Easy, 6)]),
        &weights(&[("AreaX", 1), ("AreaY", 1)]),
    );

    assert_eq!(plan.planned(DifficultyLevel::Easy, &area("AreaX")), 3);
    assert_eq!(plan.planned(DifficultyLevel::Easy, &area("AreaY")), 3);
    assert_eq!(plan.planned_total(), 6);
}

#[test]
fn test_weighted_split_across_difficulties() {
    let plan = AllocationPlanner::new().plan(
        &counts(&[(DifficultyLevel::Medium, 10), (DifficultyLevel::Hard, 4)]),
        &weights(&[("代数", 3), ("几何", 1)]),
    );

    // 10 * 3/4 = 7.5 -> 8; 10 * 1/4 = 2.5 -> 3
    assert_eq!(plan.planned(DifficultyLevel::Medium, &area("代数")), 8);
    assert_eq!(plan.planned(DifficultyLevel::Medium, &area("几何")), 3);
    // 4 * 3/4 = 3; 4 * 1/4 = 1
    assert_eq!(plan.planned(DifficultyLevel::Hard, &area("代数")), 3);
    assert_eq!(plan.planned(DifficultyLevel::Hard, &area("几何")), 1);
}

#[test]
fn test_zero_requests_and_zero_weights_are_not_planned() {
    let plan = AllocationPlanner::new().plan(
        &counts(&[(DifficultyLevel::Easy, 0), (DifficultyLevel::Hard, 2)]),
        &weights(&[("A", 1), ("B", 0)]),
    );

    assert_eq!(plan.len(), 1);
    assert_eq!(plan.planned(DifficultyLevel::Hard, &area("A")), 2);
    assert_eq!(plan.planned(DifficultyLevel::Hard, &area("B")), 0);
    assert_eq!(plan.planned_for_difficulty(DifficultyLevel::Easy), 0);
}

// ==========================================
// 取整偏差（保留现状,不做回补）
// ==========================================

#[test]
fn test_independent_rounding_can_overshoot_requested_total() {
    // 1 * 1/2 = 0.5 -> 1（两格都进位）,计划 2 > 请求 1
    let plan = AllocationPlanner::new().plan(
        &counts(&[(DifficultyLevel::Easy, 1)]),
        &weights(&[("A", 1), ("B", 1)]),
    );

    assert_eq!(plan.planned(DifficultyLevel::Easy, &area("A")), 1);
    assert_eq!(plan.planned(DifficultyLevel::Easy, &area("B")), 1);
    assert_eq!(plan.planned_for_difficulty(DifficultyLevel::Easy), 2);
}

#[test]
fn test_independent_rounding_can_undershoot_requested_total() {
    // 4 * 1/3 = 1.33 -> 1,三格合计 3 < 4
    let plan = AllocationPlanner::new().plan(
        &counts(&[(DifficultyLevel::Hard, 4)]),
        &weights(&[("A", 1), ("B", 1), ("C", 1)]),
    );

    assert_eq!(plan.planned_for_difficulty(DifficultyLevel::Hard), 3);
    for label in ["A", "B", "C"] {
        assert_eq!(plan.planned(DifficultyLevel::Hard, &area(label)), 1);
    }
}

#[test]
fn test_rounding_deviation_bounded_by_area_count() {
    let area_weights = weights(&[("A", 1), ("B", 2), ("C", 3), ("D", 5)]);
    for requested in 1..=40u32 {
        let plan = AllocationPlanner::new().plan(
            &counts(&[(DifficultyLevel::Medium, requested)]),
            &area_weights,
        );
        let planned = plan.planned_for_difficulty(DifficultyLevel::Medium) as i64;
        assert!((planned - requested as i64).abs() <= area_weights.len() as i64);
    }
}

#[test]
fn test_cells_rounding_to_zero_stay_in_plan() {
    // 1 * 1/4 = 0.25 -> 0; 1 * 3/4 = 0.75 -> 1
    let plan = AllocationPlanner::new().plan(
        &counts(&[(DifficultyLevel::Easy, 1)]),
        &weights(&[("A", 1), ("B", 3)]),
    );

    assert_eq!(plan.len(), 2);
    assert_eq!(plan.planned(DifficultyLevel::Easy, &area("A")), 0);
    assert_eq!(plan.planned(DifficultyLevel::Easy, &area("B")), 1);
}

// ==========================================
// 不限知识点
// ==========================================

#[test]
fn test_without_weights_plans_any_area_per_difficulty() {
    let plan = AllocationPlanner::new().plan(
        &counts(&[(DifficultyLevel::Easy, 3), (DifficultyLevel::VeryHard, 1)]),
        &BTreeMap::new(),
    );

    assert!(!plan.is_stratified());
    assert_eq!(plan.len(), 2);
    assert_eq!(plan.planned(DifficultyLevel::Easy, &AreaSlot::AnyArea), 3);
    assert_eq!(plan.planned(DifficultyLevel::VeryHard, &AreaSlot::AnyArea), 1);
}

#[test]
fn test_all_zero_weights_fall_back_to_any_area() {
    let plan = AllocationPlanner::new().plan(
        &counts(&[(DifficultyLevel::Medium, 2)]),
        &weights(&[("A", 0)]),
    );

    assert_eq!(plan.planned(DifficultyLevel::Medium, &AreaSlot::AnyArea), 2);
}

#[test]
fn test_plan_request_uses_request_maps() {
    let request = DistributionRequest::new("G1")
        .with_difficulty(DifficultyLevel::Easy, 4)
        .with_area_weight("A", 1);

    let plan = AllocationPlanner::new().plan_request(&request);
    assert_eq!(plan.planned(DifficultyLevel::Easy, &area("A")), 4);
}

// ==========================================
// 取值边界
// ==========================================

#[test]
fn test_extreme_counts_and_weights_do_not_overflow() {
    let plan = AllocationPlanner::new().plan(
        &counts(&[(DifficultyLevel::Easy, u32::MAX)]),
        &weights(&[("A", u32::MAX)]),
    );
    assert_eq!(plan.planned(DifficultyLevel::Easy, &area("A")), u32::MAX);

    // Σw 超出 u32 范围: 每格 u32::MAX / 2 = 2147483647.5 -> 2147483648
    let plan = AllocationPlanner::new().plan(
        &counts(&[(DifficultyLevel::Hard, u32::MAX)]),
        &weights(&[("A", u32::MAX), ("B", u32::MAX)]),
    );
    assert_eq!(plan.planned(DifficultyLevel::Hard, &area("A")), 2_147_483_648);
    assert_eq!(plan.planned(DifficultyLevel::Hard, &area("B")), 2_147_483_648);
    assert_eq!(plan.planned_total(), 4_294_967_296);
}
