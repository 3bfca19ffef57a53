//! Catalog rule tests
//!
//! Category depth limits and deletion guards.

use chrono::Utc;
use price_tracker::error::AppError;
use price_tracker::services::category::{child_depth, ensure_deletable};
use proptest::prelude::*;
use shared::{Category, CategoryDetail};
use uuid::Uuid;

fn detail(sub_categories_count: i64, skus_count: i64) -> CategoryDetail {
    CategoryDetail {
        category: Category {
            id: Uuid::new_v4(),
            name: "Dairy".to_string(),
            parent_id: None,
            depth: 0,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        },
        sub_categories_count,
        skus_count,
    }
}

// ============================================================================
// Depth
// ============================================================================

#[test]
fn test_root_depth_is_zero() {
    assert_eq!(child_depth(None, 4).unwrap(), 0);
}

#[test]
fn test_child_is_one_below_parent() {
    assert_eq!(child_depth(Some(0), 4).unwrap(), 1);
    assert_eq!(child_depth(Some(2), 4).unwrap(), 3);
}

#[test]
fn test_nesting_past_max_depth_is_refused() {
    let err = child_depth(Some(3), 4).unwrap_err();
    match err {
        AppError::Validation { field, message } => {
            assert_eq!(field, "parent_id");
            assert!(message.contains("4 levels"));
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn test_single_level_tree() {
    assert!(child_depth(None, 1).is_ok());
    assert!(child_depth(Some(0), 1).is_err());
}

// ============================================================================
// Deletion guard
// ============================================================================

#[test]
fn test_leaf_without_skus_is_deletable() {
    assert!(ensure_deletable(&detail(0, 0)).is_ok());
}

#[test]
fn test_category_with_children_is_guarded() {
    let err = ensure_deletable(&detail(2, 0)).unwrap_err();
    assert!(matches!(err, AppError::DependencyConflict { dependents: 2, .. }));
}

#[test]
fn test_category_with_skus_is_guarded() {
    let err = ensure_deletable(&detail(0, 5)).unwrap_err();
    match err {
        AppError::DependencyConflict { resource, dependents, message } => {
            assert_eq!(resource, "category");
            assert_eq!(dependents, 5);
            assert_eq!(message, "Cannot delete category: 5 SKUs are linked to it");
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Every accepted depth stays below the configured number of levels
    #[test]
    fn prop_depth_within_limit(parent in proptest::option::of(0i32..10), max_depth in 1i32..8) {
        match child_depth(parent, max_depth) {
            Ok(depth) => {
                prop_assert!(depth < max_depth);
                prop_assert_eq!(depth, parent.map_or(0, |d| d + 1));
            }
            Err(_) => prop_assert!(parent.map_or(0, |d| d + 1) >= max_depth),
        }
    }

    /// Guard agrees with the detail's own view
    #[test]
    fn prop_guard_matches_counts(children in 0i64..5, skus in 0i64..5) {
        let detail = detail(children, skus);
        prop_assert_eq!(ensure_deletable(&detail).is_ok(), detail.is_deletable());
    }
}
