use chrono::{NaiveDate, NaiveTime, Timelike};

use opsboard::core::projection::{project, sort_operators, sort_operators_by_key};
use opsboard::models::{Operator, SortOption};
use opsboard::utils::date::{FixedClock, normalize_shift_date};

mod common;
use common::{find_op, fixture_ops};

fn clock() -> FixedClock {
    FixedClock::at(
        NaiveDate::from_ymd_opt(2026, 3, 10).unwrap(),
        NaiveTime::from_hms_opt(7, 0, 0).unwrap(),
    )
}

fn titles(processed: &[opsboard::models::ProcessedOp]) -> Vec<&str> {
    processed.iter().map(|p| p.op.op_title.as_str()).collect()
}

#[test]
fn ops_come_out_in_start_order_for_today() {
    let ops = fixture_ops();
    let processed = project(&ops, "", SortOption::Name, &clock());

    assert_eq!(
        titles(&processed),
        vec![
            "Warehouse Associate AM Shift",
            "Packaging Line Midday Shift",
            "Production Operator PM Shift",
            "Tie Break Test",
        ]
    );

    let first = normalize_shift_date(&processed[0].op.start_time, &clock()).unwrap();
    assert_eq!(first.date_naive(), NaiveDate::from_ymd_opt(2026, 3, 10).unwrap());
    assert_eq!(first.hour(), 10);
}

#[test]
fn empty_search_keeps_every_roster_unfiltered() {
    let ops = fixture_ops();
    let processed = project(&ops, "   ", SortOption::Ops, &clock());

    assert_eq!(processed.len(), ops.len());
    for p in &processed {
        assert!(!p.is_filtered);
        assert_eq!(p.visible_operators.len(), p.total_operators);
    }
}

#[test]
fn title_search_keeps_only_the_matching_op() {
    let ops = fixture_ops();
    let processed = project(&ops, "warehouse associate", SortOption::Name, &clock());

    assert_eq!(titles(&processed), vec!["Warehouse Associate AM Shift"]);
    assert!(!processed[0].is_filtered);
    assert_eq!(processed[0].visible_operators.len(), 2);
}

#[test]
fn public_id_search_matches_case_insensitively() {
    let ops = fixture_ops();
    let processed = project(&ops, " 26-124 ", SortOption::Name, &clock());

    assert_eq!(titles(&processed), vec!["Production Operator PM Shift"]);
    assert!(!processed[0].is_filtered);
}

#[test]
fn operator_search_narrows_the_roster() {
    let ops = fixture_ops();
    let processed = project(&ops, "SARAH", SortOption::Name, &clock());

    assert_eq!(processed.len(), 1);
    let op = &processed[0];
    assert_eq!(op.op.public_id, "26-124");
    assert!(op.is_filtered);
    assert_eq!(op.total_operators, 2);
    assert_eq!(op.visible_operators.len(), 1);
    assert_eq!(op.visible_operators[0].full_name(), "Sarah Johnson");
}

#[test]
fn unmatched_search_drops_every_op() {
    let ops = fixture_ops();
    assert!(project(&ops, "no such shift", SortOption::Name, &clock()).is_empty());
}

#[test]
fn projection_leaves_input_untouched() {
    let ops = fixture_ops();
    let before = ops.clone();
    let _ = project(&ops, "sarah", SortOption::Reliability, &clock());
    assert_eq!(ops, before);
}

#[test]
fn identical_names_fall_back_to_id_order() {
    let ops = fixture_ops();
    let tie = find_op(&ops, "Tie Break Test");

    for sort_by in [SortOption::Name, SortOption::Ops, SortOption::Reliability] {
        let ids: Vec<String> = sort_operators(&tie.operators, sort_by)
            .into_iter()
            .map(|o| o.id)
            .collect();
        assert_eq!(ids, vec!["1", "2"], "sort {sort_by:?}");
    }
}

#[test]
fn sort_options_order_operators() {
    let ops = fixture_ops();
    let midday = find_op(&ops, "Packaging Line Midday Shift");

    let by_name: Vec<String> = sort_operators(&midday.operators, SortOption::Name)
        .iter()
        .map(|o| o.last_name.clone())
        .collect();
    assert_eq!(by_name, vec!["Diaz", "Lee"]);

    let by_ops: Vec<u32> = sort_operators(&midday.operators, SortOption::Ops)
        .iter()
        .map(|o| o.ops_completed)
        .collect();
    assert_eq!(by_ops, vec![40, 12]);

    let by_reliability: Vec<String> = sort_operators(&midday.operators, SortOption::Reliability)
        .iter()
        .map(|o| o.id.clone())
        .collect();
    assert_eq!(by_reliability, vec!["32", "31"]);
}

#[test]
fn unknown_sort_key_keeps_roster_order() {
    let ops = fixture_ops();
    let tie = find_op(&ops, "Tie Break Test");

    let kept: Vec<String> = sort_operators_by_key(&tie.operators, "shoeSize")
        .iter()
        .map(|o| o.id.clone())
        .collect();
    assert_eq!(kept, vec!["2", "1"]);

    let sorted: Vec<String> = sort_operators_by_key(&tie.operators, "lastName")
        .iter()
        .map(|o| o.id.clone())
        .collect();
    assert_eq!(sorted, vec!["1", "2"]);
}

#[test]
fn accented_last_names_sort_with_their_base_letter() {
    let named = |id: &str, last: &str| Operator {
        id: id.into(),
        first_name: "Jo".into(),
        last_name: last.into(),
        ops_completed: 0,
        reliability: 0.0,
        endorsements: Vec::new(),
    };
    let roster = vec![named("1", "Zimmer"), named("2", "Álvarez"), named("3", "Baker")];

    let last_names: Vec<String> = sort_operators(&roster, SortOption::Name)
        .into_iter()
        .map(|o| o.last_name)
        .collect();
    assert_eq!(last_names, vec!["Álvarez", "Baker", "Zimmer"]);
}
