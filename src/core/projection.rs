//! Search, filter and sort pipeline turning raw ops into display-ready ones.

use std::cmp::Ordering;

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

use crate::models::{Op, Operator, ProcessedOp, SortOption};
use crate::utils::date::{Clock, shift_sort_key};

/// Order operators for display without touching the input.
///
/// Every ordering falls back to ascending `id`, so the result does not
/// depend on the input order.
pub fn sort_operators(operators: &[Operator], sort_by: SortOption) -> Vec<Operator> {
    let mut sorted = operators.to_vec();
    sorted.sort_by(|a, b| compare_operators(a, b, sort_by));
    sorted
}

/// Like [`sort_operators`] but driven by a raw sort key. Unknown keys keep
/// the roster order.
pub fn sort_operators_by_key(operators: &[Operator], key: &str) -> Vec<Operator> {
    match SortOption::parse(key) {
        Some(sort_by) => sort_operators(operators, sort_by),
        None => operators.to_vec(),
    }
}

fn compare_operators(a: &Operator, b: &Operator, sort_by: SortOption) -> Ordering {
    let primary = match sort_by {
        SortOption::Name => compare_names(&a.sort_name(), &b.sort_name()),
        SortOption::Ops => b.ops_completed.cmp(&a.ops_completed),
        SortOption::Reliability => b.reliability.total_cmp(&a.reliability),
    };
    primary.then_with(|| a.id.cmp(&b.id))
}

/// Collation-style name comparison in three levels: base letters
/// (accents and case folded away), then accents, then case with lowercase
/// first. `"Álvarez"` sorts next to `"Alvarez"`, not after `"Zimmer"`.
fn compare_names(a: &str, b: &str) -> Ordering {
    base_letters(a)
        .cmp(&base_letters(b))
        .then_with(|| accented(a).cmp(&accented(b)))
        .then_with(|| b.cmp(a))
}

fn base_letters(s: &str) -> String {
    s.nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase()
}

fn accented(s: &str) -> String {
    s.nfd().collect::<String>().to_lowercase()
}

/// Project raw ops for display.
///
/// An op whose title or public id contains the (trimmed, lowercased)
/// search term keeps its whole roster. Otherwise only operators whose
/// `"first last"` name contains the term survive, and the op is dropped
/// when none do. Operators are ordered by `sort_by`; ops always come out
/// earliest normalized start first.
pub fn project<C: Clock>(
    ops: &[Op],
    search_term: &str,
    sort_by: SortOption,
    clock: &C,
) -> Vec<ProcessedOp> {
    if ops.is_empty() {
        return Vec::new();
    }

    let term = search_term.trim().to_lowercase();
    let filtering = !term.is_empty();

    let mut keyed: Vec<(i64, ProcessedOp)> = ops
        .iter()
        .filter_map(|op| project_op(op, &term, filtering, sort_by))
        .map(|p| (shift_sort_key(&p.op.start_time, clock), p))
        .collect();

    keyed.sort_by_key(|(start, _)| *start);
    keyed.into_iter().map(|(_, p)| p).collect()
}

fn project_op(op: &Op, term: &str, filtering: bool, sort_by: SortOption) -> Option<ProcessedOp> {
    let op_matches = op.op_title.to_lowercase().contains(term)
        || op.public_id.to_lowercase().contains(term);

    let relevant: Vec<Operator> = if filtering && !op_matches {
        op.operators
            .iter()
            .filter(|o| o.full_name().to_lowercase().contains(term))
            .cloned()
            .collect()
    } else {
        op.operators.clone()
    };

    if filtering && !op_matches && relevant.is_empty() {
        return None;
    }

    let visible_operators = sort_operators(&relevant, sort_by);
    let is_filtered = filtering && visible_operators.len() != op.operators.len();

    Some(ProcessedOp {
        op: op.clone(),
        visible_operators,
        total_operators: op.operators.len(),
        is_filtered,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::date::FixedClock;
    use chrono::{NaiveDate, NaiveTime};

    fn clock() -> FixedClock {
        FixedClock::at(
            NaiveDate::from_ymd_opt(2026, 3, 10).unwrap(),
            NaiveTime::from_hms_opt(7, 0, 0).unwrap(),
        )
    }

    fn operator(id: &str, first: &str, last: &str, ops: u32, reliability: f64) -> Operator {
        Operator {
            id: id.into(),
            first_name: first.into(),
            last_name: last.into(),
            ops_completed: ops,
            reliability,
            endorsements: Vec::new(),
        }
    }

    fn op(id: &str, title: &str, start: &str, operators: Vec<Operator>) -> Op {
        Op {
            op_id: id.into(),
            public_id: format!("P-{id}"),
            op_title: title.into(),
            op_date: None,
            start_time: start.into(),
            end_time: start.into(),
            check_in_code: None,
            check_out_code: None,
            check_in_expiration_time: None,
            check_out_expiration_time: None,
            filled_quantity: None,
            est_total_hours: None,
            operators_needed: operators.len() as u32,
            operators,
        }
    }

    fn roster() -> Vec<Operator> {
        vec![
            operator("3", "Ana", "Zimmer", 40, 0.70),
            operator("1", "Bob", "Adams", 10, 0.95),
            operator("2", "Cleo", "Adams", 10, 0.95),
        ]
    }

    #[test]
    fn name_sort_uses_last_then_first() {
        let sorted = sort_operators(&roster(), SortOption::Name);
        let ids: Vec<&str> = sorted.iter().map(|o| o.id.as_str()).collect();
        assert_eq!(ids, ["1", "2", "3"]);
    }

    #[test]
    fn name_sort_ignores_case() {
        let ops = vec![
            operator("1", "Amy", "smith", 0, 0.0),
            operator("2", "Amy", "Brown", 0, 0.0),
        ];
        let sorted = sort_operators(&ops, SortOption::Name);
        assert_eq!(sorted[0].id, "2");
    }

    #[test]
    fn accents_only_break_ties_between_base_letters() {
        let ops = vec![
            operator("1", "Ana", "Álvarez", 0, 0.0),
            operator("2", "Ana", "Alvarez", 0, 0.0),
            operator("3", "Ana", "Alves", 0, 0.0),
        ];
        let sorted = sort_operators(&ops, SortOption::Name);
        let ids: Vec<&str> = sorted.iter().map(|o| o.id.as_str()).collect();
        assert_eq!(ids, ["2", "1", "3"]);
    }

    #[test]
    fn numeric_sorts_are_descending_with_id_tie_break() {
        let by_ops = sort_operators(&roster(), SortOption::Ops);
        let ids: Vec<&str> = by_ops.iter().map(|o| o.id.as_str()).collect();
        assert_eq!(ids, ["3", "1", "2"]);

        let by_reliability = sort_operators(&roster(), SortOption::Reliability);
        let ids: Vec<&str> = by_reliability.iter().map(|o| o.id.as_str()).collect();
        assert_eq!(ids, ["1", "2", "3"]);
    }

    #[test]
    fn identical_names_order_by_id_whatever_the_input_order() {
        let a = operator("1", "Sam", "Lee", 0, 0.5);
        let b = operator("2", "Sam", "Lee", 0, 0.5);

        for input in [vec![a.clone(), b.clone()], vec![b.clone(), a.clone()]] {
            let sorted = sort_operators(&input, SortOption::Name);
            assert_eq!(sorted[0].id, "1");
            assert_eq!(sorted[1].id, "2");
        }
    }

    #[test]
    fn unknown_sort_key_keeps_roster_order() {
        let sorted = sort_operators_by_key(&roster(), "seniority");
        let ids: Vec<&str> = sorted.iter().map(|o| o.id.as_str()).collect();
        assert_eq!(ids, ["3", "1", "2"]);
    }

    #[test]
    fn sorting_does_not_touch_the_input() {
        let input = roster();
        let _ = sort_operators(&input, SortOption::Name);
        assert_eq!(input[0].id, "3");
    }

    #[test]
    fn empty_term_keeps_everything_unfiltered() {
        let ops = vec![op("1", "Packing", "2026-03-10T08:00:00", roster())];
        let out = project(&ops, "   ", SortOption::Name, &clock());

        assert_eq!(out.len(), 1);
        assert_eq!(out[0].visible_operators.len(), 3);
        assert_eq!(out[0].total_operators, 3);
        assert!(!out[0].is_filtered);
    }

    #[test]
    fn title_match_keeps_full_roster() {
        let ops = vec![op("1", "Forklift Driver", "2026-03-10T08:00:00", roster())];
        let out = project(&ops, "  FORKLIFT ", SortOption::Name, &clock());

        assert_eq!(out[0].visible_operators.len(), 3);
        assert!(!out[0].is_filtered);
    }

    #[test]
    fn public_id_match_counts_as_op_match() {
        let ops = vec![op("77", "Packing", "2026-03-10T08:00:00", roster())];
        let out = project(&ops, "p-77", SortOption::Name, &clock());
        assert_eq!(out.len(), 1);
        assert!(!out[0].is_filtered);
    }

    #[test]
    fn operator_match_narrows_roster() {
        let ops = vec![op("1", "Packing", "2026-03-10T08:00:00", roster())];
        let out = project(&ops, "cleo adams", SortOption::Name, &clock());

        assert_eq!(out.len(), 1);
        assert_eq!(out[0].visible_operators.len(), 1);
        assert_eq!(out[0].visible_operators[0].id, "2");
        assert_eq!(out[0].total_operators, 3);
        assert!(out[0].is_filtered);
    }

    #[test]
    fn ops_without_any_match_are_dropped() {
        let ops = vec![op("1", "Packing", "2026-03-10T08:00:00", roster())];
        assert!(project(&ops, "nobody", SortOption::Name, &clock()).is_empty());
        assert!(project(&[], "", SortOption::Name, &clock()).is_empty());
    }

    #[test]
    fn ops_order_by_start_regardless_of_sort() {
        let ops = vec![
            op("pm", "PM", "1970-01-01T13:00:00", roster()),
            op("night", "Night", "1970-01-01T21:00:00", roster()),
            op("am", "AM", "1970-01-01T10:00:00", roster()),
        ];

        for sort in [SortOption::Name, SortOption::Ops, SortOption::Reliability] {
            let out = project(&ops, "", sort, &clock());
            let ids: Vec<&str> = out.iter().map(|p| p.op.op_id.as_str()).collect();
            assert_eq!(ids, ["am", "pm", "night"]);
        }
    }

    #[test]
    fn invalid_start_times_sort_first() {
        let ops = vec![
            op("dated", "Dated", "2026-03-10T06:00:00", roster()),
            op("broken", "Broken", "soon", roster()),
        ];
        let out = project(&ops, "", SortOption::Name, &clock());
        assert_eq!(out[0].op.op_id, "broken");
    }

    #[test]
    fn projection_is_deterministic() {
        let ops = vec![
            op("2", "Loading", "2026-03-10T09:00:00", roster()),
            op("1", "Packing", "2026-03-10T09:00:00", roster()),
        ];
        let first = project(&ops, "adams", SortOption::Ops, &clock());
        let second = project(&ops, "adams", SortOption::Ops, &clock());
        assert_eq!(first, second);
        // equal start times keep feed order
        assert_eq!(first[0].op.op_id, "2");
    }
}
