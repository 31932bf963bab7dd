//! Property tests for categorization, day ordering and CSV shape.

use proptest::prelude::*;

use timetable_export::api::{Category, TableId};
use timetable_export::export::csv;
use timetable_export::models::TimetableGrid;
use timetable_export::services::{categorize, classify, normalize, order_days, CANONICAL_DAY_ORDER};

fn table_id_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-z0-9_]{0,8}".prop_map(|s| format!("TT-Sem-{}", s)),
        "[A-Za-z]{0,8}".prop_map(|s| format!("TT-Inst-{}", s)),
        "[A-Z0-9]{0,4}".prop_map(|s| format!("TT-Lab-{}", s)),
        "[A-Za-z -]{0,12}",
    ]
}

fn day_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        prop::sample::select(CANONICAL_DAY_ORDER.to_vec()).prop_map(str::to_string),
        prop::sample::select(vec!["Saturday", "Sunday", "monday", "Holiday"])
            .prop_map(str::to_string),
    ]
}

proptest! {
    #[test]
    fn categorize_is_a_partition(raw in prop::collection::vec(table_id_strategy(), 0..40)) {
        let ids: Vec<TableId> = raw.iter().map(|s| TableId::new(s.clone())).collect();
        let tabs = categorize(&ids);

        prop_assert_eq!(tabs.recognized_len() + tabs.unrecognized().len(), ids.len());
        for category in Category::ALL {
            for id in tabs.get(category) {
                prop_assert!(id.as_str().starts_with(category.prefix()));
            }
            // every bucket is a subsequence of the input
            let expected: Vec<&TableId> =
                ids.iter().filter(|id| id.category() == Some(category)).collect();
            let actual: Vec<&TableId> = tabs.get(category).iter().collect();
            prop_assert_eq!(actual, expected);
        }
        for id in tabs.unrecognized() {
            prop_assert!(id.category().is_none());
        }
    }

    #[test]
    fn normalize_is_identity_without_prefix(raw in "[A-Za-z0-9 _-]{0,16}") {
        prop_assume!(Category::of(&raw).is_none());
        prop_assert_eq!(normalize(&raw), raw);
    }

    #[test]
    fn order_days_is_a_sorted_permutation(days in prop::collection::vec(day_strategy(), 0..12)) {
        let mut grid = TimetableGrid::new(["slot"]);
        for day in &days {
            grid = grid.with_day(day.clone(), [day.clone()]);
        }

        let ordered: Vec<&str> = order_days(&grid).into_iter().map(|(day, _)| day).collect();
        prop_assert_eq!(ordered.len(), grid.day_count());

        let input: Vec<&str> = grid.rows().map(|(day, _)| day).collect();
        let canonical: Vec<&str> = ordered
            .iter()
            .copied()
            .filter(|day| CANONICAL_DAY_ORDER.contains(day))
            .collect();
        let mut sorted = canonical.clone();
        sorted.sort_by_key(|day| CANONICAL_DAY_ORDER.iter().position(|c| c == day));
        prop_assert_eq!(&canonical, &sorted);

        // canonical days first, then the rest in input order
        let others: Vec<&str> = ordered[canonical.len()..].to_vec();
        let expected_others: Vec<&str> = input
            .iter()
            .copied()
            .filter(|day| !CANONICAL_DAY_ORDER.contains(day))
            .collect();
        prop_assert_eq!(others, expected_others);

        // rows travel with their day
        for (day, cells) in order_days(&grid) {
            prop_assert_eq!(cells, &[day.to_string()][..]);
        }
    }

    #[test]
    fn classified_text_is_never_blank(raw in "[ a-zA-Z0-9-]{0,12}") {
        let cell = classify(&raw);
        prop_assert!(!cell.display_text.is_empty());
        prop_assert_eq!(cell.kind.is_free(), cell.display_text == "-" && raw.trim() != "-");
    }

    #[test]
    fn csv_has_one_line_per_day_plus_header(
        days in prop::collection::btree_set(day_strategy(), 0..8),
        width in 1usize..5,
    ) {
        let headers: Vec<String> = (0..width).map(|i| format!("{}-{}", 8 + i, 9 + i)).collect();
        let mut grid = TimetableGrid::new(headers);
        for day in &days {
            grid = grid.with_day(day.clone(), vec!["x-LEC".to_string(); width]);
        }

        let text = csv::serialize(&TableId::new("TT-Lab-L1"), &grid).unwrap();
        prop_assert!(text.ends_with('\n'));
        let lines: Vec<&str> = text.lines().collect();
        prop_assert_eq!(lines.len(), days.len() + 1);
        for line in lines {
            prop_assert_eq!(line.split(',').count(), width + 1);
        }
    }
}
