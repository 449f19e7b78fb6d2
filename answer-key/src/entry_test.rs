use super::*;

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| (*s).to_owned()).collect()
}

#[test]
fn group_answer_upper_cases_and_strips_whitespace() {
    assert_eq!(split_group_answer("a b\tc", 5), strings(&["A", "B", "C", "", ""]));
}

#[test]
fn group_answer_distributes_one_per_slot() {
    assert_eq!(split_group_answer("51234", 5), strings(&["5", "1", "2", "3", "4"]));
}

#[test]
fn group_answer_ignores_overflow() {
    assert_eq!(split_group_answer("1234567", 3), strings(&["1", "2", "3"]));
}

#[test]
fn group_answer_empty_clears_group() {
    assert_eq!(split_group_answer("", 2), strings(&["", ""]));
}

#[test]
fn group_score_keeps_digits_only() {
    assert_eq!(split_group_score("2x2 3.2", 5), strings(&["2", "2", "3", "2", ""]));
}

#[test]
fn grid_answer_keeps_every_character() {
    assert_eq!(normalize_grid_answer(" a c "), "AC");
    assert_eq!(normalize_grid_answer("3"), "3");
}

#[test]
fn digits_answer_truncates_without_case_change() {
    assert_eq!(normalize_digits_answer("abc123", 4), "abc1");
    assert_eq!(normalize_digits_answer("12", 10), "12");
}

#[test]
fn single_score_strips_non_digits() {
    assert_eq!(normalize_single_score("3점"), "3");
    assert_eq!(normalize_single_score(" 4 "), "4");
}

#[test]
fn single_score_collapses_duplicate_points() {
    assert_eq!(normalize_single_score("2..5"), "2.5");
    assert_eq!(normalize_single_score("1.2.3"), "1.23");
}

#[test]
fn single_score_caps_numerals() {
    assert_eq!(normalize_single_score("12345"), "123");
    assert_eq!(normalize_single_score("1.2345"), "1.23");
}

#[test]
fn join_group_concatenates() {
    assert_eq!(join_group(&strings(&["A", "", "C"])), "AC");
    assert_eq!(join_group(&[]), "");
}
