//! Normalization of typed answer and score input.

#[cfg(test)]
#[path = "entry_test.rs"]
mod entry_test;

/// Most numeral characters a free-standing score field keeps.
pub const SINGLE_SCORE_DIGITS: usize = 3;

/// Split a group answer string into one upper-cased character per slot.
///
/// Whitespace is dropped; characters past `len` are ignored and slots past the
/// end of the input come back empty.
#[must_use]
pub fn split_group_answer(input: &str, len: usize) -> Vec<String> {
    spread(input.chars().filter(|c| !c.is_whitespace()).flat_map(char::to_uppercase), len)
}

/// Split a group score string into one digit per slot; non-digits are dropped.
#[must_use]
pub fn split_group_score(input: &str, len: usize) -> Vec<String> {
    spread(input.chars().filter(char::is_ascii_digit), len)
}

fn spread(chars: impl Iterator<Item = char>, len: usize) -> Vec<String> {
    let mut out: Vec<String> = chars.take(len).map(String::from).collect();
    out.resize(len, String::new());
    out
}

/// Whole grid answer in one slot (imports, restored multi-choice sets): upper-cased, whitespace dropped.
#[must_use]
pub fn normalize_grid_answer(input: &str) -> String {
    input.chars().filter(|c| !c.is_whitespace()).flat_map(char::to_uppercase).collect()
}

/// Free-text answer: truncated to `max_length` characters, case untouched.
#[must_use]
pub fn normalize_digits_answer(input: &str, max_length: usize) -> String {
    input.chars().take(max_length).collect()
}

/// Free-standing score: numerals and the first decimal point only, at most
/// [`SINGLE_SCORE_DIGITS`] numerals.
#[must_use]
pub fn normalize_single_score(input: &str) -> String {
    let mut out = String::new();
    let mut digits = 0;
    let mut seen_point = false;
    for c in input.chars() {
        if c.is_ascii_digit() && digits < SINGLE_SCORE_DIGITS {
            out.push(c);
            digits += 1;
        } else if c == '.' && !seen_point {
            out.push(c);
            seen_point = true;
        }
    }
    out
}

/// Display string for a group: slot values concatenated.
///
/// Blank slots contribute nothing, so a gap in the middle of a group shifts
/// later values left when the string is edited again.
#[must_use]
pub fn join_group(values: &[String]) -> String {
    values.concat()
}
