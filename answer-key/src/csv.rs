//! `q,answer,score` CSV import/export.
//!
//! Quoting follows RFC 4180: fields containing a comma, quote or line break
//! are wrapped in quotes with inner quotes doubled, and quoted fields may span
//! lines. Exports start with a UTF-8 BOM so spreadsheet tools pick the right
//! encoding; imports strip it.

#[cfg(test)]
#[path = "csv_test.rs"]
mod csv_test;

use std::collections::HashMap;

use crate::error::CsvError;
use crate::items::QuestionItem;

pub const BOM: char = '\u{feff}';
pub const HEADER: [&str; 3] = ["q", "answer", "score"];

/// One imported row. Columns absent from the header stay `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CsvAnswer {
    pub answer: Option<String>,
    pub score: Option<String>,
}

/// Quote a field when it needs it.
#[must_use]
pub fn csv_quote(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') || s.contains('\r') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

/// Split CSV text into records. A leading BOM is ignored; blank lines are skipped.
///
/// # Errors
///
/// [`CsvError::UnterminatedQuote`] when the input ends inside a quoted field.
pub fn parse_records(text: &str) -> Result<Vec<Vec<String>>, CsvError> {
    let text = text.strip_prefix(BOM).unwrap_or(text);
    let mut records = Vec::new();
    let mut record: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        if in_quotes {
            if ch == '"' {
                if chars.peek() == Some(&'"') {
                    field.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                }
            } else {
                field.push(ch);
            }
            continue;
        }
        match ch {
            '"' => in_quotes = true,
            ',' => record.push(std::mem::take(&mut field)),
            '\r' | '\n' => {
                if ch == '\r' && chars.peek() == Some(&'\n') {
                    chars.next();
                }
                record.push(std::mem::take(&mut field));
                push_record(&mut records, std::mem::take(&mut record));
            }
            _ => field.push(ch),
        }
    }
    if in_quotes {
        return Err(CsvError::UnterminatedQuote);
    }
    if !field.is_empty() || !record.is_empty() {
        record.push(field);
        push_record(&mut records, record);
    }
    Ok(records)
}

fn push_record(records: &mut Vec<Vec<String>>, record: Vec<String>) {
    let blank = record.iter().all(|f| f.trim().is_empty());
    if !blank {
        records.push(record);
    }
}

/// Parse a header-keyed answer CSV into `qid → row`.
///
/// Header names are matched case-insensitively and may appear in any order;
/// `q` is required along with at least one of `answer` / `score`. Rows with an
/// empty `q` are skipped; a repeated `q` keeps the last row.
///
/// # Errors
///
/// Returns [`CsvError`] for an empty file, a missing column, or an unterminated quote.
pub fn parse_answer_csv(text: &str) -> Result<HashMap<String, CsvAnswer>, CsvError> {
    let records = parse_records(text)?;
    let Some((header, rows)) = records.split_first() else {
        return Err(CsvError::MissingHeader);
    };
    let column = |name: &str| header.iter().position(|h| h.trim().eq_ignore_ascii_case(name));
    let q_col = column("q").ok_or(CsvError::MissingColumn("q"))?;
    let answer_col = column("answer");
    let score_col = column("score");
    if answer_col.is_none() && score_col.is_none() {
        return Err(CsvError::MissingColumn("answer"));
    }

    let cell = |row: &[String], col: Option<usize>| col.map(|c| row.get(c).cloned().unwrap_or_default());
    let mut out = HashMap::new();
    for row in rows {
        let qid = row.get(q_col).map_or("", |v| v.trim());
        if qid.is_empty() {
            continue;
        }
        out.insert(qid.to_owned(), CsvAnswer { answer: cell(row, answer_col), score: cell(row, score_col) });
    }
    Ok(out)
}

/// Export one row per slot, BOM first.
#[must_use]
pub fn write_answer_csv(items: &[QuestionItem], answers: &[String], scores: &[String]) -> String {
    let mut out = String::new();
    out.push(BOM);
    out.push_str(&HEADER.join(","));
    out.push_str("\r\n");
    for (i, item) in items.iter().enumerate() {
        let answer = answers.get(i).map_or("", String::as_str);
        let score = scores.get(i).map_or("", String::as_str);
        out.push_str(&format!("{},{},{}\r\n", csv_quote(&item.qid), csv_quote(answer), csv_quote(score)));
    }
    out
}
