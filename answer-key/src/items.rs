//! Question-item builder: subject preset or raw layout to ordered question slots.

#[cfg(test)]
#[path = "items_test.rs"]
mod items_test;

use canvas::doc::{BlockKind, Layout};
use serde::{Deserialize, Serialize};

use crate::subject::SubjectFamily;

/// Free-text length for subjective answers.
pub const DIGITS_MAX_LENGTH: usize = 10;
/// Free-text length for plain `digits` blocks in a raw layout.
pub const RAW_DIGITS_MAX_LENGTH: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionKind {
    /// Single-choice bubble row.
    Grid,
    /// Free-text field.
    Digits,
}

/// One answerable slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionItem {
    pub qid: String,
    pub kind: QuestionKind,
    pub max_length: usize,
}

impl QuestionItem {
    #[must_use]
    pub fn grid(number: u32) -> Self {
        Self { qid: format!("Q{number}"), kind: QuestionKind::Grid, max_length: 1 }
    }

    #[must_use]
    pub fn digits(number: u32, max_length: usize) -> Self {
        Self { qid: format!("Q{number}"), kind: QuestionKind::Digits, max_length }
    }

    /// Question number encoded in the qid, if any.
    #[must_use]
    pub fn number(&self) -> Option<u32> {
        question_number(&self.qid)
    }
}

/// Counts for the free-form "기타" subject.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomCounts {
    /// Total question count; derived from the other two when unset.
    #[serde(default)]
    pub total: Option<u32>,
    #[serde(default)]
    pub multiple_choice: u32,
    #[serde(default)]
    pub subjective: u32,
}

impl CustomCounts {
    #[must_use]
    pub fn total(&self) -> u32 {
        self.total.unwrap_or(self.multiple_choice + self.subjective)
    }

    /// Number of leading grid questions.
    #[must_use]
    pub fn grid_count(&self) -> u32 {
        self.multiple_choice.min(self.total())
    }
}

/// Fixed question layouts shared with the backend's scoring contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubjectPreset {
    Korean,
    English,
    Math,
    Exploration,
    Other(CustomCounts),
}

impl SubjectPreset {
    /// Preset for a subject family; `Default` subjects have none.
    #[must_use]
    pub fn for_family(family: SubjectFamily, custom: CustomCounts) -> Option<Self> {
        match family {
            SubjectFamily::Korean => Some(Self::Korean),
            SubjectFamily::English => Some(Self::English),
            SubjectFamily::Math => Some(Self::Math),
            SubjectFamily::Exploration => Some(Self::Exploration),
            SubjectFamily::Other => Some(Self::Other(custom)),
            SubjectFamily::Default => None,
        }
    }

    #[must_use]
    pub fn family(self) -> SubjectFamily {
        match self {
            Self::Korean => SubjectFamily::Korean,
            Self::English => SubjectFamily::English,
            Self::Math => SubjectFamily::Math,
            Self::Exploration => SubjectFamily::Exploration,
            Self::Other(_) => SubjectFamily::Other,
        }
    }

    #[must_use]
    pub fn items(self) -> Vec<QuestionItem> {
        match self {
            Self::Korean | Self::English => (1..=45).map(QuestionItem::grid).collect(),
            Self::Exploration => (1..=20).map(QuestionItem::grid).collect(),
            Self::Math => (1..=30)
                .map(|n| match n {
                    16..=22 | 29..=30 => QuestionItem::digits(n, DIGITS_MAX_LENGTH),
                    _ => QuestionItem::grid(n),
                })
                .collect(),
            Self::Other(counts) => {
                let grid = counts.grid_count();
                (1..=counts.total())
                    .map(|n| if n <= grid { QuestionItem::grid(n) } else { QuestionItem::digits(n, DIGITS_MAX_LENGTH) })
                    .collect()
            }
        }
    }
}

/// Build the ordered slot list. A preset wins over a layout when both are given.
#[must_use]
pub fn build_question_items(preset: Option<SubjectPreset>, layout: Option<&Layout>) -> Vec<QuestionItem> {
    match (preset, layout) {
        (Some(preset), _) => preset.items(),
        (None, Some(layout)) => items_from_layout(layout),
        (None, None) => Vec::new(),
    }
}

/// Raw-layout fallback: `min(rows, questionCount)` grid items per choice block,
/// `max(1, questionCount)` fields per digit block.
///
/// A choice block with `questionCount == 0` contributes nothing.
#[must_use]
pub fn items_from_layout(layout: &Layout) -> Vec<QuestionItem> {
    let mut items = Vec::new();
    for block in &layout.blocks {
        let prefix = &block.question_prefix;
        let start = block.question_start;
        match block.kind {
            BlockKind::Grid | BlockKind::Q => {
                let count = block.rows.min(block.question_count);
                items.extend((0..count).map(|i| QuestionItem {
                    qid: format!("{prefix}{}", start + i),
                    kind: QuestionKind::Grid,
                    max_length: 1,
                }));
            }
            BlockKind::Digits | BlockKind::Id | BlockKind::Phone | BlockKind::Code => {
                let max_length =
                    if block.kind == BlockKind::Digits { RAW_DIGITS_MAX_LENGTH } else { DIGITS_MAX_LENGTH };
                items.extend((0..block.question_count.max(1)).map(|i| QuestionItem {
                    qid: format!("{prefix}{}", start + i),
                    kind: QuestionKind::Digits,
                    max_length,
                }));
            }
            BlockKind::Name => {}
        }
    }
    items
}

/// Parse the trailing decimal digits of a qid. Numbers below 1 do not resolve.
#[must_use]
pub fn question_number(qid: &str) -> Option<u32> {
    let trimmed = qid.trim();
    let digits_start = trimmed.len() - trimmed.bytes().rev().take_while(u8::is_ascii_digit).count();
    match trimmed[digits_start..].parse::<u32>() {
        Ok(n) if n >= 1 => Some(n),
        _ => None,
    }
}
