//! Per-subject input grouping.
//!
//! Turns the slot list into the sections the entry view draws: runs of grid
//! questions edited as one short string ("51234"), and single free-text
//! fields. Each subject family has a fixed plan; the elective parts come from
//! [`crate::subject::ELECTIVES`].

#[cfg(test)]
#[path = "sections_test.rs"]
mod sections_test;

use std::ops::RangeInclusive;

use crate::items::{CustomCounts, QuestionItem, QuestionKind};
use crate::subject::{ElectiveFamily, SubjectFamily};

/// Default number of grid questions per group input.
pub const GROUP_SIZE: usize = 5;

/// One input control, addressing slots by index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment {
    /// `len` consecutive grid slots edited as one string.
    Group { start: usize, len: usize },
    /// One free-text slot.
    Single { index: usize },
}

impl Segment {
    /// Slot indices covered by this control.
    #[must_use]
    pub fn indices(self) -> std::ops::Range<usize> {
        match self {
            Self::Group { start, len } => start..start + len,
            Self::Single { index } => index..index + 1,
        }
    }
}

/// A titled run of controls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub title: String,
    /// Set when the section is governed by the elective selector.
    pub elective: Option<ElectiveFamily>,
    pub segments: Vec<Segment>,
}

#[derive(Debug, Clone, Copy)]
enum Chunking {
    Groups(usize),
    Singles,
}

struct Rule {
    title: &'static str,
    range: RangeInclusive<u32>,
    chunking: Chunking,
    elective: bool,
}

const KOREAN_RULES: &[Rule] = &[
    Rule { title: "공통", range: 1..=34, chunking: Chunking::Groups(GROUP_SIZE), elective: false },
    Rule { title: "선택", range: 35..=45, chunking: Chunking::Groups(GROUP_SIZE), elective: true },
];

const MATH_RULES: &[Rule] = &[
    Rule { title: "공통 객관식", range: 1..=15, chunking: Chunking::Groups(GROUP_SIZE), elective: false },
    Rule { title: "공통 주관식", range: 16..=22, chunking: Chunking::Singles, elective: false },
    Rule { title: "선택 객관식", range: 23..=28, chunking: Chunking::Groups(6), elective: true },
    Rule { title: "선택 주관식", range: 29..=30, chunking: Chunking::Singles, elective: true },
];

const EXPLORATION_RULES: &[Rule] =
    &[Rule { title: "선택", range: 1..=20, chunking: Chunking::Groups(GROUP_SIZE), elective: true }];

/// Section plan for a subject over the current slots.
///
/// `custom` is only consulted for [`SubjectFamily::Other`].
#[must_use]
pub fn plan_sections(family: SubjectFamily, items: &[QuestionItem], custom: CustomCounts) -> Vec<Section> {
    let rules = match family {
        SubjectFamily::Korean => KOREAN_RULES,
        SubjectFamily::Math => MATH_RULES,
        SubjectFamily::Exploration => EXPLORATION_RULES,
        SubjectFamily::Other => return plan_other(items, custom),
        SubjectFamily::English | SubjectFamily::Default => {
            let all: Vec<usize> = (0..items.len()).collect();
            return vec![Section { title: "전체".into(), elective: None, segments: chunk(&all, GROUP_SIZE) }];
        }
    };

    let elective = family.elective();
    rules
        .iter()
        .map(|rule| {
            let indices = indices_in(items, &rule.range);
            let segments = match rule.chunking {
                Chunking::Groups(size) => chunk(&indices, size),
                Chunking::Singles => indices.iter().map(|&index| Segment::Single { index }).collect(),
            };
            Section {
                title: rule.title.to_owned(),
                elective: if rule.elective { elective } else { None },
                segments,
            }
        })
        .filter(|s| !s.segments.is_empty())
        .collect()
}

fn plan_other(items: &[QuestionItem], custom: CustomCounts) -> Vec<Section> {
    let grid_count = usize::try_from(custom.grid_count()).unwrap_or(usize::MAX).min(items.len());
    let objective: Vec<usize> =
        (0..grid_count).filter(|&i| items[i].kind == QuestionKind::Grid).collect();
    let subjective: Vec<Segment> = (grid_count..items.len()).map(|index| Segment::Single { index }).collect();

    let mut sections = Vec::new();
    if !objective.is_empty() {
        sections.push(Section { title: "객관식".into(), elective: None, segments: chunk(&objective, GROUP_SIZE) });
    }
    if !subjective.is_empty() {
        sections.push(Section { title: "주관식".into(), elective: None, segments: subjective });
    }
    sections
}

/// Slot indices whose question number lies in `range`, in slot order.
#[must_use]
pub fn indices_in(items: &[QuestionItem], range: &RangeInclusive<u32>) -> Vec<usize> {
    items
        .iter()
        .enumerate()
        .filter(|(_, item)| item.number().is_some_and(|n| range.contains(&n)))
        .map(|(i, _)| i)
        .collect()
}

/// Split indices into groups of `size`, breaking wherever indices are not consecutive.
fn chunk(indices: &[usize], size: usize) -> Vec<Segment> {
    let size = size.max(1);
    let mut segments = Vec::new();
    let mut run: Option<(usize, usize)> = None;
    for &index in indices {
        run = match run {
            Some((start, len)) if start + len == index && len < size => Some((start, len + 1)),
            Some((start, len)) => {
                segments.push(Segment::Group { start, len });
                Some((index, 1))
            }
            None => Some((index, 1)),
        };
    }
    if let Some((start, len)) = run {
        segments.push(Segment::Group { start, len });
    }
    segments
}
