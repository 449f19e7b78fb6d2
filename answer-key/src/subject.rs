//! Subject families and the elective configuration table.
//!
//! Elective question ranges live in one table ([`ELECTIVES`]) consulted by the
//! item builder, the section planner, the editor's cache swap and the payload
//! builder. Nothing else hardcodes 35–45, 23–30 or 1–20.

#[cfg(test)]
#[path = "subject_test.rs"]
mod subject_test;

use std::ops::RangeInclusive;

/// Which fixed layout and rendering rules a subject follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SubjectFamily {
    Korean,
    Math,
    English,
    Exploration,
    /// Free-form "기타" subject sized by custom counts.
    Other,
    /// Anything unrecognised; items come from the raw layout.
    Default,
}

impl SubjectFamily {
    /// Identify the family from the subject's display name.
    #[must_use]
    pub fn from_subject_name(name: &str) -> Self {
        let name = name.trim();
        if name.contains("탐구") || exploration_option(name).is_some() {
            return Self::Exploration;
        }
        match name {
            "국어" => Self::Korean,
            "수학" => Self::Math,
            "영어" => Self::English,
            "기타" => Self::Other,
            _ => Self::Default,
        }
    }

    /// The elective family governing part of this subject's sheet, if any.
    #[must_use]
    pub fn elective(self) -> Option<ElectiveFamily> {
        match self {
            Self::Korean => Some(ElectiveFamily::Korean),
            Self::Math => Some(ElectiveFamily::Math),
            Self::Exploration => Some(ElectiveFamily::Exploration),
            Self::English | Self::Other | Self::Default => None,
        }
    }
}

/// Subject families that carry an elective selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ElectiveFamily {
    Korean,
    Math,
    Exploration,
}

impl ElectiveFamily {
    #[must_use]
    pub fn config(self) -> &'static ElectiveConfig {
        match self {
            Self::Korean => &ELECTIVES[0],
            Self::Math => &ELECTIVES[1],
            Self::Exploration => &ELECTIVES[2],
        }
    }
}

/// One selectable elective subject.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElectiveOption {
    pub name: &'static str,
    pub code: u32,
}

/// Question range and options of one elective family.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElectiveConfig {
    pub family: ElectiveFamily,
    /// Question numbers swapped when the elective changes.
    pub range: RangeInclusive<u32>,
    pub options: &'static [ElectiveOption],
}

impl ElectiveConfig {
    #[must_use]
    pub fn contains(&self, number: u32) -> bool {
        self.range.contains(&number)
    }

    #[must_use]
    pub fn option(&self, name: &str) -> Option<&'static ElectiveOption> {
        self.options.iter().find(|o| o.name == name)
    }
}

pub const KOREAN_ELECTIVES: &[ElectiveOption] =
    &[ElectiveOption { name: "화법과 작문", code: 0 }, ElectiveOption { name: "언어와 매체", code: 1 }];

pub const MATH_ELECTIVES: &[ElectiveOption] = &[
    ElectiveOption { name: "확률과 통계", code: 0 },
    ElectiveOption { name: "미적분", code: 1 },
    ElectiveOption { name: "기하", code: 2 },
];

/// Social studies (11–19) then sciences (20–27).
pub const EXPLORATION_ELECTIVES: &[ElectiveOption] = &[
    ElectiveOption { name: "생활과 윤리", code: 11 },
    ElectiveOption { name: "윤리와 사상", code: 12 },
    ElectiveOption { name: "한국지리", code: 13 },
    ElectiveOption { name: "세계지리", code: 14 },
    ElectiveOption { name: "동아시아사", code: 15 },
    ElectiveOption { name: "세계사", code: 16 },
    ElectiveOption { name: "경제", code: 17 },
    ElectiveOption { name: "정치와 법", code: 18 },
    ElectiveOption { name: "사회·문화", code: 19 },
    ElectiveOption { name: "물리학Ⅰ", code: 20 },
    ElectiveOption { name: "화학Ⅰ", code: 21 },
    ElectiveOption { name: "생명과학Ⅰ", code: 22 },
    ElectiveOption { name: "지구과학Ⅰ", code: 23 },
    ElectiveOption { name: "물리학Ⅱ", code: 24 },
    ElectiveOption { name: "화학Ⅱ", code: 25 },
    ElectiveOption { name: "생명과학Ⅱ", code: 26 },
    ElectiveOption { name: "지구과학Ⅱ", code: 27 },
];

pub static ELECTIVES: [ElectiveConfig; 3] = [
    ElectiveConfig { family: ElectiveFamily::Korean, range: 35..=45, options: KOREAN_ELECTIVES },
    ElectiveConfig { family: ElectiveFamily::Math, range: 23..=30, options: MATH_ELECTIVES },
    ElectiveConfig { family: ElectiveFamily::Exploration, range: 1..=20, options: EXPLORATION_ELECTIVES },
];

fn exploration_option(name: &str) -> Option<&'static ElectiveOption> {
    EXPLORATION_ELECTIVES.iter().find(|o| o.name == name)
}
