//! Per-template checklists and score grading.

use crate::api::CheckResult;

pub const LAB: &str = "лабораторная";
pub const COURSE: &str = "курсовая";

/// Template names offered when the server list is unavailable.
pub const KNOWN: &[&str] = &[LAB, COURSE];

const LAB_SECTIONS: &[&str] = &[
    "Титульный лист",
    "Введение",
    "Теория",
    "Практика",
    "Заключение",
    "Литература",
];

const COURSE_SECTIONS: &[&str] = &[
    "Титульный лист",
    "Содержание",
    "Введение",
    "Основная часть",
    "Заключение",
    "Библиография",
];

/// Required section labels for a template. Unknown names have none.
pub fn checklist(template: &str) -> &'static [&'static str] {
    match template {
        LAB => LAB_SECTIONS,
        COURSE => COURSE_SECTIONS,
        _ => &[],
    }
}

/// A label counts as found when any returned section contains it,
/// ignoring case. "Введение в тему" therefore satisfies "Введение".
pub fn is_found(label: &str, found_sections: &[String]) -> bool {
    let needle = label.to_lowercase();
    found_sections
        .iter()
        .any(|section| section.to_lowercase().contains(&needle))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChecklistItem {
    pub label: &'static str,
    pub found: bool,
}

pub fn evaluate(template: &str, result: &CheckResult) -> Vec<ChecklistItem> {
    checklist(template)
        .iter()
        .map(|&label| ChecklistItem {
            label,
            found: is_found(label, &result.found_sections),
        })
        .collect()
}

/// Keep the current selection if the offered list still has it,
/// otherwise fall back to the first offered name.
pub fn pick_template(current: &str, names: &[String]) -> String {
    if names.iter().any(|n| n == current) {
        return current.to_string();
    }
    names
        .first()
        .cloned()
        .unwrap_or_else(|| current.to_string())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grade {
    Excellent,
    Good,
    Fair,
    NeedsWork,
}

impl Grade {
    pub fn from_score(score: f64) -> Self {
        if score >= 80.0 {
            Grade::Excellent
        } else if score >= 60.0 {
            Grade::Good
        } else if score >= 40.0 {
            Grade::Fair
        } else {
            Grade::NeedsWork
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Grade::Excellent => "Отлично",
            Grade::Good => "Хорошо",
            Grade::Fair => "Удовлетворительно",
            Grade::NeedsWork => "Требует доработки",
        }
    }

    pub fn css_class(self) -> &'static str {
        match self {
            Grade::Excellent => "grade-excellent",
            Grade::Good => "grade-good",
            Grade::Fair => "grade-fair",
            Grade::NeedsWork => "grade-needs-work",
        }
    }
}
