use leptos::prelude::*;

use crate::templates::ChecklistItem;

/// Whether a required section was found in the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionStatus {
    Found,
    Missing,
}

impl From<&ChecklistItem> for SectionStatus {
    fn from(item: &ChecklistItem) -> Self {
        if item.found {
            SectionStatus::Found
        } else {
            SectionStatus::Missing
        }
    }
}

#[component]
pub fn StatusBadge(
    /// Section label, e.g. "Введение"
    #[prop(into)]
    label: String,
    status: SectionStatus,
) -> impl IntoView {
    let (icon, class) = match status {
        SectionStatus::Found => ("\u{2713}", "status-badge status-pass"),
        SectionStatus::Missing => ("\u{2717}", "status-badge status-fail"),
    };

    view! {
        <li class="checklist-item">
            <span class=class>{icon}</span>
            <span class="checklist-label">{label}</span>
        </li>
    }
}
