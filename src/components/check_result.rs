//! Result panel for one document check.
//!
//! Shows the score with its grade, the server's status and details, and the
//! fixed checklist for the chosen template with found/missing marks.

use leptos::prelude::*;

use crate::api::CheckResult;
use crate::components::status_badge::{SectionStatus, StatusBadge};
use crate::templates::{self, Grade};

#[component]
pub fn CheckResultDisplay(
    result: CheckResult,
    /// Template the document was checked against.
    template: String,
) -> impl IntoView {
    let items = templates::evaluate(&template, &result);
    let found_count = items.iter().filter(|i| i.found).count();
    let total = items.len();

    let status = if result.status.is_empty() {
        Grade::from_score(result.score).label().to_string()
    } else {
        result.status.clone()
    };
    let file = result.file.clone();

    view! {
        <div class="check-result">
            <div class="score-section">
                <h3>"Результат проверки"</h3>
                {file.map(|f| view! { <p class="result-file">"Файл: " {f}</p> })}
                <ScoreBadge score=result.score status=status />
                {(!result.details.is_empty()).then(|| view! {
                    <p class="result-details">{result.details.clone()}</p>
                })}
            </div>

            <div class="checklist-section">
                <h3>{format!("Разделы шаблона \u{ab}{}\u{bb}", template)}</h3>
                <p class="section-subtitle">{format!("Отмечено {} из {}", found_count, total)}</p>
                <ul class="checklist">
                    {items.iter().map(|item| view! {
                        <StatusBadge label=item.label status=SectionStatus::from(item) />
                    }).collect::<Vec<_>>()}
                </ul>
            </div>

            {(!result.missing_sections.is_empty()).then(|| view! {
                <div class="missing-section">
                    <h3>"Отсутствуют"</h3>
                    <ul class="missing-list">
                        {result.missing_sections.iter().map(|s| view! {
                            <li class="missing-item">{s.clone()}</li>
                        }).collect::<Vec<_>>()}
                    </ul>
                </div>
            })}
        </div>
    }
}

#[component]
fn ScoreBadge(score: f64, status: String) -> impl IntoView {
    let class = format!("score-badge {}", Grade::from_score(score).css_class());

    view! {
        <div class=class>
            <span class="score-value">{format!("{:.1}%", score)}</span>
            <span class="score-status">{status}</span>
        </div>
    }
}
