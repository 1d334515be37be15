//! Table of the user's past checks, in the order the server returns them.

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;
use wasm_bindgen_futures::spawn_local;

use crate::api::{self, Report};
use crate::auth::AuthContext;
use crate::notify;
use crate::templates::Grade;

#[component]
pub fn ReportHistory(
    /// Session token used to fetch the reports.
    token: String,
) -> impl IntoView {
    let auth = expect_context::<AuthContext>();
    let navigate = use_navigate();
    let (reports, set_reports) = signal::<Option<Vec<Report>>>(None);
    let (loading, set_loading) = signal(true);

    // Load reports on mount
    spawn_local(async move {
        match api::my_reports(&token).await {
            Ok(r) => {
                set_reports.set(Some(r));
                set_loading.set(false);
            }
            Err(e) if e.is_unauthorized() => {
                navigate(auth.sign_out(), Default::default());
            }
            Err(e) => {
                set_loading.set(false);
                notify::report("load reports", e);
            }
        }
    });

    view! {
        <div class="report-history">
            <h3 class="history-title">"Мои отчеты"</h3>

            {move || {
                if loading.get() {
                    view! { <p class="history-loading">"Загрузка..."</p> }.into_any()
                } else if let Some(reports) = reports.get() {
                    if reports.is_empty() {
                        view! { <p class="history-empty">"Вы еще не проверяли документы."</p> }.into_any()
                    } else {
                        view! {
                            <table class="history-table">
                                <thead>
                                    <tr>
                                        <th>"№"</th>
                                        <th>"Файл"</th>
                                        <th>"Шаблон"</th>
                                        <th>"Оценка"</th>
                                        <th>"Статус"</th>
                                        <th>"Дата"</th>
                                    </tr>
                                </thead>
                                <tbody>
                                    {reports.iter().map(|r| {
                                        let grade_class = Grade::from_score(r.score).css_class();
                                        view! {
                                            <tr class="history-row">
                                                <td>{r.id}</td>
                                                <td>{r.file.clone()}</td>
                                                <td>{r.template.clone()}</td>
                                                <td class=grade_class>{format!("{:.1}", r.score)}</td>
                                                <td>{r.status.clone()}</td>
                                                <td>{r.upload_date.clone()}</td>
                                            </tr>
                                        }
                                    }).collect::<Vec<_>>()}
                                </tbody>
                            </table>
                        }.into_any()
                    }
                } else {
                    view! { <p class="history-empty">"Нет данных"</p> }.into_any()
                }
            }}
        </div>
    }
}
