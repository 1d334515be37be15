//! Upload page: pick a template and a `.docx`, submit, see the result.

use leptos::ev::SubmitEvent;
use leptos::html::Input;
use leptos::prelude::*;
use leptos_router::components::Redirect;
use leptos_router::hooks::use_navigate;
use tracing::debug;
use wasm_bindgen_futures::spawn_local;

use crate::api::{self, CheckResult};
use crate::auth::AuthContext;
use crate::components::check_result::CheckResultDisplay;
use crate::forms::{CheckForm, DOCX_EXTENSION};
use crate::notify;
use crate::session::{self, LocalStorage, Session};
use crate::templates;

#[derive(Debug, Clone)]
pub enum CheckState {
    /// Form shown, nothing submitted yet
    Idle,
    /// Request in flight
    Checking,
    /// Result for the given template
    Complete(CheckResult, String),
}

#[component]
pub fn HomePage() -> impl IntoView {
    match session::require_session(&LocalStorage::open()) {
        Ok(session) => view! { <CheckView session=session /> }.into_any(),
        Err(redirect) => view! { <Redirect path=redirect.to /> }.into_any(),
    }
}

#[component]
fn CheckView(session: Session) -> impl IntoView {
    let auth = expect_context::<AuthContext>();
    let navigate = use_navigate();

    let (state, set_state) = signal(CheckState::Idle);
    let (template_names, set_template_names) =
        signal(templates::KNOWN.iter().map(|s| s.to_string()).collect::<Vec<_>>());
    let (template, set_template) = signal(templates::LAB.to_string());
    let file_input = NodeRef::<Input>::new();

    // Prefer the server's template list; the built-in one stays on failure.
    // The selection must always be one of the offered names.
    spawn_local(async move {
        match api::list_templates().await {
            Ok(resp) if !resp.templates.is_empty() => {
                let names = resp.names();
                set_template.set(templates::pick_template(&template.get_untracked(), &names));
                set_template_names.set(names);
            }
            Ok(_) => {}
            Err(e) => debug!(error = %e, "template list unavailable, using built-in names"),
        }
    });

    let token = session.token.clone();
    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        if matches!(state.get_untracked(), CheckState::Checking) {
            return;
        }

        let file = file_input
            .get_untracked()
            .and_then(|input| input.files())
            .and_then(|files| files.get(0));
        let form = CheckForm {
            file,
            template: template.get_untracked(),
        };
        let submission = match form.validate() {
            Ok(s) => s,
            Err(e) => {
                notify::alert(&e.to_string());
                return;
            }
        };

        set_state.set(CheckState::Checking);
        let token = token.clone();
        let navigate = navigate.clone();
        spawn_local(async move {
            match api::check_document(&submission, Some(&token)).await {
                Ok(result) => {
                    let checked = result.template.clone().unwrap_or(submission.template);
                    set_state.set(CheckState::Complete(result, checked));
                }
                Err(e) if e.is_unauthorized() => {
                    navigate(auth.sign_out(), Default::default());
                }
                Err(e) => {
                    set_state.set(CheckState::Idle);
                    notify::report("check document", e);
                }
            }
        });
    };

    view! {
        <div class="page home-page">
            <h2>"Проверка структуры отчета"</h2>
            <p class="page-description">
                "Загрузите документ .docx и выберите шаблон, чтобы проверить наличие обязательных разделов."
            </p>

            <form class="check-form" on:submit=on_submit>
                <div class="form-group">
                    <label for="template-select">"Шаблон"</label>
                    <select
                        id="template-select"
                        class="input"
                        prop:value=move || template.get()
                        on:change=move |ev| set_template.set(event_target_value(&ev))
                    >
                        {move || template_names.get().into_iter().map(|name| view! {
                            <option value=name.clone() selected={name == template.get_untracked()}>{name.clone()}</option>
                        }).collect::<Vec<_>>()}
                    </select>
                </div>

                <div class="form-group">
                    <label for="docx-input">"Документ"</label>
                    <input
                        id="docx-input"
                        type="file"
                        class="input"
                        accept=DOCX_EXTENSION
                        node_ref=file_input
                    />
                </div>

                <button
                    type="submit"
                    class="btn btn-primary"
                    disabled=move || matches!(state.get(), CheckState::Checking)
                >
                    {move || if matches!(state.get(), CheckState::Checking) { "Проверка..." } else { "Проверить" }}
                </button>
            </form>

            {move || match state.get() {
                CheckState::Idle => ().into_any(),
                CheckState::Checking => view! {
                    <div class="loading-indicator">
                        <div class="spinner"></div>
                        <p>"Документ проверяется..."</p>
                    </div>
                }.into_any(),
                CheckState::Complete(result, checked) => view! {
                    <CheckResultDisplay result=result template=checked />
                }.into_any(),
            }}
        </div>
    }
}
