use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use leptos_router::hooks::use_navigate;
use wasm_bindgen_futures::spawn_local;

use crate::api;
use crate::auth::AuthContext;
use crate::forms::RegisterForm;
use crate::notify;
use crate::session::LOGIN_PATH;

#[component]
pub fn RegisterPage() -> impl IntoView {
    let auth = expect_context::<AuthContext>();
    let navigate = use_navigate();

    let form = RwSignal::new(RegisterForm::default());
    let (submitting, set_submitting) = signal(false);

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        let fields = match form.get_untracked().validate() {
            Ok(fields) => fields,
            Err(e) => {
                notify::alert(&e.to_string());
                return;
            }
        };

        set_submitting.set(true);
        let navigate = navigate.clone();
        spawn_local(async move {
            match api::register(&fields).await {
                Ok(resp) => {
                    navigate(auth.sign_in(&resp), Default::default());
                }
                Err(e) => {
                    set_submitting.set(false);
                    notify::report("register", e);
                }
            }
        });
    };

    view! {
        <div class="page auth-page">
            <div class="auth-box">
                <h2 class="auth-title">"Регистрация"</h2>
                <form class="auth-form" on:submit=on_submit>
                    <input
                        type="text"
                        class="input"
                        placeholder="Логин"
                        autocomplete="username"
                        prop:value=move || form.with(|f| f.username.clone())
                        on:input=move |ev| form.update(|f| f.username = event_target_value(&ev))
                    />
                    <input
                        type="password"
                        class="input"
                        placeholder="Пароль"
                        autocomplete="new-password"
                        prop:value=move || form.with(|f| f.password.clone())
                        on:input=move |ev| form.update(|f| f.password = event_target_value(&ev))
                    />
                    <input
                        type="email"
                        class="input"
                        placeholder="Email (необязательно)"
                        prop:value=move || form.with(|f| f.email.clone())
                        on:input=move |ev| form.update(|f| f.email = event_target_value(&ev))
                    />
                    <input
                        type="text"
                        class="input"
                        placeholder="ФИО (необязательно)"
                        prop:value=move || form.with(|f| f.full_name.clone())
                        on:input=move |ev| form.update(|f| f.full_name = event_target_value(&ev))
                    />
                    <button type="submit" class="btn btn-primary" disabled=move || submitting.get()>
                        {move || if submitting.get() { "Регистрация..." } else { "Зарегистрироваться" }}
                    </button>
                </form>
                <a href=LOGIN_PATH class="auth-switch">"Уже есть аккаунт?"</a>
            </div>
        </div>
    }
}
