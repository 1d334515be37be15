use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use leptos_router::hooks::use_navigate;
use wasm_bindgen_futures::spawn_local;

use crate::api;
use crate::auth::AuthContext;
use crate::forms::LoginForm;
use crate::notify;
use crate::session::REGISTER_PATH;

#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = expect_context::<AuthContext>();
    let navigate = use_navigate();

    let (username, set_username) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (submitting, set_submitting) = signal(false);

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        let form = LoginForm {
            username: username.get_untracked(),
            password: password.get_untracked(),
        };
        let fields = match form.validate() {
            Ok(fields) => fields,
            Err(e) => {
                notify::alert(&e.to_string());
                return;
            }
        };

        set_submitting.set(true);
        let navigate = navigate.clone();
        spawn_local(async move {
            match api::login(&fields).await {
                Ok(resp) => {
                    navigate(auth.sign_in(&resp), Default::default());
                }
                Err(e) => {
                    set_submitting.set(false);
                    notify::report("login", e);
                }
            }
        });
    };

    view! {
        <div class="page auth-page">
            <div class="auth-box">
                <h2 class="auth-title">"Вход"</h2>
                <form class="auth-form" on:submit=on_submit>
                    <input
                        type="text"
                        class="input"
                        placeholder="Логин"
                        autocomplete="username"
                        prop:value=move || username.get()
                        on:input=move |ev| set_username.set(event_target_value(&ev))
                    />
                    <input
                        type="password"
                        class="input"
                        placeholder="Пароль"
                        autocomplete="current-password"
                        prop:value=move || password.get()
                        on:input=move |ev| set_password.set(event_target_value(&ev))
                    />
                    <button type="submit" class="btn btn-primary" disabled=move || submitting.get()>
                        {move || if submitting.get() { "Вход..." } else { "Войти" }}
                    </button>
                </form>
                <a href=REGISTER_PATH class="auth-switch">"Нет аккаунта?"</a>
            </div>
        </div>
    }
}
