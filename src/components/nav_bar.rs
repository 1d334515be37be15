use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::auth::AuthContext;
use crate::session::{HOME_PATH, PROFILE_PATH};

#[component]
pub fn NavBar() -> impl IntoView {
    let auth = expect_context::<AuthContext>();
    let navigate = use_navigate();

    let logout = move |_| {
        let to = auth.sign_out();
        navigate(to, Default::default());
    };

    view! {
        <nav class="navbar">
            <div class="navbar-header">
                <h1 class="navbar-title">"Проверка структуры отчетов"</h1>
            </div>
            <ul class="nav-list">
                <li class="nav-item">
                    <a href=HOME_PATH class="nav-link">"Проверка"</a>
                </li>
                <li class="nav-item">
                    <a href=PROFILE_PATH class="nav-link">"Профиль"</a>
                </li>
            </ul>
            <div class="navbar-user">
                <span class="navbar-username">{move || auth.username.get().unwrap_or_default()}</span>
                <button class="btn btn-secondary" on:click=logout>"Выйти"</button>
            </div>
        </nav>
    }
}
