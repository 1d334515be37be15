use leptos::prelude::*;

use crate::session::HOME_PATH;

#[component]
pub fn NotFoundPage() -> impl IntoView {
    view! {
        <div class="page not-found-page">
            <h2>"Страница не найдена"</h2>
            <a href=HOME_PATH class="btn btn-primary">"На главную"</a>
        </div>
    }
}
