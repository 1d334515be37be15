use leptos::prelude::*;
use leptos_router::components::Redirect;
use leptos_router::hooks::use_navigate;
use wasm_bindgen_futures::spawn_local;

use crate::api::{self, UserProfile};
use crate::auth::AuthContext;
use crate::components::report_history::ReportHistory;
use crate::notify;
use crate::session::{self, LocalStorage, Session};

#[component]
pub fn ProfilePage() -> impl IntoView {
    match session::require_session(&LocalStorage::open()) {
        Ok(session) => view! { <ProfileView session=session /> }.into_any(),
        Err(redirect) => view! { <Redirect path=redirect.to /> }.into_any(),
    }
}

#[component]
fn ProfileView(session: Session) -> impl IntoView {
    let auth = expect_context::<AuthContext>();
    let navigate = use_navigate();
    let (profile, set_profile) = signal::<Option<UserProfile>>(None);

    {
        let token = session.token.clone();
        spawn_local(async move {
            match api::get_profile(&token).await {
                Ok(p) => set_profile.set(Some(p)),
                Err(e) if e.is_unauthorized() => {
                    navigate(auth.sign_out(), Default::default());
                }
                Err(e) => notify::report("load profile", e),
            }
        });
    }

    let fallback_name = session.username.clone();

    view! {
        <div class="page profile-page">
            <h2>"Профиль"</h2>

            {move || match profile.get() {
                Some(p) => view! {
                    <dl class="profile-fields">
                        <dt>"Логин"</dt>
                        <dd>{p.username}</dd>
                        <dt>"ФИО"</dt>
                        <dd>{p.full_name.unwrap_or_else(|| "\u{2014}".to_string())}</dd>
                        <dt>"Email"</dt>
                        <dd>{p.email.unwrap_or_else(|| "\u{2014}".to_string())}</dd>
                        {p.id.map(|id| view! {
                            <dt>"ID"</dt>
                            <dd>{id}</dd>
                        })}
                    </dl>
                }.into_any(),
                None => view! {
                    <p class="profile-loading">{format!("{} \u{2014} загрузка профиля...", fallback_name)}</p>
                }.into_any(),
            }}

            <ReportHistory token=session.token />
        </div>
    }
}
