use leptos::prelude::*;
use leptos_router::components::*;
use leptos_router::path;

use crate::auth::AuthContext;
use crate::components::nav_bar::NavBar;
use crate::pages::home::HomePage;
use crate::pages::login::LoginPage;
use crate::pages::not_found::NotFoundPage;
use crate::pages::profile::ProfilePage;
use crate::pages::register::RegisterPage;

#[component]
pub fn App() -> impl IntoView {
    let auth = AuthContext::new();
    provide_context(auth);

    view! {
        <Router>
            <div class="app-layout">
                <Show when=move || auth.username.get().is_some()>
                    <NavBar />
                </Show>
                <main class="content">
                    <Routes fallback=|| view! { <NotFoundPage /> }>
                        <Route path=path!("/login") view=LoginPage />
                        <Route path=path!("/register") view=RegisterPage />
                        <Route path=path!("/") view=HomePage />
                        <Route path=path!("/profile") view=ProfilePage />
                    </Routes>
                </main>
            </div>
        </Router>
    }
}
