mod api;
mod app;
mod auth;
mod components;
mod config;
mod error;
mod forms;
mod logging;
mod notify;
mod pages;
mod session;
mod templates;

use app::App;

fn main() {
    let config = config::current();
    logging::init(config);
    tracing::info!(api_base = %config.api_base, "starting doccheck");

    leptos::mount::mount_to_body(App);
}
