use leptos::prelude::*;

use crate::api::AuthResponse;
use crate::session::{self, LocalStorage, Session};

/// Reactive mirror of the stored username, for the nav bar.
/// Local storage stays the source of truth for the route guard.
#[derive(Clone, Copy)]
pub struct AuthContext {
    pub username: ReadSignal<Option<String>>,
    set_username: WriteSignal<Option<String>>,
}

impl AuthContext {
    pub fn new() -> Self {
        let stored = Session::load(&LocalStorage::open()).map(|s| s.username);
        let (username, set_username) = signal(stored);
        Self {
            username,
            set_username,
        }
    }

    /// Store the session and return the path to go to.
    pub fn sign_in(&self, resp: &AuthResponse) -> &'static str {
        let to = session::sign_in(&LocalStorage::open(), resp);
        self.set_username.set(Some(resp.user.username().to_string()));
        to
    }

    pub fn sign_out(&self) -> &'static str {
        let to = session::sign_out(&LocalStorage::open());
        self.set_username.set(None);
        to
    }
}

impl Default for AuthContext {
    fn default() -> Self {
        Self::new()
    }
}
