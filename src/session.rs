//! Session token persistence and the route guard built on it.
//!
//! The token is opaque to the client. Its presence in storage is the only
//! thing that gates protected views; there is no expiry or refresh here.

use tracing::{info, warn};

use crate::api::AuthResponse;

pub const TOKEN_KEY: &str = "token";
pub const USERNAME_KEY: &str = "username";

pub const LOGIN_PATH: &str = "/login";
pub const REGISTER_PATH: &str = "/register";
pub const HOME_PATH: &str = "/";
pub const PROFILE_PATH: &str = "/profile";

/// Synchronous key/value storage.
pub trait SessionStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// `window.localStorage`. When the browser denies access (private mode,
/// sandboxed iframe) every read misses and writes are dropped.
#[derive(Clone)]
pub struct LocalStorage {
    inner: Option<web_sys::Storage>,
}

impl LocalStorage {
    pub fn open() -> Self {
        let inner = web_sys::window().and_then(|w| w.local_storage().ok().flatten());
        if inner.is_none() {
            warn!("localStorage unavailable, session will not persist");
        }
        Self { inner }
    }
}

impl SessionStore for LocalStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.inner.as_ref()?.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) {
        if let Some(storage) = &self.inner {
            if storage.set_item(key, value).is_err() {
                warn!(key, "failed to write localStorage");
            }
        }
    }

    fn remove(&self, key: &str) {
        if let Some(storage) = &self.inner {
            let _ = storage.remove_item(key);
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub token: String,
    pub username: String,
}

impl Session {
    /// `None` when no usable token is stored.
    pub fn load(store: &impl SessionStore) -> Option<Self> {
        let token = store.get(TOKEN_KEY).filter(|t| !t.trim().is_empty())?;
        let username = store.get(USERNAME_KEY).unwrap_or_default();
        Some(Self { token, username })
    }

    pub fn save(store: &impl SessionStore, resp: &AuthResponse) -> Self {
        let session = Self {
            token: resp.token.clone(),
            username: resp.user.username().to_string(),
        };
        store.set(TOKEN_KEY, &session.token);
        store.set(USERNAME_KEY, &session.username);
        session
    }

    pub fn clear(store: &impl SessionStore) {
        store.remove(TOKEN_KEY);
        store.remove(USERNAME_KEY);
    }
}

/// Where a guarded view sends a visitor without a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Redirect {
    pub to: &'static str,
}

/// Checked while a protected view is being built, before it starts any fetch.
pub fn require_session(store: &impl SessionStore) -> Result<Session, Redirect> {
    Session::load(store).ok_or(Redirect { to: LOGIN_PATH })
}

/// Persist a fresh login/registration. Returns the path to navigate to.
pub fn sign_in(store: &impl SessionStore, resp: &AuthResponse) -> &'static str {
    let session = Session::save(store, resp);
    info!(user = %session.username, "session stored");
    HOME_PATH
}

/// Forget the stored session. Returns the path to navigate to.
pub fn sign_out(store: &impl SessionStore) -> &'static str {
    Session::clear(store);
    info!("session cleared");
    LOGIN_PATH
}

#[cfg(test)]
pub(crate) mod tests {
    use std::cell::RefCell;
    use std::collections::HashMap;

    use super::*;
    use crate::api::{AuthUser, UserProfile};

    #[derive(Default)]
    pub(crate) struct MemoryStorage {
        items: RefCell<HashMap<String, String>>,
    }

    impl SessionStore for MemoryStorage {
        fn get(&self, key: &str) -> Option<String> {
            self.items.borrow().get(key).cloned()
        }

        fn set(&self, key: &str, value: &str) {
            self.items.borrow_mut().insert(key.to_string(), value.to_string());
        }

        fn remove(&self, key: &str) {
            self.items.borrow_mut().remove(key);
        }
    }

    fn auth(token: &str, user: AuthUser) -> AuthResponse {
        AuthResponse {
            token: token.to_string(),
            user,
        }
    }

    #[test]
    fn test_guard_redirects_without_token() {
        let store = MemoryStorage::default();
        assert_eq!(require_session(&store), Err(Redirect { to: LOGIN_PATH }));
    }

    #[test]
    fn test_guard_treats_blank_token_as_missing() {
        let store = MemoryStorage::default();
        store.set(TOKEN_KEY, "   ");
        store.set(USERNAME_KEY, "student");
        assert_eq!(require_session(&store), Err(Redirect { to: "/login" }));
    }

    #[test]
    fn test_guard_passes_with_token() {
        let store = MemoryStorage::default();
        store.set(TOKEN_KEY, "t0k3n");
        let session = require_session(&store).unwrap();
        assert_eq!(session.token, "t0k3n");
        assert_eq!(session.username, "");
    }

    #[test]
    fn test_sign_in_stores_token_and_username_and_goes_home() {
        let store = MemoryStorage::default();
        let to = sign_in(&store, &auth("abc", AuthUser::Name("student".to_string())));
        assert_eq!(to, HOME_PATH);
        assert_eq!(store.get(TOKEN_KEY).as_deref(), Some("abc"));
        assert_eq!(store.get(USERNAME_KEY).as_deref(), Some("student"));
    }

    #[test]
    fn test_sign_in_with_profile_user() {
        let store = MemoryStorage::default();
        let user = AuthUser::Profile(UserProfile {
            id: Some(1),
            username: "ivan".to_string(),
            email: None,
            full_name: Some("Иван Петров".to_string()),
        });
        sign_in(&store, &auth("xyz", user));
        assert_eq!(
            Session::load(&store),
            Some(Session {
                token: "xyz".to_string(),
                username: "ivan".to_string()
            })
        );
    }

    #[test]
    fn test_sign_in_replaces_previous_session() {
        let store = MemoryStorage::default();
        sign_in(&store, &auth("old", AuthUser::Name("a".to_string())));
        sign_in(&store, &auth("new", AuthUser::Name("b".to_string())));
        let session = Session::load(&store).unwrap();
        assert_eq!(session.token, "new");
        assert_eq!(session.username, "b");
    }

    #[test]
    fn test_sign_out_clears_both_keys_and_goes_to_login() {
        let store = MemoryStorage::default();
        sign_in(&store, &auth("abc", AuthUser::Name("student".to_string())));
        let to = sign_out(&store);
        assert_eq!(to, LOGIN_PATH);
        assert_eq!(store.get(TOKEN_KEY), None);
        assert_eq!(store.get(USERNAME_KEY), None);
        assert!(require_session(&store).is_err());
    }
}
