//! Session tokens kept in browser `localStorage`.
//!
//! Storage failures (private mode, quota) are ignored: the user simply has
//! to sign in again.

use web_sys::{window, Storage};

const ACCESS_TOKEN_KEY: &str = "auth_access_token";
const REFRESH_TOKEN_KEY: &str = "auth_refresh_token";

fn local_storage() -> Option<Storage> {
    window()?.local_storage().ok()?
}

fn read(key: &str) -> Option<String> {
    local_storage()?
        .get_item(key)
        .ok()?
        .filter(|value| !value.is_empty())
}

/// Stores the tokens of a fresh session. A missing refresh token removes any old one.
pub fn save_tokens(access_token: &str, refresh_token: Option<&str>) {
    let Some(storage) = local_storage() else {
        return;
    };
    let _ = storage.set_item(ACCESS_TOKEN_KEY, access_token);
    match refresh_token {
        Some(token) => {
            let _ = storage.set_item(REFRESH_TOKEN_KEY, token);
        }
        None => {
            let _ = storage.remove_item(REFRESH_TOKEN_KEY);
        }
    }
}

pub fn save_access_token(token: &str) {
    if let Some(storage) = local_storage() {
        let _ = storage.set_item(ACCESS_TOKEN_KEY, token);
    }
}

pub fn get_access_token() -> Option<String> {
    read(ACCESS_TOKEN_KEY)
}

pub fn get_refresh_token() -> Option<String> {
    read(REFRESH_TOKEN_KEY)
}

pub fn clear_tokens() {
    if let Some(storage) = local_storage() {
        let _ = storage.remove_item(ACCESS_TOKEN_KEY);
        let _ = storage.remove_item(REFRESH_TOKEN_KEY);
    }
}
