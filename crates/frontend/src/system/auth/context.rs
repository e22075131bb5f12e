use contracts::system::auth::UserInfo;
use contracts::system::users::Role;
use leptos::prelude::*;
use leptos::task::spawn_local;

use super::{api, storage};
use crate::shared::api_utils::ApiConfig;
use crate::shared::http::GlooTransport;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct AuthState {
    pub access_token: Option<String>,
    pub user_info: Option<UserInfo>,
}

impl AuthState {
    pub fn is_authenticated(&self) -> bool {
        self.access_token.is_some() && self.user_info.is_some()
    }

    /// Anonymous sessions get the least privileged role
    pub fn role(&self) -> Role {
        self.user_info
            .as_ref()
            .map(|u| u.role)
            .unwrap_or_default()
    }

    pub fn office_id(&self) -> Option<i64> {
        self.user_info.as_ref().and_then(UserInfo::office_id)
    }
}

fn transport() -> GlooTransport {
    GlooTransport::new(ApiConfig::from_window())
}

/// Validates a stored token, refreshing it once when the backend rejects it.
async fn restore_session() -> Option<AuthState> {
    storage::get_access_token()?;
    let transport = transport();

    if let Ok(user_info) = api::current_user(&transport).await {
        return Some(AuthState {
            access_token: storage::get_access_token(),
            user_info: Some(user_info),
        });
    }

    let Some(refresh_token) = storage::get_refresh_token() else {
        storage::clear_tokens();
        return None;
    };
    match api::refresh_token(&transport, refresh_token).await {
        Ok(response) => {
            storage::save_access_token(&response.access_token);
            let user_info = api::current_user(&transport).await.ok()?;
            Some(AuthState {
                access_token: Some(response.access_token),
                user_info: Some(user_info),
            })
        }
        Err(e) => {
            log::warn!("session refresh failed: {}", e);
            storage::clear_tokens();
            None
        }
    }
}

/// Auth context provider component
#[component]
pub fn AuthProvider(children: ChildrenFn) -> impl IntoView {
    let auth_state = RwSignal::new(AuthState::default());

    Effect::new(move |_| {
        spawn_local(async move {
            if let Some(state) = restore_session().await {
                auth_state.set(state);
            }
        });
    });

    provide_context(auth_state);

    children()
}

/// Hook to access auth state
pub fn use_auth() -> RwSignal<AuthState> {
    use_context::<RwSignal<AuthState>>().unwrap_or_else(|| RwSignal::new(AuthState::default()))
}

/// Signs in, stores the tokens and publishes the user to the context.
pub async fn do_login(
    auth_state: RwSignal<AuthState>,
    username: String,
    password: String,
) -> Result<(), String> {
    let response = api::login(&transport(), &username, &password).await?;
    storage::save_tokens(&response.access_token, response.refresh_token.as_deref());
    log::debug!("signed in as {}", response.user.username);

    auth_state.set(AuthState {
        access_token: Some(response.access_token),
        user_info: Some(response.user),
    });
    Ok(())
}

pub async fn do_logout(auth_state: RwSignal<AuthState>) {
    if let Some(refresh_token) = storage::get_refresh_token() {
        if let Err(e) = api::logout(&transport(), refresh_token).await {
            log::warn!("{}", e);
        }
    }
    storage::clear_tokens();
    auth_state.set(AuthState::default());
}
