use contracts::system::auth::{
    LoginRequest, LoginResponse, RefreshRequest, RefreshResponse, UserInfo,
};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::domain::a003_item_request::error::server_message;
use crate::shared::http::{HttpError, HttpMethod, HttpTransport};

const LOGIN_PATH: &str = "/auth/login";
const ME_PATH: &str = "/auth/me";
const REFRESH_PATH: &str = "/auth/refresh";
const LOGOUT_PATH: &str = "/auth/logout";

pub const CREDENTIALS_REQUIRED: &str = "Username and password are required";

fn describe(err: HttpError, fallback: &str) -> String {
    match err {
        HttpError::Status { body, .. } => {
            server_message(&body).unwrap_or_else(|| fallback.to_string())
        }
        other => format!("{}: {}", fallback, other),
    }
}

async fn post<T, B, R>(transport: &T, path: &str, body: &B) -> Result<R, HttpError>
where
    T: HttpTransport,
    B: Serialize,
    R: DeserializeOwned,
{
    let body = serde_json::to_value(body).map_err(|e| HttpError::Serialize(e.to_string()))?;
    let value = transport.send(HttpMethod::Post, path, Some(body)).await?;
    serde_json::from_value(value).map_err(|e| HttpError::Decode(e.to_string()))
}

/// Login with username and password
pub async fn login<T: HttpTransport>(
    transport: &T,
    username: &str,
    password: &str,
) -> Result<LoginResponse, String> {
    let username = username.trim();
    if username.is_empty() || password.trim().is_empty() {
        return Err(CREDENTIALS_REQUIRED.to_string());
    }
    let request = LoginRequest {
        username: username.to_string(),
        password: password.to_string(),
    };
    post(transport, LOGIN_PATH, &request)
        .await
        .map_err(|e| describe(e, "Login failed"))
}

/// Refresh access token using refresh token
pub async fn refresh_token<T: HttpTransport>(
    transport: &T,
    refresh_token: String,
) -> Result<RefreshResponse, String> {
    let request = RefreshRequest { refresh_token };
    post(transport, REFRESH_PATH, &request)
        .await
        .map_err(|e| describe(e, "Refresh failed"))
}

/// Revokes the refresh token server-side
pub async fn logout<T: HttpTransport>(transport: &T, refresh_token: String) -> Result<(), String> {
    let body = serde_json::to_value(RefreshRequest { refresh_token })
        .map_err(|e| format!("Failed to serialize request: {}", e))?;
    transport
        .send(HttpMethod::Post, LOGOUT_PATH, Some(body))
        .await
        .map(|_| ())
        .map_err(|e| describe(e, "Logout failed"))
}

/// The user the transport's bearer token belongs to
pub async fn current_user<T: HttpTransport>(transport: &T) -> Result<UserInfo, String> {
    let value = transport
        .send(HttpMethod::Get, ME_PATH, None)
        .await
        .map_err(|e| describe(e, "Get current user failed"))?;
    serde_json::from_value(value).map_err(|e| format!("Failed to parse response: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::http::testing::RecordingTransport;
    use contracts::system::users::Role;
    use futures::executor::block_on;
    use serde_json::json;

    #[test]
    fn test_login_posts_credentials() {
        let transport = RecordingTransport::new();
        transport.reply_ok(json!({
            "accessToken": "abc",
            "refreshToken": "def",
            "user": { "id": 1, "username": "admin", "role": "ADMIN", "office": { "id": 4, "name": "Registrar" } }
        }));

        let response = block_on(login(&transport, " admin ", "secret")).unwrap();

        assert_eq!(response.access_token, "abc");
        assert_eq!(response.user.role, Role::Admin);
        assert_eq!(response.user.office_id(), Some(4));
        let request = &transport.requests()[0];
        assert_eq!(request.path, "/auth/login");
        assert_eq!(
            request.body,
            Some(json!({ "username": "admin", "password": "secret" }))
        );
    }

    #[test]
    fn test_login_requires_credentials() {
        let transport = RecordingTransport::new();
        let err = block_on(login(&transport, "admin", "  ")).unwrap_err();
        assert_eq!(err, CREDENTIALS_REQUIRED);
        assert_eq!(transport.request_count(), 0);
    }

    #[test]
    fn test_login_failure_uses_server_message() {
        let transport = RecordingTransport::new();
        transport
            .reply_status(401, r#"{"message":"Invalid credentials"}"#)
            .reply_status(500, "");

        assert_eq!(
            block_on(login(&transport, "admin", "wrong")).unwrap_err(),
            "Invalid credentials"
        );
        assert_eq!(
            block_on(login(&transport, "admin", "wrong")).unwrap_err(),
            "Login failed"
        );
    }

    #[test]
    fn test_current_user() {
        let transport = RecordingTransport::new();
        transport.reply_ok(json!({ "id": 9, "username": "clerk" }));

        let user = block_on(current_user(&transport)).unwrap();

        assert_eq!(user.role, Role::User);
        assert_eq!(user.office_id(), None);
        assert_eq!(transport.requests()[0].method, HttpMethod::Get);
    }
}
