//! Authentication endpoints.

use pulse_core::models::{LoginRequest, RefreshRequest, RegisterRequest, TokenPair, User};

use crate::client::ApiClient;
use crate::errors::ApiError;

impl ApiClient {
    /// Authenticate, persist the token pair, fetch and persist the
    /// signed-in user. Returns the user.
    pub async fn login(&self, email: &str, password: &str) -> Result<User, ApiError> {
        let tokens: TokenPair = self
            .post_json(
                "/auth/login",
                &LoginRequest {
                    email: email.to_string(),
                    password: password.to_string(),
                },
            )
            .await?;
        self.session()
            .set_tokens(&tokens.access_token, &tokens.refresh_token)?;

        let user = self.me().await?;
        self.session().set_user(user.clone())?;
        Ok(user)
    }

    /// The currently signed-in user, straight from the server.
    pub async fn me(&self) -> Result<User, ApiError> {
        self.get_json("/auth/me").await
    }

    /// Create an account. Role is `"admin"` or `"viewer"`.
    pub async fn register(&self, email: &str, password: &str, role: &str) -> Result<User, ApiError> {
        self.post_json(
            "/auth/register",
            &RegisterRequest {
                email: email.to_string(),
                password: password.to_string(),
                role: role.to_string(),
            },
        )
        .await
    }

    /// Exchange the stored refresh token for a fresh pair and persist it.
    pub async fn refresh(&self) -> Result<TokenPair, ApiError> {
        let refresh_token = self
            .session()
            .refresh_token()
            .ok_or(ApiError::SessionExpired)?;
        let tokens: TokenPair = self
            .post_json("/auth/refresh", &RefreshRequest { refresh_token })
            .await?;
        self.session()
            .set_tokens(&tokens.access_token, &tokens.refresh_token)?;
        Ok(tokens)
    }

    /// Drop the local session. Purely client-side.
    pub fn logout(&self) -> Result<(), ApiError> {
        self.session().clear()?;
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
