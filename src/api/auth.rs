use tracing::{info, warn};

use crate::auth::{SessionEvent, CREDENTIAL_KEY};
use crate::client::{ApiClient, RequestDescriptor};
use crate::error::Result;
use crate::types::{AuthTokenResponse, LoginRequest};

/// Endpoint that exchanges username and password for a credential.
pub const LOGIN_PATH: &str = "/auth/login";

impl ApiClient {
    /// `POST /auth/login`.
    ///
    /// A token in the answer is persisted before the payload is returned.
    /// On failure nothing is stored.
    pub async fn login(&self, username: &str, password: &str) -> Result<AuthTokenResponse> {
        let body = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        let response: AuthTokenResponse = self
            .execute_json(RequestDescriptor::post(LOGIN_PATH).json(&body)?)
            .await
            .map_err(|err| {
                warn!(username, error = %err, "login failed");
                err
            })?;

        match response.token.as_deref().filter(|token| !token.is_empty()) {
            Some(token) => {
                self.persist(token)?;
                info!(username, "logged in");
                self.emit(SessionEvent::LoggedIn);
            }
            None => warn!(username, "login succeeded without a token"),
        }
        Ok(response)
    }

    /// Forget the stored credential.
    pub fn logout(&self) -> Result<()> {
        self.store().clear(CREDENTIAL_KEY)?;
        info!("logged out");
        self.emit(SessionEvent::LoggedOut);
        Ok(())
    }
}
