//! Administrator sign-in against the configured account.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::domain::ports::{AdminLoginService, AuthError, TokenService};
use crate::domain::{AdminAccount, AdminCredentials, AdminSession};

/// Checks the submitted password against the single configured account and
/// mints an access/refresh token pair on success.
///
/// No token is signed for a rejected password.
#[derive(Clone)]
pub struct AdminAuthService {
    account: AdminAccount,
    tokens: Arc<dyn TokenService>,
}

impl AdminAuthService {
    /// Create the service for `account`, signing with `tokens`.
    pub fn new(account: AdminAccount, tokens: Arc<dyn TokenService>) -> Self {
        Self { account, tokens }
    }
}

#[async_trait]
impl AdminLoginService for AdminAuthService {
    async fn login(&self, credentials: &AdminCredentials) -> Result<AdminSession, AuthError> {
        if !self.account.accepts(credentials) {
            warn!("admin sign-in rejected");
            return Err(AuthError::invalid_credentials());
        }

        let identity = self.account.identity();
        let access_token = self
            .tokens
            .issue_access(&identity)
            .map_err(|err| AuthError::token_issue(err.to_string()))?;
        let refresh_token = self
            .tokens
            .issue_refresh(identity.user_id)
            .map_err(|err| AuthError::token_issue(err.to_string()))?;

        info!(user_id = identity.user_id, username = %identity.username, "admin signed in");
        Ok(AdminSession {
            identity,
            access_token,
            refresh_token,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{MockTokenService, TokenError};
    use crate::domain::{ADMIN_ROLE, ADMIN_USER_ID};
    use rstest::{fixture, rstest};
    use rstest_bdd_macros::{given, then};

    #[fixture]
    fn account() -> AdminAccount {
        AdminAccount::new("app_box_admin", "app_box_admin@local", "letmein")
    }

    #[given("a token service that signs both tokens")]
    fn a_signing_token_service() -> MockTokenService {
        let mut tokens = MockTokenService::new();
        tokens
            .expect_issue_access()
            .times(1)
            .returning(|identity| Ok(format!("access-for-{}", identity.user_id)));
        tokens
            .expect_issue_refresh()
            .times(1)
            .returning(|user_id| Ok(format!("refresh-for-{user_id}")));
        tokens
    }

    #[given("a token service that must not be called")]
    fn an_untouched_token_service() -> MockTokenService {
        let mut tokens = MockTokenService::new();
        tokens.expect_issue_access().never();
        tokens.expect_issue_refresh().never();
        tokens
    }

    #[then("the session carries the admin identity and both tokens")]
    fn the_session_is_complete(result: Result<AdminSession, AuthError>) {
        let session = result.expect("login should succeed");
        assert_eq!(session.identity.user_id, ADMIN_USER_ID);
        assert_eq!(session.identity.role, ADMIN_ROLE);
        assert_eq!(session.identity.username, "app_box_admin");
        assert_eq!(session.identity.email, "app_box_admin@local");
        assert_eq!(session.access_token, format!("access-for-{ADMIN_USER_ID}"));
        assert_eq!(session.refresh_token, format!("refresh-for-{ADMIN_USER_ID}"));
    }

    #[then("the login is rejected as invalid credentials")]
    fn the_login_is_rejected(result: Result<AdminSession, AuthError>) {
        assert_eq!(result, Err(AuthError::InvalidCredentials));
    }

    #[rstest]
    #[tokio::test]
    async fn correct_password_yields_a_session(account: AdminAccount) {
        let service = AdminAuthService::new(account, Arc::new(a_signing_token_service()));
        let result = service.login(&AdminCredentials::new("letmein")).await;
        the_session_is_complete(result);
    }

    #[rstest]
    #[case("")]
    #[case("wrong")]
    #[case("letmein ")]
    #[tokio::test]
    async fn wrong_password_signs_nothing(account: AdminAccount, #[case] password: &str) {
        let service = AdminAuthService::new(account, Arc::new(an_untouched_token_service()));
        let result = service.login(&AdminCredentials::new(password)).await;
        the_login_is_rejected(result);
    }

    #[rstest]
    #[tokio::test]
    async fn signing_failure_is_reported(account: AdminAccount) {
        let mut tokens = MockTokenService::new();
        tokens
            .expect_issue_access()
            .times(1)
            .returning(|_| Err(TokenError::encode("bad key")));
        tokens.expect_issue_refresh().never();
        let service = AdminAuthService::new(account, Arc::new(tokens));

        let result = service.login(&AdminCredentials::new("letmein")).await;

        assert!(matches!(result, Err(AuthError::TokenIssue { .. })));
    }
}
