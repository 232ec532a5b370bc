//! Authentication service - Handles sign-up, sign-in and token checks.
//!
//! Password hashing and token signing are consumed through the
//! `PasswordEncoder` and `TokenSigner` capabilities; user storage goes
//! through the User service so uniqueness is enforced in one place.

use async_trait::async_trait;
use std::sync::Arc;

use super::UserService;
use crate::domain::{NewUser, User};
use crate::errors::{AppError, AppResult};
use crate::infra::{Claims, PasswordEncoder, TokenSigner};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Result of a successful sign-in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignInResult {
    pub authorized: bool,
    pub token: String,
}

/// Result of a successful sign-up
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignUpResult {
    pub user: User,
    pub token: String,
}

/// Authentication service trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Check credentials and issue a token.
    ///
    /// Unknown email and wrong password both fail with `InvalidCredentials`.
    async fn sign_in(&self, email: &str, password: &str) -> AppResult<SignInResult>;

    /// Register a new user and issue a token for it
    async fn sign_up(&self, email: &str, password: &str) -> AppResult<SignUpResult>;

    /// Resolve the user a token subject refers to
    async fn validate_user(&self, email: &str) -> AppResult<Option<User>>;

    /// Verify a bearer token's signature and expiry
    fn verify_token(&self, token: &str) -> AppResult<Claims>;
}

/// Concrete implementation of AuthService.
pub struct Authenticator {
    users: Arc<dyn UserService>,
    passwords: Arc<dyn PasswordEncoder>,
    tokens: Arc<dyn TokenSigner>,
}

impl Authenticator {
    /// Create new auth service instance
    pub fn new(
        users: Arc<dyn UserService>,
        passwords: Arc<dyn PasswordEncoder>,
        tokens: Arc<dyn TokenSigner>,
    ) -> Self {
        Self {
            users,
            passwords,
            tokens,
        }
    }
}

#[async_trait]
impl AuthService for Authenticator {
    #[tracing::instrument(skip(self, password))]
    async fn sign_in(&self, email: &str, password: &str) -> AppResult<SignInResult> {
        let Some(user) = self.users.find_by_email(email).await? else {
            tracing::debug!("Sign-in for unknown email");
            return Err(AppError::InvalidCredentials);
        };

        if !self.passwords.verify(password, &user.password_hash)? {
            tracing::debug!(user_id = user.id, "Sign-in with wrong password");
            return Err(AppError::InvalidCredentials);
        }

        let token = self.tokens.sign(&user.email)?;
        Ok(SignInResult {
            authorized: true,
            token,
        })
    }

    #[tracing::instrument(skip(self, password))]
    async fn sign_up(&self, email: &str, password: &str) -> AppResult<SignUpResult> {
        let password_hash = self.passwords.hash(password)?;
        let user = self.users.create(NewUser::new(email, password_hash)).await?;

        let token = self.tokens.sign(&user.email)?;
        Ok(SignUpResult { user, token })
    }

    async fn validate_user(&self, email: &str) -> AppResult<Option<User>> {
        self.users.find_by_email(email).await
    }

    fn verify_token(&self, token: &str) -> AppResult<Claims> {
        self.tokens.decode(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::{MockPasswordEncoder, MockTokenSigner};
    use crate::services::MockUserService;
    use chrono::Utc;

    fn stored(email: &str) -> User {
        User {
            id: 1,
            email: email.to_string(),
            password_hash: "stored-hash".to_string(),
            created_at: Utc::now(),
        }
    }

    fn service(
        users: MockUserService,
        passwords: MockPasswordEncoder,
        tokens: MockTokenSigner,
    ) -> Authenticator {
        Authenticator::new(Arc::new(users), Arc::new(passwords), Arc::new(tokens))
    }

    #[tokio::test]
    async fn test_sign_in_success() {
        let mut users = MockUserService::new();
        users
            .expect_find_by_email()
            .returning(|email| Ok(Some(stored(email))));
        let mut passwords = MockPasswordEncoder::new();
        passwords.expect_verify().returning(|plain, hash| {
            assert_eq!(hash, "stored-hash");
            Ok(plain == "secret1")
        });
        let mut tokens = MockTokenSigner::new();
        tokens.expect_sign().times(1).returning(|subject| {
            assert_eq!(subject, "a@x.com");
            Ok("token".to_string())
        });

        let result = service(users, passwords, tokens)
            .sign_in("a@x.com", "secret1")
            .await
            .unwrap();

        assert!(result.authorized);
        assert_eq!(result.token, "token");
    }

    #[tokio::test]
    async fn test_unknown_email_and_wrong_password_fail_alike() {
        // Unknown email
        let mut users = MockUserService::new();
        users.expect_find_by_email().returning(|_| Ok(None));
        let mut passwords = MockPasswordEncoder::new();
        passwords.expect_verify().never();
        let mut tokens = MockTokenSigner::new();
        tokens.expect_sign().never();

        let unknown = service(users, passwords, tokens)
            .sign_in("nobody@x.com", "secret1")
            .await
            .unwrap_err();

        // Known email, wrong password
        let mut users = MockUserService::new();
        users
            .expect_find_by_email()
            .returning(|email| Ok(Some(stored(email))));
        let mut passwords = MockPasswordEncoder::new();
        passwords.expect_verify().returning(|_, _| Ok(false));
        let mut tokens = MockTokenSigner::new();
        tokens.expect_sign().never();

        let wrong = service(users, passwords, tokens)
            .sign_in("a@x.com", "wrong-password")
            .await
            .unwrap_err();

        assert!(matches!(unknown, AppError::InvalidCredentials));
        assert!(matches!(wrong, AppError::InvalidCredentials));
        assert_eq!(unknown.code(), wrong.code());
        assert_eq!(unknown.status(), wrong.status());
        assert_eq!(unknown.to_string(), wrong.to_string());
    }

    #[tokio::test]
    async fn test_sign_up_hashes_before_storing() {
        let mut users = MockUserService::new();
        users.expect_create().times(1).returning(|data| {
            assert_eq!(data.password_hash, "hashed:secret1");
            Ok(User {
                id: 5,
                email: data.email,
                password_hash: data.password_hash,
                created_at: Utc::now(),
            })
        });
        let mut passwords = MockPasswordEncoder::new();
        passwords
            .expect_hash()
            .returning(|plain| Ok(format!("hashed:{}", plain)));
        let mut tokens = MockTokenSigner::new();
        tokens.expect_sign().returning(|subject| Ok(format!("token-for:{}", subject)));

        let result = service(users, passwords, tokens)
            .sign_up("a@x.com", "secret1")
            .await
            .unwrap();

        assert_eq!(result.user.id, 5);
        assert_eq!(result.token, "token-for:a@x.com");
    }

    #[tokio::test]
    async fn test_sign_up_taken_email_issues_no_token() {
        let mut users = MockUserService::new();
        users
            .expect_create()
            .returning(|_| Err(AppError::EmailAlreadyTaken));
        let mut passwords = MockPasswordEncoder::new();
        passwords.expect_hash().returning(|_| Ok("hashed".to_string()));
        let mut tokens = MockTokenSigner::new();
        tokens.expect_sign().never();

        let result = service(users, passwords, tokens)
            .sign_up("a@x.com", "secret1")
            .await;

        assert!(matches!(result, Err(AppError::EmailAlreadyTaken)));
    }

    #[tokio::test]
    async fn test_validate_user_absent_is_none() {
        let mut users = MockUserService::new();
        users.expect_find_by_email().returning(|_| Ok(None));

        let result = service(users, MockPasswordEncoder::new(), MockTokenSigner::new())
            .validate_user("gone@x.com")
            .await
            .unwrap();

        assert!(result.is_none());
    }

    #[test]
    fn test_verify_token_delegates_to_signer() {
        let mut tokens = MockTokenSigner::new();
        tokens.expect_decode().returning(|_| {
            Ok(Claims {
                sub: "a@x.com".to_string(),
                iat: 0,
                exp: 1,
            })
        });

        let claims = service(MockUserService::new(), MockPasswordEncoder::new(), tokens)
            .verify_token("token")
            .unwrap();

        assert_eq!(claims.sub, "a@x.com");
    }
}
