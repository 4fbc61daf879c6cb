use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use async_trait::async_trait;
use axum_helpers::JwtIssuer;
use std::sync::Arc;

use crate::error::{UserError, UserResult};
use crate::models::{
    AuthResponse, LoginRequest, NewUser, RegisterRequest, User, UserResponse, normalize_email,
};
use crate::repository::UserRepository;

const MIN_PASSWORD_CHARS: usize = 6;
const MAX_PASSWORD_CHARS: usize = 128;

// Argon2id with default parameters; verified on unknown emails so a miss costs the same as a hit.
const UNKNOWN_USER_HASH: &str = "$argon2id$v=19$m=19456,t=2,p=1$c29tZXNhbHRzb21lc2FsdA$AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA";

/// Registration and login, as seen by the HTTP layer.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuthService: Send + Sync + 'static {
    /// Create an account and sign the new user in.
    async fn register_user(&self, request: RegisterRequest) -> UserResult<AuthResponse>;

    /// Check credentials and the requested role, then issue a token.
    async fn login_user(&self, request: LoginRequest) -> UserResult<AuthResponse>;
}

/// Service layer for User business logic
#[derive(Clone)]
pub struct UserService<R: UserRepository> {
    repository: Arc<R>,
    tokens: JwtIssuer,
}

impl<R: UserRepository> UserService<R> {
    pub fn new(repository: R, tokens: JwtIssuer) -> Self {
        Self {
            repository: Arc::new(repository),
            tokens,
        }
    }

    fn issue(&self, user: User) -> UserResult<AuthResponse> {
        let token = self
            .tokens
            .create_access_token(
                &user.id.to_string(),
                &user.email,
                &user.name,
                &user.role.to_string(),
            )
            .map_err(|e| UserError::Token(e.to_string()))?;

        Ok(AuthResponse::bearer(
            token,
            self.tokens.access_token_ttl_secs(),
            UserResponse::from(user),
        ))
    }
}

#[async_trait]
impl<R: UserRepository + 'static> AuthService for UserService<R> {
    async fn register_user(&self, request: RegisterRequest) -> UserResult<AuthResponse> {
        let email = normalize_email(&request.email);
        validate_password(&request.password)?;

        if self.repository.find_by_email(&email).await?.is_some() {
            return Err(UserError::DuplicateEmail(email));
        }

        let password = hash_password(&request.password)?;

        let user = self
            .repository
            .create(NewUser {
                name: request.name,
                email,
                password,
                phone: request.phone,
                role: request.role,
            })
            .await?;

        tracing::info!(user_id = user.id, role = %user.role, "User registered");
        self.issue(user)
    }

    async fn login_user(&self, request: LoginRequest) -> UserResult<AuthResponse> {
        let email = normalize_email(&request.email);

        let Some(user) = self.repository.find_by_email(&email).await? else {
            let _ = verify_password(&request.password, UNKNOWN_USER_HASH);
            return Err(UserError::InvalidCredentials);
        };

        if !verify_password(&request.password, &user.password)? {
            return Err(UserError::InvalidCredentials);
        }

        if user.role != request.role {
            return Err(UserError::RoleMismatch {
                registered: user.role,
                requested: request.role,
            });
        }

        tracing::info!(user_id = user.id, role = %user.role, "User logged in");
        self.issue(user)
    }
}

// Password helpers

fn validate_password(password: &str) -> UserResult<()> {
    let chars = password.chars().count();

    if chars < MIN_PASSWORD_CHARS {
        return Err(UserError::Validation(format!(
            "Password must be at least {} characters",
            MIN_PASSWORD_CHARS
        )));
    }

    if chars > MAX_PASSWORD_CHARS {
        return Err(UserError::Validation(format!(
            "Password cannot exceed {} characters",
            MAX_PASSWORD_CHARS
        )));
    }

    Ok(())
}

pub(crate) fn hash_password(password: &str) -> UserResult<String> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| UserError::PasswordHash(e.to_string()))
}

fn verify_password(password: &str, hash: &str) -> UserResult<bool> {
    let parsed_hash =
        PasswordHash::new(hash).map_err(|e| UserError::PasswordHash(e.to_string()))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;
    use crate::repository::MockUserRepository;
    use axum_helpers::JwtConfig;

    const SECRET: &str = "parkease-service-test-secret-32-chars";

    fn issuer() -> JwtIssuer {
        JwtIssuer::new(&JwtConfig::new(SECRET).unwrap())
    }

    fn register_request() -> RegisterRequest {
        RegisterRequest {
            name: "Ana".to_string(),
            email: "Ana@Example.com".to_string(),
            password: "secret".to_string(),
            phone: "555-1234".to_string(),
            role: Role::User,
        }
    }

    fn stored_ana(password: &str, role: Role) -> User {
        User {
            id: 1,
            name: "Ana".to_string(),
            email: "ana@example.com".to_string(),
            password: hash_password(password).unwrap(),
            phone: "555-1234".to_string(),
            role,
        }
    }

    fn login_request(password: &str, role: Role) -> LoginRequest {
        LoginRequest {
            email: "ana@example.com".to_string(),
            password: password.to_string(),
            role,
        }
    }

    #[tokio::test]
    async fn test_register_hashes_password_and_issues_token() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo
            .expect_find_by_email()
            .withf(|email| email == "ana@example.com")
            .times(1)
            .returning(|_| Ok(None));
        mock_repo
            .expect_create()
            .withf(|user| {
                user.email == "ana@example.com"
                    && user.password.starts_with("$argon2")
                    && user.password != "secret"
                    && user.role == Role::User
            })
            .times(1)
            .returning(|user| Ok(user.into_user(1)));

        let service = UserService::new(mock_repo, issuer());
        let response = service.register_user(register_request()).await.unwrap();

        assert_eq!(response.token_type, "Bearer");
        assert_eq!(response.expires_in, 900);
        assert_eq!(response.user.id, 1);
        assert_eq!(response.user.email, "ana@example.com");

        let claims = issuer().verify_token(&response.token).unwrap();
        assert_eq!(claims.sub, "1");
        assert_eq!(claims.role, "USER");
    }

    #[tokio::test]
    async fn test_register_duplicate_email() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo
            .expect_find_by_email()
            .returning(|_| Ok(Some(stored_ana("secret", Role::User))));
        mock_repo.expect_create().times(0);

        let service = UserService::new(mock_repo, issuer());
        let result = service.register_user(register_request()).await;

        assert!(matches!(result, Err(UserError::DuplicateEmail(email)) if email == "ana@example.com"));
    }

    #[tokio::test]
    async fn test_register_short_password_rejected_before_storage() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo.expect_find_by_email().times(0);
        mock_repo.expect_create().times(0);

        let service = UserService::new(mock_repo, issuer());
        let result = service
            .register_user(RegisterRequest {
                password: "12345".to_string(),
                ..register_request()
            })
            .await;

        assert!(matches!(result, Err(UserError::Validation(_))));
    }

    #[tokio::test]
    async fn test_register_race_on_insert_surfaces_duplicate() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo.expect_find_by_email().returning(|_| Ok(None));
        mock_repo
            .expect_create()
            .returning(|user| Err(UserError::DuplicateEmail(user.email)));

        let service = UserService::new(mock_repo, issuer());
        let result = service.register_user(register_request()).await;

        assert!(matches!(result, Err(UserError::DuplicateEmail(_))));
    }

    #[tokio::test]
    async fn test_login_success() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo
            .expect_find_by_email()
            .withf(|email| email == "ana@example.com")
            .returning(|_| Ok(Some(stored_ana("secret", Role::Owner))));

        let service = UserService::new(mock_repo, issuer());
        let response = service
            .login_user(LoginRequest {
                email: "ANA@example.com".to_string(),
                ..login_request("secret", Role::Owner)
            })
            .await
            .unwrap();

        assert_eq!(response.user.role, Role::Owner);
        assert_eq!(issuer().verify_token(&response.token).unwrap().role, "OWNER");
    }

    #[tokio::test]
    async fn test_login_unknown_email() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo.expect_find_by_email().returning(|_| Ok(None));

        let service = UserService::new(mock_repo, issuer());
        let result = service.login_user(login_request("secret", Role::User)).await;

        assert!(matches!(result, Err(UserError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo
            .expect_find_by_email()
            .returning(|_| Ok(Some(stored_ana("secret", Role::User))));

        let service = UserService::new(mock_repo, issuer());
        let result = service.login_user(login_request("not-it", Role::User)).await;

        assert!(matches!(result, Err(UserError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_login_role_mismatch() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo
            .expect_find_by_email()
            .returning(|_| Ok(Some(stored_ana("secret", Role::User))));

        let service = UserService::new(mock_repo, issuer());
        let result = service.login_user(login_request("secret", Role::Admin)).await;

        assert!(matches!(
            result,
            Err(UserError::RoleMismatch {
                registered: Role::User,
                requested: Role::Admin
            })
        ));
    }

    #[test]
    fn test_password_policy_bounds() {
        assert!(validate_password("12345").is_err());
        assert!(validate_password("123456").is_ok());
        assert!(validate_password(&"x".repeat(128)).is_ok());
        assert!(validate_password(&"x".repeat(129)).is_err());
    }

    #[test]
    fn test_unknown_user_hash_is_verifiable() {
        assert!(!verify_password("secret", UNKNOWN_USER_HASH).unwrap());
    }

    #[test]
    fn test_corrupt_hash_is_an_error() {
        assert!(matches!(
            verify_password("secret", "not-a-phc-string"),
            Err(UserError::PasswordHash(_))
        ));
    }
}
