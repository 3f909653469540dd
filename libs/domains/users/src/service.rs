use std::sync::Arc;

use crate::error::{UserError, UserResult};
use crate::models::{CreateUser, SessionToken, User, UserResponse};
use crate::password::CredentialHasher;
use crate::repository::UserRepository;
use crate::token::TokenIssuer;

const MIN_PASSWORD_LEN: usize = 8;
const MAX_PASSWORD_LEN: usize = 128;

/// Service layer for User business logic
#[derive(Clone)]
pub struct UserService<R: UserRepository> {
    repository: Arc<R>,
    hasher: Arc<dyn CredentialHasher>,
    tokens: Arc<dyn TokenIssuer>,
}

impl<R: UserRepository> UserService<R> {
    pub fn new(
        repository: R,
        hasher: impl CredentialHasher + 'static,
        tokens: impl TokenIssuer + 'static,
    ) -> Self {
        Self {
            repository: Arc::new(repository),
            hasher: Arc::new(hasher),
            tokens: Arc::new(tokens),
        }
    }

    /// Create a new user with password hashing
    pub async fn create_user(&self, input: CreateUser) -> UserResult<UserResponse> {
        self.validate_create(&input)?;

        let email = input.email.trim().to_string();
        if self.repository.email_exists(&email).await? {
            return Err(UserError::DuplicateEmail(email));
        }

        let password_hash = self.hasher.hash(&input.password)?;

        let user = User::new(
            input.first_name.trim().to_string(),
            input.last_name.trim().to_string(),
            email,
            password_hash,
        );

        // The store re-checks uniqueness, so a concurrent create still yields DuplicateEmail
        let created = self.repository.create(user).await?;
        Ok(created.into())
    }

    /// List all users as public views
    pub async fn list_users(&self) -> UserResult<Vec<UserResponse>> {
        let users = self.repository.list().await?;
        Ok(users.into_iter().map(UserResponse::from).collect())
    }

    /// Verify credentials and issue a session token
    pub async fn login(&self, email: &str, password: &str) -> UserResult<SessionToken> {
        let Some(user) = self.repository.get_by_email(email.trim()).await? else {
            tracing::info!("Login rejected: unknown email");
            return Err(UserError::InvalidCredentials);
        };

        if !self.hasher.verify(password, &user.password_hash)? {
            tracing::info!(user_id = %user.id, "Login rejected: password mismatch");
            return Err(UserError::InvalidCredentials);
        }

        let session = self.tokens.issue(&user)?;
        tracing::info!(user_id = %user.id, expires_at = %session.expires_at, "User logged in");
        Ok(session)
    }

    // Validation helpers

    // Field shape (email format, lengths) is checked by ValidatedJson at the
    // handler level; these checks hold for any caller.

    fn validate_create(&self, input: &CreateUser) -> UserResult<()> {
        let fields = [
            ("firstName", &input.first_name),
            ("lastName", &input.last_name),
            ("email", &input.email),
            ("password", &input.password),
            ("repeatPassword", &input.repeat_password),
        ];
        if let Some((name, _)) = fields.iter().find(|(_, value)| value.trim().is_empty()) {
            return Err(UserError::Validation(format!("{} must not be empty", name)));
        }

        if input.password != input.repeat_password {
            return Err(UserError::Validation("Passwords do not match".to_string()));
        }

        self.validate_password(&input.password)
    }

    fn validate_password(&self, password: &str) -> UserResult<()> {
        let len = password.chars().count();

        if len < MIN_PASSWORD_LEN {
            return Err(UserError::Validation(format!(
                "Password must be at least {} characters",
                MIN_PASSWORD_LEN
            )));
        }

        if len > MAX_PASSWORD_LEN {
            return Err(UserError::Validation(format!(
                "Password cannot exceed {} characters",
                MAX_PASSWORD_LEN
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{InMemoryUserRepository, MockUserRepository};
    use axum_helpers::{JwtAuth, JwtConfig};

    const SECRET: &str = "this-is-a-valid-secret-with-32-chars!";

    /// Reversible stand-in so tests don't pay for argon2
    struct PlainHasher;

    impl CredentialHasher for PlainHasher {
        fn hash(&self, password: &str) -> UserResult<String> {
            Ok(format!("plain:{}", password))
        }

        fn verify(&self, password: &str, hash: &str) -> UserResult<bool> {
            Ok(hash == format!("plain:{}", password))
        }
    }

    fn jwt() -> JwtAuth {
        JwtAuth::new(&JwtConfig::new(SECRET))
    }

    fn service<R: UserRepository>(repository: R) -> UserService<R> {
        UserService::new(repository, PlainHasher, jwt())
    }

    fn create_input(email: &str) -> CreateUser {
        CreateUser {
            first_name: "TestFirstName".to_string(),
            last_name: "TestLastName".to_string(),
            email: email.to_string(),
            password: "12345678".to_string(),
            repeat_password: "12345678".to_string(),
        }
    }

    fn stored_user(email: &str, password: &str) -> User {
        User::new(
            "TestFirstName".to_string(),
            "TestLastName".to_string(),
            email.to_string(),
            format!("plain:{}", password),
        )
    }

    #[tokio::test]
    async fn test_create_user_returns_public_view_matching_store() {
        let repo = InMemoryUserRepository::new();
        let service = service(repo.clone());

        let created = service.create_user(create_input("test@gmail.com")).await.unwrap();
        assert_eq!(created.first_name, "TestFirstName");
        assert_eq!(created.last_name, "TestLastName");
        assert_eq!(created.email, "test@gmail.com");

        let stored = repo.get_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(stored.id, created.id);
        assert_eq!(stored.password_hash, "plain:12345678");
    }

    #[tokio::test]
    async fn test_create_user_assigns_distinct_ids() {
        let service = service(InMemoryUserRepository::new());

        let a = service.create_user(create_input("a@example.com")).await.unwrap();
        let b = service.create_user(create_input("b@example.com")).await.unwrap();

        assert_ne!(a.id, b.id);
        assert_ne!(a.email, b.email);
    }

    #[tokio::test]
    async fn test_create_user_rejects_mismatched_passwords_before_store() {
        // No expectations: any repository call panics
        let service = service(MockUserRepository::new());

        let mut input = create_input("test@gmail.com");
        input.repeat_password = "different1".to_string();

        let result = service.create_user(input).await;
        assert!(matches!(result, Err(UserError::Validation(msg)) if msg.contains("match")));
    }

    #[tokio::test]
    async fn test_create_user_rejects_blank_fields() {
        let service = service(MockUserRepository::new());

        let mut input = create_input("test@gmail.com");
        input.last_name = "   ".to_string();

        let result = service.create_user(input).await;
        assert!(matches!(result, Err(UserError::Validation(msg)) if msg.contains("lastName")));
    }

    #[tokio::test]
    async fn test_create_user_rejects_short_password() {
        let service = service(MockUserRepository::new());

        let mut input = create_input("test@gmail.com");
        input.password = "short".to_string();
        input.repeat_password = "short".to_string();

        let result = service.create_user(input).await;
        assert!(matches!(result, Err(UserError::Validation(_))));
    }

    #[tokio::test]
    async fn test_create_user_duplicate_email_skips_insert() {
        let mut repo = MockUserRepository::new();
        repo.expect_email_exists().times(1).returning(|_| Ok(true));
        repo.expect_create().never();

        let result = service(repo).create_user(create_input("test@gmail.com")).await;
        assert!(matches!(result, Err(UserError::DuplicateEmail(email)) if email == "test@gmail.com"));
    }

    #[tokio::test]
    async fn test_create_user_surfaces_store_conflict() {
        let mut repo = MockUserRepository::new();
        repo.expect_email_exists().returning(|_| Ok(false));
        repo.expect_create()
            .times(1)
            .returning(|user| Err(UserError::DuplicateEmail(user.email)));

        let result = service(repo).create_user(create_input("test@gmail.com")).await;
        assert!(matches!(result, Err(UserError::DuplicateEmail(_))));
    }

    #[tokio::test]
    async fn test_list_users_maps_to_public_views() {
        let repo = InMemoryUserRepository::new();
        let service = service(repo);
        let a = service.create_user(create_input("a@example.com")).await.unwrap();
        let b = service.create_user(create_input("b@example.com")).await.unwrap();

        let users = service.list_users().await.unwrap();
        assert_eq!(users, vec![a, b]);
    }

    #[tokio::test]
    async fn test_login_unknown_email_is_invalid_credentials() {
        let mut repo = MockUserRepository::new();
        repo.expect_get_by_email().times(1).returning(|_| Ok(None));

        let result = service(repo).login("nobody@example.com", "12345678").await;
        assert!(matches!(result, Err(UserError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_login_wrong_password_never_writes() {
        let user = stored_user("test@gmail.com", "12345678");
        let mut repo = MockUserRepository::new();
        repo.expect_get_by_email()
            .times(1)
            .returning(move |_| Ok(Some(user.clone())));
        repo.expect_create().never();

        let result = service(repo).login("test@gmail.com", "wrong-password").await;
        assert!(matches!(result, Err(UserError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_login_issues_token_bound_to_user() {
        let user = stored_user("test@gmail.com", "12345678");
        let user_id = user.id;
        let mut repo = MockUserRepository::new();
        repo.expect_get_by_email()
            .times(1)
            .returning(move |_| Ok(Some(user.clone())));

        let session = service(repo).login(" test@gmail.com ", "12345678").await.unwrap();
        assert_eq!(session.user_id, user_id);

        let claims = jwt().verify_token(&session.token).unwrap();
        assert_eq!(claims.sub, user_id.to_string());
        assert_eq!(claims.email, "test@gmail.com");
    }
}
