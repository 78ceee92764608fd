//! Email/password authentication.
//!
//! Covers registration with an emailed verification code, login with JWT issue, the
//! forgot-password flow and admin-created accounts.

pub mod jwt;
pub mod password;

use chrono::{Duration, Utc};
use sea_orm::DatabaseConnection;

use crate::{
    model::{
        auth::{AdminCreateUserDto, ConfirmForgotPasswordDto, LoginDto, RegisterDto},
        user::{UserRole, UserStatus},
    },
    server::{
        data::{skill::SkillRepository, user::UserRepository},
        error::{auth::AuthError, AppError},
        model::user::{CreateUserParams, LoginSession, User, UserProfile},
        service::{
            auth::{
                jwt::JwtService,
                password::{hash_password, verify_password},
            },
            email::{template, EmailService},
        },
        util::token,
    },
};

/// How long a password reset token stays valid.
const RESET_TOKEN_TTL: Duration = Duration::hours(1);

pub struct AuthService<'a> {
    pub db: &'a DatabaseConnection,
    pub jwt: &'a JwtService,
    pub email: &'a EmailService,
}

impl<'a> AuthService<'a> {
    pub fn new(db: &'a DatabaseConnection, jwt: &'a JwtService, email: &'a EmailService) -> Self {
        Self { db, jwt, email }
    }

    /// Registers a new self-service account and emails a verification code.
    ///
    /// # Returns
    /// - `Ok(UserProfile)` - Created, unverified user
    /// - `Err(AppError::BadRequest)` - Requested role is a staff role
    /// - `Err(AppError::Conflict)` - Email already registered
    pub async fn register(&self, dto: RegisterDto) -> Result<UserProfile, AppError> {
        let role = dto.role.unwrap_or_default();
        if !role.is_self_assignable() {
            return Err(AppError::BadRequest(
                "Role must be one of LEARNER, BUDDY or BOTH".to_string(),
            ));
        }

        let code = token::verification_code();
        let user = self
            .create_account(
                &dto.email,
                dto.password,
                &dto.first_name,
                &dto.last_name,
                role,
                false,
                Some(code.clone()),
            )
            .await?;

        self.email
            .send(template::verification_code(&user.email, &code))
            .await;

        tracing::info!("Registered user {} as {}", user.id, role.as_str());

        Ok(UserProfile::new(user, Vec::new()))
    }

    /// Marks an email as verified when the code matches.
    pub async fn confirm(&self, email: &str, code: &str) -> Result<UserProfile, AppError> {
        let user_repo = UserRepository::new(self.db);
        let invalid = || AppError::BadRequest("Invalid verification code.".to_string());

        let user = user_repo
            .find_by_email(&normalize_email(email))
            .await?
            .ok_or_else(invalid)?;

        if user.email_verified {
            return Err(AppError::BadRequest("Email already verified.".to_string()));
        }

        if user.email_verification_token.as_deref() != Some(code) {
            return Err(invalid());
        }

        user_repo.mark_email_verified(user.id).await?;

        self.email
            .send(template::welcome(&user.email, &user.name))
            .await;

        let user = User {
            email_verified: true,
            email_verification_token: None,
            ..user
        };

        Ok(UserProfile::new(user, Vec::new()))
    }

    /// Issues and emails a fresh verification code.
    pub async fn resend_code(&self, email: &str) -> Result<(), AppError> {
        let user_repo = UserRepository::new(self.db);

        let user = user_repo
            .find_by_email(&normalize_email(email))
            .await?
            .ok_or_else(|| AppError::NotFound("User not found.".to_string()))?;

        if user.email_verified {
            return Err(AppError::BadRequest("Email already verified.".to_string()));
        }

        let code = token::verification_code();
        user_repo.set_verification_token(user.id, &code).await?;

        self.email
            .send(template::verification_code(&user.email, &code))
            .await;

        Ok(())
    }

    /// Checks credentials and issues an access token plus a stored refresh token.
    ///
    /// # Returns
    /// - `Ok(LoginSession)` - Tokens and the user's profile
    /// - `Err(AuthError::InvalidCredentials)` - Unknown email or wrong password
    /// - `Err(AuthError::EmailNotVerified)` - Email not yet confirmed
    /// - `Err(AuthError::AccountNotActive)` - Account inactive or suspended
    pub async fn login(&self, dto: LoginDto) -> Result<LoginSession, AppError> {
        let user_repo = UserRepository::new(self.db);

        let Some(user) = user_repo.find_by_email(&normalize_email(&dto.email)).await? else {
            return Err(AuthError::InvalidCredentials.into());
        };

        if !verify_password(dto.password, user.password_hash.clone()).await? {
            return Err(AuthError::InvalidCredentials.into());
        }

        if !user.email_verified {
            return Err(AuthError::EmailNotVerified.into());
        }

        if user.status != UserStatus::Active {
            return Err(AuthError::AccountNotActive.into());
        }

        let access_token = self.jwt.sign(&user)?;
        let refresh_token = token::secure_token();
        user_repo
            .set_refresh_token(user.id, Some(refresh_token.clone()))
            .await?;

        let skills = SkillRepository::new(self.db)
            .get_for_user(user.id)
            .await?;

        tracing::debug!("User {} logged in", user.id);

        Ok(LoginSession {
            profile: UserProfile::new(user, skills),
            access_token,
            refresh_token,
        })
    }

    /// Stores a one-hour reset token and emails it. The token is never returned.
    pub async fn forgot_password(&self, email: &str) -> Result<(), AppError> {
        let user_repo = UserRepository::new(self.db);

        let user = user_repo
            .find_by_email(&normalize_email(email))
            .await?
            .ok_or_else(|| AppError::NotFound("User not found.".to_string()))?;

        let reset_token = token::secure_token();
        user_repo
            .set_password_reset(user.id, &reset_token, Utc::now() + RESET_TOKEN_TTL)
            .await?;

        self.email
            .send(template::password_reset(&user.email, &reset_token))
            .await;

        Ok(())
    }

    /// Sets a new password when the reset token matches and hasn't expired.
    ///
    /// Clears the reset token and the stored refresh token.
    pub async fn confirm_forgot_password(
        &self,
        dto: ConfirmForgotPasswordDto,
    ) -> Result<(), AppError> {
        let user_repo = UserRepository::new(self.db);
        let invalid = || AppError::BadRequest("Invalid or expired reset token.".to_string());

        let user = user_repo
            .find_by_email(&normalize_email(&dto.email))
            .await?
            .ok_or_else(invalid)?;

        let token_matches = user.password_reset_token.as_deref() == Some(dto.token.as_str());
        let unexpired = user
            .password_reset_expires
            .is_some_and(|expires| expires > Utc::now());

        if !token_matches || !unexpired {
            return Err(invalid());
        }

        let password_hash = hash_password(dto.new_password).await?;
        user_repo.reset_password(user.id, &password_hash).await?;

        self.email.send(template::password_changed(&user.email)).await;

        tracing::info!("Password reset for user {}", user.id);

        Ok(())
    }

    /// Creates a verified, active account on behalf of an admin.
    ///
    /// # Returns
    /// - `Ok(UserProfile)` - Created user
    /// - `Err(AppError::Forbidden)` - Requested role is `ADMIN`
    /// - `Err(AppError::Conflict)` - Email already registered
    pub async fn admin_create_user(
        &self,
        dto: AdminCreateUserDto,
    ) -> Result<UserProfile, AppError> {
        if dto.role == UserRole::Admin {
            return Err(AppError::Forbidden(
                "Admins cannot be created through this endpoint".to_string(),
            ));
        }

        let user = self
            .create_account(
                &dto.email,
                dto.password,
                &dto.first_name,
                &dto.last_name,
                dto.role,
                true,
                None,
            )
            .await?;

        tracing::info!("Admin created user {} as {}", user.id, dto.role.as_str());

        Ok(UserProfile::new(user, Vec::new()))
    }

    #[allow(clippy::too_many_arguments)]
    async fn create_account(
        &self,
        email: &str,
        password: String,
        first_name: &str,
        last_name: &str,
        role: UserRole,
        email_verified: bool,
        email_verification_token: Option<String>,
    ) -> Result<User, AppError> {
        let user_repo = UserRepository::new(self.db);
        let email = normalize_email(email);

        if user_repo.email_exists(&email).await? {
            return Err(AppError::Conflict(
                "User with this email already exists".to_string(),
            ));
        }

        let password_hash = hash_password(password).await?;

        let user = user_repo
            .create(CreateUserParams {
                email,
                password_hash,
                name: format!("{} {}", first_name.trim(), last_name.trim()),
                role,
                email_verified,
                email_verification_token,
            })
            .await?;

        Ok(user)
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
