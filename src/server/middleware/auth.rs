use axum::http::{header::AUTHORIZATION, HeaderMap};
use sea_orm::DatabaseConnection;

use crate::{
    model::user::UserRole,
    server::{
        data::user::UserRepository,
        error::{auth::AuthError, AppError},
        model::user::User,
        service::auth::jwt::JwtService,
    },
};

pub enum Permission {
    /// `ADMIN` only
    Admin,
    /// Any of `ADMIN`, `MODERATOR`, `PARTNER` or `STAFF`
    Staff,
    /// `BUDDY` or `BOTH`
    Buddy,
}

impl Permission {
    fn allows(&self, user: &User) -> bool {
        match self {
            Self::Admin => user.role == UserRole::Admin,
            Self::Staff => user.role.is_staff(),
            Self::Buddy => user.role.is_buddy(),
        }
    }

    fn describe(&self) -> &'static str {
        match self {
            Self::Admin => "admin role",
            Self::Staff => "staff role",
            Self::Buddy => "buddy role",
        }
    }
}

/// Authenticates a request from its `Authorization: Bearer` header.
///
/// The token's subject must still exist with the same role it was issued with, so a
/// role change invalidates outstanding tokens.
pub struct AuthGuard<'a> {
    db: &'a DatabaseConnection,
    jwt: &'a JwtService,
    headers: &'a HeaderMap,
}

impl<'a> AuthGuard<'a> {
    pub fn new(db: &'a DatabaseConnection, jwt: &'a JwtService, headers: &'a HeaderMap) -> Self {
        Self { db, jwt, headers }
    }

    /// Returns the authenticated user if they satisfy every listed permission.
    ///
    /// # Returns
    /// - `Ok(User)` - Authenticated and permitted
    /// - `Err(AuthError::MissingToken | InvalidToken | UserNotInDatabase)` - 401
    /// - `Err(AuthError::AccessDenied)` - 403
    pub async fn require(&self, permissions: &[Permission]) -> Result<User, AppError> {
        let token = bearer_token(self.headers).ok_or(AuthError::MissingToken)?;
        let claims = self.jwt.verify(token)?;

        let Some(user) = UserRepository::new(self.db)
            .find_by_id(claims.sub)
            .await?
            .filter(|user| user.role == claims.role)
        else {
            return Err(AuthError::UserNotInDatabase(claims.sub).into());
        };

        for permission in permissions {
            if !permission.allows(&user) {
                return Err(AuthError::AccessDenied(
                    user.id,
                    format!(
                        "User with role {} lacks required {}",
                        user.role.as_str(),
                        permission.describe()
                    ),
                )
                .into());
            }
        }

        Ok(user)
    }
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}
