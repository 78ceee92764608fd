use axum::http::{header::AUTHORIZATION, HeaderMap, HeaderValue};
use test_utils::{builder::TestBuilder, factory};

use crate::server::{
    error::{auth::AuthError, AppError},
    middleware::auth::{AuthGuard, Permission},
    model::user::User,
    service::auth::jwt::JwtService,
};

mod token;

/// Builds headers carrying a bearer token signed for `user`.
fn bearer_for(jwt: &JwtService, user: &entity::user::Model) -> HeaderMap {
    let token = jwt.sign(&User::from_entity(user.clone())).unwrap();
    bearer(&token)
}

fn bearer(token: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        AUTHORIZATION,
        HeaderValue::from_str(&format!("Bearer {}", token)).unwrap(),
    );
    headers
}
