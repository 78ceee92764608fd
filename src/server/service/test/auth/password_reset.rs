use chrono::{Duration, Utc};

use super::*;

/// Tests the full forgot-password flow.
///
/// Verifies that a reset token is stored with a future expiry, that confirming with it
/// clears the token and the refresh token, and that the new password logs in.
///
/// Expected: Ok, then login with the new password succeeds
#[tokio::test]
async fn resets_password_with_stored_token() -> Result<(), AppError> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let jwt = JwtService::new("secret", 7);
    let email = EmailService::log_only();

    let user = UserFactory::new(db)
        .email("ada@example.com")
        .password_hash(hash_password(PASSWORD.to_string()).await?)
        .build()
        .await?;

    let service = AuthService::new(db, &jwt, &email);
    service.forgot_password("ada@example.com").await?;

    let stored = reload_user(db, user.id).await?;
    let token = stored.password_reset_token.unwrap();
    assert!(stored.password_reset_expires.unwrap() > Utc::now());

    service
        .confirm_forgot_password(ConfirmForgotPasswordDto {
            email: "ada@example.com".to_string(),
            token,
            new_password: "a brand new password".to_string(),
        })
        .await?;

    let stored = reload_user(db, user.id).await?;
    assert!(stored.password_reset_token.is_none());
    assert!(stored.password_reset_expires.is_none());
    assert!(stored.refresh_token.is_none());

    service
        .login(login_dto("ada@example.com", "a brand new password"))
        .await?;

    Ok(())
}

/// Tests confirming with an expired token and with a wrong token.
///
/// Expected: Err(AppError::BadRequest("Invalid or expired reset token.")) for both
#[tokio::test]
async fn rejects_expired_or_wrong_token() -> Result<(), AppError> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let jwt = JwtService::new("secret", 7);
    let email = EmailService::log_only();

    UserFactory::new(db)
        .email("expired@example.com")
        .password_reset("old-token", Utc::now() - Duration::hours(1))
        .build()
        .await?;
    UserFactory::new(db)
        .email("valid@example.com")
        .password_reset("good-token", Utc::now() + Duration::hours(1))
        .build()
        .await?;

    let service = AuthService::new(db, &jwt, &email);

    for (address, token) in [
        ("expired@example.com", "old-token"),
        ("valid@example.com", "bad-token"),
    ] {
        let result = service
            .confirm_forgot_password(ConfirmForgotPasswordDto {
                email: address.to_string(),
                token: token.to_string(),
                new_password: "a brand new password".to_string(),
            })
            .await;

        assert!(
            matches!(result, Err(AppError::BadRequest(ref msg)) if msg == "Invalid or expired reset token.")
        );
    }

    Ok(())
}

/// Tests requesting a reset for an unknown email.
///
/// Expected: Err(AppError::NotFound)
#[tokio::test]
async fn forgot_password_requires_known_email() -> Result<(), AppError> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let jwt = JwtService::new("secret", 7);
    let email = EmailService::log_only();

    let result = AuthService::new(db, &jwt, &email)
        .forgot_password("nobody@example.com")
        .await;

    assert!(matches!(result, Err(AppError::NotFound(_))));

    Ok(())
}

/// Tests admin account creation for a staff role and for `ADMIN`.
///
/// Expected: Ok with a verified MODERATOR, Err(AppError::Forbidden) for ADMIN
#[tokio::test]
async fn admin_creates_verified_accounts_except_admins() -> Result<(), AppError> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let jwt = JwtService::new("secret", 7);
    let email = EmailService::log_only();

    let service = AuthService::new(db, &jwt, &email);
    let dto = |address: &str, role| AdminCreateUserDto {
        email: address.to_string(),
        password: PASSWORD.to_string(),
        first_name: "Grace".to_string(),
        last_name: "Hopper".to_string(),
        role,
    };

    let moderator = service
        .admin_create_user(dto("mod@example.com", UserRole::Moderator))
        .await?;
    assert_eq!(moderator.user.role, UserRole::Moderator);
    assert!(moderator.user.email_verified);

    let admin = service
        .admin_create_user(dto("root@example.com", UserRole::Admin))
        .await;
    assert!(matches!(admin, Err(AppError::Forbidden(_))));

    Ok(())
}
