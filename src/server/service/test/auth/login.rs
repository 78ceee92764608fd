use super::*;

/// Tests logging in with correct credentials.
///
/// Verifies that the access token verifies back to the user and that the refresh
/// token is stored on the user row.
///
/// Expected: Ok with matching claims and a stored refresh token
#[tokio::test]
async fn logs_in_with_valid_credentials() -> Result<(), AppError> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let jwt = JwtService::new("secret", 7);
    let email = EmailService::log_only();

    let user = UserFactory::new(db)
        .email("ada@example.com")
        .role("BOTH")
        .password_hash(hash_password(PASSWORD.to_string()).await?)
        .skills(["Algebra"])
        .build()
        .await?;

    let session = AuthService::new(db, &jwt, &email)
        .login(login_dto("ADA@example.com", PASSWORD))
        .await?;

    let claims = jwt.verify(&session.access_token)?;
    assert_eq!(claims.sub, user.id);
    assert_eq!(claims.email, "ada@example.com");
    assert_eq!(claims.role, UserRole::Both);
    assert_eq!(session.profile.skills, vec!["Algebra".to_string()]);

    let stored = reload_user(db, user.id).await?;
    assert_eq!(stored.refresh_token, Some(session.refresh_token));

    Ok(())
}

/// Tests that a wrong password and an unknown email fail the same way.
///
/// Expected: Err(AuthError::InvalidCredentials) for both
#[tokio::test]
async fn rejects_bad_credentials() -> Result<(), AppError> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let jwt = JwtService::new("secret", 7);
    let email = EmailService::log_only();

    UserFactory::new(db)
        .email("ada@example.com")
        .password_hash(hash_password(PASSWORD.to_string()).await?)
        .build()
        .await?;

    let service = AuthService::new(db, &jwt, &email);

    for dto in [
        login_dto("ada@example.com", "wrong password"),
        login_dto("nobody@example.com", PASSWORD),
    ] {
        let result = service.login(dto).await;
        assert!(matches!(
            result,
            Err(AppError::AuthErr(AuthError::InvalidCredentials))
        ));
    }

    Ok(())
}

/// Tests logging in before confirming the email.
///
/// Expected: Err(AuthError::EmailNotVerified)
#[tokio::test]
async fn rejects_unverified_email() -> Result<(), AppError> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let jwt = JwtService::new("secret", 7);
    let email = EmailService::log_only();

    UserFactory::new(db)
        .email("ada@example.com")
        .email_verified(false)
        .password_hash(hash_password(PASSWORD.to_string()).await?)
        .build()
        .await?;

    let result = AuthService::new(db, &jwt, &email)
        .login(login_dto("ada@example.com", PASSWORD))
        .await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::EmailNotVerified))
    ));

    Ok(())
}

/// Tests logging in to a suspended account.
///
/// Expected: Err(AuthError::AccountNotActive)
#[tokio::test]
async fn rejects_suspended_account() -> Result<(), AppError> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let jwt = JwtService::new("secret", 7);
    let email = EmailService::log_only();

    UserFactory::new(db)
        .email("ada@example.com")
        .status("SUSPENDED")
        .password_hash(hash_password(PASSWORD.to_string()).await?)
        .build()
        .await?;

    let result = AuthService::new(db, &jwt, &email)
        .login(login_dto("ada@example.com", PASSWORD))
        .await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::AccountNotActive))
    ));

    Ok(())
}
