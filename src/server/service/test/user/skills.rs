use super::*;

/// Tests adding, replacing and removing skills.
///
/// Verifies that duplicates are ignored and results come back sorted.
///
/// Expected: Ok with the expected set after each step
#[tokio::test]
async fn manages_skill_set() -> Result<(), AppError> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let email = EmailService::log_only();

    let user = factory::user::UserFactory::new(db)
        .skills(["Physics"])
        .build()
        .await?;
    let service = UserService::new(db, &email);
    let owned = |skills: &[&str]| skills.iter().map(|s| s.to_string()).collect::<Vec<_>>();

    let added = service
        .add_skills(user.id, owned(&["Algebra", "Physics", "Algebra"]))
        .await?;
    assert_eq!(added, owned(&["Algebra", "Physics"]));

    let replaced = service
        .replace_skills(user.id, owned(&["Chemistry", "Biology", "Chemistry"]))
        .await?;
    assert_eq!(replaced, owned(&["Biology", "Chemistry"]));

    let remaining = service
        .remove_skills(user.id, owned(&["Biology"]))
        .await?;
    assert_eq!(remaining, owned(&["Chemistry"]));

    assert_eq!(service.skills(user.id).await?, owned(&["Chemistry"]));

    Ok(())
}

/// Tests reading skills of an unknown user.
///
/// Expected: Err(AppError::NotFound)
#[tokio::test]
async fn skills_require_known_user() -> Result<(), AppError> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let email = EmailService::log_only();

    let result = UserService::new(db, &email)
        .skills(uuid::Uuid::new_v4())
        .await;

    assert!(matches!(result, Err(AppError::NotFound(_))));

    Ok(())
}
