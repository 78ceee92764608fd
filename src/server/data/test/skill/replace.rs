use super::*;

/// Tests replacing the full skill set.
///
/// Expected: Ok with only the new skills, deduplicated
#[tokio::test]
async fn replaces_existing_skills() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = UserFactory::new(db)
        .skills(["Algebra", "Physics"])
        .build()
        .await?;

    let repo = SkillRepository::new(db);
    let skills = repo
        .replace(
            user.id,
            vec!["Statistics".to_string(), " Statistics ".to_string()],
        )
        .await?;

    assert_eq!(skills, vec!["Statistics"]);

    Ok(())
}

/// Tests loading skills for several users at once.
///
/// Expected: Ok with a map entry only for users who have skills
#[tokio::test]
async fn groups_skills_by_user() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let first = UserFactory::new(db).skills(["Algebra"]).build().await?;
    let second = UserFactory::new(db).build().await?;

    let repo = SkillRepository::new(db);
    let map = repo.get_for_users(&[first.id, second.id]).await?;

    assert_eq!(map.get(&first.id), Some(&vec!["Algebra".to_string()]));
    assert!(!map.contains_key(&second.id));

    Ok(())
}
