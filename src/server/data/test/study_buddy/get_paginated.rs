use super::*;

/// Tests which users appear in the buddy directory.
///
/// Verifies that learners, suspended or unverified buddies, and buddies with no
/// availability are excluded.
///
/// Expected: Ok with only the listed buddy
#[tokio::test]
async fn lists_only_bookable_buddies() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_session_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let listed = UserFactory::new(db).role("BOTH").build().await?;
    let learner = factory::create_user(db).await?;
    let suspended = UserFactory::new(db)
        .role("BUDDY")
        .status("SUSPENDED")
        .build()
        .await?;
    let unverified = UserFactory::new(db)
        .role("BUDDY")
        .email_verified(false)
        .build()
        .await?;
    factory::create_buddy(db).await?;
    for user in [&listed, &learner, &suspended, &unverified] {
        factory::create_availability(db, user.id, 1, "09:00", "17:00").await?;
    }

    let repo = StudyBuddyRepository::new(db);
    let page = repo.get_paginated(&BuddyFilter::default()).await?;

    assert_eq!(page.total, 1);
    assert_eq!(page.items[0].0.id, listed.id);
    assert!(repo.find_listed(listed.id).await?.is_some());
    assert!(repo.find_listed(learner.id).await?.is_none());

    Ok(())
}

/// Tests filtering by skill.
///
/// Expected: Ok with only the buddy who has the skill
#[tokio::test]
async fn filters_by_module() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_session_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let physics = UserFactory::new(db)
        .role("BUDDY")
        .skills(["Physics"])
        .build()
        .await?;
    let algebra = UserFactory::new(db)
        .role("BUDDY")
        .skills(["Algebra"])
        .build()
        .await?;
    for user in [&physics, &algebra] {
        factory::create_availability(db, user.id, 2, "09:00", "17:00").await?;
    }

    let repo = StudyBuddyRepository::new(db);
    let page = repo
        .get_paginated(&BuddyFilter {
            module: Some("Physics".to_string()),
            ..Default::default()
        })
        .await?;

    assert_eq!(page.total, 1);
    assert_eq!(page.items[0].0.id, physics.id);

    Ok(())
}

/// Tests that a multi-word module also matches buddies skilled in one of its words.
///
/// Expected: Ok with the exact and the partial match, not the unrelated buddy
#[tokio::test]
async fn module_matches_individual_words() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_session_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let exact = UserFactory::new(db)
        .name("Exact")
        .role("BUDDY")
        .skills(["Linear Algebra"])
        .build()
        .await?;
    let partial = UserFactory::new(db)
        .name("Partial")
        .role("BUDDY")
        .skills(["Algebra"])
        .build()
        .await?;
    let unrelated = UserFactory::new(db)
        .name("Unrelated")
        .role("BUDDY")
        .skills(["Physics"])
        .build()
        .await?;
    for user in [&exact, &partial, &unrelated] {
        factory::create_availability(db, user.id, 3, "09:00", "17:00").await?;
    }

    let repo = StudyBuddyRepository::new(db);
    let page = repo
        .get_paginated(&BuddyFilter {
            module: Some("Linear Algebra".to_string()),
            sort_by: BuddySortField::Name,
            sort_order: SortOrder::Asc,
            ..Default::default()
        })
        .await?;

    let ids: Vec<_> = page.items.iter().map(|(u, _)| u.id).collect();
    assert_eq!(ids, vec![exact.id, partial.id]);

    Ok(())
}

/// Tests that free-text search also looks at skills.
///
/// Verifies both a substring of a skill and a multi-word query where one word equals
/// a skill.
///
/// Expected: Ok with the buddy whose only match is a skill
#[tokio::test]
async fn search_matches_skills() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_session_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let physics = UserFactory::new(db)
        .role("BUDDY")
        .skills(["Quantum Physics"])
        .build()
        .await?;
    let algebra = UserFactory::new(db)
        .role("BUDDY")
        .skills(["Algebra"])
        .build()
        .await?;
    for user in [&physics, &algebra] {
        factory::create_availability(db, user.id, 5, "09:00", "17:00").await?;
    }

    let repo = StudyBuddyRepository::new(db);
    let by_substring = repo
        .get_paginated(&BuddyFilter {
            search: Some("quantum".to_string()),
            ..Default::default()
        })
        .await?;
    let by_word = repo
        .get_paginated(&BuddyFilter {
            search: Some("help with algebra".to_string()),
            ..Default::default()
        })
        .await?;

    assert_eq!(by_substring.total, 1);
    assert_eq!(by_substring.items[0].0.id, physics.id);
    assert_eq!(by_word.total, 1);
    assert_eq!(by_word.items[0].0.id, algebra.id);

    Ok(())
}

/// Tests sorting by completed session count.
///
/// Expected: Ok with the busier buddy first and counts attached
#[tokio::test]
async fn sorts_by_completed_sessions() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_session_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let learner = factory::create_user(db).await?;
    let quiet = UserFactory::new(db).name("Quiet").role("BUDDY").build().await?;
    let busy = UserFactory::new(db).name("Busy").role("BUDDY").build().await?;
    for user in [&quiet, &busy] {
        factory::create_availability(db, user.id, 4, "09:00", "17:00").await?;
    }
    SessionFactory::new(db, quiet.id, learner.id)
        .status("COMPLETED")
        .build()
        .await?;
    for _ in 0..3 {
        SessionFactory::new(db, busy.id, learner.id)
            .status("COMPLETED")
            .build()
            .await?;
    }
    SessionFactory::new(db, quiet.id, learner.id).build().await?;

    let repo = StudyBuddyRepository::new(db);
    let page = repo
        .get_paginated(&BuddyFilter {
            sort_by: BuddySortField::CompletedSessions,
            sort_order: SortOrder::Desc,
            ..Default::default()
        })
        .await?;

    let rows: Vec<_> = page.items.iter().map(|(u, c)| (u.id, *c)).collect();
    assert_eq!(rows, vec![(busy.id, 3), (quiet.id, 1)]);

    Ok(())
}
