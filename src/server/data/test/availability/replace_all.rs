use super::*;

/// Tests replacing all windows.
///
/// Verifies that old windows are removed and new ones come back ordered by day,
/// then start time.
///
/// Expected: Ok with the two new windows in order
#[tokio::test]
async fn replaces_and_orders_windows() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let buddy = factory::create_buddy(db).await?;
    factory::create_availability(db, buddy.id, 5, "09:00", "10:00").await?;

    let repo = AvailabilityRepository::new(db);
    let windows = repo
        .replace_all(
            buddy.id,
            vec![window(2, "14:00", "16:00"), window(1, "09:00", "12:00")],
        )
        .await?;

    let summary: Vec<_> = windows
        .iter()
        .map(|w| (w.day_of_week, w.start_time.as_str()))
        .collect();
    assert_eq!(summary, vec![(1, "09:00"), (2, "14:00")]);

    Ok(())
}

/// Tests deleting a window owned by someone else.
///
/// Expected: Ok(false) and the window still exists
#[tokio::test]
async fn delete_requires_ownership() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let owner = factory::create_buddy(db).await?;
    let intruder = factory::create_buddy(db).await?;
    let existing = factory::create_availability(db, owner.id, 1, "09:00", "10:00").await?;

    let repo = AvailabilityRepository::new(db);

    assert!(!repo.delete_owned(existing.id, intruder.id).await?);
    assert!(repo.find_owned(existing.id, owner.id).await?.is_some());
    assert!(repo.delete_owned(existing.id, owner.id).await?);

    Ok(())
}
