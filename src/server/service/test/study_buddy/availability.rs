use super::*;

/// Tests adding a window with single-digit hours.
///
/// Expected: Ok with times normalized to HH:MM
#[tokio::test]
async fn adds_normalized_window() -> Result<(), AppError> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let buddy = factory::create_buddy(db).await?;

    let availability = StudyBuddyService::new(db)
        .add_availability(&caller(&buddy), window(1, "9:00", "17:30"))
        .await?;

    assert_eq!(availability.day_of_week, 1);
    assert_eq!(availability.start_time, "09:00");
    assert_eq!(availability.end_time, "17:30");

    Ok(())
}

/// Tests adding a window that overlaps an existing one on the same day.
///
/// Verifies that a window touching the existing one and a window on another day are
/// both accepted.
///
/// Expected: Err(AppError::Conflict) for the overlap only
#[tokio::test]
async fn rejects_overlapping_window() -> Result<(), AppError> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let buddy = factory::create_buddy(db).await?;
    factory::create_availability(db, buddy.id, 2, "09:00", "12:00").await?;

    let service = StudyBuddyService::new(db);
    let buddy = caller(&buddy);

    let overlap = service
        .add_availability(&buddy, window(2, "11:00", "13:00"))
        .await;
    assert!(matches!(overlap, Err(AppError::Conflict(_))));

    service
        .add_availability(&buddy, window(2, "12:00", "13:00"))
        .await?;
    service
        .add_availability(&buddy, window(3, "11:00", "13:00"))
        .await?;

    Ok(())
}

/// Tests invalid windows: start after end, and a malformed time.
///
/// Expected: Err(AppError::BadRequest) for both
#[tokio::test]
async fn rejects_invalid_window() -> Result<(), AppError> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let buddy = caller(&factory::create_buddy(db).await?);
    let service = StudyBuddyService::new(db);

    for dto in [window(1, "17:00", "09:00"), window(1, "24:00", "25:00")] {
        let result = service.add_availability(&buddy, dto).await;
        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    Ok(())
}

/// Tests a learner trying to add availability.
///
/// Expected: Err(AppError::Forbidden)
#[tokio::test]
async fn learner_cannot_add_availability() -> Result<(), AppError> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let learner = factory::create_user(db).await?;

    let result = StudyBuddyService::new(db)
        .add_availability(&caller(&learner), window(1, "09:00", "10:00"))
        .await;

    assert!(matches!(result, Err(AppError::Forbidden(_))));

    Ok(())
}

/// Tests replacing every window at once.
///
/// Verifies that the old windows are gone and the new ones come back ordered.
///
/// Expected: Ok with the two new windows
#[tokio::test]
async fn replaces_all_windows() -> Result<(), AppError> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let buddy = factory::create_buddy(db).await?;
    factory::create_availability(db, buddy.id, 0, "08:00", "10:00").await?;

    let service = StudyBuddyService::new(db);
    service
        .replace_availability(
            &caller(&buddy),
            ReplaceAvailabilityDto {
                availabilities: vec![window(4, "14:00", "16:00"), window(1, "09:00", "11:00")],
            },
        )
        .await?;

    let windows = service.my_availability(buddy.id).await?;
    let days: Vec<i32> = windows.iter().map(|w| w.day_of_week).collect();
    assert_eq!(days, vec![1, 4]);

    Ok(())
}

/// Tests replacing with windows that overlap each other.
///
/// Verifies that the existing windows survive the rejected request.
///
/// Expected: Err(AppError::Conflict)
#[tokio::test]
async fn rejects_self_overlapping_replacement() -> Result<(), AppError> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let buddy = factory::create_buddy(db).await?;
    factory::create_availability(db, buddy.id, 0, "08:00", "10:00").await?;

    let service = StudyBuddyService::new(db);
    let result = service
        .replace_availability(
            &caller(&buddy),
            ReplaceAvailabilityDto {
                availabilities: vec![window(1, "09:00", "11:00"), window(1, "10:00", "12:00")],
            },
        )
        .await;

    assert!(matches!(result, Err(AppError::Conflict(_))));
    assert_eq!(service.my_availability(buddy.id).await?.len(), 1);

    Ok(())
}

/// Tests updating one field of a window.
///
/// Verifies that the window's own current range doesn't count as an overlap.
///
/// Expected: Ok with the new end time and the old start time
#[tokio::test]
async fn updates_window_partially() -> Result<(), AppError> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let buddy = factory::create_buddy(db).await?;
    let existing = factory::create_availability(db, buddy.id, 2, "09:00", "12:00").await?;

    let updated = StudyBuddyService::new(db)
        .update_availability(
            &caller(&buddy),
            existing.id,
            UpdateAvailabilityDto {
                end_time: Some("13:00".to_string()),
                ..Default::default()
            },
        )
        .await?;

    assert_eq!(updated.start_time, "09:00");
    assert_eq!(updated.end_time, "13:00");

    Ok(())
}

/// Tests updating and deleting another buddy's window.
///
/// Expected: Err(AppError::NotFound) for both
#[tokio::test]
async fn hides_foreign_windows() -> Result<(), AppError> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let owner = factory::create_buddy(db).await?;
    let other = caller(&factory::create_buddy(db).await?);
    let existing = factory::create_availability(db, owner.id, 2, "09:00", "12:00").await?;

    let service = StudyBuddyService::new(db);

    let update = service
        .update_availability(&other, existing.id, UpdateAvailabilityDto::default())
        .await;
    assert!(matches!(update, Err(AppError::NotFound(_))));

    let delete = service.delete_availability(&other, existing.id).await;
    assert!(matches!(delete, Err(AppError::NotFound(_))));

    Ok(())
}
