use test_utils::{
    builder::TestBuilder,
    factory::{self, session::SessionFactory, ticket::TicketFactory, user::UserFactory},
};

use crate::{
    model::user::{UserRole, UserStatus, VerifyUserDto},
    server::{error::AppError, model::user::UserFilter, service::admin::AdminService},
};

/// Tests listing users when there are none.
///
/// Expected: Ok with an empty page, not an error
#[tokio::test]
async fn empty_user_list_is_ok() -> Result<(), AppError> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let page = AdminService::new(db).list_users(UserFilter::default()).await?;

    assert_eq!(page.total, 0);
    assert!(page.items.is_empty());

    Ok(())
}

/// Tests filtering users by role and attaching their skills.
///
/// Expected: Ok with only the buddy and their skills
#[tokio::test]
async fn filters_users_by_role() -> Result<(), AppError> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_user(db).await?;
    let buddy = UserFactory::new(db)
        .role("BUDDY")
        .skills(["Statistics"])
        .build()
        .await?;

    let page = AdminService::new(db)
        .list_users(UserFilter {
            role: Some(UserRole::Buddy),
            ..Default::default()
        })
        .await?;

    assert_eq!(page.total, 1);
    assert_eq!(page.items[0].user.id, buddy.id);
    assert_eq!(page.items[0].skills, vec!["Statistics".to_string()]);

    Ok(())
}

/// Tests approving and rejecting users.
///
/// Expected: ACTIVE on approval, SUSPENDED on rejection, NotFound for unknown IDs
#[tokio::test]
async fn verifies_users() -> Result<(), AppError> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let pending = UserFactory::new(db).status("INACTIVE").build().await?;
    let rejected = factory::create_user(db).await?;
    let service = AdminService::new(db);

    let approved = service
        .verify_user(
            pending.id,
            VerifyUserDto {
                is_approved: true,
                rejection_reason: None,
            },
        )
        .await?;
    assert_eq!(approved.user.status, UserStatus::Active);

    let suspended = service
        .verify_user(
            rejected.id,
            VerifyUserDto {
                is_approved: false,
                rejection_reason: Some("Documents unreadable".to_string()),
            },
        )
        .await?;
    assert_eq!(suspended.user.status, UserStatus::Suspended);

    let missing = service
        .verify_user(
            uuid::Uuid::new_v4(),
            VerifyUserDto {
                is_approved: true,
                rejection_reason: None,
            },
        )
        .await;
    assert!(matches!(missing, Err(AppError::NotFound(_))));

    Ok(())
}

/// Tests the per-user counts on the admin detail view.
///
/// Expected: Ok with one session per side, one ticket created and one claimed
#[tokio::test]
async fn gets_user_with_counts() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = UserFactory::new(db).role("BOTH").build().await?;
    let other = UserFactory::new(db).role("BOTH").build().await?;
    SessionFactory::new(db, user.id, other.id).build().await?;
    SessionFactory::new(db, other.id, user.id).build().await?;
    TicketFactory::new(db, user.id).build().await?;
    TicketFactory::new(db, other.id)
        .claimed_by(user.id)
        .build()
        .await?;

    let detail = AdminService::new(db).get_user(user.id).await?;

    assert_eq!(detail.profile.user.id, user.id);
    assert_eq!(detail.counts.sessions_as_buddy, 1);
    assert_eq!(detail.counts.sessions_as_learner, 1);
    assert_eq!(detail.counts.tickets_created, 1);
    assert_eq!(detail.counts.tickets_claimed, 1);

    Ok(())
}
