use super::*;

/// Tests claiming an open ticket.
///
/// Expected: Ok(true) with the ticket claimed by the buddy
#[tokio::test]
async fn claims_open_ticket() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let learner = factory::create_user(db).await?;
    let buddy = factory::create_buddy(db).await?;
    let ticket = factory::create_ticket(db, learner.id).await?;

    let repo = TicketRepository::new(db);
    let claimed = repo.claim(ticket.id, buddy.id).await?;

    assert!(claimed);
    let ticket = repo.find_by_id(ticket.id).await?.unwrap();
    assert_eq!(ticket.status, TicketStatus::Claimed);
    assert_eq!(ticket.claimed_by_id, Some(buddy.id));

    Ok(())
}

/// Tests that only the first of two claims wins.
///
/// Expected: first Ok(true), second Ok(false), claimer unchanged
#[tokio::test]
async fn second_claim_fails() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let learner = factory::create_user(db).await?;
    let first = factory::create_buddy(db).await?;
    let second = factory::create_buddy(db).await?;
    let ticket = factory::create_ticket(db, learner.id).await?;

    let repo = TicketRepository::new(db);

    assert!(repo.claim(ticket.id, first.id).await?);
    assert!(!repo.claim(ticket.id, second.id).await?);
    assert_eq!(
        repo.find_by_id(ticket.id).await?.unwrap().claimed_by_id,
        Some(first.id)
    );

    Ok(())
}

/// Tests claiming a resolved ticket.
///
/// Expected: Ok(false)
#[tokio::test]
async fn cannot_claim_finished_ticket() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let learner = factory::create_user(db).await?;
    let buddy = factory::create_buddy(db).await?;
    let ticket = TicketFactory::new(db, learner.id)
        .status("RESOLVED")
        .build()
        .await?;

    let repo = TicketRepository::new(db);

    assert!(!repo.claim(ticket.id, buddy.id).await?);

    Ok(())
}
