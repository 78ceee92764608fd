use super::*;

/// Tests that a comment notifies the other party but never the commenter.
///
/// Expected: Ok with one TICKET_COMMENT for the claimer and none for the creator
#[tokio::test]
async fn notifies_everyone_but_commenter() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let email = EmailService::log_only();

    let creator = factory::create_user(db).await?;
    let buddy = factory::create_buddy(db).await?;
    let ticket = TicketFactory::new(db, creator.id)
        .claimed_by(buddy.id)
        .build()
        .await?;

    let comment = TicketService::new(db, &email)
        .add_comment(&caller(&creator), ticket.id, "Any update?".to_string())
        .await?;

    assert_eq!(comment.user_id, creator.id);
    assert_eq!(comment.message, "Any update?");
    assert_eq!(count_notifications(db, buddy.id, "TICKET_COMMENT").await?, 1);
    assert_eq!(count_notifications(db, creator.id, "TICKET_COMMENT").await?, 0);

    Ok(())
}

/// Tests that comments come back oldest first in the ticket detail and the page.
///
/// Expected: Ok with both comments in insertion order and a comment count of 2
#[tokio::test]
async fn lists_comments_oldest_first() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let email = EmailService::log_only();

    let creator = factory::create_user(db).await?;
    let ticket = TicketFactory::new(db, creator.id).build().await?;

    let service = TicketService::new(db, &email);
    let creator = caller(&creator);
    service
        .add_comment(&creator, ticket.id, "first".to_string())
        .await?;
    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    service
        .add_comment(&creator, ticket.id, "second".to_string())
        .await?;

    let detail = service.get(ticket.id).await?;
    let messages: Vec<&str> = detail
        .comments
        .iter()
        .map(|(c, _)| c.message.as_str())
        .collect();
    assert_eq!(messages, vec!["first", "second"]);
    assert_eq!(detail.ticket.comment_count, 2);

    let page = service
        .list_comments(ticket.id, PageRequest::new(None, None, 20))
        .await?;
    assert_eq!(page.total, 2);
    assert_eq!(page.items[0].0.message, "first");

    Ok(())
}

/// Tests commenting on a missing ticket.
///
/// Expected: Err(AppError::NotFound("Ticket not found"))
#[tokio::test]
async fn rejects_missing_ticket() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let email = EmailService::log_only();

    let user = factory::create_user(db).await?;

    let result = TicketService::new(db, &email)
        .add_comment(&caller(&user), uuid::Uuid::new_v4(), "hello".to_string())
        .await;

    assert!(matches!(result, Err(AppError::NotFound(ref msg)) if msg == "Ticket not found"));

    Ok(())
}
