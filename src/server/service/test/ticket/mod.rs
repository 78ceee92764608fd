use test_utils::{
    builder::TestBuilder,
    factory::{self, ticket::TicketFactory, user::UserFactory},
};

use crate::{
    model::ticket::{CreateTicketDto, TicketStatus, UpdateTicketDto},
    server::{
        error::AppError,
        model::pagination::PageRequest,
        service::{email::EmailService, ticket::TicketService},
    },
};

use super::{caller, count_notifications};

mod comment;

fn ticket_dto(module: &str) -> CreateTicketDto {
    CreateTicketDto {
        module: module.to_string(),
        topic: "Eigenvalues".to_string(),
        description: "Stuck on diagonalisation".to_string(),
        preferred_times: vec!["Evenings".to_string()],
        attachments: Vec::new(),
    }
}
