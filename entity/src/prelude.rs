pub use super::availability::Entity as Availability;
pub use super::notification::Entity as Notification;
pub use super::session::Entity as Session;
pub use super::ticket::Entity as Ticket;
pub use super::ticket_comment::Entity as TicketComment;
pub use super::user::Entity as User;
pub use super::user_address::Entity as UserAddress;
pub use super::user_skill::Entity as UserSkill;
pub use super::verification_document::Entity as VerificationDocument;
