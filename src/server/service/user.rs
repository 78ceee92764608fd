//! User self-service: profile, account status, documents, address, skills and activity.
//!
//! Every mutating operation is restricted to the user acting on their own account.

use chrono::Utc;
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::{
    model::{
        session::ParticipantRole,
        user::{CreateAddressDto, CreateVerificationDocumentDto, UpdateUserDto, UserStatus},
    },
    server::{
        data::{
            address::AddressRepository, document::DocumentRepository,
            session::SessionRepository, skill::SkillRepository, ticket::TicketRepository,
            user::UserRepository,
        },
        error::AppError,
        model::{
            profile::{Address, UpsertAddressParams, VerificationDocument},
            session::SessionWithParticipants,
            ticket::TicketWithUsers,
            user::{UpdateUserParams, User, UserProfile},
        },
        service::email::{template, EmailService},
    },
};

/// Items per list in the recent tickets and upcoming sessions views.
const ACTIVITY_LIMIT: u64 = 10;

fn user_not_found() -> AppError {
    AppError::NotFound("User not found".to_string())
}

fn require_self(caller: &User, id: Uuid, message: &str) -> Result<(), AppError> {
    if caller.id != id {
        return Err(AppError::Forbidden(message.to_string()));
    }

    Ok(())
}

pub struct UserService<'a> {
    pub db: &'a DatabaseConnection,
    pub email: &'a EmailService,
}

impl<'a> UserService<'a> {
    pub fn new(db: &'a DatabaseConnection, email: &'a EmailService) -> Self {
        Self { db, email }
    }

    /// Gets a user with their skills.
    ///
    /// # Returns
    /// - `Ok(UserProfile)` - User found
    /// - `Err(AppError::NotFound)` - No user with that ID
    pub async fn get_profile(&self, id: Uuid) -> Result<UserProfile, AppError> {
        let user = UserRepository::new(self.db)
            .find_by_id(id)
            .await?
            .ok_or_else(user_not_found)?;
        let skills = SkillRepository::new(self.db).get_for_user(id).await?;

        Ok(UserProfile::new(user, skills))
    }

    /// Updates the caller's own profile fields.
    ///
    /// # Returns
    /// - `Err(AppError::Forbidden)` - Caller is editing someone else
    /// - `Err(AppError::BadRequest)` - Requested role is a staff role
    pub async fn update_profile(
        &self,
        caller: &User,
        id: Uuid,
        dto: UpdateUserDto,
    ) -> Result<UserProfile, AppError> {
        require_self(caller, id, "You can only update your own profile")?;

        if dto.role.is_some_and(|role| !role.is_self_assignable()) {
            return Err(AppError::BadRequest(
                "Role must be one of LEARNER, BUDDY or BOTH".to_string(),
            ));
        }

        let user = UserRepository::new(self.db)
            .update_profile(id, UpdateUserParams::from_dto(dto))
            .await?
            .ok_or_else(user_not_found)?;
        let skills = SkillRepository::new(self.db).get_for_user(id).await?;

        Ok(UserProfile::new(user, skills))
    }

    /// Deletes the caller's account and everything that references it.
    pub async fn delete_account(&self, caller: &User, id: Uuid) -> Result<(), AppError> {
        require_self(caller, id, "You can only delete your own account")?;

        if !UserRepository::new(self.db).delete(id).await? {
            return Err(user_not_found());
        }

        tracing::info!("User {} deleted their account", id);

        self.email.send(template::account_deleted(&caller.email)).await;

        Ok(())
    }

    /// Changes the caller's own account status.
    ///
    /// # Returns
    /// - `Err(AppError::Forbidden)` - Caller is changing someone else
    /// - `Err(AppError::BadRequest)` - Account already has that status
    pub async fn change_status(
        &self,
        caller: &User,
        id: Uuid,
        status: UserStatus,
    ) -> Result<UserProfile, AppError> {
        require_self(caller, id, "You can only change your own account status")?;

        if caller.status == status {
            return Err(AppError::BadRequest(format!(
                "User is already {}",
                status.as_str()
            )));
        }

        let user = UserRepository::new(self.db)
            .set_status(id, status)
            .await?
            .ok_or_else(user_not_found)?;
        let skills = SkillRepository::new(self.db).get_for_user(id).await?;

        tracing::info!("User {} changed status to {}", id, status.as_str());

        Ok(UserProfile::new(user, skills))
    }

    /// Registers a verification document by URL.
    pub async fn add_document(
        &self,
        user_id: Uuid,
        dto: CreateVerificationDocumentDto,
    ) -> Result<VerificationDocument, AppError> {
        Ok(DocumentRepository::new(self.db)
            .create(user_id, dto.document_type, dto.document_url)
            .await?)
    }

    pub async fn documents(&self, user_id: Uuid) -> Result<Vec<VerificationDocument>, AppError> {
        Ok(DocumentRepository::new(self.db).get_for_user(user_id).await?)
    }

    /// Creates the user's address or overwrites the existing one.
    pub async fn save_address(
        &self,
        user_id: Uuid,
        dto: CreateAddressDto,
    ) -> Result<Address, AppError> {
        Ok(AddressRepository::new(self.db)
            .upsert(user_id, UpsertAddressParams::from_dto(dto))
            .await?)
    }

    pub async fn address(&self, user_id: Uuid) -> Result<Address, AppError> {
        AddressRepository::new(self.db)
            .find_by_user(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Address not found".to_string()))
    }

    /// Gets any user's skills, alphabetically.
    pub async fn skills(&self, id: Uuid) -> Result<Vec<String>, AppError> {
        if UserRepository::new(self.db).find_by_id(id).await?.is_none() {
            return Err(user_not_found());
        }

        Ok(SkillRepository::new(self.db).get_for_user(id).await?)
    }

    /// Adds skills, ignoring ones the user already has. Returns the full set.
    pub async fn add_skills(
        &self,
        user_id: Uuid,
        skills: Vec<String>,
    ) -> Result<Vec<String>, AppError> {
        Ok(SkillRepository::new(self.db).add(user_id, skills).await?)
    }

    /// Replaces the user's skill set. Returns the new set.
    pub async fn replace_skills(
        &self,
        user_id: Uuid,
        skills: Vec<String>,
    ) -> Result<Vec<String>, AppError> {
        Ok(SkillRepository::new(self.db).replace(user_id, skills).await?)
    }

    /// Removes skills. Returns what is left.
    pub async fn remove_skills(
        &self,
        user_id: Uuid,
        skills: Vec<String>,
    ) -> Result<Vec<String>, AppError> {
        Ok(SkillRepository::new(self.db).remove(user_id, skills).await?)
    }

    /// Gets the user's ten most recent created tickets and ten most recent claimed.
    pub async fn recent_tickets(
        &self,
        user_id: Uuid,
    ) -> Result<(Vec<TicketWithUsers>, Vec<TicketWithUsers>), AppError> {
        let repo = TicketRepository::new(self.db);

        let created = repo.get_recent_created(user_id, ACTIVITY_LIMIT).await?;
        let claimed = repo.get_recent_claimed(user_id, ACTIVITY_LIMIT).await?;

        Ok((created, claimed))
    }

    /// Gets up to ten upcoming pending or confirmed sessions per side, soonest first.
    ///
    /// # Returns
    /// - `Ok((as_buddy, as_learner))`
    pub async fn upcoming_sessions(
        &self,
        user_id: Uuid,
    ) -> Result<(Vec<SessionWithParticipants>, Vec<SessionWithParticipants>), AppError> {
        let repo = SessionRepository::new(self.db);
        let now = Utc::now();

        let as_buddy = repo
            .get_upcoming(user_id, ParticipantRole::Buddy, now, ACTIVITY_LIMIT)
            .await?;
        let as_learner = repo
            .get_upcoming(user_id, ParticipantRole::Learner, now, ACTIVITY_LIMIT)
            .await?;

        Ok((as_buddy, as_learner))
    }
}
