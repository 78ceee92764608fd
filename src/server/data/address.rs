//! User address repository. Each user has at most one address.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    IntoActiveModel, QueryFilter,
};
use uuid::Uuid;

use crate::server::model::profile::{Address, UpsertAddressParams};

pub struct AddressRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> AddressRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn find_by_user(&self, user_id: Uuid) -> Result<Option<Address>, DbErr> {
        let entity = entity::prelude::UserAddress::find()
            .filter(entity::user_address::Column::UserId.eq(user_id))
            .one(self.db)
            .await?;

        Ok(entity.map(Address::from_entity))
    }

    /// Creates the user's address, or overwrites it if one exists.
    pub async fn upsert(
        &self,
        user_id: Uuid,
        params: UpsertAddressParams,
    ) -> Result<Address, DbErr> {
        let now = Utc::now();
        let existing = entity::prelude::UserAddress::find()
            .filter(entity::user_address::Column::UserId.eq(user_id))
            .one(self.db)
            .await?;

        let entity = match existing {
            Some(entity) => {
                let mut active = entity.into_active_model();
                active.address_line1 = ActiveValue::Set(params.address_line1);
                active.address_line2 = ActiveValue::Set(params.address_line2);
                active.city = ActiveValue::Set(params.city);
                active.state = ActiveValue::Set(params.state);
                active.postal_code = ActiveValue::Set(params.postal_code);
                active.country = ActiveValue::Set(params.country);
                active.updated_at = ActiveValue::Set(now);
                active.update(self.db).await?
            }
            None => {
                entity::user_address::ActiveModel {
                    id: ActiveValue::Set(Uuid::new_v4()),
                    user_id: ActiveValue::Set(user_id),
                    address_line1: ActiveValue::Set(params.address_line1),
                    address_line2: ActiveValue::Set(params.address_line2),
                    city: ActiveValue::Set(params.city),
                    state: ActiveValue::Set(params.state),
                    postal_code: ActiveValue::Set(params.postal_code),
                    country: ActiveValue::Set(params.country),
                    created_at: ActiveValue::Set(now),
                    updated_at: ActiveValue::Set(now),
                }
                .insert(self.db)
                .await?
            }
        };

        Ok(Address::from_entity(entity))
    }
}
