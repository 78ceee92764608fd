//! Address and verification document models.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::model::user::{AddressDto, CreateAddressDto, VerificationDocumentDto};

#[derive(Debug, Clone, PartialEq)]
pub struct Address {
    pub id: Uuid,
    pub user_id: Uuid,
    pub address_line1: String,
    pub address_line2: Option<String>,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub country: String,
}

impl Address {
    pub fn from_entity(entity: entity::user_address::Model) -> Self {
        Self {
            id: entity.id,
            user_id: entity.user_id,
            address_line1: entity.address_line1,
            address_line2: entity.address_line2,
            city: entity.city,
            state: entity.state,
            postal_code: entity.postal_code,
            country: entity.country,
        }
    }

    pub fn into_dto(self) -> AddressDto {
        AddressDto {
            id: self.id,
            user_id: self.user_id,
            address_line1: self.address_line1,
            address_line2: self.address_line2,
            city: self.city,
            state: self.state,
            postal_code: self.postal_code,
            country: self.country,
        }
    }
}

#[derive(Debug, Clone)]
pub struct UpsertAddressParams {
    pub address_line1: String,
    pub address_line2: Option<String>,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub country: String,
}

impl UpsertAddressParams {
    pub fn from_dto(dto: CreateAddressDto) -> Self {
        Self {
            address_line1: dto.address_line1,
            address_line2: dto.address_line2,
            city: dto.city,
            state: dto.state,
            postal_code: dto.postal_code,
            country: dto.country,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct VerificationDocument {
    pub id: Uuid,
    pub user_id: Uuid,
    pub document_type: String,
    pub document_url: String,
    pub created_at: DateTime<Utc>,
}

impl VerificationDocument {
    pub fn from_entity(entity: entity::verification_document::Model) -> Self {
        Self {
            id: entity.id,
            user_id: entity.user_id,
            document_type: entity.document_type,
            document_url: entity.document_url,
            created_at: entity.created_at,
        }
    }

    pub fn into_dto(self) -> VerificationDocumentDto {
        VerificationDocumentDto {
            id: self.id,
            document_type: self.document_type,
            document_url: self.document_url,
            created_at: self.created_at,
        }
    }
}
