use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "ticket")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub created_by_id: Uuid,
    pub claimed_by_id: Option<Uuid>,
    pub module: String,
    pub topic: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub status: String,
    /// JSON array of free-form time strings
    pub preferred_times: Json,
    /// JSON array of attachment URLs
    pub attachments: Json,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::CreatedById",
        to = "super::user::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    CreatedBy,
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::ClaimedById",
        to = "super::user::Column::Id",
        on_update = "Cascade",
        on_delete = "SetNull"
    )]
    ClaimedBy,
    #[sea_orm(has_many = "super::ticket_comment::Entity")]
    TicketComment,
}

impl Related<super::ticket_comment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TicketComment.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
