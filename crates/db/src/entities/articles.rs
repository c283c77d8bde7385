//! `SeaORM` Entity for the articles table.
//!
//! One table carries both editorial articles and per-patient diagnosis
//! notes: a diagnosis is an unpublished row with `subject_account_id` set.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "articles")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub author_id: Uuid,
    pub subject_account_id: Option<Uuid>,
    pub published: bool,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::accounts::Entity",
        from = "Column::AuthorId",
        to = "super::accounts::Column::Id"
    )]
    Author,
    #[sea_orm(
        belongs_to = "super::accounts::Entity",
        from = "Column::SubjectAccountId",
        to = "super::accounts::Column::Id"
    )]
    Subject,
}

impl Related<super::accounts::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Author.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
