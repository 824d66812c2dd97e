//! Paper entity

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "papers")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false, column_type = "Text")]
    pub doi: String,

    #[sea_orm(column_type = "Text", nullable)]
    pub title: Option<String>,

    /// Comma-joined author names
    #[sea_orm(column_type = "Text", nullable)]
    pub authors: Option<String>,

    #[sea_orm(column_type = "Text", nullable)]
    pub content: Option<String>,

    /// Comma-joined citation DOIs
    #[sea_orm(column_type = "Text", nullable)]
    pub citations: Option<String>,

    #[sea_orm(column_type = "Text", nullable)]
    pub source: Option<String>,

    pub ingestion_date: Option<DateTime>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
