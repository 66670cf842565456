use common::Condition;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "listing")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub make: String,
    pub model: String,
    pub year: i32,
    pub price: i32,
    pub km_driven: i32,
    pub engine_displacement: i32, // in cc
    pub registration: String,
    pub condition: Condition,
    pub description: String,

    /// Public image URLs in display order. Empty when the listing has no photos.
    pub images: Vec<String>,
}

impl ActiveModelBehavior for ActiveModel {}
