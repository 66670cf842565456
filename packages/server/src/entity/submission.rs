use common::Condition;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// An unmoderated seller lead from the public "sell my bike" form.
///
/// Shares the listing attribute shape but is a distinct record: approval
/// copies the data into a new listing row and removes this one.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "submission")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub name: String,
    pub phone: String,
    pub location: String,

    pub make: String,
    pub model: String,
    pub year: i32,
    pub price: i32,
    pub km_driven: i32,
    pub engine_displacement: i32, // in cc
    pub registration: String,
    pub condition: Condition,
    pub description: String,

    pub images: Option<Vec<String>>,

    pub submitted_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
