use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "testimonial")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub name: String,
    pub location: String,
    pub review: String,

    /// Star rating, always within [1, 5].
    pub rating: i32,

    pub image: Option<String>,
}

impl ActiveModelBehavior for ActiveModel {}
