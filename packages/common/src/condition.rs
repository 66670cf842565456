#[cfg(feature = "sea-orm")]
use sea_orm::prelude::StringLen;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Condition grade of a motorcycle, as declared by the seller or the admin.
///
/// When the `sea-orm` feature is enabled, this enum can be used directly in
/// SeaORM entities.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema)]
#[cfg_attr(
    feature = "sea-orm",
    derive(sea_orm::DeriveActiveEnum, sea_orm::EnumIter),
    sea_orm(rs_type = "String", db_type = "String(StringLen::None)")
)]
#[serde(rename_all = "PascalCase")]
pub enum Condition {
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "Excellent"))]
    Excellent,
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "Good"))]
    Good,
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "Fair"))]
    Fair,
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "Poor"))]
    Poor,
}

impl Condition {
    /// All accepted condition values.
    pub const ALL: &'static [Condition] = &[Self::Excellent, Self::Good, Self::Fair, Self::Poor];

    /// Returns the string representation (PascalCase).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Excellent => "Excellent",
            Self::Good => "Good",
            Self::Fair => "Fair",
            Self::Poor => "Poor",
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error when parsing an invalid condition string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseConditionError {
    invalid: String,
}

impl fmt::Display for ParseConditionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Invalid condition '{}'. Valid values: {}",
            self.invalid,
            Condition::ALL
                .iter()
                .map(|c| c.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}

impl std::error::Error for ParseConditionError {}

impl FromStr for Condition {
    type Err = ParseConditionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Excellent" => Ok(Self::Excellent),
            "Good" => Ok(Self::Good),
            "Fair" => Ok(Self::Fair),
            "Poor" => Ok(Self::Poor),
            _ => Err(ParseConditionError {
                invalid: s.to_string(),
            }),
        }
    }
}
