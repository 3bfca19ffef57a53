//! Vendor models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::validation::validate_not_blank;

/// A retailer or supplier whose prices are tracked
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Vendor {
    pub id: Uuid,
    pub name: String,
    pub logo_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a vendor
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateVendorInput {
    #[validate(length(max = 200), custom = "validate_not_blank")]
    pub name: String,
    #[validate(url)]
    pub logo_url: Option<String>,
}

/// Input for updating a vendor
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateVendorInput {
    #[validate(length(max = 200), custom = "validate_not_blank")]
    pub name: Option<String>,
    #[validate(url)]
    pub logo_url: Option<String>,
}
