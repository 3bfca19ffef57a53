//! Location models
//!
//! Two separate concepts live here. A [`PriceLocation`] is the bare-name
//! key that price mappings join on. A [`Location`] carries regional and
//! demographic metadata; older price mappings may still point at one.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::validation::validate_not_blank;

/// Location key used by price mappings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct PriceLocation {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for creating or renaming a price location
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PriceLocationInput {
    #[validate(length(max = 200), custom = "validate_not_blank")]
    pub name: String,
}

/// Full location with regional metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Location {
    pub id: Uuid,
    /// Missing on rows created before locations were named
    pub name: Option<String>,
    pub region: Option<String>,
    pub city: Option<String>,
    pub district: Option<String>,
    pub population_tier: Option<String>,
    pub income_band: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Location {
    /// Human-readable label built from whichever fields are filled in.
    ///
    /// Prefers the name; otherwise joins district, city and region.
    pub fn display_name(&self) -> Option<String> {
        if let Some(name) = self.name.as_deref().map(str::trim).filter(|n| !n.is_empty()) {
            return Some(name.to_string());
        }

        let parts: Vec<&str> = [&self.district, &self.city, &self.region]
            .into_iter()
            .filter_map(|part| part.as_deref().map(str::trim))
            .filter(|part| !part.is_empty())
            .collect();

        if parts.is_empty() {
            None
        } else {
            Some(parts.join(", "))
        }
    }
}

/// Input for creating a full location
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateLocationInput {
    #[validate(length(max = 200), custom = "validate_not_blank")]
    pub name: String,
    #[validate(length(max = 120))]
    pub region: Option<String>,
    #[validate(length(max = 120))]
    pub city: Option<String>,
    #[validate(length(max = 120))]
    pub district: Option<String>,
    #[validate(length(max = 60))]
    pub population_tier: Option<String>,
    #[validate(length(max = 60))]
    pub income_band: Option<String>,
}

/// Input for updating a full location
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateLocationInput {
    #[validate(length(max = 200), custom = "validate_not_blank")]
    pub name: Option<String>,
    #[validate(length(max = 120))]
    pub region: Option<String>,
    #[validate(length(max = 120))]
    pub city: Option<String>,
    #[validate(length(max = 120))]
    pub district: Option<String>,
    #[validate(length(max = 60))]
    pub population_tier: Option<String>,
    #[validate(length(max = 60))]
    pub income_band: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn legacy(name: Option<&str>, district: Option<&str>, city: Option<&str>, region: Option<&str>) -> Location {
        Location {
            id: Uuid::new_v4(),
            name: name.map(String::from),
            region: region.map(String::from),
            city: city.map(String::from),
            district: district.map(String::from),
            population_tier: None,
            income_band: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_display_name_prefers_name() {
        let loc = legacy(Some("Downtown Store"), Some("Central"), Some("Lyon"), None);
        assert_eq!(loc.display_name().as_deref(), Some("Downtown Store"));
    }

    #[test]
    fn test_display_name_joins_legacy_fields() {
        let loc = legacy(None, Some("Central"), Some("Lyon"), Some("Rhone"));
        assert_eq!(loc.display_name().as_deref(), Some("Central, Lyon, Rhone"));

        let loc = legacy(Some("  "), None, Some("Lyon"), None);
        assert_eq!(loc.display_name().as_deref(), Some("Lyon"));
    }

    #[test]
    fn test_display_name_empty() {
        let loc = legacy(None, None, Some(""), None);
        assert_eq!(loc.display_name(), None);
    }
}
