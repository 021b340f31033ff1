use crate::domain::RegionCode;
use serde::{Deserialize, Serialize};

/// A raw number as typed by a user, with the country it was entered for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhoneQuery {
    pub raw_number: String,
    pub explicit_country: Option<String>,
}

impl PhoneQuery {
    pub fn new(raw_number: impl Into<String>) -> Self {
        Self {
            raw_number: raw_number.into(),
            explicit_country: None,
        }
    }

    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.explicit_country = Some(country.into());
        self
    }
}

/// Resolved view of a valid number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhoneDetails {
    /// INTERNATIONAL style, e.g. `+44 20 7031 3000`.
    pub formatted_number: String,
    pub geocoding: String,
    pub carrier: String,
    pub region_code: Option<RegionCode>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PhoneFormat {
    E164,
    #[default]
    International,
    National,
    Rfc3966,
}
