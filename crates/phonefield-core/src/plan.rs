use crate::domain::{Language, PhoneFormat, RegionCode};
use thiserror::Error;

/// Reason reported by a numbering plan when a string cannot be parsed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct ParseFailure(pub String);

impl ParseFailure {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// Numbering-plan database: parsing, validation, formatting and the
/// per-language offline descriptions of a number.
pub trait NumberingPlan {
    type Number;

    fn parse(&self, raw: &str, region: Option<&RegionCode>) -> Result<Self::Number, ParseFailure>;

    fn is_valid(&self, number: &Self::Number) -> bool;

    fn format(&self, number: &Self::Number, format: PhoneFormat) -> String;

    fn region_code(&self, number: &Self::Number) -> Option<RegionCode>;

    /// Sorted region codes the plan has metadata for.
    fn supported_regions(&self) -> Vec<RegionCode>;

    fn is_supported_region(&self, region: &RegionCode) -> bool {
        self.supported_regions().contains(region)
    }

    fn describe_location(&self, number: &Self::Number, language: &Language) -> String;

    fn carrier_name(&self, number: &Self::Number, language: &Language) -> String;
}
