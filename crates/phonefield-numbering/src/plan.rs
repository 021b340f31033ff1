use crate::error::Result;
use crate::prefix::PrefixDescriptions;
use phonefield_core::{country_name, Language, NumberingPlan, ParseFailure, PhoneFormat, RegionCode};
use phonenumber::country::Id;
use phonenumber::{Mode, PhoneNumber};
use std::fmt;
use std::panic::{self, UnwindSafe};
use std::path::Path;
use tracing::error;

const GEOCODING_DIR: &str = "geocoding";
const CARRIER_DIR: &str = "carrier";

/// [`NumberingPlan`] backed by the `phonenumber` crate's metadata, with
/// geocoding and carrier names from offline prefix tables.
#[derive(Debug, Clone, Default)]
pub struct PhonenumberPlan {
    geocoding: PrefixDescriptions,
    carriers: PrefixDescriptions,
}

impl PhonenumberPlan {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_descriptions(geocoding: PrefixDescriptions, carriers: PrefixDescriptions) -> Self {
        Self {
            geocoding,
            carriers,
        }
    }

    /// Reads `<data_dir>/geocoding/<lang>/*.txt` and `<data_dir>/carrier/<lang>/*.txt`.
    pub fn load(data_dir: &Path) -> Result<Self> {
        Ok(Self {
            geocoding: PrefixDescriptions::load_dir(&data_dir.join(GEOCODING_DIR))?,
            carriers: PrefixDescriptions::load_dir(&data_dir.join(CARRIER_DIR))?,
        })
    }
}

impl NumberingPlan for PhonenumberPlan {
    type Number = PhoneNumber;

    fn parse(
        &self,
        raw: &str,
        region: Option<&RegionCode>,
    ) -> std::result::Result<PhoneNumber, ParseFailure> {
        let country = match region {
            Some(region) => Some(
                country_id(region)
                    .ok_or_else(|| ParseFailure::new(format!("unsupported region {}", region)))?,
            ),
            None => None,
        };

        let raw = raw.to_string();
        guarded_parse(move || phonenumber::parse(country, raw))
    }

    fn is_valid(&self, number: &PhoneNumber) -> bool {
        phonenumber::is_valid(number)
    }

    fn format(&self, number: &PhoneNumber, format: PhoneFormat) -> String {
        let mode = match format {
            PhoneFormat::E164 => Mode::E164,
            PhoneFormat::International => Mode::International,
            PhoneFormat::National => Mode::National,
            PhoneFormat::Rfc3966 => Mode::Rfc3966,
        };
        number.format().mode(mode).to_string()
    }

    fn region_code(&self, number: &PhoneNumber) -> Option<RegionCode> {
        let id = number.country().id()?;
        RegionCode::new(&format!("{:?}", id)).ok()
    }

    fn supported_regions(&self) -> Vec<RegionCode> {
        two_letter_codes()
            .filter(|region| self.is_supported_region(region))
            .collect()
    }

    fn is_supported_region(&self, region: &RegionCode) -> bool {
        country_id(region).is_some()
    }

    fn describe_location(&self, number: &PhoneNumber, language: &Language) -> String {
        if let Some(description) = self.geocoding.describe(&e164_digits(number), language) {
            return description.to_string();
        }
        self.region_code(number)
            .and_then(|region| country_name(&region))
            .unwrap_or_default()
            .to_string()
    }

    fn carrier_name(&self, number: &PhoneNumber, language: &Language) -> String {
        self.carriers
            .describe(&e164_digits(number), language)
            .unwrap_or_default()
            .to_string()
    }
}

/// Runs a parse, turning a panic inside the phonenumber crate into a
/// failure. The default panic hook still reports the panic on stderr.
fn guarded_parse<T, E, F>(parse: F) -> std::result::Result<T, ParseFailure>
where
    E: fmt::Debug,
    F: FnOnce() -> std::result::Result<T, E> + UnwindSafe,
{
    match panic::catch_unwind(parse) {
        Ok(Ok(number)) => Ok(number),
        Ok(Err(err)) => Err(ParseFailure::new(format!("{:?}", err))),
        Err(_) => {
            error!("phonenumber panicked while parsing");
            Err(ParseFailure::new("parser panicked"))
        }
    }
}

/// Every `AA`..`ZZ` code in order; the plan keeps those `country::Id` knows.
fn two_letter_codes() -> impl Iterator<Item = RegionCode> {
    (b'A'..=b'Z').flat_map(|first| {
        (b'A'..=b'Z').filter_map(move |second| {
            let code: String = [char::from(first), char::from(second)].iter().collect();
            RegionCode::new(&code).ok()
        })
    })
}

fn country_id(region: &RegionCode) -> Option<Id> {
    region.as_str().parse::<Id>().ok()
}

fn e164_digits(number: &PhoneNumber) -> String {
    number
        .format()
        .mode(Mode::E164)
        .to_string()
        .trim_start_matches('+')
        .to_string()
}
