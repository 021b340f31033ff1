use crate::directory::UserDirectory;
use crate::domain::{
    country_code, Language, PhoneDetails, PhoneFormat, PhoneQuery, RegionCode, Session, UserId,
};
use crate::error::PhoneError;
use crate::plan::NumberingPlan;
use tracing::{debug, info, warn};

/// Normalizes raw phone numbers against a numbering plan, falling back to the
/// acting user's default country when a number cannot be read on its own.
pub struct PhoneResolver<'a, P, U> {
    plan: &'a P,
    users: &'a U,
}

impl<'a, P, U> PhoneResolver<'a, P, U>
where
    P: NumberingPlan,
    U: UserDirectory,
{
    pub fn new(plan: &'a P, users: &'a U) -> Self {
        Self { plan, users }
    }

    /// Details of a valid number. Unparseable input and unusable hints are
    /// logged and reported as [`PhoneError::InvalidPhoneNumber`].
    pub fn get_details(
        &self,
        query: &PhoneQuery,
        language: &Language,
    ) -> Result<PhoneDetails, PhoneError> {
        let region = match explicit_country(query).map(RegionCode::new).transpose() {
            Ok(region) => region,
            Err(err) => {
                info!(number = %query.raw_number, error = %err, "unusable country hint");
                return Err(PhoneError::InvalidPhoneNumber);
            }
        };
        self.details_in_region(&query.raw_number, region.as_ref(), language)
    }

    /// Like [`Self::get_details`], but a hint outside the plan's supported
    /// regions fails with [`PhoneError::InvalidCountryCode`] before parsing.
    pub fn verify_number(
        &self,
        query: &PhoneQuery,
        language: &Language,
    ) -> Result<PhoneDetails, PhoneError> {
        let region = match explicit_country(query) {
            Some(raw) => {
                let region = RegionCode::new(raw)
                    .map_err(|_| PhoneError::InvalidCountryCode(raw.to_string()))?;
                if !self.plan.is_supported_region(&region) {
                    return Err(PhoneError::InvalidCountryCode(region.to_string()));
                }
                Some(region)
            }
            None => None,
        };
        self.details_in_region(&query.raw_number, region.as_ref(), language)
    }

    /// International form of `raw`, read as-is first and then, at most once,
    /// in the default country of `user` (or the session user).
    pub fn proper_number(
        &self,
        raw: &str,
        user: Option<&UserId>,
        session: &Session,
    ) -> Result<String, PhoneError> {
        match self.details_in_region(raw, None, &session.language) {
            Ok(details) => return Ok(details.formatted_number),
            Err(PhoneError::InvalidPhoneNumber) => {}
            Err(err) => return Err(err),
        }

        let Some(user) = user.or(session.user.as_ref()) else {
            debug!(number = raw, "no acting user, skipping default country");
            return Err(PhoneError::InvalidPhoneNumber);
        };

        let Some(country) = self.users.default_country(user)? else {
            debug!(user = %user, "user has no default country");
            return Err(PhoneError::InvalidPhoneNumber);
        };

        let Some(region) = country_code(&country) else {
            warn!(user = %user, country = %country, "default country has no region code");
            return Err(PhoneError::InvalidPhoneNumber);
        };

        debug!(user = %user, region = %region, "retrying with default country");
        self.details_in_region(raw, Some(&region), &session.language)
            .map(|details| details.formatted_number)
    }

    pub fn supported_regions(&self) -> Vec<RegionCode> {
        self.plan.supported_regions()
    }

    fn details_in_region(
        &self,
        raw: &str,
        region: Option<&RegionCode>,
        language: &Language,
    ) -> Result<PhoneDetails, PhoneError> {
        let number = match self.plan.parse(raw, region) {
            Ok(number) => number,
            Err(err) => {
                info!(number = raw, error = %err, "phone number parse failed");
                return Err(PhoneError::InvalidPhoneNumber);
            }
        };

        if !self.plan.is_valid(&number) {
            debug!(number = raw, "phone number is not a valid assigned number");
            return Err(PhoneError::InvalidPhoneNumber);
        }

        Ok(PhoneDetails {
            formatted_number: self.plan.format(&number, PhoneFormat::International),
            geocoding: self.plan.describe_location(&number, language),
            carrier: self.plan.carrier_name(&number, language),
            region_code: self.plan.region_code(&number),
        })
    }
}

fn explicit_country(query: &PhoneQuery) -> Option<&str> {
    query
        .explicit_country
        .as_deref()
        .map(str::trim)
        .filter(|country| !country.is_empty())
}

#[cfg(test)]
mod tests {
    use super::PhoneResolver;
    use crate::directory::{DirectoryError, UserDirectory};
    use crate::domain::{Language, PhoneFormat, PhoneQuery, RegionCode, Session, UserId};
    use crate::error::{PhoneError, PhoneErrorKind};
    use crate::plan::{NumberingPlan, ParseFailure};
    use std::cell::Cell;
    use std::collections::HashMap;

    struct FakeNumber {
        calling_code: &'static str,
        national: String,
        region: RegionCode,
    }

    #[derive(Default)]
    struct FakePlan {
        parses: Cell<usize>,
    }

    impl FakePlan {
        fn parses(&self) -> usize {
            self.parses.get()
        }
    }

    fn region(code: &str) -> RegionCode {
        RegionCode::new(code).unwrap()
    }

    impl NumberingPlan for FakePlan {
        type Number = FakeNumber;

        fn parse(
            &self,
            raw: &str,
            hint: Option<&RegionCode>,
        ) -> Result<Self::Number, ParseFailure> {
            self.parses.set(self.parses.get() + 1);
            let digits: String = raw.chars().filter(|ch| ch.is_ascii_digit()).collect();
            if digits.is_empty() {
                return Err(ParseFailure::new("not a number"));
            }

            if raw.trim_start().starts_with('+') {
                if let Some(rest) = digits.strip_prefix("44") {
                    return Ok(FakeNumber {
                        calling_code: "44",
                        national: rest.to_string(),
                        region: region("GB"),
                    });
                }
                return Err(ParseFailure::new("invalid country code"));
            }

            let hint = hint.ok_or_else(|| ParseFailure::new("invalid country code"))?;
            match hint.as_str() {
                "GB" => Ok(FakeNumber {
                    calling_code: "44",
                    national: digits.trim_start_matches('0').to_string(),
                    region: region("GB"),
                }),
                "US" => Ok(FakeNumber {
                    calling_code: "1",
                    national: digits,
                    region: region("US"),
                }),
                _ => Err(ParseFailure::new("invalid country code")),
            }
        }

        fn is_valid(&self, number: &Self::Number) -> bool {
            number.national.len() == 10
        }

        fn format(&self, number: &Self::Number, format: PhoneFormat) -> String {
            match format {
                PhoneFormat::International => {
                    format!("+{} {}", number.calling_code, number.national)
                }
                _ => format!("+{}{}", number.calling_code, number.national),
            }
        }

        fn region_code(&self, number: &Self::Number) -> Option<RegionCode> {
            Some(number.region.clone())
        }

        fn supported_regions(&self) -> Vec<RegionCode> {
            vec![region("GB"), region("US")]
        }

        fn describe_location(&self, number: &Self::Number, language: &Language) -> String {
            match (number.national.starts_with("20"), language.short()) {
                (true, "pl") => "Londyn".to_string(),
                (true, _) => "London".to_string(),
                (false, _) => String::new(),
            }
        }

        fn carrier_name(&self, number: &Self::Number, _language: &Language) -> String {
            if number.national.starts_with('7') {
                "Vodafone".to_string()
            } else {
                String::new()
            }
        }
    }

    #[derive(Default)]
    struct FakeDirectory {
        countries: HashMap<UserId, Option<String>>,
    }

    impl FakeDirectory {
        fn with_user(mut self, id: UserId, country: Option<&str>) -> Self {
            self.countries.insert(id, country.map(str::to_string));
            self
        }
    }

    impl UserDirectory for FakeDirectory {
        fn default_country(&self, user: &UserId) -> Result<Option<String>, DirectoryError> {
            self.countries
                .get(user)
                .cloned()
                .ok_or(DirectoryError::UnknownUser(*user))
        }
    }

    fn english() -> Language {
        Language::new("en-US").unwrap()
    }

    #[test]
    fn get_details_formats_valid_number_with_hint() {
        let plan = FakePlan::default();
        let users = FakeDirectory::default();
        let resolver = PhoneResolver::new(&plan, &users);

        let query = PhoneQuery::new("020 7031 3000").with_country("GB");
        let details = resolver.get_details(&query, &english()).expect("details");
        assert_eq!(details.formatted_number, "+44 2070313000");
        assert_eq!(details.geocoding, "London");
        assert_eq!(details.carrier, "");
        assert_eq!(details.region_code, Some(region("GB")));
    }

    #[test]
    fn get_details_uses_language_for_descriptions() {
        let plan = FakePlan::default();
        let users = FakeDirectory::default();
        let resolver = PhoneResolver::new(&plan, &users);

        let query = PhoneQuery::new("+44 20 7031 3000");
        let polish = Language::new("pl-PL").unwrap();
        let details = resolver.get_details(&query, &polish).expect("details");
        assert_eq!(details.geocoding, "Londyn");
    }

    #[test]
    fn get_details_returns_failure_for_malformed_input() {
        let plan = FakePlan::default();
        let users = FakeDirectory::default();
        let resolver = PhoneResolver::new(&plan, &users);

        let err = resolver
            .get_details(&PhoneQuery::new("call me maybe"), &english())
            .unwrap_err();
        assert_eq!(err, PhoneError::InvalidPhoneNumber);
    }

    #[test]
    fn get_details_rejects_numbers_that_are_not_assigned() {
        let plan = FakePlan::default();
        let users = FakeDirectory::default();
        let resolver = PhoneResolver::new(&plan, &users);

        let err = resolver
            .get_details(&PhoneQuery::new("+44 12"), &english())
            .unwrap_err();
        assert_eq!(err, PhoneError::InvalidPhoneNumber);
    }

    #[test]
    fn get_details_treats_unusable_hint_as_invalid_number() {
        let plan = FakePlan::default();
        let users = FakeDirectory::default();
        let resolver = PhoneResolver::new(&plan, &users);

        let query = PhoneQuery::new("020 7031 3000").with_country("Great Britain");
        let err = resolver.get_details(&query, &english()).unwrap_err();
        assert_eq!(err, PhoneError::InvalidPhoneNumber);
        assert_eq!(plan.parses(), 0);
    }

    #[test]
    fn get_details_is_idempotent() {
        let plan = FakePlan::default();
        let users = FakeDirectory::default();
        let resolver = PhoneResolver::new(&plan, &users);

        let query = PhoneQuery::new("+44 7700 900123");
        let first = resolver.get_details(&query, &english());
        let second = resolver.get_details(&query, &english());
        assert_eq!(first, second);
        assert_eq!(first.expect("details").carrier, "Vodafone");
    }

    #[test]
    fn verify_number_rejects_unsupported_country_before_parsing() {
        let plan = FakePlan::default();
        let users = FakeDirectory::default();
        let resolver = PhoneResolver::new(&plan, &users);

        let query = PhoneQuery::new("+44 20 7031 3000").with_country("ZZ");
        let err = resolver.verify_number(&query, &english()).unwrap_err();
        assert_eq!(err, PhoneError::InvalidCountryCode("ZZ".to_string()));
        assert_eq!(err.kind(), PhoneErrorKind::InvalidCountryCode);
        assert_eq!(plan.parses(), 0);
    }

    #[test]
    fn verify_number_rejects_malformed_country() {
        let plan = FakePlan::default();
        let users = FakeDirectory::default();
        let resolver = PhoneResolver::new(&plan, &users);

        let query = PhoneQuery::new("020 7031 3000").with_country("123");
        let err = resolver.verify_number(&query, &english()).unwrap_err();
        assert_eq!(err, PhoneError::InvalidCountryCode("123".to_string()));
        assert_eq!(plan.parses(), 0);
    }

    #[test]
    fn verify_number_reports_invalid_number() {
        let plan = FakePlan::default();
        let users = FakeDirectory::default();
        let resolver = PhoneResolver::new(&plan, &users);

        let query = PhoneQuery::new("020 70").with_country("GB");
        let err = resolver.verify_number(&query, &english()).unwrap_err();
        assert_eq!(err.kind(), PhoneErrorKind::InvalidPhoneNumber);
        assert_eq!(err.label(), "LBL_INVALID_PHONE_NUMBER");
    }

    #[test]
    fn verify_number_accepts_lowercase_supported_hint() {
        let plan = FakePlan::default();
        let users = FakeDirectory::default();
        let resolver = PhoneResolver::new(&plan, &users);

        let query = PhoneQuery::new("020 7031 3000").with_country("gb");
        let details = resolver.verify_number(&query, &english()).expect("verify");
        assert_eq!(details.formatted_number, "+44 2070313000");
    }

    #[test]
    fn verify_number_treats_blank_hint_as_absent() {
        let plan = FakePlan::default();
        let users = FakeDirectory::default();
        let resolver = PhoneResolver::new(&plan, &users);

        let query = PhoneQuery::new("+44 20 7031 3000").with_country("  ");
        assert!(resolver.verify_number(&query, &english()).is_ok());
    }

    #[test]
    fn proper_number_resolves_directly_without_user_lookup() {
        let plan = FakePlan::default();
        let users = FakeDirectory::default();
        let resolver = PhoneResolver::new(&plan, &users);

        let session = Session::new(None, english());
        let number = resolver
            .proper_number("+44 20 7031 3000", None, &session)
            .expect("proper");
        assert_eq!(number, "+44 2070313000");
        assert_eq!(plan.parses(), 1);
    }

    #[test]
    fn proper_number_falls_back_to_default_country_once() {
        let user = UserId::new();
        let plan = FakePlan::default();
        let users = FakeDirectory::default().with_user(user, Some("United Kingdom"));
        let resolver = PhoneResolver::new(&plan, &users);

        let session = Session::new(None, english());
        let number = resolver
            .proper_number("020 7031 3000", Some(&user), &session)
            .expect("proper");
        assert_eq!(number, "+44 2070313000");
        assert_eq!(plan.parses(), 2);
    }

    #[test]
    fn proper_number_fails_when_both_attempts_fail() {
        let user = UserId::new();
        let plan = FakePlan::default();
        let users = FakeDirectory::default().with_user(user, Some("US"));
        let resolver = PhoneResolver::new(&plan, &users);

        let session = Session::new(None, english());
        let err = resolver
            .proper_number("020 7031 3000", Some(&user), &session)
            .unwrap_err();
        assert_eq!(err, PhoneError::InvalidPhoneNumber);
        assert_eq!(plan.parses(), 2);
    }

    #[test]
    fn proper_number_uses_session_user_when_none_given() {
        let user = UserId::new();
        let plan = FakePlan::default();
        let users = FakeDirectory::default().with_user(user, Some("gb"));
        let resolver = PhoneResolver::new(&plan, &users);

        let session = Session::new(Some(user), english());
        let number = resolver
            .proper_number("020 7031 3000", None, &session)
            .expect("proper");
        assert_eq!(number, "+44 2070313000");
    }

    #[test]
    fn proper_number_prefers_explicit_user_over_session() {
        let session_user = UserId::new();
        let explicit = UserId::new();
        let plan = FakePlan::default();
        let users = FakeDirectory::default()
            .with_user(session_user, Some("United States"))
            .with_user(explicit, Some("United Kingdom"));
        let resolver = PhoneResolver::new(&plan, &users);

        let session = Session::new(Some(session_user), english());
        let number = resolver
            .proper_number("020 7031 3000", Some(&explicit), &session)
            .expect("proper");
        assert_eq!(number, "+44 2070313000");
    }

    #[test]
    fn proper_number_reports_unknown_user() {
        let user = UserId::new();
        let plan = FakePlan::default();
        let users = FakeDirectory::default();
        let resolver = PhoneResolver::new(&plan, &users);

        let session = Session::new(None, english());
        let err = resolver
            .proper_number("020 7031 3000", Some(&user), &session)
            .unwrap_err();
        assert_eq!(err, PhoneError::UnknownUser(user));
    }

    #[test]
    fn proper_number_skips_retry_without_usable_default_country() {
        let unset = UserId::new();
        let unknown_country = UserId::new();
        let plan = FakePlan::default();
        let users = FakeDirectory::default()
            .with_user(unset, None)
            .with_user(unknown_country, Some("Atlantis"));
        let resolver = PhoneResolver::new(&plan, &users);
        let session = Session::new(None, english());

        for user in [unset, unknown_country] {
            let err = resolver
                .proper_number("020 7031 3000", Some(&user), &session)
                .unwrap_err();
            assert_eq!(err, PhoneError::InvalidPhoneNumber);
        }
        assert_eq!(plan.parses(), 2);
    }

    #[test]
    fn proper_number_without_any_user_fails_after_one_attempt() {
        let plan = FakePlan::default();
        let users = FakeDirectory::default();
        let resolver = PhoneResolver::new(&plan, &users);

        let err = resolver
            .proper_number("020 7031 3000", None, &Session::default())
            .unwrap_err();
        assert_eq!(err, PhoneError::InvalidPhoneNumber);
        assert_eq!(plan.parses(), 1);
    }

    #[test]
    fn error_labels_match_translation_keys() {
        assert_eq!(
            PhoneError::InvalidCountryCode("ZZ".to_string()).label(),
            "LBL_INVALID_COUNTRY_CODE"
        );
        assert_eq!(PhoneError::InvalidPhoneNumber.label(), "LBL_INVALID_PHONE_NUMBER");
    }
}
