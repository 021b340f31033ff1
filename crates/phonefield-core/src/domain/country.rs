use crate::domain::RegionCode;
use isocountry::CountryCode;

/// Everyday names shown instead of the long ISO 3166-1 ones, and regions the
/// numbering plan knows that ISO 3166-1 does not list.
const COMMON_NAMES: &[(&str, &str)] = &[
    ("AC", "Ascension Island"),
    ("BO", "Bolivia"),
    ("FM", "Micronesia"),
    ("GB", "United Kingdom"),
    ("IR", "Iran"),
    ("KP", "North Korea"),
    ("KR", "South Korea"),
    ("LA", "Laos"),
    ("MD", "Moldova"),
    ("PS", "Palestine"),
    ("RU", "Russia"),
    ("SY", "Syria"),
    ("TA", "Tristan da Cunha"),
    ("TW", "Taiwan"),
    ("TZ", "Tanzania"),
    ("US", "United States"),
    ("VE", "Venezuela"),
    ("VN", "Vietnam"),
    ("XK", "Kosovo"),
];

/// Other spellings users type into the default-country field.
const ALIASES: &[(&str, &str)] = &[
    ("UK", "GB"),
    ("Great Britain", "GB"),
    ("England", "GB"),
    ("USA", "US"),
    ("United States of America", "US"),
    ("America", "US"),
    ("Czech Republic", "CZ"),
    ("Czechia", "CZ"),
    ("Russian Federation", "RU"),
    ("Republic of Korea", "KR"),
    ("Holland", "NL"),
    ("Netherlands", "NL"),
    ("Ivory Coast", "CI"),
    ("Swaziland", "SZ"),
    ("Macedonia", "MK"),
    ("Burma", "MM"),
    ("Turkey", "TR"),
    ("Turkiye", "TR"),
];

/// Maps a country name, alias, alpha-2 or alpha-3 code to its region code.
pub fn country_code(name_or_code: &str) -> Option<RegionCode> {
    let needle = collapse_whitespace(name_or_code);
    if needle.is_empty() {
        return None;
    }

    let found = CountryCode::for_alpha2_caseless(&needle)
        .or_else(|_| CountryCode::for_alpha3_caseless(&needle))
        .ok()
        .map(|country| country.alpha2())
        .or_else(|| {
            COMMON_NAMES
                .iter()
                .find(|(code, name)| {
                    code.eq_ignore_ascii_case(&needle) || name.eq_ignore_ascii_case(&needle)
                })
                .map(|(code, _)| *code)
        })
        .or_else(|| {
            CountryCode::iter()
                .find(|country| country.name().eq_ignore_ascii_case(&needle))
                .map(|country| country.alpha2())
        })
        .or_else(|| {
            ALIASES
                .iter()
                .find(|(alias, _)| alias.eq_ignore_ascii_case(&needle))
                .map(|(_, code)| *code)
        })?;

    RegionCode::new(found).ok()
}

/// English display name: the common name when there is one, the ISO name otherwise.
pub fn country_name(region: &RegionCode) -> Option<&'static str> {
    COMMON_NAMES
        .iter()
        .find(|(code, _)| *code == region.as_str())
        .map(|(_, name)| *name)
        .or_else(|| {
            CountryCode::for_alpha2(region.as_str())
                .ok()
                .map(|country| country.name())
        })
}

fn collapse_whitespace(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}
