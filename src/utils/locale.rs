//! Locale-dependent display formatting and `Accept-Language` negotiation.
//!
//! Formatting never influences computed values; it only renders them. When a
//! header is absent or malformed the caller falls back to the configured
//! default locale instead of failing the request.

use chrono::{Locale as ChronoLocale, NaiveDateTime};
use thiserror::Error;
use tracing::debug;

/// The fixed set of display locales the API negotiates against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SupportedLocale {
    PtBr,
    PtPt,
    #[default]
    EnUs,
}

impl SupportedLocale {
    pub const ALL: [SupportedLocale; 3] =
        [SupportedLocale::PtBr, SupportedLocale::PtPt, SupportedLocale::EnUs];

    pub fn tag(self) -> &'static str {
        match self {
            SupportedLocale::PtBr => "pt-BR",
            SupportedLocale::PtPt => "pt-PT",
            SupportedLocale::EnUs => "en-US",
        }
    }

    /// Case-insensitive match against the supported tags.
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|locale| locale.tag().eq_ignore_ascii_case(tag))
    }

    fn decimal_separator(self) -> char {
        match self {
            SupportedLocale::PtBr | SupportedLocale::PtPt => ',',
            SupportedLocale::EnUs => '.',
        }
    }

    fn grouping_separator(self) -> char {
        match self {
            SupportedLocale::PtBr | SupportedLocale::PtPt => '.',
            SupportedLocale::EnUs => ',',
        }
    }

    fn chrono_locale(self) -> ChronoLocale {
        match self {
            SupportedLocale::PtBr => ChronoLocale::pt_BR,
            SupportedLocale::PtPt => ChronoLocale::pt_PT,
            SupportedLocale::EnUs => ChronoLocale::en_US,
        }
    }
}

impl std::fmt::Display for SupportedLocale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

#[derive(Debug, Error, PartialEq)]
#[error("malformed Accept-Language header: {0}")]
pub struct MalformedAcceptLanguage(String);

/// One weighted language range from an `Accept-Language` header,
/// e.g. `pt-BR;q=0.9`.
#[derive(Debug, Clone, PartialEq)]
pub struct LanguageRange {
    pub tag: String,
    pub quality: f64,
}

/// Parses an `Accept-Language` header into weighted ranges (RFC 7231 §5.3.5).
///
/// Any malformed entry fails the whole header, matching the all-or-nothing
/// behavior callers rely on to degrade to the default locale.
pub fn parse_accept_language(header: &str) -> Result<Vec<LanguageRange>, MalformedAcceptLanguage> {
    let mut ranges = Vec::new();

    for entry in header.split(',') {
        let entry = entry.trim();
        if entry.is_empty() {
            return Err(MalformedAcceptLanguage(header.to_string()));
        }

        let mut parts = entry.split(';');
        let tag = parts.next().unwrap_or_default().trim();
        if !is_valid_language_range(tag) {
            return Err(MalformedAcceptLanguage(header.to_string()));
        }

        let mut quality = 1.0;
        for param in parts {
            let param = param.trim();
            let Some((key, value)) = param.split_once('=') else {
                return Err(MalformedAcceptLanguage(header.to_string()));
            };
            if !key.trim().eq_ignore_ascii_case("q") {
                return Err(MalformedAcceptLanguage(header.to_string()));
            }
            quality = match value.trim().parse::<f64>() {
                Ok(q) if (0.0..=1.0).contains(&q) => q,
                _ => return Err(MalformedAcceptLanguage(header.to_string())),
            };
        }

        ranges.push(LanguageRange {
            tag: tag.to_ascii_lowercase(),
            quality,
        });
    }

    Ok(ranges)
}

fn is_valid_language_range(tag: &str) -> bool {
    if tag == "*" {
        return true;
    }
    if tag.is_empty() {
        return false;
    }
    tag.split('-').all(|subtag| {
        !subtag.is_empty()
            && subtag.len() <= 8
            && subtag.bytes().all(|b| b.is_ascii_alphanumeric())
    })
}

/// Resolves the display locale for a request.
///
/// Ranges are considered in descending quality order (q=0 excluded) and
/// matched by RFC 4647 lookup: the range is truncated subtag by subtag until
/// it names a supported tag. `*` and any unmatched header resolve to the
/// default, as does an absent or malformed header.
pub fn resolve(header: Option<&str>, default: SupportedLocale) -> SupportedLocale {
    let Some(header) = header.map(str::trim).filter(|value| !value.is_empty()) else {
        return default;
    };

    let mut ranges = match parse_accept_language(header) {
        Ok(ranges) => ranges,
        Err(error) => {
            debug!(%error, "falling back to default locale");
            return default;
        }
    };

    ranges.sort_by(|left, right| {
        right
            .quality
            .partial_cmp(&left.quality)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    for range in ranges.iter().filter(|range| range.quality > 0.0) {
        if range.tag == "*" {
            return default;
        }
        if let Some(locale) = lookup(&range.tag) {
            return locale;
        }
    }

    default
}

// RFC 4647 §3.4: progressively truncate the range at `-` boundaries; a
// single-character subtag left dangling by truncation is removed too.
fn lookup(range: &str) -> Option<SupportedLocale> {
    let mut tag = range;
    loop {
        if let Some(locale) = SupportedLocale::from_tag(tag) {
            return Some(locale);
        }
        let truncated = tag.rsplit_once('-')?.0;
        tag = match truncated.rsplit_once('-') {
            Some((head, subtag)) if subtag.len() == 1 => head,
            _ => truncated,
        };
    }
}

/// Renders a number with the locale's grouping and decimal separators, up to
/// 2 fraction digits, trailing zeros trimmed (`1234.5` → `"1.234,5"` in
/// pt-BR, `0.0` → `"0"`).
pub fn format_number(value: f64, locale: SupportedLocale) -> String {
    localized_decimal(value, locale, true)
}

/// Currency rendering for the supported locales: symbol placement per locale,
/// always 2 fraction digits.
pub fn format_currency(value: f64, locale: SupportedLocale) -> String {
    let amount = localized_decimal(value, locale, false);
    match locale {
        SupportedLocale::PtBr => format!("R$ {amount}"),
        SupportedLocale::PtPt => format!("{amount} €"),
        SupportedLocale::EnUs => format!("${amount}"),
    }
}

/// Medium-style localized date-time rendering.
pub fn format_datetime(datetime: NaiveDateTime, locale: SupportedLocale) -> String {
    let pattern = match locale {
        SupportedLocale::PtBr => "%-d de %b de %Y %H:%M:%S",
        SupportedLocale::PtPt => "%-d de %b de %Y, %H:%M:%S",
        SupportedLocale::EnUs => "%b %-d, %Y, %-I:%M:%S %p",
    };
    datetime
        .and_utc()
        .format_localized(pattern, locale.chrono_locale())
        .to_string()
}

fn localized_decimal(value: f64, locale: SupportedLocale, trim_trailing_zeros: bool) -> String {
    let rendered = format!("{value:.2}");
    let (sign, magnitude) = match rendered.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", rendered.as_str()),
    };
    let (int_part, frac_part) = magnitude.split_once('.').unwrap_or((magnitude, ""));
    let frac = if trim_trailing_zeros {
        frac_part.trim_end_matches('0')
    } else {
        frac_part
    };

    let grouped = group_digits(int_part, locale.grouping_separator());
    if frac.is_empty() {
        format!("{sign}{grouped}")
    } else {
        format!("{sign}{grouped}{}{frac}", locale.decimal_separator())
    }
}

fn group_digits(digits: &str, separator: char) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index != 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(separator);
        }
        grouped.push(ch);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    mod parsing {
        use super::*;

        #[test]
        fn parses_single_tag_with_default_quality() {
            let ranges = parse_accept_language("pt-BR").expect("header should parse");
            assert_eq!(ranges.len(), 1);
            assert_eq!(ranges[0].tag, "pt-br");
            assert_eq!(ranges[0].quality, 1.0);
        }

        #[test]
        fn parses_weighted_list() {
            let ranges =
                parse_accept_language("pt-BR;q=0.9, en-US;q=0.8, *;q=0.1").expect("should parse");
            assert_eq!(ranges.len(), 3);
            assert_eq!(ranges[0].quality, 0.9);
            assert_eq!(ranges[2].tag, "*");
        }

        #[test]
        fn rejects_empty_entries() {
            assert!(parse_accept_language("pt-BR,,en-US").is_err());
            assert!(parse_accept_language(",").is_err());
        }

        #[test]
        fn rejects_invalid_tags() {
            assert!(parse_accept_language("pt_BR").is_err());
            assert!(parse_accept_language("pt-").is_err());
            assert!(parse_accept_language("not a tag").is_err());
            assert!(parse_accept_language("toolongsubtag-br").is_err());
        }

        #[test]
        fn rejects_invalid_quality() {
            assert!(parse_accept_language("pt-BR;q=abc").is_err());
            assert!(parse_accept_language("pt-BR;q=1.5").is_err());
            assert!(parse_accept_language("pt-BR;q=-0.1").is_err());
            assert!(parse_accept_language("pt-BR;weight=0.5").is_err());
        }
    }

    mod resolution {
        use super::*;

        #[test]
        fn exact_tag_matches() {
            assert_eq!(
                resolve(Some("pt-BR"), SupportedLocale::EnUs),
                SupportedLocale::PtBr
            );
            assert_eq!(
                resolve(Some("pt-PT"), SupportedLocale::EnUs),
                SupportedLocale::PtPt
            );
        }

        #[test]
        fn matching_is_case_insensitive() {
            assert_eq!(
                resolve(Some("PT-br"), SupportedLocale::EnUs),
                SupportedLocale::PtBr
            );
        }

        #[test]
        fn highest_quality_wins() {
            assert_eq!(
                resolve(Some("en-US;q=0.5, pt-BR;q=0.9"), SupportedLocale::EnUs),
                SupportedLocale::PtBr
            );
        }

        #[test]
        fn longer_ranges_truncate_to_supported_tags() {
            // pt-BR-saopaulo -> pt-BR
            assert_eq!(
                resolve(Some("pt-BR-x-private"), SupportedLocale::EnUs),
                SupportedLocale::PtBr
            );
        }

        #[test]
        fn bare_primary_subtag_does_not_match_regional_locales() {
            // RFC 4647 lookup truncates the range, not the supported tags.
            assert_eq!(resolve(Some("pt"), SupportedLocale::EnUs), SupportedLocale::EnUs);
        }

        #[test]
        fn wildcard_resolves_to_default() {
            assert_eq!(resolve(Some("*"), SupportedLocale::PtPt), SupportedLocale::PtPt);
        }

        #[test]
        fn zero_quality_ranges_are_excluded() {
            assert_eq!(
                resolve(Some("pt-BR;q=0, en-US;q=0.5"), SupportedLocale::PtPt),
                SupportedLocale::EnUs
            );
        }

        #[test]
        fn absent_or_blank_header_uses_default() {
            assert_eq!(resolve(None, SupportedLocale::PtBr), SupportedLocale::PtBr);
            assert_eq!(resolve(Some("  "), SupportedLocale::PtBr), SupportedLocale::PtBr);
        }

        #[test]
        fn malformed_header_uses_default() {
            assert_eq!(
                resolve(Some("pt_BR;;;q=x"), SupportedLocale::EnUs),
                SupportedLocale::EnUs
            );
        }

        #[test]
        fn unmatched_languages_use_default() {
            assert_eq!(
                resolve(Some("fr-FR, de-DE;q=0.9"), SupportedLocale::EnUs),
                SupportedLocale::EnUs
            );
        }
    }

    mod number_formatting {
        use super::*;

        #[test]
        fn groups_thousands_per_locale() {
            assert_eq!(format_number(1234.56, SupportedLocale::EnUs), "1,234.56");
            assert_eq!(format_number(1234.56, SupportedLocale::PtBr), "1.234,56");
            assert_eq!(format_number(1234.56, SupportedLocale::PtPt), "1.234,56");
        }

        #[test]
        fn groups_millions() {
            assert_eq!(
                format_number(1_234_567.89, SupportedLocale::EnUs),
                "1,234,567.89"
            );
            assert_eq!(
                format_number(1_234_567.89, SupportedLocale::PtBr),
                "1.234.567,89"
            );
        }

        #[test]
        fn trims_trailing_fraction_zeros() {
            assert_eq!(format_number(111.2, SupportedLocale::PtBr), "111,2");
            assert_eq!(format_number(360.75, SupportedLocale::PtBr), "360,75");
            assert_eq!(format_number(0.0, SupportedLocale::PtBr), "0");
            assert_eq!(format_number(42.0, SupportedLocale::EnUs), "42");
        }

        #[test]
        fn small_integral_values_have_no_grouping() {
            assert_eq!(format_number(999.99, SupportedLocale::EnUs), "999.99");
        }

        #[test]
        fn negative_values_keep_the_sign() {
            assert_eq!(format_number(-1234.5, SupportedLocale::EnUs), "-1,234.5");
        }
    }

    mod currency_formatting {
        use super::*;

        #[test]
        fn renders_symbol_per_locale() {
            assert_eq!(format_currency(1234.5, SupportedLocale::PtBr), "R$ 1.234,50");
            assert_eq!(format_currency(1234.5, SupportedLocale::PtPt), "1.234,50 €");
            assert_eq!(format_currency(1234.5, SupportedLocale::EnUs), "$1,234.50");
        }

        #[test]
        fn always_renders_two_fraction_digits() {
            assert_eq!(format_currency(10.0, SupportedLocale::EnUs), "$10.00");
        }
    }

    mod datetime_formatting {
        use super::*;

        fn sample() -> NaiveDateTime {
            NaiveDate::from_ymd_opt(2026, 8, 5)
                .expect("valid date")
                .and_hms_opt(14, 30, 0)
                .expect("valid time")
        }

        #[test]
        fn english_uses_twelve_hour_clock() {
            let rendered = format_datetime(sample(), SupportedLocale::EnUs);
            assert_eq!(rendered, "Aug 5, 2026, 2:30:00 PM");
        }

        #[test]
        fn portuguese_uses_localized_month_names() {
            let rendered = format_datetime(sample(), SupportedLocale::PtBr);
            assert!(rendered.contains("de 2026"), "got {rendered}");
            assert!(rendered.contains("14:30:00"), "got {rendered}");
        }
    }
}
