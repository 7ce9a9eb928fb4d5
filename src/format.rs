//! Number, percentage and date formatting for README values.
//!
//! Digit grouping comes from CLDR data via ICU4X, so separators, minimum
//! grouping digits and Indian-style grouping all follow the locale.

use chrono::Local;
use icu_decimal::DecimalFormatter;
use icu_decimal::input::Decimal;
use icu_locale::{Locale, locale};
use std::fmt;

/// Parses a BCP 47 or POSIX locale tag (`en-US`, `de_CH.UTF-8`).
///
/// `C`, `POSIX`, empty and unparsable tags map to `en-US`.
pub fn parse_locale(tag: &str) -> Locale {
    let tag = tag
        .split(['.', '@'])
        .next()
        .unwrap_or_default()
        .trim()
        .replace('_', "-");

    match tag.as_str() {
        "" | "C" | "POSIX" => locale!("en-US"),
        _ => tag.parse().unwrap_or(locale!("en-US")),
    }
}

/// Locale-grouped integer formatter.
pub struct NumberFormatter {
    locale: Locale,
    formatter: DecimalFormatter,
}

impl NumberFormatter {
    /// Builds a formatter for a BCP 47 / POSIX locale tag such as `en-US` or `de_DE.UTF-8`.
    pub fn for_locale(tag: &str) -> Self {
        let locale = parse_locale(tag);
        let formatter = DecimalFormatter::try_new(locale.clone().into(), Default::default())
            .or_else(|_| DecimalFormatter::try_new(locale!("en-US").into(), Default::default()))
            .expect("compiled decimal data includes en-US");

        Self { locale, formatter }
    }

    pub fn format(&self, n: u64) -> String {
        self.formatter.format(&Decimal::from(n)).to_string()
    }

    /// Formats a plain decimal integer string such as `-1250`.
    ///
    /// Strings that are not a decimal number are returned unchanged.
    fn format_digits(&self, digits: &str) -> String {
        match Decimal::try_from_str(digits) {
            Ok(decimal) => self.formatter.format(&decimal).to_string(),
            Err(_) => digits.to_string(),
        }
    }
}

impl Default for NumberFormatter {
    fn default() -> Self {
        Self::for_locale("en-US")
    }
}

impl fmt::Debug for NumberFormatter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NumberFormatter")
            .field("locale", &self.locale.to_string())
            .finish()
    }
}

/// Adds one to a string of ASCII digits.
fn increment_digits(digits: &str) -> String {
    let mut out: Vec<u8> = digits.bytes().collect();

    for d in out.iter_mut().rev() {
        if *d == b'9' {
            *d = b'0';
        } else {
            *d += 1;
            return String::from_utf8_lossy(&out).into_owned();
        }
    }

    out.insert(0, b'1');
    String::from_utf8_lossy(&out).into_owned()
}

/// Whole percent for `fraction`, as a signed digit string.
///
/// Works on the shortest decimal form of the float, so `0.285` is `29` rather
/// than the `28` binary arithmetic on `28.499999999999996` would give. Halves
/// round away from zero.
fn whole_percent(fraction: f64) -> String {
    let text = fraction.abs().to_string();
    let (int_part, frac_part) = text.split_once('.').unwrap_or((&text, ""));

    let mut frac = frac_part.bytes();
    let mut digits = int_part.to_string();
    for _ in 0..2 {
        digits.push(frac.next().map_or('0', char::from));
    }
    if frac.next().is_some_and(|d| d >= b'5') {
        digits = increment_digits(&digits);
    }

    let digits = match digits.trim_start_matches('0') {
        "" => "0",
        trimmed => trimmed,
    };

    if fraction < 0.0 && digits != "0" {
        format!("-{digits}")
    } else {
        digits.to_string()
    }
}

/// British English percentage formatter: `0.5667` becomes `57%`.
#[derive(Debug)]
pub struct PercentFormatter {
    number: NumberFormatter,
}

impl PercentFormatter {
    pub fn new() -> Self {
        Self {
            number: NumberFormatter::for_locale("en-GB"),
        }
    }

    pub fn format(&self, fraction: f64) -> String {
        if fraction.is_nan() {
            return "NaN%".to_string();
        }
        if fraction.is_infinite() {
            let sign = if fraction < 0.0 { "-" } else { "" };
            return format!("{sign}∞%");
        }

        format!("{}%", self.number.format_digits(&whole_percent(fraction)))
    }
}

impl Default for PercentFormatter {
    fn default() -> Self {
        Self::new()
    }
}

/// Current local date as `Mon Jan 01 2024`.
pub fn today_date() -> String {
    Local::now().format("%a %b %d %Y").to_string()
}
