//! Display formatting helpers for dates, numbers and text.
//!
//! Invalid input is logged and rendered as a sentinel string; these helpers
//! never fail or panic, since their output goes straight into the UI.

use std::fmt::Write as _;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// Rendered in place of a date that could not be interpreted.
pub const INVALID_DATE: &str = "Invalid date";

/// Default `format_date` pattern, e.g. `Mar 05, 2024`.
pub const DEFAULT_DATE_FORMAT: &str = "%b %d, %Y";

const MINUTES_IN_HOUR: i64 = 60;
const MINUTES_IN_DAY: i64 = 1_440;
const MINUTES_IN_MONTH: i64 = 43_200;
const MINUTES_IN_TWO_MONTHS: i64 = 86_400;
const MINUTES_IN_AVERAGE_MONTH: i64 = 43_830;

/// Date accepted by the date helpers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DateInput<'a> {
    /// RFC 3339 timestamp, `YYYY-MM-DDTHH:MM:SS` (UTC), or `YYYY-MM-DD`.
    Text(&'a str),
    /// Milliseconds since the Unix epoch.
    EpochMillis(i64),
    /// Already-parsed instant.
    Instant(DateTime<Utc>),
}

impl<'a> From<&'a str> for DateInput<'a> {
    fn from(value: &'a str) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for DateInput<'_> {
    fn from(value: i64) -> Self {
        Self::EpochMillis(value)
    }
}

impl From<DateTime<Utc>> for DateInput<'_> {
    fn from(value: DateTime<Utc>) -> Self {
        Self::Instant(value)
    }
}

impl DateInput<'_> {
    /// Interpret the input as a UTC instant.
    #[must_use]
    pub fn resolve(&self) -> Option<DateTime<Utc>> {
        match *self {
            Self::Text(text) => parse_text(text.trim()),
            Self::EpochMillis(millis) => DateTime::from_timestamp_millis(millis),
            Self::Instant(instant) => Some(instant),
        }
    }
}

fn parse_text(text: &str) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
        return Some(parsed.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Format a date with a `strftime` pattern.
pub fn format_date<'a>(input: impl Into<DateInput<'a>>, pattern: &str) -> String {
    let input = input.into();
    let Some(instant) = input.resolve() else {
        tracing::warn!(input = ?input, "invalid date provided to format_date");
        return INVALID_DATE.to_string();
    };
    let mut rendered = String::new();
    if write!(rendered, "{}", instant.format(pattern)).is_err() {
        tracing::warn!(pattern, "invalid date pattern provided to format_date");
        return INVALID_DATE.to_string();
    }
    rendered
}

/// Distance between `input` and `base` in words, e.g. `3 days ago` or `in about 2 hours`.
pub fn format_relative_time<'a>(input: impl Into<DateInput<'a>>, base: DateTime<Utc>) -> String {
    let input = input.into();
    let Some(instant) = input.resolve() else {
        tracing::warn!(input = ?input, "invalid date provided to format_relative_time");
        return INVALID_DATE.to_string();
    };
    let seconds = (instant - base).num_seconds();
    let phrase = distance_in_words(seconds.unsigned_abs());
    if seconds > 0 {
        format!("in {phrase}")
    } else {
        format!("{phrase} ago")
    }
}

fn distance_in_words(seconds: u64) -> String {
    let seconds = i64::try_from(seconds).unwrap_or(i64::MAX);
    let minutes = rounded_div(seconds, 60);

    if minutes < 1 {
        return "less than a minute".to_string();
    }
    if minutes < 45 {
        return counted(minutes, "minute");
    }
    if minutes < 90 {
        return "about 1 hour".to_string();
    }
    if minutes < MINUTES_IN_DAY {
        return format!("about {}", counted(rounded_div(minutes, MINUTES_IN_HOUR), "hour"));
    }
    if minutes < 42 * MINUTES_IN_HOUR {
        return "1 day".to_string();
    }
    if minutes < MINUTES_IN_MONTH {
        return counted(rounded_div(minutes, MINUTES_IN_DAY), "day");
    }
    if minutes < MINUTES_IN_TWO_MONTHS {
        return format!("about {}", counted(rounded_div(minutes, MINUTES_IN_MONTH), "month"));
    }

    let months = minutes / MINUTES_IN_AVERAGE_MONTH;
    if months < 12 {
        return counted(rounded_div(minutes, MINUTES_IN_MONTH), "month");
    }
    let years = months / 12;
    match months % 12 {
        0..=2 => format!("about {}", counted(years, "year")),
        3..=8 => format!("over {}", counted(years, "year")),
        _ => format!("almost {}", counted(years + 1, "year")),
    }
}

const fn rounded_div(value: i64, divisor: i64) -> i64 {
    (value + divisor / 2) / divisor
}

fn counted(count: i64, unit: &str) -> String {
    if count == 1 {
        format!("1 {unit}")
    } else {
        format!("{count} {unit}s")
    }
}

/// Fraction and grouping options for [`format_number`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NumberFormat {
    /// Minimum digits after the decimal point.
    pub min_fraction_digits: usize,
    /// Maximum digits after the decimal point.
    pub max_fraction_digits: usize,
    /// Insert `,` between thousands.
    pub grouping: bool,
}

impl Default for NumberFormat {
    fn default() -> Self {
        Self {
            min_fraction_digits: 0,
            max_fraction_digits: 3,
            grouping: true,
        }
    }
}

impl NumberFormat {
    /// Exactly `digits` fraction digits.
    #[must_use]
    pub const fn fixed(digits: usize) -> Self {
        Self {
            min_fraction_digits: digits,
            max_fraction_digits: digits,
            grouping: true,
        }
    }
}

/// en-US decimal formatting, e.g. `1,234.568`.
#[must_use]
pub fn format_number(value: f64, options: &NumberFormat) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "∞" } else { "-∞" }.to_string();
    }
    let max_digits = options.max_fraction_digits.max(options.min_fraction_digits);
    let rounded = format!("{:.*}", max_digits, value.abs());
    let (whole, fraction) = rounded.split_once('.').unwrap_or((rounded.as_str(), ""));

    let mut fraction = fraction.to_string();
    while fraction.len() > options.min_fraction_digits && fraction.ends_with('0') {
        fraction.pop();
    }

    let whole = if options.grouping {
        group_thousands(whole)
    } else {
        whole.to_string()
    };
    let is_zero = rounded.bytes().all(|byte| byte == b'0' || byte == b'.');
    let sign = if value < 0.0 && !is_zero { "-" } else { "" };
    if fraction.is_empty() {
        format!("{sign}{whole}")
    } else {
        format!("{sign}{whole}.{fraction}")
    }
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped
}

/// en-US currency formatting with two decimals, e.g. `$1,234.50` or `CHF 12.00`.
#[must_use]
pub fn format_currency(amount: f64, currency: &str) -> String {
    let code = currency.trim().to_ascii_uppercase();
    let number = format_number(amount.abs(), &NumberFormat::fixed(2));
    let sign = if amount < 0.0 && number.bytes().any(|byte| matches!(byte, b'1'..=b'9')) {
        "-"
    } else {
        ""
    };
    match currency_symbol(&code) {
        Some(symbol) => format!("{sign}{symbol}{number}"),
        None => format!("{sign}{code} {number}"),
    }
}

fn currency_symbol(code: &str) -> Option<&'static str> {
    match code {
        "USD" => Some("$"),
        "EUR" => Some("€"),
        "GBP" => Some("£"),
        "JPY" => Some("¥"),
        _ => None,
    }
}

/// Percentage with one decimal; `value` is already in percent, e.g. `12.34 → 12.3%`.
#[must_use]
pub fn format_percentage(value: f64) -> String {
    format!("{}%", format_number(value, &NumberFormat::fixed(1)))
}

/// Cut `text` to `max_chars` characters, appending `...` when shortened.
#[must_use]
pub fn truncate_text(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

/// Uppercase the first character.
#[must_use]
pub fn capitalize_first_letter(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// URL slug: lowercase, whitespace runs become `-`, other non-word characters
/// are dropped, dash runs collapse and edge dashes are trimmed.
#[must_use]
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    for ch in text.to_lowercase().chars() {
        let next = if ch.is_whitespace() || ch == '-' {
            '-'
        } else if ch.is_ascii_alphanumeric() || ch == '_' {
            ch
        } else {
            continue;
        };
        if next == '-' && slug.ends_with('-') {
            continue;
        }
        slug.push(next);
    }
    slug.trim_matches('-').to_string()
}
