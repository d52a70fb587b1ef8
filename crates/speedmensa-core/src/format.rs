//! Italian (it-IT) price and date formatting
//!
//! Output matches what `Intl.NumberFormat('it-IT', { style: 'currency',
//! currency: 'EUR' })` and `toLocaleDateString('it-IT', { weekday: 'long',
//! day: 'numeric', month: 'long', year: 'numeric' })` produce, so pages
//! rendered server-side and client-side agree.

use crate::error::FormatError;
use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Weekday};

/// Separator between amount and currency symbol
const NBSP: char = '\u{a0}';

const MONTHS: [&str; 12] = [
    "gennaio",
    "febbraio",
    "marzo",
    "aprile",
    "maggio",
    "giugno",
    "luglio",
    "agosto",
    "settembre",
    "ottobre",
    "novembre",
    "dicembre",
];

const DATETIME_FORMATS: [&str; 6] = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

/// Format an amount as euros, e.g. `19.9` → `"19,90 €"`
pub fn format_prezzo(amount: f64) -> String {
    let sign = if amount.is_sign_negative() && !amount.is_nan() {
        "-"
    } else {
        ""
    };

    if amount.is_nan() {
        return format!("NaN{}€", NBSP);
    }
    if amount.is_infinite() {
        return format!("{}∞{}€", sign, NBSP);
    }

    let (integer, cents) = round_to_cents(amount.abs());
    format!("{}{},{}{}€", sign, group_thousands(&integer), cents, NBSP)
}

/// Every finite `f64` has at most this many fractional decimal digits
const MAX_FRACTION_DIGITS: usize = 1074;

/// Round a non-negative finite amount to two decimals, ties away from
/// zero, judged on the exact binary value. Returns (integer, cents).
fn round_to_cents(amount: f64) -> (String, String) {
    let exact = format!("{:.*}", MAX_FRACTION_DIGITS, amount);
    let (integer, fraction) = exact.split_once('.').unwrap_or((exact.as_str(), ""));
    let fraction = fraction.as_bytes();
    let digit = |i: usize| fraction.get(i).copied().unwrap_or(b'0');

    let mut scaled: Vec<u8> = integer.bytes().chain([digit(0), digit(1)]).collect();
    if digit(2) >= b'5' {
        increment_digits(&mut scaled);
    }

    let split = scaled.len() - 2;
    let to_string = |digits: &[u8]| digits.iter().map(|&d| d as char).collect::<String>();
    (to_string(&scaled[..split]), to_string(&scaled[split..]))
}

/// Add one to a big-endian ASCII decimal
fn increment_digits(digits: &mut Vec<u8>) {
    for d in digits.iter_mut().rev() {
        if *d == b'9' {
            *d = b'0';
        } else {
            *d += 1;
            return;
        }
    }
    digits.insert(0, b'1');
}

/// Insert `.` every three digits from the right. Four-digit amounts stay
/// ungrouped (it-IT minimum grouping digits is 2).
fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    if len < 5 {
        return digits.to_string();
    }

    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    out
}

fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "lunedì",
        Weekday::Tue => "martedì",
        Weekday::Wed => "mercoledì",
        Weekday::Thu => "giovedì",
        Weekday::Fri => "venerdì",
        Weekday::Sat => "sabato",
        Weekday::Sun => "domenica",
    }
}

/// Render a calendar date, e.g. `"venerdì 15 marzo 2024"`
pub fn format_data(date: NaiveDate) -> String {
    format!(
        "{} {} {} {}",
        weekday_name(date.weekday()),
        date.day(),
        MONTHS[date.month0() as usize],
        date.year()
    )
}

/// Parse a date or timestamp string and render it in Italian.
///
/// Timestamps with an explicit offset keep the calendar date of that
/// offset.
pub fn format_data_italiana(input: &str) -> Result<String, FormatError> {
    parse_date(input).map(format_data)
}

fn parse_date(input: &str) -> Result<NaiveDate, FormatError> {
    let input = input.trim();

    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        return Ok(date);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Ok(dt.date_naive());
    }
    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(input, fmt).ok())
        .map(|dt| dt.date())
        .ok_or_else(|| FormatError::InvalidDate(input.to_string()))
}
