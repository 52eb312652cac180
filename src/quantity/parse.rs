//! Textual form of bounded quantities.
//!
//! Grammar: `"<number> <unit>"`, optionally followed by `", [<lower>;<upper>]"`.
//! The unit part may be empty (dimensionless). `Display` on
//! [`BoundedQuantity`] writes the same grammar, so parse/format round-trips.

use super::bounded::BoundedQuantity;
use super::error::ParseError;
use super::units::Unit;
use super::value::Quantity;

pub fn parse_quantity(s: &str) -> Result<BoundedQuantity, ParseError> {
    match s.matches(',').count() {
        0 => {
            if s.contains('[') || s.contains(']') {
                return Err(ParseError::MissingComma(s.to_string()));
            }
            Ok(BoundedQuantity::new(parse_mean(s)?))
        }
        1 => {
            let (mean_part, bounds_part) = s.split_once(',').unwrap();
            let mean = parse_mean(mean_part)?;
            let bounds = parse_bounds(bounds_part)?;
            Ok(BoundedQuantity::with_bounds(mean, bounds))
        }
        _ => Err(ParseError::MultipleCommas(s.to_string())),
    }
}

fn parse_mean(s: &str) -> Result<Quantity, ParseError> {
    let s = s.trim();
    let (number, unit_text) = match s.split_once(char::is_whitespace) {
        Some((n, u)) => (n, u.trim()),
        None => (s, ""),
    };
    let magnitude: f64 = number
        .parse()
        .map_err(|_| ParseError::InvalidNumber(number.to_string()))?;
    let unit = Unit::parse(unit_text)?;
    Ok(Quantity::new(magnitude, unit))
}

fn parse_bounds(s: &str) -> Result<(f64, f64), ParseError> {
    let trimmed = s.trim();
    let inner = trimmed
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
        .ok_or_else(|| ParseError::MalformedBounds(trimmed.to_string()))?;
    let (lo, hi) = inner
        .split_once(';')
        .ok_or_else(|| ParseError::MalformedBounds(trimmed.to_string()))?;
    let lower: f64 = lo
        .trim()
        .parse()
        .map_err(|_| ParseError::InvalidNumber(lo.trim().to_string()))?;
    let upper: f64 = hi
        .trim()
        .parse()
        .map_err(|_| ParseError::InvalidNumber(hi.trim().to_string()))?;
    Ok((lower, upper))
}
