//! Parsing of CSS-like length strings and loose attribute values.

use std::fmt;

/// Errors produced while parsing unit strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnitError {
    /// The string is neither empty, `auto`, nor a number with an optional known unit.
    InvalidHeight(String),
}

impl fmt::Display for UnitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnitError::InvalidHeight(val) => write!(f, "Invalid height val = {}", val),
        }
    }
}

impl std::error::Error for UnitError {}

/// Result type for unit parsing.
pub type UnitResult<T> = Result<T, UnitError>;

/// Length unit accepted for cell heights and margins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LengthUnit {
    #[default]
    Px,
    Em,
    Rem,
    Vh,
    Vw,
    Percent,
    Cm,
    Mm,
}

impl LengthUnit {
    // `rem` must be tried before `em`.
    const SUFFIXES: [(&'static str, LengthUnit); 8] = [
        ("rem", LengthUnit::Rem),
        ("px", LengthUnit::Px),
        ("em", LengthUnit::Em),
        ("vh", LengthUnit::Vh),
        ("vw", LengthUnit::Vw),
        ("%", LengthUnit::Percent),
        ("cm", LengthUnit::Cm),
        ("mm", LengthUnit::Mm),
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LengthUnit::Px => "px",
            LengthUnit::Em => "em",
            LengthUnit::Rem => "rem",
            LengthUnit::Vh => "vh",
            LengthUnit::Vw => "vw",
            LengthUnit::Percent => "%",
            LengthUnit::Cm => "cm",
            LengthUnit::Mm => "mm",
        }
    }
}

impl fmt::Display for LengthUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A parsed height such as `70px` or `2.5rem`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Height {
    pub value: f64,
    pub unit: LengthUnit,
}

impl From<f64> for Height {
    fn from(value: f64) -> Self {
        Self {
            value,
            unit: LengthUnit::Px,
        }
    }
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

/// Accepts `12`, `-12`, `.5`, `1.5` and `-1.5`, but not `5.`, `-.5` or exponents.
fn is_number(s: &str) -> bool {
    if let Some(rest) = s.strip_prefix('-') {
        return match rest.split_once('.') {
            Some((int, frac)) => is_digits(int) && is_digits(frac),
            None => is_digits(rest),
        };
    }
    match s.split_once('.') {
        Some((int, frac)) => (int.is_empty() || is_digits(int)) && is_digits(frac),
        None => is_digits(s),
    }
}

/// Parse a height string. Empty and `auto` mean zero pixels; a bare number is pixels.
pub fn parse_height(val: &str) -> UnitResult<Height> {
    if val.is_empty() || val == "auto" {
        return Ok(Height::default());
    }
    let (number, unit) = LengthUnit::SUFFIXES
        .iter()
        .find_map(|(suffix, unit)| val.strip_suffix(suffix).map(|n| (n, *unit)))
        .unwrap_or((val, LengthUnit::Px));
    if !is_number(number) {
        return Err(UnitError::InvalidHeight(val.to_string()));
    }
    let value = number
        .parse::<f64>()
        .map_err(|_| UnitError::InvalidHeight(val.to_string()))?;
    Ok(Height { value, unit })
}

/// Loose truthiness for attribute strings: empty, `no`, `false` and `0` are false.
pub fn to_bool(v: &str) -> bool {
    let v = v.to_ascii_lowercase();
    !matches!(v.as_str(), "" | "no" | "false" | "0")
}

/// Numeric attribute value; empty or unparsable input yields `None`.
pub fn to_number(v: &str) -> Option<f64> {
    if v.is_empty() {
        return None;
    }
    v.trim().parse().ok()
}
