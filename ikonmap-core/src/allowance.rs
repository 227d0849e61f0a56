//! Day-allowance resolution for the two pass tiers.
//!
//! Raw allowance strings from the catalog ("7", "7 (shared)", "Unlimited*",
//! "N/A") are parsed once at ingestion into [`PassAllowance`]; everything
//! downstream works with the numeric [`DayLimit`].

use crate::resort::Resort;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Raw marker for "not included on this pass tier".
pub const NOT_ON_PASS: &str = "N/A";

const UNLIMITED_PREFIX: &str = "unlimited";
const SHARED_QUALIFIERS: [&str; 2] = ["shared", "combined"];

/// Pass tier selected for a trip evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PassType {
    #[default]
    Full,
    Base,
}

impl PassType {
    pub const ALL: [Self; 2] = [Self::Full, Self::Base];

    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Full => "full",
            Self::Base => "base",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Full => "Full Pass",
            Self::Base => "Base Pass",
        }
    }
}

impl fmt::Display for PassType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown pass type `{0}` (expected `full` or `base`)")]
pub struct ParsePassTypeError(pub String);

impl FromStr for PassType {
    type Err = ParsePassTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "full" => Ok(Self::Full),
            "base" => Ok(Self::Base),
            _ => Err(ParsePassTypeError(s.to_string())),
        }
    }
}

/// Numeric semantic of an allowance: a bounded day count or no cap at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayLimit {
    Days(u32),
    Unlimited,
}

impl DayLimit {
    #[must_use]
    pub const fn is_unlimited(self) -> bool {
        matches!(self, Self::Unlimited)
    }

    #[must_use]
    pub const fn days(self) -> Option<u32> {
        match self {
            Self::Days(days) => Some(days),
            Self::Unlimited => None,
        }
    }

    /// True when `used` is strictly above a finite limit.
    #[must_use]
    pub const fn exceeded_by(self, used: u32) -> bool {
        match self {
            Self::Days(limit) => used > limit,
            Self::Unlimited => false,
        }
    }

    /// Days left before the limit is reached; `None` when unlimited.
    #[must_use]
    pub const fn remaining(self, used: u32) -> Option<u32> {
        match self {
            Self::Days(limit) => Some(limit.saturating_sub(used)),
            Self::Unlimited => None,
        }
    }

    /// Float view of the limit, with `f64::INFINITY` for unlimited.
    #[must_use]
    pub fn as_f64(self) -> f64 {
        match self {
            Self::Days(days) => f64::from(days),
            Self::Unlimited => f64::INFINITY,
        }
    }
}

impl fmt::Display for DayLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Days(days) => write!(f, "{days}"),
            Self::Unlimited => f.write_str("\u{221E}"),
        }
    }
}

/// Parse a raw allowance string into its numeric semantic.
///
/// `""` and `"N/A"` yield zero days, anything whose lowercase form starts
/// with "unlimited" is uncapped, otherwise the leading decimal integer is
/// used and trailing qualifiers are ignored. Strings without a leading
/// integer degrade to zero days.
#[must_use]
pub fn parse_day_limit(raw: &str) -> DayLimit {
    if raw.is_empty() || raw == NOT_ON_PASS {
        return DayLimit::Days(0);
    }
    if raw.to_lowercase().starts_with(UNLIMITED_PREFIX) {
        return DayLimit::Unlimited;
    }
    let (digits, _) = split_leading_digits(raw);
    if digits.is_empty() {
        return DayLimit::Days(0);
    }
    DayLimit::Days(digits.parse().unwrap_or(u32::MAX))
}

fn split_leading_digits(raw: &str) -> (&str, &str) {
    let end = raw
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(raw.len());
    raw.split_at(end)
}

/// Which of the known catalog encodings a raw allowance string uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AllowanceShape {
    /// Plain integer such as "7".
    Bounded,
    /// Integer with a qualifier such as "7 (shared)" or "5*".
    Qualified,
    Unlimited,
    NotOnPass,
    /// Anything else; parses to zero days and is a catalog data bug.
    Unrecognised,
}

fn classify(raw: &str) -> AllowanceShape {
    if raw.is_empty() || raw == NOT_ON_PASS {
        return AllowanceShape::NotOnPass;
    }
    if raw.to_lowercase().starts_with(UNLIMITED_PREFIX) {
        return AllowanceShape::Unlimited;
    }
    let (digits, rest) = split_leading_digits(raw);
    if digits.is_empty() {
        return AllowanceShape::Unrecognised;
    }
    if rest.is_empty() {
        return AllowanceShape::Bounded;
    }
    let qualifier = rest
        .trim()
        .trim_start_matches('(')
        .trim_end_matches(')')
        .to_lowercase();
    if qualifier == "*" || SHARED_QUALIFIERS.contains(&qualifier.as_str()) {
        AllowanceShape::Qualified
    } else {
        AllowanceShape::Unrecognised
    }
}

/// An allowance as stored on a resort: the display string plus its parsed form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct PassAllowance {
    raw: String,
    limit: DayLimit,
    available: bool,
    shared: bool,
}

impl PassAllowance {
    #[must_use]
    pub fn parse(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let limit = parse_day_limit(&raw);
        let available = !(raw.is_empty() || raw == NOT_ON_PASS);
        let lowered = raw.to_lowercase();
        let shared = SHARED_QUALIFIERS.iter().any(|q| lowered.contains(q));
        Self {
            raw,
            limit,
            available,
            shared,
        }
    }

    #[must_use]
    pub fn not_on_pass() -> Self {
        Self::parse(NOT_ON_PASS)
    }

    #[must_use]
    pub fn raw(&self) -> &str {
        &self.raw
    }

    #[must_use]
    pub const fn limit(&self) -> DayLimit {
        self.limit
    }

    /// False only for "N/A" and the empty string.
    #[must_use]
    pub const fn is_available(&self) -> bool {
        self.available
    }

    /// Whether the raw string advertises a pooled ("shared"/"combined") allowance.
    #[must_use]
    pub const fn is_shared(&self) -> bool {
        self.shared
    }

    #[must_use]
    pub fn shape(&self) -> AllowanceShape {
        classify(&self.raw)
    }
}

impl From<String> for PassAllowance {
    fn from(raw: String) -> Self {
        Self::parse(raw)
    }
}

impl From<&str> for PassAllowance {
    fn from(raw: &str) -> Self {
        Self::parse(raw)
    }
}

impl From<PassAllowance> for String {
    fn from(allowance: PassAllowance) -> Self {
        allowance.raw
    }
}

impl fmt::Display for PassAllowance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Numeric allowance for `resort` on the selected tier.
#[must_use]
pub fn resort_allowance(resort: &Resort, pass: PassType) -> DayLimit {
    resort.pass_days(pass).limit()
}

#[must_use]
pub fn is_available_on_pass(resort: &Resort, pass: PassType) -> bool {
    resort.pass_days(pass).is_available()
}

/// Fill ratio for a day bar, capped at 100. `None` when there is no finite cap.
#[must_use]
pub fn usage_percent(used: u32, limit: DayLimit) -> Option<f64> {
    match limit {
        DayLimit::Unlimited => None,
        DayLimit::Days(0) => Some(if used > 0 { 100.0 } else { 0.0 }),
        DayLimit::Days(days) => Some((f64::from(used) / f64::from(days) * 100.0).min(100.0)),
    }
}
