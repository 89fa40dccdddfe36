use crate::error::DurationError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Unit suffix of a trigger interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeUnit {
    Milliseconds,
    Seconds,
    Minutes,
    Hours,
}

impl TimeUnit {
    pub fn suffix(&self) -> &'static str {
        match self {
            TimeUnit::Milliseconds => "ms",
            TimeUnit::Seconds => "s",
            TimeUnit::Minutes => "m",
            TimeUnit::Hours => "h",
        }
    }

    fn from_suffix(suffix: &str) -> Option<Self> {
        match suffix {
            "ms" => Some(TimeUnit::Milliseconds),
            "s" => Some(TimeUnit::Seconds),
            "m" => Some(TimeUnit::Minutes),
            "h" => Some(TimeUnit::Hours),
            _ => None,
        }
    }
}

/// The `ON EVERY` interval of an action, kept in the unit the user wrote it in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Duration {
    amount: u64,
    unit: TimeUnit,
}

impl Duration {
    /// Returns `None` for a zero amount.
    pub fn new(amount: u64, unit: TimeUnit) -> Option<Self> {
        (amount > 0).then_some(Self { amount, unit })
    }

    pub fn seconds(amount: u64) -> Option<Self> {
        Self::new(amount, TimeUnit::Seconds)
    }

    pub fn amount(&self) -> u64 {
        self.amount
    }

    pub fn unit(&self) -> TimeUnit {
        self.unit
    }

    /// Converts to a std duration, saturating on overflow.
    pub fn as_std(&self) -> std::time::Duration {
        let millis = match self.unit {
            TimeUnit::Milliseconds => self.amount,
            TimeUnit::Seconds => self.amount.saturating_mul(1_000),
            TimeUnit::Minutes => self.amount.saturating_mul(60_000),
            TimeUnit::Hours => self.amount.saturating_mul(3_600_000),
        };
        std::time::Duration::from_millis(millis)
    }
}

impl Default for Duration {
    fn default() -> Self {
        Self {
            amount: 15,
            unit: TimeUnit::Seconds,
        }
    }
}

impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.amount, self.unit.suffix())
    }
}

/// Accepts `15s`, `500ms`, `5m`, `1h`. A bare number is read as seconds, which is
/// what numeric editor fields produce.
impl FromStr for Duration {
    type Err = DurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        let split = text
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(text.len());
        let (digits, suffix) = text.split_at(split);

        if digits.is_empty() {
            return Err(DurationError::MissingAmount(text.to_string()));
        }
        let amount: u64 = digits
            .parse()
            .map_err(|_| DurationError::Overflow(text.to_string()))?;

        let unit = if suffix.is_empty() {
            TimeUnit::Seconds
        } else {
            TimeUnit::from_suffix(suffix).ok_or_else(|| DurationError::UnknownUnit {
                unit: suffix.to_string(),
            })?
        };

        Duration::new(amount, unit).ok_or(DurationError::Zero)
    }
}

impl Serialize for Duration {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Duration {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}
