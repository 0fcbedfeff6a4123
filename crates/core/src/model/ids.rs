use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

/// Number of day buckets the vocabulary list is split into.
pub const DAY_COUNT: u8 = 30;

/// Errors raised when building a `Day`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DayError {
    #[error("day must be between 1 and {DAY_COUNT}, got {0}")]
    OutOfRange(u64),

    #[error("failed to parse day from {0:?}")]
    Parse(String),
}

/// A day bucket, always in `1..=DAY_COUNT`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Day(u8);

impl Day {
    pub const FIRST: Day = Day(1);
    pub const LAST: Day = Day(DAY_COUNT);

    /// Creates a `Day` from its 1-based number.
    ///
    /// # Errors
    ///
    /// Returns `DayError::OutOfRange` outside `1..=30`.
    pub fn new(value: u8) -> Result<Self, DayError> {
        if (1..=DAY_COUNT).contains(&value) {
            Ok(Self(value))
        } else {
            Err(DayError::OutOfRange(u64::from(value)))
        }
    }

    /// Creates a `Day` from a zero-based bucket index.
    ///
    /// # Errors
    ///
    /// Returns `DayError::OutOfRange` if the index is past the last bucket.
    pub fn from_index(index: usize) -> Result<Self, DayError> {
        let value = index
            .checked_add(1)
            .and_then(|v| u8::try_from(v).ok())
            .ok_or(DayError::OutOfRange((index as u64).saturating_add(1)))?;
        Self::new(value)
    }

    /// Returns the 1-based day number.
    #[must_use]
    pub fn value(self) -> u8 {
        self.0
    }

    /// Returns the zero-based bucket index.
    #[must_use]
    pub fn index(self) -> usize {
        usize::from(self.0 - 1)
    }

    /// Iterates every day in order.
    pub fn all() -> impl Iterator<Item = Day> {
        (1..=DAY_COUNT).map(Day)
    }
}

impl Default for Day {
    fn default() -> Self {
        Self::FIRST
    }
}

impl fmt::Debug for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Day({})", self.0)
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Day {
    type Err = DayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.trim();
        let value = raw
            .parse::<u64>()
            .map_err(|_| DayError::Parse(raw.to_string()))?;
        let value = u8::try_from(value).map_err(|_| DayError::OutOfRange(value))?;
        Day::new(value)
    }
}

/// 1-based position of a question inside the active quiz set.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct QuestionNumber(usize);

impl QuestionNumber {
    /// Returns `None` for zero; question numbers start at 1.
    #[must_use]
    pub fn new(value: usize) -> Option<Self> {
        (value > 0).then_some(Self(value))
    }

    /// Question number for a zero-based position.
    #[must_use]
    pub fn from_index(index: usize) -> Self {
        Self(index.saturating_add(1))
    }

    #[must_use]
    pub fn value(self) -> usize {
        self.0
    }

    #[must_use]
    pub fn index(self) -> usize {
        self.0 - 1
    }
}

impl fmt::Debug for QuestionNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Q{}", self.0)
    }
}

impl fmt::Display for QuestionNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque handle identifying one learner's quiz session.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionToken(Uuid);

impl SessionToken {
    /// Generates a fresh random token.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    #[must_use]
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SessionToken({})", self.0)
    }
}

impl fmt::Display for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for SessionToken {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn day_rejects_zero_and_thirty_one() {
        assert_eq!(Day::new(0), Err(DayError::OutOfRange(0)));
        assert_eq!(Day::new(31), Err(DayError::OutOfRange(31)));
        assert_eq!(Day::new(30).map(Day::value), Ok(30));
    }

    #[test]
    fn day_parses_trimmed_input() {
        assert_eq!(" 7 ".parse::<Day>(), Ok(Day::new(7).unwrap()));
        assert_eq!("300".parse::<Day>(), Err(DayError::OutOfRange(300)));
        assert!(matches!("seven".parse::<Day>(), Err(DayError::Parse(_))));
    }

    #[test]
    fn day_index_round_trips() {
        for day in Day::all() {
            assert_eq!(Day::from_index(day.index()), Ok(day));
        }
        assert_eq!(Day::all().count(), usize::from(DAY_COUNT));
        assert!(Day::from_index(30).is_err());
    }

    #[test]
    fn question_numbers_are_one_based() {
        assert!(QuestionNumber::new(0).is_none());
        let first = QuestionNumber::from_index(0);
        assert_eq!(first.value(), 1);
        assert_eq!(first.index(), 0);
        assert_eq!(format!("{first:?}"), "Q1");
    }

    #[test]
    fn session_tokens_parse_back() {
        let token = SessionToken::generate();
        let parsed: SessionToken = token.to_string().parse().unwrap();
        assert_eq!(parsed, token);
        assert_ne!(SessionToken::generate(), token);
    }
}
