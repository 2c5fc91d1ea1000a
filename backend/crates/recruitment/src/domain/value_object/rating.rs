//! Company ratings

use std::fmt;

pub const MIN_RATING: u8 = 1;
pub const MAX_RATING: u8 = 5;

/// Shown when a company has no evaluations
pub const RATING_UNAVAILABLE: &str = "Não disponível";

/// Integer score in `1..=5`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Rating(u8);

impl Rating {
    pub fn new(value: i64) -> Result<Self, String> {
        if (MIN_RATING as i64..=MAX_RATING as i64).contains(&value) {
            Ok(Self(value as u8))
        } else {
            Err(format!(
                "A nota deve ser um número inteiro entre {MIN_RATING} e {MAX_RATING}."
            ))
        }
    }

    pub fn parse(raw: &str) -> Result<Self, String> {
        match raw.trim().parse::<i64>() {
            Ok(value) => Self::new(value),
            Err(_) => Self::new(0),
        }
    }

    pub fn value(&self) -> u8 {
        self.0
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Mean of a company's ratings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RatingSummary {
    pub count: u64,
    pub sum: u64,
}

impl RatingSummary {
    pub fn from_ratings<'a>(ratings: impl IntoIterator<Item = &'a Rating>) -> Self {
        ratings.into_iter().fold(Self::default(), |acc, r| Self {
            count: acc.count + 1,
            sum: acc.sum + r.value() as u64,
        })
    }

    /// Mean in hundredths, rounded half up; `None` without ratings
    pub fn mean_hundredths(&self) -> Option<u64> {
        if self.count == 0 {
            return None;
        }
        Some((self.sum * 200 + self.count) / (self.count * 2))
    }

    /// `"4.33"`, or [`RATING_UNAVAILABLE`]
    pub fn display(&self) -> String {
        match self.mean_hundredths() {
            Some(h) => format!("{}.{:02}", h / 100, h % 100),
            None => RATING_UNAVAILABLE.to_string(),
        }
    }
}
