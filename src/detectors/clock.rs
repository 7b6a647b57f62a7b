use chrono::{DateTime, Utc};

/// Source of "now" for relative time descriptions.
///
/// `System` reads the wall clock; `Fixed` pins it so detection output is
/// reproducible in tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Clock {
    #[default]
    System,
    Fixed(DateTime<Utc>),
}

impl Clock {
    pub fn system() -> Self {
        Self::System
    }

    pub fn fixed(at: DateTime<Utc>) -> Self {
        Self::Fixed(at)
    }

    /// Pin the clock at the given Unix time in seconds.
    pub fn fixed_at_secs(secs: i64) -> Self {
        Self::Fixed(DateTime::from_timestamp(secs, 0).unwrap_or_default())
    }

    pub fn now(&self) -> DateTime<Utc> {
        match self {
            Self::System => Utc::now(),
            Self::Fixed(at) => *at,
        }
    }
}
