//! Share expiration choices.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// The fixed set of expiration windows a share can be given.
///
/// Serialized as the number of minutes, which is what the API's
/// `expires_minutes` field carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum ExpirationOption {
    /// 5 minutes.
    FiveMinutes,
    /// 15 minutes.
    FifteenMinutes,
    /// 30 minutes, the server's own default for new shares.
    #[default]
    ThirtyMinutes,
    /// 1 hour.
    OneHour,
    /// 6 hours.
    SixHours,
    /// 12 hours.
    TwelveHours,
    /// 1 day, the longest window the server accepts.
    OneDay,
}

impl ExpirationOption {
    /// Every option, shortest first.
    pub const ALL: [Self; 7] = [
        Self::FiveMinutes,
        Self::FifteenMinutes,
        Self::ThirtyMinutes,
        Self::OneHour,
        Self::SixHours,
        Self::TwelveHours,
        Self::OneDay,
    ];

    /// Length of the window in minutes.
    pub fn minutes(self) -> u32 {
        match self {
            Self::FiveMinutes => 5,
            Self::FifteenMinutes => 15,
            Self::ThirtyMinutes => 30,
            Self::OneHour => 60,
            Self::SixHours => 360,
            Self::TwelveHours => 720,
            Self::OneDay => 1440,
        }
    }

    /// Look up the option for an exact number of minutes.
    pub fn from_minutes(minutes: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|o| o.minutes() == minutes)
    }

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            Self::FiveMinutes => "5 minutes",
            Self::FifteenMinutes => "15 minutes",
            Self::ThirtyMinutes => "30 minutes",
            Self::OneHour => "1 hour",
            Self::SixHours => "6 hours",
            Self::TwelveHours => "12 hours",
            Self::OneDay => "1 day",
        }
    }

    fn allowed_list() -> String {
        Self::ALL
            .iter()
            .map(|o| o.minutes().to_string())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for ExpirationOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl TryFrom<u32> for ExpirationOption {
    type Error = AppError;

    fn try_from(minutes: u32) -> Result<Self, Self::Error> {
        Self::from_minutes(minutes).ok_or_else(|| {
            AppError::validation(format!(
                "Invalid expiration of {minutes} minutes; allowed values are {}",
                Self::allowed_list()
            ))
        })
    }
}

impl From<ExpirationOption> for u32 {
    fn from(option: ExpirationOption) -> Self {
        option.minutes()
    }
}

impl FromStr for ExpirationOption {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let minutes: u32 = s.trim().parse().map_err(|_| {
            AppError::validation(format!(
                "Expiration must be a number of minutes ({}), got '{s}'",
                Self::allowed_list()
            ))
        })?;
        Self::try_from(minutes)
    }
}
