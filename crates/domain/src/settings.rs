use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::{collections::BTreeSet, fmt::Display, str::FromStr};
use thiserror::Error;

/// Local wall clock time at which a reminder should fire
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReminderTime {
    pub hour: u8,
    pub minute: u8,
}

impl ReminderTime {
    pub fn new(hour: u8, minute: u8) -> Option<Self> {
        if hour <= 23 && minute <= 59 {
            Some(Self { hour, minute })
        } else {
            None
        }
    }

    pub fn minutes_of_day(&self) -> i64 {
        i64::from(self.hour) * 60 + i64::from(self.minute)
    }
}

impl FromStr for ReminderTime {
    type Err = InvalidSettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || InvalidSettingsError::Time(s.to_string());
        let mut parts = s.trim().splitn(2, ':');
        let hour = parts
            .next()
            .and_then(|h| h.parse::<u8>().ok())
            .ok_or_else(invalid)?;
        let minute = parts
            .next()
            .filter(|m| m.len() == 2)
            .and_then(|m| m.parse::<u8>().ok())
            .ok_or_else(invalid)?;
        Self::new(hour, minute).ok_or_else(invalid)
    }
}

impl Display for ReminderTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

/// On which local weekdays a reminder fires. Weekday indices go from
/// 0 (Sunday) to 6 (Saturday).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Frequency {
    Daily,
    Weekdays,
    Weekends,
    Custom(BTreeSet<u8>),
    /// Tag that this version does not understand. Never eligible.
    Unknown(String),
}

impl Frequency {
    pub fn from_tag(tag: &str, custom_days: Option<Vec<u8>>) -> Self {
        match tag.to_ascii_lowercase().as_str() {
            "daily" => Self::Daily,
            "weekdays" => Self::Weekdays,
            "weekends" => Self::Weekends,
            "custom" => Self::Custom(custom_days.unwrap_or_default().into_iter().collect()),
            _ => Self::Unknown(tag.to_string()),
        }
    }

    pub fn tag(&self) -> &str {
        match self {
            Self::Daily => "daily",
            Self::Weekdays => "weekdays",
            Self::Weekends => "weekends",
            Self::Custom(_) => "custom",
            Self::Unknown(tag) => tag,
        }
    }

    pub fn matches_weekday(&self, weekday: u8) -> bool {
        match self {
            Self::Daily => true,
            Self::Weekdays => (1..=5).contains(&weekday),
            Self::Weekends => weekday == 0 || weekday == 6,
            Self::Custom(days) => days.contains(&weekday),
            Self::Unknown(_) => false,
        }
    }
}

impl Default for Frequency {
    fn default() -> Self {
        Self::Daily
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum InvalidSettingsError {
    #[error("Invalid time: `{0}`, expected HH:MM between 00:00 and 23:59")]
    Time(String),
    #[error("Reminder time is missing")]
    MissingTime,
    #[error("Invalid timezone: `{0}`, must be a valid IANA Timezone string")]
    Timezone(String),
    #[error("Unknown frequency: `{0}`, expected one of daily, weekdays, weekends or custom")]
    Frequency(String),
    #[error("Invalid custom day: {0}, must be between 0 (Sunday) and 6 (Saturday)")]
    CustomDay(u8),
}

/// The reminder configuration of one user. Owned by the registry, the
/// dispatch core only reads it.
///
/// Deserialization is tolerant: a malformed time becomes `None` and an
/// unrecognized frequency becomes `Frequency::Unknown`, both of which make the
/// recipient ineligible instead of failing the whole registry read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawReminderSettings", into = "RawReminderSettings")]
pub struct ReminderSettings {
    pub enabled: bool,
    pub time: Option<ReminderTime>,
    pub frequency: Frequency,
    pub reminder_text: Option<String>,
    pub timezone: String,
}

impl ReminderSettings {
    pub fn new(time: ReminderTime, frequency: Frequency, timezone: &str) -> Self {
        Self {
            enabled: true,
            time: Some(time),
            frequency,
            reminder_text: None,
            timezone: timezone.to_string(),
        }
    }

    pub fn tz(&self) -> Option<Tz> {
        self.timezone.parse::<Tz>().ok()
    }

    /// Strict check used by the settings write endpoint
    pub fn validate(&self) -> Result<(), InvalidSettingsError> {
        if self.time.is_none() {
            return Err(InvalidSettingsError::MissingTime);
        }
        if self.tz().is_none() {
            return Err(InvalidSettingsError::Timezone(self.timezone.clone()));
        }
        match &self.frequency {
            Frequency::Unknown(tag) => Err(InvalidSettingsError::Frequency(tag.clone())),
            Frequency::Custom(days) => match days.iter().find(|d| **d > 6) {
                Some(day) => Err(InvalidSettingsError::CustomDay(*day)),
                None => Ok(()),
            },
            _ => Ok(()),
        }
    }
}

impl Default for ReminderSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            time: ReminderTime::new(20, 0),
            frequency: Frequency::Daily,
            reminder_text: None,
            timezone: "UTC".into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawReminderSettings {
    #[serde(default)]
    enabled: bool,
    #[serde(default)]
    time: Option<String>,
    #[serde(default = "default_frequency_tag")]
    frequency: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    custom_days: Option<Vec<u8>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    reminder_text: Option<String>,
    #[serde(default = "default_timezone")]
    timezone: String,
}

fn default_frequency_tag() -> String {
    "daily".into()
}

fn default_timezone() -> String {
    "UTC".into()
}

impl From<RawReminderSettings> for ReminderSettings {
    fn from(raw: RawReminderSettings) -> Self {
        Self {
            enabled: raw.enabled,
            time: raw.time.and_then(|t| t.parse::<ReminderTime>().ok()),
            frequency: Frequency::from_tag(&raw.frequency, raw.custom_days),
            reminder_text: raw.reminder_text,
            timezone: raw.timezone,
        }
    }
}

impl From<ReminderSettings> for RawReminderSettings {
    fn from(settings: ReminderSettings) -> Self {
        let custom_days = match &settings.frequency {
            Frequency::Custom(days) => Some(days.iter().copied().collect()),
            _ => None,
        };
        Self {
            enabled: settings.enabled,
            time: settings.time.map(|t| t.to_string()),
            frequency: settings.frequency.tag().to_string(),
            custom_days,
            reminder_text: settings.reminder_text,
            timezone: settings.timezone,
        }
    }
}
