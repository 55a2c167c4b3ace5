use serde::{Deserialize, Serialize};
use tally_reminders_domain::{Frequency, ReminderSettings};

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReminderSettingsDTO {
    pub enabled: bool,
    /// "HH:MM" local time, absent when the stored value is unusable
    pub time: Option<String>,
    pub frequency: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_days: Option<Vec<u8>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reminder_text: Option<String>,
    pub timezone: String,
}

impl ReminderSettingsDTO {
    pub fn new(settings: &ReminderSettings) -> Self {
        let custom_days = match &settings.frequency {
            Frequency::Custom(days) => Some(days.iter().copied().collect()),
            _ => None,
        };
        Self {
            enabled: settings.enabled,
            time: settings.time.map(|t| t.to_string()),
            frequency: settings.frequency.tag().to_string(),
            custom_days,
            reminder_text: settings.reminder_text.clone(),
            timezone: settings.timezone.clone(),
        }
    }
}
