use crate::settings::{ReminderSettings, ReminderTime};
use chrono::{DateTime, Datelike, NaiveDate, Timelike, Utc};
use chrono_tz::Tz;

/// Half width of the eligibility window around the configured reminder time
pub const WINDOW_MINUTES: i64 = 5;

/// Weekday of the given local datetime where 0 is Sunday and 6 is Saturday
pub fn weekday_index(local: &DateTime<Tz>) -> u8 {
    local.weekday().num_days_from_sunday() as u8
}

/// Whether the local minute of day is within `WINDOW_MINUTES` of `target`.
///
/// The window does not wrap around midnight: the day check runs on the local
/// calendar day, so 00:02 never counts towards a 23:58 reminder of the day before.
pub fn within_window(local_minute_of_day: i64, target: ReminderTime) -> bool {
    (local_minute_of_day - target.minutes_of_day()).abs() <= WINDOW_MINUTES
}

/// The recipient's local calendar date at `now`, `None` if the timezone is invalid
pub fn local_date(settings: &ReminderSettings, now: DateTime<Utc>) -> Option<NaiveDate> {
    settings.tz().map(|tz| now.with_timezone(&tz).date_naive())
}

/// Decides if a reminder with the given `settings` is due at `now`.
///
/// Pure function of its inputs. Every configuration problem (disabled,
/// missing time, unknown frequency, invalid timezone) evaluates to `false`.
pub fn is_eligible(settings: &ReminderSettings, now: DateTime<Utc>) -> bool {
    if !settings.enabled {
        return false;
    }
    let target = match settings.time {
        Some(time) => time,
        None => return false,
    };
    let tz = match settings.tz() {
        Some(tz) => tz,
        None => return false,
    };

    let local = now.with_timezone(&tz);
    if !settings.frequency.matches_weekday(weekday_index(&local)) {
        return false;
    }

    let local_minute_of_day = i64::from(local.hour()) * 60 + i64::from(local.minute());
    within_window(local_minute_of_day, target)
}
