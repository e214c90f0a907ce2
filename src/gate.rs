use chrono::{DateTime, Datelike, Duration, Timelike, Utc, Weekday};
use chrono_tz::Tz;

use crate::types::DigestMode;

/// Schedule knobs for the send-eligibility gate and the day
/// classifier. Hours are in the configured local civil time.
#[derive(Debug, Clone)]
pub struct ScheduleConfig {
    pub no_send_weekday: Weekday,
    pub weekly_digest_weekday: Weekday,
    pub morning_window_start_hour: u32,
    pub morning_window_end_hour: u32,
    pub local_timezone: Tz,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            no_send_weekday: Weekday::Sat,
            weekly_digest_weekday: Weekday::Sun,
            morning_window_start_hour: 8,
            morning_window_end_hour: 10,
            local_timezone: chrono_tz::US::Pacific,
        }
    }
}

/// Coarse once-per-day throttle biased toward a morning delivery
/// slot. The 24-hour fallback keeps the worker usable from arbitrary
/// cron ticks without a precise scheduler.
///
/// Rules, in order: a first-ever run is always eligible; nothing goes
/// out on the no-send weekday; otherwise a send is due either inside
/// the morning window on a new local calendar day, or once a full day
/// has passed since the last send.
pub fn is_sendable(
    now: DateTime<Utc>,
    last_sent: Option<DateTime<Utc>>,
    config: &ScheduleConfig,
) -> bool {
    let Some(last_sent) = last_sent else {
        return true;
    };

    let local_now = now.with_timezone(&config.local_timezone);
    if local_now.weekday() == config.no_send_weekday {
        return false;
    }

    let local_last = last_sent.with_timezone(&config.local_timezone);
    let in_morning_window = (config.morning_window_start_hour..=config.morning_window_end_hour)
        .contains(&local_now.hour());

    (in_morning_window && local_last.date_naive() != local_now.date_naive())
        || now - last_sent >= Duration::hours(24)
}

/// Classify the run by local weekday: the weekly-digest day gets the
/// unfiltered digest, any other day filters to that weekday.
pub fn digest_mode(now: DateTime<Utc>, config: &ScheduleConfig) -> DigestMode {
    let weekday = now.with_timezone(&config.local_timezone).weekday();
    if weekday == config.weekly_digest_weekday {
        DigestMode::Weekly
    } else {
        DigestMode::Daily(weekday)
    }
}
