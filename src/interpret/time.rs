//! Reminder time extraction.
//!
//! Two strategies run in order and the first hit wins:
//!
//! 1. [`parse_phrase`] understands relative offsets (`in 5 minutes`), day
//!    anchors with an optional clock time (`tomorrow at 3pm`,
//!    `next tuesday`), and standalone clock times that are not of the
//!    literal `H:MM am|pm` form (`at 10pm`, `at 17:30`, `at noon`).
//! 2. [`parse_literal_clock`] handles exactly `at H:MM am|pm`.
//!
//! Bare clock times from either strategy, and times anchored to `today` or
//! `tonight`, resolve to today and roll over to tomorrow when they are at or
//! before `now`. Anything out of range yields
//! `None` rather than a clamped or partial timestamp.

use std::sync::LazyLock;

use chrono::{
    DateTime, Datelike, Duration, FixedOffset, NaiveDate, NaiveTime, TimeZone, Timelike, Utc, Weekday,
};
use regex::{Captures, Regex};

static RELATIVE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\bin\s+(\d+|an?|one)\s+(seconds?|secs?|minutes?|mins?|hours?|hrs?|days?|weeks?)\b",
    )
    .expect("relative offset pattern")
});

static DAY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:(today|tonight|tomorrow)|(?:(?:next|on|this)\s+)?(monday|tuesday|wednesday|thursday|friday|saturday|sunday))\b",
    )
    .expect("day anchor pattern")
});

static CLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\bat\s+(?:(noon|midnight)|(\d{1,2})(?::(\d{2}))?(?:\s*(am|pm))?)\b")
        .expect("clock pattern")
});

static LITERAL_CLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\bat\s+(\d{1,2}):(\d{2})\s*(am|pm)\b").expect("literal clock pattern")
});

/// Hour used when a day is named without a clock time.
const DEFAULT_HOUR: u32 = 9;
/// Hour used for a bare `tonight`.
const TONIGHT_HOUR: u32 = 20;

/// Extracts an absolute reminder time from `text`, anchored at `now` in `offset`.
#[must_use]
pub fn extract_time(text: &str, now: DateTime<Utc>, offset: FixedOffset) -> Option<DateTime<Utc>> {
    parse_phrase(text, now, offset).or_else(|| parse_literal_clock(text, now, offset))
}

/// Natural-language phrase strategy.
#[must_use]
pub fn parse_phrase(text: &str, now: DateTime<Utc>, offset: FixedOffset) -> Option<DateTime<Utc>> {
    if let Some(caps) = RELATIVE.captures(text) {
        return relative(&caps, now);
    }

    let clock = CLOCK.captures(text).map(|caps| clock_time(&caps));

    if let Some(caps) = DAY.captures(text) {
        let today = now.with_timezone(&offset).date_naive();
        let (date, tonight) = match caps.get(1).map(|m| m.as_str().to_ascii_lowercase()) {
            Some(word) if word == "tomorrow" => (today.succ_opt()?, false),
            Some(word) => (today, word == "tonight"),
            None => (next_weekday(today, weekday(caps.get(2)?.as_str())?)?, false),
        };
        let time = match clock {
            Some(parsed) => {
                let (time, form) = parsed?;
                if tonight && form == ClockForm::Plain && (1..=12).contains(&time.hour()) {
                    time + Duration::hours(12)
                } else {
                    time
                }
            }
            None => NaiveTime::from_hms_opt(if tonight { TONIGHT_HOUR } else { DEFAULT_HOUR }, 0, 0)?,
        };
        if date == today {
            return next_occurrence(time, now, offset);
        }
        return local(offset, date, time);
    }

    match clock {
        Some(Some((time, ClockForm::Meridiem | ClockForm::Plain))) => next_occurrence(time, now, offset),
        _ => None,
    }
}

/// Literal `at H:MM am|pm` strategy.
#[must_use]
pub fn parse_literal_clock(
    text: &str,
    now: DateTime<Utc>,
    offset: FixedOffset,
) -> Option<DateTime<Utc>> {
    let caps = LITERAL_CLOCK.captures(text)?;
    let hour: u32 = caps[1].parse().ok()?;
    let minute: u32 = caps[2].parse().ok()?;
    let time = twelve_hour(hour, minute, &caps[3])?;
    next_occurrence(time, now, offset)
}

/// How a clock time was written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ClockForm {
    /// `H:MM am|pm`, left to the fallback unless a day is named.
    Literal,
    /// An hour with `am`/`pm`, or `noon`/`midnight`.
    Meridiem,
    /// `H:MM` without `am`/`pm`.
    Plain,
}

fn clock_time(caps: &Captures<'_>) -> Option<(NaiveTime, ClockForm)> {
    if let Some(word) = caps.get(1) {
        let hour = if word.as_str().eq_ignore_ascii_case("noon") { 12 } else { 0 };
        return Some((NaiveTime::from_hms_opt(hour, 0, 0)?, ClockForm::Meridiem));
    }
    let hour: u32 = caps.get(2)?.as_str().parse().ok()?;
    let minute = caps.get(3).map(|m| m.as_str().parse::<u32>()).transpose().ok()?;
    match (minute, caps.get(4)) {
        (Some(minute), Some(meridiem)) => {
            Some((twelve_hour(hour, minute, meridiem.as_str())?, ClockForm::Literal))
        }
        (None, Some(meridiem)) => {
            Some((twelve_hour(hour, 0, meridiem.as_str())?, ClockForm::Meridiem))
        }
        (Some(minute), None) => Some((NaiveTime::from_hms_opt(hour, minute, 0)?, ClockForm::Plain)),
        // "at 5" is ambiguous between morning and evening.
        (None, None) => None,
    }
}

fn twelve_hour(hour: u32, minute: u32, meridiem: &str) -> Option<NaiveTime> {
    if !(1..=12).contains(&hour) {
        return None;
    }
    let pm = meridiem.eq_ignore_ascii_case("pm");
    let hour = hour % 12 + if pm { 12 } else { 0 };
    NaiveTime::from_hms_opt(hour, minute, 0)
}

fn relative(caps: &Captures<'_>, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
    let amount: i64 = match caps[1].to_ascii_lowercase().as_str() {
        "a" | "an" | "one" => 1,
        digits => digits.parse().ok()?,
    };
    let unit = caps[2].to_ascii_lowercase();
    let seconds_per_unit = match unit.trim_end_matches('s') {
        "second" | "sec" => 1,
        "minute" | "min" => 60,
        "hour" | "hr" => 3_600,
        "day" => 86_400,
        "week" => 604_800,
        _ => return None,
    };
    let delta = Duration::try_seconds(amount.checked_mul(seconds_per_unit)?)?;
    now.checked_add_signed(delta)
}

fn weekday(name: &str) -> Option<Weekday> {
    match name.to_ascii_lowercase().as_str() {
        "monday" => Some(Weekday::Mon),
        "tuesday" => Some(Weekday::Tue),
        "wednesday" => Some(Weekday::Wed),
        "thursday" => Some(Weekday::Thu),
        "friday" => Some(Weekday::Fri),
        "saturday" => Some(Weekday::Sat),
        "sunday" => Some(Weekday::Sun),
        _ => None,
    }
}

/// Next date strictly after `today` falling on `target`.
fn next_weekday(today: NaiveDate, target: Weekday) -> Option<NaiveDate> {
    let current = today.weekday().num_days_from_monday();
    let wanted = target.num_days_from_monday();
    let ahead = match (wanted + 7 - current) % 7 {
        0 => 7,
        n => n,
    };
    today.checked_add_signed(Duration::days(i64::from(ahead)))
}

fn local(offset: FixedOffset, date: NaiveDate, time: NaiveTime) -> Option<DateTime<Utc>> {
    offset
        .from_local_datetime(&date.and_time(time))
        .single()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Today at `time`, or tomorrow if that is not after `now`.
fn next_occurrence(time: NaiveTime, now: DateTime<Utc>, offset: FixedOffset) -> Option<DateTime<Utc>> {
    let today = now.with_timezone(&offset).date_naive();
    let candidate = local(offset, today, time)?;
    if candidate <= now {
        local(offset, today.succ_opt()?, time)
    } else {
        Some(candidate)
    }
}
