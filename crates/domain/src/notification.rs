use crate::shared::entity::{Entity, ID};
use chrono::{DateTime, Local, NaiveDate, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};
use thiserror::Error;

const DAY_MILLIS: i64 = 24 * 60 * 60 * 1000;

/// Which reminder a task is owed on a given day. The categories are
/// mutually exclusive: a task is classified into at most one of them
/// per engine run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReminderCategory {
    /// Due date is exactly tomorrow relative to the reference day
    DueSoon,
    /// Due date equals the reference day
    DueToday,
    /// Due date is strictly before the reference day
    Overdue,
}

impl ReminderCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DueSoon => "due_soon",
            Self::DueToday => "due_today",
            Self::Overdue => "overdue",
        }
    }
}

impl Display for ReminderCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Error, Debug)]
#[error("Invalid reminder category: {0}")]
pub struct InvalidReminderCategoryError(String);

impl FromStr for ReminderCategory {
    type Err = InvalidReminderCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "due_soon" => Ok(Self::DueSoon),
            "due_today" => Ok(Self::DueToday),
            "overdue" => Ok(Self::Overdue),
            _ => Err(InvalidReminderCategoryError(s.to_string())),
        }
    }
}

/// Delivery mechanism for a reminder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    Email,
    Telegram,
}

impl Channel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Telegram => "telegram",
        }
    }
}

impl Display for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Error, Debug)]
#[error("Invalid notification channel: {0}")]
pub struct InvalidChannelError(String);

impl FromStr for Channel {
    type Err = InvalidChannelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "email" => Ok(Self::Email),
            "telegram" => Ok(Self::Telegram),
            _ => Err(InvalidChannelError(s.to_string())),
        }
    }
}

/// Durable record of one delivered reminder. Written exactly once per
/// successful send and never updated or deleted afterwards; the dispatch
/// log uses it to suppress duplicate sends within the same calendar day.
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub id: ID,
    pub user_id: ID,
    pub task_id: ID,
    pub category: ReminderCategory,
    pub channel: Channel,
    /// Timestamp in millis at which the channel reported success
    pub sent_at: i64,
}

impl Notification {
    pub fn new(
        user_id: ID,
        task_id: ID,
        category: ReminderCategory,
        channel: Channel,
        sent_at: i64,
    ) -> Self {
        Self {
            id: Default::default(),
            user_id,
            task_id,
            category,
            channel,
            sent_at,
        }
    }
}

impl Entity<ID> for Notification {
    fn id(&self) -> ID {
        self.id.clone()
    }
}

/// Classifies a due date against the reference day of the current run.
///
/// The ranges are exclusive by construction: a delta of zero whole days
/// is `DueToday` and nothing else, so a task never lands in two
/// categories on the same day.
pub fn classify_due_date(due_date: NaiveDate, reference_date: NaiveDate) -> Option<ReminderCategory> {
    let delta = (due_date - reference_date).num_days();
    if delta < 0 {
        Some(ReminderCategory::Overdue)
    } else if delta == 0 {
        Some(ReminderCategory::DueToday)
    } else if delta == 1 {
        Some(ReminderCategory::DueSoon)
    } else {
        None
    }
}

/// Calendar date of a millis timestamp in the server's local time zone.
/// Day boundaries are local on purpose, matching how "already sent today"
/// has always been computed; see the dispatch log.
pub fn local_date_of_millis(ts_millis: i64) -> NaiveDate {
    let secs = ts_millis.div_euclid(1000);
    let nanos = (ts_millis.rem_euclid(1000) * 1_000_000) as u32;
    let utc: DateTime<Utc> = DateTime::from_timestamp(secs, nanos).unwrap_or_default();
    utc.with_timezone(&Local).date_naive()
}

/// Millis timestamp of local midnight at the start of `date`
pub fn local_date_start_millis(date: NaiveDate) -> i64 {
    Local
        .from_local_datetime(&date.and_time(NaiveTime::MIN))
        .earliest()
        .map(|dt| dt.timestamp_millis())
        .unwrap_or_default()
}

/// Bounds `[start, end)` in millis of the local calendar day containing
/// `ts_millis`.
pub fn local_day_bounds_millis(ts_millis: i64) -> (i64, i64) {
    let start = local_date_start_millis(local_date_of_millis(ts_millis));
    (start, start + DAY_MILLIS)
}
