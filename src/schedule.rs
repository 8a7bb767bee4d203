// Timestamps for a new tender. All times are local wall-clock values
// without a timezone; the API expects them as `YYYY-MM-DD HH:MM`.

use chrono::{Days, Duration, NaiveDateTime, NaiveTime};
use serde::Serializer;

/// Wire format for every date/time field sent to the server.
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Days between ordering and the route start.
pub const LEAD_DAYS: u64 = 7;

/// Route start on the start day.
pub const ROUTE_START: NaiveTime = wall_clock(8);
/// Arrival at the unloading point.
pub const UNLOADING_ARRIVAL: NaiveTime = wall_clock(19);
/// Bidding closes an hour before the route starts.
pub const BIDDING_END: NaiveTime = wall_clock(7);

const fn wall_clock(hour: u32) -> NaiveTime {
    match NaiveTime::from_hms_opt(hour, 0, 0) {
        Some(time) => time,
        None => panic!("hour out of range"),
    }
}

/// Derived time points for one tender.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TenderSchedule {
    pub order_date: NaiveDateTime,
    pub start: NaiveDateTime,
    pub loading_leave: NaiveDateTime,
    pub unloading_arrival: NaiveDateTime,
    pub unloading_leave: NaiveDateTime,
    pub bidding_start: NaiveDateTime,
    pub bidding_end: NaiveDateTime,
}

impl TenderSchedule {
    /// Computes the schedule for a tender ordered at `now`.
    ///
    /// The route starts `LEAD_DAYS` calendar days later at 08:00. Loading
    /// takes an hour, unloading happens 19:00-20:00 the same day, and bidding
    /// runs from `now` until 07:00 on the start day.
    pub fn from_order_time(now: NaiveDateTime) -> Self {
        let day = now.date() + Days::new(LEAD_DAYS);
        let start = day.and_time(ROUTE_START);
        let unloading_arrival = day.and_time(UNLOADING_ARRIVAL);
        TenderSchedule {
            order_date: now,
            start,
            loading_leave: start + Duration::hours(1),
            unloading_arrival,
            unloading_leave: unloading_arrival + Duration::hours(1),
            bidding_start: now,
            bidding_end: day.and_time(BIDDING_END),
        }
    }
}

pub fn format_datetime(value: &NaiveDateTime) -> String {
    value.format(DATETIME_FORMAT).to_string()
}

/// `serialize_with` adapter for `NaiveDateTime` fields.
pub fn serialize<S: Serializer>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(&value.format(DATETIME_FORMAT))
}
