//! Shared fixtures for domain service unit tests.

use std::sync::Arc;

use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};
use mockable::Clock;

use crate::domain::{
    MeterLogEntry, MeterLogEntryId, Meters, NewMeterLogEntry, NewSwimmer, PersonName, Swimmer,
    SwimmerId,
};

pub(crate) fn fixture_timestamp() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 7, 30, 0)
        .single()
        .expect("valid fixture timestamp")
}

struct FixtureClock {
    utc_now: DateTime<Utc>,
}

impl Clock for FixtureClock {
    fn local(&self) -> DateTime<Local> {
        self.utc_now.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.utc_now
    }
}

pub(crate) fn fixture_clock() -> Arc<dyn Clock> {
    Arc::new(FixtureClock {
        utc_now: fixture_timestamp(),
    })
}

pub(crate) fn new_swimmer(first: &str, last: &str) -> NewSwimmer {
    NewSwimmer {
        first_name: PersonName::new(first).expect("valid first name"),
        last_name: PersonName::new(last).expect("valid last name"),
        share_number: None,
    }
}

pub(crate) fn stored_swimmer(id: i64, first: &str, last: &str) -> Swimmer {
    Swimmer::new(
        SwimmerId::new(id),
        new_swimmer(first, last),
        fixture_timestamp(),
    )
}

pub(crate) fn stored_entry(id: i64, swimmer_id: i64, meters: i64, date: &str) -> MeterLogEntry {
    MeterLogEntry::new(
        MeterLogEntryId::new(id),
        NewMeterLogEntry {
            swimmer_id: SwimmerId::new(swimmer_id),
            meters: Meters::new(meters).expect("positive meters"),
            session_date: NaiveDate::parse_from_str(date, "%Y-%m-%d").expect("valid date"),
            notes: None,
        },
        fixture_timestamp(),
    )
}
