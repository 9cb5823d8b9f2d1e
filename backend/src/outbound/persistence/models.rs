//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. Rows read back from storage are converted
//! with the domain constructors so legacy data that breaks an invariant is
//! reported instead of silently passed through.

use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;
use diesel::sql_types::Text;

use crate::domain::{
    MeterLogEntry, MeterLogEntryId, MeterLogListing, Meters, NewMeterLogEntry, NewSwimmer,
    PersonName, ShareNumber, Swimmer, SwimmerId,
};

use super::schema::{meters_log, swimmers};

/// Row struct for reading from the swimmers table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = swimmers)]
pub(crate) struct SwimmerRow {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub share_number: Option<i32>,
    pub created_at: NaiveDateTime,
}

impl SwimmerRow {
    pub(crate) fn into_domain(self) -> Result<Swimmer, String> {
        let share_number = self
            .share_number
            .map(|raw| ShareNumber::new(i64::from(raw)))
            .transpose()
            .map_err(|err| format!("swimmer {}: {err}", self.id))?;
        let data = NewSwimmer {
            first_name: PersonName::new(&self.first_name)
                .map_err(|err| format!("swimmer {} first_name: {err}", self.id))?,
            last_name: PersonName::new(&self.last_name)
                .map_err(|err| format!("swimmer {} last_name: {err}", self.id))?,
            share_number,
        };
        Ok(Swimmer::new(
            SwimmerId::new(self.id),
            data,
            self.created_at.and_utc(),
        ))
    }
}

/// Insertable struct for creating swimmer records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = swimmers)]
pub(crate) struct NewSwimmerRow<'a> {
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub share_number: Option<i32>,
    pub created_at: NaiveDateTime,
}

impl<'a> NewSwimmerRow<'a> {
    pub(crate) fn from_domain(swimmer: &'a NewSwimmer, created_at: NaiveDateTime) -> Self {
        Self {
            first_name: swimmer.first_name.as_ref(),
            last_name: swimmer.last_name.as_ref(),
            share_number: swimmer.share_number.map(ShareNumber::get),
            created_at,
        }
    }
}

/// Row struct for reading from the meters_log table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = meters_log)]
pub(crate) struct MeterLogRow {
    pub id: i64,
    pub swimmer_id: i64,
    pub meters: i64,
    pub session_date: NaiveDate,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
}

impl MeterLogRow {
    pub(crate) fn into_domain(self) -> Result<MeterLogEntry, String> {
        let meters =
            Meters::new(self.meters).map_err(|err| format!("meter log {}: {err}", self.id))?;
        Ok(MeterLogEntry::new(
            MeterLogEntryId::new(self.id),
            NewMeterLogEntry {
                swimmer_id: SwimmerId::new(self.swimmer_id),
                meters,
                session_date: self.session_date,
                notes: self.notes,
            },
            self.created_at.and_utc(),
        ))
    }

    pub(crate) fn into_listing(
        self,
        first_name: &str,
        last_name: &str,
    ) -> Result<MeterLogListing, String> {
        let id = self.id;
        let entry = self.into_domain()?;
        let first_name = PersonName::new(first_name)
            .map_err(|err| format!("meter log {id} first_name: {err}"))?;
        let last_name =
            PersonName::new(last_name).map_err(|err| format!("meter log {id} last_name: {err}"))?;
        Ok(MeterLogListing::new(entry, first_name, last_name))
    }
}

/// Insertable struct for creating meter log records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = meters_log)]
pub(crate) struct NewMeterLogRow<'a> {
    pub swimmer_id: i64,
    pub meters: i64,
    pub session_date: NaiveDate,
    pub notes: Option<&'a str>,
    pub created_at: NaiveDateTime,
}

impl<'a> NewMeterLogRow<'a> {
    pub(crate) fn from_domain(entry: &'a NewMeterLogEntry, created_at: NaiveDateTime) -> Self {
        Self {
            swimmer_id: entry.swimmer_id.get(),
            meters: entry.meters.get(),
            session_date: entry.session_date,
            notes: entry.notes.as_deref(),
            created_at,
        }
    }
}

/// Column name returned by the schema inspection queries.
#[derive(Debug, Clone, QueryableByName)]
pub(crate) struct ColumnNameRow {
    #[diesel(sql_type = Text)]
    pub column_name: String,
}
