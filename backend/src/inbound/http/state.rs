//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    FixtureMeterLogCommand, FixtureMeterLogQuery, FixtureSummaryQuery, FixtureSwimmersCommand,
    FixtureSwimmersQuery, MeterLogCommand, MeterLogQuery, SummaryQuery, SwimmersCommand,
    SwimmersQuery,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub swimmers: Arc<dyn SwimmersCommand>,
    pub swimmers_query: Arc<dyn SwimmersQuery>,
    pub meter_log: Arc<dyn MeterLogCommand>,
    pub meter_log_query: Arc<dyn MeterLogQuery>,
    pub summary: Arc<dyn SummaryQuery>,
}

impl Default for HttpState {
    /// State backed by fixture ports that never touch storage.
    fn default() -> Self {
        Self {
            swimmers: Arc::new(FixtureSwimmersCommand),
            swimmers_query: Arc::new(FixtureSwimmersQuery),
            meter_log: Arc::new(FixtureMeterLogCommand),
            meter_log_query: Arc::new(FixtureMeterLogQuery),
            summary: Arc::new(FixtureSummaryQuery),
        }
    }
}

impl HttpState {
    /// Replace the swimmer ports.
    pub fn with_swimmers(
        mut self,
        command: Arc<dyn SwimmersCommand>,
        query: Arc<dyn SwimmersQuery>,
    ) -> Self {
        self.swimmers = command;
        self.swimmers_query = query;
        self
    }

    /// Replace the meter log ports.
    pub fn with_meter_log(
        mut self,
        command: Arc<dyn MeterLogCommand>,
        query: Arc<dyn MeterLogQuery>,
    ) -> Self {
        self.meter_log = command;
        self.meter_log_query = query;
        self
    }

    /// Replace the summary port.
    pub fn with_summary(mut self, summary: Arc<dyn SummaryQuery>) -> Self {
        self.summary = summary;
        self
    }
}
