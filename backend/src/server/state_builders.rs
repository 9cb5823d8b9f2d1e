//! Builders wiring repository-backed services into the HTTP state.

use std::sync::Arc;

use mockable::Clock;

use million_meters::bootstrap::Storage;
use million_meters::domain::ports::{
    MeterLogRepository, ProgressSnapshotRepository, SwimmerRepository,
};
use million_meters::domain::{MeterLogService, SummaryService, SwimmerService};
use million_meters::inbound::http::state::HttpState;

/// Services over one store implementing every repository port.
fn services_for<St>(store: St, clock: Arc<dyn Clock>) -> HttpState
where
    St: SwimmerRepository + MeterLogRepository + ProgressSnapshotRepository + 'static,
{
    let store = Arc::new(store);
    let swimmers = Arc::new(SwimmerService::new(store.clone(), clock.clone()));
    let meter_log = Arc::new(MeterLogService::new(store.clone(), clock));
    let summary = Arc::new(SummaryService::new(store));

    HttpState::default()
        .with_swimmers(swimmers.clone(), swimmers)
        .with_meter_log(meter_log.clone(), meter_log)
        .with_summary(summary)
}

/// Build the HTTP state, falling back to fixtures without storage.
pub(crate) fn build_http_state(storage: Option<&Storage>, clock: Arc<dyn Clock>) -> HttpState {
    match storage {
        Some(Storage::Postgres { store, .. }) => services_for(store.clone(), clock),
        Some(Storage::Sqlite { store, .. }) => services_for(store.clone(), clock),
        None => HttpState::default(),
    }
}
