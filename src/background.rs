use std::sync::Arc;
use std::time::Duration;
use chrono::{NaiveDate, Utc};
use tokio::time::sleep;
use tracing::{error, info, info_span, Instrument};
use crate::state::AppState;
use crate::error::AppError;

#[derive(Debug, Default, PartialEq, Eq)]
pub struct SweepReport {
    pub completed_bookings: u64,
    pub expired_blocks: u64,
}

pub async fn start_lifecycle_sweeper(state: Arc<AppState>) {
    let interval = Duration::from_secs(state.config.sweep_interval_secs.max(1));
    info!("Starting lifecycle sweeper, every {:?}", interval);

    loop {
        let today = Utc::now().date_naive();
        let span = info_span!("lifecycle_sweep", today = %today);

        async {
            match sweep_once(&state, today).await {
                Ok(report) => info!(
                    completed_bookings = report.completed_bookings,
                    expired_blocks = report.expired_blocks,
                    "Sweep finished"
                ),
                Err(e) => error!("Sweep failed: {:?}", e),
            }
        }
            .instrument(span)
            .await;

        sleep(interval).await;
    }
}

/// Completes confirmed windows that ended on or before `today` and drops
/// blocks that no longer cover any future night.
pub async fn sweep_once(state: &AppState, today: NaiveDate) -> Result<SweepReport, AppError> {
    let completed_bookings = state.booking_repo.complete_elapsed(today).await?;
    let expired_blocks = state.block_repo.delete_expired(today).await?;
    Ok(SweepReport { completed_bookings, expired_blocks })
}
