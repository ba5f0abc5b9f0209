use std::sync::Arc;
use crate::domain::ports::{
    BookingWindowRepository, InventoryRepository, ServiceRepository, UnavailableBlockRepository,
};
use crate::domain::services::availability::AvailabilityChecker;
use crate::config::Config;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub service_repo: Arc<dyn ServiceRepository>,
    pub booking_repo: Arc<dyn BookingWindowRepository>,
    pub block_repo: Arc<dyn UnavailableBlockRepository>,
    pub inventory_repo: Arc<dyn InventoryRepository>,
    pub availability: Arc<AvailabilityChecker>,
}

impl AppState {
    pub fn new(
        config: Config,
        service_repo: Arc<dyn ServiceRepository>,
        booking_repo: Arc<dyn BookingWindowRepository>,
        block_repo: Arc<dyn UnavailableBlockRepository>,
        inventory_repo: Arc<dyn InventoryRepository>,
    ) -> Self {
        let availability = Arc::new(AvailabilityChecker::new(
            booking_repo.clone(),
            block_repo.clone(),
            inventory_repo.clone(),
        ));

        Self { config, service_repo, booking_repo, block_repo, inventory_repo, availability }
    }
}
