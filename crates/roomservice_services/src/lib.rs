use std::sync::Arc;

use reservation::ReservationService;
use roomservice_store::ReservationRepository;

pub mod reservation;

#[derive(Clone)]
pub struct ServerState {
    pub store: Arc<dyn ReservationRepository>,
}

impl ServerState {
    pub fn new(store: Arc<dyn ReservationRepository>) -> Self {
        ServerState { store }
    }

    pub fn reservation_service(&self) -> ReservationService<'_> {
        ReservationService::new(self.store.as_ref())
    }
}
