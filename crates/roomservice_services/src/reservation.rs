use chrono::{NaiveDate, NaiveTime, Timelike};
use roomservice_store::{NewReservation, Reservation, ReservationRepository};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ReservationError {
    #[error("이미 예약된 시간입니다.")]
    DuplicateSlot,

    #[error("존재하지 않는 예약 id입니다.")]
    NotFound { id: i64 },

    #[error("store error: {0}")]
    Store(#[source] roomservice_store::Error),
}

impl From<roomservice_store::Error> for ReservationError {
    fn from(e: roomservice_store::Error) -> Self {
        match e {
            roomservice_store::Error::SlotTaken(_) => ReservationError::DuplicateSlot,
            e => ReservationError::Store(e),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Theme {
    pub name: String,
    pub desc: String,
    pub price: i32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CreateReservationRequest {
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub name: String,
    pub theme: Option<Theme>,
}

impl From<CreateReservationRequest> for NewReservation {
    fn from(request: CreateReservationRequest) -> Self {
        // reservations are kept at minute precision
        let time = request
            .time
            .with_nanosecond(0)
            .and_then(|t| t.with_second(0))
            .unwrap_or(request.time);
        let (theme_name, theme_desc, theme_price) = match request.theme {
            Some(Theme { name, desc, price }) => (Some(name), Some(desc), Some(price)),
            None => (None, None, None),
        };

        NewReservation {
            date: request.date,
            time,
            name: request.name,
            theme_name,
            theme_desc,
            theme_price,
        }
    }
}

/// Reservation rules on top of a [`ReservationRepository`].
#[derive(Clone, Copy)]
pub struct ReservationService<'a> {
    store: &'a dyn ReservationRepository,
}

impl<'a> ReservationService<'a> {
    pub fn new(store: &'a dyn ReservationRepository) -> Self {
        Self { store }
    }

    /// Books the requested slot. Fails with [`ReservationError::DuplicateSlot`]
    /// when another reservation already holds it, whatever the guest name.
    pub fn create(
        &self,
        request: CreateReservationRequest,
    ) -> Result<Reservation, ReservationError> {
        let new_reservation = NewReservation::from(request);
        let reservation = self.store.add(&new_reservation)?;
        debug!(id = reservation.id, slot = %reservation.slot(), "created reservation");
        Ok(reservation)
    }

    pub fn get(&self, id: i64) -> Result<Reservation, ReservationError> {
        self.store.get(id)?.ok_or(ReservationError::NotFound { id })
    }

    pub fn list(&self) -> Result<Vec<Reservation>, ReservationError> {
        Ok(self.store.list()?)
    }

    /// Deleting an id that does not exist, or no longer exists, is an error.
    pub fn delete(&self, id: i64) -> Result<(), ReservationError> {
        if !self.store.delete(id)? {
            return Err(ReservationError::NotFound { id });
        }
        debug!(id, "deleted reservation");
        Ok(())
    }
}
