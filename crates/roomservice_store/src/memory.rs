//! Process local reservation storage, used when no database is configured.
use std::collections::BTreeMap;

use parking_lot::Mutex;

use crate::reservations::{NewReservation, Reservation, ReservationRepository, Slot};
use crate::Error;

#[derive(Default)]
struct Inner {
    last_id: i64,
    reservations: BTreeMap<i64, Reservation>,
}

#[derive(Default)]
pub struct InMemoryReservationRepository {
    inner: Mutex<Inner>,
}

impl InMemoryReservationRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ReservationRepository for InMemoryReservationRepository {
    fn add(&self, new_reservation: &NewReservation) -> Result<Reservation, Error> {
        let slot = new_reservation.slot();
        let mut inner = self.inner.lock();

        if inner.reservations.values().any(|r| r.slot() == slot) {
            return Err(Error::SlotTaken(slot));
        }

        inner.last_id += 1;
        let reservation = Reservation {
            id: inner.last_id,
            date: new_reservation.date,
            time: new_reservation.time,
            name: new_reservation.name.clone(),
            theme_name: new_reservation.theme_name.clone(),
            theme_desc: new_reservation.theme_desc.clone(),
            theme_price: new_reservation.theme_price,
        };
        inner.reservations.insert(reservation.id, reservation.clone());

        Ok(reservation)
    }

    fn get(&self, id: i64) -> Result<Option<Reservation>, Error> {
        Ok(self.inner.lock().reservations.get(&id).cloned())
    }

    fn find_by_slot(&self, slot: &Slot) -> Result<Option<Reservation>, Error> {
        Ok(self
            .inner
            .lock()
            .reservations
            .values()
            .find(|r| r.slot() == *slot)
            .cloned())
    }

    fn list(&self) -> Result<Vec<Reservation>, Error> {
        Ok(self.inner.lock().reservations.values().cloned().collect())
    }

    fn delete(&self, id: i64) -> Result<bool, Error> {
        Ok(self.inner.lock().reservations.remove(&id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reservations::conformance;

    #[test]
    fn test_assigns_increasing_ids() {
        conformance::assigns_increasing_ids(&InMemoryReservationRepository::new());
    }

    #[test]
    fn test_rejects_taken_slot() {
        conformance::rejects_taken_slot(&InMemoryReservationRepository::new());
    }

    #[test]
    fn test_get_returns_stored_record() {
        conformance::get_returns_stored_record(&InMemoryReservationRepository::new());
    }

    #[test]
    fn test_finds_by_slot() {
        conformance::finds_by_slot(&InMemoryReservationRepository::new());
    }

    #[test]
    fn test_delete_is_permanent() {
        conformance::delete_is_permanent(&InMemoryReservationRepository::new());
    }

    #[test]
    fn test_deleted_ids_are_not_reused() {
        conformance::deleted_ids_are_not_reused(&InMemoryReservationRepository::new());
    }

    #[test]
    fn test_lists_in_id_order() {
        conformance::lists_in_id_order(&InMemoryReservationRepository::new());
    }

    #[test]
    fn test_concurrent_adds_claim_slot_once() {
        let repo = std::sync::Arc::new(InMemoryReservationRepository::new());

        let handles = (0..8)
            .map(|i| {
                let repo = repo.clone();
                std::thread::spawn(move || {
                    repo.add(&conformance::new_reservation(13, &format!("guest{i}")))
                        .is_ok()
                })
            })
            .collect::<Vec<_>>();
        let successes = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|ok| *ok)
            .count();

        assert_eq!(successes, 1);
        assert_eq!(repo.list().unwrap().len(), 1);
    }
}
