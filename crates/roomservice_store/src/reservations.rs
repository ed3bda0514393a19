use std::fmt;

use chrono::{NaiveDate, NaiveTime};
use diesel::prelude::*;

use crate::{schema, Error};

/// The (date, time) pair a reservation occupies. At most one stored
/// reservation may hold a given slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Slot {
    pub date: NaiveDate,
    pub time: NaiveTime,
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.date, self.time.format("%H:%M"))
    }
}

#[derive(Queryable, Selectable, Clone, Debug, PartialEq, Eq)]
#[diesel(table_name = schema::reservation)]
pub struct Reservation {
    pub id: i64,
    pub date: NaiveDate,
    pub time: NaiveTime,
    /// Guest name, 20 characters per the column width (not enforced).
    pub name: String,
    pub theme_name: Option<String>,
    pub theme_desc: Option<String>,
    pub theme_price: Option<i32>,
}

impl Reservation {
    pub fn slot(&self) -> Slot {
        Slot {
            date: self.date,
            time: self.time,
        }
    }
}

#[derive(Insertable, Clone, Debug, PartialEq, Eq)]
#[diesel(table_name = schema::reservation)]
pub struct NewReservation {
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub name: String,
    pub theme_name: Option<String>,
    pub theme_desc: Option<String>,
    pub theme_price: Option<i32>,
}

impl NewReservation {
    pub fn new(date: NaiveDate, time: NaiveTime, name: impl Into<String>) -> Self {
        Self {
            date,
            time,
            name: name.into(),
            theme_name: None,
            theme_desc: None,
            theme_price: None,
        }
    }

    pub fn slot(&self) -> Slot {
        Slot {
            date: self.date,
            time: self.time,
        }
    }
}

/// Persistence boundary for reservations.
///
/// Implementations must be `Send` and `Sync` as the repository is shared
/// through the server state across request handlers.
pub trait ReservationRepository: Send + Sync {
    /// Stores a new reservation and assigns it the next id.
    ///
    /// The slot check and the insert happen as one atomic step; if another
    /// reservation already holds the slot [`Error::SlotTaken`] is returned
    /// and nothing is written.
    fn add(&self, reservation: &NewReservation) -> Result<Reservation, Error>;

    /// Retrieve a reservation by id.
    fn get(&self, id: i64) -> Result<Option<Reservation>, Error>;

    /// Retrieve the reservation occupying `slot`, if any.
    fn find_by_slot(&self, slot: &Slot) -> Result<Option<Reservation>, Error>;

    /// All stored reservations ordered by id.
    fn list(&self) -> Result<Vec<Reservation>, Error>;

    /// Removes a reservation, returning `false` when no reservation had that id.
    fn delete(&self, id: i64) -> Result<bool, Error>;
}

/// Behaviour every [`ReservationRepository`] backend has to show.
#[cfg(test)]
pub(crate) mod conformance {
    use super::*;

    pub(crate) fn new_reservation(hour: u32, name: &str) -> NewReservation {
        NewReservation::new(
            NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
            NaiveTime::from_hms_opt(hour, 0, 0).unwrap(),
            name,
        )
    }

    pub(crate) fn assigns_increasing_ids(repo: &dyn ReservationRepository) {
        let first = repo.add(&new_reservation(13, "hi")).unwrap();
        let second = repo.add(&new_reservation(14, "there")).unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
    }

    pub(crate) fn rejects_taken_slot(repo: &dyn ReservationRepository) {
        let stored = repo.add(&new_reservation(13, "hi")).unwrap();

        let err = repo.add(&new_reservation(13, "someone else")).unwrap_err();

        assert!(matches!(err, Error::SlotTaken(slot) if slot == stored.slot()));
        assert_eq!(repo.list().unwrap(), vec![stored]);
    }

    pub(crate) fn get_returns_stored_record(repo: &dyn ReservationRepository) {
        let mut new = new_reservation(13, "hi");
        new.theme_name = Some("horror".to_string());
        new.theme_desc = Some("lights off".to_string());
        new.theme_price = Some(29000);
        let stored = repo.add(&new).unwrap();

        let fetched = repo.get(stored.id).unwrap().unwrap();

        assert_eq!(fetched, stored);
        assert_eq!(fetched.name, "hi");
        assert_eq!(fetched.theme_price, Some(29000));
        assert!(repo.get(0).unwrap().is_none());
    }

    pub(crate) fn finds_by_slot(repo: &dyn ReservationRepository) {
        let stored = repo.add(&new_reservation(13, "hi")).unwrap();

        assert_eq!(repo.find_by_slot(&stored.slot()).unwrap(), Some(stored));
        assert_eq!(
            repo.find_by_slot(&new_reservation(9, "").slot()).unwrap(),
            None
        );
    }

    pub(crate) fn delete_is_permanent(repo: &dyn ReservationRepository) {
        let stored = repo.add(&new_reservation(13, "hi")).unwrap();

        assert!(repo.delete(stored.id).unwrap());
        assert!(repo.get(stored.id).unwrap().is_none());
        assert!(!repo.delete(stored.id).unwrap());
        assert!(!repo.delete(0).unwrap());
    }

    pub(crate) fn deleted_ids_are_not_reused(repo: &dyn ReservationRepository) {
        let first = repo.add(&new_reservation(13, "hi")).unwrap();
        repo.delete(first.id).unwrap();

        // the freed slot can be booked again, under a fresh id
        let second = repo.add(&new_reservation(13, "hi")).unwrap();

        assert_eq!(second.id, first.id + 1);
    }

    pub(crate) fn lists_in_id_order(repo: &dyn ReservationRepository) {
        let a = repo.add(&new_reservation(15, "a")).unwrap();
        let b = repo.add(&new_reservation(10, "b")).unwrap();
        let c = repo.add(&new_reservation(12, "c")).unwrap();
        repo.delete(b.id).unwrap();

        assert_eq!(repo.list().unwrap(), vec![a, c]);
    }
}
