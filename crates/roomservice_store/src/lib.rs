pub mod error;
pub mod memory;
pub mod reservations;
#[rustfmt::skip]
pub mod schema;
pub mod sqlite;

pub use error::Error;
pub use memory::InMemoryReservationRepository;
pub use reservations::{NewReservation, Reservation, ReservationRepository, Slot};
pub use sqlite::{RoomServiceStore, SqliteReservationRepository};

/// Which [`ReservationRepository`] implementation backs the service.
#[derive(serde::Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Backend {
    #[default]
    Sqlite,
    Memory,
}

#[derive(serde::Deserialize, Debug)]
pub struct Config {
    #[serde(default)]
    pub backend: Backend,
    pub url: String,
}

pub trait Update {
    fn has_updates(&self) -> Result<bool, Error>;
    fn update(&self) -> Result<(), Error>;
}
