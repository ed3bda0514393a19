//! roomservice-server
//!
//! HTTP front of the reservation service.
//!
//! | Method   | Path                 | Success                          |
//! |----------|----------------------|----------------------------------|
//! | `POST`   | `/reservations`      | `201`, `Location` of the record  |
//! | `GET`    | `/reservations`      | `200`, every reservation         |
//! | `GET`    | `/reservations/{id}` | `200`, the reservation           |
//! | `DELETE` | `/reservations/{id}` | `204`                            |
//!
//! A taken slot or an unknown id is answered with `400` and the bare,
//! user facing message as body.

pub(crate) mod api;
pub mod app;
pub mod dto;
pub mod error;
pub(crate) mod reservations;

pub use app::Server;
pub use error::Error;
pub use roomservice_services::ServerState;

#[derive(serde::Deserialize, Debug)]
pub struct Config {
    pub url: String,
    pub port: u16,
}
