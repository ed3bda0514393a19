use thiserror::Error;

use crate::reservations::Slot;

#[derive(Error, Debug)]
pub enum Error {
    #[error("slot {0} is already reserved")]
    SlotTaken(Slot),

    #[error("diesel error: {0}")]
    Diesel(#[from] diesel::result::Error),

    #[error("pool error: {0}")]
    Pool(#[from] diesel::r2d2::PoolError),

    #[error("migration error: {0}")]
    Migration(String),
}
