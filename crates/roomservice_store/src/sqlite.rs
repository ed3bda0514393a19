use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, CustomizeConnection, Pool};
use diesel::result::DatabaseErrorKind;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use tracing::debug;

use crate::reservations::{NewReservation, Reservation, ReservationRepository, Slot};
use crate::schema::reservation;
use crate::{Error, Update};

const MIGRATIONS: EmbeddedMigrations = embed_migrations!();
pub(crate) type ConnectionType = SqliteConnection;
pub(crate) type ConnectionPool = Pool<ConnectionManager<ConnectionType>>;
const IN_MEMORY: &str = ":memory:";

/// Makes concurrent writers wait on the database lock instead of failing
/// immediately with `SQLITE_BUSY`.
#[derive(Debug)]
struct BusyTimeout;

impl CustomizeConnection<ConnectionType, diesel::r2d2::Error> for BusyTimeout {
    fn on_acquire(&self, conn: &mut ConnectionType) -> Result<(), diesel::r2d2::Error> {
        conn.batch_execute("PRAGMA busy_timeout = 5000;")
            .map_err(diesel::r2d2::Error::QueryError)
    }
}

/// SQLite backed store.
#[derive(Clone)]
pub struct RoomServiceStore {
    pool: ConnectionPool,
}

impl RoomServiceStore {
    pub fn open<S: Into<String>>(store_url: S) -> Result<Self, Error> {
        let store_url = store_url.into();
        let builder = Pool::builder().connection_customizer(Box::new(BusyTimeout));
        // every connection to `:memory:` gets its own database, so all
        // checkouts share one connection that the pool never recycles
        let builder = if store_url == IN_MEMORY {
            builder.max_size(1).max_lifetime(None).idle_timeout(None)
        } else {
            builder
        };
        let manager = ConnectionManager::<ConnectionType>::new(store_url);

        Ok(Self {
            pool: builder.build(manager)?,
        })
    }

    pub fn open_in_memory() -> Result<Self, Error> {
        Self::open(IN_MEMORY)
    }

    pub fn reservations(&self) -> SqliteReservationRepository {
        SqliteReservationRepository::new(self.pool.clone())
    }
}

impl Update for RoomServiceStore {
    fn has_updates(&self) -> Result<bool, Error> {
        self.pool
            .get()?
            .has_pending_migration(MIGRATIONS)
            .map_err(|_| Error::Migration("failed to check pending migrations".to_string()))
    }

    fn update(&self) -> Result<(), Error> {
        let mut conn = self.pool.get()?;
        let applied = conn
            .run_pending_migrations(MIGRATIONS)
            .map_err(|_| Error::Migration("failed to run pending migrations".to_string()))?;

        for version in applied {
            debug!(%version, "applied migration");
        }

        Ok(())
    }
}

#[derive(Clone)]
pub struct SqliteReservationRepository {
    pool: ConnectionPool,
}

impl SqliteReservationRepository {
    pub(crate) fn new(pool: ConnectionPool) -> Self {
        Self { pool }
    }

    fn find_by_slot_with_conn(
        conn: &mut ConnectionType,
        slot: &Slot,
    ) -> Result<Option<Reservation>, Error> {
        Ok(reservation::table
            .filter(reservation::date.eq(slot.date))
            .filter(reservation::time.eq(slot.time))
            .select(Reservation::as_select())
            .first(conn)
            .optional()?)
    }
}

impl ReservationRepository for SqliteReservationRepository {
    fn add(&self, new_reservation: &NewReservation) -> Result<Reservation, Error> {
        let slot = new_reservation.slot();
        let mut conn = self.pool.get()?;

        // IMMEDIATE takes the write lock up front so no other writer can
        // claim the slot between the lookup and the insert.
        conn.immediate_transaction(|conn| {
            if Self::find_by_slot_with_conn(conn, &slot)?.is_some() {
                return Err(Error::SlotTaken(slot));
            }

            diesel::insert_into(reservation::table)
                .values(new_reservation)
                .returning(Reservation::as_returning())
                .get_result(conn)
                .map_err(|e| match e {
                    diesel::result::Error::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        Error::SlotTaken(slot)
                    }
                    e => e.into(),
                })
        })
    }

    fn get(&self, id: i64) -> Result<Option<Reservation>, Error> {
        let mut conn = self.pool.get()?;
        Ok(reservation::table
            .find(id)
            .select(Reservation::as_select())
            .first(&mut conn)
            .optional()?)
    }

    fn find_by_slot(&self, slot: &Slot) -> Result<Option<Reservation>, Error> {
        let mut conn = self.pool.get()?;
        Self::find_by_slot_with_conn(&mut conn, slot)
    }

    fn list(&self) -> Result<Vec<Reservation>, Error> {
        let mut conn = self.pool.get()?;
        Ok(reservation::table
            .order(reservation::id.asc())
            .select(Reservation::as_select())
            .load(&mut conn)?)
    }

    fn delete(&self, id: i64) -> Result<bool, Error> {
        let mut conn = self.pool.get()?;
        let deleted = diesel::delete(reservation::table.find(id)).execute(&mut conn)?;
        Ok(deleted > 0)
    }
}
