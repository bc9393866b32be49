//! Almacén de viajes sobre PostgreSQL
//!
//! Mismo contrato que el almacén en memoria. El id se calcula dentro de una
//! transacción con la tabla bloqueada para que dos inserciones concurrentes
//! no lean el mismo máximo.

use async_trait::async_trait;
use chrono::NaiveDateTime;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::models::ride::{cost_in_cents, NewRide, Ride, RideAvailability};
use crate::repositories::ride_repository::RideStore;
use crate::services::ride_rules;
use crate::utils::errors::{AppError, AppResult};

const CREATE_RIDES_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS rides (
        position BIGSERIAL,
        ride_id BIGINT PRIMARY KEY,
        driver TEXT NOT NULL,
        departure TIMESTAMP NOT NULL,
        origin TEXT NOT NULL,
        destination TEXT NOT NULL,
        vehicle_number_plate TEXT NOT NULL,
        capacity INTEGER NOT NULL,
        cost NUMERIC(12, 2) NOT NULL,
        date_offered TIMESTAMP NOT NULL,
        availability TEXT NOT NULL
    )
"#;

const UPSERT_RIDE: &str = r#"
    INSERT INTO rides (ride_id, driver, departure, origin, destination, vehicle_number_plate, capacity, cost, date_offered, availability)
    VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
    ON CONFLICT (ride_id) DO UPDATE SET
        driver = EXCLUDED.driver,
        departure = EXCLUDED.departure,
        origin = EXCLUDED.origin,
        destination = EXCLUDED.destination,
        vehicle_number_plate = EXCLUDED.vehicle_number_plate,
        capacity = EXCLUDED.capacity,
        cost = EXCLUDED.cost,
        date_offered = EXCLUDED.date_offered,
        availability = EXCLUDED.availability
"#;

const SELECT_COLUMNS: &str = "ride_id, driver, departure, origin, destination, vehicle_number_plate, capacity, cost, date_offered, availability";

// Fila tal como vive en la tabla rides
#[derive(Debug, sqlx::FromRow)]
struct RideRow {
    ride_id: i64,
    driver: String,
    departure: NaiveDateTime,
    origin: String,
    destination: String,
    vehicle_number_plate: String,
    capacity: i32,
    cost: Decimal,
    date_offered: NaiveDateTime,
    availability: String,
}

impl TryFrom<RideRow> for Ride {
    type Error = AppError;

    fn try_from(row: RideRow) -> Result<Self, Self::Error> {
        let availability = row.availability.parse::<RideAvailability>().map_err(AppError::Internal)?;
        let cost = row
            .cost
            .to_f64()
            .ok_or_else(|| AppError::Internal(format!("Invalid cost for ride {}", row.ride_id)))?;

        Ok(Ride {
            ride_id: row.ride_id,
            driver: row.driver,
            departure: row.departure,
            origin: row.origin,
            destination: row.destination,
            vehicle_number_plate: row.vehicle_number_plate,
            capacity: row.capacity,
            cost,
            date_offered: row.date_offered,
            availability,
        })
    }
}

fn cost_to_decimal(cost: f64) -> AppResult<Decimal> {
    cost_in_cents(cost).ok_or_else(|| AppError::BadRequest("Invalid cost value".to_string()))
}

pub struct PgRideStore {
    pool: PgPool,
}

impl PgRideStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Crear la tabla si todavía no existe
    pub async fn ensure_table(&self) -> AppResult<()> {
        sqlx::query(CREATE_RIDES_TABLE).execute(&self.pool).await?;
        Ok(())
    }
}

#[async_trait]
impl RideStore for PgRideStore {
    async fn put(&self, ride: Ride) -> AppResult<()> {
        sqlx::query(UPSERT_RIDE)
            .bind(ride.ride_id)
            .bind(&ride.driver)
            .bind(ride.departure)
            .bind(&ride.origin)
            .bind(&ride.destination)
            .bind(&ride.vehicle_number_plate)
            .bind(ride.capacity)
            .bind(cost_to_decimal(ride.cost)?)
            .bind(ride.date_offered)
            .bind(ride.availability.as_str())
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn get(&self, ride_id: i64) -> AppResult<Option<Ride>> {
        let row = sqlx::query_as::<_, RideRow>(&format!("SELECT {} FROM rides WHERE ride_id = $1", SELECT_COLUMNS))
            .bind(ride_id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(Ride::try_from).transpose()
    }

    async fn all(&self) -> AppResult<Vec<Ride>> {
        let rows = sqlx::query_as::<_, RideRow>(&format!("SELECT {} FROM rides ORDER BY position", SELECT_COLUMNS))
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(Ride::try_from).collect()
    }

    async fn insert_new(&self, new_ride: NewRide, date_offered: NaiveDateTime) -> AppResult<Ride> {
        let cost = cost_to_decimal(new_ride.cost)?;
        let mut tx = self.pool.begin().await?;

        // Bloquea otras escrituras hasta el commit; las lecturas siguen
        sqlx::query("LOCK TABLE rides IN SHARE ROW EXCLUSIVE MODE")
            .execute(&mut *tx)
            .await?;

        let max_id: Option<i64> = sqlx::query_scalar("SELECT MAX(ride_id) FROM rides")
            .fetch_one(&mut *tx)
            .await?;
        let ride = Ride::offer(ride_rules::next_id(max_id), new_ride, date_offered);

        sqlx::query(UPSERT_RIDE)
            .bind(ride.ride_id)
            .bind(&ride.driver)
            .bind(ride.departure)
            .bind(&ride.origin)
            .bind(&ride.destination)
            .bind(&ride.vehicle_number_plate)
            .bind(ride.capacity)
            .bind(cost)
            .bind(ride.date_offered)
            .bind(ride.availability.as_str())
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        log::debug!("💾 Viaje {} almacenado en PostgreSQL", ride.ride_id);
        Ok(ride)
    }

    async fn compare_and_set_availability(
        &self,
        ride_id: i64,
        expected: RideAvailability,
        next: RideAvailability,
    ) -> AppResult<bool> {
        let result = sqlx::query("UPDATE rides SET availability = $3 WHERE ride_id = $1 AND availability = $2")
            .bind(ride_id)
            .bind(expected.as_str())
            .bind(next.as_str())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() == 1)
    }
}
