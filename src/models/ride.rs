//! Modelo de Ride
//!
//! Un viaje ofrecido por un conductor: salida, ruta, plazas y tarifa.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Formato de fecha de salida en la API (ej: `Jun 25 2018 1:30PM`)
pub const DEPARTURE_FORMAT: &str = "%b %d %Y %I:%M%p";

/// Estado de disponibilidad del viaje
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RideAvailability {
    Available,
    Taken,
    Cancelled,
}

impl RideAvailability {
    pub fn as_str(&self) -> &'static str {
        match self {
            RideAvailability::Available => "available",
            RideAvailability::Taken => "taken",
            RideAvailability::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for RideAvailability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RideAvailability {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "available" => Ok(RideAvailability::Available),
            "taken" => Ok(RideAvailability::Taken),
            "cancelled" => Ok(RideAvailability::Cancelled),
            other => Err(format!("unknown availability '{}'", other)),
        }
    }
}

/// Datos necesarios para ofrecer un viaje; el id y la fecha los asigna el servidor
#[derive(Debug, Clone)]
pub struct NewRide {
    pub driver: String,
    pub departure: NaiveDateTime,
    pub origin: String,
    pub destination: String,
    pub vehicle_number_plate: String,
    pub capacity: i32,
    pub cost: f64,
}

/// Ride principal
#[derive(Debug, Clone, PartialEq)]
pub struct Ride {
    pub ride_id: i64,
    pub driver: String,
    pub departure: NaiveDateTime,
    pub origin: String,
    pub destination: String,
    pub vehicle_number_plate: String,
    pub capacity: i32,
    pub cost: f64,
    pub date_offered: NaiveDateTime,
    pub availability: RideAvailability,
}

impl Ride {
    /// Todo viaje nuevo nace `available`
    pub fn offer(ride_id: i64, new_ride: NewRide, date_offered: NaiveDateTime) -> Self {
        Self {
            ride_id,
            driver: new_ride.driver,
            departure: new_ride.departure,
            origin: new_ride.origin,
            destination: new_ride.destination,
            vehicle_number_plate: new_ride.vehicle_number_plate,
            capacity: new_ride.capacity,
            cost: new_ride.cost,
            date_offered,
            availability: RideAvailability::Available,
        }
    }

    pub fn location(&self) -> String {
        ride_location(self.ride_id)
    }
}

impl fmt::Display for Ride {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<Ride {}: {} -> {} on {} ({})>",
            self.ride_id,
            self.origin,
            self.destination,
            format_timestamp(&self.departure),
            self.availability
        )
    }
}

pub fn ride_location(ride_id: i64) -> String {
    format!("/rides/{}", ride_id)
}

/// Parsear fecha de salida; los espacios repetidos se colapsan antes
pub fn parse_departure(value: &str) -> Result<NaiveDateTime, chrono::ParseError> {
    let normalized = value.split_whitespace().collect::<Vec<_>>().join(" ");
    NaiveDateTime::parse_from_str(&normalized, DEPARTURE_FORMAT)
}

pub fn format_timestamp(value: &NaiveDateTime) -> String {
    value.format(DEPARTURE_FORMAT).to_string()
}

/// Tarifa redondeada a céntimos (mitades hacia arriba), igual que `NUMERIC(12, 2)`
pub fn cost_in_cents(cost: f64) -> Option<Decimal> {
    Decimal::from_f64(cost).map(|d| d.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero))
}

pub fn round_cost(cost: f64) -> Option<f64> {
    cost_in_cents(cost).and_then(|d| d.to_f64())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    fn sample() -> NewRide {
        NewRide {
            driver: "jdoe".to_string(),
            departure: parse_departure("Jun 28 2018 7:00AM").unwrap(),
            origin: "Garissa".to_string(),
            destination: "Nairobi".to_string(),
            vehicle_number_plate: "KBC-A21".to_string(),
            capacity: 3,
            cost: 500.0,
        }
    }

    #[test]
    fn test_parse_departure_tolerates_double_space() {
        let departure = parse_departure("Jun 25 2018  1:30PM").unwrap();
        assert_eq!(departure.year(), 2018);
        assert_eq!(departure.month(), 6);
        assert_eq!(departure.day(), 25);
        assert_eq!(departure.hour(), 13);
        assert_eq!(departure.minute(), 30);
    }

    #[test]
    fn test_parse_departure_rejects_iso() {
        assert!(parse_departure("2018-06-25 13:30").is_err());
        assert!(parse_departure("").is_err());
    }

    #[test]
    fn test_cost_rounds_half_up_to_cents() {
        assert_eq!(cost_in_cents(12.345).unwrap().to_string(), "12.35");
        assert_eq!(cost_in_cents(350.5).unwrap(), Decimal::new(35050, 2));
        assert_eq!(round_cost(0.125), Some(0.13));
        assert_eq!(round_cost(350.0), Some(350.0));
        assert!(cost_in_cents(f64::NAN).is_none());
    }

    #[test]
    fn test_format_timestamp_parses_back() {
        let departure = parse_departure("Dec 01 2030 11:05PM").unwrap();
        assert_eq!(parse_departure(&format_timestamp(&departure)).unwrap(), departure);
    }

    #[test]
    fn test_offer_starts_available() {
        let offered = parse_departure("Jun 20 2018 9:00AM").unwrap();
        let ride = Ride::offer(7, sample(), offered);
        assert_eq!(ride.ride_id, 7);
        assert_eq!(ride.availability, RideAvailability::Available);
        assert_eq!(ride.date_offered, offered);
        assert_eq!(ride.location(), "/rides/7");
        assert_eq!(ride.to_string(), "<Ride 7: Garissa -> Nairobi on Jun 28 2018 07:00AM (available)>");
    }

    #[test]
    fn test_availability_from_str() {
        assert_eq!("Taken".parse::<RideAvailability>(), Ok(RideAvailability::Taken));
        assert_eq!(" cancelled ".parse::<RideAvailability>(), Ok(RideAvailability::Cancelled));
        assert!("gone".parse::<RideAvailability>().is_err());
    }
}
