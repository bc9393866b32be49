//! Reglas del ciclo de vida de los viajes
//!
//! Funciones puras: asignación de ids, expiración, visibilidad y
//! transiciones de estado. No tocan almacenamiento ni reloj.

use chrono::NaiveDateTime;

use crate::models::ride::{Ride, RideAvailability};
use crate::models::ride_request::RequestStatus;

/// Siguiente id: `max(ids) + 1`, o `1` si no hay ninguno
pub fn next_id<I>(ids: I) -> i64
where
    I: IntoIterator<Item = i64>,
{
    ids.into_iter().max().map_or(1, |max| max + 1)
}

/// Un viaje expira cuando su salida es estrictamente anterior a `now`
pub fn is_expired(ride: &Ride, now: NaiveDateTime) -> bool {
    ride.departure < now
}

/// Visible en el listado: no expirado y todavía `available`
pub fn is_visible(ride: &Ride, now: NaiveDateTime) -> bool {
    !is_expired(ride, now) && ride.availability == RideAvailability::Available
}

/// Un viaje sólo acepta solicitudes mientras es visible
pub fn accepts_requests(ride: &Ride, now: NaiveDateTime) -> bool {
    is_visible(ride, now)
}

/// `available -> taken` y `available -> cancelled`; no hay vuelta atrás
pub fn can_transition(from: RideAvailability, to: RideAvailability) -> bool {
    matches!(
        (from, to),
        (RideAvailability::Available, RideAvailability::Taken)
            | (RideAvailability::Available, RideAvailability::Cancelled)
    )
}

/// `pending -> accepted` y `pending -> rejected`
pub fn can_transition_request(from: RequestStatus, to: RequestStatus) -> bool {
    matches!(
        (from, to),
        (RequestStatus::Pending, RequestStatus::Accepted)
            | (RequestStatus::Pending, RequestStatus::Rejected)
    )
}

/// Filtrar los viajes visibles conservando el orden de entrada
pub fn visible_rides(rides: Vec<Ride>, now: NaiveDateTime) -> Vec<Ride> {
    rides.into_iter().filter(|ride| is_visible(ride, now)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ride::{parse_departure, NewRide};
    use chrono::Duration;

    fn ride_departing(ride_id: i64, departure: NaiveDateTime) -> Ride {
        let new_ride = NewRide {
            driver: "driver".to_string(),
            departure,
            origin: "Nairobi".to_string(),
            destination: "Garissa".to_string(),
            vehicle_number_plate: "KBC-A21".to_string(),
            capacity: 3,
            cost: 350.0,
        };
        Ride::offer(ride_id, new_ride, departure - Duration::days(3))
    }

    fn now() -> NaiveDateTime {
        parse_departure("Jul 01 2018 12:00PM").unwrap()
    }

    #[test]
    fn test_next_id_empty_is_one() {
        assert_eq!(next_id(Vec::new()), 1);
        assert_eq!(next_id(None), 1);
    }

    #[test]
    fn test_next_id_uses_max_not_len() {
        assert_eq!(next_id(vec![1, 2, 3]), 4);
        assert_eq!(next_id(vec![5, 2]), 6);
        assert_eq!(next_id(Some(41)), 42);
    }

    #[test]
    fn test_expiry_is_strict() {
        let now = now();
        assert!(!is_expired(&ride_departing(1, now), now));
        assert!(is_expired(&ride_departing(1, now - Duration::minutes(1)), now));
        assert!(!is_expired(&ride_departing(1, now + Duration::minutes(1)), now));
    }

    #[test]
    fn test_visibility_requires_available() {
        let now = now();
        let mut ride = ride_departing(1, now + Duration::days(1));
        assert!(is_visible(&ride, now));

        ride.availability = RideAvailability::Taken;
        assert!(!is_visible(&ride, now));

        ride.availability = RideAvailability::Cancelled;
        assert!(!is_visible(&ride, now));
        assert!(!accepts_requests(&ride, now));
    }

    #[test]
    fn test_expired_ride_is_hidden() {
        let now = now();
        let ride = ride_departing(1, parse_departure("Jun 25 2018 1:30PM").unwrap());
        assert!(!is_visible(&ride, now));
    }

    #[test]
    fn test_visible_rides_keeps_order() {
        let now = now();
        let mut taken = ride_departing(2, now + Duration::days(2));
        taken.availability = RideAvailability::Taken;
        let rides = vec![
            ride_departing(3, now + Duration::days(5)),
            taken,
            ride_departing(1, now - Duration::days(5)),
            ride_departing(4, now + Duration::hours(1)),
        ];

        let ids: Vec<i64> = visible_rides(rides, now).iter().map(|r| r.ride_id).collect();
        assert_eq!(ids, vec![3, 4]);
    }

    #[test]
    fn test_transitions() {
        use RideAvailability::*;
        assert!(can_transition(Available, Taken));
        assert!(can_transition(Available, Cancelled));
        assert!(!can_transition(Taken, Available));
        assert!(!can_transition(Cancelled, Taken));
        assert!(!can_transition(Taken, Cancelled));
        assert!(!can_transition(Available, Available));
    }

    #[test]
    fn test_request_transitions() {
        use RequestStatus::*;
        assert!(can_transition_request(Pending, Accepted));
        assert!(can_transition_request(Pending, Rejected));
        assert!(!can_transition_request(Accepted, Rejected));
        assert!(!can_transition_request(Rejected, Pending));
    }
}
