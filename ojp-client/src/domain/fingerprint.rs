//! Content fingerprints for trips.
//!
//! The trip id assigned by a journey planner is only unique within one
//! response, so the same connection found by two overlapping searches gets
//! two different ids. A fingerprint is computed from what the passenger
//! experiences instead: per leg, the service, stops and timetabled times.
//! Estimated times are ignored so that a delay update does not make a trip
//! look new.

use std::fmt;

use serde::{Serialize, Serializer};
use sha2::{Digest, Sha256};

use super::{LegType, Timestamp, Trip};

/// Placeholder contributed by a continuous leg, whose content is not
/// modelled.
const CONTINUOUS_LEG_TOKEN: &str = "continuousLeg";

/// SHA-256 digest identifying a trip by content.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TripFingerprint([u8; 32]);

impl TripFingerprint {
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Display for TripFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

impl fmt::Debug for TripFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TripFingerprint({self})")
    }
}

impl Serialize for TripFingerprint {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Fields are length-prefixed so that ("ab", "c") and ("a", "bc") differ.
struct Framed(Sha256);

impl Framed {
    fn tag(&mut self, tag: u8) {
        self.0.update([tag]);
    }

    fn field(&mut self, bytes: &[u8]) {
        self.0.update((bytes.len() as u64).to_be_bytes());
        self.0.update(bytes);
    }

    fn str(&mut self, s: &str) {
        self.field(s.as_bytes());
    }

    fn time(&mut self, t: &Timestamp) {
        self.field(&t.timestamp().to_be_bytes());
    }

    fn seconds(&mut self, secs: i64) {
        self.field(&secs.to_be_bytes());
    }
}

/// Compute the fingerprint of a trip.
///
/// Two trips with the same legs in the same order get the same
/// fingerprint, whatever their ids and estimated times. Swapping legs
/// changes it.
pub fn fingerprint(trip: &Trip) -> TripFingerprint {
    let mut h = Framed(Sha256::new());
    h.field(&(trip.legs.len() as u64).to_be_bytes());

    for leg in &trip.legs {
        match &leg.leg_type {
            LegType::Continuous(_) => {
                h.tag(b'C');
                h.str(CONTINUOUS_LEG_TOKEN);
            }
            LegType::Timed(timed) => {
                h.tag(b'T');
                h.str(&timed.service.published_service_name.text);
                h.str(&timed.leg_board.stop.stop_point_name.text);
                h.time(&timed.leg_board.service_departure.timetabled_time);
                h.time(&timed.leg_alight.service_arrival.timetabled_time);
                h.str(&timed.leg_alight.stop.stop_point_name.text);
            }
            LegType::Transfer(transfer) => {
                h.tag(b'X');
                h.field(&(transfer.transfer_types.len() as u64).to_be_bytes());
                for t in &transfer.transfer_types {
                    h.str(t.as_wire());
                }
                h.seconds(transfer.duration.num_seconds());
            }
        }
    }

    TripFingerprint(h.0.finalize().into())
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::domain::testing::{timed_leg, transfer_leg, trip_at};
    use proptest::prelude::*;

    fn leg_strategy() -> impl Strategy<Value = crate::domain::Leg> {
        prop_oneof![
            (0u32..60, "[A-Z]{1,3}", "[A-Z][a-z]{2,8}").prop_map(|(minute, line, stop)| {
                timed_leg(
                    &line,
                    &stop,
                    &format!("10:{minute:02}"),
                    "Zürich HB",
                    &format!("11:{minute:02}"),
                )
            }),
            (1i64..30).prop_map(transfer_leg),
        ]
    }

    proptest! {
        #[test]
        fn deterministic(legs in prop::collection::vec(leg_strategy(), 1..6)) {
            let a = trip_at("x", "10:00", legs.clone());
            let b = trip_at("y", "10:00", legs);
            prop_assert_eq!(fingerprint(&a), fingerprint(&b));
        }

        #[test]
        fn order_sensitive(a in leg_strategy(), b in leg_strategy()) {
            prop_assume!(a.leg_type != b.leg_type);
            let forward = trip_at("t", "10:00", vec![a.clone(), b.clone()]);
            let backward = trip_at("t", "10:00", vec![b, a]);
            prop_assert_ne!(fingerprint(&forward), fingerprint(&backward));
        }
    }
}
