//! Strongly-typed identifiers used across the domain.
//!
//! The API uses integer primary keys; each record kind gets its own newtype so
//! a room id can never be sent where a device id is expected.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Identifier of a hospital.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HospitalId(i64);

/// Identifier of a room within a hospital.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomId(i64);

/// Identifier of a medical device.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeviceId(i64);

/// Identifier of a maintenance work order.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorkOrderId(i64);

/// Identifier of a spare-part request.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SparePartId(i64);

/// Identifier of a staff account (engineer, nurse, admin).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(i64);

macro_rules! impl_record_id {
    ($t:ty, $name:literal) => {
        impl $t {
            pub const fn new(raw: i64) -> Self {
                Self(raw)
            }

            pub const fn get(&self) -> i64 {
                self.0
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                core::fmt::Display::fmt(&self.0, f)
            }
        }

        impl From<i64> for $t {
            fn from(value: i64) -> Self {
                Self(value)
            }
        }

        impl From<$t> for i64 {
            fn from(value: $t) -> Self {
                value.0
            }
        }

        impl FromStr for $t {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let raw = s
                    .trim()
                    .parse::<i64>()
                    .map_err(|e| DomainError::invalid_id(format!("{}: {}", $name, e)))?;
                Ok(Self(raw))
            }
        }
    };
}

impl_record_id!(HospitalId, "HospitalId");
impl_record_id!(RoomId, "RoomId");
impl_record_id!(DeviceId, "DeviceId");
impl_record_id!(WorkOrderId, "WorkOrderId");
impl_record_id!(SparePartId, "SparePartId");
impl_record_id!(UserId, "UserId");

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn parses_route_param() {
        let id: DeviceId = " 42 ".parse().unwrap();
        assert_eq!(id, DeviceId::new(42));
        assert_eq!(id.to_string(), "42");
    }

    #[test]
    fn rejects_non_numeric() {
        let err = "new".parse::<RoomId>().unwrap_err();
        match err {
            DomainError::InvalidId(msg) => assert!(msg.starts_with("RoomId")),
            other => panic!("expected InvalidId, got {other:?}"),
        }
    }

    #[test]
    fn serializes_as_bare_integer() {
        let json = serde_json::to_string(&HospitalId::new(3)).unwrap();
        assert_eq!(json, "3");
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: a path segment with any letter in it is never an id, so
        /// literal segments like `new` or `open` cannot be mistaken for one.
        #[test]
        fn segments_with_letters_are_not_ids(segment in "[0-9]{0,3}[a-z][a-z0-9]{0,6}") {
            prop_assert!(segment.parse::<WorkOrderId>().is_err());
        }
    }
}
