//! Rooms inside a hospital; devices are located in rooms.

use serde::{Deserialize, Serialize};

use crate::entity::Entity;
use crate::error::{DomainError, DomainResult, require};
use crate::id::{HospitalId, RoomId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub id: RoomId,
    pub room_number: String,
    pub hospital: HospitalId,
    #[serde(default)]
    pub hospital_name: Option<String>,
}

impl Room {
    /// `"<room> (<hospital>)"` when the hospital name is known.
    pub fn label(&self) -> String {
        match &self.hospital_name {
            Some(h) if !h.is_empty() => format!("{} ({})", self.room_number, h),
            _ => self.room_number.clone(),
        }
    }
}

impl Entity for Room {
    type Id = RoomId;

    fn id(&self) -> RoomId {
        self.id
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomDraft {
    pub room_number: String,
    pub hospital: Option<HospitalId>,
}

impl RoomDraft {
    pub fn validate(&self) -> DomainResult<()> {
        require(&self.room_number, "room number")?;
        if self.hospital.is_none() {
            return Err(DomainError::validation("hospital is required"));
        }
        Ok(())
    }
}

impl From<&Room> for RoomDraft {
    fn from(r: &Room) -> Self {
        Self {
            room_number: r.room_number.clone(),
            hospital: Some(r.hospital),
        }
    }
}
