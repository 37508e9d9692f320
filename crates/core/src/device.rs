//! Medical devices and the staff assigned to them.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::de::string_or_seq;
use crate::entity::Entity;
use crate::error::{DomainResult, require};
use crate::id::{DeviceId, RoomId, UserId};

/// Operational status of a device.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceStatus {
    #[default]
    Active,
    Inactive,
    Maintenance,
    Decommissioned,
}

impl DeviceStatus {
    pub const ALL: [DeviceStatus; 4] = [
        DeviceStatus::Active,
        DeviceStatus::Inactive,
        DeviceStatus::Maintenance,
        DeviceStatus::Decommissioned,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DeviceStatus::Active => "active",
            DeviceStatus::Inactive => "inactive",
            DeviceStatus::Maintenance => "maintenance",
            DeviceStatus::Decommissioned => "decommissioned",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DeviceStatus::Active => "Active",
            DeviceStatus::Inactive => "Inactive",
            DeviceStatus::Maintenance => "Maintenance",
            DeviceStatus::Decommissioned => "Decommissioned",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|st| st.as_str() == s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Device {
    pub id: DeviceId,
    pub asset_number: String,
    #[serde(default)]
    pub serial_number: String,
    pub equipment_name: String,
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub manufacturer: String,
    #[serde(default)]
    pub status: DeviceStatus,
    #[serde(default)]
    pub room: Option<RoomId>,
    #[serde(default)]
    pub room_display: Option<String>,
    #[serde(default)]
    pub assigned_engineer: Option<UserId>,
    #[serde(default)]
    pub assigned_engineer_display: Option<String>,
    #[serde(default)]
    pub assigned_nurses: Vec<UserId>,
    #[serde(default, deserialize_with = "string_or_seq")]
    pub assigned_nurses_display: Vec<String>,
    #[serde(default)]
    pub last_inventory_date: Option<NaiveDate>,
}

impl Device {
    /// `"<equipment> - <model> (<asset>)"`, as shown in device pickers.
    pub fn label(&self) -> String {
        if self.model.is_empty() {
            format!("{} ({})", self.equipment_name, self.asset_number)
        } else {
            format!(
                "{} - {} ({})",
                self.equipment_name, self.model, self.asset_number
            )
        }
    }
}

impl Entity for Device {
    type Id = DeviceId;

    fn id(&self) -> DeviceId {
        self.id
    }
}

/// A staff account as listed by `users/?type=...`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffMember {
    pub id: UserId,
    pub username: String,
}

impl Entity for StaffMember {
    type Id = UserId;

    fn id(&self) -> UserId {
        self.id
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceDraft {
    pub asset_number: String,
    pub serial_number: String,
    pub equipment_name: String,
    pub model: String,
    pub manufacturer: String,
    pub status: DeviceStatus,
    pub room: Option<RoomId>,
    pub assigned_engineer: Option<UserId>,
    pub assigned_nurses: Vec<UserId>,
    pub last_inventory_date: Option<NaiveDate>,
}

impl DeviceDraft {
    pub fn validate(&self) -> DomainResult<()> {
        require(&self.asset_number, "asset number")?;
        require(&self.serial_number, "serial number")?;
        require(&self.equipment_name, "equipment name")
    }
}

impl From<&Device> for DeviceDraft {
    fn from(d: &Device) -> Self {
        Self {
            asset_number: d.asset_number.clone(),
            serial_number: d.serial_number.clone(),
            equipment_name: d.equipment_name.clone(),
            model: d.model.clone(),
            manufacturer: d.manufacturer.clone(),
            status: d.status,
            room: d.room,
            assigned_engineer: d.assigned_engineer,
            assigned_nurses: d.assigned_nurses.clone(),
            last_inventory_date: d.last_inventory_date,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DomainError;

    fn sample_json() -> &'static str {
        r#"{
            "id": 9,
            "asset_number": "AST-2023-005",
            "serial_number": "SN-1",
            "equipment_name": "Infusion Pump",
            "model": "IP-200",
            "manufacturer": "Acme",
            "status": "maintenance",
            "room": 3,
            "room_display": "B12",
            "assigned_engineer": 5,
            "assigned_engineer_display": "eng1",
            "assigned_nurses": [7, 8],
            "assigned_nurses_display": ["n1", "n2"],
            "last_inventory_date": "2025-04-30"
        }"#
    }

    #[test]
    fn decodes_full_record() {
        let d: Device = serde_json::from_str(sample_json()).unwrap();
        assert_eq!(d.status, DeviceStatus::Maintenance);
        assert_eq!(d.assigned_nurses, vec![UserId::new(7), UserId::new(8)]);
        assert_eq!(
            d.last_inventory_date,
            NaiveDate::from_ymd_opt(2025, 4, 30)
        );
        assert_eq!(d.label(), "Infusion Pump - IP-200 (AST-2023-005)");
    }

    #[test]
    fn decodes_sparse_record() {
        let d: Device = serde_json::from_str(
            r#"{"id": 1, "asset_number": "A1", "equipment_name": "ECG", "room": null}"#,
        )
        .unwrap();
        assert_eq!(d.status, DeviceStatus::Active);
        assert!(d.room.is_none());
        assert!(d.assigned_nurses_display.is_empty());
        assert_eq!(d.label(), "ECG (A1)");
    }

    #[test]
    fn draft_round_trips_editable_fields() {
        let d: Device = serde_json::from_str(sample_json()).unwrap();
        let draft = DeviceDraft::from(&d);
        assert!(draft.validate().is_ok());

        let body = serde_json::to_value(&draft).unwrap();
        assert_eq!(body["status"], "maintenance");
        assert_eq!(body["last_inventory_date"], "2025-04-30");
        assert_eq!(body["assigned_nurses"], serde_json::json!([7, 8]));
    }

    #[test]
    fn draft_requires_identifying_fields() {
        let draft = DeviceDraft {
            asset_number: "A1".into(),
            ..DeviceDraft::default()
        };
        assert_eq!(
            draft.validate(),
            Err(DomainError::validation("serial number is required"))
        );
    }

    #[test]
    fn status_parse_matches_wire_names() {
        for st in DeviceStatus::ALL {
            assert_eq!(DeviceStatus::parse(st.as_str()), Some(st));
        }
        assert_eq!(DeviceStatus::parse("broken"), None);
    }
}
