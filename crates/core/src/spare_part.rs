//! Spare-part requests raised by engineers and reviewed by admins.

use serde::{Deserialize, Serialize};

use crate::entity::Entity;
use crate::error::{DomainError, DomainResult, require};
use crate::id::{DeviceId, SparePartId};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SparePartStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl SparePartStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SparePartStatus::Pending => "pending",
            SparePartStatus::Approved => "approved",
            SparePartStatus::Rejected => "rejected",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SparePartRequest {
    pub id: SparePartId,
    #[serde(default)]
    pub request_number: String,
    pub device: DeviceId,
    #[serde(default)]
    pub device_display: String,
    #[serde(default)]
    pub description: String,
    pub quantity: u32,
    #[serde(default)]
    pub status: SparePartStatus,
    #[serde(default)]
    pub requested_by_display: String,
    #[serde(default)]
    pub request_date: String,
}

impl SparePartRequest {
    pub fn is_pending(&self) -> bool {
        self.status == SparePartStatus::Pending
    }
}

impl Entity for SparePartRequest {
    type Id = SparePartId;

    fn id(&self) -> SparePartId {
        self.id
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SparePartDraft {
    pub device: Option<DeviceId>,
    pub description: String,
    pub quantity: u32,
}

impl Default for SparePartDraft {
    fn default() -> Self {
        Self {
            device: None,
            description: String::new(),
            quantity: 1,
        }
    }
}

impl SparePartDraft {
    pub fn validate(&self) -> DomainResult<()> {
        if self.device.is_none() {
            return Err(DomainError::validation("device is required"));
        }
        require(&self.description, "description")?;
        if self.quantity == 0 {
            return Err(DomainError::validation("quantity must be at least 1"));
        }
        Ok(())
    }
}

/// Partial update (`PATCH`) of a spare-part request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SparePartUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<SparePartStatus>,
}

impl SparePartUpdate {
    pub fn approve() -> Self {
        Self {
            status: Some(SparePartStatus::Approved),
        }
    }

    pub fn reject() -> Self {
        Self {
            status: Some(SparePartStatus::Rejected),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_draft_asks_for_one_part() {
        let draft = SparePartDraft::default();
        assert_eq!(draft.quantity, 1);
        assert_eq!(
            draft.validate(),
            Err(DomainError::validation("device is required"))
        );
    }

    #[test]
    fn zero_quantity_is_rejected() {
        let draft = SparePartDraft {
            device: Some(DeviceId::new(2)),
            description: "battery pack".into(),
            quantity: 0,
        };
        assert_eq!(
            draft.validate(),
            Err(DomainError::validation("quantity must be at least 1"))
        );
    }

    #[test]
    fn decodes_request() {
        let r: SparePartRequest = serde_json::from_str(
            r#"{"id": 4, "request_number": "SPR-202504-0002", "device": 2,
                "quantity": 3, "status": "approved"}"#,
        )
        .unwrap();
        assert!(!r.is_pending());
        assert_eq!(
            serde_json::to_value(SparePartUpdate::reject()).unwrap(),
            serde_json::json!({ "status": "rejected" })
        );
    }
}
