//! Maintenance work orders raised against devices.

use serde::{Deserialize, Serialize};

use crate::entity::Entity;
use crate::error::{DomainError, DomainResult, require};
use crate::id::{DeviceId, UserId, WorkOrderId};

/// Kind of maintenance requested.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WorkType {
    /// Corrective maintenance (something is broken).
    #[default]
    #[serde(rename = "CM", alias = "cm")]
    Corrective,
    /// Planned preventive maintenance.
    #[serde(rename = "PPM", alias = "ppm")]
    Preventive,
}

impl WorkType {
    pub const ALL: [WorkType; 2] = [WorkType::Corrective, WorkType::Preventive];

    pub fn as_str(&self) -> &'static str {
        match self {
            WorkType::Corrective => "CM",
            WorkType::Preventive => "PPM",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            WorkType::Corrective => "Corrective Maintenance (CM)",
            WorkType::Preventive => "Planned Preventive Maintenance (PPM)",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkOrderStatus {
    #[default]
    Open,
    InProgress,
    Closed,
}

impl WorkOrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkOrderStatus::Open => "open",
            WorkOrderStatus::InProgress => "in_progress",
            WorkOrderStatus::Closed => "closed",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            WorkOrderStatus::Open => "Open",
            WorkOrderStatus::InProgress => "In Progress",
            WorkOrderStatus::Closed => "Closed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkOrder {
    pub id: WorkOrderId,
    pub work_number: String,
    pub device: DeviceId,
    #[serde(default)]
    pub device_display: String,
    #[serde(default)]
    pub work_type: WorkType,
    #[serde(default)]
    pub status: WorkOrderStatus,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub reported_date: String,
    #[serde(default)]
    pub completed_date: Option<String>,
    #[serde(default)]
    pub assigned_to_display: Option<String>,
    #[serde(default)]
    pub assigned_to_id: Option<UserId>,
    #[serde(default)]
    pub created_by_display: String,
    #[serde(default)]
    pub created_by_id: Option<UserId>,
}

impl WorkOrder {
    pub fn is_closed(&self) -> bool {
        self.status == WorkOrderStatus::Closed
    }

    pub fn is_open(&self) -> bool {
        !self.is_closed()
    }

    pub fn created_by(&self, username: &str) -> bool {
        self.created_by_display == username
    }
}

impl Entity for WorkOrder {
    type Id = WorkOrderId;

    fn id(&self) -> WorkOrderId {
        self.id
    }
}

/// Work orders reported by `username` that are not yet closed.
pub fn open_reported_by<'a>(
    orders: &'a [WorkOrder],
    username: &'a str,
) -> impl Iterator<Item = &'a WorkOrder> + 'a {
    orders
        .iter()
        .filter(move |o| o.created_by(username) && o.is_open())
}

/// Work orders reported by `username` that have been closed.
pub fn closed_reported_by<'a>(
    orders: &'a [WorkOrder],
    username: &'a str,
) -> impl Iterator<Item = &'a WorkOrder> + 'a {
    orders
        .iter()
        .filter(move |o| o.created_by(username) && o.is_closed())
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkOrderDraft {
    pub device: Option<DeviceId>,
    pub description: String,
    pub work_type: WorkType,
}

impl WorkOrderDraft {
    pub fn validate(&self) -> DomainResult<()> {
        if self.device.is_none() {
            return Err(DomainError::validation("device is required"));
        }
        require(&self.description, "description")
    }
}

/// Partial update (`PATCH`) of a work order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkOrderUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<WorkOrderStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl WorkOrderUpdate {
    pub fn close() -> Self {
        Self {
            status: Some(WorkOrderStatus::Closed),
            ..Self::default()
        }
    }
}
