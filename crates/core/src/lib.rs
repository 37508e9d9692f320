//! `meditrack-core`: records exchanged with the MediTrack REST API.
//!
//! This crate contains **pure domain** types (no transport, no storage).

pub mod dashboard;
pub mod device;
pub mod entity;
pub mod error;
pub mod hospital;
pub mod id;
pub mod room;
pub mod spare_part;
pub mod work_order;

pub mod de;

pub use dashboard::{AdminOverview, EngineerDashboard, NurseDashboard};
pub use device::{Device, DeviceDraft, DeviceStatus, StaffMember};
pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use hospital::{Hospital, HospitalDraft};
pub use id::{DeviceId, HospitalId, RoomId, SparePartId, UserId, WorkOrderId};
pub use room::{Room, RoomDraft};
pub use spare_part::{SparePartDraft, SparePartRequest, SparePartStatus, SparePartUpdate};
pub use work_order::{WorkOrder, WorkOrderDraft, WorkOrderStatus, WorkOrderUpdate, WorkType};
