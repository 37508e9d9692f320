//! Per-role dashboard figures.

use serde::{Deserialize, Serialize};

/// Figures served by `dashboard/engineer/`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineerDashboard {
    #[serde(default)]
    pub assigned_devices: u64,
    // Older API builds call this `reported_work_orders`.
    #[serde(default, alias = "reported_work_orders")]
    pub my_work_orders: u64,
    #[serde(default)]
    pub open_work_orders: u64,
}

/// Figures served by `dashboard/nurse/`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NurseDashboard {
    #[serde(default)]
    pub total_work_orders: u64,
    #[serde(default)]
    pub open: u64,
    #[serde(default)]
    pub in_progress: u64,
    #[serde(default)]
    pub closed: u64,
}

/// Admin overview, computed client-side from the list endpoints.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminOverview {
    pub devices: usize,
    pub work_orders: usize,
    pub spare_parts: usize,
}
