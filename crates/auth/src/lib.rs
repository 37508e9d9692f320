//! `meditrack-auth`: who is logged in, and where they may go.
//!
//! This crate is intentionally decoupled from HTTP and from any UI toolkit:
//! storage is a trait, navigation is a trait, and every routing decision is a
//! plain function of the session snapshot.

pub mod guard;
pub mod permissions;
pub mod roles;
pub mod router;
pub mod routes;
pub mod session;
pub mod storage;
pub mod store;
pub mod subscription;

pub use guard::{AuthzError, GuardDecision, authorize, guard};
pub use permissions::{Capability, DeviceScope, WorkOrderScope};
pub use roles::Role;
pub use router::{NavState, Navigator, RoleRouter, RouteController, dashboard_for};
pub use routes::AppRoute;
pub use session::{AuthSnapshot, LoginResponse, Session, SessionError, SessionEvent};
pub use storage::{MemoryStorage, SessionStorage, StorageError};
pub use store::SessionStore;
pub use subscription::Subscription;
