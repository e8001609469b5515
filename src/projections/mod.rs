//! # Dashboard Projections
//!
//! Pure views derived from collection snapshots, one per staff role, plus
//! [`LiveDashboard`] which keeps a role's view current as the collections change.

pub mod kitchen;
pub mod live;
pub mod reception;
pub mod waiter;

pub use kitchen::KitchenBoard;
pub use live::{DashboardView, LiveDashboard};
pub use reception::{ActiveSession, ReceptionView};
pub use waiter::{TableCard, WaiterView};
