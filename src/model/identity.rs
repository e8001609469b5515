use serde::{Deserialize, Serialize};

/// Signed-in staff member, as supplied by the authentication collaborator.
///
/// Only `uid` (stamped as `waiterId`) and `role` (which dashboard to build) are read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffIdentity {
    pub uid: String,
    pub role: StaffRole,
    pub email: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StaffRole {
    Waiter,
    Chef,
    Reception,
}
