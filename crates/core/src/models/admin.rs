use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::BookingError;

/// Role of an admin within a salon.
///
/// Variants are ordered by privilege: `Owner` is the most privileged and
/// compares as the smallest value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdminRole {
    Owner = 1,
    Manager = 2,
    Supervisor = 3,
    Employee = 4,
}

impl AdminRole {
    pub fn as_i16(self) -> i16 {
        self as i16
    }

    /// An admin may manage another admin of the same salon when its role is
    /// at least as privileged.
    pub fn can_manage(self, other: AdminRole) -> bool {
        self <= other
    }
}

impl TryFrom<i16> for AdminRole {
    type Error = BookingError;

    fn try_from(value: i16) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(AdminRole::Owner),
            2 => Ok(AdminRole::Manager),
            3 => Ok(AdminRole::Supervisor),
            4 => Ok(AdminRole::Employee),
            other => Err(BookingError::Validation(format!("Unknown admin role: {}", other))),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Admin {
    pub hairdresser_id: Uuid,
    pub user_id: Uuid,
    pub role: AdminRole,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAdminRequest {
    pub user_id: Uuid,
    pub role: AdminRole,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateAdminRequest {
    pub role: AdminRole,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminExistsResponse {
    pub exists: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompareRoleResponse {
    pub can_manage: bool,
}
