use serde::{Deserialize, Serialize};

/// An authenticated identity.
///
/// Users are issued by the mock login and never change afterwards. The
/// serialized form is what gets written to local storage under the `user` key.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: String,
    pub role: UserRole,
}

/// A position in the linear role hierarchy.
///
/// - `Developer`: Can view and edit tasks
/// - `ProjectManager`: Everything a developer can, plus project management
/// - `Admin`: Unrestricted
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum UserRole {
    Developer,
    ProjectManager,
    Admin,
}

impl UserRole {
    pub const ALL: [UserRole; 3] = [Self::Developer, Self::ProjectManager, Self::Admin];

    /// Position in the hierarchy. Higher ranks include every lower one.
    pub fn rank(&self) -> u8 {
        match self {
            Self::Developer => 1,
            Self::ProjectManager => 2,
            Self::Admin => 3,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Developer => "Developer",
            Self::ProjectManager => "ProjectManager",
            Self::Admin => "Admin",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "Developer" => Some(Self::Developer),
            "ProjectManager" => Some(Self::ProjectManager),
            "Admin" => Some(Self::Admin),
            _ => None,
        }
    }
}
