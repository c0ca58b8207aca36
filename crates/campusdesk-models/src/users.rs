//! The signed-in user's identity and scope anchors.

use campusdesk_core::permissions::{RawPermissions, Role};
use campusdesk_core::serde::deserialize_optional_id;
use serde::{Deserialize, Serialize};

use crate::ids::{CollegeId, UserId};

/// Identity-scoped defaults for the session.
///
/// `college_id` is the organizational home of a user who cannot pick a
/// college (for example a teacher). It never changes during a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserContext {
    #[serde(default, deserialize_with = "deserialize_optional_id")]
    pub user_id: Option<UserId>,
    #[serde(default)]
    pub email: Option<String>,
    pub role: Role,
    #[serde(default, deserialize_with = "deserialize_optional_id")]
    pub college_id: Option<CollegeId>,
}

impl UserContext {
    pub fn new(role: Role) -> Self {
        Self {
            user_id: None,
            email: None,
            role,
            college_id: None,
        }
    }

    pub fn with_college(mut self, college_id: impl Into<CollegeId>) -> Self {
        self.college_id = Some(college_id.into());
        self
    }
}

/// Response of the permission endpoint: who the user is and what they may do.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PermissionPayload {
    pub user: UserContext,
    #[serde(default)]
    pub permissions: RawPermissions,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_context_accepts_string_ids() {
        let json = r#"{"user_id": "15", "email": "t@college.edu", "role": "teacher", "college_id": "3"}"#;
        let user: UserContext = serde_json::from_str(json).unwrap();
        assert_eq!(user.user_id, Some(UserId::new(15)));
        assert_eq!(user.college_id, Some(CollegeId::new(3)));
        assert_eq!(user.role, Role::Teacher);
    }

    #[test]
    fn test_user_context_empty_college_is_absent() {
        let json = r#"{"role": "super_admin", "college_id": ""}"#;
        let user: UserContext = serde_json::from_str(json).unwrap();
        assert_eq!(user.college_id, None);
        assert_eq!(user.user_id, None);
    }

    #[test]
    fn test_permission_payload_without_permissions() {
        let json = r#"{"user": {"role": "student", "college_id": 2}}"#;
        let payload: PermissionPayload = serde_json::from_str(json).unwrap();
        assert!(payload.permissions.is_empty());
        assert_eq!(payload.user.college_id, Some(CollegeId::new(2)));
    }
}
