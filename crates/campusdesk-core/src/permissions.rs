//! Permission keys and normalization of the backend permission payload.
//!
//! The backend describes grants as a nested document
//! `module -> action -> { enabled, scope }`. Front-end code never reads that
//! shape directly; it is normalized once into [`NormalizedPermissions`], a
//! closed capability set plus the user's [`Role`].
//!
//! # Example
//!
//! ```ignore
//! use campusdesk_core::permissions::{self, normalize, RawPermissions, Role};
//!
//! let raw: RawPermissions = serde_json::from_str(payload)?;
//! let perms = normalize(Role::Teacher, raw);
//!
//! if perms.can_choose_class() {
//!     // show the class selector
//! }
//!
//! if perms.has_permission(permissions::SECTIONS_VIEW) {
//!     // ...
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

// =============================================================================
// Context permissions
// =============================================================================

/// Permission to view (and therefore pick) colleges
pub const COLLEGES_VIEW: &str = "colleges:view";
/// Permission to view (and therefore pick) classes
pub const CLASSES_VIEW: &str = "classes:view";
/// Permission to view (and therefore pick) sections
pub const SECTIONS_VIEW: &str = "sections:view";

// =============================================================================
// Settings permissions
// =============================================================================

/// Permission to read UI settings
pub const SETTINGS_READ: &str = "settings:read";
/// Permission to update UI settings
pub const SETTINGS_UPDATE: &str = "settings:update";

/// Breadth of data a grant applies to.
///
/// Ordered from narrowest to widest so that `scope >= Scope::Team` reads
/// naturally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    Mine,
    Team,
    Department,
    All,
}

/// A single `module:action` grant as sent by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionGrant {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_scope")]
    pub scope: Scope,
}

fn default_scope() -> Scope {
    Scope::Mine
}

/// The raw nested permission document: `module -> action -> grant`.
pub type RawPermissions = BTreeMap<String, BTreeMap<String, ActionGrant>>;

/// Roles known to the front-end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    SuperAdmin,
    CollegeAdmin,
    Teacher,
    Student,
    StoreManager,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SuperAdmin => "super_admin",
            Self::CollegeAdmin => "college_admin",
            Self::Teacher => "teacher",
            Self::Student => "student",
            Self::StoreManager => "store_manager",
        }
    }

    /// Capabilities every user with this role has regardless of grants.
    fn default_capabilities(&self) -> &'static [Capability] {
        match self {
            Self::SuperAdmin => &[
                Capability::ChooseCollege,
                Capability::ChooseClass,
                Capability::ChooseSection,
            ],
            Self::CollegeAdmin | Self::Teacher => {
                &[Capability::ChooseClass, Capability::ChooseSection]
            }
            Self::Student | Self::StoreManager => &[],
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "super_admin" | "superadmin" => Ok(Self::SuperAdmin),
            "college_admin" | "collegeadmin" => Ok(Self::CollegeAdmin),
            "teacher" => Ok(Self::Teacher),
            "student" => Ok(Self::Student),
            "store_manager" | "storemanager" => Ok(Self::StoreManager),
            other => Err(format!("unknown role '{}'", other)),
        }
    }
}

/// Closed set of context capabilities consumed by the selectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    ChooseCollege,
    ChooseClass,
    ChooseSection,
}

/// Grants that widen a role's default capabilities: `(permission key, minimum
/// scope, capability)`.
const CAPABILITY_GRANTS: &[(&str, Scope, Capability)] = &[
    (COLLEGES_VIEW, Scope::All, Capability::ChooseCollege),
    (CLASSES_VIEW, Scope::Team, Capability::ChooseClass),
    (SECTIONS_VIEW, Scope::Team, Capability::ChooseSection),
];

/// Flat, read-only permission view derived once from a raw payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedPermissions {
    role: Role,
    capabilities: BTreeSet<Capability>,
    grants: BTreeMap<String, Scope>,
}

impl NormalizedPermissions {
    pub fn role(&self) -> Role {
        self.role
    }

    pub fn has_capability(&self, capability: Capability) -> bool {
        self.capabilities.contains(&capability)
    }

    pub fn capabilities(&self) -> impl Iterator<Item = Capability> + '_ {
        self.capabilities.iter().copied()
    }

    pub fn can_choose_college(&self) -> bool {
        self.has_capability(Capability::ChooseCollege)
    }

    pub fn can_choose_class(&self) -> bool {
        self.has_capability(Capability::ChooseClass)
    }

    pub fn can_choose_section(&self) -> bool {
        self.has_capability(Capability::ChooseSection)
    }

    pub fn is_super_admin(&self) -> bool {
        self.role == Role::SuperAdmin
    }

    pub fn is_college_admin(&self) -> bool {
        self.role == Role::CollegeAdmin
    }

    pub fn is_teacher(&self) -> bool {
        self.role == Role::Teacher
    }

    pub fn is_student(&self) -> bool {
        self.role == Role::Student
    }

    pub fn is_store_manager(&self) -> bool {
        self.role == Role::StoreManager
    }

    /// Whether an enabled grant exists for `module:action`.
    pub fn has_permission(&self, key: &str) -> bool {
        self.grants.contains_key(key)
    }

    /// Whether any of the given `module:action` keys is granted.
    pub fn has_any_permission(&self, keys: &[&str]) -> bool {
        keys.iter().any(|k| self.has_permission(k))
    }

    /// Scope of an enabled grant, if any.
    pub fn scope_of(&self, key: &str) -> Option<Scope> {
        self.grants.get(key).copied()
    }
}

/// Normalize a raw payload for a user of the given role.
///
/// Disabled grants are dropped. The result depends only on its inputs.
pub fn normalize(role: Role, raw: RawPermissions) -> NormalizedPermissions {
    let grants: BTreeMap<String, Scope> = raw
        .into_iter()
        .flat_map(|(module, actions)| {
            actions
                .into_iter()
                .filter(|(_, grant)| grant.enabled)
                .map(move |(action, grant)| (format!("{}:{}", module, action), grant.scope))
        })
        .collect();

    let mut capabilities: BTreeSet<Capability> =
        role.default_capabilities().iter().copied().collect();

    for (key, min_scope, capability) in CAPABILITY_GRANTS {
        if grants.get(*key).is_some_and(|scope| scope >= min_scope) {
            capabilities.insert(*capability);
        }
    }

    tracing::debug!(
        role = %role,
        capabilities = ?capabilities,
        grants = grants.len(),
        "Permissions normalized"
    );

    NormalizedPermissions {
        role,
        capabilities,
        grants,
    }
}
