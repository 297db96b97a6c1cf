//! Administrative user model.
//!
//! An admin user carries its own identity and status together with the
//! role, right and workgroup assignments loaded from the stores.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::right::RightId;
use crate::role::RoleKey;
use crate::workgroup::WorkgroupKey;

/// Identifier of an admin user.
pub type UserId = i32;

/// Account status of an admin user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    /// Account may log in.
    #[default]
    Active,
    /// Account disabled by an administrator.
    Inactive,
    /// Account validity date has passed.
    Expired,
    /// Personal data has been scrubbed.
    Anonymized,
}

impl UserStatus {
    /// Numeric code used by the back office.
    #[must_use]
    pub const fn code(self) -> i32 {
        match self {
            Self::Active => 0,
            Self::Inactive => 1,
            Self::Expired => 5,
            Self::Anonymized => 10,
        }
    }

    /// Maps a numeric status code back to a status.
    #[must_use]
    pub const fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(Self::Active),
            1 => Some(Self::Inactive),
            5 => Some(Self::Expired),
            10 => Some(Self::Anonymized),
            _ => None,
        }
    }

    /// Returns the status name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
            Self::Expired => "expired",
            Self::Anonymized => "anonymized",
        }
    }
}

impl fmt::Display for UserStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(code) = s.parse::<i32>() {
            return Self::from_code(code).ok_or_else(|| format!("unknown status code: {code}"));
        }
        match s.to_ascii_lowercase().as_str() {
            "active" => Ok(Self::Active),
            "inactive" => Ok(Self::Inactive),
            "expired" => Ok(Self::Expired),
            "anonymized" => Ok(Self::Anonymized),
            other => Err(format!("unknown status: {other}")),
        }
    }
}

/// An administrative user of the back office.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminUser {
    // === Identity ===
    /// Unique identifier.
    pub user_id: UserId,
    /// Login name.
    pub access_code: String,
    /// Family name.
    #[serde(default)]
    pub last_name: String,
    /// Given name.
    #[serde(default)]
    pub first_name: String,
    /// Email address.
    #[serde(default)]
    pub email: String,
    /// Preferred locale.
    #[serde(default)]
    pub locale: Option<String>,

    // === Standing ===
    /// Account status.
    #[serde(default)]
    pub status: UserStatus,
    /// Privilege level; higher is more privileged.
    #[serde(default)]
    pub level: i32,
    /// Whether the user is a back-office administrator.
    #[serde(default)]
    pub admin: bool,

    // === Assignments ===
    /// Assigned role keys.
    #[serde(default)]
    pub roles: BTreeSet<RoleKey>,
    /// Assigned right ids.
    #[serde(default)]
    pub rights: BTreeSet<RightId>,
    /// Workgroups the user belongs to.
    #[serde(default)]
    pub workgroups: BTreeSet<WorkgroupKey>,

    // === Timestamps ===
    /// Last successful login.
    #[serde(default)]
    pub last_login: Option<DateTime<Utc>>,
    /// Date after which the password must be changed.
    #[serde(default)]
    pub password_max_valid_date: Option<DateTime<Utc>>,
    /// Date after which the account expires.
    #[serde(default)]
    pub account_max_valid_date: Option<DateTime<Utc>>,
}

impl AdminUser {
    /// Creates an active, unprivileged user with no assignments.
    #[must_use]
    pub fn new(user_id: UserId, access_code: impl Into<String>) -> Self {
        Self {
            user_id,
            access_code: access_code.into(),
            last_name: String::new(),
            first_name: String::new(),
            email: String::new(),
            locale: None,
            status: UserStatus::Active,
            level: 0,
            admin: false,
            roles: BTreeSet::new(),
            rights: BTreeSet::new(),
            workgroups: BTreeSet::new(),
            last_login: None,
            password_max_valid_date: None,
            account_max_valid_date: None,
        }
    }

    /// Sets the status.
    #[must_use]
    pub const fn with_status(mut self, status: UserStatus) -> Self {
        self.status = status;
        self
    }

    /// Sets the privilege level.
    #[must_use]
    pub const fn with_level(mut self, level: i32) -> Self {
        self.level = level;
        self
    }

    /// Sets the administrator flag.
    #[must_use]
    pub const fn with_admin(mut self, admin: bool) -> Self {
        self.admin = admin;
        self
    }

    /// Sets the display names.
    #[must_use]
    pub fn with_name(mut self, first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        self.first_name = first_name.into();
        self.last_name = last_name.into();
        self
    }

    /// Sets the email address.
    #[must_use]
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    /// Adds a role.
    #[must_use]
    pub fn with_role(mut self, role: impl Into<RoleKey>) -> Self {
        self.roles.insert(role.into());
        self
    }

    /// Adds a right.
    #[must_use]
    pub fn with_right(mut self, right: impl Into<RightId>) -> Self {
        self.rights.insert(right.into());
        self
    }

    /// Adds a workgroup.
    #[must_use]
    pub fn with_workgroup(mut self, workgroup: impl Into<WorkgroupKey>) -> Self {
        self.workgroups.insert(workgroup.into());
        self
    }

    /// Checks whether the account is active.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status == UserStatus::Active
    }

    /// Checks whether the user holds no role, right or workgroup.
    #[must_use]
    pub fn has_no_assignments(&self) -> bool {
        self.roles.is_empty() && self.rights.is_empty() && self.workgroups.is_empty()
    }

    /// Gets the user's full name, if any part is known.
    #[must_use]
    pub fn full_name(&self) -> Option<String> {
        match (self.first_name.is_empty(), self.last_name.is_empty()) {
            (false, false) => Some(format!("{} {}", self.first_name, self.last_name)),
            (false, true) => Some(self.first_name.clone()),
            (true, false) => Some(self.last_name.clone()),
            (true, true) => None,
        }
    }
}
