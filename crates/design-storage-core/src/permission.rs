//! Permission levels, project claim maps and the single authorization
//! checkpoint used by every mutating operation.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{DesignError, DesignResult};

/// Permission a caller holds on a project.
///
/// Variants are declared in ascending order so the derived `Ord` gives
/// `Read < Write < Admin`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PermissionLevel {
    Read,
    Write,
    Admin,
}

impl PermissionLevel {
    /// True iff holding `self` grants everything `required` grants.
    pub fn satisfies(self, required: PermissionLevel) -> bool {
        self >= required
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Read => "read",
            Self::Write => "write",
            Self::Admin => "admin",
        }
    }
}

impl fmt::Display for PermissionLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Verified project grants: project id → permission level.
///
/// Deserializes from the `prj` claim of an access token, e.g.
/// `{"1": "write", "7": "read"}`. Non-integer keys and unknown level strings
/// are rejected rather than skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClaimMap(BTreeMap<i64, PermissionLevel>);

static NO_CLAIMS: ClaimMap = ClaimMap::new();

impl ClaimMap {
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Level held on `project_id`, if any.
    pub fn level(&self, project_id: i64) -> Option<PermissionLevel> {
        self.0.get(&project_id).copied()
    }

    /// Project ids on which any level is held.
    pub fn projects(&self) -> impl Iterator<Item = i64> + '_ {
        self.0.keys().copied()
    }

    /// Require at least `required` on `project_id`.
    ///
    /// Fails with `Forbidden` when the project is `None` (public designs are
    /// not writable through project claims), when no claim exists for the
    /// project, or when the held level is too low. Callers must pass the
    /// stored `project_id` of the resource, never one taken from a payload
    /// alone.
    pub fn require(&self, project_id: Option<i64>, required: PermissionLevel) -> DesignResult<()> {
        let Some(project_id) = project_id else {
            return Err(DesignError::forbidden(format!(
                "'{required}' on public designs cannot be granted by project claims"
            )));
        };
        match self.level(project_id) {
            Some(held) if held.satisfies(required) => Ok(()),
            Some(held) => Err(DesignError::forbidden(format!(
                "'{required}' required on project {project_id}, caller holds '{held}'"
            ))),
            None => Err(DesignError::forbidden(format!(
                "no claim on project {project_id}"
            ))),
        }
    }
}

impl FromIterator<(i64, PermissionLevel)> for ClaimMap {
    fn from_iter<I: IntoIterator<Item = (i64, PermissionLevel)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Identity of the party behind a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Caller {
    /// No credential was presented.
    Anonymous,
    /// A credential was presented and verified.
    Verified(ClaimMap),
}

impl Caller {
    /// Claims used for scoping reads. Anonymous callers hold none.
    pub fn claims(&self) -> &ClaimMap {
        match self {
            Self::Anonymous => &NO_CLAIMS,
            Self::Verified(claims) => claims,
        }
    }

    /// Claims of a verified caller, or `Unauthenticated`.
    pub fn require_verified(&self) -> DesignResult<&ClaimMap> {
        match self {
            Self::Anonymous => Err(DesignError::unauthenticated("missing bearer credential")),
            Self::Verified(claims) => Ok(claims),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claims(entries: &[(i64, PermissionLevel)]) -> ClaimMap {
        entries.iter().copied().collect()
    }

    #[test]
    fn levels_are_totally_ordered() {
        use PermissionLevel::*;
        assert!(Read < Write && Write < Admin);
        assert!(Admin.satisfies(Read));
        assert!(Admin.satisfies(Write));
        assert!(Admin.satisfies(Admin));
        assert!(Write.satisfies(Read));
        assert!(!Write.satisfies(Admin));
        assert!(!Read.satisfies(Write));
    }

    #[test]
    fn claim_map_decodes_string_keys() {
        let map: ClaimMap = serde_json::from_str(r#"{"1": "write", "42": "read"}"#).unwrap();
        assert_eq!(map.level(1), Some(PermissionLevel::Write));
        assert_eq!(map.level(42), Some(PermissionLevel::Read));
        assert_eq!(map.level(2), None);
    }

    #[test]
    fn claim_map_rejects_unknown_level() {
        assert!(serde_json::from_str::<ClaimMap>(r#"{"1": "superuser"}"#).is_err());
    }

    #[test]
    fn claim_map_rejects_non_integer_project() {
        assert!(serde_json::from_str::<ClaimMap>(r#"{"abc": "read"}"#).is_err());
    }

    #[test]
    fn require_accepts_sufficient_level() {
        let map = claims(&[(1, PermissionLevel::Admin)]);
        assert!(map.require(Some(1), PermissionLevel::Read).is_ok());
        assert!(map.require(Some(1), PermissionLevel::Write).is_ok());
        assert!(map.require(Some(1), PermissionLevel::Admin).is_ok());
    }

    #[test]
    fn require_rejects_insufficient_level() {
        let map = claims(&[(1, PermissionLevel::Write)]);
        let err = map.require(Some(1), PermissionLevel::Admin).unwrap_err();
        assert!(matches!(err, DesignError::Forbidden { .. }));
    }

    #[test]
    fn require_rejects_other_project() {
        let map = claims(&[(1, PermissionLevel::Admin)]);
        let err = map.require(Some(2), PermissionLevel::Read).unwrap_err();
        assert!(matches!(err, DesignError::Forbidden { .. }));
    }

    #[test]
    fn require_rejects_public_target() {
        let map = claims(&[(1, PermissionLevel::Admin)]);
        let err = map.require(None, PermissionLevel::Write).unwrap_err();
        assert!(matches!(err, DesignError::Forbidden { .. }));
    }

    #[test]
    fn anonymous_caller_has_no_claims() {
        let caller = Caller::Anonymous;
        assert!(caller.claims().is_empty());
        assert!(matches!(
            caller.require_verified(),
            Err(DesignError::Unauthenticated { .. })
        ));
    }

    #[test]
    fn verified_caller_with_empty_claims_is_authenticated() {
        let caller = Caller::Verified(ClaimMap::new());
        assert!(caller.require_verified().unwrap().is_empty());
    }
}
