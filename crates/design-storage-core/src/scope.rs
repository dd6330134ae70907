//! Visibility scoping for stored designs.

use crate::permission::ClaimMap;

/// The set of designs a caller may observe: every public design plus every
/// design owned by a project the caller holds any claim on. The default
/// scope admits only public designs.
///
/// List and get-by-id are both filtered through the same scope, so a caller
/// can never fetch a design by id that a listing would hide.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceScope {
    projects: Vec<i64>,
}

impl ResourceScope {
    /// Scope for a caller holding `claims`. Any level, including `read`,
    /// grants visibility.
    pub fn for_claims(claims: &ClaimMap) -> Self {
        Self {
            projects: claims.projects().collect(),
        }
    }

    /// In-memory form of the storage visibility filter; both must agree.
    pub fn permits(&self, project_id: Option<i64>) -> bool {
        match project_id {
            None => true,
            Some(id) => self.projects.binary_search(&id).is_ok(),
        }
    }

    /// Visible project ids in ascending order.
    pub fn project_ids(&self) -> &[i64] {
        &self.projects
    }
}
