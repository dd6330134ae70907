//! Design service — authorized access to stored designs.

use design_storage_core::error::DesignResult;
use design_storage_core::models::design::{CreateDesign, Design, UpdateDesign};
use design_storage_core::permission::{Caller, PermissionLevel};
use design_storage_core::repository::DesignRepository;
use design_storage_core::scope::ResourceScope;
use tracing::{debug, info, warn};

use crate::token::ClaimVerifier;

/// Orchestrates claim verification, visibility scoping and permission checks
/// around a [`DesignRepository`].
///
/// Generic over the repository so the auth layer has no dependency on the
/// database crate. Every operation re-reads the target design; nothing is
/// cached between calls.
pub struct DesignService<R: DesignRepository> {
    repo: R,
    verifier: ClaimVerifier,
}

impl<R: DesignRepository> DesignService<R> {
    pub fn new(repo: R, verifier: ClaimVerifier) -> Self {
        Self { repo, verifier }
    }

    /// Resolve the caller behind an optional bearer credential.
    ///
    /// No credential yields [`Caller::Anonymous`]. A credential that fails
    /// verification is rejected outright, never downgraded to anonymous.
    pub fn authenticate(&self, bearer: Option<&str>) -> DesignResult<Caller> {
        let Some(token) = bearer else {
            return Ok(Caller::Anonymous);
        };
        match self.verifier.verify(token) {
            Ok(claims) => Ok(Caller::Verified(claims)),
            Err(e) => {
                warn!(error = %e, "Rejected bearer credential");
                Err(e.into())
            }
        }
    }

    /// All designs visible to `caller`.
    pub async fn list(&self, caller: &Caller) -> DesignResult<Vec<Design>> {
        let scope = ResourceScope::for_claims(caller.claims());
        let designs = self.repo.list_visible(&scope).await?;
        debug!(count = designs.len(), "Listed designs");
        Ok(designs)
    }

    pub async fn get(&self, caller: &Caller, id: i64) -> DesignResult<Design> {
        let scope = ResourceScope::for_claims(caller.claims());
        self.repo.get_visible(id, &scope).await
    }

    /// Create a design. Requires `write` on the target project.
    pub async fn create(&self, caller: &Caller, input: CreateDesign) -> DesignResult<Design> {
        let claims = caller.require_verified()?;
        input.validate()?;
        claims
            .require(input.project_id, PermissionLevel::Write)
            .inspect_err(|e| warn!(project_id = ?input.project_id, error = %e, "Create denied"))?;

        let design = self.repo.create(input).await?;
        info!(design_id = design.id, project_id = ?design.project_id, "Design created");
        Ok(design)
    }

    /// Apply a partial update. Requires `write` on the stored project and,
    /// when the update moves the design, `write` on the destination too.
    pub async fn update(
        &self,
        caller: &Caller,
        id: i64,
        input: UpdateDesign,
    ) -> DesignResult<Design> {
        let claims = caller.require_verified()?;
        input.validate()?;

        let scope = ResourceScope::for_claims(claims);
        let existing = self.repo.get_visible(id, &scope).await?;
        claims
            .require(existing.project_id, PermissionLevel::Write)
            .inspect_err(|e| warn!(design_id = id, error = %e, "Update denied"))?;
        if let Some(destination) = input.moves_from(existing.project_id) {
            claims
                .require(destination, PermissionLevel::Write)
                .inspect_err(|e| {
                    warn!(design_id = id, destination = ?destination, error = %e, "Move denied")
                })?;
        }

        let design = self.repo.update(id, existing.project_id, input).await?;
        info!(design_id = id, project_id = ?design.project_id, "Design updated");
        Ok(design)
    }

    /// Delete a design. Requires `admin` on the stored project.
    pub async fn delete(&self, caller: &Caller, id: i64) -> DesignResult<()> {
        let claims = caller.require_verified()?;

        let scope = ResourceScope::for_claims(claims);
        let existing = self.repo.get_visible(id, &scope).await?;
        claims
            .require(existing.project_id, PermissionLevel::Admin)
            .inspect_err(|e| warn!(design_id = id, error = %e, "Delete denied"))?;

        self.repo.delete(id, existing.project_id).await?;
        info!(design_id = id, project_id = ?existing.project_id, "Design deleted");
        Ok(())
    }

    /// Readiness probe against storage.
    pub async fn ready(&self) -> DesignResult<()> {
        self.repo.ping().await
    }
}
