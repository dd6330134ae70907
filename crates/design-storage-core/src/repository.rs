//! Repository trait definitions for data access abstraction.
//!
//! All repository operations are async. Reads take a [`ResourceScope`] so
//! visibility filtering happens in storage, identically for lookups and
//! listings.

use crate::error::DesignResult;
use crate::models::design::{CreateDesign, Design, UpdateDesign};
use crate::scope::ResourceScope;

pub trait DesignRepository: Send + Sync {
    /// Persist a new design under a freshly allocated id.
    fn create(&self, input: CreateDesign) -> impl Future<Output = DesignResult<Design>> + Send;

    /// Fetch a design by id if `scope` admits it. Hidden and absent designs
    /// both yield `NotFound`.
    fn get_visible(
        &self,
        id: i64,
        scope: &ResourceScope,
    ) -> impl Future<Output = DesignResult<Design>> + Send;

    fn list_visible(
        &self,
        scope: &ResourceScope,
    ) -> impl Future<Output = DesignResult<Vec<Design>>> + Send;

    /// Apply a partial update, provided the stored owner still equals
    /// `owner`. Otherwise nothing is written and `NotFound` is returned.
    fn update(
        &self,
        id: i64,
        owner: Option<i64>,
        input: UpdateDesign,
    ) -> impl Future<Output = DesignResult<Design>> + Send;

    /// Delete a design, provided the stored owner still equals `owner`.
    fn delete(&self, id: i64, owner: Option<i64>) -> impl Future<Output = DesignResult<()>> + Send;

    /// Side-effect-free liveness check against storage.
    fn ping(&self) -> impl Future<Output = DesignResult<()>> + Send;
}
