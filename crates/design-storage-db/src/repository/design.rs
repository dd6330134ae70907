//! SurrealDB implementation of [`DesignRepository`].

use chrono::{DateTime, Utc};
use design_storage_core::error::DesignResult;
use design_storage_core::models::design::{CreateDesign, Design, DesignContent, UpdateDesign};
use design_storage_core::repository::DesignRepository;
use design_storage_core::scope::ResourceScope;
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;

use crate::error::DbError;

/// Storage rendering of [`ResourceScope::permits`]. Lookups and listings
/// both embed this exact clause and bind `$projects` to the scope's ids.
const VISIBLE_IN_SCOPE: &str = "(project_id IS NONE OR project_id IN $projects)";

#[derive(Debug, SurrealValue)]
struct DesignRow {
    project_id: Option<i64>,
    name: String,
    model_id: i64,
    design: serde_json::Value,
    method: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(Debug, SurrealValue)]
struct DesignRowWithId {
    record_id: i64,
    project_id: Option<i64>,
    name: String,
    model_id: i64,
    design: serde_json::Value,
    method: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl DesignRowWithId {
    fn try_into_design(self) -> Result<Design, DbError> {
        DesignRow {
            project_id: self.project_id,
            name: self.name,
            model_id: self.model_id,
            design: self.design,
            method: self.method,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
        .try_into_design(self.record_id)
    }
}

impl DesignRow {
    fn try_into_design(self, id: i64) -> Result<Design, DbError> {
        let design: DesignContent = serde_json::from_value(self.design)
            .map_err(|e| DbError::Serialization(format!("design {id} content: {e}")))?;
        Ok(Design {
            id,
            project_id: self.project_id,
            name: self.name,
            model_id: self.model_id,
            design,
            method: self.method,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

fn content_to_value(content: &DesignContent) -> Result<serde_json::Value, DbError> {
    serde_json::to_value(content).map_err(|e| DbError::Serialization(e.to_string()))
}

/// SurrealDB implementation of the Design repository.
#[derive(Clone)]
pub struct SurrealDesignRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealDesignRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }

    async fn next_id(&self) -> Result<i64, DbError> {
        let mut result = self
            .db
            .query("RETURN sequence::nextval('design_id')")
            .await?;
        let id: Option<i64> = result.take(0)?;
        id.ok_or_else(|| DbError::Query("design_id sequence returned no value".into()))
    }
}

impl<C: Connection> DesignRepository for SurrealDesignRepository<C> {
    async fn create(&self, input: CreateDesign) -> DesignResult<Design> {
        let id = self.next_id().await?;
        let content = content_to_value(&input.design)?;

        let result = self
            .db
            .query(
                "CREATE type::record('design', $id) SET \
                 project_id = $project_id, name = $name, \
                 model_id = $model_id, design = $design, method = $method",
            )
            .bind(("id", id))
            .bind(("project_id", input.project_id))
            .bind(("name", input.name))
            .bind(("model_id", input.model_id))
            .bind(("design", content))
            .bind(("method", input.method))
            .await
            .map_err(DbError::from)?;

        let mut result = result
            .check()
            .map_err(|e| DbError::Query(e.to_string()))?;

        let rows: Vec<DesignRow> = result.take(0).map_err(DbError::from)?;
        let row = rows
            .into_iter()
            .next()
            .ok_or(DbError::NotFound { id })?;

        row.try_into_design(id).map_err(Into::into)
    }

    async fn get_visible(&self, id: i64, scope: &ResourceScope) -> DesignResult<Design> {
        let mut result = self
            .db
            .query(format!(
                "SELECT * FROM type::record('design', $id) WHERE {VISIBLE_IN_SCOPE}"
            ))
            .bind(("id", id))
            .bind(("projects", scope.project_ids().to_vec()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<DesignRow> = result.take(0).map_err(DbError::from)?;
        let row = rows
            .into_iter()
            .next()
            .ok_or(DbError::NotFound { id })?;

        row.try_into_design(id).map_err(Into::into)
    }

    async fn list_visible(&self, scope: &ResourceScope) -> DesignResult<Vec<Design>> {
        let mut result = self
            .db
            .query(format!(
                "SELECT meta::id(id) AS record_id, * FROM design \
                 WHERE {VISIBLE_IN_SCOPE} ORDER BY created_at ASC"
            ))
            .bind(("projects", scope.project_ids().to_vec()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<DesignRowWithId> = result.take(0).map_err(DbError::from)?;

        rows.into_iter()
            .map(|row| row.try_into_design())
            .collect::<Result<Vec<_>, DbError>>()
            .map_err(Into::into)
    }

    async fn update(
        &self,
        id: i64,
        owner: Option<i64>,
        input: UpdateDesign,
    ) -> DesignResult<Design> {
        let mut sets = Vec::new();
        if input.project_id.is_some() {
            sets.push("project_id = $project_id");
        }
        if input.name.is_some() {
            sets.push("name = $name");
        }
        if input.model_id.is_some() {
            sets.push("model_id = $model_id");
        }
        if input.design.is_some() {
            sets.push("design = $design");
        }
        if input.method.is_some() {
            sets.push("method = $method");
        }
        sets.push("updated_at = time::now()");

        // The owner guard makes the write conditional on the project the
        // caller was authorized against.
        let query = format!(
            "UPDATE type::record('design', $id) SET {} WHERE project_id = $owner",
            sets.join(", ")
        );

        let mut builder = self
            .db
            .query(query)
            .bind(("id", id))
            .bind(("owner", owner));

        if let Some(project_id) = input.project_id {
            builder = builder.bind(("project_id", project_id));
        }
        if let Some(name) = input.name {
            builder = builder.bind(("name", name));
        }
        if let Some(model_id) = input.model_id {
            builder = builder.bind(("model_id", model_id));
        }
        if let Some(content) = &input.design {
            builder = builder.bind(("design", content_to_value(content)?));
        }
        if let Some(method) = input.method {
            builder = builder.bind(("method", method));
        }

        let result = builder.await.map_err(DbError::from)?;
        let mut result = result
            .check()
            .map_err(|e| DbError::Query(e.to_string()))?;

        let rows: Vec<DesignRow> = result.take(0).map_err(DbError::from)?;
        let row = rows
            .into_iter()
            .next()
            .ok_or(DbError::NotFound { id })?;

        row.try_into_design(id).map_err(Into::into)
    }

    async fn delete(&self, id: i64, owner: Option<i64>) -> DesignResult<()> {
        let result = self
            .db
            .query(
                "DELETE type::record('design', $id) \
                 WHERE project_id = $owner RETURN BEFORE",
            )
            .bind(("id", id))
            .bind(("owner", owner))
            .await
            .map_err(DbError::from)?;

        let mut result = result
            .check()
            .map_err(|e| DbError::Query(e.to_string()))?;

        let rows: Vec<DesignRow> = result.take(0).map_err(DbError::from)?;
        if rows.is_empty() {
            return Err(DbError::NotFound { id }.into());
        }
        Ok(())
    }

    async fn ping(&self) -> DesignResult<()> {
        self.db.health().await.map_err(DbError::from)?;
        Ok(())
    }
}
