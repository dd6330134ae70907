//! Schema definitions and migration runner for SurrealDB.
//!
//! Tables are SCHEMAFULL. Design ids are integers drawn from the
//! `design_id` sequence so they stay stable and URL friendly.

use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use tracing::info;

use crate::error::DbError;

const MIGRATION_TABLE_DDL: &str = "\
DEFINE TABLE IF NOT EXISTS _migration SCHEMAFULL;
DEFINE FIELD IF NOT EXISTS version ON TABLE _migration TYPE int;
DEFINE FIELD IF NOT EXISTS name ON TABLE _migration TYPE string;
DEFINE FIELD IF NOT EXISTS applied_at ON TABLE _migration TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX IF NOT EXISTS idx_migration_version ON TABLE _migration \
    COLUMNS version UNIQUE;
";

#[derive(Debug, SurrealValue)]
struct MigrationRecord {
    version: u32,
}

struct Migration {
    version: u32,
    name: &'static str,
    sql: &'static str,
}

static MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    name: "designs",
    sql: SCHEMA_V1,
}];

const SCHEMA_V1: &str = "\
DEFINE SEQUENCE design_id START 1;

DEFINE TABLE design SCHEMAFULL;
DEFINE FIELD project_id ON TABLE design TYPE option<int>;
DEFINE FIELD name ON TABLE design TYPE string \
    ASSERT string::len(string::trim($value)) > 0;
DEFINE FIELD model_id ON TABLE design TYPE int;
DEFINE FIELD design ON TABLE design TYPE object FLEXIBLE DEFAULT {};
DEFINE FIELD method ON TABLE design TYPE string;
DEFINE FIELD created_at ON TABLE design TYPE datetime \
    DEFAULT time::now();
DEFINE FIELD updated_at ON TABLE design TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX idx_design_project ON TABLE design COLUMNS project_id;
";

/// Apply all pending migrations.
///
/// Creates the `_migration` tracking table on first run, then applies each
/// migration whose version exceeds the highest recorded one.
pub async fn run_migrations<C: Connection>(db: &Surreal<C>) -> Result<(), DbError> {
    db.query(MIGRATION_TABLE_DDL)
        .await?
        .check()
        .map_err(|e| DbError::Migration(e.to_string()))?;

    let mut result = db
        .query("SELECT version FROM _migration ORDER BY version DESC LIMIT 1")
        .await?;
    let records: Vec<MigrationRecord> = result.take(0)?;
    let current_version = records.first().map(|m| m.version).unwrap_or(0);

    for migration in MIGRATIONS {
        if migration.version <= current_version {
            continue;
        }
        info!(
            version = migration.version,
            name = migration.name,
            "Applying migration"
        );
        db.query(migration.sql).await?.check().map_err(|e| {
            DbError::Migration(format!(
                "v{} '{}' failed: {}",
                migration.version, migration.name, e,
            ))
        })?;

        db.query("CREATE _migration SET version = $version, name = $name")
            .bind(("version", migration.version))
            .bind(("name", migration.name))
            .await?
            .check()
            .map_err(|e| {
                DbError::Migration(format!(
                    "could not record v{}: {}",
                    migration.version, e,
                ))
            })?;
    }

    Ok(())
}

/// Raw DDL of schema version 1.
pub fn schema_v1() -> &'static str {
    SCHEMA_V1
}
