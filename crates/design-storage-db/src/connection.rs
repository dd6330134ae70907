//! Opening the design store: connect, authenticate, migrate.

use surrealdb::engine::remote::ws::{Client, Ws};
use surrealdb::opt::auth::Root;
use surrealdb::{Connection, Surreal};
use tracing::info;

use crate::error::DbError;
use crate::repository::SurrealDesignRepository;
use crate::schema::run_migrations;

/// Where the design store lives and the root credentials used to open it.
#[derive(Debug, Clone)]
pub struct DbConfig {
    /// WebSocket endpoint, `host:port`.
    pub url: String,
    pub namespace: String,
    pub database: String,
    pub username: String,
    pub password: String,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            url: "127.0.0.1:8000".into(),
            namespace: "design_storage".into(),
            database: "main".into(),
            username: "root".into(),
            password: "root".into(),
        }
    }
}

/// A migrated database handle, ready to back a [`SurrealDesignRepository`].
pub struct DbManager<C: Connection = Client> {
    db: Surreal<C>,
}

impl DbManager<Client> {
    /// Open the remote store described by `config` and bring its schema up
    /// to date.
    pub async fn connect(config: &DbConfig) -> Result<Self, DbError> {
        info!(
            url = %config.url,
            namespace = %config.namespace,
            database = %config.database,
            "Opening design store"
        );

        let db = Surreal::new::<Ws>(&config.url).await?;
        db.signin(Root {
            username: config.username.clone(),
            password: config.password.clone(),
        })
        .await?;
        db.use_ns(&config.namespace)
            .use_db(&config.database)
            .await?;

        Self::from_client(db).await
    }
}

impl<C: Connection> DbManager<C> {
    /// Adopt an already selected namespace/database and apply pending
    /// migrations.
    pub async fn from_client(db: Surreal<C>) -> Result<Self, DbError> {
        run_migrations(&db).await?;
        info!("Design store ready");
        Ok(Self { db })
    }

    pub fn repository(&self) -> SurrealDesignRepository<C> {
        SurrealDesignRepository::new(self.db.clone())
    }
}
