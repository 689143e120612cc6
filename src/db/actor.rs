use crate::db::create::{ModelCreate, ProviderCreate, TemplateCreate};
use crate::db::models::{DbModel, DbProvider, DbTemplate};
use crate::db::schema::SQLITE_INIT;
use crate::error::ScribeError;
use chrono::Utc;
use ractor::{Actor, ActorProcessingErr, ActorRef, RpcReplyPort};
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use std::{str::FromStr, time::Duration};
use tracing::{debug, info};

const PROVIDER_COLUMNS: &str = "id, name, kind, created_at, updated_at, deleted_at";
const MODEL_COLUMNS: &str = "id, name, provider_id, created_at, updated_at, deleted_at";
const TEMPLATE_COLUMNS: &str =
    "id, title, template, description, created_at, updated_at, deleted_at";

type Reply<T> = RpcReplyPort<Result<T, ScribeError>>;

#[derive(Debug)]
pub enum DbActorMessage {
    /// Insert a provider; fails with `Conflict` on a live duplicate name.
    CreateProvider(ProviderCreate, Reply<DbProvider>),
    ListProviders(Reply<Vec<DbProvider>>),
    GetProvider(i64, Reply<Option<DbProvider>>),
    /// Soft delete; replies `false` when nothing live matched.
    DeleteProvider(i64, Reply<bool>),

    /// Insert a model; the owning provider must be live.
    CreateModel(ModelCreate, Reply<DbModel>),
    ListModels(Reply<Vec<DbModel>>),
    GetModel(i64, Reply<Option<DbModel>>),
    GetModelByName(String, Reply<Option<DbModel>>),
    DeleteModel(i64, Reply<bool>),

    CreateTemplate(TemplateCreate, Reply<DbTemplate>),
    ListTemplates(Reply<Vec<DbTemplate>>),
    GetTemplate(i64, Reply<Option<DbTemplate>>),
    DeleteTemplate(i64, Reply<bool>),

    /// `SELECT 1` round trip for health checks.
    Ping(Reply<()>),
}

#[derive(Clone)]
pub struct DbActorHandle {
    actor: ActorRef<DbActorMessage>,
}

impl DbActorHandle {
    pub async fn create_provider(&self, create: ProviderCreate) -> Result<DbProvider, ScribeError> {
        ractor::call!(self.actor, DbActorMessage::CreateProvider, create).map_err(|e| {
            ScribeError::RactorError(format!("DbActor CreateProvider RPC failed: {e}"))
        })?
    }

    pub async fn list_providers(&self) -> Result<Vec<DbProvider>, ScribeError> {
        ractor::call!(self.actor, DbActorMessage::ListProviders).map_err(|e| {
            ScribeError::RactorError(format!("DbActor ListProviders RPC failed: {e}"))
        })?
    }

    pub async fn get_provider(&self, id: i64) -> Result<Option<DbProvider>, ScribeError> {
        ractor::call!(self.actor, DbActorMessage::GetProvider, id).map_err(|e| {
            ScribeError::RactorError(format!("DbActor GetProvider RPC failed: {e}"))
        })?
    }

    pub async fn delete_provider(&self, id: i64) -> Result<bool, ScribeError> {
        ractor::call!(self.actor, DbActorMessage::DeleteProvider, id).map_err(|e| {
            ScribeError::RactorError(format!("DbActor DeleteProvider RPC failed: {e}"))
        })?
    }

    pub async fn create_model(&self, create: ModelCreate) -> Result<DbModel, ScribeError> {
        ractor::call!(self.actor, DbActorMessage::CreateModel, create).map_err(|e| {
            ScribeError::RactorError(format!("DbActor CreateModel RPC failed: {e}"))
        })?
    }

    pub async fn list_models(&self) -> Result<Vec<DbModel>, ScribeError> {
        ractor::call!(self.actor, DbActorMessage::ListModels).map_err(|e| {
            ScribeError::RactorError(format!("DbActor ListModels RPC failed: {e}"))
        })?
    }

    pub async fn get_model(&self, id: i64) -> Result<Option<DbModel>, ScribeError> {
        ractor::call!(self.actor, DbActorMessage::GetModel, id).map_err(|e| {
            ScribeError::RactorError(format!("DbActor GetModel RPC failed: {e}"))
        })?
    }

    pub async fn get_model_by_name(&self, name: &str) -> Result<Option<DbModel>, ScribeError> {
        ractor::call!(self.actor, DbActorMessage::GetModelByName, name.to_string()).map_err(|e| {
            ScribeError::RactorError(format!("DbActor GetModelByName RPC failed: {e}"))
        })?
    }

    pub async fn delete_model(&self, id: i64) -> Result<bool, ScribeError> {
        ractor::call!(self.actor, DbActorMessage::DeleteModel, id).map_err(|e| {
            ScribeError::RactorError(format!("DbActor DeleteModel RPC failed: {e}"))
        })?
    }

    pub async fn create_template(&self, create: TemplateCreate) -> Result<DbTemplate, ScribeError> {
        ractor::call!(self.actor, DbActorMessage::CreateTemplate, create).map_err(|e| {
            ScribeError::RactorError(format!("DbActor CreateTemplate RPC failed: {e}"))
        })?
    }

    pub async fn list_templates(&self) -> Result<Vec<DbTemplate>, ScribeError> {
        ractor::call!(self.actor, DbActorMessage::ListTemplates).map_err(|e| {
            ScribeError::RactorError(format!("DbActor ListTemplates RPC failed: {e}"))
        })?
    }

    pub async fn get_template(&self, id: i64) -> Result<Option<DbTemplate>, ScribeError> {
        ractor::call!(self.actor, DbActorMessage::GetTemplate, id).map_err(|e| {
            ScribeError::RactorError(format!("DbActor GetTemplate RPC failed: {e}"))
        })?
    }

    pub async fn delete_template(&self, id: i64) -> Result<bool, ScribeError> {
        ractor::call!(self.actor, DbActorMessage::DeleteTemplate, id).map_err(|e| {
            ScribeError::RactorError(format!("DbActor DeleteTemplate RPC failed: {e}"))
        })?
    }

    pub async fn ping(&self) -> Result<(), ScribeError> {
        ractor::call!(self.actor, DbActorMessage::Ping).map_err(|e| {
            ScribeError::RactorError(format!("DbActor Ping RPC failed: {e}"))
        })?
    }
}

struct DbActorState {
    pool: SqlitePool,
}

struct DbActor;

#[ractor::async_trait]
impl Actor for DbActor {
    type Msg = DbActorMessage;
    type State = DbActorState;
    type Arguments = String;

    async fn pre_start(
        &self,
        _myself: ActorRef<Self::Msg>,
        database_url: Self::Arguments,
    ) -> Result<Self::State, ActorProcessingErr> {
        let connect_opts = SqliteConnectOptions::from_str(database_url.as_str())
            .map_err(|e| ActorProcessingErr::from(format!("invalid database url: {e}")))?
            .create_if_missing(true)
            .foreign_keys(true)
            .busy_timeout(Duration::from_secs(5))
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal);

        let pool = SqlitePoolOptions::new()
            .connect_with(connect_opts)
            .await
            .map_err(|e| ActorProcessingErr::from(format!("db connect failed: {e}")))?;

        apply_schema(&pool)
            .await
            .map_err(|e| ActorProcessingErr::from(format!("db schema init failed: {e}")))?;

        info!("DbActor initialized");
        Ok(DbActorState { pool })
    }

    async fn handle(
        &self,
        _myself: ActorRef<Self::Msg>,
        message: Self::Msg,
        state: &mut Self::State,
    ) -> Result<(), ActorProcessingErr> {
        let pool = &state.pool;
        match message {
            DbActorMessage::CreateProvider(create, reply) => {
                let _ = reply.send(create_provider(pool, create).await);
            }
            DbActorMessage::ListProviders(reply) => {
                let _ = reply.send(list_live(pool, "ai_providers", PROVIDER_COLUMNS).await);
            }
            DbActorMessage::GetProvider(id, reply) => {
                let _ = reply.send(get_live(pool, "ai_providers", PROVIDER_COLUMNS, id).await);
            }
            DbActorMessage::DeleteProvider(id, reply) => {
                let _ = reply.send(soft_delete(pool, "ai_providers", id).await);
            }
            DbActorMessage::CreateModel(create, reply) => {
                let _ = reply.send(create_model(pool, create).await);
            }
            DbActorMessage::ListModels(reply) => {
                let _ = reply.send(list_live(pool, "ai_models", MODEL_COLUMNS).await);
            }
            DbActorMessage::GetModel(id, reply) => {
                let _ = reply.send(get_live(pool, "ai_models", MODEL_COLUMNS, id).await);
            }
            DbActorMessage::GetModelByName(name, reply) => {
                let _ = reply.send(get_model_by_name(pool, &name).await);
            }
            DbActorMessage::DeleteModel(id, reply) => {
                let _ = reply.send(soft_delete(pool, "ai_models", id).await);
            }
            DbActorMessage::CreateTemplate(create, reply) => {
                let _ = reply.send(create_template(pool, create).await);
            }
            DbActorMessage::ListTemplates(reply) => {
                let _ = reply.send(list_live(pool, "templates", TEMPLATE_COLUMNS).await);
            }
            DbActorMessage::GetTemplate(id, reply) => {
                let _ = reply.send(get_live(pool, "templates", TEMPLATE_COLUMNS, id).await);
            }
            DbActorMessage::DeleteTemplate(id, reply) => {
                let _ = reply.send(soft_delete(pool, "templates", id).await);
            }
            DbActorMessage::Ping(reply) => {
                let res = sqlx::query_scalar::<_, i64>("SELECT 1")
                    .fetch_one(pool)
                    .await
                    .map(|_| ())
                    .map_err(ScribeError::from);
                let _ = reply.send(res);
            }
        }
        Ok(())
    }
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.is_unique_violation(),
        _ => false,
    }
}

async fn create_provider(
    pool: &SqlitePool,
    create: ProviderCreate,
) -> Result<DbProvider, ScribeError> {
    let now = Utc::now();
    let sql = format!(
        "INSERT INTO ai_providers (name, kind, created_at, updated_at)
         VALUES (?, ?, ?, ?)
         RETURNING {PROVIDER_COLUMNS}"
    );

    sqlx::query_as::<_, DbProvider>(&sql)
        .bind(&create.name)
        .bind(create.kind)
        .bind(now)
        .bind(now)
        .fetch_one(pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                ScribeError::Conflict(format!(
                    "Provider with the name: {} already exist",
                    create.name
                ))
            } else {
                ScribeError::from(e)
            }
        })
}

async fn create_model(pool: &SqlitePool, create: ModelCreate) -> Result<DbModel, ScribeError> {
    let provider: Option<DbProvider> =
        get_live(pool, "ai_providers", PROVIDER_COLUMNS, create.provider_id).await?;
    if provider.is_none() {
        return Err(ScribeError::NotFound(format!(
            "Provider with id: {} not found",
            create.provider_id
        )));
    }

    let now = Utc::now();
    let sql = format!(
        "INSERT INTO ai_models (name, provider_id, created_at, updated_at)
         VALUES (?, ?, ?, ?)
         RETURNING {MODEL_COLUMNS}"
    );

    sqlx::query_as::<_, DbModel>(&sql)
        .bind(&create.name)
        .bind(create.provider_id)
        .bind(now)
        .bind(now)
        .fetch_one(pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                ScribeError::Conflict(format!(
                    "Model with the name: {} already exist",
                    create.name
                ))
            } else {
                ScribeError::from(e)
            }
        })
}

async fn get_model_by_name(pool: &SqlitePool, name: &str) -> Result<Option<DbModel>, ScribeError> {
    let sql = format!(
        "SELECT {MODEL_COLUMNS} FROM ai_models
         WHERE name = ? AND deleted_at IS NULL
         ORDER BY id
         LIMIT 1"
    );
    let row = sqlx::query_as::<_, DbModel>(&sql)
        .bind(name)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

async fn create_template(
    pool: &SqlitePool,
    create: TemplateCreate,
) -> Result<DbTemplate, ScribeError> {
    let now = Utc::now();
    let sql = format!(
        "INSERT INTO templates (title, template, description, created_at, updated_at)
         VALUES (?, ?, ?, ?, ?)
         RETURNING {TEMPLATE_COLUMNS}"
    );

    let row = sqlx::query_as::<_, DbTemplate>(&sql)
        .bind(create.title)
        .bind(create.template)
        .bind(create.description)
        .bind(now)
        .bind(now)
        .fetch_one(pool)
        .await?;
    Ok(row)
}

async fn list_live<T>(pool: &SqlitePool, table: &str, columns: &str) -> Result<Vec<T>, ScribeError>
where
    T: for<'r> sqlx::FromRow<'r, sqlx::sqlite::SqliteRow> + Send + Unpin,
{
    let sql = format!("SELECT {columns} FROM {table} WHERE deleted_at IS NULL ORDER BY id");
    let rows = sqlx::query_as::<_, T>(&sql).fetch_all(pool).await?;
    Ok(rows)
}

async fn get_live<T>(
    pool: &SqlitePool,
    table: &str,
    columns: &str,
    id: i64,
) -> Result<Option<T>, ScribeError>
where
    T: for<'r> sqlx::FromRow<'r, sqlx::sqlite::SqliteRow> + Send + Unpin,
{
    let sql = format!("SELECT {columns} FROM {table} WHERE id = ? AND deleted_at IS NULL");
    let row = sqlx::query_as::<_, T>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

async fn soft_delete(pool: &SqlitePool, table: &str, id: i64) -> Result<bool, ScribeError> {
    let now = Utc::now();
    let sql =
        format!("UPDATE {table} SET deleted_at = ?, updated_at = ? WHERE id = ? AND deleted_at IS NULL");
    let res = sqlx::query(&sql)
        .bind(now)
        .bind(now)
        .bind(id)
        .execute(pool)
        .await?;

    let affected = res.rows_affected();
    debug!(table, id, affected, "db soft delete applied");
    Ok(affected > 0)
}

/// Spawn the database actor and return a cloneable handle.
pub async fn spawn(database_url: &str) -> Result<DbActorHandle, ScribeError> {
    let (actor, _jh) = ractor::Actor::spawn(None, DbActor, database_url.to_string())
        .await
        .map_err(|e| ScribeError::RactorError(format!("failed to spawn DbActor: {e}")))?;

    Ok(DbActorHandle { actor })
}

async fn apply_schema(pool: &SqlitePool) -> Result<(), ScribeError> {
    for stmt in SQLITE_INIT.split(';') {
        let s = stmt.trim();
        if s.is_empty() {
            continue;
        }
        sqlx::query(s).execute(pool).await?;
    }
    Ok(())
}
