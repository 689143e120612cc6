//! SQL DDL for initializing the database schema.
//! SQLite-first design; can be adapted for other RDBMS.

/// SQLite schema includes:
/// - `ai_providers` (one LLM backend account, name unique among live rows)
/// - `ai_models` (a model name offered by a provider, name unique among live rows)
/// - `templates` (title + Markdown body skeletons)
///
/// Every table is soft-deleted through `deleted_at`.
pub const SQLITE_INIT: &str = r#"
-- ---------------------------------------------------------------------------
-- AI providers
-- ---------------------------------------------------------------------------
CREATE TABLE IF NOT EXISTS ai_providers (
    id INTEGER PRIMARY KEY NOT NULL,
    name TEXT NOT NULL,
    kind TEXT NOT NULL CHECK (kind IN ('OPEN_ROUTER', 'CEREBRAS')),
    created_at TEXT NOT NULL, -- RFC3339
    updated_at TEXT NOT NULL, -- RFC3339
    deleted_at TEXT NULL -- RFC3339
);

CREATE UNIQUE INDEX IF NOT EXISTS uq_ai_providers_name_live
    ON ai_providers(name) WHERE deleted_at IS NULL;
CREATE INDEX IF NOT EXISTS idx_ai_providers_kind ON ai_providers(kind);

-- ---------------------------------------------------------------------------
-- AI models
-- ---------------------------------------------------------------------------
CREATE TABLE IF NOT EXISTS ai_models (
    id INTEGER PRIMARY KEY NOT NULL,
    name TEXT NOT NULL,
    provider_id INTEGER NOT NULL REFERENCES ai_providers(id),
    created_at TEXT NOT NULL, -- RFC3339
    updated_at TEXT NOT NULL, -- RFC3339
    deleted_at TEXT NULL -- RFC3339
);

CREATE UNIQUE INDEX IF NOT EXISTS uq_ai_models_name_live
    ON ai_models(name) WHERE deleted_at IS NULL;
CREATE INDEX IF NOT EXISTS idx_ai_models_provider ON ai_models(provider_id);

-- ---------------------------------------------------------------------------
-- Templates
-- ---------------------------------------------------------------------------
CREATE TABLE IF NOT EXISTS templates (
    id INTEGER PRIMARY KEY NOT NULL,
    title TEXT NOT NULL,
    template TEXT NOT NULL,
    description TEXT NULL,
    created_at TEXT NOT NULL, -- RFC3339
    updated_at TEXT NOT NULL, -- RFC3339
    deleted_at TEXT NULL -- RFC3339
);

CREATE INDEX IF NOT EXISTS idx_templates_title ON templates(title);
CREATE INDEX IF NOT EXISTS idx_templates_deleted_at ON templates(deleted_at);
"#;
