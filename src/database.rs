//! Database initialization, table definitions and shared application state
//!
//! This module sets up the embedded redb database that stands in for the
//! marketplace's document store. Each resource gets two tables: a main table
//! keyed by the server-assigned document id, and a unique-key index table
//! enforcing the business identifier (`residence_id`, `professional_id`,
//! `request_id`) inside the same write transaction as the insert.

use redb::{Database, TableDefinition};
use std::env;
use std::sync::Arc;

/// Accommodation documents
///
/// Key: server-assigned document id
/// Value: JSON-serialized `Accommodation` record
pub const TABLE_ACCOMMODATIONS: TableDefinition<&str, &str> =
    TableDefinition::new("accommodations_v1");

/// Unique index for accommodations
///
/// Key: `residence_id` (business identifier)
/// Value: document id of the owning record
pub const TABLE_ACCOMMODATION_IDS: TableDefinition<&str, &str> =
    TableDefinition::new("accommodation_ids_v1");

/// Professional documents
pub const TABLE_PROFESSIONALS: TableDefinition<&str, &str> =
    TableDefinition::new("professionals_v1");

/// Unique index for professionals, keyed by `professional_id`
pub const TABLE_PROFESSIONAL_IDS: TableDefinition<&str, &str> =
    TableDefinition::new("professional_ids_v1");

/// Viewing documents
///
/// A viewing stores the document id of the accommodation it refers to.
/// Deleting the accommodation does not touch viewings, so the reference may
/// dangle; the read path resolves it to `null` in that case.
pub const TABLE_VIEWINGS: TableDefinition<&str, &str> = TableDefinition::new("viewings_v1");

/// Unique index for viewings, keyed by the decimal rendering of `request_id`
pub const TABLE_VIEWING_IDS: TableDefinition<&str, &str> =
    TableDefinition::new("viewing_ids_v1");

/// API keys for the upstream chat providers, read once at startup.
///
/// Every key is optional: a missing key degrades that provider's endpoint
/// (502 for DeepSeek/Gemini, scripted fallback for OpenRouter) instead of
/// failing startup.
#[derive(Clone, Default)]
pub struct ChatKeys {
    pub deepseek: Option<String>,
    pub gemini: Option<String>,
    pub openrouter: Option<String>,
}

impl ChatKeys {
    /// Reads the provider keys from the environment, treating empty values
    /// the same as unset ones.
    pub fn from_env() -> Self {
        Self {
            deepseek: env_key("DEEPSEEK_API_KEY"),
            gemini: env_key("GEMINI_API_KEY"),
            openrouter: env_key("OPENROUTER_API_KEY"),
        }
    }
}

fn env_key(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.is_empty())
}

/// Application state shared across all request handlers
#[derive(Clone)]
pub struct AppState {
    /// Thread-safe reference to the embedded database
    pub db: Arc<Database>,
    /// Pooled HTTP client used by the chat proxy handlers
    pub http: reqwest::Client,
    /// Upstream provider API keys
    pub chat: ChatKeys,
}

/// Initializes the embedded database and creates all resource tables
///
/// Opens (or creates) the database file at `db_path`, then opens every
/// document and index table inside a single write transaction so the table
/// structures exist before the first request.
pub fn init_db(db_path: &str) -> Result<Database, redb::Error> {
    let db = Database::create(db_path)?;

    let write_txn = db.begin_write()?;
    {
        write_txn.open_table(TABLE_ACCOMMODATIONS)?;
        write_txn.open_table(TABLE_ACCOMMODATION_IDS)?;
        write_txn.open_table(TABLE_PROFESSIONALS)?;
        write_txn.open_table(TABLE_PROFESSIONAL_IDS)?;
        write_txn.open_table(TABLE_VIEWINGS)?;
        write_txn.open_table(TABLE_VIEWING_IDS)?;
    }
    write_txn.commit()?;

    Ok(db)
}
