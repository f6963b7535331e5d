use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    Pool, Row, Sqlite,
};
use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
    str::FromStr,
};
use tokio::sync::Mutex;
use tracing::{debug, warn};

use shared::domain::UserProfile;

/// Key the saved profile lives under.
pub const PROFILE_KEY: &str = "reforma_laboral_user";

const MEMORY_URL: &str = "sqlite::memory:";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredItem {
    pub value: String,
    pub updated_at: DateTime<Utc>,
}

/// String key/value persistence with browser local-storage semantics:
/// setting a key replaces its value, removing a missing key is a no-op.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get_item(&self, key: &str) -> Result<Option<StoredItem>>;
    async fn set_item(&self, key: &str, value: &str) -> Result<()>;
    async fn remove_item(&self, key: &str) -> Result<()>;
}

#[derive(Clone)]
pub struct Storage {
    pool: Pool<Sqlite>,
}

impl Storage {
    pub async fn new(database_url: &str) -> Result<Self> {
        ensure_sqlite_parent_dir_exists(database_url)?;

        let connect_options = SqliteConnectOptions::from_str(database_url)
            .with_context(|| format!("invalid database url '{database_url}'"))?
            .create_if_missing(true);
        // every connection to an in-memory database would see its own empty copy
        let max_connections = if database_url == MEMORY_URL { 1 } else { 5 };
        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(connect_options)
            .await?;
        sqlx::migrate!("./migrations").run(&pool).await?;
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &Pool<Sqlite> {
        &self.pool
    }

    pub async fn health_check(&self) -> Result<()> {
        let _: i64 = sqlx::query_scalar("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .context("sqlite ping failed")?;
        Ok(())
    }
}

#[async_trait]
impl KeyValueStore for Storage {
    async fn get_item(&self, key: &str) -> Result<Option<StoredItem>> {
        let row = sqlx::query("SELECT value, updated_at FROM local_storage WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(|row| StoredItem {
            value: row.get::<String, _>(0),
            updated_at: row.get::<DateTime<Utc>, _>(1),
        }))
    }

    async fn set_item(&self, key: &str, value: &str) -> Result<()> {
        sqlx::query(
            "INSERT INTO local_storage (key, value, updated_at) VALUES (?, ?, ?)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
        )
        .bind(key)
        .bind(value)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn remove_item(&self, key: &str) -> Result<()> {
        sqlx::query("DELETE FROM local_storage WHERE key = ?")
            .bind(key)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

/// Process-local store for runs that should leave nothing behind.
#[derive(Debug, Default)]
pub struct MemoryStore {
    items: Mutex<HashMap<String, StoredItem>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get_item(&self, key: &str) -> Result<Option<StoredItem>> {
        Ok(self.items.lock().await.get(key).cloned())
    }

    async fn set_item(&self, key: &str, value: &str) -> Result<()> {
        self.items.lock().await.insert(
            key.to_string(),
            StoredItem {
                value: value.to_string(),
                updated_at: Utc::now(),
            },
        );
        Ok(())
    }

    async fn remove_item(&self, key: &str) -> Result<()> {
        self.items.lock().await.remove(key);
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SavedProfile {
    pub profile: UserProfile,
    pub saved_at: DateTime<Utc>,
}

pub async fn save_profile<S>(store: &S, profile: &UserProfile) -> Result<()>
where
    S: KeyValueStore + ?Sized,
{
    let encoded = serde_json::to_string(profile).context("failed to encode profile")?;
    store.set_item(PROFILE_KEY, &encoded).await?;
    debug!(sector = %profile.sector, "profile saved");
    Ok(())
}

/// Reads the saved profile. Unreadable entries, malformed JSON and profiles
/// without a positive salary all count as "nothing saved".
pub async fn load_profile<S>(store: &S) -> Option<SavedProfile>
where
    S: KeyValueStore + ?Sized,
{
    let item = match store.get_item(PROFILE_KEY).await {
        Ok(Some(item)) => item,
        Ok(None) => return None,
        Err(error) => {
            warn!(error = %error, "could not read saved profile");
            return None;
        }
    };

    let profile = match serde_json::from_str::<UserProfile>(&item.value) {
        Ok(profile) => profile,
        Err(error) => {
            warn!(error = %error, "discarding malformed saved profile");
            return None;
        }
    };
    if !(profile.base_salary.is_finite() && profile.base_salary > 0.0) {
        warn!(
            salary = profile.base_salary,
            "discarding saved profile without a salary"
        );
        return None;
    }

    Some(SavedProfile {
        profile,
        saved_at: item.updated_at,
    })
}

pub async fn clear_profile<S>(store: &S) -> Result<()>
where
    S: KeyValueStore + ?Sized,
{
    store.remove_item(PROFILE_KEY).await?;
    debug!("saved profile cleared");
    Ok(())
}

fn ensure_sqlite_parent_dir_exists(database_url: &str) -> Result<()> {
    let Some(path) = sqlite_path(database_url) else {
        return Ok(());
    };

    let Some(parent) = path.parent() else {
        return Ok(());
    };

    fs::create_dir_all(parent).with_context(|| {
        format!(
            "failed to create parent directory '{}' for database url '{database_url}'",
            parent.display()
        )
    })?;

    Ok(())
}

fn sqlite_path(database_url: &str) -> Option<PathBuf> {
    if database_url == MEMORY_URL || !database_url.starts_with("sqlite:") {
        return None;
    }

    let path = database_url
        .trim_start_matches("sqlite://")
        .trim_start_matches("sqlite:")
        .split('?')
        .next()
        .unwrap_or_default();

    if path.is_empty() {
        return None;
    }

    Some(Path::new(path).to_path_buf())
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
