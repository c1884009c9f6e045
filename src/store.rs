// src/store.rs

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::sync::Mutex;

use crate::error::AppError;
use crate::models::{house::House, reservation::Reservation, room::Room, user::User};

/// Entities addressable by their numeric id.
pub trait HasId {
    fn id(&self) -> i64;
}

impl HasId for User {
    fn id(&self) -> i64 {
        self.id
    }
}

impl HasId for House {
    fn id(&self) -> i64 {
        self.id
    }
}

impl HasId for Room {
    fn id(&self) -> i64 {
        self.id
    }
}

impl HasId for Reservation {
    fn id(&self) -> i64 {
        self.id
    }
}

/// Next id for a collection: max existing id + 1, or 1 when empty.
/// Ids are never reused after deletion. Safe only under a single writer.
pub fn next_id<T: HasId>(items: &[T]) -> i64 {
    items.iter().map(HasId::id).max().unwrap_or(0) + 1
}

/// Whole-collection key/value store.
///
/// The contract is deliberately coarse: read a full collection, compute a new
/// full collection, write it back. No partial updates. An operation's read
/// and write are separate calls, so a check made between them (availability,
/// email uniqueness) is not atomic with the write; the system assumes a
/// single active writer.
#[async_trait]
pub trait Store: Send + Sync {
    async fn load_users(&self) -> Result<Vec<User>, AppError>;
    async fn save_users(&self, users: &[User]) -> Result<(), AppError>;

    async fn load_houses(&self) -> Result<Vec<House>, AppError>;
    async fn save_houses(&self, houses: &[House]) -> Result<(), AppError>;

    async fn load_rooms(&self) -> Result<Vec<Room>, AppError>;
    async fn save_rooms(&self, rooms: &[Room]) -> Result<(), AppError>;

    async fn load_reservations(&self) -> Result<Vec<Reservation>, AppError>;
    async fn save_reservations(&self, reservations: &[Reservation]) -> Result<(), AppError>;
}

pub type DynStore = Arc<dyn Store>;

/// File-backed store: one JSON array per collection under a data directory.
/// A missing file reads as an empty collection. Writes are serialized behind
/// a single lock; there is no rollback across collections, so a crash in the
/// middle of a cascade can leave partial artifacts (accepted, see DESIGN.md).
pub struct JsonStore {
    dir: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        JsonStore {
            dir: dir.into(),
            write_lock: Mutex::new(()),
        }
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{}.json", name))
    }

    async fn read_list<T: DeserializeOwned>(&self, name: &str) -> Result<Vec<T>, AppError> {
        let path = self.path(name);
        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                tracing::error!("Failed to read collection '{}': {}", name, e);
                return Err(AppError::from(e));
            }
        };
        let list = serde_json::from_slice(&bytes).map_err(|e| {
            tracing::error!("Collection '{}' is corrupt: {}", name, e);
            AppError::InternalServerError(e.to_string())
        })?;
        Ok(list)
    }

    async fn write_list<T: Serialize>(&self, name: &str, items: &[T]) -> Result<(), AppError> {
        let _guard = self.write_lock.lock().await;
        let bytes = serde_json::to_vec_pretty(items)
            .map_err(|e| AppError::InternalServerError(e.to_string()))?;
        tokio::fs::write(self.path(name), bytes).await.map_err(|e| {
            tracing::error!("Failed to write collection '{}': {}", name, e);
            AppError::from(e)
        })
    }
}

#[async_trait]
impl Store for JsonStore {
    async fn load_users(&self) -> Result<Vec<User>, AppError> {
        self.read_list("users").await
    }

    async fn save_users(&self, users: &[User]) -> Result<(), AppError> {
        self.write_list("users", users).await
    }

    async fn load_houses(&self) -> Result<Vec<House>, AppError> {
        self.read_list("houses").await
    }

    async fn save_houses(&self, houses: &[House]) -> Result<(), AppError> {
        self.write_list("houses", houses).await
    }

    async fn load_rooms(&self) -> Result<Vec<Room>, AppError> {
        self.read_list("rooms").await
    }

    async fn save_rooms(&self, rooms: &[Room]) -> Result<(), AppError> {
        self.write_list("rooms", rooms).await
    }

    async fn load_reservations(&self) -> Result<Vec<Reservation>, AppError> {
        self.read_list("reservations").await
    }

    async fn save_reservations(&self, reservations: &[Reservation]) -> Result<(), AppError> {
        self.write_list("reservations", reservations).await
    }
}
