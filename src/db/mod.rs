//! Storage backends for students, classes and registrations.
//!
//! Backends only persist and look up rows. Business rules live in
//! `repository` and `services`; the one exception is
//! [`Storage::insert_registration`], which must check both references and
//! insert in a single atomic step so a concurrent delete cannot slip in between.

pub mod memory;
pub mod sqlite;

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::config::StorageConfig;
use crate::error::AppError;
use crate::models::{Class, ClassRequest, Registration, Student, StudentRequest};

pub use memory::MemoryStorage;
pub use sqlite::SqliteStorage;

#[async_trait]
pub trait Storage: Send + Sync {
    async fn ping(&self) -> Result<(), AppError>;

    async fn insert_student(&self, req: &StudentRequest) -> Result<i64, AppError>;
    async fn fetch_student(&self, id: i64) -> Result<Option<Student>, AppError>;
    /// Returns `false` when no student has this id.
    async fn update_student(&self, id: i64, req: &StudentRequest) -> Result<bool, AppError>;
    /// Returns `false` when no student has this id.
    async fn delete_student(&self, id: i64) -> Result<bool, AppError>;
    async fn fetch_students(&self) -> Result<Vec<Student>, AppError>;

    async fn insert_class(&self, req: &ClassRequest) -> Result<i64, AppError>;
    async fn fetch_class(&self, id: i64) -> Result<Option<Class>, AppError>;
    async fn update_class(&self, id: i64, req: &ClassRequest) -> Result<bool, AppError>;
    async fn delete_class(&self, id: i64) -> Result<bool, AppError>;
    async fn fetch_classes(&self) -> Result<Vec<Class>, AppError>;

    /// Inserts the edge only if both the class and the student exist at this
    /// moment. Returns `None` (and stores nothing) otherwise.
    async fn insert_registration(
        &self,
        class_id: i64,
        student_id: i64,
    ) -> Result<Option<Registration>, AppError>;

    /// Registrations of one class in creation order.
    async fn fetch_registrations_for_class(
        &self,
        class_id: i64,
    ) -> Result<Vec<Registration>, AppError>;
}

pub async fn build_storage(config: &StorageConfig) -> Result<Arc<dyn Storage>, AppError> {
    match config {
        StorageConfig::Memory => {
            info!("using in-memory storage");
            Ok(Arc::new(MemoryStorage::new()))
        }
        StorageConfig::Sqlite {
            url,
            max_connections,
        } => {
            info!("using sqlite storage at {}", url);
            let storage = SqliteStorage::connect(url, *max_connections).await?;
            Ok(Arc::new(storage))
        }
    }
}
