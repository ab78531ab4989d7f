//! Entity repositories: id-based CRUD over a [`Storage`] backend.
//!
//! A missing id becomes [`AppError::NotFound`]; no other rule is applied here.

use std::sync::Arc;

use tracing::{debug, info};

use crate::db::Storage;
use crate::error::AppError;
use crate::models::{Class, ClassRequest, Student, StudentRequest};

#[derive(Clone)]
pub struct StudentRepository {
    storage: Arc<dyn Storage>,
}

impl StudentRepository {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    pub async fn create(&self, req: StudentRequest) -> Result<i64, AppError> {
        let id = self.storage.insert_student(&req).await?;
        info!("student {} created", id);
        Ok(id)
    }

    pub async fn update(&self, id: i64, req: StudentRequest) -> Result<(), AppError> {
        if !self.storage.update_student(id, &req).await? {
            return Err(AppError::NotFound("Student"));
        }
        info!("student {} updated", id);
        Ok(())
    }

    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        if !self.storage.delete_student(id).await? {
            return Err(AppError::NotFound("Student"));
        }
        info!("student {} deleted", id);
        Ok(())
    }

    pub async fn get(&self, id: i64) -> Result<Student, AppError> {
        debug!("looking up student {}", id);
        self.storage
            .fetch_student(id)
            .await?
            .ok_or(AppError::NotFound("Student"))
    }

    pub async fn list(&self) -> Result<Vec<Student>, AppError> {
        self.storage.fetch_students().await
    }
}

#[derive(Clone)]
pub struct ClassRepository {
    storage: Arc<dyn Storage>,
}

impl ClassRepository {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    pub async fn create(&self, req: ClassRequest) -> Result<i64, AppError> {
        let id = self.storage.insert_class(&req).await?;
        info!("class {} created", id);
        Ok(id)
    }

    pub async fn update(&self, id: i64, req: ClassRequest) -> Result<(), AppError> {
        if !self.storage.update_class(id, &req).await? {
            return Err(AppError::NotFound("Class"));
        }
        info!("class {} updated", id);
        Ok(())
    }

    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        if !self.storage.delete_class(id).await? {
            return Err(AppError::NotFound("Class"));
        }
        info!("class {} deleted", id);
        Ok(())
    }

    pub async fn get(&self, id: i64) -> Result<Class, AppError> {
        debug!("looking up class {}", id);
        self.storage
            .fetch_class(id)
            .await?
            .ok_or(AppError::NotFound("Class"))
    }

    pub async fn list(&self) -> Result<Vec<Class>, AppError> {
        self.storage.fetch_classes().await
    }
}
