use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::db::Storage;
use crate::error::AppError;
use crate::models::{Class, ClassRequest, Registration, Student, StudentRequest};

#[derive(Default)]
struct Tables {
    students: BTreeMap<i64, Student>,
    classes: BTreeMap<i64, Class>,
    registrations: Vec<Registration>,
    // Last id handed out per collection. Never decremented.
    last_student_id: i64,
    last_class_id: i64,
    last_registration_id: i64,
}

/// Process-local store. Every primitive runs under one lock, so each call
/// observes and mutates a consistent snapshot.
#[derive(Default)]
pub struct MemoryStorage {
    tables: Mutex<Tables>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }

    async fn insert_student(&self, req: &StudentRequest) -> Result<i64, AppError> {
        let mut tables = self.tables.lock().await;
        tables.last_student_id += 1;
        let id = tables.last_student_id;
        tables
            .students
            .insert(id, Student::from_request(id, req.clone()));
        Ok(id)
    }

    async fn fetch_student(&self, id: i64) -> Result<Option<Student>, AppError> {
        Ok(self.tables.lock().await.students.get(&id).cloned())
    }

    async fn update_student(&self, id: i64, req: &StudentRequest) -> Result<bool, AppError> {
        let mut tables = self.tables.lock().await;
        match tables.students.get_mut(&id) {
            Some(student) => {
                *student = Student::from_request(id, req.clone());
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_student(&self, id: i64) -> Result<bool, AppError> {
        Ok(self.tables.lock().await.students.remove(&id).is_some())
    }

    async fn fetch_students(&self) -> Result<Vec<Student>, AppError> {
        Ok(self.tables.lock().await.students.values().cloned().collect())
    }

    async fn insert_class(&self, req: &ClassRequest) -> Result<i64, AppError> {
        let mut tables = self.tables.lock().await;
        tables.last_class_id += 1;
        let id = tables.last_class_id;
        tables.classes.insert(id, Class::from_request(id, req.clone()));
        Ok(id)
    }

    async fn fetch_class(&self, id: i64) -> Result<Option<Class>, AppError> {
        Ok(self.tables.lock().await.classes.get(&id).cloned())
    }

    async fn update_class(&self, id: i64, req: &ClassRequest) -> Result<bool, AppError> {
        let mut tables = self.tables.lock().await;
        match tables.classes.get_mut(&id) {
            Some(class) => {
                *class = Class::from_request(id, req.clone());
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_class(&self, id: i64) -> Result<bool, AppError> {
        Ok(self.tables.lock().await.classes.remove(&id).is_some())
    }

    async fn fetch_classes(&self) -> Result<Vec<Class>, AppError> {
        Ok(self.tables.lock().await.classes.values().cloned().collect())
    }

    async fn insert_registration(
        &self,
        class_id: i64,
        student_id: i64,
    ) -> Result<Option<Registration>, AppError> {
        let mut tables = self.tables.lock().await;
        if !tables.classes.contains_key(&class_id) || !tables.students.contains_key(&student_id) {
            return Ok(None);
        }

        tables.last_registration_id += 1;
        let registration = Registration {
            id: tables.last_registration_id,
            class_id,
            student_id,
        };
        tables.registrations.push(registration.clone());
        Ok(Some(registration))
    }

    async fn fetch_registrations_for_class(
        &self,
        class_id: i64,
    ) -> Result<Vec<Registration>, AppError> {
        let tables = self.tables.lock().await;
        Ok(tables
            .registrations
            .iter()
            .filter(|r| r.class_id == class_id)
            .cloned()
            .collect())
    }
}
