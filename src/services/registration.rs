use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::db::Storage;
use crate::error::AppError;
use crate::models::{Registration, Student};
use crate::repository::{ClassRepository, StudentRepository};

/// Enrollment rules on top of the entity repositories.
pub struct RegistrationService {
    storage: Arc<dyn Storage>,
    classes: ClassRepository,
    students: StudentRepository,
}

impl RegistrationService {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self {
            classes: ClassRepository::new(storage.clone()),
            students: StudentRepository::new(storage.clone()),
            storage,
        }
    }

    /// Links a student to a class. Both must exist right now; registering the
    /// same pair again creates another edge.
    pub async fn register(&self, class_id: i64, student_id: i64) -> Result<Registration, AppError> {
        match self.storage.insert_registration(class_id, student_id).await? {
            Some(registration) => {
                info!(
                    "student {} registered to class {} (registration {})",
                    student_id, class_id, registration.id
                );
                Ok(registration)
            }
            None => {
                warn!(
                    "registration rejected: class {} or student {} not found",
                    class_id, student_id
                );
                Err(AppError::NotFound("Class or Student"))
            }
        }
    }

    /// Students registered to `class_id`, in registration order. Students
    /// deleted since registering are left out.
    pub async fn list_students_for_class(&self, class_id: i64) -> Result<Vec<Student>, AppError> {
        self.classes.get(class_id).await?;

        let registrations = self.storage.fetch_registrations_for_class(class_id).await?;
        let mut students = Vec::with_capacity(registrations.len());
        for registration in registrations {
            match self.students.get(registration.student_id).await {
                Ok(student) => students.push(student),
                Err(AppError::NotFound(_)) => {
                    debug!(
                        "registration {} points at deleted student {}",
                        registration.id, registration.student_id
                    );
                }
                Err(e) => return Err(e),
            }
        }

        Ok(students)
    }
}
