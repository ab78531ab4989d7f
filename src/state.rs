use std::sync::Arc;

use crate::db::Storage;
use crate::repository::{ClassRepository, StudentRepository};
use crate::services::RegistrationService;

#[derive(Clone)]
pub struct AppState {
    pub storage: Arc<dyn Storage>,
}

impl AppState {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    pub fn students(&self) -> StudentRepository {
        StudentRepository::new(self.storage.clone())
    }

    pub fn classes(&self) -> ClassRepository {
        ClassRepository::new(self.storage.clone())
    }

    pub fn registrations(&self) -> RegistrationService {
        RegistrationService::new(self.storage.clone())
    }
}
