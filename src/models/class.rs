use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Class {
    pub id: i64,
    pub class_name: String,
    pub description: String,
    pub start_date: String,
    pub end_date: String,
    pub number_of_hours: i32,
}

/// Body of both `POST /classes` and `PUT /classes/{id}`.
/// Dates are stored as given; no calendar validation happens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassRequest {
    pub class_name: String,
    pub description: String,
    pub start_date: String,
    pub end_date: String,
    pub number_of_hours: i32,
}

impl Class {
    pub fn from_request(id: i64, req: ClassRequest) -> Self {
        Self {
            id,
            class_name: req.class_name,
            description: req.description,
            start_date: req.start_date,
            end_date: req.end_date,
            number_of_hours: req.number_of_hours,
        }
    }
}
