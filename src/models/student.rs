use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Student {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub middle_name: Option<String>,
    pub age: i32,
    pub city: String,
}

/// Body of both `POST /students` and `PUT /students/{id}`.
/// An update replaces every field, so there is no partial variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentRequest {
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub middle_name: Option<String>,
    pub age: i32,
    pub city: String,
}

impl Student {
    pub fn from_request(id: i64, req: StudentRequest) -> Self {
        Self {
            id,
            first_name: req.first_name,
            last_name: req.last_name,
            middle_name: req.middle_name,
            age: req.age,
            city: req.city,
        }
    }
}

/// Student as listed on a class roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterEntry {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub city: String,
}

impl From<Student> for RosterEntry {
    fn from(student: Student) -> Self {
        Self {
            id: student.id,
            first_name: student.first_name,
            last_name: student.last_name,
            city: student.city,
        }
    }
}
