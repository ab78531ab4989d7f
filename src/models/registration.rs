use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Edge between a class and a student. Both ids are weak references:
/// they were valid when the edge was created but may dangle afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Registration {
    pub id: i64,
    pub class_id: i64,
    pub student_id: i64,
}
