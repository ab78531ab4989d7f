use std::str::FromStr;

use async_trait::async_trait;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tracing::debug;

use crate::db::Storage;
use crate::error::AppError;
use crate::models::{Class, ClassRequest, Registration, Student, StudentRequest};

const STUDENT_COLUMNS: &str = "id, first_name, last_name, middle_name, age, city";
const CLASS_COLUMNS: &str = "id, class_name, description, start_date, end_date, number_of_hours";

pub struct SqliteStorage {
    db: SqlitePool,
}

impl SqliteStorage {
    /// Opens a pool and applies pending migrations. The database file is
    /// created when missing.
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, AppError> {
        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

        // Every connection to `:memory:` is a separate database, so keep exactly
        // one connection alive for the lifetime of the pool.
        let pool_options = if database_url.contains(":memory:") {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new().max_connections(max_connections)
        };

        let db = pool_options.connect_with(options).await?;
        Self::from_pool(db).await
    }

    pub async fn from_pool(db: SqlitePool) -> Result<Self, AppError> {
        sqlx::migrate!("./migrations").run(&db).await?;
        Ok(Self { db })
    }
}

#[async_trait]
impl Storage for SqliteStorage {
    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("select 1").execute(&self.db).await?;
        Ok(())
    }

    async fn insert_student(&self, req: &StudentRequest) -> Result<i64, AppError> {
        let id = sqlx::query(
            "INSERT INTO students (first_name, last_name, middle_name, age, city) VALUES (?, ?, ?, ?, ?)"
        )
        .bind(&req.first_name)
        .bind(&req.last_name)
        .bind(&req.middle_name)
        .bind(req.age)
        .bind(&req.city)
        .execute(&self.db)
        .await?
        .last_insert_rowid();

        Ok(id)
    }

    async fn fetch_student(&self, id: i64) -> Result<Option<Student>, AppError> {
        let student = sqlx::query_as::<_, Student>(&format!(
            "SELECT {STUDENT_COLUMNS} FROM students WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.db)
        .await?;

        Ok(student)
    }

    async fn update_student(&self, id: i64, req: &StudentRequest) -> Result<bool, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE students
            SET first_name = ?1,
                last_name = ?2,
                middle_name = ?3,
                age = ?4,
                city = ?5
            WHERE id = ?6
            "#,
        )
        .bind(&req.first_name)
        .bind(&req.last_name)
        .bind(&req.middle_name)
        .bind(req.age)
        .bind(&req.city)
        .bind(id)
        .execute(&self.db)
        .await?
        .rows_affected();

        Ok(result > 0)
    }

    async fn delete_student(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM students WHERE id = ?")
            .bind(id)
            .execute(&self.db)
            .await?
            .rows_affected();

        Ok(result > 0)
    }

    async fn fetch_students(&self) -> Result<Vec<Student>, AppError> {
        let students = sqlx::query_as::<_, Student>(&format!(
            "SELECT {STUDENT_COLUMNS} FROM students ORDER BY id"
        ))
        .fetch_all(&self.db)
        .await?;

        Ok(students)
    }

    async fn insert_class(&self, req: &ClassRequest) -> Result<i64, AppError> {
        let id = sqlx::query(
            "INSERT INTO classes (class_name, description, start_date, end_date, number_of_hours) VALUES (?, ?, ?, ?, ?)"
        )
        .bind(&req.class_name)
        .bind(&req.description)
        .bind(&req.start_date)
        .bind(&req.end_date)
        .bind(req.number_of_hours)
        .execute(&self.db)
        .await?
        .last_insert_rowid();

        Ok(id)
    }

    async fn fetch_class(&self, id: i64) -> Result<Option<Class>, AppError> {
        let class = sqlx::query_as::<_, Class>(&format!(
            "SELECT {CLASS_COLUMNS} FROM classes WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.db)
        .await?;

        Ok(class)
    }

    async fn update_class(&self, id: i64, req: &ClassRequest) -> Result<bool, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE classes
            SET class_name = ?1,
                description = ?2,
                start_date = ?3,
                end_date = ?4,
                number_of_hours = ?5
            WHERE id = ?6
            "#,
        )
        .bind(&req.class_name)
        .bind(&req.description)
        .bind(&req.start_date)
        .bind(&req.end_date)
        .bind(req.number_of_hours)
        .bind(id)
        .execute(&self.db)
        .await?
        .rows_affected();

        Ok(result > 0)
    }

    async fn delete_class(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM classes WHERE id = ?")
            .bind(id)
            .execute(&self.db)
            .await?
            .rows_affected();

        Ok(result > 0)
    }

    async fn fetch_classes(&self) -> Result<Vec<Class>, AppError> {
        let classes = sqlx::query_as::<_, Class>(&format!(
            "SELECT {CLASS_COLUMNS} FROM classes ORDER BY id"
        ))
        .fetch_all(&self.db)
        .await?;

        Ok(classes)
    }

    async fn insert_registration(
        &self,
        class_id: i64,
        student_id: i64,
    ) -> Result<Option<Registration>, AppError> {
        // The existence checks and the insert are one statement, so a delete
        // running on another connection is either fully before or fully after.
        let result = sqlx::query(
            r#"
            INSERT INTO registrations (class_id, student_id)
            SELECT ?1, ?2
            WHERE EXISTS (SELECT 1 FROM classes WHERE id = ?1)
              AND EXISTS (SELECT 1 FROM students WHERE id = ?2)
            "#,
        )
        .bind(class_id)
        .bind(student_id)
        .execute(&self.db)
        .await?;

        if result.rows_affected() == 0 {
            debug!("registration rejected: class {} or student {} missing", class_id, student_id);
            return Ok(None);
        }

        Ok(Some(Registration {
            id: result.last_insert_rowid(),
            class_id,
            student_id,
        }))
    }

    async fn fetch_registrations_for_class(
        &self,
        class_id: i64,
    ) -> Result<Vec<Registration>, AppError> {
        let registrations = sqlx::query_as::<_, Registration>(
            "SELECT id, class_id, student_id FROM registrations WHERE class_id = ? ORDER BY id",
        )
        .bind(class_id)
        .fetch_all(&self.db)
        .await?;

        Ok(registrations)
    }
}
