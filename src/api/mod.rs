use axum::Json;
use axum::extract::{Path, Query};
use axum::routing::post;
use axum::{Router, extract::State, http::StatusCode, routing::get};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::models::*;
use crate::state::AppState;

#[derive(Deserialize)]
struct RegisterParams {
    student_id: i64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    fn new(message: &str) -> Json<Self> {
        Json(Self {
            message: message.to_string(),
        })
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StudentCreatedResponse {
    pub student_id: i64,
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ClassCreatedResponse {
    pub class_id: i64,
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RosterResponse {
    pub students: Vec<RosterEntry>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/students", get(list_students).post(add_student))
        .route(
            "/students/{id}",
            get(get_student).put(update_student).delete(delete_student),
        )
        .route("/classes", get(list_classes).post(add_class))
        .route(
            "/classes/{id}",
            get(get_class).put(update_class).delete(delete_class),
        )
        .route("/classes/{id}/register", post(register_student))
        .route("/classes/{id}/students", get(list_registered_students))
        .with_state(state)
}

async fn health(State(state): State<AppState>) -> Result<StatusCode, AppError> {
    state.storage.ping().await?;
    Ok(StatusCode::OK)
}

async fn list_students(State(state): State<AppState>) -> Result<Json<Vec<Student>>, AppError> {
    let students = state.students().list().await?;
    Ok(Json(students))
}

async fn get_student(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Student>, AppError> {
    let student = state.students().get(id).await?;
    Ok(Json(student))
}

async fn add_student(
    State(state): State<AppState>,
    Json(req): Json<StudentRequest>,
) -> Result<Json<StudentCreatedResponse>, AppError> {
    let student_id = state.students().create(req).await?;
    Ok(Json(StudentCreatedResponse {
        student_id,
        message: "Student added.".to_string(),
    }))
}

async fn update_student(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<StudentRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    state.students().update(id, req).await?;
    Ok(MessageResponse::new("Student updated."))
}

async fn delete_student(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<MessageResponse>, AppError> {
    state.students().delete(id).await?;
    Ok(MessageResponse::new("Student deleted."))
}

async fn list_classes(State(state): State<AppState>) -> Result<Json<Vec<Class>>, AppError> {
    let classes = state.classes().list().await?;
    Ok(Json(classes))
}

async fn get_class(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Class>, AppError> {
    let class = state.classes().get(id).await?;
    Ok(Json(class))
}

async fn add_class(
    State(state): State<AppState>,
    Json(req): Json<ClassRequest>,
) -> Result<Json<ClassCreatedResponse>, AppError> {
    let class_id = state.classes().create(req).await?;
    Ok(Json(ClassCreatedResponse {
        class_id,
        message: "Class added.".to_string(),
    }))
}

async fn update_class(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<ClassRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    state.classes().update(id, req).await?;
    Ok(MessageResponse::new("Class updated."))
}

async fn delete_class(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<MessageResponse>, AppError> {
    state.classes().delete(id).await?;
    Ok(MessageResponse::new("Class deleted."))
}

async fn register_student(
    State(state): State<AppState>,
    Path(class_id): Path<i64>,
    Query(params): Query<RegisterParams>,
) -> Result<Json<MessageResponse>, AppError> {
    state
        .registrations()
        .register(class_id, params.student_id)
        .await?;
    Ok(MessageResponse::new("Student registered to class."))
}

async fn list_registered_students(
    State(state): State<AppState>,
    Path(class_id): Path<i64>,
) -> Result<Json<RosterResponse>, AppError> {
    let students = state
        .registrations()
        .list_students_for_class(class_id)
        .await?
        .into_iter()
        .map(RosterEntry::from)
        .collect();
    Ok(Json(RosterResponse { students }))
}
