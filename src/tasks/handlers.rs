use actix_web::{web, HttpResponse};
use serde_json::json;
use tracing::{info, warn};
use crate::AppState;
use crate::auth::AuthenticatedUser;
use crate::error::AppError;
use crate::tasks::validation::{parse_task_id, CreateTaskRequest, UpdateTaskRequest};

const TASK_NOT_FOUND: &str = "Task not found";

fn not_found() -> AppError {
    AppError::NotFound(TASK_NOT_FOUND.into())
}

pub async fn list_tasks(
    user: AuthenticatedUser,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let tasks = state.tasks.list_by_owner(&user.username).await;
    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "data": tasks
    })))
}

pub async fn get_task(
    user: AuthenticatedUser,
    path: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let id = parse_task_id(&path)?;
    let task = state
        .tasks
        .get_by_id_and_owner(id, &user.username)
        .await
        .ok_or_else(not_found)?;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "data": task
    })))
}

pub async fn create_task(
    user: AuthenticatedUser,
    body: web::Json<CreateTaskRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let new_task = body.into_inner().validate(&user.username)?;
    let task = state.tasks.create(new_task).await;
    info!("Task {} created by {}", task.id, user.username);

    Ok(HttpResponse::Created().json(json!({
        "success": true,
        "data": task
    })))
}

pub async fn update_task(
    user: AuthenticatedUser,
    path: web::Path<String>,
    body: web::Json<UpdateTaskRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let id = parse_task_id(&path)?;
    let patch = body.into_inner().validate()?;

    match state.tasks.update(id, &user.username, patch).await {
        Some(task) => {
            info!("Task {} updated by {}", id, user.username);
            Ok(HttpResponse::Ok().json(json!({
                "success": true,
                "data": task
            })))
        }
        None => {
            warn!("Update of task {} by {} found nothing", id, user.username);
            Err(not_found())
        }
    }
}

pub async fn delete_task(
    user: AuthenticatedUser,
    path: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let id = parse_task_id(&path)?;

    if !state.tasks.delete(id, &user.username).await {
        warn!("Delete of task {} by {} found nothing", id, user.username);
        return Err(not_found());
    }

    info!("Task {} deleted by {}", id, user.username);
    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Task deleted successfully"
    })))
}
