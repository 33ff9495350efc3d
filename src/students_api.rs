use actix_web::http::StatusCode;
use actix_web::{delete, get, post, web, HttpResponse, Responder, ResponseError};
use serde::Deserialize;
use serde_json::json;

use crate::student_registry::{RegistryError, StudentDraft, StudentRegistry};

// Domain errors become transport responses only here; the registry itself
// knows nothing about HTTP.
impl ResponseError for RegistryError {
    fn status_code(&self) -> StatusCode {
        match self {
            RegistryError::NotFound => StatusCode::NOT_FOUND,
            RegistryError::AlreadyExists => StatusCode::CONFLICT,
            RegistryError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            RegistryError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            RegistryError::Validation(fields) => json!({
                "error": self.to_string(),
                "fields": fields,
            }),
            _ => json!({ "error": self.to_string() }),
        };
        HttpResponse::build(self.status_code()).json(body)
    }
}

#[derive(Deserialize)]
pub struct ListFilter {
    course: Option<i64>,
}

#[post("/student")]
async fn create_student(
    draft: web::Json<StudentDraft>,
    registry: web::Data<StudentRegistry>,
) -> Result<HttpResponse, RegistryError> {
    let student = registry.create(draft.into_inner())?;
    tracing::info!(id = student.id, "student created");
    Ok(HttpResponse::Ok().json(student))
}

#[get("/student/{id}")]
async fn get_student(
    id: web::Path<u64>,
    registry: web::Data<StudentRegistry>,
) -> Result<HttpResponse, RegistryError> {
    let student = registry.get(id.into_inner())?;
    Ok(HttpResponse::Ok().json(student))
}

#[get("/student")]
async fn list_students(
    filter: web::Query<ListFilter>,
    registry: web::Data<StudentRegistry>,
) -> impl Responder {
    HttpResponse::Ok().json(registry.list(filter.course))
}

#[delete("/student/{id}")]
async fn delete_student(
    id: web::Path<u64>,
    registry: web::Data<StudentRegistry>,
) -> Result<HttpResponse, RegistryError> {
    let id = id.into_inner();
    registry.delete(id)?;
    tracing::info!(id, "student deleted");
    Ok(HttpResponse::Ok().finish())
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(create_student)
        .service(get_student)
        .service(list_students)
        .service(delete_student);
}
