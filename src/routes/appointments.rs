use actix_web::{HttpResponse, Responder, ResponseError, delete, get, web};
use uuid::Uuid;

use crate::handlers::appointments::{delete_appointment, get_appointment, list_events};
use crate::state::AppState;

#[get("")]
async fn events(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(list_events(&state).await)
}

#[get("/{id}")]
async fn appointment(state: web::Data<AppState>, path: web::Path<Uuid>) -> impl Responder {
    match get_appointment(&state, path.into_inner()).await {
        Ok(data) => HttpResponse::Ok().json(data),
        Err(e) => e.error_response(),
    }
}

#[delete("/{id}")]
async fn remove(state: web::Data<AppState>, path: web::Path<Uuid>) -> impl Responder {
    match delete_appointment(&state, path.into_inner()).await {
        Ok(removed) => HttpResponse::Ok().json(removed),
        Err(e) => e.error_response(),
    }
}

pub fn init(cfg: &mut web::ServiceConfig) {
    cfg.service(events).service(appointment).service(remove);
}
