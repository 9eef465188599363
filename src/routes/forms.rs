use actix_web::{HttpResponse, Responder, ResponseError, delete, get, post, put, web};
use chrono::NaiveDateTime;
use serde::Deserialize;
use uuid::Uuid;

use crate::error::SchedulerError;
use crate::handlers::forms;
use crate::scheduling::form::FormController;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
struct SlotRequest {
    start: NaiveDateTime,
    end: NaiveDateTime,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TypeRequest {
    appointment_type: String,
}

#[derive(Debug, Deserialize)]
struct StartRequest {
    start: NaiveDateTime,
}

#[derive(Debug, Deserialize)]
struct DurationRequest {
    duration: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PatientRequest {
    patient_name: Option<String>,
    phone_number: Option<String>,
}

fn respond(result: Result<FormController, SchedulerError>) -> HttpResponse {
    match result {
        Ok(form) => HttpResponse::Ok().json(form),
        Err(e) => e.error_response(),
    }
}

#[post("/slot")]
async fn open_slot(state: web::Data<AppState>, body: web::Json<SlotRequest>) -> impl Responder {
    match forms::open_slot(&state, body.start, body.end).await {
        Ok(form) => HttpResponse::Created().json(form),
        Err(e) => e.error_response(),
    }
}

#[post("/event/{id}")]
async fn open_event(state: web::Data<AppState>, path: web::Path<Uuid>) -> impl Responder {
    match forms::open_event(&state, path.into_inner()).await {
        Ok(form) => HttpResponse::Created().json(form),
        Err(e) => e.error_response(),
    }
}

#[get("/{id}")]
async fn get_form(state: web::Data<AppState>, path: web::Path<Uuid>) -> impl Responder {
    respond(forms::get_form(&state, path.into_inner()).await)
}

#[put("/{id}/type")]
async fn select_type(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    body: web::Json<TypeRequest>,
) -> impl Responder {
    let body = body.into_inner();
    respond(forms::select_type(&state, path.into_inner(), body.appointment_type).await)
}

#[put("/{id}/start")]
async fn change_start(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    body: web::Json<StartRequest>,
) -> impl Responder {
    respond(forms::change_start(&state, path.into_inner(), body.start).await)
}

#[put("/{id}/duration")]
async fn change_duration(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    body: web::Json<DurationRequest>,
) -> impl Responder {
    respond(forms::change_duration(&state, path.into_inner(), body.duration).await)
}

#[put("/{id}/patient")]
async fn update_patient(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    body: web::Json<PatientRequest>,
) -> impl Responder {
    let body = body.into_inner();
    respond(forms::update_patient(&state, path.into_inner(), body.patient_name, body.phone_number).await)
}

#[post("/{id}/submit")]
async fn submit(state: web::Data<AppState>, path: web::Path<Uuid>) -> impl Responder {
    match forms::submit(&state, path.into_inner()).await {
        Ok(appointment) => HttpResponse::Ok().json(appointment),
        Err(e) => e.error_response(),
    }
}

#[post("/{id}/delete")]
async fn delete_appointment(state: web::Data<AppState>, path: web::Path<Uuid>) -> impl Responder {
    match forms::delete(&state, path.into_inner()).await {
        Ok(removed) => HttpResponse::Ok().json(removed),
        Err(e) => e.error_response(),
    }
}

#[delete("/{id}")]
async fn close(state: web::Data<AppState>, path: web::Path<Uuid>) -> impl Responder {
    match forms::close(&state, path.into_inner()).await {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(e) => e.error_response(),
    }
}

pub fn init(cfg: &mut web::ServiceConfig) {
    cfg.service(open_slot)
        .service(open_event)
        .service(get_form)
        .service(select_type)
        .service(change_start)
        .service(change_duration)
        .service(update_patient)
        .service(submit)
        .service(delete_appointment)
        .service(close);
}
