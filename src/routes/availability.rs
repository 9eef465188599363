use actix_web::{HttpResponse, Responder, ResponseError, post, web};
use chrono::NaiveDateTime;
use serde::Deserialize;

use crate::handlers::availability::check_availability;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AvailabilityRequest {
    appointment_type: String,
    start: NaiveDateTime,
}

#[post("")]
async fn availability(state: web::Data<AppState>, body: web::Json<AvailabilityRequest>) -> impl Responder {
    match check_availability(&state, &body.appointment_type, body.start).await {
        Ok(verdict) => HttpResponse::Ok().json(verdict),
        Err(e) => e.error_response(),
    }
}

pub fn init(cfg: &mut web::ServiceConfig) {
    cfg.service(availability);
}
