use actix_web::{HttpResponse, Responder, get, web};
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SessionStatus {
    appointments: usize,
    /// Approximate; expired forms are evicted lazily.
    open_forms: u64,
    device_pool_size: u32,
}

#[get("/ping")]
async fn ping() -> impl Responder {
    HttpResponse::Ok().body("pong")
}

#[get("/status")]
async fn status(state: web::Data<AppState>) -> impl Responder {
    let appointments = state.calendar.lock().await.appointments().len();
    HttpResponse::Ok().json(SessionStatus {
        appointments,
        open_forms: state.forms.entry_count(),
        device_pool_size: state.registry.device_pool_size(),
    })
}

pub fn init(cfg: &mut web::ServiceConfig) {
    cfg.service(ping).service(status);
}
