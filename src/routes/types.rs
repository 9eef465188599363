use actix_web::{HttpResponse, Responder, get, web};

use crate::state::AppState;

#[get("")]
async fn list_types(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(state.registry.types())
}

pub fn init(cfg: &mut web::ServiceConfig) {
    cfg.service(list_types);
}
