use actix_web::{get, web, Responder};

use crate::auth::Session;

pub(super) fn config(cfg: &mut web::ServiceConfig) {
    cfg
        .service(whoami);
}

#[get("")]
async fn whoami(session: Session) -> impl Responder {
    web::Json(session)
}
