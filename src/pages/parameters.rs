use actix_web::{get, put, web, Responder};
use sea_orm::DatabaseConnection;

use crate::{auth::Admin, payroll::{parameters::{self, ParameterValues}, PayrollError}};

use super::Period;

pub(super) fn config(cfg: &mut web::ServiceConfig) {
    cfg
        .service(get_parameters)
        .service(put_parameters);
}

#[get("/{period}")]
async fn get_parameters(db: web::Data<DatabaseConnection>, admin: Admin, Period(period): Period) -> Result<impl Responder, PayrollError> {
    let params = parameters::get(db.get_ref(), &admin.context(), period).await?;

    Ok(web::Json(params))
}

#[put("/{period}")]
async fn put_parameters(
    db: web::Data<DatabaseConnection>,
    admin: Admin,
    Period(period): Period,
    payload: web::Json<ParameterValues>,
) -> Result<impl Responder, PayrollError> {
    let params = parameters::upsert(db.get_ref(), &admin.context(), period, payload.into_inner()).await?;

    Ok(web::Json(params))
}
