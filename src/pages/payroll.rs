use actix_web::{get, post, web, HttpResponse, Responder};
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{auth::Admin, entity::payroll, payroll::{lifecycle, PayrollError}};

use super::Period;

use model::*;

mod extractor;
mod model;

pub(super) fn config(cfg: &mut web::ServiceConfig) {
    cfg
        .service(preview_payroll)
        .service(save_payroll)
        .service(load_payroll)
        .service(closed_payrolls)
        .service(get_payroll)
        .service(reopen_payroll);
}

#[post("/employee/{employee_id}/{period}/preview")]
async fn preview_payroll(
    db: web::Data<DatabaseConnection>,
    admin: Admin,
    path: web::Path<EmployeePath>,
    Period(period): Period,
    payload: web::Json<SavePayroll>,
) -> Result<impl Responder, PayrollError> {
    let (employee, breakdown) = lifecycle::preview(db.get_ref(), &admin.context(), path.employee_id, period, &payload.items, payload.worked_days).await?;

    Ok(web::Json(PayrollPreview {
        items: lifecycle::line_items(&employee, &breakdown),
        employee,
        breakdown,
    }))
}

#[post("/employee/{employee_id}/{period}")]
async fn save_payroll(
    db: web::Data<DatabaseConnection>,
    admin: Admin,
    path: web::Path<EmployeePath>,
    Period(period): Period,
    payload: web::Json<SavePayroll>,
) -> Result<impl Responder, PayrollError> {
    let saved = lifecycle::save(db.get_ref(), &admin.context(), path.employee_id, period, &payload.items, payload.worked_days).await?;

    Ok(HttpResponse::Ok().json(web::Json(saved)))
}

#[get("/employee/{employee_id}/{period}")]
async fn load_payroll(db: web::Data<DatabaseConnection>, admin: Admin, path: web::Path<EmployeePath>, Period(period): Period) -> Result<impl Responder, PayrollError> {
    let edit = lifecycle::load(db.get_ref(), &admin.context(), path.employee_id, period).await?;

    Ok(web::Json(edit))
}

/// Closed payrolls of the period with employee and items, what bulk payslip printing consumes
#[get("/period/{period}")]
async fn closed_payrolls(db: web::Data<DatabaseConnection>, admin: Admin, Period(period): Period) -> Result<impl Responder, PayrollError> {
    let payrolls = lifecycle::closed_for_period(db.get_ref(), &admin.context(), period).await?;

    Ok(web::Json(payrolls))
}

#[get("/{payroll_id}")]
async fn get_payroll(db: web::Data<DatabaseConnection>, payroll: payroll::Model) -> Result<impl Responder, PayrollError> {
    let items = lifecycle::items_of(db.get_ref(), payroll.id).await?;

    Ok(web::Json(PayrollDetail {
        payroll,
        items,
    }))
}

#[post("/{payroll_id}/reopen")]
async fn reopen_payroll(db: web::Data<DatabaseConnection>, admin: Admin, payroll_id: web::Path<Uuid>) -> Result<impl Responder, PayrollError> {
    let payroll = lifecycle::reopen(db.get_ref(), &admin.context(), payroll_id.into_inner()).await?;

    Ok(web::Json(payroll))
}
