use actix_web::{get, http::header::{ContentDisposition, DispositionParam, DispositionType}, web, HttpResponse, Responder};
use sea_orm::DatabaseConnection;
use tracing::{error, info};

use crate::{auth::Admin, payroll::{lifecycle, lre::{self, LreRow}}};

use super::Period;

pub(super) fn config(cfg: &mut web::ServiceConfig) {
    cfg
        .service(export_lre);
}

#[get("/{period}")]
async fn export_lre(db: web::Data<DatabaseConnection>, admin: Admin, Period(period): Period) -> Result<impl Responder, actix_web::Error> {
    let payrolls = lifecycle::closed_for_period(db.get_ref(), &admin.context(), period).await?;

    let rows = payrolls.iter().map(LreRow::build).collect::<Vec<_>>();

    let mut body = Vec::new();
    if let Err(err) = lre::write_csv(&rows, &mut body) {
        error!(%period, "unable to render LRE: {err}");
        return Err(actix_web::error::ErrorInternalServerError("unable to render LRE"))
    }

    info!(organization_id = %admin.organization_id, %period, rows = rows.len(), "LRE exported");

    Ok(
        HttpResponse::Ok()
            .content_type("text/csv; charset=utf-8")
            .insert_header(ContentDisposition {
                disposition: DispositionType::Attachment,
                parameters: vec![DispositionParam::Filename(format!("LRE_{}.csv", period.format("%Y-%m")))],
            })
            .body(body)
    )
}
