use actix_web::{dev, web, FromRequest, HttpRequest};
use chrono::NaiveDate;
use futures_util::future::LocalBoxFuture;

use crate::utils;

mod lre;
mod parameters;
mod payroll;
mod session;

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg
        .service(web::scope("/session")
            .configure(session::config))
        .service(web::scope("/parameters")
            .configure(parameters::config))
        .service(web::scope("/payroll")
            .configure(payroll::config))
        .service(web::scope("/lre")
            .configure(lre::config));
}

/// Payroll period taken from the `{period}` path segment, normalized to its first day
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Period(pub(crate) NaiveDate);

impl FromRequest for Period {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut dev::Payload) -> Self::Future {
        let req = req.clone();

        Box::pin(async move {
            let Some(period) = req.match_info().get("period") else {
                return Err(actix_web::error::ErrorInternalServerError("this extractor must be used under a `period` path"))
            };

            let Some(period) = utils::parse_period(period) else {
                return Err(actix_web::error::ErrorBadRequest("invalid `period`, expected YYYY-MM"))
            };

            Ok(Self(period))
        })
    }
}
