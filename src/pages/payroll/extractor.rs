use std::str::FromStr;

use actix_web::{dev, FromRequest, HttpRequest};
use futures_util::future::LocalBoxFuture;

use super::*;

/// Payroll under the `payroll_id` path, visible only to administrators of its organization
impl FromRequest for payroll::Model {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut dev::Payload) -> Self::Future {
        let req = req.clone();

        Box::pin(async move {
            let admin = Admin::from_request(&req, &mut dev::Payload::None).await?;

            let Some(payroll_id) = req.match_info().get("payroll_id") else {
                return Err(actix_web::error::ErrorInternalServerError("this extractor must be used under a `payroll_id` path"))
            };
            let Ok(payroll_id) = Uuid::from_str(payroll_id) else {
                return Err(actix_web::error::ErrorBadRequest("invalid `payroll_id`"))
            };

            let Some(db) = req.app_data::<web::Data<DatabaseConnection>>() else {
                return Err(actix_web::error::ErrorInternalServerError("database is not configured"))
            };

            let payroll = lifecycle::find(db.get_ref(), &admin.context(), payroll_id).await?;

            Ok(payroll)
        })
    }
}
