use chrono::{Local, NaiveDate};
use rust_decimal::Decimal;
use sea_orm::{sea_query::OnConflict, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::{consts, entity::{payroll, payroll_parameters, prelude::*}, utils};

use super::{model::EconomicParameters, OrganizationContext, PayrollError};

/// Values an operator submits for a period; caps and minimum wage fall back to the current legal values
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterValues {
    pub uf_value: Decimal,
    pub utm_value: Decimal,
    #[serde(default = "default_min_wage")]
    pub min_wage: Decimal,
    #[serde(default = "default_afp_cap_uf")]
    pub afp_cap_uf: Decimal,
    #[serde(default = "default_unemployment_cap_uf")]
    pub unemployment_cap_uf: Decimal,
}

fn default_min_wage() -> Decimal {
    consts::DEFAULT_MIN_WAGE
}

fn default_afp_cap_uf() -> Decimal {
    consts::DEFAULT_AFP_CAP_UF
}

fn default_unemployment_cap_uf() -> Decimal {
    consts::DEFAULT_UNEMPLOYMENT_CAP_UF
}

impl ParameterValues {
    fn validate(&self) -> Result<(), PayrollError> {
        let fields = [
            (self.uf_value, "uf_value must be positive"),
            (self.utm_value, "utm_value must be positive"),
            (self.min_wage, "min_wage must be positive"),
            (self.afp_cap_uf, "afp_cap_uf must be positive"),
            (self.unemployment_cap_uf, "unemployment_cap_uf must be positive"),
        ];

        match fields.into_iter().find(|(value, _)| *value <= Decimal::ZERO) {
            Some((_, reason)) => Err(PayrollError::InvalidParameters(reason)),
            None => Ok(()),
        }
    }
}

/// Parameters of the period, `None` being a normal state for a period nobody configured yet
pub async fn find(db: &DatabaseConnection, ctx: &OrganizationContext, period: NaiveDate) -> Result<Option<EconomicParameters>, PayrollError> {
    let params = PayrollParameters::find()
        .filter(payroll_parameters::Column::OrganizationId.eq(ctx.organization_id))
        .filter(payroll_parameters::Column::PeriodDate.eq(utils::first_day_of_month(period)))
        .one(db).await?;

    Ok(params.map(EconomicParameters::from))
}

/// Parameters the engine needs, failing when the period was never configured
pub async fn get(db: &DatabaseConnection, ctx: &OrganizationContext, period: NaiveDate) -> Result<EconomicParameters, PayrollError> {
    find(db, ctx, period).await?
        .filter(EconomicParameters::is_configured)
        .ok_or(PayrollError::MissingParameters)
}

pub async fn upsert(
    db: &DatabaseConnection,
    ctx: &OrganizationContext,
    period: NaiveDate,
    values: ParameterValues,
) -> Result<EconomicParameters, PayrollError> {
    values.validate()?;

    let period = utils::first_day_of_month(period);

    let closed = Payroll::find()
        .filter(payroll::Column::OrganizationId.eq(ctx.organization_id))
        .filter(payroll::Column::PeriodDate.eq(period))
        .filter(payroll::Column::IsClosed.eq(true))
        .one(db).await?;

    if closed.is_some() {
        return Err(PayrollError::ParametersLocked);
    }

    let now = Local::now().fixed_offset();

    let model = PayrollParameters::insert(payroll_parameters::ActiveModel {
        id: Set(Uuid::new_v4()),
        created_at: Set(now),
        updated_at: Set(now),
        organization_id: Set(ctx.organization_id),
        period_date: Set(period),
        uf_value: Set(values.uf_value),
        utm_value: Set(values.utm_value),
        min_wage: Set(values.min_wage),
        afp_cap_uf: Set(values.afp_cap_uf),
        unemployment_cap_uf: Set(values.unemployment_cap_uf),
    })
        .on_conflict(
            OnConflict::columns([payroll_parameters::Column::OrganizationId, payroll_parameters::Column::PeriodDate])
                .update_columns([
                    payroll_parameters::Column::UpdatedAt,
                    payroll_parameters::Column::UfValue,
                    payroll_parameters::Column::UtmValue,
                    payroll_parameters::Column::MinWage,
                    payroll_parameters::Column::AfpCapUf,
                    payroll_parameters::Column::UnemploymentCapUf,
                ])
                .to_owned()
        )
        .exec_with_returning(db).await?;

    info!(organization_id = %ctx.organization_id, %period, "period parameters saved");

    Ok(model.into())
}
