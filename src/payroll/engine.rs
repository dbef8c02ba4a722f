use rust_decimal::Decimal;

use crate::{consts::*, entity::sea_orm_active_enums::ItemCategory, utils::round_pesos};

use super::{model::{AdHocItem, Breakdown, EconomicParameters, EmployeeSnapshot}, PayrollError};

/// Computes the monthly payroll of one employee.
///
/// Every derived amount is rounded to whole pesos on its own, in the order below,
/// so any subtotal re-derived from the stored line items matches exactly.
///
/// `worked_days` defaults to [`DEFAULT_WORKED_DAYS`]. Missing or unconfigured
/// `params` fail with [`PayrollError::MissingParameters`] instead of falling back
/// to any default.
pub fn compute_payroll(
    employee: &EmployeeSnapshot,
    params: Option<&EconomicParameters>,
    ad_hoc_items: &[AdHocItem],
    worked_days: Option<u8>,
) -> Result<Breakdown, PayrollError> {
    let Some(params) = params.filter(|p| p.is_configured()) else {
        return Err(PayrollError::MissingParameters);
    };

    let worked_days = worked_days.unwrap_or(DEFAULT_WORKED_DAYS);
    if !(1..=MAX_WORKED_DAYS).contains(&worked_days) {
        return Err(PayrollError::InvalidWorkedDays(worked_days));
    }

    let mut items = Vec::with_capacity(ad_hoc_items.len());
    let mut taxable_items = Decimal::ZERO;
    let mut non_taxable_items = Decimal::ZERO;
    let mut other_deductions = Decimal::ZERO;

    for item in ad_hoc_items {
        let item = item.normalized()?;

        match item.category()? {
            ItemCategory::TaxableEarning => taxable_items += item.amount,
            ItemCategory::NonTaxableEarning => non_taxable_items += item.amount,
            ItemCategory::LegalDeduction | ItemCategory::OtherDeduction => other_deductions += item.amount,
        }

        items.push(item);
    }

    let base_salary = round_pesos(employee.contractual_salary * Decimal::from(worked_days) / PRORATION_DAYS);

    let theoretical_gratification = base_salary * GRATIFICATION_RATE;
    let gratification_cap = GRATIFICATION_CAP_MIN_WAGES * params.minimum_wage / MONTHS_PER_YEAR;
    let gratification = round_pesos(theoretical_gratification.min(gratification_cap));

    let taxable_total = round_pesos(base_salary + gratification + taxable_items);

    // The UF ceiling only limits social security contributions
    let contribution_cap = params.afp_cap_uf * params.uf_value;
    let contribution_base = taxable_total.min(contribution_cap);

    let pension = round_pesos(contribution_base * employee.pension_rate_percent / Decimal::ONE_HUNDRED);
    let health = round_pesos(contribution_base * HEALTH_RATE);
    let unemployment = round_pesos(contribution_base * UNEMPLOYMENT_RATE);
    let legal_deductions_total = pension + health + unemployment;

    let non_taxable_total = round_pesos(non_taxable_items);
    let other_deductions_total = round_pesos(other_deductions);

    let net_pay = round_pesos((taxable_total + non_taxable_total) - (legal_deductions_total + other_deductions_total));

    Ok(Breakdown {
        worked_days,
        pension_rate: employee.pension_rate_percent,
        contribution_base,
        base_salary,
        gratification,
        taxable_total,
        non_taxable_total,
        pension,
        health,
        unemployment,
        legal_deductions_total,
        other_deductions_total,
        net_pay,
        ad_hoc_items: items,
    })
}
