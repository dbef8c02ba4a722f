use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{consts, entity::{employee, health_provider, payroll_item, payroll_parameters, pension_provider, sea_orm_active_enums::{ItemCategory, ItemOrigin}}, utils};

use super::PayrollError;

/// Economic indicators of one organization and period, read-only to the engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EconomicParameters {
    pub period: NaiveDate,
    pub uf_value: Decimal,
    pub utm_value: Decimal,
    pub minimum_wage: Decimal,
    pub afp_cap_uf: Decimal,
    pub unemployment_cap_uf: Decimal,
}

impl EconomicParameters {
    /// Every indicator is a published positive value, a zero means the period was never filled in
    pub fn is_configured(&self) -> bool {
        [self.uf_value, self.utm_value, self.minimum_wage, self.afp_cap_uf, self.unemployment_cap_uf]
            .iter()
            .all(|value| *value > Decimal::ZERO)
    }
}

impl From<payroll_parameters::Model> for EconomicParameters {
    fn from(model: payroll_parameters::Model) -> Self {
        Self {
            period: model.period_date,
            uf_value: model.uf_value,
            utm_value: model.utm_value,
            minimum_wage: model.min_wage,
            afp_cap_uf: model.afp_cap_uf,
            unemployment_cap_uf: model.unemployment_cap_uf,
        }
    }
}

/// The part of an employee record the engine depends on
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeSnapshot {
    pub contractual_salary: Decimal,
    pub pension_rate_percent: Decimal,
    pub pension_provider_name: String,
    pub health_provider_name: String,
}

impl EmployeeSnapshot {
    pub fn new(
        employee: &employee::Model,
        pension: Option<&pension_provider::Model>,
        health: Option<&health_provider::Model>,
    ) -> Self {
        Self {
            contractual_salary: employee.salary,
            pension_rate_percent: pension.map(|p| p.rate).unwrap_or(consts::FALLBACK_PENSION_RATE),
            pension_provider_name: pension.map(|p| p.name.clone()).unwrap_or_default(),
            health_provider_name: health.map(|h| h.name.clone()).unwrap_or_default(),
        }
    }
}

/// Ledger entry as typed by the operator, before its label is resolved
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdHocEntry {
    pub concept_code: String,
    pub amount: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdHocItem {
    pub concept_code: String,
    pub label: String,
    pub amount: Decimal,
}

impl AdHocItem {
    pub fn category(&self) -> Result<ItemCategory, PayrollError> {
        ItemCategory::for_concept_code(&self.concept_code)
            .ok_or_else(|| PayrollError::invalid_item(&self.concept_code, "concept code must be 1xxx, 2xxx or 3xxx"))
    }

    /// Validates the entry and rounds its amount to whole pesos
    pub fn normalized(&self) -> Result<Self, PayrollError> {
        self.category()?;

        if self.amount < Decimal::ZERO {
            return Err(PayrollError::invalid_item(&self.concept_code, "amount must not be negative"));
        }

        Ok(Self {
            amount: utils::round_pesos(self.amount),
            ..self.clone()
        })
    }
}

impl From<&payroll_item::Model> for AdHocItem {
    fn from(item: &payroll_item::Model) -> Self {
        Self {
            concept_code: item.lre_code.clone(),
            label: item.concept.clone(),
            amount: item.amount,
        }
    }
}

impl ItemCategory {
    /// Category of an ad-hoc concept, decided by the first digit of its code
    pub fn for_concept_code(code: &str) -> Option<Self> {
        if code.len() != 4 || !code.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }

        match code.as_bytes()[0] {
            b'1' => Some(Self::TaxableEarning),
            b'2' => Some(Self::NonTaxableEarning),
            b'3' => Some(Self::OtherDeduction),
            _ => None,
        }
    }
}

/// Full computation result, the only contract renderers depend on
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Breakdown {
    pub worked_days: u8,
    pub pension_rate: Decimal,
    pub contribution_base: Decimal,

    pub base_salary: Decimal,
    pub gratification: Decimal,
    pub taxable_total: Decimal,
    pub non_taxable_total: Decimal,
    pub pension: Decimal,
    pub health: Decimal,
    pub unemployment: Decimal,
    pub legal_deductions_total: Decimal,
    pub other_deductions_total: Decimal,
    pub net_pay: Decimal,
    pub ad_hoc_items: Vec<AdHocItem>,
}

impl Breakdown {
    pub fn totals(&self) -> PayrollTotals {
        PayrollTotals {
            taxable: self.taxable_total,
            non_taxable: self.non_taxable_total,
            legal_deductions: self.legal_deductions_total,
            other_deductions: self.other_deductions_total,
            net_pay: self.net_pay,
        }
    }
}

/// One earning or deduction row of a payroll, before it is persisted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub concept: String,
    pub category: ItemCategory,
    pub origin: ItemOrigin,
    pub lre_code: String,
    pub amount: Decimal,
}

/// Stored record totals, derivable from the line items alone
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollTotals {
    pub taxable: Decimal,
    pub non_taxable: Decimal,
    pub legal_deductions: Decimal,
    pub other_deductions: Decimal,
    pub net_pay: Decimal,
}

impl PayrollTotals {
    pub fn from_items(items: impl IntoIterator<Item = (ItemCategory, Decimal)>) -> Self {
        let mut totals = items.into_iter().fold(Self::default(), |mut totals, (category, amount)| {
            match category {
                ItemCategory::TaxableEarning => totals.taxable += amount,
                ItemCategory::NonTaxableEarning => totals.non_taxable += amount,
                ItemCategory::LegalDeduction => totals.legal_deductions += amount,
                ItemCategory::OtherDeduction => totals.other_deductions += amount,
            }
            totals
        });

        totals.net_pay = utils::round_pesos(
            (totals.taxable + totals.non_taxable) - (totals.legal_deductions + totals.other_deductions)
        );

        totals
    }
}
