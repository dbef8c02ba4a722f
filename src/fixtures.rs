use chrono::{Duration, Local, NaiveDate};
use jsonwebtoken::{encode, EncodingKey, Header};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use uuid::Uuid;

use crate::{auth::{Claims, Role, Session}, entity::{employee, health_provider, lre_concept, payroll, payroll_item, payroll_parameters, pension_provider, sea_orm_active_enums::{ItemCategory, ItemOrigin}}, payroll::OrganizationContext};

pub(crate) fn context() -> OrganizationContext {
    OrganizationContext {
        organization_id: Uuid::new_v4(),
    }
}

pub(crate) const SECRET: &[u8] = b"secret";

pub(crate) fn session(ctx: &OrganizationContext, role: Role) -> Session {
    Session {
        user_id: Uuid::new_v4(),
        organization_id: ctx.organization_id,
        role,
    }
}

/// Token the identity provider would hand off, valid for 1 week
pub(crate) fn token(secret: &[u8], session: &Session) -> String {
    let claims = Claims {
        exp: (Local::now() + Duration::weeks(1)).timestamp(),
        data: session,
    };

    encode(&Header::default(), &claims, &EncodingKey::from_secret(secret)).unwrap()
}

/// `Authorization` header carrying a token signed with [`SECRET`]
pub(crate) fn authorization(session: &Session) -> (&'static str, String) {
    let token = token(SECRET, session);

    ("Authorization", format!("JWT {token}"))
}

pub(crate) fn june() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
}

pub(crate) fn pension_provider() -> pension_provider::Model {
    pension_provider::Model {
        id: Uuid::new_v4(),
        created_at: Local::now().into(),
        updated_at: Local::now().into(),
        name: "Modelo".to_owned(),
        rate: dec!(10.58),
    }
}

pub(crate) fn health_provider() -> health_provider::Model {
    health_provider::Model {
        id: Uuid::new_v4(),
        created_at: Local::now().into(),
        updated_at: Local::now().into(),
        name: "Fonasa".to_owned(),
    }
}

pub(crate) fn employee(
    ctx: &OrganizationContext,
    pension: &pension_provider::Model,
    health: &health_provider::Model,
) -> employee::Model {
    employee::Model {
        id: Uuid::new_v4(),
        created_at: Local::now().into(),
        updated_at: Local::now().into(),
        organization_id: ctx.organization_id,
        rut: "12.345.678-5".to_owned(),
        first_name: "Camila".to_owned(),
        last_name: "González Pérez".to_owned(),
        salary: dec!(600000),
        hire_date: NaiveDate::from_ymd_opt(2022, 3, 1).unwrap(),
        pension_provider_id: Some(pension.id),
        health_provider_id: Some(health.id),
        job_id: None,
    }
}

pub(crate) fn parameters(ctx: &OrganizationContext, period: NaiveDate) -> payroll_parameters::Model {
    payroll_parameters::Model {
        id: Uuid::new_v4(),
        created_at: Local::now().into(),
        updated_at: Local::now().into(),
        organization_id: ctx.organization_id,
        period_date: period,
        uf_value: dec!(37000),
        utm_value: dec!(65000),
        min_wage: dec!(500000),
        afp_cap_uf: dec!(84.3),
        unemployment_cap_uf: dec!(126.6),
    }
}

pub(crate) fn concept(code: &str, name: &str) -> lre_concept::Model {
    lre_concept::Model {
        code: code.to_owned(),
        name: name.to_owned(),
    }
}

/// Record as stored after saving [`employee`] for a full month without ad-hoc items
pub(crate) fn payroll(ctx: &OrganizationContext, employee: &employee::Model, is_closed: bool) -> payroll::Model {
    payroll::Model {
        id: Uuid::new_v4(),
        created_at: Local::now().into(),
        updated_at: Local::now().into(),
        organization_id: ctx.organization_id,
        employee_id: employee.id,
        period_date: june(),
        worked_days: 30,
        total_taxable: dec!(750000),
        total_non_taxable: Decimal::ZERO,
        total_legal_deductions: dec!(136350),
        total_other_deductions: Decimal::ZERO,
        net_pay: dec!(613650),
        is_closed,
    }
}

pub(crate) fn item(
    payroll: &payroll::Model,
    position: i16,
    (concept, lre_code, category, origin, amount): (&str, &str, ItemCategory, ItemOrigin, Decimal),
) -> payroll_item::Model {
    payroll_item::Model {
        id: Uuid::new_v4(),
        created_at: Local::now().into(),
        updated_at: Local::now().into(),
        payroll_id: payroll.id,
        position,
        concept: concept.to_owned(),
        category,
        origin,
        lre_code: lre_code.to_owned(),
        amount,
    }
}

/// Line items matching [`payroll`] plus one ad-hoc meal allowance
pub(crate) fn items(payroll: &payroll::Model) -> Vec<payroll_item::Model> {
    [
        ("Sueldo Base", "1101", ItemCategory::TaxableEarning, ItemOrigin::System, dec!(600000)),
        ("Gratificación Legal", "1105", ItemCategory::TaxableEarning, ItemOrigin::System, dec!(150000)),
        ("AFP Modelo", "3101", ItemCategory::LegalDeduction, ItemOrigin::System, dec!(79350)),
        ("Salud Fonasa", "3102", ItemCategory::LegalDeduction, ItemOrigin::System, dec!(52500)),
        ("Seguro Cesantía", "3104", ItemCategory::LegalDeduction, ItemOrigin::System, dec!(4500)),
        ("Colación", "2101", ItemCategory::NonTaxableEarning, ItemOrigin::AdHoc, dec!(40000)),
    ]
        .into_iter()
        .enumerate()
        .map(|(position, row)| item(payroll, position as i16, row))
        .collect()
}
