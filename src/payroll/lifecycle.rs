//! Persistence of payroll records.
//!
//! A record is unique per organization, employee and period. Saving always closes
//! it and regenerates every line item inside one transaction; only [`reopen`] puts
//! it back into draft. Concurrent saves of the same key are last-write-wins, the
//! unique key being the only guard.

use std::collections::HashMap;

use chrono::{Local, NaiveDate};
use sea_orm::{sea_query::OnConflict, ActiveValue::{Set, Unchanged}, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, TransactionTrait};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::{consts::*, entity::{employee, payroll, payroll_item, prelude::*, sea_orm_active_enums::{ItemCategory, ItemOrigin}}, utils};

use super::{engine, model::{AdHocEntry, AdHocItem, Breakdown, EmployeeSnapshot, LineItem, PayrollTotals}, parameters, OrganizationContext, PayrollError};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedPayroll {
    pub payroll: payroll::Model,
    pub items: Vec<payroll_item::Model>,
    pub breakdown: Breakdown,
}

/// A stored payroll with its ledger rebuilt for editing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollEdit {
    pub payroll: payroll::Model,
    pub items: Vec<payroll_item::Model>,
    pub ad_hoc_items: Vec<AdHocItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodPayroll {
    pub payroll: payroll::Model,
    pub employee: employee::Model,
    pub items: Vec<payroll_item::Model>,
}

pub async fn load_employee(db: &DatabaseConnection, ctx: &OrganizationContext, employee_id: Uuid) -> Result<(employee::Model, EmployeeSnapshot), PayrollError> {
    let Some(employee) = Employee::find_by_id(employee_id)
        .filter(employee::Column::OrganizationId.eq(ctx.organization_id))
        .one(db).await?
    else {
        return Err(PayrollError::NotFound("employee"));
    };

    let pension = match employee.pension_provider_id {
        Some(id) => PensionProvider::find_by_id(id).one(db).await?,
        None => None,
    };

    let health = match employee.health_provider_id {
        Some(id) => HealthProvider::find_by_id(id).one(db).await?,
        None => None,
    };

    if pension.is_none() {
        warn!(employee_id = %employee.id, "employee has no pension provider, using {FALLBACK_PENSION_RATE}%");
    }

    let snapshot = EmployeeSnapshot::new(&employee, pension.as_ref(), health.as_ref());

    Ok((employee, snapshot))
}

/// Resolves each entry's label from the concept catalog
pub async fn resolve_ad_hoc_items(db: &DatabaseConnection, entries: &[AdHocEntry]) -> Result<Vec<AdHocItem>, PayrollError> {
    if entries.is_empty() {
        return Ok(Vec::new());
    }

    if let Some(extra) = entries.get(MAX_AD_HOC_ITEMS) {
        return Err(PayrollError::invalid_item(&extra.concept_code, "too many ad-hoc items"));
    }

    let codes = entries.iter().map(|e| e.concept_code.clone()).collect::<Vec<_>>();

    let concepts = LreConcept::find()
        .filter(crate::entity::lre_concept::Column::Code.is_in(codes))
        .all(db).await?
        .into_iter()
        .map(|c| (c.code, c.name))
        .collect::<HashMap<_, _>>();

    entries.iter()
        .map(|entry| {
            let Some(label) = concepts.get(&entry.concept_code) else {
                return Err(PayrollError::invalid_item(&entry.concept_code, "unknown concept code"));
            };

            AdHocItem {
                concept_code: entry.concept_code.clone(),
                label: label.clone(),
                amount: entry.amount,
            }.normalized()
        })
        .collect()
}

/// Computes the payroll without persisting anything
pub async fn preview(
    db: &DatabaseConnection,
    ctx: &OrganizationContext,
    employee_id: Uuid,
    period: NaiveDate,
    entries: &[AdHocEntry],
    worked_days: Option<u8>,
) -> Result<(EmployeeSnapshot, Breakdown), PayrollError> {
    let period = utils::first_day_of_month(period);

    let (_, snapshot) = load_employee(db, ctx, employee_id).await?;
    let params = parameters::get(db, ctx, period).await
        .inspect_err(|err| warn!(%employee_id, %period, "payroll not computed: {err}"))?;
    let ad_hoc_items = resolve_ad_hoc_items(db, entries).await?;

    let breakdown = engine::compute_payroll(&snapshot, Some(&params), &ad_hoc_items, worked_days)
        .inspect_err(|err| warn!(%employee_id, %period, "payroll not computed: {err}"))?;

    debug!(%employee_id, %period, ?breakdown, "payroll computed");

    Ok((snapshot, breakdown))
}

/// System generated rows first, then the ad-hoc ledger in entry order
pub fn line_items(employee: &EmployeeSnapshot, breakdown: &Breakdown) -> Vec<LineItem> {
    let system = [
        ("Sueldo Base".to_owned(), ItemCategory::TaxableEarning, CODE_BASE_SALARY, breakdown.base_salary),
        ("Gratificación Legal".to_owned(), ItemCategory::TaxableEarning, CODE_GRATIFICATION, breakdown.gratification),
        (format!("AFP {}", employee.pension_provider_name).trim_end().to_owned(), ItemCategory::LegalDeduction, CODE_PENSION, breakdown.pension),
        (format!("Salud {}", employee.health_provider_name).trim_end().to_owned(), ItemCategory::LegalDeduction, CODE_HEALTH, breakdown.health),
        ("Seguro Cesantía".to_owned(), ItemCategory::LegalDeduction, CODE_UNEMPLOYMENT, breakdown.unemployment),
    ];

    let system = system.into_iter().map(|(concept, category, code, amount)| LineItem {
        concept,
        category,
        origin: ItemOrigin::System,
        lre_code: code.to_owned(),
        amount,
    });

    let ad_hoc = breakdown.ad_hoc_items.iter().filter_map(|item| {
        Some(LineItem {
            concept: item.label.clone(),
            category: item.category().ok()?,
            origin: ItemOrigin::AdHoc,
            lre_code: item.concept_code.clone(),
            amount: item.amount,
        })
    });

    system.chain(ad_hoc).collect()
}

/// Computes and stores the payroll, closing it.
///
/// Nothing is written when the computation fails. The record upsert, the removal
/// of the previous line items and the insertion of the new ones share a single
/// transaction, so a failure leaves the previous state untouched.
pub async fn save(
    db: &DatabaseConnection,
    ctx: &OrganizationContext,
    employee_id: Uuid,
    period: NaiveDate,
    entries: &[AdHocEntry],
    worked_days: Option<u8>,
) -> Result<SavedPayroll, PayrollError> {
    let period = utils::first_day_of_month(period);

    let (snapshot, breakdown) = preview(db, ctx, employee_id, period, entries, worked_days).await?;

    let lines = line_items(&snapshot, &breakdown);
    let totals = PayrollTotals::from_items(lines.iter().map(|line| (line.category, line.amount)));

    let lines = lines.into_iter()
        .enumerate()
        .map(|(position, line)| {
            let position = i16::try_from(position)
                .map_err(|_| PayrollError::invalid_item(&line.lre_code, "too many ad-hoc items"))?;

            Ok((position, line))
        })
        .collect::<Result<Vec<_>, PayrollError>>()?;

    let now = Local::now().fixed_offset();

    let txn = db.begin().await?;

    let existing = Payroll::find()
        .filter(payroll::Column::OrganizationId.eq(ctx.organization_id))
        .filter(payroll::Column::EmployeeId.eq(employee_id))
        .filter(payroll::Column::PeriodDate.eq(period))
        .one(&txn).await?;

    if existing.as_ref().is_some_and(|p| p.is_closed) {
        return Err(PayrollError::Closed);
    }

    let payroll = Payroll::insert(payroll::ActiveModel {
        id: Set(existing.map(|p| p.id).unwrap_or_else(Uuid::new_v4)),
        created_at: Set(now),
        updated_at: Set(now),
        organization_id: Set(ctx.organization_id),
        employee_id: Set(employee_id),
        period_date: Set(period),
        worked_days: Set(breakdown.worked_days.into()),
        total_taxable: Set(totals.taxable),
        total_non_taxable: Set(totals.non_taxable),
        total_legal_deductions: Set(totals.legal_deductions),
        total_other_deductions: Set(totals.other_deductions),
        net_pay: Set(totals.net_pay),
        is_closed: Set(true),
    })
        .on_conflict(
            OnConflict::columns([payroll::Column::OrganizationId, payroll::Column::EmployeeId, payroll::Column::PeriodDate])
                .update_columns([
                    payroll::Column::UpdatedAt,
                    payroll::Column::WorkedDays,
                    payroll::Column::TotalTaxable,
                    payroll::Column::TotalNonTaxable,
                    payroll::Column::TotalLegalDeductions,
                    payroll::Column::TotalOtherDeductions,
                    payroll::Column::NetPay,
                    payroll::Column::IsClosed,
                ])
                .to_owned()
        )
        .exec_with_returning(&txn).await?;

    PayrollItem::delete_many()
        .filter(payroll_item::Column::PayrollId.eq(payroll.id))
        .exec(&txn).await?;

    let items = lines.into_iter().map(|(position, line)| payroll_item::Model {
        id: Uuid::new_v4(),
        created_at: now,
        updated_at: now,
        payroll_id: payroll.id,
        position,
        concept: line.concept,
        category: line.category,
        origin: line.origin,
        lre_code: line.lre_code,
        amount: line.amount,
    }).collect::<Vec<_>>();

    PayrollItem::insert_many(items.iter().map(|item| payroll_item::ActiveModel {
        id: Set(item.id),
        created_at: Set(item.created_at),
        updated_at: Set(item.updated_at),
        payroll_id: Set(item.payroll_id),
        position: Set(item.position),
        concept: Set(item.concept.clone()),
        category: Set(item.category),
        origin: Set(item.origin),
        lre_code: Set(item.lre_code.clone()),
        amount: Set(item.amount),
    }))
        .exec_without_returning(&txn).await?;

    txn.commit().await?;

    info!(payroll_id = %payroll.id, %employee_id, %period, net_pay = %payroll.net_pay, items = items.len(), "payroll saved");

    Ok(SavedPayroll {
        payroll,
        items,
        breakdown,
    })
}

pub async fn find(db: &DatabaseConnection, ctx: &OrganizationContext, payroll_id: Uuid) -> Result<payroll::Model, PayrollError> {
    Payroll::find_by_id(payroll_id)
        .filter(payroll::Column::OrganizationId.eq(ctx.organization_id))
        .one(db).await?
        .ok_or(PayrollError::NotFound("payroll"))
}

pub async fn items_of(db: &DatabaseConnection, payroll_id: Uuid) -> Result<Vec<payroll_item::Model>, PayrollError> {
    Ok(
        PayrollItem::find()
            .filter(payroll_item::Column::PayrollId.eq(payroll_id))
            .order_by_asc(payroll_item::Column::Position)
            .all(db).await?
    )
}

/// Puts a closed payroll back into draft, leaving totals and line items as they are
pub async fn reopen(db: &DatabaseConnection, ctx: &OrganizationContext, payroll_id: Uuid) -> Result<payroll::Model, PayrollError> {
    let payroll = find(db, ctx, payroll_id).await?;

    if !payroll.is_closed {
        return Err(PayrollError::NotClosed);
    }

    let payroll = Payroll::update(payroll::ActiveModel {
        id: Unchanged(payroll.id),
        is_closed: Set(false),
        updated_at: Set(Local::now().fixed_offset()),
        ..Default::default()
    }).exec(db).await?;

    info!(%payroll_id, "payroll reopened");

    Ok(payroll)
}

/// Loads the stored payroll of an employee and period, with its ad-hoc ledger
pub async fn load(db: &DatabaseConnection, ctx: &OrganizationContext, employee_id: Uuid, period: NaiveDate) -> Result<PayrollEdit, PayrollError> {
    let Some(payroll) = Payroll::find()
        .filter(payroll::Column::OrganizationId.eq(ctx.organization_id))
        .filter(payroll::Column::EmployeeId.eq(employee_id))
        .filter(payroll::Column::PeriodDate.eq(utils::first_day_of_month(period)))
        .one(db).await?
    else {
        return Err(PayrollError::NotFound("payroll"));
    };

    let items = items_of(db, payroll.id).await?;

    let ad_hoc_items = items.iter()
        .filter(|item| item.origin == ItemOrigin::AdHoc)
        .map(AdHocItem::from)
        .collect();

    Ok(PayrollEdit {
        payroll,
        items,
        ad_hoc_items,
    })
}

/// Every closed payroll of the period, grouped by employee
pub async fn closed_for_period(db: &DatabaseConnection, ctx: &OrganizationContext, period: NaiveDate) -> Result<Vec<PeriodPayroll>, PayrollError> {
    let payrolls = Payroll::find()
        .filter(payroll::Column::OrganizationId.eq(ctx.organization_id))
        .filter(payroll::Column::PeriodDate.eq(utils::first_day_of_month(period)))
        .filter(payroll::Column::IsClosed.eq(true))
        .order_by_asc(payroll::Column::EmployeeId)
        .all(db).await?;

    if payrolls.is_empty() {
        return Ok(Vec::new());
    }

    let mut employees = Employee::find()
        .filter(employee::Column::Id.is_in(payrolls.iter().map(|p| p.employee_id).collect::<Vec<_>>()))
        .all(db).await?
        .into_iter()
        .map(|e| (e.id, e))
        .collect::<HashMap<_, _>>();

    let mut items = HashMap::<Uuid, Vec<payroll_item::Model>>::new();
    for item in PayrollItem::find()
        .filter(payroll_item::Column::PayrollId.is_in(payrolls.iter().map(|p| p.id).collect::<Vec<_>>()))
        .order_by_asc(payroll_item::Column::PayrollId)
        .order_by_asc(payroll_item::Column::Position)
        .all(db).await?
    {
        items.entry(item.payroll_id).or_default().push(item);
    }

    Ok(
        payrolls.into_iter()
            .filter_map(|payroll| {
                let Some(employee) = employees.remove(&payroll.employee_id) else {
                    warn!(payroll_id = %payroll.id, "payroll without employee skipped");
                    return None;
                };

                Some(PeriodPayroll {
                    items: items.remove(&payroll.id).unwrap_or_default(),
                    employee,
                    payroll,
                })
            })
            .collect()
    )
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use sea_orm::{DatabaseBackend, DbErr, MockDatabase, MockExecResult};

    use crate::fixtures;

    use super::*;

    struct Scenario {
        ctx: OrganizationContext,
        employee: employee::Model,
        mock: MockDatabase,
    }

    /// Mock answering the lookups `preview` runs, in order
    fn scenario(with_parameters: bool) -> Scenario {
        let ctx = fixtures::context();
        let pension = fixtures::pension_provider();
        let health = fixtures::health_provider();
        let employee = fixtures::employee(&ctx, &pension, &health);

        let params = match with_parameters {
            true => vec![ fixtures::parameters(&ctx, fixtures::june()) ],
            false => vec![],
        };

        let mock = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![ employee.clone() ]])
            .append_query_results([vec![ pension ]])
            .append_query_results([vec![ health ]])
            .append_query_results([params]);

        Scenario { ctx, employee, mock }
    }

    fn meal_allowance() -> Vec<AdHocEntry> {
        vec![AdHocEntry {
            concept_code: "2101".to_owned(),
            amount: dec!(40000),
        }]
    }

    fn without_ids(items: &[payroll_item::Model]) -> Vec<(i16, String, ItemCategory, ItemOrigin, String, Decimal)> {
        items.iter()
            .map(|i| (i.position, i.concept.clone(), i.category, i.origin, i.lre_code.clone(), i.amount))
            .collect()
    }

    async fn save_once(existing: Option<payroll::Model>) -> (SavedPayroll, usize) {
        let Scenario { ctx, employee, mock } = scenario(true);

        let returned = payroll::Model {
            total_non_taxable: dec!(40000),
            net_pay: dec!(653650),
            ..fixtures::payroll(&ctx, &employee, true)
        };

        let db = mock
            .append_query_results([vec![ fixtures::concept("2101", "Colación") ]])
            .append_query_results([existing.into_iter().collect::<Vec<_>>()])
            .append_query_results([vec![ returned ]])
            .append_exec_results([
                MockExecResult { last_insert_id: 0, rows_affected: 6 },
                MockExecResult { last_insert_id: 0, rows_affected: 6 },
            ])
            .into_connection();

        let saved = save(&db, &ctx, employee.id, fixtures::june(), &meal_allowance(), None).await.unwrap();

        (saved, db.into_transaction_log().len())
    }

    #[actix_web::test]
    async fn test_save() {
        let (saved, log_len) = save_once(None).await;

        // 5 lookups plus the save transaction
        assert_eq!(log_len, 6);

        assert_eq!(saved.breakdown.net_pay, dec!(653650));
        assert_eq!(saved.items.len(), 6);
        assert!(saved.items.iter().all(|i| i.payroll_id == saved.payroll.id));

        let system = saved.items.iter().filter(|i| i.origin == ItemOrigin::System).collect::<Vec<_>>();
        assert_eq!(
            system.iter().map(|i| i.lre_code.as_str()).collect::<Vec<_>>(),
            [CODE_BASE_SALARY, CODE_GRATIFICATION, CODE_PENSION, CODE_HEALTH, CODE_UNEMPLOYMENT]
        );
        assert_eq!(system[2].concept, "AFP Modelo");
        assert_eq!(system[3].concept, "Salud Fonasa");

        let meal = &saved.items[5];
        assert_eq!(meal.origin, ItemOrigin::AdHoc);
        assert_eq!(meal.category, ItemCategory::NonTaxableEarning);
        assert_eq!(meal.concept, "Colación");

        let totals = PayrollTotals::from_items(saved.items.iter().map(|i| (i.category, i.amount)));
        assert_eq!(totals, saved.breakdown.totals());
    }

    #[actix_web::test]
    async fn test_resave_is_idempotent() {
        let (first, _) = save_once(None).await;

        let draft = payroll::Model {
            is_closed: false,
            ..first.payroll.clone()
        };
        let (second, _) = save_once(Some(draft)).await;

        assert_eq!(first.breakdown, second.breakdown);
        assert_eq!(without_ids(&first.items), without_ids(&second.items));
    }

    #[actix_web::test]
    async fn test_save_rejects_closed_payroll() {
        let Scenario { ctx, employee, mock } = scenario(true);

        let db = mock
            .append_query_results([vec![ fixtures::payroll(&ctx, &employee, true) ]])
            .into_connection();

        let result = save(&db, &ctx, employee.id, fixtures::june(), &[], None).await;
        assert!(matches!(result, Err(PayrollError::Closed)));
    }

    #[actix_web::test]
    async fn test_save_rolls_back_on_failed_insert() {
        let Scenario { ctx, employee, mock } = scenario(true);

        let draft = fixtures::payroll(&ctx, &employee, false);

        let db = mock
            .append_query_results([vec![ fixtures::concept("2101", "Colación") ]])
            .append_query_results([vec![ draft.clone() ]])
            .append_query_results([vec![ draft ]])
            .append_exec_results([MockExecResult { last_insert_id: 0, rows_affected: 5 }])
            .append_exec_errors([DbErr::Custom("connection reset".to_owned())])
            .into_connection();

        let result = save(&db, &ctx, employee.id, fixtures::june(), &meal_allowance(), None).await;
        assert!(matches!(result, Err(PayrollError::Persistence(_))));

        let log = db.into_transaction_log();
        assert_eq!(log.len(), 6);

        // The upsert and the removal of the previous items are discarded with it
        let statements = log[5].statements();
        assert_eq!(statements.first().unwrap().sql, "BEGIN");
        assert_eq!(statements.last().unwrap().sql, "ROLLBACK");
    }

    #[actix_web::test]
    async fn test_save_too_many_items() {
        let Scenario { ctx, employee, mock } = scenario(true);
        let db = mock.into_connection();

        let entries = vec![
            AdHocEntry {
                concept_code: "2101".to_owned(),
                amount: dec!(1000),
            };
            MAX_AD_HOC_ITEMS + 1
        ];

        let result = save(&db, &ctx, employee.id, fixtures::june(), &entries, None).await;
        assert!(matches!(result, Err(PayrollError::InvalidAdHocItem { reason: "too many ad-hoc items", .. })));

        // Rejected before the concept catalog is read
        assert_eq!(db.into_transaction_log().len(), 4);
    }

    #[actix_web::test]
    async fn test_missing_parameters_reported_before_unknown_concept() {
        let Scenario { ctx, employee, mock } = scenario(false);
        let db = mock.into_connection();

        let entries = [AdHocEntry {
            concept_code: "2999".to_owned(),
            amount: dec!(1000),
        }];

        let result = preview(&db, &ctx, employee.id, fixtures::june(), &entries, None).await;
        assert!(matches!(result, Err(PayrollError::MissingParameters)));
    }

    #[actix_web::test]
    async fn test_save_without_parameters_writes_nothing() {
        let Scenario { ctx, employee, mock } = scenario(false);
        let db = mock.into_connection();

        let result = save(&db, &ctx, employee.id, fixtures::june(), &[], None).await;
        assert!(matches!(result, Err(PayrollError::MissingParameters)));

        // Employee, pension, health and parameter lookups only
        assert_eq!(db.into_transaction_log().len(), 4);
    }

    #[actix_web::test]
    async fn test_save_unknown_concept() {
        let Scenario { ctx, employee, mock } = scenario(true);

        let db = mock
            .append_query_results([Vec::<crate::entity::lre_concept::Model>::new()])
            .into_connection();

        let result = save(&db, &ctx, employee.id, fixtures::june(), &meal_allowance(), None).await;
        assert!(matches!(result, Err(PayrollError::InvalidAdHocItem { .. })));
    }

    #[actix_web::test]
    async fn test_save_unknown_employee() {
        let ctx = fixtures::context();

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<employee::Model>::new()])
            .into_connection();

        let result = save(&db, &ctx, Uuid::new_v4(), fixtures::june(), &[], None).await;
        assert!(matches!(result, Err(PayrollError::NotFound("employee"))));
    }

    #[actix_web::test]
    async fn test_preview() {
        let Scenario { ctx, employee, mock } = scenario(true);
        let db = mock.into_connection();

        let (snapshot, breakdown) = preview(&db, &ctx, employee.id, fixtures::june(), &[], Some(15)).await.unwrap();

        assert_eq!(snapshot.pension_rate_percent, dec!(10.58));
        assert_eq!(breakdown.base_salary, dec!(300000));
        assert_eq!(breakdown.taxable_total, dec!(375000));

        // Preview never opens a transaction
        assert_eq!(db.into_transaction_log().len(), 4);
    }

    #[actix_web::test]
    async fn test_reopen_preserves_totals() {
        let ctx = fixtures::context();
        let pension = fixtures::pension_provider();
        let health = fixtures::health_provider();
        let employee = fixtures::employee(&ctx, &pension, &health);

        let closed = fixtures::payroll(&ctx, &employee, true);
        let reopened = payroll::Model {
            is_closed: false,
            ..closed.clone()
        };

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([
                vec![ closed.clone() ],
                vec![ reopened ],
            ])
            .into_connection();

        let payroll = reopen(&db, &ctx, closed.id).await.unwrap();

        assert!(!payroll.is_closed);
        assert_eq!(payroll.net_pay, closed.net_pay);
        assert_eq!(payroll.total_taxable, closed.total_taxable);

        // A lookup and a single update, line items are never touched
        assert_eq!(db.into_transaction_log().len(), 2);
    }

    #[actix_web::test]
    async fn test_reopen_draft() {
        let ctx = fixtures::context();
        let pension = fixtures::pension_provider();
        let health = fixtures::health_provider();
        let draft = fixtures::payroll(&ctx, &fixtures::employee(&ctx, &pension, &health), false);

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![ draft.clone() ]])
            .into_connection();

        assert!(matches!(reopen(&db, &ctx, draft.id).await, Err(PayrollError::NotClosed)));
    }

    #[actix_web::test]
    async fn test_reopen_missing() {
        let ctx = fixtures::context();

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<payroll::Model>::new()])
            .into_connection();

        assert!(matches!(reopen(&db, &ctx, Uuid::new_v4()).await, Err(PayrollError::NotFound("payroll"))));
    }

    #[actix_web::test]
    async fn test_load_rebuilds_ledger_from_origin() {
        let ctx = fixtures::context();
        let pension = fixtures::pension_provider();
        let health = fixtures::health_provider();
        let employee = fixtures::employee(&ctx, &pension, &health);
        let payroll = fixtures::payroll(&ctx, &employee, true);

        // An ad-hoc item whose label looks like a system one must survive
        let mut items = fixtures::items(&payroll);
        items.push(fixtures::item(&payroll, 6, ("Sueldo Base retroactivo", "1106", ItemCategory::TaxableEarning, ItemOrigin::AdHoc, dec!(10000))));

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![ payroll.clone() ]])
            .append_query_results([items])
            .into_connection();

        let edit = load(&db, &ctx, employee.id, fixtures::june()).await.unwrap();

        assert_eq!(edit.items.len(), 7);
        assert_eq!(
            edit.ad_hoc_items,
            vec![
                AdHocItem { concept_code: "2101".to_owned(), label: "Colación".to_owned(), amount: dec!(40000) },
                AdHocItem { concept_code: "1106".to_owned(), label: "Sueldo Base retroactivo".to_owned(), amount: dec!(10000) },
            ]
        );
    }

    #[actix_web::test]
    async fn test_load_missing() {
        let ctx = fixtures::context();

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<payroll::Model>::new()])
            .into_connection();

        assert!(matches!(load(&db, &ctx, Uuid::new_v4(), fixtures::june()).await, Err(PayrollError::NotFound("payroll"))));
    }

    #[actix_web::test]
    async fn test_closed_for_period() {
        let ctx = fixtures::context();
        let pension = fixtures::pension_provider();
        let health = fixtures::health_provider();
        let first = fixtures::employee(&ctx, &pension, &health);
        let second = fixtures::employee(&ctx, &pension, &health);

        let first_payroll = fixtures::payroll(&ctx, &first, true);
        let second_payroll = fixtures::payroll(&ctx, &second, true);

        let mut items = fixtures::items(&first_payroll);
        items.extend(fixtures::items(&second_payroll));

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![ first_payroll.clone(), second_payroll.clone() ]])
            .append_query_results([vec![ second.clone(), first.clone() ]])
            .append_query_results([items])
            .into_connection();

        let payrolls = closed_for_period(&db, &ctx, fixtures::june()).await.unwrap();

        assert_eq!(payrolls.len(), 2);
        assert_eq!(payrolls[0].employee, first);
        assert_eq!(payrolls[0].items.len(), 6);
        assert!(payrolls[0].items.iter().all(|i| i.payroll_id == first_payroll.id));
        assert_eq!(payrolls[1].employee, second);
        assert_eq!(payrolls[1].items.len(), 6);
    }

    #[actix_web::test]
    async fn test_closed_for_period_empty() {
        let ctx = fixtures::context();

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<payroll::Model>::new()])
            .into_connection();

        assert!(closed_for_period(&db, &ctx, fixtures::june()).await.unwrap().is_empty());
    }

    #[test]
    fn test_line_items_without_providers() {
        let snapshot = EmployeeSnapshot {
            contractual_salary: dec!(600000),
            pension_rate_percent: FALLBACK_PENSION_RATE,
            pension_provider_name: String::new(),
            health_provider_name: String::new(),
        };
        let params = crate::payroll::model::EconomicParameters::from(fixtures::parameters(&fixtures::context(), fixtures::june()));
        let breakdown = engine::compute_payroll(&snapshot, Some(&params), &[], None).unwrap();

        let lines = line_items(&snapshot, &breakdown);

        assert_eq!(lines[2].concept, "AFP");
        assert_eq!(lines[3].concept, "Salud");
        assert_eq!(lines[2].amount, dec!(75000));
    }
}
