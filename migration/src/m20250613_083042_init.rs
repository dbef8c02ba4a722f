use sea_orm_migration::{prelude::{extension::postgres::TypeDropStatement, *}, sea_orm::{ActiveEnum, DbBackend, DeriveActiveEnum, EnumIter, Schema}};

use crate::util::{amount, default_organization_table_statement, default_table_statement, DefaultColumn, OrganizationColumn};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let schema = Schema::new(DbBackend::Postgres);

        manager
            .create_type(
                schema.create_enum_from_active_enum::<ItemCategory>()
            ).await?;

        manager
            .create_type(
                schema.create_enum_from_active_enum::<ItemOrigin>()
            ).await?;

        manager
            .create_table(default_table_statement()
                .table(PensionProvider::Table)
                .col(ColumnDef::new(PensionProvider::Name)
                    .text()
                    .unique_key()
                    .not_null())
                .col(ColumnDef::new(PensionProvider::Rate)
                    .decimal_len(5, 2)
                    .not_null()) // Percent of the contribution base, 10.58 for 10.58%
                .take()
            ).await?;

        manager
            .create_table(default_table_statement()
                .table(HealthProvider::Table)
                .col(ColumnDef::new(HealthProvider::Name)
                    .text()
                    .unique_key()
                    .not_null())
                .take()
            ).await?;

        manager
            .create_table(default_organization_table_statement()
                .table(Job::Table)
                .col(ColumnDef::new(Job::Name)
                    .text()
                    .not_null())
                .take()
            ).await?;

        manager
            .create_table(default_organization_table_statement()
                .table(Employee::Table)
                .col(ColumnDef::new(Employee::Rut)
                    .text()
                    .not_null())
                .col(ColumnDef::new(Employee::FirstName)
                    .text()
                    .not_null())
                .col(ColumnDef::new(Employee::LastName)
                    .text()
                    .not_null())
                .col(amount(Employee::Salary))
                .col(ColumnDef::new(Employee::HireDate)
                    .date()
                    .not_null())
                .col(ColumnDef::new(Employee::PensionProviderId)
                    .uuid())
                .col(ColumnDef::new(Employee::HealthProviderId)
                    .uuid())
                .col(ColumnDef::new(Employee::JobId)
                    .uuid())
                .take()
            ).await?;

        manager.create_index(Index::create()
            .name("idx_employee_organization_rut")
            .table(Employee::Table)
            .col(OrganizationColumn::OrganizationId)
            .col(Employee::Rut)
            .unique()
            .to_owned()
        ).await?;

        for (column, table) in [
            (Employee::PensionProviderId, PensionProvider::Table.into_iden()),
            (Employee::HealthProviderId, HealthProvider::Table.into_iden()),
            (Employee::JobId, Job::Table.into_iden()),
        ] {
            manager.create_foreign_key(ForeignKeyCreateStatement::new()
                .from(Employee::Table, column)
                .to(table, DefaultColumn::Id)
                .on_delete(ForeignKeyAction::SetNull)
                .on_update(ForeignKeyAction::Cascade)
                .take()
            ).await?;
        }

        manager
            .create_table(default_organization_table_statement()
                .table(PayrollParameters::Table)
                .col(ColumnDef::new(PayrollParameters::PeriodDate)
                    .date()
                    .not_null())
                .col(amount(PayrollParameters::UfValue))
                .col(amount(PayrollParameters::UtmValue))
                .col(amount(PayrollParameters::MinWage))
                .col(amount(PayrollParameters::AfpCapUf))
                .col(amount(PayrollParameters::UnemploymentCapUf))
                .take()
            ).await?;

        manager.create_index(Index::create()
            .name("idx_payroll_parameters_organization_period")
            .table(PayrollParameters::Table)
            .col(OrganizationColumn::OrganizationId)
            .col(PayrollParameters::PeriodDate)
            .unique()
            .to_owned()
        ).await?;

        manager
            .create_table(TableCreateStatement::new()
                .if_not_exists()
                .table(LreConcept::Table)
                .col(ColumnDef::new(LreConcept::Code)
                    .text()
                    .primary_key())
                .col(ColumnDef::new(LreConcept::Name)
                    .text()
                    .not_null())
                .take()
            ).await?;

        manager
            .create_table(default_organization_table_statement()
                .table(Payroll::Table)
                .col(ColumnDef::new(Payroll::EmployeeId)
                    .uuid()
                    .not_null())
                .col(ColumnDef::new(Payroll::PeriodDate)
                    .date()
                    .not_null()) // Always the first day of the month
                .col(ColumnDef::new(Payroll::WorkedDays)
                    .small_integer()
                    .not_null())
                .col(amount(Payroll::TotalTaxable))
                .col(amount(Payroll::TotalNonTaxable))
                .col(amount(Payroll::TotalLegalDeductions))
                .col(amount(Payroll::TotalOtherDeductions))
                .col(amount(Payroll::NetPay))
                .col(ColumnDef::new(Payroll::IsClosed)
                    .boolean()
                    .not_null()
                    .default(false))
                .take()
            ).await?;

        manager.create_index(Index::create()
            .name("idx_payroll_organization_employee_period")
            .table(Payroll::Table)
            .col(OrganizationColumn::OrganizationId)
            .col(Payroll::EmployeeId)
            .col(Payroll::PeriodDate)
            .unique()
            .to_owned()
        ).await?;

        manager.create_foreign_key(ForeignKeyCreateStatement::new()
            .from(Payroll::Table, Payroll::EmployeeId)
            .to(Employee::Table, DefaultColumn::Id)
            .on_delete(ForeignKeyAction::Restrict)
            .on_update(ForeignKeyAction::Cascade)
            .take()
        ).await?;

        manager
            .create_table(default_table_statement()
                .table(PayrollItem::Table)
                .col(ColumnDef::new(PayrollItem::PayrollId)
                    .uuid()
                    .not_null())
                .col(ColumnDef::new(PayrollItem::Position)
                    .small_integer()
                    .not_null())
                .col(ColumnDef::new(PayrollItem::Concept)
                    .text()
                    .not_null())
                .col(ColumnDef::new(PayrollItem::Category)
                    .custom(ItemCategory::name())
                    .not_null())
                .col(ColumnDef::new(PayrollItem::Origin)
                    .custom(ItemOrigin::name())
                    .not_null())
                .col(ColumnDef::new(PayrollItem::LreCode)
                    .text()
                    .not_null())
                .col(amount(PayrollItem::Amount))
                .take()
            ).await?;

        manager.create_foreign_key(ForeignKeyCreateStatement::new()
            .from(PayrollItem::Table, PayrollItem::PayrollId)
            .to(Payroll::Table, DefaultColumn::Id)
            .on_delete(ForeignKeyAction::Cascade)
            .on_update(ForeignKeyAction::Cascade)
            .take()
        ).await?;

        manager.create_foreign_key(ForeignKeyCreateStatement::new()
            .from(PayrollItem::Table, PayrollItem::LreCode)
            .to(LreConcept::Table, LreConcept::Code)
            .on_delete(ForeignKeyAction::Restrict)
            .on_update(ForeignKeyAction::Cascade)
            .take()
        ).await?;

        manager.create_index(Index::create()
            .name("idx_payroll_item_payroll_position")
            .table(PayrollItem::Table)
            .col(PayrollItem::PayrollId)
            .col(PayrollItem::Position)
            .to_owned()
        ).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for table in [
            PayrollItem::Table.into_iden(),
            Payroll::Table.into_iden(),
            LreConcept::Table.into_iden(),
            PayrollParameters::Table.into_iden(),
            Employee::Table.into_iden(),
            Job::Table.into_iden(),
            HealthProvider::Table.into_iden(),
            PensionProvider::Table.into_iden(),
        ] {
            manager
                .drop_table(
                    TableDropStatement::new()
                        .table(table)
                        .take()
                ).await?;
        }

        manager
            .drop_type(
                TypeDropStatement::new()
                    .name(ItemOrigin::name())
                    .to_owned()
            ).await?;

        manager
            .drop_type(
                TypeDropStatement::new()
                    .name(ItemCategory::name())
                    .to_owned()
            ).await?;

        Ok(())
    }
}

#[derive(EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "item_category")]
enum ItemCategory {
    #[sea_orm(string_value = "HABER_IMP")]
    TaxableEarning,
    #[sea_orm(string_value = "NO_IMP")]
    NonTaxableEarning,
    #[sea_orm(string_value = "DESCUENTO_LEGAL")]
    LegalDeduction,
    #[sea_orm(string_value = "DESC")]
    OtherDeduction,
}

#[derive(EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "item_origin")]
enum ItemOrigin {
    #[sea_orm(string_value = "system")]
    System,
    #[sea_orm(string_value = "ad_hoc")]
    AdHoc,
}

#[derive(Iden)]
pub(crate) enum PensionProvider {
    Table,
    Name,
    Rate,
}

#[derive(Iden)]
pub(crate) enum HealthProvider {
    Table,
    Name,
}

#[derive(Iden)]
enum Job {
    Table,
    Name,
}

#[derive(Iden)]
enum Employee {
    Table,
    Rut,
    FirstName,
    LastName,
    Salary,
    HireDate,
    PensionProviderId,
    HealthProviderId,
    JobId,
}

#[derive(Iden)]
enum PayrollParameters {
    Table,
    PeriodDate,
    UfValue,
    UtmValue,
    MinWage,
    AfpCapUf,
    UnemploymentCapUf,
}

#[derive(Iden)]
pub(crate) enum LreConcept {
    Table,
    Code,
    Name,
}

#[derive(Iden)]
enum Payroll {
    Table,
    EmployeeId,
    PeriodDate,
    WorkedDays,
    TotalTaxable,
    TotalNonTaxable,
    TotalLegalDeductions,
    TotalOtherDeductions,
    NetPay,
    IsClosed,
}

#[derive(Iden)]
enum PayrollItem {
    Table,
    PayrollId,
    Position,
    Concept,
    Category,
    Origin,
    LreCode,
    Amount,
}
