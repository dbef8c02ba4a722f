use sea_orm_migration::prelude::*;

use crate::m20250613_083042_init::{HealthProvider, LreConcept, PensionProvider};

/// Statutory concept codes of the electronic payroll ledger
const LRE_CONCEPTS: [(&str, &str); 21] = [
    ("1101", "Sueldo Base"),
    ("1102", "Horas Extraordinarias"),
    ("1103", "Comisiones"),
    ("1104", "Semana Corrida"),
    ("1105", "Gratificación Legal"),
    ("1106", "Bonos"),
    ("1107", "Aguinaldos"),
    ("2101", "Colación"),
    ("2102", "Movilización"),
    ("2103", "Viáticos"),
    ("2104", "Asignación Familiar"),
    ("2105", "Desgaste de Herramientas"),
    ("3101", "Cotización AFP"),
    ("3102", "Cotización Salud"),
    ("3103", "Adicional Salud"),
    ("3104", "Seguro de Cesantía"),
    ("3105", "Impuesto Único"),
    ("3106", "Préstamo CCAF"),
    ("3111", "Cuota Sindical"),
    ("3113", "Préstamo Empresa"),
    ("3159", "Anticipo de Sueldo"),
];

/// Total pension rate, mandatory 10% plus each provider's commission
const PENSION_PROVIDERS: [(&str, &str); 7] = [
    ("Capital", "11.44"),
    ("Cuprum", "11.44"),
    ("Habitat", "11.27"),
    ("Modelo", "10.58"),
    ("PlanVital", "11.16"),
    ("Provida", "11.45"),
    ("Uno", "10.69"),
];

const HEALTH_PROVIDERS: [&str; 7] = [
    "Fonasa",
    "Banmédica",
    "Colmena",
    "Consalud",
    "Cruz Blanca",
    "Nueva Masvida",
    "Vida Tres",
];

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let mut concepts = Query::insert()
            .into_table(LreConcept::Table)
            .columns([LreConcept::Code, LreConcept::Name])
            .to_owned();
        for (code, name) in LRE_CONCEPTS {
            concepts.values_panic([code.into(), name.into()]);
        }
        manager.exec_stmt(concepts).await?;

        let mut pension = Query::insert()
            .into_table(PensionProvider::Table)
            .columns([PensionProvider::Name, PensionProvider::Rate])
            .to_owned();
        for (name, rate) in PENSION_PROVIDERS {
            pension.values_panic([name.into(), Expr::val(rate).cast_as("numeric")]);
        }
        manager.exec_stmt(pension).await?;

        let mut health = Query::insert()
            .into_table(HealthProvider::Table)
            .columns([HealthProvider::Name])
            .to_owned();
        for name in HEALTH_PROVIDERS {
            health.values_panic([name.into()]);
        }
        manager.exec_stmt(health).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .exec_stmt(Query::delete()
                .from_table(HealthProvider::Table)
                .and_where(Expr::col(HealthProvider::Name).is_in(HEALTH_PROVIDERS))
                .to_owned()
            ).await?;

        manager
            .exec_stmt(Query::delete()
                .from_table(PensionProvider::Table)
                .and_where(Expr::col(PensionProvider::Name).is_in(PENSION_PROVIDERS.map(|(name, _)| name)))
                .to_owned()
            ).await?;

        manager
            .exec_stmt(Query::delete()
                .from_table(LreConcept::Table)
                .and_where(Expr::col(LreConcept::Code).is_in(LRE_CONCEPTS.map(|(code, _)| code)))
                .to_owned()
            ).await?;

        Ok(())
    }
}
