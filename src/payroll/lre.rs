//! Libro de Remuneraciones Electrónico, the monthly payroll ledger filed with the
//! labor authority. One row per closed payroll, amounts grouped by concept code.

use std::{collections::HashMap, io};

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::utils;

use super::lifecycle::PeriodPayroll;

pub const HEADER: [&str; 42] = [
    "RUT Trabajador", "DV", "Apellido Paterno", "Apellido Materno", "Nombres", "Sexo", "Nacionalidad",
    "Tipo Contrato", "Plazo Contrato", "Fecha Inicio", "Fecha Termino", "Causal Termino",
    "Sueldo Base (1101)", "Sobresueldo (1102)", "Comisiones (1103)", "Semana Corrida (1104)", "Gratificacion (1105)",
    "Recargos", "Bonos", "Aguinaldos", "Tratos", "Tel. y Casa", "Otros Imponibles",
    "Asig Familiar (2104)", "Colacion (2101)", "Movilizacion (2102)", "Viaticos (2103)", "Desgaste Herr (2105)",
    "AFP (Nombre)", "Monto AFP (3101)", "Salud (Nombre)", "Monto Salud (3102)", "Adicional Salud (3103)",
    "Seguro Cesantia (3104)", "Impuesto Unico (3105)", "Prestamos CCAF", "Prestamos Empresa", "Otros Descuentos",
    "Total Haberes", "Total Imponible", "Total Descuentos", "Liquido",
];

// Fixed until employee records carry sex, nationality and contract type
const SEX: &str = "M";
const NATIONALITY: &str = "1";
const CONTRACT_TYPE: &str = "1";
const CONTRACT_TERM: &str = "1";
// Provider codes come from the PREVIRED master table, not stored yet
const UNCODED_PROVIDER: &str = "0";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LreRow {
    pub rut_body: String,
    pub rut_dv: String,
    pub paternal_last_name: String,
    pub maternal_last_name: String,
    pub first_names: String,
    pub hire_date: NaiveDate,

    pub base_salary: Decimal,
    pub overtime: Decimal,
    pub commissions: Decimal,
    pub weekly_rest: Decimal,
    pub gratification: Decimal,
    pub other_taxable: Decimal,

    pub family_allowance: Decimal,
    pub meal_allowance: Decimal,
    pub transport_allowance: Decimal,
    pub travel_allowance: Decimal,
    pub other_non_taxable: Decimal,

    pub pension: Decimal,
    pub health: Decimal,
    pub unemployment: Decimal,
    pub income_tax: Decimal,
    pub other_deductions: Decimal,

    pub total_earnings: Decimal,
    pub total_taxable: Decimal,
    pub net_pay: Decimal,
}

impl LreRow {
    pub fn build(record: &PeriodPayroll) -> Self {
        let mut by_code = HashMap::<&str, Decimal>::new();
        for item in &record.items {
            *by_code.entry(item.lre_code.as_str()).or_default() += item.amount;
        }

        let sum_of = |code: &str| by_code.get(code).copied().unwrap_or_default();

        // Whatever a dedicated column does not take lands in the "other" column of its family
        let rest = |family: u8, dedicated: &[&str]| -> Decimal {
            by_code.iter()
                .filter(|(code, _)| code.as_bytes().first() == Some(&family) && !dedicated.contains(*code))
                .map(|(_, amount)| *amount)
                .sum()
        };

        let (rut_body, rut_dv) = utils::split_rut(&record.employee.rut);
        let (paternal_last_name, maternal_last_name) = utils::split_last_names(&record.employee.last_name);

        Self {
            rut_body,
            rut_dv,
            paternal_last_name,
            maternal_last_name,
            first_names: record.employee.first_name.clone(),
            hire_date: record.employee.hire_date,

            base_salary: sum_of("1101"),
            overtime: sum_of("1102"),
            commissions: sum_of("1103"),
            weekly_rest: sum_of("1104"),
            gratification: sum_of("1105"),
            other_taxable: rest(b'1', &["1101", "1102", "1103", "1104", "1105"]),

            family_allowance: sum_of("2104"),
            meal_allowance: sum_of("2101"),
            transport_allowance: sum_of("2102"),
            travel_allowance: sum_of("2103"),
            other_non_taxable: rest(b'2', &["2101", "2102", "2103", "2104"]),

            pension: sum_of("3101"),
            health: sum_of("3102") + sum_of("3103"),
            unemployment: sum_of("3104"),
            income_tax: sum_of("3105"),
            other_deductions: rest(b'3', &["3101", "3102", "3103", "3104", "3105"]),

            total_earnings: record.payroll.total_taxable + record.payroll.total_non_taxable,
            total_taxable: record.payroll.total_taxable,
            net_pay: record.payroll.net_pay,
        }
    }

    pub fn total_deductions(&self) -> Decimal {
        self.pension + self.health + self.unemployment + self.income_tax + self.other_deductions
    }

    /// Fields in [`HEADER`] order
    pub fn fields(&self) -> [String; 42] {
        let amount = |value: Decimal| utils::round_pesos(value).normalize().to_string();
        let zero = || "0".to_owned();

        [
            self.rut_body.clone(),
            self.rut_dv.clone(),
            self.paternal_last_name.clone(),
            self.maternal_last_name.clone(),
            self.first_names.clone(),
            SEX.to_owned(),
            NATIONALITY.to_owned(),
            CONTRACT_TYPE.to_owned(),
            CONTRACT_TERM.to_owned(),
            self.hire_date.format("%Y-%m-%d").to_string(),
            String::new(),
            String::new(),
            amount(self.base_salary),
            amount(self.overtime),
            amount(self.commissions),
            amount(self.weekly_rest),
            amount(self.gratification),
            zero(),
            amount(self.other_taxable),
            zero(),
            zero(),
            zero(),
            zero(),
            amount(self.family_allowance),
            amount(self.meal_allowance),
            amount(self.transport_allowance),
            amount(self.travel_allowance),
            amount(self.other_non_taxable),
            UNCODED_PROVIDER.to_owned(),
            amount(self.pension),
            UNCODED_PROVIDER.to_owned(),
            amount(self.health),
            zero(),
            amount(self.unemployment),
            amount(self.income_tax),
            zero(),
            zero(),
            amount(self.other_deductions),
            amount(self.total_earnings),
            amount(self.total_taxable),
            amount(self.total_deductions()),
            amount(self.net_pay),
        ]
    }
}

/// Writes the ledger as `;` separated values with CRLF line endings, header first
pub fn write_csv<W: io::Write>(rows: &[LreRow], writer: W) -> Result<(), csv::Error> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b';')
        .terminator(csv::Terminator::CRLF)
        .from_writer(writer);

    writer.write_record(HEADER)?;

    for row in rows {
        writer.write_record(row.fields())?;
    }

    writer.flush()?;

    Ok(())
}
