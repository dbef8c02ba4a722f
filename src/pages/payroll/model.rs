use crate::{entity::{payroll, payroll_item}, payroll::model::{AdHocEntry, Breakdown, EmployeeSnapshot, LineItem}};

use super::*;

#[derive(Debug, Serialize, Deserialize)]
pub(super) struct EmployeePath {
    pub(super) employee_id: Uuid,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub(super) struct SavePayroll {
    #[serde(default)]
    pub(super) worked_days: Option<u8>,
    #[serde(default)]
    pub(super) items: Vec<AdHocEntry>,
}

#[derive(Debug, Serialize, Deserialize)]
pub(super) struct PayrollPreview {
    pub(super) employee: EmployeeSnapshot,
    pub(super) breakdown: Breakdown,
    pub(super) items: Vec<LineItem>,
}

#[derive(Debug, Serialize, Deserialize)]
pub(super) struct PayrollDetail {
    pub(super) payroll: payroll::Model,
    pub(super) items: Vec<payroll_item::Model>,
}
