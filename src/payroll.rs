//! Payroll (liquidación de sueldo) computation and record lifecycle.
//!
//! [`engine`] is a pure function over an employee snapshot, the period's economic
//! parameters and the ad-hoc ledger. [`lifecycle`] persists one record per
//! organization, employee and period, regenerating its line items on every save.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod engine;
pub mod error;
pub mod lifecycle;
pub mod lre;
pub mod model;
pub mod parameters;

pub use error::PayrollError;

/// Organization every payroll query is scoped to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrganizationContext {
    pub organization_id: Uuid,
}
