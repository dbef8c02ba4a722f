use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Payroll months are prorated over a fixed 30 day month, not calendar days
pub const PRORATION_DAYS: Decimal = dec!(30);
pub const DEFAULT_WORKED_DAYS: u8 = 30;
pub const MAX_WORKED_DAYS: u8 = 31;
/// Ad-hoc entries accepted on one payroll
pub const MAX_AD_HOC_ITEMS: usize = 500;

pub const GRATIFICATION_RATE: Decimal = dec!(0.25);
/// Yearly cap of the legal gratification, in minimum wages
pub const GRATIFICATION_CAP_MIN_WAGES: Decimal = dec!(4.75);
pub const MONTHS_PER_YEAR: Decimal = dec!(12);

pub const HEALTH_RATE: Decimal = dec!(0.07);
pub const UNEMPLOYMENT_RATE: Decimal = dec!(0.006);

/// Used when an employee has no pension provider assigned
pub const FALLBACK_PENSION_RATE: Decimal = dec!(10);

pub const DEFAULT_MIN_WAGE: Decimal = dec!(500000);
pub const DEFAULT_AFP_CAP_UF: Decimal = dec!(84.3);
pub const DEFAULT_UNEMPLOYMENT_CAP_UF: Decimal = dec!(126.6);

/// Concept codes of the line items generated on every save
pub const CODE_BASE_SALARY: &str = "1101";
pub const CODE_GRATIFICATION: &str = "1105";
pub const CODE_PENSION: &str = "3101";
pub const CODE_HEALTH: &str = "3102";
pub const CODE_UNEMPLOYMENT: &str = "3104";
