use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Decimal precision for return calculations
pub const DECIMAL_PRECISION: u32 = 6;

/// Decimal precision for display (portfolio values are rounded to cents)
pub const DISPLAY_DECIMAL_PRECISION: u32 = 2;

/// Largest absolute daily return accepted into the TWR chain
pub const MAX_DAILY_RETURN: Decimal = dec!(0.5);

/// Days per year used for annualisation
pub const DAYS_PER_YEAR_DECIMAL: Decimal = dec!(365.25);

/// Default timezone name used to derive day keys from timestamps
pub const DEFAULT_TIMEZONE: &str = "UTC";
