/// Decimal precision for stored and displayed amounts
pub const DISPLAY_DECIMAL_PRECISION: u32 = 2;

/// Default lower bound for the amount range control when a user has no expenses
pub const DEFAULT_AMOUNT_RANGE_MIN: i64 = 0;

/// Default upper bound for the amount range control when a user has no expenses
pub const DEFAULT_AMOUNT_RANGE_MAX: i64 = 1000;
