/// Decimal precision for analytics calculations
pub const DECIMAL_PRECISION: u32 = 6;

/// Decimal precision for display
pub const DISPLAY_DECIMAL_PRECISION: u32 = 2;

/// Base currency used when none is configured
pub const DEFAULT_BASE_CURRENCY: &str = "USD";
