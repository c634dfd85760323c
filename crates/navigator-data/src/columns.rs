//! Column names shared by every frame in the pipeline.

/// Date key column.
pub const DATE: &str = "date";

/// Market excess return factor.
pub const MKT_RF: &str = "Mkt-RF";

/// Small-minus-big size factor.
pub const SMB: &str = "SMB";

/// High-minus-low value factor.
pub const HML: &str = "HML";

/// Risk-free rate.
pub const RF: &str = "RF";

/// Asset return minus the risk-free rate.
pub const EXCESS: &str = "Excess";

/// Fallback return column for tickers that collide with another column.
pub const RETURN: &str = "Return";

/// Adjusted close price column of a quote frame.
pub const ADJUSTED_CLOSE: &str = "adjusted_close";

/// The three regression factors, in reporting order.
pub const FACTORS: [&str; 3] = [MKT_RF, SMB, HML];

/// Every column of a factor table, in provider order.
pub const FACTOR_TABLE: [&str; 4] = [MKT_RF, SMB, HML, RF];
