/// Symbol prefixes used for synthetic holdings that have no market price
/// series. These are valued by other parts of the host application.
///
/// Matching is case-insensitive.
pub const SYNTHETIC_SYMBOL_PREFIXES: [&str; 5] = [
    "EMERGENCY_RESERVE",
    "OPPORTUNITY_RESERVE",
    "CUSTOM:",
    "REAL_ESTATE:",
    "FIXED_INCOME:",
];

/// Transaction kind labels as they appear in serialized input.
pub const TRANSACTION_KIND_BUY: &str = "BUY";
pub const TRANSACTION_KIND_SELL: &str = "SELL";
