//! Input sanitization
//!
//! Form fields arrive as optional free text. Everything that is missing,
//! blank, or unparsable collapses to 0.0 so the report path can never fail
//! on bad input. This is a pass-through, not validation: a negative numeric
//! string stays negative.

/// Parse an optional textual quantity into an `f64`, defaulting to 0.0.
pub fn parse_quantity(value: Option<&str>) -> f64 {
    let Some(raw) = value else {
        return 0.0;
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    trimmed.parse::<f64>().unwrap_or(0.0)
}
