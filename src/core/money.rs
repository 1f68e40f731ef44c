use rust_decimal::Decimal;

/// Minor-unit scale shared by all reported currencies (cents per major unit).
const MINOR_UNIT_SCALE: u32 = 2;

/// Render an amount held in minor units as a major-unit figure with its
/// currency code suffixed, e.g. `12345` + `USD` -> `123.45 USD`.
///
/// Trailing zeros are stripped, so `5000` renders as `50 USD` rather than
/// `50.00 USD`.
pub fn format_minor_units(amount: i64, currency: &str) -> String {
    let major = Decimal::new(amount, MINOR_UNIT_SCALE).normalize();
    format!("{} {}", major, currency)
}
