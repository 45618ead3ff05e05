use rust_decimal::Decimal;

/// Format an amount with exactly two decimal places, for example `123.45 PLN`.
#[must_use]
pub fn format_currency(amount: Decimal, currency: &str) -> String {
    let mut rounded = amount.round_dp(2);
    rounded.rescale(2);
    format!("{rounded} {currency}")
}
