use rust_decimal::{Decimal, RoundingStrategy};

fn currency_symbol(code: &str) -> Option<&'static str> {
    match code {
        "USD" | "CAD" | "AUD" => Some("$"),
        "EUR" => Some("€"),
        "GBP" => Some("£"),
        "JPY" => Some("¥"),
        _ => None,
    }
}

fn minor_digits(code: &str) -> u32 {
    match code {
        "JPY" | "KRW" => 0,
        _ => 2,
    }
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// Formats an amount for display, e.g. `$1,299.00` or `CHF 12.50`.
///
/// Rounds half away from zero to the currency's minor unit.
pub fn format_currency(amount: Decimal, currency: &str) -> String {
    let digits = minor_digits(currency);
    let rounded = amount.round_dp_with_strategy(digits, RoundingStrategy::MidpointAwayFromZero);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();

    let plain = format!("{:.*}", digits as usize, rounded.abs());
    let (whole, fraction) = match plain.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (plain.as_str(), None),
    };

    let mut number = group_thousands(whole);
    if let Some(fraction) = fraction {
        number.push('.');
        number.push_str(fraction);
    }

    let sign = if negative { "-" } else { "" };
    match currency_symbol(currency) {
        Some(symbol) => format!("{}{}{}", sign, symbol, number),
        None => format!("{}{} {}", sign, currency, number),
    }
}

/// Placeholder for an amount that is not known yet, e.g. `$ -` for tax.
pub fn format_unknown_amount(currency: &str) -> String {
    format!("{} -", currency_symbol(currency).unwrap_or(currency))
}
