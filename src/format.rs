use rust_decimal::prelude::*;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::record::PriceRecord;

pub const PRICE_DECIMALS: u32 = 8;
pub const PERCENT_DECIMALS: u32 = 2;
pub const VOLUME_DECIMALS: u32 = 2;
pub const RULE: &str = "==================================================";

/// Formats a decimal with a fixed number of places and comma thousands
/// separators, independent of the host locale.
pub fn format_decimal(value: Decimal, places: u32) -> String {
    let rounded = value.round_dp_with_strategy(places, RoundingStrategy::MidpointAwayFromZero);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let plain = rounded.abs().to_string();

    let (int_part, frac_part) = match plain.split_once('.') {
        Some((int_part, frac_part)) => (int_part, frac_part.to_string()),
        None => (plain.as_str(), String::new()),
    };

    let mut out = String::with_capacity(plain.len() + plain.len() / 3 + 2);
    if negative {
        out.push('-');
    }
    out.push_str(&group_thousands(int_part));
    if places > 0 {
        let mut frac = frac_part;
        while frac.len() < places as usize {
            frac.push('0');
        }
        out.push('.');
        out.push_str(&frac);
    }
    out
}

/// Same as [`format_decimal`] but always carries a sign.
pub fn format_signed(value: Decimal, places: u32) -> String {
    let formatted = format_decimal(value, places);
    if formatted.starts_with('-') {
        formatted
    } else {
        format!("+{}", formatted)
    }
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

pub fn format_error_line(symbol: &str) -> String {
    format!("{}: Error fetching data", symbol)
}

/// Single line: `BTCUSDC: 50,000.12345678 USDC`
pub fn format_condensed(symbol: &str, quote: &str, record: Option<&PriceRecord>) -> String {
    match record {
        Some(record) => format!(
            "{}: {} {}",
            symbol,
            format_decimal(record.price, PRICE_DECIMALS),
            quote
        ),
        None => format_error_line(symbol),
    }
}

/// Multi-line block with the rolling 24h statistics.
pub fn format_expanded(symbol: &str, quote: &str, record: Option<&PriceRecord>) -> String {
    let Some(record) = record else {
        return format_error_line(symbol);
    };

    let price = |value: Option<Decimal>| {
        value
            .map(|v| format!("{} {}", format_decimal(v, PRICE_DECIMALS), quote))
            .unwrap_or_else(|| "n/a".to_string())
    };
    let change = match (record.price_change_24h, record.change_percent_24h) {
        (Some(abs), Some(pct)) => format!(
            "{} ({}%)",
            format_decimal(abs, PRICE_DECIMALS),
            format_decimal(pct, PERCENT_DECIMALS)
        ),
        (None, Some(pct)) => format!("{}%", format_decimal(pct, PERCENT_DECIMALS)),
        (Some(abs), None) => format_decimal(abs, PRICE_DECIMALS),
        (None, None) => "n/a".to_string(),
    };
    let volume = record
        .volume_24h
        .map(|v| format_decimal(v, VOLUME_DECIMALS))
        .unwrap_or_else(|| "n/a".to_string());

    format!(
        "\n{symbol}:\n  Current Price: {}\n  24h Change: {}\n  24h High: {}\n  24h Low: {}\n  24h Volume: {}",
        price(Some(record.price)),
        change,
        price(record.high_24h),
        price(record.low_24h),
        volume,
    )
}

pub fn format_listing_line(index: usize, symbol: &str) -> String {
    format!("{:>3}. {}", index, symbol)
}

/// Row of the `all` table. Prices that do not parse are shown verbatim.
pub fn format_table_line(symbol: &str, price: &str, quote: &str) -> String {
    let shown = Decimal::from_str(price)
        .or_else(|_| Decimal::from_scientific(price))
        .map(|p| format_decimal(p, PRICE_DECIMALS))
        .unwrap_or_else(|_| price.to_string());
    format!("{:<15}: {:>15} {}", symbol, shown, quote)
}
