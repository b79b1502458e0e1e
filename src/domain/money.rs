/// Monetary amounts are whole currency units. Products of a 32-bit face value
/// and a 32-bit quantity always fit, so every total uses 64 bits.
pub type Amount = u64;

/// Prefix used when no other currency is configured.
pub const DEFAULT_CURRENCY_PREFIX: &str = "Rs.";

/// Format an amount with `,` between groups of three digits.
/// Example: 1234567 -> "1,234,567", 0 -> "0"
pub fn format_grouped(amount: Amount) -> String {
    let digits = amount.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Format an amount as a currency string.
/// Example: (12345, "Rs.") -> "Rs. 12,345"
pub fn format_currency(amount: Amount, prefix: &str) -> String {
    format!("{} {}", prefix, format_grouped(amount))
}
