//! Euro formatting helpers for the dashboard

/// Format a whole-euro amount: `2500000` → `€2,500,000`
pub fn format_euros(euros: i64) -> String {
    let sign = if euros < 0 { "-" } else { "" };
    format!("{sign}€{}", group_thousands(euros.unsigned_abs()))
}

/// Format minor units (cents): `75000` → `€750`, `1999` → `€19.99`
pub fn format_minor_units(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.unsigned_abs();
    let (whole, rest) = (abs / 100, abs % 100);
    if rest == 0 {
        format!("{sign}€{}", group_thousands(whole))
    } else {
        format!("{sign}€{}.{rest:02}", group_thousands(whole))
    }
}

fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
