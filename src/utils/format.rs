//! Display formatting shared by the CLI tables and the TUI widgets.

fn group_thousands(digits: &str) -> String {
    let bytes = digits.as_bytes();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, b) in bytes.iter().enumerate() {
        if i > 0 && (bytes.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(*b as char);
    }
    out
}

/// "$29,050.12" style, with the sign ahead of the currency symbol.
pub fn format_usd(value: f64) -> String {
    let sign = if value < 0.0 { "-" } else { "" };
    let s = format!("{:.2}", value.abs());
    let (int_part, frac) = s.split_once('.').unwrap_or((s.as_str(), "00"));
    format!("{}${}.{}", sign, group_thousands(int_part), frac)
}

/// Abbreviated dollar amount for dense grids: "$29k", "$1.2M", "$2.5B".
pub fn format_usd_compact(value: f64) -> String {
    let sign = if value < 0.0 { "-" } else { "" };
    let abs = value.abs();
    if abs >= 1e9 {
        format!("{}${:.1}B", sign, abs / 1e9)
    } else if abs >= 1e6 {
        format!("{}${:.1}M", sign, abs / 1e6)
    } else if abs >= 1e3 {
        format!("{}${:.0}k", sign, abs / 1e3)
    } else {
        format!("{}${:.0}", sign, abs)
    }
}

/// FDV axis labels: "$100M" below a billion, "$1.0B" from there up.
pub fn format_fdv(value: f64) -> String {
    if value < 1e9 {
        format!("${:.0}M", value / 1e6)
    } else {
        format!("${:.1}B", value / 1e9)
    }
}

/// Whole-number points with thousands separators.
pub fn format_points(value: f64) -> String {
    let s = format!("{:.0}", value.abs());
    let grouped = group_thousands(&s);
    if value < -0.5 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

/// "+0.3%" / "-1.2%" with an explicit plus on gains.
pub fn format_signed_pct(value: f64) -> String {
    if value > 0.0 {
        format!("+{:.1}%", value)
    } else {
        format!("{:.1}%", value)
    }
}
