// Currency and percentage display formatting

/// Decimal places used for the `M` suffix of [`format_currency`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrencyScale {
    pub million_decimals: usize,
}

impl Default for CurrencyScale {
    fn default() -> Self {
        Self {
            million_decimals: 3,
        }
    }
}

/// Rounds half away from zero; `{:.N}` alone would round ties to even.
pub fn round_to(value: f64, decimals: usize) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

pub fn to_fixed(value: f64, decimals: usize) -> String {
    format!("{:.*}", decimals, round_to(value, decimals))
}

fn plain_number(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.0}", value)
    } else {
        value.to_string()
    }
}

/// Compact currency: `$999`, `$12K`, `$1.250M`.
///
/// A missing or non-finite value renders as the axis placeholder `$0K`.
pub fn format_currency(value: Option<f64>, scale: CurrencyScale) -> String {
    let value = match value {
        Some(v) if v.is_finite() => v,
        _ => return "$0K".to_string(),
    };

    let magnitude = value.abs();
    if magnitude < 1_000.0 {
        format!("${}", plain_number(value))
    } else if magnitude < 1_000_000.0 {
        format!("${}K", to_fixed(value / 1_000.0, 0))
    } else {
        format!(
            "${}M",
            to_fixed(value / 1_000_000.0, scale.million_decimals)
        )
    }
}

/// Y-axis tick label: always in thousands.
pub fn format_axis_thousands(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_finite() => format!("${}K", to_fixed(v / 1_000.0, 0)),
        _ => "$0K".to_string(),
    }
}

/// `+$250K` / `$-250K`, for variation badges.
pub fn format_signed_axis_thousands(value: f64) -> String {
    let label = format_axis_thousands(Some(value));
    if value >= 0.0 { format!("+{}", label) } else { label }
}

/// Always in millions, with a fixed number of decimals: `$4.20M`.
pub fn format_millions(value: f64, decimals: usize) -> String {
    format!("${}M", to_fixed(value / 1_000_000.0, decimals))
}

/// Full amount with en-US grouping and no decimals: `$402,270`.
pub fn format_thousands(value: f64) -> String {
    let rounded = value.round();
    let sign = if rounded < 0.0 { "-" } else { "" };
    format!("${}{}", sign, group_digits(rounded.abs() as u64))
}

/// Like [`format_thousands`] with a `+` for non-negative values.
pub fn format_signed_thousands(value: f64) -> String {
    if value >= 0.0 {
        format!("+{}", format_thousands(value))
    } else {
        format_thousands(value)
    }
}

fn group_digits(n: u64) -> String {
    let digits = n.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// Percent change of `variation` relative to `base`.
///
/// Returns `"0"` when `base` is zero. Non-negative results carry a leading
/// `+`; negative ones keep only the numeral's own sign.
pub fn format_percent(variation: f64, base: f64, decimals: usize) -> String {
    if base == 0.0 {
        return "0".to_string();
    }
    format_signed(variation / base * 100.0, decimals)
}

/// Fixed decimals with a `+` on non-negative values: `+12.50`, `-3.10`.
pub fn format_signed(value: f64, decimals: usize) -> String {
    // the sign follows the unrounded value: a tiny loss is "-0.00"
    let rounded = round_to(value, decimals);
    if value >= 0.0 {
        // `+ 0.0` folds an input of -0.0 so it never prints as "+-0.00"
        format!("+{:.*}", decimals, rounded + 0.0)
    } else {
        format!("{:.*}", decimals, rounded)
    }
}

/// Label density for an x-axis: show every n-th tick.
pub fn tick_interval(len: usize, ticks: usize) -> usize {
    if ticks == 0 { 0 } else { len / ticks }
}
