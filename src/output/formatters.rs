//! Reusable formatting utilities for CLI output
//!
//! Display helpers shared by the metric panels of several commands.

/// Format a count with thousands separators.
///
/// # Example output
/// `589081` → `589,081`
pub fn format_count(count: u64) -> String {
    let digits = count.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }

    out
}

/// Turn a snake_case table name into a Title Case label.
///
/// # Example output
/// `lap_times` → `Lap Times`
pub fn title_label(name: &str) -> String {
    name.split('_')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

/// Altitude in metres, without a trailing `.0` for whole values.
pub fn format_altitude(alt: f64) -> String {
    if alt.fract() == 0.0 {
        format!("{} m", alt as i64)
    } else {
        format!("{} m", alt)
    }
}

/// Points are usually whole; show `.5` only when present.
pub fn format_points(points: f64) -> String {
    if points.fract() == 0.0 {
        format!("{}", points as i64)
    } else {
        format!("{}", points)
    }
}
