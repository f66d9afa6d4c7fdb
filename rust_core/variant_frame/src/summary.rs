use chrono::NaiveDate;

const PREFIX: &str = "You have selected: ";

fn long_date(d: NaiveDate) -> String {
    d.format("%B %d, %Y").to_string()
}

/// Human readable description of the current selection.
///
/// Each part is left out when its input is missing. The smoothing range is the full span,
/// twice the half window.
pub fn selection_summary(start: Option<NaiveDate>, end: Option<NaiveDate>, half_window: Option<usize>) -> String {
    let mut s = String::from(PREFIX);
    let mut parts: Vec<String> = Vec::new();
    if let Some(d) = start {
        parts.push(format!("Start Date: {}", long_date(d)));
    }
    if let Some(d) = end {
        parts.push(format!("End Date: {}", long_date(d)));
    }
    if let Some(k) = half_window {
        parts.push(format!("Smoothing range: {} days", k.saturating_mul(2)));
    }
    s.push_str(&parts.join(" | "));
    s
}
