// ABOUTME: Shared table and formatting helpers for CLI output
// ABOUTME: Keeps column styling consistent across commands

use comfy_table::{modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, ContentArrangement, Table};

pub fn new_table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header);
    table
}

pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max.saturating_sub(1)).collect();
        format!("{}…", cut)
    }
}

pub fn currency(amount: f64) -> String {
    format!("${:.2}", amount)
}

pub fn percent(roi: Option<i64>) -> String {
    roi.map(|value| format!("{}%", value))
        .unwrap_or_else(|| "—".to_string())
}

pub fn yes_no(value: bool) -> &'static str {
    if value {
        "Yes"
    } else {
        "No"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a longer title", 8), "a longe…");
    }

    #[test]
    fn test_percent() {
        assert_eq!(percent(Some(333)), "333%");
        assert_eq!(percent(None), "—");
    }
}
