/// UI layer: egui panels and charts over the cached [`crate::data::views::Views`].
///
/// Rendering never recomputes the pipeline; it only reads `AppState` and
/// mutates the selection fields, which the next `refresh_views` picks up.

pub mod charts;
pub mod map;
pub mod panels;
pub mod tables;

/// Format a GDP-per-capita value for tables, legends and hover text.
pub fn format_gdp(value: f64) -> String {
    let whole = value.round() as i64;
    let mut digits = whole.abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    while digits.len() > 3 {
        let rest = digits.split_off(digits.len() - 3);
        grouped = if grouped.is_empty() {
            rest
        } else {
            format!("{rest},{grouped}")
        };
    }
    grouped = if grouped.is_empty() {
        digits
    } else {
        format!("{digits},{grouped}")
    };
    if whole < 0 {
        format!("-${grouped}")
    } else {
        format!("${grouped}")
    }
}

#[cfg(test)]
mod tests {
    use super::format_gdp;

    #[test]
    fn groups_thousands() {
        assert_eq!(format_gdp(70000.0), "$70,000");
        assert_eq!(format_gdp(1234567.4), "$1,234,567");
        assert_eq!(format_gdp(999.6), "$1,000");
        assert_eq!(format_gdp(3.2), "$3");
        assert_eq!(format_gdp(-1500.0), "-$1,500");
    }
}
