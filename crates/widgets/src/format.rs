/// Placeholder shown before a signal has produced any samples.
pub const EMPTY_FIELD: &str = "--";

/// Format a reading as a rounded integer, or `--` when absent.
pub fn format_reading(value: Option<f32>) -> String {
    match value {
        Some(v) if v.is_finite() => format!("{}", v.round() as i64),
        _ => EMPTY_FIELD.to_string(),
    }
}

/// `"ON"` / `"OFF"` for a sidebar switch.
pub fn on_off(on: bool) -> &'static str {
    if on { "ON" } else { "OFF" }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_to_nearest() {
        assert_eq!(format_reading(Some(94.6)), "95");
        assert_eq!(format_reading(Some(14.2)), "14");
        assert_eq!(format_reading(Some(-0.4)), "0");
    }

    #[test]
    fn missing_or_nan_is_placeholder() {
        assert_eq!(format_reading(None), "--");
        assert_eq!(format_reading(Some(f32::NAN)), "--");
    }
}
