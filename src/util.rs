/// Format a second count as `MM:SS`, or `H:MM:SS` from one hour up.
pub fn format_seconds(secs: u32) -> String {
    let hours = secs / 3600;
    let minutes = (secs % 3600) / 60;
    let seconds = secs % 60;

    if hours > 0 {
        format!("{hours}:{minutes:02}:{seconds:02}")
    } else {
        format!("{minutes:02}:{seconds:02}")
    }
}

/// Speed label for the cards, e.g. `16.0 mph`.
pub fn format_mph(speed: f64) -> String {
    let speed = if speed.is_finite() { speed } else { 0.0 };
    format!("{speed:.1} mph")
}

/// Distance label, e.g. `1.27 mi`.
pub fn format_miles(miles: f64) -> String {
    format!("{miles:.2} mi")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_seconds_under_an_hour() {
        assert_eq!(format_seconds(0), "00:00");
        assert_eq!(format_seconds(59), "00:59");
        assert_eq!(format_seconds(61), "01:01");
        assert_eq!(format_seconds(3599), "59:59");
    }

    #[test]
    fn format_seconds_hours() {
        assert_eq!(format_seconds(3600), "1:00:00");
        assert_eq!(format_seconds(3725), "1:02:05");
    }

    #[test]
    fn format_mph_rounds() {
        assert_eq!(format_mph(16.0), "16.0 mph");
        assert_eq!(format_mph(17.26), "17.3 mph");
        assert_eq!(format_mph(f64::NAN), "0.0 mph");
    }

    #[test]
    fn format_miles_two_places() {
        assert_eq!(format_miles(1.2666), "1.27 mi");
    }
}
