// SPDX-License-Identifier: MPL-2.0
//! Time display helpers for the controls.

/// Formats a time in seconds as `MM:SS`, or `HH:MM:SS` from one hour on.
#[must_use]
pub fn format_time(seconds: f64) -> String {
    let total_secs = whole_secs(seconds);
    format_clock(total_secs, total_secs >= 3600)
}

/// Formats `"position / duration"`.
///
/// Once the duration reaches one hour both sides use the hour form so the
/// label keeps a stable width during playback.
#[must_use]
pub fn format_position(position_secs: f64, duration_secs: f64) -> String {
    let with_hours = whole_secs(duration_secs.max(position_secs)) >= 3600;
    format!(
        "{} / {}",
        format_clock(whole_secs(position_secs), with_hours),
        format_clock(whole_secs(duration_secs), with_hours)
    )
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn whole_secs(seconds: f64) -> u64 {
    if seconds.is_finite() {
        seconds.max(0.0) as u64
    } else {
        0
    }
}

fn format_clock(total_secs: u64, with_hours: bool) -> String {
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let secs = total_secs % 60;

    if with_hours {
        format!("{:02}:{:02}:{:02}", hours, minutes, secs)
    } else {
        format!("{:02}:{:02}", minutes, secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_time_handles_zero() {
        assert_eq!(format_time(0.0), "00:00");
    }

    #[test]
    fn format_time_handles_minutes() {
        assert_eq!(format_time(125.0), "02:05");
    }

    #[test]
    fn format_time_handles_hours() {
        assert_eq!(format_time(3665.0), "01:01:05");
    }

    #[test]
    fn format_time_clamps_negative_and_nan() {
        assert_eq!(format_time(-10.0), "00:00");
        assert_eq!(format_time(f64::NAN), "00:00");
    }

    #[test]
    fn format_position_truncates_fractional_seconds() {
        assert_eq!(format_position(150.9, 600.0), "02:30 / 10:00");
    }

    #[test]
    fn format_position_uses_hours_on_both_sides_for_long_media() {
        assert_eq!(format_position(30.0, 3725.0), "00:00:30 / 01:02:05");
    }
}
