use chrono::{DateTime, Duration, Local, Utc};
use chrono_humanize::HumanTime;

/// Format the previous login for the board header.
/// - <1 day: humanized ("5 minutes ago", "an hour ago")
/// - Older: "2024-01-05 09:39"
pub fn format_last_login(at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = now.signed_duration_since(at);
    if elapsed < Duration::days(1) {
        HumanTime::from(at - now).to_string()
    } else {
        at.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string()
    }
}

/// Group digits by thousands: 1234567 -> "1,234,567".
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

pub fn format_won(value: u64) -> String {
    format!("₩{}", group_thousands(value))
}

/// Points in the board's "만" notation where it divides evenly.
pub fn format_points(points: u64) -> String {
    if points >= 10_000 && points % 10_000 == 0 {
        format!("{}만", group_thousands(points / 10_000))
    } else {
        group_thousands(points)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thousands_grouping() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1_000), "1,000");
        assert_eq!(group_thousands(1_234_567), "1,234,567");
        assert_eq!(format_won(450_000), "₩450,000");
    }

    #[test]
    fn points_use_man_units() {
        assert_eq!(format_points(500_000), "50만");
        assert_eq!(format_points(4_000_000), "400만");
        assert_eq!(format_points(12_345), "12,345");
    }

    #[test]
    fn recent_logins_are_humanized() {
        let now = DateTime::<Utc>::from_timestamp(1_704_067_200, 0).unwrap();
        let text = format_last_login(now - Duration::hours(2), now);
        assert!(text.contains("ago"), "{text}");
        let old = format_last_login(now - Duration::days(3), now);
        assert!(!old.contains("ago"));
    }
}
