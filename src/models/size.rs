const UNITS: [&str; 5] = ["B", "KiB", "MiB", "GiB", "TiB"];

/// Formats a byte count with a binary-prefixed unit and one decimal.
///
/// Picks the largest unit whose scaled value is at least 1 (capped at TiB),
/// then rounds half away from zero on the decimal result. Plain bytes are
/// printed without a fraction.
pub fn format_size(bytes: u64) -> String {
    let mut tier = 0;
    while tier < UNITS.len() - 1 && bytes >= 1u64 << (10 * (tier + 1)) {
        tier += 1;
    }

    if tier == 0 {
        return format!("{} B", bytes);
    }

    let scaled = bytes as f64 / (1u64 << (10 * tier)) as f64;
    let rounded = (scaled * 10.0).round() / 10.0;
    format!("{:.1} {}", rounded, UNITS[tier])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bytes_have_no_fraction() {
        assert_eq!(format_size(0), "0 B");
        assert_eq!(format_size(1), "1 B");
        assert_eq!(format_size(1023), "1023 B");
    }

    #[test]
    fn picks_largest_unit_at_least_one() {
        assert_eq!(format_size(1024), "1.0 KiB");
        assert_eq!(format_size(1536), "1.5 KiB");
        assert_eq!(format_size(4096), "4.0 KiB");
        assert_eq!(format_size(1024 * 1024), "1.0 MiB");
        assert_eq!(format_size(5 * 1024 * 1024 * 1024 / 2), "2.5 GiB");
        assert_eq!(format_size(1_099_511_627_776), "1.0 TiB");
    }

    #[test]
    fn tebibytes_is_the_last_tier() {
        assert_eq!(format_size(2048 * 1_099_511_627_776), "2048.0 TiB");
    }

    #[test]
    fn rounds_half_away_from_zero() {
        assert_eq!(format_size(1075), "1.0 KiB");
        // 1.25 KiB is exact in binary: half rounds up, not to even
        assert_eq!(format_size(1280), "1.3 KiB");
        assert_eq!(format_size(1024 * 1024 - 1), "1024.0 KiB");
    }

    #[test]
    fn is_deterministic() {
        for bytes in [0, 7, 1536, 10_000_000, u64::MAX] {
            assert_eq!(format_size(bytes), format_size(bytes));
        }
    }
}
