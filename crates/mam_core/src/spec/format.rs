//! Human-readable rate formatting for registry text fields.

const UNITS: &[&str] = &["bps", "kbps", "Mbps", "Gbps"];

/// Format a raw bits-per-second value the way the registry's bit-rate text
/// fields expect, e.g. `5000000` -> `"5 Mbps"`.
pub fn format_bitrate(bits_per_second: u64) -> String {
    let mut value = bits_per_second as f64;
    let mut unit = UNITS[0];
    for next in UNITS[1..].iter().copied() {
        if value < 1000.0 {
            break;
        }
        value /= 1000.0;
        unit = next;
    }
    if value.fract() == 0.0 {
        format!("{:.0} {}", value, unit)
    } else {
        format!("{:.1} {}", value, unit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scales_through_units() {
        assert_eq!(format_bitrate(640), "640 bps");
        assert_eq!(format_bitrate(128_000), "128 kbps");
        assert_eq!(format_bitrate(5_000_000), "5 Mbps");
        assert_eq!(format_bitrate(1_200_000_000), "1.2 Gbps");
    }

    #[test]
    fn fractional_rates_keep_one_decimal() {
        assert_eq!(format_bitrate(4_500_000), "4.5 Mbps");
    }
}
