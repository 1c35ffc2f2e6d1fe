//! Frame-accurate timecode arithmetic.
//!
//! Drop-frame counting follows SMPTE convention: two frame numbers (four at
//! 59.94) are skipped at the start of every minute not divisible by ten, and
//! the frames field is separated with a semicolon instead of a colon.

/// Convert a duration in seconds to a frame count at an integer frame rate.
///
/// The decomposition into hours/minutes/seconds mirrors how the registry
/// displays durations; the count is rounded to the nearest frame.
pub fn seconds_to_frames(seconds: f64, fps: u32) -> u64 {
    let total = seconds.max(0.0);
    let hours = (total / 3600.0).floor();
    let minutes = ((total - hours * 3600.0) / 60.0).floor();
    let secs = total - hours * 3600.0 - minutes * 60.0;
    let frames = (hours * 3600.0 + minutes * 60.0 + secs) * fps as f64;
    frames.round() as u64
}

/// Format a frame count as a timecode string at the given rate.
///
/// Non-drop output is `HH:MM:SS:FF`; drop-frame output is `HH:MM:SS;FF`
/// with SMPTE frame skipping applied.
pub fn frames_to_timecode(frames: u64, fps: f64, drop_frame: bool) -> String {
    let fps_int = fps.round().max(1.0) as u64;
    let frames = if drop_frame {
        apply_drop_frame(frames, fps, fps_int)
    } else {
        frames
    };

    let ff = frames % fps_int;
    let ss = (frames / fps_int) % 60;
    let mm = (frames / (fps_int * 60)) % 60;
    let hh = frames / (fps_int * 3600);

    let sep = if drop_frame { ';' } else { ':' };
    format!("{:02}:{:02}:{:02}{}{:02}", hh, mm, ss, sep, ff)
}

/// Re-number a real frame count into drop-frame display frames.
fn apply_drop_frame(frames: u64, fps: f64, fps_int: u64) -> u64 {
    // 2 dropped per minute at 29.97, 4 at 59.94.
    let dropped = (fps * 0.066_666).round().max(1.0) as u64;
    let frames_per_min = fps_int * 60 - dropped;
    let frames_per_10min = (fps * 600.0).round() as u64;

    let tens = frames / frames_per_10min;
    let rem = frames % frames_per_10min;
    if rem > dropped {
        frames + dropped * 9 * tens + dropped * ((rem - dropped) / frames_per_min)
    } else {
        frames + dropped * 9 * tens
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ten_seconds_at_24() {
        assert_eq!(seconds_to_frames(10.0, 24), 240);
    }

    #[test]
    fn decomposed_durations_agree() {
        // 1h02m03.5s at 24fps
        let seconds = 3600.0 + 120.0 + 3.5;
        assert_eq!(seconds_to_frames(seconds, 24), 89364);
    }

    #[test]
    fn non_drop_formatting() {
        assert_eq!(frames_to_timecode(239, 24.0, false), "00:00:09:23");
        assert_eq!(frames_to_timecode(0, 24.0, false), "00:00:00:00");
        assert_eq!(frames_to_timecode(24 * 3600, 24.0, false), "01:00:00:00");
    }

    #[test]
    fn drop_frame_skips_two_each_minute() {
        // The first minute has no skips; the minute boundary skips ;00, ;01.
        assert_eq!(frames_to_timecode(1798, 29.97, true), "00:00:59;28");
        assert_eq!(frames_to_timecode(1800, 29.97, true), "00:01:00;02");
        // The tenth minute does not skip.
        assert_eq!(frames_to_timecode(17982, 29.97, true), "00:10:00;00");
    }

    #[test]
    fn drop_frame_uses_semicolon_separator() {
        let tc = frames_to_timecode(100, 29.97, true);
        assert!(tc.contains(';'));
        assert!(!frames_to_timecode(100, 30.0, false).contains(';'));
    }

    #[test]
    fn one_hour_drop_frame() {
        // 29.97 * 3600 = 107892 real frames in one hour.
        assert_eq!(frames_to_timecode(107892, 29.97, true), "01:00:00;00");
    }
}
