/* src/human.rs */

//! Fixed-width, human-readable sizes and durations for progress output.

use std::time::Duration;

const SIZE_UNITS: [&str; 7] = ["B", "kB", "MB", "GB", "TB", "PB", "EB"];

/// Each step divides by the factor and moves to the next unit, starting from seconds.
const DURATION_LADDER: [(f64, &str); 6] = [
	(60.0, "m"),
	(60.0, "h"),
	(24.0, "d"),
	(7.0, "w"),
	(4.0, "M"),
	(12.0, "Y"),
];

/// Formats a byte count into six columns using 1024-based units.
///
/// ```
/// use hdfs_util::human::format_size;
///
/// assert_eq!(format_size(1023), "1023 B");
/// assert_eq!(format_size(1024), "   1kB");
/// ```
pub fn format_size(bytes: u64) -> String {
	let mut size = bytes as f64;
	let mut unit = 0;
	while size >= 1024.0 && unit < SIZE_UNITS.len() - 1 {
		size /= 1024.0;
		unit += 1;
	}
	format!("{:4.0}{:>2}", size, SIZE_UNITS[unit])
}

/// Formats a number of seconds into five columns, climbing from seconds up
/// to years (`s`, `m`, `h`, `d`, `w`, `M`, `Y`).
///
/// ```
/// use hdfs_util::human::format_duration;
///
/// assert_eq!(format_duration(90.0), " 1.5m");
/// ```
pub fn format_duration(seconds: f64) -> String {
	let mut value = seconds;
	let mut unit = "s";
	for (factor, next) in DURATION_LADDER {
		if value < factor {
			break;
		}
		value /= factor;
		unit = next;
	}
	format!("{:4.1}{}", value, unit)
}

pub fn format_elapsed(elapsed: Duration) -> String {
	format_duration(elapsed.as_secs_f64())
}
