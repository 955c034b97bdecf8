//! Tolerant text scanning helpers for AIR action files.
//!
//! AIR content in the wild is of uneven quality; the original engine never
//! rejects a file over a bad token. These helpers reproduce that behavior:
//! numeric scanners read the longest valid prefix and fall back to `0`, and
//! everything else is a cheap slice operation.

/// Parses a signed integer from the start of `s`, ignoring leading
/// whitespace and any trailing garbage. Returns `0` when no digits are
/// present, matching the original engine's tolerant `Atoi`.
pub(crate) fn atoi(s: &str) -> i32 {
	let s = s.trim();
	let bytes = s.as_bytes();
	let mut i = 0;
	let mut sign = 1i64;
	if i < bytes.len() && (bytes[i] == b'-' || bytes[i] == b'+') {
		if bytes[i] == b'-' {
			sign = -1;
		}
		i += 1;
	}
	let mut value = 0i64;
	while i < bytes.len() && bytes[i].is_ascii_digit() {
		value = value.wrapping_mul(10).wrapping_add(i64::from(bytes[i] - b'0'));
		i += 1;
	}
	(sign * value) as i32
}

/// Parses a float from the start of `s` with the same tolerance as [`atoi`]:
/// longest valid numeric prefix, `0.0` when nothing parses.
pub(crate) fn atof(s: &str) -> f32 {
	let s = s.trim();
	let bytes = s.as_bytes();
	let mut end = 0;
	if end < bytes.len() && (bytes[end] == b'-' || bytes[end] == b'+') {
		end += 1;
	}
	let mut seen_digit = false;
	while end < bytes.len() && bytes[end].is_ascii_digit() {
		end += 1;
		seen_digit = true;
	}
	if end < bytes.len() && bytes[end] == b'.' {
		end += 1;
		while end < bytes.len() && bytes[end].is_ascii_digit() {
			end += 1;
			seen_digit = true;
		}
	}
	if !seen_digit {
		return 0.0;
	}
	s[..end].parse().unwrap_or(0.0)
}

/// Returns `true` if the whole token is a plain decimal number
/// (optional sign, digits, optional fractional part).
///
/// Optional frame fields only overwrite their defaults when the token is
/// fully numeric; a blank or junk token keeps the default.
pub(crate) fn is_numeric(s: &str) -> bool {
	let s = s.trim();
	if s.is_empty() {
		return false;
	}
	let bytes = s.as_bytes();
	let mut i = 0;
	if bytes[i] == b'-' || bytes[i] == b'+' {
		i += 1;
	}
	let mut digits = 0;
	while i < bytes.len() && bytes[i].is_ascii_digit() {
		i += 1;
		digits += 1;
	}
	if i < bytes.len() && bytes[i] == b'.' {
		i += 1;
		while i < bytes.len() && bytes[i].is_ascii_digit() {
			i += 1;
			digits += 1;
		}
	}
	digits > 0 && i == bytes.len()
}

/// Strips a trailing `;` comment from a line.
pub(crate) fn strip_comment(line: &str) -> &str {
	match line.find(';') {
		Some(i) => &line[..i],
		None => line,
	}
}

/// Splits text into trimmed lines, the form the action parser consumes.
pub(crate) fn split_and_trim(text: &str) -> Vec<String> {
	text.lines().map(|l| l.trim().to_string()).collect()
}

/// Parses a `[section name]` line into its lowercased first word (including
/// the trailing space) and the remainder.
///
/// `[Begin Action 200]` yields `("begin ", "Action 200")`. Returns `None`
/// when the line is not a section header.
pub(crate) fn section_name(line: &str) -> Option<(String, &str)> {
	let line = strip_comment(line).trim();
	if !line.starts_with('[') || !line.ends_with(']') || line.len() < 2 {
		return None;
	}
	let sec = &line[1..line.len() - 1];
	match sec.find(' ') {
		Some(i) => Some((sec[..=i].to_ascii_lowercase(), &sec[i + 1..])),
		None => Some((sec.to_ascii_lowercase(), sec)),
	}
}

/// Extracts the action number from a section header, if the header is a
/// `[Begin Action <N>]` line.
pub(crate) fn action_number(name: &str, subname: &str) -> Option<i32> {
	if name != "begin " {
		return None;
	}
	let sp = subname.find(' ')?;
	if !subname[..=sp].eq_ignore_ascii_case("action ") {
		return None;
	}
	Some(atoi(&subname[sp + 1..]))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn atoi_reads_longest_prefix() {
		assert_eq!(atoi("42"), 42);
		assert_eq!(atoi("  -7"), -7);
		assert_eq!(atoi("15abc"), 15);
		assert_eq!(atoi("x15"), 0);
		assert_eq!(atoi(""), 0);
	}

	#[test]
	fn atof_reads_longest_prefix() {
		assert_eq!(atof("1.5"), 1.5);
		assert_eq!(atof("-0.25x"), -0.25);
		assert_eq!(atof("junk"), 0.0);
	}

	#[test]
	fn is_numeric_rejects_partial_tokens() {
		assert!(is_numeric("10"));
		assert!(is_numeric("-1.25"));
		assert!(is_numeric(" 2 "));
		assert!(!is_numeric(""));
		assert!(!is_numeric("1x"));
		assert!(!is_numeric("."));
	}

	#[test]
	fn section_header_round_trip() {
		let (name, sub) = section_name("[Begin Action 200] ; intro").unwrap();
		assert_eq!(name, "begin ");
		assert_eq!(action_number(&name, sub), Some(200));

		let (name, sub) = section_name("[Data]").unwrap();
		assert_eq!(name, "data");
		assert_eq!(action_number(&name, sub), None);

		assert!(section_name("Group = 0").is_none());
	}
}
