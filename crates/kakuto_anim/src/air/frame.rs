//! Frame descriptor parsing for AIR action files.
//!
//! One frame line has the form:
//!
//! ```text
//! Group, Number, X, Y, Time[, Flip[, AlphaMode[, Xscale[, Yscale[, Angle]]]]]
//! ```
//!
//! The first five fields are required; everything after is optional and
//! keeps its default when blank or malformed. The parser is deliberately
//! lenient to stay compatible with decades of third-party content.

use serde::{Deserialize, Serialize};

use super::clsn::ClsnRect;
use super::scan;

/// One keyframe of an animation: sprite reference, offset, display time,
/// affine parameters, alpha mode and collision boxes.
///
/// `h_scale`/`v_scale` are flip flags coded as `±1` scale factors, the same
/// trick the original engine uses. A set `H` flag also negates `x_offset`
/// at parse time (`V` likewise for `y_offset`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimFrame {
	/// Ticks this frame is displayed; `-1` means display forever, `0` is
	/// legal and skipped on advance
	pub time: i32,
	/// Sprite group
	pub group: i16,
	/// Sprite number within the group
	pub number: i16,
	/// Horizontal draw offset in pixels
	pub x_offset: i16,
	/// Vertical draw offset in pixels
	pub y_offset: i16,
	/// Source alpha (255 = opaque)
	pub src_alpha: u8,
	/// Destination alpha (0 = none)
	pub dst_alpha: u8,
	/// Horizontal flip flag coded as scale: `1` or `-1`
	pub h_scale: i8,
	/// Vertical flip flag coded as scale: `1` or `-1`
	pub v_scale: i8,
	/// X scale factor
	pub x_scale: f32,
	/// Y scale factor
	pub y_scale: f32,
	/// Rotation angle in degrees
	pub angle: f32,
	/// Collision box sets; index 0 is Clsn1, index 1 is Clsn2
	pub clsn: [Vec<ClsnRect>; 2],
}

impl Default for AnimFrame {
	fn default() -> Self {
		Self {
			time: -1,
			group: -1,
			number: 0,
			x_offset: 0,
			y_offset: 0,
			src_alpha: 255,
			dst_alpha: 0,
			h_scale: 1,
			v_scale: 1,
			x_scale: 1.0,
			y_scale: 1.0,
			angle: 0.0,
			clsn: [Vec::new(), Vec::new()],
		}
	}
}

impl AnimFrame {
	/// Parses one pre-trimmed, comment-stripped frame line.
	///
	/// Returns `None` when the line is not a frame line (does not start with
	/// a digit or `-`) or when a required field is missing; callers use this
	/// to tell frame lines apart from directive lines.
	pub fn parse(line: &str) -> Option<Self> {
		let first = *line.as_bytes().first()?;
		if !first.is_ascii_digit() && first != b'-' {
			return None;
		}
		let ary: Vec<&str> = line.splitn(10, ',').collect();
		// Read required parameters
		if ary.len() < 5 {
			return None;
		}
		let mut af = Self {
			group: scan::atoi(ary[0]) as i16,
			number: scan::atoi(ary[1]) as i16,
			x_offset: scan::atoi(ary[2]) as i16,
			y_offset: scan::atoi(ary[3]) as i16,
			time: scan::atoi(ary[4]),
			..Self::default()
		};
		// Read H and V flags
		let Some(flags) = ary.get(5) else {
			return Some(af);
		};
		for c in flags.bytes() {
			match c {
				b'H' | b'h' => {
					af.h_scale = -1;
					af.x_offset = af.x_offset.wrapping_neg();
				}
				b'V' | b'v' => {
					af.v_scale = -1;
					af.y_offset = af.y_offset.wrapping_neg();
				}
				_ => {}
			}
		}
		// Read alpha
		let Some(alpha) = ary.get(6) else {
			return Some(af);
		};
		af.parse_alpha(alpha);
		// Read X scale
		// Some engines treat a blank scale parameter as 0; here a blank or
		// non-numeric token means no change, like the other optional fields
		let Some(xs) = ary.get(7) else {
			return Some(af);
		};
		if scan::is_numeric(xs) {
			af.x_scale = scan::atof(xs);
		}
		// Read Y scale
		let Some(ys) = ary.get(8) else {
			return Some(af);
		};
		if scan::is_numeric(ys) {
			af.y_scale = scan::atof(ys);
		}
		// Read angle
		let Some(angle) = ary.get(9) else {
			return Some(af);
		};
		if scan::is_numeric(angle) {
			af.angle = scan::atof(angle);
		}
		Some(af)
	}

	/// Parses the alpha-mode token (`A`, `A1`, `S`, `AS<n>D<m>`, ...).
	///
	/// An unrecognized token keeps the opaque default. The reserved pair
	/// `(src=1, dst=255)` is re-normalized to `(0, 255)` whether it came
	/// from the `S` alias or an explicit `AS1D255`.
	fn parse_alpha(&mut self, token: &str) {
		let mut token = token.trim();
		if let Some(i) = token.find(['A', 'S', 'a', 's']) {
			token = &token[i..];
		}
		let a = token.to_ascii_lowercase();
		let bytes = a.as_bytes();
		if a == "a1" {
			self.src_alpha = 255;
			self.dst_alpha = 128;
		} else if a.starts_with('s') {
			// Legacy "Sub" alias for AS1D255
			self.src_alpha = 1;
			self.dst_alpha = 255;
		} else if a.starts_with("as") {
			if bytes.len() > 2 && bytes[2].is_ascii_digit() {
				let mut i = 2;
				let mut alp: u32 = 0;
				while i < bytes.len() && bytes[i].is_ascii_digit() {
					alp = alp.wrapping_mul(10).wrapping_add(u32::from(bytes[i] - b'0'));
					i += 1;
				}
				alp &= 0x3fff;
				self.src_alpha = if alp >= 255 { 255 } else { alp as u8 };
				self.dst_alpha = 255;
				if i < bytes.len() && bytes[i] == b'd' {
					i += 1;
					if i < bytes.len() && bytes[i].is_ascii_digit() {
						alp = 0;
						while i < bytes.len() && bytes[i].is_ascii_digit() {
							alp = alp.wrapping_mul(10).wrapping_add(u32::from(bytes[i] - b'0'));
							i += 1;
						}
						alp &= 0x3fff;
						self.dst_alpha = if alp >= 255 { 255 } else { alp as u8 };
					}
				}
			}
		} else if a.starts_with('a') {
			self.src_alpha = 255;
			self.dst_alpha = 255;
		}
		if self.src_alpha == 1 && self.dst_alpha == 255 {
			self.src_alpha = 0;
		}
	}

	/// Collision box set 1 for this frame, usually the hurt boxes.
	pub fn clsn1(&self) -> &[ClsnRect] {
		&self.clsn[0]
	}

	/// Collision box set 2 for this frame, usually the hit boxes.
	pub fn clsn2(&self) -> &[ClsnRect] {
		&self.clsn[1]
	}
}

impl std::fmt::Display for AnimFrame {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(
			f,
			"Frame({},{} offset=({},{}) time={})",
			self.group, self.number, self.x_offset, self.y_offset, self.time
		)
	}
}
