//! Blend and alpha resolution.
//!
//! Per-frame alpha bytes, per-instance overrides and the global brightness
//! are folded into a backend-neutral [`Transparency`] value. Resolution
//! happens fresh on every draw; brightness and overrides can change between
//! draws of the same frame data, so the result is never cached.

/// Backend-neutral transparency classification for one draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transparency {
	/// Invisible; skip the draw entirely
	Skip,
	/// Full additive blending (src 255, dst 255)
	Additive,
	/// The reserved `(src=1, dst=255)` pair: draw with the legacy
	/// subtractive-compatibility blend path
	Blended,
	/// Simple alpha coverage; `src` is the coverage byte
	Alpha {
		/// Source coverage, 255 = opaque
		src: u8,
	},
	/// Explicit source and destination terms, used when `src + dst` falls
	/// outside the simple over/under range `[254, 256]`
	AddAlpha {
		/// Source term
		src: u8,
		/// Destination term
		dst: u8,
	},
}

impl Transparency {
	/// Resolves the effective transparency for one draw.
	///
	/// `src_override`/`dst_override` are the per-instance overrides: a
	/// negative `src_override` selects the frame's (possibly interpolated)
	/// blend snapshot instead; a negative `dst_override` recovers the
	/// destination byte through the legacy `!dst >> 1` encoding.
	/// `brightness` scales the source term, 256 being neutral.
	pub fn resolve(
		src_override: i32,
		dst_override: i32,
		blend_src: f32,
		blend_dst: f32,
		brightness: i32,
	) -> Self {
		let mut sa: u8;
		let da: u8;
		if src_override >= 0 {
			sa = src_override as u8;
			if dst_override < 0 {
				da = ((!dst_override) >> 1) as u8;
				if sa == 1 && da == 255 {
					sa = 0;
				}
			} else {
				da = dst_override as u8;
			}
		} else {
			sa = blend_src as u8;
			da = blend_dst as u8;
		}
		if sa == 1 && da == 255 {
			return Self::Blended;
		}
		sa = ((i32::from(sa) * brightness) >> 8) as u8;
		if sa < 5 && da == 255 {
			return Self::Skip;
		}
		if sa == 255 && da == 255 {
			return Self::Additive;
		}
		let sum = i32::from(sa) + i32::from(da);
		if !(254..=256).contains(&sum) {
			Self::AddAlpha {
				src: sa,
				dst: da,
			}
		} else {
			Self::Alpha {
				src: sa,
			}
		}
	}

	/// `true` when the draw should be skipped.
	pub fn is_skip(&self) -> bool {
		matches!(self, Self::Skip)
	}

	/// Legacy packed encoding of the classification, for backends that
	/// still speak the original integer protocol: `0` skip, `-1` additive,
	/// `-2` blended, `src` for plain alpha, `src | dst << 10 | 1 << 9` for
	/// an explicit destination term.
	pub fn packed(&self) -> i32 {
		match *self {
			Self::Skip => 0,
			Self::Additive => -1,
			Self::Blended => -2,
			Self::Alpha {
				src,
			} => i32::from(src),
			Self::AddAlpha {
				src,
				dst,
			} => i32::from(src) | i32::from(dst) << 10 | 1 << 9,
		}
	}
}

impl Default for Transparency {
	fn default() -> Self {
		Self::Alpha {
			src: 255,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	const NEUTRAL: i32 = 256;

	#[test]
	fn frame_values_classify() {
		// Opaque default frame: src 255, dst 0.
		assert_eq!(
			Transparency::resolve(-1, 0, 255.0, 0.0, NEUTRAL),
			Transparency::Alpha {
				src: 255
			}
		);
		// Full additive.
		assert_eq!(Transparency::resolve(-1, 0, 255.0, 255.0, NEUTRAL), Transparency::Additive);
		// Reserved pair from an interpolated snapshot.
		assert_eq!(Transparency::resolve(-1, 0, 1.0, 255.0, NEUTRAL), Transparency::Blended);
		// Normalized sub: invisible.
		assert_eq!(Transparency::resolve(-1, 0, 0.0, 255.0, NEUTRAL), Transparency::Skip);
	}

	#[test]
	fn overrides_take_precedence() {
		assert_eq!(
			Transparency::resolve(128, 128, 255.0, 0.0, NEUTRAL),
			Transparency::Alpha {
				src: 128
			}
		);
		// dst < 0 recovers the byte via !dst >> 1; -511 encodes 255.
		assert_eq!(Transparency::resolve(1, -511, 255.0, 0.0, NEUTRAL), Transparency::Skip);
	}

	#[test]
	fn brightness_scales_source() {
		// Half brightness turns opaque into 127 coverage.
		assert_eq!(
			Transparency::resolve(255, 0, 255.0, 0.0, 128),
			Transparency::AddAlpha {
				src: 127,
				dst: 0
			}
		);
		// Dim enough over a full destination term becomes a skip.
		assert_eq!(Transparency::resolve(9, 255, 255.0, 0.0, 128), Transparency::Skip);
	}

	#[test]
	fn packed_matches_legacy_protocol() {
		assert_eq!(Transparency::Skip.packed(), 0);
		assert_eq!(Transparency::Additive.packed(), -1);
		assert_eq!(Transparency::Blended.packed(), -2);
		assert_eq!(
			Transparency::Alpha {
				src: 200
			}
			.packed(),
			200
		);
		assert_eq!(
			Transparency::AddAlpha {
				src: 64,
				dst: 192
			}
			.packed(),
			64 | 192 << 10 | 1 << 9
		);
	}
}
