//! Benchmark helper utilities for kakuto-rs
//!
//! This module generates synthetic AIR action text for parser and playback
//! benchmarks. The generated content mirrors the shape of real character
//! files: many actions, mixed frame counts, collision boxes on some frames
//! and interpolation directives on some transitions.

use std::fmt::Write;

/// Generates an AIR file with `actions` actions of `frames` frames each.
///
/// Every fourth frame carries a collision block and every third transition
/// an interpolation directive, so parsing exercises all the directive
/// paths, not only the frame-line fast path.
pub fn generate_air_text(actions: u32, frames: u32) -> String {
	let mut out = String::new();
	for no in 0..actions {
		let _ = writeln!(out, "[Begin Action {no}]");
		let _ = writeln!(out, "Clsn2Default: 1");
		let _ = writeln!(out, " Clsn2[0] = -12, -90, 12, 0");
		for f in 0..frames {
			if f == frames / 2 {
				let _ = writeln!(out, "Loopstart");
			}
			if f % 4 == 3 {
				let _ = writeln!(out, "Clsn1: 1");
				let _ = writeln!(out, " Clsn1[0] = -6, -70, 18, -40");
			}
			let _ = writeln!(
				out,
				"{},{}, {},{}, 4",
				no % 100,
				f,
				(f % 7) as i32 - 3,
				-(f as i32 % 5)
			);
			if f % 3 == 2 {
				let _ = writeln!(out, "Interpolate Offset");
			}
		}
		out.push('\n');
	}
	out
}

/// Common benchmark shapes for synthetic action tables
pub mod sizes {
	/// A single short action: the hot path for one-off effects
	pub const SINGLE: (u32, u32) = (1, 8);
	/// A small character: 50 actions of 12 frames
	pub const SMALL: (u32, u32) = (50, 12);
	/// A full character: 400 actions of 16 frames, typical content size
	pub const CHARACTER: (u32, u32) = (400, 16);
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_generated_text_parses() {
		let text = generate_air_text(3, 8);
		let table = kakuto_anim::air::ActionTable::parse(&text);
		assert_eq!(table.len(), 3);
		let anim = table.get(0).unwrap();
		assert_eq!(anim.len(), 8);
		assert_eq!(anim.loop_start(), 4);
		// The default collision set reaches frames without their own block.
		assert_eq!(anim.frames()[0].clsn2().len(), 1);
	}
}
