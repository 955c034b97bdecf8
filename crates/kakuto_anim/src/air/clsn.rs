//! Collision box types for AIR frames.
//!
//! Each frame may carry up to two collision box sets: set 1 is
//! conventionally the hurt box group and set 2 the hit box group. The engine
//! only parses and stores the rectangles; hit detection happens outside this
//! crate.

use serde::{Deserialize, Serialize};

/// An axis-aligned collision rectangle in character-local pixels.
///
/// Coordinates are normalized at construction so `left <= right` and
/// `top <= bottom` always hold, even when the source file declares them
/// reversed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ClsnRect {
	/// Left edge
	pub left: f32,
	/// Top edge
	pub top: f32,
	/// Right edge
	pub right: f32,
	/// Bottom edge
	pub bottom: f32,
}

impl ClsnRect {
	/// Creates a rectangle from raw edge coordinates, swapping edges as
	/// needed so the normalization invariant holds.
	pub fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
		let (left, right) = if left > right { (right, left) } else { (left, right) };
		let (top, bottom) = if top > bottom { (bottom, top) } else { (top, bottom) };
		Self {
			left: left as f32,
			top: top as f32,
			right: right as f32,
			bottom: bottom as f32,
		}
	}

	/// Rectangle width in pixels.
	pub fn width(&self) -> f32 {
		self.right - self.left
	}

	/// Rectangle height in pixels.
	pub fn height(&self) -> f32 {
		self.bottom - self.top
	}
}

impl std::fmt::Display for ClsnRect {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "Clsn({}, {}, {}, {})", self.left, self.top, self.right, self.bottom)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn reversed_edges_are_normalized() {
		let r = ClsnRect::new(10, 20, -10, -20);
		assert_eq!(r.left, -10.0);
		assert_eq!(r.top, -20.0);
		assert_eq!(r.right, 10.0);
		assert_eq!(r.bottom, 20.0);
		assert_eq!(r.width(), 20.0);
		assert_eq!(r.height(), 40.0);
	}
}
