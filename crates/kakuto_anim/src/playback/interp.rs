//! Interpolated per-frame value snapshot.
//!
//! At the start of each drawn frame the playback state computes the eased
//! offset, scale, angle and blend values for the frame. A quantity is only
//! eased when the *next* frame index is registered as an interpolation
//! point for it and the current frame has a non-negative duration;
//! otherwise the frame's base value holds for the whole frame.

use crate::air::Animation;

/// Derived values for the currently drawn frame, refreshed on every frame
/// update. All interpolation is linear in `time_in_frame / duration`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InterpSnapshot {
	/// Eased offset to add to the frame's base offset
	pub offset: [f32; 2],
	/// Effective scale, including the instance start scale
	pub scale: [f32; 2],
	/// Effective angle in degrees
	pub angle: f32,
	/// Effective source alpha as a float
	pub blend_src: f32,
	/// Effective destination alpha as a float
	pub blend_dst: f32,
}

impl Default for InterpSnapshot {
	fn default() -> Self {
		Self {
			offset: [0.0, 0.0],
			scale: [1.0, 1.0],
			angle: 0.0,
			blend_src: 255.0,
			blend_dst: 0.0,
		}
	}
}

impl InterpSnapshot {
	/// Computes the snapshot for `draw_idx` at `time_in_frame` ticks into
	/// the frame. `start_scale` is the instance-level scale multiplier
	/// applied after scale interpolation.
	pub(crate) fn compute(
		def: &Animation,
		draw_idx: i32,
		time_in_frame: i32,
		start_scale: [f32; 2],
	) -> Self {
		let Some(cur) = def.frame(draw_idx) else {
			return Self::default();
		};
		let mut snap = Self {
			offset: [0.0, 0.0],
			scale: [cur.x_scale, cur.y_scale],
			angle: cur.angle,
			blend_src: f32::from(cur.src_alpha),
			blend_dst: f32::from(cur.dst_alpha),
		};
		let mut next_idx = draw_idx + 1;
		if draw_idx >= def.len() as i32 - 1 {
			next_idx = def.loop_start();
		}
		let t = time_in_frame as f32;
		let dur = cur.time as f32;
		if let Some(next) = def.frame(next_idx) {
			if cur.time >= 0 {
				if def.interpolate_offset().contains(&next_idx) {
					snap.offset[0] = f32::from(next.x_offset.wrapping_sub(cur.x_offset)) / dur * t;
					snap.offset[1] = f32::from(next.y_offset.wrapping_sub(cur.y_offset)) / dur * t;
				}
				if def.interpolate_scale().contains(&next_idx) {
					snap.scale[0] += (next.x_scale - cur.x_scale) / dur * t;
					snap.scale[1] += (next.y_scale - cur.y_scale) / dur * t;
				}
				if def.interpolate_angle().contains(&next_idx) {
					snap.angle += (next.angle - cur.angle) / dur * t;
				}
			}
		}
		snap.scale[0] *= start_scale[0];
		snap.scale[1] *= start_scale[1];
		// The reserved (1, 255) pair never interpolates; if interpolation
		// lands on it, it is re-normalized just like at parse time
		if snap.blend_src as u8 != 1 || snap.blend_dst as u8 != 255 {
			if let Some(next) = def.frame(next_idx) {
				if cur.time >= 0 && def.interpolate_blend().contains(&next_idx) {
					snap.blend_src += (f32::from(next.src_alpha) - snap.blend_src) / dur * t;
					snap.blend_dst += (f32::from(next.dst_alpha) - snap.blend_dst) / dur * t;
					if snap.blend_src as u8 == 1 && snap.blend_dst as u8 == 255 {
						snap.blend_src = 0.0;
					}
				}
			}
		}
		snap
	}
}
