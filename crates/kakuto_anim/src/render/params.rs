//! Backend-neutral draw parameters and quad geometry.
//!
//! [`DrawParams::build`] folds a playback instance's current frame, its
//! interpolation snapshot and the caller's transform into one parameter
//! bundle. The bundle is everything a rendering backend needs for a single
//! sprite: texture and palette handles, scales and shear for the (possibly
//! trapezoidal) quad, rotation and projection settings, blend
//! classification, clip window and tint.
//!
//! For unrotated sprites [`DrawParams::quads`] additionally expands the
//! bundle into the concrete list of screen-space quads, repeating the
//! sprite horizontally and vertically per its tiling settings and culling
//! repeats outside the viewport. Rotated sprites yield a single base quad;
//! the backend applies the rotation and projection from the bundle in its
//! model-view transform, where the math belongs.

use crate::air::AnimFrame;
use crate::playback::Playback;
use crate::sprite::{PaletteId, SpriteHandle, TextureId};

use super::blend::Transparency;
use super::context::RenderContext;

/// Rotation about the three axes, in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rotation {
	/// In-plane rotation
	pub angle: f32,
	/// Rotation about the horizontal axis
	pub xangle: f32,
	/// Rotation about the vertical axis
	pub yangle: f32,
}

impl Rotation {
	/// `true` when no axis carries a rotation.
	pub fn is_zero(&self) -> bool {
		self.angle == 0.0 && self.xangle == 0.0 && self.yangle == 0.0
	}
}

/// Sprite tiling settings.
///
/// A flag of 1 repeats indefinitely across the viewport; 0 disables tiling
/// on that axis; any other value draws that many repeats. Spacing of 0 or
/// less is relative to the sprite dimension on that axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Tiling {
	/// Horizontal repeat flag
	pub xflag: i32,
	/// Vertical repeat flag
	pub yflag: i32,
	/// Horizontal gap between repeats
	pub xspacing: i32,
	/// Vertical gap between repeats
	pub yspacing: i32,
}

/// Projection applied by the backend when drawing a rotated sprite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Projection {
	/// Flat orthographic projection
	#[default]
	Orthographic,
	/// Frustum projection with the focal length in [`DrawParams::f_length`]
	Perspective,
	/// Frustum projection with the vanishing point displaced by the sprite
	/// offset
	PerspectiveOffset,
}

/// Which of the three draw passes this request belongs to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawVariant {
	/// The sprite itself
	Normal,
	/// Ground shadow; geometry is vertically squashed by `v_scale`
	Shadow {
		/// Stage shadow vertical scale
		v_scale: f32,
	},
	/// Mirror reflection below the ground line
	Reflection,
}

/// One screen-space quad, corners in the order bottom-left, bottom-right,
/// top-right, top-left. Y grows downward and is negated relative to the
/// framebuffer, matching the viewport culling convention.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quad {
	/// Corner positions in framebuffer pixels
	pub corners: [[f32; 2]; 4],
}

/// Instance transform and draw settings for one sprite submission.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawInput {
	/// Draw pass
	pub variant: DrawVariant,
	/// Clip window `[x, y, width, height]` in framebuffer pixels
	pub window: [i32; 4],
	/// Position in game space, camera already applied by the caller
	pub pos: [f32; 2],
	/// Camera scale on each axis
	pub camera_scale: [f32; 2],
	/// Instance scale: `[0]` scales the quad top edge and the offsets,
	/// `[1]` the vertical axis
	pub scale: [f32; 2],
	/// Scale of the quad bottom edge; differs from `scale[0]` for
	/// trapezoidal draws
	pub bottom_scale: f32,
	/// Horizontal shear added per unit of height
	pub shear: f32,
	/// Instance rotation; the frame's (possibly interpolated) angle is
	/// added on top, signed by `facing`
	pub rot: Rotation,
	/// X of the rotation center in game space
	pub rot_center_x: f32,
	/// Facing sign, 1 or -1
	pub facing: f32,
	/// Coordinate-space correction applied to frame offsets
	pub offset_fix: [f32; 2],
	/// Tiling settings
	pub tile: Tiling,
	/// Color-key mask passed through to the backend
	pub mask: i32,
	/// Per-instance alpha override; a negative source selects the frame's
	/// blend snapshot
	pub alpha: [i32; 2],
	/// Projection mode for rotated draws
	pub projection: Projection,
	/// Focal length for the perspective projections
	pub f_length: f32,
	/// Packed `0xAARRGGBB` tint
	pub tint: u32,
}

impl Default for DrawInput {
	fn default() -> Self {
		Self {
			variant: DrawVariant::Normal,
			window: [0, 0, 0, 0],
			pos: [0.0, 0.0],
			camera_scale: [1.0, 1.0],
			scale: [1.0, 1.0],
			bottom_scale: 1.0,
			shear: 0.0,
			rot: Rotation::default(),
			rot_center_x: 0.0,
			facing: 1.0,
			offset_fix: [1.0, 1.0],
			tile: Tiling::default(),
			mask: -1,
			alpha: [-1, 0],
			projection: Projection::Orthographic,
			f_length: 2048.0,
			tint: 0,
		}
	}
}

/// Resolved parameters for one backend draw call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawParams {
	/// Sprite texture
	pub texture: TextureId,
	/// Palette for indexed-color sprites
	pub palette: Option<PaletteId>,
	/// Sprite dimensions in pixels
	pub size: [u16; 2],
	/// Axis position in framebuffer pixels
	pub pos: [f32; 2],
	/// Tiling settings
	pub tile: Tiling,
	/// Horizontal scale of the quad top edge
	pub x_top_scale: f32,
	/// Horizontal scale of the quad bottom edge
	pub x_bottom_scale: f32,
	/// Vertical scale
	pub y_scale: f32,
	/// Vertical squash toward the rotation center, 1 for normal draws
	pub v_scale: f32,
	/// Horizontal shear added per unit of height
	pub shear: f32,
	/// Effective per-axis flip-and-scale factors
	pub axis_scale: [f32; 2],
	/// Rotation for the backend model-view transform
	pub rot: Rotation,
	/// Packed `0xAARRGGBB` tint
	pub tint: u32,
	/// Blend classification
	pub trans: Transparency,
	/// Color-key mask
	pub mask: i32,
	/// Clip window `[x, y, width, height]` in framebuffer pixels
	pub window: [i32; 4],
	/// Rotation center in framebuffer pixels
	pub rot_center: [f32; 2],
	/// Projection mode for rotated draws
	pub projection: Projection,
	/// Focal length for the perspective projections
	pub f_length: f32,
	/// Frame offset contribution in framebuffer pixels
	pub offset: [f32; 2],
}

impl DrawParams {
	/// Builds the draw parameters for `play`'s currently drawn frame.
	///
	/// Returns `None` when the playback has no resolved sprite; a missing
	/// sprite is a skipped draw, never an error. The blend classification is
	/// resolved fresh from the instance override, the interpolation snapshot
	/// and the context brightness.
	pub fn build(play: &Playback, input: &DrawInput, ctx: &RenderContext) -> Option<Self> {
		let spr = play.sprite()?;
		let frame = play.draw_frame()?;
		let snap = play.snapshot();
		let h = f32::from(frame.h_scale) * snap.scale[0];
		let v = f32::from(frame.v_scale) * snap.scale[1];
		let mut rot = input.rot;
		rot.angle += snap.angle * input.facing;
		if let DrawVariant::Shadow {
			v_scale,
		} = input.variant
		{
			return Some(Self::build_shadow(play, spr, frame, input, ctx, v_scale, h, v, rot));
		}
		if matches!(input.variant, DrawVariant::Reflection) {
			rot.angle = -rot.angle;
		}

		let [xcs, ycs] = input.camera_scale;
		let xs = input.scale[0] * xcs * h;
		let ys = input.scale[1] * ycs * v;

		let ss = play.start_scale();
		let xoff = xs
			* input.offset_fix[0]
			* (f32::from(frame.x_offset) + snap.offset[0])
			* ss[0] * (1.0 / snap.scale[0]);
		let yoff = ys
			* input.offset_fix[1]
			* (f32::from(frame.y_offset) + snap.offset[1])
			* ss[1] * (1.0 / snap.scale[1]);

		let mut x = xcs * input.pos[0] + xoff;
		let mut y = ycs * input.pos[1] + yoff;

		let mut rcx = input.rot_center_x;
		let mut rcy = 0.0;
		let mut f_length = input.f_length;
		if rot.is_zero() {
			if xs < 0.0 {
				x = -x;
			}
			if ys < 0.0 {
				y = -y;
			}
			// Infinite tiling wraps the position into one repeat period so
			// the repeat walk stays anchored near the viewport
			if input.tile.xflag == 1 {
				let mut space = xs * input.tile.xspacing as f32;
				if input.tile.xspacing <= 0 {
					space += xs * f32::from(spr.size[0]);
				}
				if space != 0.0 {
					x -= (x / space).trunc() * space;
				}
			}
			if input.tile.yflag == 1 {
				let mut space = ys * input.tile.yspacing as f32;
				if input.tile.yspacing <= 0 {
					space += ys * f32::from(spr.size[1]);
				}
				if space != 0.0 {
					y -= (y / space).trunc() * space;
				}
			}
			rcx *= ctx.width_scale;
			x = -x + xs.abs() * f32::from(spr.offset[0]);
			y = -y + ys.abs() * f32::from(spr.offset[1]);
		} else {
			rcx = (x + rcx) * ctx.width_scale;
			rcy = y * ctx.height_scale;
			x = xs.abs() * f32::from(spr.offset[0]);
			y = ys.abs() * f32::from(spr.offset[1]);
			f_length *= ycs;
		}

		let trans = Transparency::resolve(
			input.alpha[0],
			input.alpha[1],
			snap.blend_src,
			snap.blend_dst,
			ctx.brightness,
		);

		Some(Self {
			texture: spr.texture,
			palette: spr.palette,
			size: spr.size,
			pos: [x * ctx.width_scale, y * ctx.height_scale],
			tile: input.tile,
			x_top_scale: xs * ctx.width_scale,
			x_bottom_scale: xcs * input.bottom_scale * h * ctx.width_scale,
			y_scale: ys * ctx.height_scale,
			v_scale: 1.0,
			shear: xcs * input.shear * ctx.width_scale / ctx.height_scale,
			axis_scale: [h, v],
			rot,
			tint: input.tint,
			trans,
			mask: input.mask,
			window: input.window,
			rot_center: [rcx, rcy],
			projection: input.projection,
			f_length: f_length * ctx.height_scale,
			offset: [xoff * ctx.width_scale, yoff * ctx.height_scale],
		})
	}

	/// Shadow variant: flattened geometry with the stage's vertical squash,
	/// pre-faded tint and a rotation center on the sprite axis. The caller
	/// sets `trans` per pass; a fill-color pass and an alpha pass may reuse
	/// one bundle.
	#[allow(clippy::too_many_arguments)]
	fn build_shadow(
		play: &Playback,
		spr: SpriteHandle,
		frame: &AnimFrame,
		input: &DrawInput,
		ctx: &RenderContext,
		v_scale: f32,
		h: f32,
		v: f32,
		rot: Rotation,
	) -> Self {
		let snap = play.snapshot();
		let [xscl, yscl] = input.scale;
		let mut shear = input.shear;
		if yscl < 0.0 && rot.angle != 0.0 {
			shear = -shear;
		}

		let xoff = xscl
			* input.offset_fix[0]
			* h * (f32::from(frame.x_offset) + snap.offset[0])
			* (1.0 / snap.scale[0]);
		let yoff = yscl
			* input.offset_fix[1]
			* v_scale * v
			* (f32::from(frame.y_offset) + snap.offset[1])
			* (1.0 / snap.scale[1]);

		let x = input.pos[0] + xoff;
		let y = input.pos[1] + yoff;

		Self {
			texture: spr.texture,
			palette: None,
			size: spr.size,
			pos: [
				(xscl * h).abs() * f32::from(spr.offset[0]) * ctx.width_scale,
				(yscl * v).abs() * f32::from(spr.offset[1]) * ctx.height_scale,
			],
			tile: input.tile,
			x_top_scale: xscl * h * ctx.width_scale,
			x_bottom_scale: xscl * h * ctx.width_scale,
			y_scale: yscl * v * ctx.height_scale,
			v_scale,
			shear,
			axis_scale: [h, v],
			rot,
			tint: input.tint | 0xff00_0000,
			trans: Transparency::Skip,
			mask: input.mask,
			window: input.window,
			rot_center: [
				(x + ctx.game_width as f32 / 2.0) * ctx.width_scale,
				y * ctx.height_scale,
			],
			projection: input.projection,
			f_length: input.f_length,
			offset: [xoff, yoff],
		}
	}

	/// Expands the bundle into screen-space quads.
	///
	/// Unrotated sprites tile per [`Tiling`], walking repeats upward and
	/// downward from the base quad and culling rows outside the viewport.
	/// A rotated sprite yields its single base quad; the backend owns the
	/// rotation and projection transform.
	pub fn quads(&self, ctx: &RenderContext) -> Vec<Quad> {
		let mut out = Vec::new();
		let size = [f32::from(self.size[0]), f32::from(self.size[1])];
		let mut x1 = self.pos[0] + self.shear * self.y_scale * size[1];
		let mut y1 = self.rot_center[1] + ((self.pos[1] - self.y_scale * size[1]) - self.rot_center[1]) * self.v_scale;
		let mut x2 = x1 + self.x_bottom_scale * size[0];
		let mut y2 = y1;
		let mut x3 = self.pos[0] + self.x_top_scale * size[0];
		let mut y3 = self.rot_center[1] + (self.pos[1] - self.rot_center[1]) * self.v_scale;
		let mut x4 = self.pos[0];
		let mut y4 = y3;

		if !self.rot.is_zero() {
			if self.v_scale != 1.0 {
				y1 = self.rot_center[1] + ((self.pos[1] - self.y_scale * size[1]) - self.rot_center[1]);
				y2 = y1;
				y3 = self.rot_center[1] + (self.pos[1] - self.rot_center[1]);
				y4 = y3;
			}
			out.push(Quad {
				corners: [[x1, y1], [x2, y2], [x3, y3], [x4, y4]],
			});
			return out;
		}

		let ymin = -(ctx.screen_rect[3] as f32);
		let ystep = self.y_scale * (size[1] + self.tile.yspacing as f32);

		// Walk upward from the base row
		if self.tile.yflag == 1 && self.x_bottom_scale != 0.0 {
			let (mut x3d, mut y3d, mut x4d, mut y4d) = (x3, y3, x4, y4);
			loop {
				let x1d = x4d;
				let y1d = y4d + self.y_scale * self.v_scale * self.tile.yspacing as f32;
				let x2d = x3d;
				let y2d = y1d;
				x3d = x4d - self.shear * self.y_scale * size[1]
					+ (self.x_top_scale / self.x_bottom_scale) * (x3d - x4d);
				y3d = y2d + self.y_scale * self.v_scale * size[1];
				x4d -= self.shear * self.y_scale * size[1];
				if (y3d - y4d).abs() < 0.01 {
					break;
				}
				y4d = y3d;
				if ystep < 0.0 {
					if y1d <= ymin && y4d <= ymin {
						break;
					}
				} else if y1d >= 0.0 && y4d >= 0.0 {
					break;
				}
				if (0.0 > y1d || 0.0 > y4d) && (y1d > ymin || y4d > ymin) {
					self.tile_row(&mut out, ctx, x1d, y1d, x2d, y2d, x3d, y3d, x4d, y4d, size[0]);
				}
			}
		}
		// Base row and the walk downward
		if self.tile.yflag == 0 || self.x_top_scale != 0.0 {
			let mut n = self.tile.yflag;
			loop {
				if ystep > 0.0 {
					if y1 <= ymin && y4 <= ymin {
						break;
					}
				} else if y1 >= 0.0 && y4 >= 0.0 {
					break;
				}
				if (0.0 > y1 || 0.0 > y4) && (y1 > ymin || y4 > ymin) {
					self.tile_row(&mut out, ctx, x1, y1, x2, y2, x3, y3, x4, y4, size[0]);
				}
				if self.tile.yflag != 1 && n != 0 {
					n -= 1;
				}
				if n == 0 {
					break;
				}
				x4 = x1;
				y4 = y1 - self.y_scale * self.v_scale * self.tile.yspacing as f32;
				x3 = x2;
				y3 = y4;
				x2 = x1 + self.shear * self.y_scale * size[1]
					+ (self.x_bottom_scale / self.x_top_scale) * (x2 - x1);
				y2 = y3 - self.y_scale * self.v_scale * size[1];
				x1 += self.shear * self.y_scale * size[1];
				if (y1 - y2).abs() < 0.01 {
					break;
				}
				y1 = y2;
			}
		}
		out
	}

	/// One row of horizontal repeats, bounded by the viewport width (or by
	/// the explicit repeat count when `xflag` is not infinite).
	#[allow(clippy::too_many_arguments)]
	fn tile_row(
		&self,
		out: &mut Vec<Quad>,
		ctx: &RenderContext,
		mut x1: f32,
		y1: f32,
		mut x2: f32,
		y2: f32,
		x3: f32,
		y3: f32,
		x4: f32,
		y4: f32,
		width: f32,
	) {
		let topdist = (x3 - x4) * (1.0 + self.tile.xspacing as f32 / width);
		let botdist = (x2 - x1) * (1.0 + self.tile.xspacing as f32 / width);
		// Trapezoids drift as they repeat; re-anchor the bottom edge on the
		// rotation center so top and bottom repeats stay aligned
		if topdist.abs() >= 0.01 {
			let db = (x4 - self.rot_center[0]) * (botdist - topdist) / topdist.abs();
			x1 += db;
			x2 += db;
		}

		let xmax = ctx.screen_rect[2] as f32;
		let (mut left, mut right) = (0i32, 1i32);
		if topdist >= 0.01 {
			left = 1 - ((x3 / topdist).max(x2 / botdist)).ceil() as i32;
			right = (((xmax - x4) / topdist).max((xmax - x1) / botdist)).ceil() as i32;
		} else if topdist <= -0.01 {
			left = 1 - (((xmax - x3) / -topdist).max((xmax - x2) / -botdist)).ceil() as i32;
			right = ((x4 / -topdist).max(x1 / -botdist)).ceil() as i32;
		}
		if self.tile.xflag != 1 {
			left = 0;
			right = right.min(self.tile.xflag.max(1));
		}

		for n in left..right {
			let (x1d, x2d) = (x1 + n as f32 * botdist, x2 + n as f32 * botdist);
			let (x3d, x4d) = (x3 + n as f32 * topdist, x4 + n as f32 * topdist);
			out.push(Quad {
				corners: [[x1d, y1], [x2d, y2], [x3d, y3], [x4d, y4]],
			});
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	// A 16x16 sprite sitting inside the default 320x240 viewport. On-screen
	// quad coordinates are negative in y, between -screen height and 0.
	fn base_params() -> DrawParams {
		DrawParams {
			texture: TextureId(1),
			palette: None,
			size: [16, 16],
			pos: [40.0, -100.0],
			tile: Tiling::default(),
			x_top_scale: 1.0,
			x_bottom_scale: 1.0,
			y_scale: 1.0,
			v_scale: 1.0,
			shear: 0.0,
			axis_scale: [1.0, 1.0],
			rot: Rotation::default(),
			tint: 0,
			trans: Transparency::default(),
			mask: -1,
			window: [0, 0, 320, 240],
			rot_center: [0.0, 0.0],
			projection: Projection::Orthographic,
			f_length: 2048.0,
			offset: [0.0, 0.0],
		}
	}

	#[test]
	fn untiled_draw_is_a_single_quad() {
		let params = base_params();
		let quads = params.quads(&RenderContext::default());
		assert_eq!(quads.len(), 1);
		assert_eq!(quads[0].corners[3], [40.0, -100.0]);
		assert_eq!(quads[0].corners[1], [56.0, -116.0]);
	}

	#[test]
	fn infinite_tiling_fills_the_viewport() {
		let mut params = base_params();
		params.tile = Tiling {
			xflag: 1,
			yflag: 1,
			xspacing: 0,
			yspacing: 0,
		};
		let ctx = RenderContext::default();
		let quads = params.quads(&ctx);
		assert!(quads.len() > 1);
		// Every emitted repeat overlaps the viewport; fully off-screen rows
		// and columns are culled by the walk.
		let xmax = ctx.screen_rect[2] as f32;
		let ymin = -(ctx.screen_rect[3] as f32);
		for q in &quads {
			let xs = q.corners.map(|c| c[0]);
			let ys = q.corners.map(|c| c[1]);
			assert!(xs.iter().copied().fold(f32::MIN, f32::max) >= 0.0);
			assert!(xs.iter().copied().fold(f32::MAX, f32::min) <= xmax);
			assert!(ys.iter().copied().fold(f32::MIN, f32::max) > ymin);
			assert!(ys.iter().copied().fold(f32::MAX, f32::min) < 0.0);
		}
	}

	#[test]
	fn explicit_repeat_counts_bound_the_walk() {
		let ctx = RenderContext::default();

		let mut params = base_params();
		params.tile.xflag = 3;
		assert_eq!(params.quads(&ctx).len(), 3);

		let mut params = base_params();
		params.tile.yflag = 3;
		assert_eq!(params.quads(&ctx).len(), 3);
	}

	#[test]
	fn rotated_draw_is_a_single_untiled_quad() {
		let mut params = base_params();
		params.tile = Tiling {
			xflag: 1,
			yflag: 1,
			xspacing: 0,
			yspacing: 0,
		};
		params.rot.angle = 30.0;
		let quads = params.quads(&RenderContext::default());
		assert_eq!(quads.len(), 1);
	}
}
