//! Priority-ordered draw submission.
//!
//! Entities submit one [`DrawRequest`] per visible sprite during the draw
//! pass; the list keeps them sorted by ascending priority, ties in arrival
//! order, so flushing paints back to front. Shadows and reflections go
//! through a parallel [`ShadowList`] that applies the stage's color,
//! intensity and fade rules before reusing the same parameter builder.
//!
//! Both lists are rebuilt every frame: add, flush, clear. A set frame-skip
//! flag in the context turns every add into a no-op for that frame, as does
//! a request whose sprite did not resolve.

use super::blend::Transparency;
use super::context::RenderContext;
use super::params::{DrawInput, DrawParams, DrawVariant, Projection, Quad, Rotation, Tiling};
use crate::playback::Playback;

/// Receiver of resolved draw calls, implemented by the rendering backend.
pub trait RenderBackend {
	/// One sprite draw. `quads` holds the tiled screen-space geometry; a
	/// rotated draw carries a single base quad and the backend applies the
	/// rotation and projection from `params`.
	fn draw(&mut self, params: &DrawParams, quads: &[Quad]);
}

/// One sprite submission for the current frame.
#[derive(Debug, Clone, Copy)]
pub struct DrawRequest<'a> {
	/// Playback instance to draw
	pub play: &'a Playback,
	/// Position in world space, or screen space when `screen` is set
	pub pos: [f32; 2],
	/// Per-axis instance scale
	pub scale: [f32; 2],
	/// Per-instance alpha override; a negative source selects the frame's
	/// blend snapshot
	pub alpha: [i32; 2],
	/// Draw order; lower priorities are painted first
	pub priority: i32,
	/// Instance rotation
	pub rot: Rotation,
	/// Extra per-axis scale applied only to rotated draws
	pub axis_scale: [f32; 2],
	/// Position is in screen space, ignoring the camera
	pub screen: bool,
	/// Draw at neutral brightness regardless of the context setting
	pub bright: bool,
	/// Facing sign, 1 or -1
	pub facing: f32,
	/// Coordinate-space correction applied to frame offsets
	pub offset_fix: [f32; 2],
	/// Projection mode for rotated draws
	pub projection: Projection,
	/// Focal length for the perspective projections
	pub f_length: f32,
	/// Clip window `[left, top, right, bottom]` in instance space; all
	/// zeroes means unclipped
	pub window: [f32; 4],
	/// Tiling settings
	pub tile: Tiling,
	/// Color-key mask
	pub mask: i32,
}

impl<'a> DrawRequest<'a> {
	/// A plain request at `pos` with neutral transform settings.
	pub fn new(play: &'a Playback, pos: [f32; 2], priority: i32) -> Self {
		Self {
			play,
			pos,
			scale: [1.0, 1.0],
			alpha: [-1, 0],
			priority,
			rot: Rotation::default(),
			axis_scale: [1.0, 1.0],
			screen: false,
			bright: false,
			facing: 1.0,
			offset_fix: [1.0, 1.0],
			projection: Projection::Orthographic,
			f_length: 2048.0,
			window: [0.0; 4],
			tile: Tiling::default(),
			mask: -1,
		}
	}
}

/// Per-frame draw list, kept in ascending priority order.
#[derive(Debug, Default)]
pub struct DrawList<'a> {
	items: Vec<DrawRequest<'a>>,
}

impl<'a> DrawList<'a> {
	/// Creates an empty list.
	pub fn new() -> Self {
		Self {
			items: Vec::new(),
		}
	}

	/// Queues a request at its priority position, ties after earlier
	/// arrivals. No-op while frame-skip is set or when the request's sprite
	/// did not resolve.
	pub fn add(&mut self, mut req: DrawRequest<'a>, ctx: &RenderContext) {
		if ctx.frame_skip || req.play.sprite().is_none() {
			return;
		}
		if req.rot.angle != 0.0 {
			req.scale[0] *= req.axis_scale[0];
			req.scale[1] *= req.axis_scale[1];
			req.axis_scale = [1.0, 1.0];
		}
		let at = self.items.partition_point(|it| it.priority <= req.priority);
		self.items.insert(at, req);
	}

	/// Number of queued requests.
	pub fn len(&self) -> usize {
		self.items.len()
	}

	/// `true` when nothing is queued.
	pub fn is_empty(&self) -> bool {
		self.items.is_empty()
	}

	/// Queued priorities in draw order.
	pub fn priorities(&self) -> Vec<i32> {
		self.items.iter().map(|it| it.priority).collect()
	}

	/// Draws every queued request back to front and clears the list.
	///
	/// Requests that resolve to an invisible blend are dropped here rather
	/// than reaching the backend.
	pub fn flush(&mut self, backend: &mut dyn RenderBackend, ctx: &RenderContext) {
		for req in self.items.drain(..) {
			let cam = &ctx.camera;
			let (pos, cs) = if req.screen {
				(
					[req.pos[0], req.pos[1] + (ctx.game_height - 240) as f32],
					1.0,
				)
			} else {
				(
					[
						cam.offset[0] / cam.scale - (cam.pos[0] - req.pos[0]),
						(cam.ground_level + cam.offset[1] - cam.shake_offset) / cam.scale
							- (cam.pos[1] / cam.scale - req.pos[1]),
					],
					cam.scale,
				)
			};

			let window = if req.window == [0.0; 4] {
				ctx.screen_rect
			} else {
				let mut w = req.window;
				if w[0] > w[2] {
					w.swap(0, 2);
				}
				if w[1] > w[3] {
					w.swap(1, 3);
				}
				[
					((cs * (pos[0] + w[0]) + ctx.game_width as f32 / 2.0) * ctx.width_scale) as i32,
					(cs * (pos[1] + w[1]) * ctx.height_scale) as i32,
					(cs * (w[2] - w[0]) * ctx.width_scale) as i32,
					(cs * (w[3] - w[1]) * ctx.height_scale) as i32,
				]
			};

			let input = DrawInput {
				variant: DrawVariant::Normal,
				window,
				pos,
				camera_scale: [cs, cs],
				scale: req.scale,
				bottom_scale: req.scale[0],
				shear: 0.0,
				rot: req.rot,
				rot_center_x: ctx.game_width as f32 / 2.0,
				facing: req.facing,
				offset_fix: req.offset_fix,
				tile: req.tile,
				mask: req.mask,
				alpha: req.alpha,
				projection: req.projection,
				f_length: req.f_length,
				tint: 0,
			};
			let draw_ctx = RenderContext {
				brightness: if req.bright { 256 } else { ctx.brightness },
				..*ctx
			};
			if let Some(params) = DrawParams::build(req.play, &input, &draw_ctx) {
				if !params.trans.is_skip() {
					backend.draw(&params, &params.quads(&draw_ctx));
				}
			}
		}
	}
}

/// One shadow-and-reflection submission for the current frame.
#[derive(Debug, Clone, Copy)]
pub struct ShadowRequest<'a> {
	/// The sprite this shadow belongs to
	pub sprite: DrawRequest<'a>,
	/// Shadow fill color; negative selects the stage shadow color
	pub color: i32,
	/// Shadow opacity; 255 and above defers to the frame's blend snapshot
	pub alpha: i32,
	/// Displacement of the shadow from the sprite position
	pub shadow_offset: [f32; 2],
	/// Displacement of the reflection from the sprite position
	pub reflect_offset: [f32; 2],
	/// Raises the position used by the fade-by-distance rule
	pub fade_offset: f32,
}

/// Per-frame shadow list, same ordering rules as [`DrawList`].
#[derive(Debug, Default)]
pub struct ShadowList<'a> {
	items: Vec<ShadowRequest<'a>>,
}

impl<'a> ShadowList<'a> {
	/// Creates an empty list.
	pub fn new() -> Self {
		Self {
			items: Vec::new(),
		}
	}

	/// Queues a shadow at its priority position. No-op while frame-skip is
	/// set or when the sprite did not resolve.
	pub fn add(&mut self, req: ShadowRequest<'a>, ctx: &RenderContext) {
		if ctx.frame_skip || req.sprite.play.sprite().is_none() {
			return;
		}
		let at = self
			.items
			.partition_point(|it| it.sprite.priority <= req.sprite.priority);
		self.items.insert(at, req);
	}

	/// Number of queued shadows.
	pub fn len(&self) -> usize {
		self.items.len()
	}

	/// `true` when nothing is queued.
	pub fn is_empty(&self) -> bool {
		self.items.is_empty()
	}

	/// Drops all queued shadows.
	pub fn clear(&mut self) {
		self.items.clear();
	}

	/// Draws the ground shadows.
	///
	/// Each shadow can produce up to two backend calls: a fill-color pass
	/// and a darkening pass, either of which may be absent. Shadows past
	/// the stage fade-out line are dropped.
	pub fn draw_shadows(&self, backend: &mut dyn RenderBackend, ctx: &RenderContext) {
		let cam = &ctx.camera;
		let sdw = &ctx.shadow;
		let scl = cam.scale;
		for s in &self.items {
			let Some(spr) = s.sprite.play.sprite() else {
				continue;
			};
			let snap = s.sprite.play.snapshot();
			let mut intensity = sdw.intensity;
			let mut color = s.color;
			let mut alpha = s.alpha;
			if alpha >= 255 {
				alpha = 255 - snap.blend_dst as i32;
			}
			if sdw.fade_begin > sdw.fade_end {
				let pos_y = s.sprite.pos[1] - s.fade_offset;
				if pos_y <= sdw.fade_end {
					continue;
				}
				if pos_y < sdw.fade_begin {
					alpha = (alpha as f32 * (sdw.fade_end - pos_y)
						/ (sdw.fade_end - sdw.fade_begin)) as i32;
				}
			}
			if color < 0 {
				color = sdw.color as i32;
				if alpha < 255 {
					intensity = intensity * alpha >> 8;
				}
			} else {
				intensity = 0;
			}
			let color = ((color & 0xff) * alpha) << 8 & 0xff_0000
				| ((color & 0xff00) * alpha) >> 8 & 0xff00
				| ((i64::from(color & 0xff_0000) * i64::from(alpha)) >> 24 & 0xff) as i32;

			let mut xshearoff = sdw.offset[0];
			let sign = if sdw.y_scale < 0.0 { -1.0 } else { 1.0 };
			let xrotoff = sign * sdw.x_shear * f32::from(spr.size[1]) * s.sprite.scale[1];
			if s.sprite.rot.angle != 0.0 {
				xshearoff -= xrotoff;
			} else {
				xshearoff += xrotoff;
			}

			let window = if s.sprite.window == [0.0; 4] {
				ctx.screen_rect
			} else {
				let mut w = s.sprite.window;
				w[1] = -w[1];
				w[3] = -w[3];
				if w[0] > w[2] {
					w.swap(0, 2);
				}
				if (w[1] > w[3] && sdw.y_scale > 0.0) || (w[1] < w[3] && sdw.y_scale < 0.0) {
					w.swap(1, 3);
				}
				[
					((cam.offset[0] - (cam.pos[0] - s.sprite.pos[0] - xshearoff) * scl
						+ w[0] * scl + ctx.game_width as f32 / 2.0)
						* ctx.width_scale) as i32,
					((cam.ground_level + cam.offset[1] - cam.shake_offset - cam.pos[1]
						- (s.sprite.pos[1] * sdw.y_scale - s.shadow_offset[1]) * scl
						+ w[1] * sdw.y_scale * scl)
						* ctx.height_scale) as i32,
					(scl * (w[2] - w[0]) * ctx.width_scale) as i32,
					(scl * (w[3] - w[1]) * ctx.height_scale * sdw.y_scale) as i32,
				]
			};

			let input = DrawInput {
				variant: DrawVariant::Shadow {
					v_scale: sdw.y_scale,
				},
				window,
				pos: [
					cam.offset[0]
						- (cam.pos[0] - s.sprite.pos[0] - s.shadow_offset[0] - xshearoff) * scl,
					cam.ground_level + cam.offset[1] - cam.shake_offset - cam.pos[1]
						- (s.sprite.pos[1] * sdw.y_scale - s.shadow_offset[1] - sdw.offset[1])
							* scl,
				],
				camera_scale: [1.0, 1.0],
				scale: [scl * s.sprite.scale[0], scl * -s.sprite.scale[1]],
				bottom_scale: scl * s.sprite.scale[0],
				shear: sdw.x_shear,
				rot: s.sprite.rot,
				rot_center_x: ctx.game_width as f32 / 2.0,
				facing: s.sprite.facing,
				offset_fix: s.sprite.offset_fix,
				tile: s.sprite.tile,
				mask: s.sprite.mask,
				alpha: s.sprite.alpha,
				projection: s.sprite.projection,
				f_length: s.sprite.f_length,
				tint: color as u32,
			};
			if let Some(mut params) = DrawParams::build(s.sprite.play, &input, ctx) {
				if color != 0 {
					params.trans = Transparency::Blended;
					backend.draw(&params, &params.quads(ctx));
				}
				if intensity > 0 {
					params.trans = Transparency::AddAlpha {
						src: 0,
						dst: (256 - intensity).clamp(0, 255) as u8,
					};
					backend.draw(&params, &params.quads(ctx));
				}
			}
		}
	}

	/// Draws the mirror reflections. No-op when the stage reflection
	/// intensity is zero.
	pub fn draw_reflections(&self, backend: &mut dyn RenderBackend, ctx: &RenderContext) {
		let refl = &ctx.reflection;
		if refl.intensity <= 0 {
			return;
		}
		let cam = &ctx.camera;
		let scl = cam.scale;
		for s in &self.items {
			let Some(spr) = s.sprite.play.sprite() else {
				continue;
			};
			let snap = s.sprite.play.snapshot();
			let (mut src, mut dst) = if s.sprite.alpha[0] < 0 {
				(snap.blend_src as i32, snap.blend_dst as i32)
			} else {
				(s.sprite.alpha[0], s.sprite.alpha[1])
			};
			src = (src * refl.intensity) / 255;
			if dst < 0 {
				dst = 128;
			}
			dst = (dst + 255 - refl.intensity).min(255);
			if src == 1 && dst == 255 {
				src = 0;
			}

			let mut color = refl.color;
			if color != 0 {
				color |= (refl.intensity as u32) << 24;
			}

			let mut xshear = refl.x_shear;
			let sign = if refl.y_scale < 0.0 { -1.0 } else { 1.0 };
			let mut offset_x = s.reflect_offset[0] + refl.offset[0];
			let offset_y = s.reflect_offset[1] + refl.offset[1];
			let xrotoff = sign * xshear * f32::from(spr.size[1]) * s.sprite.scale[1];
			if s.sprite.rot.angle != 0.0 {
				xshear = -xshear;
				offset_x -= xrotoff;
			} else {
				offset_x += xrotoff;
			}

			let window = if s.sprite.window == [0.0; 4] {
				ctx.screen_rect
			} else {
				let mut w = s.sprite.window;
				w[1] = -w[1];
				w[3] = -w[3];
				if w[0] > w[2] {
					w.swap(0, 2);
				}
				if w[1] > w[3] {
					w.swap(1, 3);
				}
				[
					((scl * (cam.offset[0] / scl - (cam.pos[0] - s.sprite.pos[0]) + w[0])
						+ ctx.game_width as f32 / 2.0)
						* ctx.width_scale) as i32,
					(scl * ((cam.ground_level + cam.offset[1] - cam.shake_offset - cam.pos[1])
						/ scl - (s.sprite.pos[1] - s.shadow_offset[1])
						+ w[1]) * ctx.height_scale) as i32,
					(scl * (w[2] - w[0]) * ctx.width_scale) as i32,
					(scl * (w[3] - w[1]) * ctx.height_scale) as i32,
				]
			};

			let input = DrawInput {
				variant: DrawVariant::Reflection,
				window,
				pos: [
					cam.offset[0] / scl - (cam.pos[0] - s.sprite.pos[0] - offset_x),
					(cam.ground_level + cam.offset[1] - cam.shake_offset) / scl
						- cam.pos[1] / scl
						- (s.sprite.pos[1] * refl.y_scale - offset_y),
				],
				camera_scale: [scl, scl],
				scale: [s.sprite.scale[0], -s.sprite.scale[1] * refl.y_scale],
				bottom_scale: s.sprite.scale[0],
				shear: xshear,
				rot: s.sprite.rot,
				rot_center_x: ctx.game_width as f32 / 2.0,
				facing: s.sprite.facing,
				offset_fix: s.sprite.offset_fix,
				tile: s.sprite.tile,
				mask: s.sprite.mask,
				alpha: [src, dst],
				projection: s.sprite.projection,
				f_length: s.sprite.f_length,
				tint: color,
			};
			if let Some(params) = DrawParams::build(s.sprite.play, &input, ctx) {
				if !params.trans.is_skip() {
					backend.draw(&params, &params.quads(ctx));
				}
			}
		}
	}
}
