//! Per-frame rendering environment.
//!
//! Everything the draw-parameter builder needs from the outside world is
//! carried in a [`RenderContext`] value passed in per frame: global
//! brightness, viewport scaling, the camera view and the stage's shadow and
//! reflection settings. Nothing in this module is read from ambient state;
//! the caller rebuilds (or reuses) the context every frame.

/// Camera view for world-space draw requests.
///
/// Screen-space requests ignore the camera entirely.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraView {
	/// Camera position in stage coordinates
	pub pos: [f32; 2],
	/// Camera zoom factor
	pub scale: f32,
	/// Screen-space offset of the camera origin
	pub offset: [f32; 2],
	/// Y coordinate of the stage ground line, in screen space
	pub ground_level: f32,
	/// Vertical screen-shake displacement for this frame
	pub shake_offset: f32,
}

impl Default for CameraView {
	fn default() -> Self {
		Self {
			pos: [0.0, 0.0],
			scale: 1.0,
			offset: [0.0, 0.0],
			ground_level: 0.0,
			shake_offset: 0.0,
		}
	}
}

/// Stage shadow settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShadowConfig {
	/// Shadow darkness, 0..=255
	pub intensity: i32,
	/// Packed `0xRRGGBB` shadow color
	pub color: u32,
	/// Vertical squash applied to shadow geometry
	pub y_scale: f32,
	/// Y position where the shadow has fully faded out
	pub fade_end: f32,
	/// Y position where the shadow starts fading
	pub fade_begin: f32,
	/// Horizontal shear of the shadow quad
	pub x_shear: f32,
	/// Fixed shadow displacement
	pub offset: [f32; 2],
}

impl Default for ShadowConfig {
	fn default() -> Self {
		Self {
			intensity: 128,
			color: 0,
			y_scale: 0.4,
			fade_end: 0.0,
			fade_begin: 0.0,
			x_shear: 0.0,
			offset: [0.0, 0.0],
		}
	}
}

/// Stage reflection settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReflectionConfig {
	/// Reflection opacity, 0..=255; 0 disables reflections
	pub intensity: i32,
	/// Packed `0xRRGGBB` reflection tint; 0 leaves sprite colors untouched
	pub color: u32,
	/// Vertical scale of the mirrored geometry
	pub y_scale: f32,
	/// Horizontal shear of the mirrored quad
	pub x_shear: f32,
	/// Fixed reflection displacement
	pub offset: [f32; 2],
}

impl Default for ReflectionConfig {
	fn default() -> Self {
		Self {
			intensity: 0,
			color: 0,
			y_scale: 1.0,
			x_shear: 0.0,
			offset: [0.0, 0.0],
		}
	}
}

/// Snapshot of the rendering environment for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderContext {
	/// Global brightness, 256 = neutral
	pub brightness: i32,
	/// Horizontal scale from game space to framebuffer pixels
	pub width_scale: f32,
	/// Vertical scale from game space to framebuffer pixels
	pub height_scale: f32,
	/// Logical game width in game-space units
	pub game_width: i32,
	/// Logical game height in game-space units
	pub game_height: i32,
	/// Framebuffer rectangle `[x, y, width, height]` in pixels
	pub screen_rect: [i32; 4],
	/// When set, draw submissions for this frame are dropped
	pub frame_skip: bool,
	/// Camera for world-space requests
	pub camera: CameraView,
	/// Stage shadow settings
	pub shadow: ShadowConfig,
	/// Stage reflection settings
	pub reflection: ReflectionConfig,
}

impl Default for RenderContext {
	fn default() -> Self {
		Self {
			brightness: 256,
			width_scale: 1.0,
			height_scale: 1.0,
			game_width: 320,
			game_height: 240,
			screen_rect: [0, 0, 320, 240],
			frame_skip: false,
			camera: CameraView::default(),
			shadow: ShadowConfig::default(),
			reflection: ReflectionConfig::default(),
		}
	}
}
