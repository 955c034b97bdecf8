//! Sprite store boundary.
//!
//! Sprite pixel storage, palette management and texture upload live outside
//! this crate. The engine only asks the store "which sprite is `(group,
//! number)`" and carries the returned handle into draw parameters; the
//! rendering backend interprets the texture and palette ids.

use serde::{Deserialize, Serialize};

/// Opaque texture reference understood by the rendering backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TextureId(pub u32);

/// Opaque palette reference understood by the rendering backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PaletteId(pub u32);

/// Resolved sprite metadata returned by a [`SpriteStore`].
///
/// The handle is cheap to copy; pixel data never passes through the
/// animation engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpriteHandle {
	/// Backend texture holding the sprite pixels
	pub texture: TextureId,
	/// Palette to apply for indexed-color sprites
	pub palette: Option<PaletteId>,
	/// Sprite dimensions in pixels
	pub size: [u16; 2],
	/// Sprite axis offset in pixels
	pub offset: [i16; 2],
	/// Color depth in bits; depths of 8 or less draw through a palette
	pub color_depth: u8,
}

/// Source of sprites and palettes, implemented by the sprite sheet layer.
pub trait SpriteStore {
	/// Resolves `(group, number)` to a sprite handle, or `None` when the
	/// sheet has no such sprite. Draws with a missing sprite are skipped,
	/// never errors.
	fn sprite(&self, group: i16, number: i16) -> Option<SpriteHandle>;

	/// Palette for `sprite` within `palette_set`, or `None` for true-color
	/// sprites.
	fn palette(&self, sprite: SpriteHandle, palette_set: i32) -> Option<PaletteId> {
		let _ = palette_set;
		sprite.palette
	}
}

/// A store with no sprites. Useful for headless playback where only timing
/// and collision queries matter, and in tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSprites;

impl SpriteStore for NoSprites {
	fn sprite(&self, _group: i16, _number: i16) -> Option<SpriteHandle> {
		None
	}
}
