//! Prelude module for `kakuto_anim`.
//!
//! This module provides a convenient way to import commonly used types and
//! traits.
//!
//! # Examples
//!
//! ```
//! use kakuto_anim::prelude::*;
//!
//! let table = ActionTable::parse("[Begin Action 0]\n0,0, 0,0, -1\n");
//! let mut play = Playback::new(table.get(0).unwrap());
//! play.step(&NoSprites);
//! ```

// AIR parsing
#[doc(inline)]
pub use crate::air::{ActionTable, AnimFrame, Animation, ClsnRect};

// Playback
#[doc(inline)]
pub use crate::playback::{InterpSnapshot, Playback};

// Render pipeline
#[doc(inline)]
pub use crate::render::{
	CameraView, DrawInput, DrawList, DrawParams, DrawRequest, DrawVariant, Projection, Quad,
	ReflectionConfig, RenderBackend, RenderContext, Rotation, ShadowConfig, ShadowList,
	ShadowRequest, Tiling, Transparency,
};

// Sprite store boundary
#[doc(inline)]
pub use crate::sprite::{NoSprites, PaletteId, SpriteHandle, SpriteStore, TextureId};

// Errors
#[doc(inline)]
pub use crate::AnimError;
