//! Draw-side pipeline: blend resolution, parameter building, draw lists.
//!
//! Nothing here talks to a GPU. The pipeline turns playback state plus a
//! per-frame [`RenderContext`] into backend-neutral [`DrawParams`] bundles
//! and hands them to a [`RenderBackend`] implementation in priority order.

pub mod blend;
pub mod context;
pub mod list;
pub mod params;

pub use blend::Transparency;
pub use context::{CameraView, ReflectionConfig, RenderContext, ShadowConfig};
pub use list::{DrawList, DrawRequest, RenderBackend, ShadowList, ShadowRequest};
pub use params::{DrawInput, DrawParams, DrawVariant, Projection, Quad, Rotation, Tiling};
