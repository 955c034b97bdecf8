//! Animation playback: per-entity state machines over shared definitions.
//!
//! One [`Playback`] per entity advances through a shared
//! [`Animation`](crate::air::Animation) one tick at a time and exposes the
//! frame, sprite, collision and interpolation queries the game layer needs.

pub mod interp;
pub mod state;

pub use interp::InterpSnapshot;
pub use state::Playback;
