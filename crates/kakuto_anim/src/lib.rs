//! This crate provides sprite-animation playback for the `kakuto-rs` project.
//!
//! # Components
//!
//! - **AIR parser**: tolerant text parser for numbered actions with frames,
//!   collision boxes and interpolation directives ([`air`])
//! - **Action table**: read-only, shareable map from action number to parsed
//!   definition ([`air::ActionTable`])
//! - **Playback**: per-entity tick/seek state machine over a shared
//!   definition ([`playback::Playback`])
//! - **Render pipeline**: blend resolution, draw-parameter building and
//!   priority-ordered draw lists feeding a backend trait ([`render`])
//!
//! # Examples
//!
//! Using the prelude (recommended):
//!
//! ```
//! use kakuto_anim::prelude::*;
//!
//! let table = ActionTable::parse("[Begin Action 0]\n0,0, 0,0, 5\n0,1, 0,0, -1\n");
//! let def = table.get(0).unwrap();
//!
//! let mut play = Playback::new(def);
//! for _ in 0..5 {
//!     play.step(&NoSprites);
//! }
//! assert_eq!(play.current_index(), 1);
//! ```
//!
//! Or use explicit paths:
//!
//! ```
//! use kakuto_anim::air::Animation;
//!
//! let anim = Animation::from_text("0,0, 0,0, 5\n0,1, 0,0, 5\n");
//! assert_eq!(anim.total_time(), 10);
//! ```

pub mod air;
pub mod playback;
pub mod render;
pub mod sprite;

mod error;

/// `use kakuto_anim::prelude::*;` to import commonly used items.
pub mod prelude;

pub use error::AnimError;
