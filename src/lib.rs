#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! `kakuto-rs` is a project that revives the animation core of classic 2D
//! fighting game engines and brings it to modern platforms using Rust.
//!
//! The facade re-exports the animation engine crate; see [`kakuto_anim`]
//! for the full API.

pub use kakuto_anim::*;
