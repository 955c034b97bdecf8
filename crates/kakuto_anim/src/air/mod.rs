//! `.AIR` action format support for `kakuto-rs`.
//!
//! This module provides parsing for AIR (Animation Interchange Resource)
//! text files, the action-description format used by 2D fighting game
//! content. An AIR file defines numbered actions; each action is a sequence
//! of keyframes with sprite references, timing, transform and blend
//! settings, plus optional collision boxes and interpolation directives.
//!
//! # File Structure Overview
//!
//! AIR is a line-oriented text format. `;` starts a comment running to the
//! end of the line; leading and trailing whitespace is ignored; keyword
//! matching is case-insensitive.
//!
//! ```text
//! [Begin Action 200]           ; action number 200
//! Clsn2Default: 1              ; default collision set for all frames
//!  Clsn2[0] = -10, -80, 10, 0
//! 200,0, 0,0, 5                ; group 200, sprite 0, 5 ticks
//! 200,1, 0,0, 5, H, A          ; flipped, additive blend
//! Loopstart
//! 200,2, 0,0, -1               ; hold forever once reached
//! ```
//!
//! ## Frame Line (5 to 10 comma-separated fields)
//!
//! ```text
//! Field  Name       Description
//! -----  ---------  ------------------------------------------------
//! 1      group      Sprite group number
//! 2      number     Sprite number within the group
//! 3      x          X offset of the sprite axis
//! 4      y          Y offset of the sprite axis
//! 5      time       Duration in ticks; -1 holds the frame forever
//! 6      flip       Optional: `H`, `V` or `VH`/`HV`, flips offsets too
//! 7      alpha      Optional: `A`, `A1`, `S`, `AS<n>[D<m>]`
//! 8      xscale     Optional scale factor
//! 9      yscale     Optional scale factor
//! 10     angle      Optional rotation in degrees
//! ```
//!
//! The alpha field accepts `A` (additive 255/255), `A1` (additive 255/128),
//! `S` (the reserved subtractive pair) and `AS<n>D<m>` with both values
//! masked to 14 bits and clamped to 255. `AS<n>` without a `D` term
//! defaults the destination to 255. The pair `(1, 255)` is reserved as the
//! "use the interpolated blend" sentinel and re-normalizes to `(0, 255)`.
//!
//! ## Directive Lines (case-insensitive prefix match)
//!
//! ```text
//! Directive              Effect
//! ---------------------  ------------------------------------------------
//! Loopstart              Playback returns here after the last frame
//! Interpolate Offset     Ease offsets into the following frame
//! Interpolate Scale      Ease scale into the following frame
//! Interpolate Angle      Ease the angle into the following frame
//! Interpolate Blend      Ease alpha values into the following frame
//! Clsn1: <n>             n collision rectangles for the next frame
//! Clsn2: <n>             Same, set 2 (hurt boxes)
//! Clsn1Default: <n>      Default set 1 for all frames without their own
//! Clsn2Default: <n>      Same, set 2
//! ```
//!
//! A `ClsnN:` header is followed by exactly `n` lines of
//! `ClsnN[i] = left, top, right, bottom`. Reversed coordinates are
//! normalized at parse time so `left <= right` and `top <= bottom` always
//! hold.
//!
//! # Error Tolerance
//!
//! Parsing is tolerant by policy: malformed frame lines are skipped,
//! unparseable numeric tokens default, short collision blocks fill what
//! they can. An action with zero frames is valid and acts as a forwarding
//! alias to the next action in the file (see
//! [`table::ActionTable`]).

mod scan;

pub mod action;
pub mod clsn;
pub mod frame;
pub mod table;

pub use action::Animation;
pub use clsn::ClsnRect;
pub use frame::AnimFrame;
pub use table::ActionTable;

#[cfg(test)]
mod tests;
