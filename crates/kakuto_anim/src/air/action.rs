//! Action block parsing and the immutable animation definition.
//!
//! An action block is a sequence of frame lines interleaved with directives
//! (`LoopStart`, `Interpolate ...`, `ClsnN:`/`ClsnNDefault:`), terminated by
//! the next `[` section header or end of input. The parsed [`Animation`] is
//! immutable after parse; live playback state lives in
//! [`Playback`](crate::playback::Playback).

use log::warn;
use serde::Serialize;

use super::clsn::ClsnRect;
use super::frame::AnimFrame;
use super::scan;

/// An ordered, immutable-after-parse animation definition.
///
/// Besides the frame sequence this carries the loop-start index, the
/// registered interpolation points for each interpolated quantity, and the
/// timing totals derived once at parse end.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Animation {
	frames: Vec<AnimFrame>,
	loop_start: i32,
	interpolate_offset: Vec<i32>,
	interpolate_scale: Vec<i32>,
	interpolate_angle: Vec<i32>,
	interpolate_blend: Vec<i32>,
	total_time: i32,
	loop_time: i32,
	// Time spent before the loop start, negated during the legacy reset
	// quirk; kept bit-exact with the original accumulation
	preloop_time: i32,
}

impl Animation {
	/// Parses an action body from `lines`, starting at `*i` and stopping at
	/// the next `[` section header or end of input. `*i` is left on the
	/// terminating line.
	///
	/// Lines are expected pre-trimmed (see [`Animation::from_text`] for the
	/// raw-text entry point). Malformed lines are skipped, not errors.
	pub fn parse(lines: &[String], i: &mut usize) -> Self {
		let mut a = Self::default();
		let mut ols = 0i32;
		let mut clsn1: Vec<ClsnRect> = Vec::new();
		let mut clsn1d: Vec<ClsnRect> = Vec::new();
		let mut clsn2: Vec<ClsnRect> = Vec::new();
		let mut clsn2d: Vec<ClsnRect> = Vec::new();
		let (mut def1, mut def2) = (true, true);
		while *i < lines.len() {
			if lines[*i].starts_with('[') {
				break;
			}
			let line = scan::strip_comment(&lines[*i]).trim().to_ascii_lowercase();
			if let Some(mut af) = AnimFrame::parse(&line) {
				ols = a.loop_start;
				if def1 {
					clsn1 = clsn1d.clone();
				}
				if def2 {
					clsn2 = clsn2d.clone();
				}
				if !clsn1.is_empty() || !clsn2.is_empty() {
					af.clsn = [clsn1.clone(), clsn2.clone()];
				}
				a.frames.push(af);
				def1 = true;
				def2 = true;
			} else if line.starts_with("loopstart") {
				a.loop_start = a.frames.len() as i32;
			} else if line.starts_with("interpolate offset") {
				a.interpolate_offset.push(a.frames.len() as i32);
			} else if line.starts_with("interpolate scale") {
				a.interpolate_scale.push(a.frames.len() as i32);
			} else if line.starts_with("interpolate angle") {
				a.interpolate_angle.push(a.frames.len() as i32);
			} else if line.starts_with("interpolate blend") {
				a.interpolate_blend.push(a.frames.len() as i32);
			} else if line.len() >= 5 && line.starts_with("clsn") {
				Self::parse_clsn_block(
					lines,
					i,
					&line,
					&mut clsn1,
					&mut clsn1d,
					&mut def1,
					&mut clsn2,
					&mut clsn2d,
					&mut def2,
				);
			}
			*i += 1;
		}
		// A loopstart directive can end up past the last frame when later
		// lines were discarded; fall back to the previous valid value
		if a.loop_start >= a.frames.len() as i32 {
			if a.loop_start != 0 {
				warn!("loopstart {} beyond frame count, falling back to {}", a.loop_start, ols);
			}
			a.loop_start = ols;
		}
		a.compute_totals();
		a
	}

	/// Parses an animation from raw action text, starting at the first line.
	/// Comment stripping, trimming and lowercasing happen internally.
	pub fn from_text(text: &str) -> Self {
		let lines = scan::split_and_trim(text);
		let mut i = 0;
		Self::parse(&lines, &mut i)
	}

	/// Parses a `clsnN:`/`clsnNdefault:` directive plus its rectangle lines.
	/// Leaves `*i` on the last consumed line, matching the outer loop's
	/// increment.
	#[allow(clippy::too_many_arguments)]
	fn parse_clsn_block(
		lines: &[String],
		i: &mut usize,
		line: &str,
		clsn1: &mut Vec<ClsnRect>,
		clsn1d: &mut Vec<ClsnRect>,
		def1: &mut bool,
		clsn2: &mut Vec<ClsnRect>,
		clsn2d: &mut Vec<ClsnRect>,
		def2: &mut bool,
	) {
		let Some(colon) = line.find(':') else {
			return;
		};
		let size = scan::atoi(&line[colon + 1..]);
		if size < 0 {
			warn!("negative clsn box count {size}, directive skipped");
			return;
		}
		// Compared as bytes: a multi-byte character in a garbage directive
		// line must not land on a slice boundary
		let is_default = line.as_bytes().get(5..12) == Some(b"default".as_slice());
		let boxes = vec![ClsnRect::default(); size as usize];
		let target: &mut Vec<ClsnRect> = match line.as_bytes()[4] {
			b'1' => {
				*clsn1 = boxes;
				if is_default {
					*clsn1d = clsn1.clone();
				}
				*def1 = false;
				clsn1
			}
			b'2' => {
				*clsn2 = boxes;
				if is_default {
					*clsn2d = clsn2.clone();
				}
				*def2 = false;
				clsn2
			}
			_ => return,
		};
		if size == 0 {
			return;
		}
		*i += 1;
		let mut n = 0i32;
		while n < size && *i < lines.len() {
			let line = scan::strip_comment(&lines[*i]).trim().to_ascii_lowercase();
			if line.is_empty() {
				n += 1;
				continue;
			}
			if !line.starts_with("clsn") {
				break;
			}
			let Some(eq) = line.find('=') else {
				break;
			};
			let ary: Vec<&str> = line[eq + 1..].split(',').collect();
			if ary.len() < 4 {
				break;
			}
			target[n as usize] = ClsnRect::new(
				scan::atoi(ary[0]),
				scan::atoi(ary[1]),
				scan::atoi(ary[2]),
				scan::atoi(ary[3]),
			);
			*i += 1;
			n += 1;
		}
		*i -= 1;
		if is_default {
			match line.as_bytes()[4] {
				b'1' => *clsn1d = target.clone(),
				b'2' => *clsn2d = target.clone(),
				_ => {}
			}
		}
	}

	/// Derives `total_time`, `loop_time` and `preloop_time` once at parse
	/// end. A `-1` duration on the last frame makes the animation endless
	/// (`total_time == -1`); a `-1` on any earlier frame resets and
	/// retracks the running totals, a legacy accounting quirk that existing
	/// content relies on.
	fn compute_totals(&mut self) {
		if self.frames.is_empty() {
			return;
		}
		if self.frames[self.frames.len() - 1].time == -1 {
			self.total_time = -1;
			return;
		}
		let mut tmp = 0i32;
		for (i, f) in self.frames.iter().enumerate() {
			if f.time == -1 {
				self.total_time = 0;
				self.loop_time = -tmp;
				self.preloop_time = 0;
			}
			self.total_time += f.time;
			if (i as i32) < self.loop_start {
				self.preloop_time += f.time;
				tmp += f.time;
			} else {
				self.loop_time += f.time;
			}
		}
		if self.total_time == -1 {
			self.preloop_time = 0;
		}
	}

	/// The frame sequence.
	pub fn frames(&self) -> &[AnimFrame] {
		&self.frames
	}

	/// Frame at `idx`, or `None` when out of range.
	pub fn frame(&self, idx: i32) -> Option<&AnimFrame> {
		usize::try_from(idx).ok().and_then(|i| self.frames.get(i))
	}

	/// Number of frames.
	pub fn len(&self) -> usize {
		self.frames.len()
	}

	/// `true` when the action body declared no frames. Playback of an empty
	/// animation is a no-op that immediately signals loop end.
	pub fn is_empty(&self) -> bool {
		self.frames.is_empty()
	}

	/// Index playback returns to after the last frame.
	pub fn loop_start(&self) -> i32 {
		self.loop_start
	}

	/// Sum of all frame durations, or `-1` when the animation ends in a
	/// hold frame and never naturally ends.
	pub fn total_time(&self) -> i32 {
		self.total_time
	}

	/// Sum of frame durations from the loop start to the end.
	pub fn loop_time(&self) -> i32 {
		self.loop_time
	}

	/// Sum of frame durations before the loop start (with the legacy reset
	/// quirk applied, see [`Animation::parse`]).
	pub fn preloop_time(&self) -> i32 {
		self.preloop_time
	}

	/// Frame indices registered for offset interpolation.
	pub fn interpolate_offset(&self) -> &[i32] {
		&self.interpolate_offset
	}

	/// Frame indices registered for scale interpolation.
	pub fn interpolate_scale(&self) -> &[i32] {
		&self.interpolate_scale
	}

	/// Frame indices registered for angle interpolation.
	pub fn interpolate_angle(&self) -> &[i32] {
		&self.interpolate_angle
	}

	/// Frame indices registered for blend interpolation.
	pub fn interpolate_blend(&self) -> &[i32] {
		&self.interpolate_blend
	}
}

impl std::fmt::Display for Animation {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(
			f,
			"Animation({} frames, loopstart={}, totaltime={})",
			self.frames.len(),
			self.loop_start,
			self.total_time
		)
	}
}
