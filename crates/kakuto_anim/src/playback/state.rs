//! Playback state machine.
//!
//! A [`Playback`] is the live state of one entity playing one animation
//! definition. The definition is shared read-only behind an [`Arc`]; every
//! entity owns its own `Playback`, so two entities playing "the same"
//! action never alias mutable state.
//!
//! Timing semantics reproduce the original engine bit for bit: frames with
//! duration `0` are skipped on advance, a `-1` duration on the last frame
//! holds forever, wrap-around resumes at the loop start, and `sum_time`
//! tracks elapsed ticks within the current loop cycle.

use std::collections::HashMap;
use std::sync::Arc;

use crate::air::{AnimFrame, Animation, ClsnRect};
use crate::sprite::{SpriteHandle, SpriteStore};

use super::interp::InterpSnapshot;

/// Live playback state for one animation instance.
#[derive(Debug, Clone)]
pub struct Playback {
	def: Arc<Animation>,
	current: i32,
	draw_idx: i32,
	time: i32,
	sum_time: i32,
	new_frame: bool,
	loop_end: bool,
	sprite: Option<SpriteHandle>,
	remap: HashMap<(i16, i16), (i16, i16)>,
	start_scale: [f32; 2],
	snapshot: InterpSnapshot,
}

impl Playback {
	/// Creates a fresh instance bound to `def`, positioned at the first
	/// frame.
	pub fn new(def: Arc<Animation>) -> Self {
		Self {
			def,
			current: 0,
			draw_idx: 0,
			time: 0,
			sum_time: 0,
			new_frame: true,
			loop_end: false,
			sprite: None,
			remap: HashMap::new(),
			start_scale: [1.0, 1.0],
			snapshot: InterpSnapshot::default(),
		}
	}

	/// Rewinds to the first frame and clears all accumulated state.
	pub fn reset(&mut self) {
		self.current = 0;
		self.draw_idx = 0;
		self.time = 0;
		self.sum_time = 0;
		self.new_frame = true;
		self.loop_end = false;
		self.sprite = None;
	}

	/// The shared definition this instance is playing.
	pub fn definition(&self) -> &Arc<Animation> {
		&self.def
	}

	/// Advances playback by one tick.
	///
	/// An empty animation is a no-op that signals loop end every tick. The
	/// loop-end flag is true exactly on the tick the loop cycle completes.
	pub fn step(&mut self, store: &dyn SpriteStore) {
		self.loop_end = false;
		if self.def.is_empty() {
			self.loop_end = true;
			return;
		}
		self.update_frame(store);
		let len = self.def.len() as i32;
		if self.cur_time() <= 0 {
			self.advance();
		}
		if self.current < len {
			self.time += 1;
			if self.time >= self.cur_time() {
				self.advance();
				if self.current >= len {
					self.current = self.def.loop_start();
				}
			}
		} else {
			self.current = self.def.loop_start();
		}
		let total = self.def.total_time();
		if total != -1 && self.sum_time >= total {
			self.sum_time = total - self.def.loop_time();
		}
		self.sum_time += 1;
		if total != -1 && self.sum_time >= total {
			self.loop_end = true;
		}
	}

	/// Duration of the current frame, `0` when out of range.
	fn cur_time(&self) -> i32 {
		self.def.frame(self.current).map_or(0, |f| f.time)
	}

	/// Moves `current` forward to the next displayable frame: the next
	/// frame with positive duration, the terminal hold frame, or one past
	/// the end (the caller wraps to the loop start).
	fn advance(&mut self) {
		let len = self.def.len() as i32;
		let total = self.def.total_time();
		if total != -1 || self.current < len - 1 {
			self.time = 0;
			self.new_frame = true;
			loop {
				self.current += 1;
				if (total == -1 && self.current == len - 1)
					|| self.current >= len
					|| self.cur_time() > 0
				{
					break;
				}
			}
		}
	}

	/// Resolves the frame to draw this tick and refreshes the sprite cache
	/// and the interpolation snapshot. Also applies the loop wrap and the
	/// legacy pre-loop re-entry quirk when the accumulated time says so.
	fn update_frame(&mut self, store: &dyn SpriteStore) {
		if self.def.is_empty() {
			return;
		}
		let total = self.def.total_time();
		if total > 0 {
			if self.sum_time >= total {
				self.time = 0;
				self.new_frame = true;
				self.current = self.def.loop_start();
			}
			self.seek(self.current);
			let preloop = self.def.preloop_time();
			let loop_edge = total - self.def.loop_time();
			if preloop < 0
				&& self.sum_time >= total + preloop
				&& self.sum_time >= loop_edge
				&& (self.sum_time == total + preloop || self.sum_time == loop_edge)
			{
				self.time = 0;
				self.new_frame = true;
				self.current = 0;
			}
		}
		if self.new_frame {
			if let Some(f) = self.def.frame(self.current) {
				if f.time != 0 {
					let (group, number) = self
						.remap
						.get(&(f.group, f.number))
						.copied()
						.unwrap_or((f.group, f.number));
					self.sprite = store.sprite(group, number);
				}
			}
		}
		self.new_frame = false;
		self.draw_idx = self.current;
		self.snapshot = InterpSnapshot::compute(&self.def, self.draw_idx, self.time, self.start_scale);
	}

	/// Clamping forward seek: starting at `elem`, skip zero-duration frames
	/// (stopping on a terminal hold frame) and clamp the result into range.
	fn seek(&mut self, elem: i32) {
		let len = self.def.len() as i32;
		let elem = elem.max(0);
		let mut again = true;
		loop {
			self.current = elem;
			while self.current < len && self.cur_time() <= 0 {
				if self.current == len - 1 && self.cur_time() == -1 {
					break;
				}
				self.current += 1;
			}
			if self.current < len {
				break;
			}
			again = !again;
			if again {
				self.current = len - 1;
				break;
			}
		}
		self.current = self.current.clamp(0, len - 1);
	}

	/// Jumps to element `elem` (1-based).
	///
	/// An element beyond the frame count snaps back to element 1, matching
	/// the original engine rather than wrapping modulo the loop length.
	/// `sum_time` is recomputed so elapsed-time queries stay consistent.
	pub fn set_elem(&mut self, elem: i32, store: &dyn SpriteStore) {
		self.current = (elem - 1).max(0);
		if self.current >= self.def.len() as i32 {
			self.current = 0;
		}
		self.draw_idx = self.current;
		self.time = 0;
		self.new_frame = true;
		self.update_frame(store);
		self.loop_end = false;
		self.sum_time = 0;
		self.sum_time = -self.elem_time(self.current + 1);
	}

	/// Ticks remaining until the animation naturally ends; negative while
	/// it is still running, `sum_time - total_time` by definition.
	pub fn anim_time(&self) -> i32 {
		self.sum_time - self.def.total_time()
	}

	/// Elapsed ticks relative to the first display of element `elem`
	/// (1-based): negative before the element is reached, zero or positive
	/// after. For an element beyond the frame count the result is the
	/// remaining animation time clamped to zero.
	pub fn elem_time(&self, elem: i32) -> i32 {
		let len = self.def.len() as i32;
		if elem > len {
			return self.anim_time().min(0);
		}
		let e = elem.max(0) - 1;
		let mut t = self.sum_time;
		for i in 0..e {
			t -= self.def.frame(i).map_or(0, |f| f.time.max(0));
		}
		t
	}

	/// Element number (1-based) active at the signed tick offset
	/// `time_offset` from now: negative offsets look backward, zero and
	/// positive offsets look forward. Pure query; playback state is not
	/// touched. A walk that wraps twice without making progress terminates
	/// and returns the frame count.
	pub fn elem_no(&self, time_offset: i32) -> i32 {
		let len = self.def.len() as i32;
		if len == 0 {
			return 0;
		}
		let loop_start = self.def.loop_start();
		let frame_time = |i: i32| self.def.frame(i).map_or(0, |f| f.time.max(0));
		let holds_forever =
			|i: i32| i == len - 1 && self.def.frame(i).is_some_and(|f| f.time == -1);
		let mut i = self.current;
		let mut oldt = 0i32;
		let mut time = time_offset;
		if time <= 0 {
			time += self.time;
			let mut wrapped = false;
			loop {
				if time >= 0 {
					return i + 1;
				}
				i -= 1;
				if i < 0 || (self.current >= loop_start && i < loop_start) {
					if time == oldt {
						break;
					}
					oldt = time;
					wrapped = true;
					i = len - 1;
				}
				time += frame_time(i);
				if wrapped && holds_forever(i) {
					return i + 1;
				}
			}
		} else {
			time += self.time;
			loop {
				time -= frame_time(i);
				if time < 0 || holds_forever(i) {
					return i + 1;
				}
				i += 1;
				if i >= len {
					if time == oldt {
						break;
					}
					oldt = time;
					i = loop_start;
				}
			}
		}
		len
	}

	/// Frame the state machine currently points at, `None` for an empty
	/// animation.
	pub fn current_frame(&self) -> Option<&AnimFrame> {
		self.def.frame(self.current)
	}

	/// Frame actually being drawn this tick; lags `current_frame` during a
	/// mid-tick transition.
	pub fn draw_frame(&self) -> Option<&AnimFrame> {
		self.def.frame(self.draw_idx)
	}

	/// Collision box set 1 of the drawn frame.
	pub fn clsn1(&self) -> &[ClsnRect] {
		self.draw_frame().map_or(&[], AnimFrame::clsn1)
	}

	/// Collision box set 2 of the drawn frame.
	pub fn clsn2(&self) -> &[ClsnRect] {
		self.draw_frame().map_or(&[], AnimFrame::clsn2)
	}

	/// Cached sprite handle for the drawn frame, refreshed on frame entry.
	pub fn sprite(&self) -> Option<SpriteHandle> {
		self.sprite
	}

	/// Interpolation snapshot for the drawn frame.
	pub fn snapshot(&self) -> &InterpSnapshot {
		&self.snapshot
	}

	/// Zero-based index of the current frame.
	pub fn current_index(&self) -> i32 {
		self.current
	}

	/// Zero-based index of the drawn frame.
	pub fn draw_index(&self) -> i32 {
		self.draw_idx
	}

	/// Ticks spent in the current frame.
	pub fn time_in_frame(&self) -> i32 {
		self.time
	}

	/// Elapsed ticks within the current loop cycle.
	pub fn sum_time(&self) -> i32 {
		self.sum_time
	}

	/// `true` exactly on the tick a finite animation completes its loop
	/// cycle, and on every tick for an empty animation.
	pub fn loop_end(&self) -> bool {
		self.loop_end
	}

	/// Instance-level scale multiplier applied after scale interpolation.
	pub fn set_start_scale(&mut self, x: f32, y: f32) {
		self.start_scale = [x, y];
	}

	/// Current instance-level scale multiplier.
	pub fn start_scale(&self) -> [f32; 2] {
		self.start_scale
	}

	/// Redirects sprite resolution for one `(group, number)` pair.
	pub fn set_remap(&mut self, from: (i16, i16), to: (i16, i16)) {
		self.remap.insert(from, to);
	}

	/// Removes all sprite remaps.
	pub fn clear_remap(&mut self) {
		self.remap.clear();
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::air::Animation;
	use crate::sprite::NoSprites;

	fn anim(body: &str) -> Arc<Animation> {
		Arc::new(Animation::from_text(body))
	}

	#[test]
	fn hold_frame_sequence() {
		// Durations [10, 5, -1]: never ends, holds on the last frame.
		let a = anim("0,0,0,0,10\nLoopStart\n0,1,0,0,5\n0,2,0,0,-1\n");
		assert_eq!(a.total_time(), -1);
		assert_eq!(a.loop_start(), 1);
		let mut p = Playback::new(a);
		for _ in 0..10 {
			p.step(&NoSprites);
		}
		assert_eq!(p.current_index(), 1);
		for _ in 0..5 {
			p.step(&NoSprites);
		}
		assert_eq!(p.current_index(), 2);
		for _ in 0..100 {
			p.step(&NoSprites);
		}
		assert_eq!(p.current_index(), 2);
		assert!(!p.loop_end());
	}

	#[test]
	fn finite_loop_wraps_sum_time() {
		// Durations [5, 5, 5], loop start 0: total time 15.
		let a = anim("0,0,0,0,5\n0,1,0,0,5\n0,2,0,0,5\n");
		assert_eq!(a.total_time(), 15);
		let mut p = Playback::new(a);
		for tick in 1..=14 {
			p.step(&NoSprites);
			assert!(!p.loop_end(), "premature loop end at tick {tick}");
		}
		p.step(&NoSprites);
		assert!(p.loop_end());
		assert_eq!(p.sum_time(), 15);
		p.step(&NoSprites);
		assert!(!p.loop_end());
		assert_eq!(p.sum_time(), 1);
		assert_eq!(p.current_index(), 0);
	}

	#[test]
	fn zero_duration_frames_are_skipped() {
		let a = anim("0,0,0,0,0\n0,1,0,0,3\n0,2,0,0,0\n0,3,0,0,2\n");
		let mut p = Playback::new(a);
		p.step(&NoSprites);
		assert_eq!(p.draw_index(), 1);
		for _ in 0..3 {
			p.step(&NoSprites);
		}
		assert_eq!(p.draw_index(), 3);
	}

	#[test]
	fn set_elem_overrun_snaps_to_first() {
		let a = anim("0,0,0,0,5\n0,1,0,0,5\n0,2,0,0,5\n");
		let mut p = Playback::new(a);
		p.set_elem(7, &NoSprites);
		assert_eq!(p.current_index(), 0);
		assert_eq!(p.time_in_frame(), 0);
	}

	#[test]
	fn set_elem_rebases_sum_time() {
		let a = anim("0,0,0,0,5\n0,1,0,0,5\n0,2,0,0,5\n");
		let mut p = Playback::new(a);
		p.set_elem(2, &NoSprites);
		assert_eq!(p.current_index(), 1);
		assert_eq!(p.sum_time(), 5);
		// Element 2 has just been reached, element 3 is 5 ticks away.
		assert_eq!(p.elem_time(2), 0);
		assert_eq!(p.elem_time(3), -5);
	}

	#[test]
	fn elem_time_is_negative_before_element() {
		let a = anim("0,0,0,0,10\n0,1,0,0,5\n0,2,0,0,5\n");
		let p = Playback::new(a);
		assert_eq!(p.elem_time(1), 0);
		assert_eq!(p.elem_time(2), -10);
		assert_eq!(p.elem_time(3), -15);
		// Beyond the frame count: remaining time clamped to zero.
		assert_eq!(p.elem_time(4), -20);
	}

	#[test]
	fn elem_no_walks_both_directions() {
		let a = anim("0,0,0,0,10\n0,1,0,0,5\n0,2,0,0,5\n");
		let mut p = Playback::new(a);
		for _ in 0..12 {
			p.step(&NoSprites);
		}
		// Two ticks into element 2.
		assert_eq!(p.current_index(), 1);
		assert_eq!(p.elem_no(0), 2);
		assert_eq!(p.elem_no(-3), 1);
		assert_eq!(p.elem_no(3), 3);
		let before = (p.current_index(), p.time_in_frame(), p.sum_time());
		let _ = p.elem_no(-3);
		assert_eq!(before, (p.current_index(), p.time_in_frame(), p.sum_time()));
	}

	#[test]
	fn empty_animation_signals_loop_end() {
		let a = anim("");
		assert!(a.is_empty());
		let mut p = Playback::new(a);
		p.step(&NoSprites);
		assert!(p.loop_end());
		assert!(p.current_frame().is_none());
		assert!(p.clsn1().is_empty());
	}
}
