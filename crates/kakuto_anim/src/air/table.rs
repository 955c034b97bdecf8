//! Keyed collection of parsed actions.
//!
//! An `.air` file is a sequence of `[Begin Action <N>]` sections. Actions
//! with an empty body are forwarding aliases: they resolve to the next
//! action parsed from the file. The resolution is cycle-safe; a chain that
//! revisits an action number already under construction returns what has
//! been built so far instead of recursing forever.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use encoding_rs::SHIFT_JIS;
use log::debug;

use super::action::Animation;
use super::scan;
use crate::error::AnimError;

/// Mapping from action number to its parsed animation definition.
///
/// Built once at load time and read-only afterwards; definitions are handed
/// out as shared [`Arc`] handles so any number of playback instances can
/// reference one action without cloning frame data.
#[derive(Debug, Clone, Default)]
pub struct ActionTable {
	actions: HashMap<i32, Arc<Animation>>,
}

impl ActionTable {
	/// Creates an empty table.
	pub fn new() -> Self {
		Self::default()
	}

	/// Parses every action in `text`.
	///
	/// Unknown sections are skipped; a malformed action body produces an
	/// empty (still valid) animation rather than an error.
	pub fn parse(text: &str) -> Self {
		let lines = scan::split_and_trim(text);
		let mut raw: HashMap<i32, Animation> = HashMap::new();
		let mut i = 0;
		while Self::read_action(&mut raw, &lines, &mut i).is_some() {}
		debug!("parsed action table with {} actions", raw.len());
		Self {
			actions: raw.into_iter().map(|(no, a)| (no, Arc::new(a))).collect(),
		}
	}

	/// Reads an `.air` file from disk.
	///
	/// Content files are frequently Shift-JIS encoded; bytes that are not
	/// valid UTF-8 are decoded as Shift-JIS with lossy replacement.
	///
	/// # Errors
	///
	/// Returns an error only for I/O failures; malformed content never
	/// fails, per the tolerant parsing policy.
	pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, AnimError> {
		let bytes = std::fs::read(path)?;
		let text = match std::str::from_utf8(&bytes) {
			Ok(s) => s.to_owned(),
			Err(_) => {
				let (cow, _, _) = SHIFT_JIS.decode(&bytes);
				cow.into_owned()
			}
		};
		Ok(Self::parse(&text))
	}

	/// Parses the next action and inserts it, resolving empty bodies by
	/// forwarding to the following action. Returns the action number, or
	/// `None` when the input is exhausted.
	fn read_action(
		table: &mut HashMap<i32, Animation>,
		lines: &[String],
		i: &mut usize,
	) -> Option<i32> {
		while *i < lines.len() {
			if let Some((no, anim)) = Self::read_one(lines, i) {
				if table.contains_key(&no) {
					// Number seen before: keep the existing definition.
					// This is also what terminates self-referential alias
					// chains cleanly.
					return Some(no);
				}
				let empty = anim.is_empty();
				table.insert(no, anim);
				if empty {
					debug!("action {no} has an empty body, forwarding to the next action");
				}
				while table[&no].is_empty() && *i < lines.len() {
					if let Some(next) = Self::read_action(table, lines, i) {
						let resolved = table[&next].clone();
						table.insert(no, resolved);
						break;
					}
					*i += 1;
				}
				return Some(no);
			}
			*i += 1;
		}
		None
	}

	/// Scans forward for the next section header and, when it is a
	/// `[Begin Action <N>]` header, parses the action body that follows.
	/// Leaves `*i` on the offending line when the header is something else.
	fn read_one(lines: &[String], i: &mut usize) -> Option<(i32, Animation)> {
		let mut header: Option<(String, &str)> = None;
		while *i < lines.len() {
			if let Some(h) = scan::section_name(&lines[*i]) {
				header = Some(h);
				break;
			}
			*i += 1;
		}
		let (name, subname) = header?;
		let no = scan::action_number(&name, subname)?;
		*i += 1;
		Some((no, Animation::parse(lines, i)))
	}

	/// Shared handle to the animation for `no`, or `None` when unknown.
	pub fn get(&self, no: i32) -> Option<Arc<Animation>> {
		self.actions.get(&no).cloned()
	}

	/// Like [`get`](Self::get), but reports a missing action as an error
	/// for callers that treat the number as mandatory.
	///
	/// # Errors
	///
	/// Returns [`AnimError::ActionNotFound`] when `no` is not in the table.
	pub fn require(&self, no: i32) -> Result<Arc<Animation>, AnimError> {
		self.get(no).ok_or(AnimError::ActionNotFound(no))
	}

	/// `true` when `no` is a known action number.
	pub fn contains(&self, no: i32) -> bool {
		self.actions.contains_key(&no)
	}

	/// Number of actions in the table.
	pub fn len(&self) -> usize {
		self.actions.len()
	}

	/// `true` when the table holds no actions.
	pub fn is_empty(&self) -> bool {
		self.actions.is_empty()
	}

	/// Iterator over `(action number, definition)` pairs in arbitrary order.
	pub fn iter(&self) -> impl Iterator<Item = (i32, &Arc<Animation>)> {
		self.actions.iter().map(|(no, a)| (*no, a))
	}

	/// All action numbers, sorted ascending.
	pub fn action_numbers(&self) -> Vec<i32> {
		let mut numbers: Vec<i32> = self.actions.keys().copied().collect();
		numbers.sort_unstable();
		numbers
	}
}
