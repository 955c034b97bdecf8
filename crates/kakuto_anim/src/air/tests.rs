//! Unit tests for AIR parsing

use super::*;

#[test]
fn frame_round_trips_required_fields() {
	let f = AnimFrame::parse("30,1, -4,12, 7").unwrap();
	assert_eq!(f.group, 30);
	assert_eq!(f.number, 1);
	assert_eq!(f.x_offset, -4);
	assert_eq!(f.y_offset, 12);
	assert_eq!(f.time, 7);
	// Unsupplied optionals take their defaults.
	assert_eq!(f.h_scale, 1);
	assert_eq!(f.v_scale, 1);
	assert_eq!((f.src_alpha, f.dst_alpha), (255, 0));
	assert_eq!((f.x_scale, f.y_scale), (1.0, 1.0));
	assert_eq!(f.angle, 0.0);
}

#[test]
fn frame_parses_all_ten_fields() {
	let f = AnimFrame::parse("2,7, 10,20, 3, VH, AS64D192, 0.5, 2.0, 90").unwrap();
	assert_eq!(f.h_scale, -1);
	assert_eq!(f.v_scale, -1);
	// Flips negate the parsed offsets.
	assert_eq!(f.x_offset, -10);
	assert_eq!(f.y_offset, -20);
	assert_eq!((f.src_alpha, f.dst_alpha), (64, 192));
	assert_eq!((f.x_scale, f.y_scale), (0.5, 2.0));
	assert_eq!(f.angle, 90.0);
}

#[test]
fn alpha_sentinel_normalizes() {
	let s = AnimFrame::parse("0,0, 0,0, 1, , S").unwrap();
	assert_eq!((s.src_alpha, s.dst_alpha), (0, 255));
	let as1 = AnimFrame::parse("0,0, 0,0, 1, , AS1D255").unwrap();
	assert_eq!((as1.src_alpha, as1.dst_alpha), (0, 255));
}

#[test]
fn alpha_masks_then_clamps() {
	// Both terms pass through a 14-bit mask before the 255 clamp:
	// 300 -> 300 -> 255, 10000 -> 10000 -> 255.
	let f = AnimFrame::parse("0,0, 0,0, 1, , AS300D10000").unwrap();
	assert_eq!((f.src_alpha, f.dst_alpha), (255, 255));
	// 16640 & 0x3fff == 256, still clamped to 255.
	let g = AnimFrame::parse("0,0, 0,0, 1, , AS16640D0").unwrap();
	assert_eq!((g.src_alpha, g.dst_alpha), (255, 0));
}

#[test]
fn alpha_additive_shorthands() {
	let a = AnimFrame::parse("0,0, 0,0, 1, , A").unwrap();
	assert_eq!((a.src_alpha, a.dst_alpha), (255, 255));
	let a1 = AnimFrame::parse("0,0, 0,0, 1, , A1").unwrap();
	assert_eq!((a1.src_alpha, a1.dst_alpha), (255, 128));
	// A source term without a destination defaults the destination to 255.
	let as128 = AnimFrame::parse("0,0, 0,0, 1, , AS128").unwrap();
	assert_eq!((as128.src_alpha, as128.dst_alpha), (128, 255));
}

#[test]
fn malformed_lines_are_skipped() {
	assert!(AnimFrame::parse("not a frame").is_none());
	assert!(AnimFrame::parse("1,2, 3,4").is_none());
	assert!(AnimFrame::parse("").is_none());
}

#[test]
fn clsn_default_inherited_by_undeclared_frames() {
	let text = "\
Clsn2Default: 1
 Clsn2[0] = -10, -80, 10, 0
0,0, 0,0, 5
0,1, 0,0, 5
Clsn2: 1
 Clsn2[0] = -5, -40, 5, 0
0,2, 0,0, 5
";
	let anim = Animation::from_text(text);
	assert_eq!(anim.len(), 3);
	assert_eq!(anim.frames()[0].clsn2().len(), 1);
	assert_eq!(anim.frames()[1].clsn2().len(), 1);
	assert_eq!(anim.frames()[0].clsn2()[0].left, -10.0);
	// A frame with its own block does not inherit the default.
	assert_eq!(anim.frames()[2].clsn2()[0].left, -5.0);
}

#[test]
fn explicit_empty_clsn_overrides_default() {
	let text = "\
Clsn1Default: 1
 Clsn1[0] = -10, -80, 10, 0
Clsn1: 0
0,0, 0,0, 5
0,1, 0,0, 5
";
	let anim = Animation::from_text(text);
	assert!(anim.frames()[0].clsn1().is_empty());
	assert_eq!(anim.frames()[1].clsn1().len(), 1);
}

#[test]
fn reversed_clsn_coordinates_normalize() {
	let text = "\
Clsn2: 1
 Clsn2[0] = 10, 0, -10, -80
0,0, 0,0, 5
";
	let anim = Animation::from_text(text);
	let rect = &anim.frames()[0].clsn2()[0];
	assert!(rect.left <= rect.right);
	assert!(rect.top <= rect.bottom);
	assert_eq!((rect.left, rect.top, rect.right, rect.bottom), (-10.0, -80.0, 10.0, 0.0));
}

#[test]
fn multibyte_garbage_in_clsn_directive_is_tolerated() {
	// A multi-byte character straddling the "default" keyword position must
	// not abort the parse; the directive still applies and the frame after
	// it still parses.
	let anim = Animation::from_text("Clsn1aaaaaa\u{fc}: 1\n0,0, 0,0, 5\n");
	assert_eq!(anim.len(), 1);
	assert_eq!(anim.frames()[0].clsn1().len(), 1);
}

#[test]
fn summary_formats_frame_and_timing_counts() {
	let anim = Animation::from_text("0,0, 0,0, 5\nLoopstart\n0,1, 0,0, 5\n");
	assert_eq!(anim.to_string(), "Animation(2 frames, loopstart=1, totaltime=10)");
}

#[test]
fn totals_for_looping_animation() {
	let anim = Animation::from_text("0,0, 0,0, 5\n0,1, 0,0, 5\n0,2, 0,0, 5\n");
	assert_eq!(anim.total_time(), 15);
	assert_eq!(anim.loop_time(), 15);
	assert_eq!(anim.loop_start(), 0);
}

#[test]
fn trailing_hold_frame_makes_total_negative() {
	let anim = Animation::from_text("0,0, 0,0, 10\nLoopstart\n0,1, 0,0, 5\n0,2, 0,0, -1\n");
	assert_eq!(anim.total_time(), -1);
	assert_eq!(anim.loop_start(), 1);
}

#[test]
fn table_parses_multiple_actions() {
	let text = "\
; test actions
[Begin Action 0]
0,0, 0,0, 5
0,1, 0,0, 5

[Begin Action 200]
200,0, 0,0, -1
";
	let table = ActionTable::parse(text);
	assert_eq!(table.len(), 2);
	assert_eq!(table.action_numbers(), vec![0, 200]);
	assert_eq!(table.get(0).unwrap().len(), 2);
	assert_eq!(table.get(200).unwrap().len(), 1);
	assert!(table.get(1).is_none());
}

#[test]
fn empty_action_forwards_to_next() {
	let text = "\
[Begin Action 5]
[Begin Action 6]
6,0, 0,0, 3
";
	let table = ActionTable::parse(text);
	let alias = table.get(5).unwrap();
	let target = table.get(6).unwrap();
	assert_eq!(alias.len(), 1);
	assert_eq!(alias.frames()[0].group, target.frames()[0].group);
}

#[test]
fn self_referential_alias_chain_terminates() {
	// Both bodies are empty; resolution must not recurse forever.
	let text = "\
[Begin Action 7]
[Begin Action 7]
[Begin Action 8]
";
	let table = ActionTable::parse(text);
	assert!(table.contains(7));
	assert!(table.get(7).unwrap().is_empty());
}

#[test]
fn comments_and_case_are_tolerated() {
	let text = "\
[BEGIN ACTION 41] ; standing guard
41,0, 0,0, 3 ; first
loopstart
41,1, 0,0, 4
";
	let table = ActionTable::parse(text);
	let anim = table.get(41).unwrap();
	assert_eq!(anim.len(), 2);
	assert_eq!(anim.loop_start(), 1);
}
