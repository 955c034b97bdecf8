//! End-to-end tests for kakuto-rs: parse a character action file, run the
//! playback state machine, and flush a draw list through a fake backend.

use std::collections::HashMap;

use kakuto_rs::prelude::*;

const CHARACTER_AIR: &str = "\
; ---------------------------------------------------------------------------
; Standing
[Begin Action 0]
Clsn2Default: 1
 Clsn2[0] = -13, -79, 16, 0
0,0, 0,0, 10
0,1, 0,0, 7
0,2, 0,0, 7
0,1, 0,0, 7

; Guarding (alias for the standing action)
[Begin Action 120]

; Standing
[Begin Action 121]
121,0, 0,0, 4
121,1, 0,0, -1

; Hit spark with fade-out
[Begin Action 8000]
8000,0, 0,0, 2, , A
8000,1, 0,0, 2, , AS128D255
8000,2, 0,0, 2, , AS64D255
";

struct SheetStore {
	sprites: HashMap<(i16, i16), SpriteHandle>,
}

impl SheetStore {
	fn with_groups(groups: &[i16]) -> Self {
		let mut sprites = HashMap::new();
		for (i, &group) in groups.iter().enumerate() {
			for number in 0..8 {
				sprites.insert(
					(group, number),
					SpriteHandle {
						texture: TextureId(i as u32 * 100 + number as u32),
						palette: Some(PaletteId(1)),
						size: [48, 96],
						offset: [24, 92],
						color_depth: 8,
					},
				);
			}
		}
		Self {
			sprites,
		}
	}
}

impl SpriteStore for SheetStore {
	fn sprite(&self, group: i16, number: i16) -> Option<SpriteHandle> {
		self.sprites.get(&(group, number)).copied()
	}
}

#[derive(Default)]
struct CollectingBackend {
	draws: Vec<(u32, i32)>,
}

impl RenderBackend for CollectingBackend {
	fn draw(&mut self, params: &DrawParams, quads: &[Quad]) {
		assert!(!quads.is_empty());
		self.draws.push((params.texture.0, params.trans.packed()));
	}
}

#[test]
fn standing_action_cycles_through_frames() {
	let table = ActionTable::parse(CHARACTER_AIR);
	let store = SheetStore::with_groups(&[0, 121, 8000]);
	let mut play = Playback::new(table.get(0).unwrap());

	// 10 + 7 + 7 + 7 = 31 ticks per cycle.
	for _ in 0..10 {
		play.step(&store);
	}
	assert_eq!(play.current_index(), 1);
	for _ in 0..21 {
		play.step(&store);
	}
	assert!(play.loop_end());
	assert_eq!(play.sum_time(), 31);
	play.step(&store);
	assert_eq!(play.current_index(), 0);
	assert_eq!(play.sum_time(), 1);

	// The default hurt box reaches every frame of the cycle.
	assert_eq!(play.clsn2().len(), 1);
	assert!(play.clsn1().is_empty());
}

#[test]
fn alias_action_resolves_to_next_action() {
	let table = ActionTable::parse(CHARACTER_AIR);
	let alias = table.get(120).unwrap();
	let target = table.get(121).unwrap();
	assert_eq!(alias.len(), target.len());
	assert_eq!(alias.frames()[0].group, 121);

	let store = SheetStore::with_groups(&[0, 121, 8000]);
	let mut play = Playback::new(alias);
	for _ in 0..10 {
		play.step(&store);
	}
	// Holds forever on the terminal frame.
	assert_eq!(play.current_index(), 1);
	assert_eq!(play.sprite().unwrap().texture, TextureId(101));
}

#[test]
fn spark_alpha_modes_reach_the_backend() {
	let table = ActionTable::parse(CHARACTER_AIR);
	let store = SheetStore::with_groups(&[0, 121, 8000]);
	let ctx = RenderContext::default();
	let mut play = Playback::new(table.get(8000).unwrap());
	play.step(&store);

	let mut list = DrawList::new();
	list.add(DrawRequest::new(&play, [160.0, 120.0], 0), &ctx);
	let mut backend = CollectingBackend::default();
	list.flush(&mut backend, &ctx);

	// Frame 1 is additive: the legacy packed protocol encodes that as -1.
	assert_eq!(backend.draws.len(), 1);
	assert_eq!(backend.draws[0].1, -1);
}

#[test]
fn draw_order_is_priority_then_arrival() {
	let table = ActionTable::parse(CHARACTER_AIR);
	let store = SheetStore::with_groups(&[0, 121, 8000]);
	let ctx = RenderContext::default();

	let mut a = Playback::new(table.get(0).unwrap());
	let mut b = Playback::new(table.get(121).unwrap());
	let mut c = Playback::new(table.get(8000).unwrap());
	a.step(&store);
	b.step(&store);
	c.step(&store);

	let mut list = DrawList::new();
	list.add(DrawRequest::new(&a, [0.0, 0.0], 5), &ctx);
	list.add(DrawRequest::new(&b, [0.0, 0.0], 1), &ctx);
	list.add(DrawRequest::new(&c, [0.0, 0.0], 5), &ctx);
	assert_eq!(list.priorities(), vec![1, 5, 5]);

	let mut backend = CollectingBackend::default();
	list.flush(&mut backend, &ctx);
	assert_eq!(backend.draws.len(), 3);
	// b first (priority 1), then a before c (arrival order among ties).
	assert_eq!(backend.draws[0].0, 100);
	assert_eq!(backend.draws[1].0, 0);
	assert_eq!(backend.draws[2].0, 200);
}

#[test]
fn remapped_sprites_resolve_through_the_store() {
	let table = ActionTable::parse(CHARACTER_AIR);
	let store = SheetStore::with_groups(&[0, 121, 8000]);
	let mut play = Playback::new(table.get(0).unwrap());
	play.set_remap((0, 0), (121, 1));
	play.step(&store);
	assert_eq!(play.sprite().unwrap().texture, TextureId(101));
}
