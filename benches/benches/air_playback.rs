//! Benchmark suite for AIR parsing and playback
//!
//! Measures action-table parsing throughput on synthetic character files
//! and the per-tick cost of the playback state machine.
//!
//! Run with: cargo bench --manifest-path benches/Cargo.toml

use std::hint::black_box;
use std::sync::Arc;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use kakuto_anim::air::ActionTable;
use kakuto_anim::playback::Playback;
use kakuto_anim::sprite::NoSprites;
use kakuto_benches::{generate_air_text, sizes};

/// Benchmark action-table parsing on different content shapes
fn bench_parse(c: &mut Criterion) {
	let mut group = c.benchmark_group("air_parse");

	for (name, (actions, frames)) in [
		("single", sizes::SINGLE),
		("small", sizes::SMALL),
		("character", sizes::CHARACTER),
	] {
		let text = generate_air_text(actions, frames);
		group.throughput(Throughput::Bytes(text.len() as u64));
		group.bench_with_input(BenchmarkId::new("parse", name), &text, |b, text| {
			b.iter(|| black_box(ActionTable::parse(black_box(text))));
		});
	}

	group.finish();
}

/// Benchmark the playback state machine stepping through a looping action
fn bench_step(c: &mut Criterion) {
	let mut group = c.benchmark_group("playback_step");

	let text = generate_air_text(1, 16);
	let table = ActionTable::parse(&text);
	let def = table.get(0).expect("generated action 0");

	group.throughput(Throughput::Elements(10_000));
	group.bench_function("step_10k_ticks", |b| {
		b.iter(|| {
			let mut play = Playback::new(Arc::clone(&def));
			for _ in 0..10_000 {
				play.step(&NoSprites);
			}
			black_box(play.sum_time())
		});
	});

	group.finish();
}

criterion_group!(benches, bench_parse, bench_step);
criterion_main!(benches);
