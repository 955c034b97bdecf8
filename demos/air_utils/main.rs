//! AIR Action Format CLI Utility
//!
//! A command-line tool for inspecting and simulating AIR action files.
//!
//! # Features
//!
//! - **list**: Show every action in a file with its frame and timing summary
//! - **dump**: Export one parsed action (or all of them) as JSON
//! - **play**: Simulate an action tick by tick and print the frame trace
//!
//! # Usage
//!
//! ```bash
//! # List the actions in a file
//! cargo run --example air_utils list kfm.air
//!
//! # Dump action 200 as JSON
//! cargo run --example air_utils dump kfm.air --action 200
//!
//! # Trace 60 ticks of action 0
//! cargo run --example air_utils play kfm.air --action 0 --ticks 60
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use kakuto_rs::prelude::*;
use log::info;

#[derive(Parser)]
#[command(name = "air_utils")]
#[command(author = "kakuto-rs project")]
#[command(version = "1.0")]
#[command(about = "AIR action format utility - list, dump, and simulate actions", long_about = None)]
struct Cli {
	#[command(subcommand)]
	command: Commands,
}

#[derive(Subcommand)]
enum Commands {
	/// List every action with a one-line summary
	List {
		/// Input AIR file path
		#[arg(value_name = "INPUT_AIR")]
		input: PathBuf,
	},

	/// Dump parsed actions as JSON
	Dump {
		/// Input AIR file path
		#[arg(value_name = "INPUT_AIR")]
		input: PathBuf,

		/// Action number to dump; omit to dump all actions
		#[arg(short, long)]
		action: Option<i32>,
	},

	/// Simulate an action and print the per-tick frame trace
	Play {
		/// Input AIR file path
		#[arg(value_name = "INPUT_AIR")]
		input: PathBuf,

		/// Action number to play
		#[arg(short, long, default_value_t = 0)]
		action: i32,

		/// Number of ticks to simulate
		#[arg(short, long, default_value_t = 60)]
		ticks: u32,
	},
}

fn main() -> Result<()> {
	env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

	let cli = Cli::parse();
	match cli.command {
		Commands::List {
			input,
		} => list(&input),
		Commands::Dump {
			input,
			action,
		} => dump(&input, action),
		Commands::Play {
			input,
			action,
			ticks,
		} => play(&input, action, ticks),
	}
}

fn list(input: &PathBuf) -> Result<()> {
	let table = ActionTable::open(input)
		.with_context(|| format!("cannot open AIR file {}", input.display()))?;
	info!("{}: {} actions", input.display(), table.len());
	for no in table.action_numbers() {
		let anim = table.require(no)?;
		let total = match anim.total_time() {
			-1 => "forever".to_string(),
			t => format!("{t} ticks"),
		};
		println!(
			"action {no:>6}: {:>3} frames, loop start {}, {total}",
			anim.len(),
			anim.loop_start()
		);
	}
	Ok(())
}

fn dump(input: &PathBuf, action: Option<i32>) -> Result<()> {
	let table = ActionTable::open(input)
		.with_context(|| format!("cannot open AIR file {}", input.display()))?;
	match action {
		Some(no) => {
			let anim = table.require(no)?;
			println!("{}", serde_json::to_string_pretty(&*anim)?);
		}
		None => {
			let all: std::collections::BTreeMap<i32, &Animation> =
				table.iter().map(|(no, a)| (no, a.as_ref())).collect();
			println!("{}", serde_json::to_string_pretty(&all)?);
		}
	}
	Ok(())
}

fn play(input: &PathBuf, action: i32, ticks: u32) -> Result<()> {
	let table = ActionTable::open(input)
		.with_context(|| format!("cannot open AIR file {}", input.display()))?;
	let anim = table.require(action)?;
	info!("action {action}: {anim}");
	let mut playback = Playback::new(anim);
	for tick in 1..=ticks {
		playback.step(&NoSprites);
		let frame = match playback.draw_frame() {
			Some(f) => format!("{f}"),
			None => "(empty)".to_string(),
		};
		println!(
			"tick {tick:>4}: elem {:>3} {} sum_time={}{}",
			playback.draw_index() + 1,
			frame,
			playback.sum_time(),
			if playback.loop_end() { " [loop end]" } else { "" }
		);
	}
	Ok(())
}
