use std::{error::Error, path::PathBuf, str::FromStr};

use clap::Parser;
use log::LevelFilter;
use rayon::prelude::*;
use strum::{Display, IntoEnumIterator};

use cfopcube::prelude::*;

/// How far the cube is solved
#[derive(PartialEq, Eq, Default, Debug, Display, Copy, Clone, strum::EnumString, strum::EnumIter)]
#[strum(serialize_all = "lowercase")]
enum Goal {
	Cross,
	F2l,
	Oll,
	#[default]
	Pll,
}

impl Goal {
	/// The stages that have to run to reach this goal
	fn stages(self) -> &'static [Stage] {
		let n = match self {
			Goal::Cross => 1,
			Goal::F2l => 5,
			Goal::Oll => 6,
			Goal::Pll => CFOP_STAGES.len(),
		};
		&CFOP_STAGES[..n]
	}
}

/// Rubik's Cube solver using the CFOP method
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
	/// Use a sequence to apply on the solved cube
	#[arg(short, long, default_value_t = String::new())]
	sequence: String,

	/// Set the cube from a string (the same format as when you output the cube via the "-c"-flag)
	#[arg(long, default_value_t = String::new())]
	set: String,

	/// Scramble the cube
	#[arg(short, long, default_value_t = false)]
	random: bool,

	/// Seed for the scramble, a random one is used otherwise
	#[arg(long)]
	seed: Option<u64>,

	/// Solve the cube (the output is a sequence)
	#[arg(long, default_value_t = false)]
	solve: bool,

	/// Stop solving after this stage
	#[arg(long, default_value_t = Goal::default())]
	goal: Goal,

	/// Print all possible goals and quit
	#[arg(long, default_value_t = false)]
	list_goals: bool,

	/// Output length of sequence (if --solve is used)
	#[arg(short, long, default_value_t = false)]
	length: bool,

	/// Print the turns of each stage on its own line (if --solve is used)
	#[arg(long, default_value_t = false)]
	stages: bool,

	/// Merge turns of the same side in the printed sequence
	#[arg(long, default_value_t = false)]
	simplify: bool,

	/// Output the cube as a string rather than colored
	#[arg(short, long, default_value_t = false)]
	char_print: bool,

	/// Print the output to a file rather to the stdout
	#[arg(short, long, default_value_t = String::new())]
	output: String,

	/// Algorithm table for orienting the last layer
	#[arg(long)]
	oll: Option<PathBuf>,

	/// Algorithm table for permuting the last layer
	#[arg(long)]
	pll: Option<PathBuf>,

	/// Solve this many scrambles in parallel and print statistics on the solution lengths
	#[arg(long)]
	batch: Option<usize>,

	/// Log more (-v for info, -vv for debug, -vvv for trace)
	#[arg(short, action = clap::ArgAction::Count)]
	verbose: u8,
}

fn solver_from_args(args: &Args) -> Solver {
	let mut config = SolverConfig::default();
	if let Some(path) = &args.oll {
		config.oll_table = path.clone();
	}
	if let Some(path) = &args.pll {
		config.pll_table = path.clone();
	}
	Solver::new(config)
}

fn display_turns(turns: &[Turn], simplify: bool) -> String {
	if simplify {
		format_turns(&simplify_turns(turns))
	} else {
		format_turns(turns)
	}
}

/// Solve `count` scrambles, seeded one after the other from `first_seed`.
fn run_batch(
	out: &mut dyn std::io::Write,
	solver: &Solver,
	goal: Goal,
	count: usize,
	first_seed: u64,
) -> Result<(), Box<dyn Error>> {
	let lengths = (0..count as u64)
		.into_par_iter()
		.map(|i| {
			let (cube, _) = Cube3::new().scramble(&mut scramble_rng(Some(first_seed + i)));
			solver.run(&cube, goal.stages()).map(|s| s.turns.len())
		})
		.collect::<Result<Vec<usize>, SolveError>>()?;

	let (Some(min), Some(max)) = (lengths.iter().min(), lengths.iter().max()) else {
		return Ok(());
	};
	let mean = lengths.iter().sum::<usize>() as f64 / lengths.len() as f64;

	writeln!(out, "solved={} mean={:.2} min={} max={}", lengths.len(), mean, min, max)?;
	Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
	let args = Args::parse();

	env_logger::Builder::new()
		.filter_level(match args.verbose {
			0 => LevelFilter::Warn,
			1 => LevelFilter::Info,
			2 => LevelFilter::Debug,
			_ => LevelFilter::Trace,
		})
		.parse_default_env()
		.init();

	// Whether to redirect it to the stdout or a file
	let mut out: Box<dyn std::io::Write> = if args.output.is_empty() {
		Box::new(std::io::stdout())
	} else {
		Box::new(std::fs::File::create(&args.output)?)
	};

	// List the goals and exit
	if args.list_goals {
		for goal in Goal::iter() {
			writeln!(out, "{}", goal)?;
		}
		return Ok(());
	}

	let solver = solver_from_args(&args);

	if let Some(count) = args.batch {
		let first_seed = args.seed.unwrap_or_else(rand::random);
		return run_batch(out.as_mut(), &solver, args.goal, count, first_seed);
	}

	let mut cube = Cube3::new();

	// Generate a random input cube
	if args.random {
		let (scrambled, turns) = cube.scramble(&mut scramble_rng(args.seed));
		log::info!("Scramble: {}", format_turns(&turns));
		cube = scrambled;
	}

	// Parses a cube out of the cube string
	if !args.set.is_empty() {
		cube = Cube3::from_str(args.set.as_str())?;
	}

	cube = cube.apply_turns(&parse_turns(&args.sequence)?);

	// Solve the cube and only outputs the sequence
	if args.solve {
		let solution = solver.run(&cube, args.goal.stages())?;

		if args.stages {
			for stage in solution.stages.iter() {
				writeln!(out.as_mut(), "{}: {}", stage.stage, display_turns(&stage.turns, args.simplify))?;
			}
		}

		let turns = if args.simplify { simplify_turns(&solution.turns) } else { solution.turns };
		write!(out.as_mut(), "{}", format_turns(&turns))?;
		if args.length {
			writeln!(out.as_mut(), " (len={})", turns.len())?;
		} else {
			writeln!(out.as_mut())?;
		}
		return Ok(());
	}

	// Print the resulting cube (either as a string or with colors)
	if args.char_print {
		writeln!(out.as_mut(), "{}", cube)?;
	} else if args.output.is_empty() {
		cube.print();
	} else {
		writeln!(out.as_mut(), "{}", cube.net_string())?;
	}

	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;
	use clap::CommandFactory;

	#[test]
	fn verify_args() {
		Args::command().debug_assert();
	}

	#[test]
	fn goals_parse_and_cover_the_stages() {
		assert_eq!(Goal::from_str("f2l"), Ok(Goal::F2l));
		assert_eq!(Goal::F2l.to_string(), "f2l");
		assert_eq!(Goal::Cross.stages(), &[Stage::Cross]);
		assert_eq!(Goal::Oll.stages().last(), Some(&Stage::Oll));
		assert_eq!(Goal::Pll.stages(), &CFOP_STAGES);
	}

	#[test]
	fn simplified_display() -> Result<(), Box<dyn Error>> {
		let turns = parse_turns("R R U U'")?;
		assert_eq!(display_turns(&turns, false), "R R U U'");
		assert_eq!(display_turns(&turns, true), "R2");
		Ok(())
	}
}
