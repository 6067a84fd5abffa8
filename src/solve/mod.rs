//! The CFOP solver: the cross and the four first two layer pairs are searched with IDA*,
//! the last layer is looked up in algorithm tables.

pub mod heuristics;
pub mod ida;
pub mod node;
pub mod table;

use std::path::PathBuf;

use crate::cube::{arraycube::Cube3, turn::*};
use heuristics::*;
use ida::ida_star;
use table::AlgorithmTable;

/// The stages of a solve, in the order the solver runs them.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[derive(strum::Display)]
pub enum Stage {
	#[strum(to_string = "cross")]
	Cross,
	#[strum(to_string = "first pair")]
	FirstPair,
	#[strum(to_string = "second pair")]
	SecondPair,
	#[strum(to_string = "third pair")]
	ThirdPair,
	#[strum(to_string = "fourth pair")]
	FourthPair,
	#[strum(to_string = "OLL")]
	Oll,
	#[strum(to_string = "PLL")]
	Pll,
}

/// All stages of a solve
pub const CFOP_STAGES: [Stage; 7] = [
	Stage::Cross,
	Stage::FirstPair,
	Stage::SecondPair,
	Stage::ThirdPair,
	Stage::FourthPair,
	Stage::Oll,
	Stage::Pll,
];

impl Stage {
	/// The estimate a searched stage runs on, None for looked up stages.
	pub fn heuristic(self) -> Option<fn(&Cube3) -> u32> {
		match self {
			Stage::Cross => Some(h_cross),
			Stage::FirstPair => Some(h_first_pair),
			Stage::SecondPair => Some(h_second_pair),
			Stage::ThirdPair => Some(h_third_pair),
			Stage::FourthPair => Some(h_fourth_pair),
			Stage::Oll | Stage::Pll => None,
		}
	}

	/// Whether the goal of this stage holds for the cube.
	pub fn is_done(self, cube: &Cube3) -> bool {
		match self {
			Stage::Oll => goal_test_oll(cube),
			Stage::Pll => goal_test_solved(cube),
			_ => self.heuristic().is_some_and(|h| h(cube) == 0),
		}
	}
}

#[derive(thiserror::Error, Debug)]
pub enum SolveError {
	#[error("The search for the {0} ran out of states")]
	SearchExhausted(Stage),
	#[error("No {0} algorithm matches the cube")]
	TableExhausted(Stage),
	#[error("Could not read the algorithm table {}: {source}", .path.display())]
	TableUnavailable {
		path: PathBuf,
		source: std::io::Error,
	},
	#[error("Line {line} of the algorithm table {}: {source}", .path.display())]
	TableFormat {
		path: PathBuf,
		line: usize,
		source: ParseTurnError,
	},
}

/// Where the solver finds its algorithm tables.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SolverConfig {
	pub oll_table: PathBuf,
	pub pll_table: PathBuf,
}

impl Default for SolverConfig {
	/// The tables shipped in the `resources` directory of this package
	fn default() -> Self {
		let resources = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("resources");
		Self {
			oll_table: resources.join("oll.txt"),
			pll_table: resources.join("pll.txt"),
		}
	}
}

/// The turns one stage contributed to a solution.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StageSolution {
	pub stage: Stage,
	pub turns: Vec<Turn>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Solution {
	/// All turns, stage after stage
	pub turns: Vec<Turn>,
	/// The cube after applying the turns
	pub cube: Cube3,
	pub stages: Vec<StageSolution>,
}

#[derive(Clone, Debug, Default)]
pub struct Solver {
	config: SolverConfig,
}

impl Solver {
	pub fn new(config: SolverConfig) -> Self {
		Self { config }
	}

	pub fn config(&self) -> &SolverConfig {
		&self.config
	}

	/// Solve the cube stage by stage with CFOP.
	pub fn solve(&self, cube: &Cube3) -> Result<Solution, SolveError> {
		self.run(cube, &CFOP_STAGES)
	}

	/// Run the given stages one after the other on the cube.
	pub fn run(&self, cube: &Cube3, stages: &[Stage]) -> Result<Solution, SolveError> {
		let mut solution = Solution {
			turns: vec![],
			cube: *cube,
			stages: vec![],
		};

		for &stage in stages {
			let turns = self.solve_stage(stage, &solution.cube)?;
			log::info!("Solved the {} with {} turns", stage, turns.len());

			solution.cube = solution.cube.apply_turns(&turns);
			solution.turns.extend_from_slice(&turns);
			solution.stages.push(StageSolution { stage, turns });
		}

		Ok(solution)
	}

	/// The turns which solve the given stage, assuming all earlier stages are done.
	pub fn solve_stage(&self, stage: Stage, cube: &Cube3) -> Result<Vec<Turn>, SolveError> {
		if stage.is_done(cube) {
			return Ok(vec![]);
		}

		if let Some(heuristic) = stage.heuristic() {
			return ida_star(*cube, heuristic).ok_or(SolveError::SearchExhausted(stage));
		}

		let found = match stage {
			Stage::Oll => AlgorithmTable::load(&self.config.oll_table)?.lookup_oll(cube),
			_ => AlgorithmTable::load(&self.config.pll_table)?.lookup_pll(cube),
		};
		found.ok_or(SolveError::TableExhausted(stage))
	}
}

/// Solve the cube with the bundled algorithm tables.
pub fn solve(cube: &Cube3) -> Result<Solution, SolveError> {
	Solver::default().solve(cube)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::cube::arraycube::scramble_rng;
	use std::error::Error;

	#[test]
	fn solved_cube_needs_nothing() -> Result<(), Box<dyn Error>> {
		let solution = solve(&Cube3::new())?;
		assert!(solution.turns.is_empty());
		assert_eq!(solution.stages.len(), CFOP_STAGES.len());
		assert_eq!(solution.cube, Cube3::new());
		Ok(())
	}

	#[test]
	fn stage_names() {
		assert_eq!(Stage::Cross.to_string(), "cross");
		assert_eq!(Stage::ThirdPair.to_string(), "third pair");
		assert_eq!(Stage::Pll.to_string(), "PLL");
		assert_eq!(
			SolveError::TableExhausted(Stage::Oll).to_string(),
			"No OLL algorithm matches the cube"
		);
	}

	#[test_log::test]
	fn last_layer_only() -> Result<(), Box<dyn Error>> {
		// T permutation after a Sune
		let cube = Cube3::new().apply_turns(&parse_turns("R U R' U R U2 R' U R U R' U' R' F R2 U' R' U' R U R' F'")?);
		assert!(heuristics::is_f2l_done(&cube));

		let solution = solve(&cube)?;
		assert!(solution.stages[..5].iter().all(|s| s.turns.is_empty()));
		assert!(solution.cube.is_solved());
		assert_eq!(cube.apply_turns(&solution.turns), solution.cube);
		Ok(())
	}

	#[test_log::test]
	fn scrambled_cube() -> Result<(), Box<dyn Error>> {
		let (cube, _) = Cube3::new().scramble(&mut scramble_rng(Some(5)));
		let solution = solve(&cube)?;

		assert!(heuristics::goal_test_solved(&solution.cube));
		assert_eq!(cube.apply_turns(&solution.turns), solution.cube);

		let concatenated: Vec<Turn> = solution.stages.iter().flat_map(|s| s.turns.iter().copied()).collect();
		assert_eq!(concatenated, solution.turns);
		Ok(())
	}

	#[test_log::test]
	/// The same scramble is always solved the same way
	fn deterministic() -> Result<(), Box<dyn Error>> {
		let (cube, _) = Cube3::new().scramble(&mut scramble_rng(Some(11)));
		let solver = Solver::default();
		let first = solver.solve(&cube)?;
		let second = solver.solve(&cube)?;
		assert_eq!(first, second);
		Ok(())
	}

	#[test]
	fn missing_table_is_an_error() -> Result<(), Box<dyn Error>> {
		let solver = Solver::new(SolverConfig {
			oll_table: PathBuf::from("missing/oll.txt"),
			pll_table: PathBuf::from("missing/pll.txt"),
		});

		// Nothing to look up, so the tables are never read
		assert!(solver.solve(&Cube3::new())?.turns.is_empty());

		let cube = Cube3::new().apply_turns(&parse_turns("R U R' U R U2 R'")?);
		let err = solver.solve(&cube);
		assert!(matches!(err, Err(SolveError::TableUnavailable { .. })));
		Ok(())
	}
}
