use std::path::{Path, PathBuf};

use crate::cube::{arraycube::Cube3, turn::*};
use crate::solve::{heuristics::*, SolveError};

const U: Turn = Turn { side: TurnSide::Up, wise: TurnWise::Clockwise };
const U_PRIME: Turn = Turn { side: TurnSide::Up, wise: TurnWise::CounterClockwise };
const U2: Turn = Turn { side: TurnSide::Up, wise: TurnWise::Double };

/// Turns of the top layer tried around an algorithm, in this order.
const ADJUSTMENTS: [&[Turn]; 4] = [&[], &[U], &[U_PRIME], &[U2]];

/// A list of known algorithms, one per line of a text file.
#[derive(Clone, Debug)]
pub struct AlgorithmTable {
	pub path: PathBuf,
	pub algorithms: Vec<Vec<Turn>>,
}

impl AlgorithmTable {
	/// Read the table from the given file.
	pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, SolveError> {
		let path = path.as_ref();
		let text = std::fs::read_to_string(path).map_err(|source| SolveError::TableUnavailable {
			path: path.to_path_buf(),
			source,
		})?;

		let table = Self::parse(path, &text)?;
		log::debug!("Loaded {} algorithms from {}", table.algorithms.len(), path.display());
		Ok(table)
	}

	/// Parse the lines of a table, skipping blank ones.
	/// `path` only names the table in errors.
	pub fn parse<P: AsRef<Path>>(path: P, text: &str) -> Result<Self, SolveError> {
		let path = path.as_ref().to_path_buf();
		let mut algorithms = vec![];

		for (i, line) in text.lines().enumerate() {
			if line.trim().is_empty() {
				continue;
			}
			let turns = parse_turns(line).map_err(|source| SolveError::TableFormat {
				path: path.clone(),
				line: i + 1,
				source,
			})?;
			algorithms.push(turns);
		}

		Ok(Self { path, algorithms })
	}

	/// Find the first algorithm, turned to each of the four top layer offsets,
	/// which orients the last layer.
	pub fn lookup_oll(&self, cube: &Cube3) -> Option<Vec<Turn>> {
		if goal_test_oll(cube) {
			return Some(vec![]);
		}

		for (i, alg) in self.algorithms.iter().enumerate() {
			for pre in ADJUSTMENTS {
				let turns = [pre, alg.as_slice()].concat();
				if goal_test_oll(&cube.apply_turns(&turns)) {
					log::trace!("Orientation algorithm {} matches with {}", i + 1, format_turns(pre));
					return Some(turns);
				}
			}
		}

		None
	}

	/// Find the first algorithm which solves the cube, turned to each of the four
	/// top layer offsets and followed by each of the four top layer adjustments.
	/// A top layer that is only turned away is fixed by that turn alone.
	pub fn lookup_pll(&self, cube: &Cube3) -> Option<Vec<Turn>> {
		if goal_test_solved(cube) {
			return Some(vec![]);
		}

		for post in ADJUSTMENTS {
			if goal_test_solved(&cube.apply_turns(post)) {
				return Some(post.to_vec());
			}
		}

		for (i, alg) in self.algorithms.iter().enumerate() {
			for pre in ADJUSTMENTS {
				let turned = cube.apply_turns(pre).apply_turns(alg);
				for post in ADJUSTMENTS {
					if goal_test_solved(&turned.apply_turns(post)) {
						log::trace!("Permutation algorithm {} matches", i + 1);
						return Some([pre, alg.as_slice(), post].concat());
					}
				}
			}
		}

		None
	}
}
