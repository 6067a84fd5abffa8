//! This is a simple example how to turn and solve the cube.
//!
//! ```
//! use cfopcube::prelude::*;
//!
//! let cube = Cube3::new();
//!
//! let turns1 = parse_turns("U2 D2 B2 F2 L2 R2").unwrap();
//! let turns2 = parse_turns("M2 E2 S2").unwrap();
//!
//! let cube = cube.apply_turns(&turns1).apply_turns(&turns2);
//! assert!(cube.is_solved());
//!
//! let cube = cube.apply_turns(&parse_turns("R U R' U' F2").unwrap());
//! let solution = solve(&cube).unwrap();
//! assert!(cube.apply_turns(&solution.turns).is_solved());
//! ```
//!
//! M, E and S are advanced turns and are combinations of U/D, B/F and L/R.

pub mod cube;
pub mod solve;

pub mod prelude {
	pub use crate::cube::{arraycube::*, turn::*, *};
	pub use crate::solve::{solve, Solution, SolveError, Solver, SolverConfig, Stage, StageSolution, CFOP_STAGES};
}
