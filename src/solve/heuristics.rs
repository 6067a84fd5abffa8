//! Stage estimates for the IDA* stages and the exact goal tests of the last layer.
//!
//! The estimates are zero exactly when their stage is done. They are weighted to keep
//! the search shallow, so they may overestimate the remaining number of turns.

use crate::cube::{arraycube::Cube3, Face};

/// Down facelet next to each side face, with that face
const CROSS_EDGES: [(Face, (usize, usize)); 4] = [
	(Face::Front, (0, 1)),
	(Face::Right, (1, 2)),
	(Face::Back, (2, 1)),
	(Face::Left, (1, 0)),
];

const EDGE_POSITIONS: [(usize, usize); 4] = [(0, 1), (2, 1), (1, 0), (1, 2)];
const CORNER_POSITIONS: [(usize, usize); 4] = [(0, 2), (2, 0), (0, 0), (2, 2)];

/// The first two layer slots: the down corner facelet, the face on its left and the face on its right
const SLOTS: [((usize, usize), Face, Face); 4] = [
	((0, 0), Face::Left, Face::Front),
	((0, 2), Face::Front, Face::Right),
	((2, 2), Face::Right, Face::Back),
	((2, 0), Face::Back, Face::Left),
];

/// Misplaced cross edges, plus bottom colored edges on the top face.
pub fn cross_misses(cube: &Cube3) -> u32 {
	let bottom = cube.center(Face::Down);
	let mut h = 0;

	for (face, (r, c)) in CROSS_EDGES {
		if cube.facelet(face, 2, 1) != cube.center(face) || cube.facelet(Face::Down, r, c) != bottom {
			h += 1;
		}
	}

	for (r, c) in EDGE_POSITIONS {
		if cube.facelet(Face::Up, r, c) == bottom {
			h += 1;
		}
	}

	h
}

/// Number of corner/edge slots of the first two layers that are not done.
pub fn bad_slots(cube: &Cube3) -> u32 {
	let bottom = cube.center(Face::Down);

	SLOTS
		.iter()
		.filter(|((r, c), left, right)| {
			let (lc, rc) = (cube.center(*left), cube.center(*right));
			cube.facelet(Face::Down, *r, *c) != bottom
				|| cube.facelet(*left, 2, 2) != lc
				|| cube.facelet(*right, 2, 0) != rc
				|| cube.facelet(*left, 1, 2) != lc
				|| cube.facelet(*right, 1, 0) != rc
		})
		.count() as u32
}

pub fn h_cross(cube: &Cube3) -> u32 {
	cross_misses(cube)
}

pub fn h_first_pair(cube: &Cube3) -> u32 {
	cross_misses(cube) + (bad_slots(cube) == 4) as u32
}

pub fn h_second_pair(cube: &Cube3) -> u32 {
	cross_misses(cube) + bad_slots(cube).saturating_sub(2)
}

pub fn h_third_pair(cube: &Cube3) -> u32 {
	2 * (cross_misses(cube) + bad_slots(cube).saturating_sub(1))
}

/// Also counts bottom colors lying in the last layer
pub fn h_fourth_pair(cube: &Cube3) -> u32 {
	let bottom = cube.center(Face::Down);
	let mut h = cross_misses(cube) + bad_slots(cube);

	for (r, c) in CORNER_POSITIONS {
		if cube.facelet(Face::Up, r, c) == bottom {
			h += 2;
		}
	}

	for face in [Face::Front, Face::Right, Face::Back, Face::Left] {
		for c in [0, 2] {
			if cube.facelet(face, 2, c) == bottom {
				h += 1;
			}
		}
	}

	2 * h
}

pub fn is_f2l_done(cube: &Cube3) -> bool {
	cross_misses(cube) == 0 && bad_slots(cube) == 0
}

/// The first two layers are done and the top face shows a single color.
pub fn goal_test_oll(cube: &Cube3) -> bool {
	let top = cube.center(Face::Up);
	is_f2l_done(cube) && cube.face(Face::Up).iter().flatten().all(|c| *c == top)
}

pub fn goal_test_solved(cube: &Cube3) -> bool {
	cube.is_solved()
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::cube::turn::parse_turns;
	use std::error::Error;

	type Heuristic = fn(&Cube3) -> u32;

	const ALL: [Heuristic; 5] = [h_cross, h_first_pair, h_second_pair, h_third_pair, h_fourth_pair];

	#[test]
	fn zero_on_solved() {
		let cube = Cube3::new();
		for h in ALL {
			assert_eq!(h(&cube), 0);
		}
		assert!(is_f2l_done(&cube));
		assert!(goal_test_oll(&cube));
		assert!(goal_test_solved(&cube));
	}

	#[test]
	fn cross_range() -> Result<(), Box<dyn Error>> {
		// F2 puts a cross edge on top
		let cube = Cube3::new().apply_turns(&parse_turns("F2")?);
		assert_eq!(h_cross(&cube), 2);
		assert_eq!(bad_slots(&cube), 2);

		let cube = Cube3::new().apply_turns(&parse_turns("F2 B2 L2 R2")?);
		assert_eq!(h_cross(&cube), 8);
		Ok(())
	}

	#[test]
	fn last_layer_moves_keep_first_two_layers() -> Result<(), Box<dyn Error>> {
		let cube = Cube3::new().apply_turns(&parse_turns("R U R' U R U2 R'")?);
		assert!(is_f2l_done(&cube));
		assert!(!goal_test_oll(&cube));
		assert_eq!(h_fourth_pair(&cube), 0);

		// Only a U turn away: oriented but not solved
		let cube = Cube3::new().apply_turns(&parse_turns("U")?);
		assert!(goal_test_oll(&cube));
		assert!(!goal_test_solved(&cube));
		Ok(())
	}

	#[test]
	fn pair_weights() -> Result<(), Box<dyn Error>> {
		// Takes the front right pair out of its slot, leaving the cross alone
		let cube = Cube3::new().apply_turns(&parse_turns("R U R'")?);
		assert_eq!(cross_misses(&cube), 0);
		assert_eq!(bad_slots(&cube), 1);
		assert_eq!(h_first_pair(&cube), 0);
		assert_eq!(h_second_pair(&cube), 0);
		assert_eq!(h_third_pair(&cube), 0);
		assert!(h_fourth_pair(&cube) > 0);
		Ok(())
	}
}
