use std::str::FromStr;

use rand::{rngs::StdRng, Rng, SeedableRng};
use strum::{EnumCount, IntoEnumIterator};

use crate::cube::{turn::*, *};

/// Number of turns in a scramble
pub const SCRAMBLE_LENGTH: usize = 25;

/// A Rubik's Cube representation, using one N×N grid of colors per face.
///
/// Every face grid is stored the way it looks on the unfolded net
/// (Up above Front, then Left Front Right Back in a row, Down below Front),
/// i.e. as seen from outside the cube.
/// Row 0 of the side faces touches Up, row 0 of Down touches Front and row 0 of Up touches Back.
///
/// Cubes are values: every operation returns a new cube.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct ArrayCube<const N: usize = CUBE_DIM> {
	pub faces: [[[Color; N]; N]; NUM_SIDES],
}

/// The cube the solver works on
pub type Cube3 = ArrayCube<CUBE_DIM>;

impl<const N: usize> Default for ArrayCube<N> {
	/// Creates a *solved* rubiks cube!
	fn default() -> Self {
		let mut faces = [[[Color::White; N]; N]; NUM_SIDES];
		for face in Face::iter() {
			faces[face as usize] = [[face.home_color(); N]; N];
		}
		Self { faces }
	}
}

impl<const N: usize> ArrayCube<N> {
	pub fn new() -> Self {
		Self::default()
	}

	/// The side length of the cube
	pub const fn size(&self) -> usize {
		N
	}

	pub fn face(&self, face: Face) -> &[[Color; N]; N] {
		&self.faces[face as usize]
	}

	pub fn facelet(&self, face: Face, row: usize, col: usize) -> Color {
		self.faces[face as usize][row][col]
	}

	/// The color of the center of the face (for even N, the upper left of the inner four).
	pub fn center(&self, face: Face) -> Color {
		self.faces[face as usize][(N - 1) / 2][(N - 1) / 2]
	}

	/// How often each color appears, indexed by color
	pub fn color_counts(&self) -> [usize; Color::COUNT] {
		let mut out = [0; Color::COUNT];
		for c in self.faces.iter().flatten().flatten() {
			out[*c as usize] += 1;
		}
		out
	}

	/// Whether every face carries a single color.
	pub fn is_solved(&self) -> bool {
		Face::iter().all(|face| {
			let center = self.center(face);
			self.face(face).iter().flatten().all(|c| *c == center)
		})
	}

	/// Apply the given turn and return the resulting cube.
	pub fn apply(&self, turn: Turn) -> Self {
		turn.recipe()
			.quarters()
			.iter()
			.fold(*self, |cube, q| cube.quarter(q.layer, q.clockwise))
	}

	/// Apply the given sequence of turns, from left to right.
	pub fn apply_turns(&self, turns: &[Turn]) -> Self {
		turns.iter().fold(*self, |cube, turn| cube.apply(*turn))
	}

	/// Apply a random scramble of `SCRAMBLE_LENGTH` turns.
	/// Returns the scrambled cube and the scramble.
	pub fn scramble<R>(&self, rng: &mut R) -> (Self, Vec<Turn>)
	where
		R: Rng + ?Sized,
	{
		let turns = scramble_sequence(rng, SCRAMBLE_LENGTH);
		(self.apply_turns(&turns), turns)
	}

	// ===== Primitives =====

	/// The i-th facelet of the k-th border strip of a layer at depth `d`.
	/// The strips are listed in the order their facelets travel on a clockwise turn,
	/// and the i-th facelet of one strip moves onto the i-th facelet of the next.
	fn border(layer: Layer, d: usize, k: usize, i: usize) -> (Face, usize, usize) {
		let n = N - 1;
		let strips: [(Face, usize, usize); 4] = match layer {
			Layer::Right => [
				(Face::Front, i, n - d),
				(Face::Up, i, n - d),
				(Face::Back, n - i, d),
				(Face::Down, i, n - d),
			],
			Layer::Left | Layer::Middle => [
				(Face::Up, i, d),
				(Face::Front, i, d),
				(Face::Down, i, d),
				(Face::Back, n - i, n - d),
			],
			Layer::Up => [
				(Face::Front, d, i),
				(Face::Left, d, i),
				(Face::Back, d, i),
				(Face::Right, d, i),
			],
			Layer::Down | Layer::Equator => [
				(Face::Front, n - d, i),
				(Face::Right, n - d, i),
				(Face::Back, n - d, i),
				(Face::Left, n - d, i),
			],
			Layer::Front | Layer::Standing => [
				(Face::Up, n - d, i),
				(Face::Right, i, d),
				(Face::Down, d, n - i),
				(Face::Left, n - i, n - d),
			],
			Layer::Back => [
				(Face::Up, d, i),
				(Face::Left, n - i, d),
				(Face::Down, n - d, n - i),
				(Face::Right, i, n - d),
			],
		};
		strips[k]
	}

	/// Turn a single layer a quarter.
	fn quarter(&self, layer: Layer, clockwise: bool) -> Self {
		let depth = match layer.face() {
			Some(_) => 0,
			// The slice sits one layer inside its reference face
			None if N >= 3 => 1,
			None => return *self,
		};

		let mut out = *self;

		for k in 0..4 {
			let (from, to) = if clockwise { (k, (k + 1) % 4) } else { ((k + 1) % 4, k) };
			for i in 0..N {
				let (sf, sr, sc) = Self::border(layer, depth, from, i);
				let (df, dr, dc) = Self::border(layer, depth, to, i);
				out.faces[df as usize][dr][dc] = self.faces[sf as usize][sr][sc];
			}
		}

		if let Some(face) = layer.face() {
			let n = N - 1;
			let src = &self.faces[face as usize];
			let dst = &mut out.faces[face as usize];
			for r in 0..N {
				for c in 0..N {
					dst[r][c] = if clockwise { src[n - c][r] } else { src[c][n - r] };
				}
			}
		}

		out
	}

	// ===== Display =====

	fn net_rows<F>(&self, cell: F, gap: &str, indent: &str) -> String
	where
		F: Fn(Color) -> String,
	{
		let mut out = String::new();
		let row = |face: Face, r: usize| -> String { self.faces[face as usize][r].iter().map(|c| cell(*c)).collect() };

		for r in 0..N {
			out += &format!("{}{}\n", indent, row(Face::Up, r));
		}
		for r in 0..N {
			let middle: Vec<String> = [Face::Left, Face::Front, Face::Right, Face::Back]
				.into_iter()
				.map(|face| row(face, r))
				.collect();
			out += &format!("{}\n", middle.join(gap));
		}
		for r in 0..N {
			out += &format!("{}{}\n", indent, row(Face::Down, r));
		}
		out
	}

	/// The unfolded net with one letter per facelet.
	pub fn net_string(&self) -> String {
		let indent = " ".repeat(N + 1);
		self.net_rows(|c| c.to_string(), " ", &indent)
	}

	/// The unfolded net with xterm-256 colored blocks.
	pub fn colored_net(&self) -> String {
		let indent = " ".repeat(2 * N);
		self.net_rows(|c| get_ansii_color(c).to_string(), "", &indent)
	}

	/// Print the cube in the *standard output* with ANSI-colors
	pub fn print(&self) {
		println!("{}", self.colored_net());
	}
}

/// A random generator, seeded when a seed is given and from the OS otherwise.
pub fn scramble_rng(seed: Option<u64>) -> StdRng {
	match seed {
		Some(seed) => StdRng::seed_from_u64(seed),
		None => StdRng::from_entropy(),
	}
}

/// Draw a random sequence of quarter face turns, in which no turn directly undoes
/// the previous one and no turn appears three times in a row.
pub fn scramble_sequence<R>(rng: &mut R, length: usize) -> Vec<Turn>
where
	R: Rng + ?Sized,
{
	let mut out: Vec<Turn> = Vec::with_capacity(length);

	while out.len() < length {
		let turn = SCRAMBLE_TURNS[rng.gen_range(0..SCRAMBLE_TURNS.len())];

		let undoes_previous = out.last().is_some_and(|t| *t == turn.inverse());
		let third_repeat = out.len() >= 2 && out[out.len() - 2..].iter().all(|t| *t == turn);

		if !undoes_previous && !third_repeat {
			out.push(turn);
		}
	}

	out
}

// =========

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum FromStrError {
	#[error("Expected {expected} facelets, found {found}")]
	Length { expected: usize, found: usize },
	#[error("\"{0}\" is not a color")]
	Color(String),
	#[error("The color {color} appears {found} times instead of {expected}")]
	ColorCount { color: Color, expected: usize, found: usize },
}

impl<const N: usize> FromStr for ArrayCube<N> {
	type Err = FromStrError;

	/// Read the facelets as whitespace separated color tokens,
	/// face by face (in `Face` order), row by row.
	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let tokens: Vec<&str> = s.split_whitespace().collect();
		let expected = NUM_SIDES * N * N;
		if tokens.len() != expected {
			return Err(FromStrError::Length { expected, found: tokens.len() });
		}

		let mut cube = Self::new();
		for (i, token) in tokens.into_iter().enumerate() {
			let color = Color::from_str(token).map_err(|_| FromStrError::Color(token.to_string()))?;
			cube.faces[i / (N * N)][(i / N) % N][i % N] = color;
		}

		for (color, found) in Color::iter().zip(cube.color_counts()) {
			if found != N * N {
				return Err(FromStrError::ColorCount { color, expected: N * N, found });
			}
		}

		Ok(cube)
	}
}

impl<const N: usize> std::fmt::Display for ArrayCube<N> {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		let tokens: Vec<String> = self.faces.iter().flatten().flatten().map(|c| c.to_string()).collect();
		write!(f, "{}", tokens.join(" "))
	}
}

// ===== Tests =====

#[cfg(test)]
mod tests {
	use super::*;
	use std::error::Error;

	#[test]
	fn solved_cube() {
		let cube = Cube3::new();
		assert!(cube.is_solved());
		assert_eq!(cube.size(), 3);
		assert_eq!(cube.color_counts(), [CUBE_AREA; NUM_SIDES]);
		for face in Face::iter() {
			assert_eq!(cube.center(face), face.home_color());
		}
	}

	#[test]
	/// Turning right moves the front column up
	fn right_turn_moves_front_to_up() -> Result<(), Box<dyn Error>> {
		let cube = Cube3::new().apply(Turn::from_str("R")?);

		for r in 0..3 {
			assert_eq!(cube.facelet(Face::Up, r, 2), Color::Blue);
			assert_eq!(cube.facelet(Face::Front, r, 2), Color::White);
			assert_eq!(cube.facelet(Face::Down, r, 2), Color::Green);
			assert_eq!(cube.facelet(Face::Back, r, 0), Color::Yellow);
			assert_eq!(cube.facelet(Face::Up, r, 0), Color::Yellow);
		}
		assert!(cube.face(Face::Right).iter().flatten().all(|c| *c == Color::Red));
		Ok(())
	}

	#[test]
	/// Turning up moves the front row to the left
	fn up_turn_moves_front_to_left() -> Result<(), Box<dyn Error>> {
		let cube = Cube3::new().apply(Turn::from_str("U")?);

		for c in 0..3 {
			assert_eq!(cube.facelet(Face::Left, 0, c), Color::Blue);
			assert_eq!(cube.facelet(Face::Back, 0, c), Color::Orange);
			assert_eq!(cube.facelet(Face::Right, 0, c), Color::Green);
			assert_eq!(cube.facelet(Face::Front, 0, c), Color::Red);
			assert_eq!(cube.facelet(Face::Front, 1, c), Color::Blue);
		}
		Ok(())
	}

	#[test]
	/// The face grid itself turns with the layer
	fn face_grid_rotates() -> Result<(), Box<dyn Error>> {
		let cube = Cube3::new().apply_turns(&parse_turns("R F")?);
		assert_eq!(cube.facelet(Face::Front, 0, 0), Color::Blue);
		// R put white on the front right column, F carries it to the bottom row of Front
		assert_eq!(cube.facelet(Face::Front, 2, 0), Color::White);
		assert_eq!(cube.facelet(Face::Front, 2, 2), Color::White);
		assert_eq!(cube.facelet(Face::Front, 2, 1), Color::White);
		Ok(())
	}

	#[test]
	fn slices_do_not_touch_faces() -> Result<(), Box<dyn Error>> {
		for s in ["M", "E", "S"] {
			let cube = Cube3::new().apply(Turn::from_str(s)?);
			assert!(!cube.is_solved());
			for face in Face::iter() {
				assert_eq!(cube.facelet(face, 0, 0), face.home_color(), "{} moved a corner", s);
			}
		}
		Ok(())
	}

	#[test]
	fn cube_string_conversion() -> Result<(), Box<dyn Error>> {
		let mut rng = scramble_rng(Some(3));
		let (cube, _) = Cube3::new().scramble(&mut rng);

		let s = cube.to_string();
		assert_eq!(s.split_whitespace().count(), NUM_SIDES * CUBE_AREA);
		assert_eq!(Cube3::from_str(&s)?, cube);
		Ok(())
	}

	#[test]
	fn parse_digits() -> Result<(), Box<dyn Error>> {
		let s = ["0", "3", "4", "1", "2", "5"].map(|d| vec![d; 9].join(" ")).join(" ");
		assert_eq!(Cube3::from_str(&s)?, Cube3::new());
		Ok(())
	}

	#[test]
	fn parse_errors() {
		let solved = Cube3::new().to_string();

		assert_eq!(
			Cube3::from_str("W W W"),
			Err(FromStrError::Length { expected: 54, found: 3 })
		);

		let wrong_token = solved.replacen('W', "Q", 1);
		assert_eq!(Cube3::from_str(&wrong_token), Err(FromStrError::Color("Q".to_string())));

		let wrong_count = solved.replacen('W', "G", 1);
		assert_eq!(
			Cube3::from_str(&wrong_count),
			Err(FromStrError::ColorCount { color: Color::White, expected: 9, found: 8 })
		);
	}

	#[test]
	fn scramble_validity() {
		for seed in 0..50 {
			let mut rng = scramble_rng(Some(seed));
			let (cube, turns) = Cube3::new().scramble(&mut rng);

			assert_eq!(turns.len(), SCRAMBLE_LENGTH);
			assert!(turns.iter().all(|t| SCRAMBLE_TURNS.contains(t)));
			for w in turns.windows(2) {
				assert_ne!(w[1], w[0].inverse());
			}
			for w in turns.windows(3) {
				assert!(!(w[0] == w[1] && w[1] == w[2]));
			}
			assert_eq!(cube, Cube3::new().apply_turns(&turns));
		}
	}

	#[test]
	fn scramble_is_reproducible() {
		let a = Cube3::new().scramble(&mut scramble_rng(Some(42)));
		let b = Cube3::new().scramble(&mut scramble_rng(Some(42)));
		assert_eq!(a, b);

		let (_, unseeded) = Cube3::new().scramble(&mut scramble_rng(None));
		assert_eq!(unseeded.len(), SCRAMBLE_LENGTH);
	}

	#[test]
	fn net_layout() {
		let net = Cube3::new().net_string();
		let lines: Vec<&str> = net.lines().collect();
		assert_eq!(lines.len(), 9);
		assert_eq!(lines[0], "    YYY");
		assert_eq!(lines[3], "OOO BBB RRR GGG");
		assert_eq!(lines[8], "    WWW");
		assert!(Cube3::new().colored_net().contains("\x1b[48;5;"));
	}

	#[test]
	/// Face turns work on any size
	fn bigger_cube() -> Result<(), Box<dyn Error>> {
		let cube = ArrayCube::<4>::new();
		for turn in parse_turns("R U F' L2 D B'")? {
			let turned = cube.apply(turn);
			assert_eq!(turned.color_counts(), [16; NUM_SIDES]);
			assert_eq!(turned.apply(turn.inverse()), cube);
		}
		let cube = cube.apply_turns(&parse_turns("R U R' U' R U R' U' R U R' U' R U R' U' R U R' U' R U R' U'")?);
		assert!(cube.is_solved());
		Ok(())
	}

	#[test]
	fn two_by_two_slices_are_no_ops() -> Result<(), Box<dyn Error>> {
		let cube = ArrayCube::<2>::new().apply(Turn::from_str("R")?);
		assert_eq!(cube.apply(Turn::from_str("M")?), cube);
		Ok(())
	}
}
