pub mod arraycube;
pub mod turn;

use strum::EnumCount;

/// The dimension of the cube the solver works on
pub const CUBE_DIM: usize = 3;

/// The number of facelets per side
pub const CUBE_AREA: usize = CUBE_DIM * CUBE_DIM;

/// The number of sides of a cube
pub const NUM_SIDES: usize = Face::COUNT;

/// The faces of the cube, in storage order.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[derive(strum::EnumCount, strum::EnumIter, strum::FromRepr, strum::Display)]
#[repr(usize)]
pub enum Face {
	Down,
	Front,
	Right,
	Back,
	Left,
	Up,
}

impl Face {
	/// The color this face carries on a solved cube.
	pub const fn home_color(self) -> Color {
		match self {
			Face::Down => Color::White,
			Face::Front => Color::Blue,
			Face::Right => Color::Red,
			Face::Back => Color::Green,
			Face::Left => Color::Orange,
			Face::Up => Color::Yellow,
		}
	}
}

/// A facelet color.
/// Parses from its letter or from its digit, prints as its letter.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[derive(strum::EnumCount, strum::EnumIter, strum::EnumString, strum::Display, strum::FromRepr)]
#[repr(u8)]
pub enum Color {
	#[strum(to_string = "W", serialize = "0")]
	White,
	#[strum(to_string = "G", serialize = "1")]
	Green,
	#[strum(to_string = "O", serialize = "2")]
	Orange,
	#[strum(to_string = "B", serialize = "3")]
	Blue,
	#[strum(to_string = "R", serialize = "4")]
	Red,
	#[strum(to_string = "Y", serialize = "5")]
	Yellow,
}

/// Returns the xterm-256 background block for the given color.
pub fn get_ansii_color(color: Color) -> &'static str {
	match color {
		Color::White => "\x1b[48;5;254m  \x1b[0m",
		Color::Green => "\x1b[48;5;10m  \x1b[0m",
		Color::Orange => "\x1b[48;5;208m  \x1b[0m",
		Color::Blue => "\x1b[48;5;12m  \x1b[0m",
		Color::Red => "\x1b[48;5;9m  \x1b[0m",
		Color::Yellow => "\x1b[48;5;11m  \x1b[0m",
	}
}
