use std::str::FromStr;

use const_for::const_for;
use strum::{EnumCount, IntoEnumIterator};

use crate::cube::Face;

/// Total number of sides, slices, wide layers and rotation axes you can turn
pub const NUM_TURNSIDES: usize = TurnSide::COUNT;
/// Total number of ways to adjust your turn
pub const NUM_TURNWISES: usize = TurnWise::COUNT;
/// Total number of distinct turns
pub const NUM_TURNS: usize = NUM_TURNSIDES * NUM_TURNWISES;

/// What a turn moves.
/// The first nine are primitive layers, everything after is composed out of them.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[derive(strum::EnumIter, strum::EnumCount)]
#[repr(u8)]
pub enum TurnSide {
	Up,
	Down,
	Back,
	Front,
	Left,
	Right,
	SliceM, // The slice between left and right, turning like L
	SliceE, // The slice between up and down, turning like D
	SliceS, // The slice between front and back, turning like F
	WideUp,
	WideDown,
	WideBack,
	WideFront,
	WideLeft,
	WideRight,
	X, // Whole cube, turning like R
	Y, // Whole cube, turning like U
	Z, // Whole cube, turning like F
}

impl TurnSide {
	/// The notation letter of the side
	pub const fn letter(self) -> char {
		match self {
			TurnSide::Up => 'U',
			TurnSide::Down => 'D',
			TurnSide::Back => 'B',
			TurnSide::Front => 'F',
			TurnSide::Left => 'L',
			TurnSide::Right => 'R',
			TurnSide::SliceM => 'M',
			TurnSide::SliceE => 'E',
			TurnSide::SliceS => 'S',
			TurnSide::WideUp => 'u',
			TurnSide::WideDown => 'd',
			TurnSide::WideBack => 'b',
			TurnSide::WideFront => 'f',
			TurnSide::WideLeft => 'l',
			TurnSide::WideRight => 'r',
			TurnSide::X => 'x',
			TurnSide::Y => 'y',
			TurnSide::Z => 'z',
		}
	}

	pub fn from_letter(c: char) -> Option<Self> {
		TurnSide::iter().find(|side| side.letter() == c)
	}
}

/// You can either turn a side in (Counter-)Clockwise and Half turns
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[derive(strum::EnumIter, strum::EnumCount)]
#[repr(u8)]
pub enum TurnWise {
	Clockwise,
	Double,
	CounterClockwise,
}

impl std::fmt::Display for TurnWise {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		match self {
			TurnWise::Clockwise => write!(f, ""),
			TurnWise::CounterClockwise => write!(f, "'"),
			TurnWise::Double => write!(f, "2"),
		}
	}
}

/// An entire turn
///
/// side: The side (or slice, wide layer, axis) to turn
/// wise: See the definition of TurnWise
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Turn {
	pub side: TurnSide,
	pub wise: TurnWise,
}

const fn turn(side: TurnSide, wise: TurnWise) -> Turn {
	Turn { side, wise }
}

/// The twelve quarter face turns the solver searches with, in expansion order.
#[rustfmt::skip]
pub const SEARCH_TURNS: [Turn; 12] = {
	use TurnSide::*;
	use TurnWise::*;
	[
		turn(Right, Clockwise), turn(Right, CounterClockwise),
		turn(Up, Clockwise), turn(Up, CounterClockwise),
		turn(Front, Clockwise), turn(Front, CounterClockwise),
		turn(Left, Clockwise), turn(Left, CounterClockwise),
		turn(Down, Clockwise), turn(Down, CounterClockwise),
		turn(Back, Clockwise), turn(Back, CounterClockwise),
	]
};

/// The twelve quarter face turns scrambles are drawn from.
#[rustfmt::skip]
pub const SCRAMBLE_TURNS: [Turn; 12] = {
	use TurnSide::*;
	use TurnWise::*;
	[
		turn(Up, Clockwise), turn(Up, CounterClockwise),
		turn(Right, Clockwise), turn(Right, CounterClockwise),
		turn(Left, Clockwise), turn(Left, CounterClockwise),
		turn(Down, Clockwise), turn(Down, CounterClockwise),
		turn(Front, Clockwise), turn(Front, CounterClockwise),
		turn(Back, Clockwise), turn(Back, CounterClockwise),
	]
};

impl Turn {
	/// Iterate over all turns, side by side.
	pub fn iter() -> impl Iterator<Item = Turn> {
		TurnSide::iter().flat_map(|side| TurnWise::iter().map(move |wise| Turn { side, wise }))
	}

	/// The turn which negates this one.
	pub const fn inverse(self) -> Self {
		let wise = match self.wise {
			TurnWise::Clockwise => TurnWise::CounterClockwise,
			TurnWise::CounterClockwise => TurnWise::Clockwise,
			TurnWise::Double => TurnWise::Double,
		};
		Turn { side: self.side, wise }
	}

	/// Whether this is one of the quarter turns of an outer face.
	pub const fn is_basic(self) -> bool {
		(self.side as u8) <= TurnSide::Right as u8 && !matches!(self.wise, TurnWise::Double)
	}

	/// The primitive quarter layer turns this turn is made of.
	pub fn recipe(self) -> &'static Recipe {
		&RECIPES[self.side as usize][self.wise as usize]
	}
}

impl std::fmt::Display for Turn {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		write!(f, "{}{}", self.side.letter(), self.wise)
	}
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ParseTurnError {
	#[error("\"{0}\" is not a valid turn")]
	Invalid(String),
}

impl FromStr for Turn {
	type Err = ParseTurnError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let invalid = || ParseTurnError::Invalid(s.to_string());

		let mut chars = s.chars();
		let side = chars.next().and_then(TurnSide::from_letter).ok_or_else(invalid)?;
		let wise = match chars.as_str() {
			"" => TurnWise::Clockwise,
			"'" => TurnWise::CounterClockwise,
			"2" => TurnWise::Double,
			_ => return Err(invalid()),
		};

		Ok(Self { side, wise })
	}
}

/// Parse a whitespace separated sequence of turns.
pub fn parse_turns<T>(string: T) -> Result<Vec<Turn>, ParseTurnError>
where
	T: AsRef<str>,
{
	string.as_ref().split_whitespace().map(Turn::from_str).collect()
}

/// Write a sequence of turns the way `parse_turns` reads it.
pub fn format_turns(turns: &[Turn]) -> String {
	turns.iter().map(Turn::to_string).collect::<Vec<_>>().join(" ")
}

/// The sequence that undoes the given one.
pub fn invert_turns(turns: &[Turn]) -> Vec<Turn> {
	turns.iter().rev().map(|t| t.inverse()).collect()
}

/// Merge following turns of the same side into one, dropping those that cancel out.
pub fn simplify_turns(turns: &[Turn]) -> Vec<Turn> {
	let mut out: Vec<Turn> = vec![];

	for &turn in turns {
		if let Some(t) = out.last() {
			if t.side == turn.side {
				// Quarter counts: Clockwise = 1, Double = 2, CounterClockwise = 3
				let new = (t.wise as usize + turn.wise as usize + 2) % (NUM_TURNWISES + 1);
				let idx = out.len() - 1;
				match new {
					0 => {
						out.pop();
					}
					1 => out[idx].wise = TurnWise::Clockwise,
					2 => out[idx].wise = TurnWise::Double,
					_ => out[idx].wise = TurnWise::CounterClockwise,
				}
				continue;
			}
		}

		out.push(turn);
	}

	out
}

// ===== Composition =====

/// A layer which has its own permutation routine.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[repr(u8)]
pub enum Layer {
	Up,
	Down,
	Back,
	Front,
	Left,
	Right,
	Middle,
	Equator,
	Standing,
}

impl Layer {
	/// The face whose grid rotates along with the layer, if any.
	pub const fn face(self) -> Option<Face> {
		match self {
			Layer::Up => Some(Face::Up),
			Layer::Down => Some(Face::Down),
			Layer::Back => Some(Face::Back),
			Layer::Front => Some(Face::Front),
			Layer::Left => Some(Face::Left),
			Layer::Right => Some(Face::Right),
			Layer::Middle | Layer::Equator | Layer::Standing => None,
		}
	}
}

/// A quarter turn of a single layer.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Quarter {
	pub layer: Layer,
	pub clockwise: bool,
}

/// Longest recipe: a double whole cube rotation (outer, slice, opposite outer) twice.
pub const MAX_RECIPE_LEN: usize = 6;

/// A fixed sequence of quarter layer turns.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Recipe {
	quarters: [Quarter; MAX_RECIPE_LEN],
	len: usize,
}

impl Recipe {
	const EMPTY: Recipe = Recipe {
		quarters: [Quarter { layer: Layer::Up, clockwise: true }; MAX_RECIPE_LEN],
		len: 0,
	};

	const fn single(layer: Layer, clockwise: bool) -> Self {
		let mut out = Self::EMPTY;
		out.quarters[0] = Quarter { layer, clockwise };
		out.len = 1;
		out
	}

	/// First self, then other.
	const fn then(self, other: Recipe) -> Self {
		let mut out = self;
		const_for!(i in 0..other.len => {
			out.quarters[out.len] = other.quarters[i];
			out.len += 1;
		});
		out
	}

	/// Every quarter turned the other way.
	/// The quarters of a recipe act on different layers, so the order can stay.
	const fn inverted(self) -> Self {
		let mut out = self;
		const_for!(i in 0..self.len => {
			out.quarters[i].clockwise = !self.quarters[i].clockwise;
		});
		out
	}

	pub fn quarters(&self) -> &[Quarter] {
		&self.quarters[..self.len]
	}
}

/// How the clockwise turn of each side is built.
const fn clockwise_recipe(side: TurnSide) -> Recipe {
	use Layer::*;

	match side {
		TurnSide::Up => Recipe::single(Up, true),
		TurnSide::Down => Recipe::single(Down, true),
		TurnSide::Back => Recipe::single(Back, true),
		TurnSide::Front => Recipe::single(Front, true),
		TurnSide::Left => Recipe::single(Left, true),
		TurnSide::Right => Recipe::single(Right, true),
		TurnSide::SliceM => Recipe::single(Middle, true),
		TurnSide::SliceE => Recipe::single(Equator, true),
		TurnSide::SliceS => Recipe::single(Standing, true),

		// Outer layer plus the neighbouring slice in the same sense
		TurnSide::WideUp => Recipe::single(Up, true).then(Recipe::single(Equator, false)),
		TurnSide::WideDown => Recipe::single(Down, true).then(Recipe::single(Equator, true)),
		TurnSide::WideBack => Recipe::single(Back, true).then(Recipe::single(Standing, false)),
		TurnSide::WideFront => Recipe::single(Front, true).then(Recipe::single(Standing, true)),
		TurnSide::WideLeft => Recipe::single(Left, true).then(Recipe::single(Middle, true)),
		TurnSide::WideRight => Recipe::single(Right, true).then(Recipe::single(Middle, false)),

		// Wide layer plus the opposite outer layer against it
		TurnSide::X => clockwise_recipe(TurnSide::WideRight).then(Recipe::single(Left, false)),
		TurnSide::Y => clockwise_recipe(TurnSide::WideUp).then(Recipe::single(Down, false)),
		TurnSide::Z => clockwise_recipe(TurnSide::WideFront).then(Recipe::single(Back, false)),
	}
}

const fn generate_recipe_table() -> [[Recipe; NUM_TURNWISES]; NUM_TURNSIDES] {
	#[rustfmt::skip]
	const SIDES: [TurnSide; NUM_TURNSIDES] = {
		use TurnSide::*;
		[
			Up, Down, Back, Front, Left, Right,
			SliceM, SliceE, SliceS,
			WideUp, WideDown, WideBack, WideFront, WideLeft, WideRight,
			X, Y, Z,
		]
	};

	let mut out = [[Recipe::EMPTY; NUM_TURNWISES]; NUM_TURNSIDES];

	const_for!(i in 0..NUM_TURNSIDES => {
		let cw = clockwise_recipe(SIDES[i]);
		out[i][TurnWise::Clockwise as usize] = cw;
		out[i][TurnWise::Double as usize] = cw.then(cw);
		out[i][TurnWise::CounterClockwise as usize] = cw.inverted();
	});

	out
}

/// The recipes, sorted by side and wise
pub const RECIPES: [[Recipe; NUM_TURNWISES]; NUM_TURNSIDES] = generate_recipe_table();
