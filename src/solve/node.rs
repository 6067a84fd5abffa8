use std::{
	hash::{Hash, Hasher},
	rc::Rc,
};

use crate::cube::{arraycube::Cube3, turn::*};

/// A cube state on a search path, linked back to the state it was reached from.
///
/// Two nodes are equal when their cubes are, no matter how they were reached.
#[derive(Debug)]
pub struct Node {
	pub cube: Cube3,
	pub parent: Option<Rc<Node>>,
	/// The turn that leads from the parent to this node
	pub turn: Option<Turn>,
}

impl Node {
	pub fn root(cube: Cube3) -> Rc<Self> {
		Rc::new(Self { cube, parent: None, turn: None })
	}

	/// Apply the turn and link the result to this node.
	pub fn child(self: &Rc<Self>, turn: Turn) -> Rc<Self> {
		Rc::new(Self {
			cube: self.cube.apply(turn),
			parent: Some(Rc::clone(self)),
			turn: Some(turn),
		})
	}

	/// The basic turns worth trying from this node.
	///
	/// The inverse of the last turn is never tried. A counter-clockwise turn is not repeated,
	/// since two of them are spelled as two clockwise turns, and no turn is made a third time in a row.
	pub fn next_turns(&self) -> impl Iterator<Item = Turn> + '_ {
		let grand = self.parent.as_ref().and_then(|p| p.turn);

		SEARCH_TURNS.into_iter().filter(move |t| match self.turn {
			None => true,
			Some(last) => {
				*t != last.inverse()
					&& !(*t == last && last.wise == TurnWise::CounterClockwise)
					&& !(*t == last && grand == Some(last))
			}
		})
	}
}

impl PartialEq for Node {
	fn eq(&self, other: &Self) -> bool {
		self.cube == other.cube
	}
}

impl Eq for Node {}

impl Hash for Node {
	fn hash<H: Hasher>(&self, state: &mut H) {
		self.cube.hash(state);
	}
}

/// The turns leading from the root to the given node.
pub fn find_path(node: &Node) -> Vec<Turn> {
	let mut out = vec![];
	let mut current = Some(node);

	while let Some(n) = current {
		if let Some(turn) = n.turn {
			out.push(turn);
		}
		current = n.parent.as_deref();
	}

	out.reverse();
	out
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::{collections::HashSet, error::Error, str::FromStr};

	#[test]
	fn root_has_empty_path() {
		let root = Node::root(Cube3::new());
		assert!(find_path(&root).is_empty());
		assert_eq!(root.next_turns().count(), SEARCH_TURNS.len());
	}

	#[test]
	fn path_reads_from_root() -> Result<(), Box<dyn Error>> {
		let turns = parse_turns("R U' F2 D")?;
		let mut node = Node::root(Cube3::new());
		for turn in turns.iter() {
			node = node.child(*turn);
		}

		assert_eq!(find_path(&node), turns);
		assert_eq!(node.cube, Cube3::new().apply_turns(&turns));
		Ok(())
	}

	#[test]
	fn equality_ignores_history() -> Result<(), Box<dyn Error>> {
		let a = Node::root(Cube3::new()).child(Turn::from_str("U2")?);
		let b = Node::root(Cube3::new())
			.child(Turn::from_str("U")?)
			.child(Turn::from_str("U")?);
		assert_eq!(*a, *b);

		let mut set = HashSet::new();
		set.insert(a);
		assert!(set.contains(&b));
		Ok(())
	}

	#[test]
	fn pruned_turns() -> Result<(), Box<dyn Error>> {
		let r = Turn::from_str("R")?;
		let ri = Turn::from_str("R'")?;

		let after_r = Node::root(Cube3::new()).child(r);
		let next: Vec<Turn> = after_r.next_turns().collect();
		assert!(!next.contains(&ri));
		assert!(next.contains(&r));
		assert_eq!(next.len(), SEARCH_TURNS.len() - 1);

		let after_rr = after_r.child(r);
		let next: Vec<Turn> = after_rr.next_turns().collect();
		assert!(!next.contains(&r));
		assert!(!next.contains(&ri));

		let after_ri = Node::root(Cube3::new()).child(ri);
		let next: Vec<Turn> = after_ri.next_turns().collect();
		assert!(!next.contains(&r));
		assert!(!next.contains(&ri));
		assert_eq!(next.len(), SEARCH_TURNS.len() - 2);
		Ok(())
	}
}
