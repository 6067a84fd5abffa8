use std::rc::Rc;

use crate::cube::{arraycube::Cube3, turn::Turn};
use crate::solve::node::{find_path, Node};

/// Result of one bounded depth first search
enum Probe {
	Found,
	/// The smallest estimate that went over the bound
	Exceeded(u32),
	/// Nothing is left below any bound
	Exhausted,
}

struct Search<'a, H> {
	heuristic: &'a H,
	path: Vec<Rc<Node>>,
	expanded: usize,
}

impl<H> Search<'_, H>
where
	H: Fn(&Cube3) -> u32,
{
	fn probe(&mut self, g: u32, bound: u32) -> Probe {
		let Some(node) = self.path.last().cloned() else {
			return Probe::Exhausted;
		};
		self.expanded += 1;

		let h = (self.heuristic)(&node.cube);
		if h == 0 {
			return Probe::Found;
		}

		let f = g + h;
		if f > bound {
			return Probe::Exceeded(f);
		}

		let mut min: Option<u32> = None;

		for turn in node.next_turns() {
			let child = node.child(turn);
			// Avoid cycles on the current branch only
			if self.path.iter().any(|n| **n == *child) {
				continue;
			}

			self.path.push(child);
			match self.probe(g + 1, bound) {
				Probe::Found => return Probe::Found,
				Probe::Exceeded(t) => min = Some(min.map_or(t, |m| m.min(t))),
				Probe::Exhausted => {}
			}
			self.path.pop();
		}

		match min {
			Some(t) => Probe::Exceeded(t),
			None => Probe::Exhausted,
		}
	}
}

/// Iterative deepening A* from the given cube to a state where the heuristic is zero.
///
/// Returns the turns leading there, or None if the search space runs out.
pub fn ida_star<H>(cube: Cube3, heuristic: H) -> Option<Vec<Turn>>
where
	H: Fn(&Cube3) -> u32,
{
	let mut search = Search {
		heuristic: &heuristic,
		path: vec![Node::root(cube)],
		expanded: 0,
	};
	let mut bound = heuristic(&cube);

	loop {
		match search.probe(0, bound) {
			Probe::Found => {
				log::debug!("Found a path at bound {} after {} nodes", bound, search.expanded);
				return search.path.last().map(|node| find_path(node));
			}
			Probe::Exceeded(next) => {
				log::debug!("Raising the bound from {} to {} after {} nodes", bound, next, search.expanded);
				bound = next;
			}
			Probe::Exhausted => {
				log::debug!("Search space exhausted after {} nodes", search.expanded);
				return None;
			}
		}
	}
}
