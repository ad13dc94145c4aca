use std::collections::{HashMap, HashSet};
use std::fmt::Debug;

use crate::{State, Symbol};

/// A single `(from, symbol, to)` edge.
pub type Transition = (State, Symbol, State);

/// Storage strategy for the transition function of a finite automaton.
///
/// The automaton only talks to its transitions through this trait, so a
/// different representation can be plugged in without touching the
/// bookkeeping in `FiniteAutomaton`.
pub trait Transitions: Clone + Debug + Default {
    /// Returns true if the transition was not there yet.
    fn insert(&mut self, from: State, on: Symbol, to: State) -> bool;

    /// Returns true if the transition was there and is now gone.
    fn remove(&mut self, from: State, on: Symbol, to: State) -> bool;

    /// The destinations of `from` on `on`, `None` when there are none.
    fn get(&self, from: State, on: Symbol) -> Option<&HashSet<State>>;

    /// Every `(state, symbol)` pair leads to at most one state.
    fn is_deterministic(&self) -> bool;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn iter(&self) -> Box<dyn Iterator<Item = Transition> + '_>;
}

/// Sparse nondeterministic transitions.
///
/// Empty symbol maps and empty destination sets are removed as soon as they
/// appear, so every entry holds at least one transition.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SparseTransitions {
    // State -> (Symbol -> Set<State>)
    transitions: HashMap<State, HashMap<Symbol, HashSet<State>>>,
}

impl SparseTransitions {
    pub fn new() -> Self {
        SparseTransitions {
            transitions: HashMap::new(),
        }
    }
}

impl Transitions for SparseTransitions {
    fn insert(&mut self, from: State, on: Symbol, to: State) -> bool {
        self.transitions
            .entry(from)
            .or_insert_with(HashMap::new)
            .entry(on)
            .or_insert_with(HashSet::new)
            .insert(to)
    }

    fn remove(&mut self, from: State, on: Symbol, to: State) -> bool {
        let by_symbol = match self.transitions.get_mut(&from) {
            Some(by_symbol) => by_symbol,
            None => return false,
        };
        let targets = match by_symbol.get_mut(&on) {
            Some(targets) => targets,
            None => return false,
        };
        if !targets.remove(&to) {
            return false;
        }
        if targets.is_empty() {
            by_symbol.remove(&on);
            if by_symbol.is_empty() {
                self.transitions.remove(&from);
            }
        }
        true
    }

    fn get(&self, from: State, on: Symbol) -> Option<&HashSet<State>> {
        self.transitions.get(&from).and_then(|by_symbol| by_symbol.get(&on))
    }

    fn is_deterministic(&self) -> bool {
        self.transitions
            .values()
            .flat_map(|by_symbol| by_symbol.values())
            .all(|targets| targets.len() <= 1)
    }

    fn len(&self) -> usize {
        self.transitions
            .values()
            .flat_map(|by_symbol| by_symbol.values())
            .map(|targets| targets.len())
            .sum()
    }

    fn iter(&self) -> Box<dyn Iterator<Item = Transition> + '_> {
        Box::new(self.transitions.iter().flat_map(|(&from, by_symbol)| {
            by_symbol
                .iter()
                .flat_map(move |(&on, targets)| targets.iter().map(move |&to| (from, on, to)))
        }))
    }
}
