use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};
use std::fmt;

use crate::scc;
use crate::transitions::{SparseTransitions, Transition, Transitions};
use crate::{State, Symbol, EPSILON};

/// A finite automaton over integer states and symbols.
///
/// States are not allocated up front: a state is known once it is the
/// endpoint of a transition (or was registered with `add_state`), and it is
/// forgotten, together with its start/final marking, when the last transition
/// touching it is removed.
#[derive(Clone, Debug, Default)]
pub struct FiniteAutomaton<T = SparseTransitions> {
    pub(crate) transitions: T,
    // State -> number of transition endpoints (and anchors) referring to it
    pub(crate) states: HashMap<State, usize>,
    // Symbol -> number of transitions labelled with it
    pub(crate) symbols: HashMap<Symbol, usize>,
    pub(crate) start_states: HashSet<State>,
    pub(crate) final_states: HashSet<State>,
    // states registered through `add_state`, each holding one reference
    pub(crate) anchored: HashSet<State>,
}

pub type NFA = FiniteAutomaton<SparseTransitions>;

impl<T: Transitions> FiniteAutomaton<T> {
    pub fn new() -> Self {
        FiniteAutomaton {
            transitions: T::default(),
            states: HashMap::new(),
            symbols: HashMap::new(),
            start_states: HashSet::new(),
            final_states: HashSet::new(),
            anchored: HashSet::new(),
        }
    }

    /// Returns false if the transition already existed.
    pub fn add_transition(&mut self, from: State, on: Symbol, to: State) -> bool {
        if !self.transitions.insert(from, on, to) {
            return false;
        }
        *self.states.entry(from).or_insert(0) += 1;
        *self.states.entry(to).or_insert(0) += 1;
        *self.symbols.entry(on).or_insert(0) += 1;
        true
    }

    /// Returns false if there was no such transition.
    pub fn remove_transition(&mut self, from: State, on: Symbol, to: State) -> bool {
        if !self.transitions.remove(from, on, to) {
            return false;
        }
        self.release_state(from);
        self.release_state(to);
        if let Entry::Occupied(mut count) = self.symbols.entry(on) {
            *count.get_mut() -= 1;
            if *count.get() == 0 {
                count.remove();
            }
        }
        true
    }

    /// Registers a state without transitions.
    ///
    /// The state keeps one extra reference, so removing transitions never
    /// forgets it. Returns false if the state was already known.
    pub fn add_state(&mut self, state: State) -> bool {
        if self.contains_state(state) {
            return false;
        }
        self.anchor(state);
        true
    }

    /// Pins `state`, known or not, with one reference that transition
    /// removal never releases. Anchoring twice has no effect.
    pub(crate) fn anchor(&mut self, state: State) {
        if self.anchored.insert(state) {
            *self.states.entry(state).or_insert(0) += 1;
        }
    }

    pub(crate) fn anchored_states(&self) -> impl Iterator<Item = State> + '_ {
        self.anchored.iter().cloned()
    }

    fn release_state(&mut self, state: State) {
        if let Entry::Occupied(mut count) = self.states.entry(state) {
            *count.get_mut() -= 1;
            if *count.get() == 0 {
                count.remove();
                self.start_states.remove(&state);
                self.final_states.remove(&state);
            }
        }
    }

    /// Fails without effect when `state` is unknown.
    pub fn set_start(&mut self, state: State, is_start: bool) -> bool {
        if !self.contains_state(state) {
            return false;
        }
        if is_start {
            self.start_states.insert(state);
        } else {
            self.start_states.remove(&state);
        }
        true
    }

    /// Fails without effect when `state` is unknown.
    pub fn set_final(&mut self, state: State, is_final: bool) -> bool {
        if !self.contains_state(state) {
            return false;
        }
        if is_final {
            self.final_states.insert(state);
        } else {
            self.final_states.remove(&state);
        }
        true
    }

    pub fn set_state(&mut self, state: State, is_start: bool, is_final: bool) -> bool {
        self.set_start(state, is_start) && self.set_final(state, is_final)
    }

    pub fn contains_state(&self, state: State) -> bool {
        self.states.contains_key(&state)
    }

    pub fn is_start(&self, state: State) -> bool {
        self.start_states.contains(&state)
    }

    pub fn is_final(&self, state: State) -> bool {
        self.final_states.contains(&state)
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn state_count(&self) -> usize {
        self.states.len()
    }

    pub fn start_state_count(&self) -> usize {
        self.start_states.len()
    }

    pub fn final_state_count(&self) -> usize {
        self.final_states.len()
    }

    /// Size of the alphabet, epsilon excluded.
    pub fn symbol_count(&self) -> usize {
        self.symbols().count()
    }

    pub fn transition_count(&self) -> usize {
        self.transitions.len()
    }

    pub fn max_state(&self) -> Option<State> {
        self.states.keys().max().cloned()
    }

    pub fn states(&self) -> impl Iterator<Item = State> + '_ {
        self.states.keys().cloned()
    }

    pub fn start_states(&self) -> impl Iterator<Item = State> + '_ {
        self.start_states.iter().cloned()
    }

    pub fn final_states(&self) -> impl Iterator<Item = State> + '_ {
        self.final_states.iter().cloned()
    }

    /// The alphabet, epsilon excluded.
    pub fn symbols(&self) -> impl Iterator<Item = Symbol> + '_ {
        self.symbols.keys().cloned().filter(|&symbol| symbol != EPSILON)
    }

    pub fn transitions(&self) -> impl Iterator<Item = Transition> + '_ {
        self.transitions.iter()
    }

    pub fn next_states(&self, from: State, on: Symbol) -> Option<&HashSet<State>> {
        self.transitions.get(from, on)
    }

    /// True iff the transition graph, symbols ignored, has no cycle.
    pub fn is_acyclic(&self) -> bool {
        let index: HashMap<State, usize> = self
            .states
            .keys()
            .enumerate()
            .map(|(i, &state)| (state, i))
            .collect();
        let mut graph = vec![Vec::new(); index.len()];
        for (from, _, to) in self.transitions.iter() {
            if from == to {
                return false;
            }
            graph[index[&from]].push(index[&to]);
        }
        scc::sccs(&graph).iter().all(|scc| scc.len() == 1)
    }
}

fn fmt_symbol(f: &mut fmt::Formatter, symbol: Symbol) -> fmt::Result {
    if symbol == EPSILON {
        return write!(f, "ε");
    }
    match ::std::char::from_u32(symbol as u32) {
        Some(c) if symbol >= 0 && !c.is_control() && !c.is_whitespace() => write!(f, "{}", c),
        _ => write!(f, "{}", symbol),
    }
}

impl<T: Transitions> fmt::Display for FiniteAutomaton<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut states: Vec<State> = self.states().collect();
        states.sort();
        let mut transitions: Vec<Transition> = self.transitions().collect();
        transitions.sort();

        for state in states {
            write!(f, "{} -> [", state)?;
            let outgoing = transitions.iter().filter(|&&(from, _, _)| from == state);
            let mut first = true;
            for &(_, on, to) in outgoing {
                if first {
                    writeln!(f)?;
                    first = false;
                }
                write!(f, "  ")?;
                fmt_symbol(f, on)?;
                writeln!(f, " -> {},", to)?;
            }
            write!(f, "]")?;
            if self.is_start(state) {
                write!(f, " -- start state")?;
            }
            if self.is_final(state) {
                write!(f, " -- final state")?;
            }
            writeln!(f, ",")?;
        }
        Ok(())
    }
}
