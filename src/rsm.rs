//! Recursive state machines: component automata ("boxes") registered under
//! symbol labels, one of which is the entry.
//!
//! The registry does not interpret labels that appear as transition symbols
//! inside the boxes; that is up to whatever evaluates the machine.

use std::collections::HashMap;

use crate::automaton::FiniteAutomaton;
use crate::transitions::{SparseTransitions, Transitions};
use crate::Symbol;

#[derive(Clone, Debug, Default)]
pub struct RecursiveAutomaton<T = SparseTransitions> {
    boxes: HashMap<Symbol, FiniteAutomaton<T>>,
    init_label: Option<Symbol>,
}

pub type RSM = RecursiveAutomaton<SparseTransitions>;

impl<T: Transitions> RecursiveAutomaton<T> {
    pub fn new() -> Self {
        RecursiveAutomaton {
            boxes: HashMap::new(),
            init_label: None,
        }
    }

    /// The label does not need to have a box yet.
    pub fn set_init_label(&mut self, label: Symbol) {
        self.init_label = Some(label);
    }

    pub fn init_label(&self) -> Option<Symbol> {
        self.init_label
    }

    /// The box of the init label, if both are set.
    pub fn init_box(&self) -> Option<&FiniteAutomaton<T>> {
        self.init_label.and_then(|label| self.get_box(label))
    }

    /// Returns true if an existing box was replaced, false for a new label.
    pub fn add_box(&mut self, label: Symbol, automaton: FiniteAutomaton<T>) -> bool {
        self.boxes.insert(label, automaton).is_some()
    }

    pub fn get_box(&self, label: Symbol) -> Option<&FiniteAutomaton<T>> {
        self.boxes.get(&label)
    }

    pub fn remove_box(&mut self, label: Symbol) -> Option<FiniteAutomaton<T>> {
        self.boxes.remove(&label)
    }

    pub fn labels(&self) -> impl Iterator<Item = Symbol> + '_ {
        self.boxes.keys().cloned()
    }

    pub fn len(&self) -> usize {
        self.boxes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }
}
