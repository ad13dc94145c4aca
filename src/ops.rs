//! Union, concatenation and Kleene star.
//!
//! The binary operations renumber the states of `other` by an offset one past
//! the largest state of the receiver, so the two state spaces never collide.
//! `other` is only read.

use crate::automaton::FiniteAutomaton;
use crate::transitions::Transitions;
use crate::{State, EPSILON};

impl<T: Transitions> FiniteAutomaton<T> {
    fn offset(&self) -> State {
        self.max_state().map_or(0, |max| max + 1)
    }

    /// Copies the states, anchors and transitions of `other`, shifted by `offset`.
    fn copy_shifted<U: Transitions>(&mut self, other: &FiniteAutomaton<U>, offset: State) {
        for (from, on, to) in other.transitions() {
            self.add_transition(from + offset, on, to + offset);
        }
        // every state without transitions is anchored
        for state in other.anchored_states() {
            self.anchor(state + offset);
        }
    }

    /// L(self) ∪ L(other)
    pub fn union<U: Transitions>(&mut self, other: &FiniteAutomaton<U>) {
        let offset = self.offset();
        self.copy_shifted(other, offset);
        for state in other.start_states() {
            self.set_start(state + offset, true);
        }
        for state in other.final_states() {
            self.set_final(state + offset, true);
        }
    }

    /// L(self) · L(other)
    pub fn concatenate<U: Transitions>(&mut self, other: &FiniteAutomaton<U>) {
        let offset = self.offset();
        self.copy_shifted(other, offset);
        let finals: Vec<State> = self.final_states().collect();
        for to in other.start_states() {
            for &from in &finals {
                self.add_transition(from, EPSILON, to + offset);
            }
        }
        self.final_states.clear();
        for state in other.final_states() {
            self.set_final(state + offset, true);
        }
    }

    /// L(self)*
    ///
    /// A fresh start state accepts the empty word and enters the old start
    /// states; every final state loops back to them.
    pub fn kleene_star(&mut self) {
        let start = self.offset();
        let starts: Vec<State> = self.start_states().collect();
        let finals: Vec<State> = self.final_states().collect();
        for &from in &finals {
            for &to in &starts {
                self.add_transition(from, EPSILON, to);
            }
        }
        self.add_state(start);
        for &to in &starts {
            self.add_transition(start, EPSILON, to);
        }
        self.start_states.clear();
        self.set_start(start, true);
        self.set_final(start, true);
    }
}
