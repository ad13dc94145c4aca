//! Finite automata over integer states and symbols: regex compilation,
//! union/concatenation/star, subset construction, minimization, and
//! recursive state machines made of labelled automata.
//!
//! ```
//! use formlang::NFA;
//!
//! let nfa = NFA::from_regex("a|b+c*").unwrap();
//! let dfa = nfa.minimize();
//! assert!(dfa.is_deterministic());
//! assert!(dfa.accepts_str("bcc"));
//! assert!(!dfa.accepts_str("ac"));
//! ```

pub mod automaton;
pub mod dfa;
mod nfa;
mod ops;
pub mod regex;
pub mod rsm;
mod scc;
pub mod transitions;

pub use crate::automaton::{FiniteAutomaton, NFA};
pub use crate::dfa::DFA_START;
pub use crate::regex::RegexError;
pub use crate::rsm::{RecursiveAutomaton, RSM};
pub use crate::transitions::{SparseTransitions, Transition, Transitions};

pub type State = usize;
pub type Symbol = i32;

/// The no-input symbol. Never part of the alphabet an automaton reports.
pub const EPSILON: Symbol = i32::MIN;
