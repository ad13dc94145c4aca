use std::collections::HashMap;
use std::collections::VecDeque;

use bit_set::BitSet;
use bit_vec::BitVec;

use crate::automaton::FiniteAutomaton;
use crate::transitions::Transitions;
use crate::{State, Symbol};

/// The start state of every automaton produced by `to_deterministic` and `minimize`.
pub const DFA_START: State = 0;

impl<T: Transitions> FiniteAutomaton<T> {
    /// Determinizes, drops unreachable and dead states, and merges
    /// equivalent states by iterative partition refinement.
    ///
    /// States of the result are numbered densely in breadth-first order from
    /// `DFA_START`. Missing transitions go to an implicit dead state.
    pub fn minimize(&self) -> Self {
        let dfa = self.to_deterministic();
        let first = dfa.start_states().next();
        let start = match first {
            Some(start) => start,
            None => return dfa,
        };
        // to_deterministic numbers its states densely
        let n = dfa.max_state().map_or(0, |max| max + 1);

        let mut alphabet: Vec<Symbol> = dfa.symbols().collect();
        alphabet.sort();
        let step = |state: State, symbol: Symbol| {
            dfa.next_states(state, symbol)
                .and_then(|targets| targets.iter().next().cloned())
        };

        let mut reachable = BitSet::with_capacity(n);
        let mut predecessors: Vec<Vec<State>> = vec![Vec::new(); n];
        reachable.insert(start);
        let mut worklist = vec![start];
        while let Some(state) = worklist.pop() {
            for &symbol in &alphabet {
                if let Some(to) = step(state, symbol) {
                    predecessors[to].push(state);
                    if reachable.insert(to) {
                        worklist.push(to);
                    }
                }
            }
        }

        // live: reachable and able to reach a final state
        let mut finals = BitVec::from_elem(n, false);
        let mut live = BitSet::with_capacity(n);
        for state in reachable.iter() {
            if dfa.is_final(state) {
                finals.set(state, true);
                live.insert(state);
                worklist.push(state);
            }
        }
        while let Some(state) = worklist.pop() {
            for &from in &predecessors[state] {
                if live.insert(from) {
                    worklist.push(from);
                }
            }
        }
        live.insert(start);
        let live_states: Vec<State> = live.iter().collect();

        let mut block_of = vec![0; n];
        for &state in &live_states {
            block_of[state] = if finals[state] { 1 } else { 0 };
        }
        let has_final = live_states.iter().any(|&state| finals[state]);
        let has_non_final = live_states.iter().any(|&state| !finals[state]);
        let mut block_count = has_final as usize + has_non_final as usize;

        loop {
            let mut signatures: HashMap<(usize, Vec<Option<usize>>), usize> = HashMap::new();
            let mut refined = vec![0; n];
            for &state in &live_states {
                let successors = alphabet
                    .iter()
                    .map(|&symbol| {
                        step(state, symbol)
                            .filter(|&to| live.contains(to))
                            .map(|to| block_of[to])
                    })
                    .collect();
                let next_block = signatures.len();
                refined[state] = *signatures
                    .entry((block_of[state], successors))
                    .or_insert(next_block);
            }
            let stable = signatures.len() == block_count;
            block_count = signatures.len();
            block_of = refined;
            if stable {
                break;
            }
        }

        let mut renumber: Vec<Option<State>> = vec![None; block_count];
        let mut next_state = DFA_START;
        let mut seen = BitSet::with_capacity(n);
        let mut queue = VecDeque::new();
        seen.insert(start);
        queue.push_back(start);
        while let Some(state) = queue.pop_front() {
            let block = block_of[state];
            if renumber[block].is_none() {
                renumber[block] = Some(next_state);
                next_state += 1;
            }
            for &symbol in &alphabet {
                if let Some(to) = step(state, symbol) {
                    if live.contains(to) && seen.insert(to) {
                        queue.push_back(to);
                    }
                }
            }
        }

        let mut minimal = Self::new();
        minimal.add_state(DFA_START);
        minimal.set_start(DFA_START, true);
        for &state in &live_states {
            let from = match renumber[block_of[state]] {
                Some(from) => from,
                None => continue,
            };
            for &symbol in &alphabet {
                let to = step(state, symbol)
                    .filter(|&to| live.contains(to))
                    .and_then(|to| renumber[block_of[to]]);
                if let Some(to) = to {
                    minimal.add_transition(from, symbol, to);
                }
            }
            if finals[state] {
                minimal.set_final(from, true);
            }
        }
        minimal
    }
}

#[cfg(test)]
mod tests {
    use super::DFA_START;
    use crate::automaton::NFA;

    #[test]
    fn merges_equivalent_states() {
        let mut nfa = NFA::new();
        nfa.add_transition(0, 'a' as i32, 1);
        nfa.add_transition(0, 'b' as i32, 2);
        nfa.add_transition(1, 'c' as i32, 3);
        nfa.add_transition(2, 'c' as i32, 3);
        nfa.set_start(0, true);
        nfa.set_final(3, true);

        let min = nfa.minimize();
        assert!(min.is_deterministic());
        assert_eq!(min.state_count(), 3);
        assert_eq!(min.transition_count(), 3);
        assert!(min.is_start(DFA_START));
        assert!(min.accepts_str("ac"));
        assert!(min.accepts_str("bc"));
        assert!(!min.accepts_str("c"));
    }

    #[test]
    fn drops_dead_states() {
        let mut nfa = NFA::new();
        nfa.add_transition(0, 'a' as i32, 1);
        nfa.add_transition(0, 'b' as i32, 2);
        nfa.add_transition(2, 'b' as i32, 2);
        nfa.set_start(0, true);
        nfa.set_final(1, true);

        let min = nfa.minimize();
        assert_eq!(min.state_count(), 2);
        assert_eq!(min.transition_count(), 1);
        assert!(min.accepts_str("a"));
        assert!(!min.accepts_str("bb"));
    }

    #[test]
    fn empty_language_keeps_start_state() {
        let mut nfa = NFA::new();
        nfa.add_transition(0, 'a' as i32, 1);
        nfa.set_start(0, true);

        let min = nfa.minimize();
        assert_eq!(min.state_count(), 1);
        assert_eq!(min.transition_count(), 0);
        assert!(min.is_start(DFA_START));
        assert!(!min.accepts_str(""));
        assert!(!min.accepts_str("a"));
    }

    #[test]
    fn star_collapses_to_one_state() {
        let min = NFA::from_regex("a*").unwrap().minimize();
        assert_eq!(min.state_count(), 1);
        assert_eq!(min.transition_count(), 1);
        assert!(min.is_final(DFA_START));
        assert!(min.accepts_str(""));
        assert!(min.accepts_str("aaa"));
    }

    #[test]
    fn textbook_example() {
        let nfa = NFA::from_regex("(a|b)*abb").unwrap();
        let min = nfa.minimize();
        assert!(min.is_deterministic());
        assert_eq!(min.state_count(), 4);
        assert_eq!(min.transition_count(), 8);
        assert_eq!(min.final_state_count(), 1);
        for word in &["abb", "aabb", "babb", "abababb"] {
            assert!(min.accepts_str(word), "{}", word);
        }
        for word in &["", "ab", "abba", "bbb"] {
            assert!(!min.accepts_str(word), "{}", word);
        }
    }

    #[test]
    fn minimizing_twice_changes_nothing() {
        let min = NFA::from_regex("(ab|ac)*d|e").unwrap().minimize();
        let again = min.minimize();
        assert_eq!(again.state_count(), min.state_count());
        assert_eq!(again.transition_count(), min.transition_count());
    }

    #[test]
    fn empty_automaton() {
        assert!(NFA::new().minimize().is_empty());
    }
}
