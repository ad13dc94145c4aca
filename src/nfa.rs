use std::collections::BTreeSet;
use std::collections::HashMap;
use std::collections::HashSet;
use std::iter;
use std::mem;

use crate::automaton::FiniteAutomaton;
use crate::dfa::DFA_START;
use crate::transitions::Transitions;
use crate::{State, Symbol, EPSILON};

impl<T: Transitions> FiniteAutomaton<T> {
    #[inline]
    fn _next_states<'i, Iter, Ext>(&self, states: Iter, symbol: Symbol, nxt_states: &mut Ext)
    where
        Iter: IntoIterator<Item = &'i State>,
        Ext: Extend<State>,
    {
        for &state in states {
            if let Some(states) = self.transitions.get(state, symbol) {
                nxt_states.extend(states.iter().cloned());
            }
        }
    }

    #[inline]
    fn _closure<'i, Iter, Ext>(&self, states: Iter, closure: &mut Ext)
    where
        Iter: IntoIterator<Item = &'i State>,
        Ext: Extend<State>,
    {
        for &state in states {
            closure.extend(self.eclose(state));
        }
    }

    /// All states reachable from `state` through zero or more epsilon transitions.
    pub fn eclose(&self, state: State) -> HashSet<State> {
        let mut closure: HashSet<State> = iter::once(state).collect();
        let mut worklist = vec![state];
        while let Some(current) = worklist.pop() {
            if let Some(targets) = self.transitions.get(current, EPSILON) {
                for &to in targets {
                    // only newly discovered states are expanded
                    if closure.insert(to) {
                        worklist.push(to);
                    }
                }
            }
        }
        closure
    }

    /// Runs the word through the automaton. Epsilon symbols in the word are skipped.
    pub fn accepts<W: AsRef<[Symbol]>>(&self, word: W) -> bool {
        let mut cur_states: HashSet<State> = HashSet::new();
        let mut raw_states: HashSet<State> = HashSet::new();
        let mut nxt_states: HashSet<State> = HashSet::new();
        self._closure(&self.start_states, &mut cur_states);
        for &symbol in word.as_ref() {
            if symbol == EPSILON {
                continue;
            }
            raw_states.clear();
            self._next_states(&cur_states, symbol, &mut raw_states);
            nxt_states.clear();
            self._closure(&raw_states, &mut nxt_states);
            mem::swap(&mut cur_states, &mut nxt_states);

            // Return early if "in stuck state"
            if cur_states.is_empty() {
                return false;
            }
        }
        cur_states.iter().any(|state| self.final_states.contains(state))
    }

    /// `accepts` for a word of characters, each character being its own code point symbol.
    pub fn accepts_str(&self, word: &str) -> bool {
        let word: Vec<Symbol> = word.chars().map(|c| c as Symbol).collect();
        self.accepts(word)
    }

    /// At most one start state, at most one destination per (state, symbol),
    /// and every epsilon closure is a singleton.
    pub fn is_deterministic(&self) -> bool {
        self.start_states.len() <= 1
            && self.transitions.is_deterministic()
            && self
                .transitions
                .iter()
                .all(|(from, on, to)| on != EPSILON || from == to)
    }

    /// Subset construction over the epsilon closure of all start states.
    ///
    /// The result numbers its states densely from `DFA_START`. The number of
    /// subsets is bounded by 2^n for n source states and is not capped here.
    pub fn to_deterministic(&self) -> Self {
        let mut dfa = Self::new();
        if self.start_states.is_empty() {
            return dfa;
        }

        let mut alphabet: Vec<Symbol> = self.symbols().collect();
        alphabet.sort();

        let mut cur_states: BTreeSet<State> = BTreeSet::new();
        self._closure(&self.start_states, &mut cur_states);

        dfa.add_state(DFA_START);
        dfa.set_start(DFA_START, true);
        let mut finals = Vec::new();
        if cur_states.iter().any(|state| self.is_final(*state)) {
            finals.push(DFA_START);
        }

        let mut states_map: HashMap<BTreeSet<State>, State> = HashMap::new();
        states_map.insert(cur_states.clone(), DFA_START);

        let mut worklist = vec![(cur_states, DFA_START)];
        while let Some((cur_states, cur_num)) = worklist.pop() {
            for &symbol in &alphabet {
                let mut raw_states: BTreeSet<State> = BTreeSet::new();
                self._next_states(&cur_states, symbol, &mut raw_states);

                // Skip the stuck state
                if raw_states.is_empty() {
                    continue;
                }

                let mut nxt_states: BTreeSet<State> = BTreeSet::new();
                self._closure(&raw_states, &mut nxt_states);

                let nxt_num = match states_map.get(&nxt_states) {
                    Some(&nxt_num) => nxt_num,
                    None => {
                        let nxt_num = states_map.len();
                        if nxt_states.iter().any(|state| self.is_final(*state)) {
                            finals.push(nxt_num);
                        }
                        states_map.insert(nxt_states.clone(), nxt_num);
                        worklist.push((nxt_states, nxt_num));
                        nxt_num
                    }
                };

                dfa.add_transition(cur_num, symbol, nxt_num);
            }
        }

        for state in finals {
            dfa.set_final(state, true);
        }
        dfa
    }
}
