//! Concrete construction and determinization scenarios.

use formlang::{RegexError, Symbol, EPSILON, NFA, RSM};

fn word(s: &str) -> Vec<Symbol> {
    s.chars().map(|c| c as Symbol).collect()
}

#[test]
fn regex_survives_determinization() {
    let mut nfa = NFA::from_regex("a|b+c*").unwrap();
    for _ in 0..2 {
        for accepted in &["a", "b", "bc", "bcc"] {
            assert!(nfa.accepts(word(accepted)), "{}", accepted);
        }
        assert!(!nfa.accepts(word("d")));
        nfa = nfa.to_deterministic();
        assert!(nfa.is_deterministic());
    }
}

#[test]
fn to_deterministic_counts_first() {
    let mut nfa = NFA::new();
    nfa.add_transition(10, 0, 10);
    nfa.add_transition(10, 0, 11);
    nfa.add_transition(10, 1, 10);
    nfa.add_transition(11, 1, 12);
    assert!(nfa.set_start(10, true));
    assert!(nfa.set_final(11, true));

    let dfa = nfa.to_deterministic();
    assert!(dfa.is_deterministic());
    assert_eq!(dfa.state_count(), 3);
    assert_eq!(dfa.transition_count(), 6);
}

#[test]
fn to_deterministic_counts_second() {
    let mut nfa = NFA::new();
    nfa.add_transition(10, 0, 10);
    nfa.add_transition(10, 1, 10);
    nfa.add_transition(10, 0, 11);
    nfa.add_transition(11, 1, 10);
    assert!(!nfa.add_transition(10, 1, 10));
    nfa.add_transition(11, 1, 11);
    assert!(nfa.set_start(10, true));
    assert!(nfa.set_final(11, true));

    let dfa = nfa.to_deterministic();
    assert!(dfa.is_deterministic());
    assert_eq!(dfa.state_count(), 2);
    assert_eq!(dfa.transition_count(), 4);
}

#[test]
fn determinizing_a_dfa_is_idempotent() {
    let dfa = NFA::from_regex("(ab|a)*c").unwrap().to_deterministic();
    let again = dfa.to_deterministic();
    assert_eq!(again.state_count(), dfa.state_count());
    assert_eq!(again.transition_count(), dfa.transition_count());
    assert_eq!(again.final_state_count(), dfa.final_state_count());
}

#[test]
fn minimized_regex_matches_nfa() {
    let nfa = NFA::from_regex(r"(0|1(01*0)*1)*").unwrap();
    let min = nfa.minimize();
    // multiples of three in binary
    assert_eq!(min.state_count(), 3);
    for n in 0u32..64 {
        let binary = format!("{:b}", n);
        assert_eq!(min.accepts_str(&binary), n % 3 == 0, "{}", binary);
        assert_eq!(nfa.accepts_str(&binary), n % 3 == 0, "{}", binary);
    }
}

#[test]
fn epsilon_in_word_is_skipped() {
    let nfa = NFA::from_regex("ab").unwrap();
    let with_epsilon = vec![EPSILON, 'a' as Symbol, EPSILON, 'b' as Symbol];
    assert!(nfa.accepts(&with_epsilon));
    assert!(nfa.to_deterministic().accepts(&with_epsilon));
}

#[test]
fn unbalanced_regex_is_an_error() {
    match NFA::from_regex("(a|b") {
        Err(RegexError::UnbalancedParenthesis(0)) => {}
        other => panic!("unexpected {:?}", other.map(|nfa| nfa.state_count())),
    }
}

#[test]
fn boxes_from_regexes() {
    let mut rsm = RSM::new();
    let s = 'S' as Symbol;
    rsm.set_init_label(s);
    assert!(!rsm.add_box(s, NFA::from_regex("a*+b*").unwrap().minimize()));
    assert!(rsm.add_box(s, NFA::from_regex("a*b*").unwrap().minimize()));
    assert!(!rsm.add_box('T' as Symbol, NFA::from_regex("c").unwrap()));

    let init = rsm.init_box().unwrap();
    assert!(init.accepts_str("aabb"));
    assert!(!init.accepts_str("ba"));
    assert!(rsm.get_box('U' as Symbol).is_none());
}
