//! Regular expressions to NFAs, by Thompson construction.
//!
//! Syntax: every character is a literal symbol (its code point), except
//! `\` which makes the next character a literal, `(` `)` for grouping,
//! postfix `*`, `+` or plain adjacency for concatenation, and `|` for union.
//! `*` binds tightest, `|` loosest.

use std::str::FromStr;

use thiserror::Error;

use crate::automaton::FiniteAutomaton;
use crate::transitions::Transitions;
use crate::Symbol;

/// Errors raised on an invalid regex. Positions count characters.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum RegexError {
    #[error("unbalanced parenthesis at position {0}")]
    UnbalancedParenthesis(usize),

    #[error("operator `{operator}` at position {position} is missing an operand")]
    MissingOperand { operator: char, position: usize },

    #[error("empty group at position {0}")]
    EmptyGroup(usize),

    #[error("regex ends with an unfinished escape")]
    DanglingEscape,
}

pub type Result<T> = ::std::result::Result<T, RegexError>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Token {
    Literal(char),
    Star,
    Concat,
    Union,
    Open,
    Close,
}

impl Token {
    fn ends_operand(self) -> bool {
        match self {
            Token::Literal(_) | Token::Star | Token::Close => true,
            _ => false,
        }
    }

    fn operator(self) -> char {
        match self {
            Token::Literal(c) => c,
            Token::Star => '*',
            Token::Concat => '+',
            Token::Union => '|',
            Token::Open => '(',
            Token::Close => ')',
        }
    }

    fn precedence(self) -> u8 {
        match self {
            Token::Concat => 2,
            Token::Union => 1,
            _ => 0,
        }
    }
}

/// Splits the regex into tokens, making implicit concatenation explicit and
/// rejecting operators that lack an operand.
fn tokenize(regex: &str) -> Result<Vec<(usize, Token)>> {
    let mut tokens: Vec<(usize, Token)> = Vec::new();
    let mut chars = regex.chars().enumerate();
    while let Some((position, c)) = chars.next() {
        let token = match c {
            '\\' => match chars.next() {
                Some((_, escaped)) => Token::Literal(escaped),
                None => return Err(RegexError::DanglingEscape),
            },
            '*' => Token::Star,
            '+' => Token::Concat,
            '|' => Token::Union,
            '(' => Token::Open,
            ')' => Token::Close,
            c => Token::Literal(c),
        };
        let prev = tokens.last().cloned();
        match token {
            Token::Literal(_) | Token::Open => {
                if prev.map_or(false, |(_, prev)| prev.ends_operand()) {
                    tokens.push((position, Token::Concat));
                }
            }
            Token::Star | Token::Concat | Token::Union => {
                if !prev.map_or(false, |(_, prev)| prev.ends_operand()) {
                    return Err(RegexError::MissingOperand {
                        operator: token.operator(),
                        position,
                    });
                }
            }
            Token::Close => match prev {
                None => return Err(RegexError::UnbalancedParenthesis(position)),
                Some((_, Token::Open)) => return Err(RegexError::EmptyGroup(position)),
                Some((prev_position, prev)) if !prev.ends_operand() => {
                    return Err(RegexError::MissingOperand {
                        operator: prev.operator(),
                        position: prev_position,
                    });
                }
                Some(_) => {}
            },
        }
        tokens.push((position, token));
    }
    if let Some(&(position, last)) = tokens.last() {
        if last == Token::Concat || last == Token::Union {
            return Err(RegexError::MissingOperand {
                operator: last.operator(),
                position,
            });
        }
    }
    Ok(tokens)
}

/// Shunting-yard from infix tokens to postfix.
fn to_postfix(tokens: Vec<(usize, Token)>) -> Result<Vec<(usize, Token)>> {
    let mut output = Vec::with_capacity(tokens.len());
    let mut operators: Vec<(usize, Token)> = Vec::new();
    for (position, token) in tokens {
        match token {
            Token::Literal(_) | Token::Star => output.push((position, token)),
            Token::Open => operators.push((position, token)),
            Token::Close => loop {
                match operators.pop() {
                    Some((_, Token::Open)) => break,
                    Some(operator) => output.push(operator),
                    None => return Err(RegexError::UnbalancedParenthesis(position)),
                }
            },
            Token::Concat | Token::Union => {
                while let Some(&(_, top)) = operators.last() {
                    if top == Token::Open || top.precedence() < token.precedence() {
                        break;
                    }
                    output.extend(operators.pop());
                }
                operators.push((position, token));
            }
        }
    }
    while let Some((position, operator)) = operators.pop() {
        if operator == Token::Open {
            return Err(RegexError::UnbalancedParenthesis(position));
        }
        output.push((position, operator));
    }
    Ok(output)
}

impl<T: Transitions> FiniteAutomaton<T> {
    /// Two states, `0 -symbol-> 1`, with 0 start and 1 final.
    pub fn from_symbol(symbol: Symbol) -> Self {
        let mut nfa = Self::new();
        nfa.add_transition(0, symbol, 1);
        nfa.set_start(0, true);
        nfa.set_final(1, true);
        nfa
    }

    /// Compiles a regex. The empty regex gives the empty automaton, which
    /// rejects every word.
    pub fn from_regex(regex: &str) -> Result<Self> {
        let postfix = to_postfix(tokenize(regex)?)?;
        let mut operands: Vec<Self> = Vec::new();
        for (position, token) in postfix {
            let missing = RegexError::MissingOperand {
                operator: token.operator(),
                position,
            };
            match token {
                Token::Literal(c) => operands.push(Self::from_symbol(c as Symbol)),
                Token::Star => operands.last_mut().ok_or(missing)?.kleene_star(),
                Token::Concat | Token::Union => {
                    let right = operands.pop().ok_or_else(|| missing.clone())?;
                    let left = operands.last_mut().ok_or(missing)?;
                    if token == Token::Concat {
                        left.concatenate(&right);
                    } else {
                        left.union(&right);
                    }
                }
                Token::Open | Token::Close => {
                    return Err(RegexError::UnbalancedParenthesis(position))
                }
            }
        }
        Ok(operands.pop().unwrap_or_else(Self::new))
    }
}

impl<T: Transitions> FromStr for FiniteAutomaton<T> {
    type Err = RegexError;

    fn from_str(regex: &str) -> Result<Self> {
        Self::from_regex(regex)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::automaton::NFA;

    #[test]
    fn postfix_order() {
        let postfix: String = to_postfix(tokenize("a|b+c*").unwrap())
            .unwrap()
            .into_iter()
            .map(|(_, token)| token.operator())
            .collect();
        assert_eq!(postfix, "abc*+|");

        let postfix: String = to_postfix(tokenize("(ab)*c").unwrap())
            .unwrap()
            .into_iter()
            .map(|(_, token)| token.operator())
            .collect();
        assert_eq!(postfix, "ab+*c+");
    }

    #[test]
    fn union_and_concatenation() {
        let nfa = NFA::from_regex("a|b+c*").unwrap();
        for word in &["a", "b", "bc", "bcc"] {
            assert!(nfa.accepts_str(word), "{}", word);
        }
        for word in &["", "d", "ab", "c", "ac"] {
            assert!(!nfa.accepts_str(word), "{}", word);
        }
    }

    #[test]
    fn implicit_concatenation_matches_explicit() {
        let implicit = NFA::from_regex("ab(c|d)*").unwrap();
        let explicit = NFA::from_regex("a+b+(c|d)*").unwrap();
        for word in &["ab", "abc", "abdcd", "a", "abe", ""] {
            assert_eq!(implicit.accepts_str(word), explicit.accepts_str(word), "{}", word);
        }
    }

    #[test]
    fn escapes_are_literals() {
        let nfa = NFA::from_regex(r"a\*\|\+\(\\").unwrap();
        assert!(nfa.accepts_str(r"a*|+(\"));
        assert!(!nfa.accepts_str("a"));

        let star = NFA::from_regex(r"\**").unwrap();
        assert!(star.accepts_str(""));
        assert!(star.accepts_str("***"));
    }

    #[test]
    fn star_binds_tighter_than_concatenation() {
        let nfa = NFA::from_regex("ab*").unwrap();
        assert!(nfa.accepts_str("a"));
        assert!(nfa.accepts_str("abbb"));
        assert!(!nfa.accepts_str("abab"));
    }

    #[test]
    fn empty_regex_is_empty_automaton() {
        let nfa = NFA::from_regex("").unwrap();
        assert!(nfa.is_empty());
        assert!(!nfa.accepts_str(""));
    }

    #[test]
    fn from_str() {
        let nfa: NFA = "x|y".parse().unwrap();
        assert!(nfa.accepts_str("y"));
    }

    #[test]
    fn invalid_regexes() {
        assert_eq!(NFA::from_regex("(a").unwrap_err(), RegexError::UnbalancedParenthesis(0));
        assert_eq!(NFA::from_regex("a)").unwrap_err(), RegexError::UnbalancedParenthesis(1));
        assert_eq!(NFA::from_regex(")").unwrap_err(), RegexError::UnbalancedParenthesis(0));
        assert_eq!(NFA::from_regex("a()").unwrap_err(), RegexError::EmptyGroup(2));
        assert_eq!(NFA::from_regex(r"ab\").unwrap_err(), RegexError::DanglingEscape);
        assert_eq!(
            NFA::from_regex("*a").unwrap_err(),
            RegexError::MissingOperand { operator: '*', position: 0 }
        );
        assert_eq!(
            NFA::from_regex("a|").unwrap_err(),
            RegexError::MissingOperand { operator: '|', position: 1 }
        );
        assert_eq!(
            NFA::from_regex("|a").unwrap_err(),
            RegexError::MissingOperand { operator: '|', position: 0 }
        );
        assert_eq!(
            NFA::from_regex("a(*b)").unwrap_err(),
            RegexError::MissingOperand { operator: '*', position: 2 }
        );
        assert_eq!(
            NFA::from_regex("(a+)").unwrap_err(),
            RegexError::MissingOperand { operator: '+', position: 2 }
        );
    }

    #[test]
    fn error_messages() {
        let err = NFA::from_regex("a||b").unwrap_err();
        assert_eq!(err.to_string(), "operator `|` at position 2 is missing an operand");
    }
}
