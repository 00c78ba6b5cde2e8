use std::collections::VecDeque;
use std::mem;

use crate::parts::Part;

/// The only parts allowed in a resolved sequence: a literal run or the
/// boundary between two runs. Keeping these in their own type means the
/// flattening step cannot encounter an unresolved alternation.
#[derive(Clone, Debug, PartialEq, Eq)]
enum Token {
    Word(String),
    Separator,
}

impl Token {
    fn to_part(&self) -> Part {
        match self {
            Token::Word(w) => Part::Word(w.clone()),
            Token::Separator => Part::Separator,
        }
    }
}

/// Expands a part into every word-list it can stand for.
///
/// `Sequence[Word("Hi"), Separator, Word(" there")]` expands to
/// `[["Hi", " there"]]`; `Alternation[Word("Hi"), Word("Bye")]` expands to
/// `[["Hi"], ["Bye"]]`. A word-list may be empty when the path holds no
/// literals at all; callers treat that as "no constraint".
pub(crate) fn flat_sequences(part: Part) -> Vec<Vec<String>> {
    to_sequences(vec![part]).iter().map(|s| flatten(s)).collect()
}

/// Resolves every alternation in `parts` by cartesian product, returning all
/// resulting token sequences. Without alternations there is exactly one.
fn to_sequences(parts: Vec<Part>) -> Vec<Vec<Token>> {
    let mut ret: Vec<Vec<Token>> = vec![Vec::new()];
    let mut todo: VecDeque<Part> = parts.into();
    while let Some(part) = todo.pop_front() {
        match part {
            Part::Word(w) => {
                for seq in &mut ret {
                    seq.push(Token::Word(w.clone()));
                }
            }
            Part::Separator => {
                for seq in &mut ret {
                    seq.push(Token::Separator);
                }
            }
            Part::Alternation(alts) => {
                // Multiply every partial result so far by every alternative.
                // An alternative may itself contain nested alternations, so
                // each combination is re-expanded recursively.
                let mut multiplied = Vec::with_capacity(ret.len() * alts.len());
                for partial in &ret {
                    for alt in &alts {
                        let mut joined: Vec<Part> =
                            partial.iter().map(Token::to_part).collect();
                        joined.push(alt.clone());
                        multiplied.extend(to_sequences(joined));
                    }
                }
                ret = multiplied;
            }
            Part::Sequence(children) => {
                // Recurse by prepending the children to the worklist.
                for child in children.into_iter().rev() {
                    todo.push_front(child);
                }
            }
        }
    }
    ret
}

/// Reduces a token sequence to its word-list. Consecutive words merge into
/// one run; separators close the current run; empty runs are dropped.
fn flatten(seq: &[Token]) -> Vec<String> {
    let mut words = Vec::new();
    let mut run = String::new();
    for token in seq {
        match token {
            Token::Word(w) => run.push_str(w),
            Token::Separator => {
                if !run.is_empty() {
                    words.push(mem::take(&mut run));
                }
            }
        }
    }
    if !run.is_empty() {
        words.push(run);
    }
    words
}
