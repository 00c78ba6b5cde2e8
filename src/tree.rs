use std::collections::{BTreeSet, HashMap, HashSet};

/// One node of the derived boolean expression over literal substrings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Node {
    And(AndNode),
    Or(OrNode),
}

/// A set of words and subtrees that must all match.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AndNode {
    pub words: Vec<String>,
    pub children: Vec<OrNode>,
}

/// A set of words and subtrees of which at least one must match.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OrNode {
    pub words: Vec<String>,
    pub children: Vec<AndNode>,
}

impl Node {
    /// Renders the expression, e.g. `"a" AND ("b" OR "c")`.
    pub fn expr(&self) -> String {
        match self {
            Node::And(n) => n.expr(),
            Node::Or(n) => n.expr(),
        }
    }
}

impl AndNode {
    pub fn expr(&self) -> String {
        join_expr(&self.words, self.children.iter().map(OrNode::expr), " AND ")
    }

    /// ANDs `other` into this node. Singleton nodes (one word, no children)
    /// collapse into the word list instead of nesting a one-entry child.
    fn and(mut self, other: Option<Node>) -> AndNode {
        match other {
            None => self,
            Some(Node::And(a)) => {
                self.words.extend(a.words);
                self.children.extend(a.children);
                self
            }
            Some(Node::Or(mut o)) => {
                if o.words.len() + o.children.len() == 1 {
                    match o.words.pop() {
                        Some(w) => {
                            self.words.push(w);
                            self
                        }
                        None => self.and(o.children.pop().map(Node::And)),
                    }
                } else {
                    self.children.push(o);
                    self
                }
            }
        }
    }
}

impl OrNode {
    pub fn expr(&self) -> String {
        join_expr(&self.words, self.children.iter().map(AndNode::expr), " OR ")
    }

    /// ORs `other` into this node, mirroring [`AndNode::and`].
    fn or(mut self, other: Option<Node>) -> OrNode {
        match other {
            None => self,
            Some(Node::Or(o)) => {
                self.words.extend(o.words);
                self.children.extend(o.children);
                self
            }
            Some(Node::And(mut a)) => {
                if a.words.len() + a.children.len() == 1 {
                    match a.words.pop() {
                        Some(w) => {
                            self.words.push(w);
                            self
                        }
                        None => self.or(a.children.pop().map(Node::Or)),
                    }
                } else {
                    self.children.push(a);
                    self
                }
            }
        }
    }
}

fn join_expr(
    words: &[String],
    children: impl Iterator<Item = String>,
    sep: &str,
) -> String {
    let mut parts: Vec<String> = words.iter().map(|w| format!("{w:?}")).collect();
    parts.extend(children.map(|c| format!("({c})")));
    parts.join(sep)
}

/// Builds the simplest AND/OR tree this greedy strategy finds for the given
/// word-lists: a match must satisfy at least one list's every word.
///
/// Returns `None` when some list is empty, i.e. one alternative requires
/// nothing at all and no substring constraint is sound.
pub(crate) fn treeify(sequences: &[Vec<String>]) -> Option<Node> {
    if sequences.iter().any(|seq| seq.is_empty()) {
        return None;
    }
    let best = most_common(sequences)?;
    let mut with = Vec::new();
    let mut without = Vec::new();
    for seq in sequences {
        if contains_word(seq, &best) {
            with.push(strip_implied(seq, &best));
        } else {
            without.push(seq.clone());
        }
    }
    let node = AndNode {
        words: vec![best],
        children: Vec::new(),
    }
    .and(treeify(&with));
    if without.is_empty() {
        return Some(Node::And(node));
    }
    let rest = treeify(&without);
    Some(Node::Or(OrNode::default().or(Some(Node::And(node))).or(rest)))
}

/// Picks the word occurring in the most word-lists, where a list also counts
/// for every substring of the words it holds (a match containing "foobar"
/// necessarily contains "foo"). Each list contributes at most one point per
/// word. Ties break to the longer word, then lexicographically smaller.
fn most_common(sequences: &[Vec<String>]) -> Option<String> {
    let mut words: BTreeSet<&str> = BTreeSet::new();
    for seq in sequences {
        for w in seq {
            words.insert(w);
        }
    }
    // For each word, the candidate words it implies (its substrings).
    let mut implied: HashMap<&str, Vec<&str>> = HashMap::new();
    for &w in &words {
        implied.insert(w, words.iter().copied().filter(|sub| w.contains(sub)).collect());
    }
    let mut scores: HashMap<&str, usize> = HashMap::new();
    for seq in sequences {
        let mut scored: HashSet<&str> = HashSet::new();
        for w in seq {
            for &sub in &implied[w.as_str()] {
                if scored.insert(sub) {
                    *scores.entry(sub).or_insert(0) += 1;
                }
            }
        }
    }
    let mut best: Option<(&str, usize)> = None;
    for (&w, &score) in &scores {
        let better = match best {
            None => true,
            Some((bw, bs)) => {
                score > bs
                    || (score == bs
                        && (w.len() > bw.len() || (w.len() == bw.len() && w < bw)))
            }
        };
        if better {
            best = Some((w, score));
        }
    }
    best.map(|(w, _)| w.to_string())
}

/// True if `needle` is a substring of any word in the list.
fn contains_word(sequence: &[String], needle: &str) -> bool {
    sequence.iter().any(|w| w.contains(needle))
}

/// Drops `needle` and every word it implies from the list; once `needle` is
/// required, its substrings are redundant.
fn strip_implied(sequence: &[String], needle: &str) -> Vec<String> {
    sequence
        .iter()
        .filter(|w| !needle.contains(w.as_str()))
        .cloned()
        .collect()
}
