use regex_syntax::hir::{Class, Hir, HirKind, Look};

/// Sentinel literal for a pattern that can never match. Any word works here:
/// the pattern matches no strings, so the filter cannot produce a false
/// negative, and false positives are acceptable by contract.
const NO_MATCH_WORD: &str = "__no_match__";

/// A character class with more distinct members than this is not worth
/// enumerating as alternatives and degrades to a separator.
const MAX_CLASS_ALTERNATIVES: usize = 5;

/// A bounded repetition spanning more lengths than this is truncated to its
/// guaranteed minimum instead of enumerating every length.
const MAX_REPEAT_SPREAD: u32 = 5;

/// A regex reduced to the four shapes the expansion step understands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Part {
    /// A literal run guaranteed to occur verbatim. May be empty, meaning the
    /// fragment matches but contributes no characters.
    Word(String),
    /// Unknown content we cannot substring-filter on. No literal run ever
    /// spans a separator.
    Separator,
    /// Any one of the contained parts.
    Alternation(Vec<Part>),
    /// All contained parts, in order.
    Sequence(Vec<Part>),
}

/// Reduces a parsed regex to `Part` form.
///
/// Every fragment maps to something no stricter than the fragment itself, so
/// the derived filter only ever over-matches. Matching on `HirKind` and
/// `Look` is exhaustive: a new upstream operator is a compile error here, not
/// a silently weakened (and possibly unsound) filter.
pub(crate) fn normalize(hir: &Hir) -> Part {
    match hir.kind() {
        HirKind::Empty => Part::Word(String::new()),
        HirKind::Literal(lit) => Part::Word(String::from_utf8_lossy(&lit.0).into_owned()),
        HirKind::Class(class) => match small_class(class) {
            Some(members) if members.is_empty() => Part::Word(NO_MATCH_WORD.to_string()),
            Some(members) => Part::Alternation(
                members.iter().map(|c| Part::Word(c.to_string())).collect(),
            ),
            None => Part::Separator,
        },
        HirKind::Look(look) => match look {
            // Word boundaries are zero-width and do not interrupt a literal
            // run, so they reduce to an empty word.
            Look::WordAscii
            | Look::WordAsciiNegate
            | Look::WordUnicode
            | Look::WordUnicodeNegate
            | Look::WordStartAscii
            | Look::WordEndAscii
            | Look::WordStartUnicode
            | Look::WordEndUnicode
            | Look::WordStartHalfAscii
            | Look::WordEndHalfAscii
            | Look::WordStartHalfUnicode
            | Look::WordEndHalfUnicode => Part::Word(String::new()),
            Look::Start
            | Look::End
            | Look::StartLF
            | Look::EndLF
            | Look::StartCRLF
            | Look::EndCRLF => Part::Separator,
        },
        HirKind::Capture(capture) => normalize(&capture.sub),
        HirKind::Repetition(rep) => {
            let sub = normalize(&rep.sub);
            match (rep.min, rep.max) {
                // Zero or more: nothing is guaranteed.
                (0, None) => Part::Separator,
                // One or more: the first occurrence is guaranteed, the rest
                // is unknown.
                (1, None) => Part::Sequence(vec![sub, Part::Separator]),
                // Optional: present or absent.
                (0, Some(1)) => Part::Alternation(vec![sub, Part::Word(String::new())]),
                (min, max) => match max {
                    Some(max) if max - min <= MAX_REPEAT_SPREAD => {
                        // Few enough distinct lengths to enumerate exactly.
                        let mut alts = Vec::with_capacity((max - min + 1) as usize);
                        for n in min..=max {
                            alts.push(Part::Sequence(vec![sub.clone(); n as usize]));
                        }
                        Part::Alternation(alts)
                    }
                    _ => {
                        // Too many lengths: keep the guaranteed minimum and
                        // mark the unknown tail with a separator.
                        let mut seq = vec![sub; min as usize];
                        if max != Some(min) {
                            seq.push(Part::Separator);
                        }
                        Part::Sequence(seq)
                    }
                },
            }
        }
        HirKind::Concat(subs) => Part::Sequence(subs.iter().map(normalize).collect()),
        HirKind::Alternation(subs) => Part::Alternation(subs.iter().map(normalize).collect()),
    }
}

/// Expands a class to its distinct code points, or `None` if it has more than
/// [`MAX_CLASS_ALTERNATIVES`]. Class ranges are canonical (sorted, disjoint),
/// so the members come out deduplicated and in ascending order.
fn small_class(class: &Class) -> Option<Vec<char>> {
    let mut members = Vec::new();
    match class {
        Class::Unicode(cls) => {
            for range in cls.iter() {
                for c in range.start()..=range.end() {
                    members.push(c);
                    if members.len() > MAX_CLASS_ALTERNATIVES {
                        return None;
                    }
                }
            }
        }
        Class::Bytes(cls) => {
            for range in cls.iter() {
                for b in range.start()..=range.end() {
                    members.push(char::from(b));
                    if members.len() > MAX_CLASS_ALTERNATIVES {
                        return None;
                    }
                }
            }
        }
    }
    Some(members)
}

#[cfg(test)]
mod tests {
    use regex_syntax::hir::{Class, ClassUnicode, Hir};

    use super::{normalize, Part, NO_MATCH_WORD};

    fn word(s: &str) -> Part {
        Part::Word(s.to_string())
    }

    fn parse(pattern: &str) -> Part {
        normalize(&regex_syntax::parse(pattern).unwrap())
    }

    #[test]
    fn literal() {
        assert_eq!(parse("Hello"), word("Hello"));
    }

    #[test]
    fn singleton_class_folds_into_literal() {
        assert_eq!(parse("Hell[o]"), word("Hello"));
    }

    #[test]
    fn plus_keeps_first_occurrence() {
        assert_eq!(
            parse("Hello+"),
            Part::Sequence(vec![
                word("Hell"),
                Part::Sequence(vec![word("o"), Part::Separator]),
            ])
        );
    }

    #[test]
    fn star_is_a_separator() {
        assert_eq!(
            parse("Hello*"),
            Part::Sequence(vec![word("Hell"), Part::Separator])
        );
    }

    #[test]
    fn small_class_becomes_alternation() {
        assert_eq!(
            parse("H[ea]llo"),
            Part::Sequence(vec![
                word("H"),
                Part::Alternation(vec![word("a"), word("e")]),
                word("llo"),
            ])
        );
    }

    #[test]
    fn bounded_repetition_enumerates_lengths() {
        assert_eq!(
            parse("Hello{3,4}"),
            Part::Sequence(vec![
                word("Hell"),
                Part::Alternation(vec![
                    Part::Sequence(vec![word("o"), word("o"), word("o")]),
                    Part::Sequence(vec![word("o"), word("o"), word("o"), word("o")]),
                ]),
            ])
        );
    }

    #[test]
    fn unbounded_repetition_keeps_minimum() {
        assert_eq!(
            parse("Hello{3,}"),
            Part::Sequence(vec![
                word("Hell"),
                Part::Sequence(vec![word("o"), word("o"), word("o"), Part::Separator]),
            ])
        );
    }

    #[test]
    fn wide_class_is_a_separator() {
        assert_eq!(
            parse("a[0-9]b"),
            Part::Sequence(vec![word("a"), Part::Separator, word("b")])
        );
    }

    #[test]
    fn class_at_threshold() {
        assert_eq!(
            parse("[0-3]"),
            Part::Alternation(vec![word("0"), word("1"), word("2"), word("3")])
        );
        assert_eq!(
            parse("[0124]"),
            Part::Alternation(vec![word("0"), word("1"), word("2"), word("4")])
        );
        assert_eq!(
            parse("[01234]"),
            Part::Alternation(vec![word("0"), word("1"), word("2"), word("3"), word("4")])
        );
        assert_eq!(parse("[012345]"), Part::Separator);
    }

    #[test]
    fn optional_is_alternation_with_empty() {
        assert_eq!(
            parse("ab?"),
            Part::Sequence(vec![
                word("a"),
                Part::Alternation(vec![word("b"), word("")]),
            ])
        );
    }

    #[test]
    fn anchors_and_dot_are_separators() {
        assert_eq!(
            parse("^a.b$"),
            Part::Sequence(vec![
                Part::Separator,
                word("a"),
                Part::Separator,
                word("b"),
                Part::Separator,
            ])
        );
    }

    #[test]
    fn word_boundary_keeps_adjacency() {
        assert_eq!(
            parse(r"\bab\B"),
            Part::Sequence(vec![word(""), word("ab"), word("")])
        );
    }

    #[test]
    fn capture_group_is_transparent() {
        assert_eq!(parse("(ab)"), word("ab"));
    }

    #[test]
    fn empty_class_is_the_no_match_sentinel() {
        // The default parser rejects empty classes, so build the HIR by hand.
        let hir = Hir::class(Class::Unicode(ClassUnicode::empty()));
        assert_eq!(normalize(&hir), word(NO_MATCH_WORD));
    }
}
