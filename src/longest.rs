/// Finds the longest substring occurring in every word-list: each list must
/// contain it inside at least one of its words. Returns the empty string
/// when the set is empty or no shared substring exists.
///
/// The shortest list (by summed word length) serves as the search base;
/// anything shared by all lists is a substring of one of its words. The sort
/// is stable and enumeration goes leftmost offset first, shortest length
/// first, so ties resolve to the first candidate found in that order.
pub(crate) fn longest(mut sequences: Vec<Vec<String>>) -> String {
    if sequences.is_empty() {
        return String::new();
    }
    sequences.sort_by_key(|seq| seq.iter().map(String::len).sum::<usize>());
    let (base, rest) = match sequences.split_first() {
        Some(split) => split,
        None => return String::new(),
    };
    let mut best = "";
    for word in base {
        for (offset, _) in word.char_indices() {
            // Later offsets cannot yield anything longer than best either.
            if offset + best.len() >= word.len() {
                break;
            }
            let candidate = &word[offset..];
            // Only a strictly longer candidate can replace best.
            let mut len = best.len() + 1;
            while len <= candidate.len() {
                if !candidate.is_char_boundary(len) {
                    len += 1;
                    continue;
                }
                if !all_contain(rest, &candidate[..len]) {
                    break;
                }
                best = &candidate[..len];
                len += 1;
            }
        }
    }
    best.to_string()
}

fn all_contain(sequences: &[Vec<String>], needle: &str) -> bool {
    sequences
        .iter()
        .all(|seq| seq.iter().any(|w| w.contains(needle)))
}
