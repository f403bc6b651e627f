// Subsequence matching for the topic picker

/// Does every character of `query` show up in `target`, in order?
///
/// Case-insensitive, and a blank query matches anything. Looser than a
/// substring check on purpose: typing "rst" should still find "rust".
/// Single pass over the target, no backtracking, no allocation.
pub fn matches(query: &str, target: &str) -> bool {
    if query.trim().is_empty() {
        return true;
    }

    let mut wanted = query.chars().flat_map(char::to_lowercase).peekable();

    for c in target.chars().flat_map(char::to_lowercase) {
        match wanted.peek() {
            Some(&w) if w == c => {
                wanted.next();
            }
            Some(_) => {}
            None => return true,
        }
    }

    wanted.peek().is_none()
}
