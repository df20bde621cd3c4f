/// Number of typed spaces accepted in place of one target tab.
pub const SPACES_PER_TAB: usize = 4;

/// Reconciles raw keystrokes with a code target: where the target expects a tab,
/// a literal tab or a run of exactly four spaces both count as that tab.
/// Everything else, including overflow past the end of the target, passes through.
pub fn normalize(typed: &str, target: &str) -> String {
    let typed: Vec<char> = typed.chars().collect();
    let mut target = target.chars();
    let mut out = String::with_capacity(typed.len());
    let mut i = 0;

    while i < typed.len() {
        let Some(expected) = target.next() else {
            out.extend(&typed[i..]);
            break;
        };

        if expected == '\t' && typed[i] != '\t' {
            let spaces = typed[i..]
                .iter()
                .take(SPACES_PER_TAB)
                .take_while(|&&ch| ch == ' ')
                .count();
            if spaces == SPACES_PER_TAB {
                out.push('\t');
                i += SPACES_PER_TAB;
                continue;
            }
        }

        out.push(typed[i]);
        i += 1;
    }

    out
}

/// Indentation to insert after an end-of-line keystroke.
///
/// `before` and `after` are the normalized texts around the keystroke. Only when the
/// text grew and still matches the target does the leading whitespace of the next
/// target line get requested.
pub fn auto_indent(before: &str, after: &str, target: &str) -> Option<String> {
    if after.chars().count() <= before.chars().count() {
        return None;
    }
    let rest = target.strip_prefix(after)?;
    let indent: String = rest
        .chars()
        .take_while(|&ch| ch == ' ' || ch == '\t')
        .collect();
    if indent.is_empty() { None } else { Some(indent) }
}
