/// Shown in place of spaces inside incorrect spans so mistyped blanks stay visible.
pub const VISIBLE_SPACE: char = '_';

pub const DEFAULT_NEWLINE_INDICATOR: &str = "\u{21b5}"; // ↵

/// What a span of text means to the typist. Styling is decided by the theme.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Role {
    Typed,
    Incorrect,
    Cursor,
    Remaining,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Segment {
    pub text: String,
    pub role: Role,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RenderModel {
    pub segments: Vec<Segment>,
    /// Char index of the cursor in the typed text; `None` once the session is over.
    pub cursor: Option<usize>,
}

impl RenderModel {
    pub fn text(&self) -> String {
        self.segments.iter().map(|s| s.text.as_str()).collect()
    }

    pub fn text_for(&self, role: Role) -> String {
        self.segments
            .iter()
            .filter(|s| s.role == role)
            .map(|s| s.text.as_str())
            .collect()
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.segments.iter().any(|s| s.role == role)
    }

    fn push(&mut self, role: Role, text: String) {
        if !text.is_empty() {
            self.segments.push(Segment { text, role });
        }
    }
}

/// Compares `typed` against `target` and splits the result into role-tagged segments.
///
/// `indicator` is the newline marker for code targets; every embedded newline is
/// shown as `indicator + '\n'` exactly once.
pub fn build(target: &str, typed: &str, finished: bool, indicator: Option<&str>) -> RenderModel {
    let target: Vec<char> = target.chars().collect();
    let typed: Vec<char> = typed.chars().collect();
    let indicator = indicator.filter(|s| !s.is_empty());

    let limit = typed.len().min(target.len());
    let divergence = (0..limit)
        .find(|&i| typed[i] != target[i])
        .unwrap_or(limit);

    let mut model = RenderModel::default();
    model.push(Role::Typed, with_indicator(&target[..divergence], indicator));
    model.push(
        Role::Incorrect,
        with_indicator(&spaces_visible(&target[divergence..limit]), indicator),
    );
    if typed.len() > target.len() {
        model.push(
            Role::Incorrect,
            with_indicator(&spaces_visible(&typed[target.len()..]), indicator),
        );
    }

    let mut remaining: &[char] = if typed.len() < target.len() {
        &target[typed.len()..]
    } else {
        &[]
    };

    if !finished {
        let glyph = match remaining.split_first() {
            Some((&ch, rest)) => {
                remaining = rest;
                match (ch, indicator) {
                    ('\n', Some(marker)) => format!("{marker}\n"),
                    _ => ch.to_string(),
                }
            }
            None => " ".to_string(),
        };
        model.push(Role::Cursor, glyph);
        model.cursor = Some(typed.len());
    }

    model.push(Role::Remaining, with_indicator(remaining, indicator));
    model
}

fn spaces_visible(chars: &[char]) -> Vec<char> {
    chars
        .iter()
        .map(|&ch| if ch == ' ' { VISIBLE_SPACE } else { ch })
        .collect()
}

fn with_indicator(chars: &[char], indicator: Option<&str>) -> String {
    let mut out = String::with_capacity(chars.len());
    for &ch in chars {
        if ch == '\n' {
            if let Some(marker) = indicator {
                out.push_str(marker);
            }
        }
        out.push(ch);
    }
    out
}
