use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Typing box width used before the terminal reports its size.
pub const DEFAULT_BOX_WIDTH: u16 = 60;
const BOX_MARGIN: u16 = 4;

/// Width of the typing box for a viewport; a zero width means "not known yet".
pub fn box_width(viewport: u16) -> u16 {
    if viewport == 0 {
        DEFAULT_BOX_WIDTH
    } else {
        viewport.saturating_sub(BOX_MARGIN).max(1)
    }
}

pub struct AppLayout {
    pub header: Rect,
    pub main: Rect,
    pub stats: Rect,
    pub footer: Rect,
}

impl AppLayout {
    pub fn new(area: Rect) -> Self {
        let vertical = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(3),
                Constraint::Length(1),
                Constraint::Length(1),
            ])
            .split(area);

        let width = box_width(area.width).min(area.width);
        let left = area.x + (area.width.saturating_sub(width)) / 2;

        Self {
            header: vertical[0],
            main: Rect::new(left, vertical[1].y, width, vertical[1].height),
            stats: Rect::new(left, vertical[2].y, width, vertical[2].height),
            footer: vertical[3],
        }
    }
}

/// Rows a line of `text` occupies when wrapped at `width` columns.
pub fn wrapped_line_count(text: &str, width: usize) -> usize {
    if width == 0 {
        return 0;
    }
    let chars = text.chars().count().max(1);
    chars.div_ceil(width)
}
