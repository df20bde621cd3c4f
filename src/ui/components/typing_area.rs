use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget, Wrap};

use crate::engine::render::{RenderModel, Role};
use crate::ui::layout::wrapped_line_count;
use crate::ui::theme::Theme;

const TAB_WIDTH: usize = 4;

pub struct TypingArea<'a> {
    model: &'a RenderModel,
    theme: &'a Theme,
}

impl<'a> TypingArea<'a> {
    pub fn new(model: &'a RenderModel, theme: &'a Theme) -> Self {
        Self { model, theme }
    }
}

/// One display line: styled spans, and whether the cursor sits on it.
struct DisplayLine {
    spans: Vec<(String, Role)>,
    has_cursor: bool,
}

impl DisplayLine {
    fn new() -> Self {
        Self {
            spans: Vec::new(),
            has_cursor: false,
        }
    }

    fn text(&self) -> String {
        self.spans.iter().map(|(text, _)| text.as_str()).collect()
    }
}

/// Splits segments into lines at every newline and expands tabs to aligned markers.
fn layout_lines(model: &RenderModel) -> Vec<DisplayLine> {
    let mut lines = vec![DisplayLine::new()];
    let mut col = 0usize;

    for segment in &model.segments {
        let mut current = String::new();
        for ch in segment.text.chars() {
            match ch {
                '\n' => {
                    flush(&mut lines, &mut current, segment.role);
                    lines.push(DisplayLine::new());
                    col = 0;
                }
                '\t' => {
                    let tab_width = TAB_WIDTH - (col % TAB_WIDTH);
                    current.push('\u{2192}'); // →
                    for _ in 1..tab_width {
                        current.push('\u{00b7}'); // ·
                    }
                    col += tab_width;
                }
                _ => {
                    current.push(ch);
                    col += 1;
                }
            }
        }
        flush(&mut lines, &mut current, segment.role);
    }

    lines
}

fn flush(lines: &mut [DisplayLine], text: &mut String, role: Role) {
    let Some(line) = lines.last_mut() else {
        return;
    };
    if text.is_empty() {
        return;
    }
    // a cursor on a newline stays on the line that ends with it
    line.has_cursor |= role == Role::Cursor;
    line.spans.push((std::mem::take(text), role));
}

/// First line to draw so that the cursor line stays inside `height` rows.
fn scroll_offset(lines: &[DisplayLine], width: usize, height: usize) -> u16 {
    let Some(cursor_line) = lines.iter().position(|l| l.has_cursor) else {
        return 0;
    };
    let rows_through_cursor: usize = lines[..=cursor_line]
        .iter()
        .map(|l| wrapped_line_count(&l.text(), width))
        .sum();
    // keep one line of context below the cursor when possible
    let visible = height.saturating_sub(1).max(1);
    rows_through_cursor
        .saturating_sub(visible)
        .try_into()
        .unwrap_or(u16::MAX)
}

impl Widget for TypingArea<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let lines = layout_lines(self.model);

        let block = Block::bordered()
            .border_style(Style::default().fg(self.theme.chrome.border.color()))
            .style(self.theme.base_style());
        let inner = block.inner(area);
        let scroll = scroll_offset(&lines, inner.width as usize, inner.height as usize);

        let ratatui_lines: Vec<Line> = lines
            .into_iter()
            .map(|line| {
                Line::from(
                    line.spans
                        .into_iter()
                        .map(|(text, role)| Span::styled(text, self.theme.role_style(role)))
                        .collect::<Vec<_>>(),
                )
            })
            .collect();

        Paragraph::new(ratatui_lines)
            .block(block)
            .wrap(Wrap { trim: false })
            .scroll((scroll, 0))
            .render(area, buf);
    }
}
