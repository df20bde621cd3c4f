use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Widget};

use crate::generator::GenerateOptions;
use crate::language::Language;
use crate::session::mode::ModeKind;
use crate::ui::theme::Theme;

pub struct Header<'a> {
    pub mode: ModeKind,
    pub detail: Option<String>,
    pub language: &'a Language,
    pub options: GenerateOptions,
    pub theme: &'a Theme,
}

impl Header<'_> {
    fn summary(&self) -> String {
        let mut parts = vec![self.mode.to_string()];
        if let Some(detail) = &self.detail {
            parts.push(detail.clone());
        }
        parts.push(self.language.display_name());
        if self.options.punctuation {
            parts.push("punctuation".to_string());
        }
        if self.options.numbers {
            parts.push("numbers".to_string());
        }
        parts.join(" \u{b7} ")
    }
}

impl Widget for Header<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let chrome = &self.theme.chrome;
        let bar = chrome.title_bar.color();
        let line = Line::from(vec![
            Span::styled(
                " typetest ",
                Style::default()
                    .fg(chrome.title.color())
                    .bg(bar)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!(" {}", self.summary()),
                Style::default().fg(chrome.foreground.color()).bg(bar),
            ),
        ]);
        Paragraph::new(line)
            .style(Style::default().bg(bar))
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_lists_active_options() {
        let theme = Theme::default();
        let language = Language::new("code_go");
        let header = Header {
            mode: ModeKind::Time,
            detail: Some("30s".to_string()),
            language: &language,
            options: GenerateOptions {
                numbers: true,
                punctuation: false,
            },
            theme: &theme,
        };
        assert_eq!(header.summary(), "time \u{b7} 30s \u{b7} Go \u{b7} numbers");
    }
}
