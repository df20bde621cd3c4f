use std::fmt;
use std::time::Duration;

use crate::language::Language;
use crate::session::mode::ModeKind;

/// Summary of a finished session.
#[derive(Clone, Debug, PartialEq)]
pub struct SessionResult {
    pub mode: ModeKind,
    pub language: Language,
    pub wpm: f64,
    pub elapsed: Duration,
    /// Words in the text the WPM was measured against.
    pub words: f64,
    /// Characters typed when the session ended.
    pub chars: usize,
    /// True when the session ended before the target was typed out.
    pub partial: bool,
}

/// `MM:SS`, minutes are not wrapped at an hour.
pub fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

impl fmt::Display for SessionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Completed in {} \u{b7} WPM {:.2}",
            format_duration(self.elapsed),
            self.wpm
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(elapsed: Duration, wpm: f64) -> SessionResult {
        SessionResult {
            mode: ModeKind::Quote,
            language: Language::new("english"),
            wpm,
            elapsed,
            words: 10.0,
            chars: 50,
            partial: false,
        }
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::ZERO), "00:00");
        assert_eq!(format_duration(Duration::from_millis(59_999)), "00:59");
        assert_eq!(format_duration(Duration::from_secs(75)), "01:15");
        assert_eq!(format_duration(Duration::from_secs(3600)), "60:00");
    }

    #[test]
    fn test_completion_line() {
        let line = result(Duration::from_secs(42), 61.234).to_string();
        assert_eq!(line, "Completed in 00:42 \u{b7} WPM 61.23");
    }
}
