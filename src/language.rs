use std::fmt;

use serde::Deserialize;
use thiserror::Error;

/// Prefix shared by every programming-language tag (`code_go`, `code_rust`, ...).
pub const CODE_PREFIX: &str = "code_";

/// Languages with a bundled word list, in the order they are listed to users.
const SUPPORTED: &[&str] = &[
    "english",
    "spanish",
    "french",
    "chinese",
    "code_assembly",
    "code_c",
    "code_cpp",
    "code_csharp",
    "code_css",
    "code_go",
    "code_java",
    "code_javascript",
    "code_kotlin",
    "code_lua",
    "code_php",
    "code_python",
    "code_r",
    "code_ruby",
    "code_rust",
    "code_typescript",
];

const ALIASES: &[(&str, &str)] = &[
    ("en", "english"),
    ("eng", "english"),
    ("es", "spanish"),
    ("fr", "french"),
    ("zh", "chinese"),
    ("zh_cn", "chinese"),
    ("chinese_simplified", "chinese"),
    ("assembly", "code_assembly"),
    ("asm", "code_assembly"),
    ("c", "code_c"),
    ("cpp", "code_cpp"),
    ("c++", "code_cpp"),
    ("csharp", "code_csharp"),
    ("c#", "code_csharp"),
    ("css", "code_css"),
    ("go", "code_go"),
    ("golang", "code_go"),
    ("java", "code_java"),
    ("javascript", "code_javascript"),
    ("js", "code_javascript"),
    ("kotlin", "code_kotlin"),
    ("lua", "code_lua"),
    ("php", "code_php"),
    ("python", "code_python"),
    ("py", "code_python"),
    ("r", "code_r"),
    ("ruby", "code_ruby"),
    ("rust", "code_rust"),
    ("rs", "code_rust"),
    ("typescript", "code_typescript"),
    ("ts", "code_typescript"),
];

/// Names that title-casing the tag would get wrong.
const DISPLAY_NAMES: &[(&str, &str)] = &[
    ("code_cpp", "C++"),
    ("code_csharp", "C#"),
    ("code_css", "CSS"),
    ("code_javascript", "JavaScript"),
    ("code_php", "PHP"),
    ("code_typescript", "TypeScript"),
];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LanguageError {
    #[error("unsupported language '{input}'. Supported languages: {supported}")]
    Unsupported { input: String, supported: String },
}

/// A corpus language tag such as `english` or `code_go`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(transparent)]
pub struct Language(String);

impl Language {
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_code(&self) -> bool {
        self.0.starts_with(CODE_PREFIX)
    }

    /// `code` for programming languages, otherwise the part before the first `_`.
    pub fn family(&self) -> &str {
        if self.is_code() {
            "code"
        } else {
            self.0.split('_').next().unwrap_or_default()
        }
    }

    pub fn is_chinese(&self) -> bool {
        self.family() == "chinese"
    }

    /// C, C++, C# and friends. CSS shares the prefix but not the operators.
    pub fn is_c_family(&self) -> bool {
        self.0.starts_with("code_c") && !self.0.starts_with("code_css")
    }

    pub fn uses_backtick(&self) -> bool {
        matches!(self.0.as_str(), "code_javascript" | "code_typescript")
    }

    pub fn display_name(&self) -> String {
        if let Some((_, name)) = DISPLAY_NAMES.iter().find(|(tag, _)| *tag == self.0) {
            return name.to_string();
        }
        let value = self.0.replace(['_', '-'], " ");
        let value = value.trim();
        let value = value.strip_prefix("code ").unwrap_or(value).trim();
        if value.is_empty() {
            return "Unknown".to_string();
        }
        value
            .split_whitespace()
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect(),
                    None => String::new(),
                }
            })
            .collect::<Vec<String>>()
            .join(" ")
    }

    /// Resolve user input (`Go`, `code-go`, `js`, ...) to a supported tag.
    pub fn parse(input: &str) -> Result<Self, LanguageError> {
        let key = input.trim().to_lowercase().replace('-', "_");
        if SUPPORTED.contains(&key.as_str()) {
            return Ok(Self(key));
        }
        if let Some((_, tag)) = ALIASES.iter().find(|(alias, _)| *alias == key) {
            return Ok(Self::new(*tag));
        }
        Err(LanguageError::Unsupported {
            input: input.to_string(),
            supported: SUPPORTED.join(", "),
        })
    }

    pub fn supported() -> Vec<Language> {
        SUPPORTED.iter().map(|tag| Language::new(*tag)).collect()
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
