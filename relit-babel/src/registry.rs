//! Language registry and file naming
//!
//! Maps languages to their comment marker and file extensions, and derives the
//! conversion direction, language and output name from file names.
//!
//! The text source of `foo.py` is `foo.py.txt`: a trailing text extension marks
//! the text side, the extension under it names the language.

use crate::error::{ConvertError, Result};
use crate::options::Direction;
use std::collections::HashMap;
use std::path::Path;

/// Extension of text sources, without the leading dot.
pub const TEXT_EXTENSION: &str = "txt";

/// Fallback extension when no better output name can be guessed.
pub const FALLBACK_EXTENSION: &str = "out";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Language {
    pub name: String,
    pub comment_marker: String,
    /// File extensions without the leading dot.
    pub extensions: Vec<String>,
}

impl Language {
    pub fn new(name: &str, comment_marker: &str, extensions: &[&str]) -> Self {
        Language {
            name: name.to_string(),
            comment_marker: comment_marker.to_string(),
            extensions: extensions.iter().map(|e| e.to_string()).collect(),
        }
    }
}

/// Registry of known languages
///
/// # Examples
///
/// ```ignore
/// let registry = LanguageRegistry::with_defaults();
/// assert_eq!(registry.detect_language_from_filename("foo.py"), Some("python".to_string()));
/// assert_eq!(registry.get("python")?.comment_marker, "# ");
/// ```
pub struct LanguageRegistry {
    languages: HashMap<String, Language>,
}

impl LanguageRegistry {
    pub fn new() -> Self {
        LanguageRegistry {
            languages: HashMap::new(),
        }
    }

    /// Register a language, replacing any language of the same name.
    pub fn register(&mut self, language: Language) {
        self.languages.insert(language.name.clone(), language);
    }

    pub fn get(&self, name: &str) -> Result<&Language> {
        self.languages
            .get(name)
            .ok_or_else(|| ConvertError::UnknownLanguage(name.to_string()))
    }

    pub fn has(&self, name: &str) -> bool {
        self.languages.contains_key(name)
    }

    /// All language names (sorted)
    pub fn list_languages(&self) -> Vec<String> {
        let mut names: Vec<_> = self.languages.keys().cloned().collect();
        names.sort();
        names
    }

    /// Language whose extensions include the extension of `filename`.
    pub fn detect_language_from_filename(&self, filename: &str) -> Option<String> {
        let extension = extension_of(filename)?;
        let mut matches: Vec<&Language> = self
            .languages
            .values()
            .filter(|language| language.extensions.iter().any(|e| e == extension))
            .collect();
        // Deterministic pick when two languages claim one extension.
        matches.sort_by(|a, b| a.name.cmp(&b.name));
        matches.first().map(|language| language.name.clone())
    }

    pub fn is_text_file(&self, filename: &str) -> bool {
        extension_of(filename) == Some(TEXT_EXTENSION)
    }

    pub fn is_code_file(&self, filename: &str) -> bool {
        self.detect_language_from_filename(filename).is_some()
    }

    /// Direction implied by the file names, `TextToCode` when nothing tells.
    pub fn guess_direction(&self, infile: &str, outfile: Option<&str>) -> Direction {
        if self.is_text_file(infile) {
            return Direction::TextToCode;
        }
        if self.is_code_file(infile) {
            return Direction::CodeToText;
        }
        match outfile {
            Some(outfile) if self.is_text_file(outfile) => Direction::CodeToText,
            _ => Direction::TextToCode,
        }
    }

    /// Output file name matching `infile`.
    ///
    /// - `-` (stdin) maps to `-` (stdout)
    /// - a text source loses its text extension
    /// - a code source (or any input converted to text) gains one
    /// - anything else gets `.out`
    pub fn outfile_name(&self, infile: &str, direction: Option<Direction>) -> String {
        if infile == "-" {
            return "-".to_string();
        }
        if self.is_text_file(infile) {
            return infile[..infile.len() - TEXT_EXTENSION.len() - 1].to_string();
        }
        if self.is_code_file(infile) || direction == Some(Direction::CodeToText) {
            return format!("{infile}.{TEXT_EXTENSION}");
        }
        format!("{infile}.{FALLBACK_EXTENSION}")
    }

    /// Language named by the code-side file of a conversion, if any.
    pub fn guess_language(
        &self,
        infile: &str,
        outfile: &str,
        direction: Direction,
    ) -> Option<String> {
        let code_file = match direction {
            Direction::TextToCode => outfile,
            Direction::CodeToText => infile,
        };
        self.detect_language_from_filename(code_file)
    }

    /// Registry with the built-in languages
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Language::new("python", "# ", &["py"]));
        registry.register(Language::new("slang", "% ", &["sl"]));
        registry.register(Language::new("c++", "// ", &["c", "cpp", "h", "hpp"]));
        registry
    }
}

impl Default for LanguageRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

fn extension_of(filename: &str) -> Option<&str> {
    Path::new(filename).extension().and_then(|ext| ext.to_str())
}
