//! Indic scripts and the language codes that map onto them.

/// Size of every Indic Unicode block (U+0900..U+0D7F are laid out in 128-codepoint blocks).
const BLOCK_LEN: u32 = 0x80;

/// A Brahmic script with its own Unicode block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Script {
    Devanagari,
    Bengali,
    Gurmukhi,
    Gujarati,
    Oriya,
    Tamil,
    Telugu,
    Kannada,
    Malayalam,
}

impl Script {
    /// Resolves an ISO 639 language code (case-insensitive) to its script.
    pub fn for_language(language: &str) -> Option<Self> {
        let script = match language.trim().to_ascii_lowercase().as_str() {
            "hi" | "mr" | "sa" | "ne" | "kok" | "mai" | "bho" | "sd" => Script::Devanagari,
            "bn" | "as" => Script::Bengali,
            "pa" => Script::Gurmukhi,
            "gu" => Script::Gujarati,
            "or" => Script::Oriya,
            "ta" => Script::Tamil,
            "te" => Script::Telugu,
            "kn" => Script::Kannada,
            "ml" => Script::Malayalam,
            _ => return None,
        };
        Some(script)
    }

    /// First codepoint of the script's Unicode block.
    pub fn block_start(self) -> u32 {
        match self {
            Script::Devanagari => 0x0900,
            Script::Bengali => 0x0980,
            Script::Gurmukhi => 0x0A00,
            Script::Gujarati => 0x0A80,
            Script::Oriya => 0x0B00,
            Script::Tamil => 0x0B80,
            Script::Telugu => 0x0C00,
            Script::Kannada => 0x0C80,
            Script::Malayalam => 0x0D00,
        }
    }

    /// Returns `true` if `c` lies in this script's block.
    pub fn contains(self, c: char) -> bool {
        let start = self.block_start();
        (start..start + BLOCK_LEN).contains(&(c as u32))
    }

    /// Returns the character at `offset` within the block.
    pub(crate) fn char_at(self, offset: u32) -> Option<char> {
        char::from_u32(self.block_start() + offset)
    }

    /// Offset of `c` within the block, if it belongs to it.
    pub(crate) fn offset_of(self, c: char) -> Option<u32> {
        self.contains(c).then(|| c as u32 - self.block_start())
    }

    pub fn name(self) -> &'static str {
        match self {
            Script::Devanagari => "Devanagari",
            Script::Bengali => "Bengali",
            Script::Gurmukhi => "Gurmukhi",
            Script::Gujarati => "Gujarati",
            Script::Oriya => "Oriya",
            Script::Tamil => "Tamil",
            Script::Telugu => "Telugu",
            Script::Kannada => "Kannada",
            Script::Malayalam => "Malayalam",
        }
    }
}

impl std::fmt::Display for Script {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
