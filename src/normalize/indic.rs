use tracing::debug;

use super::TextNormalizer;
use super::error::NormalizeError;
use super::script::Script;

const BYTE_ORDER_MARK: char = '\u{FEFF}';

/// Invisible format characters dropped outright. ZWJ and ZWNJ select
/// half-forms in rendering but produce distinct code point sequences.
const DROPPED_FORMAT_CHARS: [char; 5] = [
    '\u{FFFE}', // noncharacter (byte-swapped BOM)
    '\u{2060}', // word joiner
    '\u{00AD}', // soft hyphen
    '\u{200C}', // zero width non-joiner
    '\u{200D}', // zero width joiner
];

/// Space variants folded into an ASCII space.
const SPACE_VARIANTS: [char; 2] = [
    '\u{200B}', // zero width space
    '\u{00A0}', // no-break space
];

const DEVANAGARI_NUKTA: char = '\u{093C}';
const DEVANAGARI_VISARGA: char = '\u{0903}';
const DEVANAGARI_DANDA: char = '\u{0964}';
const DEVANAGARI_LETTER_A: char = '\u{0905}';
const MARATHI_CHANDRA_A: char = '\u{0972}';

/// Block offsets of chandra forms and the plain forms they fold into.
const CHANDRA_FOLDS: [(u32, u32); 6] = [
    (0x0D, 0x0F), // independent candra e
    (0x11, 0x13), // independent candra o
    (0x45, 0x47), // candra e sign
    (0x49, 0x4B), // candra o sign
    (0x00, 0x02), // inverted candrabindu
    (0x01, 0x02), // candrabindu
];

/// Switches for the optional normalization rules.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NormalizerOptions {
    /// Drop nukta signs after decomposing precomposed nukta letters.
    pub remove_nuktas: bool,
    /// Fold candra vowels and candrabindu into their plain forms.
    pub normalize_chandras: bool,
}

/// Script-aware canonicalizer for Indic text.
///
/// Every script gets the shared punctuation rules. Devanagari additionally
/// decomposes precomposed nukta letters, maps `|` to a danda and repairs
/// ASCII colons used as visarga.
#[derive(Debug, Clone)]
pub struct IndicNormalizer {
    language: String,
    script: Script,
    options: NormalizerOptions,
}

impl IndicNormalizer {
    /// Builds a normalizer for `language` (an ISO 639 code such as `hi` or `mr`).
    pub fn new(language: &str, options: NormalizerOptions) -> Result<Self, NormalizeError> {
        let script =
            Script::for_language(language).ok_or_else(|| NormalizeError::UnsupportedLanguage {
                language: language.to_string(),
            })?;

        debug!(language, %script, ?options, "Initialized Indic normalizer");

        Ok(Self {
            language: language.trim().to_ascii_lowercase(),
            script,
            options,
        })
    }

    pub fn script(&self) -> Script {
        self.script
    }

    pub fn options(&self) -> NormalizerOptions {
        self.options
    }

    fn check_input(&self, text: &str) -> Result<(), NormalizeError> {
        if text.trim().is_empty() {
            return Err(NormalizeError::EmptyInput);
        }
        if !text.chars().any(|c| self.script.contains(c)) {
            return Err(NormalizeError::WrongScript {
                language: self.language.clone(),
                script: self.script.name(),
            });
        }
        Ok(())
    }

    fn fold_chandras(&self, text: &str) -> String {
        text.chars()
            .map(|c| {
                self.script
                    .offset_of(c)
                    .and_then(|offset| {
                        CHANDRA_FOLDS
                            .iter()
                            .find(|(from, _)| *from == offset)
                            .and_then(|(_, to)| self.script.char_at(*to))
                    })
                    .unwrap_or(c)
            })
            .collect()
    }
}

impl TextNormalizer for IndicNormalizer {
    fn normalize(&self, text: &str) -> Result<String, NormalizeError> {
        self.check_input(text)?;

        let mut out = normalize_punctuation(&strip_format_chars(text));
        if self.options.normalize_chandras {
            out = self.fold_chandras(&out);
        }
        if self.script == Script::Devanagari {
            out = normalize_devanagari(&out, self.options.remove_nuktas);
        }
        Ok(out)
    }

    fn language(&self) -> &str {
        &self.language
    }
}

/// Drops invisible format characters and folds space variants.
pub(crate) fn strip_format_chars(text: &str) -> String {
    text.chars()
        .filter(|c| *c != BYTE_ORDER_MARK && !DROPPED_FORMAT_CHARS.contains(c))
        .map(|c| if SPACE_VARIANTS.contains(&c) { ' ' } else { c })
        .collect()
}

/// Punctuation canonicalization shared by all scripts.
///
/// Order matters: curly single quotes become `'` before `''` collapses to `"`.
pub(crate) fn normalize_punctuation(text: &str) -> String {
    text.replace(['„', '“', '”'], "\"")
        .replace('–', "-")
        .replace('—', " - ")
        .replace(['´', '‘', '‚', '’'], "'")
        .replace("''", "\"")
        .replace('…', "...")
}

/// Precomposed nukta letters and their base consonants.
fn nukta_base(c: char) -> Option<char> {
    let base = match c {
        '\u{0929}' => '\u{0928}', // nnna
        '\u{0931}' => '\u{0930}', // rra
        '\u{0934}' => '\u{0933}', // llla
        '\u{0958}' => '\u{0915}', // qa
        '\u{0959}' => '\u{0916}', // khha
        '\u{095A}' => '\u{0917}', // ghha
        '\u{095B}' => '\u{091C}', // za
        '\u{095C}' => '\u{0921}', // dddha
        '\u{095D}' => '\u{0922}', // rha
        '\u{095E}' => '\u{092B}', // fa
        '\u{095F}' => '\u{092F}', // yya
        _ => return None,
    };
    Some(base)
}

pub(crate) fn normalize_devanagari(text: &str, remove_nuktas: bool) -> String {
    let mut decomposed = String::with_capacity(text.len() + 8);
    for c in text.chars() {
        match c {
            MARATHI_CHANDRA_A => decomposed.push(DEVANAGARI_LETTER_A),
            DEVANAGARI_NUKTA if remove_nuktas => {}
            '|' => decomposed.push(DEVANAGARI_DANDA),
            _ => match nukta_base(c) {
                Some(base) => {
                    decomposed.push(base);
                    if !remove_nuktas {
                        decomposed.push(DEVANAGARI_NUKTA);
                    }
                }
                None => decomposed.push(c),
            },
        }
    }

    // A colon directly after a Devanagari character is a mistyped visarga.
    // Only the character that preceded it in the input counts, so "क::" keeps its second colon.
    let mut out = String::with_capacity(decomposed.len());
    let mut prev: Option<char> = None;
    for c in decomposed.chars() {
        if c == ':' && prev.is_some_and(|p| Script::Devanagari.contains(p)) {
            out.push(DEVANAGARI_VISARGA);
        } else {
            out.push(c);
        }
        prev = Some(c);
    }
    out
}
