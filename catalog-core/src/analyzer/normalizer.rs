use memchr::memmem;

/// Configuration options for text normalization.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NormalizerConfig {
    /// When enabled, strips diacritical marks from Latin characters.
    /// For example, "Bogotá" becomes "bogota".
    pub strip_diacritics: bool,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            strip_diacritics: true,
        }
    }
}

/// Canonicalizes text for matching.
///
/// Performs the following operations:
/// - Converts all characters to lowercase (Unicode-aware)
/// - Strips diacritical marks from Latin characters (precomposed or combining)
/// - Collapses runs of whitespace into single spaces
/// - Removes leading/trailing whitespace
///
/// The output is a fixed point: normalizing it again yields the same string.
/// Every comparison in the engine (index terms, substring facets, the
/// free-provider check, the planner guard) goes through this type so that
/// search and filters agree on what "matches" means.
///
/// # Examples
///
/// ```
/// use catalog_core::analyzer::TextNormalizer;
///
/// let normalizer = TextNormalizer::default();
/// assert_eq!(normalizer.normalize("  BOGOTÁ   D.C. "), "bogota d.c.");
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct TextNormalizer {
    config: NormalizerConfig,
}

impl TextNormalizer {
    /// Creates a new normalizer with the specified configuration.
    pub const fn new(config: NormalizerConfig) -> Self {
        Self { config }
    }

    /// Normalizes text into an existing String buffer.
    ///
    /// Clears the buffer before writing and reuses its capacity.
    pub fn normalize_into(&self, input: &str, out: &mut String) {
        out.clear();
        out.reserve(input.len());

        let strip = self.config.strip_diacritics;
        let mut pending_space = false;

        for ch in input.chars() {
            if ch.is_whitespace() {
                pending_space = true;
                continue;
            }

            if ch.is_ascii() {
                push_char(out, ch.to_ascii_lowercase(), &mut pending_space);
                continue;
            }

            for lowered in ch.to_lowercase() {
                let folded = if strip {
                    fold_latin(lowered)
                } else {
                    Some(lowered)
                };
                if let Some(c) = folded {
                    push_char(out, c, &mut pending_space);
                }
            }
        }
    }

    /// Normalizes text and returns a new String.
    #[inline]
    pub fn normalize(&self, input: &str) -> String {
        let mut out = String::with_capacity(input.len());
        self.normalize_into(input, &mut out);
        out
    }
}

/// Normalizes `text` with the default (diacritic-stripping) configuration.
#[inline]
pub fn normalize(text: &str) -> String {
    TextNormalizer::default().normalize(text)
}

/// Normalizes optional text; absent input yields an empty string.
#[inline]
pub fn normalize_opt(text: Option<&str>) -> String {
    text.map(normalize).unwrap_or_default()
}

/// Substring test over already-normalized text.
///
/// An empty needle matches everything.
#[inline]
pub fn contains_normalized(haystack: &str, needle: &str) -> bool {
    needle.is_empty() || memmem::find(haystack.as_bytes(), needle.as_bytes()).is_some()
}

#[inline(always)]
fn push_char(out: &mut String, c: char, pending_space: &mut bool) {
    if *pending_space && !out.is_empty() {
        out.push(' ');
    }
    *pending_space = false;
    out.push(c);
}

/// Maps a lowercase Latin letter to its unaccented base.
///
/// Returns `None` for combining marks so decomposed input ("e\u{301}") folds
/// the same way as precomposed input ("é").
#[inline(always)]
fn fold_latin(c: char) -> Option<char> {
    if ('\u{0300}'..='\u{036F}').contains(&c) {
        return None;
    }

    Some(match c {
        'á' | 'à' | 'â' | 'ä' | 'ã' | 'å' | 'ā' | 'ă' | 'ą' | 'æ' => 'a',
        'ç' | 'ć' | 'č' | 'ĉ' | 'ċ' => 'c',
        'ð' | 'đ' | 'ď' => 'd',
        'é' | 'è' | 'ê' | 'ë' | 'ē' | 'ĕ' | 'ė' | 'ę' | 'ě' => 'e',
        'ğ' | 'ĝ' | 'ġ' | 'ģ' => 'g',
        'í' | 'ì' | 'î' | 'ï' | 'ī' | 'ĭ' | 'į' | 'ı' => 'i',
        'ł' => 'l',
        'ñ' | 'ń' | 'ň' | 'ņ' => 'n',
        'ó' | 'ò' | 'ô' | 'ö' | 'õ' | 'ō' | 'ŏ' | 'ő' | 'ø' | 'œ' => 'o',
        'ř' => 'r',
        'ś' | 'š' | 'ş' | 'ß' => 's',
        'ť' | 'ţ' => 't',
        'ú' | 'ù' | 'û' | 'ü' | 'ū' | 'ŭ' | 'ů' | 'ű' | 'ų' => 'u',
        'ý' | 'ÿ' => 'y',
        'ź' | 'ž' | 'ż' => 'z',
        _ => c,
    })
}
