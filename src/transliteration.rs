use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Transliteration utilities
///
/// Converts Cyrillic and Greek script to Latin letters so a song written in
/// one script can carry a readable secondary line. Characters without a
/// mapping (including Latin text) pass through unchanged.
static TRANSLITERATION_TABLE: Lazy<HashMap<char, &'static str>> = Lazy::new(|| {
    let pairs: &[(char, &str)] = &[
        // Russian / shared Cyrillic
        ('а', "a"), ('б', "b"), ('в', "v"), ('г', "g"), ('д', "d"), ('е', "e"),
        ('ё', "yo"), ('ж', "zh"), ('з', "z"), ('и', "i"), ('й', "y"), ('к', "k"),
        ('л', "l"), ('м', "m"), ('н', "n"), ('о', "o"), ('п', "p"), ('р', "r"),
        ('с', "s"), ('т', "t"), ('у', "u"), ('ф', "f"), ('х', "kh"), ('ц', "ts"),
        ('ч', "ch"), ('ш', "sh"), ('щ', "shch"), ('ъ', ""), ('ы', "y"), ('ь', ""),
        ('э', "e"), ('ю', "yu"), ('я', "ya"),
        // Ukrainian / Belarusian
        ('є', "ye"), ('і', "i"), ('ї', "yi"), ('ґ', "g"), ('ў', "u"),
        // Serbian / Macedonian
        ('ђ', "dj"), ('ј', "j"), ('љ', "lj"), ('њ', "nj"), ('ћ', "c"), ('џ', "dz"),
        // Greek
        ('α', "a"), ('β', "v"), ('γ', "g"), ('δ', "d"), ('ε', "e"), ('ζ', "z"),
        ('η', "i"), ('θ', "th"), ('ι', "i"), ('κ', "k"), ('λ', "l"), ('μ', "m"),
        ('ν', "n"), ('ξ', "x"), ('ο', "o"), ('π', "p"), ('ρ', "r"), ('σ', "s"),
        ('ς', "s"), ('τ', "t"), ('υ', "y"), ('φ', "f"), ('χ', "ch"), ('ψ', "ps"),
        ('ω', "o"), ('ά', "a"), ('έ', "e"), ('ή', "i"), ('ί', "i"), ('ό', "o"),
        ('ύ', "y"), ('ώ', "o"),
    ];
    pairs.iter().copied().collect()
});

/// Transliterate a line to Latin script
pub fn transliterate(text: &str) -> String {
    let mut result = String::with_capacity(text.len());

    for ch in text.chars() {
        let lower = ch.to_lowercase().next().unwrap_or(ch);
        match TRANSLITERATION_TABLE.get(&lower) {
            Some(latin) if ch != lower => result.push_str(&capitalize(latin)),
            Some(latin) => result.push_str(latin),
            None => result.push(ch),
        }
    }

    result
}

/// Whether a line contains characters that transliteration would change
pub fn needs_transliteration(text: &str) -> bool {
    text.chars()
        .any(|ch| TRANSLITERATION_TABLE.contains_key(&ch.to_lowercase().next().unwrap_or(ch)))
}

fn capitalize(latin: &str) -> String {
    let mut chars = latin.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Remove from `secondary` every word that also appears in `primary`.
///
/// Words are compared case-insensitively with surrounding punctuation
/// ignored; the remaining words keep their original spelling and order.
pub fn remove_identical_words(primary: &str, secondary: &str) -> String {
    let primary_words: Vec<String> = primary.split_whitespace().map(word_key).collect();

    secondary
        .split_whitespace()
        .filter(|word| {
            let key = word_key(word);
            key.is_empty() || !primary_words.contains(&key)
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn word_key(word: &str) -> String {
    word.trim_matches(|c: char| !c.is_alphanumeric()).to_lowercase()
}
