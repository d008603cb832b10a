use super::SignalError;

/// (word, weight) pairs on a -1.0..=1.0 polarity scale.
const LEXICON: &[(&str, f64)] = &[
    // positive
    ("amazing", 0.8),
    ("awesome", 1.0),
    ("beautiful", 0.85),
    ("best", 1.0),
    ("excellent", 1.0),
    ("excited", 0.7),
    ("fantastic", 0.9),
    ("fun", 0.5),
    ("good", 0.7),
    ("great", 0.8),
    ("happy", 0.8),
    ("joy", 0.8),
    ("like", 0.4),
    ("love", 0.6),
    ("nice", 0.6),
    ("perfect", 1.0),
    ("wonderful", 1.0),
    // negative
    ("angry", -0.7),
    ("awful", -1.0),
    ("bad", -0.7),
    ("bored", -0.5),
    ("depressed", -0.9),
    ("disappointed", -0.6),
    ("hate", -0.8),
    ("horrible", -1.0),
    ("lonely", -0.6),
    ("miserable", -0.9),
    ("sad", -0.5),
    ("terrible", -1.0),
    ("tired", -0.4),
    ("worst", -1.0),
];

/// Words that flip the sign of the next sentiment-bearing word.
const NEGATIONS: &[&str] = &["not", "no", "never", "dont", "cant", "isnt", "wasnt"];

fn word_weight(word: &str) -> Option<f64> {
    LEXICON
        .iter()
        .find(|(w, _)| *w == word)
        .map(|(_, weight)| *weight)
}

/// Scores free text on a -1.0..=1.0 polarity scale: the mean weight of
/// lexicon words found in the text, with simple negation flipping.
/// Text with no lexicon hits scores 0.0. Text with no alphabetic words
/// at all is unanalyzable.
pub fn polarity(text: &str) -> Result<f64, SignalError> {
    let words: Vec<String> = text
        .split(|c: char| !c.is_alphabetic())
        .filter(|w| !w.is_empty())
        .map(|w| w.to_lowercase())
        .collect();

    if words.is_empty() {
        return Err(SignalError::Unanalyzable);
    }

    let mut sum = 0.0;
    let mut hits = 0u32;
    let mut negated = false;
    for word in &words {
        if NEGATIONS.contains(&word.as_str()) {
            negated = true;
            continue;
        }
        if let Some(weight) = word_weight(word) {
            sum += if negated { -weight } else { weight };
            hits += 1;
        }
        negated = false;
    }

    if hits == 0 {
        Ok(0.0)
    } else {
        Ok(sum / f64::from(hits))
    }
}

/// Maps free text to three mood labels via polarity thresholds.
pub fn moods_for_text(text: &str) -> Result<[&'static str; 3], SignalError> {
    let polarity = polarity(text)?;
    let labels = if polarity > 0.5 {
        ["Excited", "Happy", "Energetic"]
    } else if polarity > 0.0 {
        ["Positive", "Upbeat", "Cheerful"]
    } else if polarity > -0.5 {
        ["Mellow", "Calm", "Relaxed"]
    } else {
        ["Melancholic", "Sad", "Emotional"]
    };
    Ok(labels)
}
