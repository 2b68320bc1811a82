//! Small lexicon-based sentiment scorer.
//!
//! The core library treats scoring as an opaque oracle; this is the
//! bundled stand-in, good enough to steer the soundscape from typed
//! text without pulling in a model. Token valences come from fixed
//! word lists, a preceding booster word amplifies, and a negation in
//! the three preceding tokens flips polarity at reduced weight.

use murmur_lib::score::SentimentScores;

const POSITIVE_WORDS: &[&str] = &[
    "amazing", "awesome", "beautiful", "bright", "brilliant", "calm", "cheerful", "delight",
    "delightful", "excellent", "fantastic", "fun", "glad", "good", "great", "happy", "hope",
    "hopeful", "joy", "joyful", "kind", "laugh", "like", "likes", "love", "loved", "loves",
    "lovely", "nice", "peaceful", "perfect", "serene", "smile", "success", "superb", "sweet",
    "warm", "win", "wonderful",
];

const NEGATIVE_WORDS: &[&str] = &[
    "afraid", "angry", "anger", "anxious", "awful", "bad", "bitter", "broken", "cold", "cry",
    "dark", "despair", "dread", "fail", "failure", "fear", "gloom", "gloomy", "grim", "hate",
    "hated", "hates", "horrible", "hurt", "lonely", "loss", "lost", "miserable", "pain",
    "painful", "sad", "scared", "storm", "terrible", "ugly", "worried", "worry", "wrong",
];

const BOOSTERS: &[&str] = &[
    "absolutely", "deeply", "extremely", "incredibly", "really", "so", "totally", "utterly",
    "very",
];

const NEGATIONS: &[&str] = &[
    "aint", "cant", "didnt", "doesnt", "dont", "hardly", "isnt", "never", "no", "not",
    "without", "wont",
];

/// Extra valence contributed by a preceding booster word.
const BOOST: f32 = 0.5;

/// Polarity retained when a negation flips a token.
const NEGATION_DAMP: f32 = 0.74;

/// Normalization constant for the compound score.
const COMPOUND_ALPHA: f32 = 15.0;

/// Score one input text.
///
/// Empty or fully unknown input scores as pure neutral.
pub fn score(text: &str) -> SentimentScores {
    let tokens: Vec<String> = text
        .split(|c: char| !c.is_alphanumeric() && c != '\'')
        .filter(|t| !t.is_empty())
        .map(|t| t.to_lowercase().replace('\'', ""))
        .collect();

    let mut sum = 0.0_f32;
    let mut positive = 0.0_f32;
    let mut negative = 0.0_f32;
    let mut neutral = 0.0_f32;

    for (index, token) in tokens.iter().enumerate() {
        let mut valence = if POSITIVE_WORDS.contains(&token.as_str()) {
            1.0
        } else if NEGATIVE_WORDS.contains(&token.as_str()) {
            -1.0
        } else {
            neutral += 1.0;
            continue;
        };

        if index > 0 && BOOSTERS.contains(&tokens[index - 1].as_str()) {
            valence *= 1.0 + BOOST;
        }

        let window = &tokens[index.saturating_sub(3)..index];
        if window.iter().any(|w| NEGATIONS.contains(&w.as_str())) {
            valence = -valence * NEGATION_DAMP;
        }

        if valence > 0.0 {
            positive += valence;
        } else {
            negative += -valence;
        }
        sum += valence;
    }

    let total = positive + negative + neutral;
    if total == 0.0 {
        return SentimentScores::new(0.0, 0.0, 1.0, 0.0);
    }

    let compound = sum / (sum * sum + COMPOUND_ALPHA).sqrt();
    SentimentScores::new(
        positive / total,
        negative / total,
        neutral / total,
        compound,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positive_text_scores_positive() {
        let scores = score("what a wonderful bright morning, I love it");
        assert!(scores.compound > 0.05);
        assert!(scores.positive > scores.negative);
    }

    #[test]
    fn negative_text_scores_negative() {
        let scores = score("this is a terrible, sad and gloomy day");
        assert!(scores.compound < -0.05);
        assert!(scores.negative > scores.positive);
    }

    #[test]
    fn negation_flips_polarity() {
        let plain = score("I am happy");
        let negated = score("I am not happy");
        assert!(plain.compound > 0.0);
        assert!(negated.compound < 0.0);
    }

    #[test]
    fn booster_amplifies_the_compound() {
        let plain = score("the music is good");
        let boosted = score("the music is really good");
        assert!(boosted.compound > plain.compound);
    }

    #[test]
    fn empty_input_is_pure_neutral() {
        let scores = score("   ");
        assert_eq!(scores.neutral, 1.0);
        assert_eq!(scores.compound, 0.0);
    }

    #[test]
    fn scores_stay_bounded() {
        let scores = score("love love love love hate hate very wonderful terrible");
        assert!(scores.positive >= 0.0 && scores.positive <= 1.0);
        assert!(scores.negative >= 0.0 && scores.negative <= 1.0);
        assert!(scores.neutral >= 0.0 && scores.neutral <= 1.0);
        assert!(scores.compound >= -1.0 && scores.compound <= 1.0);
    }
}
