//! Roast personas and system instruction assembly
//!
//! Each (intensity, language) pair maps to one persona. The persona is
//! wrapped with the language rule and the JSON shape the model has to
//! produce.

use crate::roast::{Language, RoastIntensity};

/// The fixed user turn sent alongside the resume
pub const USER_INSTRUCTION: &str = "Roast this resume. Give me the hard truth.";

/// Built-in persona texts
pub mod builtin {
    pub const MILD_ENGLISH: &str = "You are a professional career coach. Provide constructive feedback with a hint of humor. Be helpful but point out the flaws clearly.";

    pub const MILD_HINDI: &str = "You are a career coach in India. Mix English and Hindi. Be helpful but point out mistakes. Use phrases like 'Thoda improve karo', 'potential hai boss'.";

    pub const SPICY_ENGLISH: &str = "You are a jaded recruiter who has seen thousands of resumes. Be sarcastic, point out clichés, and make fun of vague buzzwords. Don't hold back on formatting errors.";

    pub const SPICY_HINDI: &str = "You are a frustrated HR recruiter in Gurgaon/Bangalore. Speak in Hinglish (Hindi+English). Be sarcastic. Use words like 'Kya mazaak hai', 'Time pass mat karo', 'Copy paste lag raha hai'. Roast the formatting.";

    pub const SCORCHED_EARTH_ENGLISH: &str = "You are a ruthless comedy roaster. Destroy this resume. Mock the layout, the font choices, the content, and the person's life choices implied by the resume. Be brutal, funny, and devastatingly honest. No mercy.";

    pub const SCORCHED_EARTH_HINDI: &str = "You are a savage Indian roaster (like a brutal relative or strict boss). Speak in Hinglish (heavy slang). Destroy the resume. Use phrases like 'Ekdum bekar hai', 'Raddi mein bech do', 'Bhai kya kar raha hai tu?', 'Chappal se maarega interviewer'. Be absolutely ruthless and funny.";

    pub const ENGLISH_RULE: &str = "- Output MUST be in STRICT ENGLISH. Do not use any Hindi words, slang, or phrases. Standard US/UK English only.";

    pub const HINGLISH_RULE: &str = "- Output MUST be in HINGLISH (Romanized Hindi mixed with English). Use Devanagari script sparingly for comedic effect if needed.";

    pub const RESPONSE_SHAPE: &str = r#"- Return a structured JSON response.

Structure the response as follows:
1. 'oneLiner': A single, savage, summary sentence roasting the resume.
2. 'sections': An array of 3-4 thematic sections (e.g., "Design Disaster", "Buzzword Salad", "Content Void"). Each section has a 'title' and 'content' (list of strings).
3. 'score': A number from 0 to 100 representing the quality of the resume (0 = terrible, 100 = perfect)."#;
}

/// Look up the persona for an intensity/language pair
pub fn persona(intensity: RoastIntensity, language: Language) -> &'static str {
    match (intensity, language) {
        (RoastIntensity::Mild, Language::English) => builtin::MILD_ENGLISH,
        (RoastIntensity::Mild, Language::Hindi) => builtin::MILD_HINDI,
        (RoastIntensity::Spicy, Language::English) => builtin::SPICY_ENGLISH,
        (RoastIntensity::Spicy, Language::Hindi) => builtin::SPICY_HINDI,
        (RoastIntensity::ScorchedEarth, Language::English) => builtin::SCORCHED_EARTH_ENGLISH,
        (RoastIntensity::ScorchedEarth, Language::Hindi) => builtin::SCORCHED_EARTH_HINDI,
    }
}

/// The output-language rule for a language
pub fn language_rule(language: Language) -> &'static str {
    match language {
        Language::English => builtin::ENGLISH_RULE,
        Language::Hindi => builtin::HINGLISH_RULE,
    }
}

/// Build the full system instruction sent to the model
pub fn build(intensity: RoastIntensity, language: Language) -> String {
    format!(
        "{}\n\nAnalyze the uploaded resume image/pdf.\n\nIMPORTANT GUIDELINES:\n{}\n\n{}",
        persona(intensity, language),
        language_rule(language),
        builtin::RESPONSE_SHAPE
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_persona_table() {
        let cases = [
            (RoastIntensity::Mild, Language::English, "professional career coach"),
            (RoastIntensity::Mild, Language::Hindi, "potential hai boss"),
            (RoastIntensity::Spicy, Language::English, "jaded recruiter"),
            (RoastIntensity::Spicy, Language::Hindi, "Kya mazaak hai"),
            (RoastIntensity::ScorchedEarth, Language::English, "ruthless comedy roaster"),
            (RoastIntensity::ScorchedEarth, Language::Hindi, "Chappal se maarega interviewer"),
        ];

        for (intensity, language, fragment) in cases {
            let prompt = build(intensity, language);
            assert!(
                prompt.starts_with(persona(intensity, language)),
                "{intensity}/{language} should open with its persona"
            );
            assert!(prompt.contains(fragment), "{intensity}/{language} missing '{fragment}'");
        }
    }

    #[test]
    fn test_personas_are_distinct() {
        let mut seen = std::collections::HashSet::new();
        for intensity in RoastIntensity::ALL {
            for language in Language::ALL {
                assert!(seen.insert(persona(intensity, language)));
            }
        }
        assert_eq!(seen.len(), 6);
    }

    #[test]
    fn test_language_rule_is_exclusive() {
        for intensity in RoastIntensity::ALL {
            let english = build(intensity, Language::English);
            assert!(english.contains("STRICT ENGLISH"));
            assert!(!english.contains("HINGLISH"));

            let hindi = build(intensity, Language::Hindi);
            assert!(hindi.contains("HINGLISH"));
            assert!(!hindi.contains("STRICT ENGLISH"));
        }
    }

    #[test]
    fn test_build_is_deterministic_and_describes_shape() {
        let a = build(RoastIntensity::Spicy, Language::English);
        let b = build(RoastIntensity::Spicy, Language::English);
        assert_eq!(a, b);
        assert!(a.contains("'oneLiner'"));
        assert!(a.contains("'sections'"));
        assert!(a.contains("'score'"));
        assert!(a.contains("0 to 100"));
    }
}
