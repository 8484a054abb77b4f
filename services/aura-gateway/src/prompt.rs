//! Instruction prompt sent to the completion provider.

/// Build the sentiment instruction for a piece of user text.
///
/// The text is interpolated verbatim. Nothing stops it from containing
/// instructions of its own; the extraction pipeline validates whatever comes
/// back regardless.
pub fn sentiment_prompt(text: &str) -> String {
    format!(
        r#"Analyze the sentiment of this text and return ONLY a JSON object with this exact format:
{{
    "sentiment": <float between 0 and 1, where 0=very negative, 0.5=neutral, 1=very positive>,
    "emotion": <string: one of "happy", "sad", "angry", "neutral", "excited", "calm">,
    "keywords": <array of 3-5 most important words/topics>
}}

Text to analyze: {text}

Return ONLY the JSON, no other text."#
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sentiment::Emotion;

    #[test]
    fn test_text_is_interpolated_verbatim() {
        let prompt = sentiment_prompt("I love this! {\"ignore\": \"previous\"}");
        assert!(prompt.contains("Text to analyze: I love this! {\"ignore\": \"previous\"}\n"));
        assert!(prompt.ends_with("Return ONLY the JSON, no other text."));
    }

    #[test]
    fn test_empty_text() {
        let prompt = sentiment_prompt("");
        assert!(prompt.contains("Text to analyze: \n"));
    }

    #[test]
    fn test_prompt_lists_every_emotion() {
        let prompt = sentiment_prompt("x");
        for emotion in Emotion::ALL {
            assert!(prompt.contains(&format!("\"{}\"", emotion)));
        }
    }
}
