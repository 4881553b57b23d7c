//! Oracle backed by a hosted language model.

use super::{Difficulty, Judgement, OracleError, WordOracle};
use crate::llm_client::LlmClient;
use strictly_chain::required_letter;
use tracing::{debug, instrument, warn};

const REFEREE_PROMPT: &str = "You are an English dictionary referee.";

/// [`WordOracle`] that asks an LLM to judge, propose and recap words.
#[derive(Debug, Clone)]
pub struct LlmOracle {
    client: LlmClient,
}

impl LlmOracle {
    /// Creates an oracle over an LLM client.
    #[instrument(skip(client))]
    pub fn new(client: LlmClient) -> Self {
        Self { client }
    }

    fn validation_prompt(word: &str, previous: Option<&str>) -> String {
        let task = match (previous, required_letter(previous)) {
            (Some(previous), Some(letter)) => format!(
                "The previous word was \"{previous}\". The new word \"{word}\" MUST be a valid \
                 English word AND MUST start with the letter \"{letter}\"."
            ),
            _ => format!("Check if \"{word}\" is a real, valid English dictionary word."),
        };

        format!(
            "{task}\nReturn JSON only:\n\
             {{\"isValid\": boolean, \"definition\": \"Short English definition\", \
             \"error\": \"Reason why invalid (only if isValid is false)\"}}"
        )
    }
}

/// Pulls the JSON object out of a reply that may be wrapped in prose or code fences.
#[instrument(skip(reply))]
pub(crate) fn parse_judgement(reply: &str) -> Result<Judgement, OracleError> {
    let start = reply.find('{');
    let end = reply.rfind('}');

    let json = match (start, end) {
        (Some(start), Some(end)) if start < end => &reply[start..=end],
        _ => {
            warn!(reply = %reply, "No JSON object in oracle reply");
            return Err(OracleError::Malformed("no JSON object in reply".to_string()));
        }
    };

    serde_json::from_str(json).map_err(|e| OracleError::Malformed(e.to_string()))
}

#[async_trait::async_trait]
impl WordOracle for LlmOracle {
    #[instrument(skip(self))]
    async fn validate(&self, word: &str, previous: Option<&str>) -> Result<Judgement, OracleError> {
        let reply = self
            .client
            .generate(REFEREE_PROMPT, &Self::validation_prompt(word, previous))
            .await?;
        debug!(reply_length = reply.len(), "Validation reply received");
        parse_judgement(&reply)
    }

    #[instrument(skip(self))]
    async fn suggest(
        &self,
        required: char,
        previous: Option<&str>,
        difficulty: Difficulty,
    ) -> Result<String, OracleError> {
        let prompt = format!(
            "We are playing a word chain game in English.\n\
             The last word was \"{}\".\n\
             You MUST provide exactly ONE real English dictionary word that starts with the letter \"{}\".\n\
             Difficulty: {}.\n\
             Return ONLY the word itself, lowercase, no punctuation.",
            previous.unwrap_or("start"),
            required,
            difficulty.describe()
        );

        let reply = self
            .client
            .generate("You are a strong word chain player.", &prompt)
            .await?;
        Ok(reply.trim().to_string())
    }

    #[instrument(skip(self, words), fields(moves = words.len()))]
    async fn analyze(&self, words: &[String]) -> Result<String, OracleError> {
        let prompt = format!(
            "Analyze this English word battle: {}.\n\
             Explain who had a better vocabulary and suggest a more complex English word for one \
             of the turns. Provide the response in a helpful, encouraging tone.",
            words.join(", ")
        );

        Ok(self
            .client
            .generate("You are a friendly word game coach.", &prompt)
            .await?)
    }

    fn name(&self) -> &str {
        "llm"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_json() {
        let judgement = parse_judgement(r#"{"isValid": true, "definition": "a fruit"}"#).unwrap();
        assert!(judgement.is_valid);
        assert_eq!(judgement.definition.as_deref(), Some("a fruit"));
    }

    #[test]
    fn test_parse_fenced_json() {
        let reply = "```json\n{\"isValid\": false, \"error\": \"Not a word\"}\n```";
        let judgement = parse_judgement(reply).unwrap();
        assert!(!judgement.is_valid);
        assert_eq!(judgement.reason.as_deref(), Some("Not a word"));
    }

    #[test]
    fn test_parse_garbage_is_malformed() {
        assert!(matches!(
            parse_judgement("I think so!"),
            Err(OracleError::Malformed(_))
        ));
        assert!(matches!(
            parse_judgement("{ not json }"),
            Err(OracleError::Malformed(_))
        ));
    }

    #[test]
    fn test_validation_prompt_names_required_letter() {
        let prompt = LlmOracle::validation_prompt("elephant", Some("apple"));
        assert!(prompt.contains("\"apple\""));
        assert!(prompt.contains("start with the letter \"e\""));

        let opener = LlmOracle::validation_prompt("apple", None);
        assert!(opener.contains("real, valid English dictionary word"));
    }
}
