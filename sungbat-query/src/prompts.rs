//! Prompt templates for the translate and generate stages.

use std::collections::HashMap;
use sungbat_core::{Result, SungbatError};

/// Translation request. Variables: `query`, `language`.
pub const TRANSLATION_TEMPLATE: &str = "You are an expert translator specializing in Philippine constitutional law and Ilocano language.

Translate the following query into English if it's in Ilocano, or identify if it's already in English:
Query: {query}
Target Language: {language}

If the query is in Ilocano, provide an accurate English translation.
If the query is already in English, return it as-is.

Translation:";

/// Bilingual answer request. Variables: `context`, `question`.
pub const ANSWER_TEMPLATE: &str = "You are an expert on Philippine Constitutional Law with deep knowledge of Ilocano culture and language.
Your role is to help Filipino citizens understand their constitutional rights in Ilocano dialect.

Use the following constitutional documents as context to answer the question:
{context}

Question: {question}

Instructions:
1. Answer primarily in Ilocano (Ilokano) dialect
2. Use simple, accessible language that ordinary citizens can understand
3. Include relevant constitutional articles or sections
4. Explain legal concepts using familiar Ilocano cultural references when appropriate
5. If translating legal terms, provide both Ilocano and English versions
6. Be accurate and cite specific constitutional provisions when possible
7. Keep your response concise and avoid repetition
8. Provide a single, clear explanation without repeating the same information multiple times
9. ALWAYS provide an English translation after your Ilocano response

Format your response exactly like this:

**Ilocano:**
[Your response in Ilocano here]

**English Translation:**
[Complete English translation of your Ilocano response here]

Provide ONE clear, concise answer:";

/// Header that opens the Ilocano part of an answer.
pub const ILOCANO_HEADER: &str = "**Ilocano:**";
/// Header that opens the English part of an answer.
pub const ENGLISH_HEADER: &str = "**English Translation:**";

/// A `{name}` placeholder template.
///
/// Rendering is single pass: text substituted for one placeholder is never
/// scanned again, so a retrieved chunk containing `{question}` stays as is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTemplate {
    template: String,
}

impl PromptTemplate {
    /// Wrap a template string.
    pub fn new<S: Into<String>>(template: S) -> Self {
        Self {
            template: template.into(),
        }
    }

    /// The built-in translation prompt.
    pub fn translation() -> Self {
        Self::new(TRANSLATION_TEMPLATE)
    }

    /// The built-in bilingual answer prompt.
    pub fn answer() -> Self {
        Self::new(ANSWER_TEMPLATE)
    }

    /// Placeholder names, in order of first appearance.
    pub fn variables(&self) -> Vec<&str> {
        let mut names = Vec::new();
        let mut rest = self.template.as_str();
        while let Some(start) = rest.find('{') {
            let after = &rest[start + 1..];
            match after.find('}') {
                Some(end) if is_identifier(&after[..end]) => {
                    let name = &after[..end];
                    if !names.contains(&name) {
                        names.push(name);
                    }
                    rest = &after[end + 1..];
                }
                _ => rest = after,
            }
        }
        names
    }

    /// Substitute every placeholder; a placeholder without a value is an
    /// error.
    pub fn render(&self, values: &HashMap<&str, &str>) -> Result<String> {
        let mut out = String::with_capacity(self.template.len());
        let mut rest = self.template.as_str();

        while let Some(start) = rest.find('{') {
            out.push_str(&rest[..start]);
            let after = &rest[start + 1..];
            match after.find('}') {
                Some(end) if is_identifier(&after[..end]) => {
                    let name = &after[..end];
                    let value = values.get(name).ok_or_else(|| {
                        SungbatError::validation(format!("Missing prompt variable: {name}"))
                    })?;
                    out.push_str(value);
                    rest = &after[end + 1..];
                }
                _ => {
                    out.push('{');
                    rest = after;
                }
            }
        }
        out.push_str(rest);
        Ok(out)
    }
}

fn is_identifier(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Render the translation prompt for `query`.
pub fn translation_prompt(query: &str) -> Result<String> {
    PromptTemplate::translation().render(&HashMap::from([
        ("query", query),
        ("language", "English"),
    ]))
}

/// Render the answer prompt.
pub fn answer_prompt(context: &str, question: &str) -> Result<String> {
    PromptTemplate::answer().render(&HashMap::from([
        ("context", context),
        ("question", question),
    ]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_builtin_variables() {
        assert_eq!(PromptTemplate::translation().variables(), vec!["query", "language"]);
        assert_eq!(PromptTemplate::answer().variables(), vec!["context", "question"]);
    }

    #[test]
    fn test_translation_prompt() {
        let prompt = translation_prompt("Ania ti Artikulo III?").unwrap();
        assert!(prompt.contains("Query: Ania ti Artikulo III?\n"));
        assert!(prompt.contains("Target Language: English\n"));
        assert!(prompt.ends_with("Translation:"));
    }

    #[test]
    fn test_answer_prompt_instructions() {
        let prompt = answer_prompt("ctx", "q").unwrap();
        assert!(prompt.starts_with(
            "You are an expert on Philippine Constitutional Law with deep knowledge of Ilocano culture and language.\nYour role is to help Filipino citizens understand their constitutional rights in Ilocano dialect.\n"
        ));

        let instructions: Vec<&str> = prompt
            .lines()
            .skip_while(|line| *line != "Instructions:")
            .skip(1)
            .take_while(|line| !line.is_empty())
            .collect();
        assert_eq!(
            instructions,
            vec![
                "1. Answer primarily in Ilocano (Ilokano) dialect",
                "2. Use simple, accessible language that ordinary citizens can understand",
                "3. Include relevant constitutional articles or sections",
                "4. Explain legal concepts using familiar Ilocano cultural references when appropriate",
                "5. If translating legal terms, provide both Ilocano and English versions",
                "6. Be accurate and cite specific constitutional provisions when possible",
                "7. Keep your response concise and avoid repetition",
                "8. Provide a single, clear explanation without repeating the same information multiple times",
                "9. ALWAYS provide an English translation after your Ilocano response",
            ]
        );
        assert!(prompt.ends_with(
            "**Ilocano:**\n[Your response in Ilocano here]\n\n**English Translation:**\n[Complete English translation of your Ilocano response here]\n\nProvide ONE clear, concise answer:"
        ));
    }

    #[test]
    fn test_answer_prompt_headers() {
        let prompt = answer_prompt("Article III, Section 1.", "Ania ti wayawaya?").unwrap();
        assert!(prompt.contains(ILOCANO_HEADER));
        assert!(prompt.contains(ENGLISH_HEADER));
        assert!(prompt.contains("Article III, Section 1.\n\nQuestion: Ania ti wayawaya?"));
    }

    #[test]
    fn test_substituted_text_is_not_rescanned() {
        let prompt = answer_prompt("chunk mentioning {question}", "real question").unwrap();
        assert!(prompt.contains("chunk mentioning {question}"));
        assert!(prompt.contains("Question: real question"));
    }

    #[test]
    fn test_missing_variable_and_literal_braces() {
        let template = PromptTemplate::new("json {\"a\": 1} for {name}");
        assert_eq!(template.variables(), vec!["name"]);
        assert!(template.render(&HashMap::new()).is_err());
        assert_eq!(
            template.render(&HashMap::from([("name", "Juan")])).unwrap(),
            "json {\"a\": 1} for Juan"
        );
    }
}
