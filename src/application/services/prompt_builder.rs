use std::borrow::Cow;

use crate::application::ports::completion_provider::ResponseFormat;
use crate::domain::entities::QuestionType;

pub const QUIZ_CONTENT_LIMIT: usize = 8000;
pub const CHAT_CONTEXT_LIMIT: usize = 4000;
pub const TRUNCATION_MARKER: &str = "...";

const GENERIC_TUTOR_PROMPT: &str = "You are a friendly study tutor helping a student revise. \
Explain concepts clearly and concisely, use short examples where they help, and check \
understanding with a follow-up question when it is useful.";

const QUIZ_SYSTEM_PROMPT: &str = "You are an experienced teacher who writes revision quizzes \
strictly from the coursebook material you are given. Reply with a single JSON object and \
nothing else.";

#[derive(Debug, PartialEq, Eq)]
pub enum PromptError {
    NoContent,
}

impl std::fmt::Display for PromptError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PromptError::NoContent => write!(
                f,
                "No document content available, upload a PDF with extractable text first"
            ),
        }
    }
}

impl std::error::Error for PromptError {}

#[derive(Debug, Clone, PartialEq)]
pub struct Prompt {
    pub system_prompt: String,
    pub user_prompt: String,
    pub response_format: ResponseFormat,
}

/// Builds the system/user prompt pairs sent to the completion provider.
#[derive(Debug, Clone)]
pub struct PromptBuilder {
    quiz_content_limit: usize,
    chat_context_limit: usize,
}

impl PromptBuilder {
    pub fn new() -> Self {
        Self {
            quiz_content_limit: QUIZ_CONTENT_LIMIT,
            chat_context_limit: CHAT_CONTEXT_LIMIT,
        }
    }

    pub fn with_limits(quiz_content_limit: usize, chat_context_limit: usize) -> Self {
        Self {
            quiz_content_limit,
            chat_context_limit,
        }
    }

    pub fn build_quiz_prompt(
        &self,
        content: &str,
        question_type: QuestionType,
        count: u32,
    ) -> Result<Prompt, PromptError> {
        if content.trim().is_empty() {
            return Err(PromptError::NoContent);
        }

        let content = truncate_content(content, self.quiz_content_limit);
        let user_prompt = format!(
            "Create {count} {kind} questions based on the coursebook content below.\n\n\
             {directive}\n\n\
             Coursebook content:\n{content}",
            count = count,
            kind = question_type.description(),
            directive = quiz_format_directive(question_type),
            content = content,
        );

        Ok(Prompt {
            system_prompt: QUIZ_SYSTEM_PROMPT.to_string(),
            user_prompt,
            response_format: ResponseFormat::JsonObject,
        })
    }

    /// `context` is the text of the selected document, if any. Without one the
    /// tutor answers from general knowledge.
    pub fn build_chat_prompt(
        &self,
        context: Option<&str>,
        message: &str,
    ) -> Result<Prompt, PromptError> {
        let system_prompt = match context {
            Some(content) if content.trim().is_empty() => return Err(PromptError::NoContent),
            Some(content) => format!(
                "{}\n\nGround your answers in the coursebook excerpt below. If the excerpt \
                 does not cover the question, say so before answering from general \
                 knowledge.\n\nCoursebook excerpt:\n{}",
                GENERIC_TUTOR_PROMPT,
                truncate_content(content, self.chat_context_limit)
            ),
            None => GENERIC_TUTOR_PROMPT.to_string(),
        };

        Ok(Prompt {
            system_prompt,
            user_prompt: message.to_string(),
            response_format: ResponseFormat::Text,
        })
    }
}

impl Default for PromptBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn quiz_format_directive(question_type: QuestionType) -> String {
    match question_type {
        QuestionType::MultipleChoice => "Return JSON exactly in this shape: \
            {\"questions\": [{\"question\": \"...\", \"options\": [\"...\", \"...\", \"...\", \"...\"], \
            \"correct_answer\": \"...\", \"explanation\": \"...\"}]}. \
            Give every question exactly four options and copy correct_answer verbatim from \
            one of its options."
            .to_string(),
        QuestionType::ShortAnswer | QuestionType::LongAnswer => {
            let length = if question_type == QuestionType::ShortAnswer {
                "one or two sentences"
            } else {
                "a full paragraph"
            };
            format!(
                "Return JSON exactly in this shape: \
                 {{\"questions\": [{{\"question\": \"...\", \"correct_answer\": \"...\", \
                 \"explanation\": \"...\"}}]}}. \
                 Do not include an options field. Model answers should be {}.",
                length
            )
        }
    }
}

/// Keeps the first `max_chars` characters and appends the truncation marker
/// when anything was cut.
pub fn truncate_content(content: &str, max_chars: usize) -> Cow<'_, str> {
    match content.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => Cow::Owned(format!("{}{}", &content[..byte_idx], TRUNCATION_MARKER)),
        None => Cow::Borrowed(content),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_keeps_short_content() {
        let content = "short";
        assert!(matches!(truncate_content(content, 5), Cow::Borrowed("short")));
    }

    #[test]
    fn test_truncate_keeps_prefix_and_appends_marker() {
        assert_eq!(truncate_content("abcdefgh", 3), "abc...");
        assert_eq!(truncate_content("ééééé", 2), "éé...");
    }

    #[test]
    fn test_quiz_prompt_truncates_at_limit() {
        let builder = PromptBuilder::new();
        let content = format!("{}{}", "a".repeat(QUIZ_CONTENT_LIMIT), "TAIL");
        let prompt = builder
            .build_quiz_prompt(&content, QuestionType::MultipleChoice, 3)
            .unwrap();

        let expected = format!("{}...", "a".repeat(QUIZ_CONTENT_LIMIT));
        assert!(prompt.user_prompt.ends_with(&expected));
        assert!(!prompt.user_prompt.contains("TAIL"));
        assert_eq!(prompt.response_format, ResponseFormat::JsonObject);
    }

    #[test]
    fn test_quiz_prompt_mentions_count_and_options_only_for_mcq() {
        let builder = PromptBuilder::new();

        let mcq = builder
            .build_quiz_prompt("Photosynthesis.", QuestionType::MultipleChoice, 5)
            .unwrap();
        assert!(mcq.user_prompt.contains("Create 5 multiple-choice questions"));
        assert!(mcq.user_prompt.contains("\"options\""));

        let saq = builder
            .build_quiz_prompt("Photosynthesis.", QuestionType::ShortAnswer, 2)
            .unwrap();
        assert!(saq.user_prompt.contains("Create 2 short-answer questions"));
        assert!(saq.user_prompt.contains("Do not include an options field"));
        assert!(!saq.user_prompt.contains("\"options\""));
    }

    #[test]
    fn test_quiz_prompt_requires_content() {
        let builder = PromptBuilder::new();
        assert_eq!(
            builder
                .build_quiz_prompt("  \n", QuestionType::LongAnswer, 1)
                .unwrap_err(),
            PromptError::NoContent
        );
    }

    #[test]
    fn test_chat_prompt_grounding() {
        let builder = PromptBuilder::with_limits(QUIZ_CONTENT_LIMIT, 10);

        let grounded = builder
            .build_chat_prompt(Some("0123456789ABCDEF"), "What is inertia?")
            .unwrap();
        assert!(grounded.system_prompt.ends_with("0123456789..."));
        assert_eq!(grounded.user_prompt, "What is inertia?");
        assert_eq!(grounded.response_format, ResponseFormat::Text);

        let generic = builder.build_chat_prompt(None, "Hello").unwrap();
        assert_eq!(generic.system_prompt, GENERIC_TUTOR_PROMPT);

        assert_eq!(
            builder.build_chat_prompt(Some(""), "Hello").unwrap_err(),
            PromptError::NoContent
        );
    }
}
