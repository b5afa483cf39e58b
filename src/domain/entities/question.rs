use serde::{Deserialize, Serialize};

/// A single generated quiz question.
///
/// `options` is only present for multiple-choice questions. Grading compares
/// submitted answers against `correct_answer` verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub question: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    pub correct_answer: String,
    pub explanation: String,
}

impl Question {
    pub fn is_correct(&self, answer: &str) -> bool {
        self.correct_answer == answer
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QuestionType {
    #[serde(rename = "MCQ")]
    MultipleChoice,
    #[serde(rename = "SAQ")]
    ShortAnswer,
    #[serde(rename = "LAQ")]
    LongAnswer,
}

impl QuestionType {
    pub fn code(&self) -> &'static str {
        match self {
            QuestionType::MultipleChoice => "MCQ",
            QuestionType::ShortAnswer => "SAQ",
            QuestionType::LongAnswer => "LAQ",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            QuestionType::MultipleChoice => "multiple-choice",
            QuestionType::ShortAnswer => "short-answer",
            QuestionType::LongAnswer => "long-answer",
        }
    }

    pub fn requires_options(&self) -> bool {
        matches!(self, QuestionType::MultipleChoice)
    }

    pub fn from_code(code: &str) -> Result<Self, String> {
        match code.trim().to_uppercase().as_str() {
            "MCQ" => Ok(QuestionType::MultipleChoice),
            "SAQ" => Ok(QuestionType::ShortAnswer),
            "LAQ" => Ok(QuestionType::LongAnswer),
            other => Err(format!(
                "Unknown question type '{}', expected one of MCQ, SAQ, LAQ",
                other
            )),
        }
    }
}

impl std::fmt::Display for QuestionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}
