//! Course, lesson and quiz models

use crate::errors::{Error, Result};
use crate::types::Accuracy;
use serde::{Deserialize, Serialize};
use std::num::NonZeroU32;

/// A single multiple-choice quiz question
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizQuestion {
    pub question: String,
    pub options: Vec<String>,
    /// Index into `options` of the correct answer
    pub answer_index: usize,
}

impl QuizQuestion {
    pub fn is_correct(&self, answer: usize) -> bool {
        self.answer_index == answer
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lesson {
    pub id: String,
    pub title: String,
    pub content: String,
    /// Display duration, e.g. "5 min"
    pub duration: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default)]
    pub quiz: Vec<QuizQuestion>,
}

impl Lesson {
    /// Grade submitted answers against the lesson quiz.
    ///
    /// Answers are matched to questions by position; missing answers count
    /// as wrong. A lesson without a quiz counts as one question answered
    /// correctly, since finishing it is the only thing to reward.
    pub fn grade(&self, answers: &[usize], duration_seconds: u32) -> Result<LessonResult> {
        if self.quiz.is_empty() {
            return LessonResult::new(1, 1, duration_seconds);
        }

        if answers.len() > self.quiz.len() {
            return Err(Error::InvalidLessonResult(format!(
                "{} answers submitted for {} questions in lesson '{}'",
                answers.len(),
                self.quiz.len(),
                self.id
            )));
        }

        let correct = self
            .quiz
            .iter()
            .zip(answers)
            .filter(|(question, answer)| question.is_correct(**answer))
            .count();

        LessonResult::new(correct as u32, self.quiz.len() as u32, duration_seconds)
    }

    /// Answers that get every quiz question right
    pub fn perfect_answers(&self) -> Vec<usize> {
        self.quiz.iter().map(|q| q.answer_index).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: String,
    pub title: String,
    pub description: String,
    pub icon: String,
    /// Tailwind classes for the course card accent
    pub color: String,
    pub lessons: Vec<Lesson>,
}

/// Outcome of a finished lesson quiz, handed to the progression engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LessonResult {
    pub correct_count: u32,
    pub total_questions: NonZeroU32,
    /// Time spent in the lesson. Accepted but not used for scoring yet.
    pub duration_seconds: u32,
}

impl LessonResult {
    /// Build a result, rejecting a quiz with zero questions
    pub fn new(correct_count: u32, total_questions: u32, duration_seconds: u32) -> Result<Self> {
        let total_questions = NonZeroU32::new(total_questions).ok_or_else(|| {
            Error::InvalidLessonResult("totalQuestions must be greater than 0".to_string())
        })?;

        Ok(LessonResult {
            correct_count,
            total_questions,
            duration_seconds,
        })
    }

    pub fn accuracy(&self) -> Accuracy {
        Accuracy::new(self.correct_count, self.total_questions)
    }
}
