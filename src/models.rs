use crate::error::{AnalysisError, Result};

/// One row of the uploaded comments CSV.
#[derive(Debug, Clone)]
pub struct CommentRecord {
    pub teacher_id: String,
    pub subject_id: String,
    pub raw_comment: String,
}

/// A valid comment after normalization, ready for the classifier.
#[derive(Debug, Clone)]
pub struct CleanedComment {
    pub subject_id: String,
    pub clean_text: String,
}

/// Star rating produced by the sentiment model, guaranteed in 1..=5.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StarRating(u8);

impl StarRating {
    pub fn new(value: u8) -> Result<Self> {
        if (1..=5).contains(&value) {
            Ok(StarRating(value))
        } else {
            Err(AnalysisError::InvalidRating(value))
        }
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sentiment {
    Negative,
    Neutral,
    Positive,
}

impl Sentiment {
    /// Fixed rendering order: negative, neutral, positive.
    pub const ALL: [Sentiment; 3] = [Sentiment::Negative, Sentiment::Neutral, Sentiment::Positive];

    pub fn marker(self) -> &'static str {
        match self {
            Sentiment::Negative => "🙁 NEG",
            Sentiment::Neutral => "😐 NEU",
            Sentiment::Positive => "🙂 POS",
        }
    }
}

#[derive(Debug, Clone)]
pub struct ClassifiedComment {
    pub subject_id: String,
    pub clean_text: String,
    pub rating: StarRating,
    pub sentiment: Sentiment,
}

/// Classified comments for one subject, grouped by sentiment bucket.
#[derive(Debug, Clone)]
pub struct SubjectReport {
    pub subject_id: String,
    pub negative: Vec<ClassifiedComment>,
    pub neutral: Vec<ClassifiedComment>,
    pub positive: Vec<ClassifiedComment>,
}

impl SubjectReport {
    pub fn new(subject_id: String) -> Self {
        SubjectReport {
            subject_id,
            negative: Vec::new(),
            neutral: Vec::new(),
            positive: Vec::new(),
        }
    }

    pub fn push(&mut self, comment: ClassifiedComment) {
        match comment.sentiment {
            Sentiment::Negative => self.negative.push(comment),
            Sentiment::Neutral => self.neutral.push(comment),
            Sentiment::Positive => self.positive.push(comment),
        }
    }

    pub fn bucket(&self, sentiment: Sentiment) -> &[ClassifiedComment] {
        match sentiment {
            Sentiment::Negative => &self.negative,
            Sentiment::Neutral => &self.neutral,
            Sentiment::Positive => &self.positive,
        }
    }
}

#[derive(Debug, Clone)]
pub struct TeacherSummary {
    pub teacher_id: String,
    /// Distinct subjects across all of the teacher's rows, valid or not.
    pub subject_count: usize,
    pub total_comments: usize,
    pub valid_comments: usize,
    pub negative_count: usize,
    pub neutral_count: usize,
    pub positive_count: usize,
    pub subjects: Vec<SubjectReport>,
}

impl TeacherSummary {
    pub fn invalid_comments(&self) -> usize {
        self.total_comments - self.valid_comments
    }
}
