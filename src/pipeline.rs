use std::time::Instant;

use tracing::info;

use crate::classifier::SentimentClassifier;
use crate::error::{AnalysisError, Result};
use crate::models::{ClassifiedComment, CleanedComment, CommentRecord, TeacherSummary};
use crate::{clean, report};

/// Run the full pipeline for one teacher: filter the dataset to their rows,
/// drop degenerate comments, normalize the rest, classify the batch, and
/// aggregate into a [`TeacherSummary`]. A classifier failure aborts the whole
/// run; no partial summary is produced.
pub async fn analyze_teacher<C: SentimentClassifier>(
    records: &[CommentRecord],
    teacher_id: &str,
    classifier: &C,
) -> Result<TeacherSummary> {
    let teacher_rows: Vec<&CommentRecord> = records
        .iter()
        .filter(|record| record.teacher_id == teacher_id)
        .collect();
    if teacher_rows.is_empty() {
        return Err(AnalysisError::TeacherNotFound(teacher_id.to_string()));
    }

    let cleaned: Vec<CleanedComment> = teacher_rows
        .iter()
        .filter(|record| clean::is_valid_comment(&record.raw_comment))
        .map(|record| CleanedComment {
            subject_id: record.subject_id.clone(),
            clean_text: clean::normalize_comment(&record.raw_comment),
        })
        .collect();

    info!(
        teacher = teacher_id,
        total = teacher_rows.len(),
        valid = cleaned.len(),
        "filtered comments"
    );

    let texts: Vec<String> = cleaned.iter().map(|c| c.clean_text.clone()).collect();
    let started = Instant::now();
    let ratings = classifier.classify(&texts).await?;
    if ratings.len() != texts.len() {
        return Err(AnalysisError::Classifier(format!(
            "expected {} ratings, got {}",
            texts.len(),
            ratings.len()
        )));
    }
    info!(
        comments = texts.len(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "classifier batch finished"
    );

    let classified: Vec<ClassifiedComment> = cleaned
        .into_iter()
        .zip(ratings)
        .map(|(comment, rating)| ClassifiedComment {
            subject_id: comment.subject_id,
            clean_text: comment.clean_text,
            rating,
            sentiment: clean::bucket_sentiment(rating),
        })
        .collect();

    Ok(report::build_summary(teacher_id, &teacher_rows, &classified))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Sentiment, StarRating};

    /// Returns preset star ratings in order, one per input text.
    struct MockClassifier {
        stars: Vec<u8>,
    }

    impl SentimentClassifier for MockClassifier {
        async fn classify(&self, texts: &[String]) -> Result<Vec<StarRating>> {
            assert_eq!(texts.len(), self.stars.len(), "unexpected batch size");
            self.stars.iter().map(|&s| StarRating::new(s)).collect()
        }
    }

    struct FailingClassifier;

    impl SentimentClassifier for FailingClassifier {
        async fn classify(&self, _texts: &[String]) -> Result<Vec<StarRating>> {
            Err(AnalysisError::Classifier("model unavailable".to_string()))
        }
    }

    fn row(teacher_id: &str, subject_id: &str, raw_comment: &str) -> CommentRecord {
        CommentRecord {
            teacher_id: teacher_id.to_string(),
            subject_id: subject_id.to_string(),
            raw_comment: raw_comment.to_string(),
        }
    }

    fn sample_records() -> Vec<CommentRecord> {
        vec![
            row("T1", "S1", "great teacher"),
            row("T1", "S1", "-"),
            row("T1", "S2", "ok class"),
            row("T2", "S1", "bad"),
        ]
    }

    #[tokio::test]
    async fn end_to_end_summary_for_one_teacher() {
        let records = sample_records();
        // Row 2 is invalid, so the classifier only sees the two valid texts.
        let classifier = MockClassifier { stars: vec![5, 3] };

        let summary = analyze_teacher(&records, "T1", &classifier).await.unwrap();

        assert_eq!(summary.teacher_id, "T1");
        assert_eq!(summary.subject_count, 2);
        assert_eq!(summary.total_comments, 3);
        assert_eq!(summary.valid_comments, 2);
        assert_eq!(summary.positive_count, 1);
        assert_eq!(summary.neutral_count, 1);
        assert_eq!(summary.negative_count, 0);

        assert_eq!(summary.subjects.len(), 2);
        let s1 = &summary.subjects[0];
        assert_eq!(s1.subject_id, "S1");
        assert_eq!(s1.bucket(Sentiment::Positive)[0].clean_text, "great teacher");
        let s2 = &summary.subjects[1];
        assert_eq!(s2.subject_id, "S2");
        assert_eq!(s2.bucket(Sentiment::Neutral)[0].clean_text, "ok class");
    }

    #[tokio::test]
    async fn unknown_teacher_is_not_found() {
        let records = sample_records();
        let classifier = MockClassifier { stars: vec![] };

        let err = analyze_teacher(&records, "T9", &classifier).await.unwrap_err();
        assert!(matches!(err, AnalysisError::TeacherNotFound(id) if id == "T9"));
    }

    #[tokio::test]
    async fn all_invalid_comments_yield_empty_listing() {
        let records = vec![row("T1", "S1", "-"), row("T1", "S2", ".")];
        let classifier = MockClassifier { stars: vec![] };

        let summary = analyze_teacher(&records, "T1", &classifier).await.unwrap();
        assert_eq!(summary.subject_count, 2);
        assert_eq!(summary.valid_comments, 0);
        assert!(summary.subjects.is_empty());
    }

    #[tokio::test]
    async fn classifier_failure_aborts_the_run() {
        let records = sample_records();
        let err = analyze_teacher(&records, "T1", &FailingClassifier)
            .await
            .unwrap_err();
        assert!(matches!(err, AnalysisError::Classifier(_)));
    }
}
