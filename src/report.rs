use std::collections::{HashMap, HashSet};
use std::fmt::Write;

use chrono::NaiveDate;

use crate::models::{ClassifiedComment, CommentRecord, Sentiment, SubjectReport, TeacherSummary};

/// Aggregate one teacher's classified comments into a summary.
///
/// `teacher_rows` is every row for the teacher, including invalid comments:
/// the subject count deliberately reflects the full teaching load, while all
/// other statistics only cover classified comments.
pub fn build_summary(
    teacher_id: &str,
    teacher_rows: &[&CommentRecord],
    classified: &[ClassifiedComment],
) -> TeacherSummary {
    let subject_count = teacher_rows
        .iter()
        .map(|row| row.subject_id.as_str())
        .collect::<HashSet<_>>()
        .len();

    let mut by_subject: HashMap<String, SubjectReport> = HashMap::new();
    for comment in classified {
        by_subject
            .entry(comment.subject_id.clone())
            .or_insert_with(|| SubjectReport::new(comment.subject_id.clone()))
            .push(comment.clone());
    }

    let mut subjects: Vec<SubjectReport> = by_subject.into_values().collect();
    subjects.sort_by(|a, b| a.subject_id.cmp(&b.subject_id));

    let count_of = |sentiment: Sentiment| {
        classified
            .iter()
            .filter(|comment| comment.sentiment == sentiment)
            .count()
    };

    TeacherSummary {
        teacher_id: teacher_id.to_string(),
        subject_count,
        total_comments: teacher_rows.len(),
        valid_comments: classified.len(),
        negative_count: count_of(Sentiment::Negative),
        neutral_count: count_of(Sentiment::Neutral),
        positive_count: count_of(Sentiment::Positive),
        subjects,
    }
}

pub fn render_markdown(summary: &TeacherSummary, generated_on: NaiveDate) -> String {
    let mut output = String::new();

    let _ = writeln!(output, "# Teacher Sentiment Report");
    let _ = writeln!(
        output,
        "Generated on {} for teacher {}",
        generated_on, summary.teacher_id
    );
    let _ = writeln!(output);
    let _ = writeln!(output, "## Summary");
    let _ = writeln!(output, "- Teacher id: {}", summary.teacher_id);
    let _ = writeln!(output, "- Subjects taught: {}", summary.subject_count);
    let _ = writeln!(output, "- Total comments: {}", summary.total_comments);
    let _ = writeln!(
        output,
        "- Valid comments: {} ({} irrelevant)",
        summary.valid_comments,
        summary.invalid_comments()
    );
    let _ = writeln!(output, "- 🙁 NEG: {}", summary.negative_count);
    let _ = writeln!(output, "- 😐 NEU: {}", summary.neutral_count);
    let _ = writeln!(output, "- 🙂 POS: {}", summary.positive_count);

    let _ = writeln!(output);
    let _ = writeln!(output, "## Comments by subject");

    if summary.subjects.is_empty() {
        let _ = writeln!(output, "No valid comments for this teacher.");
    }

    for subject in &summary.subjects {
        let _ = writeln!(output);
        let _ = writeln!(output, "### Subject {}", subject.subject_id);

        for sentiment in Sentiment::ALL {
            let comments = subject.bucket(sentiment);
            if comments.is_empty() {
                continue;
            }
            let _ = writeln!(
                output,
                "**{} ({} comments):**",
                sentiment.marker(),
                comments.len()
            );
            for comment in comments {
                let _ = writeln!(output, "- {}", comment.clean_text);
            }
        }
    }

    output
}
