use std::collections::BTreeSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::{AnalysisError, Result};
use crate::models::CommentRecord;

const REQUIRED_COLUMNS: [&str; 3] = ["id_docente", "id_asignatura", "comentarios"];

#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    id_docente: Option<String>,
    id_asignatura: Option<String>,
    comentarios: Option<String>,
}

pub fn load_comments(path: &Path) -> Result<Vec<CommentRecord>> {
    let file = File::open(path)
        .map_err(|err| AnalysisError::Load(format!("cannot open {}: {err}", path.display())))?;
    read_comments(file)
}

/// Parse the comments CSV. Requires a header row with the `id_docente`,
/// `id_asignatura` and `comentarios` columns; extra columns are ignored.
/// Empty cells are kept as empty strings, so a row with a missing comment
/// flows through the pipeline and is dropped by the validity filter.
pub fn read_comments<R: Read>(reader: R) -> Result<Vec<CommentRecord>> {
    let mut csv_reader = csv::Reader::from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(AnalysisError::MissingColumn(column));
        }
    }

    let mut records = Vec::new();
    for result in csv_reader.deserialize::<CsvRow>() {
        let row = result?;
        records.push(CommentRecord {
            teacher_id: row.id_docente.unwrap_or_default(),
            subject_id: row.id_asignatura.unwrap_or_default(),
            raw_comment: row.comentarios.unwrap_or_default(),
        });
    }

    Ok(records)
}

/// Distinct teacher ids present in the dataset, sorted ascending.
/// Rows with an empty teacher id are not selectable.
pub fn teacher_ids(records: &[CommentRecord]) -> Vec<String> {
    let ids: BTreeSet<&str> = records
        .iter()
        .map(|record| record.teacher_id.as_str())
        .filter(|id| !id.is_empty())
        .collect();
    ids.into_iter().map(String::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
id_docente,id_asignatura,comentarios
T2,S1,good class
T1,S1,great teacher
T1,S2,-
,S3,orphan row
";

    #[test]
    fn parses_rows_in_order() {
        let records = read_comments(SAMPLE.as_bytes()).unwrap();
        assert_eq!(records.len(), 4);
        assert_eq!(records[0].teacher_id, "T2");
        assert_eq!(records[1].raw_comment, "great teacher");
        assert_eq!(records[3].teacher_id, "");
    }

    #[test]
    fn missing_column_is_a_load_error() {
        let csv = "id_docente,comentarios\nT1,nice\n";
        let err = read_comments(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, AnalysisError::MissingColumn("id_asignatura")));
    }

    #[test]
    fn empty_comment_cell_becomes_empty_string() {
        let csv = "id_docente,id_asignatura,comentarios\nT1,S1,\n";
        let records = read_comments(csv.as_bytes()).unwrap();
        assert_eq!(records[0].raw_comment, "");
    }

    #[test]
    fn teacher_ids_are_distinct_sorted_and_non_empty() {
        let records = read_comments(SAMPLE.as_bytes()).unwrap();
        assert_eq!(teacher_ids(&records), vec!["T1", "T2"]);
    }
}
