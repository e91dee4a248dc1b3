//! Question file loading.
//!
//! Supports CSV/TSV (a header row naming a `question`/`prompt` column and
//! an `answer` column, matched case-insensitively after trimming) and JSON
//! (an array of `{prompt, answer}` records). Rows with a blank prompt are
//! dropped; surviving rows keep their source row index as a stable id.

use std::fmt;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use serde::Deserialize;

use crate::models::Question;

/// Error type for question loading.
#[derive(Debug)]
pub enum LoadError {
    /// Error reading the file.
    Io(io::Error),
    /// Malformed CSV/TSV content.
    Csv(csv::Error),
    /// Malformed JSON content.
    Json(serde_json::Error),
    /// The header row has no column with the given name.
    MissingColumn(&'static str),
    /// The file parsed but produced zero valid questions.
    Empty,
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Io(e) => write!(f, "IO error: {}", e),
            LoadError::Csv(e) => write!(f, "CSV error: {}", e),
            LoadError::Json(e) => write!(f, "JSON error: {}", e),
            LoadError::MissingColumn(name) => write!(f, "missing required column: {}", name),
            LoadError::Empty => write!(f, "file contains no valid questions"),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Io(e) => Some(e),
            LoadError::Csv(e) => Some(e),
            LoadError::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for LoadError {
    fn from(err: io::Error) -> Self {
        LoadError::Io(err)
    }
}

impl From<csv::Error> for LoadError {
    fn from(err: csv::Error) -> Self {
        LoadError::Csv(err)
    }
}

impl From<serde_json::Error> for LoadError {
    fn from(err: serde_json::Error) -> Self {
        LoadError::Json(err)
    }
}

#[derive(Deserialize)]
struct RawQuestion {
    #[serde(alias = "question")]
    prompt: String,
    answer: String,
}

/// Load questions from a file, dispatching on its extension.
///
/// `.json` parses as a record array, `.tsv` as tab-separated; anything
/// else is treated as comma-separated.
pub fn load_questions<P: AsRef<Path>>(path: P) -> Result<Vec<Question>, LoadError> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let file = File::open(path)?;
    let questions = match extension.as_str() {
        "json" => parse_json(file)?,
        "tsv" => parse_delimited(file, b'\t')?,
        _ => parse_delimited(file, b',')?,
    };

    if questions.is_empty() {
        return Err(LoadError::Empty);
    }
    Ok(questions)
}

fn parse_json<R: Read>(reader: R) -> Result<Vec<Question>, LoadError> {
    let records: Vec<RawQuestion> = serde_json::from_reader(reader)?;
    Ok(records
        .into_iter()
        .enumerate()
        .filter_map(|(row, record)| build_question(row, &record.prompt, &record.answer))
        .collect())
}

fn parse_delimited<R: Read>(reader: R, delimiter: u8) -> Result<Vec<Question>, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let headers = reader.headers()?.clone();
    let prompt_column =
        find_column(&headers, &["question", "prompt"]).ok_or(LoadError::MissingColumn("question"))?;
    let answer_column =
        find_column(&headers, &["answer"]).ok_or(LoadError::MissingColumn("answer"))?;

    let mut questions = Vec::new();
    for (row, record) in reader.records().enumerate() {
        let record = record?;
        let prompt = record.get(prompt_column).unwrap_or("");
        let answer = record.get(answer_column).unwrap_or("");
        if let Some(question) = build_question(row, prompt, answer) {
            questions.push(question);
        }
    }
    Ok(questions)
}

fn find_column(headers: &csv::StringRecord, names: &[&str]) -> Option<usize> {
    headers.iter().position(|header| {
        let header = header.trim();
        names.iter().any(|name| header.eq_ignore_ascii_case(name))
    })
}

fn build_question(row: usize, prompt: &str, answer: &str) -> Option<Question> {
    let prompt = prompt.trim();
    if prompt.is_empty() {
        return None;
    }
    Some(Question {
        id: row as u32,
        prompt: prompt.to_string(),
        answer: answer.trim().to_string(),
    })
}
