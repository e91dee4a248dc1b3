/// A single flashcard: a prompt shown first, an answer revealed after it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    /// Stable id, unique within a loaded set (the source row index).
    pub id: u32,
    pub prompt: String,
    pub answer: String,
}
