mod loader;

pub use loader::{load_questions, LoadError};
