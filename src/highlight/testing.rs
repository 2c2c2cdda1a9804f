//! Test highlighter that records grammar loads.

use parking_lot::Mutex;

use super::{HighlightError, Highlighter, frame_lines};
use crate::utils::html::escape;

/// Language name the recording highlighter refuses to load.
pub const UNKNOWN: &str = "nope";

/// Renders escaped lines in the usual frame and remembers every
/// `load_language` call.
#[derive(Default)]
pub struct RecordingHighlighter {
    loads: Mutex<Vec<String>>,
}

impl RecordingHighlighter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Languages passed to `load_language`, in call order.
    pub fn loads(&self) -> Vec<String> {
        self.loads.lock().clone()
    }
}

impl Highlighter for RecordingHighlighter {
    async fn load_language(&self, lang: &str) -> Result<(), HighlightError> {
        self.loads.lock().push(lang.to_string());
        tokio::task::yield_now().await;
        if lang == UNKNOWN {
            return Err(HighlightError::UnknownLanguage(lang.to_string()));
        }
        Ok(())
    }

    fn render(&self, code: &str, _lang: &str, theme: &str) -> Result<String, HighlightError> {
        Ok(frame_lines(code.split('\n').map(escape), theme))
    }
}
