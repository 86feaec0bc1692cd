use tracing::warn;

use crate::api::client::ApiError;
use crate::api::types::{CefrLevel, PracticeResult, Word};
use crate::api::worker::ApiRequest;

pub const LOAD_WORD_ERROR: &str = "Failed to load word. Please try again.";
pub const SUBMIT_ERROR: &str = "Failed to validate sentence. Please try again.";

/// View state for the practice screen. Owns the current word for the
/// duration of one practice round and the result until the next word loads.
///
/// The controller performs no I/O: transitions emit [`ApiRequest`] values
/// stamped with a monotonic generation counter, and completions come back
/// through `on_word` / `on_submission`. A completion whose stamp is not the
/// latest issued one is discarded without touching any state, so a stale
/// response can never overwrite a newer request's outcome.
pub struct PracticePage {
    pub word: Option<Word>,
    pub result: Option<PracticeResult>,
    pub loading: bool,
    pub error: String,
    generation: u64,
}

impl PracticePage {
    pub fn new() -> Self {
        Self {
            word: None,
            result: None,
            loading: false,
            error: String::new(),
            generation: 0,
        }
    }

    /// Begin loading a new word: clears the previous result and error, and
    /// supersedes any in-flight request.
    pub fn request_word(&mut self, difficulty: Option<CefrLevel>) -> ApiRequest {
        self.generation += 1;
        self.error.clear();
        self.result = None;
        self.loading = true;
        ApiRequest::LoadWord {
            generation: self.generation,
            difficulty,
        }
    }

    /// Begin scoring a sentence for the current word. Returns `None` (and
    /// changes nothing) when no word is loaded.
    pub fn request_submit(&mut self, sentence: &str) -> Option<ApiRequest> {
        let word = self.word.as_ref()?;
        let word_id = word.id;
        self.generation += 1;
        self.error.clear();
        self.loading = true;
        Some(ApiRequest::SubmitSentence {
            generation: self.generation,
            word_id,
            sentence: sentence.to_string(),
        })
    }

    pub fn on_word(&mut self, generation: u64, outcome: Result<Word, ApiError>) {
        if generation != self.generation {
            return;
        }
        self.loading = false;
        match outcome {
            Ok(word) => self.word = Some(word),
            Err(err) => {
                warn!(error = %err, "failed to load word");
                self.error = LOAD_WORD_ERROR.to_string();
            }
        }
    }

    pub fn on_submission(&mut self, generation: u64, outcome: Result<PracticeResult, ApiError>) {
        if generation != self.generation {
            return;
        }
        self.loading = false;
        match outcome {
            Ok(result) => self.result = Some(result),
            Err(err) => {
                warn!(error = %err, "failed to validate sentence");
                self.error = SUBMIT_ERROR.to_string();
            }
        }
    }
}

impl Default for PracticePage {
    fn default() -> Self {
        Self::new()
    }
}
