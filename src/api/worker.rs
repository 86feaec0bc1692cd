use std::sync::Arc;
use std::sync::mpsc::Sender;
use std::thread;

use crate::api::client::{ApiClient, ApiError};
use crate::api::types::{CefrLevel, DashboardStats, PracticeResult, Word};
use crate::event::AppEvent;

/// A network operation requested by a page controller. Every request carries
/// the generation stamp the page issued it with; the matching response echoes
/// the stamp back so stale completions can be discarded.
#[derive(Clone, Debug, PartialEq)]
pub enum ApiRequest {
    LoadWord {
        generation: u64,
        difficulty: Option<CefrLevel>,
    },
    SubmitSentence {
        generation: u64,
        word_id: i64,
        sentence: String,
    },
    LoadStats {
        generation: u64,
    },
}

#[derive(Debug)]
pub enum ApiResponse {
    Word {
        generation: u64,
        outcome: Result<Word, ApiError>,
    },
    Submission {
        generation: u64,
        outcome: Result<PracticeResult, ApiError>,
    },
    Stats {
        generation: u64,
        outcome: Result<DashboardStats, ApiError>,
    },
}

/// Runs each request on its own thread and posts the completion back into
/// the app event channel. There is no cancellation: a superseded request
/// still runs to completion and its stamped response is ignored on arrival.
pub struct ApiDispatcher {
    client: Arc<ApiClient>,
    tx: Sender<AppEvent>,
}

impl ApiDispatcher {
    pub fn new(client: ApiClient, tx: Sender<AppEvent>) -> Self {
        Self {
            client: Arc::new(client),
            tx,
        }
    }

    pub fn dispatch(&self, request: ApiRequest) {
        let client = Arc::clone(&self.client);
        let tx = self.tx.clone();

        thread::spawn(move || {
            let response = match request {
                ApiRequest::LoadWord {
                    generation,
                    difficulty,
                } => ApiResponse::Word {
                    generation,
                    outcome: client.random_word(difficulty),
                },
                ApiRequest::SubmitSentence {
                    generation,
                    word_id,
                    sentence,
                } => ApiResponse::Submission {
                    generation,
                    outcome: client.submit_practice(word_id, &sentence),
                },
                ApiRequest::LoadStats { generation } => ApiResponse::Stats {
                    generation,
                    outcome: client.dashboard_stats(),
                },
            };

            // Receiver is gone only during shutdown.
            let _ = tx.send(AppEvent::Api(response));
        });
    }
}
