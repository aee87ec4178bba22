//! State and transitions of the publication export form.
//!
//! A submission goes Idle -> Submitting -> (Succeeded | Failed) -> Idle. The
//! text fields are cleared whenever a request settles, whatever its outcome,
//! so the only trace left of an attempt is the result message.
//!
//! Front ends split a submission in two so the network call can run on their
//! executor: [`FormState::begin_submit`] before the request, [`dispatch`] for
//! the request itself, and [`FormState::settle`] once it resolves.
//! [`FormState::submit`] does all three in sequence.

use thiserror::Error;
use tracing::{debug, error, info};

use crate::{
    models::{SearchKind, SubmissionRequest, SubmissionResponse},
    network::ScopusBackend,
};

/// Message the backend answers with when the file was generated.
pub const BACKEND_SUCCESS: &str = "Data received successfully";

pub const SUCCESS_MESSAGE: &str =
    "The file has been downloaded and is inside the system's download folder.";
pub const FAILURE_MESSAGE: &str = "There was some problem while creating/downloading the file.";
pub const COMMUNICATION_ERROR_MESSAGE: &str = "There was an error communicating with the server.";
pub const LOADING_MESSAGE: &str = "Form inputs submitted. File Creation is in progress.";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmissionError {
    /// The backend answered, but not with a success message.
    #[error("backend rejected the submission: {0}")]
    Application(String),
    #[error("failed to communicate with the backend: {0}")]
    Transport(String),
}

impl SubmissionError {
    /// The text shown to the user. Never includes the underlying detail.
    pub fn user_message(&self) -> &'static str {
        match self {
            SubmissionError::Application(_) => FAILURE_MESSAGE,
            SubmissionError::Transport(_) => COMMUNICATION_ERROR_MESSAGE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    Succeeded {
        filename: Option<String>,
        download_url: String,
    },
    Failed(SubmissionError),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    pub publication_year: String,
    pub search_type: String,
    pub quarter: String,
    pub is_loading: bool,
    pub result_message: String,
    pub is_error: bool,
    pub download_url: String,
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stored verbatim, the year is not validated.
    pub fn on_publication_year_change(&mut self, raw: &str) {
        self.publication_year = raw.to_string();
    }

    pub fn on_search_type_change(&mut self, raw: &str) {
        self.search_type = raw.to_lowercase();
        if self.search_type == "a" {
            self.quarter.clear();
        }
    }

    pub fn on_quarter_change(&mut self, raw: &str) {
        if !self.shows_quarter_selector() {
            debug!("Ignoring quarter {:?} for search type {:?}", raw, self.search_type);
            return;
        }
        self.quarter = raw.to_string();
    }

    pub fn shows_quarter_selector(&self) -> bool {
        self.search_type == "q"
    }

    pub fn search_kind(&self) -> SearchKind {
        SearchKind::from_search_type(&self.search_type)
    }

    pub fn to_request(&self) -> SubmissionRequest {
        SubmissionRequest {
            publication_year: self.publication_year.clone(),
            search_type: self.search_type.clone(),
            quarter_number: self.quarter.clone(),
        }
    }

    /// Marks the form as loading and returns the request to send.
    pub fn begin_submit(&mut self) -> SubmissionRequest {
        self.is_loading = true;
        let request = self.to_request();
        debug!("Submitting {:?}", request);
        request
    }

    /// Applies the outcome of a request and returns the form to idle.
    ///
    /// Overlapping submissions are not tracked: whichever settles last
    /// decides the result message, and the first one to settle already
    /// clears the loading flag.
    pub fn settle(&mut self, outcome: SubmissionOutcome) {
        match outcome {
            SubmissionOutcome::Succeeded { download_url, .. } => {
                self.result_message = SUCCESS_MESSAGE.to_string();
                self.is_error = false;
                self.download_url = download_url;
            }
            SubmissionOutcome::Failed(e) => {
                self.result_message = e.user_message().to_string();
                self.is_error = true;
            }
        }
        self.is_loading = false;
        self.publication_year.clear();
        self.search_type.clear();
        self.quarter.clear();
    }

    pub async fn submit(&mut self, backend: &dyn ScopusBackend) -> SubmissionOutcome {
        let request = self.begin_submit();
        let outcome = dispatch(backend, request).await;
        self.settle(outcome.clone());
        outcome
    }

    /// Text for the result area: the loading notice while a request is in
    /// flight, the last result otherwise.
    pub fn status_text(&self) -> &str {
        if self.is_loading {
            LOADING_MESSAGE
        } else {
            &self.result_message
        }
    }
}

/// Sends one request and classifies the response. Transport failures are
/// logged here, only their category reaches the form.
pub async fn dispatch(backend: &dyn ScopusBackend, request: SubmissionRequest) -> SubmissionOutcome {
    let response = match backend.submit_data(&request).await {
        Ok(response) => response,
        Err(e) => {
            error!("Error sending data to backend: {:#}", e);
            return SubmissionOutcome::Failed(SubmissionError::Transport(format!("{:#}", e)));
        }
    };
    classify(backend, response)
}

fn classify(backend: &dyn ScopusBackend, response: SubmissionResponse) -> SubmissionOutcome {
    if response.message != BACKEND_SUCCESS {
        info!("Backend rejected submission: {}", response.message);
        return SubmissionOutcome::Failed(SubmissionError::Application(response.message));
    }

    let download_url = match &response.filename {
        Some(filename) => match backend.download_url(filename) {
            Ok(url) => url.to_string(),
            Err(e) => {
                error!("Could not build download link for {:?}: {:#}", filename, e);
                return SubmissionOutcome::Failed(SubmissionError::Application(format!(
                    "invalid filename {:?}",
                    filename
                )));
            }
        },
        None => String::new(),
    };
    info!("Submission succeeded, file at {:?}", download_url);
    SubmissionOutcome::Succeeded {
        filename: response.filename,
        download_url,
    }
}
