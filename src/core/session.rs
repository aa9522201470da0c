//! Roast session state machine
//!
//! One session owns the staged file, the options, the result and the toast
//! slot. Status moves IDLE -> ROASTING -> DONE | ERROR, and `reset` brings
//! it back to IDLE from anywhere.
//!
//! Both slow operations (reading the file, calling the model) are split into
//! a `begin_*` call that hands out a ticket and a `finish_*` call that
//! applies the result. Every transition bumps the session epoch, so a result
//! carrying an old ticket is dropped instead of landing on a session that
//! has since been reset or moved on.

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use thiserror::Error;
use uuid::Uuid;

use crate::config::UiTimings;
use crate::providers::{ProviderError, RoastProvider};
use crate::roast::{Language, RoastIntensity, RoastOptions, RoastResponse, UploadedFile};

use super::effects::{LoadingTicker, Toast};
use super::upload::{self, SelectedFile, ValidationError};

pub const ROAST_FAILED_MESSAGE: &str =
    "Failed to roast. The AI is overwhelmed by the bad formatting. Try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    Idle,
    Roasting,
    Done,
    Error,
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SessionStatus::Idle => "IDLE",
            SessionStatus::Roasting => "ROASTING",
            SessionStatus::Done => "DONE",
            SessionStatus::Error => "ERROR",
        })
    }
}

/// A transition the current state does not allow
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("A roast is already in progress")]
    Busy,

    #[error("No resume staged")]
    NoFileStaged,

    #[error("Not allowed while the session is {0}; reset first")]
    NotIdle(SessionStatus),
}

/// What happened to a finished file read or roast request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// The result was applied
    Succeeded,
    /// The failure was applied and a toast posted
    Failed,
    /// The session moved on; the result was dropped
    Stale,
}

/// Handed out by [`Session::begin_select`]
#[derive(Debug)]
pub struct SelectTicket {
    epoch: u64,
}

/// Handed out by [`Session::begin_submit`]; carries everything the request
/// needs so the session is free while it runs
#[derive(Debug, Clone)]
pub struct RoastTicket {
    epoch: u64,
    pub id: Uuid,
    pub file: Arc<UploadedFile>,
    pub intensity: RoastIntensity,
    pub language: Language,
}

#[derive(Debug)]
enum State {
    Idle,
    Roasting(LoadingTicker),
    Done(RoastResponse),
    Error,
}

#[derive(Debug)]
pub struct Session {
    state: State,
    options: RoastOptions,
    staged: Option<Arc<UploadedFile>>,
    toast: Toast,
    epoch: u64,
}

impl Session {
    pub fn new(options: RoastOptions, timings: &UiTimings) -> Self {
        Self {
            state: State::Idle,
            options,
            staged: None,
            toast: Toast::new(timings.toast_ttl),
            epoch: 0,
        }
    }

    pub fn status(&self) -> SessionStatus {
        match self.state {
            State::Idle => SessionStatus::Idle,
            State::Roasting(_) => SessionStatus::Roasting,
            State::Done(_) => SessionStatus::Done,
            State::Error => SessionStatus::Error,
        }
    }

    pub fn options(&self) -> RoastOptions {
        self.options
    }

    pub fn staged(&self) -> Option<&UploadedFile> {
        self.staged.as_deref()
    }

    /// The roast; only present while DONE
    pub fn result(&self) -> Option<&RoastResponse> {
        match &self.state {
            State::Done(response) => Some(response),
            _ => None,
        }
    }

    pub fn toast(&self) -> &Toast {
        &self.toast
    }

    /// Post a transient notification, replacing any visible one
    pub fn notify(&mut self, message: impl Into<String>) {
        self.toast.post(message);
    }

    /// Current loading phrase; `None` outside ROASTING
    pub fn loading_text(&self) -> Option<&'static str> {
        match &self.state {
            State::Roasting(ticker) => Some(ticker.current()),
            _ => None,
        }
    }

    /// Step the loading phrase; `None` outside ROASTING
    pub fn advance_loading(&mut self) -> Option<&'static str> {
        match &mut self.state {
            State::Roasting(ticker) => Some(ticker.advance()),
            _ => None,
        }
    }

    pub fn set_intensity(&mut self, intensity: RoastIntensity) -> Result<(), SessionError> {
        self.ensure_not_roasting()?;
        self.options.set_intensity(intensity);
        Ok(())
    }

    pub fn set_language(&mut self, language: Language) -> Result<(), SessionError> {
        self.ensure_not_roasting()?;
        self.options.set_language(language);
        Ok(())
    }

    /// Start a file selection; the staged file is dropped right away
    pub fn begin_select(&mut self) -> Result<SelectTicket, SessionError> {
        match self.status() {
            SessionStatus::Idle => {}
            SessionStatus::Roasting => return Err(SessionError::Busy),
            status => return Err(SessionError::NotIdle(status)),
        }

        self.staged = None;
        self.epoch += 1;
        Ok(SelectTicket { epoch: self.epoch })
    }

    /// Apply the outcome of a file read
    pub fn finish_select(
        &mut self,
        ticket: SelectTicket,
        result: Result<UploadedFile, ValidationError>,
    ) -> Completion {
        if ticket.epoch != self.epoch || self.status() != SessionStatus::Idle {
            tracing::debug!(ticket = ticket.epoch, epoch = self.epoch, "Dropping superseded file read");
            return Completion::Stale;
        }

        match result {
            Ok(file) => {
                tracing::info!(name = %file.name, mime_type = %file.mime_type, size = file.size, "Resume staged");
                self.staged = Some(Arc::new(file));
                Completion::Succeeded
            }
            Err(e) => {
                tracing::warn!(error = ?e, "Resume rejected");
                self.toast.post(e.to_string());
                Completion::Failed
            }
        }
    }

    /// Validate and stage an already described file
    pub async fn select_file(&mut self, file: SelectedFile) -> Result<Completion, SessionError> {
        let ticket = self.begin_select()?;
        let result = upload::validate(file).await;
        Ok(self.finish_select(ticket, result))
    }

    /// Validate and stage a file on disk
    pub async fn select_path(&mut self, path: &Path) -> Result<Completion, SessionError> {
        let ticket = self.begin_select()?;
        let result = match SelectedFile::from_path(path).await {
            Ok(file) => upload::validate(file).await,
            Err(e) => Err(e),
        };
        Ok(self.finish_select(ticket, result))
    }

    /// Drop the staged file without touching anything else
    pub fn remove_file(&mut self) -> Result<(), SessionError> {
        match self.status() {
            SessionStatus::Idle | SessionStatus::Error => {}
            SessionStatus::Roasting => return Err(SessionError::Busy),
            status => return Err(SessionError::NotIdle(status)),
        }

        self.staged = None;
        self.state = State::Idle;
        self.epoch += 1;
        Ok(())
    }

    /// Enter ROASTING and hand out the request to run
    pub fn begin_submit(&mut self) -> Result<RoastTicket, SessionError> {
        match self.status() {
            SessionStatus::Idle | SessionStatus::Error => {}
            SessionStatus::Roasting => return Err(SessionError::Busy),
            status => return Err(SessionError::NotIdle(status)),
        }

        let file = self.staged.clone().ok_or(SessionError::NoFileStaged)?;

        self.epoch += 1;
        self.state = State::Roasting(LoadingTicker::new(self.options.language()));

        let ticket = RoastTicket {
            epoch: self.epoch,
            id: Uuid::new_v4(),
            file,
            intensity: self.options.intensity(),
            language: self.options.language(),
        };

        tracing::info!(
            request_id = %ticket.id,
            intensity = %ticket.intensity,
            language = %ticket.language,
            "🔥 Roasting {}",
            ticket.file.name
        );

        Ok(ticket)
    }

    /// Apply the provider's answer
    pub fn finish_submit(
        &mut self,
        ticket: RoastTicket,
        result: Result<RoastResponse, ProviderError>,
    ) -> Completion {
        if ticket.epoch != self.epoch || self.status() != SessionStatus::Roasting {
            tracing::warn!(request_id = %ticket.id, "Ignoring stale roast response");
            return Completion::Stale;
        }

        match result {
            Ok(response) => {
                tracing::info!(request_id = %ticket.id, score = response.score, sections = response.sections.len(), "Roast complete");
                self.state = State::Done(response);
                Completion::Succeeded
            }
            Err(e) => {
                tracing::warn!(request_id = %ticket.id, error = %e, "Roast failed");
                self.state = State::Error;
                self.toast.post(ROAST_FAILED_MESSAGE);
                Completion::Failed
            }
        }
    }

    /// Run one roast request to completion
    pub async fn submit(&mut self, provider: &dyn RoastProvider) -> Result<Completion, SessionError> {
        let ticket = self.begin_submit()?;
        tracing::debug!(provider = provider.name(), request_id = %ticket.id, "Dispatching roast");
        let result = provider
            .roast(&ticket.file, ticket.intensity, ticket.language)
            .await;
        Ok(self.finish_submit(ticket, result))
    }

    /// Back to IDLE from any state, dropping the staged file and the result
    pub fn reset(&mut self) {
        if self.status() == SessionStatus::Roasting {
            tracing::info!("Session reset while a roast was in flight");
        }
        self.state = State::Idle;
        self.staged = None;
        self.epoch += 1;
    }

    fn ensure_not_roasting(&self) -> Result<(), SessionError> {
        if self.status() == SessionStatus::Roasting {
            return Err(SessionError::Busy);
        }
        Ok(())
    }
}
