//! Live threats view: the one fetch-backed presenter.
//!
//! Every poll replaces the whole retained set. Overlapping in-flight
//! requests are resolved with a monotonic sequence number instead of
//! last-to-resolve-wins: a response older than the newest applied one is
//! dropped. Submission and report export also live here.

use std::time::{Duration, Instant};

use regex::Regex;
use thiserror::Error;

use crate::api::{ApiClient, ApiError};
use crate::models::threat::{
    LiveThreat, SubmitThreat, SUBMIT_PROTOCOLS, SUBMIT_THREAT_TYPES,
};
use crate::views::ViewPhase;

/// How long the submission success notification stays up.
pub const NOTIFICATION_TTL: Duration = Duration::from_secs(4);

/// The form's IP accept pattern. Groups are length-checked, not
/// range-checked, matching the upstream form.
const DOTTED_QUAD_PATTERN: &str = r"^(\d{1,3}\.){3}\d{1,3}$";

/// Client-side validation failures for the submission form
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    #[error("invalid IP address: {0}")]
    InvalidIp(String),

    #[error("unknown threat type: {0}")]
    UnknownThreatType(String),

    #[error("unknown protocol: {0}")]
    UnknownProtocol(String),

    #[error("port must be between 1 and 65535")]
    InvalidPort,
}

/// Submission failures: either the form was invalid or the API call failed
#[derive(Error, Debug)]
pub enum SubmitError {
    #[error("invalid submission: {0}")]
    Form(#[from] FormError),

    #[error(transparent)]
    Api(#[from] ApiError),
}

/// What happened to one fetch response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The retained set was replaced with this many threats.
    Applied(usize),
    /// The server answered but did not confirm success; nothing changed.
    NoUpdate,
    /// A newer response was already applied; this one was dropped.
    Stale,
    /// The view is torn down and ignores responses.
    TornDown,
}

struct Notification {
    message: String,
    raised_at: Instant,
}

pub struct LiveThreatsView {
    threats: Vec<LiveThreat>,
    phase: ViewPhase,
    next_seq: u64,
    applied_seq: u64,
    stale_dropped: u64,
    form: SubmitThreat,
    form_open: bool,
    notification: Option<Notification>,
    refresh_requested: bool,
    ip_pattern: Regex,
}

impl LiveThreatsView {
    pub fn new() -> Self {
        LiveThreatsView {
            threats: Vec::new(),
            phase: ViewPhase::Uninitialized,
            next_seq: 0,
            applied_seq: 0,
            stale_dropped: 0,
            form: SubmitThreat::default(),
            form_open: false,
            notification: None,
            refresh_requested: false,
            ip_pattern: Regex::new(DOTTED_QUAD_PATTERN).expect("literal pattern"),
        }
    }

    /// Allocate the sequence number for a request about to go out.
    pub fn begin_fetch(&mut self) -> u64 {
        self.next_seq += 1;
        self.next_seq
    }

    /// Apply one fetch response. The whole retained set is replaced unless
    /// the response is stale or the view is torn down.
    pub fn apply_fetch(&mut self, seq: u64, threats: Vec<LiveThreat>) -> FetchOutcome {
        if self.phase == ViewPhase::TornDown {
            return FetchOutcome::TornDown;
        }
        if seq <= self.applied_seq {
            self.stale_dropped += 1;
            return FetchOutcome::Stale;
        }

        self.applied_seq = seq;
        let count = threats.len();
        self.threats = threats;
        self.phase = match self.phase {
            ViewPhase::Uninitialized => ViewPhase::Seeded,
            _ => ViewPhase::Polling,
        };
        FetchOutcome::Applied(count)
    }

    /// A fetch failed in transport. The retained set stays untouched.
    pub fn fetch_failed(&mut self, seq: u64) {
        log::debug!("Fetch #{} failed, keeping previous threat list", seq);
    }

    /// One poll cycle against the API. Transport failures propagate after
    /// leaving the retained set unchanged.
    pub async fn refresh(&mut self, api: &ApiClient) -> Result<FetchOutcome, ApiError> {
        let seq = self.begin_fetch();
        match api.fetch_live_threats().await {
            Ok(Some(threats)) => Ok(self.apply_fetch(seq, threats)),
            Ok(None) => Ok(FetchOutcome::NoUpdate),
            Err(e) => {
                self.fetch_failed(seq);
                Err(e)
            }
        }
    }

    /// Validate and post the current form. On acceptance the form resets,
    /// a success notification is raised, and an immediate out-of-band
    /// refresh is issued on top of the regular polling.
    pub async fn submit(&mut self, api: &ApiClient, now: Instant) -> Result<(), SubmitError> {
        self.validate_form()?;
        let message = api.submit_threat(&self.form).await?;
        log::info!("Threat submission accepted: {}", message);
        self.submit_accepted(now);

        if let Err(e) = self.refresh(api).await {
            // The submission itself succeeded; the follow-up refresh is
            // covered by the next scheduled poll.
            log::error!("Post-submit refresh failed: {}", e);
        }
        Ok(())
    }

    pub fn validate_form(&self) -> Result<(), FormError> {
        if !self.ip_pattern.is_match(&self.form.ip) {
            return Err(FormError::InvalidIp(self.form.ip.clone()));
        }
        if !SUBMIT_THREAT_TYPES.contains(&self.form.threat_type.as_str()) {
            return Err(FormError::UnknownThreatType(self.form.threat_type.clone()));
        }
        if !SUBMIT_PROTOCOLS.contains(&self.form.protocol.as_str()) {
            return Err(FormError::UnknownProtocol(self.form.protocol.clone()));
        }
        if self.form.port == 0 {
            return Err(FormError::InvalidPort);
        }
        Ok(())
    }

    /// State changes after the server accepted a submission.
    fn submit_accepted(&mut self, now: Instant) {
        self.form = SubmitThreat::default();
        self.form_open = false;
        self.notification = Some(Notification {
            message: "Threat submitted successfully and is now being monitored".to_string(),
            raised_at: now,
        });
        self.refresh_requested = true;
    }

    /// The active notification message, if it has not expired.
    pub fn notification(&self, now: Instant) -> Option<&str> {
        self.notification
            .as_ref()
            .filter(|n| now.duration_since(n.raised_at) < NOTIFICATION_TTL)
            .map(|n| n.message.as_str())
    }

    /// Take the pending out-of-band refresh request, if any.
    pub fn take_refresh_request(&mut self) -> bool {
        std::mem::take(&mut self.refresh_requested)
    }

    pub fn open_form(&mut self) {
        self.form_open = true;
    }

    pub fn close_form(&mut self) {
        self.form_open = false;
    }

    pub fn form_open(&self) -> bool {
        self.form_open
    }

    pub fn form(&self) -> &SubmitThreat {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut SubmitThreat {
        &mut self.form
    }

    pub fn teardown(&mut self) {
        self.phase = ViewPhase::TornDown;
    }

    pub fn threats(&self) -> &[LiveThreat] {
        &self.threats
    }

    pub fn phase(&self) -> ViewPhase {
        self.phase
    }

    /// How many stale responses have been dropped so far.
    pub fn stale_dropped(&self) -> u64 {
        self.stale_dropped
    }
}

impl Default for LiveThreatsView {
    fn default() -> Self {
        Self::new()
    }
}
