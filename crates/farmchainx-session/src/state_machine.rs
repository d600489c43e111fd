//! Scan session state machine.
//!
//! This module provides the state machine that governs one scan session,
//! from camera start (or file selection) through decode resolution, denial,
//! or error, and back to a clean restart.
//!
//! # States
//!
//! - `Initializing`: session created, no acquisition running yet
//! - `Scanning`: camera permission granted, frames being sampled
//! - `Resolved`: a payload was decoded; acquisition stopped
//! - `Denied`: camera permission refused by the user
//! - `Error`: decoder or camera fault; recoverable via restart
//!
//! # Valid Transitions
//!
//! - Initializing → Scanning (permission granted)
//! - Initializing → Denied (permission refused)
//! - Initializing → Resolved/Error (file-upload branch, no camera involved)
//! - Scanning → Resolved (decode success) / Error (fault) / Initializing (stop)
//! - Resolved/Denied/Error → Initializing (restart, clears all session data)
//!
//! "Not found" decode outcomes are not transitions at all: the session stays
//! in `Scanning` and keeps sampling frames.
//!
//! # Examples
//!
//! ```
//! use farmchainx_session::{ScanSession, ScanStatus};
//!
//! let mut session = ScanSession::new();
//! assert_eq!(session.status(), ScanStatus::Initializing);
//!
//! session.transition_to(ScanStatus::Scanning).unwrap();
//! assert_eq!(session.status(), ScanStatus::Scanning);
//! ```

use std::collections::VecDeque;
use std::fmt;
use std::time::Instant;

use serde::{Deserialize, Serialize};

use farmchainx_core::{DecodedPayload, Error, Result};

use crate::message::UserMessage;

/// Maximum number of state transitions to keep in history.
///
/// A scan session rarely sees more than a handful of transitions; 32 covers
/// several restart cycles while keeping the session snapshot small.
const MAX_HISTORY_SIZE: usize = 32;

/// Session status over the scan lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScanStatus {
    /// Session created; no acquisition running.
    Initializing,

    /// Camera permission granted; frames are being sampled.
    Scanning,

    /// A payload was decoded; acquisition stopped.
    ///
    /// Resolution happens at most once per session; later decode callbacks
    /// are no-ops until an explicit restart.
    Resolved,

    /// Camera permission was refused.
    ///
    /// No further camera attempts happen without an explicit restart; the
    /// file-upload path remains available.
    Denied,

    /// Decoder or camera fault unrelated to "no code present".
    Error,
}

impl fmt::Display for ScanStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status_str = match self {
            ScanStatus::Initializing => "Initializing",
            ScanStatus::Scanning => "Scanning",
            ScanStatus::Resolved => "Resolved",
            ScanStatus::Denied => "Denied",
            ScanStatus::Error => "Error",
        };
        write!(f, "{}", status_str)
    }
}

impl ScanStatus {
    /// Check if transition to target status is valid from this status.
    ///
    /// The `Initializing → Resolved | Error` edges exist for the file-upload
    /// branch, which resolves or fails without ever entering `Scanning`.
    ///
    /// # Examples
    ///
    /// ```
    /// use farmchainx_session::ScanStatus;
    ///
    /// assert!(ScanStatus::Initializing.can_transition_to(&ScanStatus::Scanning));
    /// assert!(!ScanStatus::Denied.can_transition_to(&ScanStatus::Scanning));
    /// ```
    pub fn can_transition_to(&self, target: &ScanStatus) -> bool {
        matches!(
            (self, target),
            // From Initializing: camera branch or file-upload branch
            (
                ScanStatus::Initializing,
                ScanStatus::Scanning
                    | ScanStatus::Denied
                    | ScanStatus::Resolved
                    | ScanStatus::Error
            )
            // From Scanning
            | (
                ScanStatus::Scanning,
                ScanStatus::Resolved | ScanStatus::Error | ScanStatus::Initializing
            )
            // Recoverable terminal states, via restart
            | (
                ScanStatus::Resolved | ScanStatus::Denied | ScanStatus::Error,
                ScanStatus::Initializing
            )
        )
    }

    /// Whether this status ends acquisition until an explicit restart.
    pub fn is_settled(&self) -> bool {
        matches!(
            self,
            ScanStatus::Resolved | ScanStatus::Denied | ScanStatus::Error
        )
    }
}

/// How frames are entering the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScanMode {
    /// No acquisition source selected.
    Idle,

    /// Live camera stream.
    Camera,

    /// Single user-selected image file.
    FileUpload,
}

/// A single status transition with timestamp, kept for diagnostics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateTransition {
    /// The status transitioned from.
    pub from: ScanStatus,

    /// The status transitioned to.
    pub to: ScanStatus,

    /// When the transition occurred. Not serialized; reset to the time of
    /// deserialization, as `Instant` is process-specific.
    #[serde(skip, default = "Instant::now")]
    pub timestamp: Instant,
}

impl StateTransition {
    fn new(from: ScanStatus, to: ScanStatus) -> Self {
        Self {
            from,
            to,
            timestamp: Instant::now(),
        }
    }
}

/// State of one scan session.
///
/// The session enforces valid status transitions, tracks the acquisition
/// mode and torch state, holds the decoded payload once resolved, and
/// carries at most one user-facing message at a time.
///
/// # Invariant
///
/// `mode == FileUpload` excludes `status == Scanning`: the upload branch
/// resolves or fails directly from `Initializing`. Both `transition_to`
/// and `set_mode` reject the combination, whichever side moves first.
///
/// # Thread Safety
///
/// Not thread-safe by design. In async contexts, protect access with
/// `tokio::sync::Mutex` or drive it from a single task.
#[derive(Debug, Serialize, Deserialize)]
pub struct ScanSession {
    status: ScanStatus,
    mode: ScanMode,
    torch_available: bool,
    torch_enabled: bool,
    last_result: Option<DecodedPayload>,
    user_message: Option<UserMessage>,
    navigating: bool,
    history: VecDeque<StateTransition>,
}

impl ScanSession {
    /// Create a new session in the `Initializing` status.
    pub fn new() -> Self {
        Self {
            status: ScanStatus::Initializing,
            mode: ScanMode::Idle,
            torch_available: false,
            torch_enabled: false,
            last_result: None,
            user_message: None,
            navigating: false,
            history: VecDeque::with_capacity(MAX_HISTORY_SIZE),
        }
    }

    /// Current session status.
    pub fn status(&self) -> ScanStatus {
        self.status
    }

    /// Current acquisition mode.
    pub fn mode(&self) -> ScanMode {
        self.mode
    }

    /// Whether the active camera reports a torch.
    pub fn torch_available(&self) -> bool {
        self.torch_available
    }

    /// Whether the torch is currently on.
    pub fn torch_enabled(&self) -> bool {
        self.torch_enabled
    }

    /// The decoded payload, once the session resolved.
    pub fn last_result(&self) -> Option<&DecodedPayload> {
        self.last_result.as_ref()
    }

    /// The current user-facing message, if any.
    pub fn user_message(&self) -> Option<&UserMessage> {
        self.user_message.as_ref()
    }

    /// Whether a navigation attempt is in flight.
    pub fn navigating(&self) -> bool {
        self.navigating
    }

    /// Status transition history, oldest first.
    pub fn history(&self) -> &VecDeque<StateTransition> {
        &self.history
    }

    /// Transition to a new status, validating the transition.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidStateTransition` if the transition is not in
    /// the table, or if it would put a file-upload session into `Scanning`.
    ///
    /// # Examples
    ///
    /// ```
    /// use farmchainx_session::{ScanSession, ScanStatus};
    ///
    /// let mut session = ScanSession::new();
    /// session.transition_to(ScanStatus::Scanning).unwrap();
    ///
    /// // Scanning cannot jump to Denied
    /// assert!(session.transition_to(ScanStatus::Denied).is_err());
    /// ```
    pub fn transition_to(&mut self, new_status: ScanStatus) -> Result<StateTransition> {
        let invalid = !self.status.can_transition_to(&new_status)
            || (self.mode == ScanMode::FileUpload && new_status == ScanStatus::Scanning);
        if invalid {
            return Err(Error::InvalidStateTransition {
                from: self.status.to_string(),
                to: new_status.to_string(),
            });
        }

        let transition = StateTransition::new(self.status, new_status);
        self.status = new_status;
        self.add_to_history(transition.clone());
        Ok(transition)
    }

    /// Select the acquisition mode.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidStateTransition` if the mode would pair
    /// file-upload with an active camera scan.
    pub fn set_mode(&mut self, mode: ScanMode) -> Result<()> {
        if mode == ScanMode::FileUpload && self.status == ScanStatus::Scanning {
            return Err(Error::InvalidStateTransition {
                from: self.status.to_string(),
                to: format!("{mode:?} mode"),
            });
        }
        self.mode = mode;
        Ok(())
    }

    /// Record torch capability as probed from the device.
    pub fn set_torch_available(&mut self, available: bool) {
        self.torch_available = available;
        if !available {
            self.torch_enabled = false;
        }
    }

    /// Record the effective torch state.
    pub fn set_torch_enabled(&mut self, enabled: bool) {
        self.torch_enabled = enabled;
    }

    /// Store the decoded payload.
    pub fn set_last_result(&mut self, payload: DecodedPayload) {
        self.last_result = Some(payload);
    }

    /// Show a message to the user, replacing any previous one.
    pub fn set_user_message(&mut self, message: UserMessage) {
        self.user_message = Some(message);
    }

    /// Clear the user-facing message.
    pub fn clear_user_message(&mut self) {
        self.user_message = None;
    }

    /// Mark a navigation attempt as in flight or completed.
    pub fn set_navigating(&mut self, navigating: bool) {
        self.navigating = navigating;
    }

    /// Restart the session: back to `Initializing`, all data cleared.
    ///
    /// Valid from every status (restarting an `Initializing` session just
    /// clears its data). History survives the restart for diagnostics.
    pub fn restart(&mut self) -> Option<StateTransition> {
        let transition = if self.status == ScanStatus::Initializing {
            None
        } else {
            let t = StateTransition::new(self.status, ScanStatus::Initializing);
            self.add_to_history(t.clone());
            Some(t)
        };

        self.status = ScanStatus::Initializing;
        self.mode = ScanMode::Idle;
        self.torch_available = false;
        self.torch_enabled = false;
        self.last_result = None;
        self.user_message = None;
        self.navigating = false;

        transition
    }

    fn add_to_history(&mut self, transition: StateTransition) {
        self.history.push_back(transition);
        if self.history.len() > MAX_HISTORY_SIZE {
            self.history.pop_front();
        }
    }
}

impl Default for ScanSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_starts_initializing() {
        let session = ScanSession::new();
        assert_eq!(session.status(), ScanStatus::Initializing);
        assert_eq!(session.mode(), ScanMode::Idle);
        assert!(session.last_result().is_none());
        assert!(session.user_message().is_none());
        assert!(!session.navigating());
        assert_eq!(session.history().len(), 0);
    }

    #[test]
    fn test_valid_transition_initializing_to_scanning() {
        let mut session = ScanSession::new();
        let transition = session.transition_to(ScanStatus::Scanning).unwrap();

        assert_eq!(session.status(), ScanStatus::Scanning);
        assert_eq!(transition.from, ScanStatus::Initializing);
        assert_eq!(transition.to, ScanStatus::Scanning);
    }

    #[test]
    fn test_valid_transition_initializing_to_denied() {
        let mut session = ScanSession::new();
        session.transition_to(ScanStatus::Denied).unwrap();
        assert_eq!(session.status(), ScanStatus::Denied);
    }

    #[test]
    fn test_valid_transition_scanning_to_resolved() {
        let mut session = ScanSession::new();
        session.transition_to(ScanStatus::Scanning).unwrap();
        session.transition_to(ScanStatus::Resolved).unwrap();
        assert_eq!(session.status(), ScanStatus::Resolved);
    }

    #[test]
    fn test_valid_transition_scanning_to_error() {
        let mut session = ScanSession::new();
        session.transition_to(ScanStatus::Scanning).unwrap();
        session.transition_to(ScanStatus::Error).unwrap();
        assert_eq!(session.status(), ScanStatus::Error);
    }

    #[test]
    fn test_valid_transition_scanning_to_initializing_on_stop() {
        let mut session = ScanSession::new();
        session.transition_to(ScanStatus::Scanning).unwrap();
        session.transition_to(ScanStatus::Initializing).unwrap();
        assert_eq!(session.status(), ScanStatus::Initializing);
    }

    #[test]
    fn test_file_upload_branch_initializing_to_resolved() {
        let mut session = ScanSession::new();
        session.set_mode(ScanMode::FileUpload).unwrap();
        session.transition_to(ScanStatus::Resolved).unwrap();
        assert_eq!(session.status(), ScanStatus::Resolved);
    }

    #[test]
    fn test_file_upload_branch_initializing_to_error() {
        let mut session = ScanSession::new();
        session.set_mode(ScanMode::FileUpload).unwrap();
        session.transition_to(ScanStatus::Error).unwrap();
        assert_eq!(session.status(), ScanStatus::Error);
    }

    #[test]
    fn test_file_upload_mode_excludes_scanning() {
        let mut session = ScanSession::new();
        session.set_mode(ScanMode::FileUpload).unwrap();

        let result = session.transition_to(ScanStatus::Scanning);
        assert!(result.is_err());
        assert_eq!(session.status(), ScanStatus::Initializing);
    }

    #[test]
    fn test_set_mode_rejects_file_upload_while_scanning() {
        let mut session = ScanSession::new();
        session.set_mode(ScanMode::Camera).unwrap();
        session.transition_to(ScanStatus::Scanning).unwrap();

        let result = session.set_mode(ScanMode::FileUpload);
        assert!(matches!(result, Err(Error::InvalidStateTransition { .. })));
        // The forbidden combination never materializes.
        assert_eq!(session.mode(), ScanMode::Camera);
        assert_eq!(session.status(), ScanStatus::Scanning);
    }

    #[test]
    fn test_set_mode_allowed_outside_scanning() {
        let mut session = ScanSession::new();
        session.set_mode(ScanMode::FileUpload).unwrap();
        session.transition_to(ScanStatus::Resolved).unwrap();

        // Settled sessions may switch modes freely.
        session.set_mode(ScanMode::Idle).unwrap();
        session.set_mode(ScanMode::FileUpload).unwrap();
    }

    #[test]
    fn test_invalid_transition_denied_to_scanning() {
        let mut session = ScanSession::new();
        session.transition_to(ScanStatus::Denied).unwrap();

        let result = session.transition_to(ScanStatus::Scanning);
        assert!(matches!(result, Err(Error::InvalidStateTransition { .. })));
    }

    #[test]
    fn test_invalid_transition_resolved_to_scanning() {
        let mut session = ScanSession::new();
        session.transition_to(ScanStatus::Scanning).unwrap();
        session.transition_to(ScanStatus::Resolved).unwrap();

        assert!(session.transition_to(ScanStatus::Scanning).is_err());
        assert!(session.transition_to(ScanStatus::Error).is_err());
    }

    #[test]
    fn test_invalid_transition_error_to_resolved() {
        let mut session = ScanSession::new();
        session.transition_to(ScanStatus::Scanning).unwrap();
        session.transition_to(ScanStatus::Error).unwrap();

        assert!(session.transition_to(ScanStatus::Resolved).is_err());
    }

    #[test]
    fn test_settled_states_recover_via_initializing() {
        for settled in [ScanStatus::Resolved, ScanStatus::Denied, ScanStatus::Error] {
            assert!(settled.is_settled());
            assert!(settled.can_transition_to(&ScanStatus::Initializing));
        }
        assert!(!ScanStatus::Initializing.is_settled());
        assert!(!ScanStatus::Scanning.is_settled());
    }

    #[test]
    fn test_restart_clears_all_session_data() {
        let mut session = ScanSession::new();
        session.set_mode(ScanMode::Camera).unwrap();
        session.transition_to(ScanStatus::Scanning).unwrap();
        session.set_torch_available(true);
        session.set_torch_enabled(true);
        session.set_last_result(DecodedPayload::new("payload"));
        session.set_user_message(UserMessage::no_code_found());
        session.set_navigating(true);
        session.transition_to(ScanStatus::Resolved).unwrap();

        let transition = session.restart().unwrap();
        assert_eq!(transition.from, ScanStatus::Resolved);
        assert_eq!(transition.to, ScanStatus::Initializing);

        assert_eq!(session.status(), ScanStatus::Initializing);
        assert_eq!(session.mode(), ScanMode::Idle);
        assert!(!session.torch_available());
        assert!(!session.torch_enabled());
        assert!(session.last_result().is_none());
        assert!(session.user_message().is_none());
        assert!(!session.navigating());
    }

    #[test]
    fn test_restart_from_initializing_is_a_noop_transition() {
        let mut session = ScanSession::new();
        session.set_user_message(UserMessage::no_code_found());

        assert!(session.restart().is_none());
        assert!(session.user_message().is_none());
        assert_eq!(session.history().len(), 0);
    }

    #[test]
    fn test_transition_history_is_recorded() {
        let mut session = ScanSession::new();
        session.transition_to(ScanStatus::Scanning).unwrap();
        session.transition_to(ScanStatus::Resolved).unwrap();
        session.restart();

        let history: Vec<_> = session.history().iter().collect();
        assert_eq!(history.len(), 3);
        assert_eq!(history[0].from, ScanStatus::Initializing);
        assert_eq!(history[1].to, ScanStatus::Resolved);
        assert_eq!(history[2].to, ScanStatus::Initializing);
    }

    #[test]
    fn test_history_size_limit() {
        let mut session = ScanSession::new();
        for _ in 0..50 {
            session.transition_to(ScanStatus::Scanning).unwrap();
            session.transition_to(ScanStatus::Resolved).unwrap();
            session.restart();
        }
        assert_eq!(session.history().len(), MAX_HISTORY_SIZE);
    }

    #[test]
    fn test_torch_availability_clears_enabled() {
        let mut session = ScanSession::new();
        session.set_torch_available(true);
        session.set_torch_enabled(true);

        session.set_torch_available(false);
        assert!(!session.torch_enabled());
    }

    #[test]
    fn test_status_serialization() {
        let serialized = serde_json::to_string(&ScanStatus::Initializing).unwrap();
        assert_eq!(serialized, "\"initializing\"");

        let mode = serde_json::to_string(&ScanMode::FileUpload).unwrap();
        assert_eq!(mode, "\"file_upload\"");

        let back: ScanStatus = serde_json::from_str("\"scanning\"").unwrap();
        assert_eq!(back, ScanStatus::Scanning);
    }

    #[test]
    fn test_status_display_formatting() {
        assert_eq!(ScanStatus::Initializing.to_string(), "Initializing");
        assert_eq!(ScanStatus::Scanning.to_string(), "Scanning");
        assert_eq!(ScanStatus::Resolved.to_string(), "Resolved");
        assert_eq!(ScanStatus::Denied.to_string(), "Denied");
        assert_eq!(ScanStatus::Error.to_string(), "Error");
    }
}
