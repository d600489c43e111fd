//! Scan controller: drives one scan session end to end.
//!
//! The controller owns the camera device, the decoder, the navigator, and
//! the session state machine, and wires them together: permission handling,
//! the cancellable frame loop, decode routing, payload interpretation, and
//! the single navigation attempt per resolution.
//!
//! # Failure policy
//!
//! Every failure inside a running session is converted into a recoverable
//! session state plus a [`UserMessage`]; the controller's methods only
//! return `Err` for caller mistakes (starting from the wrong state). No
//! error path is fatal and every exit path releases the camera.
//!
//! # Examples
//!
//! ```
//! use farmchainx_capture::MockCamera;
//! use farmchainx_session::{ScanController, ScanStatus};
//! use farmchainx_verify::MockNavigator;
//!
//! #[tokio::main]
//! async fn main() {
//!     let (camera, handle) = MockCamera::new();
//!     let mut controller = ScanController::new(camera, MockNavigator::new());
//!
//!     handle.deny_permission().await.unwrap();
//!     controller.start_camera().await.unwrap();
//!
//!     assert_eq!(controller.session().status(), ScanStatus::Denied);
//!     assert!(handle.was_released());
//! }
//! ```

use farmchainx_capture::{CameraDevice, Frame, load_upload};
use farmchainx_core::{DecodedPayload, Error, Result, VerificationTarget, interpret};
use farmchainx_decode::{DecodeOutcome, QrDecoder};
use farmchainx_verify::Navigator;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::message::UserMessage;
use crate::state_machine::{ScanMode, ScanSession, ScanStatus};

/// Coordinates one scan session.
///
/// Generic over the camera device and the navigator so tests can drive the
/// whole flow with mocks; dispatch stays static.
#[derive(Debug)]
pub struct ScanController<C: CameraDevice, N: Navigator> {
    camera: C,
    navigator: N,
    decoder: QrDecoder,
    session: ScanSession,

    /// Identifier extracted on resolution, kept for manual navigation retry.
    resolved_target: Option<VerificationTarget>,
}

impl<C: CameraDevice, N: Navigator> ScanController<C, N> {
    /// Create a controller for a fresh session.
    pub fn new(camera: C, navigator: N) -> Self {
        Self {
            camera,
            navigator,
            decoder: QrDecoder::new(),
            session: ScanSession::new(),
            resolved_target: None,
        }
    }

    /// The session state, for rendering and assertions.
    pub fn session(&self) -> &ScanSession {
        &self.session
    }

    /// The navigator, for assertions in tests.
    pub fn navigator(&self) -> &N {
        &self.navigator
    }

    /// The identifier extracted on resolution, if any.
    pub fn resolved_target(&self) -> Option<&VerificationTarget> {
        self.resolved_target.as_ref()
    }

    /// Start the camera branch: request permission and open the stream.
    ///
    /// Permission denial moves the session to `Denied` with a user message
    /// pointing at the upload alternative; a device fault during the prompt
    /// moves it to `Error`. Both release the camera.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidStateTransition` if the session is not in
    /// `Initializing`.
    pub async fn start_camera(&mut self) -> Result<()> {
        if self.session.status() != ScanStatus::Initializing {
            return Err(Error::InvalidStateTransition {
                from: self.session.status().to_string(),
                to: ScanStatus::Scanning.to_string(),
            });
        }
        self.session.set_mode(ScanMode::Camera)?;

        match self.camera.request_permission().await {
            Ok(true) => {
                self.session.transition_to(ScanStatus::Scanning)?;
                // Torch support is probed per device; a probe failure just
                // means no torch, never a session fault.
                let torch = self
                    .camera
                    .capabilities()
                    .await
                    .map(|caps| caps.torch)
                    .unwrap_or(false);
                self.session.set_torch_available(torch);
                info!(torch, "camera stream started");
            }
            Ok(false) => {
                self.session.transition_to(ScanStatus::Denied)?;
                self.session.set_user_message(UserMessage::PermissionDenied);
                self.release_camera().await;
                info!("camera permission denied");
            }
            Err(e) => {
                self.session.transition_to(ScanStatus::Error)?;
                self.session
                    .set_user_message(UserMessage::scan_failed(e.to_string()));
                self.release_camera().await;
                warn!(error = %e, "camera failed during permission prompt");
            }
        }

        Ok(())
    }

    /// Run the frame loop until the session leaves `Scanning`.
    ///
    /// Frames are pulled and decoded one at a time; the loop ends on decode
    /// success, a fault, or cancellation (which counts as a user-initiated
    /// stop). Returns once the session has settled or stopped.
    ///
    /// # Errors
    ///
    /// Returns an error only if an internal transition is rejected, which
    /// indicates a controller bug rather than a scan failure.
    pub async fn run(&mut self, cancel: &CancellationToken) -> Result<()> {
        while self.session.status() == ScanStatus::Scanning {
            tokio::select! {
                () = cancel.cancelled() => {
                    self.stop().await?;
                }
                frame = self.camera.next_frame() => match frame {
                    Ok(frame) => self.process_frame(frame).await?,
                    Err(e) => {
                        self.session.transition_to(ScanStatus::Error)?;
                        self.session
                            .set_user_message(UserMessage::scan_failed(e.to_string()));
                        self.release_camera().await;
                        warn!(error = %e, "camera stream fault");
                    }
                }
            }
        }
        Ok(())
    }

    /// Decode one frame and route the outcome.
    ///
    /// No-op unless the session is `Scanning`: frames that arrive after
    /// resolution, denial, or stop are dropped silently. "Not found" leaves
    /// the session untouched so the loop keeps sampling.
    ///
    /// # Errors
    ///
    /// Returns an error only if an internal transition is rejected.
    pub async fn process_frame(&mut self, frame: Frame) -> Result<()> {
        if self.session.status() != ScanStatus::Scanning {
            debug!(status = %self.session.status(), "dropping frame outside scanning");
            return Ok(());
        }

        match self.decoder.decode(frame) {
            Ok(DecodeOutcome::NotFound) => Ok(()),
            Ok(DecodeOutcome::Decoded(payload)) => self.resolve(payload).await,
            Err(e) => {
                self.session.transition_to(ScanStatus::Error)?;
                self.session
                    .set_user_message(UserMessage::scan_failed(e.to_string()));
                self.release_camera().await;
                warn!(error = %e, "decode fault");
                Ok(())
            }
        }
    }

    /// Scan a single uploaded image instead of the camera stream.
    ///
    /// The upload branch resolves or fails directly from `Initializing`;
    /// it never enters `Scanning` and never touches the camera. Validation
    /// failures and codeless images settle as `Error` with a message.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidStateTransition` if the session is not in
    /// `Initializing`.
    pub async fn scan_upload(&mut self, bytes: &[u8]) -> Result<()> {
        if self.session.status() != ScanStatus::Initializing {
            return Err(Error::InvalidStateTransition {
                from: self.session.status().to_string(),
                to: ScanStatus::Resolved.to_string(),
            });
        }
        self.session.set_mode(ScanMode::FileUpload)?;

        let frame = match load_upload(bytes) {
            Ok(frame) => frame,
            Err(e) => {
                self.session.transition_to(ScanStatus::Error)?;
                self.session
                    .set_user_message(UserMessage::unreadable_image(e.to_string()));
                info!(error = %e, "upload rejected");
                return Ok(());
            }
        };

        match self.decoder.decode(frame) {
            Ok(DecodeOutcome::Decoded(payload)) => self.resolve(payload).await,
            Ok(DecodeOutcome::NotFound) => {
                // A one-shot source has nothing to keep sampling; surface it.
                self.session.transition_to(ScanStatus::Error)?;
                self.session.set_user_message(UserMessage::no_code_found());
                Ok(())
            }
            Err(e) => {
                self.session.transition_to(ScanStatus::Error)?;
                self.session
                    .set_user_message(UserMessage::scan_failed(e.to_string()));
                Ok(())
            }
        }
    }

    /// Retry a failed navigation with the identifier kept from resolution.
    ///
    /// No-op when nothing resolved, the session moved on, or a navigation
    /// is already in flight.
    pub async fn retry_navigation(&mut self) {
        if self.session.status() != ScanStatus::Resolved {
            return;
        }
        let Some(target) = self.resolved_target else {
            return;
        };
        self.navigate(target).await;
    }

    /// User-initiated stop: back to `Initializing`, camera released.
    ///
    /// # Errors
    ///
    /// Returns an error only if an internal transition is rejected.
    pub async fn stop(&mut self) -> Result<()> {
        if self.session.status() == ScanStatus::Scanning {
            self.session.transition_to(ScanStatus::Initializing)?;
            info!("scanning stopped by user");
        }
        self.release_camera().await;
        Ok(())
    }

    /// Restart the session, clearing all session and result data.
    ///
    /// Valid from every status; releases the camera first.
    pub async fn restart(&mut self) {
        self.release_camera().await;
        self.session.restart();
        self.resolved_target = None;
        info!("session restarted");
    }

    /// Switch the torch on or off.
    ///
    /// Quiet no-op returning `false` when the device has no torch; device
    /// errors leave the recorded state unchanged. Returns the effective
    /// torch state.
    pub async fn set_torch(&mut self, enabled: bool) -> bool {
        if !self.session.torch_available() {
            return false;
        }
        match self.camera.set_torch(enabled).await {
            Ok(effective) => {
                self.session.set_torch_enabled(effective);
                effective
            }
            Err(e) => {
                warn!(error = %e, "torch switch failed");
                self.session.torch_enabled()
            }
        }
    }

    /// Resolve the session with a decoded payload.
    ///
    /// Runs at most once per session: the transition into `Resolved` guards
    /// re-entry. Stops camera acquisition, interprets the payload, and
    /// attempts the single navigation.
    async fn resolve(&mut self, payload: DecodedPayload) -> Result<()> {
        self.session.transition_to(ScanStatus::Resolved)?;
        self.session.set_last_result(payload.clone());
        if self.session.mode() == ScanMode::Camera {
            self.release_camera().await;
        }
        info!(len = payload.as_str().len(), "scan resolved");

        match interpret(&payload) {
            Some(target) => {
                self.resolved_target = Some(target);
                self.navigate(target).await;
            }
            None => {
                // Valid decode, but not ours: inform, keep the session
                // resolved, never invoke the navigator.
                self.session
                    .set_user_message(UserMessage::unrecognized_payload(&payload));
                info!("decoded payload carries no product identifier");
            }
        }

        Ok(())
    }

    /// Attempt one navigation; repeats while one is pending are ignored.
    async fn navigate(&mut self, target: VerificationTarget) {
        if self.session.navigating() {
            debug!("navigation already in flight, ignoring");
            return;
        }
        self.session.set_navigating(true);

        match self.navigator.go_to(&target.identifier).await {
            Ok(()) => {
                self.session.set_navigating(false);
                self.session.clear_user_message();
                info!(identifier = %target.identifier, "navigated to verification view");
            }
            Err(e) => {
                // The flag resets so a manual retry can go through.
                self.session.set_navigating(false);
                self.session
                    .set_user_message(UserMessage::navigation_failed(e.to_string()));
                warn!(identifier = %target.identifier, error = %e, "navigation failed");
            }
        }
    }

    async fn release_camera(&mut self) {
        if let Err(e) = self.camera.release().await {
            warn!(error = %e, "camera release failed");
        }
    }
}
