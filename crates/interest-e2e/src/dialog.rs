//! Native dialog interception.
//!
//! Dialogs are handled with an explicit two-step protocol: a capture slot
//! is armed in the page before the triggering action, then the caller
//! awaits either a captured dialog or a bounded timeout. The armed slot
//! records the first dialog's type and message and auto-accepts it; there
//! is no fixed settle sleep anywhere in this path.

use serde::{Deserialize, Serialize};

use crate::browser::Page;
use crate::result::{SuiteError, SuiteResult};
use crate::wait::{poll_pause, Deadline, WaitOptions};

/// Default bound for awaiting a captured dialog (2 seconds)
pub const DEFAULT_DIALOG_TIMEOUT_MS: u64 = 2_000;

/// Type of browser dialog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DialogType {
    /// Alert dialog (OK button only)
    Alert,
    /// Confirm dialog (OK/Cancel buttons)
    Confirm,
}

impl std::fmt::Display for DialogType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Alert => write!(f, "alert"),
            Self::Confirm => write!(f, "confirm"),
        }
    }
}

/// A dialog recorded by an armed capture slot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapturedDialog {
    /// Dialog type
    pub kind: DialogType,
    /// Message the page passed to the dialog
    pub message: String,
}

/// Capture slot states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureState {
    /// No slot armed
    Idle,
    /// Slot armed, no dialog yet
    Armed,
    /// A dialog was recorded and accepted
    Captured,
}

#[derive(Debug, Deserialize)]
struct SlotSnapshot {
    state: String,
    kind: Option<DialogType>,
    message: Option<String>,
}

const ARM_SCRIPT: &str = "(() => { \
    window.__dialogCapture = { state: 'armed', kind: null, message: null }; \
    const record = (kind, message, ret) => { \
        const slot = window.__dialogCapture; \
        if (slot && slot.state === 'armed') { \
            slot.state = 'captured'; slot.kind = kind; slot.message = String(message); \
        } \
        return ret; \
    }; \
    window.alert = (m) => record('alert', m, undefined); \
    window.confirm = (m) => record('confirm', m, true); \
    return true; \
})()";

const POLL_SCRIPT: &str = "(window.__dialogCapture || { state: 'idle', kind: null, message: null })";

/// One-shot dialog capture following the arm-then-await protocol.
#[derive(Debug)]
pub struct DialogCapture {
    state: CaptureState,
    captured: Option<CapturedDialog>,
}

impl DialogCapture {
    /// Create an idle capture.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: CaptureState::Idle,
            captured: None,
        }
    }

    /// Current state
    #[must_use]
    pub const fn state(&self) -> CaptureState {
        self.state
    }

    /// The recorded dialog, if one was captured
    #[must_use]
    pub fn captured(&self) -> Option<&CapturedDialog> {
        self.captured.as_ref()
    }

    /// Arm the capture slot in the page. Must happen before the
    /// triggering action.
    pub async fn arm(&mut self, page: &Page) -> SuiteResult<()> {
        let _: bool = page.eval(ARM_SCRIPT).await?;
        self.note_armed();
        Ok(())
    }

    /// Await a captured dialog or the timeout, whichever comes first.
    ///
    /// Returns `Ok(None)` when the window elapses without a dialog; the
    /// caller turns that into a descriptive assertion failure.
    pub async fn wait_captured(
        &mut self,
        page: &Page,
        timeout_ms: u64,
    ) -> SuiteResult<Option<CapturedDialog>> {
        if self.state != CaptureState::Armed {
            return Err(SuiteError::Fixture {
                message: "dialog capture must be armed before waiting".to_string(),
            });
        }
        let wait = WaitOptions::new().with_timeout(timeout_ms);
        let deadline = Deadline::start(timeout_ms);
        loop {
            let snapshot: SlotSnapshot = page.eval(POLL_SCRIPT).await?;
            if snapshot.state == "captured" {
                if let (Some(kind), Some(message)) = (snapshot.kind, snapshot.message) {
                    let dialog = CapturedDialog { kind, message };
                    self.note_captured(dialog.clone());
                    return Ok(Some(dialog));
                }
            }
            if deadline.expired() {
                return Ok(None);
            }
            poll_pause(&wait).await;
        }
    }

    /// Transition Idle -> Armed (pure state step).
    pub fn note_armed(&mut self) {
        self.state = CaptureState::Armed;
        self.captured = None;
    }

    /// Transition Armed -> Captured (pure state step). Later dialogs do
    /// not overwrite the first capture.
    pub fn note_captured(&mut self, dialog: CapturedDialog) {
        if self.state == CaptureState::Armed {
            self.state = CaptureState::Captured;
            self.captured = Some(dialog);
        }
    }
}

impl Default for DialogCapture {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alert(message: &str) -> CapturedDialog {
        CapturedDialog {
            kind: DialogType::Alert,
            message: message.to_string(),
        }
    }

    #[test]
    fn starts_idle_with_nothing_captured() {
        let capture = DialogCapture::new();
        assert_eq!(capture.state(), CaptureState::Idle);
        assert!(capture.captured().is_none());
    }

    #[test]
    fn arm_then_capture_transitions() {
        let mut capture = DialogCapture::new();
        capture.note_armed();
        assert_eq!(capture.state(), CaptureState::Armed);

        capture.note_captured(alert("Please fill in all fields."));
        assert_eq!(capture.state(), CaptureState::Captured);
        assert_eq!(
            capture.captured().unwrap().message,
            "Please fill in all fields."
        );
    }

    #[test]
    fn capture_without_arming_is_ignored() {
        let mut capture = DialogCapture::new();
        capture.note_captured(alert("stray"));
        assert_eq!(capture.state(), CaptureState::Idle);
        assert!(capture.captured().is_none());
    }

    #[test]
    fn first_capture_wins() {
        let mut capture = DialogCapture::new();
        capture.note_armed();
        capture.note_captured(alert("first"));
        capture.note_captured(alert("second"));
        assert_eq!(capture.captured().unwrap().message, "first");
    }

    #[test]
    fn rearming_clears_previous_capture() {
        let mut capture = DialogCapture::new();
        capture.note_armed();
        capture.note_captured(alert("old"));
        capture.note_armed();
        assert_eq!(capture.state(), CaptureState::Armed);
        assert!(capture.captured().is_none());
    }

    #[test]
    fn arm_script_overrides_both_dialog_kinds() {
        assert!(ARM_SCRIPT.contains("window.alert"));
        assert!(ARM_SCRIPT.contains("window.confirm"));
        assert!(ARM_SCRIPT.contains("state: 'armed'"));
    }

    #[test]
    fn dialog_type_serde_matches_page_records() {
        let parsed: DialogType = serde_json::from_str("\"alert\"").unwrap();
        assert_eq!(parsed, DialogType::Alert);
        assert_eq!(DialogType::Confirm.to_string(), "confirm");
    }

    #[cfg(not(feature = "browser"))]
    mod mock_mode {
        use super::*;
        use crate::browser::{Browser, BrowserConfig};

        #[tokio::test]
        async fn waiting_unarmed_is_rejected() {
            let browser = Browser::launch(BrowserConfig::default()).await.unwrap();
            let page = browser.new_page().await.unwrap();
            let mut capture = DialogCapture::new();
            let err = capture.wait_captured(&page, 100).await.unwrap_err();
            assert!(matches!(err, SuiteError::Fixture { .. }));
        }
    }
}
