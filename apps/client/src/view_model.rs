//! The ranking view-model: one object per mounted view, owning every piece of
//! state the page renders from.
//!
//! Submissions are split into `begin_submission` and `complete_submission` so an
//! event loop can run the request elsewhere and feed the outcome back in. The
//! in-flight ticket guards re-entrancy; a completion for any other ticket is
//! dropped without touching state. A ticket whose request never finishes is
//! released with `abandon_submission`; `submit` does this itself when dropped.

use tracing::{info, warn};

use crate::chart::{self, ChartSeries};
use crate::errors::{ClientError, TransportError};
use crate::models::{RankingResponse, ResumeDetail};
use crate::selection::{SelectionController, SelectionState};
use crate::store::RankingStore;
use crate::submission::{self, MultipartPayload, ResumeFile};
use crate::transport::RankingTransport;
use crate::view::{ranking_rows, CandidatePanel, RankingRow, ScoreCards};

const SUBMISSION_FAILED: &str = "An error occurred while processing your request";
const SUBMISSION_ABANDONED: &str = "The request was abandoned before a response arrived";

/// A submission that has been accepted and is waiting for its outcome.
#[derive(Debug)]
pub struct SubmissionTicket {
    pub id: u64,
    pub payload: MultipartPayload,
}

/// A user-facing message about the last failed action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub detail: Option<String>,
}

/// Abandons `ticket_id` if it is the outstanding submission. Returns whether it was.
fn abandon(
    in_flight: &mut Option<u64>,
    notification: &mut Option<Notification>,
    ticket_id: u64,
) -> bool {
    if *in_flight != Some(ticket_id) {
        return false;
    }
    *in_flight = None;
    *notification = Some(Notification {
        message: SUBMISSION_FAILED.to_string(),
        detail: Some(SUBMISSION_ABANDONED.to_string()),
    });
    warn!(ticket = ticket_id, "submission abandoned before a response arrived");
    true
}

struct InFlightGuard<'a> {
    in_flight: &'a mut Option<u64>,
    notification: &'a mut Option<Notification>,
    ticket_id: u64,
    armed: bool,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        if self.armed {
            abandon(self.in_flight, self.notification, self.ticket_id);
        }
    }
}

pub struct RankingView<T> {
    transport: T,
    store: RankingStore,
    selection: SelectionController,
    in_flight: Option<u64>,
    next_ticket: u64,
    notification: Option<Notification>,
}

impl<T: RankingTransport> RankingView<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            store: RankingStore::new(),
            selection: SelectionController::new(),
            in_flight: None,
            next_ticket: 1,
            notification: None,
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    // ────────────────────────────────────────────────────────────────────────
    // Submission lifecycle
    // ────────────────────────────────────────────────────────────────────────

    /// Validates input and marks a request as in flight. No network access.
    pub fn begin_submission(
        &mut self,
        job_description: &str,
        files: &[ResumeFile],
    ) -> Result<SubmissionTicket, ClientError> {
        if self.in_flight.is_some() {
            return Err(ClientError::InFlight);
        }

        if let Err(err) = submission::validate(job_description, files) {
            self.notification = Some(Notification {
                message: err.to_string(),
                detail: None,
            });
            return Err(err.into());
        }

        let id = self.next_ticket;
        self.next_ticket += 1;
        self.in_flight = Some(id);
        self.notification = None;

        info!(ticket = id, resumes = files.len(), "submission started");
        Ok(SubmissionTicket {
            id,
            payload: submission::build(job_description, files),
        })
    }

    /// Applies the outcome of the outstanding submission.
    ///
    /// On success the store is replaced and the selection reset within this one
    /// call. On failure the previous result stays on screen and a notification
    /// is recorded. Either way the in-flight flag is cleared.
    pub fn complete_submission(
        &mut self,
        ticket_id: u64,
        outcome: Result<RankingResponse, TransportError>,
    ) -> Result<(), ClientError> {
        if self.in_flight != Some(ticket_id) {
            warn!(ticket = ticket_id, "dropping outcome of a submission that is not outstanding");
            return Err(ClientError::StaleTicket(ticket_id));
        }
        self.in_flight = None;

        match outcome {
            Ok(response) => {
                info!(
                    ticket = ticket_id,
                    ranked = response.ranked.len(),
                    "submission completed"
                );
                self.store.replace(response);
                self.selection.reset();
                Ok(())
            }
            Err(err) => {
                warn!(ticket = ticket_id, kind = ?err.kind(), "submission failed: {err}");
                self.notification = Some(Notification {
                    message: SUBMISSION_FAILED.to_string(),
                    detail: Some(err.to_string()),
                });
                Err(err.into())
            }
        }
    }

    /// Runs a whole submission against this view's transport.
    pub async fn submit(
        &mut self,
        job_description: &str,
        files: &[ResumeFile],
    ) -> Result<(), ClientError> {
        let ticket = self.begin_submission(job_description, files)?;
        let outcome = {
            // Clears the flag if this future is dropped mid-request.
            let mut guard = InFlightGuard {
                in_flight: &mut self.in_flight,
                notification: &mut self.notification,
                ticket_id: ticket.id,
                armed: true,
            };
            let outcome = self.transport.submit(ticket.payload).await;
            guard.armed = false;
            outcome
        };
        self.complete_submission(ticket.id, outcome)
    }

    /// Gives up on the outstanding submission without an outcome, e.g. when the
    /// task running the request was cancelled or panicked. The store is left as is.
    pub fn abandon_submission(&mut self, ticket_id: u64) -> Result<(), ClientError> {
        if abandon(&mut self.in_flight, &mut self.notification, ticket_id) {
            Ok(())
        } else {
            Err(ClientError::StaleTicket(ticket_id))
        }
    }

    /// Whether the submit control should be enabled.
    pub fn can_submit(&self, job_description: &str, file_count: usize) -> bool {
        self.in_flight.is_none() && !job_description.trim().is_empty() && file_count > 0
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn notification(&self) -> Option<&Notification> {
        self.notification.as_ref()
    }

    pub fn dismiss_notification(&mut self) {
        self.notification = None;
    }

    // ────────────────────────────────────────────────────────────────────────
    // Selection and rendering
    // ────────────────────────────────────────────────────────────────────────

    pub fn select(&mut self, filename: &str) -> bool {
        self.selection.select(filename, &self.store)
    }

    pub fn selection(&self) -> &SelectionState {
        self.selection.state()
    }

    pub fn store(&self) -> &RankingStore {
        &self.store
    }

    pub fn selected_detail(&self) -> Option<&ResumeDetail> {
        self.selection
            .current()
            .and_then(|filename| self.store.lookup(filename))
    }

    pub fn chart(&self) -> Option<ChartSeries> {
        chart::project(self.selected_detail())
    }

    pub fn rows(&self) -> Vec<RankingRow> {
        ranking_rows(&self.store, &self.selection)
    }

    pub fn candidate_panel(&self) -> Option<CandidatePanel> {
        self.selected_detail().map(CandidatePanel::from_detail)
    }

    pub fn score_cards(&self) -> Option<ScoreCards> {
        self.selected_detail().map(ScoreCards::from_detail)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::errors::{TransportErrorKind, ValidationError};
    use crate::models::fixtures::response;

    /// Hands out scripted outcomes in order and counts calls.
    struct ScriptedTransport {
        outcomes: Mutex<Vec<Result<RankingResponse, TransportError>>>,
        calls: AtomicUsize,
    }

    impl ScriptedTransport {
        fn new(mut outcomes: Vec<Result<RankingResponse, TransportError>>) -> Self {
            outcomes.reverse();
            Self {
                outcomes: Mutex::new(outcomes),
                calls: AtomicUsize::new(0),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl RankingTransport for ScriptedTransport {
        async fn submit(
            &self,
            _payload: MultipartPayload,
        ) -> Result<RankingResponse, TransportError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.outcomes
                .lock()
                .unwrap()
                .pop()
                .expect("no scripted outcome left")
        }
    }

    /// Never answers.
    struct HangingTransport;

    #[async_trait]
    impl RankingTransport for HangingTransport {
        async fn submit(
            &self,
            _payload: MultipartPayload,
        ) -> Result<RankingResponse, TransportError> {
            std::future::pending().await
        }
    }

    fn files() -> Vec<ResumeFile> {
        vec![ResumeFile::new("a.pdf", b"%PDF".to_vec())]
    }

    fn upstream_500() -> TransportError {
        TransportError::UpstreamError {
            status: 500,
            detail: "x".to_string(),
        }
    }

    #[tokio::test]
    async fn test_validation_failure_makes_no_call() {
        let mut view = RankingView::new(ScriptedTransport::new(vec![]));

        let err = view.submit("  ", &files()).await.unwrap_err();
        assert_eq!(err, ClientError::Validation(ValidationError::BlankJobDescription));
        assert_eq!(view.transport().calls(), 0);
        assert!(!view.is_in_flight());
        assert_eq!(
            view.notification().unwrap().message,
            "Please enter a job description"
        );
    }

    #[test]
    fn test_second_begin_while_in_flight_is_refused() {
        let mut view = RankingView::new(ScriptedTransport::new(vec![]));

        let ticket = view.begin_submission("Rust", &files()).unwrap();
        assert!(view.is_in_flight());
        assert!(!view.can_submit("Rust", 1));
        assert_eq!(
            view.begin_submission("Rust", &files()).unwrap_err(),
            ClientError::InFlight
        );

        view.complete_submission(ticket.id, Ok(response(&[]))).unwrap();
        assert!(view.can_submit("Rust", 1));
    }

    #[test]
    fn test_stale_completion_is_ignored() {
        let mut view = RankingView::new(ScriptedTransport::new(vec![]));

        let first = view.begin_submission("Rust", &files()).unwrap();
        view.complete_submission(first.id, Ok(response(&[("a.pdf", "Alice", 91.0)])))
            .unwrap();
        view.select("a.pdf");

        let err = view
            .complete_submission(first.id, Ok(response(&[("b.pdf", "Bob", 50.0)])))
            .unwrap_err();
        assert_eq!(err, ClientError::StaleTicket(first.id));
        assert_eq!(view.store().ranked()[0].filename, "a.pdf");
        assert_eq!(view.selection(), &SelectionState::Selected("a.pdf".to_string()));
    }

    #[tokio::test]
    async fn test_failure_keeps_previous_result_and_clears_flag() {
        let mut view = RankingView::new(ScriptedTransport::new(vec![
            Ok(response(&[("a.pdf", "Alice", 91.0)])),
            Err(upstream_500()),
        ]));
        view.submit("Rust", &files()).await.unwrap();
        view.select("a.pdf");

        let err = view.submit("Rust", &files()).await.unwrap_err();
        assert!(matches!(
            err,
            ClientError::Transport(ref e) if e.kind() == TransportErrorKind::UpstreamError
        ));
        assert!(!view.is_in_flight());
        assert_eq!(view.store().len(), 1);
        assert_eq!(view.store().generation(), 1);
        assert!(view.chart().is_some());

        let note = view.notification().unwrap();
        assert_eq!(note.message, "An error occurred while processing your request");
        assert!(note.detail.as_deref().unwrap().contains("500"));
    }

    #[tokio::test]
    async fn test_replace_resets_every_prior_selection() {
        let first = response(&[("a.pdf", "Alice", 91.0), ("b.pdf", "Bob", 60.0)]);
        for prior in [None, Some("a.pdf"), Some("b.pdf")] {
            let mut view = RankingView::new(ScriptedTransport::new(vec![
                Ok(first.clone()),
                Ok(first.clone()),
            ]));
            view.submit("Rust", &files()).await.unwrap();
            if let Some(filename) = prior {
                assert!(view.select(filename));
            }

            view.submit("Rust", &files()).await.unwrap();
            assert_eq!(view.selection(), &SelectionState::None);
            assert!(view.chart().is_none());
            assert!(view.candidate_panel().is_none());
        }
    }

    #[tokio::test]
    async fn test_selected_candidate_drives_projections() {
        let mut view = RankingView::new(ScriptedTransport::new(vec![Ok(response(&[
            ("a.pdf", "Alice", 91.0),
            ("b.pdf", "Bob", 60.0),
        ]))]));
        view.submit("Rust", &files()).await.unwrap();

        assert!(view.chart().is_none());
        assert!(view.select("b.pdf"));

        assert_eq!(view.selected_detail().unwrap().filename, "b.pdf");
        assert_eq!(view.candidate_panel().unwrap().filename, "b.pdf");
        assert_eq!(view.score_cards().unwrap().experience_match, "50%");
        let rows = view.rows();
        assert!(!rows[0].selected);
        assert!(rows[1].selected);
    }

    #[tokio::test]
    async fn test_dropped_submit_releases_in_flight_flag() {
        let mut view = RankingView::new(HangingTransport);

        let timed_out = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            view.submit("Rust", &files()),
        )
        .await
        .is_err();

        assert!(timed_out);
        assert!(!view.is_in_flight());
        assert!(view.can_submit("Rust", 1));
        assert_eq!(
            view.notification().unwrap().detail.as_deref(),
            Some("The request was abandoned before a response arrived")
        );
        assert!(view.begin_submission("Rust", &files()).is_ok());
    }

    #[test]
    fn test_abandon_outstanding_submission() {
        let mut view = RankingView::new(ScriptedTransport::new(vec![]));
        let ticket = view.begin_submission("Rust", &files()).unwrap();

        view.abandon_submission(ticket.id).unwrap();
        assert!(!view.is_in_flight());
        assert!(view.can_submit("Rust", 1));
        assert!(view.notification().is_some());

        // late outcome for the abandoned ticket is dropped
        assert_eq!(
            view.complete_submission(ticket.id, Ok(response(&[("a.pdf", "Alice", 91.0)]))),
            Err(ClientError::StaleTicket(ticket.id))
        );
        assert!(view.store().is_empty());
    }

    #[test]
    fn test_abandon_unknown_ticket_keeps_outstanding_one() {
        let mut view = RankingView::new(ScriptedTransport::new(vec![]));
        let ticket = view.begin_submission("Rust", &files()).unwrap();

        assert_eq!(
            view.abandon_submission(ticket.id + 1),
            Err(ClientError::StaleTicket(ticket.id + 1))
        );
        assert!(view.is_in_flight());
    }

    #[test]
    fn test_can_submit_requires_input() {
        let view = RankingView::new(ScriptedTransport::new(vec![]));
        assert!(!view.can_submit("", 1));
        assert!(!view.can_submit("Rust", 0));
        assert!(view.can_submit("Rust", 2));
    }

    #[test]
    fn test_dismiss_notification() {
        let mut view = RankingView::new(ScriptedTransport::new(vec![]));
        let _ = view.begin_submission("Rust", &[]);
        assert!(view.notification().is_some());

        view.dismiss_notification();
        assert!(view.notification().is_none());
    }
}
