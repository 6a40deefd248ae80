//! Poll cycle supervisor
//!
//! Owns the cursor and drives poll -> validate -> translate -> dispatch on
//! a fixed interval. A cycle is a transaction: the cursor only moves once
//! the server has answered and the answer passed the shape checks. Nothing
//! that happens inside a cycle stops the loop.

use std::sync::Arc;
use std::time::Duration;

use hwstatus_client::ClientError;
use hwstatus_core::validate::{current_date, validate_response};
use hwstatus_core::{HomeworkRecord, SchemaError};
use thiserror::Error;
use tokio::time;
use tracing::{debug, error, info};

use crate::api::HomeworkApi;
use crate::notify::{DeliveryError, Notifier};

/// Everything that can abort a cycle before delivery
#[derive(Debug, Error)]
pub enum CycleError {
    /// Poll failed: transport, unexpected HTTP status, or undecodable body
    #[error(transparent)]
    Client(#[from] ClientError),

    /// Response decoded but failed the shape checks
    #[error(transparent)]
    Schema(#[from] SchemaError),
}

/// What a single cycle amounted to
#[derive(Debug)]
pub enum CycleOutcome {
    /// Server answered with nothing new; cursor advanced
    Idle,

    /// A status change was delivered; cursor advanced
    Notified,

    /// Poll and parse succeeded but delivery failed; cursor advanced anyway
    DeliveryFailed(DeliveryError),

    /// Cycle aborted; cursor unchanged
    Skipped(CycleError),
}

/// Watches the homework statuses API and reports changes
pub struct StatusWatcher {
    api: Arc<dyn HomeworkApi>,
    notifier: Arc<dyn Notifier>,
    poll_interval: Duration,
    cursor: i64,
}

impl StatusWatcher {
    /// Creates a watcher starting from the given cursor.
    pub fn new(
        api: Arc<dyn HomeworkApi>,
        notifier: Arc<dyn Notifier>,
        poll_interval: Duration,
        start_from: i64,
    ) -> Self {
        Self {
            api,
            notifier,
            poll_interval,
            cursor: start_from,
        }
    }

    /// Runs the polling loop forever.
    ///
    /// Every failure category is absorbed and logged; termination is always
    /// external.
    pub async fn run(&mut self) {
        info!(
            "Starting status watcher (interval: {:?})",
            self.poll_interval
        );

        let mut interval = time::interval(self.poll_interval);

        loop {
            interval.tick().await;

            debug!(cursor = self.cursor, "polling for status changes");

            match self.run_cycle().await {
                CycleOutcome::Idle => {
                    debug!(cursor = self.cursor, "no new homework statuses");
                }
                CycleOutcome::Notified => {
                    info!(cursor = self.cursor, "status change reported");
                }
                CycleOutcome::DeliveryFailed(e) => {
                    error!(message = %e.message, "failed to deliver notification: {}", e.reason);
                }
                CycleOutcome::Skipped(e) => {
                    error!("Сбой в работе программы: {e}");
                }
            }
        }
    }

    /// Performs one poll cycle.
    ///
    /// The first record of the batch is the most recent change; it is
    /// translated before the cursor moves, so a malformed record leaves the
    /// cycle as a no-op.
    async fn run_cycle(&mut self) -> CycleOutcome {
        let raw = match self.api.homework_statuses(self.cursor).await {
            Ok(raw) => raw,
            Err(e) => return CycleOutcome::Skipped(e.into()),
        };

        let homeworks = match validate_response(&raw) {
            Ok(homeworks) => homeworks,
            Err(e) => return CycleOutcome::Skipped(e.into()),
        };

        let record = match homeworks.first().map(HomeworkRecord::from_value) {
            Some(Ok(record)) => Some(record),
            Some(Err(e)) => return CycleOutcome::Skipped(e.into()),
            None => None,
        };

        // Poll and parse succeeded; the watermark moves even if delivery
        // fails below. A missing current_date keeps the previous cursor.
        self.cursor = current_date(&raw).unwrap_or(self.cursor);

        let Some(record) = record else {
            return CycleOutcome::Idle;
        };

        match self.notifier.send(&record.notification_text()).await {
            Ok(()) => CycleOutcome::Notified,
            Err(e) => CycleOutcome::DeliveryFailed(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};
    use std::sync::Mutex;

    struct FakeApi {
        responses: Mutex<Vec<Result<Value, ClientError>>>,
        calls: Mutex<Vec<i64>>,
    }

    impl FakeApi {
        fn with(responses: Vec<Result<Value, ClientError>>) -> Arc<Self> {
            Arc::new(Self {
                responses: Mutex::new(responses),
                calls: Mutex::new(Vec::new()),
            })
        }

        fn calls(&self) -> Vec<i64> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait::async_trait]
    impl HomeworkApi for FakeApi {
        async fn homework_statuses(&self, from_date: i64) -> Result<Value, ClientError> {
            self.calls.lock().unwrap().push(from_date);
            self.responses.lock().unwrap().remove(0)
        }
    }

    struct FakeNotifier {
        sent: Mutex<Vec<String>>,
        fail: bool,
    }

    impl FakeNotifier {
        fn working() -> Arc<Self> {
            Arc::new(Self {
                sent: Mutex::new(Vec::new()),
                fail: false,
            })
        }

        fn broken() -> Arc<Self> {
            Arc::new(Self {
                sent: Mutex::new(Vec::new()),
                fail: true,
            })
        }

        fn sent(&self) -> Vec<String> {
            self.sent.lock().unwrap().clone()
        }
    }

    #[async_trait::async_trait]
    impl Notifier for FakeNotifier {
        async fn send(&self, text: &str) -> Result<(), DeliveryError> {
            if self.fail {
                return Err(DeliveryError {
                    message: text.to_string(),
                    reason: "channel unavailable".to_string(),
                });
            }
            self.sent.lock().unwrap().push(text.to_string());
            Ok(())
        }
    }

    fn watcher(api: Arc<FakeApi>, notifier: Arc<FakeNotifier>) -> StatusWatcher {
        StatusWatcher::new(api, notifier, Duration::from_secs(600), 0)
    }

    #[tokio::test]
    async fn empty_batch_advances_cursor_without_dispatch() {
        let api = FakeApi::with(vec![Ok(json!({"homeworks": [], "current_date": 100}))]);
        let notifier = FakeNotifier::working();
        let mut w = watcher(api.clone(), notifier.clone());

        let outcome = w.run_cycle().await;

        assert!(matches!(outcome, CycleOutcome::Idle));
        assert_eq!(w.cursor, 100);
        assert!(notifier.sent().is_empty());
        assert_eq!(api.calls(), vec![0]);
    }

    #[tokio::test]
    async fn status_change_is_dispatched_once() {
        let api = FakeApi::with(vec![Ok(json!({
            "homeworks": [{"homework_name": "hw1", "status": "rejected"}],
            "current_date": 200
        }))]);
        let notifier = FakeNotifier::working();
        let mut w = watcher(api, notifier.clone());

        let outcome = w.run_cycle().await;

        assert!(matches!(outcome, CycleOutcome::Notified));
        assert_eq!(w.cursor, 200);
        assert_eq!(
            notifier.sent(),
            vec![
                "Изменился статус проверки работы \"hw1\". \
                 Работа проверена: у ревьюера есть замечания."
                    .to_string()
            ]
        );
    }

    #[tokio::test]
    async fn only_the_most_recent_record_is_reported() {
        let api = FakeApi::with(vec![Ok(json!({
            "homeworks": [
                {"homework_name": "newest", "status": "approved"},
                {"homework_name": "older", "status": "reviewing"}
            ],
            "current_date": 300
        }))]);
        let notifier = FakeNotifier::working();
        let mut w = watcher(api, notifier.clone());

        w.run_cycle().await;

        let sent = notifier.sent();
        assert_eq!(sent.len(), 1);
        assert!(sent[0].contains("newest"));
    }

    #[tokio::test]
    async fn unknown_status_skips_cycle() {
        let api = FakeApi::with(vec![Ok(json!({
            "homeworks": [{"homework_name": "hw2", "status": "unknown"}]
        }))]);
        let notifier = FakeNotifier::working();
        let mut w = watcher(api, notifier.clone());

        let outcome = w.run_cycle().await;

        assert!(matches!(
            outcome,
            CycleOutcome::Skipped(CycleError::Schema(SchemaError::UnknownStatus(_)))
        ));
        assert_eq!(w.cursor, 0);
        assert!(notifier.sent().is_empty());
    }

    #[tokio::test]
    async fn malformed_shape_skips_cycle() {
        let api = FakeApi::with(vec![Ok(json!({"current_date": 100}))]);
        let notifier = FakeNotifier::working();
        let mut w = watcher(api, notifier.clone());

        let outcome = w.run_cycle().await;

        assert!(matches!(
            outcome,
            CycleOutcome::Skipped(CycleError::Schema(SchemaError::MissingHomeworks))
        ));
        assert_eq!(w.cursor, 0);
    }

    #[tokio::test]
    async fn http_error_skips_cycle() {
        let api = FakeApi::with(vec![Err(ClientError::UnexpectedStatus {
            status: 503,
            from_date: 0,
        })]);
        let notifier = FakeNotifier::working();
        let mut w = watcher(api, notifier.clone());

        let outcome = w.run_cycle().await;

        match outcome {
            CycleOutcome::Skipped(CycleError::Client(e)) => assert_eq!(e.status(), Some(503)),
            other => panic!("expected skipped cycle, got {other:?}"),
        }
        assert_eq!(w.cursor, 0);
        assert!(notifier.sent().is_empty());
    }

    #[tokio::test]
    async fn undecodable_body_skips_cycle() {
        let source = serde_json::from_str::<Value>("not json").unwrap_err();
        let api = FakeApi::with(vec![Err(ClientError::Decode {
            from_date: 0,
            source,
        })]);
        let notifier = FakeNotifier::working();
        let mut w = watcher(api, notifier);

        let outcome = w.run_cycle().await;

        assert!(matches!(
            outcome,
            CycleOutcome::Skipped(CycleError::Client(ClientError::Decode { .. }))
        ));
        assert_eq!(w.cursor, 0);
    }

    #[tokio::test]
    async fn delivery_failure_still_advances_cursor() {
        let api = FakeApi::with(vec![Ok(json!({
            "homeworks": [{"homework_name": "hw1", "status": "approved"}],
            "current_date": 200
        }))]);
        let notifier = FakeNotifier::broken();
        let mut w = watcher(api, notifier);

        let outcome = w.run_cycle().await;

        match outcome {
            CycleOutcome::DeliveryFailed(e) => assert!(e.message.contains("hw1")),
            other => panic!("expected delivery failure, got {other:?}"),
        }
        assert_eq!(w.cursor, 200);
    }

    #[tokio::test]
    async fn missing_current_date_keeps_cursor() {
        let api = FakeApi::with(vec![Ok(json!({
            "homeworks": [{"homework_name": "hw1", "status": "approved"}]
        }))]);
        let notifier = FakeNotifier::working();
        let mut w = watcher(api, notifier.clone());

        let outcome = w.run_cycle().await;

        assert!(matches!(outcome, CycleOutcome::Notified));
        assert_eq!(w.cursor, 0);
        assert_eq!(notifier.sent().len(), 1);
    }

    #[tokio::test]
    async fn cursor_is_monotonic_across_cycles() {
        let api = FakeApi::with(vec![
            Ok(json!({"homeworks": [], "current_date": 100})),
            Err(ClientError::UnexpectedStatus {
                status: 502,
                from_date: 100,
            }),
            Ok(json!({"homeworks": [], "current_date": 250})),
        ]);
        let notifier = FakeNotifier::working();
        let mut w = watcher(api.clone(), notifier);

        let mut cursors = vec![w.cursor];
        for _ in 0..3 {
            w.run_cycle().await;
            cursors.push(w.cursor);
        }

        assert_eq!(cursors, vec![0, 100, 100, 250]);
        assert!(cursors.windows(2).all(|pair| pair[0] <= pair[1]));
        // Each poll is issued with the cursor of its cycle.
        assert_eq!(api.calls(), vec![0, 100, 100]);
    }
}
