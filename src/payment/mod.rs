//! The payment page: a countdown and a payment attempt composed on one page.
//!
//! The two machines are deliberately independent — a payment may succeed a
//! moment before expiry, and the countdown never gates an in-flight attempt.
//! They meet in exactly one place, [`PaymentPage::can_submit`]:
//! submission is permitted iff the countdown is `Active` and the attempt is
//! `MethodSelected`. A successful attempt cancels the countdown permanently;
//! nothing is observable on the page after that.

mod attempt;
mod countdown;

pub use attempt::{
    Attempt, AttemptError, AttemptState, MethodKind, PaymentMethod, Receipt, UnknownMethod,
};
pub use countdown::{Countdown, CountdownState, Tick};

use crate::api::types::PayOrder;
use crate::api::StorefrontApi;
use crate::config::PaymentConfig;
use crate::error::{Result, TokokuError};
use crate::session::{require_session, SessionStore};
use chrono::{Duration as ChronoDuration, Utc};
use std::time::Duration;

/// Raw navigation parameters for the payment page, as carried in the query
/// string: `order_id` is a string-encoded integer, `amount` a string-encoded
/// non-negative number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentParams {
    pub order_id: String,
    pub amount: String,
}

impl PaymentParams {
    /// Parse and validate the parameters.
    ///
    /// # Errors
    ///
    /// Fails with the page's entry alert when the order id is not an
    /// integer or the amount is not a finite non-negative number.
    pub fn parse(&self) -> Result<(i64, f64)> {
        let invalid = || TokokuError::validation("Data pembayaran tidak valid!");

        let order_id: i64 = self.order_id.trim().parse().map_err(|_| invalid())?;
        let amount: f64 = self.amount.trim().parse().map_err(|_| invalid())?;
        if !amount.is_finite() || amount < 0.0 {
            return Err(invalid());
        }
        Ok((order_id, amount))
    }
}

/// Per-visit payment page controller.
///
/// Owns the countdown, the attempt, and the page's order context; construct
/// one per navigation and drop it on leave. In-flight work is not cancelled
/// by dropping — there is nothing to cancel besides the caller-driven tick.
pub struct PaymentPage<A, S> {
    api: A,
    store: S,
    order_id: i64,
    amount: f64,
    countdown: Countdown,
    attempt: Attempt,
    processing_delay: Duration,
}

impl<A, S> std::fmt::Debug for PaymentPage<A, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaymentPage")
            .field("order_id", &self.order_id)
            .field("amount", &self.amount)
            .finish_non_exhaustive()
    }
}

impl<A: StorefrontApi, S: SessionStore> PaymentPage<A, S> {
    /// Enter the payment page.
    ///
    /// Validates the navigation parameters, then opens the payment window:
    /// an already-stored deadline for this order is resumed, otherwise a new
    /// one is recorded at `now + window`. A reload therefore continues the
    /// same 24-hour window instead of starting a fresh one.
    ///
    /// # Errors
    ///
    /// Invalid parameters fail with the entry alert before any countdown is
    /// started; the front-end bounces back to the order list.
    pub async fn open(
        api: A,
        store: S,
        params: &PaymentParams,
        config: &PaymentConfig,
    ) -> Result<Self> {
        let (order_id, amount) = params.parse()?;

        let deadline = match store.payment_deadline(order_id).await? {
            Some(deadline) => deadline,
            None => {
                let window = ChronoDuration::from_std(config.window)
                    .map_err(|e| TokokuError::config(format!("payment window too long: {}", e)))?;
                let deadline = Utc::now() + window;
                store.save_payment_deadline(order_id, deadline).await?;
                deadline
            }
        };

        tracing::debug!(
            target: "tokoku::payment",
            order_id,
            amount,
            deadline = %deadline,
            "payment page opened"
        );

        Ok(Self {
            api,
            store,
            order_id,
            amount,
            countdown: Countdown::new(deadline),
            attempt: Attempt::new(),
            processing_delay: config.processing_delay,
        })
    }

    /// The order being paid.
    #[must_use]
    pub fn order_id(&self) -> i64 {
        self.order_id
    }

    /// The amount due, as carried in the navigation parameters.
    #[must_use]
    pub fn amount(&self) -> f64 {
        self.amount
    }

    /// Countdown state, for rendering.
    #[must_use]
    pub fn countdown(&self) -> &Countdown {
        &self.countdown
    }

    /// Attempt state, for rendering.
    #[must_use]
    pub fn attempt(&self) -> &Attempt {
        &self.attempt
    }

    /// Advance the countdown.
    ///
    /// Returns `None` once the attempt has succeeded — success cancels the
    /// timer permanently, so late ticks observe nothing, not even expiry.
    pub fn tick(&mut self, now: chrono::DateTime<Utc>) -> Option<Tick> {
        if self.attempt.is_terminal() {
            return None;
        }
        Some(self.countdown.tick(now))
    }

    /// Choose (or replace) the payment method.
    pub fn select_method(&mut self, method: PaymentMethod) -> Result<()> {
        self.attempt
            .select(method)
            .map_err(|e| TokokuError::validation(e.to_string()))?;
        tracing::debug!(
            target: "tokoku::payment",
            order_id = self.order_id,
            method = method.code(),
            "payment method selected"
        );
        Ok(())
    }

    /// The composition rule between the two machines: submission is
    /// permitted iff the countdown is `Active` and the attempt is
    /// `MethodSelected`.
    #[must_use]
    pub fn can_submit(&self) -> bool {
        self.countdown.is_active() && self.attempt.ready_to_submit()
    }

    /// Label for the armed pay action, if there is one.
    #[must_use]
    pub fn pay_label(&self) -> Option<String> {
        self.attempt.pay_label()
    }

    /// Submit the payment.
    ///
    /// Moves the attempt to `Processing` before the first await so a
    /// re-entrant submit is refused, waits the simulated processing delay,
    /// then asks the backend to mark the order paid. On success the receipt
    /// is returned, the stored deadline is dropped, and the page is
    /// terminal. On rejection the attempt re-arms with the same method and
    /// the backend detail propagates to the caller.
    pub async fn submit(&mut self) -> Result<Receipt> {
        if !self.attempt.ready_to_submit() {
            let reason = match self.attempt.state() {
                AttemptState::AwaitingMethod => "Silakan pilih metode pembayaran!",
                AttemptState::Processing(_) => "Pembayaran sedang diproses",
                _ => "Pembayaran sudah selesai",
            };
            return Err(TokokuError::validation(reason));
        }
        if !self.countdown.is_active() {
            return Err(TokokuError::validation("Waktu pembayaran telah habis!"));
        }
        let session = require_session(&self.store).await?;

        let method = self
            .attempt
            .begin_processing()
            .map_err(|e| TokokuError::validation(e.to_string()))?;

        tracing::info!(
            target: "tokoku::payment",
            order_id = self.order_id,
            method = method.code(),
            "processing payment"
        );

        // Simulated gateway latency.
        tokio::time::sleep(self.processing_delay).await;

        let confirmation = self
            .api
            .pay_order(
                &session,
                self.order_id,
                &PayOrder {
                    payment_method: method.code().to_string(),
                },
            )
            .await;

        match confirmation {
            Ok(confirmation) => {
                let receipt = Receipt {
                    order_id: self.order_id,
                    amount: self.amount,
                    method,
                };
                self.attempt.complete(receipt.clone());

                // The window is settled; forget the stored deadline. Failure
                // here only means a stale entry stays on disk.
                if let Err(e) = self.store.clear_payment_deadline(self.order_id).await {
                    tracing::warn!(
                        target: "tokoku::payment",
                        order_id = self.order_id,
                        error = %e,
                        "could not drop stored payment deadline"
                    );
                }

                tracing::info!(
                    target: "tokoku::payment",
                    order_id = confirmation.order_id,
                    status = %String::from(confirmation.status.clone()),
                    "payment confirmed"
                );
                Ok(receipt)
            }
            Err(e) => {
                self.attempt.fail();
                tracing::warn!(
                    target: "tokoku::payment",
                    order_id = self.order_id,
                    error = %e,
                    "payment failed; attempt re-armed"
                );
                Err(e.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{MemoryStore, Session};
    use crate::testing::{fake, MockApi};

    fn fast_config() -> PaymentConfig {
        PaymentConfig {
            window: Duration::from_secs(24 * 60 * 60),
            processing_delay: Duration::from_millis(0),
        }
    }

    fn params(order_id: &str, amount: &str) -> PaymentParams {
        PaymentParams {
            order_id: order_id.to_string(),
            amount: amount.to_string(),
        }
    }

    fn authed_store() -> MemoryStore {
        MemoryStore::with_session(&Session::new("tok", fake::buyer()))
    }

    #[test]
    fn params_validation() {
        assert_eq!(params("42", "150000").parse().unwrap(), (42, 150_000.0));
        assert!(params("", "150000").parse().is_err());
        assert!(params("abc", "150000").parse().is_err());
        assert!(params("42", "").parse().is_err());
        assert!(params("42", "-1").parse().is_err());
        assert!(params("42", "NaN").parse().is_err());
        assert!(params("42", "inf").parse().is_err());
    }

    #[tokio::test]
    async fn invalid_entry_starts_no_countdown() {
        let store = authed_store();
        let result = PaymentPage::open(
            MockApi::new(),
            store.clone(),
            &params("42", "oops"),
            &fast_config(),
        )
        .await;
        assert!(result.is_err());
        // No deadline was persisted for the order.
        assert_eq!(store.payment_deadline(42).await.unwrap(), None);
    }

    #[tokio::test]
    async fn entry_persists_deadline_and_reentry_resumes_it() {
        let store = authed_store();
        let page = PaymentPage::open(
            MockApi::new(),
            store.clone(),
            &params("42", "150000"),
            &fast_config(),
        )
        .await
        .unwrap();
        let first_deadline = page.countdown().deadline();
        drop(page);

        // Reloading the page resumes the same window.
        let page = PaymentPage::open(
            MockApi::new(),
            store.clone(),
            &params("42", "150000"),
            &fast_config(),
        )
        .await
        .unwrap();
        assert_eq!(page.countdown().deadline(), first_deadline);
    }

    #[tokio::test]
    async fn submit_without_method_is_blocked_locally() {
        let api = MockApi::new();
        let mut page = PaymentPage::open(
            api.clone(),
            authed_store(),
            &params("42", "150000"),
            &fast_config(),
        )
        .await
        .unwrap();

        assert!(!page.can_submit());
        let err = page.submit().await.unwrap_err();
        assert!(matches!(err, TokokuError::Validation(_)));
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn submit_requires_session() {
        let store = MemoryStore::new();
        let mut page = PaymentPage::open(
            MockApi::new(),
            store,
            &params("42", "150000"),
            &fast_config(),
        )
        .await
        .unwrap();
        page.select_method(PaymentMethod::Dana).unwrap();

        let err = page.submit().await.unwrap_err();
        assert!(matches!(err, TokokuError::Unauthenticated));
    }

    #[tokio::test]
    async fn successful_payment_is_terminal_and_cancels_countdown() {
        let store = authed_store();
        let mut page = PaymentPage::open(
            MockApi::new(),
            store.clone(),
            &params("42", "150000"),
            &fast_config(),
        )
        .await
        .unwrap();

        page.select_method(PaymentMethod::Dana).unwrap();
        assert!(page.can_submit());

        let receipt = page.submit().await.unwrap();
        assert_eq!(receipt.order_id, 42);
        assert_eq!(receipt.amount, 150_000.0);
        assert_eq!(receipt.method, PaymentMethod::Dana);

        // Terminal: the countdown observes nothing anymore, even past expiry.
        let far_future = Utc::now() + ChronoDuration::hours(48);
        assert_eq!(page.tick(far_future), None);
        assert!(!page.can_submit());
        assert!(page.submit().await.is_err());

        // The stored deadline was dropped.
        assert_eq!(store.payment_deadline(42).await.unwrap(), None);
    }

    #[tokio::test]
    async fn failed_payment_rearms_with_same_method() {
        let api = MockApi::new().reject_next("Order tidak bisa dibayar. Status saat ini: paid");
        let mut page = PaymentPage::open(
            api,
            authed_store(),
            &params("42", "150000"),
            &fast_config(),
        )
        .await
        .unwrap();

        page.select_method(PaymentMethod::Ovo).unwrap();
        let err = page.submit().await.unwrap_err();
        assert_eq!(
            err.rejection_detail(),
            Some("Order tidak bisa dibayar. Status saat ini: paid")
        );

        // Same method still armed; retry allowed without reselecting.
        assert_eq!(page.attempt().selected_method(), Some(PaymentMethod::Ovo));
        assert!(page.can_submit());
        page.submit().await.unwrap();
    }

    #[tokio::test]
    async fn expiry_disables_submission() {
        let store = authed_store();
        let config = PaymentConfig {
            window: Duration::from_secs(1),
            processing_delay: Duration::from_millis(0),
        };
        let mut page = PaymentPage::open(
            MockApi::new(),
            store,
            &params("42", "150000"),
            &config,
        )
        .await
        .unwrap();
        page.select_method(PaymentMethod::Cod).unwrap();

        let past_deadline = page.countdown().deadline() + ChronoDuration::seconds(2);
        assert_eq!(page.tick(past_deadline), Some(Tick::JustExpired));
        assert_eq!(page.tick(past_deadline), Some(Tick::Expired));

        assert!(!page.can_submit());
        let err = page.submit().await.unwrap_err();
        assert!(matches!(err, TokokuError::Validation(_)));
    }
}
