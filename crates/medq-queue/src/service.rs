//! The queue service facade.
//!
//! Owns the storage and notification collaborators and exposes the
//! caller-facing operations: `route_arrival`, `transition`, `call_next`,
//! `daily_stats`, `counter_waiting_list`. All waiting-set mutation flows
//! through here; nothing else writes token status or timestamps.

use std::sync::Arc;

use time::{Date, UtcOffset};

use medq_core::{
    CategoryId, Clock, Counter, CounterId, Patient, PatientId, Priority, SystemClock, Token,
    TokenId, TokenStatus, local_day,
};
use medq_notifications::{Dispatcher, Notification, NotificationSink};
use medq_storage::{CounterStore, NewToken, PatientDirectory, TokenStore};

use crate::error::{QueueError, Result};
use crate::stats::{self, DailyStats};
use crate::{estimator, notifier, router, state};

pub struct QueueService {
    tokens: Arc<dyn TokenStore>,
    counters: Arc<dyn CounterStore>,
    patients: Arc<dyn PatientDirectory>,
    dispatcher: Dispatcher,
    clock: Arc<dyn Clock>,
    /// Facility UTC offset; local midnight is the day boundary for
    /// numbering, estimation, and stats.
    day_offset: UtcOffset,
}

impl QueueService {
    pub fn new(
        tokens: Arc<dyn TokenStore>,
        counters: Arc<dyn CounterStore>,
        patients: Arc<dyn PatientDirectory>,
        sink: Arc<dyn NotificationSink>,
    ) -> Self {
        Self {
            tokens,
            counters,
            patients,
            dispatcher: Dispatcher::new(sink),
            clock: Arc::new(SystemClock),
            day_offset: UtcOffset::UTC,
        }
    }

    /// Replaces the clock. Tests pin transition timestamps this way.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Replaces the per-delivery notification bound.
    pub fn with_dispatch_timeout(mut self, bound: std::time::Duration) -> Self {
        self.dispatcher = self.dispatcher.with_timeout(bound);
        self
    }

    pub fn with_day_offset(mut self, offset: UtcOffset) -> Self {
        self.day_offset = offset;
        self
    }

    fn today(&self) -> Date {
        local_day(self.clock.now(), self.day_offset)
    }

    /// Routes a new arrival to the least-loaded active counter of
    /// `category_id` and issues its token.
    ///
    /// The token number comes from the store's atomic day sequence; a
    /// duplicate-number conflict (possible against a backend whose sequence
    /// and insert are separate statements) is retried up to
    /// [`router::MAX_CREATE_ATTEMPTS`] times before the arrival fails with
    /// `RoutingFailed`. An arrival is never silently dropped.
    pub async fn route_arrival(
        &self,
        patient_id: PatientId,
        category_id: CategoryId,
        priority: Option<Priority>,
    ) -> Result<Token> {
        let patient = self
            .patients
            .find_patient(patient_id)
            .await?
            .ok_or(QueueError::PatientNotFound(patient_id))?;

        let candidates = self.counters.list_active(category_id).await?;
        if candidates.is_empty() {
            return Err(QueueError::NoAvailableCounter(category_id));
        }

        let day = self.today();
        let todays = self.tokens.tokens_for_day(day).await?;
        let global_average = estimator::average_completed_wait(&todays);

        let scored: Vec<(Counter, f64)> = candidates
            .into_iter()
            .map(|counter| {
                let counter_tokens: Vec<Token> = todays
                    .iter()
                    .filter(|t| t.counter_id == counter.id)
                    .cloned()
                    .collect();
                let score = estimator::counter_load(&counter_tokens, global_average);
                (counter, score)
            })
            .collect();

        // Non-empty candidates always yield a pick.
        let chosen = router::select_counter(&scored)
            .ok_or(QueueError::NoAvailableCounter(category_id))?
            .clone();

        let backlog_before = todays
            .iter()
            .filter(|t| t.counter_id == chosen.id && t.status.is_in_queue())
            .count();
        let estimated_wait_minutes = router::initial_estimate(backlog_before);

        let mut attempt = 0;
        let token = loop {
            attempt += 1;
            let number = self.tokens.next_token_number(day).await?;
            let new_token = NewToken {
                number,
                patient_id,
                counter_id: chosen.id,
                priority: priority.unwrap_or_default(),
                estimated_wait_minutes,
                created_at: self.clock.now(),
            };
            match self.tokens.create_token(new_token).await {
                Ok(token) => break token,
                Err(e) if e.is_retryable() && attempt < router::MAX_CREATE_ATTEMPTS => {
                    tracing::warn!(attempt, error = %e, "token create conflicted, retrying");
                }
                Err(e) if e.is_retryable() => {
                    tracing::error!(attempts = attempt, error = %e, "token create kept conflicting");
                    return Err(QueueError::RoutingFailed { attempts: attempt });
                }
                Err(e) => return Err(e.into()),
            }
        };

        tracing::info!(
            token = token.number,
            counter = %chosen.name,
            patient = %patient_id,
            backlog = backlog_before,
            estimated_wait = estimated_wait_minutes,
            "arrival routed"
        );

        // Best-effort side effects; routing already succeeded.
        self.dispatcher
            .push_to(
                &patient,
                &Notification::token_created(token.number, token.estimated_wait_minutes),
            )
            .await;
        self.notify_positions(chosen.id).await;

        Ok(token)
    }

    /// Moves a token along the state machine.
    ///
    /// Waiting -> Called stamps `called_at` and the one-shot actual wait and
    /// notifies the patient it is their turn. Completed notifies completion.
    /// Every transition ends with a position pass for the token's counter,
    /// since each allowed edge removes a member from the waiting set.
    pub async fn transition(&self, token_id: TokenId, target: TokenStatus) -> Result<Token> {
        let current = self
            .tokens
            .get_token(token_id)
            .await?
            .ok_or(QueueError::TokenNotFound(token_id))?;
        let updated = state::apply_transition(&current, target, self.clock.now())?;
        let updated = self.tokens.update_token(&updated).await?;

        tracing::info!(
            token = updated.number,
            from = %current.status,
            to = %target,
            "token transitioned"
        );

        match target {
            TokenStatus::Called => {
                let counter_name = match self.counters.get_counter(updated.counter_id).await {
                    Ok(Some(counter)) => counter.name,
                    _ => "your counter".to_string(),
                };
                self.push_to_patient(
                    updated.patient_id,
                    &Notification::your_turn(updated.number, &counter_name),
                )
                .await;
            }
            TokenStatus::Completed => {
                self.push_to_patient(updated.patient_id, &Notification::completed(updated.number))
                    .await;
            }
            TokenStatus::Waiting | TokenStatus::Cancelled => {}
        }

        self.notify_positions(updated.counter_id).await;
        Ok(updated)
    }

    /// Calls the highest-ranked Waiting token at `counter_id`.
    pub async fn call_next(&self, counter_id: CounterId) -> Result<Token> {
        let counter = self
            .counters
            .get_counter(counter_id)
            .await?
            .ok_or(QueueError::CounterNotFound(counter_id))?;

        let counter_tokens = self
            .tokens
            .counter_tokens_for_day(counter_id, self.today())
            .await?;
        let ranked = notifier::waiting_ranks(&counter_tokens);
        let (_, head) = ranked
            .into_iter()
            .next()
            .ok_or(QueueError::NoWaitingToken(counter_id))?;

        tracing::debug!(counter = %counter.name, token = head.number, "calling next token");
        self.transition(head.id, TokenStatus::Called).await
    }

    /// Reads one token by id.
    pub async fn token(&self, token_id: TokenId) -> Result<Token> {
        self.tokens
            .get_token(token_id)
            .await?
            .ok_or(QueueError::TokenNotFound(token_id))
    }

    /// Aggregated stats over today's tokens.
    pub async fn daily_stats(&self) -> Result<DailyStats> {
        let todays = self.tokens.tokens_for_day(self.today()).await?;
        Ok(stats::aggregate(&todays))
    }

    /// The counter's current queue (Waiting and Called) in authoritative
    /// order, for staff dashboards and displays.
    pub async fn counter_waiting_list(&self, counter_id: CounterId) -> Result<Vec<Token>> {
        self.counters
            .get_counter(counter_id)
            .await?
            .ok_or(QueueError::CounterNotFound(counter_id))?;

        let counter_tokens = self
            .tokens
            .counter_tokens_for_day(counter_id, self.today())
            .await?;
        let mut queue: Vec<Token> = counter_tokens
            .into_iter()
            .filter(|t| t.status.is_in_queue())
            .collect();
        queue.sort_by_key(Token::queue_key);
        Ok(queue)
    }

    /// Rank-milestone notification pass for one counter. Always best-effort:
    /// storage or directory hiccups are logged, never surfaced.
    pub async fn notify_positions(&self, counter_id: CounterId) {
        if let Err(e) = self.try_notify_positions(counter_id).await {
            tracing::warn!(counter = %counter_id, error = %e, "position notification pass failed");
        }
    }

    async fn try_notify_positions(&self, counter_id: CounterId) -> Result<()> {
        let counter_tokens = self
            .tokens
            .counter_tokens_for_day(counter_id, self.today())
            .await?;
        for (rank, token) in notifier::waiting_ranks(&counter_tokens) {
            if !notifier::should_notify(rank) {
                continue;
            }
            let Some(patient) = self.patients.find_patient(token.patient_id).await? else {
                tracing::debug!(token = token.number, "patient record gone, skipping notification");
                continue;
            };
            let notification = Notification::position_update(token.number, rank);
            self.dispatcher.push_to(&patient, &notification).await;
            if rank == notifier::SMS_RANK {
                self.dispatcher.sms_to(&patient, &notification).await;
            }
        }
        Ok(())
    }

    async fn push_to_patient(&self, patient_id: PatientId, notification: &Notification) {
        match self.patients.find_patient(patient_id).await {
            Ok(Some(patient)) => self.dispatcher.push_to(&patient, notification).await,
            Ok(None) => {
                tracing::debug!(patient = %patient_id, "patient record gone, skipping notification");
            }
            Err(e) => {
                tracing::warn!(patient = %patient_id, error = %e, "patient lookup failed for notification");
            }
        }
    }
}
