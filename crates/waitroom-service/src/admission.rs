//! Admission decision: identify or enqueue a visitor, then compare their
//! position with the cursor.

use std::sync::Arc;

use tracing::{debug, info};

use waitroom_core::error::AppError;
use waitroom_core::result::AppResult;
use waitroom_core::traits::CounterStore;
use waitroom_core::types::{Counter, Position, QueueSnapshot};
use waitroom_token::PositionTokens;

/// Terminal outcome for one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Forward the request to the protected origin.
    Admit,
    /// Answer with the waiting-room page.
    Deny {
        /// Positions between this visitor and the cursor.
        visitors_ahead: u64,
    },
}

impl Outcome {
    /// Decide for `position` under `cursor`. A position equal to the cursor waits.
    pub fn decide(position: Position, cursor: u64) -> Self {
        if position < cursor {
            Self::Admit
        } else {
            Self::Deny {
                visitors_ahead: position - cursor,
            }
        }
    }

    /// Whether the visitor is let through.
    pub fn is_admit(&self) -> bool {
        matches!(self, Self::Admit)
    }
}

/// Result of running admission for a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Admission {
    /// The visitor's position, verified or freshly allocated.
    pub position: Position,
    /// Admit or deny.
    pub outcome: Outcome,
    /// Set when a new position was allocated; must be bound to the response.
    pub issued_token: Option<String>,
}

impl Admission {
    /// Whether the response must carry a new session cookie.
    pub fn needs_binding(&self) -> bool {
        self.issued_token.is_some()
    }
}

/// Runs the per-request admission state machine.
#[derive(Debug, Clone)]
pub struct AdmissionService {
    /// Shared counters.
    store: Arc<dyn CounterStore>,
    /// Token issue/verify.
    tokens: Arc<PositionTokens>,
}

impl AdmissionService {
    /// Creates a new admission service.
    pub fn new(store: Arc<dyn CounterStore>, tokens: Arc<PositionTokens>) -> Self {
        Self { store, tokens }
    }

    /// Identify the visitor from `presented`, enqueueing them if needed, and
    /// decide whether they are admitted.
    ///
    /// An absent, forged or corrupt token is never an error: it just means a
    /// new position is allocated. Store failures propagate unchanged; the
    /// caller must not admit or deny on a failed lookup.
    pub async fn admit(&self, presented: Option<&str>) -> AppResult<Admission> {
        let verified = presented.and_then(|token| self.tokens.verify(token).position());

        let (position, issued_token) = match verified {
            Some(position) => {
                debug!(position, "Validated token for queue position");
                (position, None)
            }
            None => {
                let (position, token) = self.enqueue().await?;
                (position, Some(token))
            }
        };

        let snapshot = self.store.snapshot().await?;
        let snapshot = QueueSnapshot::checked(snapshot.length, snapshot.cursor)?;
        let outcome = Outcome::decide(position, snapshot.cursor);

        debug!(
            position,
            cursor = snapshot.cursor,
            length = snapshot.length,
            ?outcome,
            "Admission decided"
        );

        Ok(Admission {
            position,
            outcome,
            issued_token,
        })
    }

    /// Allocate the next position and sign a token for it.
    async fn enqueue(&self) -> AppResult<(Position, String)> {
        let length = self.store.increment(Counter::Length, 1).await?;
        let position = length.checked_sub(1).ok_or_else(|| {
            AppError::integrity("queue length increment returned 0")
        })?;
        let token = self.tokens.issue(position)?;
        info!(position, "Issued token for queue position");
        Ok((position, token))
    }
}
