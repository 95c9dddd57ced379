// crates/gemchat-client/src/guard.rs
// Idle/busy guard: one request cycle at a time, newest submission dropped

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
enum GuardState {
    #[default]
    Idle,
    Busy { ticket: u64 },
}

/// Tracks the single in-flight request cycle.
///
/// Not a queue: `try_acquire` while busy returns `None` and the caller
/// drops the submission. Each cycle gets a ticket so that replies for a
/// cycle that was reset (history cleared) can be recognized and ignored.
#[derive(Debug, Clone, Default)]
pub struct RequestGuard {
    state: GuardState,
    next_ticket: u64,
}

impl RequestGuard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn try_acquire(&mut self) -> Option<u64> {
        match self.state {
            GuardState::Busy { .. } => None,
            GuardState::Idle => {
                self.next_ticket += 1;
                let ticket = self.next_ticket;
                self.state = GuardState::Busy { ticket };
                Some(ticket)
            }
        }
    }

    pub fn is_busy(&self) -> bool {
        matches!(self.state, GuardState::Busy { .. })
    }

    /// True if `ticket` is the cycle currently holding the guard
    pub fn holds(&self, ticket: u64) -> bool {
        self.state == GuardState::Busy { ticket }
    }

    pub fn release(&mut self) {
        self.state = GuardState::Idle;
    }
}
