use crate::config::MatchOptions;
use crate::session::MatchContext;
use crate::store::MatchStore;
use tracing::{info, warn};

/// A failed save. The in-memory match is still authoritative.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistWarning {
    pub message: String,
}

/// Result of an operation plus any non-fatal persistence problem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Persisted<T> {
    pub value: T,
    pub warning: Option<PersistWarning>,
}

/// Owns one match and its store; saves after every operation.
pub struct MatchService<S: MatchStore> {
    ctx: MatchContext,
    store: S,
}

impl<S: MatchStore> MatchService<S> {
    /// Resumes the stored match, or starts a new one when there is none or
    /// the stored snapshot cannot be used.
    pub fn open(mut store: S, opts: &MatchOptions) -> Self {
        let ctx = match store.load() {
            Ok(Some(raw)) => match MatchContext::from_json(&raw) {
                Ok(ctx) => {
                    info!(
                        "Resumed match with {} recorded points",
                        ctx.ledger().len()
                    );
                    ctx
                }
                Err(e) => {
                    warn!("Stored match unusable ({}). Starting a new match.", e);
                    MatchContext::new(opts)
                }
            },
            Ok(None) => MatchContext::new(opts),
            Err(e) => {
                warn!("Could not load stored match ({}). Starting a new match.", e);
                MatchContext::new(opts)
            }
        };
        Self { ctx, store }
    }

    pub fn context(&self) -> &MatchContext {
        &self.ctx
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Runs `op` on the match, then saves it.
    pub fn apply<T>(&mut self, op: impl FnOnce(&mut MatchContext) -> T) -> Persisted<T> {
        let value = op(&mut self.ctx);
        let warning = self.persist();
        Persisted { value, warning }
    }

    pub fn persist(&mut self) -> Option<PersistWarning> {
        let result = self
            .ctx
            .to_json()
            .and_then(|raw| self.store.save(&raw));
        match result {
            Ok(()) => None,
            Err(e) => {
                warn!("Match state not saved: {}", e);
                Some(PersistWarning {
                    message: format!("Match state not saved: {}", e),
                })
            }
        }
    }

    pub fn into_parts(self) -> (MatchContext, S) {
        (self.ctx, self.store)
    }
}
