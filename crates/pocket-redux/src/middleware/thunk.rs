//! ThunkMiddleware - runs deferred actions instead of reducing them

use super::{Context, Middleware, Next};
use crate::action::{Action, Dispatchable, Outcome};
use crate::error::{Result, StoreError};

/// Intercepts [`crate::Thunk`]s and invokes them with the dispatcher and a
/// state reader. Plain actions pass through unchanged.
#[derive(Debug, Default)]
pub struct ThunkMiddleware;

impl ThunkMiddleware {
    pub fn new() -> Self {
        Self
    }
}

impl<S, A> Middleware<S, A> for ThunkMiddleware
where
    S: Send + Sync + 'static,
    A: Action,
{
    fn handle(
        &mut self,
        item: Dispatchable<S, A>,
        ctx: &Context<'_, S, A>,
        mut next: Next<'_, S, A>,
    ) -> Result<Outcome<A>> {
        match item {
            Dispatchable::Thunk(thunk) => {
                let label = thunk.label();
                log::debug!("ThunkMiddleware: invoking {}", label);
                thunk
                    .run(ctx.dispatcher(), &ctx.reader())
                    .map_err(|e| {
                        log::error!("ThunkMiddleware: {} failed: {:#}", label, e);
                        StoreError::Thunk(e)
                    })?;
                Ok(Outcome::ThunkInvoked)
            }
            action => next.run(action),
        }
    }
}
