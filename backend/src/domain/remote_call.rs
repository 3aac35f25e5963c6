//! Request lifecycle wrapper shared by every remote call site.
//!
//! A [`RemoteCall`] derives a bearer token from the session provider, runs
//! the supplied operation and records the outcome in a [`RequestState`]
//! owned by the call site. Overlapping invocations are allowed: `loading`
//! stays set while any call is in flight and the most recently completed
//! call decides `data` and `error`. No retries happen here.

use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::debug;

use super::Error;
use super::ports::SessionProvider;

/// Snapshot of a call site's lifecycle.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestState<T> {
    /// Result of the last successful call.
    pub data: Option<T>,
    /// Whether any call is in flight.
    pub loading: bool,
    /// Failure of the last completed call, cleared when a call starts.
    pub error: Option<Error>,
}

impl<T> Default for RequestState<T> {
    fn default() -> Self {
        Self {
            data: None,
            loading: false,
            error: None,
        }
    }
}

type SuccessHook<T> = Box<dyn Fn(&T) + Send + Sync>;
type ErrorHook = Box<dyn Fn(&Error) + Send + Sync>;

struct Inner<T> {
    data: Option<T>,
    error: Option<Error>,
    in_flight: usize,
}

/// Remote call site bound to a session provider and an operation context.
///
/// # Examples
/// ```
/// use std::sync::Arc;
///
/// use mentorship::domain::RemoteCall;
/// use mentorship::domain::ports::FixtureSessionProvider;
///
/// # tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(async {
/// let call: RemoteCall<(), u32, _> = RemoteCall::new(
///     Arc::new(FixtureSessionProvider::candidate("user_x")),
///     Arc::new(()),
/// );
/// let value = call.invoke(|_token, _ctx| async { Ok(7) }).await;
/// assert_eq!(value.ok(), Some(7));
/// assert_eq!(call.state().data, Some(7));
/// assert!(!call.state().loading);
/// # });
/// ```
pub struct RemoteCall<C, T, S: ?Sized> {
    session: Arc<S>,
    context: Arc<C>,
    state: Mutex<Inner<T>>,
    on_success: Option<SuccessHook<T>>,
    on_error: Option<ErrorHook>,
}

impl<C, T, S> RemoteCall<C, T, S>
where
    S: SessionProvider + ?Sized,
{
    /// Create a call site with an empty state and no hooks.
    pub fn new(session: Arc<S>, context: Arc<C>) -> Self {
        Self {
            session,
            context,
            state: Mutex::new(Inner {
                data: None,
                error: None,
                in_flight: 0,
            }),
            on_success: None,
            on_error: None,
        }
    }

    /// Run `hook` with every successful result.
    pub fn with_on_success(mut self, hook: impl Fn(&T) + Send + Sync + 'static) -> Self {
        self.on_success = Some(Box::new(hook));
        self
    }

    /// Run `hook` with every failure, including token derivation failures.
    pub fn with_on_error(mut self, hook: impl Fn(&Error) + Send + Sync + 'static) -> Self {
        self.on_error = Some(Box::new(hook));
        self
    }

    /// Context handed to every operation.
    pub fn context(&self) -> &Arc<C> {
        &self.context
    }

    /// Invoke `op` with a fresh bearer token and the call site's context.
    ///
    /// The result is returned as well as recorded. When the session cannot
    /// supply a token the call fails with `SessionUnavailable`, `op` is not
    /// run and `data` keeps its previous value.
    pub async fn invoke<F, Fut>(&self, op: F) -> Result<T, Error>
    where
        T: Clone,
        F: FnOnce(super::AccessToken, Arc<C>) -> Fut,
        Fut: Future<Output = Result<T, Error>>,
    {
        let guard = InFlight::start(&self.state);

        let outcome = match self.session.access_token().await {
            Ok(token) => op(token, Arc::clone(&self.context)).await,
            Err(source) => {
                debug!(error = %source, "session token unavailable");
                Err(Error::session_unavailable(format!(
                    "session token unavailable: {source}"
                )))
            }
        };

        {
            let mut state = lock(&self.state);
            match &outcome {
                Ok(value) => {
                    state.data = Some(value.clone());
                    state.error = None;
                }
                Err(error) => state.error = Some(error.clone()),
            }
        }
        drop(guard);

        match &outcome {
            Ok(value) => {
                if let Some(hook) = &self.on_success {
                    hook(value);
                }
            }
            Err(error) => {
                if let Some(hook) = &self.on_error {
                    hook(error);
                }
            }
        }
        outcome
    }
}

impl<C, T, S: ?Sized> RemoteCall<C, T, S> {
    /// Whether any invocation is in flight.
    pub fn is_loading(&self) -> bool {
        lock(&self.state).in_flight > 0
    }

    /// Copy of the current request state.
    pub fn state(&self) -> RequestState<T>
    where
        T: Clone,
    {
        let state = lock(&self.state);
        RequestState {
            data: state.data.clone(),
            loading: state.in_flight > 0,
            error: state.error.clone(),
        }
    }
}

fn lock<T>(state: &Mutex<Inner<T>>) -> MutexGuard<'_, Inner<T>> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Marks a call in flight until dropped, so `loading` clears on every exit
/// path including cancellation of the invoking future.
struct InFlight<'a, T> {
    state: &'a Mutex<Inner<T>>,
}

impl<'a, T> InFlight<'a, T> {
    fn start(state: &'a Mutex<Inner<T>>) -> Self {
        let mut inner = lock(state);
        inner.in_flight += 1;
        inner.error = None;
        drop(inner);
        Self { state }
    }
}

impl<T> Drop for InFlight<'_, T> {
    fn drop(&mut self) {
        let mut inner = lock(self.state);
        inner.in_flight = inner.in_flight.saturating_sub(1);
    }
}

#[cfg(test)]
#[path = "remote_call_tests.rs"]
mod tests;
