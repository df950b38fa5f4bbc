//! Background request runner.
//!
//! Each call spawns one tokio task against the shared client and posts the
//! outcome back to the event loop. Nothing here is retried or cancelled;
//! stale results are filtered by the receiving page.

use crate::api_client::OutreachApi;
use crate::events::{ApiResult, Loaded, Mutated, MutationOutput, TuiEvent};
use crate::nav::View;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::mpsc;

#[derive(Clone)]
pub struct Loader {
    api: Arc<dyn OutreachApi>,
    events: mpsc::Sender<TuiEvent>,
}

impl Loader {
    pub fn new(api: Arc<dyn OutreachApi>, events: mpsc::Sender<TuiEvent>) -> Self {
        Self { api, events }
    }

    pub fn api(&self) -> Arc<dyn OutreachApi> {
        Arc::clone(&self.api)
    }

    /// Run a fetch and wrap its result for the page that asked for it.
    pub fn load<T, F, Fut, W>(&self, fetch: F, wrap: W)
    where
        F: FnOnce(Arc<dyn OutreachApi>) -> Fut,
        Fut: Future<Output = ApiResult<T>> + Send + 'static,
        W: FnOnce(ApiResult<T>) -> Loaded + Send + 'static,
        T: Send + 'static,
    {
        let task = fetch(self.api());
        self.spawn(async move { TuiEvent::Loaded(Box::new(wrap(task.await))) });
    }

    /// Run a mutation on behalf of `view`.
    pub fn mutate<F, Fut>(&self, view: View, action: &'static str, request: F)
    where
        F: FnOnce(Arc<dyn OutreachApi>) -> Fut,
        Fut: Future<Output = ApiResult<MutationOutput>> + Send + 'static,
    {
        tracing::info!(view = view.title(), action, "mutation requested");
        let task = request(self.api());
        self.spawn(async move {
            let result = task.await;
            TuiEvent::Mutated(Box::new(Mutated {
                view,
                action,
                result,
            }))
        });
    }

    fn spawn<Fut>(&self, task: Fut)
    where
        Fut: Future<Output = TuiEvent> + Send + 'static,
    {
        let events = self.events.clone();
        tokio::spawn(async move {
            let event = task.await;
            if events.send(event).await.is_err() {
                tracing::debug!("event loop closed before request finished");
            }
        });
    }
}
