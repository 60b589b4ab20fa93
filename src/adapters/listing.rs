//! Paged listing adapter.
//!
//! A listing drives two loading machines: one for the first page (initial
//! load and pull-to-refresh) and one for appending further pages. Each
//! machine only guards its own request; the listing refuses to start one
//! while the other is in flight.

use crate::adapters::error::{FetchError, WorkflowError};
use crate::adapters::loading::{begin_load, cleared_error, fail_load};
use crate::adapters::notify::{Notifier, SilentNotifier};
use crate::adapters::Fetch;
use crate::engine::{Diagnostics, Machine, MachineDefinition, MachineOptions, TracingDiagnostics};
use crate::workflows::{loading_table, LoadEvent, LoadState};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use stillwater::effect::Effect;
use tracing::debug;

/// One page of results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub has_more: bool,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, has_more: bool) -> Self {
        Self { items, has_more }
    }

    pub fn last(items: Vec<T>) -> Self {
        Self::new(items, false)
    }
}

pub struct Listing<T> {
    first_page: Machine<LoadState, LoadEvent>,
    more: Machine<LoadState, LoadEvent>,
    items: Vec<T>,
    next_page: u32,
    has_more: bool,
    notifier: Arc<dyn Notifier>,
}

fn suffixed(options: &MachineOptions, suffix: &str) -> MachineOptions {
    MachineOptions {
        debug_enabled: options.debug_enabled,
        label: options.label.as_ref().map(|label| format!("{label}/{suffix}")),
    }
}

impl<T> Listing<T> {
    pub fn new(options: MachineOptions) -> Self {
        Self::with_diagnostics(options, Arc::new(TracingDiagnostics))
    }

    /// Both machines report to `diagnostics` when debug is on.
    pub fn with_diagnostics(options: MachineOptions, diagnostics: Arc<dyn Diagnostics>) -> Self {
        let machine = |suffix: &str| {
            Machine::create(
                MachineDefinition::new(LoadState::Idle, loading_table())
                    .with_options(suffixed(&options, suffix))
                    .with_diagnostics(Arc::clone(&diagnostics)),
            )
        };

        Self {
            first_page: machine("first-page"),
            more: machine("more"),
            items: Vec::new(),
            next_page: 1,
            has_more: false,
            notifier: Arc::new(SilentNotifier),
        }
    }

    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Whether the last page said more results exist.
    pub fn has_more(&self) -> bool {
        self.has_more
    }

    /// Page number the next `load_more` will request.
    pub fn next_page(&self) -> u32 {
        self.next_page
    }

    pub fn first_page(&self) -> &Machine<LoadState, LoadEvent> {
        &self.first_page
    }

    pub fn more(&self) -> &Machine<LoadState, LoadEvent> {
        &self.more
    }

    /// Start (re)loading page 1. Returns the page number to request.
    pub fn begin_refresh(&mut self) -> Result<u32, WorkflowError> {
        if *self.more.state() == LoadState::Loading {
            return Err(WorkflowError::Busy("load more"));
        }

        begin_load(&mut self.first_page)?;
        Ok(1)
    }

    /// Replace the items with the first page. Returns the item count.
    pub fn finish_refresh(
        &mut self,
        outcome: Result<Page<T>, FetchError>,
    ) -> Result<usize, WorkflowError> {
        let page = match outcome {
            Ok(page) => page,
            Err(error) => {
                return Err(fail_load(&mut self.first_page, self.notifier.as_ref(), error));
            }
        };

        self.first_page
            .try_send(LoadEvent::Success, Some(cleared_error()))?;
        // A new first page invalidates any settled append state.
        if self.more.can(&LoadEvent::Reset) {
            self.more.send(LoadEvent::Reset);
        }

        self.items = page.items;
        self.has_more = page.has_more;
        self.next_page = 2;
        debug!(machine = %self.first_page.label(), items = self.items.len(), "listing refreshed");
        Ok(self.items.len())
    }

    /// Start loading the next page. Returns the page number to request.
    pub fn begin_more(&mut self) -> Result<u32, WorkflowError> {
        if *self.first_page.state() == LoadState::Loading {
            return Err(WorkflowError::Busy("first page load"));
        }
        if !self.has_more {
            return Err(WorkflowError::Exhausted);
        }

        begin_load(&mut self.more)?;
        Ok(self.next_page)
    }

    /// Append the next page. Returns how many items were added.
    pub fn finish_more(
        &mut self,
        outcome: Result<Page<T>, FetchError>,
    ) -> Result<usize, WorkflowError> {
        let page = match outcome {
            Ok(page) => page,
            Err(error) => return Err(fail_load(&mut self.more, self.notifier.as_ref(), error)),
        };

        self.more
            .try_send(LoadEvent::Success, Some(cleared_error()))?;

        let added = page.items.len();
        self.items.extend(page.items);
        self.has_more = page.has_more;
        self.next_page += 1;
        debug!(machine = %self.more.label(), added, "listing extended");
        Ok(added)
    }

    pub async fn refresh<Env, F>(&mut self, env: &Env, fetch: F) -> Result<usize, WorkflowError>
    where
        T: Send + 'static,
        Env: Clone + Send + Sync + 'static,
        F: Fn(u32) -> Fetch<Page<T>, Env>,
    {
        let page = self.begin_refresh()?;
        let outcome = fetch(page).run(env).await;
        self.finish_refresh(outcome)
    }

    pub async fn load_more<Env, F>(&mut self, env: &Env, fetch: F) -> Result<usize, WorkflowError>
    where
        T: Send + 'static,
        Env: Clone + Send + Sync + 'static,
        F: Fn(u32) -> Fetch<Page<T>, Env>,
    {
        let page = self.begin_more()?;
        let outcome = fetch(page).run(env).await;
        self.finish_more(outcome)
    }
}
