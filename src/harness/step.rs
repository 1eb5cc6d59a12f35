//! Steps and the per-case context they run against.

use std::future::Future;
use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;

use super::done::Done;
use super::failure::{Failure, Phase};
use crate::app::FeedApp;
use crate::feeds::FeedCatalog;
use crate::page::Page;

/// Everything one case may touch.
///
/// Created fresh for every case and dropped after its teardown. `state`
/// carries values from setup to body to teardown of the same case (for
/// example a header title remembered in setup).
pub struct CaseContext<S> {
    page: Page,
    app: Arc<dyn FeedApp>,
    phase: Phase,
    /// Per-case state, `S::default()` at the start of every case.
    pub state: S,
}

impl<S> CaseContext<S> {
    pub fn new(app: Arc<dyn FeedApp>, state: S) -> Self {
        let page = app.mount();
        Self {
            page,
            app,
            phase: Phase::Setup,
            state,
        }
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn app(&self) -> &dyn FeedApp {
        self.app.as_ref()
    }

    pub fn feeds(&self) -> Option<&FeedCatalog> {
        self.app.feeds()
    }

    /// Phase currently executing.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub(crate) fn enter(&mut self, phase: Phase) {
        self.phase = phase;
    }

    /// Callback style: hand `done` straight to the application.
    pub fn load_feed_with(&self, index: usize, done: Done) {
        self.app.load_feed(index, &self.page, done);
    }

    /// Future style: load a feed and wait until the page is stable.
    ///
    /// Bounded by the timeout of the enclosing phase.
    pub fn load_feed(&self, index: usize) -> impl Future<Output = Result<(), Failure>> + Send {
        let (done, signal) = Done::channel(self.phase);
        self.app.load_feed(index, &self.page, done);
        signal.wait()
    }
}

/// One unit of work inside a phase.
///
/// The phase is finished once `run` has returned `Ok` and `done` has been
/// invoked, in either order. Returning `Err` (or panicking) fails the phase
/// immediately, whether or not `done` fired.
#[async_trait]
pub trait Step<S>: Send + Sync {
    async fn run(&self, ctx: &mut CaseContext<S>, done: Done) -> Result<(), Failure>;
}

/// Synchronous step: completes its token as soon as it returns.
pub struct SyncStep<F, S> {
    f: F,
    _state: PhantomData<fn(S)>,
}

/// Step that takes the completion token itself.
pub struct DoneStep<F, S> {
    f: F,
    _state: PhantomData<fn(S)>,
}

pub fn sync_step<S, F>(f: F) -> SyncStep<F, S>
where
    F: Fn(&mut CaseContext<S>) -> Result<(), Failure> + Send + Sync,
{
    SyncStep {
        f,
        _state: PhantomData,
    }
}

pub fn done_step<S, F>(f: F) -> DoneStep<F, S>
where
    F: Fn(&mut CaseContext<S>, Done) -> Result<(), Failure> + Send + Sync,
{
    DoneStep {
        f,
        _state: PhantomData,
    }
}

#[async_trait]
impl<S, F> Step<S> for SyncStep<F, S>
where
    S: Send,
    F: Fn(&mut CaseContext<S>) -> Result<(), Failure> + Send + Sync,
{
    async fn run(&self, ctx: &mut CaseContext<S>, done: Done) -> Result<(), Failure> {
        (self.f)(ctx)?;
        done.complete();
        Ok(())
    }
}

#[async_trait]
impl<S, F> Step<S> for DoneStep<F, S>
where
    S: Send,
    F: Fn(&mut CaseContext<S>, Done) -> Result<(), Failure> + Send + Sync,
{
    async fn run(&self, ctx: &mut CaseContext<S>, done: Done) -> Result<(), Failure> {
        (self.f)(ctx, done)
    }
}

/// Step that loads feed `index` and completes once the page is stable.
pub struct LoadFeed(pub usize);

#[async_trait]
impl<S: Send> Step<S> for LoadFeed {
    async fn run(&self, ctx: &mut CaseContext<S>, done: Done) -> Result<(), Failure> {
        ctx.load_feed_with(self.0, done);
        Ok(())
    }
}
