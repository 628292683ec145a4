//! Scripted snapshot sources shared by the integration tests.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use parking_lot::Mutex;
use slurm_watch::core::AppResult;
use slurm_watch::CancellationToken;

type BoxFuture<T> = Pin<Box<dyn Future<Output = T> + Send>>;

/// One scripted response.
#[derive(Clone)]
pub enum Step<L> {
    /// Return this listing.
    List(L),
    /// Fail the call.
    Fail(&'static str),
    /// Never resolve; only cancellation ends the call.
    Hang,
}

struct Script<L, O> {
    steps: VecDeque<Step<L>>,
    last: Option<Step<L>>,
    calls: usize,
    seen: Vec<O>,
}

/// Source that replays a script of responses and then repeats the last one.
pub struct ScriptedSource<L, O> {
    inner: Arc<Mutex<Script<L, O>>>,
}

impl<L, O> Clone for ScriptedSource<L, O> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<L, O> ScriptedSource<L, O>
where
    L: Clone + Send + 'static,
    O: Clone + Send + 'static,
{
    pub fn new(steps: Vec<Step<L>>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Script {
                steps: steps.into(),
                last: None,
                calls: 0,
                seen: Vec::new(),
            })),
        }
    }

    /// Number of times the source was called.
    pub fn calls(&self) -> usize {
        self.inner.lock().calls
    }

    /// List options passed on each call.
    pub fn seen(&self) -> Vec<O> {
        self.inner.lock().seen.clone()
    }

    /// Closure usable as a snapshot source.
    pub fn source(
        &self,
    ) -> impl Fn(CancellationToken, O) -> BoxFuture<AppResult<L>> + Send + Sync + 'static {
        let inner = Arc::clone(&self.inner);
        move |cancel: CancellationToken, options: O| {
            let step = {
                let mut script = inner.lock();
                script.calls += 1;
                script.seen.push(options);
                let step = script.steps.pop_front().or_else(|| script.last.clone());
                script.last.clone_from(&step);
                step
            };
            Box::pin(async move {
                match step {
                    Some(Step::List(list)) => Ok(list),
                    Some(Step::Fail(msg)) => Err(anyhow::anyhow!(msg)),
                    Some(Step::Hang) => {
                        cancel.cancelled().await;
                        Err(anyhow::anyhow!("cancelled"))
                    }
                    None => Err(anyhow::anyhow!("script is empty")),
                }
            }) as BoxFuture<AppResult<L>>
        }
    }
}
