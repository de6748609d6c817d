//! Effect interpreter for [`pager_core`]'s pagination state machine.
//!
//! A [`Paginator`] owns a dedicated thread running a tokio runtime. All
//! state transitions happen inside a single actor task on that runtime;
//! page fetches run as separate tasks and report back through a channel,
//! so completions never touch state directly.

use std::collections::HashMap;
use std::fmt;
use std::io;
use std::sync::mpsc as std_mpsc;
use std::sync::Arc;
use std::thread;

use pager_core::{
    update, Effect, Identified, Msg, Page, PageRules, PaginationState, PaginationView,
    ProcessMsg, RequestId, WaiterId,
};
use pager_logging::{pager_debug, pager_info, pager_warn};
use tokio::runtime::Runtime;
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;

use crate::{CacheCategory, EngineError, PageLoadError, PageSource, ResponseCache};

pub trait Cursor: Clone + PartialEq + fmt::Debug + Send + Sync + 'static {}

impl<C> Cursor for C where C: Clone + PartialEq + fmt::Debug + Send + Sync + 'static {}

pub trait PageItem: Identified + Clone + Send + Sync + 'static {}

impl<T> PageItem for T where T: Identified + Clone + Send + Sync + 'static {}

pub type PageResult<I, T> = Result<Page<I, T>, PageLoadError>;

enum Command<I, T> {
    Dispatch(Msg<I, T>),
    LoadNextPage {
        reply: oneshot::Sender<PageResult<I, T>>,
    },
    Reload {
        reply: oneshot::Sender<PageResult<I, T>>,
    },
}

/// Settles once with the result of the page load it was registered for.
pub struct PageWaiter<I, T> {
    rx: oneshot::Receiver<PageResult<I, T>>,
}

impl<I, T> PageWaiter<I, T> {
    pub async fn wait(self) -> PageResult<I, T> {
        self.rx.await.unwrap_or(Err(PageLoadError::Cancelled))
    }
}

/// Handle to a running paginator. Dropping it disposes the state.
pub struct Paginator<I: Cursor, T: PageItem> {
    cmd_tx: mpsc::UnboundedSender<Command<I, T>>,
    snapshot_rx: watch::Receiver<PaginationState<I, T>>,
}

impl<I: Cursor, T: PageItem> Paginator<I, T> {
    pub fn spawn(
        initial: PaginationState<I, T>,
        rules: PageRules<I, T>,
        source: Arc<dyn PageSource<I, T>>,
    ) -> Result<Self, EngineError> {
        let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
        let (done_tx, done_rx) = mpsc::unbounded_channel();
        let (snapshot_tx, snapshot_rx) = watch::channel(initial.clone());

        let actor = Actor {
            state: initial,
            rules,
            source,
            tasks: HashMap::new(),
            waiters: HashMap::new(),
            next_waiter: 1,
            done_tx,
            snapshot_tx,
        };

        // The runtime is created and dropped on the paginator thread only;
        // dropping it inside a caller's async context would panic.
        let (ready_tx, ready_rx) = std_mpsc::sync_channel(1);
        thread::Builder::new()
            .name("pager-paginator".to_string())
            .spawn(move || {
                let runtime = match build_runtime() {
                    Ok(runtime) => runtime,
                    Err(err) => {
                        let _ = ready_tx.send(Err(err));
                        return;
                    }
                };
                let _ = ready_tx.send(Ok(()));
                runtime.block_on(actor.run(cmd_rx, done_rx));
            })
            .map_err(EngineError::Thread)?;

        match ready_rx.recv() {
            Ok(Ok(())) => {}
            Ok(Err(err)) => return Err(EngineError::Runtime(err)),
            Err(_) => {
                return Err(EngineError::Runtime(io::Error::other(
                    "paginator thread exited during startup",
                )))
            }
        }

        Ok(Self {
            cmd_tx,
            snapshot_rx,
        })
    }

    pub fn set_first_input(&self, input: I) {
        self.send(Command::Dispatch(Msg::SetFirstInput(input)));
    }

    pub fn load_first_page_if_needed(&self) {
        self.send(Command::Dispatch(Msg::LoadFirstPageIfNeeded));
    }

    pub fn load_next_page(&self) -> PageWaiter<I, T> {
        let (reply, rx) = oneshot::channel();
        self.send(Command::LoadNextPage { reply });
        PageWaiter { rx }
    }

    pub fn reload(&self) -> PageWaiter<I, T> {
        let (reply, rx) = oneshot::channel();
        self.send(Command::Reload { reply });
        PageWaiter { rx }
    }

    /// Drops cached responses for `category` before reloading.
    pub fn reload_invalidating(
        &self,
        cache: &ResponseCache,
        category: CacheCategory,
    ) -> PageWaiter<I, T> {
        cache.clear(category);
        self.reload()
    }

    /// State as of the last applied transition.
    pub fn snapshot(&self) -> PaginationState<I, T> {
        self.snapshot_rx.borrow().clone()
    }

    pub fn view(&self) -> PaginationView {
        self.snapshot_rx.borrow().view()
    }

    pub fn subscribe(&self) -> watch::Receiver<PaginationState<I, T>> {
        self.snapshot_rx.clone()
    }

    fn send(&self, command: Command<I, T>) {
        // A dropped reply sender settles its waiter as cancelled.
        if self.cmd_tx.send(command).is_err() {
            pager_warn!("paginator has stopped; command dropped");
        }
    }
}

fn build_runtime() -> io::Result<Runtime> {
    tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .thread_name("pager-fetch")
        .enable_all()
        .build()
}

struct Actor<I: Cursor, T: PageItem> {
    state: PaginationState<I, T>,
    rules: PageRules<I, T>,
    source: Arc<dyn PageSource<I, T>>,
    tasks: HashMap<RequestId, JoinHandle<()>>,
    waiters: HashMap<WaiterId, oneshot::Sender<PageResult<I, T>>>,
    next_waiter: u64,
    done_tx: mpsc::UnboundedSender<ProcessMsg<I, Page<I, T>>>,
    snapshot_tx: watch::Sender<PaginationState<I, T>>,
}

impl<I: Cursor, T: PageItem> Actor<I, T> {
    async fn run(
        mut self,
        mut cmd_rx: mpsc::UnboundedReceiver<Command<I, T>>,
        mut done_rx: mpsc::UnboundedReceiver<ProcessMsg<I, Page<I, T>>>,
    ) {
        loop {
            tokio::select! {
                // Commands queued before a completion are applied first.
                biased;
                command = cmd_rx.recv() => match command {
                    Some(command) => self.handle_command(command),
                    None => break,
                },
                Some(done) = done_rx.recv() => self.dispatch(Msg::PageLoading(done)),
            }
        }
        pager_info!("paginator handle dropped; disposing");
        self.dispatch(Msg::Dispose);
    }

    fn handle_command(&mut self, command: Command<I, T>) {
        match command {
            Command::Dispatch(msg) => self.dispatch(msg),
            Command::LoadNextPage { reply } => {
                let waiter = self.register(reply);
                self.dispatch(Msg::LoadNextPage {
                    waiter: Some(waiter),
                });
            }
            Command::Reload { reply } => {
                let waiter = self.register(reply);
                self.dispatch(Msg::Reload {
                    waiter: Some(waiter),
                });
            }
        }
    }

    fn register(&mut self, reply: oneshot::Sender<PageResult<I, T>>) -> WaiterId {
        let waiter = WaiterId(self.next_waiter);
        self.next_waiter += 1;
        self.waiters.insert(waiter, reply);
        waiter
    }

    fn dispatch(&mut self, msg: Msg<I, T>) {
        let state = std::mem::replace(&mut self.state, PaginationState::new(None));
        let (state, effects) = update(state, msg, &self.rules);
        self.state = state;
        // Publish before settling waiters so a resolved waiter sees this state.
        self.snapshot_tx.send_replace(self.state.clone());
        for effect in effects {
            self.run_effect(effect);
        }
    }

    fn run_effect(&mut self, effect: Effect<I, T>) {
        match effect {
            Effect::FetchPage { request, input } => {
                pager_debug!("fetching page {:?} as {:?}", input, request);
                let source = Arc::clone(&self.source);
                let done_tx = self.done_tx.clone();
                let task = tokio::spawn(async move {
                    let msg = match source.fetch_page(&input).await {
                        Ok(output) => ProcessMsg::Finished { request, output },
                        Err(err) => {
                            pager_warn!("page fetch for {:?} failed: {}", input, err);
                            ProcessMsg::Failed {
                                request,
                                message: err.to_string(),
                            }
                        }
                    };
                    let _ = done_tx.send(msg);
                });
                self.tasks.retain(|_, task| !task.is_finished());
                self.tasks.insert(request, task);
            }
            Effect::CancelFetch { request } => {
                if let Some(task) = self.tasks.remove(&request) {
                    pager_debug!("aborting page fetch {:?}", request);
                    task.abort();
                }
            }
            Effect::ResolveWaiters { waiters, page } => {
                for waiter in waiters {
                    if let Some(reply) = self.waiters.remove(&waiter) {
                        let _ = reply.send(Ok(page.clone()));
                    }
                }
            }
            Effect::RejectWaiters { waiters, rejection } => {
                for waiter in waiters {
                    if let Some(reply) = self.waiters.remove(&waiter) {
                        let _ = reply.send(Err(PageLoadError::from(rejection.clone())));
                    }
                }
            }
        }
    }
}
