//! Single-flight host for one asynchronous operation.
//!
//! The host never runs anything itself: [`update_process`] turns messages
//! into [`ProcessEffect`]s that an interpreter executes, and the interpreter
//! reports completions back as messages tagged with the [`RequestId`] they
//! were started under. Completions for any request other than the current
//! one are discarded.

use pager_logging::pager_debug;

/// Tag identifying one started invocation of the hosted operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestId(pub u64);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessStatus<I, O> {
    Idle {
        previous_success: Option<O>,
        previous_failure: Option<String>,
    },
    Processing {
        previous_success: Option<O>,
        input: I,
    },
}

impl<I, O> ProcessStatus<I, O> {
    pub fn success(&self) -> Option<&O> {
        match self {
            ProcessStatus::Idle {
                previous_success, ..
            }
            | ProcessStatus::Processing {
                previous_success, ..
            } => previous_success.as_ref(),
        }
    }

    pub fn failure_message(&self) -> Option<&str> {
        match self {
            ProcessStatus::Idle {
                previous_failure, ..
            } => previous_failure.as_deref(),
            ProcessStatus::Processing { .. } => None,
        }
    }

    pub fn is_processing(&self) -> bool {
        matches!(self, ProcessStatus::Processing { .. })
    }

    /// Input currently being processed, if any.
    pub fn input(&self) -> Option<&I> {
        match self {
            ProcessStatus::Processing { input, .. } => Some(input),
            ProcessStatus::Idle { .. } => None,
        }
    }

    fn take_success(&mut self) -> Option<O> {
        match self {
            ProcessStatus::Idle {
                previous_success, ..
            }
            | ProcessStatus::Processing {
                previous_success, ..
            } => previous_success.take(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessMsg<I, O> {
    /// Start processing `input`, superseding any invocation in flight.
    Process(I),
    /// The operation started under `request` produced `output`.
    Finished { request: RequestId, output: O },
    /// The operation started under `request` failed.
    Failed { request: RequestId, message: String },
    /// Abandon the invocation in flight, if any.
    Cancel,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessEffect<I> {
    Run { request: RequestId, input: I },
    Cancel { request: RequestId },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessHost<I, O> {
    status: ProcessStatus<I, O>,
    in_flight: Option<RequestId>,
    next_request: u64,
}

impl<I, O> Default for ProcessHost<I, O> {
    fn default() -> Self {
        Self::initial(None)
    }
}

impl<I, O> ProcessHost<I, O> {
    pub fn initial(cached_success: Option<O>) -> Self {
        Self::idle(cached_success, None)
    }

    pub fn success(output: O) -> Self {
        Self::idle(Some(output), None)
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self::idle(None, Some(message.into()))
    }

    fn idle(previous_success: Option<O>, previous_failure: Option<String>) -> Self {
        Self {
            status: ProcessStatus::Idle {
                previous_success,
                previous_failure,
            },
            in_flight: None,
            next_request: 1,
        }
    }

    pub fn status(&self) -> &ProcessStatus<I, O> {
        &self.status
    }

    pub fn is_processing(&self) -> bool {
        self.status.is_processing()
    }

    pub fn in_flight(&self) -> Option<RequestId> {
        self.in_flight
    }

    /// Whether a completion tagged with `request` would be accepted.
    pub fn is_current(&self, request: RequestId) -> bool {
        self.in_flight == Some(request)
    }

    pub(crate) fn apply(&mut self, msg: ProcessMsg<I, O>) -> Vec<ProcessEffect<I>>
    where
        I: Clone,
    {
        match msg {
            ProcessMsg::Process(input) => {
                let mut effects = Vec::with_capacity(2);
                if let Some(stale) = self.in_flight.take() {
                    pager_debug!("process request {:?} superseded", stale);
                    effects.push(ProcessEffect::Cancel { request: stale });
                }
                let request = RequestId(self.next_request);
                self.next_request += 1;
                let previous_success = self.status.take_success();
                self.status = ProcessStatus::Processing {
                    previous_success,
                    input: input.clone(),
                };
                self.in_flight = Some(request);
                effects.push(ProcessEffect::Run { request, input });
                effects
            }
            ProcessMsg::Finished { request, output } => {
                if self.accept(request) {
                    self.status = ProcessStatus::Idle {
                        previous_success: Some(output),
                        previous_failure: None,
                    };
                }
                Vec::new()
            }
            ProcessMsg::Failed { request, message } => {
                if self.accept(request) {
                    let previous_success = self.status.take_success();
                    self.status = ProcessStatus::Idle {
                        previous_success,
                        previous_failure: Some(message),
                    };
                }
                Vec::new()
            }
            ProcessMsg::Cancel => match self.in_flight.take() {
                Some(request) => {
                    let previous_success = self.status.take_success();
                    self.status = ProcessStatus::Idle {
                        previous_success,
                        previous_failure: None,
                    };
                    vec![ProcessEffect::Cancel { request }]
                }
                None => Vec::new(),
            },
        }
    }

    fn accept(&mut self, request: RequestId) -> bool {
        if self.is_current(request) {
            self.in_flight = None;
            true
        } else {
            pager_debug!(
                "discarding completion of stale request {:?} (current {:?})",
                request,
                self.in_flight
            );
            false
        }
    }
}

/// Pure update function for a standalone process host.
pub fn update_process<I: Clone, O>(
    mut host: ProcessHost<I, O>,
    msg: ProcessMsg<I, O>,
) -> (ProcessHost<I, O>, Vec<ProcessEffect<I>>) {
    let effects = host.apply(msg);
    (host, effects)
}
