use std::fmt::Debug;

use pager_logging::pager_debug;

use crate::process::ProcessMsg;
use crate::{Effect, Identified, Msg, PageRules, PaginationState, WaiterId, WaiterRejection};

/// Pure update function: applies a message to state and returns any effects.
pub fn update<I, T>(
    mut state: PaginationState<I, T>,
    msg: Msg<I, T>,
    rules: &PageRules<I, T>,
) -> (PaginationState<I, T>, Vec<Effect<I, T>>)
where
    I: Clone + PartialEq + Debug,
    T: Identified + Clone,
{
    let mut effects = Vec::new();
    apply(&mut state, msg, rules, &mut effects);
    (state, effects)
}

fn apply<I, T>(
    state: &mut PaginationState<I, T>,
    msg: Msg<I, T>,
    rules: &PageRules<I, T>,
    effects: &mut Vec<Effect<I, T>>,
) where
    I: Clone + PartialEq + Debug,
    T: Identified + Clone,
{
    match msg {
        Msg::SetFirstInput(input) => {
            if state.first_input() == Some(&input) {
                return;
            }
            state.set_first_input(input);
            state.reset();
            apply(state, Msg::load_next_page(), rules, effects);
        }
        Msg::LoadFirstPageIfNeeded => {
            if state.needs_to_load_first_page() {
                apply(state, Msg::load_next_page(), rules, effects);
            }
        }
        Msg::LoadNextPage { waiter } => load_next_page(state, waiter, effects),
        Msg::Reload { waiter } => {
            state.reset();
            load_next_page(state, waiter, effects);
        }
        Msg::PageLoading(ProcessMsg::Finished { request, output }) => {
            if !state.page_loading().is_current(request) {
                pager_debug!("ignoring page for superseded request {:?}", request);
                return;
            }
            let page = output.clone();
            state
                .page_loading_mut()
                .apply(ProcessMsg::Finished { request, output });
            state.merge_page(page.clone(), rules);
            let waiters = state.take_waiters();
            if !waiters.is_empty() {
                effects.push(Effect::ResolveWaiters { waiters, page });
            }
        }
        Msg::PageLoading(ProcessMsg::Failed { request, message }) => {
            if !state.page_loading().is_current(request) {
                pager_debug!("ignoring failure of superseded request {:?}", request);
                return;
            }
            state.page_loading_mut().apply(ProcessMsg::Failed {
                request,
                message: message.clone(),
            });
            reject_waiters(state, WaiterRejection::Failed(message), effects);
        }
        Msg::PageLoading(process_msg) => {
            let process_effects = state.page_loading_mut().apply(process_msg);
            effects.extend(process_effects.into_iter().map(Effect::from));
        }
        Msg::Dispose => {
            let process_effects = state.page_loading_mut().apply(ProcessMsg::Cancel);
            effects.extend(process_effects.into_iter().map(Effect::from));
            reject_waiters(state, WaiterRejection::Cancelled, effects);
        }
    }
}

fn load_next_page<I, T>(
    state: &mut PaginationState<I, T>,
    waiter: Option<WaiterId>,
    effects: &mut Vec<Effect<I, T>>,
) where
    I: Clone + PartialEq + Debug,
    T: Identified + Clone,
{
    let Some(next_input) = state.next_input().cloned() else {
        if let Some(waiter) = waiter {
            effects.push(Effect::RejectWaiters {
                waiters: vec![waiter],
                rejection: WaiterRejection::Exhausted,
            });
        }
        return;
    };

    if let Some(waiter) = waiter {
        state.push_waiter(waiter);
    }

    // Same cursor already in flight: the waiter rides along with it.
    if state.page_loading().status().input() == Some(&next_input) {
        pager_debug!("coalescing page load for {:?}", next_input);
        return;
    }

    let process_effects = state
        .page_loading_mut()
        .apply(ProcessMsg::Process(next_input));
    effects.extend(process_effects.into_iter().map(Effect::from));
}

fn reject_waiters<I, T>(
    state: &mut PaginationState<I, T>,
    rejection: WaiterRejection,
    effects: &mut Vec<Effect<I, T>>,
) where
    I: Clone,
    T: Identified,
{
    let waiters = state.take_waiters();
    if !waiters.is_empty() {
        effects.push(Effect::RejectWaiters { waiters, rejection });
    }
}
