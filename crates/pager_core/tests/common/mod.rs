#![allow(dead_code)]

use std::sync::Once;

use pager_core::{
    update, Effect, Identified, Msg, Page, PageInfo, PageRules, PaginationState, ProcessMsg,
    RequestId,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Episode {
    pub id: u32,
    pub name: String,
}

impl Identified for Episode {
    type Id = u32;

    fn id(&self) -> u32 {
        self.id
    }
}

pub type Cursor = String;
pub type State = PaginationState<Cursor, Episode>;
pub type Effects = Vec<Effect<Cursor, Episode>>;

pub fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(pager_logging::initialize_for_tests);
}

pub fn episode(id: u32, name: &str) -> Episode {
    Episode {
        id,
        name: name.to_string(),
    }
}

pub fn page(next: Option<&str>, prev: Option<&str>, results: Vec<Episode>) -> Page<Cursor, Episode> {
    Page::new(
        PageInfo {
            count: results.len() as u64,
            total_pages: 1,
            next: next.map(str::to_string),
            prev: prev.map(str::to_string),
        },
        results,
    )
}

pub fn rules() -> PageRules<Cursor, Episode> {
    PageRules::follow_links()
}

pub fn step(state: State, msg: Msg<Cursor, Episode>) -> (State, Effects) {
    update(state, msg, &rules())
}

/// The single fetch requested by `effects`.
pub fn fetch_of(effects: &Effects) -> (RequestId, Cursor) {
    let fetches: Vec<_> = effects
        .iter()
        .filter_map(|effect| match effect {
            Effect::FetchPage { request, input } => Some((*request, input.clone())),
            _ => None,
        })
        .collect();
    assert_eq!(fetches.len(), 1, "expected exactly one fetch in {effects:?}");
    fetches[0].clone()
}

pub fn finish(state: State, request: RequestId, output: Page<Cursor, Episode>) -> (State, Effects) {
    step(
        state,
        Msg::PageLoading(ProcessMsg::Finished { request, output }),
    )
}

pub fn fail(state: State, request: RequestId, message: &str) -> (State, Effects) {
    step(
        state,
        Msg::PageLoading(ProcessMsg::Failed {
            request,
            message: message.to_string(),
        }),
    )
}

pub fn item_ids(state: &State) -> Vec<u32> {
    state.items().ids()
}

/// Page one `[Pilot]` pointing at `page2`, already merged.
pub fn loaded_first_page() -> State {
    let state = State::new(Some("page1".to_string()));
    let (state, effects) = step(state, Msg::LoadFirstPageIfNeeded);
    let (request, _) = fetch_of(&effects);
    let (state, _) = finish(
        state,
        request,
        page(Some("page2"), None, vec![episode(1, "Pilot")]),
    );
    state
}
