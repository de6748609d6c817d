mod common;

use common::*;
use pager_core::{Effect, Msg, PaginationView};
use pretty_assertions::assert_eq;

#[test]
fn first_page_load_merges_results_and_advances_cursor() {
    init_logging();
    let state = State::new(Some("page1".to_string()));
    let (state, effects) = step(state, Msg::LoadFirstPageIfNeeded);
    let (request, input) = fetch_of(&effects);
    assert_eq!(input, "page1");
    assert!(state.is_loading_next_page());

    let (state, effects) = finish(
        state,
        request,
        page(Some("page2"), None, vec![episode(1, "Pilot")]),
    );

    assert!(effects.is_empty());
    assert_eq!(state.items().as_slice(), &[episode(1, "Pilot")]);
    assert_eq!(state.next_input(), Some(&"page2".to_string()));
    assert!(!state.is_loading_next_page());
    assert_eq!(
        state.view(),
        PaginationView {
            item_count: 1,
            page_count: 1,
            cached_since: None,
            failure_message: None,
            has_next_page: true,
            is_loading_next_page: false,
        }
    );
}

#[test]
fn failed_next_page_keeps_items_and_cursor() {
    init_logging();
    let state = loaded_first_page();

    let (state, effects) = step(state, Msg::load_next_page());
    let (request, input) = fetch_of(&effects);
    assert_eq!(input, "page2");

    let (state, _) = fail(state, request, "network error");

    assert_eq!(state.items().as_slice(), &[episode(1, "Pilot")]);
    assert_eq!(state.failure_message(), Some("network error"));
    assert_eq!(state.next_input(), Some(&"page2".to_string()));
    assert!(!state.is_loading_next_page());
}

#[test]
fn reload_after_failure_replaces_everything() {
    init_logging();
    let state = loaded_first_page();
    let (state, effects) = step(state, Msg::load_next_page());
    let (request, _) = fetch_of(&effects);
    let (state, _) = fail(state, request, "network error");

    let (state, effects) = step(state, Msg::reload());
    let (request, input) = fetch_of(&effects);
    assert_eq!(input, "page1");
    assert!(state.items().is_empty());

    let (state, _) = finish(state, request, page(None, None, vec![episode(9, "Replaced")]));

    assert_eq!(state.items().as_slice(), &[episode(9, "Replaced")]);
    assert_eq!(state.next_input(), None);
    assert!(!state.has_next_page());
    assert_eq!(state.failure_message(), None);
}

#[test]
fn load_first_page_if_needed_is_idempotent_once_items_exist() {
    init_logging();
    let mut state = loaded_first_page();
    for _ in 0..3 {
        let (next, effects) = step(state, Msg::LoadFirstPageIfNeeded);
        assert!(effects.is_empty());
        state = next;
    }
    assert_eq!(item_ids(&state), vec![1]);
}

#[test]
fn load_first_page_if_needed_without_source_does_nothing() {
    init_logging();
    let (state, effects) = step(State::new(None), Msg::LoadFirstPageIfNeeded);
    assert!(effects.is_empty());
    assert!(!state.is_loading_next_page());
}

#[test]
fn set_first_input_twice_triggers_one_cycle() {
    init_logging();
    let (state, effects) = step(State::new(None), Msg::SetFirstInput("x".to_string()));
    let (_, input) = fetch_of(&effects);
    assert_eq!(input, "x");

    let (state, effects) = step(state, Msg::SetFirstInput("x".to_string()));
    assert!(effects.is_empty());
    assert!(state.is_loading_next_page());
}

#[test]
fn set_first_input_with_new_source_resets_and_supersedes() {
    init_logging();
    let state = loaded_first_page();
    let (state, effects) = step(state, Msg::load_next_page());
    let (stale, _) = fetch_of(&effects);

    let (state, effects) = step(state, Msg::SetFirstInput("other1".to_string()));
    let (request, input) = fetch_of(&effects);
    assert_eq!(input, "other1");
    assert!(effects.contains(&Effect::CancelFetch { request: stale }));
    assert!(state.items().is_empty());
    assert!(state.pages().is_empty());

    // Late arrival from the old source is dropped.
    let (state, effects) = finish(
        state,
        stale,
        page(Some("page3"), Some("page1"), vec![episode(2, "Lawnmower Dog")]),
    );
    assert!(effects.is_empty());
    assert!(state.items().is_empty());

    let (state, _) = finish(state, request, page(None, None, vec![episode(40, "Other")]));
    assert_eq!(item_ids(&state), vec![40]);
}

#[test]
fn merge_deduplicates_by_id() {
    init_logging();
    let state = State::new(Some("page1".to_string()));
    let (state, effects) = step(state, Msg::load_next_page());
    let (request, _) = fetch_of(&effects);
    let (state, _) = finish(
        state,
        request,
        page(Some("page2"), None, vec![episode(1, "a"), episode(2, "b")]),
    );

    let (state, effects) = step(state, Msg::load_next_page());
    let (request, _) = fetch_of(&effects);
    let (state, _) = finish(
        state,
        request,
        page(None, Some("page1"), vec![episode(2, "b2"), episode(3, "c")]),
    );

    assert_eq!(item_ids(&state), vec![1, 2, 3]);
    assert_eq!(state.items().get(&2).map(|e| e.name.as_str()), Some("b2"));
    assert_eq!(state.pages().len(), 2);
}

#[test]
fn stale_first_page_resets_accumulated_state() {
    init_logging();
    let state = loaded_first_page();
    let (state, effects) = step(state, Msg::load_next_page());
    let (request, _) = fetch_of(&effects);
    let (state, _) = finish(
        state,
        request,
        page(Some("page3"), Some("page1"), vec![episode(2, "b")]),
    );
    assert_eq!(item_ids(&state), vec![1, 2]);

    let (state, effects) = step(state, Msg::load_next_page());
    let (request, _) = fetch_of(&effects);
    let (state, _) = finish(
        state,
        request,
        page(Some("page2"), None, vec![episode(5, "fresh"), episode(6, "fresher")]),
    );

    assert_eq!(item_ids(&state), vec![5, 6]);
    assert_eq!(state.pages().len(), 1);
    assert_eq!(state.next_input(), Some(&"page2".to_string()));
}

#[test]
fn reload_while_next_page_in_flight_restarts_from_first_input() {
    init_logging();
    let state = loaded_first_page();
    let (state, effects) = step(state, Msg::load_next_page());
    let (stale, _) = fetch_of(&effects);

    let (state, effects) = step(state, Msg::reload());
    let (request, input) = fetch_of(&effects);
    assert_eq!(input, "page1");
    assert_eq!(effects[0], Effect::CancelFetch { request: stale });

    let (state, _) = finish(state, request, page(None, None, vec![episode(1, "Pilot")]));
    assert_eq!(item_ids(&state), vec![1]);
    assert!(!state.has_next_page());
}

#[test]
fn load_next_page_without_next_input_is_noop() {
    init_logging();
    let state = State::new(Some("page1".to_string()));
    let (state, effects) = step(state, Msg::load_next_page());
    let (request, _) = fetch_of(&effects);
    let (state, _) = finish(state, request, page(None, None, vec![episode(1, "only")]));

    let before = state.clone();
    let (state, effects) = step(state, Msg::load_next_page());
    assert!(effects.is_empty());
    assert_eq!(state, before);
}

#[test]
fn cached_since_comes_from_first_page() {
    init_logging();
    let stamp = chrono::DateTime::parse_from_rfc3339("2024-05-01T10:00:00Z")
        .unwrap()
        .with_timezone(&chrono::Utc);
    let state = State::new(Some("page1".to_string()));
    let (state, effects) = step(state, Msg::load_next_page());
    let (request, _) = fetch_of(&effects);
    let first = page(Some("page2"), None, vec![episode(1, "a")]).with_cached_since(Some(stamp));
    let (state, _) = finish(state, request, first);

    let (state, effects) = step(state, Msg::load_next_page());
    let (request, _) = fetch_of(&effects);
    let (state, _) = finish(state, request, page(None, Some("page1"), vec![episode(2, "b")]));

    assert_eq!(state.cached_since(), Some(stamp));
    assert_eq!(state.view().cached_since, Some(stamp));
}

#[test]
fn restoring_from_cache_rebuilds_items_and_cursor() {
    init_logging();
    let pages = vec![
        page(Some("page2"), None, vec![episode(1, "a"), episode(2, "b")]),
        page(Some("page3"), Some("page1"), vec![episode(2, "b"), episode(3, "c")]),
    ];
    let state = State::from_cache("page1".to_string(), pages, &rules());

    assert_eq!(item_ids(&state), vec![1, 2, 3]);
    assert_eq!(state.next_input(), Some(&"page3".to_string()));

    let (_, effects) = step(state, Msg::LoadFirstPageIfNeeded);
    assert!(effects.is_empty());

    let empty = State::from_cache("page1".to_string(), Vec::new(), &rules());
    assert!(empty.needs_to_load_first_page());
}
