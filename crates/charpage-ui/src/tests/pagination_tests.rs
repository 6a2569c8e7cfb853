use super::*;
use charpage_query::PageInfo;

fn info(prev: Option<u32>, next: Option<u32>) -> PageInfo {
    PageInfo {
        pages: Some(42),
        next,
        prev,
    }
}

#[test]
fn first_page_has_next_only() {
    let controls = PaginationControls::derive(1, &info(None, Some(2)), 2);
    assert!(!controls.has_prev);
    assert!(controls.has_next);
}

#[test]
fn page_cap_disables_next_even_with_server_next() {
    let controls = PaginationControls::derive(2, &info(Some(1), Some(3)), 2);
    assert!(controls.has_prev);
    assert!(!controls.has_next);
    assert_eq!(controls.next_target(), None);
}

#[test]
fn last_page_without_server_next() {
    let controls = PaginationControls::derive(2, &info(Some(1), None), 2);
    assert!(!controls.has_next);
}

#[test]
fn next_advances_locally_not_to_server_next() {
    let controls = PaginationControls::derive(1, &info(None, Some(7)), 2);
    assert_eq!(controls.next_target(), Some(2));
}

#[test]
fn previous_uses_server_prev_not_decrement() {
    let controls = PaginationControls::derive(2, &info(Some(9), None), 2);
    assert_eq!(controls.previous_target(), Some(9));
}

#[test]
fn missing_metadata_disables_both_controls() {
    let controls = PaginationControls::derive(1, &PageInfo::default(), 2);
    assert!(!controls.has_prev);
    assert!(!controls.has_next);
    assert_eq!(controls.previous_target(), None);
    assert_eq!(controls.next_target(), None);
}

#[test]
fn label_shows_current_over_cap() {
    let controls = PaginationControls::derive(1, &info(None, Some(2)), 2);
    assert_eq!(controls.label(), "1 / 2");
}
