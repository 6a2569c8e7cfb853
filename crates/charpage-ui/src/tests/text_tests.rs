use super::*;
use charpage_query::PageInfo;

fn rick() -> CharacterRow {
    CharacterRow {
        id: "1".to_string(),
        name: "Rick Sanchez".to_string(),
        image: "https://rickandmortyapi.com/api/character/avatar/1.jpeg".to_string(),
        status: "Alive".to_string(),
        species: "Human".to_string(),
    }
}

#[test]
fn loading_screen_text() {
    assert_eq!(render_text(&Screen::Loading), "Loading characters...\n");
}

#[test]
fn error_screen_offers_retry() {
    let text = render_text(&Screen::Error {
        message: "Network error: offline".to_string(),
    });
    assert!(text.contains("Error: Network error: offline"));
    assert!(text.contains("[r] Retry"));
}

#[test]
fn list_screen_shows_entries_and_bar() {
    let pagination = PaginationControls::derive(
        1,
        &PageInfo {
            pages: Some(42),
            next: Some(2),
            prev: None,
        },
        2,
    );
    let text = render_text(&Screen::List {
        rows: vec![rick()],
        pagination,
        warning: None,
    });
    assert!(text.contains("Rick Sanchez"));
    assert!(text.contains("Alive - Human"));
    assert!(text.contains("avatar/1.jpeg"));
    assert!(text.contains("1 / 2"));
    assert!(text.contains("Next [n]"));
    assert!(!text.contains("Prev [p]"));
}

#[test]
fn warning_banner_precedes_rows() {
    let pagination = PaginationControls::derive(1, &PageInfo::default(), 2);
    let text = render_text(&Screen::List {
        rows: Vec::new(),
        pagination,
        warning: Some("stale".to_string()),
    });
    assert!(text.starts_with("! stale\n"));
    assert!(text.contains("No characters on this page."));
}

#[test]
fn bar_with_both_controls() {
    let pagination = PaginationControls::derive(
        2,
        &PageInfo {
            pages: Some(3),
            next: Some(3),
            prev: Some(1),
        },
        3,
    );
    assert_eq!(pagination_bar(&pagination), "< Prev [p]   2 / 3   Next [n] >");
}
