//! JSON response builders shaped like the public character API.

use charpage_core::PageNumber;
use serde_json::{json, Value};

/// Characters on `page` named `names`, with ids continuing across pages.
pub fn characters_page(
    page: PageNumber,
    pages: u32,
    next: Option<PageNumber>,
    prev: Option<PageNumber>,
    names: &[&str],
) -> Value {
    let first_id = (page.saturating_sub(1) as usize) * 20 + 1;
    let results: Vec<Value> = names
        .iter()
        .enumerate()
        .map(|(offset, name)| character(&(first_id + offset).to_string(), name))
        .collect();
    json!({
        "data": {
            "characters": {
                "info": { "pages": pages, "next": next, "prev": prev },
                "results": results,
            }
        }
    })
}

/// A page from a two-page-capped browse over a 42-page dataset.
pub fn standard_page(page: PageNumber) -> Value {
    let next = if page < 42 { Some(page + 1) } else { None };
    let prev = if page > 1 { Some(page - 1) } else { None };
    let names: &[&str] = match page {
        1 => &["Rick Sanchez", "Morty Smith"],
        2 => &["Aqua Morty", "Aqua Rick"],
        _ => &["Unnamed"],
    };
    characters_page(page, 42, next, prev, names)
}

pub fn character(id: &str, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "image": format!("https://rickandmortyapi.com/api/character/avatar/{id}.jpeg"),
        "status": "Alive",
        "species": "Human",
    })
}

/// GraphQL errors with no data.
pub fn errors_only(message: &str) -> Value {
    json!({ "errors": [{ "message": message }] })
}

/// Data and errors in the same response.
pub fn partial(data: Value, message: &str) -> Value {
    let mut body = data;
    body["errors"] = json!([{ "message": message, "path": ["characters", "results", 0, "image"] }]);
    body
}
