#![doc = r"Paginated character list view for the character browser."]

pub mod list_view;
pub mod pagination;
pub mod query_state;
pub mod screen;
pub mod text;

pub use list_view::{CharacterListView, ListViewOptions};
pub use pagination::PaginationControls;
pub use query_state::{QueryState, RenderState};
pub use screen::{CharacterRow, Screen};
pub use text::{pagination_bar, render_text};

#[cfg(test)]
#[path = "tests/pagination_tests.rs"]
mod pagination_tests;

#[cfg(test)]
#[path = "tests/query_state_tests.rs"]
mod query_state_tests;

#[cfg(test)]
#[path = "tests/text_tests.rs"]
mod text_tests;
