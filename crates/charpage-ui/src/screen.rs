//! Renderable description of the list view.

use charpage_query::Character;

use crate::pagination::PaginationControls;

/// One character entry as displayed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharacterRow {
    pub id: String,
    pub name: String,
    pub image: String,
    pub status: String,
    pub species: String,
}

impl From<&Character> for CharacterRow {
    fn from(character: &Character) -> Self {
        fn or_unknown(value: &Option<String>) -> String {
            value.clone().unwrap_or_else(|| "unknown".to_string())
        }
        Self {
            id: character.id.clone().unwrap_or_default(),
            name: or_unknown(&character.name),
            image: character.image.clone().unwrap_or_default(),
            status: or_unknown(&character.status),
            species: or_unknown(&character.species),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    Loading,
    Error {
        message: String,
    },
    List {
        rows: Vec<CharacterRow>,
        pagination: PaginationControls,
        /// Error that arrived alongside or after the shown data.
        warning: Option<String>,
    },
}

impl Screen {
    pub fn pagination(&self) -> Option<&PaginationControls> {
        match self {
            Screen::List { pagination, .. } => Some(pagination),
            _ => None,
        }
    }

    pub fn rows(&self) -> &[CharacterRow] {
        match self {
            Screen::List { rows, .. } => rows,
            _ => &[],
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Screen::Loading)
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            Screen::Error { message } => Some(message),
            _ => None,
        }
    }
}
