//! The `Characters` page query and its response shape.
//!
//! Every field is optional on the wire. Accessors substitute empty or null
//! defaults so callers never have to care which part of a response was absent.

use charpage_core::PageNumber;
use serde::{Deserialize, Serialize};

use crate::operation::GraphqlOperation;

pub struct CharactersQuery;

impl GraphqlOperation for CharactersQuery {
    type Variables = CharactersVariables;
    type ResponseData = CharactersData;

    const QUERY: &'static str = r#"query Characters($page: Int) {
  characters(page: $page) {
    info {
      pages
      next
      prev
    }
    results {
      id
      name
      image
      status
      species
    }
  }
}"#;
    const OPERATION_NAME: &'static str = "Characters";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharactersVariables {
    pub page: PageNumber,
}

impl CharactersVariables {
    pub fn new(page: PageNumber) -> Self {
        Self { page }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CharactersData {
    #[serde(default)]
    pub characters: Option<CharacterPage>,
}

impl CharactersData {
    /// Characters on this page, or an empty slice when absent.
    pub fn results(&self) -> &[Character] {
        self.characters
            .as_ref()
            .and_then(|page| page.results.as_deref())
            .unwrap_or(&[])
    }

    /// Page metadata, all-null when absent.
    pub fn info(&self) -> PageInfo {
        self.characters
            .as_ref()
            .and_then(|page| page.info)
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CharacterPage {
    #[serde(default)]
    pub info: Option<PageInfo>,
    #[serde(default)]
    pub results: Option<Vec<Character>>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageInfo {
    #[serde(default)]
    pub pages: Option<u32>,
    #[serde(default)]
    pub next: Option<PageNumber>,
    #[serde(default)]
    pub prev: Option<PageNumber>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Character {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub species: Option<String>,
}
