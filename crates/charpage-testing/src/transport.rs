use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use charpage_core::PageNumber;
use charpage_query::{QueryError, Transport};

/// Canned reply for one page.
#[derive(Debug, Clone)]
pub enum ScriptedResponse {
    /// Serialized as the response body.
    Json(serde_json::Value),
    /// Raw body bytes, for malformed-response cases.
    Raw(Vec<u8>),
    /// Transport-level failure.
    Fail(QueryError),
}

#[derive(Default)]
struct Script {
    by_page: HashMap<PageNumber, Vec<ScriptedResponse>>,
    requests: Vec<serde_json::Value>,
}

/// Transport answering from a per-page script.
///
/// Responses queued for a page are consumed in order; the last one repeats.
/// Every request body is recorded.
#[derive(Clone, Default)]
pub struct ScriptedTransport {
    script: Arc<Mutex<Script>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    fn script(&self) -> MutexGuard<'_, Script> {
        self.script.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn respond(&self, page: PageNumber, response: ScriptedResponse) -> &Self {
        self.script().by_page.entry(page).or_default().push(response);
        self
    }

    pub fn respond_json(&self, page: PageNumber, body: serde_json::Value) -> &Self {
        self.respond(page, ScriptedResponse::Json(body))
    }

    pub fn fail(&self, page: PageNumber, error: QueryError) -> &Self {
        self.respond(page, ScriptedResponse::Fail(error))
    }

    /// Every request body received so far.
    pub fn requests(&self) -> Vec<serde_json::Value> {
        self.script().requests.clone()
    }

    /// The `page` variable of every request, in arrival order.
    pub fn requested_pages(&self) -> Vec<Option<PageNumber>> {
        self.script()
            .requests
            .iter()
            .map(page_variable)
            .collect()
    }

    pub fn request_count(&self) -> usize {
        self.script().requests.len()
    }
}

fn page_variable(body: &serde_json::Value) -> Option<PageNumber> {
    body.get("variables")?
        .get("page")?
        .as_u64()
        .and_then(|page| PageNumber::try_from(page).ok())
}

impl Transport for ScriptedTransport {
    fn post_json(&self, body: &serde_json::Value) -> Result<Vec<u8>, QueryError> {
        let mut script = self.script();
        script.requests.push(body.clone());

        let page = page_variable(body);
        let scripted = match page.and_then(|page| script.by_page.get_mut(&page)) {
            Some(queue) if queue.len() > 1 => Some(queue.remove(0)),
            Some(queue) => queue.first().cloned(),
            None => None,
        };

        match scripted {
            Some(ScriptedResponse::Json(value)) => Ok(serde_json::to_vec(&value)?),
            Some(ScriptedResponse::Raw(bytes)) => Ok(bytes),
            Some(ScriptedResponse::Fail(error)) => Err(error),
            None => {
                log::debug!("no scripted response for page {page:?}; answering 404");
                Err(QueryError::HttpStatus {
                    status: 404,
                    body: format!("no scripted response for page {page:?}"),
                })
            }
        }
    }
}
