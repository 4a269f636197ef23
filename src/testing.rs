//! In-memory transport and pacer for tests.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::error::FetchError;
use crate::fetch::{Pacer, Pause, Transport};

#[derive(Default)]
pub struct FakeTransport {
    routes: HashMap<String, Result<String, u16>>,
    requests: Mutex<Vec<String>>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, url: &str, body: &str) -> Self {
        self.routes.insert(url.to_string(), Ok(body.to_string()));
        self
    }

    pub fn status(mut self, url: &str, status: u16) -> Self {
        self.routes.insert(url.to_string(), Err(status));
        self
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

impl Transport for FakeTransport {
    async fn get(&self, url: &str) -> Result<String, FetchError> {
        self.requests.lock().unwrap().push(url.to_string());
        match self.routes.get(url) {
            Some(Ok(body)) => Ok(body.clone()),
            Some(Err(status)) => Err(FetchError::Status {
                url: url.to_string(),
                status: *status,
            }),
            None => Err(FetchError::Status {
                url: url.to_string(),
                status: 404,
            }),
        }
    }
}

#[derive(Default)]
pub struct RecordingPacer {
    pauses: Mutex<Vec<Pause>>,
}

impl RecordingPacer {
    pub fn pauses(&self) -> Vec<Pause> {
        self.pauses.lock().unwrap().clone()
    }
}

impl Pacer for RecordingPacer {
    async fn pause(&self, kind: Pause) {
        self.pauses.lock().unwrap().push(kind);
    }
}

/// Listing page markup with one `.common_sp_link` per id.
pub fn listing_html(ids: &[&str]) -> String {
    let items: String = ids
        .iter()
        .map(|id| {
            format!(
                r#"<li class="common_sp_list_li"><a class="common_sp_link" href="/recipe/{}">r</a></li>"#,
                id
            )
        })
        .collect();
    format!("<html><body><ul class=\"common_sp_list_ul\">{}</ul></body></html>", items)
}

pub fn detail_html(title: &str) -> String {
    format!(
        r#"<html><body>
            <div class="view2_summary"><h3>{}</h3>
              <span class="view2_summary_info1">2인분</span>
            </div>
            <div class="ready_ingre3"><ul><li>두부  1모</li></ul></div>
            <div class="view_step_cont">끓인다.</div>
        </body></html>"#,
        title
    )
}
