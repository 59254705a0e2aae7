// SPDX-License-Identifier: Apache-2.0

//! Fake GitHub upstream for integration tests.
//!
//! Serves `GET /repos/{owner}/{repo}/issues` from a list of canned pages on
//! an ephemeral port and records every request it receives.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::Router;
use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use serde_json::{Value, json};
use tokio::net::TcpListener;

/// One canned upstream response.
#[derive(Clone)]
pub struct Page {
    pub status: StatusCode,
    pub body: String,
    pub delay: Option<Duration>,
    /// Overrides the generated `rel="next"` link.
    pub next: Option<String>,
}

impl Page {
    pub fn ok(issues: &[Value]) -> Self {
        Self {
            status: StatusCode::OK,
            body: Value::Array(issues.to_vec()).to_string(),
            delay: None,
            next: None,
        }
    }

    pub fn status(status: u16) -> Self {
        Self {
            status: StatusCode::from_u16(status).expect("valid status"),
            body: json!({"message": "upstream says no"}).to_string(),
            delay: None,
            next: None,
        }
    }

    pub fn raw(body: &str) -> Self {
        Self {
            status: StatusCode::OK,
            body: body.to_string(),
            delay: None,
            next: None,
        }
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn with_next(mut self, url: &str) -> Self {
        self.next = Some(url.to_string());
        self
    }
}

/// A request seen by the fake upstream.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub path: String,
    pub query: HashMap<String, String>,
    pub authorization: Option<String>,
    pub accept: Option<String>,
    pub user_agent: Option<String>,
}

struct Inner {
    pages: Vec<Page>,
    /// When set, every page advertises a next link, even the last one.
    endless: bool,
    requests: Mutex<Vec<Recorded>>,
}

/// Handle to a running fake upstream.
#[derive(Clone)]
pub struct FakeGitHub {
    pub base_url: String,
    inner: Arc<Inner>,
}

impl FakeGitHub {
    /// Starts a server answering page `n` (1-based, from the `page` query
    /// parameter, default 1) with `pages[n - 1]`. Every page but the last
    /// advertises a `rel="next"` link.
    pub async fn start(pages: Vec<Page>) -> Self {
        Self::start_with(pages, false).await
    }

    /// Like [`FakeGitHub::start`] but every page links to a next one.
    pub async fn start_endless(page: Page) -> Self {
        Self::start_with(vec![page], true).await
    }

    async fn start_with(pages: Vec<Page>, endless: bool) -> Self {
        let inner = Arc::new(Inner {
            pages,
            endless,
            requests: Mutex::new(Vec::new()),
        });

        let router = Router::new()
            .route("/repos/{owner}/{repo}/issues", get(issues))
            .with_state(Arc::clone(&inner));

        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let addr = listener.local_addr().expect("local addr");
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("serve");
        });

        Self {
            base_url: format!("http://{addr}"),
            inner,
        }
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.inner.requests.lock().expect("lock").clone()
    }

    pub fn request_count(&self) -> usize {
        self.inner.requests.lock().expect("lock").len()
    }
}

async fn issues(
    State(inner): State<Arc<Inner>>,
    uri: axum::http::Uri,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Response {
    let text = |name: header::HeaderName| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(ToString::to_string)
    };

    inner.requests.lock().expect("lock").push(Recorded {
        path: uri.path().to_string(),
        query: query.clone(),
        authorization: text(header::AUTHORIZATION),
        accept: text(header::ACCEPT),
        user_agent: text(header::USER_AGENT),
    });

    let page_number: usize = query
        .get("page")
        .and_then(|p| p.parse().ok())
        .unwrap_or(1);
    let index = if inner.endless { 0 } else { page_number - 1 };
    let Some(page) = inner.pages.get(index).cloned() else {
        return StatusCode::NOT_FOUND.into_response();
    };

    if let Some(delay) = page.delay {
        tokio::time::sleep(delay).await;
    }

    let mut response = (
        page.status,
        [(header::CONTENT_TYPE, "application/json")],
        page.body,
    )
        .into_response();

    let has_next = inner.endless || page_number < inner.pages.len();
    if let Some(next) = &page.next {
        response.headers_mut().insert(
            header::LINK,
            format!("<{next}>; rel=\"next\"").parse().expect("header value"),
        );
    } else if has_next {
        let host = text(header::HOST).unwrap_or_default();
        let next = format!(
            "<http://{host}{}?state=open&per_page=100&page={}>; rel=\"next\", <http://{host}{}?state=open&per_page=100&page=99>; rel=\"last\"",
            uri.path(),
            page_number + 1,
            uri.path()
        );
        response
            .headers_mut()
            .insert(header::LINK, next.parse().expect("header value"));
    }
    response.headers_mut().insert(
        "x-ratelimit-remaining",
        "4999".parse().expect("header value"),
    );

    response
}

/// A raw upstream issue in GitHub's shape.
pub fn issue(id: u64, labels: &[&str]) -> Value {
    let labels: Vec<_> = labels.iter().map(|name| json!({ "name": name })).collect();
    json!({
        "id": id,
        "number": id,
        "title": format!("Issue {id}"),
        "user": {"login": "octocat"},
        "state": "open",
        "created_at": format!("2023-01-{:02}T00:00:00Z", (id % 28) + 1),
        "updated_at": "2023-02-01T00:00:00Z",
        "labels": labels,
        "html_url": format!("https://github.com/owner/repo/issues/{id}"),
        "comments": 0,
        "body": ""
    })
}

/// A raw upstream pull request (an issue carrying a `pull_request` key).
pub fn pull_request(id: u64) -> Value {
    let mut value = issue(id, &[]);
    value["pull_request"] = json!({"url": format!("https://api.github.com/repos/owner/repo/pulls/{id}")});
    value
}
