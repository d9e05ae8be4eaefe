//! Fragment fetch transport.
//!
//! The widgets only ever fire-and-forget a GET and, if a response happens
//! to arrive, paste the body into a container. The trait keeps that seam
//! swappable; the production implementation runs one blocking request per
//! worker thread.

use std::thread;

use futures::channel::oneshot;
use tracing::{debug, warn};

/// Outcome of one fragment request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// 2xx response; the body is an HTML fragment.
    Success(String),
    /// Any status or transport failure. Callers drop these silently.
    Failed,
}

/// Seam for issuing fire-and-forget HTML fragment requests.
pub trait FragmentFetch {
    /// Start a GET for `url` and return a receiver for its outcome.
    ///
    /// Dropping the receiver abandons the response without cancelling the
    /// request; nothing de-duplicates overlapping requests for the same
    /// url.
    fn get(&self, url: &str) -> oneshot::Receiver<FetchOutcome>;
}

/// Blocking-HTTP transport, one worker thread per request.
#[derive(Debug, Clone, Copy, Default)]
pub struct HttpFragmentFetch;

impl FragmentFetch for HttpFragmentFetch {
    fn get(&self, url: &str) -> oneshot::Receiver<FetchOutcome> {
        let (tx, rx) = oneshot::channel();
        let url = url.to_owned();
        thread::spawn(move || {
            // a dropped receiver is fine, the request itself was the point
            let _ = tx.send(fetch_fragment(&url));
        });
        rx
    }
}

fn fetch_fragment(url: &str) -> FetchOutcome {
    debug!(url, "requesting registration fragment");

    match ureq::get(url).call() {
        Ok(response) => match response.into_string() {
            Ok(body) => FetchOutcome::Success(body),
            Err(err) => {
                warn!(%err, "unable to read fragment body");
                FetchOutcome::Failed
            }
        },
        Err(ureq::Error::Status(s, r)) => {
            debug!("{s} {} fragment request rejected", r.status_text());
            FetchOutcome::Failed
        }
        Err(ureq::Error::Transport(t)) => {
            if let Some(err) = t.message() {
                debug!(%err, "something went wrong when requesting the fragment");
            }
            FetchOutcome::Failed
        }
    }
}
