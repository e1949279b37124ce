//! In-memory stand-ins for the network and the clock.

use crate::weather_data::retry::Sleeper;
use crate::weather_data::transport::{BoxError, HttpResponse, Transport};
use reqwest::StatusCode;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::time::Duration;

#[derive(Debug, Clone)]
enum FakeReply {
    Response(HttpResponse),
    Error(String),
}

/// Replies to URLs from a script. Each URL has a queue of replies; the last one
/// repeats once the queue is down to it. Unknown URLs answer `404` with an empty body.
#[derive(Debug, Default)]
pub struct FakeTransport {
    replies: Mutex<HashMap<String, VecDeque<FakeReply>>>,
    calls: Mutex<Vec<String>>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_reply(self, url: &str, status: StatusCode, body: impl Into<Vec<u8>>) -> Self {
        self.push(url, FakeReply::Response(HttpResponse::new(status, body)));
        self
    }

    pub fn with_error(self, url: &str, message: &str) -> Self {
        self.push(url, FakeReply::Error(message.to_string()));
        self
    }

    fn push(&self, url: &str, reply: FakeReply) {
        self.replies
            .lock()
            .unwrap()
            .entry(url.to_string())
            .or_default()
            .push_back(reply);
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self, url: &str) -> usize {
        self.calls.lock().unwrap().iter().filter(|u| *u == url).count()
    }

    pub fn reset_calls(&self) {
        self.calls.lock().unwrap().clear();
    }
}

impl Transport for FakeTransport {
    async fn get(&self, url: &str) -> Result<HttpResponse, BoxError> {
        self.calls.lock().unwrap().push(url.to_string());

        let reply = {
            let mut replies = self.replies.lock().unwrap();
            match replies.get_mut(url) {
                Some(queue) if queue.len() > 1 => queue.pop_front(),
                Some(queue) => queue.front().cloned(),
                None => None,
            }
        };

        match reply {
            Some(FakeReply::Response(response)) => Ok(response),
            Some(FakeReply::Error(message)) => Err(message.into()),
            None => Ok(HttpResponse::new(StatusCode::NOT_FOUND, Vec::new())),
        }
    }
}

/// Records requested sleeps and returns immediately.
#[derive(Debug, Default)]
pub struct RecordingSleeper {
    slept: Mutex<Vec<Duration>>,
}

impl RecordingSleeper {
    pub fn slept(&self) -> Vec<Duration> {
        self.slept.lock().unwrap().clone()
    }
}

impl Sleeper for RecordingSleeper {
    async fn sleep(&self, duration: Duration) {
        self.slept.lock().unwrap().push(duration);
    }
}
