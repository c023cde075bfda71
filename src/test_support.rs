// src/test_support.rs
//! In-memory stand-ins for the model and job sources

use crate::llm::{LanguageModel, LlmError};
use crate::sources::{JobSource, SourceError};
use crate::types::{JobListing, StructuredQuery};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

pub fn listing(id: &str, title: &str, company: &str, location: &str) -> JobListing {
    JobListing::from_parts(
        id,
        Some(title.to_string()),
        Some(company.to_string()),
        Some(location.to_string()),
        None,
        None,
    )
}

pub struct MockModel {
    reply: Option<String>,
    calls: AtomicUsize,
    last_prompt: Mutex<Option<String>>,
}

impl MockModel {
    pub fn replying(reply: &str) -> Self {
        Self {
            reply: Some(reply.to_string()),
            calls: AtomicUsize::new(0),
            last_prompt: Mutex::new(None),
        }
    }

    pub fn failing() -> Self {
        Self {
            reply: None,
            calls: AtomicUsize::new(0),
            last_prompt: Mutex::new(None),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.last_prompt.lock().unwrap().clone()
    }
}

#[async_trait]
impl LanguageModel for MockModel {
    async fn complete(&self, prompt: &str) -> Result<String, LlmError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_prompt.lock().unwrap() = Some(prompt.to_string());

        self.reply.clone().ok_or(LlmError::Api {
            status: 503,
            message: "model unavailable".to_string(),
        })
    }

    fn name(&self) -> &str {
        "mock-model"
    }
}

pub struct MockSource {
    name: String,
    listings: Option<Vec<JobListing>>,
    delay: Option<Duration>,
    calls: AtomicUsize,
    last_query: Mutex<Option<StructuredQuery>>,
}

impl MockSource {
    pub fn returning(name: &str, listings: Vec<JobListing>) -> Self {
        Self {
            name: name.to_string(),
            listings: Some(listings),
            delay: None,
            calls: AtomicUsize::new(0),
            last_query: Mutex::new(None),
        }
    }

    pub fn failing(name: &str) -> Self {
        Self {
            listings: None,
            ..Self::returning(name, Vec::new())
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_query(&self) -> Option<StructuredQuery> {
        self.last_query.lock().unwrap().clone()
    }
}

#[async_trait]
impl JobSource for MockSource {
    async fn fetch(&self, query: &StructuredQuery) -> Result<Vec<JobListing>, SourceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_query.lock().unwrap() = Some(query.clone());

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        self.listings.clone().ok_or(SourceError::Api {
            status: 500,
            message: "upstream down".to_string(),
        })
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Local HTTP/1.1 server answering each connection with the next canned
/// `(status, body)` pair; the last pair repeats once the list runs out
pub struct StubServer {
    pub url: String,
    requests: Arc<Mutex<Vec<String>>>,
}

impl StubServer {
    pub async fn start(responses: Vec<(u16, &str)>) -> Self {
        assert!(!responses.is_empty());
        let responses: Vec<(u16, String)> = responses
            .into_iter()
            .map(|(status, body)| (status, body.to_string()))
            .collect();

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}", listener.local_addr().unwrap());
        let requests = Arc::new(Mutex::new(Vec::new()));
        let log = requests.clone();

        tokio::spawn(async move {
            let mut served = 0;
            while let Ok((mut stream, _)) = listener.accept().await {
                let request = read_request(&mut stream).await;
                log.lock().unwrap().push(request);

                let (status, body) = &responses[served.min(responses.len() - 1)];
                served += 1;
                let reply = format!(
                    "HTTP/1.1 {} Stub\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status,
                    body.len(),
                    body
                );
                let _ = stream.write_all(reply.as_bytes()).await;
                let _ = stream.shutdown().await;
            }
        });

        Self { url, requests }
    }

    /// Raw requests received so far, head and body
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

async fn read_request(stream: &mut TcpStream) -> String {
    let mut data = Vec::new();
    let mut buf = [0u8; 4096];

    loop {
        let n = stream.read(&mut buf).await.unwrap_or(0);
        if n == 0 {
            break;
        }
        data.extend_from_slice(&buf[..n]);

        let Some(end) = data.windows(4).position(|w| w == b"\r\n\r\n") else {
            continue;
        };
        let head = String::from_utf8_lossy(&data[..end]).to_string();
        let length = head
            .lines()
            .filter_map(|line| line.split_once(':'))
            .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
            .and_then(|(_, value)| value.trim().parse::<usize>().ok())
            .unwrap_or(0);
        if data.len() >= end + 4 + length {
            break;
        }
    }

    String::from_utf8_lossy(&data).to_string()
}
