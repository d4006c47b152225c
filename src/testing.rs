//! In-memory collaborators shared by unit tests.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::error::{GenerationError, ProviderError};
use crate::models::{PricePoint, PriceSeries};
use crate::services::{PriceSource, TextGenerator};

/// Serves a canned series and records the requests it receives.
pub struct FakePriceSource {
    points: Vec<PricePoint>,
    fail_with: Option<String>,
    requests: Mutex<Vec<(String, NaiveDate, NaiveDate)>>,
}

impl FakePriceSource {
    /// One close every 30 days starting 2015-01-02.
    pub fn with_closes(closes: &[f64]) -> Self {
        let base = NaiveDate::from_ymd_opt(2015, 1, 2).unwrap();
        let points = closes
            .iter()
            .enumerate()
            .map(|(i, c)| PricePoint::new(base + chrono::Duration::days(i as i64 * 30), *c))
            .collect();
        Self {
            points,
            fail_with: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            fail_with: Some(message.to_string()),
            ..Self::with_closes(&[])
        }
    }

    pub fn requests(&self) -> Vec<(String, NaiveDate, NaiveDate)> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl PriceSource for FakePriceSource {
    async fn fetch_daily_closes(
        &self,
        ticker: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<PriceSeries, ProviderError> {
        self.requests
            .lock()
            .unwrap()
            .push((ticker.to_string(), start, end));
        if let Some(message) = &self.fail_with {
            return Err(ProviderError::Network(message.clone()));
        }
        Ok(PriceSeries::new(ticker, self.points.clone()))
    }
}

/// Echoes the prompt followed by a fixed reply, or fails once called.
pub struct FakeTextGenerator {
    reply: Result<String, String>,
    unavailable: bool,
    prompts: Mutex<Vec<String>>,
}

impl FakeTextGenerator {
    pub fn echoing(reply: &str) -> Self {
        Self {
            reply: Ok(reply.to_string()),
            unavailable: false,
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(error: GenerationError) -> Self {
        let unavailable = error.is_model_unavailable();
        let message = match error {
            GenerationError::ModelUnavailable(m) | GenerationError::Generation(m) => m,
        };
        Self {
            reply: Err(message),
            unavailable,
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextGenerator for FakeTextGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        match &self.reply {
            Ok(reply) => Ok(format!("{}\n\n{}", prompt, reply)),
            Err(message) if self.unavailable => Err(GenerationError::ModelUnavailable(message.clone())),
            Err(message) => Err(GenerationError::Generation(message.clone())),
        }
    }
}

/// Local HTTP server that answers exactly one request with a canned response.
///
/// Returns the base URL and a handle resolving to the raw request text.
pub async fn serve_once(status: &str, body: &str) -> (String, tokio::task::JoinHandle<String>) {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base_url = format!("http://{}", listener.local_addr().unwrap());
    let response = format!(
        "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        body.len(),
        body
    );

    let handle = tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await.unwrap();
        let mut request = Vec::new();
        let mut buf = [0u8; 4096];

        loop {
            let n = stream.read(&mut buf).await.unwrap();
            if n == 0 {
                break;
            }
            request.extend_from_slice(&buf[..n]);
            if request_complete(&request) {
                break;
            }
        }

        stream.write_all(response.as_bytes()).await.unwrap();
        stream.shutdown().await.ok();
        String::from_utf8_lossy(&request).into_owned()
    });

    (base_url, handle)
}

fn request_complete(request: &[u8]) -> bool {
    let text = String::from_utf8_lossy(request);
    let Some(header_end) = text.find("\r\n\r\n") else {
        return false;
    };
    let content_length = text[..header_end]
        .lines()
        .filter_map(|line| line.split_once(':'))
        .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
        .and_then(|(_, value)| value.trim().parse::<usize>().ok())
        .unwrap_or(0);
    request.len() >= header_end + 4 + content_length
}
