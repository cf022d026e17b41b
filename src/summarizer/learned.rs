//! Learned summarization behind a fallible capability boundary.
//!
//! # Architecture
//!
//! - [`LearnedModel`]: the contract the pipeline relies on
//! - [`HttpSummarizer`]: binds a hosted summarization model over HTTP
//!   (Hugging Face Inference API request/response shape)
//! - [`RetryModel`]: decorator adding exponential backoff to any model
//! - [`Throttled`]: decorator bounding concurrent inference calls
//!
//! Compose them as `RetryModel<Throttled<HttpSummarizer>>` so an inference
//! slot is held for one attempt at a time, never across a backoff sleep.
//!
//! A model that fails to come up at construction reports `available() == false`
//! and is never retried for the rest of the run.

use crate::config::ModelConfig;
use crate::error::SummarizeError;
use crate::text::{self, MAX_WORDS};
use rand::{Rng, rng};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::{Duration, Instant};
use tokio::sync::Semaphore;
use tokio::time::sleep;
use tracing::{debug, error, info, instrument, warn};

const WARMUP_TEXT: &str = "Hà Nội hôm nay trời nắng nhẹ, nhiệt độ cao nhất khoảng 30 độ. \
Chiều tối có thể có mưa rào rải rác ở một vài nơi.";

/// A summarization model that may be missing or fail per call.
pub trait LearnedModel {
    /// Whether the model came up at construction.
    fn available(&self) -> bool;

    /// Summarize `text` (at most [`MAX_WORDS`] words) within the configured length band.
    async fn summarize(&self, text: &str) -> Result<String, SummarizeError>;
}

/// Length band and decoding options sent with every inference request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerationParams {
    /// Lower bound of the summary length, in tokens.
    pub min_length: usize,
    /// Upper bound of the summary length. Longer output is clipped to this
    /// many words.
    pub max_length: usize,
    /// Beam width for decoding.
    pub num_beams: usize,
    pub length_penalty: f32,
    /// Stop beam search once every beam has finished.
    pub early_stopping: bool,
}

impl From<&ModelConfig> for GenerationParams {
    fn from(config: &ModelConfig) -> Self {
        Self {
            min_length: config.min_length,
            max_length: config.max_length,
            num_beams: config.num_beams,
            length_penalty: config.length_penalty,
            early_stopping: config.early_stopping,
        }
    }
}

#[derive(Serialize)]
struct InferenceRequest<'a> {
    inputs: &'a str,
    parameters: &'a GenerationParams,
    options: InferenceOptions,
}

#[derive(Serialize)]
struct InferenceOptions {
    wait_for_model: bool,
}

#[derive(Deserialize)]
struct InferenceOutput {
    summary_text: String,
}

#[derive(Debug)]
struct Endpoint {
    client: Client,
    url: String,
    token: Option<String>,
}

impl Endpoint {
    async fn infer(&self, text: &str, params: &GenerationParams) -> Result<String, SummarizeError> {
        let body = InferenceRequest {
            inputs: text,
            parameters: params,
            options: InferenceOptions { wait_for_model: true },
        };
        let mut request = self.client.post(&self.url).json(&body);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(SummarizeError::Status(status.as_u16()));
        }

        let outputs: Vec<InferenceOutput> = response.json().await?;
        let summary = outputs
            .into_iter()
            .next()
            .map(|o| o.summary_text)
            .unwrap_or_default();
        let summary = summary.trim();
        if summary.is_empty() {
            return Err(SummarizeError::EmptyOutput);
        }
        if text::word_count(summary) > params.max_length {
            return Ok(text::truncate(summary, params.max_length));
        }
        Ok(summary.to_string())
    }
}

/// Summarization model served over HTTP.
///
/// Requests follow the Hugging Face Inference API shape:
///
/// ```text
/// POST {endpoint}
/// {"inputs": "...", "parameters": {...}, "options": {"wait_for_model": true}}
/// -> [{"summary_text": "..."}]
/// ```
#[derive(Debug)]
pub struct HttpSummarizer {
    endpoint: Option<Endpoint>,
    params: GenerationParams,
}

impl HttpSummarizer {
    /// Bind the configured endpoint, probing it once when `warmup` is set.
    ///
    /// Never fails: a missing endpoint, a client build error or a failed
    /// warm-up leave the summarizer unavailable.
    #[instrument(level = "info", skip_all)]
    pub async fn connect(config: &ModelConfig) -> Self {
        let params = GenerationParams::from(config);
        let Some(url) = config.endpoint.clone() else {
            info!("No summarization endpoint configured");
            return Self { endpoint: None, params };
        };

        let client = match Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
        {
            Ok(client) => client,
            Err(e) => {
                warn!(%url, error = %e, "Failed to build inference client; model disabled for this run");
                return Self { endpoint: None, params };
            }
        };
        let endpoint = Endpoint {
            client,
            url,
            token: config.api_token.clone(),
        };

        if config.warmup {
            let t0 = Instant::now();
            if let Err(e) = endpoint.infer(WARMUP_TEXT, &params).await {
                warn!(url = %endpoint.url, error = %e, "Summarization model failed warm-up; model disabled for this run");
                return Self { endpoint: None, params };
            }
            debug!(elapsed_ms = t0.elapsed().as_millis() as u64, "Warm-up inference succeeded");
        }

        info!(url = %endpoint.url, max_length = params.max_length, "Summarization model ready");
        Self {
            endpoint: Some(endpoint),
            params,
        }
    }
}

impl LearnedModel for HttpSummarizer {
    fn available(&self) -> bool {
        self.endpoint.is_some()
    }

    #[instrument(level = "debug", skip_all)]
    async fn summarize(&self, text: &str) -> Result<String, SummarizeError> {
        debug_assert!(text::word_count(text) <= MAX_WORDS);
        match &self.endpoint {
            Some(endpoint) => endpoint.infer(text, &self.params).await,
            None => Err(SummarizeError::Unavailable),
        }
    }
}

/// Wrapper that adds exponential backoff retry logic to any [`LearnedModel`].
///
/// The delay between retries follows:
/// ```text
/// delay = min(base_delay * 2^(attempt-1), max_delay) + random_jitter(0..250ms)
/// ```
pub struct RetryModel<T> {
    inner: T,
    max_retries: usize,
    base_delay: Duration,
    max_delay: Duration,
}

impl<T> RetryModel<T>
where
    T: LearnedModel,
{
    /// # Arguments
    ///
    /// * `inner` - The model to retry
    /// * `max_retries` - Retries after the first failed attempt
    /// * `base_delay` - Delay before the first retry
    ///
    /// [`SummarizeError::Unavailable`] is returned at once, never retried.
    pub fn new(inner: T, max_retries: usize, base_delay: Duration) -> Self {
        Self {
            inner,
            max_retries,
            base_delay,
            max_delay: Duration::from_secs(10),
        }
    }
}

impl<T> fmt::Debug for RetryModel<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RetryModel")
            .field("max_retries", &self.max_retries)
            .field("base_delay", &self.base_delay)
            .field("max_delay", &self.max_delay)
            .finish()
    }
}

impl<T> LearnedModel for RetryModel<T>
where
    T: LearnedModel,
{
    fn available(&self) -> bool {
        self.inner.available()
    }

    async fn summarize(&self, text: &str) -> Result<String, SummarizeError> {
        let total_t0 = Instant::now();
        let mut attempt = 0usize;

        loop {
            match self.inner.summarize(text).await {
                Ok(summary) => return Ok(summary),
                Err(SummarizeError::Unavailable) => return Err(SummarizeError::Unavailable),
                Err(e) => {
                    attempt += 1;
                    if attempt > self.max_retries {
                        error!(
                            attempt,
                            max = self.max_retries,
                            elapsed_ms_total = total_t0.elapsed().as_millis() as u64,
                            error = %e,
                            "Inference exhausted retries"
                        );
                        return Err(e);
                    }

                    let delay = self
                        .base_delay
                        .saturating_mul(2u32.saturating_pow((attempt - 1) as u32))
                        .min(self.max_delay);
                    let jitter_ms: u64 = rng().random_range(0..=250);
                    let delay = delay + Duration::from_millis(jitter_ms);

                    warn!(
                        attempt,
                        max = self.max_retries,
                        ?delay,
                        error = %e,
                        "Inference attempt failed; backing off"
                    );
                    sleep(delay).await;
                }
            }
        }
    }
}

/// Wrapper that lets at most `slots` calls into the inner model at once.
///
/// A model that cannot serve concurrent inference gets one slot; callers
/// beyond that wait their turn while everything else keeps running.
pub struct Throttled<T> {
    inner: T,
    slots: Semaphore,
}

impl<T> Throttled<T>
where
    T: LearnedModel,
{
    /// # Arguments
    ///
    /// * `inner` - The model to guard
    /// * `slots` - Maximum number of concurrent calls into `inner`
    pub fn new(inner: T, slots: usize) -> Self {
        Self {
            inner,
            slots: Semaphore::new(slots),
        }
    }
}

impl<T> LearnedModel for Throttled<T>
where
    T: LearnedModel,
{
    fn available(&self) -> bool {
        self.inner.available()
    }

    async fn summarize(&self, text: &str) -> Result<String, SummarizeError> {
        let _permit = self
            .slots
            .acquire()
            .await
            .map_err(|_| SummarizeError::SlotClosed)?;
        self.inner.summarize(text).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn model_config(endpoint: Option<String>) -> ModelConfig {
        ModelConfig {
            endpoint,
            warmup: false,
            ..ModelConfig::default()
        }
    }

    #[tokio::test]
    async fn test_no_endpoint_is_unavailable() {
        let model = HttpSummarizer::connect(&model_config(None)).await;
        assert!(!model.available());
        assert!(matches!(
            model.summarize("Câu.").await,
            Err(SummarizeError::Unavailable)
        ));
    }

    #[tokio::test]
    async fn test_failed_warmup_disables_model() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/summarize"))
            .respond_with(ResponseTemplate::new(503))
            .expect(1)
            .mount(&server)
            .await;

        let mut config = model_config(Some(format!("{}/summarize", server.uri())));
        config.warmup = true;
        let model = HttpSummarizer::connect(&config).await;
        assert!(!model.available());
    }

    #[tokio::test]
    async fn test_summarize_sends_generation_params() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/summarize"))
            .and(header("authorization", "Bearer secret"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!([{ "summary_text": " Giá xăng giảm mạnh. " }])),
            )
            .mount(&server)
            .await;

        let mut config = model_config(Some(format!("{}/summarize", server.uri())));
        config.api_token = Some("secret".to_string());
        let model = HttpSummarizer::connect(&config).await;
        assert!(model.available());

        let summary = model.summarize("Giá xăng giảm mạnh từ chiều nay.").await.unwrap();
        assert_eq!(summary, "Giá xăng giảm mạnh.");

        let requests = server.received_requests().await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
        assert_eq!(body["inputs"], "Giá xăng giảm mạnh từ chiều nay.");
        assert_eq!(body["parameters"]["max_length"], 130);
        assert_eq!(body["parameters"]["min_length"], 30);
        assert_eq!(body["parameters"]["num_beams"], 2);
        assert_eq!(body["parameters"]["early_stopping"], true);
    }

    #[tokio::test]
    async fn test_output_clipped_to_max_length() {
        let server = MockServer::start().await;
        let long = (0..40).map(|i| format!("từ{i}")).collect::<Vec<_>>().join(" ");
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([{ "summary_text": long }])))
            .mount(&server)
            .await;

        let mut config = model_config(Some(server.uri()));
        config.min_length = 5;
        config.max_length = 10;
        let model = HttpSummarizer::connect(&config).await;
        let summary = model.summarize("Đầu vào.").await.unwrap();
        assert_eq!(text::word_count(&summary), 10);
        assert!(summary.ends_with("từ9"));
    }

    #[tokio::test]
    async fn test_empty_output_is_failure() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .mount(&server)
            .await;

        let model = HttpSummarizer::connect(&model_config(Some(server.uri()))).await;
        assert!(matches!(
            model.summarize("Đầu vào.").await,
            Err(SummarizeError::EmptyOutput)
        ));
    }

    struct FlakyModel {
        failures_left: AtomicUsize,
        calls: AtomicUsize,
    }

    impl LearnedModel for FlakyModel {
        fn available(&self) -> bool {
            true
        }

        async fn summarize(&self, text: &str) -> Result<String, SummarizeError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let left = self.failures_left.load(Ordering::SeqCst);
            if left > 0 {
                self.failures_left.store(left - 1, Ordering::SeqCst);
                return Err(SummarizeError::Status(503));
            }
            Ok(format!("ok: {text}"))
        }
    }

    #[tokio::test]
    async fn test_retry_recovers_from_transient_failure() {
        let flaky = FlakyModel {
            failures_left: AtomicUsize::new(2),
            calls: AtomicUsize::new(0),
        };
        let model = RetryModel::new(flaky, 2, Duration::from_millis(1));
        assert_eq!(model.summarize("x").await.unwrap(), "ok: x");
        assert_eq!(model.inner.calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_retry_gives_up() {
        let flaky = FlakyModel {
            failures_left: AtomicUsize::new(5),
            calls: AtomicUsize::new(0),
        };
        let model = RetryModel::new(flaky, 1, Duration::from_millis(1));
        assert!(matches!(
            model.summarize("x").await,
            Err(SummarizeError::Status(503))
        ));
        assert_eq!(model.inner.calls.load(Ordering::SeqCst), 2);
    }

    /// Fails instantly for text containing `FAIL`.
    struct InstantModel;

    impl LearnedModel for InstantModel {
        fn available(&self) -> bool {
            true
        }

        async fn summarize(&self, text: &str) -> Result<String, SummarizeError> {
            if text.contains("FAIL") {
                return Err(SummarizeError::Status(503));
            }
            Ok(format!("ok: {text}"))
        }
    }

    #[tokio::test]
    async fn test_slot_released_during_backoff() {
        let model = RetryModel::new(Throttled::new(InstantModel, 1), 2, Duration::from_millis(300));

        let failing = model.summarize("FAIL");
        let healthy = async {
            let t0 = Instant::now();
            let result = model.summarize("Tin").await;
            (result, t0.elapsed())
        };
        let (failed, (result, elapsed)) = tokio::join!(failing, healthy);

        assert!(failed.is_err());
        assert_eq!(result.unwrap(), "ok: Tin");
        assert!(elapsed < Duration::from_millis(200), "waited {elapsed:?}");
    }

    #[tokio::test]
    async fn test_throttled_delegates_availability() {
        let model = Throttled::new(
            HttpSummarizer::connect(&model_config(None)).await,
            1,
        );
        assert!(!model.available());
        assert!(matches!(
            model.summarize("Câu.").await,
            Err(SummarizeError::Unavailable)
        ));
    }
}
