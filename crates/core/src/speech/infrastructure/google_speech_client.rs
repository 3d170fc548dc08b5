use std::time::Duration;

use base64::{engine::general_purpose, Engine as _};
use reqwest::blocking::{Client, RequestBuilder};
use serde::de::DeserializeOwned;

use super::wire::{AudioBody, Operation, RecognitionConfigBody, RecognizeBody, RecognizeResponse};
use crate::shared::settings::{Credentials, Settings};
use crate::speech::domain::async_operation::AsyncOperation;
use crate::speech::domain::recognition_result::SyncResult;
use crate::speech::domain::speech_service::{SpeechService, SpeechServiceError, SyncOutcome};
use crate::speech::domain::transcription_request::TranscriptionRequest;

/// Google Cloud Speech `v1beta1` REST client.
///
/// Uses blocking requests: the batch is strictly sequential, so there is
/// nothing to overlap with.
pub struct GoogleSpeechClient {
    client: Client,
    endpoint: String,
    credentials: Option<Credentials>,
}

impl GoogleSpeechClient {
    pub fn new(
        endpoint: &str,
        credentials: Option<Credentials>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(client, endpoint, credentials))
    }

    pub fn from_settings(settings: &Settings) -> Result<Self, reqwest::Error> {
        Self::new(
            &settings.endpoint,
            settings.credentials.clone(),
            settings.request_timeout(),
        )
    }

    pub fn with_client(client: Client, endpoint: &str, credentials: Option<Credentials>) -> Self {
        Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            credentials,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.endpoint, path)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.credentials {
            Some(Credentials::ApiKey(key)) => request.query(&[("key", key)]),
            Some(Credentials::AccessToken(token)) => request.bearer_auth(token),
            None => request,
        }
    }

    fn recognize<T: DeserializeOwned>(
        &self,
        method: &str,
        request: &TranscriptionRequest,
    ) -> Result<T, SpeechServiceError> {
        let body = RecognizeBody {
            config: RecognitionConfigBody {
                encoding: request.encoding().as_str(),
                sample_rate: request.sample_rate_hz(),
                language_code: request.language_code(),
            },
            audio: AudioBody {
                content: general_purpose::STANDARD.encode(request.audio()),
            },
        };
        let builder = self.client.post(self.url(method)).json(&body);
        self.send(builder)
    }

    fn send<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, SpeechServiceError> {
        let response = self.authorize(builder).send().map_err(classify)?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().unwrap_or_default();
            return Err(SpeechServiceError::Rejected(format!("{status}: {text}")));
        }

        let text = response.text().map_err(classify)?;
        serde_json::from_str(&text).map_err(|e| SpeechServiceError::MalformedResponse(e.to_string()))
    }
}

/// Transport failures that never reached the service count as unavailable.
fn classify(e: reqwest::Error) -> SpeechServiceError {
    if e.is_connect() || e.is_timeout() {
        SpeechServiceError::Unavailable(e.to_string())
    } else {
        SpeechServiceError::Rejected(e.to_string())
    }
}

impl SpeechService for GoogleSpeechClient {
    fn submit_sync(&self, request: &TranscriptionRequest) -> SyncOutcome {
        self.recognize::<RecognizeResponse>("speech:syncrecognize", request)
            .map(SyncResult::from)
            .into()
    }

    fn submit_async(
        &self,
        request: &TranscriptionRequest,
    ) -> Result<AsyncOperation, SpeechServiceError> {
        let op: Operation = self.recognize("speech:asyncrecognize", request)?;
        log::debug!("Submitted long-running operation {}", op.name);
        Ok(op.into())
    }

    fn poll_operation(&self, name: &str) -> Result<AsyncOperation, SpeechServiceError> {
        let builder = self.client.get(self.url(&format!("operations/{name}")));
        let op: Operation = self.send(builder)?;
        Ok(op.into())
    }
}
