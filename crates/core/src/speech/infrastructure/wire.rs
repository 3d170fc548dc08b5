//! JSON shapes of the `v1beta1` REST API.

use serde::{Deserialize, Serialize};

use crate::speech::domain::async_operation::{AsyncOperation, OperationError};
use crate::speech::domain::recognition_result::{Alternative, ResultSegment, SyncResult};

#[derive(Serialize, Debug)]
pub struct RecognizeBody<'a> {
    pub config: RecognitionConfigBody<'a>,
    pub audio: AudioBody,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct RecognitionConfigBody<'a> {
    pub encoding: &'static str,
    pub sample_rate: u32,
    pub language_code: &'a str,
}

#[derive(Serialize, Debug)]
pub struct AudioBody {
    pub content: String,
}

#[derive(Deserialize, Debug, Default)]
pub struct RecognizeResponse {
    #[serde(default)]
    pub results: Vec<SpeechRecognitionResult>,
}

#[derive(Deserialize, Debug)]
pub struct SpeechRecognitionResult {
    #[serde(default)]
    pub alternatives: Vec<SpeechRecognitionAlternative>,
}

#[derive(Deserialize, Debug)]
pub struct SpeechRecognitionAlternative {
    #[serde(default)]
    pub transcript: String,
    #[serde(default)]
    pub confidence: f32,
}

#[derive(Deserialize, Debug)]
pub struct Operation {
    pub name: String,
    #[serde(default)]
    pub done: bool,
    pub response: Option<RecognizeResponse>,
    pub error: Option<Status>,
}

#[derive(Deserialize, Debug)]
pub struct Status {
    #[serde(default)]
    pub code: i32,
    #[serde(default)]
    pub message: String,
}

impl From<RecognizeResponse> for SyncResult {
    fn from(response: RecognizeResponse) -> Self {
        let segments = response
            .results
            .into_iter()
            .map(|r| {
                ResultSegment::new(
                    r.alternatives
                        .into_iter()
                        .map(|a| Alternative {
                            transcript: a.transcript,
                            confidence: a.confidence,
                        })
                        .collect(),
                )
            })
            .collect();
        SyncResult::new(segments)
    }
}

impl From<Operation> for AsyncOperation {
    fn from(op: Operation) -> Self {
        AsyncOperation {
            name: op.name,
            done: op.done,
            result: op.response.map(SyncResult::from),
            error: op.error.map(|s| OperationError {
                code: s.code,
                message: s.message,
            }),
        }
    }
}
