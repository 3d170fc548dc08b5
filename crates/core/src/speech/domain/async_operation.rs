use super::recognition_result::SyncResult;

/// Terminal failure reported by a long-running operation.
#[derive(Clone, Debug, PartialEq)]
pub struct OperationError {
    pub code: i32,
    pub message: String,
}

/// Snapshot of a long-running recognition operation.
///
/// `done` flips from false to true once; `result` and `error` are only
/// meaningful after that.
#[derive(Clone, Debug, PartialEq)]
pub struct AsyncOperation {
    pub name: String,
    pub done: bool,
    pub result: Option<SyncResult>,
    pub error: Option<OperationError>,
}

impl AsyncOperation {
    pub fn pending(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            done: false,
            result: None,
            error: None,
        }
    }

    pub fn completed(name: impl Into<String>, result: SyncResult) -> Self {
        Self {
            name: name.into(),
            done: true,
            result: Some(result),
            error: None,
        }
    }

    pub fn failed(name: impl Into<String>, code: i32, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            done: true,
            result: None,
            error: Some(OperationError {
                code,
                message: message.into(),
            }),
        }
    }
}
