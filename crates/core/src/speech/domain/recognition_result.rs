/// One candidate transcription for a segment.
#[derive(Clone, Debug, PartialEq)]
pub struct Alternative {
    pub transcript: String,
    pub confidence: f32,
}

/// One recognized span of audio, alternatives ranked best first.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ResultSegment {
    pub alternatives: Vec<Alternative>,
}

impl ResultSegment {
    pub fn new(alternatives: Vec<Alternative>) -> Self {
        Self { alternatives }
    }

    pub fn top(&self) -> Option<&Alternative> {
        self.alternatives.first()
    }
}

/// Recognition output, segments in audio order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SyncResult {
    pub segments: Vec<ResultSegment>,
}

impl SyncResult {
    pub fn new(segments: Vec<ResultSegment>) -> Self {
        Self { segments }
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}
