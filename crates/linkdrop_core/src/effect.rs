use crate::Source;

/// JSON body posted to a source endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub url: String,
    pub quality: Option<String>,
    pub format: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// GET the liveness endpoint once.
    ProbeHealth { url: String },
    /// POST `submission` to `endpoint` (absolute URL).
    Submit {
        source: Source,
        endpoint: String,
        submission: Submission,
    },
    /// Hand a download URL to the host so it can save the file.
    Navigate { url: String },
}
