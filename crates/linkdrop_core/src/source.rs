/// A link source the controller knows how to submit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Source {
    /// Video-hosting site (YouTube).
    Video,
    /// Social-media site (Twitter).
    Social,
    /// Music-streaming site (Spotify). Placeholder only, never contacts the backend.
    Music,
}

/// Static, per-source submission policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceProfile {
    pub display_name: &'static str,
    pub tab_id: &'static str,
    pub endpoint: &'static str,
    pub default_quality: Option<&'static str>,
    pub default_format: Option<&'static str>,
    pub dispatches_requests: bool,
    /// Extra line appended after a rejected request.
    pub rejection_hint: Option<&'static str>,
}

const VIDEO: SourceProfile = SourceProfile {
    display_name: "YouTube",
    tab_id: "youtube",
    endpoint: "/process-youtube",
    default_quality: Some("best"),
    default_format: Some("mp4"),
    dispatches_requests: true,
    rejection_hint: Some("Is the backend server running? Check the application log for details."),
};

const SOCIAL: SourceProfile = SourceProfile {
    display_name: "Twitter",
    tab_id: "twitter",
    endpoint: "/process-twitter",
    default_quality: None,
    default_format: None,
    dispatches_requests: true,
    rejection_hint: None,
};

const MUSIC: SourceProfile = SourceProfile {
    display_name: "Spotify",
    tab_id: "spotify",
    endpoint: "/process-spotify",
    default_quality: None,
    default_format: None,
    dispatches_requests: false,
    rejection_hint: None,
};

impl Source {
    /// All sources in tab order.
    pub const ALL: [Source; 3] = [Source::Video, Source::Social, Source::Music];

    pub fn profile(self) -> &'static SourceProfile {
        match self {
            Source::Video => &VIDEO,
            Source::Social => &SOCIAL,
            Source::Music => &MUSIC,
        }
    }

    pub fn display_name(self) -> &'static str {
        self.profile().display_name
    }

    pub fn tab_id(self) -> &'static str {
        self.profile().tab_id
    }

    pub fn from_tab_id(tab_id: &str) -> Option<Source> {
        Self::ALL
            .into_iter()
            .find(|source| source.tab_id() == tab_id)
    }
}
