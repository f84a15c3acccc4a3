use serde::{Deserialize, Serialize};

/// Slot order for the web branch. Stages advance strictly forward; there is
/// no backtracking short of a global restart.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum WebStage {
    ProjectType,
    WebsiteType,
    Pages,
    Domain,
    Hosting,
    Cms,
    Addons,
    Timeline,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SoftwareStage {
    SoftwareType,
    UserCount,
    Features,
    Timeline,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AppStage {
    AppType,
    Platform,
    Features,
    Timeline,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum VideoStage {
    VideoType,
    Quantity,
    Duration,
    Platform,
    Budget,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClosedReason {
    LeadCaptured,
    Declined,
}

/// Full dialogue cursor, one value per session. Each branch carries its own
/// stage enum so a stage is only ever matched against its own branch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DialogueStage {
    ServiceSelection,
    Web(WebStage),
    Software(SoftwareStage),
    App(AppStage),
    Video(VideoStage),
    Cta,
    LeadName,
    LeadEmail,
    LeadPhone,
    Closed(ClosedReason),
}

impl DialogueStage {
    pub fn is_closed(&self) -> bool {
        matches!(self, Self::Closed(_))
    }
}
