use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Service branch chosen once per session. Selecting a branch fixes the
/// slot order for the rest of the conversation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceBranch {
    WebDev,
    SoftwareDev,
    AppDev,
    VideoEditing,
}

impl ServiceBranch {
    pub fn label(self) -> &'static str {
        match self {
            Self::WebDev => "Web Development",
            Self::SoftwareDev => "Software Development",
            Self::AppDev => "App Development",
            Self::VideoEditing => "Video Editing",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WebProjectType {
    Business,
    Portfolio,
    Ecommerce,
    CustomPlatform,
}

impl WebProjectType {
    pub fn label(self) -> &'static str {
        match self {
            Self::Business => "Business website",
            Self::Portfolio => "Portfolio website",
            Self::Ecommerce => "E-commerce store",
            Self::CustomPlatform => "Custom web platform",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WebsiteType {
    Static,
    Dynamic,
    NotSure,
}

impl WebsiteType {
    pub fn label(self) -> &'static str {
        match self {
            Self::Static => "Static",
            Self::Dynamic => "Dynamic",
            Self::NotSure => "Not sure yet",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageBucket {
    UpToThree,
    FourToSeven,
    EightToFifteen,
    SixteenPlus,
}

impl PageBucket {
    pub fn label(self) -> &'static str {
        match self {
            Self::UpToThree => "1-3 pages",
            Self::FourToSeven => "4-7 pages",
            Self::EightToFifteen => "8-15 pages",
            Self::SixteenPlus => "15+ pages",
        }
    }
}

/// Shared answer shape for "do you already have X?" questions
/// (domain name, hosting).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProvisionStatus {
    Have,
    Need,
    NotSure,
}

impl ProvisionStatus {
    pub fn label(self) -> &'static str {
        match self {
            Self::Have => "Already have it",
            Self::Need => "Need it",
            Self::NotSure => "Not sure",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CmsChoice {
    Yes,
    No,
    NotSure,
}

impl CmsChoice {
    pub fn label(self) -> &'static str {
        match self {
            Self::Yes => "Yes",
            Self::No => "No",
            Self::NotSure => "Not sure",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Addon {
    Seo,
    ContentWriting,
    Maintenance,
    CustomUi,
}

impl Addon {
    pub fn label(self) -> &'static str {
        match self {
            Self::Seo => "SEO",
            Self::ContentWriting => "Content writing",
            Self::Maintenance => "Maintenance",
            Self::CustomUi => "Custom UI design",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Timeline {
    Urgent,
    WithinMonth,
    OneToThreeMonths,
    Flexible,
}

impl Timeline {
    pub fn label(self) -> &'static str {
        match self {
            Self::Urgent => "Urgent (under 2 weeks)",
            Self::WithinMonth => "Within a month",
            Self::OneToThreeMonths => "1-3 months",
            Self::Flexible => "Flexible",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SoftwareType {
    Erp,
    Crm,
    Inventory,
    CustomSoftware,
}

impl SoftwareType {
    pub fn label(self) -> &'static str {
        match self {
            Self::Erp => "ERP system",
            Self::Crm => "CRM system",
            Self::Inventory => "Inventory management",
            Self::CustomSoftware => "Custom software",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserCountBucket {
    UpToFive,
    FiveToTwenty,
    TwentyToHundred,
    HundredPlus,
}

impl UserCountBucket {
    pub fn label(self) -> &'static str {
        match self {
            Self::UpToFive => "1-5 users",
            Self::FiveToTwenty => "5-20 users",
            Self::TwentyToHundred => "20-100 users",
            Self::HundredPlus => "100+ users",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppType {
    SimpleApp,
    MediumApp,
    ComplexApp,
}

impl AppType {
    pub fn label(self) -> &'static str {
        match self {
            Self::SimpleApp => "Simple app",
            Self::MediumApp => "Medium complexity app",
            Self::ComplexApp => "Complex app",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppPlatform {
    Android,
    Ios,
    Both,
}

impl AppPlatform {
    pub fn label(self) -> &'static str {
        match self {
            Self::Android => "Android",
            Self::Ios => "iOS",
            Self::Both => "Android + iOS",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VideoType {
    Reels,
    Promotional,
    Corporate,
    Wedding,
}

impl VideoType {
    pub fn label(self) -> &'static str {
        match self {
            Self::Reels => "Reels / shorts",
            Self::Promotional => "Promotional videos",
            Self::Corporate => "Corporate videos",
            Self::Wedding => "Wedding films",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VideoDuration {
    ThirtySeconds,
    OneMinute,
    UpToFiveMinutes,
    LongForm,
}

impl VideoDuration {
    pub fn label(self) -> &'static str {
        match self {
            Self::ThirtySeconds => "30 seconds",
            Self::OneMinute => "Around 1 minute",
            Self::UpToFiveMinutes => "2-5 minutes",
            Self::LongForm => "Longer than 5 minutes",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VideoPlatform {
    Instagram,
    Youtube,
    Multiple,
}

impl VideoPlatform {
    pub fn label(self) -> &'static str {
        match self {
            Self::Instagram => "Instagram",
            Self::Youtube => "YouTube",
            Self::Multiple => "Multiple platforms",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetBucket {
    UnderTenThousand,
    TenToFiftyThousand,
    AboveFiftyThousand,
    NotSure,
}

impl BudgetBucket {
    pub fn label(self) -> &'static str {
        match self {
            Self::UnderTenThousand => "Under ₹10,000",
            Self::TenToFiftyThousand => "₹10,000 - ₹50,000",
            Self::AboveFiftyThousand => "Above ₹50,000",
            Self::NotSure => "Not decided yet",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatRole {
    Bot,
    User,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: ChatRole,
    pub message: String,
}

/// Contact details captured at the end of the qualification flow. Phone is
/// the only skippable field.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactDetails {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

/// Single mutable record per conversation. Slots fill strictly in the
/// branch-specific order enforced by the dialogue engine; a slot is never
/// revisited within a session except via a global restart.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    pub service: Option<ServiceBranch>,

    // web
    pub project_type: Option<WebProjectType>,
    pub website_type: Option<WebsiteType>,
    pub pages: Option<PageBucket>,
    pub domain_status: Option<ProvisionStatus>,
    pub hosting_status: Option<ProvisionStatus>,
    pub cms_required: Option<CmsChoice>,
    pub addons: BTreeSet<Addon>,
    pub addons_answered: bool,

    // software
    pub software_type: Option<SoftwareType>,
    pub user_count: Option<UserCountBucket>,

    // app
    pub app_type: Option<AppType>,
    pub app_platform: Option<AppPlatform>,

    // video
    pub video_type: Option<VideoType>,
    pub video_quantity: Option<u32>,
    pub video_duration: Option<VideoDuration>,
    pub video_platform: Option<VideoPlatform>,
    pub video_budget: Option<BudgetBucket>,

    // shared tail
    pub features: Option<String>,
    pub timeline: Option<Timeline>,
    pub contact: ContactDetails,

    pub history: Vec<ChatTurn>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Global `restart`: every slot returns to its initial unset value,
    /// including the transcript.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn record_user(&mut self, message: impl Into<String>) {
        self.history.push(ChatTurn { role: ChatRole::User, message: message.into() });
    }

    pub fn record_bot(&mut self, message: impl Into<String>) {
        self.history.push(ChatTurn { role: ChatRole::Bot, message: message.into() });
    }
}
