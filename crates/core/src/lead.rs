use std::collections::BTreeMap;
use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::pricing::Estimate;
use crate::session::{ChatTurn, ServiceBranch, SessionState};

fn email_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$")
            .unwrap_or_else(|error| panic!("email pattern must compile: {error}"))
    })
}

fn phone_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^(?:\+?91)?[6-9][0-9]{9}$")
            .unwrap_or_else(|error| panic!("phone pattern must compile: {error}"))
    })
}

pub fn is_valid_email(input: &str) -> bool {
    email_pattern().is_match(input.trim())
}

/// Indian mobile number, `+91` optional, separators ignored.
pub fn is_valid_phone(input: &str) -> bool {
    let compact: String =
        input.chars().filter(|ch| !ch.is_whitespace() && *ch != '-' && *ch != '(' && *ch != ')').collect();
    phone_pattern().is_match(&compact)
}

/// Captured by the dialogue engine once contact capture completes. The
/// delivery layer turns it into a timestamped [`LeadRecord`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LeadDraft {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub service: ServiceBranch,
    pub requirements: BTreeMap<String, String>,
    pub estimate: Option<Estimate>,
    pub transcript: Vec<ChatTurn>,
}

impl LeadDraft {
    pub fn into_record(self, submitted_at: DateTime<Utc>) -> LeadRecord {
        LeadRecord {
            name: self.name,
            email: self.email,
            phone: self.phone,
            service: self.service,
            requirements: self.requirements,
            estimate: self.estimate,
            transcript: self.transcript,
            submitted_at,
        }
    }
}

/// Wire shape POSTed to the lead endpoint and appended to the backup file.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LeadRecord {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub service: ServiceBranch,
    pub requirements: BTreeMap<String, String>,
    pub estimate: Option<Estimate>,
    pub transcript: Vec<ChatTurn>,
    pub submitted_at: DateTime<Utc>,
}

/// Flattens the filled slots of a session into the key-value shape the
/// agency backend expects. Unset slots are omitted.
pub fn requirements_map(state: &SessionState) -> BTreeMap<String, String> {
    let mut map = BTreeMap::new();
    let mut put = |key: &str, value: Option<String>| {
        if let Some(value) = value {
            map.insert(key.to_string(), value);
        }
    };

    put("project_type", state.project_type.map(|v| v.label().to_string()));
    put("website_type", state.website_type.map(|v| v.label().to_string()));
    put("pages", state.pages.map(|v| v.label().to_string()));
    put("domain_status", state.domain_status.map(|v| v.label().to_string()));
    put("hosting_status", state.hosting_status.map(|v| v.label().to_string()));
    put("cms_required", state.cms_required.map(|v| v.label().to_string()));
    let addons = state.addons_answered.then(|| {
        if state.addons.is_empty() {
            "None".to_string()
        } else {
            state.addons.iter().map(|addon| addon.label()).collect::<Vec<_>>().join(", ")
        }
    });
    put("addons", addons);
    put("software_type", state.software_type.map(|v| v.label().to_string()));
    put("user_count", state.user_count.map(|v| v.label().to_string()));
    put("app_type", state.app_type.map(|v| v.label().to_string()));
    put("platform", state.app_platform.map(|v| v.label().to_string()));
    put("video_type", state.video_type.map(|v| v.label().to_string()));
    put("video_quantity", state.video_quantity.map(|v| v.to_string()));
    put("duration", state.video_duration.map(|v| v.label().to_string()));
    put("video_platform", state.video_platform.map(|v| v.label().to_string()));
    put("video_budget", state.video_budget.map(|v| v.label().to_string()));
    put("features", state.features.clone());
    put("timeline", state.timeline.map(|v| v.label().to_string()));

    map
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use crate::lead::{is_valid_email, is_valid_phone, requirements_map, LeadDraft};
    use crate::pricing::Estimate;
    use crate::session::{Addon, ServiceBranch, SessionState, WebProjectType, WebsiteType};

    #[test]
    fn accepts_common_email_shapes() {
        assert!(is_valid_email("asha@example.com"));
        assert!(is_valid_email("  asha.k+leads@agency.co.in "));
    }

    #[test]
    fn rejects_malformed_emails() {
        assert!(!is_valid_email("not-an-email"));
        assert!(!is_valid_email("missing@tld"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("two words@example.com"));
    }

    #[test]
    fn accepts_indian_mobile_numbers_with_and_without_country_code() {
        assert!(is_valid_phone("9876543210"));
        assert!(is_valid_phone("+91 98765 43210"));
        assert!(is_valid_phone("91-9876543210"));
    }

    #[test]
    fn rejects_short_or_landline_style_numbers() {
        assert!(!is_valid_phone("12345"));
        assert!(!is_valid_phone("0112345678"));
        assert!(!is_valid_phone("98765"));
    }

    #[test]
    fn requirements_map_flattens_only_filled_slots() {
        let mut state = SessionState::new();
        state.service = Some(ServiceBranch::WebDev);
        state.project_type = Some(WebProjectType::Ecommerce);
        state.website_type = Some(WebsiteType::Dynamic);
        state.addons.insert(Addon::Seo);
        state.addons_answered = true;

        let map = requirements_map(&state);
        assert_eq!(map.get("project_type").map(String::as_str), Some("E-commerce store"));
        assert_eq!(map.get("website_type").map(String::as_str), Some("Dynamic"));
        assert_eq!(map.get("addons").map(String::as_str), Some("SEO"));
        assert!(!map.contains_key("pages"));
        assert!(!map.contains_key("video_type"));
    }

    #[test]
    fn declined_addons_are_recorded_as_none() {
        let mut state = SessionState::new();
        state.service = Some(ServiceBranch::WebDev);
        state.project_type = Some(WebProjectType::Business);
        state.addons_answered = true;

        let map = requirements_map(&state);
        assert_eq!(map.get("addons").map(String::as_str), Some("None"));
    }

    #[test]
    fn draft_converts_to_timestamped_record() {
        let draft = LeadDraft {
            name: "Asha".to_string(),
            email: "asha@example.com".to_string(),
            phone: None,
            service: ServiceBranch::VideoEditing,
            requirements: Default::default(),
            estimate: Some(Estimate::Range { min: 15_000, max: 15_000 }),
            transcript: Vec::new(),
        };

        let now = Utc::now();
        let record = draft.into_record(now);
        assert_eq!(record.submitted_at, now);
        assert_eq!(record.email, "asha@example.com");
        assert!(record.phone.is_none());
    }
}
