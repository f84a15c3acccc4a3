use crate::dialogue::states::{
    AppStage, DialogueStage, SoftwareStage, VideoStage, WebStage,
};
use crate::pricing::Estimate;
use crate::session::SessionState;

pub const GREETING: &str = "Hi! I'm Pixy, the assistant for Pixy Digital. \
    I can put together a quick price estimate for your project.";

pub const SERVICE_QUESTION: &str = "Which service are you looking for?";

pub const SERVICE_QUICK_REPLIES: &[&str] =
    &["Web Development", "Software Development", "App Development", "Video Editing"];

pub const HELP_TEXT: &str = "You can answer with the suggested options or in your own words. \
    Type `restart` at any time to start over, or `help` to see this message again.";

pub const FALLBACK_PREFIX: &str = "Sorry, I didn't catch that.";

pub const DECLINE_CLOSING: &str = "No problem at all! If you change your mind, \
    type `restart` and we can pick this up again.";

pub const CLOSED_REMINDER: &str =
    "This conversation has wrapped up. Type `restart` to start a new estimate.";

pub const LEAD_THANKS: &str = "Thanks! Our team will reach out shortly with a detailed quotation.";

pub const CTA_QUESTION: &str = "Would you like to share your contact details so our team \
    can follow up with a detailed quotation?";

pub const CTA_QUICK_REPLIES: &[&str] = &["Yes, let's do it", "Not right now"];

pub const NAME_QUESTION: &str = "Great! What's your name?";
pub const EMAIL_QUESTION: &str = "And your email address?";
pub const PHONE_QUESTION: &str =
    "Lastly, a phone number we can reach you on? (type `skip` if you'd rather not)";

pub const EMAIL_CORRECTION: &str =
    "That doesn't look like a valid email address. Could you re-check it?";
pub const PHONE_CORRECTION: &str =
    "That doesn't look like a valid phone number. A 10-digit Indian mobile number works best \
     (or type `skip`).";
pub const NAME_CORRECTION: &str = "Could you share your name? A couple of characters is enough.";

/// Prompt text and quick replies for the question a stage is asking.
/// Closed stages have no open question.
pub fn question_for(stage: DialogueStage) -> Option<(&'static str, &'static [&'static str])> {
    let question: (&str, &[&str]) = match stage {
        DialogueStage::ServiceSelection => (SERVICE_QUESTION, SERVICE_QUICK_REPLIES),
        DialogueStage::Web(web) => match web {
            WebStage::ProjectType => (
                "What kind of website do you have in mind?",
                &["Business website", "Portfolio", "E-commerce store", "Custom platform"],
            ),
            WebStage::WebsiteType => (
                "Should it be a static site or a dynamic one?",
                &["Static", "Dynamic", "Not sure"],
            ),
            WebStage::Pages => (
                "Roughly how many pages do you need?",
                &["1-3 pages", "4-7 pages", "8-15 pages", "15+ pages"],
            ),
            WebStage::Domain => (
                "Do you already have a domain name?",
                &["Already have it", "Need one", "Not sure"],
            ),
            WebStage::Hosting => (
                "And hosting — do you have that sorted?",
                &["Already have it", "Need it", "Not sure"],
            ),
            WebStage::Cms => (
                "Will you need a CMS to edit content yourself?",
                &["Yes", "No", "Not sure"],
            ),
            WebStage::Addons => (
                "Any add-ons? You can pick several.",
                &["SEO", "Content writing", "Maintenance", "Custom UI design", "None"],
            ),
            WebStage::Timeline => timeline_question(),
        },
        DialogueStage::Software(software) => match software {
            SoftwareStage::SoftwareType => (
                "What kind of software do you need?",
                &["ERP system", "CRM system", "Inventory management", "Custom software"],
            ),
            SoftwareStage::UserCount => (
                "How many people will use it?",
                &["1-5 users", "5-20 users", "20-100 users", "100+ users"],
            ),
            SoftwareStage::Features => features_question(),
            SoftwareStage::Timeline => timeline_question(),
        },
        DialogueStage::App(app) => match app {
            AppStage::AppType => (
                "How complex is the app you're planning?",
                &["Simple app", "Medium complexity", "Complex app"],
            ),
            AppStage::Platform => {
                ("Which platforms should it run on?", &["Android", "iOS", "Both"])
            }
            AppStage::Features => features_question(),
            AppStage::Timeline => timeline_question(),
        },
        DialogueStage::Video(video) => match video {
            VideoStage::VideoType => (
                "What kind of videos are we editing?",
                &["Reels / shorts", "Promotional videos", "Corporate videos", "Wedding films"],
            ),
            VideoStage::Quantity => ("How many videos do you need?", &[]),
            VideoStage::Duration => (
                "How long is each video, roughly?",
                &["30 seconds", "Around 1 minute", "2-5 minutes", "Longer than 5 minutes"],
            ),
            VideoStage::Platform => (
                "Where will these be published?",
                &["Instagram", "YouTube", "Multiple platforms"],
            ),
            VideoStage::Budget => (
                "Do you have a budget in mind?",
                &["Under ₹10,000", "₹10,000 - ₹50,000", "Above ₹50,000", "Not decided yet"],
            ),
        },
        DialogueStage::Cta => (CTA_QUESTION, CTA_QUICK_REPLIES),
        DialogueStage::LeadName => (NAME_QUESTION, &[]),
        DialogueStage::LeadEmail => (EMAIL_QUESTION, &[]),
        DialogueStage::LeadPhone => (PHONE_QUESTION, &[]),
        DialogueStage::Closed(_) => return None,
    };
    Some(question)
}

fn timeline_question() -> (&'static str, &'static [&'static str]) {
    (
        "When would you like this delivered?",
        &["Urgent (under 2 weeks)", "Within a month", "1-3 months", "Flexible"],
    )
}

fn features_question() -> (&'static str, &'static [&'static str]) {
    ("Briefly, what are the must-have features?", &[])
}

/// Requirement summary shown before the CTA.
pub fn summary(state: &SessionState, estimate: Option<Estimate>) -> String {
    let mut lines = vec!["Here's what I've noted:".to_string()];

    if let Some(service) = state.service {
        lines.push(format!("• Service: {}", service.label()));
    }
    for (key, value) in crate::lead::requirements_map(state) {
        lines.push(format!("• {}: {value}", summary_key(&key)));
    }

    match estimate {
        Some(Estimate::Custom) => lines.push(
            "This one needs a custom quote — our team will work out exact pricing with you."
                .to_string(),
        ),
        Some(range) => lines.push(format!("Estimated cost: {}", range.describe())),
        None => {}
    }

    lines.join("\n")
}

fn summary_key(key: &str) -> String {
    let mut pretty = key.replace('_', " ");
    if let Some(first) = pretty.get_mut(0..1) {
        first.make_ascii_uppercase();
    }
    pretty
}
