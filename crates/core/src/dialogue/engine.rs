use crate::dialogue::keywords;
use crate::dialogue::prompts;
use crate::dialogue::states::{
    AppStage, ClosedReason, DialogueStage, SoftwareStage, VideoStage, WebStage,
};
use crate::lead::{self, LeadDraft};
use crate::pricing::RateCard;
use crate::session::{ServiceBranch, SessionState};

/// What one processed input produced: bot replies in order, quick replies
/// for the last open question, and, exactly once per session, a completed
/// lead for the delivery pipeline.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EngineOutput {
    pub replies: Vec<String>,
    pub quick_replies: Vec<String>,
    pub lead: Option<LeadDraft>,
}

/// Scripted slot-filling dialogue. One engine per conversation; the caller
/// guarantees inputs arrive one at a time (concurrent input is dropped at
/// the session registry, not queued).
#[derive(Clone, Debug)]
pub struct DialogueEngine {
    state: SessionState,
    stage: DialogueStage,
    rate_card: RateCard,
}

impl Default for DialogueEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl DialogueEngine {
    pub fn new() -> Self {
        Self {
            state: SessionState::new(),
            stage: DialogueStage::ServiceSelection,
            rate_card: RateCard,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn stage(&self) -> DialogueStage {
        self.stage
    }

    /// Opening messages for a fresh session (or after restart).
    pub fn greeting(&mut self) -> EngineOutput {
        self.finish_turn(vec![prompts::GREETING.to_string()], false)
    }

    pub fn process(&mut self, input: &str) -> EngineOutput {
        let raw = input.trim().to_string();
        let normalized = keywords::normalize(input);
        self.state.record_user(raw.clone());

        // Global commands short-circuit branch dispatch entirely.
        if normalized == "restart" {
            self.state.reset();
            self.stage = DialogueStage::ServiceSelection;
            return self.finish_turn(
                vec!["Starting over!".to_string(), prompts::GREETING.to_string()],
                false,
            );
        }
        if normalized == "help" {
            return self.finish_turn(vec![prompts::HELP_TEXT.to_string()], false);
        }

        if self.stage.is_closed() {
            return self.finish_turn(vec![prompts::CLOSED_REMINDER.to_string()], false);
        }

        match self.stage {
            DialogueStage::ServiceSelection => self.handle_service_selection(&normalized),
            DialogueStage::Web(stage) => self.handle_web(stage, &normalized),
            DialogueStage::Software(stage) => self.handle_software(stage, &raw, &normalized),
            DialogueStage::App(stage) => self.handle_app(stage, &raw, &normalized),
            DialogueStage::Video(stage) => self.handle_video(stage, &normalized),
            DialogueStage::Cta => self.handle_cta(&normalized),
            DialogueStage::LeadName => self.handle_lead_name(&raw),
            DialogueStage::LeadEmail => self.handle_lead_email(&raw),
            DialogueStage::LeadPhone => self.handle_lead_phone(&raw, &normalized),
            DialogueStage::Closed(_) => unreachable!("closed stages return above"),
        }
    }

    fn handle_service_selection(&mut self, normalized: &str) -> EngineOutput {
        let Some(branch) = keywords::match_service(normalized) else {
            return self.reprompt();
        };

        self.state.service = Some(branch);
        self.stage = match branch {
            ServiceBranch::WebDev => DialogueStage::Web(WebStage::ProjectType),
            ServiceBranch::SoftwareDev => DialogueStage::Software(SoftwareStage::SoftwareType),
            ServiceBranch::AppDev => DialogueStage::App(AppStage::AppType),
            ServiceBranch::VideoEditing => DialogueStage::Video(VideoStage::VideoType),
        };
        self.finish_turn(vec![format!("{} — great choice!", branch.label())], false)
    }

    fn handle_web(&mut self, stage: WebStage, normalized: &str) -> EngineOutput {
        match stage {
            WebStage::ProjectType => match keywords::match_web_project_type(normalized) {
                Some(value) => {
                    self.state.project_type = Some(value);
                    self.advance(DialogueStage::Web(WebStage::WebsiteType))
                }
                None => self.reprompt(),
            },
            WebStage::WebsiteType => match keywords::match_website_type(normalized) {
                Some(value) => {
                    self.state.website_type = Some(value);
                    self.advance(DialogueStage::Web(WebStage::Pages))
                }
                None => self.reprompt(),
            },
            WebStage::Pages => match keywords::match_page_bucket(normalized) {
                Some(value) => {
                    self.state.pages = Some(value);
                    self.advance(DialogueStage::Web(WebStage::Domain))
                }
                None => self.reprompt(),
            },
            WebStage::Domain => match keywords::match_provision_status(normalized) {
                Some(value) => {
                    self.state.domain_status = Some(value);
                    self.advance(DialogueStage::Web(WebStage::Hosting))
                }
                None => self.reprompt(),
            },
            WebStage::Hosting => match keywords::match_provision_status(normalized) {
                Some(value) => {
                    self.state.hosting_status = Some(value);
                    self.advance(DialogueStage::Web(WebStage::Cms))
                }
                None => self.reprompt(),
            },
            WebStage::Cms => match keywords::match_cms_choice(normalized) {
                Some(value) => {
                    self.state.cms_required = Some(value);
                    self.advance(DialogueStage::Web(WebStage::Addons))
                }
                None => self.reprompt(),
            },
            WebStage::Addons => match keywords::match_addons(normalized) {
                Some(addons) => {
                    self.state.addons = addons;
                    self.state.addons_answered = true;
                    self.advance(DialogueStage::Web(WebStage::Timeline))
                }
                None => self.reprompt(),
            },
            WebStage::Timeline => match keywords::match_timeline(normalized) {
                Some(value) => {
                    self.state.timeline = Some(value);
                    self.finish_branch()
                }
                None => self.reprompt(),
            },
        }
    }

    fn handle_software(&mut self, stage: SoftwareStage, raw: &str, normalized: &str) -> EngineOutput {
        match stage {
            SoftwareStage::SoftwareType => match keywords::match_software_type(normalized) {
                Some(value) => {
                    self.state.software_type = Some(value);
                    self.advance(DialogueStage::Software(SoftwareStage::UserCount))
                }
                None => self.reprompt(),
            },
            SoftwareStage::UserCount => match keywords::match_user_count(normalized) {
                Some(value) => {
                    self.state.user_count = Some(value);
                    self.advance(DialogueStage::Software(SoftwareStage::Features))
                }
                None => self.reprompt(),
            },
            SoftwareStage::Features => {
                if raw.len() < 2 {
                    return self.reprompt();
                }
                self.state.features = Some(raw.to_string());
                self.advance(DialogueStage::Software(SoftwareStage::Timeline))
            }
            SoftwareStage::Timeline => match keywords::match_timeline(normalized) {
                Some(value) => {
                    self.state.timeline = Some(value);
                    self.finish_branch()
                }
                None => self.reprompt(),
            },
        }
    }

    fn handle_app(&mut self, stage: AppStage, raw: &str, normalized: &str) -> EngineOutput {
        match stage {
            AppStage::AppType => match keywords::match_app_type(normalized) {
                Some(value) => {
                    self.state.app_type = Some(value);
                    self.advance(DialogueStage::App(AppStage::Platform))
                }
                None => self.reprompt(),
            },
            AppStage::Platform => match keywords::match_app_platform(normalized) {
                Some(value) => {
                    self.state.app_platform = Some(value);
                    self.advance(DialogueStage::App(AppStage::Features))
                }
                None => self.reprompt(),
            },
            AppStage::Features => {
                if raw.len() < 2 {
                    return self.reprompt();
                }
                self.state.features = Some(raw.to_string());
                self.advance(DialogueStage::App(AppStage::Timeline))
            }
            AppStage::Timeline => match keywords::match_timeline(normalized) {
                Some(value) => {
                    self.state.timeline = Some(value);
                    self.finish_branch()
                }
                None => self.reprompt(),
            },
        }
    }

    fn handle_video(&mut self, stage: VideoStage, normalized: &str) -> EngineOutput {
        match stage {
            VideoStage::VideoType => match keywords::match_video_type(normalized) {
                Some(value) => {
                    self.state.video_type = Some(value);
                    self.advance(DialogueStage::Video(VideoStage::Quantity))
                }
                None => self.reprompt(),
            },
            VideoStage::Quantity => match keywords::match_video_quantity(normalized) {
                Some(value) => {
                    self.state.video_quantity = Some(value);
                    self.advance(DialogueStage::Video(VideoStage::Duration))
                }
                None => self.reprompt(),
            },
            VideoStage::Duration => match keywords::match_video_duration(normalized) {
                Some(value) => {
                    self.state.video_duration = Some(value);
                    self.advance(DialogueStage::Video(VideoStage::Platform))
                }
                None => self.reprompt(),
            },
            VideoStage::Platform => match keywords::match_video_platform(normalized) {
                Some(value) => {
                    self.state.video_platform = Some(value);
                    self.advance(DialogueStage::Video(VideoStage::Budget))
                }
                None => self.reprompt(),
            },
            VideoStage::Budget => match keywords::match_budget(normalized) {
                Some(value) => {
                    self.state.video_budget = Some(value);
                    self.finish_branch()
                }
                None => self.reprompt(),
            },
        }
    }

    fn handle_cta(&mut self, normalized: &str) -> EngineOutput {
        if keywords::is_negative(normalized) {
            self.stage = DialogueStage::Closed(ClosedReason::Declined);
            return self.finish_turn(vec![prompts::DECLINE_CLOSING.to_string()], false);
        }
        if keywords::is_affirmative(normalized) {
            return self.advance(DialogueStage::LeadName);
        }
        self.reprompt()
    }

    fn handle_lead_name(&mut self, raw: &str) -> EngineOutput {
        if raw.len() < 2 {
            return self.finish_turn(vec![prompts::NAME_CORRECTION.to_string()], false);
        }
        self.state.contact.name = Some(raw.to_string());
        self.advance(DialogueStage::LeadEmail)
    }

    fn handle_lead_email(&mut self, raw: &str) -> EngineOutput {
        if !lead::is_valid_email(raw) {
            return self.finish_turn(vec![prompts::EMAIL_CORRECTION.to_string()], false);
        }
        self.state.contact.email = Some(raw.to_lowercase());
        self.advance(DialogueStage::LeadPhone)
    }

    fn handle_lead_phone(&mut self, raw: &str, normalized: &str) -> EngineOutput {
        if normalized == "skip" {
            self.state.contact.phone = None;
        } else if lead::is_valid_phone(raw) {
            self.state.contact.phone = Some(raw.to_string());
        } else {
            return self.finish_turn(vec![prompts::PHONE_CORRECTION.to_string()], false);
        }

        self.stage = DialogueStage::Closed(ClosedReason::LeadCaptured);
        self.finish_turn(vec![prompts::LEAD_THANKS.to_string()], true)
    }

    /// Summary plus CTA once the branch's last slot is filled.
    fn finish_branch(&mut self) -> EngineOutput {
        let estimate = self.rate_card.estimate_for(&self.state);
        let summary = prompts::summary(&self.state, estimate);
        self.stage = DialogueStage::Cta;
        self.finish_turn(vec![summary], false)
    }

    fn advance(&mut self, next: DialogueStage) -> EngineOutput {
        self.stage = next;
        self.finish_turn(Vec::new(), false)
    }

    /// Unmatched input never advances state: re-emit the current question.
    fn reprompt(&mut self) -> EngineOutput {
        self.finish_turn(vec![prompts::FALLBACK_PREFIX.to_string()], false)
    }

    /// Appends the current open question, records bot turns, and builds the
    /// lead draft when capture just completed.
    fn finish_turn(&mut self, mut replies: Vec<String>, capture_lead: bool) -> EngineOutput {
        let mut quick_replies = Vec::new();
        if let Some((question, suggested)) = prompts::question_for(self.stage) {
            replies.push(question.to_string());
            quick_replies = suggested.iter().map(|reply| (*reply).to_string()).collect();
        }

        for reply in &replies {
            self.state.record_bot(reply.clone());
        }

        let lead = if capture_lead { self.build_lead() } else { None };
        EngineOutput { replies, quick_replies, lead }
    }

    fn build_lead(&self) -> Option<LeadDraft> {
        let contact = &self.state.contact;
        Some(LeadDraft {
            name: contact.name.clone()?,
            email: contact.email.clone()?,
            phone: contact.phone.clone(),
            service: self.state.service?,
            requirements: lead::requirements_map(&self.state),
            estimate: self.rate_card.estimate_for(&self.state),
            transcript: self.state.history.clone(),
        })
    }
}
