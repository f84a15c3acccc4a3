use serde::{Deserialize, Serialize};

use crate::session::{
    Addon, AppPlatform, AppType, ProvisionStatus, SessionState, SoftwareType, VideoDuration,
    VideoType, WebProjectType,
};

/// Closed INR interval, or the sentinel for work that needs a manual quote.
/// All amounts are whole rupees.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum Estimate {
    Range { min: i64, max: i64 },
    Custom,
}

impl Estimate {
    pub fn describe(&self) -> String {
        match self {
            Self::Range { min, max } if min == max => format_inr(*min),
            Self::Range { min, max } => {
                format!("{} - {}", format_inr(*min), format_inr(*max))
            }
            Self::Custom => "custom quote required".to_string(),
        }
    }
}

// Flat per-video rate for 30-second edits, overriding the per-type table.
const THIRTY_SECOND_RATE: i64 = 1_500;
const THIRTY_SECOND_BULK_RATE: i64 = 1_200;
const BULK_DISCOUNT_THRESHOLD: u32 = 25;

const BOTH_PLATFORMS_MIN_FACTOR: f64 = 1.5;
const BOTH_PLATFORMS_MAX_FACTOR: f64 = 1.8;

/// Static rate card. Immutable, loaded once per process.
#[derive(Clone, Copy, Debug, Default)]
pub struct RateCard;

impl RateCard {
    pub fn web_base(&self, project_type: WebProjectType) -> Estimate {
        let (min, max) = match project_type {
            WebProjectType::Business => (25_000, 60_000),
            WebProjectType::Portfolio => (15_000, 35_000),
            WebProjectType::Ecommerce => (60_000, 150_000),
            WebProjectType::CustomPlatform => (80_000, 200_000),
        };
        Estimate::Range { min, max }
    }

    /// Additive range per selected add-on.
    pub fn addon_cost(&self, addon: Addon) -> (i64, i64) {
        match addon {
            Addon::Seo => (8_000, 25_000),
            Addon::ContentWriting => (5_000, 15_000),
            Addon::Maintenance => (12_000, 12_000),
            Addon::CustomUi => (20_000, 20_000),
        }
    }

    /// Domain + hosting procurement, added when the visitor needs either.
    pub fn domain_hosting_cost(&self) -> (i64, i64) {
        (3_000, 8_000)
    }

    pub fn web_estimate(
        &self,
        project_type: WebProjectType,
        domain_status: Option<ProvisionStatus>,
        hosting_status: Option<ProvisionStatus>,
        addons: impl IntoIterator<Item = Addon>,
    ) -> Estimate {
        let Estimate::Range { mut min, mut max } = self.web_base(project_type) else {
            return Estimate::Custom;
        };

        if domain_status == Some(ProvisionStatus::Need)
            || hosting_status == Some(ProvisionStatus::Need)
        {
            let (add_min, add_max) = self.domain_hosting_cost();
            min += add_min;
            max += add_max;
        }

        for addon in addons {
            let (add_min, add_max) = self.addon_cost(addon);
            min += add_min;
            max += add_max;
        }

        Estimate::Range { min, max }
    }

    pub fn software_estimate(&self, software_type: SoftwareType) -> Estimate {
        match software_type {
            SoftwareType::Erp => Estimate::Range { min: 150_000, max: 500_000 },
            SoftwareType::Crm => Estimate::Range { min: 100_000, max: 300_000 },
            SoftwareType::Inventory => Estimate::Range { min: 80_000, max: 200_000 },
            SoftwareType::CustomSoftware => Estimate::Custom,
        }
    }

    pub fn app_base(&self, app_type: AppType) -> Estimate {
        let (min, max) = match app_type {
            AppType::SimpleApp => (80_000, 150_000),
            AppType::MediumApp => (150_000, 300_000),
            AppType::ComplexApp => (300_000, 800_000),
        };
        Estimate::Range { min, max }
    }

    pub fn app_estimate(&self, app_type: AppType, platform: Option<AppPlatform>) -> Estimate {
        let Estimate::Range { min, max } = self.app_base(app_type) else {
            return Estimate::Custom;
        };

        if platform == Some(AppPlatform::Both) {
            return Estimate::Range {
                min: round_rupees(min as f64 * BOTH_PLATFORMS_MIN_FACTOR),
                max: round_rupees(max as f64 * BOTH_PLATFORMS_MAX_FACTOR),
            };
        }

        Estimate::Range { min, max }
    }

    /// Per-unit range by video type.
    pub fn video_unit(&self, video_type: VideoType) -> (i64, i64) {
        match video_type {
            VideoType::Reels => (800, 2_000),
            VideoType::Promotional => (2_500, 6_000),
            VideoType::Corporate => (4_000, 10_000),
            VideoType::Wedding => (8_000, 20_000),
        }
    }

    pub fn video_estimate(
        &self,
        video_type: VideoType,
        quantity: u32,
        duration: Option<VideoDuration>,
    ) -> Estimate {
        let quantity = quantity.max(1);

        if duration == Some(VideoDuration::ThirtySeconds) {
            let rate = if quantity > BULK_DISCOUNT_THRESHOLD {
                THIRTY_SECOND_BULK_RATE
            } else {
                THIRTY_SECOND_RATE
            };
            let total = rate * i64::from(quantity);
            return Estimate::Range { min: total, max: total };
        }

        let (unit_min, unit_max) = self.video_unit(video_type);
        Estimate::Range {
            min: unit_min * i64::from(quantity),
            max: unit_max * i64::from(quantity),
        }
    }

    /// Estimate for a session whose branch slots are filled. Returns `None`
    /// while the deciding slots are still unset.
    pub fn estimate_for(&self, state: &SessionState) -> Option<Estimate> {
        match state.service? {
            crate::session::ServiceBranch::WebDev => Some(self.web_estimate(
                state.project_type?,
                state.domain_status,
                state.hosting_status,
                state.addons.iter().copied(),
            )),
            crate::session::ServiceBranch::SoftwareDev => {
                Some(self.software_estimate(state.software_type?))
            }
            crate::session::ServiceBranch::AppDev => {
                Some(self.app_estimate(state.app_type?, state.app_platform))
            }
            crate::session::ServiceBranch::VideoEditing => Some(self.video_estimate(
                state.video_type?,
                state.video_quantity?,
                state.video_duration,
            )),
        }
    }
}

fn round_rupees(value: f64) -> i64 {
    value.round() as i64
}

/// Indian digit grouping: last three digits, then pairs (₹1,50,000).
pub fn format_inr(amount: i64) -> String {
    let negative = amount < 0;
    let digits = amount.unsigned_abs().to_string();

    let mut grouped = String::new();
    let len = digits.len();
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 {
            let remaining = len - index;
            if remaining == 3 || (remaining > 3 && (remaining - 3) % 2 == 0) {
                grouped.push(',');
            }
        }
        grouped.push(ch);
    }

    if negative {
        format!("-₹{grouped}")
    } else {
        format!("₹{grouped}")
    }
}

#[cfg(test)]
mod tests {
    use crate::pricing::{format_inr, Estimate, RateCard};
    use crate::session::{
        Addon, AppPlatform, AppType, ProvisionStatus, SoftwareType, VideoDuration, VideoType,
        WebProjectType,
    };

    #[test]
    fn ecommerce_base_range_matches_rate_card() {
        let estimate = RateCard.web_base(WebProjectType::Ecommerce);
        assert_eq!(estimate, Estimate::Range { min: 60_000, max: 150_000 });
    }

    #[test]
    fn web_estimate_sums_selected_addons_onto_base() {
        let estimate = RateCard.web_estimate(
            WebProjectType::Ecommerce,
            Some(ProvisionStatus::Need),
            Some(ProvisionStatus::Have),
            [Addon::Seo, Addon::Maintenance],
        );

        // 60k + 3k + 8k + 12k .. 150k + 8k + 25k + 12k
        assert_eq!(estimate, Estimate::Range { min: 83_000, max: 195_000 });
    }

    #[test]
    fn web_estimate_without_addons_is_base_range() {
        let estimate = RateCard.web_estimate(
            WebProjectType::Portfolio,
            Some(ProvisionStatus::Have),
            Some(ProvisionStatus::Have),
            [],
        );
        assert_eq!(estimate, Estimate::Range { min: 15_000, max: 35_000 });
    }

    #[test]
    fn unsure_domain_and_hosting_add_no_procurement_cost() {
        let estimate = RateCard.web_estimate(
            WebProjectType::Business,
            Some(ProvisionStatus::NotSure),
            Some(ProvisionStatus::NotSure),
            [],
        );
        assert_eq!(estimate, Estimate::Range { min: 25_000, max: 60_000 });
    }

    #[test]
    fn custom_software_yields_custom_sentinel() {
        assert_eq!(RateCard.software_estimate(SoftwareType::CustomSoftware), Estimate::Custom);
        assert_eq!(
            RateCard.software_estimate(SoftwareType::Crm),
            Estimate::Range { min: 100_000, max: 300_000 }
        );
    }

    #[test]
    fn both_platforms_multiply_simple_app_range() {
        let estimate = RateCard.app_estimate(AppType::SimpleApp, Some(AppPlatform::Both));
        assert_eq!(estimate, Estimate::Range { min: 120_000, max: 270_000 });
    }

    #[test]
    fn single_platform_keeps_base_app_range() {
        let estimate = RateCard.app_estimate(AppType::SimpleApp, Some(AppPlatform::Android));
        assert_eq!(estimate, Estimate::Range { min: 80_000, max: 150_000 });
    }

    #[test]
    fn thirty_second_videos_above_bulk_threshold_use_discounted_rate() {
        let estimate =
            RateCard.video_estimate(VideoType::Reels, 30, Some(VideoDuration::ThirtySeconds));
        assert_eq!(estimate, Estimate::Range { min: 36_000, max: 36_000 });
    }

    #[test]
    fn thirty_second_videos_at_or_below_threshold_use_flat_rate() {
        let estimate =
            RateCard.video_estimate(VideoType::Reels, 10, Some(VideoDuration::ThirtySeconds));
        assert_eq!(estimate, Estimate::Range { min: 15_000, max: 15_000 });

        let at_threshold =
            RateCard.video_estimate(VideoType::Reels, 25, Some(VideoDuration::ThirtySeconds));
        assert_eq!(at_threshold, Estimate::Range { min: 37_500, max: 37_500 });
    }

    #[test]
    fn longer_videos_multiply_type_range_by_quantity() {
        let estimate =
            RateCard.video_estimate(VideoType::Promotional, 4, Some(VideoDuration::OneMinute));
        assert_eq!(estimate, Estimate::Range { min: 10_000, max: 24_000 });
    }

    #[test]
    fn inr_formatting_uses_indian_grouping() {
        assert_eq!(format_inr(500), "₹500");
        assert_eq!(format_inr(1_500), "₹1,500");
        assert_eq!(format_inr(36_000), "₹36,000");
        assert_eq!(format_inr(150_000), "₹1,50,000");
        assert_eq!(format_inr(12_345_678), "₹1,23,45,678");
    }

    #[test]
    fn estimate_description_collapses_point_ranges() {
        assert_eq!(Estimate::Range { min: 36_000, max: 36_000 }.describe(), "₹36,000");
        assert_eq!(
            Estimate::Range { min: 60_000, max: 150_000 }.describe(),
            "₹60,000 - ₹1,50,000"
        );
        assert_eq!(Estimate::Custom.describe(), "custom quote required");
    }
}
