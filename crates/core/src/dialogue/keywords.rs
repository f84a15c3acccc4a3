use std::collections::BTreeSet;
use std::sync::OnceLock;

use regex::Regex;

use crate::session::{
    Addon, AppPlatform, AppType, BudgetBucket, CmsChoice, PageBucket, ProvisionStatus,
    ServiceBranch, SoftwareType, Timeline, UserCountBucket, VideoDuration, VideoPlatform,
    VideoType, WebProjectType, WebsiteType,
};

pub fn normalize(input: &str) -> String {
    input.trim().to_lowercase()
}

/// Service selection rules, checked in source order; the first matching
/// rule wins. Numeric quick replies 1-4 map to the same order.
const SERVICE_RULES: &[(&[&str], ServiceBranch)] = &[
    (&["web", "website", "1"], ServiceBranch::WebDev),
    (&["software", "erp", "crm", "2"], ServiceBranch::SoftwareDev),
    (&["app", "android", "ios", "3"], ServiceBranch::AppDev),
    (&["video", "editing", "reel", "4"], ServiceBranch::VideoEditing),
];

pub fn match_service(normalized: &str) -> Option<ServiceBranch> {
    for (keywords, branch) in SERVICE_RULES {
        if keywords.iter().any(|keyword| normalized.contains(keyword)) {
            return Some(*branch);
        }
    }
    None
}

fn digit_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"\d+").unwrap_or_else(|error| panic!("digit pattern must compile: {error}"))
    })
}

/// First run of digits in the input, if any.
pub fn extract_number(normalized: &str) -> Option<u32> {
    digit_pattern().find(normalized)?.as_str().parse().ok()
}

/// Number used for bucketing. Ranges like "8-15" or "5 to 20" resolve to
/// the upper bound, "15+" to the next value up, so quick-reply labels land
/// in the bucket they name.
fn bucket_number(normalized: &str) -> Option<u32> {
    let first = digit_pattern().find(normalized)?;
    let rest = normalized[first.end()..].trim_start();
    if rest.starts_with('+') {
        return first.as_str().parse::<u32>().ok().map(|value| value.saturating_add(1));
    }
    if let Some(upper) = rest.strip_prefix('-').or_else(|| rest.strip_prefix("to ")) {
        if let Some(second) = digit_pattern().find(upper.trim_start()) {
            if second.start() == 0 {
                return second.as_str().parse().ok();
            }
        }
    }
    first.as_str().parse().ok()
}

pub fn match_web_project_type(normalized: &str) -> Option<WebProjectType> {
    if normalized.contains("ecommerce")
        || normalized.contains("e-commerce")
        || normalized.contains("store")
        || normalized.contains("shop")
    {
        Some(WebProjectType::Ecommerce)
    } else if normalized.contains("portfolio") || normalized.contains("personal") {
        Some(WebProjectType::Portfolio)
    } else if normalized.contains("custom") || normalized.contains("platform") {
        Some(WebProjectType::CustomPlatform)
    } else if normalized.contains("business") || normalized.contains("company") {
        Some(WebProjectType::Business)
    } else {
        None
    }
}

pub fn match_website_type(normalized: &str) -> Option<WebsiteType> {
    if normalized.contains("static") {
        Some(WebsiteType::Static)
    } else if normalized.contains("dynamic") {
        Some(WebsiteType::Dynamic)
    } else if normalized.contains("not sure") || normalized.contains("dont know") || normalized.contains("don't know") {
        Some(WebsiteType::NotSure)
    } else {
        None
    }
}

/// Page-count bucket via digit extraction with range fallback.
pub fn match_page_bucket(normalized: &str) -> Option<PageBucket> {
    if let Some(number) = bucket_number(normalized) {
        return Some(match number {
            0..=3 => PageBucket::UpToThree,
            4..=7 => PageBucket::FourToSeven,
            8..=15 => PageBucket::EightToFifteen,
            _ => PageBucket::SixteenPlus,
        });
    }
    if normalized.contains("few") || normalized.contains("small") {
        return Some(PageBucket::UpToThree);
    }
    if normalized.contains("many") || normalized.contains("large") || normalized.contains("lot") {
        return Some(PageBucket::SixteenPlus);
    }
    None
}

pub fn match_provision_status(normalized: &str) -> Option<ProvisionStatus> {
    if normalized.contains("not sure")
        || normalized.contains("dont know")
        || normalized.contains("don't know")
    {
        Some(ProvisionStatus::NotSure)
    } else if normalized.contains("have") || normalized.contains("already") || normalized.contains("yes") {
        Some(ProvisionStatus::Have)
    } else if normalized.contains("need") || normalized.split_whitespace().any(|word| word == "no") {
        Some(ProvisionStatus::Need)
    } else {
        None
    }
}

pub fn match_cms_choice(normalized: &str) -> Option<CmsChoice> {
    if normalized.contains("not sure") {
        Some(CmsChoice::NotSure)
    } else if normalized.contains("yes") || normalized.contains("cms") {
        Some(CmsChoice::Yes)
    } else if normalized.contains("no") {
        Some(CmsChoice::No)
    } else {
        None
    }
}

/// Add-ons accept several selections in one message. `None` means nothing
/// recognizable; an empty set means the visitor explicitly declined.
pub fn match_addons(normalized: &str) -> Option<BTreeSet<Addon>> {
    if normalized.contains("none")
        || normalized.contains("skip")
        || normalized.contains("nothing")
        || normalized == "no"
    {
        return Some(BTreeSet::new());
    }

    let mut addons = BTreeSet::new();
    if normalized.contains("seo") {
        addons.insert(Addon::Seo);
    }
    if normalized.contains("content") || normalized.contains("writing") {
        addons.insert(Addon::ContentWriting);
    }
    if normalized.contains("mainten") || normalized.contains("support") {
        addons.insert(Addon::Maintenance);
    }
    if normalized.contains("ui") || normalized.contains("design") {
        addons.insert(Addon::CustomUi);
    }

    if addons.is_empty() {
        None
    } else {
        Some(addons)
    }
}

pub fn match_timeline(normalized: &str) -> Option<Timeline> {
    if normalized.contains("urgent")
        || normalized.contains("asap")
        || normalized.contains("week")
        || normalized.contains("immediately")
    {
        Some(Timeline::Urgent)
    } else if normalized.contains("month") && normalized.contains("1-3")
        || normalized.contains("2 month")
        || normalized.contains("3 month")
        || normalized.contains("quarter")
    {
        Some(Timeline::OneToThreeMonths)
    } else if normalized.contains("month") {
        Some(Timeline::WithinMonth)
    } else if normalized.contains("flexible")
        || normalized.contains("no rush")
        || normalized.contains("whenever")
    {
        Some(Timeline::Flexible)
    } else {
        None
    }
}

pub fn match_software_type(normalized: &str) -> Option<SoftwareType> {
    if normalized.contains("erp") {
        Some(SoftwareType::Erp)
    } else if normalized.contains("crm") {
        Some(SoftwareType::Crm)
    } else if normalized.contains("inventory") || normalized.contains("stock") {
        Some(SoftwareType::Inventory)
    } else if normalized.contains("custom") || normalized.contains("other") {
        Some(SoftwareType::CustomSoftware)
    } else {
        None
    }
}

/// User-count bucket via digit extraction with range fallback.
pub fn match_user_count(normalized: &str) -> Option<UserCountBucket> {
    if let Some(number) = bucket_number(normalized) {
        return Some(match number {
            0..=5 => UserCountBucket::UpToFive,
            6..=20 => UserCountBucket::FiveToTwenty,
            21..=100 => UserCountBucket::TwentyToHundred,
            _ => UserCountBucket::HundredPlus,
        });
    }
    if normalized.contains("small") || normalized.contains("few") {
        return Some(UserCountBucket::UpToFive);
    }
    if normalized.contains("large") || normalized.contains("many") {
        return Some(UserCountBucket::HundredPlus);
    }
    None
}

pub fn match_app_type(normalized: &str) -> Option<AppType> {
    if normalized.contains("simple") || normalized.contains("basic") {
        Some(AppType::SimpleApp)
    } else if normalized.contains("medium") || normalized.contains("moderate") {
        Some(AppType::MediumApp)
    } else if normalized.contains("complex") || normalized.contains("advanced") {
        Some(AppType::ComplexApp)
    } else {
        None
    }
}

pub fn match_app_platform(normalized: &str) -> Option<AppPlatform> {
    let android = normalized.contains("android");
    let ios = normalized.contains("ios") || normalized.contains("iphone") || normalized.contains("apple");
    match (android, ios) {
        (true, true) => Some(AppPlatform::Both),
        (true, false) => Some(AppPlatform::Android),
        (false, true) => Some(AppPlatform::Ios),
        (false, false) => {
            if normalized.contains("both") {
                Some(AppPlatform::Both)
            } else {
                None
            }
        }
    }
}

pub fn match_video_type(normalized: &str) -> Option<VideoType> {
    if normalized.contains("reel") || normalized.contains("short") {
        Some(VideoType::Reels)
    } else if normalized.contains("promo") || normalized.contains("ad") {
        Some(VideoType::Promotional)
    } else if normalized.contains("corporate") || normalized.contains("company") {
        Some(VideoType::Corporate)
    } else if normalized.contains("wedding") || normalized.contains("event") {
        Some(VideoType::Wedding)
    } else {
        None
    }
}

pub fn match_video_quantity(normalized: &str) -> Option<u32> {
    let quantity = extract_number(normalized)?;
    if quantity == 0 {
        None
    } else {
        Some(quantity)
    }
}

pub fn match_video_duration(normalized: &str) -> Option<VideoDuration> {
    if normalized.contains("30 sec") || normalized.contains("thirty sec") || normalized.contains("30s") {
        Some(VideoDuration::ThirtySeconds)
    } else if normalized.contains("1 min") || normalized.contains("one min") || normalized.contains("60 sec") {
        Some(VideoDuration::OneMinute)
    } else if normalized.contains("long") || normalized.contains("more than") {
        // Checked before "5 min" so "longer than 5 minutes" lands here.
        Some(VideoDuration::LongForm)
    } else if normalized.contains("5 min")
        || normalized.contains("2-5")
        || normalized.contains("few min")
    {
        Some(VideoDuration::UpToFiveMinutes)
    } else {
        None
    }
}

pub fn match_video_platform(normalized: &str) -> Option<VideoPlatform> {
    let instagram = normalized.contains("insta");
    let youtube = normalized.contains("youtube") || normalized.contains("yt");
    match (instagram, youtube) {
        (true, true) => Some(VideoPlatform::Multiple),
        (true, false) => Some(VideoPlatform::Instagram),
        (false, true) => Some(VideoPlatform::Youtube),
        (false, false) => {
            if normalized.contains("multiple")
                || normalized.contains("both")
                || normalized.contains("all")
            {
                Some(VideoPlatform::Multiple)
            } else {
                None
            }
        }
    }
}

pub fn match_budget(normalized: &str) -> Option<BudgetBucket> {
    if normalized.contains("not") && (normalized.contains("sure") || normalized.contains("decided"))
    {
        return Some(BudgetBucket::NotSure);
    }
    if normalized.contains("under") || normalized.contains("less than") || normalized.contains("below") {
        return Some(BudgetBucket::UnderTenThousand);
    }
    if normalized.contains("above") || normalized.contains("more than") || normalized.contains("50k+") {
        return Some(BudgetBucket::AboveFiftyThousand);
    }
    // Amounts like "₹10,000" carry separators that would split the digit run.
    let compact: String = normalized.chars().filter(|ch| *ch != ',').collect();
    if let Some(number) = extract_number(&compact) {
        // Accept "10k"-style shorthand as well as full amounts.
        let rupees = if compact.contains('k') { i64::from(number) * 1_000 } else { i64::from(number) };
        return Some(match rupees {
            amount if amount < 10_000 => BudgetBucket::UnderTenThousand,
            amount if amount <= 50_000 => BudgetBucket::TenToFiftyThousand,
            _ => BudgetBucket::AboveFiftyThousand,
        });
    }
    None
}

pub fn is_affirmative(normalized: &str) -> bool {
    matches!(normalized, "y" | "yes" | "yeah" | "yep" | "sure" | "ok" | "okay")
        || normalized.contains("yes")
        || normalized.contains("let's do it")
        || normalized.contains("lets do it")
        || normalized.contains("sounds good")
}

pub fn is_negative(normalized: &str) -> bool {
    matches!(normalized, "n" | "no" | "nope" | "nah")
        || normalized.contains("not now")
        || normalized.contains("not right now")
        || normalized.contains("later")
        || normalized.contains("no thanks")
}

#[cfg(test)]
mod tests {
    use crate::dialogue::keywords::{
        extract_number, is_affirmative, is_negative, match_addons, match_app_platform,
        match_budget, match_page_bucket, match_provision_status, match_service, match_user_count,
        match_video_duration, normalize,
    };
    use crate::session::{
        Addon, AppPlatform, BudgetBucket, PageBucket, ProvisionStatus, ServiceBranch,
        UserCountBucket, VideoDuration,
    };

    #[test]
    fn service_rules_match_in_source_order() {
        assert_eq!(match_service("web development"), Some(ServiceBranch::WebDev));
        assert_eq!(match_service("software"), Some(ServiceBranch::SoftwareDev));
        assert_eq!(match_service("app"), Some(ServiceBranch::AppDev));
        assert_eq!(match_service("video editing"), Some(ServiceBranch::VideoEditing));
        // "web app" hits the web rule first; order is part of the contract
        assert_eq!(match_service("web app"), Some(ServiceBranch::WebDev));
        assert_eq!(match_service("tell me about marketing"), None);
    }

    #[test]
    fn numeric_quick_replies_map_to_service_order() {
        assert_eq!(match_service("1"), Some(ServiceBranch::WebDev));
        assert_eq!(match_service("2"), Some(ServiceBranch::SoftwareDev));
        assert_eq!(match_service("3"), Some(ServiceBranch::AppDev));
        assert_eq!(match_service("4"), Some(ServiceBranch::VideoEditing));
    }

    #[test]
    fn normalization_strips_case_and_whitespace() {
        assert_eq!(normalize("  Web DEVELOPMENT  "), "web development");
    }

    #[test]
    fn digit_extraction_buckets_page_counts() {
        assert_eq!(match_page_bucket("around 2 pages"), Some(PageBucket::UpToThree));
        assert_eq!(match_page_bucket("maybe 5"), Some(PageBucket::FourToSeven));
        assert_eq!(match_page_bucket("12 pages"), Some(PageBucket::EightToFifteen));
        assert_eq!(match_page_bucket("50"), Some(PageBucket::SixteenPlus));
        assert_eq!(match_page_bucket("a few"), Some(PageBucket::UpToThree));
        assert_eq!(match_page_bucket("no idea"), None);
    }

    #[test]
    fn provision_status_distinguishes_not_sure_from_need() {
        assert_eq!(match_provision_status("not sure"), Some(ProvisionStatus::NotSure));
        assert_eq!(match_provision_status("need one"), Some(ProvisionStatus::Need));
        assert_eq!(match_provision_status("no"), Some(ProvisionStatus::Need));
        assert_eq!(match_provision_status("no, need it"), Some(ProvisionStatus::Need));
        assert_eq!(match_provision_status("already have it"), Some(ProvisionStatus::Have));
    }

    // Every suggested reply must parse to the value its label names.
    #[test]
    fn suggested_replies_round_trip_through_their_matchers() {
        assert_eq!(match_page_bucket(&normalize("1-3 pages")), Some(PageBucket::UpToThree));
        assert_eq!(match_page_bucket(&normalize("4-7 pages")), Some(PageBucket::FourToSeven));
        assert_eq!(match_page_bucket(&normalize("8-15 pages")), Some(PageBucket::EightToFifteen));
        assert_eq!(match_page_bucket(&normalize("15+ pages")), Some(PageBucket::SixteenPlus));

        assert_eq!(match_user_count(&normalize("1-5 users")), Some(UserCountBucket::UpToFive));
        assert_eq!(match_user_count(&normalize("5-20 users")), Some(UserCountBucket::FiveToTwenty));
        assert_eq!(
            match_user_count(&normalize("20-100 users")),
            Some(UserCountBucket::TwentyToHundred)
        );
        assert_eq!(match_user_count(&normalize("100+ users")), Some(UserCountBucket::HundredPlus));

        assert_eq!(
            match_video_duration(&normalize("Longer than 5 minutes")),
            Some(VideoDuration::LongForm)
        );
        assert_eq!(
            match_video_duration(&normalize("2-5 minutes")),
            Some(VideoDuration::UpToFiveMinutes)
        );

        assert_eq!(match_budget(&normalize("Under ₹10,000")), Some(BudgetBucket::UnderTenThousand));
        assert_eq!(
            match_budget(&normalize("₹10,000 - ₹50,000")),
            Some(BudgetBucket::TenToFiftyThousand)
        );
        assert_eq!(
            match_budget(&normalize("Above ₹50,000")),
            Some(BudgetBucket::AboveFiftyThousand)
        );
        assert_eq!(match_budget(&normalize("Not decided yet")), Some(BudgetBucket::NotSure));

        assert_eq!(match_provision_status(&normalize("Not sure")), Some(ProvisionStatus::NotSure));
        assert_eq!(match_provision_status(&normalize("Need one")), Some(ProvisionStatus::Need));
        assert_eq!(
            match_provision_status(&normalize("Already have it")),
            Some(ProvisionStatus::Have)
        );
    }

    #[test]
    fn addons_accept_multiple_selections_in_one_message() {
        let addons = match_addons("seo and content writing please").expect("should match");
        assert!(addons.contains(&Addon::Seo));
        assert!(addons.contains(&Addon::ContentWriting));
        assert_eq!(addons.len(), 2);
    }

    #[test]
    fn addons_none_is_an_explicit_empty_selection() {
        assert_eq!(match_addons("none for now"), Some(Default::default()));
        assert_eq!(match_addons("qwerty"), None);
    }

    #[test]
    fn app_platform_detects_both_from_pair_or_keyword() {
        assert_eq!(match_app_platform("android and ios"), Some(AppPlatform::Both));
        assert_eq!(match_app_platform("both please"), Some(AppPlatform::Both));
        assert_eq!(match_app_platform("just android"), Some(AppPlatform::Android));
        assert_eq!(match_app_platform("windows phone"), None);
    }

    #[test]
    fn duration_vocabulary_covers_thirty_second_phrasings() {
        assert_eq!(match_video_duration("30 seconds each"), Some(VideoDuration::ThirtySeconds));
        assert_eq!(match_video_duration("about 30s"), Some(VideoDuration::ThirtySeconds));
        assert_eq!(match_video_duration("1 minute"), Some(VideoDuration::OneMinute));
    }

    #[test]
    fn extract_number_takes_first_digit_run() {
        assert_eq!(extract_number("around 25 or 30"), Some(25));
        assert_eq!(extract_number("none"), None);
    }

    #[test]
    fn cta_affirmations_and_declines() {
        assert!(is_affirmative("yes"));
        assert!(is_affirmative("sure"));
        assert!(is_negative("not right now"));
        assert!(!is_negative("yes"));
    }
}
