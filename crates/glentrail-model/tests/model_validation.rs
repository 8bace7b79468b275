use glentrail_model::{
    earned_badge_ids, CompletionInput, Difficulty, NewReport, NewWalk, PeakCategory, RouteType,
    Slug, UserId, UserStats, WalkId,
};

fn sample_walk() -> NewWalk {
    NewWalk {
        title: "Ben Nevis Mountain Track".to_string(),
        slug: Slug::parse("ben-nevis-mountain-track").expect("slug"),
        description: "The pony track to the summit of Britain's highest mountain.".to_string(),
        short_description: "The classic route up Ben Nevis.".to_string(),
        distance_km: 17.2,
        ascent_m: 1352,
        difficulty: Difficulty::Strenuous,
        estimated_time_hours: 8.0,
        latitude: 56.7969,
        longitude: -5.0036,
        max_elevation_m: 1345,
        route_type: RouteType::OutAndBack,
        featured_image_url: String::new(),
        tags: vec!["munro".to_string(), "classic".to_string()],
        terrain: None,
        start_grid_ref: Some("NN125729".to_string()),
        parking_info: None,
        public_transport: None,
        bog_factor: Some(2),
        detailed_description: None,
        source_url: None,
    }
}

#[test]
fn slug_accepts_hyphenated_lowercase() {
    assert!(Slug::parse("ben-nevis-mountain-track").is_ok());
    assert!(Slug::parse("glen-coe-3-sisters").is_ok());
}

#[test]
fn slug_rejects_bad_shapes() {
    assert!(Slug::parse("").is_err());
    assert!(Slug::parse("Ben-Nevis").is_err());
    assert!(Slug::parse("ben nevis").is_err());
    assert!(Slug::parse("-leading").is_err());
    assert!(Slug::parse("trailing-").is_err());
    assert!(Slug::parse("double--hyphen").is_err());
    assert!(Slug::parse(&"a".repeat(200)).is_err());
}

#[test]
fn row_ids_reject_non_positive_input() {
    assert!(WalkId::parse("12").is_ok());
    assert!(WalkId::parse("0").is_err());
    assert!(WalkId::parse("-3").is_err());
    assert!(UserId::parse("abc").is_err());
}

#[test]
fn new_walk_validate_accepts_sample() {
    assert!(sample_walk().validate().is_ok());
}

#[test]
fn new_walk_validate_rejects_non_positive_distance() {
    let mut walk = sample_walk();
    walk.distance_km = 0.0;
    assert!(walk.validate().is_err());
    walk.distance_km = -2.0;
    assert!(walk.validate().is_err());
}

#[test]
fn new_walk_validate_rejects_out_of_range_coordinates() {
    let mut walk = sample_walk();
    walk.latitude = 91.0;
    assert!(walk.validate().is_err());
    let mut walk = sample_walk();
    walk.longitude = -200.0;
    assert!(walk.validate().is_err());
}

#[test]
fn new_walk_validate_rejects_bog_factor_out_of_band() {
    let mut walk = sample_walk();
    walk.bog_factor = Some(6);
    assert!(walk.validate().is_err());
    walk.bog_factor = Some(0);
    assert!(walk.validate().is_err());
}

#[test]
fn new_walk_validate_rejects_blank_tag() {
    let mut walk = sample_walk();
    walk.tags.push("  ".to_string());
    assert!(walk.validate().is_err());
}

#[test]
fn new_report_validate_enforces_rating_band() {
    let base = NewReport {
        walk_id: WalkId::new(1),
        title: "A grand day out".to_string(),
        content: "Clear summit views all the way to Skye.".to_string(),
        rating: 5,
        completed_at: None,
        weather_conditions: None,
        trail_conditions: None,
        difficulty: None,
        actual_time_hours: None,
    };
    assert!(base.validate().is_ok());

    let mut low = base.clone();
    low.rating = 0;
    assert!(low.validate().is_err());

    let mut high = base.clone();
    high.rating = 6;
    assert!(high.validate().is_err());
}

#[test]
fn completion_input_rejects_negative_overrides() {
    let mut input = CompletionInput {
        walk_id: WalkId::new(1),
        completed_at: None,
        distance_km: Some(-1.0),
        ascent_m: None,
        time_hours: None,
        category: None,
    };
    assert!(input.validate().is_err());
    input.distance_km = Some(10.0);
    input.ascent_m = Some(-5);
    assert!(input.validate().is_err());
}

#[test]
fn peak_category_from_tags_prefers_munro_over_corbett() {
    let tags = vec!["corbett".to_string(), "munro".to_string()];
    assert_eq!(PeakCategory::from_tags(&tags), Some(PeakCategory::Munro));
}

#[test]
fn peak_category_from_tags_is_case_insensitive() {
    let tags = vec!["Donald".to_string()];
    assert_eq!(PeakCategory::from_tags(&tags), Some(PeakCategory::Donald));
    let tags = vec!["coastal".to_string()];
    assert_eq!(PeakCategory::from_tags(&tags), None);
}

#[test]
fn difficulty_ordinal_orders_easy_to_strenuous() {
    assert!(Difficulty::Easy.ordinal() < Difficulty::Moderate.ordinal());
    assert!(Difficulty::Moderate.ordinal() < Difficulty::Hard.ordinal());
    assert!(Difficulty::Hard.ordinal() < Difficulty::Strenuous.ordinal());
}

#[test]
fn rating_rounds_to_one_decimal() {
    assert_eq!(glentrail_model::round_rating(4.0), 4.0);
    assert_eq!(glentrail_model::round_rating(4.25), 4.3);
    assert_eq!(glentrail_model::round_rating(13.0 / 3.0), 4.3);
    assert_eq!(glentrail_model::round_rating(4.44), 4.4);
}

#[test]
fn earned_badges_follow_thresholds() {
    let mut stats = UserStats::empty(UserId::new(1));
    assert!(earned_badge_ids(&stats).is_empty());

    stats.total_distance_km = 100.0;
    assert_eq!(earned_badge_ids(&stats), vec!["first-century".to_string()]);

    stats.total_distance_km = 512.5;
    stats.munros_climbed = 1;
    let earned = earned_badge_ids(&stats);
    assert!(earned.contains(&"first-century".to_string()));
    assert!(earned.contains(&"distance-warrior".to_string()));
    assert!(earned.contains(&"first-munro".to_string()));
    assert!(!earned.contains(&"highland-wanderer".to_string()));
}

#[test]
fn compleatist_badge_requires_full_round() {
    let mut stats = UserStats::empty(UserId::new(1));
    stats.munros_climbed = 281;
    assert!(!earned_badge_ids(&stats).contains(&"munro-compleatist".to_string()));
    stats.munros_climbed = 282;
    assert!(earned_badge_ids(&stats).contains(&"munro-compleatist".to_string()));
}
