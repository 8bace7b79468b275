// SPDX-License-Identifier: Apache-2.0

use glentrail_model::{
    CompletionInput, Difficulty, LikeTargetType, NewRegion, NewReport, NewUser, NewWalk,
    PeakCategory, Region, RouteType, Slug, User, Walk, WalkId,
};
use glentrail_store::{SeedBatch, SeedRegion, SeedStage, SeedWalk, Store, StoreError};
use rusqlite::Connection;
use tempfile::tempdir;

const DAY_MS: i64 = 86_400_000;
// 2023-11-14T22:13:20Z
const T0: i64 = 1_700_000_000_000;

fn mk_store() -> Store {
    Store::open_in_memory().expect("open in-memory store")
}

fn mk_user(store: &mut Store, external_id: &str) -> User {
    store
        .create_user(&NewUser {
            name: format!("Member {external_id}"),
            external_id: external_id.to_owned(),
            image_url: None,
            subscription_tier: Default::default(),
        })
        .expect("create user")
}

fn mk_region(store: &mut Store, slug: &str) -> Region {
    store
        .create_region(&NewRegion {
            name: format!("Region {slug}"),
            slug: Slug::parse(slug).expect("region slug"),
            description: "Glens, lochs and high ground.".to_owned(),
            image_url: None,
        })
        .expect("create region")
}

fn mk_new_walk(slug: &str, tags: &[&str]) -> NewWalk {
    NewWalk {
        title: format!("Walk {slug}"),
        slug: Slug::parse(slug).expect("walk slug"),
        description: "A long approach, a fine summit and a knee-testing descent.".to_owned(),
        short_description: "A fine day out.".to_owned(),
        distance_km: 17.0,
        ascent_m: 1350,
        difficulty: Difficulty::Strenuous,
        estimated_time_hours: 7.5,
        latitude: 56.79,
        longitude: -5.0,
        max_elevation_m: 1345,
        route_type: RouteType::OutAndBack,
        featured_image_url: String::new(),
        tags: tags.iter().map(|t| (*t).to_owned()).collect(),
        terrain: Some("Stony path, open hillside".to_owned()),
        start_grid_ref: None,
        parking_info: None,
        public_transport: None,
        bog_factor: Some(2),
        detailed_description: None,
        source_url: None,
    }
}

fn mk_published_walk(store: &mut Store, slug: &str, tags: &[&str]) -> (User, Region, Walk) {
    let user = mk_user(store, &format!("auth0|{slug}"));
    let region = mk_region(store, &format!("region-{slug}"));
    let draft = store
        .create_walk(user.id, region.id, &mk_new_walk(slug, tags))
        .expect("create walk");
    let walk = store.publish_walk(draft.id).expect("publish walk");
    (user, region, walk)
}

fn mk_report(walk: WalkId, rating: u8) -> NewReport {
    NewReport {
        walk_id: walk,
        title: "Clear skies on top".to_owned(),
        content: "Dry underfoot all the way, summit to ourselves.".to_owned(),
        rating,
        completed_at: Some(T0),
        weather_conditions: Some("sunny".to_owned()),
        trail_conditions: None,
        difficulty: None,
        actual_time_hours: None,
    }
}

#[test]
fn open_creates_parent_directories_and_schema() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("nested").join("data").join("walks.db");
    let store = Store::open(&path).expect("open file store");
    assert!(path.exists(), "database file must exist");
    assert_eq!(store.schema_version().expect("schema version"), "v1");
    let inspection = store.inspect().expect("inspect");
    assert_eq!(inspection.walks, 0);
    assert_eq!(inspection.users, 0);
}

#[test]
fn create_user_rejects_duplicate_external_id() {
    let mut store = mk_store();
    let user = mk_user(&mut store, "auth0|abc");
    let found = store
        .user_by_external_id("auth0|abc")
        .expect("lookup")
        .expect("user exists");
    assert_eq!(found.id, user.id);

    let err = store
        .create_user(&NewUser {
            name: "Someone Else".to_owned(),
            external_id: "auth0|abc".to_owned(),
            image_url: None,
            subscription_tier: Default::default(),
        })
        .expect_err("duplicate external id");
    assert!(matches!(err, StoreError::Conflict(_)), "got {err:?}");
}

#[test]
fn draft_walks_are_hidden_until_published() {
    let mut store = mk_store();
    let user = mk_user(&mut store, "auth0|writer");
    let region = mk_region(&mut store, "lochaber");
    let draft = store
        .create_walk(user.id, region.id, &mk_new_walk("ben-nevis", &["munro"]))
        .expect("create walk");
    assert!(!draft.is_published);
    assert!(store
        .walk_by_slug_published("ben-nevis")
        .expect("lookup")
        .is_none());
    assert!(store.published_walks().expect("published").is_empty());

    let published = store.publish_walk(draft.id).expect("publish");
    assert!(published.is_published);
    assert!(published.published_at.is_some());
    assert!(store
        .walk_by_slug_published("ben-nevis")
        .expect("lookup")
        .is_some());

    let region = store
        .region_by_id(region.id)
        .expect("region lookup")
        .expect("region exists");
    assert_eq!(region.walk_count, 1);
}

#[test]
fn republishing_a_walk_does_not_double_count() {
    let mut store = mk_store();
    let (_, region, walk) = mk_published_walk(&mut store, "ben-lomond", &["munro"]);
    let again = store.publish_walk(walk.id).expect("republish");
    assert_eq!(again.published_at, walk.published_at);
    let region = store
        .region_by_id(region.id)
        .expect("region lookup")
        .expect("region exists");
    assert_eq!(region.walk_count, 1, "walk_count must stay at one");
}

#[test]
fn create_walk_requires_existing_region_and_fresh_slug() {
    let mut store = mk_store();
    let user = mk_user(&mut store, "auth0|writer");
    let err = store
        .create_walk(
            user.id,
            glentrail_model::RegionId::new(999),
            &mk_new_walk("nowhere", &[]),
        )
        .expect_err("unknown region");
    assert!(
        matches!(err, StoreError::NotFound { entity: "region", .. }),
        "got {err:?}"
    );

    let region = mk_region(&mut store, "trossachs");
    store
        .create_walk(user.id, region.id, &mk_new_walk("ben-aan", &[]))
        .expect("first walk");
    let err = store
        .create_walk(user.id, region.id, &mk_new_walk("ben-aan", &[]))
        .expect_err("duplicate slug");
    assert!(matches!(err, StoreError::Conflict(_)), "got {err:?}");
}

#[test]
fn view_counter_increments_and_ignores_unknown_walks() {
    let mut store = mk_store();
    let (_, _, walk) = mk_published_walk(&mut store, "stac-pollaidh", &[]);
    assert_eq!(
        store.increment_view_count(walk.id).expect("first view"),
        Some(1)
    );
    assert_eq!(
        store.increment_view_count(walk.id).expect("second view"),
        Some(2)
    );
    assert_eq!(
        store
            .increment_view_count(WalkId::new(40_404))
            .expect("unknown walk is a no-op"),
        None
    );
}

#[test]
fn draft_reports_touch_nothing() {
    let mut store = mk_store();
    let (author, _, walk) = mk_published_walk(&mut store, "schiehallion", &["munro"]);
    let report = store
        .create_report(author.id, &mk_report(walk.id, 5))
        .expect("create report");
    assert!(!report.is_published);

    let walk = store
        .walk_by_id(walk.id)
        .expect("walk lookup")
        .expect("walk exists");
    assert_eq!(walk.report_count, 0);
    assert_eq!(walk.average_rating, 0.0);
    assert!(store
        .stats_for_user(author.id)
        .expect("stats lookup")
        .is_none());
    assert!(store
        .reports_for_walk(walk.id, 10)
        .expect("reports")
        .is_empty());
}

#[test]
fn create_report_validates_rating_and_walk() {
    let mut store = mk_store();
    let (author, _, walk) = mk_published_walk(&mut store, "ladhar-bheinn", &[]);
    let err = store
        .create_report(author.id, &mk_report(walk.id, 0))
        .expect_err("rating below band");
    assert!(matches!(err, StoreError::Validation(_)), "got {err:?}");

    let err = store
        .create_report(author.id, &mk_report(WalkId::new(555), 4))
        .expect_err("unknown walk");
    assert!(
        matches!(err, StoreError::NotFound { entity: "walk", .. }),
        "got {err:?}"
    );
}

#[test]
fn publishing_reports_recomputes_walk_rating() {
    let mut store = mk_store();
    let (author, _, walk) = mk_published_walk(&mut store, "an-teallach", &["munro"]);

    let first = store
        .create_report(author.id, &mk_report(walk.id, 4))
        .expect("first report");
    store.publish_report(author.id, first.id).expect("publish first");
    let state = store.walk_by_id(walk.id).expect("lookup").expect("walk");
    assert_eq!(state.report_count, 1);
    assert_eq!(state.average_rating, 4.0);

    let second = store
        .create_report(author.id, &mk_report(walk.id, 5))
        .expect("second report");
    store
        .publish_report(author.id, second.id)
        .expect("publish second");
    let state = store.walk_by_id(walk.id).expect("lookup").expect("walk");
    assert_eq!(state.report_count, 2);
    assert_eq!(state.average_rating, 4.5);

    let third = store
        .create_report(author.id, &mk_report(walk.id, 4))
        .expect("third report");
    store.publish_report(author.id, third.id).expect("publish third");
    let state = store.walk_by_id(walk.id).expect("lookup").expect("walk");
    assert_eq!(state.report_count, 3);
    // 13 / 3 = 4.333..., displayed precision is one decimal.
    assert_eq!(state.average_rating, 4.3);
}

#[test]
fn republishing_a_report_is_a_no_op() {
    let mut store = mk_store();
    let (author, _, walk) = mk_published_walk(&mut store, "beinn-alligin", &[]);
    let report = store
        .create_report(author.id, &mk_report(walk.id, 5))
        .expect("create");
    let published = store.publish_report(author.id, report.id).expect("publish");
    let again = store
        .publish_report(author.id, report.id)
        .expect("republish");
    assert_eq!(again.published_at, published.published_at);

    let state = store.walk_by_id(walk.id).expect("lookup").expect("walk");
    assert_eq!(state.report_count, 1, "aggregates must not double count");
    assert_eq!(state.average_rating, 5.0);
}

#[test]
fn only_the_author_may_publish_a_report() {
    let mut store = mk_store();
    let (author, _, walk) = mk_published_walk(&mut store, "liathach", &[]);
    let intruder = mk_user(&mut store, "auth0|intruder");
    let report = store
        .create_report(author.id, &mk_report(walk.id, 3))
        .expect("create");
    let err = store
        .publish_report(intruder.id, report.id)
        .expect_err("not the author");
    assert!(matches!(err, StoreError::NotAuthorized(_)), "got {err:?}");
    let unchanged = store
        .report_by_id(report.id)
        .expect("lookup")
        .expect("report exists");
    assert!(!unchanged.is_published);
}

#[test]
fn walk_reports_list_published_only_with_authors() {
    let mut store = mk_store();
    let (author, _, walk) = mk_published_walk(&mut store, "buachaille", &[]);
    let first = store
        .create_report(author.id, &mk_report(walk.id, 4))
        .expect("first");
    let second = store
        .create_report(author.id, &mk_report(walk.id, 5))
        .expect("second");
    let _draft = store
        .create_report(author.id, &mk_report(walk.id, 1))
        .expect("draft stays unpublished");
    store.publish_report(author.id, first.id).expect("publish");
    store.publish_report(author.id, second.id).expect("publish");

    let listed = store.reports_for_walk(walk.id, 10).expect("list");
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].report.id, second.id, "newest publication first");
    assert_eq!(listed[0].author.id, author.id);
}

#[test]
fn recent_reports_can_be_narrowed_to_a_region() {
    let mut store = mk_store();
    let (author_a, region_a, walk_a) = mk_published_walk(&mut store, "cairn-gorm", &[]);
    let (author_b, _, walk_b) = mk_published_walk(&mut store, "goat-fell", &[]);

    let report_a = store
        .create_report(author_a.id, &mk_report(walk_a.id, 4))
        .expect("report a");
    store
        .publish_report(author_a.id, report_a.id)
        .expect("publish a");
    let report_b = store
        .create_report(author_b.id, &mk_report(walk_b.id, 5))
        .expect("report b");
    store
        .publish_report(author_b.id, report_b.id)
        .expect("publish b");

    let all = store.recent_reports(None, 10).expect("feed");
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].report.id, report_b.id, "newest first");
    assert_eq!(all[0].walk.id, walk_b.id);

    let narrowed = store
        .recent_reports(Some(region_a.id), 10)
        .expect("narrowed feed");
    assert_eq!(narrowed.len(), 1);
    assert_eq!(narrowed[0].report.id, report_a.id);
    assert_eq!(narrowed[0].region.id, region_a.id);
}

#[test]
fn history_orders_by_outing_date() {
    let mut store = mk_store();
    let (author, _, walk) = mk_published_walk(&mut store, "ben-vorlich", &[]);
    let mut early = mk_report(walk.id, 4);
    early.completed_at = Some(T0 - 10 * DAY_MS);
    let mut late = mk_report(walk.id, 5);
    late.completed_at = Some(T0 - DAY_MS);

    let early = store.create_report(author.id, &early).expect("early");
    let late = store.create_report(author.id, &late).expect("late");
    store.publish_report(author.id, early.id).expect("publish");
    store.publish_report(author.id, late.id).expect("publish");

    let history = store.history_for_user(author.id, 10, 0).expect("history");
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].report.id, late.id, "most recent outing first");
    assert_eq!(history[0].walk.id, walk.id);

    let second_page = store.history_for_user(author.id, 10, 1).expect("offset");
    assert_eq!(second_page.len(), 1);
    assert_eq!(second_page[0].report.id, early.id);
}

#[test]
fn like_toggle_flips_state_and_counter() {
    let mut store = mk_store();
    let (_, _, walk) = mk_published_walk(&mut store, "suilven", &[]);
    let fan = mk_user(&mut store, "auth0|fan");

    let on = store
        .toggle_like(fan.id, LikeTargetType::Walk, walk.id.get())
        .expect("toggle on");
    assert!(on.liked);
    assert_eq!(on.like_count, 1);
    assert!(store
        .user_likes_target(fan.id, LikeTargetType::Walk, walk.id.get())
        .expect("lookup")
        .is_some());
    assert_eq!(
        store
            .like_count(LikeTargetType::Walk, walk.id.get())
            .expect("row count"),
        1
    );

    let off = store
        .toggle_like(fan.id, LikeTargetType::Walk, walk.id.get())
        .expect("toggle off");
    assert!(!off.liked);
    assert_eq!(off.like_count, 0);
    assert!(store
        .user_likes_target(fan.id, LikeTargetType::Walk, walk.id.get())
        .expect("lookup")
        .is_none());
}

#[test]
fn like_toggle_rejects_unknown_targets() {
    let mut store = mk_store();
    let fan = mk_user(&mut store, "auth0|fan");
    let err = store
        .toggle_like(fan.id, LikeTargetType::Report, 777)
        .expect_err("unknown report");
    assert!(
        matches!(err, StoreError::NotFound { entity: "report", .. }),
        "got {err:?}"
    );
}

#[test]
fn likes_for_target_lists_newest_first_with_profiles() {
    let mut store = mk_store();
    let (_, _, walk) = mk_published_walk(&mut store, "cul-mor", &[]);
    let first = mk_user(&mut store, "auth0|first");
    let second = mk_user(&mut store, "auth0|second");
    store
        .toggle_like(first.id, LikeTargetType::Walk, walk.id.get())
        .expect("first like");
    store
        .toggle_like(second.id, LikeTargetType::Walk, walk.id.get())
        .expect("second like");

    let likes = store
        .likes_for_target(LikeTargetType::Walk, walk.id.get(), 10)
        .expect("list likes");
    assert_eq!(likes.len(), 2);
    let names: Vec<&str> = likes.iter().map(|(_, user)| user.name.as_str()).collect();
    assert!(names.contains(&"Member auth0|first"));
    assert!(names.contains(&"Member auth0|second"));
}

#[test]
fn completion_credits_walk_defaults_and_first_badge() {
    let mut store = mk_store();
    let (_, _, walk) = mk_published_walk(&mut store, "ben-more", &["munro", "classic"]);
    let walker = mk_user(&mut store, "auth0|walker");

    let outcome = store
        .log_completion(
            walker.id,
            &CompletionInput {
                walk_id: walk.id,
                completed_at: Some(T0),
                distance_km: None,
                ascent_m: None,
                time_hours: None,
                category: None,
            },
        )
        .expect("log completion");

    assert_eq!(outcome.completion.completed_day, "2023-11-14");
    assert_eq!(outcome.completion.distance_km, walk.distance_km);
    assert_eq!(outcome.completion.ascent_m, walk.ascent_m);
    assert_eq!(outcome.completion.time_hours, walk.estimated_time_hours);
    assert_eq!(outcome.completion.category, Some(PeakCategory::Munro));

    assert_eq!(outcome.stats.total_walks, 1);
    assert_eq!(outcome.stats.total_distance_km, walk.distance_km);
    assert_eq!(outcome.stats.munros_climbed, 1);
    assert_eq!(outcome.stats.last_walk_date, Some(T0));
    assert_eq!(outcome.newly_earned, vec!["first-munro".to_owned()]);

    let stored = store
        .stats_for_user(walker.id)
        .expect("stats lookup")
        .expect("stats row");
    assert_eq!(stored.achievement_badges, vec!["first-munro".to_owned()]);
}

#[test]
fn completion_overrides_replace_walk_figures() {
    let mut store = mk_store();
    let (_, _, walk) = mk_published_walk(&mut store, "beinn-eighe", &["munro"]);
    let walker = mk_user(&mut store, "auth0|walker");

    let outcome = store
        .log_completion(
            walker.id,
            &CompletionInput {
                walk_id: walk.id,
                completed_at: Some(T0),
                distance_km: Some(10.5),
                ascent_m: Some(600),
                time_hours: Some(4.0),
                category: Some(PeakCategory::Donald),
            },
        )
        .expect("log completion");

    assert_eq!(outcome.completion.distance_km, 10.5);
    assert_eq!(outcome.completion.ascent_m, 600);
    assert_eq!(outcome.completion.time_hours, 4.0);
    assert_eq!(outcome.stats.donalds_climbed, 1);
    assert_eq!(outcome.stats.munros_climbed, 0, "override beats walk tags");
    assert!(outcome.newly_earned.is_empty());
}

#[test]
fn same_walk_same_day_is_a_conflict() {
    let mut store = mk_store();
    let (_, region, walk) = mk_published_walk(&mut store, "ben-lawers", &["munro"]);
    let walker = mk_user(&mut store, "auth0|walker");
    let log = |at: i64, id: WalkId| CompletionInput {
        walk_id: id,
        completed_at: Some(at),
        distance_km: None,
        ascent_m: None,
        time_hours: None,
        category: None,
    };

    store
        .log_completion(walker.id, &log(T0, walk.id))
        .expect("first log");
    let err = store
        .log_completion(walker.id, &log(T0 + 3_600_000, walk.id))
        .expect_err("same walk, same UTC day");
    assert!(matches!(err, StoreError::Conflict(_)), "got {err:?}");

    // A different walk on the same day is fine.
    let other_author = mk_user(&mut store, "auth0|other");
    let other = store
        .create_walk(
            other_author.id,
            region.id,
            &mk_new_walk("meall-nan-tarmachan", &["munro"]),
        )
        .expect("second walk");
    let other = store.publish_walk(other.id).expect("publish second");
    store
        .log_completion(walker.id, &log(T0 + 3_600_000, other.id))
        .expect("different walk, same day");

    // The same walk on the next day is fine too.
    store
        .log_completion(walker.id, &log(T0 + DAY_MS, walk.id))
        .expect("same walk, next day");

    let stats = store
        .stats_for_user(walker.id)
        .expect("stats lookup")
        .expect("stats row");
    assert_eq!(stats.total_walks, 3);
    assert_eq!(stats.munros_climbed, 3);
}

#[test]
fn activity_samples_cover_published_reports_since_cutoff() {
    let mut store = mk_store();
    let (author, _, walk) = mk_published_walk(&mut store, "ben-wyvis", &[]);

    let mut old = mk_report(walk.id, 4);
    old.completed_at = Some(T0 - 30 * DAY_MS);
    let mut recent = mk_report(walk.id, 5);
    recent.completed_at = Some(T0 - 2 * DAY_MS);
    recent.actual_time_hours = Some(6.25);

    let old = store.create_report(author.id, &old).expect("old report");
    let recent = store
        .create_report(author.id, &recent)
        .expect("recent report");
    store.publish_report(author.id, old.id).expect("publish old");
    store
        .publish_report(author.id, recent.id)
        .expect("publish recent");
    let _draft = store
        .create_report(author.id, &mk_report(walk.id, 3))
        .expect("draft excluded");

    let samples = store
        .activity_samples(author.id, T0 - 7 * DAY_MS)
        .expect("samples");
    assert_eq!(samples.len(), 1);
    assert_eq!(samples[0].completed_at, T0 - 2 * DAY_MS);
    assert_eq!(samples[0].distance_km, walk.distance_km);
    assert_eq!(samples[0].time_hours, 6.25, "report time beats the estimate");

    let all = store.activity_samples(author.id, 0).expect("all samples");
    assert_eq!(all.len(), 2);
    assert_eq!(
        all[0].completed_at,
        T0 - 30 * DAY_MS,
        "oldest first for charting"
    );
    assert_eq!(
        all[0].time_hours, walk.estimated_time_hours,
        "estimate fills in when the author logged no time"
    );
}

fn mk_seed_batch() -> SeedBatch {
    let stage = |n: u32, text: &str| SeedStage {
        stage_number: n,
        title: None,
        description: text.to_owned(),
        distance_km: Some(2.4),
        duration_minutes: Some(50.0),
        elevation_m: Some(300),
        image_url: None,
        gps: None,
        terrain: None,
        landmarks: vec!["lochan".to_owned()],
        warnings: Vec::new(),
    };
    SeedBatch {
        regions: vec![SeedRegion {
            region: NewRegion {
                name: "Lochaber".to_owned(),
                slug: Slug::parse("lochaber").expect("slug"),
                description: "Fort William and the hills around it.".to_owned(),
                image_url: None,
            },
            popularity_score: 9,
        }],
        users: vec![
            NewUser {
                name: "Seed Author".to_owned(),
                external_id: "seed|author".to_owned(),
                image_url: None,
                subscription_tier: Default::default(),
            },
            NewUser {
                name: "Second Author".to_owned(),
                external_id: "seed|second".to_owned(),
                image_url: None,
                subscription_tier: Default::default(),
            },
        ],
        walks: vec![
            SeedWalk {
                region_slug: Slug::parse("lochaber").expect("slug"),
                author_external_id: None,
                published: true,
                view_count: 250,
                walk: mk_new_walk("ben-nevis-track", &["munro", "classic"]),
                stages: vec![stage(1, "Follow the track from the visitor centre."),
                    stage(2, "Zigzags above the halfway lochan.")],
            },
            SeedWalk {
                region_slug: Slug::parse("lochaber").expect("slug"),
                author_external_id: Some("seed|second".to_owned()),
                published: false,
                view_count: 0,
                walk: mk_new_walk("cow-hill-circuit", &["family"]),
                stages: Vec::new(),
            },
        ],
    }
}

#[test]
fn apply_seed_loads_a_document_atomically() {
    let mut store = mk_store();
    let report = store.apply_seed(&mk_seed_batch()).expect("apply seed");
    assert_eq!(report.regions_created, 1);
    assert_eq!(report.users_created, 2);
    assert_eq!(report.users_existing, 0);
    assert_eq!(report.walks_created, 2);
    assert_eq!(report.stages_created, 2);
    assert_eq!(report.walks_published, 1);

    let region = store
        .region_by_slug("lochaber")
        .expect("lookup")
        .expect("region exists");
    assert_eq!(region.walk_count, 1, "only the published walk counts");
    assert_eq!(region.popularity_score, 9);
    assert_eq!(store.list_regions().expect("directory").len(), 1);

    let walk = store
        .walk_by_slug_published("ben-nevis-track")
        .expect("lookup")
        .expect("published seed walk");
    assert_eq!(walk.view_count, 250);
    assert_eq!(store.stages_for_walk(walk.id).expect("stages").len(), 2);
    assert!(store
        .walk_by_slug_published("cow-hill-circuit")
        .expect("lookup")
        .is_none());

    let author = store
        .user_by_external_id("seed|author")
        .expect("lookup")
        .expect("seed author");
    assert_eq!(walk.author_id, author.id, "first user is the fallback author");

    let audit = store.reconcile(true).expect("reconcile dry run");
    assert!(audit.is_clean(), "seeded counters must match rows: {audit:?}");
}

#[test]
fn apply_seed_reuses_users_and_rejects_slug_collisions() {
    let mut store = mk_store();
    store.apply_seed(&mk_seed_batch()).expect("first batch");

    let mut second = mk_seed_batch();
    second.regions[0].region.slug = Slug::parse("torridon").expect("slug");
    second.regions[0].region.name = "Torridon".to_owned();
    second.users.truncate(1);
    second.walks.clear();
    let report = store.apply_seed(&second).expect("second batch");
    assert_eq!(report.users_created, 0);
    assert_eq!(report.users_existing, 1);

    let err = store
        .apply_seed(&mk_seed_batch())
        .expect_err("region slug already loaded");
    assert!(matches!(err, StoreError::Conflict(_)), "got {err:?}");
}

#[test]
fn apply_seed_rolls_back_on_bad_reference() {
    let mut store = mk_store();
    let mut batch = mk_seed_batch();
    batch.walks[1].region_slug = Slug::parse("missing-region").expect("slug");
    let err = store.apply_seed(&batch).expect_err("unknown region slug");
    assert!(
        matches!(err, StoreError::NotFound { entity: "region", .. }),
        "got {err:?}"
    );
    let inspection = store.inspect().expect("inspect");
    assert_eq!(inspection.regions, 0, "nothing from the batch may persist");
    assert_eq!(inspection.users, 0);
    assert_eq!(inspection.walks, 0);
}

#[test]
fn apply_seed_requires_an_author_for_walks() {
    let mut store = mk_store();
    let mut batch = mk_seed_batch();
    batch.users.clear();
    let err = store.apply_seed(&batch).expect_err("no author available");
    assert!(matches!(err, StoreError::Validation(_)), "got {err:?}");
}

#[test]
fn reconcile_detects_and_repairs_counter_drift() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("walks.db");
    {
        let mut store = Store::open(&path).expect("open");
        let (author, _, walk) = mk_published_walk(&mut store, "ben-nevis", &["munro"]);
        let report = store
            .create_report(author.id, &mk_report(walk.id, 4))
            .expect("report");
        store.publish_report(author.id, report.id).expect("publish");
    }

    // Corrupt the denormalized counters behind the store's back.
    {
        let conn = Connection::open(&path).expect("raw connection");
        conn.execute("UPDATE regions SET walk_count = 7", [])
            .expect("corrupt walk_count");
        conn.execute("UPDATE walks SET average_rating = 2.0, like_count = 3", [])
            .expect("corrupt walk counters");
    }

    let mut store = Store::open(&path).expect("reopen");
    let audit = store.reconcile(true).expect("dry run");
    assert!(!audit.is_clean());
    assert!(!audit.repaired);
    assert_eq!(audit.drifts.len(), 3, "drifts: {:?}", audit.drifts);
    let fields: Vec<&str> = audit.drifts.iter().map(|d| d.field).collect();
    assert!(fields.contains(&"walk_count"));
    assert!(fields.contains(&"average_rating"));
    assert!(fields.contains(&"like_count"));

    // Dry run must not have written anything.
    let region = store
        .region_by_slug("region-ben-nevis")
        .expect("lookup")
        .expect("region");
    assert_eq!(region.walk_count, 7);

    let repaired = store.reconcile(false).expect("repair");
    assert!(repaired.repaired);
    assert_eq!(repaired.drifts.len(), 3);

    let audit = store.reconcile(true).expect("clean after repair");
    assert!(audit.is_clean(), "drifts remain: {:?}", audit.drifts);
    let region = store
        .region_by_slug("region-ben-nevis")
        .expect("lookup")
        .expect("region");
    assert_eq!(region.walk_count, 1);
    let walk = store
        .walk_by_slug_published("ben-nevis")
        .expect("lookup")
        .expect("walk");
    assert_eq!(walk.average_rating, 4.0);
    assert_eq!(walk.like_count, 0);
}

#[test]
fn like_counter_never_goes_below_zero() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("walks.db");
    let walk_id;
    let fan_id;
    {
        let mut store = Store::open(&path).expect("open");
        let (_, _, walk) = mk_published_walk(&mut store, "the-cobbler", &[]);
        let fan = mk_user(&mut store, "auth0|fan");
        store
            .toggle_like(fan.id, LikeTargetType::Walk, walk.id.get())
            .expect("like");
        walk_id = walk.id;
        fan_id = fan.id;
    }
    {
        let conn = Connection::open(&path).expect("raw connection");
        conn.execute("UPDATE walks SET like_count = 0", [])
            .expect("zero the counter");
    }
    let mut store = Store::open(&path).expect("reopen");
    let off = store
        .toggle_like(fan_id, LikeTargetType::Walk, walk_id.get())
        .expect("unlike");
    assert!(!off.liked);
    assert_eq!(off.like_count, 0, "clamped at zero despite drift");
}

#[test]
fn inspect_reports_table_counts() {
    let mut store = mk_store();
    store.apply_seed(&mk_seed_batch()).expect("seed");
    let (author, _, walk) = mk_published_walk(&mut store, "extra-walk", &[]);
    let report = store
        .create_report(author.id, &mk_report(walk.id, 4))
        .expect("report");
    store.publish_report(author.id, report.id).expect("publish");
    store
        .log_completion(
            author.id,
            &CompletionInput {
                walk_id: walk.id,
                completed_at: Some(T0),
                distance_km: None,
                ascent_m: None,
                time_hours: None,
                category: None,
            },
        )
        .expect("completion");

    let inspection = store.inspect().expect("inspect");
    assert_eq!(inspection.schema_version, "v1");
    assert_eq!(inspection.users, 3);
    assert_eq!(inspection.regions, 2);
    assert_eq!(inspection.walks, 3);
    assert_eq!(inspection.published_walks, 2);
    assert_eq!(inspection.stages, 2);
    assert_eq!(inspection.reports, 1);
    assert_eq!(inspection.published_reports, 1);
    assert_eq!(inspection.likes, 0);
    assert_eq!(inspection.completions, 1);
}
