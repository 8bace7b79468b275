#![forbid(unsafe_code)]

use glentrail_model::{Difficulty, Region, RegionId, Walk};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;

pub mod achievements;
pub mod activity;

pub const CRATE_NAME: &str = "glentrail-query";

pub const DEFAULT_PAGE_LIMIT: usize = 50;

/// Catalog filter. All populated criteria must hold for a walk to pass;
/// empty lists and `None` bounds mean "no constraint". Unpublished walks
/// never pass regardless of criteria.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct WalkFilter {
    pub search: Option<String>,
    pub difficulties: Vec<Difficulty>,
    /// Region slugs; any match admits the walk.
    pub regions: Vec<String>,
    pub min_distance_km: Option<f64>,
    pub max_distance_km: Option<f64>,
    pub min_duration_hours: Option<f64>,
    pub max_duration_hours: Option<f64>,
    /// Tag terms; any match admits the walk (OR semantics).
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    #[default]
    Popularity,
    Rating,
    Distance,
    Difficulty,
    Name,
    Recent,
}

impl SortKey {
    pub fn parse(raw: &str) -> Result<Self, PipelineError> {
        match raw.to_ascii_lowercase().as_str() {
            "popularity" => Ok(Self::Popularity),
            "rating" => Ok(Self::Rating),
            "distance" => Ok(Self::Distance),
            "difficulty" => Ok(Self::Difficulty),
            "name" => Ok(Self::Name),
            "recent" => Ok(Self::Recent),
            other => Err(PipelineError(format!(
                "unknown sort key '{other}'; expected one of popularity, rating, distance, difficulty, name, recent"
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Page {
    pub limit: usize,
    pub offset: usize,
}

impl Default for Page {
    fn default() -> Self {
        Self {
            limit: DEFAULT_PAGE_LIMIT,
            offset: 0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PipelineLimits {
    pub max_limit: usize,
    pub max_search_len: usize,
    pub max_tag_terms: usize,
}

impl Default for PipelineLimits {
    fn default() -> Self {
        Self {
            max_limit: 200,
            max_search_len: 200,
            max_tag_terms: 16,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WalkQueryRequest {
    pub filter: WalkFilter,
    pub sort: SortKey,
    pub page: Page,
}

impl Default for WalkQueryRequest {
    fn default() -> Self {
        Self {
            filter: WalkFilter::default(),
            sort: SortKey::default(),
            page: Page::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WalkQueryResponse {
    pub items: Vec<Walk>,
    /// Matches before paging was applied.
    pub total: usize,
    pub limit: usize,
    pub offset: usize,
}

#[derive(Debug)]
pub struct PipelineError(pub String);

impl std::fmt::Display for PipelineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
impl std::error::Error for PipelineError {}

pub fn validate_request(
    req: &WalkQueryRequest,
    limits: &PipelineLimits,
) -> Result<(), PipelineError> {
    if req.page.limit == 0 || req.page.limit > limits.max_limit {
        return Err(PipelineError(format!(
            "limit must be between 1 and {}",
            limits.max_limit
        )));
    }
    if let Some(search) = &req.filter.search {
        if search.len() > limits.max_search_len {
            return Err(PipelineError(format!(
                "search length exceeds {}",
                limits.max_search_len
            )));
        }
    }
    if req.filter.tags.len() > limits.max_tag_terms {
        return Err(PipelineError(format!(
            "tag filter exceeds {} terms",
            limits.max_tag_terms
        )));
    }
    for bound in [
        req.filter.min_distance_km,
        req.filter.max_distance_km,
        req.filter.min_duration_hours,
        req.filter.max_duration_hours,
    ]
    .into_iter()
    .flatten()
    {
        if !bound.is_finite() || bound < 0.0 {
            return Err(PipelineError(
                "range bounds must be non-negative numbers".to_string(),
            ));
        }
    }
    Ok(())
}

/// Runs the full read pipeline: validate, filter, sort, page. The input
/// collections are never mutated; the response owns copies of the matches.
pub fn run_query(
    walks: &[Walk],
    regions: &[Region],
    req: &WalkQueryRequest,
    limits: &PipelineLimits,
) -> Result<WalkQueryResponse, PipelineError> {
    validate_request(req, limits)?;
    let matched = filter_and_sort(walks, regions, &req.filter, req.sort);
    let total = matched.len();
    let items = matched
        .into_iter()
        .skip(req.page.offset)
        .take(req.page.limit)
        .collect();
    Ok(WalkQueryResponse {
        items,
        total,
        limit: req.page.limit,
        offset: req.page.offset,
    })
}

/// Filters and orders without paging. Sorting is stable, so walks that
/// compare equal keep their input order.
#[must_use]
pub fn filter_and_sort(
    walks: &[Walk],
    regions: &[Region],
    filter: &WalkFilter,
    sort: SortKey,
) -> Vec<Walk> {
    let by_id: BTreeMap<RegionId, &Region> = regions.iter().map(|r| (r.id, r)).collect();
    let needle = filter
        .search
        .as_deref()
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty());

    let mut matched: Vec<Walk> = walks
        .iter()
        .filter(|walk| {
            walk_matches(
                walk,
                by_id.get(&walk.region_id).copied(),
                filter,
                needle.as_deref(),
            )
        })
        .cloned()
        .collect();
    matched.sort_by(|a, b| compare(sort, a, b));
    matched
}

#[must_use]
pub fn count_matching(walks: &[Walk], regions: &[Region], filter: &WalkFilter) -> usize {
    let by_id: BTreeMap<RegionId, &Region> = regions.iter().map(|r| (r.id, r)).collect();
    let needle = filter
        .search
        .as_deref()
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty());
    walks
        .iter()
        .filter(|walk| {
            walk_matches(
                walk,
                by_id.get(&walk.region_id).copied(),
                filter,
                needle.as_deref(),
            )
        })
        .count()
}

fn walk_matches(
    walk: &Walk,
    region: Option<&Region>,
    filter: &WalkFilter,
    needle: Option<&str>,
) -> bool {
    if !walk.is_published {
        return false;
    }

    if let Some(needle) = needle {
        let in_title = walk.title.to_lowercase().contains(needle);
        let in_summary = walk.short_description.to_lowercase().contains(needle);
        let in_tags = walk
            .tags
            .iter()
            .any(|tag| tag.to_lowercase().contains(needle));
        let in_region = region
            .map(|r| r.name.to_lowercase().contains(needle))
            .unwrap_or(false);
        if !(in_title || in_summary || in_tags || in_region) {
            return false;
        }
    }

    if !filter.difficulties.is_empty() && !filter.difficulties.contains(&walk.difficulty) {
        return false;
    }

    if !filter.regions.is_empty() {
        let slug_matches = region
            .map(|r| filter.regions.iter().any(|s| s == r.slug.as_str()))
            .unwrap_or(false);
        if !slug_matches {
            return false;
        }
    }

    if let Some(min) = filter.min_distance_km {
        if walk.distance_km < min {
            return false;
        }
    }
    if let Some(max) = filter.max_distance_km {
        if walk.distance_km > max {
            return false;
        }
    }
    if let Some(min) = filter.min_duration_hours {
        if walk.estimated_time_hours < min {
            return false;
        }
    }
    if let Some(max) = filter.max_duration_hours {
        if walk.estimated_time_hours > max {
            return false;
        }
    }

    if !filter.tags.is_empty() {
        let any_tag = walk
            .tags
            .iter()
            .any(|tag| filter.tags.iter().any(|t| tag.eq_ignore_ascii_case(t)));
        if !any_tag {
            return false;
        }
    }

    true
}

fn compare(sort: SortKey, a: &Walk, b: &Walk) -> Ordering {
    match sort {
        SortKey::Popularity => b.view_count.cmp(&a.view_count),
        SortKey::Rating => b.average_rating.total_cmp(&a.average_rating),
        SortKey::Distance => a.distance_km.total_cmp(&b.distance_km),
        SortKey::Difficulty => a.difficulty.ordinal().cmp(&b.difficulty.ordinal()),
        SortKey::Name => a.title.cmp(&b.title),
        // Newest first; walks without a publication instant sink to the end.
        SortKey::Recent => match (a.published_at, b.published_at) {
            (Some(x), Some(y)) => y.cmp(&x),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        },
    }
}
