// SPDX-License-Identifier: Apache-2.0

use crate::ids::{ParseError, RegionId, Slug, UserId, WalkId};
use serde::{Deserialize, Serialize};

pub const TITLE_MAX_LEN: usize = 200;
pub const SHORT_DESCRIPTION_MAX_LEN: usize = 500;
pub const TAG_MAX_LEN: usize = 48;
pub const BOG_FACTOR_MIN: u8 = 1;
pub const BOG_FACTOR_MAX: u8 = 5;

/// Grading used across the Scottish walking guides this catalog mirrors.
/// The ordinal runs from easiest to hardest and drives difficulty sorting.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[non_exhaustive]
pub enum Difficulty {
    Easy,
    Moderate,
    Hard,
    Strenuous,
}

impl Difficulty {
    pub fn parse(raw: &str) -> Result<Self, ParseError> {
        match raw.to_ascii_lowercase().as_str() {
            "easy" => Ok(Self::Easy),
            "moderate" => Ok(Self::Moderate),
            "hard" => Ok(Self::Hard),
            "strenuous" => Ok(Self::Strenuous),
            _ => Err(ParseError::InvalidFormat(
                "difficulty must be one of Easy, Moderate, Hard, Strenuous",
            )),
        }
    }

    #[must_use]
    pub const fn ordinal(self) -> u8 {
        match self {
            Self::Easy => 1,
            Self::Moderate => 2,
            Self::Hard => 3,
            Self::Strenuous => 4,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Easy => "Easy",
            Self::Moderate => "Moderate",
            Self::Hard => "Hard",
            Self::Strenuous => "Strenuous",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum RouteType {
    Circular,
    Linear,
    #[serde(rename = "Out and Back")]
    OutAndBack,
}

impl RouteType {
    pub fn parse(raw: &str) -> Result<Self, ParseError> {
        match raw.to_ascii_lowercase().as_str() {
            "circular" => Ok(Self::Circular),
            "linear" => Ok(Self::Linear),
            "out and back" | "out-and-back" => Ok(Self::OutAndBack),
            _ => Err(ParseError::InvalidFormat(
                "route type must be one of Circular, Linear, Out and Back",
            )),
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Circular => "Circular",
            Self::Linear => "Linear",
            Self::OutAndBack => "Out and Back",
        }
    }
}

/// Hill classifications credited by the completion stats. Categorisation from
/// tags checks munro first, then corbett, then donald.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum PeakCategory {
    Munro,
    Corbett,
    Donald,
}

impl PeakCategory {
    pub fn parse(raw: &str) -> Result<Self, ParseError> {
        match raw.to_ascii_lowercase().as_str() {
            "munro" => Ok(Self::Munro),
            "corbett" => Ok(Self::Corbett),
            "donald" => Ok(Self::Donald),
            _ => Err(ParseError::InvalidFormat(
                "peak category must be one of munro, corbett, donald",
            )),
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Munro => "munro",
            Self::Corbett => "corbett",
            Self::Donald => "donald",
        }
    }

    #[must_use]
    pub fn from_tags(tags: &[String]) -> Option<Self> {
        for category in [Self::Munro, Self::Corbett, Self::Donald] {
            if tags.iter().any(|t| t.eq_ignore_ascii_case(category.as_str())) {
                return Some(category);
            }
        }
        None
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct GpsCoordinate {
    pub lat: f64,
    pub lng: f64,
}

impl GpsCoordinate {
    pub fn validate(&self) -> Result<(), ParseError> {
        if !self.lat.is_finite() || !(-90.0..=90.0).contains(&self.lat) {
            return Err(ParseError::OutOfRange("latitude must be within [-90, 90]"));
        }
        if !self.lng.is_finite() || !(-180.0..=180.0).contains(&self.lng) {
            return Err(ParseError::OutOfRange("longitude must be within [-180, 180]"));
        }
        Ok(())
    }
}

/// A catalog walk. Counter fields (`view_count`, `like_count`, `report_count`,
/// `average_rating`) are denormalized aggregates maintained by the store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Walk {
    pub id: WalkId,
    pub title: String,
    pub slug: Slug,
    pub description: String,
    pub short_description: String,
    pub region_id: RegionId,
    pub author_id: UserId,
    pub distance_km: f64,
    pub ascent_m: i64,
    pub difficulty: Difficulty,
    pub estimated_time_hours: f64,
    pub latitude: f64,
    pub longitude: f64,
    pub max_elevation_m: i64,
    pub route_type: RouteType,
    pub featured_image_url: String,
    pub tags: Vec<String>,
    pub is_published: bool,
    pub published_at: Option<i64>,
    pub view_count: i64,
    pub like_count: i64,
    pub report_count: i64,
    pub average_rating: f64,
    pub terrain: Option<String>,
    pub start_grid_ref: Option<String>,
    pub parking_info: Option<String>,
    pub public_transport: Option<String>,
    pub bog_factor: Option<u8>,
    pub detailed_description: Option<String>,
    pub source_url: Option<String>,
    pub created_at: i64,
}

/// Author-supplied fields for walk creation. Identity, region, publication
/// state and counters are assigned by the store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct NewWalk {
    pub title: String,
    pub slug: Slug,
    pub description: String,
    pub short_description: String,
    pub distance_km: f64,
    pub ascent_m: i64,
    pub difficulty: Difficulty,
    pub estimated_time_hours: f64,
    pub latitude: f64,
    pub longitude: f64,
    pub max_elevation_m: i64,
    pub route_type: RouteType,
    #[serde(default)]
    pub featured_image_url: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub terrain: Option<String>,
    #[serde(default)]
    pub start_grid_ref: Option<String>,
    #[serde(default)]
    pub parking_info: Option<String>,
    #[serde(default)]
    pub public_transport: Option<String>,
    #[serde(default)]
    pub bog_factor: Option<u8>,
    #[serde(default)]
    pub detailed_description: Option<String>,
    #[serde(default)]
    pub source_url: Option<String>,
}

impl NewWalk {
    pub fn validate(&self) -> Result<(), ParseError> {
        validate_text("title", &self.title, TITLE_MAX_LEN)?;
        if self.description.trim().is_empty() {
            return Err(ParseError::Empty("description"));
        }
        validate_text(
            "short_description",
            &self.short_description,
            SHORT_DESCRIPTION_MAX_LEN,
        )?;
        if !self.distance_km.is_finite() || self.distance_km <= 0.0 {
            return Err(ParseError::OutOfRange("distance_km must be positive"));
        }
        if self.ascent_m < 0 {
            return Err(ParseError::OutOfRange("ascent_m must not be negative"));
        }
        if !self.estimated_time_hours.is_finite() || self.estimated_time_hours <= 0.0 {
            return Err(ParseError::OutOfRange(
                "estimated_time_hours must be positive",
            ));
        }
        GpsCoordinate {
            lat: self.latitude,
            lng: self.longitude,
        }
        .validate()?;
        if self.max_elevation_m < 0 {
            return Err(ParseError::OutOfRange("max_elevation_m must not be negative"));
        }
        if let Some(bog) = self.bog_factor {
            if !(BOG_FACTOR_MIN..=BOG_FACTOR_MAX).contains(&bog) {
                return Err(ParseError::OutOfRange("bog_factor must be within [1, 5]"));
            }
        }
        for tag in &self.tags {
            if tag.trim().is_empty() {
                return Err(ParseError::Empty("tag"));
            }
            if tag.len() > TAG_MAX_LEN {
                return Err(ParseError::TooLong("tag", TAG_MAX_LEN));
            }
        }
        Ok(())
    }
}

/// One leg of a walk's route description. Stages are ordered by
/// `stage_number` starting at 1 and are unique per walk.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct WalkStage {
    pub walk_id: WalkId,
    pub stage_number: u32,
    #[serde(default)]
    pub title: Option<String>,
    pub description: String,
    #[serde(default)]
    pub distance_km: Option<f64>,
    #[serde(default)]
    pub duration_minutes: Option<f64>,
    #[serde(default)]
    pub elevation_m: Option<i64>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub gps: Option<GpsCoordinate>,
    #[serde(default)]
    pub terrain: Option<String>,
    #[serde(default)]
    pub landmarks: Vec<String>,
    #[serde(default)]
    pub warnings: Vec<String>,
}

impl WalkStage {
    pub fn validate(&self) -> Result<(), ParseError> {
        if self.stage_number == 0 {
            return Err(ParseError::OutOfRange("stage_number must be >= 1"));
        }
        if self.description.trim().is_empty() {
            return Err(ParseError::Empty("stage description"));
        }
        if let Some(distance) = self.distance_km {
            if !distance.is_finite() || distance < 0.0 {
                return Err(ParseError::OutOfRange(
                    "stage distance_km must not be negative",
                ));
            }
        }
        if let Some(gps) = &self.gps {
            gps.validate()?;
        }
        Ok(())
    }
}

pub(crate) fn validate_text(name: &'static str, value: &str, max: usize) -> Result<(), ParseError> {
    if value.is_empty() {
        return Err(ParseError::Empty(name));
    }
    if value.trim() != value {
        return Err(ParseError::Trimmed(name));
    }
    if value.len() > max {
        return Err(ParseError::TooLong(name, max));
    }
    Ok(())
}
