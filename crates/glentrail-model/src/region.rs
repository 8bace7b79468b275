use crate::ids::{ParseError, RegionId, Slug};
use crate::walk::validate_text;
use serde::{Deserialize, Serialize};

pub const REGION_NAME_MAX_LEN: usize = 120;

/// A Scottish walking area. `walk_count` is a denormalized count of the
/// region's published walks; `popularity_score` orders the region directory
/// and hides zero-scored regions from it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Region {
    pub id: RegionId,
    pub name: String,
    pub slug: Slug,
    pub description: String,
    pub image_url: Option<String>,
    pub walk_count: i64,
    pub popularity_score: i64,
    pub created_at: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct NewRegion {
    pub name: String,
    pub slug: Slug,
    pub description: String,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl NewRegion {
    pub fn validate(&self) -> Result<(), ParseError> {
        validate_text("region name", &self.name, REGION_NAME_MAX_LEN)?;
        if self.description.trim().is_empty() {
            return Err(ParseError::Empty("region description"));
        }
        Ok(())
    }
}
