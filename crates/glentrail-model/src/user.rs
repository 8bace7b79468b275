use crate::ids::{ParseError, UserId, EXTERNAL_ID_MAX_LEN};
use crate::walk::validate_text;
use serde::{Deserialize, Serialize};

pub const USER_NAME_MAX_LEN: usize = 120;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum SubscriptionTier {
    #[default]
    Free,
    Premium,
}

impl SubscriptionTier {
    pub fn parse(raw: &str) -> Result<Self, ParseError> {
        match raw.to_ascii_lowercase().as_str() {
            "free" => Ok(Self::Free),
            "premium" => Ok(Self::Premium),
            _ => Err(ParseError::InvalidFormat(
                "subscription tier must be one of free, premium",
            )),
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Free => "free",
            Self::Premium => "premium",
        }
    }
}

/// A community member. `external_id` is the identity the auth layer presents;
/// every authenticated request resolves through it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub external_id: String,
    pub image_url: Option<String>,
    pub subscription_tier: SubscriptionTier,
    pub joined_at: i64,
    pub last_active: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct NewUser {
    pub name: String,
    pub external_id: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub subscription_tier: SubscriptionTier,
}

impl NewUser {
    pub fn validate(&self) -> Result<(), ParseError> {
        validate_text("user name", &self.name, USER_NAME_MAX_LEN)?;
        validate_text("external_id", &self.external_id, EXTERNAL_ID_MAX_LEN)
    }
}

/// Running personal totals, seeded on a user's first logged completion and
/// only ever increased afterwards. `reports_written` and `photos_uploaded`
/// feed achievement evaluation but have no increment path here.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct UserStats {
    pub user_id: UserId,
    pub total_walks: i64,
    pub total_distance_km: f64,
    pub total_ascent_m: i64,
    pub total_time_hours: f64,
    pub munros_climbed: i64,
    pub corbetts_climbed: i64,
    pub donalds_climbed: i64,
    pub reports_written: i64,
    pub photos_uploaded: i64,
    pub last_walk_date: Option<i64>,
    pub achievement_badges: Vec<String>,
}

impl UserStats {
    /// The all-zero baseline served for users who have not logged a walk.
    #[must_use]
    pub fn empty(user_id: UserId) -> Self {
        Self {
            user_id,
            total_walks: 0,
            total_distance_km: 0.0,
            total_ascent_m: 0,
            total_time_hours: 0.0,
            munros_climbed: 0,
            corbetts_climbed: 0,
            donalds_climbed: 0,
            reports_written: 0,
            photos_uploaded: 0,
            last_walk_date: None,
            achievement_badges: Vec::new(),
        }
    }
}
