// SPDX-License-Identifier: Apache-2.0

use std::path::PathBuf;

use glentrail_core::{env_string, env_usize};
use glentrail_query::PipelineLimits;

/// Runtime configuration, read once at startup from `GLENTRAIL_*` variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: String,
    pub db_path: PathBuf,
    pub max_body_bytes: usize,
    pub limits: PipelineLimits,
}

impl ServerConfig {
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = PipelineLimits::default();
        Self {
            bind_addr: env_string("GLENTRAIL_BIND").unwrap_or_else(|| "127.0.0.1:8080".to_string()),
            db_path: PathBuf::from(
                env_string("GLENTRAIL_DB").unwrap_or_else(|| "glentrail.sqlite".to_string()),
            ),
            max_body_bytes: env_usize("GLENTRAIL_MAX_BODY_BYTES", 256 * 1024),
            limits: PipelineLimits {
                max_limit: env_usize("GLENTRAIL_MAX_PAGE_LIMIT", defaults.max_limit),
                max_search_len: env_usize("GLENTRAIL_MAX_SEARCH_LEN", defaults.max_search_len),
                max_tag_terms: defaults.max_tag_terms,
            },
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:8080".to_string(),
            db_path: PathBuf::from("glentrail.sqlite"),
            max_body_bytes: 256 * 1024,
            limits: PipelineLimits::default(),
        }
    }
}
