use crate::error::StoreError;
use rusqlite::{params, Connection};

pub const SCHEMA_VERSION: &str = "v1";

pub(crate) fn migrate(conn: &Connection) -> Result<(), StoreError> {
    conn.execute_batch(
        r#"
        PRAGMA journal_mode=WAL;
        PRAGMA synchronous=NORMAL;
        PRAGMA foreign_keys=ON;

        CREATE TABLE IF NOT EXISTS meta (
          key TEXT PRIMARY KEY,
          value TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS users (
          id INTEGER PRIMARY KEY AUTOINCREMENT,
          name TEXT NOT NULL,
          external_id TEXT NOT NULL UNIQUE,
          image_url TEXT,
          subscription_tier TEXT NOT NULL DEFAULT 'free',
          joined_at INTEGER NOT NULL,
          last_active INTEGER NOT NULL
        );

        CREATE TABLE IF NOT EXISTS regions (
          id INTEGER PRIMARY KEY AUTOINCREMENT,
          name TEXT NOT NULL,
          slug TEXT NOT NULL UNIQUE,
          description TEXT NOT NULL,
          image_url TEXT,
          walk_count INTEGER NOT NULL DEFAULT 0,
          popularity_score INTEGER NOT NULL DEFAULT 0,
          created_at INTEGER NOT NULL
        );

        CREATE TABLE IF NOT EXISTS walks (
          id INTEGER PRIMARY KEY AUTOINCREMENT,
          title TEXT NOT NULL,
          slug TEXT NOT NULL UNIQUE,
          description TEXT NOT NULL,
          short_description TEXT NOT NULL,
          region_id INTEGER NOT NULL REFERENCES regions(id),
          author_id INTEGER NOT NULL REFERENCES users(id),
          distance_km REAL NOT NULL,
          ascent_m INTEGER NOT NULL,
          difficulty TEXT NOT NULL,
          estimated_time_hours REAL NOT NULL,
          latitude REAL NOT NULL,
          longitude REAL NOT NULL,
          max_elevation_m INTEGER NOT NULL,
          route_type TEXT NOT NULL,
          featured_image_url TEXT NOT NULL DEFAULT '',
          tags TEXT NOT NULL DEFAULT '[]',
          is_published INTEGER NOT NULL DEFAULT 0,
          published_at INTEGER,
          view_count INTEGER NOT NULL DEFAULT 0,
          like_count INTEGER NOT NULL DEFAULT 0,
          report_count INTEGER NOT NULL DEFAULT 0,
          average_rating REAL NOT NULL DEFAULT 0,
          terrain TEXT,
          start_grid_ref TEXT,
          parking_info TEXT,
          public_transport TEXT,
          bog_factor INTEGER,
          detailed_description TEXT,
          source_url TEXT,
          created_at INTEGER NOT NULL
        );

        CREATE TABLE IF NOT EXISTS walk_stages (
          walk_id INTEGER NOT NULL REFERENCES walks(id),
          stage_number INTEGER NOT NULL,
          title TEXT,
          description TEXT NOT NULL,
          distance_km REAL,
          duration_minutes REAL,
          elevation_m INTEGER,
          image_url TEXT,
          gps_lat REAL,
          gps_lng REAL,
          terrain TEXT,
          landmarks TEXT NOT NULL DEFAULT '[]',
          warnings TEXT NOT NULL DEFAULT '[]',
          PRIMARY KEY (walk_id, stage_number)
        );

        CREATE TABLE IF NOT EXISTS walk_reports (
          id INTEGER PRIMARY KEY AUTOINCREMENT,
          walk_id INTEGER NOT NULL REFERENCES walks(id),
          author_id INTEGER NOT NULL REFERENCES users(id),
          title TEXT NOT NULL,
          content TEXT NOT NULL,
          rating INTEGER NOT NULL,
          completed_at INTEGER NOT NULL,
          weather_conditions TEXT,
          trail_conditions TEXT,
          difficulty TEXT,
          actual_time_hours REAL,
          is_published INTEGER NOT NULL DEFAULT 0,
          published_at INTEGER,
          like_count INTEGER NOT NULL DEFAULT 0,
          comment_count INTEGER NOT NULL DEFAULT 0,
          created_at INTEGER NOT NULL
        );

        CREATE TABLE IF NOT EXISTS likes (
          user_id INTEGER NOT NULL REFERENCES users(id),
          target_type TEXT NOT NULL,
          target_id INTEGER NOT NULL,
          liked_at INTEGER NOT NULL,
          PRIMARY KEY (user_id, target_type, target_id)
        );

        CREATE TABLE IF NOT EXISTS completions (
          user_id INTEGER NOT NULL REFERENCES users(id),
          walk_id INTEGER NOT NULL REFERENCES walks(id),
          completed_at INTEGER NOT NULL,
          completed_day TEXT NOT NULL,
          distance_km REAL NOT NULL,
          ascent_m INTEGER NOT NULL,
          time_hours REAL NOT NULL,
          category TEXT,
          PRIMARY KEY (user_id, walk_id, completed_day)
        );

        CREATE TABLE IF NOT EXISTS user_stats (
          user_id INTEGER PRIMARY KEY REFERENCES users(id),
          total_walks INTEGER NOT NULL DEFAULT 0,
          total_distance_km REAL NOT NULL DEFAULT 0,
          total_ascent_m INTEGER NOT NULL DEFAULT 0,
          total_time_hours REAL NOT NULL DEFAULT 0,
          munros_climbed INTEGER NOT NULL DEFAULT 0,
          corbetts_climbed INTEGER NOT NULL DEFAULT 0,
          donalds_climbed INTEGER NOT NULL DEFAULT 0,
          reports_written INTEGER NOT NULL DEFAULT 0,
          photos_uploaded INTEGER NOT NULL DEFAULT 0,
          last_walk_date INTEGER,
          achievement_badges TEXT NOT NULL DEFAULT '[]'
        );

        CREATE INDEX IF NOT EXISTS idx_walks_region ON walks(region_id, is_published);
        CREATE INDEX IF NOT EXISTS idx_walks_published ON walks(is_published, published_at);
        CREATE INDEX IF NOT EXISTS idx_reports_walk ON walk_reports(walk_id, is_published);
        CREATE INDEX IF NOT EXISTS idx_reports_author ON walk_reports(author_id, is_published);
        CREATE INDEX IF NOT EXISTS idx_likes_target ON likes(target_type, target_id);
        "#,
    )?;
    conn.execute(
        "INSERT OR IGNORE INTO meta(key, value) VALUES (?1, ?2)",
        params!["schema_version", SCHEMA_VERSION],
    )?;
    Ok(())
}
