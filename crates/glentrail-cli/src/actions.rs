//! One function per subcommand. Actions pick their own failure class so a
//! rejected fixture, a broken store file and a runtime fault come back with
//! different exit codes.

use crate::{CliError, OutputMode};
use glentrail_ingest::ingest_path;
use glentrail_server::ServerConfig;
use glentrail_store::Store;
use serde_json::{json, Value};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub(crate) fn run_serve(addr: Option<String>, db: Option<PathBuf>) -> Result<(), CliError> {
    let mut config = ServerConfig::from_env();
    if let Some(addr) = addr {
        config.bind_addr = addr;
    }
    if let Some(db) = db {
        config.db_path = db;
    }
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|e| CliError::internal(format!("build tokio runtime: {e}")))?;
    runtime
        .block_on(glentrail_server::run(config))
        .map_err(CliError::internal)
}

pub(crate) fn run_ingest(input: &Path, db: &Path, output: OutputMode) -> Result<(), CliError> {
    let mut store = Store::open(db)
        .map_err(|e| CliError::storage(format!("open store at {}: {e}", db.display())))?;
    let report =
        ingest_path(&mut store, input).map_err(|e| CliError::validation(e.to_string()))?;
    for event in &report.events {
        debug!(name = %event.name, fields = ?event.fields, "fixture event");
    }
    info!(
        documents = report.documents,
        walks = report.walks_created,
        published = report.walks_published,
        "ingest finished"
    );
    if output.json {
        emit_json(&json!({
            "command": "ingest",
            "status": "ok",
            "documents": report.documents,
            "regions_created": report.regions_created,
            "users_created": report.users_created,
            "users_existing": report.users_existing,
            "walks_created": report.walks_created,
            "stages_created": report.stages_created,
            "walks_published": report.walks_published,
        }))?;
    } else {
        println!(
            "ingest: OK documents={} regions={} users={} walks={} stages={} published={}",
            report.documents,
            report.regions_created,
            report.users_created,
            report.walks_created,
            report.stages_created,
            report.walks_published
        );
    }
    Ok(())
}

pub(crate) fn run_inspect_db(db: &Path, output: OutputMode) -> Result<(), CliError> {
    let store = Store::open(db)
        .map_err(|e| CliError::storage(format!("open store at {}: {e}", db.display())))?;
    let inspection = store
        .inspect()
        .map_err(|e| CliError::storage(format!("inspect failed: {e}")))?;
    if output.json {
        let payload = serde_json::to_value(&inspection)
            .map_err(|e| CliError::internal(format!("encode inspection: {e}")))?;
        emit_json(&payload)
    } else {
        println!("schema_version={}", inspection.schema_version);
        println!("users={}", inspection.users);
        println!("regions={}", inspection.regions);
        println!(
            "walks={} published={}",
            inspection.walks, inspection.published_walks
        );
        println!("stages={}", inspection.stages);
        println!(
            "reports={} published={}",
            inspection.reports, inspection.published_reports
        );
        println!("likes={}", inspection.likes);
        println!("completions={}", inspection.completions);
        Ok(())
    }
}

pub(crate) fn run_reconcile(db: &Path, dry_run: bool, output: OutputMode) -> Result<(), CliError> {
    let mut store = Store::open(db)
        .map_err(|e| CliError::storage(format!("open store at {}: {e}", db.display())))?;
    let report = store
        .reconcile(dry_run)
        .map_err(|e| CliError::storage(format!("reconcile failed: {e}")))?;
    if output.json {
        let drifts: Vec<Value> = report
            .drifts
            .iter()
            .map(|d| {
                json!({
                    "entity": d.entity,
                    "key": d.key,
                    "field": d.field,
                    "stored": d.stored,
                    "actual": d.actual,
                })
            })
            .collect();
        emit_json(&json!({
            "command": "reconcile",
            "dry_run": dry_run,
            "clean": report.is_clean(),
            "repaired": report.repaired,
            "drifts": drifts,
        }))?;
    } else if report.is_clean() {
        println!("reconcile: OK no drift");
    } else {
        for d in &report.drifts {
            println!(
                "drift {} {} {}: stored={} actual={}",
                d.entity, d.key, d.field, d.stored, d.actual
            );
        }
        let outcome = if report.repaired {
            "repaired"
        } else {
            "left in place"
        };
        println!("reconcile: {} drifted counters {outcome}", report.drifts.len());
    }
    if dry_run && !report.is_clean() {
        return Err(CliError::validation(format!(
            "{} counters drifted; run without --dry-run to repair",
            report.drifts.len()
        )));
    }
    Ok(())
}

fn emit_json(payload: &Value) -> Result<(), CliError> {
    let text = serde_json::to_string(payload)
        .map_err(|e| CliError::internal(format!("encode output: {e}")))?;
    println!("{text}");
    Ok(())
}
