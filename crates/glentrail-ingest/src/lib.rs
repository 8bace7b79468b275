// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]

mod decode;
mod logging;

use glentrail_store::{SeedReport, Store};
use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

pub use decode::{
    decode_document, read_document, seed_batch_for, FixtureDocument, FixtureRegion, FixtureStage,
    FixtureUser, FixtureWalk,
};
pub use logging::{IngestEvent, IngestLog, IngestStage};

pub const CRATE_NAME: &str = "glentrail-ingest";

#[derive(Debug)]
pub struct IngestError(pub String);

impl Display for IngestError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for IngestError {}

/// Aggregated counts across every document of one run, with the structured
/// event trail.
#[derive(Debug, Clone, Default)]
pub struct IngestReport {
    pub documents: usize,
    pub regions_created: usize,
    pub users_created: usize,
    pub users_existing: usize,
    pub walks_created: usize,
    pub stages_created: usize,
    pub walks_published: usize,
    pub events: Vec<IngestEvent>,
}

impl IngestReport {
    fn absorb(&mut self, seed: &SeedReport) {
        self.regions_created += seed.regions_created;
        self.users_created += seed.users_created;
        self.users_existing += seed.users_existing;
        self.walks_created += seed.walks_created;
        self.stages_created += seed.stages_created;
        self.walks_published += seed.walks_published;
    }
}

/// Applies one decoded document in a single transaction.
pub fn ingest_document(
    store: &mut Store,
    document: &FixtureDocument,
) -> Result<SeedReport, IngestError> {
    store
        .apply_seed(&seed_batch_for(document))
        .map_err(|e| IngestError(format!("seed apply failed: {e}")))
}

/// Loads a fixture file, or every `*.json` file under a directory in name
/// order. Each document commits on its own; a failing document stops the run
/// and leaves earlier documents applied.
pub fn ingest_path(store: &mut Store, input: &Path) -> Result<IngestReport, IngestError> {
    let files = fixture_files(input)?;
    let mut log = IngestLog::default();
    let mut report = IngestReport::default();

    for path in files {
        let shown = path.display().to_string();
        log.emit(
            IngestStage::Decode,
            "ingest.decode",
            BTreeMap::from([("path".to_string(), shown.clone())]),
        );
        let document = read_document(&path)?;

        let seed = ingest_document(store, &document)
            .map_err(|e| IngestError(format!("{shown}: {e}")))?;
        log.emit(
            IngestStage::Apply,
            "ingest.apply",
            BTreeMap::from([
                ("path".to_string(), shown),
                ("walks".to_string(), seed.walks_created.to_string()),
                ("regions".to_string(), seed.regions_created.to_string()),
            ]),
        );
        report.absorb(&seed);
        report.documents += 1;
    }

    log.emit(
        IngestStage::Finalize,
        "ingest.complete",
        BTreeMap::from([
            ("documents".to_string(), report.documents.to_string()),
            ("walks".to_string(), report.walks_created.to_string()),
        ]),
    );
    report.events = log.events().to_vec();
    Ok(report)
}

fn fixture_files(input: &Path) -> Result<Vec<PathBuf>, IngestError> {
    if input.is_file() {
        return Ok(vec![input.to_path_buf()]);
    }
    if !input.is_dir() {
        return Err(IngestError(format!(
            "fixture input {} is neither a file nor a directory",
            input.display()
        )));
    }
    let entries = std::fs::read_dir(input)
        .map_err(|e| IngestError(format!("read dir {}: {e}", input.display())))?;
    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| IngestError(format!("read dir entry: {e}")))?;
        let path = entry.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "json") {
            files.push(path);
        }
    }
    files.sort();
    if files.is_empty() {
        return Err(IngestError(format!(
            "no fixture documents under {}",
            input.display()
        )));
    }
    Ok(files)
}
