//! Run storage API.
//!
//! Each run lives in its own directory named by run ID:
//! `manifest.json`, `summary.json`, `outline.json`, `surface.json`, `field.json`.

use crate::types::{FieldSnapshot, OutlineSnapshot, RunManifest, RunSummary, SurfaceRecord};
use crate::{ResultsError, ResultsResult};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};

/// Everything saved for one run.
#[derive(Debug, Clone)]
pub struct RunRecords {
    pub manifest: RunManifest,
    pub summary: RunSummary,
    pub outline: OutlineSnapshot,
    pub surface: Vec<SurfaceRecord>,
    pub field: FieldSnapshot,
}

#[derive(Clone)]
pub struct RunStore {
    root_dir: PathBuf,
}

impl RunStore {
    pub fn new(root_dir: PathBuf) -> ResultsResult<Self> {
        if !root_dir.exists() {
            fs::create_dir_all(&root_dir)?;
        }
        Ok(Self { root_dir })
    }

    /// Store next to a case file, under `.panelflow/runs`.
    pub fn for_case(case_path: &Path) -> ResultsResult<Self> {
        let case_dir = case_path
            .parent()
            .ok_or_else(|| ResultsError::InvalidPath {
                message: "case path has no parent directory".to_string(),
            })?;
        let runs_dir = case_dir.join(".panelflow").join("runs");
        Self::new(runs_dir)
    }

    pub fn root_dir(&self) -> &Path {
        &self.root_dir
    }

    fn run_dir(&self, run_id: &str) -> PathBuf {
        self.root_dir.join(run_id)
    }

    pub fn has_run(&self, run_id: &str) -> bool {
        self.run_dir(run_id).join("manifest.json").exists()
    }

    pub fn save_run(&self, records: &RunRecords) -> ResultsResult<()> {
        let run_dir = self.run_dir(&records.manifest.run_id);
        fs::create_dir_all(&run_dir)?;

        write_json(&run_dir.join("summary.json"), &records.summary)?;
        write_json(&run_dir.join("outline.json"), &records.outline)?;
        write_json(&run_dir.join("surface.json"), &records.surface)?;
        write_json(&run_dir.join("field.json"), &records.field)?;
        // manifest last: its presence marks a complete run
        write_json(&run_dir.join("manifest.json"), &records.manifest)?;

        Ok(())
    }

    fn load_part<T: DeserializeOwned>(&self, run_id: &str, file: &str) -> ResultsResult<T> {
        let path = self.run_dir(run_id).join(file);
        if !path.exists() {
            return Err(ResultsError::RunNotFound {
                run_id: run_id.to_string(),
            });
        }
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn load_manifest(&self, run_id: &str) -> ResultsResult<RunManifest> {
        self.load_part(run_id, "manifest.json")
    }

    pub fn load_summary(&self, run_id: &str) -> ResultsResult<RunSummary> {
        self.load_part(run_id, "summary.json")
    }

    pub fn load_surface(&self, run_id: &str) -> ResultsResult<Vec<SurfaceRecord>> {
        self.load_part(run_id, "surface.json")
    }

    pub fn load_run(&self, run_id: &str) -> ResultsResult<RunRecords> {
        Ok(RunRecords {
            manifest: self.load_manifest(run_id)?,
            summary: self.load_summary(run_id)?,
            outline: self.load_part(run_id, "outline.json")?,
            surface: self.load_surface(run_id)?,
            field: self.load_part(run_id, "field.json")?,
        })
    }

    /// Manifests of every complete run, oldest first.
    pub fn list_runs(&self) -> ResultsResult<Vec<RunManifest>> {
        let mut runs = Vec::new();

        if !self.root_dir.exists() {
            return Ok(runs);
        }

        for entry in fs::read_dir(&self.root_dir)? {
            let entry = entry?;
            if entry.path().is_dir() {
                let run_id = entry.file_name().to_string_lossy().to_string();
                if let Ok(manifest) = self.load_manifest(&run_id) {
                    runs.push(manifest);
                }
            }
        }

        runs.sort_by(|a, b| a.timestamp.cmp(&b.timestamp));
        Ok(runs)
    }

    pub fn delete_run(&self, run_id: &str) -> ResultsResult<()> {
        let run_dir = self.run_dir(run_id);
        if run_dir.exists() {
            fs::remove_dir_all(run_dir)?;
        }
        Ok(())
    }
}

fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> ResultsResult<()> {
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json)?;
    Ok(())
}
