// src/detector/registry.rs
//
// Immutable, ordered set of validated detectors. Built once per run and
// shared read-only (Arc) by every scan worker.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use super::model::Detector;
use crate::config::consts::DETECTOR_EXT;
use crate::error::ConfigError;

#[derive(Debug, Clone)]
pub struct Registry {
    detectors: Vec<Detector>,
    /// Where each detector came from (file path or "detector #n"), same index.
    origins: Vec<String>,
}

impl Registry {
    /// Build from detectors constructed in code. Order is kept.
    pub fn from_detectors(list: Vec<Detector>) -> Result<Self, ConfigError> {
        let entries = list
            .into_iter()
            .enumerate()
            .map(|(i, d)| (format!("detector #{}", i + 1), d))
            .collect();
        Self::build(entries)
    }

    /// Deserialize one detector resource. Missing or mistyped fields fail.
    pub fn parse_detector(json: &str, path: &Path) -> Result<Detector, ConfigError> {
        serde_json::from_str(json).map_err(|source| ConfigError::Json {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load every `*.json` in `dir`, one detector per file, in file-name order.
    /// Any bad file fails the whole load: a half-loaded registry under-detects silently.
    pub fn load_dir(dir: &Path) -> Result<Self, ConfigError> {
        let io_err = |source| ConfigError::Io { path: dir.to_path_buf(), source };

        let mut files: Vec<PathBuf> = Vec::new();
        for entry in fs::read_dir(dir).map_err(io_err)? {
            let path = entry.map_err(io_err)?.path();
            let is_json = path
                .extension()
                .map(|e| e.eq_ignore_ascii_case(DETECTOR_EXT))
                .unwrap_or(false);
            if is_json && path.is_file() {
                files.push(path);
            }
        }
        files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

        if files.is_empty() {
            return Err(ConfigError::NoDetectors(dir.to_path_buf()));
        }

        let mut entries = Vec::with_capacity(files.len());
        for path in files {
            let text = fs::read_to_string(&path)
                .map_err(|source| ConfigError::Io { path: path.clone(), source })?;
            let detector = Self::parse_detector(&text, &path)?;
            logd!("Detectors: parsed '{}' from {}", detector.name, path.display());
            entries.push((path.display().to_string(), detector));
        }

        let registry = Self::build(entries)?;
        logf!("Detectors: loaded {} from {}", registry.len(), dir.display());
        Ok(registry)
    }

    fn build(entries: Vec<(String, Detector)>) -> Result<Self, ConfigError> {
        let mut seen: HashMap<String, usize> = HashMap::new();
        let mut detectors = Vec::with_capacity(entries.len());
        let mut origins: Vec<String> = Vec::with_capacity(entries.len());

        for (origin, detector) in entries {
            detector.validate(&origin)?;

            if let Some(&first) = seen.get(&detector.name) {
                return Err(ConfigError::DuplicateName {
                    name: detector.name,
                    first: origins[first].clone(),
                    second: origin,
                });
            }
            seen.insert(detector.name.clone(), detectors.len());

            detectors.push(detector.normalized());
            origins.push(origin);
        }

        Ok(Self { detectors, origins })
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Detector> {
        self.detectors.iter()
    }

    pub fn len(&self) -> usize {
        self.detectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.detectors.is_empty()
    }

    /// Names in load order.
    pub fn names(&self) -> Vec<&str> {
        self.detectors.iter().map(|d| d.name.as_str()).collect()
    }

    pub fn get(&self, name: &str) -> Option<&Detector> {
        self.detectors.iter().find(|d| d.name == name)
    }

    pub fn origin(&self, name: &str) -> Option<&str> {
        self.detectors
            .iter()
            .position(|d| d.name == name)
            .map(|i| self.origins[i].as_str())
    }
}

impl<'a> IntoIterator for &'a Registry {
    type Item = &'a Detector;
    type IntoIter = std::slice::Iter<'a, Detector>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
