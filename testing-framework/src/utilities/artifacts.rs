// File: testing-framework/src/utilities/artifacts.rs
//
// Failure Artifact Collection
//
// Snapshot of a chain taken when a test fails, written as JSON so the run
// can be inspected without re-executing it.

use crate::tier1_component::Accounts;
use anyhow::{Context, Result};
use indexmap::IndexMap;
use landreg_ledger::{Block, Chain};
use log::warn;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Chain state captured for a failed test
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChainArtifact {
    /// Test name
    pub test_name: String,
    /// Failure reason, with its context chain
    pub failure_reason: Option<String>,
    /// Tip height at capture time
    pub tip_height: u64,
    /// Tip hash at capture time
    pub tip_hash: String,
    /// Included transaction count per account name
    pub nonces: IndexMap<String, u64>,
    /// Every block from genesis to tip
    pub blocks: Vec<Block>,
}

impl ChainArtifact {
    /// Snapshot `chain`
    pub fn capture(test_name: &str, chain: &Chain, accounts: &Accounts) -> Self {
        let tip = chain.tip();
        Self {
            test_name: test_name.to_string(),
            failure_reason: None,
            tip_height: tip.height,
            tip_hash: tip.hash.to_hex(),
            nonces: accounts
                .iter()
                .map(|a| (a.name.clone(), chain.nonce(&a.address)))
                .collect(),
            blocks: chain.blocks().to_vec(),
        }
    }

    /// Record why the test failed
    pub fn set_failure_reason(&mut self, reason: impl Into<String>) {
        self.failure_reason = Some(reason.into());
    }

    /// File name used by [`ChainArtifact::save`]
    pub fn file_name(&self) -> String {
        let name: String = self
            .test_name
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
            .collect();
        format!("{}_h{}.json", name, self.tip_height)
    }

    /// Write the artifact into `dir`, creating it if needed
    pub fn save(&self, dir: impl AsRef<Path>) -> Result<PathBuf> {
        let dir = dir.as_ref();
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create artifact dir {}", dir.display()))?;

        let path = dir.join(self.file_name());
        let json = serde_json::to_string_pretty(self).context("Failed to serialize artifact")?;
        std::fs::write(&path, json)
            .with_context(|| format!("Failed to write artifact {}", path.display()))?;

        if log::log_enabled!(log::Level::Warn) {
            warn!("Saved failure artifact to {}", path.display());
        }
        Ok(path)
    }

    /// Read an artifact written by [`ChainArtifact::save`]
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read artifact {}", path.display()))?;
        serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse artifact {}", path.display()))
    }
}
