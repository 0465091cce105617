//! Artifact files for a pipeline run

use crate::pipeline::PipelineOutcome;
use anyhow::{Context, Result};
use regex_utils::newline;
use serde::Serialize;
use std::path::PathBuf;
use tracing::debug;

pub const REQUIREMENT_FILE: &str = "output_活动需求信息.txt";
pub const PLAN_FILE: &str = "output_活动规划方案.txt";
pub const VISUAL_FILE: &str = "output_主视觉设计.png";
const COPY_PREFIX: &str = "output_宣传文案_";

/// Writes a [`PipelineOutcome`] as flat files under one directory
#[derive(Debug, Clone)]
pub struct ArtifactWriter {
    output_dir: PathBuf,
}

impl ArtifactWriter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self { output_dir: output_dir.into() }
    }

    /// Write every artifact, returning the paths in write order.
    ///
    /// The visual is skipped when the run produced none.
    pub async fn write(&self, outcome: &PipelineOutcome) -> Result<Vec<PathBuf>> {
        let mut written = Vec::new();

        written.push(self.write_json(REQUIREMENT_FILE, &outcome.requirement).await?);
        written.push(self.write_json(PLAN_FILE, &outcome.plan).await?);

        if let Some(visual) = &outcome.visual {
            let path = self.output_dir.join(VISUAL_FILE);
            tokio::fs::write(&path, visual)
                .await
                .with_context(|| format!("Failed to write {:?}", path))?;
            written.push(path);
        }

        for (kind, text) in outcome.copy.iter() {
            written.push(self.write_text(&format!("{}{}.txt", COPY_PREFIX, kind.label()), text).await?);
        }

        debug!("Wrote {} artifacts to {:?}", written.len(), self.output_dir);
        Ok(written)
    }

    async fn write_json<T: Serialize>(&self, name: &str, value: &T) -> Result<PathBuf> {
        let json = serde_json::to_string_pretty(value).with_context(|| format!("Failed to serialize {}", name))?;
        self.write_file(name, &decode_line_breaks(&json)).await
    }

    /// Write text with escaped `\n` turned into line breaks
    async fn write_text(&self, name: &str, text: &str) -> Result<PathBuf> {
        self.write_file(name, &newline::unescape(text)).await
    }

    /// Write `contents` as is, creating parent directories as needed
    async fn write_file(&self, name: &str, contents: &str) -> Result<PathBuf> {
        let path = self.output_dir.join(name);
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .with_context(|| format!("Failed to create {:?}", parent))?;
        }

        tokio::fs::write(&path, contents)
            .await
            .with_context(|| format!("Failed to write {:?}", path))?;
        Ok(path)
    }
}

/// Turn the `\n` escapes of serialized JSON into real line breaks, leaving
/// other escapes (including an escaped backslash before `n`) untouched
fn decode_line_breaks(json: &str) -> String {
    let mut out = String::with_capacity(json.len());
    let mut chars = json.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some(escaped) => {
                out.push('\\');
                out.push(escaped);
            }
            None => out.push('\\'),
        }
    }
    out
}
