// LabWired - Firmware Simulation Platform
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

use anyhow::{Context, Result};
use blackbox_codegen::{Blackbox, IpcVariant, ModuleInfo};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default schema version for YAML manifests
fn default_schema_version() -> String {
    "1.0".to_string()
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("blackboxes")
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct TemplatePaths {
    pub driver: PathBuf,
    pub model: PathBuf,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct PortEntry {
    /// Declaration in `<type> <name>` form, e.g. `<sc_bv<8>> data_in`.
    pub signal: String,
    /// One of clock, input, output, inout. Checked when the port list is classified.
    pub category: String,
}

/// Description of one blackbox to generate.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct BlackboxManifest {
    #[serde(default = "default_schema_version")]
    pub schema_version: String,
    pub module: String,
    pub lib: String,
    pub ipc: IpcVariant,
    pub templates: TemplatePaths,
    #[serde(default)]
    pub desc: String,
    /// Receiving and transmitting SST link descriptions.
    #[serde(default)]
    pub link_desc: [String; 2],
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    pub ports: Vec<PortEntry>,
    /// Directory relative paths are resolved against.
    #[serde(skip)]
    pub base_dir: Option<PathBuf>,
}

impl BlackboxManifest {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read blackbox manifest at {:?}", path))?;
        let mut manifest = Self::from_yaml(&content)
            .with_context(|| format!("Invalid blackbox manifest {:?}", path))?;
        manifest.base_dir = path.parent().map(Path::to_path_buf);
        tracing::debug!(
            "Loaded manifest for module '{}' with {} ports",
            manifest.module,
            manifest.ports.len()
        );
        Ok(manifest)
    }

    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let manifest: Self =
            serde_yaml::from_str(yaml).context("Failed to parse Blackbox Manifest YAML")?;
        manifest.validate()?;
        Ok(manifest)
    }

    pub fn validate(&self) -> Result<()> {
        if self.schema_version != "1.0" {
            anyhow::bail!(
                "Unsupported schema_version '{}'. Supported versions: '1.0'",
                self.schema_version
            );
        }

        if self.module.trim().is_empty() {
            anyhow::bail!("Field 'module' cannot be empty");
        }

        if self.ports.is_empty() {
            anyhow::bail!("Manifest must declare at least one port");
        }

        Ok(())
    }

    /// Resolves `path` against the manifest's directory unless it is absolute.
    pub fn resolve(&self, path: &Path) -> PathBuf {
        match &self.base_dir {
            Some(base) if path.is_relative() => base.join(path),
            _ => path.to_path_buf(),
        }
    }

    pub fn driver_template(&self) -> PathBuf {
        self.resolve(&self.templates.driver)
    }

    pub fn model_template(&self) -> PathBuf {
        self.resolve(&self.templates.model)
    }

    pub fn output_dir(&self) -> PathBuf {
        self.resolve(&self.output_dir)
    }

    pub fn module_info(&self) -> Result<ModuleInfo> {
        let [rx, tx] = self.link_desc.clone();
        Ok(ModuleInfo::new(&self.module, &self.lib)?
            .with_description(self.desc.clone())
            .with_link_descriptions(rx, tx))
    }

    /// Builds the generator, optionally overriding the manifest's transport.
    pub fn build(&self, ipc: Option<IpcVariant>) -> Result<Blackbox> {
        let ipc = ipc.unwrap_or(self.ipc);
        let mut bbox = Blackbox::new(self.module_info()?, ipc);
        bbox.classify(
            self.ports
                .iter()
                .map(|p| (p.signal.as_str(), p.category.as_str())),
        )
        .with_context(|| format!("Invalid port list for module '{}'", self.module))?;
        Ok(bbox)
    }
}
