// LabWired - Firmware Simulation Platform
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

use anyhow::{Context, Result};
use blackbox_codegen::{ArtifactKind, Artifacts};
use std::path::{Path, PathBuf};
use tracing::info;

/// Writes the rendered sources into `dir`, creating it if needed.
///
/// Files are written driver, model, ports. An I/O failure part-way leaves
/// the files already written in place.
pub fn write_artifacts(dir: &Path, module: &str, artifacts: &Artifacts) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create output directory {:?}", dir))?;

    let mut written = Vec::with_capacity(ArtifactKind::ALL.len());
    for kind in ArtifactKind::ALL {
        let path = dir.join(kind.file_name(module));
        std::fs::write(&path, artifacts.get(kind))
            .with_context(|| format!("Failed to write {} source to {:?}", kind, path))?;
        info!("Wrote {} source: {}", kind, path.display());
        written.push(path);
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_artifacts_creates_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("nested/blackboxes");
        let artifacts = Artifacts {
            driver: "driver".to_string(),
            model: "model".to_string(),
            ports: "ports".to_string(),
        };

        let written = write_artifacts(&dir, "ram", &artifacts).unwrap();
        assert_eq!(
            written,
            [
                dir.join("ram_driver.cpp"),
                dir.join("ram_comp.cpp"),
                dir.join("ram_ports.hpp")
            ]
        );
        assert_eq!(std::fs::read_to_string(&written[1]).unwrap(), "model");
    }
}
