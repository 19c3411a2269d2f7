// LabWired - Firmware Simulation Platform
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

mod emit;

use blackbox_codegen::{ArtifactKind, Blackbox, IpcVariant, PayloadLayout, Template};
use blackbox_config::BlackboxManifest;
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{error, info};

const EXIT_OK: u8 = 0;
const EXIT_CONFIG_ERROR: u8 = 2;
const EXIT_GENERATION_ERROR: u8 = 3;

fn parse_ipc(s: &str) -> Result<IpcVariant, String> {
    s.parse().map_err(|e: blackbox_codegen::BlackboxError| e.to_string())
}

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Generates SystemC/SST blackbox adapters",
    long_about = None
)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    trace: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Write the driver, model and ports sources for a manifest.
    Generate(GenerateArgs),

    /// Print one generated source to stdout.
    Show(ShowArgs),

    /// Print the port enumeration and model payload layout.
    Inspect(InspectArgs),
}

#[derive(Parser, Debug)]
struct GenerateArgs {
    /// Path to the blackbox manifest (YAML)
    #[arg(short, long)]
    manifest: PathBuf,

    /// Override the manifest's IPC transport (sock, socket, zmq, message-queue)
    #[arg(long, value_parser = parse_ipc)]
    ipc: Option<IpcVariant>,

    /// Directory to write the sources to (default: manifest's output_dir)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ArtifactArg {
    Driver,
    Model,
    Ports,
}

impl From<ArtifactArg> for ArtifactKind {
    fn from(arg: ArtifactArg) -> Self {
        match arg {
            ArtifactArg::Driver => ArtifactKind::Driver,
            ArtifactArg::Model => ArtifactKind::Model,
            ArtifactArg::Ports => ArtifactKind::Ports,
        }
    }
}

#[derive(Parser, Debug)]
struct ShowArgs {
    /// Path to the blackbox manifest (YAML)
    #[arg(short, long)]
    manifest: PathBuf,

    /// Which source to print
    #[arg(short, long, value_enum)]
    artifact: ArtifactArg,

    /// Override the manifest's IPC transport
    #[arg(long, value_parser = parse_ipc)]
    ipc: Option<IpcVariant>,
}

#[derive(Parser, Debug)]
struct InspectArgs {
    /// Path to the blackbox manifest (YAML)
    #[arg(short, long)]
    manifest: PathBuf,

    /// Emit the report as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Serialize)]
struct InspectReport {
    module: String,
    abbreviation: String,
    ipc: IpcVariant,
    nports_const: String,
    nports: usize,
    slots: Vec<String>,
    /// Declared and bound in the driver but never carried over IPC.
    inouts: Vec<String>,
    payload: PayloadLayout,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Logs go to stderr so `show` output can be redirected cleanly.
    if cli.trace {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::INFO)
            .with_writer(std::io::stderr)
            .init();
    }

    match cli.command {
        Commands::Generate(args) => run_generate(args),
        Commands::Show(args) => run_show(args),
        Commands::Inspect(args) => run_inspect(args),
    }
}

/// Loads the manifest and builds the generator; failures are config errors.
fn load(
    manifest: &Path,
    ipc: Option<IpcVariant>,
) -> Result<(BlackboxManifest, Blackbox), ExitCode> {
    let manifest = match BlackboxManifest::from_file(manifest) {
        Ok(m) => m,
        Err(e) => {
            error!("{:#}", e);
            return Err(ExitCode::from(EXIT_CONFIG_ERROR));
        }
    };
    match manifest.build(ipc) {
        Ok(bbox) => Ok((manifest, bbox)),
        Err(e) => {
            error!("{:#}", e);
            Err(ExitCode::from(EXIT_CONFIG_ERROR))
        }
    }
}

fn load_templates(manifest: &BlackboxManifest) -> anyhow::Result<(Template, Template)> {
    Ok((
        Template::load(manifest.driver_template())?,
        Template::load(manifest.model_template())?,
    ))
}

fn run_generate(args: GenerateArgs) -> ExitCode {
    let (manifest, bbox) = match load(&args.manifest, args.ipc) {
        Ok(loaded) => loaded,
        Err(code) => return code,
    };

    // Render everything before touching the output directory.
    let rendered = load_templates(&manifest)
        .and_then(|(driver, model)| Ok(bbox.generate(&driver, &model)?));
    let artifacts = match rendered {
        Ok(a) => a,
        Err(e) => {
            error!("{:#}", e);
            return ExitCode::from(EXIT_GENERATION_ERROR);
        }
    };

    let out_dir = args.output_dir.unwrap_or_else(|| manifest.output_dir());
    match emit::write_artifacts(&out_dir, bbox.module().name(), &artifacts) {
        Ok(_) => {
            info!(
                "Generated {} blackbox ({} IPC) in {}",
                bbox.module().name(),
                bbox.ipc(),
                out_dir.display()
            );
            ExitCode::from(EXIT_OK)
        }
        Err(e) => {
            error!("{:#}", e);
            ExitCode::from(EXIT_GENERATION_ERROR)
        }
    }
}

fn run_show(args: ShowArgs) -> ExitCode {
    let (manifest, bbox) = match load(&args.manifest, args.ipc) {
        Ok(loaded) => loaded,
        Err(code) => return code,
    };

    let rendered = match ArtifactKind::from(args.artifact) {
        ArtifactKind::Driver => Template::load(manifest.driver_template())
            .and_then(|t| bbox.generate_driver(&t)),
        ArtifactKind::Model => Template::load(manifest.model_template())
            .and_then(|t| bbox.generate_model(&t)),
        ArtifactKind::Ports => bbox.generate_ports_enum(),
    };

    match rendered {
        Ok(text) => {
            print!("{}", text);
            ExitCode::from(EXIT_OK)
        }
        Err(e) => {
            error!("{}", e);
            ExitCode::from(EXIT_GENERATION_ERROR)
        }
    }
}

fn run_inspect(args: InspectArgs) -> ExitCode {
    let (_, bbox) = match load(&args.manifest, None) {
        Ok(loaded) => loaded,
        Err(code) => return code,
    };

    let report = match inspect(&bbox) {
        Ok(r) => r,
        Err(e) => {
            error!("{}", e);
            return ExitCode::from(EXIT_GENERATION_ERROR);
        }
    };

    if args.json {
        match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                error!("Failed to serialize report: {}", e);
                return ExitCode::from(EXIT_GENERATION_ERROR);
            }
        }
    } else {
        println!("Module:       {} ({})", report.module, report.ipc);
        println!("Abbreviation: {}", report.abbreviation);
        println!("{} = {}", report.nports_const, report.nports);
        println!("Slots:        __pid__, {}", report.slots.join(", "));
        if !report.inouts.is_empty() {
            println!("Inout:        {} (not exchanged)", report.inouts.join(", "));
        }
        println!("Payload:");
        for field in &report.payload.fields {
            if field.clock {
                println!("  {:<16} clock (no payload)", field.slot);
            } else {
                println!(
                    "  {:<16} offset {:>4} width {:>4}",
                    field.slot, field.offset, field.width
                );
            }
        }
    }
    ExitCode::from(EXIT_OK)
}

fn inspect(bbox: &Blackbox) -> blackbox_codegen::Result<InspectReport> {
    let slots = bbox.enum_slots()?;
    Ok(InspectReport {
        module: bbox.module().name().to_string(),
        abbreviation: bbox.module().abbreviation().to_string(),
        ipc: bbox.ipc(),
        nports_const: bbox.module().nports_const(),
        nports: slots.len() + 1,
        slots,
        inouts: bbox
            .ports()
            .inouts()
            .map(|s| s.name().to_string())
            .collect(),
        payload: bbox.payload_layout()?,
    })
}
