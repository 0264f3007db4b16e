//! Candlekeep CLI - inspect and check Infinity Engine resource records.
//!
//! This is the main entry point for the Candlekeep command-line application.

use std::fs::File;
use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand};
use memmap2::Mmap;

use candlekeep::prelude::*;

/// Candlekeep - Infinity Engine resource inspector
#[derive(Parser)]
#[command(name = "candlekeep")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Game edition whose opcode tables apply
    #[arg(short, long, global = true, env = "CANDLEKEEP_GAME", default_value = "bg2ee")]
    game: Game,

    /// Engine extension to enable (tobex, eeex); repeatable
    #[arg(short, long = "feature", global = true)]
    features: Vec<Feature>,

    /// JSON context file; overrides --game and --feature
    #[arg(long, global = true, env = "CANDLEKEEP_CONTEXT")]
    context: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the field tree of an EFF or ITM file
    Dump {
        /// Input file
        file: PathBuf,

        /// Print the flattened leaves as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the resolved layout of an effect
    Effect {
        /// Effect opcode
        #[arg(short, long)]
        opcode: u32,

        /// Use the 0x100-byte version 2 layout
        #[arg(long)]
        v2: bool,

        /// Parameter 1
        #[arg(long, default_value_t = 0)]
        param1: u32,

        /// Parameter 2
        #[arg(long, default_value_t = 0)]
        param2: u32,
    },

    /// Parse and re-serialize a file, comparing the bytes
    Roundtrip {
        /// Input file
        file: PathBuf,
    },

    /// List resource references a directory cannot satisfy
    Links {
        /// Input file
        file: PathBuf,

        /// Directory of loose resource files
        #[arg(short, long, env = "CANDLEKEEP_OVERRIDE")]
        dir: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_tracing(cli.verbose);

    let context = load_context(&cli)?;
    tracing::debug!(?context, "using context");
    let resolver = LayoutResolver::new(context);

    match cli.command {
        Commands::Dump { file, json } => cmd_dump(&file, json, &resolver)?,
        Commands::Effect {
            opcode,
            v2,
            param1,
            param2,
        } => cmd_effect(opcode, v2, param1, param2, &resolver)?,
        Commands::Roundtrip { file } => cmd_roundtrip(&file, &resolver)?,
        Commands::Links { file, dir } => cmd_links(&file, &dir, &resolver)?,
    }

    Ok(())
}

fn setup_tracing(verbose: u8) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("candlekeep=debug,info"),
        _ => EnvFilter::new("trace"),
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn load_context(cli: &Cli) -> Result<Context> {
    if let Some(path) = &cli.context {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read context file {}", path.display()))?;
        return serde_json::from_str(&text).context("Failed to parse context file");
    }
    Ok(cli
        .features
        .iter()
        .fold(Context::new(cli.game), |context, feature| context.with_feature(*feature)))
}

fn map_file(path: &Path) -> Result<Mmap> {
    let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    // SAFETY: the file is opened read-only and only read while the map lives.
    let mmap = unsafe { Mmap::map(&file) }.context("Failed to map input file")?;
    Ok(mmap)
}

/// A parsed resource of any supported type.
enum Loaded {
    Eff(EffResource),
    Item(ItemResource),
}

impl Loaded {
    fn parse(data: &[u8], resolver: &LayoutResolver) -> Result<Self> {
        match data.get(..4) {
            Some(b"EFF ") => Ok(Loaded::Eff(
                EffResource::parse(data, resolver).context("Failed to parse EFF file")?,
            )),
            Some(b"ITM ") => Ok(Loaded::Item(
                ItemResource::parse(data, resolver).context("Failed to parse ITM file")?,
            )),
            _ => anyhow::bail!("Input is neither an EFF nor an ITM file"),
        }
    }

    fn document(&self) -> &Document {
        match self {
            Loaded::Eff(eff) => eff.document(),
            Loaded::Item(item) => item.document(),
        }
    }

    fn to_bytes(&mut self) -> Result<Vec<u8>> {
        let bytes = match self {
            Loaded::Eff(eff) => eff.to_bytes()?,
            Loaded::Item(item) => item.to_bytes()?,
        };
        Ok(bytes)
    }
}

fn cmd_dump(path: &Path, json: bool, resolver: &LayoutResolver) -> Result<()> {
    let data = map_file(path)?;
    let loaded = Loaded::parse(&data, resolver)?;
    let doc = loaded.document();

    if json {
        let leaves: Vec<serde_json::Value> = doc
            .flatten(doc.root())
            .into_iter()
            .filter_map(|id| doc.get(id))
            .map(|leaf| {
                serde_json::json!({
                    "offset": leaf.offset(),
                    "size": leaf.size(),
                    "name": leaf.name(),
                    "value": leaf.value().map(ToString::to_string),
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&leaves)?);
        return Ok(());
    }

    print_node(doc, doc.root(), 0);
    Ok(())
}

fn print_node(doc: &Document, id: NodeId, depth: usize) {
    let Some(node) = doc.get(id) else {
        return;
    };
    let indent = "  ".repeat(depth);
    match node.value() {
        Some(value) => println!(
            "{:#06x} {:>4} {}{}: {}",
            node.offset(),
            node.size(),
            indent,
            node.name(),
            value
        ),
        None => {
            println!("{:#06x} {:>4} {}[{}]", node.offset(), node.size(), indent, node.name());
            for child in node.children() {
                print_node(doc, child.id(), depth + 1);
            }
        }
    }
}

fn cmd_effect(opcode: u32, v2: bool, param1: u32, param2: u32, resolver: &LayoutResolver) -> Result<()> {
    let version = if v2 { EffectVersion::V2 } else { EffectVersion::V1 };
    let mut data = vec![0u8; version.size()];
    let (param1_at, param2_at) = match version {
        EffectVersion::V1 => {
            let opcode = u16::try_from(opcode).context("Version 1 opcodes are 16-bit")?;
            data[..2].copy_from_slice(&opcode.to_le_bytes());
            (0x04, 0x08)
        }
        EffectVersion::V2 => {
            data[..4].copy_from_slice(&opcode.to_le_bytes());
            (0x0c, 0x10)
        }
    };
    data[param1_at..param1_at + 4].copy_from_slice(&param1.to_le_bytes());
    data[param2_at..param2_at + 4].copy_from_slice(&param2.to_le_bytes());

    let layout = resolver
        .resolve(&data, 0, version)
        .context("Failed to resolve effect layout")?;

    println!(
        "Opcode {} ({:?}, {}){}",
        layout.opcode(),
        layout.version(),
        resolver.context().game(),
        if layout.is_failsafe() { " [generic]" } else { "" }
    );
    if let Some(category) = layout.linked_category() {
        println!("Resource links to {category}");
    }
    for (field, role) in layout.fields().iter().zip(layout.roles()) {
        let role = role.map(|r| format!("{r:?}")).unwrap_or_default();
        println!(
            "{:#06x} {:>3} {:<18} {}: {}",
            field.offset(),
            field.size(),
            role,
            field.name(),
            field.value()
        );
    }

    Ok(())
}

fn cmd_roundtrip(path: &Path, resolver: &LayoutResolver) -> Result<()> {
    let data = map_file(path)?;
    let mut loaded = Loaded::parse(&data, resolver)?;
    let bytes = loaded.to_bytes().context("Failed to serialize")?;

    if bytes[..] == data[..] {
        println!("{}: {} bytes, identical", path.display(), bytes.len());
        return Ok(());
    }

    let first = bytes
        .iter()
        .zip(data.iter())
        .position(|(a, b)| a != b)
        .unwrap_or(bytes.len().min(data.len()));
    anyhow::bail!(
        "{}: output differs at {:#x} ({} bytes in, {} bytes out)",
        path.display(),
        first,
        data.len(),
        bytes.len()
    )
}

fn cmd_links(path: &Path, dir: &Path, resolver: &LayoutResolver) -> Result<()> {
    let data = map_file(path)?;
    let loaded = Loaded::parse(&data, resolver)?;
    let provider = DirectoryProvider::open(dir)
        .with_context(|| format!("Failed to index {}", dir.display()))?;
    println!("Indexed {} resources in {}", provider.len(), dir.display());

    let doc = loaded.document();
    let missing = check_links(doc, doc.root(), &provider);
    for reference in &missing {
        let offset = doc.get(reference.node).map(|n| n.offset()).unwrap_or(0);
        println!(
            "{:#06x} {}: {}.{}",
            offset, reference.field, reference.name, reference.category
        );
    }
    println!("\nMissing: {} references", missing.len());

    Ok(())
}
