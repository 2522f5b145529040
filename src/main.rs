//! doctree — turn a lexer's node stream into the comment/declaration tree.
//!
//! Input is the lexer output as JSON: `[{"label": "COMMENT", "content": "..."}, ...]`.
//!
//! - **stdin mode**: `doctree < nodes.json`
//! - **file mode**: `doctree -o build/trees src/*.json`

mod render;

use anyhow::{Context, Result};
use clap::Parser;
use doctree::{InputNode, ParserConfig, TokenTree};
use std::collections::BTreeSet;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "doctree",
    about = "Pair documentation comments with the declarations that follow them"
)]
struct Cli {
    /// Node stream files (glob patterns and directories supported). If omitted, reads from stdin.
    files: Vec<String>,

    /// Output directory (required when files are given)
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Output format: json (default), outline
    #[arg(short = 'f', long, default_value = "json")]
    format: String,

    /// JSON parser configuration file. Flags override its values.
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// Description used for comments without one
    #[arg(long)]
    placeholder: Option<String>,

    /// Tag that must declare a {type}. Repeatable; replaces the defaults.
    #[arg(long = "require")]
    require: Vec<String>,

    /// Report every missing type instead of stopping at the first one
    #[arg(long)]
    collect: bool,
}

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();
    let config = load_config(&cli)?;

    if cli.files.is_empty() {
        return stdin_mode(&cli, config);
    }

    file_mode(&cli, config)
}

/// Log to stderr, filtered by `DOCTREE_LOG` (default: warnings only).
fn init_logging() {
    let filter = EnvFilter::try_from_env("DOCTREE_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Start from the config file (if any), then apply flags on top.
fn load_config(cli: &Cli) -> Result<ParserConfig> {
    let mut config = match cli.config {
        Some(ref path) => {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            serde_json::from_str(&raw)
                .with_context(|| format!("invalid config: {}", path.display()))?
        }
        None => ParserConfig::default(),
    };
    if let Some(ref placeholder) = cli.placeholder {
        config.placeholder = placeholder.clone();
    }
    if !cli.require.is_empty() {
        config.required_type_tags = cli.require.clone();
    }
    debug!(?config, "configuration");
    Ok(config)
}

/// stdin mode: read one node stream from stdin, write the rendering to stdout.
fn stdin_mode(cli: &Cli, config: ParserConfig) -> Result<()> {
    let mut input = String::new();
    io::stdin()
        .read_to_string(&mut input)
        .context("failed to read stdin")?;

    let nodes = read_nodes(&input, "<stdin>")?;
    let parser = doctree::Parser::with_config("<stdin>", config);
    let (tree, diagnostics) = run(&parser, &nodes, cli.collect)?;

    let renderer = render::create_renderer(&cli.format)?;
    print!("{}", renderer.render(&tree)?);
    finish(diagnostics)
}

/// file mode: one tree per input file, written to the output directory.
fn file_mode(cli: &Cli, config: ParserConfig) -> Result<()> {
    let output_dir = cli
        .output
        .as_deref()
        .context("--output is required when files are given")?;

    fs::create_dir_all(output_dir)
        .with_context(|| format!("failed to create output directory: {}", output_dir.display()))?;

    let renderer = render::create_renderer(&cli.format)?;
    let ext = renderer.file_extension();
    let input_files = collect_inputs(&cli.files)?;

    let mut diagnostics = 0;
    for path in &input_files {
        let source = path.to_string_lossy().to_string();
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let nodes = read_nodes(&content, &source)?;

        let parser = doctree::Parser::with_config(source.as_str(), config.clone());
        let (tree, reported) = run(&parser, &nodes, cli.collect)?;
        diagnostics += reported;

        let out_path = output_dir.join(format!("{}.{}", derive_output_name(&source), ext));
        fs::write(&out_path, renderer.render(&tree)?)
            .with_context(|| format!("failed to write {}", out_path.display()))?;
        debug!(input = %source, output = %out_path.display(), comments = tree.len(), "written");
    }

    finish(diagnostics)
}

fn read_nodes(input: &str, source: &str) -> Result<Vec<InputNode>> {
    serde_json::from_str(input).with_context(|| format!("invalid node stream: {}", source))
}

/// Parse in the requested mode. Collected diagnostics go to stderr and are counted.
fn run(parser: &doctree::Parser, nodes: &[InputNode], collect: bool) -> Result<(TokenTree, usize)> {
    if !collect {
        return Ok((parser.parse(nodes)?, 0));
    }
    let parsed = parser.parse_collecting(nodes);
    for diagnostic in &parsed.diagnostics {
        eprintln!("error: {}", diagnostic);
    }
    Ok((parsed.tree, parsed.diagnostics.len()))
}

fn finish(diagnostics: usize) -> Result<()> {
    if diagnostics > 0 {
        anyhow::bail!("{} diagnostic(s) reported", diagnostics);
    }
    Ok(())
}

/// Glob appended to directory arguments.
const NODE_STREAM_GLOB: &str = "*.json";

/// Resolve file, directory and glob arguments into sorted, unique node streams.
/// Directories contribute their top-level `*.json` files.
fn collect_inputs(args: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = BTreeSet::new();
    for arg in args {
        let path = Path::new(arg);
        if path.is_file() {
            files.insert(path.to_path_buf());
            continue;
        }
        let pattern = if path.is_dir() {
            format!(
                "{}/{}",
                glob::Pattern::escape(&path.to_string_lossy()),
                NODE_STREAM_GLOB
            )
        } else {
            arg.clone()
        };
        let mut matched = 0;
        for entry in glob::glob(&pattern).with_context(|| format!("invalid glob pattern: {}", arg))? {
            match entry {
                Ok(p) if p.is_file() => {
                    matched += 1;
                    files.insert(p);
                }
                Ok(_) => {}
                Err(e) => warn!(%e, "unreadable path"),
            }
        }
        if matched == 0 {
            warn!(%pattern, "no node streams matched");
        }
    }
    Ok(files.into_iter().collect())
}

/// Derive the output file name (without extension) from a source path.
/// "build/nodes/math.json" → "math"
fn derive_output_name(source: &str) -> String {
    let filename = Path::new(source)
        .file_name()
        .and_then(|f| f.to_str())
        .unwrap_or(source);
    filename
        .strip_suffix(".json")
        .unwrap_or(filename)
        .to_string()
}
