//! Text Highlighter CLI
//!
//! Acts as a host for JSON documents: each paragraph is a list of styled
//! runs. The optional session file stands in for the panel session so that
//! `revert` can follow an earlier `apply`.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use texthighlighter_core::{
    HighlightError, HighlightOptions, HighlighterConfig, HostDocument, MemoryDocument,
    Orchestrator, Panel, RunStyle, SessionState,
};
use tracing::{debug, info, Level};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "texthighlighter")]
#[command(about = "Find a phrase in a document and restyle every occurrence", long_about = None)]
#[command(version)]
struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", global = true)]
    log_level: String,

    /// Engine configuration file (TOML, YAML or JSON)
    #[arg(long, env = "TEXTHIGHLIGHTER_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Session file remembering the last apply between invocations
    #[arg(long, global = true)]
    session: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Style every occurrence of a term
    Apply {
        /// Document to modify (JSON)
        doc: PathBuf,

        /// Options file (TOML or JSON) used as the base for the flags below
        #[arg(long)]
        options: Option<PathBuf>,

        #[command(flatten)]
        style: StyleArgs,

        /// Write the result here instead of overwriting DOC
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Reset the last applied term to the neutral style
    Revert {
        /// Document to modify (JSON)
        doc: PathBuf,

        /// Write the result here instead of overwriting DOC
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print paragraphs with their run boundaries
    Show {
        /// Document to print (JSON)
        doc: PathBuf,
    },
}

#[derive(Args)]
struct StyleArgs {
    /// Literal phrase to find
    #[arg(short, long)]
    term: Option<String>,

    /// Match case exactly
    #[arg(long)]
    case_sensitive: bool,

    /// Highlight colour token, or "none"
    #[arg(long)]
    highlight: Option<String>,

    /// Text colour as #RRGGBB, or "default"
    #[arg(long)]
    color: Option<String>,

    #[arg(long)]
    bold: bool,

    #[arg(long)]
    italic: bool,

    #[arg(long)]
    underline: bool,

    #[arg(long)]
    strikeout: bool,
}

impl StyleArgs {
    /// Flags override the base options
    fn merge_into(self, mut options: HighlightOptions) -> HighlightOptions {
        if let Some(term) = self.term {
            options.term = term;
        }
        if let Some(highlight) = self.highlight {
            options.highlight_color = highlight;
        }
        if let Some(color) = self.color {
            options.text_color = color;
        }
        options.case_sensitive |= self.case_sensitive;
        options.bold |= self.bold;
        options.italic |= self.italic;
        options.underline |= self.underline;
        options.strikeout |= self.strikeout;
        options
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match cli.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "texthighlighter={0},texthighlighter_core={0}",
            level.as_str().to_lowercase()
        ))
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    debug!("texthighlighter v{} starting...", env!("CARGO_PKG_VERSION"));

    let config = HighlighterConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;
    let orchestrator: Orchestrator<MemoryDocument> = Orchestrator::from_config(&config);
    debug!("Using {} locator", orchestrator.locator_name());

    let mut session = match &cli.session {
        Some(path) => SessionState::load(path)
            .with_context(|| format!("Failed to read session {}", path.display()))?,
        None => SessionState::new(),
    };

    match cli.command {
        Commands::Apply {
            doc,
            options,
            style,
            output,
        } => {
            let mut document = load_document(&doc)?;
            let mut panel = Panel::new();
            panel.on_open(&session);

            // Without an options file, start from the remembered parameters
            let base = match options {
                Some(path) => HighlightOptions::from_file(&path)
                    .with_context(|| format!("Failed to read options {}", path.display()))?,
                None => panel.form().clone(),
            };
            *panel.form_mut() = style.merge_into(base);

            if !panel.can_submit(&document) {
                anyhow::bail!("Nothing to search: the term is empty or the document has no text");
            }

            let outcome = panel.submit_apply(&orchestrator, &mut document, &mut session)?;
            if outcome.matches == 0 {
                println!("No matches found");
            } else {
                println!(
                    "Styled {} match(es) in {} paragraph(s)",
                    outcome.matches, outcome.units_styled
                );
                save_document(&document, output.as_deref().unwrap_or(doc.as_path()))?;
            }
        }

        Commands::Revert { doc, output } => {
            let mut document = load_document(&doc)?;
            let mut panel = Panel::new();

            match panel.submit_revert(&orchestrator, &mut document, &mut session) {
                Ok(outcome) => {
                    println!(
                        "Reverted {} match(es) in {} paragraph(s)",
                        outcome.matches, outcome.units_reverted
                    );
                    save_document(&document, output.as_deref().unwrap_or(doc.as_path()))?;
                }
                Err(HighlightError::NothingToRevert) => {
                    println!("Nothing to revert");
                }
                Err(e) => return Err(e.into()),
            }
        }

        Commands::Show { doc } => {
            let document = load_document(&doc)?;
            for unit in document.units() {
                let runs = document.unit_runs(unit)?;
                let rendered: Vec<String> = runs
                    .iter()
                    .map(|run| format!("{}{:?}", describe(&run.style), run.text))
                    .collect();
                println!("{} {}", unit, rendered.join(" | "));
            }
        }
    }

    if let Some(path) = &cli.session {
        session
            .save(path)
            .with_context(|| format!("Failed to write session {}", path.display()))?;
        info!("Session saved to {}", path.display());
    }

    Ok(())
}

fn load_document(path: &Path) -> Result<MemoryDocument> {
    MemoryDocument::load(path).with_context(|| format!("Failed to read document {}", path.display()))
}

fn save_document(doc: &MemoryDocument, path: &Path) -> Result<()> {
    doc.save(path)
        .with_context(|| format!("Failed to write document {}", path.display()))?;
    info!("Document written to {}", path.display());
    Ok(())
}

/// Compact `[bold,yellow,#ff0000]` marker for explicitly styled runs
fn describe(style: &RunStyle) -> String {
    let mut parts = Vec::new();
    let flags = [
        ("bold", style.bold),
        ("italic", style.italic),
        ("underline", style.underline),
        ("strikeout", style.strikeout),
    ];
    for (name, value) in flags {
        match value {
            Some(true) => parts.push(name.to_string()),
            Some(false) => parts.push(format!("-{}", name)),
            None => {}
        }
    }
    if let Some(highlight) = style.highlight {
        parts.push(highlight.to_string());
    }
    if let Some(color) = style.color {
        parts.push(color.to_string());
    }

    if parts.is_empty() {
        String::new()
    } else {
        format!("[{}]", parts.join(","))
    }
}
