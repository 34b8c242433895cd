use clap::Args;
use serde::Deserialize;

use convoy_gen::options::GenOptions;

use super::error::DispatchGenError;

// ═══════════════════════════════════════════════════════════════
//  Config file (TOML)
// ═══════════════════════════════════════════════════════════════

#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub sources: Vec<String>,
    pub out: Option<String>,
    #[serde(default)]
    pub options: GenOptions,
    pub dump_facts: Option<bool>,
}

pub fn load_config(path: &str) -> Result<Config, DispatchGenError> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| DispatchGenError::Config(format!("cannot read config {path}: {e}")))?;
    toml::from_str(&content).map_err(|e| DispatchGenError::Config(format!("bad config {path}: {e}")))
}

// ═══════════════════════════════════════════════════════════════
//  CLI args
// ═══════════════════════════════════════════════════════════════

#[derive(Args, Clone, Debug)]
pub struct GenArgs {
    /// Path to dispatch-gen.toml
    #[arg(long, default_value = "dispatch-gen.toml", env = "DISPATCH_GEN_CONFIG")]
    pub config: String,

    /// Source file to scan (repeatable). Overrides sources from config
    #[arg(long)]
    pub source: Vec<String>,

    /// Output path for the artifact ("-" = stdout)
    #[arg(long)]
    pub out: Option<String>,

    /// Name of the generated dispatch function
    #[arg(long)]
    pub entry: Option<String>,

    /// Candidate function name to scan for
    #[arg(long)]
    pub convention: Option<String>,

    /// Emit a branch for every candidate, even pairs no call site requests
    #[arg(long)]
    pub keep_unused: bool,

    /// Print scan facts as JSON instead of emitting the artifact
    #[arg(long)]
    pub dump_facts: bool,
}

// ═══════════════════════════════════════════════════════════════
//  Effective — merged config
// ═══════════════════════════════════════════════════════════════

/// Final configuration after the merge: dispatch-gen.toml < env/CLI
pub struct Effective {
    pub sources: Vec<String>,
    pub out: String,
    pub options: GenOptions,
    pub dump_facts: bool,
}

impl Effective {
    pub fn new(args: &GenArgs) -> Result<Self, DispatchGenError> {
        let cfg = match load_config(&args.config) {
            Ok(c) => c,
            Err(e) => {
                if std::path::Path::new(&args.config).exists() {
                    return Err(e);
                }
                Config::default()
            }
        };

        let sources = if args.source.is_empty() {
            cfg.sources
        } else {
            args.source.clone()
        };
        if sources.is_empty() {
            return Err(DispatchGenError::Config(
                "no sources to scan; pass --source or set sources in config".into(),
            ));
        }

        let mut options = cfg.options;
        if let Some(ref entry) = args.entry {
            options.entry = entry.clone();
        }
        if let Some(ref convention) = args.convention {
            options.convention = convention.clone();
        }
        if args.keep_unused {
            options.prune_unused = false;
        }

        Ok(Self {
            sources,
            out: args.out.clone().or(cfg.out).unwrap_or_else(|| "-".into()),
            options,
            dump_facts: args.dump_facts || cfg.dump_facts.unwrap_or(false),
        })
    }
}
