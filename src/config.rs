use crate::model::Difficulty;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const DEFAULT_BOSS_CACHE_TTL_SECS: u64 = 600;
const DEFAULT_BOSS_CACHE_CAP: usize = 1000;
const DEFAULT_PAGER_TTL_SECS: u64 = 180;
const DEFAULT_PAGER_SESSION_CAP: usize = 256;
const DEFAULT_MAX_CHUNK: usize = 1900;

/// Immutable service configuration, assembled once at startup from CLI
/// arguments, an optional config file, and defaults (in that precedence)
/// and passed into constructors.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub workbook_path: PathBuf,
    pub worksheet: String,
    pub boss_cache_ttl: Duration,
    pub boss_cache_cap: usize,
    pub pager_ttl: Duration,
    pub pager_session_cap: usize,
    pub max_chunk: usize,
}

impl ServiceConfig {
    pub fn from_args(args: &CliArgs) -> Result<Self> {
        let file_config = if let Some(path) = args.config.as_ref() {
            load_config_file(path)?
        } else {
            PartialConfig::default()
        };

        let PartialConfig {
            workbook,
            worksheet,
            boss_cache_ttl_secs,
            boss_cache_cap,
            pager_ttl_secs,
            pager_session_cap,
            max_chunk,
        } = file_config;

        let workbook_path = args
            .workbook
            .clone()
            .or(workbook)
            .context("no workbook configured (use --workbook or LOOT_LEDGER_WORKBOOK)")?;

        let worksheet = args
            .worksheet
            .clone()
            .or(worksheet)
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty())
            .context("no worksheet configured (use --worksheet or LOOT_LEDGER_WORKSHEET)")?;

        let boss_cache_ttl = Duration::from_secs(
            args.boss_cache_ttl_secs
                .or(boss_cache_ttl_secs)
                .unwrap_or(DEFAULT_BOSS_CACHE_TTL_SECS),
        );

        let boss_cache_cap = args
            .boss_cache_cap
            .or(boss_cache_cap)
            .unwrap_or(DEFAULT_BOSS_CACHE_CAP)
            .max(1);

        let pager_ttl = Duration::from_secs(
            args.pager_ttl_secs
                .or(pager_ttl_secs)
                .unwrap_or(DEFAULT_PAGER_TTL_SECS),
        );

        let pager_session_cap = args
            .pager_session_cap
            .or(pager_session_cap)
            .unwrap_or(DEFAULT_PAGER_SESSION_CAP)
            .max(1);

        let max_chunk = args
            .max_chunk
            .or(max_chunk)
            .unwrap_or(DEFAULT_MAX_CHUNK)
            .max(1);

        Ok(Self {
            workbook_path,
            worksheet,
            boss_cache_ttl,
            boss_cache_cap,
            pager_ttl,
            pager_session_cap,
            max_chunk,
        })
    }

    pub fn validate(&self) -> Result<()> {
        anyhow::ensure!(
            self.workbook_path.exists(),
            "configured workbook {:?} does not exist",
            self.workbook_path
        );
        anyhow::ensure!(
            self.workbook_path.is_file(),
            "configured workbook {:?} is not a file",
            self.workbook_path
        );
        Ok(())
    }
}

#[derive(Parser, Debug, Clone)]
#[command(name = "loot-ledger", about = "Loot-wish lookup over a shared spreadsheet", version)]
pub struct CliArgs {
    #[arg(
        long,
        value_name = "FILE",
        help = "Path to a configuration file (YAML or JSON)",
        global = true
    )]
    pub config: Option<PathBuf>,

    #[arg(
        long,
        env = "LOOT_LEDGER_WORKBOOK",
        value_name = "FILE",
        help = "Workbook holding the wish sheet",
        global = true
    )]
    pub workbook: Option<PathBuf>,

    #[arg(
        long,
        env = "LOOT_LEDGER_WORKSHEET",
        value_name = "NAME",
        help = "Worksheet name within the workbook",
        global = true
    )]
    pub worksheet: Option<String>,

    #[arg(
        long,
        env = "LOOT_LEDGER_BOSS_CACHE_TTL_SECS",
        value_name = "SECS",
        help = "Boss-name cache time-to-live",
        global = true
    )]
    pub boss_cache_ttl_secs: Option<u64>,

    #[arg(
        long,
        env = "LOOT_LEDGER_BOSS_CACHE_CAP",
        value_name = "N",
        help = "Maximum distinct boss names kept in the cache",
        global = true
    )]
    pub boss_cache_cap: Option<usize>,

    #[arg(
        long,
        env = "LOOT_LEDGER_PAGER_TTL_SECS",
        value_name = "SECS",
        help = "Inactivity window before a pagination session expires",
        global = true
    )]
    pub pager_ttl_secs: Option<u64>,

    #[arg(
        long,
        env = "LOOT_LEDGER_PAGER_SESSION_CAP",
        value_name = "N",
        help = "Maximum live pagination sessions",
        global = true
    )]
    pub pager_session_cap: Option<usize>,

    #[arg(
        long,
        env = "LOOT_LEDGER_MAX_CHUNK",
        value_name = "CHARS",
        help = "Maximum characters per fallback text message",
        global = true
    )]
    pub max_chunk: Option<usize>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Look up an item and show every wish for it.
    Item {
        /// Exact item name to look up.
        item_name: String,
        #[arg(long, value_enum)]
        difficulty: Option<Difficulty>,
        /// Use the wide field layout.
        #[arg(long)]
        wide: bool,
    },
    /// Look up a boss and show every wish for its items.
    Boss {
        /// Exact boss name to look up.
        boss: String,
        #[arg(long, value_enum)]
        difficulty: Option<Difficulty>,
        #[arg(long)]
        wide: bool,
    },
    /// List every distinct boss in the sheet.
    Bosses,
}

#[derive(Debug, Default, Deserialize)]
struct PartialConfig {
    workbook: Option<PathBuf>,
    worksheet: Option<String>,
    boss_cache_ttl_secs: Option<u64>,
    boss_cache_cap: Option<usize>,
    pager_ttl_secs: Option<u64>,
    pager_session_cap: Option<usize>,
    max_chunk: Option<usize>,
}

fn load_config_file(path: &Path) -> Result<PartialConfig> {
    if !path.exists() {
        anyhow::bail!("config file {:?} does not exist", path);
    }
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {:?}", path))?;
    let ext = path
        .extension()
        .and_then(|os| os.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let parsed = match ext.as_str() {
        "yaml" | "yml" => serde_yaml::from_str(&contents)
            .with_context(|| format!("failed to parse YAML config {:?}", path))?,
        "json" => serde_json::from_str(&contents)
            .with_context(|| format!("failed to parse JSON config {:?}", path))?,
        other => anyhow::bail!("unsupported config extension: {other}"),
    };
    Ok(parsed)
}
