use crate::format::OutputFormat;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "d1query", about = "Query Cloudflare D1 databases over HTTP")]
pub struct Cli {
    /// Path to config file
    #[arg(short = 'c', long, global = true, env = "D1QUERY_CONFIG")]
    pub config: Option<PathBuf>,

    /// Emit diagnostics to stderr
    #[arg(short = 'v', long, global = true, env = "D1QUERY_VERBOSE")]
    pub verbose: bool,

    /// Disable credential masking
    #[arg(long, global = true, env = "D1QUERY_SHOW_SECRETS")]
    pub show_secrets: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run a statement and print rows with statistics
    Query(QueryArgs),

    /// Print the first row only
    First(QueryArgs),

    /// Print all rows
    Get(QueryArgs),

    /// Print the first column of the first row
    Value(QueryArgs),

    /// Run a write statement and print the number of affected rows
    Execute(QueryArgs),
}

impl Command {
    pub fn args(&self) -> &QueryArgs {
        match self {
            Command::Query(a)
            | Command::First(a)
            | Command::Get(a)
            | Command::Value(a)
            | Command::Execute(a) => a,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Command::Query(_) => "query",
            Command::First(_) => "first",
            Command::Get(_) => "get",
            Command::Value(_) => "value",
            Command::Execute(_) => "execute",
        }
    }
}

#[derive(Parser, Debug)]
pub struct QueryArgs {
    /// SQL statement text
    pub sql: Option<String>,

    /// Read SQL from file
    #[arg(short = 'f', long = "file", conflicts_with = "sql")]
    pub sql_file: Option<PathBuf>,

    /// Bind parameter, repeatable; JSON scalars keep their type
    #[arg(short = 'p', long = "param")]
    pub params: Vec<String>,

    /// Cloudflare account ID
    #[arg(short = 'a', long, env = "D1QUERY_ACCOUNT_ID")]
    pub account_id: Option<String>,

    /// API token with D1 permissions
    #[arg(long, env = "D1QUERY_API_TOKEN")]
    pub api_token: Option<String>,

    /// D1 database ID
    #[arg(short = 'd', long, env = "D1QUERY_DATABASE_ID")]
    pub database_id: Option<String>,

    /// API root (default: https://api.cloudflare.com/client/v4)
    #[arg(long, env = "D1QUERY_API_BASE")]
    pub api_base: Option<String>,

    /// Request timeout in seconds (default: 60)
    #[arg(short = 't', long, env = "D1QUERY_TIMEOUT")]
    pub timeout: Option<u64>,

    /// Output format for stdout (default: toon)
    #[arg(long, value_enum, env = "D1QUERY_FORMAT")]
    pub format: Option<OutputFormat>,

    /// Write results to file instead of stdout
    #[arg(short = 'o', long)]
    pub output: Option<PathBuf>,

    /// Config file profile name
    #[arg(short = 'P', long, env = "D1QUERY_PROFILE")]
    pub profile: Option<String>,
}
