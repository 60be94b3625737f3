//! CLI for the toolbelt helpers.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;
use toolbelt_core::config::{self, ToolbeltConfig};

use commands::{run_b64, run_completions, run_convert, run_download, run_hash, run_index};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "toolbelt")]
#[command(about = "Resumable downloads and small file/string helpers", long_about = None)]
pub struct Cli {
    /// Log debug output to stderr.
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only log warnings and errors to stderr.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Use this config file instead of the XDG default.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Download a URL to a file, resuming from whatever is already there.
    Download {
        /// Direct HTTP/HTTPS URL.
        url: String,
        /// Target file. Its current length is the resume offset.
        path: PathBuf,
        /// Bytes per write to the target file (default from config).
        #[arg(long, value_name = "BYTES")]
        chunk_size: Option<usize>,
        /// Draw a progress line on stderr.
        #[arg(long)]
        progress: bool,
        /// Print response headers and a transfer summary.
        #[arg(long = "show-headers")]
        show_headers: bool,
    },

    /// Base64 encode or decode a string.
    B64 {
        #[command(subcommand)]
        action: B64Command,
    },

    /// Convert between JSON, JSONL, YAML and xz-compressed JSON (by extension).
    Convert {
        input: PathBuf,
        output: PathBuf,
    },

    /// List files below a directory with size and modification time.
    Index {
        dir: PathBuf,
        /// Only list the directory's own files.
        #[arg(long)]
        no_recursive: bool,
        /// Visit names in descending order.
        #[arg(long)]
        reverse: bool,
        /// Print the index as a JSON array.
        #[arg(long)]
        json: bool,
    },

    /// SHA-256 of a JSON/JSONL/YAML document's canonical JSON form.
    Hash {
        path: PathBuf,
    },

    /// Print shell completions to stdout.
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Debug, Subcommand)]
pub enum B64Command {
    /// Encode text (url-safe alphabet unless --standard).
    Encode {
        text: String,
        /// Use the standard `+` / `/` alphabet.
        #[arg(long)]
        standard: bool,
    },
    /// Decode text in either alphabet.
    Decode { text: String },
}

impl Cli {
    pub fn run(self) -> Result<()> {
        let config_path = self.config;
        // Only commands that read settings touch (and possibly create) the config file.
        let load_config = || -> Result<ToolbeltConfig> {
            let cfg = match &config_path {
                Some(path) => config::load_or_init_at(path)?,
                None => config::load_or_init()?,
            };
            tracing::debug!("loaded config: {:?}", cfg);
            Ok(cfg)
        };

        match self.command {
            CliCommand::Download {
                url,
                path,
                chunk_size,
                progress,
                show_headers,
            } => run_download(&load_config()?, &url, &path, chunk_size, progress, show_headers)?,
            CliCommand::B64 { action } => run_b64(action)?,
            CliCommand::Convert { input, output } => {
                run_convert(&load_config()?, &input, &output)?
            }
            CliCommand::Index {
                dir,
                no_recursive,
                reverse,
                json,
            } => run_index(&dir, !no_recursive, reverse, json)?,
            CliCommand::Hash { path } => run_hash(&path)?,
            CliCommand::Completions { shell } => run_completions(shell),
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
