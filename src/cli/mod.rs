//! CLI command definitions and handlers

pub mod config;
pub mod handlers;
pub mod output;

use clap::{ArgAction, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::export::ResourceLayout;
use output::OutputFormat;

/// quiver-md - export a Quiver library to markdown files
#[derive(Parser, Debug)]
#[command(name = "quiver-md", version, about, long_about = None)]
pub struct Cli {
    /// Config file (default: ~/.config/quiver-md/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v, -vv)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Export a library to a directory of markdown files
    Export(ExportArgs),

    /// Plan and render an export without writing anything
    Check(CheckArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `export` command
#[derive(Parser, Debug)]
pub struct ExportArgs {
    /// Path to the Quiver library (*.qvlibrary)
    pub library: PathBuf,

    /// Output directory (must be empty or absent)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Resource extension to rewrite to .png (can be specified multiple times)
    #[arg(long = "png-ext", action = ArgAction::Append)]
    pub png_extensions: Vec<String>,

    /// Where resource files are placed
    #[arg(long, value_enum)]
    pub resource_layout: Option<ResourceLayout>,

    /// Notebook name to skip (can be specified multiple times)
    #[arg(long, action = ArgAction::Append)]
    pub exclude: Vec<String>,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `check` command
#[derive(Parser, Debug)]
pub struct CheckArgs {
    /// Path to the Quiver library (*.qvlibrary)
    pub library: PathBuf,

    /// Resource extension to rewrite to .png (can be specified multiple times)
    #[arg(long = "png-ext", action = ArgAction::Append)]
    pub png_extensions: Vec<String>,

    /// Notebook name to skip (can be specified multiple times)
    #[arg(long, action = ArgAction::Append)]
    pub exclude: Vec<String>,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `completions` command
#[derive(Parser, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for (bash, zsh, fish)
    #[arg(value_enum)]
    pub shell: Shell,
}
