//! CLI command structure using clap

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "sectionlab")]
#[command(version, about = "Mock-render section snippets into standalone previews", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render a template into a standalone preview document
    Render {
        /// Template file, or `-` to read stdin
        input: PathBuf,

        #[command(flatten)]
        output: OutputArgs,

        /// Preview configuration (sectionlab.toml)
        #[arg(short, long, env = "SECTIONLAB_CONFIG")]
        config: Option<PathBuf>,
    },

    /// Print the authoring mode of a template
    Detect {
        /// Template file, or `-` to read stdin
        input: PathBuf,

        #[arg(long)]
        json: bool,
    },

    /// Print the setting and block defaults declared by a template's schema
    Schema {
        /// Template file, or `-` to read stdin
        input: PathBuf,

        #[arg(long)]
        json: bool,
    },

    /// Work with a catalog JSON export
    #[command(subcommand)]
    Catalog(CatalogCommands),
}

#[derive(Subcommand)]
pub enum CatalogCommands {
    /// Render the code of a catalog section
    Render {
        /// Catalog file (JSON array of sections)
        catalog: PathBuf,

        /// Slug of the section to render
        slug: String,

        #[command(flatten)]
        output: OutputArgs,

        /// Preview configuration (sectionlab.toml)
        #[arg(short, long, env = "SECTIONLAB_CONFIG")]
        config: Option<PathBuf>,
    },

    /// List catalog sections
    List {
        /// Catalog file (JSON array of sections)
        catalog: PathBuf,

        #[arg(long)]
        json: bool,
    },
}

/// Where and how a rendered preview is written
#[derive(Args)]
pub struct OutputArgs {
    /// Write to a file instead of stdout
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    /// Wrap the document in the sandboxed host container
    #[arg(long)]
    pub frame: bool,

    /// Extra classes for the host container (with --frame)
    #[arg(long)]
    pub class: Option<String>,
}
