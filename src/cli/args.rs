//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Global Flags
//!
//! These flags are available on all commands:
//! - `--help` / `-h`: Show help
//! - `--version`: Show version
//! - `--cwd <path>`: Run as if in that directory
//! - `--debug`: Enable debug logging
//! - `--quiet` / `-q`: Links and errors only
//! - `--remote <name>` / `--remote-url <url>`: Which remote to link into
//! - `--provider <kind>`: Skip host detection

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::remote::{ComparisonNotation, LineRange, RemoteResource};

/// remotelink - Links to branches, commits and files on git hosting services
#[derive(Parser, Debug)]
#[command(name = "rl")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Run as if rl was started in this directory
    #[arg(long, global = true)]
    pub cwd: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Links and errors only
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Git remote to link into (default: config `remote`, then origin)
    #[arg(long, global = true, value_name = "NAME")]
    pub remote: Option<String>,

    /// Link into this remote URL instead of reading the repository
    #[arg(long, global = true, value_name = "URL", conflicts_with = "remote")]
    pub remote_url: Option<String>,

    /// Provider to use instead of detecting it from the host
    #[arg(long, global = true, value_name = "KIND")]
    pub provider: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print links to stdout
    #[command(
        name = "url",
        long_about = "Print the link for a branch, commit, file or comparison.\n\n\
            The provider is chosen from the remote's host. Links are printed one \
            per line; resources that cannot be linked are skipped.",
        after_help = "\
WORKFLOW EXAMPLES:
    # Link to the repository
    rl url repo

    # Several commits at once
    rl url commit 1a2b3c4 5d6e7f8

    # Lines 10-20 of a file on main
    rl url file src/lib.rs --ref main --lines 10-20

    # Without a local checkout
    rl --remote-url git@github.com:owner/repo.git url branches"
    )]
    Url {
        #[command(subcommand)]
        resource: ResourceArgs,
    },

    /// Open links in the browser
    #[command(
        name = "open",
        long_about = "Open the link for a resource in the default browser.\n\n\
            Every resolved link is opened even if an earlier one fails. The command \
            fails when nothing could be opened or any open failed.",
        after_help = "\
WORKFLOW EXAMPLES:
    # Open the current branch's history
    rl open branch my-feature

    # Open a pull request page for the current branch into main
    rl open pr main

    # Print instead of launching a browser
    rl open --print commit 1a2b3c4"
    )]
    Open {
        /// Print links instead of opening them
        #[arg(long)]
        print: bool,

        #[command(subcommand)]
        resource: ResourceArgs,
    },

    /// Copy links to the clipboard
    #[command(
        name = "copy",
        long_about = "Copy the link for a resource to the clipboard.\n\n\
            Batches are copied as one block, one link per line. Nothing is copied \
            when no link could be resolved.",
        after_help = "\
WORKFLOW EXAMPLES:
    # Copy a commit link
    rl copy commit 1a2b3c4

    # Copy a comparison between two branches
    rl copy compare main my-feature"
    )]
    Copy {
        #[command(subcommand)]
        resource: ResourceArgs,
    },

    /// List supported providers
    #[command(name = "providers")]
    Providers {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show issue autolinks for the current remote
    #[command(
        name = "autolinks",
        long_about = "Show how issue references such as #123 link to the current \
            remote's issue tracker."
    )]
    Autolinks {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Get, set, or list configuration values
    #[command(
        name = "config",
        after_help = "\
WORKFLOW EXAMPLES:
    # Show effective configuration
    rl config list

    # Link into 'upstream' in this repository
    rl config set remote upstream

    # Prefer http links everywhere
    rl config set --global protocol http"
    )]
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completion scripts
    #[command(
        name = "completion",
        long_about = "Generate shell completion scripts for tab-completion.\n\n\
            Outputs a completion script for the specified shell. Add the output \
            to your shell's configuration to enable tab-completion for rl commands.",
        after_help = "\
WORKFLOW EXAMPLES:
    # Bash (add to ~/.bashrc)
    rl completion bash >> ~/.bashrc

    # Zsh (add to ~/.zshrc)
    rl completion zsh >> ~/.zshrc

    # Fish
    rl completion fish > ~/.config/fish/completions/rl.fish

    # PowerShell
    rl completion powershell >> $PROFILE"
    )]
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// What to link to.
#[derive(Subcommand, Debug, Clone)]
pub enum ResourceArgs {
    /// Repository landing page
    Repo,

    /// Branch listing
    Branches,

    /// History of one or more branches
    Branch {
        /// Branch names
        #[arg(required = true)]
        branches: Vec<String>,
    },

    /// One or more commits
    Commit {
        /// Commit shas
        #[arg(required = true)]
        shas: Vec<String>,
    },

    /// Comparison between two refs
    Compare {
        /// Base ref
        base: String,

        /// Ref compared against the base
        compare: String,

        /// Use two-dot notation instead of three-dot
        #[arg(long)]
        two_dot: bool,
    },

    /// Page for opening a pull request
    Pr {
        /// Branch to merge into
        base: String,

        /// Branch to merge (default: the current branch)
        head: Option<String>,

        /// Remote the head branch lives on, for cross-fork requests
        #[arg(long, value_name = "NAME")]
        head_remote: Option<String>,

        /// Prefilled title
        #[arg(long)]
        title: Option<String>,

        /// Prefilled description
        #[arg(long)]
        description: Option<String>,
    },

    /// A file, optionally at a ref or commit
    File(FileArgs),
}

/// Arguments for `file`.
#[derive(Args, Debug, Clone)]
pub struct FileArgs {
    /// Path relative to the repository root
    pub path: String,

    /// Branch or tag
    #[arg(long = "ref", value_name = "REF")]
    pub reference: Option<String>,

    /// Commit sha; takes precedence over --ref
    #[arg(long)]
    pub sha: Option<String>,

    /// Line or line range, e.g. 10 or 10-20
    #[arg(long, value_name = "A[-B]", value_parser = parse_lines)]
    pub lines: Option<LineRange>,
}

fn parse_lines(s: &str) -> Result<LineRange, String> {
    LineRange::parse(s).ok_or_else(|| format!("invalid line range '{}', expected N or N-M", s))
}

impl ResourceArgs {
    /// Build the resources for everything but `pr`, which needs the remote.
    ///
    /// Returns `None` for `pr`.
    pub fn to_resources(&self) -> Option<Vec<RemoteResource>> {
        let resources = match self {
            ResourceArgs::Repo => vec![RemoteResource::Repo],
            ResourceArgs::Branches => vec![RemoteResource::Branches],
            ResourceArgs::Branch { branches } => {
                branches.iter().map(RemoteResource::branch).collect()
            }
            ResourceArgs::Commit { shas } => shas.iter().map(RemoteResource::commit).collect(),
            ResourceArgs::Compare {
                base,
                compare,
                two_dot,
            } => vec![RemoteResource::Comparison {
                base: base.clone(),
                compare: compare.clone(),
                notation: two_dot.then_some(ComparisonNotation::TwoDot),
            }],
            ResourceArgs::File(file) => vec![file.to_resource()],
            ResourceArgs::Pr { .. } => return None,
        };
        Some(resources)
    }
}

impl FileArgs {
    /// A `Revision` when a sha is given, otherwise a `File`.
    pub fn to_resource(&self) -> RemoteResource {
        match &self.sha {
            Some(sha) => RemoteResource::Revision {
                file_name: self.path.clone(),
                branch_or_tag: self.reference.clone(),
                sha: Some(sha.clone()),
                range: self.lines,
            },
            None => RemoteResource::File {
                file_name: self.path.clone(),
                branch_or_tag: self.reference.clone(),
                range: self.lines,
            },
        }
    }
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Get a configuration value
    Get {
        /// Configuration key
        key: String,
    },
    /// Set a configuration value
    Set {
        /// Configuration key
        key: String,
        /// Value to set
        value: String,
        /// Write to the global config instead of the repository's
        #[arg(long)]
        global: bool,
    },
    /// List all configuration values
    List,
}

/// Supported shells for completion
#[derive(clap::ValueEnum, Debug, Clone, Copy)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}
