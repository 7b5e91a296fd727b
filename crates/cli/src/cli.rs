use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Saved page kinds accepted by `render`
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PageKind {
    Ao3Work,
    Ao3Series,
    FfnStory,
    Digest,
}

/// Summarize AO3 and FanFiction.Net links the way the chat bot posts them
#[derive(Parser, Debug)]
#[command(name = "abstractor")]
#[command(author = "Abstractor Contributors")]
#[command(version)]
#[command(about = "Summarize AO3 and FanFiction.Net links", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Output file (default: stdout)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Custom config directory
    #[arg(long, global = true, value_name = "DIR")]
    pub config_dir: Option<PathBuf>,

    /// HTTP timeout in seconds
    #[arg(long, global = true, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Custom User-Agent for HTTP requests
    #[arg(long, global = true, value_name = "UA")]
    pub user_agent: Option<String>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Summaries for every link in a chat message
    Message {
        /// Message text
        text: String,
    },
    /// Summary for a single link
    Link {
        /// AO3 work, chapter or series link, or FFN story link
        url: String,
    },
    /// Summary of the work picked by reacting to a series summary
    React {
        /// The series summary that was reacted to
        #[arg(long)]
        message: String,
        /// Number emoji used as the reaction
        #[arg(long)]
        emoji: String,
        /// Server the reaction happened in
        #[arg(long)]
        guild: Option<u64>,
    },
    /// Summary from a saved page, without touching the network
    Render {
        /// What the saved page is
        #[arg(long, value_enum)]
        kind: PageKind,
        /// Saved page, or "-" for stdin
        #[arg(long, value_name = "PATH", default_value = "-")]
        file: String,
        /// Link the summary should carry
        #[arg(long)]
        link: String,
    },
    /// Introduction and usage text
    Intro {
        /// Server the text is for
        #[arg(long)]
        guild: Option<u64>,
    },
}
