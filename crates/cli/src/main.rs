use std::fs;

use abstractor_core::{
    Abstractor, BotConfig, ConfigLoaderBuilder, Directive, Document, HttpFetcher, ao3, error_message, fetch_file,
    fetch_stdin, ffn, format_series, format_work, introduction, parse_link,
};
use anyhow::Context;
use clap::Parser;
use owo_colors::OwoColorize;
use tracing::debug;

use cli::{Args, Command, PageKind};

mod cli;
mod echo;
mod logging;

const VERSION: &str = env!("CARGO_PKG_VERSION");

fn load_config(args: &Args) -> anyhow::Result<BotConfig> {
    let mut builder = ConfigLoaderBuilder::new();
    if let Some(dir) = &args.config_dir {
        builder = builder.custom_dir(dir);
    }
    let mut config = builder.build().load().context("Failed to load config")?;

    if let Some(timeout) = args.timeout {
        config.add_directive(Directive::Timeout(timeout));
    }
    if let Some(agent) = &args.user_agent {
        config.add_directive(Directive::UserAgent(agent.clone()));
    }

    Ok(config)
}

fn abstractor(config: BotConfig) -> anyhow::Result<Abstractor<HttpFetcher>> {
    let fetcher = HttpFetcher::new(&config.fetch_config()).context("Failed to build HTTP client")?;
    Ok(Abstractor::new(fetcher, config))
}

fn render(kind: PageKind, file: &str, link: &str, config: &BotConfig) -> anyhow::Result<String> {
    let body = if file == "-" {
        fetch_stdin().context("Failed to read from stdin")?
    } else {
        fetch_file(file).with_context(|| format!("Failed to read file: {}", file))?
    };
    debug!(size = %echo::format_size(body.len()), "read saved page");

    let extract = config.extract_config();
    let format = config.format_config();

    let summary = match kind {
        PageKind::Ao3Work => format_work(&ao3::extract_work(&Document::parse(&body), link, &extract)?, &format),
        PageKind::Ao3Series => {
            format_series(&ao3::extract_series(&Document::parse(&body), link, &extract)?, &format)
        }
        PageKind::FfnStory => format_work(&ffn::extract_story(&Document::parse(&body), link, &extract)?, &format),
        PageKind::Digest => format_work(&ffn::parse_digest(&body, link, &extract)?, &format),
    };

    Ok(summary)
}

async fn run(args: &Args, config: BotConfig) -> anyhow::Result<String> {
    match &args.command {
        Command::Message { text } => {
            if args.verbose {
                echo::print_step(1, 2, "Finding links");
            }
            let abstractor = abstractor(config)?;
            if args.verbose {
                echo::print_step(2, 2, "Summarizing");
            }
            Ok(abstractor.summaries_for_message(text).await.join("\n\n"))
        }
        Command::Link { url } => {
            let link = parse_link(url).with_context(|| format!("Not an AO3 or FFN link: {}", url))?;
            if args.verbose {
                echo::print_detail("Link", &link.link);
            }
            let abstractor = abstractor(config)?;
            match abstractor.try_summarize(&link).await {
                Ok(summary) => Ok(summary),
                Err(e) if link.mobile && e.is_fetch_failure() => {
                    echo::print_warning("Mobile page unavailable, using the desktop link");
                    Ok(link.link)
                }
                Err(e) => {
                    echo::print_warning(&error_message(&link.link, abstractor.config()));
                    Err(e).with_context(|| format!("Failed to summarize {}", link.link))
                }
            }
        }
        Command::React { message, emoji, guild } => {
            let abstractor = abstractor(config)?;
            Ok(abstractor.summary_for_reaction(message, emoji, *guild).await)
        }
        Command::Render { kind, file, link } => render(*kind, file, link, &config),
        Command::Intro { guild } => Ok(introduction(*guild, &config)),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logging::init(args.verbose)?;

    if args.verbose {
        echo::print_banner();
        echo::print_info("Debug logging enabled");
        eprintln!();
    }

    let config = load_config(&args)?;
    let output = run(&args, config).await?;

    if output.is_empty() {
        echo::print_warning("Nothing to summarize");
        return Ok(());
    }

    match &args.output {
        Some(path) => {
            fs::write(path, format!("{}\n", output))
                .with_context(|| format!("Failed to write to file: {}", path.display()))?;
            echo::print_success(&format!("Output written to {}", path.display().bright_white()));
        }
        None => println!("{}", output),
    }

    Ok(())
}
