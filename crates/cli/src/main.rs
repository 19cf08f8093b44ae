mod echo;

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use clipdown_core::{FetchConfig, MarkdownConfig, ReadabilityConfig, RunConfig, run};
use owo_colors::OwoColorize;

const VERSION: &str = env!("CARGO_PKG_VERSION");

const DEFAULT_URL: &str = "https://www.poetryfoundation.org/poetrymagazine/poems/155480/one-of-us";

/// Save the readable part of a web page as a Markdown file named after its title
#[derive(Parser, Debug)]
#[command(name = "clipdown")]
#[command(version)]
#[command(about = "Save the readable part of a web page as Markdown", long_about = None)]
struct Args {
    /// Page to fetch
    #[arg(value_name = "URL", default_value = DEFAULT_URL)]
    url: String,

    /// Directory the Markdown file is written to (must exist)
    #[arg(short, long, default_value = ".", value_name = "DIR")]
    output_dir: PathBuf,

    /// HTTP timeout in seconds
    #[arg(long, default_value = "30", value_name = "SECS")]
    timeout: u64,

    /// Custom User-Agent for HTTP requests
    #[arg(long, value_name = "UA")]
    user_agent: Option<String>,

    /// Minimum character threshold for content candidates
    #[arg(long, default_value = "500", value_name = "NUM")]
    char_threshold: usize,

    /// Minimum score the article candidate must reach
    #[arg(long, default_value = "20", value_name = "NUM")]
    min_score: f64,

    /// Strip images from output
    #[arg(long)]
    no_images: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn run_config(&self) -> RunConfig {
        let mut fetch = FetchConfig { timeout: self.timeout, ..Default::default() };
        if let Some(user_agent) = &self.user_agent {
            fetch.user_agent = user_agent.clone();
        }

        RunConfig {
            fetch,
            readability: ReadabilityConfig::builder()
                .min_score(self.min_score)
                .char_threshold(self.char_threshold)
                .preserve_images(!self.no_images)
                .build(),
            markdown: MarkdownConfig { strip_images: self.no_images },
            output_dir: self.output_dir.clone(),
        }
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose { "debug,selectors=warn,html5ever=warn" } else { "warn" };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    if args.verbose {
        echo::print_banner();
        echo::print_info("Debug logging enabled");
        eprintln!();
    }

    echo::print_step(&format!("Clipping {}", args.url.bright_white().underline()));

    let report = run(&args.url, &args.run_config())
        .await
        .with_context(|| format!("Failed to save {}", args.url))?;

    echo::print_success(&format!("Saved {}", report.path.display().bright_white()));
    echo::print_detail("Title", &report.title);
    echo::print_detail("Size", &echo::format_size(report.bytes));

    match &report.site_name {
        Some(site_name) => println!("{site_name}"),
        None => echo::print_warning("Page does not name its site"),
    }

    Ok(())
}
