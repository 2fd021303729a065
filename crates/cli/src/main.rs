use std::io;
use std::time::{Duration, Instant};

use anyhow::{Context, bail};
use articast_core::{
    ConversionConfig, Converter, DEFAULT_API_URL, Document, FetchConfig, Strategy, SynthesisConfig,
    extract_detailed, fetch_file, fetch_stdin, fetch_url, match_platform, supported_platforms,
};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use owo_colors::OwoColorize;
use url::Url;

mod echo;

use echo::{
    format_size, print_banner, print_detail, print_error, print_step, print_success, print_timing, print_warning,
};

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Turn articles from known publishing platforms into podcasts
#[derive(Parser, Debug)]
#[command(name = "articast")]
#[command(author = "Articast Contributors")]
#[command(version)]
#[command(about = "Turn articles from known publishing platforms into podcasts", long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List supported publishing platforms
    Platforms,

    /// Show which platform a URL belongs to
    Detect {
        /// Article URL
        url: String,
    },

    /// Extract article text from a URL, local HTML file, or "-" for stdin
    Extract {
        /// URL, file path, or "-"
        #[arg(value_name = "INPUT")]
        input: String,

        /// CSS selector for the article body (required for files and stdin)
        #[arg(short, long, value_name = "SELECTOR")]
        selector: Option<String>,

        /// HTTP timeout in seconds
        #[arg(long, default_value = "30", value_name = "SECS")]
        timeout: u64,
    },

    /// Convert an article into a podcast
    Convert {
        /// Article URL
        url: String,

        /// Synthesis workflow endpoint
        #[arg(long, default_value = DEFAULT_API_URL, env = "ARTICAST_API_URL")]
        api_url: String,

        /// Bearer token for the synthesis service
        #[arg(long, env = "ARTICAST_API_TOKEN", hide_env_values = true)]
        token: String,

        /// Workflow that performs the synthesis
        #[arg(long, env = "ARTICAST_WORKFLOW_ID")]
        workflow_id: String,

        /// Synthesis timeout in seconds
        #[arg(long, default_value = "300", value_name = "SECS", env = "ARTICAST_TIMEOUT_SECS")]
        timeout: u64,
    },

    /// Generate a shell completion script
    Completions {
        /// Target shell
        shell: Shell,
    },
}

fn http_url(input: &str) -> Option<Url> {
    Url::parse(input).ok().filter(|url| matches!(url.scheme(), "http" | "https"))
}

fn run_platforms() {
    for rule in supported_platforms() {
        println!("{:<24} {}", rule.name().bold(), rule.pattern().dimmed());
    }
}

fn run_detect(url: &str) {
    match match_platform(url) {
        Some(rule) => println!("{}", rule.name()),
        None => {
            println!("unsupported");
            print_warning("No platform rule matches; conversion will use the URL alone");
        }
    }
}

async fn run_extract(input: &str, selector: Option<String>, timeout: u64, verbose: bool) -> anyhow::Result<()> {
    let (html, selector) = if let Some(url) = http_url(input) {
        let selector = match (selector, match_platform(url.as_str())) {
            (Some(selector), _) => selector,
            (None, Some(rule)) => {
                if verbose {
                    print_detail("Platform", rule.name());
                }
                rule.body_selector().to_string()
            }
            (None, None) => bail!("{} is not on a supported platform; pass --selector", url),
        };

        if verbose {
            print_step(1, 2, &format!("Fetching {}", url.as_str().bright_white().underline()));
        }

        let config = FetchConfig { timeout: Duration::from_secs(timeout), ..Default::default() };
        let html = fetch_url(url.as_str(), &config).await.context("Failed to fetch URL")?;
        (html, selector)
    } else {
        let Some(selector) = selector else {
            bail!("--selector is required when reading from a file or stdin");
        };

        if verbose {
            print_step(1, 2, &format!("Reading {}", input.bright_white()));
        }

        let html = if input == "-" {
            fetch_stdin().context("Failed to read from stdin")?
        } else {
            fetch_file(input).with_context(|| format!("Failed to read file: {}", input))?
        };
        (html, selector)
    };

    if verbose {
        print_detail("Size", &format_size(html.len()));
        if let Ok(doc) = Document::parse(&html)
            && let Some(title) = doc.title()
        {
            print_detail("Title", title.trim());
        }
        print_step(2, 2, &format!("Extracting with {}", selector.bright_white()));
    }

    let Some(extraction) = extract_detailed(&html, &selector) else {
        bail!("no article text could be extracted");
    };

    if verbose {
        let strategy = match extraction.strategy {
            Strategy::Selector => "selector",
            Strategy::Paragraphs => "paragraph fallback",
        };
        print_detail("Strategy", strategy);
        print_detail("Characters", &extraction.char_count.to_string());
        eprintln!();
    }

    println!("{}", extraction.text);
    Ok(())
}

async fn run_convert(url: &str, config: ConversionConfig, verbose: bool) -> anyhow::Result<()> {
    let converter = Converter::new(config).context("Failed to build HTTP clients")?;

    if verbose {
        print_step(1, 1, &format!("Converting {}", url.bright_white().underline()));
    }

    let started = Instant::now();
    let conversion = converter.convert(url).await.context("Conversion failed")?;

    if verbose {
        print_detail("Platform", conversion.platform.as_deref().unwrap_or("unknown"));
        print_detail("Characters", &conversion.article_chars.to_string());
        print_timing("Elapsed", started.elapsed());
        eprintln!();
    }

    println!("audio: {}", conversion.assets.audio_url);
    println!("cover: {}", conversion.assets.cover_url);
    print_success("Podcast ready");

    Ok(())
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if cli.verbose {
        print_banner();
        tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::new("articast_core=debug"))
            .with_writer(io::stderr)
            .init();
    }

    let result = match cli.command {
        Command::Platforms => {
            run_platforms();
            Ok(())
        }
        Command::Detect { url } => {
            run_detect(&url);
            Ok(())
        }
        Command::Extract { input, selector, timeout } => run_extract(&input, selector, timeout, cli.verbose).await,
        Command::Convert { url, api_url, token, workflow_id, timeout } => {
            let config = ConversionConfig::builder()
                .synthesis(
                    SynthesisConfig::builder()
                        .api_url(api_url)
                        .token(token)
                        .workflow_id(workflow_id)
                        .timeout(Duration::from_secs(timeout))
                        .build(),
                )
                .build();
            run_convert(&url, config, cli.verbose).await
        }
        Command::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "articast", &mut io::stdout());
            Ok(())
        }
    };

    if let Err(e) = result {
        print_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}
