use anyhow::Context;
use clap::Parser;
use treemap::headless::{self, HeadlessOptions, OutputFormat};
use treemap_core::{config::Config, partition::LOAD_ERROR_STATUS};
use treemap_feeds::SheetSource;

#[derive(Parser)]
#[command(name = "treemap", about = "Community tree map from a published submissions sheet")]
struct Cli {
    /// Write debug logs to /tmp/treemap-debug.log (stderr in headless mode).
    #[arg(long)]
    debug: bool,

    /// Published CSV URL or local CSV path. Overrides `[source] url`.
    #[arg(long)]
    source: Option<String>,

    /// Include pending submissions alongside approved ones.
    #[arg(long)]
    show_pending: bool,

    /// Load once, print to stdout and exit instead of starting the TUI.
    #[arg(long)]
    headless: bool,

    /// Headless output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Headless: also print the monthly growth series.
    #[arg(long)]
    chart: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.debug {
        init_tracing(cli.headless)?;
    }

    let mut config = Config::load().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "config unreadable, using defaults");
        Config::defaults()
    });
    if let Some(source) = cli.source {
        config.source.url = source;
    }
    if cli.show_pending {
        config.ui.show_pending = true;
    }

    let runtime = tokio::runtime::Runtime::new()?;
    let normalizer = config.normalizer();

    if cli.headless {
        let source = SheetSource::from_config(&config.source).context(LOAD_ERROR_STATUS)?;
        let report = runtime
            .block_on(treemap_feeds::load(&source, &normalizer))
            .context(LOAD_ERROR_STATUS)?;
        let opts = HeadlessOptions {
            format: cli.format,
            include_pending: config.ui.show_pending,
            chart: cli.chart,
        };
        print!("{}", headless::render(&report, opts)?);
        return Ok(());
    }

    let source_config = config.source.clone();
    let loader: treemap_tui::Loader = Box::new(move || {
        let source = SheetSource::from_config(&source_config)?;
        Ok(runtime.block_on(treemap_feeds::load(&source, &normalizer))?)
    });

    treemap_tui::run(config, loader)
}

fn init_tracing(headless: bool) -> anyhow::Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug"));

    if headless {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_env_filter(filter)
            .init();
        return Ok(());
    }

    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open("/tmp/treemap-debug.log")?;
    tracing_subscriber::fmt()
        .with_writer(std::sync::Mutex::new(file))
        .with_ansi(false)
        .with_env_filter(filter)
        .init();
    tracing::info!("treemap debug log started, tail -f /tmp/treemap-debug.log");
    Ok(())
}
