// src/cli.rs
use std::{
    io::{self, BufRead, IsTerminal, Write},
    path::{Path, PathBuf},
    sync::Arc,
};

use clap::Parser;
use color_eyre::eyre::{eyre, Result, WrapErr};

use crate::{
    config::{
        consts::LOG_FILE,
        options::{AppOptions, OutputFormat, RendererKind},
    },
    core::net,
    detector::Registry,
    file,
    progress::NullProgress,
    report::{self, ConsoleProgress, Palette},
    scan::Scan,
};

#[derive(Parser, Debug, Default)]
#[command(name = "doomscope", version, about = "Identify page types (login, paywall, error, …) for a list of URLs")]
pub struct Args {
    /// File with one URL per line; asked for interactively when omitted
    pub url_file: Option<PathBuf>,

    /// Directory of detector JSON files
    #[arg(short, long, value_name = "DIR")]
    pub detectors: Option<PathBuf>,

    /// How pages are fetched: http (no JavaScript) or chrome (headless, rendered DOM)
    #[arg(short, long, value_parser = parse_renderer)]
    pub renderer: Option<RendererKind>,

    /// Chrome/Chromium binary (default: search PATH)
    #[arg(long, value_name = "PATH")]
    pub chrome: Option<PathBuf>,

    /// Pages fetched in parallel
    #[arg(short, long)]
    pub workers: Option<usize>,

    /// Per-page render timeout in seconds
    #[arg(short, long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Output format: text or json
    #[arg(short, long, value_parser = parse_format)]
    pub format: Option<OutputFormat>,

    /// Show every detector's score breakdown
    #[arg(long)]
    pub explain: bool,

    /// Disable colored output (also: NO_COLOR env, non-terminal stdout)
    #[arg(long)]
    pub no_color: bool,

    /// Config file (default: ./doomscope.toml if present)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Print the loaded detectors and exit
    #[arg(long)]
    pub list_detectors: bool,

    /// Debug-level logging to the log file
    #[arg(short, long)]
    pub verbose: bool,
}

fn parse_renderer(s: &str) -> std::result::Result<RendererKind, String> {
    RendererKind::parse(s).ok_or_else(|| format!("unknown renderer '{}' (http|chrome)", s))
}

fn parse_format(s: &str) -> std::result::Result<OutputFormat, String> {
    match s.to_ascii_lowercase().as_str() {
        "text" => Ok(OutputFormat::Text),
        "json" => Ok(OutputFormat::Json),
        other => Err(format!("unknown format '{}' (text|json)", other)),
    }
}

pub fn parse_args() -> Args {
    Args::parse()
}

/// Config file first, then flags on top.
pub fn resolve_options(args: &Args) -> Result<AppOptions> {
    let mut opts = AppOptions::load(args.config.as_deref())?;

    let scan = &mut opts.scan;
    if let Some(d) = &args.detectors { scan.detectors_dir = d.clone(); }
    if let Some(r) = args.renderer { scan.renderer = r; }
    if let Some(c) = &args.chrome { scan.chrome_path = Some(c.clone()); }
    if let Some(w) = args.workers { scan.workers = w; }
    if let Some(t) = args.timeout { scan.timeout_secs = t; }
    scan.validate()?;

    let out = &mut opts.output;
    if let Some(f) = args.format { out.format = f; }
    if args.explain { out.explain = true; }
    if args.no_color { out.color = false; }

    Ok(opts)
}

fn palette_for(opts: &AppOptions) -> Palette {
    let env_off = std::env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty());
    if opts.output.color && !env_off && io::stdout().is_terminal() {
        Palette::colored()
    } else {
        Palette::plain()
    }
}

fn prompt_for_path() -> Result<PathBuf> {
    print!("Enter path to URL file: ");
    io::stdout().flush()?;
    let mut line = s!();
    io::stdin().lock().read_line(&mut line)?;
    let t = line.trim();
    if t.is_empty() {
        return Err(eyre!("no URL file given"));
    }
    Ok(PathBuf::from(t))
}

fn list_detectors(registry: &Registry, palette: Palette) {
    for d in registry {
        let origin = registry.origin(&d.name).unwrap_or("");
        println!(
            "{}  {}",
            palette.hit(&d.name),
            palette.dim(&format!(
                "{} signals, min score {} ({})",
                d.signal_count(), d.logic.min_total_score, origin
            )),
        );
    }
}

pub fn run(args: Args) -> Result<()> {
    crate::log::init(args.verbose, Path::new(LOG_FILE));

    let opts = resolve_options(&args)?;
    let palette = palette_for(&opts);

    let registry = Registry::load_dir(&opts.scan.detectors_dir)
        .wrap_err("loading detectors")?;

    if args.list_detectors {
        list_detectors(&registry, palette);
        return Ok(());
    }

    let path = match args.url_file.clone() {
        Some(p) => p,
        None => prompt_for_path()?,
    };
    if !path.is_file() {
        return Err(eyre!("File not found: {}", path.display()));
    }
    let urls = file::read_url_list(&path)
        .wrap_err_with(|| format!("reading {}", path.display()))?;

    let renderer = net::build_renderer(&opts.scan)?;
    let scan = Scan::new(Arc::new(registry), renderer, opts.scan.clone());

    match opts.output.format {
        OutputFormat::Text => {
            let stdout = io::stdout();
            let mut progress = ConsoleProgress::new(stdout.lock(), palette, opts.output.explain);
            progress.print_banner()?;
            if urls.is_empty() {
                println!("{}", palette.dim("No URLs in file"));
                return Ok(());
            }
            scan.run(&urls, Some(&mut progress));
        }
        OutputFormat::Json => {
            let reports = scan.run(&urls, Some(&mut NullProgress));
            println!("{}", report::to_json(&reports, opts.output.explain)?);
        }
    }
    Ok(())
}
