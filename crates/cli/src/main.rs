use clap::{ArgAction, Parser};
use gridslide_core::solver::LogObserver;
use gridslide_core::{output, DeckConfig, SlideDeck};
use std::io::Read;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "gridslide", about = "Lay out Bootstrap grid HTML as slide rectangles")]
struct Cli {
    /// The HTML file to lay out (use - for stdin)
    file: String,

    /// Deck config JSON (page, bands, debug sections)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output as JSON instead of compact format
    #[arg(long)]
    json: bool,

    /// Page size in inches as WxH, overrides the config
    #[arg(long)]
    page: Option<String>,

    /// Gutter in inches, overrides the config
    #[arg(long)]
    gutter: Option<f64>,

    /// Height of one row band in inches, overrides the config
    #[arg(long)]
    band: Option<f64>,

    /// Emit the 12-column guide overlay
    #[arg(long)]
    grid: bool,

    /// Emit an outline around every placement
    #[arg(long)]
    bbox: bool,

    /// More logging (-v debug, -vv solver trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn parse_page(s: &str) -> Option<(f64, f64)> {
    let (w, h) = s.split_once('x')?;
    Some((w.trim().parse().ok()?, h.trim().parse().ok()?))
}

fn main() {
    let cli = Cli::parse();

    let default_filter = match cli.verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    match run(&cli) {
        Ok(deck) => print_deck(&deck, cli.json),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

fn run(cli: &Cli) -> Result<SlideDeck, Box<dyn std::error::Error>> {
    let mut config = match &cli.config {
        Some(path) => DeckConfig::load(path)?,
        None => DeckConfig::default(),
    };
    if let Some(page) = &cli.page {
        let (w, h) = parse_page(page).ok_or_else(|| format!("invalid --page value: {page}"))?;
        config.page.width_in = w;
        config.page.height_in = h;
    }
    if let Some(gutter) = cli.gutter {
        config.page.gutter_in = gutter;
    }
    if let Some(band) = cli.band {
        config.bands.row_height_in = band;
    }
    config.debug.grid |= cli.grid;
    config.debug.bbox |= cli.bbox;
    log::debug!("deck config: {:?}", config);

    let html = if cli.file == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        std::fs::read_to_string(&cli.file)?
    };

    let deck = if cli.verbose >= 2 {
        gridslide_core::parse_with(&html, &config, &mut LogObserver)?
    } else {
        gridslide_core::parse(&html, &config)?
    };
    Ok(deck)
}

fn print_deck(deck: &SlideDeck, as_json: bool) {
    if as_json {
        match serde_json::to_string_pretty(deck) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
    } else {
        println!("page: {}x{}", deck.page[0], deck.page[1]);
        println!("shapes: {}", deck.shapes.len());
        println!("---");
        println!("{}", output::to_compact_string(deck));
    }
}
