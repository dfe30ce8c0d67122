use chrono::Local;
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use std::io::{self, Write};
use std::path::PathBuf;
use verinote::serve::collect_images;
use verinote::{explain, qr, AnalysisResult, Analyzer, Catalog, Verdict};

#[derive(Parser, Debug)]
#[command(name = "verinote")]
#[command(author, version, about = "Simulated currency-note verification (educational demo, not forensic)")]
struct Args {
    #[command(subcommand)]
    command: Option<Command>,

    /// Image file or directory of note photos (optional in GUI mode)
    path: Option<PathBuf>,

    /// Currency code to check against (see `verinote catalog list`)
    #[arg(short, long, default_value = "INR")]
    currency: String,

    /// Denomination label, e.g. 50
    #[arg(short, long, default_value = "50")]
    denomination: String,

    /// Fix the random seed for reproducible verdicts
    #[arg(long)]
    seed: Option<u64>,

    /// Load the currency catalog from a JSON file instead of the built-in table
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Launch GUI file picker (auto-enabled when double-clicked)
    #[arg(long)]
    gui: bool,

    /// Output report file (.csv, .json)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Directory for auto-generated reports
    #[arg(long, default_value = "verinote-reports")]
    report_dir: PathBuf,

    /// Don't auto-generate CSV report
    #[arg(long)]
    no_report: bool,

    /// Don't prompt to open report
    #[arg(long)]
    no_open: bool,

    /// Number of parallel workers (default: number of CPUs)
    #[arg(short, long)]
    jobs: Option<usize>,

    /// Show image statistics and the full explanation per note
    #[arg(short, long)]
    verbose: bool,

    /// Only show summary
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start interactive web UI for verification
    Serve {
        /// Image file or directory of note photos
        path: PathBuf,

        /// Port to listen on
        #[arg(short, long, default_value = "3001")]
        port: u16,

        /// Load the currency catalog from a JSON file
        #[arg(long)]
        catalog: Option<PathBuf>,
    },

    /// Browse or export the currency reference catalog
    Catalog {
        #[command(subcommand)]
        action: CatalogAction,
    },

    /// Simulated QR payload check against the catalog
    Qr {
        /// QR payload text, e.g. '{"currency":"INR","denom":"200"}'
        payload: String,
    },
}

#[derive(Subcommand, Debug)]
enum CatalogAction {
    /// List every currency, denomination, and its expected features
    List,

    /// Export the catalog as JSON
    Export {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() {
    let args = Args::parse();

    // Handle subcommands first
    if let Some(cmd) = args.command {
        match cmd {
            Command::Serve { path, port, catalog } => {
                let catalog = load_catalog(catalog);
                if let Err(e) = verinote::serve::start(port, path, catalog) {
                    eprintln!("Server error: {}", e);
                    std::process::exit(1);
                }
                return;
            }
            Command::Catalog { action } => {
                handle_catalog_action(action, load_catalog(args.catalog));
                return;
            }
            Command::Qr { payload } => {
                let check = qr::check(&load_catalog(args.catalog), &payload);
                println!("{}", check.summary());
                if !check.matched {
                    std::process::exit(1);
                }
                return;
            }
        }
    }

    let catalog = load_catalog(args.catalog.clone());

    // Determine if we should use GUI mode
    // With GUI feature: launch GUI if --gui flag OR no path provided
    // This makes double-click behavior "just work"
    #[cfg(feature = "gui")]
    let use_gui = args.gui || args.path.is_none();

    #[cfg(not(feature = "gui"))]
    let use_gui = false;

    // Handle GUI mode
    #[cfg(feature = "gui")]
    let path = if use_gui {
        match pick_path_gui() {
            Some(p) => p,
            None => {
                // User cancelled - show message and exit
                eprintln!("No file or folder selected.");
                std::process::exit(0);
            }
        }
    } else {
        // Path was provided via CLI
        args.path.clone().unwrap()
    };

    #[cfg(not(feature = "gui"))]
    let path = if let Some(p) = args.path.clone() {
        p
    } else {
        eprintln!("Usage: verinote <PATH>");
        eprintln!("Run 'verinote --help' for more options.");
        eprintln!("Note: GUI mode not available in this build.");
        std::process::exit(1);
    };

    // Set up thread pool
    if let Some(jobs) = args.jobs {
        rayon::ThreadPoolBuilder::new()
            .num_threads(jobs)
            .build_global()
            .ok();
    }

    // Collect note photos
    let files = collect_images(&path);

    if files.is_empty() {
        eprintln!("No images found (supported: jpg, jpeg, png, gif, bmp, webp, tiff)");
        std::process::exit(1);
    }

    let currency_name = catalog.display_name(&args.currency).to_string();

    if !args.quiet {
        eprintln!("\x1b[1mVerinote - Simulated Note Verification\x1b[0m");
        eprintln!("{}", "─".repeat(70));
        eprintln!(
            "Checking {} image(s) against {} — {}\n",
            files.len(),
            currency_name,
            args.denomination
        );
    }

    // Set up progress bar
    let pb = if !args.quiet && files.len() > 1 {
        let pb = ProgressBar::new(files.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .unwrap()
                .progress_chars("=>-"),
        );
        Some(pb)
    } else {
        None
    };

    // Create analyzer
    let mut analyzer = Analyzer::new().with_catalog(catalog);
    if let Some(seed) = args.seed {
        analyzer = analyzer.with_seed(seed);
    }

    // Scan in parallel - every request is independent
    let results: Vec<AnalysisResult> = files
        .par_iter()
        .map(|path| {
            let result = analyzer.analyze(path, &args.currency, &args.denomination);
            if let Some(ref pb) = pb {
                pb.inc(1);
                pb.set_message(result.file_name.clone());
            }
            result
        })
        .collect();

    if let Some(pb) = pb {
        pb.finish_and_clear();
    }

    // Print results
    if !args.quiet {
        for r in &results {
            let color = match r.verdict {
                Verdict::Real => "\x1b[32m", // Green
                Verdict::Fake => "\x1b[31m", // Red
            };
            let reset = "\x1b[0m";

            let reasons = if r.suspicious_reasons.is_empty() {
                "-".to_string()
            } else {
                r.suspicious_reasons.join("; ")
            };

            println!(
                "{}{:<8}{} {:>3}%  {}/{} features  {:<34}  {}",
                color,
                format!("[{}]", r.verdict),
                reset,
                r.confidence_pct(),
                r.observed_features.len(),
                r.expected_features.len(),
                truncate(&reasons, 34),
                &r.file_name
            );

            if args.verbose {
                eprintln!(
                    "    Stats: brightness={:.1} contrast={:.1} edges={:.1} | p(real)={:.3}",
                    r.stats.brightness, r.stats.contrast, r.stats.edge_density, r.probability_real
                );
                for line in explain::compose(r, &currency_name).lines() {
                    if !line.is_empty() {
                        eprintln!("    {}", line);
                    }
                }
            }
        }
    }

    // Summary
    let real_count = results.iter().filter(|r| r.verdict == Verdict::Real).count();
    let fake_count = results.iter().filter(|r| r.verdict == Verdict::Fake).count();

    if !args.quiet {
        eprintln!("\n{}", "─".repeat(70));
        eprintln!("\x1b[1mSummary:\x1b[0m");
        eprintln!("  \x1b[32m✓ Looks real:\x1b[0m {}", real_count);
        eprintln!("  \x1b[31m✗ Looks fake:\x1b[0m {}", fake_count);
        eprintln!("\n\x1b[90mSimulated verdicts for education only - not a forensic result.\x1b[0m");
    }

    // Determine report path
    let report_path = if let Some(ref output) = args.output {
        Some(output.clone())
    } else if !args.no_report {
        // Auto-generate report
        std::fs::create_dir_all(&args.report_dir).ok();
        let timestamp = Local::now().format("%Y%m%d_%H%M%S");
        let filename = format!("verinote_report_{}.csv", timestamp);
        Some(args.report_dir.join(filename))
    } else {
        None
    };

    // Generate report
    if let Some(ref output_path) = report_path {
        if let Err(e) = verinote::report::generate(output_path, &results) {
            eprintln!("Failed to write report: {}", e);
            std::process::exit(1);
        }
        if !args.quiet {
            eprintln!("\n\x1b[32mReport saved: {}\x1b[0m", output_path.display());
        }

        // Open report
        if !args.no_open {
            if use_gui {
                // In GUI mode, auto-open the report (no prompt)
                let _ = open::that(output_path);
            } else if !args.quiet {
                // In terminal mode, ask first
                eprint!("\nOpen report? [Y/n] ");
                io::stderr().flush().ok();

                let mut input = String::new();
                if io::stdin().read_line(&mut input).is_ok() {
                    let input = input.trim().to_lowercase();
                    if input.is_empty() || input == "y" || input == "yes" {
                        if let Err(e) = open::that(output_path) {
                            eprintln!("Failed to open report: {}", e);
                        }
                    }
                }
            }
        }
    }

    // Exit with appropriate code
    if fake_count > 0 {
        std::process::exit(2);
    }
}

fn load_catalog(path: Option<PathBuf>) -> Catalog {
    match path {
        Some(p) => match Catalog::from_path(&p) {
            Ok(catalog) => catalog,
            Err(e) => {
                eprintln!("Failed to load catalog {}: {}", p.display(), e);
                std::process::exit(1);
            }
        },
        None => Catalog::builtin(),
    }
}

fn handle_catalog_action(action: CatalogAction, catalog: Catalog) {
    match action {
        CatalogAction::List => {
            println!("{:<6} {:<22} {:<14} {}", "CODE", "NAME", "DENOMINATION", "EXPECTED FEATURES");
            println!("{}", "-".repeat(90));
            for row in catalog.rows() {
                println!(
                    "{:<6} {:<22} {:<14} {}",
                    row.code,
                    row.name,
                    row.denomination,
                    row.features.join(", ")
                );
            }
        }

        CatalogAction::Export { output } => match output {
            Some(path) => match std::fs::write(&path, catalog.to_json()) {
                Ok(()) => println!("Catalog exported: {}", path.display()),
                Err(e) => {
                    eprintln!("Failed to export catalog: {}", e);
                    std::process::exit(1);
                }
            },
            None => println!("{}", catalog.to_json()),
        },
    }
}

#[cfg(feature = "gui")]
fn pick_path_gui() -> Option<PathBuf> {
    // First try folder picker
    if let Some(folder) = rfd::FileDialog::new()
        .set_title("Select folder of note photos (or Cancel for single file)")
        .pick_folder()
    {
        return Some(folder);
    }

    // If cancelled, offer file picker
    rfd::FileDialog::new()
        .set_title("Select note photo to verify")
        .add_filter("Images", &verinote::serve::IMAGE_EXTENSIONS)
        .pick_file()
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        s.to_string()
    } else {
        format!("{}...", &s[..max_len - 3])
    }
}
