//! slangshift CLI - formal-to-slang dataset and translation tool
//!
//! Prepares training datasets and serves translations.

use clap::{Parser, Subcommand, ValueEnum};
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use slangshift::config::{BackendKind, ServerConfig};
use slangshift::service::TranslationService;
use slangshift::{DatasetReport, FrequencyCorrector, PreprocessOptions, Preprocessor};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Formal-to-slang dataset preparation and translation
#[derive(Parser)]
#[command(
    name = "slangshift",
    version,
    about = "Prepare formal/slang datasets and translate formal text to slang",
    long_about = "slangshift - formal-to-slang dataset and translation tool.\n\n\
                  Cleans sentence-pair CSVs, formats them into instruction-style\n\
                  JSONL for fine-tuning, and serves translations over HTTP.\n\n\
                  Usage:\n  \
                  slangshift preprocess <csv>     Clean a raw dataset\n  \
                  slangshift format <csv>         Format pairs as JSONL\n  \
                  slangshift prepare <csv>        Clean and format in one step\n  \
                  slangshift serve                Start the web server"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Clean a raw formal/informal CSV
    Preprocess {
        /// Input CSV with formal_text and informal_text columns
        input: PathBuf,

        /// Output CSV (default: <input>_cleaned.csv)
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        pipeline: PipelineArgs,
    },

    /// Format a CSV of pairs into instruction-style JSONL
    Format {
        /// Input CSV (raw or cleaned)
        input: PathBuf,

        /// Output JSONL file
        #[arg(short, long, default_value = "formatted_dataset.jsonl")]
        output: PathBuf,
    },

    /// Clean a raw CSV and format it into JSONL in one step
    Prepare {
        /// Input CSV with formal_text and informal_text columns
        input: PathBuf,

        /// Output JSONL file
        #[arg(short, long, default_value = "formatted_dataset.jsonl")]
        output: PathBuf,

        #[command(flatten)]
        pipeline: PipelineArgs,
    },

    /// Run the normalization pipeline on a single text
    Normalize {
        /// Text to normalize
        text: String,

        #[command(flatten)]
        pipeline: PipelineArgs,
    },

    /// Translate formal text to slang
    Translate {
        /// Text to translate (omit for an interactive session)
        text: Option<String>,

        /// Translation backend (default: from SLANG_BACKEND)
        #[arg(long)]
        backend: Option<Backend>,
    },

    /// Start the web server
    Serve {
        /// Port to listen on (default: from PORT, or 5000)
        #[arg(short, long)]
        port: Option<u16>,

        /// Host to bind (default: from HOST, or 0.0.0.0)
        #[arg(long)]
        host: Option<String>,

        /// Translation backend (default: from SLANG_BACKEND)
        #[arg(long)]
        backend: Option<Backend>,
    },

    /// Show version information
    Version,
}

/// Pipeline flags shared by the dataset commands
#[derive(clap::Args)]
struct PipelineArgs {
    /// Normalization preset
    #[arg(long, default_value = "light")]
    preset: Preset,

    /// Word-frequency corpus enabling spelling correction
    #[arg(long)]
    spelling_corpus: Option<PathBuf>,

    /// Minimum cleaned field length; shorter rows are dropped
    #[arg(long)]
    min_length: Option<usize>,

    /// Process rows on a single thread
    #[arg(long)]
    sequential: bool,
}

/// Normalization preset
#[derive(Clone, ValueEnum)]
enum Preset {
    /// Contractions, case and elongation (default)
    Light,
    /// Every stage, including punctuation and emoji
    Standard,
    /// Case and elongation only
    Minimal,
}

/// Translation backend
#[derive(Clone, ValueEnum)]
enum Backend {
    /// Built-in rule table
    Rules,
    /// Hosted text-generation model
    Hosted,
}

impl From<Backend> for BackendKind {
    fn from(backend: Backend) -> Self {
        match backend {
            Backend::Rules => BackendKind::Rules,
            Backend::Hosted => BackendKind::Hosted,
        }
    }
}

impl PipelineArgs {
    fn build(&self) -> Result<Preprocessor, Box<dyn std::error::Error>> {
        let mut options = match self.preset {
            Preset::Light => PreprocessOptions::light(),
            Preset::Standard => PreprocessOptions::standard(),
            Preset::Minimal => PreprocessOptions::minimal(),
        };

        if let Some(min_length) = self.min_length {
            options = options.with_min_length(min_length);
        }
        if self.sequential {
            options = options.sequential();
        }

        match &self.spelling_corpus {
            Some(path) => {
                let corrector = FrequencyCorrector::from_path(path)?;
                let options = options.with_spelling_correction();
                Ok(Preprocessor::new(options).with_corrector(Arc::new(corrector)))
            }
            None => Ok(Preprocessor::new(options)),
        }
    }
}

fn main() {
    let cli = Cli::parse();

    init_tracing(matches!(cli.command, Some(Commands::Serve { .. })));

    if let Err(e) = run(cli) {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn init_tracing(serving: bool) {
    let default = if serving {
        "slangshift=info,tower_http=info"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let Some(command) = cli.command else {
        use clap::CommandFactory;
        Cli::command().print_help()?;
        return Ok(());
    };

    match command {
        Commands::Preprocess {
            input,
            output,
            pipeline,
        } => {
            let output = output.unwrap_or_else(|| default_cleaned_path(&input));
            let preprocessor = pipeline.build()?;

            let pb = create_spinner("Preprocessing dataset...");
            let report = slangshift::preprocess_csv(&input, &output, &preprocessor)?;
            pb.finish_and_clear();

            print_report("Preprocessing Complete", &output, &report);
        }

        Commands::Format { input, output } => {
            let pb = create_spinner("Formatting dataset...");
            let report = slangshift::format_csv(&input, &output)?;
            pb.finish_and_clear();

            print_report("Formatting Complete", &output, &report);
        }

        Commands::Prepare {
            input,
            output,
            pipeline,
        } => {
            let preprocessor = pipeline.build()?;

            let pb = create_spinner("Cleaning and formatting dataset...");
            let report = slangshift::prepare_dataset(&input, &output, &preprocessor)?;
            pb.finish_and_clear();

            print_report("Dataset Ready", &output, &report);
        }

        Commands::Normalize { text, pipeline } => {
            let preprocessor = pipeline.build()?;
            println!("{}", preprocessor.process(&text));
        }

        Commands::Translate { text, backend } => {
            let mut config = ServerConfig::from_env()?;
            if let Some(backend) = backend {
                config = config.with_backend(backend.into());
            }
            let service = TranslationService::from_config(&config);

            let runtime = tokio::runtime::Runtime::new()?;
            match text {
                Some(text) => {
                    let outcome = runtime.block_on(service.translate(&text))?;
                    println!("{}", outcome.informal);
                }
                None => runtime.block_on(interactive(&service))?,
            }
        }

        Commands::Serve {
            port,
            host,
            backend,
        } => {
            let mut config = ServerConfig::from_env()?;
            if let Some(port) = port {
                config = config.with_port(port);
            }
            if let Some(host) = host {
                config = config.with_host(host);
            }
            if let Some(backend) = backend {
                config = config.with_backend(backend.into());
            }

            println!(
                "{} Serving on http://{} ({} backend)",
                "▶".green().bold(),
                config.bind_address(),
                config.backend
            );

            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(slangshift::server::serve(config))?;
        }

        Commands::Version => {
            print_version();
        }
    }

    Ok(())
}

/// Reads sentences from stdin until `quit`, `exit` or `q`.
async fn interactive(service: &TranslationService) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", "Formal to Slang Translator".cyan().bold());
    println!("{}", "─".repeat(40));
    println!("Type 'quit', 'exit' or 'q' to stop.\n");

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print!("{} ", "Formal:".bold());
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;
        let text = line.trim();

        if matches!(text.to_lowercase().as_str(), "quit" | "exit" | "q") {
            break;
        }
        if text.is_empty() {
            continue;
        }

        match service.translate(text).await {
            Ok(outcome) => println!("{} {}\n", "Slang:".green().bold(), outcome.informal),
            Err(e) => eprintln!("{}: {}\n", "Error".red().bold(), e),
        }
    }

    println!("Goodbye!");
    Ok(())
}

fn default_cleaned_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .unwrap_or_default()
        .to_string_lossy()
        .to_string();
    let parent = input.parent().unwrap_or(Path::new("."));
    parent.join(format!("{}_cleaned.csv", stem))
}

fn print_report(title: &str, output: &Path, report: &DatasetReport) {
    println!("{}", title.green().bold());
    println!("{}", "─".repeat(40));
    println!("{}: {}", "Output".bold(), output.display());
    println!("{}: {}", "Rows read".bold(), report.rows_read);
    println!("{}: {}", "Rows written".bold(), report.rows_written);
    if report.rows_dropped > 0 {
        println!(
            "{}: {}",
            "Rows dropped".bold(),
            report.rows_dropped.to_string().yellow()
        );
    }
}

fn print_version() {
    println!("{} {}", "slangshift".green().bold(), env!("CARGO_PKG_VERSION"));
    println!("Formal-to-slang dataset preparation and translation");
    println!();
    println!("Backends: rules, hosted");
}

fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"])
            .template("{spinner:.blue} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_default_cleaned_path() {
        assert_eq!(
            default_cleaned_path(Path::new("data/raw.csv")),
            PathBuf::from("data/raw_cleaned.csv")
        );
    }

    #[test]
    fn test_pipeline_args() {
        let cli = Cli::try_parse_from([
            "slangshift",
            "preprocess",
            "raw.csv",
            "--preset",
            "standard",
            "--min-length",
            "5",
            "--sequential",
        ])
        .unwrap();

        let Some(Commands::Preprocess { pipeline, .. }) = cli.command else {
            panic!("expected preprocess command");
        };
        let preprocessor = pipeline.build().unwrap();
        assert_eq!(preprocessor.options().min_length, 5);
        assert!(!preprocessor.options().parallel);
        assert!(preprocessor.options().remove_punctuation);
    }
}
