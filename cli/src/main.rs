//! pdfreflow CLI - reflowed PDF text extraction tool

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use colored::Colorize;

use pdfreflow::{decode_payload, Extractor, Payload};

#[derive(Parser)]
#[command(name = "pdfreflow")]
#[command(version)]
#[command(about = "Extract clean, reflowed text from PDF documents", long_about = None)]
struct Cli {
    /// Input PDF file
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract reflowed plain text
    Text {
        /// Input PDF file ("-" reads stdin)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Treat input as base64-encoded PDF data
        #[arg(long)]
        base64: bool,

        #[command(flatten)]
        reflow: ReflowArgs,
    },

    /// Extract the full result payload as JSON
    Json {
        /// Input PDF file ("-" reads stdin)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Treat input as base64-encoded PDF data
        #[arg(long)]
        base64: bool,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        #[command(flatten)]
        reflow: ReflowArgs,
    },

    /// Show page count and extraction method
    Info {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        #[command(flatten)]
        reflow: ReflowArgs,
    },
}

const DEFAULT_OCR_THRESHOLD: usize = 50;
const DEFAULT_OCR_LANGUAGES: [&str; 2] = ["eng", "tur"];

#[derive(clap::Args, Debug, PartialEq)]
struct ReflowArgs {
    /// OCR trigger threshold in characters
    #[arg(long, default_value_t = DEFAULT_OCR_THRESHOLD)]
    ocr_threshold: usize,

    /// OCR language models, comma-separated
    #[arg(long, value_delimiter = ',', default_values_t = DEFAULT_OCR_LANGUAGES.map(String::from))]
    ocr_languages: Vec<String>,

    /// Apply Unicode NFC normalization
    #[arg(long)]
    nfc: bool,
}

impl Default for ReflowArgs {
    fn default() -> Self {
        Self {
            ocr_threshold: DEFAULT_OCR_THRESHOLD,
            ocr_languages: DEFAULT_OCR_LANGUAGES.map(String::from).to_vec(),
            nfc: false,
        }
    }
}

impl ReflowArgs {
    fn extractor(&self) -> Extractor {
        Extractor::new()
            .with_ocr_trigger_chars(self.ocr_threshold)
            .with_ocr_languages(self.ocr_languages.clone())
            .with_unicode_normalization(self.nfc)
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Text {
            input,
            output,
            base64,
            reflow,
        }) => cmd_text(&input, output.as_deref(), base64, &reflow),
        Some(Commands::Json {
            input,
            output,
            base64,
            compact,
            reflow,
        }) => cmd_json(&input, output.as_deref(), base64, compact, &reflow),
        Some(Commands::Info { input, reflow }) => cmd_info(&input, &reflow),
        None => {
            if let Some(input) = cli.input {
                cmd_text(&input, None, false, &ReflowArgs::default())
            } else {
                println!("{}", "Usage: pdfreflow <FILE>".yellow());
                println!("       pdfreflow --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn read_input(input: &Path, base64: bool) -> Result<Vec<u8>, Box<dyn std::error::Error>> {
    let raw = if input.as_os_str() == "-" {
        let mut buf = Vec::new();
        std::io::stdin().read_to_end(&mut buf)?;
        buf
    } else {
        fs::read(input)?
    };

    let bytes = if base64 {
        let text = String::from_utf8(raw).map_err(|_| "base64 input must be valid UTF-8")?;
        decode_payload(Payload::Base64(&text))?
    } else {
        decode_payload(Payload::Raw(&raw))?
    };
    Ok(bytes)
}

fn write_output(output: Option<&Path>, content: &str) -> Result<(), Box<dyn std::error::Error>> {
    match output {
        Some(path) => {
            fs::write(path, content)?;
            eprintln!("{} {}", "Wrote".green(), path.display());
        }
        None => println!("{content}"),
    }
    Ok(())
}

fn cmd_text(
    input: &Path,
    output: Option<&Path>,
    base64: bool,
    reflow: &ReflowArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let bytes = read_input(input, base64)?;
    let result = reflow.extractor().extract_bytes(&bytes)?;
    if !result.success {
        return Err(result
            .error
            .unwrap_or_else(|| "extraction failed".to_string())
            .into());
    }
    write_output(output, &result.text)
}

fn cmd_json(
    input: &Path,
    output: Option<&Path>,
    base64: bool,
    compact: bool,
    reflow: &ReflowArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let bytes = read_input(input, base64)?;
    let result = reflow.extractor().extract_bytes(&bytes)?;
    let json = if compact {
        serde_json::to_string(&result)?
    } else {
        serde_json::to_string_pretty(&result)?
    };
    write_output(output, &json)?;
    if !result.success {
        std::process::exit(1);
    }
    Ok(())
}

fn cmd_info(input: &Path, reflow: &ReflowArgs) -> Result<(), Box<dyn std::error::Error>> {
    let bytes = read_input(input, false)?;
    let result = reflow.extractor().extract_bytes(&bytes)?;
    if !result.success {
        return Err(result
            .error
            .unwrap_or_else(|| "extraction failed".to_string())
            .into());
    }
    println!("{}: {}", "Pages".bold(), result.page_count);
    println!("{}: {}", "Method".bold(), result.method);
    println!(
        "{}: {} chars",
        "Text".bold(),
        result.text.chars().count()
    );
    Ok(())
}
