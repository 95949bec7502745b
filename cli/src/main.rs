//! unhwp CLI - HWP text extraction tool

use std::borrow::Cow;
use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use unhwp::container::{list_content_streams, read_file_header, read_stream};
use unhwp::parser::{decompress, tags, RecordIter};
use unhwp::{
    ContainerCapability, FallbackOptions, FileHeader, HwpExtractor, JsonFormat, ParseOptions,
};

#[derive(Parser)]
#[command(name = "unhwp")]
#[command(version)]
#[command(about = "Extract plain text from HWP documents", long_about = None)]
struct Cli {
    /// Input HWP file
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Output file (stdout if not specified)
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract plain text (structured parse, then fallback scan)
    Text {
        /// Input HWP file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Apply Unicode NFC normalization
        #[arg(long)]
        normalize: bool,

        /// Abort on the first unreadable section instead of skipping it
        #[arg(long)]
        strict: bool,

        /// Maximum inflated size of one section, in MiB
        #[arg(long, value_name = "MIB", default_value = "50")]
        max_stream_mb: usize,
    },

    /// Parse the document structure and print it as JSON
    Json {
        /// Input HWP file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Show header flags and section statistics
    Info {
        /// Input HWP file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Dump the record headers of each body-text section
    Records {
        /// Input HWP file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Only dump this section index
        #[arg(short, long)]
        section: Option<u32>,

        /// Only show paragraph text records
        #[arg(long)]
        text_only: bool,
    },

    /// Scan raw bytes for Korean text lines without parsing the container
    Fallback {
        /// Input file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Lines must be longer than this many characters
        #[arg(long, default_value = "5")]
        min_chars: usize,

        /// Minimum share of Hangul among a line's non-ASCII characters
        #[arg(long, default_value = "0.2")]
        min_ratio: f32,
    },

    /// Extract many files in parallel, writing one .txt per input
    Batch {
        /// Input HWP files
        #[arg(value_name = "FILES", required = true)]
        inputs: Vec<PathBuf>,

        /// Output directory (next to each input if not specified)
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,
    },

    /// Show version information
    Version,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Text {
            input,
            output,
            normalize,
            strict,
            max_stream_mb,
        }) => {
            let mut options = ParseOptions::new()
                .with_unicode_normalization(normalize)
                .with_max_stream_size(mib_to_bytes(max_stream_mb));
            if strict {
                options = options.strict();
            }
            cmd_text(&input, output.as_deref(), options)
        }
        Some(Commands::Json {
            input,
            output,
            compact,
        }) => cmd_json(&input, output.as_deref(), compact),
        Some(Commands::Info { input }) => cmd_info(&input),
        Some(Commands::Records {
            input,
            section,
            text_only,
        }) => cmd_records(&input, section, text_only),
        Some(Commands::Fallback {
            input,
            output,
            min_chars,
            min_ratio,
        }) => {
            let options = FallbackOptions::new()
                .with_min_line_chars(min_chars)
                .with_min_script_ratio(min_ratio);
            cmd_fallback(&input, output.as_deref(), options)
        }
        Some(Commands::Batch { inputs, output }) => cmd_batch(&inputs, output.as_deref()),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            // Default behavior: extract text if input is provided
            if let Some(input) = cli.input {
                cmd_text(&input, cli.output.as_deref(), ParseOptions::default())
            } else {
                println!("{}", "Usage: unhwp <FILE> [OUTPUT]".yellow());
                println!("       unhwp --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn mib_to_bytes(mib: usize) -> usize {
    mib.saturating_mul(1024 * 1024)
}

type CliResult = Result<(), Box<dyn std::error::Error>>;

fn write_output(output: Option<&Path>, content: &str) -> CliResult {
    if let Some(path) = output {
        fs::write(path, content)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", content);
    }
    Ok(())
}

fn cmd_text(input: &Path, output: Option<&Path>, options: ParseOptions) -> CliResult {
    let data = fs::read(input)?;
    let extractor = HwpExtractor::new().with_options(options);

    match extractor.extract(&data) {
        Some(found) => {
            if found.strategy != "structured" {
                eprintln!(
                    "{} text recovered by the {} scan",
                    "Note:".yellow(),
                    found.strategy
                );
            }
            write_output(output, &found.text)
        }
        None => Err(format!("No text found in {}", input.display()).into()),
    }
}

fn cmd_json(input: &Path, output: Option<&Path>, compact: bool) -> CliResult {
    let doc = unhwp::parse_file(input)?;

    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };

    let json = unhwp::render::to_json(&doc, format)?;
    write_output(output, &json)
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "Yes"
    } else {
        "No"
    }
}

fn cmd_info(input: &Path) -> CliResult {
    let data = fs::read(input)?;

    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!("{}: {}", "File".bold(), input.display());

    match unhwp::detect_format_from_bytes(&data) {
        Ok(format) => println!("{}: {}", "Container".bold(), format),
        Err(e) => {
            println!("{}: {}", "Container".bold(), e.to_string().red());
            return Ok(());
        }
    }

    let doc = unhwp::parse_bytes(&data)?;
    let meta = &doc.metadata;
    println!("{}: HWP {}", "Format".bold(), meta.version);
    if !meta.signature_valid {
        println!("{}", "FileHeader signature missing".yellow());
    }
    println!("{}: {}", "Compressed".bold(), yes_no(meta.compressed));
    println!(
        "{}: {}",
        "Password".bold(),
        yes_no(meta.password_protected)
    );
    println!("{}: {}", "Distribution".bold(), yes_no(meta.distribution));

    println!();
    println!("{}", "Content Statistics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    let stats = &doc.stats;
    println!("{}: {}", "Sections".bold(), meta.section_count);
    println!("{}: {}", "Records".bold(), stats.record_count);
    println!("{}: {}", "Paragraphs".bold(), stats.paragraph_count);
    println!("{}: {}", "Characters".bold(), stats.char_count);
    if stats.skipped_sections > 0 {
        println!(
            "{}: {}",
            "Skipped sections".bold(),
            stats.skipped_sections.to_string().yellow()
        );
    }
    if stats.truncated_sections > 0 {
        println!(
            "{}: {}",
            "Truncated sections".bold(),
            stats.truncated_sections.to_string().yellow()
        );
    }
    if stats.inflate_fallbacks > 0 {
        println!(
            "{}: {}",
            "Sections read raw".bold(),
            stats.inflate_fallbacks.to_string().yellow()
        );
    }

    Ok(())
}

fn cmd_records(input: &Path, only_section: Option<u32>, text_only: bool) -> CliResult {
    let data = fs::read(input)?;
    let options = ParseOptions::default();
    let mut container = ContainerCapability::detect().open(&data)?;

    let header = FileHeader::parse(&read_file_header(container.as_mut())?);
    let compressed = header.flags.compressed();

    for id in list_content_streams(container.as_ref()) {
        if only_section.is_some_and(|index| index != id.index()) {
            continue;
        }

        let raw = read_stream(container.as_mut(), &id)?;
        let stream = match decompress(id.path(), &raw, compressed, options.max_stream_size) {
            Ok(stream) => stream,
            Err(e) => {
                println!("{} {}", id.to_string().cyan().bold(), e.to_string().red());
                continue;
            }
        };
        let note = match (&stream, compressed) {
            (Cow::Borrowed(_), true) => " (inflate failed, raw)",
            (Cow::Owned(_), _) => " (inflated)",
            _ => "",
        };
        println!(
            "{} {} bytes{}",
            id.to_string().cyan().bold(),
            stream.len(),
            note.dimmed()
        );

        let mut records = RecordIter::new(&stream);
        for record in records.by_ref() {
            if text_only && !record.is_para_text() {
                continue;
            }
            let header = &record.header;
            println!(
                "  {:>8}  {}{:<20} tag={:<4} size={}",
                record.offset,
                "  ".repeat(header.level.min(16) as usize),
                tags::name(header.tag_id),
                header.tag_id,
                header.size
            );
        }
        if let Some(err) = records.truncation() {
            println!("  {} {}", "truncated:".yellow(), err);
        }
    }

    Ok(())
}

fn cmd_fallback(input: &Path, output: Option<&Path>, options: FallbackOptions) -> CliResult {
    let data = fs::read(input)?;
    let extractor = HwpExtractor::new().with_fallback_options(options);

    match extractor.extract_fallback(&data) {
        Some(text) => write_output(output, &text),
        None => Err(format!("No Korean text lines found in {}", input.display()).into()),
    }
}

const BATCH_CHUNK: usize = 16;

fn cmd_batch(inputs: &[PathBuf], output: Option<&Path>) -> CliResult {
    if let Some(dir) = output {
        fs::create_dir_all(dir)?;
    }

    let extractor = HwpExtractor::new();
    let pb = ProgressBar::new(inputs.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );

    let mut extracted = 0usize;
    let mut failed = Vec::new();

    for chunk in inputs.chunks(BATCH_CHUNK) {
        let mut paths = Vec::with_capacity(chunk.len());
        let mut buffers = Vec::with_capacity(chunk.len());
        for path in chunk {
            match fs::read(path) {
                Ok(data) => {
                    paths.push(path);
                    buffers.push(data);
                }
                Err(e) => {
                    log::warn!("Cannot read {}: {}", path.display(), e);
                    failed.push(format!("{}: {}", path.display(), e));
                    pb.inc(1);
                }
            }
        }

        let slices: Vec<&[u8]> = buffers.iter().map(Vec::as_slice).collect();
        let results = extractor.extract_many(&slices);

        for (path, text) in paths.into_iter().zip(results) {
            pb.set_message(path.display().to_string());
            match text {
                Some(text) => {
                    fs::write(text_path(path, output), text)?;
                    extracted += 1;
                }
                None => failed.push(format!("{}: no text found", path.display())),
            }
            pb.inc(1);
        }
    }

    pb.finish_with_message("Done!");

    println!(
        "\n{} {} of {} files extracted",
        "Done!".green().bold(),
        extracted,
        inputs.len()
    );
    for failure in &failed {
        println!("  {} {}", "✗".red(), failure);
    }

    Ok(())
}

fn text_path(input: &Path, output_dir: Option<&Path>) -> PathBuf {
    let file_name = input.with_extension("txt");
    match (output_dir, file_name.file_name()) {
        (Some(dir), Some(name)) => dir.join(name),
        _ => file_name,
    }
}

fn cmd_version() {
    println!("{} {}", "unhwp".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("HWP text extraction tool");
    println!();
    println!("License: MIT");
}
