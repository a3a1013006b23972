//! pdfdocx CLI - PDF and Word document converter

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use pdfdocx::{
    detect_format_from_path, extract_text, Converter, PageLayout, Progress, SourceFormat,
};

#[derive(Parser)]
#[command(name = "pdfdocx")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Convert PDF to Word and Word to PDF", long_about = None)]
struct Cli {
    /// Input PDF or DOCX file
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Output file
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert PDF to Word or Word to PDF (direction is detected)
    Convert {
        /// Input PDF or DOCX file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (<name>_converted.<ext> if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Title heading (Word output) or document title (PDF output)
        #[arg(long)]
        title: Option<String>,

        /// Page size for PDF output
        #[arg(long, value_enum, default_value = "a4")]
        page_size: PageSize,

        /// Font size in points for PDF output
        #[arg(long, env = "PDFDOCX_FONT_SIZE")]
        font_size: Option<f32>,

        /// Line height in points for PDF output (1.4 x font size if not specified)
        #[arg(long, env = "PDFDOCX_LINE_HEIGHT")]
        line_height: Option<f32>,

        /// Margin in points for PDF output
        #[arg(long, env = "PDFDOCX_MARGIN")]
        margin: Option<f32>,

        /// Print conversion statistics as JSON
        #[arg(long)]
        stats: bool,
    },

    /// Print the sanitized text units of a document
    Text {
        /// Input PDF or DOCX file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output units and metadata as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show document information
    Info {
        /// Input PDF or DOCX file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Show version information
    Version,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum PageSize {
    /// ISO A4 (595 x 842 pt)
    A4,
    /// US Letter (612 x 792 pt)
    Letter,
}

impl From<PageSize> for PageLayout {
    fn from(size: PageSize) -> Self {
        match size {
            PageSize::A4 => PageLayout::a4(),
            PageSize::Letter => PageLayout::letter(),
        }
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Convert {
            input,
            output,
            title,
            page_size,
            font_size,
            line_height,
            margin,
            stats,
        }) => {
            let mut layout = PageLayout::from(page_size);
            if let Some(size) = font_size {
                layout = layout.with_font_size(size);
            }
            if let Some(height) = line_height {
                layout = layout.with_line_height(height);
            }
            if let Some(margin) = margin {
                layout = layout.with_margin(margin);
            }
            cmd_convert(&input, output.as_deref(), title, layout, stats)
        }
        Some(Commands::Text {
            input,
            output,
            json,
        }) => cmd_text(&input, output.as_deref(), json),
        Some(Commands::Info { input }) => cmd_info(&input),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            // Default behavior: convert if input is provided
            if let Some(input) = cli.input {
                cmd_convert(
                    &input,
                    cli.output.as_deref(),
                    None,
                    PageLayout::default(),
                    false,
                )
            } else {
                println!("{}", "Usage: pdfdocx <FILE> [OUTPUT]".yellow());
                println!("       pdfdocx --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn cmd_convert(
    input: &Path,
    output: Option<&Path>,
    title: Option<String>,
    layout: PageLayout,
    show_stats: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let detected = detect_format_from_path(input)?;
    let unit = match detected.format {
        SourceFormat::Pdf => "pages",
        SourceFormat::Docx => "paragraphs",
    };

    let pb = ProgressBar::new(0);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );
    pb.set_message(unit);

    let mut converter = Converter::new()
        .with_layout(layout)
        .with_progress(|p: Progress| {
            pb.set_length(p.total as u64);
            pb.set_position(p.completed as u64);
        });
    if let Some(title) = title {
        converter = converter.with_title(title);
    }

    let result = converter.convert_file(input)?;
    pb.finish_with_message("Done!");

    let path = output
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| match input.parent() {
            Some(dir) => dir.join(&result.file_name),
            None => PathBuf::from(&result.file_name),
        });
    log::debug!("Writing {} bytes to {}", result.len(), path.display());
    fs::write(&path, &result.data)?;

    println!(
        "\n{} {} -> {}",
        "Converted".green().bold(),
        detected.format,
        result.format
    );
    println!("  {} {}", "├─".dimmed(), path.display());
    println!("  {} {} bytes", "├─".dimmed(), result.len());
    println!("  {} {}", "└─".dimmed(), result.mime_type);

    let degraded = result.stats.degraded_total();
    if degraded > 0 {
        println!(
            "{} {} units were replaced by placeholders",
            "Warning:".yellow().bold(),
            degraded
        );
    }

    if show_stats {
        println!("{}", result.stats.to_json());
    }

    Ok(())
}

fn cmd_text(
    input: &Path,
    output: Option<&Path>,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let data = fs::read(input)?;
    let extracted = extract_text(&data)?;

    let text = if json {
        serde_json::to_string_pretty(&extracted)?
    } else {
        extracted.texts().join("\n\n")
    };

    if let Some(path) = output {
        fs::write(path, &text)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", text);
    }

    Ok(())
}

fn cmd_info(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let data = fs::read(input)?;
    let detected = pdfdocx::detect_format_from_bytes(&data)?;
    let extracted = extract_text(&data)?;
    let metadata = &extracted.metadata;

    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {} bytes", "Size".bold(), data.len());
    match detected.version {
        Some(ref version) => println!("{}: PDF {}", "Format".bold(), version),
        None => println!("{}: {}", "Format".bold(), detected.format),
    }

    match detected.format {
        SourceFormat::Pdf => {
            println!("{}: {}", "Pages".bold(), metadata.page_count);
            println!(
                "{}: {}",
                "Encrypted".bold(),
                if metadata.encrypted { "Yes" } else { "No" }
            );
        }
        SourceFormat::Docx => {
            println!("{}: {}", "Paragraphs".bold(), metadata.paragraph_count);
            println!("{}: {}", "Table rows".bold(), metadata.table_row_count);
        }
    }

    if data.len() > pdfdocx::MAX_UPLOAD_BYTES {
        println!("{}", "Above the 100 MB upload guidance".yellow());
    }

    println!();
    println!("{}", "Content Statistics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    let text = extracted.texts().join("\n\n");
    let words: usize = text.split_whitespace().count();
    let chars = text.chars().count();

    println!("{}: {}", "Text units".bold(), extracted.len());
    println!("{}: {}", "Placeholders".bold(), extracted.degraded_count());
    println!("{}: {}", "Words".bold(), words);
    println!("{}: {}", "Characters".bold(), chars);

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "pdfdocx".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("PDF and Word document converter");
    println!();
    println!("License: MIT");
}
