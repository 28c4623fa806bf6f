//! CLI tool extracting wake categories from FAA Order JO 7360.1E

use clap::Parser;
use std::path::{Path, PathBuf};
use std::process;
use wake_designators::{process_pdf_with, ExtractOptions, Pdftotext, DEFAULT_TITLE};

#[derive(Parser)]
#[command(name = "recat-cwt")]
#[command(about = "Extract ICAO WTC, RECAT and CWT wake categories per aircraft type designator")]
struct Args {
    /// Path to the FAA JO 7360.1E PDF
    #[arg(long)]
    pdf: PathBuf,

    /// Output JSON path
    #[arg(long)]
    out: PathBuf,

    /// Keep the intermediate layout text (<out>.txt)
    #[arg(long = "keep-txt", alias = "keep_txt")]
    keep_txt: bool,

    /// pdftotext executable to run
    #[arg(long, default_value = "pdftotext")]
    pdftotext: String,

    /// Document title recorded in the output
    #[arg(long, default_value = DEFAULT_TITLE)]
    title: String,

    /// Skip the PDF preflight scan
    #[arg(long)]
    no_preflight: bool,
}

fn main() {
    pretty_env_logger::init();
    let args = Args::parse();

    let pdf_path = absolute(&args.pdf);
    let out_path = absolute(&args.out);

    let mut text_path = out_path.clone().into_os_string();
    text_path.push(".txt");

    let mut options = ExtractOptions::new(text_path);
    options.keep_text = args.keep_txt;
    options.title = args.title;
    options.preflight = !args.no_preflight;

    let source = Pdftotext::with_program(args.pdftotext);

    let result = process_pdf_with(&pdf_path, &source, &options)
        .and_then(|report| report.write_json(&out_path).map(|()| report));

    match result {
        Ok(report) => {
            println!("Extracted {} aircraft types", report.count);
            println!("Written to: {}", out_path.display());
            if options.keep_text {
                println!("Layout text kept at: {}", options.text_path.display());
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}

fn absolute(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}
