//! Render a NuSMV/nuXmv counterexample as an HTML report.
//!
//! Run with:
//!   ceviz trace.out > report.html
//!   ceviz -1 old -2 new trace.out -o report.html

use std::io::Write;
use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::WrapErr;
use log::info;

use ceviz_rs::classify::{Classifier, DEFAULT_MODULE1, DEFAULT_MODULE2, DEFAULT_SUB_SEPARATOR};
use ceviz_rs::html::HtmlConfig;
use ceviz_rs::trace::Trace;

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Cli {
    /// Output of NuSMV or nuXmv containing a counterexample.
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Module of the current revision.
    #[arg(short = '1', long = "module1", value_name = "MODULE", default_value = DEFAULT_MODULE1)]
    module1: String,

    /// Module of the next revision.
    #[arg(short = '2', long = "module2", value_name = "MODULE", default_value = DEFAULT_MODULE2)]
    module2: String,

    /// Separator of sub-module names inside variable names.
    #[arg(long, value_name = "CHAR", default_value_t = DEFAULT_SUB_SEPARATOR)]
    sub_separator: char,

    /// Write the report here instead of stdout.
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Link an external stylesheet.
    #[arg(long, value_name = "HREF")]
    stylesheet: Option<String>,

    /// Report title.
    #[arg(long, value_name = "TEXT", default_value = "Counterexample")]
    title: String,

    /// More logging (repeatable).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log errors.
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

impl Cli {
    fn log_level(&self) -> simplelog::LevelFilter {
        if self.quiet {
            return simplelog::LevelFilter::Error;
        }
        match self.verbose {
            0 => simplelog::LevelFilter::Warn,
            1 => simplelog::LevelFilter::Info,
            2 => simplelog::LevelFilter::Debug,
            _ => simplelog::LevelFilter::Trace,
        }
    }
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = Cli::parse();

    // The report may go to stdout, so all logging goes to stderr.
    simplelog::TermLogger::init(
        args.log_level(),
        simplelog::Config::default(),
        simplelog::TerminalMode::Stderr,
        simplelog::ColorChoice::Auto,
    )?;

    let time_total = std::time::Instant::now();
    info!("args = {:?}", args);

    let mut trace = Trace::load(&args.file).wrap_err_with(|| format!("cannot read {}", args.file.display()))?;
    trace.complete();
    info!(
        "Parsed {} steps in {} modules",
        trace.num_steps(),
        trace.module_names().count()
    );
    if trace.num_steps() == 0 {
        log::warn!("No counterexample found in {}", args.file.display());
    }

    let classifier = Classifier::new(args.module1, args.module2).with_sub_separator(args.sub_separator);
    let config = HtmlConfig {
        title: args.title,
        stylesheet: args.stylesheet,
        ..HtmlConfig::default()
    };
    let html = trace.to_html_with_config(&classifier, &config)?;

    match &args.output {
        Some(path) => {
            std::fs::write(path, &html).wrap_err_with(|| format!("cannot write {}", path.display()))?;
            info!("Report written to {}", path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(html.as_bytes())?;
            stdout.flush()?;
        }
    }

    let time_total = time_total.elapsed();
    info!("Done in {:.3} s", time_total.as_secs_f64());

    Ok(())
}
