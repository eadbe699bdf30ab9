use std::io::{self, BufRead, IsTerminal};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::style::Stylize;
use tracing::{Level, info};

use rematch::pattern::ast::Element;
use rematch::{CompileOptions, MatchResult, Pattern, compile_with, demo};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Pattern to match at the start of each subject
    #[arg(value_name = "PATTERN", required_unless_present = "demo")]
    pattern: Option<String>,

    /// Subjects to test (default: one per line from stdin)
    #[arg(value_name = "SUBJECT")]
    subjects: Vec<String>,

    /// Ignore case when comparing characters
    #[arg(short = 'i', long)]
    ignore_case: bool,

    /// Print nothing; report through the exit status only
    #[arg(short = 'q', long)]
    quiet: bool,

    /// List the compiled tokens before matching
    #[arg(long)]
    explain: bool,

    /// Run the built-in demonstration table
    #[arg(long, conflicts_with_all = ["pattern", "subjects"])]
    demo: bool,

    /// More log output on stderr (-v, -vv, -vvv)
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    match run(&args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(err) => {
            eprintln!("rematch: {err:#}");
            ExitCode::from(2)
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();
}

/// Returns whether anything matched (or, for `--demo`, whether every case
/// came out as listed).
fn run(args: &Args) -> Result<bool> {
    let color = io::stdout().is_terminal();
    if args.demo {
        return run_demo(args.quiet, color);
    }

    let source = args.pattern.as_deref().context("no pattern given")?;
    let options = CompileOptions {
        ignore_case: args.ignore_case,
    };
    let pattern = match compile_with(source, options) {
        Ok(pattern) => pattern,
        Err(err) => {
            eprintln!("{source}");
            eprintln!("{}^", " ".repeat(err.position));
            return Err(err).with_context(|| format!("invalid pattern {source:?}"));
        }
    };

    if args.explain && !args.quiet {
        explain(&pattern);
    }

    let mut any_matched = false;
    if args.subjects.is_empty() {
        info!("reading subjects from stdin");
        for line in io::stdin().lock().lines() {
            let line = line.context("failed to read stdin")?;
            any_matched |= report(&pattern, &line, args.quiet, color);
        }
    } else {
        for subject in &args.subjects {
            any_matched |= report(&pattern, subject, args.quiet, color);
        }
    }
    Ok(any_matched)
}

fn report(pattern: &Pattern, subject: &str, quiet: bool, color: bool) -> bool {
    let result = pattern.match_anchored(subject);
    if !quiet {
        println!("{subject}: {}", describe(&result, subject, color));
    }
    result.success
}

fn describe(result: &MatchResult, subject: &str, color: bool) -> String {
    let (text, matched) = match result.matched_text(subject) {
        Some(text) => (
            format!("match [{}, {}) {:?}", result.start, result.end, text),
            true,
        ),
        None => ("no match".to_string(), false),
    };
    match (color, matched) {
        (false, _) => text,
        (true, true) => text.green().to_string(),
        (true, false) => text.red().to_string(),
    }
}

fn explain(pattern: &Pattern) {
    println!("pattern {:?} ({})", pattern.as_str(), anchoring(pattern));
    for (idx, item) in pattern.items().iter().enumerate() {
        let kind = match &item.element {
            Element::Literal(_) => "literal",
            Element::Wildcard => "wildcard",
            Element::Class(_) => "class",
            Element::Group(_) => "group",
            Element::Anchor(_) => "anchor",
        };
        let (min, max) = item.quantifier.bounds();
        let max = if max == usize::MAX {
            "inf".to_string()
        } else {
            max.to_string()
        };
        println!("{idx:>3}  {kind:<8} {:<16} x{{{min},{max}}}", item.to_string());
    }
}

/// How much of the subject a match of `pattern` must cover.
fn anchoring(pattern: &Pattern) -> &'static str {
    match (pattern.is_start_anchored(), pattern.is_end_anchored()) {
        (true, true) => "^...$, whole subject",
        (false, true) => "...$, whole subject",
        (true, false) => "^..., prefix",
        (false, false) => "prefix",
    }
}

fn run_demo(quiet: bool, color: bool) -> Result<bool> {
    let outcomes = demo::run().context("demo table contains an invalid pattern")?;
    if !quiet {
        for outcome in &outcomes {
            let case = outcome.case;
            println!(
                "{:<8} {:<18} {:<14} {}",
                case.label,
                case.pattern,
                format!("{:?}", case.subject),
                describe(&outcome.result, case.subject, color)
            );
        }
    }
    Ok(outcomes.iter().all(|outcome| outcome.as_expected()))
}
