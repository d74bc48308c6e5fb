use anyhow::Result;
use chrono::{Datelike, Local};
use ecal::cli::{self, CliArgs};
use ecal::config::Config;
use ecal::context::StandardContext;
use ecal::loader::EventLoader;
use ecal::period::{Period, display_month_year, load_period};
use simplelog::{ColorChoice, ConfigBuilder, LevelFilter, TermLogger, TerminalMode};
use std::env;
use std::str::FromStr;

fn init_logging(verbose: bool) {
    let level = env::var("ECAL_LOG")
        .ok()
        .and_then(|v| LevelFilter::from_str(&v).ok())
        .unwrap_or(if verbose {
            LevelFilter::Info
        } else {
            LevelFilter::Warn
        });

    let config = ConfigBuilder::new()
        .set_time_level(LevelFilter::Off)
        .set_target_level(LevelFilter::Off)
        .build();
    // Only fails if a logger is already set.
    let _ = TermLogger::init(level, config, TerminalMode::Stderr, ColorChoice::Auto);
}

fn main() -> Result<()> {
    let argv: Vec<String> = env::args().collect();
    let binary_name = argv.first().map(String::as_str).unwrap_or("ecal");

    let args: CliArgs = match cli::parse_args(argv.get(1..).unwrap_or_default()) {
        Ok(a) => a,
        Err(msg) => {
            eprintln!("{}", msg);
            cli::print_help(binary_name);
            std::process::exit(1);
        }
    };

    if args.help {
        cli::print_help(binary_name);
        return Ok(());
    }

    init_logging(args.verbose);

    let ctx = StandardContext::new(args.root.clone());
    let config = Config::load_or_default(&ctx)?;

    let today = Local::now().date_naive();
    let year = args.year.unwrap_or(today.year());
    let month = args.month.unwrap_or(today.month());
    let (start_month, start_year) = display_month_year(year, month, args.week, today);
    let period = Period::new(start_year, start_month, args.months.unwrap_or(config.months));

    let events_file = args
        .events_file
        .clone()
        .unwrap_or_else(|| config.resolved_events_file());
    let loader = EventLoader::new(config.default_fg);
    let events = load_period(&loader, &events_file, &period);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&events)?);
        return Ok(());
    }

    if events.is_empty() {
        println!("No events in the displayed period.");
        return Ok(());
    }
    println!("Events for displayed period:");
    for event in &events {
        println!("{}", cli::format_event_line(event, today));
    }
    Ok(())
}
