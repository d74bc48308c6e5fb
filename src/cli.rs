// File: ./src/cli.rs
//! Shared command-line interface logic: argument parsing, help, plain listing.
use crate::color_utils::STYLE_RESET;
use crate::model::Event;
use chrono::NaiveDate;
use std::path::PathBuf;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliArgs {
    pub year: Option<i32>,
    pub month: Option<u32>,
    pub week: Option<u32>,
    pub months: Option<u32>,
    pub events_file: Option<PathBuf>,
    pub root: Option<PathBuf>,
    pub json: bool,
    pub verbose: bool,
    pub help: bool,
}

fn value<'a>(args: &'a [String], i: usize, flag: &str) -> Result<&'a str, String> {
    args.get(i + 1)
        .map(String::as_str)
        .ok_or_else(|| format!("Error: {} requires a value.", flag))
}

fn number<T: std::str::FromStr>(raw: &str, flag: &str) -> Result<T, String> {
    raw.parse()
        .map_err(|_| format!("Error: Invalid {} value '{}'.", flag, raw))
}

/// Parse arguments (without the binary name).
pub fn parse_args(args: &[String]) -> Result<CliArgs, String> {
    let mut out = CliArgs::default();
    let mut i = 0;
    while i < args.len() {
        let flag = args[i].as_str();
        match flag {
            "-h" | "--help" | "help" => {
                out.help = true;
                i += 1;
            }
            "--json" => {
                out.json = true;
                i += 1;
            }
            "-v" | "--verbose" => {
                out.verbose = true;
                i += 1;
            }
            "-y" | "--year" => {
                out.year = Some(number(value(args, i, flag)?, flag)?);
                i += 2;
            }
            "-m" | "--month" => {
                let m: u32 = number(value(args, i, flag)?, flag)?;
                if !(1..=12).contains(&m) {
                    return Err(format!(
                        "Error: Invalid month value {}. Must be between 1 and 12.",
                        m
                    ));
                }
                out.month = Some(m);
                i += 2;
            }
            "-w" | "--week" => {
                let w: u32 = number(value(args, i, flag)?, flag)?;
                if !(1..=53).contains(&w) {
                    return Err(format!(
                        "Error: Invalid week value {}. Must be between 1 and 53.",
                        w
                    ));
                }
                out.week = Some(w);
                i += 2;
            }
            "-n" | "--months" => {
                let n: u32 = number(value(args, i, flag)?, flag)?;
                if !crate::period::ALLOWED_MONTH_SPANS.contains(&n) {
                    return Err(format!(
                        "Error: Invalid months value {}. Must be 1, 3, 6, or 12.",
                        n
                    ));
                }
                out.months = Some(n);
                i += 2;
            }
            "-e" | "--events" => {
                out.events_file = Some(PathBuf::from(value(args, i, flag)?));
                i += 2;
            }
            "-r" | "--root" => {
                out.root = Some(PathBuf::from(value(args, i, flag)?));
                i += 2;
            }
            other => return Err(format!("Error: Unknown argument '{}'.", other)),
        }
    }

    if out.week.is_some() && out.year.is_none() {
        return Err("Error: --week requires --year to be specified.".to_string());
    }
    Ok(out)
}

/// One plain-text line per event, colored with the event's tag colors.
pub fn format_event_line(event: &Event, today: NaiveDate) -> String {
    let mut line = format!(
        "{}{}{} {} {}",
        event.color_codes(),
        event.date.format("%Y-%m-%d %a"),
        STYLE_RESET,
        event.display_emoji(),
        event.description
    );

    if let Some(age) = event.age_on(today) {
        line.push_str(&format!(" (Age: {})", age));
    }

    let days = event.days_until(today);
    let plural = |n: i64| if n.abs() == 1 { "" } else { "s" };
    match days {
        0 => line.push_str(" (Today)"),
        d if d > 0 => line.push_str(&format!(" (In {} day{})", d, plural(d))),
        d => line.push_str(&format!(" ({} day{} ago)", -d, plural(d))),
    }
    line
}

pub fn print_help(binary_name: &str) {
    println!(
        "ecal v{} - Event calendar: holidays, anniversaries and recurring dates",
        env!("CARGO_PKG_VERSION")
    );
    println!();
    println!("USAGE:");
    println!("    {} [options]", binary_name);
    println!();
    println!("OPTIONS:");
    println!("    -y, --year <Y>        Year to show (default: current year). Also used with --week.");
    println!("    -m, --month <M>       Month to start from, 1-12 (default: current month).");
    println!("    -w, --week <W>        ISO week 1-53; requires --year and overrides --month.");
    println!("    -n, --months <N>      Number of months to list: 1, 3, 6 or 12.");
    println!("    -e, --events <path>   Events file (default: from config, else events.txt).");
    println!("    -r, --root <path>     Use a different directory for config.");
    println!("        --json            Print events as JSON.");
    println!("    -v, --verbose         Log informational messages.");
    println!("    -h, --help            Show this help message.");
    println!();
    println!("EVENTS FILE SYNTAX:");
    println!("    <rule>;[category,fg,bg,emoji] Description");
    println!("    E+1                   Days relative to Easter Sunday (E, E+7, E-2)");
    println!("    5/1#1                 Nth weekday of a month (1=Mon..7=Sun, N=1..5)");
    println!("    12/25                 Every year on that month/day");
    println!("    12/25?2026            Only in 2026");
    println!("    12/26?6+2             Shift by +2 days if it falls on a Saturday (0=Sun..6=Sat)");
    println!("    07/04/1990            Absolute date (recurs yearly for birthday/anniversary)");
    println!("    04-07-1990            Same, day first");
    println!();
    println!("EXAMPLES:");
    println!("    E+1;[church,magenta] Easter Monday");
    println!("    12/25;[holiday,red,white,🎄] Christmas");
    println!("    07/04/1990;[birthday] Alex's birthday");
    println!("    {} --year 2026 --week 50", binary_name);
    println!("    {} --month 7 --year 2026 --months 3", binary_name);
}
