use clap::{Parser, Subcommand, ValueEnum};
use dafo::{LocalDateTime, WeekMode, mysql, parse_with_base, php, week_range, year_week};
use std::process;

/// Format, parse and number dates from the command line
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a date through a mask
    Format {
        /// Mask, e.g. "%Y-%m-%d" (mysql) or "Y-m-d" (php)
        #[arg(value_name = "MASK")]
        mask: String,

        /// Date as "YYYY-MM-DD HH:MM:SS"; defaults to now
        #[arg(short, long)]
        date: Option<String>,

        #[arg(long, value_enum, default_value_t = Dialect::Mysql)]
        dialect: Dialect,

        /// UTC offset in minutes, east positive
        #[arg(short, long, allow_negative_numbers = true)]
        offset: Option<i32>,
    },

    /// Show the week a date falls in under every mode
    Week {
        /// Date as "YYYY-MM-DD"
        #[arg(value_name = "DATE")]
        date: String,
    },

    /// Show the first and last day of a numbered week
    Range {
        year: i32,
        #[arg(allow_negative_numbers = true)]
        week: i32,
        #[arg(short, long, default_value_t = 0)]
        mode: u8,
    },

    /// Parse text with a php-style mask (Y m d H i s)
    Parse {
        text: String,
        mask: String,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Dialect {
    Mysql,
    Php,
}

fn read_date(text: &str) -> LocalDateTime {
    let base = LocalDateTime::UNIX_EPOCH;
    let parsed = parse_with_base(text, "Y-m-d H:i:s", base).or_else(|| parse_with_base(text, "Y-m-d", base));
    match parsed {
        Some(date) => date,
        None => {
            eprintln!("Error: '{text}' is not a date (expected YYYY-MM-DD or YYYY-MM-DD HH:MM:SS)");
            process::exit(1);
        },
    }
}

fn main() {
    let args = Args::parse();

    match args.command {
        Command::Format {
            mask,
            date,
            dialect,
            offset,
        } => {
            let date = match date.as_deref() {
                Some(text) => Ok(read_date(text)),
                None => LocalDateTime::now(),
            };
            let date = match offset {
                Some(minutes) => date.and_then(|date| date.with_offset(minutes)),
                None => date,
            };
            let date = match date {
                Ok(date) => date,
                Err(err) => {
                    eprintln!("Error: {err}");
                    process::exit(1);
                },
            };
            let output = match dialect {
                Dialect::Mysql => mysql::date_format(&date, &mask),
                Dialect::Php => php::date_format(&date, &mask),
            };
            println!("{output}");
        },
        Command::Week { date } => {
            let date = read_date(&date);
            println!("Weeks for {}", php::date_format(&date, "l, Y-m-d"));
            println!("{}", "=".repeat(40));
            for mode in WeekMode::all() {
                println!(
                    "  mode {mode}: {} ({} first, {})",
                    year_week(&date, mode),
                    mode.first_weekday(),
                    mode.week_one_rule()
                );
            }
        },
        Command::Range { year, week, mode } => {
            let range = WeekMode::new(mode).and_then(|mode| week_range(year, week, mode));
            match range {
                Ok(range) => println!(
                    "{} .. {}",
                    php::date_format(&range.first, "D Y-m-d"),
                    php::date_format(&range.last, "D Y-m-d")
                ),
                Err(err) => {
                    eprintln!("Error: {err}");
                    process::exit(1);
                },
            }
        },
        Command::Parse { text, mask } => match dafo::parse(&text, &mask) {
            Some(date) => println!("{date}"),
            None => {
                eprintln!("'{text}' does not match mask '{mask}'");
                process::exit(1);
            },
        },
    }
}
