//! `fieldclone` CLI -- clone JSON records and shift their date fields.
//!
//! ## Usage
//!
//! ```sh
//! # Clone a record once, pushing its date field a week out
//! echo '{"id":1,"title":"Orientation","fields":{"event_date":[{"value":"2024-09-02"}]}}' \
//!   | fieldclone clone --shift event_date=1:week
//!
//! # Three clones, each a further month out, with prefixed titles
//! fieldclone clone -i events.json --count 3 --shift event_date=1:month \
//!   --prepend-title "Copy of"
//!
//! # Epoch-seconds fields, explicit timezone
//! fieldclone clone -i events.json --shift-epoch start_ts=3:hour \
//!   --timezone America/New_York
//!
//! # Shift a single value for inspection
//! fieldclone shift --value 2019-02-21 --amount 3 --unit day
//! ```

use std::io::{self, Read};

use anyhow::{Context, Result};
use chrono_tz::Tz;
use clap::{Parser, Subcommand};
use fieldclone::{
    clone_records, CloneError, CloneOptions, FieldShiftSpec, FieldShifter, IncrementConfig,
    IncrementUnit, Record, DEFAULT_TIMEZONE,
};

#[derive(Parser)]
#[command(
    name = "fieldclone",
    version,
    about = "Clone JSON records with date-increment field transforms"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Clone records from JSON, shifting date fields on each clone
    Clone {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// Number of clones per record
        #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..=100))]
        count: u32,
        /// Prefix prepended to each clone's title
        #[arg(long)]
        prepend_title: Option<String>,
        /// Calendar field shift as FIELD=AMOUNT:UNIT (repeatable)
        #[arg(long = "shift", value_name = "FIELD=AMOUNT:UNIT")]
        shifts: Vec<String>,
        /// Epoch-seconds field shift as FIELD=AMOUNT:UNIT (repeatable)
        #[arg(long = "shift-epoch", value_name = "FIELD=AMOUNT:UNIT")]
        epoch_shifts: Vec<String>,
        /// IANA timezone for DST handling (default America/Los_Angeles)
        #[arg(long)]
        timezone: Option<String>,
    },
    /// Shift a single date value and print the result
    Shift {
        /// The value to shift (date, datetime, or epoch seconds)
        #[arg(long)]
        value: String,
        /// Increment amount
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=12))]
        amount: u32,
        /// Increment unit (year, month, week, day, hour, minute, second)
        #[arg(long)]
        unit: IncrementUnit,
        /// Treat the value as Unix epoch seconds
        #[arg(long)]
        epoch: bool,
        /// IANA timezone (default America/Los_Angeles)
        #[arg(long)]
        timezone: Option<String>,
        /// Clone-order multiple applied to the amount
        #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
        times: u32,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Clone {
            input,
            output,
            count,
            prepend_title,
            shifts,
            epoch_shifts,
            timezone,
        } => {
            let json = read_input(input.as_deref())?;
            let records = parse_records(&json)?;

            let options = CloneOptions {
                count,
                prepend_title,
                timezone: parse_timezone(timezone.as_deref())?,
                shifts: parse_shift_specs(&shifts, &epoch_shifts)?,
            };

            let clones = clone_records(&records, &options).context("Failed to clone records")?;
            let pretty =
                serde_json::to_string_pretty(&clones).context("Failed to serialize clones")?;
            write_output(output.as_deref(), &pretty)?;
        }
        Commands::Shift {
            value,
            amount,
            unit,
            epoch,
            timezone,
            times,
        } => {
            let config = IncrementConfig::new(amount, unit)?;
            let tz = parse_timezone(timezone.as_deref())?.unwrap_or(DEFAULT_TIMEZONE);
            let shifter = if epoch {
                FieldShifter::epoch_in(config, tz)
            } else {
                FieldShifter::calendar_in(config, tz)
            };

            let steps = times
                .checked_mul(amount)
                .with_context(|| format!("--times {} overflows the effective increment", times))?;
            let shifted = shifter
                .shift_raw(&value, steps)
                .with_context(|| format!("Failed to shift value '{}'", value))?;
            println!("{}", shifted);
        }
    }

    Ok(())
}

/// Accept either a single record object or an array of records.
fn parse_records(json: &str) -> Result<Vec<Record>> {
    let value: serde_json::Value =
        serde_json::from_str(json).context("Input is not valid JSON")?;

    if value.is_array() {
        serde_json::from_value(value).context("Input is not a valid record array")
    } else {
        let record: Record = serde_json::from_value(value).context("Input is not a valid record")?;
        Ok(vec![record])
    }
}

/// Parse the repeatable --shift / --shift-epoch specs into field shift specs.
fn parse_shift_specs(shifts: &[String], epoch_shifts: &[String]) -> Result<Vec<FieldShiftSpec>> {
    let mut specs = Vec::with_capacity(shifts.len() + epoch_shifts.len());
    for raw in shifts {
        specs.push(raw.parse::<FieldShiftSpec>()?);
    }
    for raw in epoch_shifts {
        specs.push(raw.parse::<FieldShiftSpec>()?.as_epoch());
    }
    Ok(specs)
}

fn parse_timezone(name: Option<&str>) -> Result<Option<Tz>> {
    match name {
        Some(name) => {
            let tz: Tz = name
                .parse()
                .map_err(|_| CloneError::InvalidTimezone(name.to_string()))?;
            Ok(Some(tz))
        }
        None => Ok(None),
    }
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
