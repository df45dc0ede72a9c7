use std::fmt;
use std::io::{self, BufRead, Write};
use std::thread;
use std::time::Duration;

use door_core::Clock;
use services::{DoorEvent, DoorSequencer, GameFlow, ResultDetail, Screen};

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    InvalidNumber { flag: &'static str, raw: String },
    UnknownArg(String),
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::InvalidNumber { flag, raw } => {
                write!(f, "invalid {flag} value: {raw}")
            }
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

struct Args {
    seed: Option<u64>,
    tick_ms: u64,
    json: bool,
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut seed = std::env::var("DOOR_SEED")
            .ok()
            .and_then(|value| value.parse::<u64>().ok());
        let mut tick_ms = 150;
        let mut json = false;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--seed" => {
                    let value = require_value(args, "--seed")?;
                    let parsed = value.parse::<u64>().map_err(|_| ArgsError::InvalidNumber {
                        flag: "--seed",
                        raw: value.clone(),
                    })?;
                    seed = Some(parsed);
                }
                "--tick-ms" => {
                    let value = require_value(args, "--tick-ms")?;
                    tick_ms = value.parse::<u64>().map_err(|_| ArgsError::InvalidNumber {
                        flag: "--tick-ms",
                        raw: value.clone(),
                    })?;
                }
                "--json" => json = true,
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self {
            seed,
            tick_ms,
            json,
        })
    }
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- [--seed <u64>] [--tick-ms <ms>] [--json]");
    eprintln!();
    eprintln!("Flags:");
    eprintln!("  --seed <u64>     deterministic RNG seed (default: OS entropy)");
    eprintln!("  --tick-ms <ms>   door playback tick length, 0 skips the wait (default: 150)");
    eprintln!("  --json           print each finished run as a JSON line");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  DOOR_SEED");
}

fn prompt(text: &str) -> io::Result<()> {
    print!("{text}");
    io::stdout().flush()
}

/// Reads one trimmed line; `None` means EOF (treated as quit).
fn read_line(lines: &mut impl Iterator<Item = io::Result<String>>) -> Option<String> {
    match lines.next() {
        Some(Ok(line)) => Some(line.trim().to_string()),
        _ => None,
    }
}

fn play_door(door: &mut DoorSequencer, tick_ms: u64, streak: u32) {
    while door.is_busy() {
        if tick_ms > 0 {
            thread::sleep(Duration::from_millis(tick_ms));
        }
        match door.tick() {
            Some(DoorEvent::Opened) => println!("the door opens - {streak} in a row"),
            Some(DoorEvent::Failed) => println!("the door will not budge"),
            Some(DoorEvent::Settled) | None => {}
        }
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv = std::env::args().skip(1);
    let args = Args::parse(&mut argv).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    let clock = Clock::default_clock();
    let mut flow = match args.seed {
        Some(seed) => GameFlow::seeded(clock, seed),
        None => GameFlow::new(clock),
    };
    let mut door = DoorSequencer::new();

    let stdin = io::stdin();
    let mut input = stdin.lock().lines();

    loop {
        match flow.screen() {
            Screen::Title => {
                println!("== continuation rate simulator ==");
                prompt("press Enter to start (q quits) > ")?;
                match read_line(&mut input).as_deref() {
                    None | Some("q") => break,
                    Some(_) => flow.start()?,
                }
            }
            Screen::ModeSelect => {
                println!();
                println!("choose a mode:");
                println!("  1) experience - set a rate and feel it");
                println!("  2) guess      - play first, guess the hidden rate");
                prompt("1/2 (q quits) > ")?;
                match read_line(&mut input).as_deref() {
                    None | Some("q") => break,
                    Some("1") => flow.choose_experience()?,
                    Some("2") => flow.choose_guess()?,
                    Some(other) => println!("unknown choice: {other}"),
                }
            }
            Screen::RateSetting => {
                prompt("continuation rate in percent, 1-100 (q quits) > ")?;
                match read_line(&mut input) {
                    None => break,
                    Some(line) if line == "q" => break,
                    Some(line) => match line.parse::<i64>() {
                        Ok(percent) => flow.commit_rate(percent)?,
                        Err(_) => println!("not a number: {line}"),
                    },
                }
            }
            Screen::Play => {
                let view = flow.play_view()?;
                println!();
                println!("streak: {} (tries so far: {})", view.streak, view.total_tries);
                prompt("press Enter to open the door (q quits) > ")?;
                match read_line(&mut input).as_deref() {
                    None | Some("q") => break,
                    Some(_) => {
                        let outcome = flow.open_door()?;
                        door.begin(outcome.success)?;
                        play_door(&mut door, args.tick_ms, outcome.streak);
                        if outcome.run_over && args.json {
                            if let Some(summary) = flow.last_run_summary() {
                                println!("{}", serde_json::to_string(summary)?);
                            }
                        }
                    }
                }
            }
            Screen::Result => {
                let view = flow.result_view()?;
                println!();
                println!("-- run over --");
                println!("consecutive successes: {}", view.streak);
                println!("mode: {}", view.mode);
                println!(
                    "tries: {} / successes: {} / observed rate: {}%",
                    view.total_tries, view.total_successes, view.success_percent
                );
                match view.detail {
                    ResultDetail::Experience { configured } => {
                        println!("configured rate: {configured}%");
                    }
                    ResultDetail::Guess {
                        reveal: Some(reveal),
                        ..
                    } => {
                        println!(
                            "actual rate: {}% / your guess: {}% / off by {}",
                            reveal.actual, reveal.guess, reveal.miss
                        );
                    }
                    ResultDetail::Guess {
                        guess,
                        reveal: None,
                    } => {
                        prompt(&format!("your guess, 1-100 (Enter keeps {guess}) > "))?;
                        match read_line(&mut input) {
                            None => break,
                            Some(line) => {
                                if let Ok(percent) = line.parse::<i64>() {
                                    flow.set_guess(percent)?;
                                } else if !line.is_empty() {
                                    println!("not a number, keeping {guess}");
                                }
                                let reveal = flow.confirm_guess()?;
                                println!(
                                    "actual rate: {}% / your guess: {}% / off by {}",
                                    reveal.actual, reveal.guess, reveal.miss
                                );
                            }
                        }
                    }
                }
                prompt("r retry / m mode select / q quit > ")?;
                match read_line(&mut input).as_deref() {
                    None | Some("q") => break,
                    Some("r") => flow.retry()?,
                    Some("m") => flow.back_to_mode_select()?,
                    Some(other) => println!("unknown choice: {other}"),
                }
            }
        }
    }

    Ok(())
}

fn main() {
    if let Err(err) = run() {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
