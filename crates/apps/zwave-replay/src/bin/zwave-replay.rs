use clap::Parser;
use std::fs::File;
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};
use zwave_codes::{NotificationCode, NotificationType, ValueType};
use zwave_replay::{read_capture, replay, snapshot, write_capture, CaptureFormat};
use zwave_state::DispatcherConfig;

#[derive(Parser, Debug)]
#[command(name = "zwave-replay")]
struct Cli {
    /// Default log filter when RUST_LOG is unset.
    #[arg(long, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand, Debug)]
enum Command {
    /// Feed a capture through the dispatcher and print the derived events.
    Replay {
        capture: PathBuf,
        #[arg(long, value_enum)]
        format: Option<CaptureFormat>,
        #[arg(long)]
        config: Option<PathBuf>,
        /// Print the final node state as JSON.
        #[arg(long, default_value_t = false)]
        dump: bool,
    },
    /// Re-encode a capture in another layout.
    Convert {
        input: PathBuf,
        output: PathBuf,
        #[arg(long, value_enum)]
        from: Option<CaptureFormat>,
        #[arg(long, value_enum)]
        to: Option<CaptureFormat>,
    },
    /// Print the notification and value type decoding tables.
    Codes,
}

fn main() {
    let cli = Cli::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&cli.log_level))
        .init();
    if let Err(err) = run(cli.command) {
        eprintln!("zwave-replay error: {}", err);
        std::process::exit(1);
    }
}

fn run(command: Command) -> io::Result<()> {
    match command {
        Command::Replay { capture, format, config, dump } => {
            run_replay(&capture, format, config.as_deref(), dump)
        }
        Command::Convert { input, output, from, to } => run_convert(&input, &output, from, to),
        Command::Codes => {
            print_codes();
            Ok(())
        }
    }
}

fn run_replay(
    capture: &Path,
    format: Option<CaptureFormat>,
    config: Option<&Path>,
    dump: bool,
) -> io::Result<()> {
    let config = match config {
        Some(path) => DispatcherConfig::from_path(path)
            .map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))?,
        None => DispatcherConfig::default(),
    };
    let format = format.unwrap_or_else(|| CaptureFormat::from_path(capture));
    let notifications = read_capture(File::open(capture)?, format)?;
    log::info!("replaying {} notifications from {}", notifications.len(), capture.display());

    let (registry, report) = replay(notifications, config);
    for event in &report.events {
        println!("EVENT {} {}", event.kind(), event.node());
    }
    println!(
        "dispatched={} rejected={} events={} lost={} nodes={}",
        report.dispatched,
        report.rejected,
        report.events.len(),
        report.lost,
        registry.len()
    );

    if dump {
        let json = serde_json::to_string_pretty(&snapshot(&registry))
            .map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))?;
        println!("{json}");
    }
    Ok(())
}

fn run_convert(
    input: &Path,
    output: &Path,
    from: Option<CaptureFormat>,
    to: Option<CaptureFormat>,
) -> io::Result<()> {
    let from = from.unwrap_or_else(|| CaptureFormat::from_path(input));
    let to = to.unwrap_or_else(|| CaptureFormat::from_path(output));
    let notifications = read_capture(File::open(input)?, from)?;
    write_capture(BufWriter::new(File::create(output)?), to, &notifications)?;
    println!("converted {} notifications", notifications.len());
    Ok(())
}

fn print_codes() {
    println!("notification types:");
    for kind in NotificationType::ALL {
        println!("  {:3}  {}", kind.code(), kind);
    }
    println!("notification codes:");
    for code in NotificationCode::ALL {
        println!("  {:3}  {}", code.code(), code);
    }
    println!("value types:");
    for value_type in ValueType::ALL {
        println!("  {:3}  {}", value_type.code(), value_type);
    }
}
