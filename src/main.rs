use anyhow::Result;
use clap::Parser;
use emberlife_lib::app::App;
use emberlife_lib::model::io::{Clock, NoopClock, ThreadClock};
use emberlife_lib::model::metrics::init_logging;
use emberlife_lib::ui::tui::{KeyboardInput, Tui};
use emberlife_lib::ui::ConsoleDisplay;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Mode to run the simulation in
    #[arg(short, long, value_enum, default_value = "standard")]
    mode: Mode,

    /// Custom config file path
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Fixed RNG seed (overrides the config file)
    #[arg(long)]
    seed: Option<u64>,

    /// Halt after this many finished epochs
    #[arg(long)]
    epochs: Option<u64>,

    /// Start the first epoch from a named pattern (block, blinker, glider, ...)
    #[arg(long)]
    pattern: Option<String>,

    /// Skip all pacing delays
    #[arg(long)]
    fast: bool,

    /// Headless only: print every frame as text
    #[arg(long)]
    echo: bool,

    /// Headless only: print run statistics as JSON on exit
    #[arg(long)]
    summary: bool,

    /// Log file (standard mode always logs to a file, default emberlife.log)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[derive(clap::ValueEnum, Clone, Debug)]
enum Mode {
    Standard,
    Headless,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    match args.mode {
        Mode::Headless => init_logging("info", args.log_file.as_deref())?,
        Mode::Standard => {
            let log_file = args
                .log_file
                .clone()
                .unwrap_or_else(|| PathBuf::from("emberlife.log"));
            init_logging("info", Some(&log_file))?;
        }
    }

    let mut config = App::load_config(&args.config);
    if args.seed.is_some() {
        config.rng_seed = args.seed;
    }

    let mut app = App::new(config)?.with_epoch_limit(args.epochs);
    if let Some(name) = &args.pattern {
        app.start_with_pattern(name)?;
    }
    app.shutdown.listen_for_ctrl_c();

    let mut clock: Box<dyn Clock> = if args.fast {
        Box::new(NoopClock)
    } else {
        Box::new(ThreadClock)
    };

    match args.mode {
        Mode::Headless => {
            println!("Running in HEADLESS mode...");
            let mut display = ConsoleDisplay::new(std::io::stdout(), args.echo);
            let stats = app.run(&mut display, emberlife_lib::model::io::NoInput, clock.as_mut())?;
            if args.summary {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            }
            println!("Headless simulation finished.");
        }
        Mode::Standard => {
            let mut tui = Tui::new()?;
            tui.init()?;

            let input = KeyboardInput::new();
            let res = app.run(&mut tui, input, clock.as_mut());

            tui.exit()?;

            match res {
                Ok(stats) => {
                    println!(
                        "Exited clean after {} epochs and {} generations.",
                        stats.epochs, stats.generations
                    );
                }
                Err(e) => {
                    eprintln!("Application error: {e:#}");
                    app.shutdown.set_exit_code(1);
                }
            }
        }
    }

    if app.shutdown.exit_code() != 0 {
        std::process::exit(app.shutdown.exit_code());
    }
    Ok(())
}
