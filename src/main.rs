use anyhow::{Context, bail};
use clap::Parser;
use raffle_spinner::{
    app::App,
    celebrate::{CelebrationStyle, available_fonts},
    config::Config,
    draw::ParticipantList,
    headless,
    render::terminal::restore_terminal,
};
use std::{
    fs::File,
    io::{self, Read},
    path::{Path, PathBuf},
};
use strum::IntoEnumIterator;

/// Spin a wheel of names and let it pick a winner
#[derive(Parser, Debug)]
#[command(name = "raffle-spinner", version, about, long_about = None)]
struct Cli {
    /// A file with one participant per line, or `-` to read them from stdin
    participants: Option<PathBuf>,

    /// The configuration file to use instead of the default one
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Draw a single winner and print it instead of opening the wheel
    #[arg(long)]
    headless: bool,

    /// Print the headless result as JSON
    #[arg(long, requires = "headless")]
    json: bool,

    /// Seed the random generator to make draws reproducible
    #[arg(long)]
    seed: Option<u64>,

    /// Write logs to this file
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// List the FIGlet fonts the winner banner can use
    #[arg(long)]
    list_fonts: bool,

    /// List the winner banner styles
    #[arg(long)]
    list_styles: bool,
}

fn init_logging(log_file: Option<&Path>) -> anyhow::Result<()> {
    let Some(path) = log_file else {
        // the terminal belongs to the UI, so stderr logging is opt in through RUST_LOG
        env_logger::init();
        return Ok(());
    };
    let file = File::create(path).with_context(|| format!("creating log file {}", path.display()))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn read_participants(path: &Path) -> anyhow::Result<String> {
    if path == Path::new("-") {
        let mut contents = String::new();
        io::stdin().read_to_string(&mut contents).context("reading participants from stdin")?;
        return Ok(contents);
    }
    std::fs::read_to_string(path).with_context(|| format!("reading participants from {}", path.display()))
}

fn run(cli: Cli) -> anyhow::Result<()> {
    if cli.list_styles {
        for style in CelebrationStyle::iter() {
            println!("{style}");
        }
        return Ok(());
    }
    if cli.list_fonts {
        for font in available_fonts() {
            println!("{font}");
        }
        return Ok(());
    }

    let config = Config::load(cli.config.as_deref())?;
    let input = match &cli.participants {
        Some(path) => read_participants(path)?,
        None => String::new(),
    };
    let mut rng = match cli.seed {
        Some(seed) => fastrand::Rng::with_seed(seed),
        None => fastrand::Rng::new(),
    };

    if cli.headless {
        if cli.participants.is_none() {
            bail!("--headless needs a participants file");
        }
        let participants = ParticipantList::parse(&input);
        headless::run_once(&participants, &mut rng, cli.json, io::stdout().lock())?;
        return Ok(());
    }

    let previous_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        restore_terminal();
        previous_hook(info);
    }));
    App::new(config, input, rng).run()?;
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_file.as_deref())?;
    log::info!("starting raffle-spinner {}", env!("CARGO_PKG_VERSION"));
    run(cli)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use std::io::Write;

    #[test]
    fn cli_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn json_needs_headless() {
        assert!(Cli::try_parse_from(["raffle-spinner", "--json", "names.txt"]).is_err());
        let cli = Cli::try_parse_from(["raffle-spinner", "--headless", "--json", "--seed", "7", "names.txt"])
            .expect("parse failed");
        assert!(cli.headless && cli.json);
        assert_eq!(cli.seed, Some(7));
        assert_eq!(cli.participants, Some(PathBuf::from("names.txt")));
    }

    #[test]
    fn reads_participant_file() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "Alice\n\n  Bob  ").expect("write failed");
        let contents = read_participants(file.path()).expect("read failed");
        assert_eq!(ParticipantList::parse(&contents).len(), 2);
    }

    #[test]
    fn missing_participant_file() {
        let error = read_participants(Path::new("/definitely/not/here.txt")).expect_err("read succeeded");
        assert!(error.to_string().contains("/definitely/not/here.txt"));
    }
}
