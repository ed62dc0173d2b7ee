use std::io::IsTerminal;
use std::path::PathBuf;
use std::process::ExitCode;

use quest_core::config::Config;
use quest_tui::screen::render_snapshot_text;

mod interactive_runtime;

const USAGE: &str = "usage: quest-status [--config <path>]";

#[derive(Debug, Default, PartialEq, Eq)]
struct Args {
    config: Option<PathBuf>,
    help: bool,
}

fn parse_args<I>(args: I) -> Result<Args, String>
where
    I: IntoIterator<Item = String>,
{
    let mut parsed = Args::default();
    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => parsed.help = true,
            "-c" | "--config" => {
                let Some(path) = args.next() else {
                    return Err(format!("{arg} needs a path\n{USAGE}"));
                };
                parsed.config = Some(PathBuf::from(path));
            }
            other => {
                if let Some(path) = other.strip_prefix("--config=") {
                    parsed.config = Some(PathBuf::from(path));
                } else {
                    return Err(format!("unknown argument {other:?}\n{USAGE}"));
                }
            }
        }
    }
    Ok(parsed)
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("quest-status: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), String> {
    let args = parse_args(std::env::args().skip(1))?;
    if args.help {
        println!("{USAGE}");
        return Ok(());
    }

    let config = Config::load(args.config.as_deref()).map_err(|err| format!("load config: {err}"))?;
    let interactive = std::io::stdin().is_terminal() && std::io::stdout().is_terminal();
    quest_tui::logging::init_logging(&config.logging, interactive)?;
    config.warn_ignored_env();

    let registry = config
        .registry()
        .map_err(|err| format!("build status registry: {err}"))?;
    let theme = quest_tui::detected_theme(&config.tui);
    tracing::info!(
        interactive,
        statuses = registry.len(),
        theme = config.tui.theme.as_str(),
        "quest-status starting"
    );

    if interactive {
        interactive_runtime::run(&registry, &config.tui, theme)
    } else {
        print!("{}", render_snapshot_text(&registry, &config.tui, theme));
        Ok(())
    }
}
