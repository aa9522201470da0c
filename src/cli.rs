//! Command-line front end
//!
//! Each control maps to one session transition: the positional file is the
//! picker, `--intensity`/`--language` are the selectors, running the command
//! submits, the retry prompt re-submits the staged file and Ctrl-C resets.

use std::future::Future;
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use is_terminal::IsTerminal;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Lines};
use tokio::time::Instant;

use crate::config::{ClientConfig, Config, UiTimings};
use crate::core::session::{Completion, Session};
use crate::presenter::ResultPresenter;
use crate::providers::{GeminiConfig, GeminiProvider, RoastProvider};
use crate::roast::{Language, RoastIntensity};

const FRAME: Duration = Duration::from_millis(30);
const INTERRUPTED: u8 = 130;

/// Reply to the retry prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Answer {
    Yes,
    No,
    Interrupted,
}

/// Brutal AI feedback. Direct. Honest. No sugar-coating.
#[derive(Debug, Parser)]
#[command(name = "roast-my-resume", version, about)]
pub struct Args {
    /// Resume to roast: PDF, PNG, JPG, WEBP or HEIC, at most 5MB
    pub file: PathBuf,

    /// mild, spicy or scorched-earth
    #[arg(short, long)]
    pub intensity: Option<RoastIntensity>,

    /// english or hindi
    #[arg(short, long)]
    pub language: Option<Language>,

    /// TOML configuration file
    #[arg(short, long, env = "ROAST_CONFIG")]
    pub config: Option<PathBuf>,

    /// Print the final score without counting up
    #[arg(long)]
    pub no_animation: bool,

    /// Print the raw roast as JSON
    #[arg(long)]
    pub json: bool,
}

impl Args {
    pub fn load_config(&self) -> anyhow::Result<Config> {
        let file = match &self.config {
            Some(path) => Some(
                ClientConfig::from_file(path)
                    .with_context(|| format!("loading {}", path.display()))?,
            ),
            None => None,
        };
        Ok(Config::from_env(file)?)
    }
}

pub async fn run(args: Args, config: Config) -> anyhow::Result<ExitCode> {
    let mut options = config.defaults;
    if let Some(intensity) = args.intensity {
        options.set_intensity(intensity);
    }
    if let Some(language) = args.language {
        options.set_language(language);
    }

    let provider = GeminiProvider::new(GeminiConfig::from(&config))?;
    let mut session = Session::new(options, &config.timings);
    let interactive = std::io::stdin().is_terminal() && std::io::stderr().is_terminal();
    let color = !args.json && std::io::stdout().is_terminal();

    eprintln!(
        "{} {}  ·  {}",
        options.intensity().icon(),
        options.intensity().label(options.language()),
        options.language()
    );

    if session.select_path(&args.file).await? != Completion::Succeeded {
        show_toast(&session);
        return Ok(ExitCode::FAILURE);
    }
    if let Some(file) = session.staged() {
        eprintln!("📄 {}  ·  Ready to roast", file.name);
    }

    // Once ctrl_c() has been awaited the default SIGINT handler is gone, so
    // every later wait must race it too.
    let mut answers = BufReader::new(tokio::io::stdin()).lines();
    loop {
        eprintln!("{}", session.options().language().submit_label());

        let interval = config.timings.loading_interval;
        match roast_once(&mut session, &provider, interval, tokio::signal::ctrl_c()).await? {
            Completion::Succeeded => break,
            Completion::Stale => {
                eprintln!("Roast cancelled.");
                return Ok(ExitCode::from(INTERRUPTED));
            }
            Completion::Failed => {
                show_toast(&session);
                if !interactive {
                    return Ok(ExitCode::FAILURE);
                }
                match confirm_retry(&mut answers, tokio::signal::ctrl_c()).await? {
                    Answer::Yes => {}
                    Answer::No => return Ok(ExitCode::FAILURE),
                    Answer::Interrupted => {
                        eprintln!();
                        session.reset();
                        return Ok(ExitCode::from(INTERRUPTED));
                    }
                }
            }
        }
    }

    let response = session
        .result()
        .context("session finished without a roast")?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(response)?);
    } else {
        let animate = !args.no_animation && color;
        tokio::select! {
            shown = present(response, &config.timings, animate, color) => shown?,
            _ = tokio::signal::ctrl_c() => {
                println!();
                return Ok(ExitCode::from(INTERRUPTED));
            }
        }
    }

    session.reset();
    Ok(ExitCode::SUCCESS)
}

/// Submit once, cycling the loading text until the answer arrives
///
/// `interrupt` firing resets the session and drops the request.
async fn roast_once<I, T>(
    session: &mut Session,
    provider: &dyn RoastProvider,
    interval: Duration,
    interrupt: I,
) -> anyhow::Result<Completion>
where
    I: Future<Output = T>,
{
    let ticket = session.begin_submit()?;
    let file = Arc::clone(&ticket.file);
    let mut request = provider.roast(&file, ticket.intensity, ticket.language);

    let mut ticker = tokio::time::interval(interval);
    ticker.tick().await;
    show_loading(session.loading_text());

    tokio::pin!(interrupt);
    let outcome = loop {
        tokio::select! {
            result = &mut request => break Some(result),
            _ = ticker.tick() => show_loading(session.advance_loading()),
            _ = &mut interrupt => break None,
        }
    };
    clear_line();

    match outcome {
        Some(result) => Ok(session.finish_submit(ticket, result)),
        None => {
            session.reset();
            Ok(Completion::Stale)
        }
    }
}

async fn present(
    response: &crate::roast::RoastResponse,
    timings: &UiTimings,
    animate: bool,
    color: bool,
) -> anyhow::Result<()> {
    let presenter = ResultPresenter::new(response, timings.count_up, color);
    let mut out = std::io::stdout();

    if !animate {
        write!(out, "{}", presenter.render())?;
        return Ok(());
    }

    writeln!(out, "{}", presenter.heading())?;
    let mut frames = tokio::time::interval(FRAME);
    loop {
        frames.tick().await;
        let now = Instant::now();
        write!(out, "\r{}", presenter.score_line(presenter.displayed_score_at(now)))?;
        out.flush()?;
        if presenter.is_finished_at(now) {
            break;
        }
    }
    writeln!(out)?;
    write!(out, "{}", presenter.body())?;
    Ok(())
}

fn show_loading(text: Option<&str>) {
    if let Some(text) = text {
        let mut err = std::io::stderr();
        let _ = write!(err, "\r\x1b[2K⏳ {}", text.to_uppercase());
        let _ = err.flush();
    }
}

fn clear_line() {
    let mut err = std::io::stderr();
    let _ = write!(err, "\r\x1b[2K");
    let _ = err.flush();
}

fn show_toast(session: &Session) {
    if let Some(message) = session.toast().current() {
        eprintln!("⚠️  {}", message);
    }
}

/// Ask whether to resubmit; EOF counts as no
async fn confirm_retry<R, I, T>(answers: &mut Lines<R>, interrupt: I) -> anyhow::Result<Answer>
where
    R: AsyncBufRead + Unpin,
    I: Future<Output = T>,
{
    eprint!("Retry with the same file? [y/N] ");
    std::io::stderr().flush()?;

    let line = tokio::select! {
        line = answers.next_line() => line?.unwrap_or_default(),
        _ = interrupt => return Ok(Answer::Interrupted),
    };
    match line.trim().to_lowercase().as_str() {
        "y" | "yes" => Ok(Answer::Yes),
        _ => Ok(Answer::No),
    }
}
