//! Terminal host for the QuickNote widget.
//!
//! Reads one command per stdin line and forwards it to the note controller
//! as the matching surface event.

mod command;
mod surface;

use clap::Parser;
use command::{Command, HELP_TEXT};
use log::LevelFilter;
use quicknote_core::{
    init_logging, AppConfig, DisplaySurface, JsonNoteStore, KeyValueStore, MemoryKeyValueStore,
    NoteController, Notice, SqliteKeyValueStore, UiEvent,
};
use std::error::Error;
use std::io::{BufRead, Write};
use std::path::PathBuf;
use surface::TerminalSurface;

#[derive(Parser, Debug)]
#[command(name = "quicknote")]
#[command(version, about = "A single-list note keeper")]
struct Cli {
    /// SQLite file to keep notes in (in-memory when omitted)
    #[arg(long)]
    db: Option<PathBuf>,

    /// Absolute directory for rolling log files (logging off when omitted)
    #[arg(long)]
    log_dir: Option<PathBuf>,

    /// Log level: trace, debug, info, warn, error
    #[arg(long, value_parser = parse_level)]
    log_level: Option<LevelFilter>,
}

fn parse_level(value: &str) -> Result<LevelFilter, String> {
    match value.trim().to_ascii_lowercase().as_str() {
        "trace" => Ok(LevelFilter::Trace),
        "debug" => Ok(LevelFilter::Debug),
        "info" => Ok(LevelFilter::Info),
        "warn" | "warning" => Ok(LevelFilter::Warn),
        "error" => Ok(LevelFilter::Error),
        other => Err(format!(
            "unsupported log level `{other}`; expected trace|debug|info|warn|error"
        )),
    }
}

impl Cli {
    fn into_config(self) -> AppConfig {
        let mut config = AppConfig::default();
        if let Some(db) = self.db {
            config = config.with_db_path(db);
        }
        if let Some(log_dir) = self.log_dir {
            config = config.with_log_dir(log_dir, self.log_level);
        }
        config
    }
}

fn main() {
    let config = Cli::parse().into_config();
    let stdin = std::io::stdin();
    if let Err(err) = run(&config, stdin.lock(), std::io::stdout()) {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn open_backend(config: &AppConfig) -> Result<Box<dyn KeyValueStore>, Box<dyn Error>> {
    Ok(match config.db_path.as_ref() {
        Some(path) => Box::new(SqliteKeyValueStore::open(path)?),
        None => Box::new(MemoryKeyValueStore::new()),
    })
}

fn run(config: &AppConfig, input: impl BufRead, out: impl Write) -> Result<(), Box<dyn Error>> {
    if let Some(logging) = config.logging.as_ref() {
        init_logging(logging)?;
    }

    let store = JsonNoteStore::with_key(open_backend(config)?, config.storage_key.as_str());
    run_session(store, input, out)
}

fn run_session<K: KeyValueStore>(
    store: JsonNoteStore<K>,
    input: impl BufRead,
    out: impl Write,
) -> Result<(), Box<dyn Error>> {
    let mut controller = NoteController::new(store, TerminalSurface::new(out));
    controller.handle_event(UiEvent::Ready)?;

    for line in input.lines() {
        let event = match Command::parse(&line?) {
            Command::Quit => break,
            Command::Help => {
                controller.surface_mut().print(HELP_TEXT);
                continue;
            }
            Command::Add(text) => {
                controller.surface_mut().set_input(text);
                UiEvent::AddTriggered
            }
            Command::Delete(position) => controller.surface().delete_event(position),
            Command::List => UiEvent::Ready,
            Command::Clear => match controller.service().store().clear() {
                Ok(()) => UiEvent::Ready,
                Err(err) => {
                    log::warn!("event=cli_clear module=cli status=error error={err}");
                    controller
                        .surface_mut()
                        .show_notice(&Notice::error("Notes could not be cleared."));
                    continue;
                }
            },
        };

        // Failures are already shown as notices; keep the session alive.
        if let Err(err) = controller.handle_event(event) {
            log::warn!("event=cli_command module=cli status=error error={err}");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{parse_level, run, run_session};
    use log::LevelFilter;
    use quicknote_core::{
        AppConfig, JsonNoteStore, KeyValueStore, KvError, KvResult, MemoryKeyValueStore,
    };

    /// Backend whose deletes always fail.
    struct NoRemoveStore(MemoryKeyValueStore);

    impl KeyValueStore for NoRemoveStore {
        fn get_item(&self, key: &str) -> KvResult<Option<String>> {
            self.0.get_item(key)
        }

        fn set_item(&self, key: &str, value: &str) -> KvResult<()> {
            self.0.set_item(key, value)
        }

        fn remove_item(&self, _key: &str) -> KvResult<()> {
            Err(KvError::MissingRequiredTable("kv_entries"))
        }
    }

    fn session(config: &AppConfig, script: &str) -> String {
        let mut out = Vec::new();
        run(config, script.as_bytes(), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn parse_level_accepts_known_values() {
        assert_eq!(parse_level(" WARNING ").unwrap(), LevelFilter::Warn);
        assert!(parse_level("loud").unwrap_err().contains("unsupported"));
    }

    #[test]
    fn scripted_session_adds_and_deletes() {
        let printed = session(&AppConfig::default(), "alpha\n  beta  \n   \n:delete 1\n:quit\nignored\n");

        let last_render = printed.rsplit("--- notes ---").next().unwrap();
        assert!(last_render.contains("1. beta"));
        assert!(!last_render.contains("alpha"));
        assert!(!printed.contains("ignored"));
    }

    #[test]
    fn failed_clear_shows_notice_and_keeps_session() {
        let store = JsonNoteStore::new(NoRemoveStore(MemoryKeyValueStore::new()));
        let mut out = Vec::new();
        run_session(store, "kept\n:clear\nafter\n".as_bytes(), &mut out).unwrap();
        let printed = String::from_utf8(out).unwrap();

        assert!(printed.contains("[error] Notes could not be cleared."));
        let last_render = printed.rsplit("--- notes ---").next().unwrap();
        assert!(last_render.contains("1. kept"));
        assert!(last_render.contains("2. after"));
    }

    #[test]
    fn colon_prefixed_notes_are_added() {
        let printed = session(&AppConfig::default(), ":)\n::list\n");

        let last_render = printed.rsplit("--- notes ---").next().unwrap();
        assert!(last_render.contains("1. :)"));
        assert!(last_render.contains("2. :list"));
    }

    #[test]
    fn notes_persist_between_sessions_with_db() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::default().with_db_path(dir.path().join("notes.db"));

        session(&config, "kept\n");
        let printed = session(&config, ":list\n");
        assert!(printed.contains("1. kept"));

        session(&config, ":clear\n");
        let printed = session(&config, "");
        assert!(!printed.contains("kept"));
    }
}
