//! Interactive session over stdin.
//!
//! Plain lines edit the search query; `:`-prefixed lines are commands.
//! Fetch results are rendered as they arrive, interleaved with input.

use std::io::{self, Write};

use tokio::io::{AsyncBufReadExt, BufReader};

use picturepulse_api::traits::MovieProvider;
use picturepulse_core::detail::DetailCommand;
use picturepulse_core::search::SearchCommand;
use picturepulse_core::shortcuts::{Focus, Shortcut};
use picturepulse_core::storage::KeyValueStore;
use picturepulse_runtime::{FetchUpdate, Session};

use crate::output;

const HELP: &str = "\
Type to search. Commands:
  :open N | :open ID   show a result (again to close)
  :rate N              pick a rating 1-10
  :add                 add the open movie to your watched list
  :esc                 press Escape (close the detail view)
  :enter               press Enter (clear and focus the search)
  :rm ID               remove a movie from your watched list
  :watched             show your watched list
  :log                 show recent activity
  :help  :quit";

#[derive(Debug, PartialEq, Eq)]
enum Target {
    Index(usize),
    Id(String),
}

#[derive(Debug, PartialEq, Eq)]
enum Line {
    Query(String),
    Open(Target),
    Rate(u8),
    Add,
    Key(&'static str),
    Remove(String),
    Watched,
    Log,
    Help,
    Quit,
    Invalid(String),
}

fn parse_line(line: &str) -> Line {
    let Some(command) = line.strip_prefix(':') else {
        return Line::Query(line.to_string());
    };
    let mut parts = command.split_whitespace();
    let name = parts.next().unwrap_or_default();
    let arg = parts.next();

    match (name, arg) {
        ("open" | "o", Some(arg)) => match arg.parse::<usize>() {
            Ok(0) => Line::Invalid("results are numbered from 1".into()),
            Ok(n) => Line::Open(Target::Index(n - 1)),
            Err(_) => Line::Open(Target::Id(arg.to_string())),
        },
        ("rate" | "r", Some(arg)) => match arg.parse() {
            Ok(v) => Line::Rate(v),
            Err(_) => Line::Invalid(format!("not a rating: {arg}")),
        },
        ("add" | "a", None) => Line::Add,
        ("esc" | "close", None) => Line::Key("Escape"),
        ("enter", None) => Line::Key("Enter"),
        ("rm" | "remove", Some(id)) => Line::Remove(id.to_string()),
        ("watched" | "w", None) => Line::Watched,
        ("log", None) => Line::Log,
        ("help" | "h" | "?", None) => Line::Help,
        ("quit" | "q" | "exit", None) => Line::Quit,
        _ => Line::Invalid(format!("unknown command :{command} (try :help)")),
    }
}

enum Input {
    Line(String),
    Update(FetchUpdate),
    Eof,
}

pub async fn run<P: MovieProvider, S: KeyValueStore>(
    mut session: Session<P, S>,
    initial_query: &str,
) -> io::Result<()> {
    println!("{HELP}");
    if !initial_query.trim().is_empty() {
        session.set_query(initial_query);
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    prompt(&session)?;

    loop {
        let input = tokio::select! {
            line = lines.next_line() => match line? {
                Some(line) => Input::Line(line),
                None => Input::Eof,
            },
            Some(update) = session.next_update(), if session.is_busy() => Input::Update(update),
        };

        match input {
            Input::Eof => break,
            Input::Update(update) => {
                println!();
                render_update(&session, update);
            }
            Input::Line(line) => {
                if !handle(&mut session, parse_line(line.trim_end())) {
                    break;
                }
            }
        }
        prompt(&session)?;
    }
    Ok(())
}

fn prompt<P: MovieProvider, S: KeyValueStore>(session: &Session<P, S>) -> io::Result<()> {
    print!("{}> ", session.title());
    io::stdout().flush()
}

fn render_update<P: MovieProvider, S: KeyValueStore>(session: &Session<P, S>, update: FetchUpdate) {
    match update {
        FetchUpdate::SearchLoaded { .. } | FetchUpdate::SearchFailed => {
            print!("{}", output::search(&session.search()));
        }
        FetchUpdate::DetailLoaded | FetchUpdate::DetailFailed => {
            print!("{}", output::detail(&session.detail(), session.rating()));
        }
        FetchUpdate::Stale => {}
    }
}

/// Apply one input line. Returns `false` to quit.
fn handle<P: MovieProvider, S: KeyValueStore>(session: &mut Session<P, S>, line: Line) -> bool {
    match line {
        Line::Query(query) => {
            session.set_focus(Focus::SearchInput);
            match session.set_query(query) {
                SearchCommand::Fetch { query, .. } => println!("Searching \"{query}\"..."),
                SearchCommand::Cleared => println!("(results cleared)"),
                SearchCommand::Unchanged => {}
            }
        }
        Line::Open(target) => {
            session.set_focus(Focus::Elsewhere);
            let command = match target {
                Target::Index(i) => session.select_result(i),
                Target::Id(id) => Ok(session.select(id)),
            };
            match command {
                Ok(DetailCommand::Fetch { id, .. }) => println!("Loading {id}..."),
                Ok(DetailCommand::Closed) => println!("(closed)"),
                Ok(DetailCommand::Unchanged) => {}
                Err(e) => eprintln!("error: {e}"),
            }
        }
        Line::Rate(value) => match session.rate(value) {
            Ok(state) => println!("{}", output::rating_line(state)),
            Err(e) => eprintln!("error: {e}"),
        },
        Line::Add => match session.add_to_watched() {
            Ok(entry) => {
                println!("Added {} rated {}/10", entry.title, entry.user_rating);
                print!("{}", output::summary(&session.aggregates()));
            }
            Err(e) => eprintln!("error: {e}"),
        },
        Line::Key(key) => match session.press_key(key) {
            Some(Shortcut::FocusSearch) => println!("(search cleared)"),
            Some(Shortcut::CloseDetail) => println!("(closed)"),
            None => {}
        },
        Line::Remove(id) => {
            let removed = session.remove_watched(&id);
            println!("Removed {removed} entr{}", if removed == 1 { "y" } else { "ies" });
        }
        Line::Watched => {
            print!("{}", output::watched(session.watched(), &session.aggregates()));
        }
        Line::Log => {
            for (at, event) in session.activity() {
                println!("{} {event}", at.format("%H:%M:%S"));
            }
        }
        Line::Help => println!("{HELP}"),
        Line::Quit => return false,
        Line::Invalid(msg) => eprintln!("{msg}"),
    }
    true
}
