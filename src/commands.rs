//! Parsování příkazů z textu zprávy a vstupu pro /predict.

use hero_catalog::Catalog;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Start,
    Help,
    About,
    List,
    Meta,
    Hero(String),
    Counter(String),
    Counters(String),
    Build(String),
    Stats(String),
    Search(String),
    Predict(String),
    /// Plain text, treated as a hero lookup.
    Text(String),
    Unknown(String),
}

impl Command {
    /// Stable label for logs.
    pub fn name(&self) -> &str {
        match self {
            Command::Start       => "/start",
            Command::Help        => "/help",
            Command::About       => "/about",
            Command::List        => "/list",
            Command::Meta        => "/meta",
            Command::Hero(_)     => "/hero",
            Command::Counter(_)  => "/counter",
            Command::Counters(_) => "/counters",
            Command::Build(_)    => "/build",
            Command::Stats(_)    => "/stats",
            Command::Search(_)   => "/search",
            Command::Predict(_)  => "/predict",
            Command::Text(_)     => "text",
            Command::Unknown(c)  => c.as_str(),
        }
    }
}

/// `None` for empty messages. `/cmd@botname args` is accepted.
pub fn parse_command(text: &str) -> Option<Command> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    if !text.starts_with('/') {
        return Some(Command::Text(text.to_string()));
    }

    let (head, args) = match text.split_once(char::is_whitespace) {
        Some((h, a)) => (h, a.trim()),
        None => (text, ""),
    };
    let cmd = head.split('@').next().unwrap_or(head).to_lowercase();
    let args = args.split_whitespace().collect::<Vec<_>>().join(" ");

    Some(match cmd.as_str() {
        "/start"    => Command::Start,
        "/help"     => Command::Help,
        "/about"    => Command::About,
        "/list"     => Command::List,
        "/meta"     => Command::Meta,
        "/hero"     => Command::Hero(args),
        "/counter"  => Command::Counter(args),
        "/counters" => Command::Counters(args),
        "/build"    => Command::Build(args),
        "/stats"    => Command::Stats(args),
        "/search"   => Command::Search(args),
        "/predict"  => Command::Predict(args),
        _           => Command::Unknown(cmd),
    })
}

// ── /predict ─────────────────────────────────────────────────────────────────

const SEPARATORS: [&str; 2] = [" vs ", " против "];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PredictInputError {
    Empty,
    MissingSeparator,
    NotTwoTeams,
    UnknownHeroes(Vec<String>),
}

impl fmt::Display for PredictInputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PredictInputError::Empty => f.write_str("no lineups given"),
            PredictInputError::MissingSeparator => f.write_str("separate the teams with 'vs'"),
            PredictInputError::NotTwoTeams => f.write_str("exactly two teams are needed"),
            PredictInputError::UnknownHeroes(names) => {
                let quoted: Vec<String> = names.iter().map(|n| format!("'{n}'")).collect();
                write!(f, "unknown heroes: {}", quoted.join(", "))
            }
        }
    }
}

impl std::error::Error for PredictInputError {}

/// Splits `A… vs B…` into two raw rosters.
///
/// A team containing commas is split on commas (multi-word names), otherwise
/// on whitespace.
pub fn split_teams(args: &str) -> Result<(Vec<String>, Vec<String>), PredictInputError> {
    let args = format!(" {} ", args.trim().to_lowercase());
    if args.trim().is_empty() {
        return Err(PredictInputError::Empty);
    }

    let separator = SEPARATORS
        .iter()
        .find(|s| args.contains(*s))
        .ok_or(PredictInputError::MissingSeparator)?;

    let parts: Vec<&str> = args.split(separator).collect();
    if parts.len() != 2 {
        return Err(PredictInputError::NotTwoTeams);
    }

    Ok((split_roster(parts[0]), split_roster(parts[1])))
}

fn split_roster(team: &str) -> Vec<String> {
    let team = team.trim();
    if team.contains(',') {
        team.split(',').map(str::trim).filter(|s| !s.is_empty()).map(String::from).collect()
    } else {
        team.split_whitespace().map(String::from).collect()
    }
}

/// Maps every typed name to a display name: exact lookup first, then the first
/// search hit. Unmatched names are collected, never guessed.
pub fn resolve_names(catalog: &Catalog, names: &[String]) -> (Vec<String>, Vec<String>) {
    let mut valid = Vec::new();
    let mut unknown = Vec::new();

    for name in names {
        if let Some(hero) = catalog.lookup(name) {
            valid.push(hero.name.clone());
        } else if let Some(hero) = catalog.search(name, 1).first() {
            valid.push(hero.name.clone());
        } else {
            unknown.push(name.clone());
        }
    }

    (valid, unknown)
}

/// Full /predict input pipeline: split, then resolve both rosters.
pub fn parse_predict(catalog: &Catalog, args: &str) -> Result<(Vec<String>, Vec<String>), PredictInputError> {
    let (radiant, dire) = split_teams(args)?;
    let (radiant, mut unknown) = resolve_names(catalog, &radiant);
    let (dire, unknown_dire) = resolve_names(catalog, &dire);
    unknown.extend(unknown_dire);

    if !unknown.is_empty() {
        return Err(PredictInputError::UnknownHeroes(unknown));
    }
    Ok((radiant, dire))
}
