use pool_seeding::{Game, ScheduleOptions};
use std::fmt;

/// Errors that can occur during command parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// A double quote was opened but never closed.
    UnterminatedQuote,
    /// Argument that should be a number is not one.
    InvalidNumber(String),
    /// Wrong number or kind of arguments; carries the usage line.
    Usage(&'static str),
    /// Unrecognized command.
    UnrecognizedCommand(String),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnterminatedQuote => write!(f, "Unterminated quote in command"),
            Self::InvalidNumber(value) => {
                write!(f, "Invalid number '{}'. Expected a whole number", value)
            }
            Self::Usage(usage) => write!(f, "Usage: {}", usage),
            Self::UnrecognizedCommand(cmd) => write!(
                f,
                "Unrecognized command '{}'. Type 'help' to see available commands",
                cmd
            ),
        }
    }
}

impl std::error::Error for ParseError {}

/// A parsed frontend command.
///
/// Game numbers are shown to the user starting at 1 and stored here as
/// 0-based log positions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Quit,
    ListTeams,
    ListPools,
    ListGames,
    Seeding,
    History(String),
    AddTeam(String),
    RemoveTeam(String),
    RenameTeam { old: String, new: String },
    SetPoolCount(i64),
    SetPoolSize(i64),
    AssignRandom,
    AssignRemaining,
    ClearPools,
    MoveTeam { team: String, pool: Option<u32> },
    AddGame(Game),
    EditGame { index: usize, game: Game },
    RemoveGame(usize),
    Schedule(ScheduleOptions),
    NewTournament,
    Demo,
    Save(Option<String>),
    Load(String),
}

impl Command {
    /// Whether the command changes the tournament and should be autosaved
    pub fn is_mutating(&self) -> bool {
        !matches!(
            self,
            Command::Help
                | Command::Quit
                | Command::ListTeams
                | Command::ListPools
                | Command::ListGames
                | Command::Seeding
                | Command::History(_)
                | Command::Save(_)
                | Command::Load(_)
        )
    }
}

const ADD_USAGE: &str = "add NAME";
const REMOVE_USAGE: &str = "remove NAME";
const RENAME_USAGE: &str = "rename OLD NEW";
const HISTORY_USAGE: &str = "history NAME";
const POOL_COUNT_USAGE: &str = "pool-count N";
const POOL_SIZE_USAGE: &str = "pool-size N";
const ASSIGN_USAGE: &str = "assign random|remaining|clear";
const MOVE_USAGE: &str = "move NAME POOL|none";
const GAME_USAGE: &str = "game TEAM1 SCORE1 TEAM2 SCORE2";
const EDIT_USAGE: &str = "edit N TEAM1 SCORE1 TEAM2 SCORE2";
const DELETE_USAGE: &str = "delete N";
const SCHEDULE_USAGE: &str = "schedule GAMES_PER_TEAM [replays] [random]";
const LOAD_USAGE: &str = "load PATH";

/// Split a line into words. Double quotes group words containing spaces.
///
/// # Examples
///
/// ```
/// use ps_cli::commands::tokenize;
///
/// let words = tokenize(r#"game "Red Sox" 7 Yankees 5"#).unwrap();
/// assert_eq!(words, vec!["game", "Red Sox", "7", "Yankees", "5"]);
/// ```
pub fn tokenize(input: &str) -> Result<Vec<String>, ParseError> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut started = false;

    for ch in input.chars() {
        match ch {
            '"' => {
                in_quotes = !in_quotes;
                started = true;
            }
            c if c.is_whitespace() && !in_quotes => {
                if started {
                    tokens.push(std::mem::take(&mut current));
                    started = false;
                }
            }
            c => {
                current.push(c);
                started = true;
            }
        }
    }

    if in_quotes {
        return Err(ParseError::UnterminatedQuote);
    }
    if started {
        tokens.push(current);
    }
    Ok(tokens)
}

/// Parse a command line into a [`Command`].
///
/// # Arguments
///
/// * `input` - The raw command string from user input
///
/// # Returns
///
/// * `Ok(Command)` - Successfully parsed command
/// * `Err(ParseError)` - Parse error with descriptive message
///
/// # Examples
///
/// ```
/// use ps_cli::commands::{Command, parse_command};
///
/// assert!(matches!(parse_command("seed"), Ok(Command::Seeding)));
/// assert!(matches!(parse_command("delete 2"), Ok(Command::RemoveGame(1))));
/// assert!(matches!(parse_command(r#"add "Red Sox""#), Ok(Command::AddTeam(name)) if name == "Red Sox"));
/// ```
pub fn parse_command(input: &str) -> Result<Command, ParseError> {
    let tokens = tokenize(input)?;
    let Some((head, args)) = tokens.split_first() else {
        return Err(ParseError::UnrecognizedCommand(String::new()));
    };

    match (head.as_str(), args) {
        ("help" | "?", []) => Ok(Command::Help),
        ("quit" | "exit", []) => Ok(Command::Quit),
        ("teams", []) => Ok(Command::ListTeams),
        ("pools", []) => Ok(Command::ListPools),
        ("games", []) => Ok(Command::ListGames),
        ("seed" | "seeding", []) => Ok(Command::Seeding),
        ("new", []) => Ok(Command::NewTournament),
        ("demo", []) => Ok(Command::Demo),
        ("save", []) => Ok(Command::Save(None)),
        ("save", [path]) => Ok(Command::Save(Some(path.clone()))),

        ("history", [name]) => Ok(Command::History(name.clone())),
        ("history", _) => Err(ParseError::Usage(HISTORY_USAGE)),
        ("add", [name]) => Ok(Command::AddTeam(name.clone())),
        ("add", _) => Err(ParseError::Usage(ADD_USAGE)),
        ("remove", [name]) => Ok(Command::RemoveTeam(name.clone())),
        ("remove", _) => Err(ParseError::Usage(REMOVE_USAGE)),
        ("rename", [old, new]) => Ok(Command::RenameTeam {
            old: old.clone(),
            new: new.clone(),
        }),
        ("rename", _) => Err(ParseError::Usage(RENAME_USAGE)),
        ("load", [path]) => Ok(Command::Load(path.clone())),
        ("load", _) => Err(ParseError::Usage(LOAD_USAGE)),

        ("pool-count", [n]) => Ok(Command::SetPoolCount(parse_number(n)?)),
        ("pool-count", _) => Err(ParseError::Usage(POOL_COUNT_USAGE)),
        ("pool-size", [n]) => Ok(Command::SetPoolSize(parse_number(n)?)),
        ("pool-size", _) => Err(ParseError::Usage(POOL_SIZE_USAGE)),

        ("assign", [mode]) => match mode.as_str() {
            "random" => Ok(Command::AssignRandom),
            "remaining" => Ok(Command::AssignRemaining),
            "clear" => Ok(Command::ClearPools),
            _ => Err(ParseError::Usage(ASSIGN_USAGE)),
        },
        ("assign", _) => Err(ParseError::Usage(ASSIGN_USAGE)),

        ("move", [team, pool]) => Ok(Command::MoveTeam {
            team: team.clone(),
            pool: parse_pool(pool)?,
        }),
        ("move", _) => Err(ParseError::Usage(MOVE_USAGE)),

        ("game", [team1, score1, team2, score2]) => {
            Ok(Command::AddGame(parse_game(team1, score1, team2, score2)?))
        }
        ("game", _) => Err(ParseError::Usage(GAME_USAGE)),
        ("edit", [n, team1, score1, team2, score2]) => Ok(Command::EditGame {
            index: parse_game_number(n)?,
            game: parse_game(team1, score1, team2, score2)?,
        }),
        ("edit", _) => Err(ParseError::Usage(EDIT_USAGE)),
        ("delete", [n]) => Ok(Command::RemoveGame(parse_game_number(n)?)),
        ("delete", _) => Err(ParseError::Usage(DELETE_USAGE)),

        ("schedule", [n, flags @ ..]) => parse_schedule(n, flags),
        ("schedule", _) => Err(ParseError::Usage(SCHEDULE_USAGE)),

        _ => Err(ParseError::UnrecognizedCommand(input.trim().to_string())),
    }
}

fn parse_number<T: std::str::FromStr>(value: &str) -> Result<T, ParseError> {
    value
        .parse()
        .map_err(|_| ParseError::InvalidNumber(value.to_string()))
}

/// Parse a 1-based game number into a log position
fn parse_game_number(value: &str) -> Result<usize, ParseError> {
    parse_number::<usize>(value)?
        .checked_sub(1)
        .ok_or_else(|| ParseError::InvalidNumber(value.to_string()))
}

fn parse_pool(value: &str) -> Result<Option<u32>, ParseError> {
    if value.eq_ignore_ascii_case("none") {
        return Ok(None);
    }
    let trimmed = value.strip_prefix("Pool").unwrap_or(value).trim();
    parse_number(trimmed).map(Some)
}

fn parse_game(team1: &str, score1: &str, team2: &str, score2: &str) -> Result<Game, ParseError> {
    Ok(Game::new(
        team1,
        parse_number(score1)?,
        team2,
        parse_number(score2)?,
    ))
}

/// Parse "schedule N [replays] [random]"; flags may come in any order
fn parse_schedule(n: &str, flags: &[String]) -> Result<Command, ParseError> {
    let mut options = ScheduleOptions::new(parse_number(n)?);
    for flag in flags {
        match flag.as_str() {
            "replays" => options = options.with_replays(),
            "random" => options = options.with_random_scores(),
            _ => return Err(ParseError::Usage(SCHEDULE_USAGE)),
        }
    }
    Ok(Command::Schedule(options))
}
