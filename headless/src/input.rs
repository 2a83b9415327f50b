use common::sim::{AgentId, DifficultyPreset, Direction, MatchMode};

/// One line of operator input.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Command {
    Steer(AgentId, Direction),
    Start(MatchMode),
    Pause,
    Resume,
    Restart,
    Menu,
    Scores,
    Settings,
    Difficulty(DifficultyPreset),
    Quit,
}

pub const HELP: &str = "commands: <player> <up|down|left|right>, pause, resume, restart, \
menu, back, start [multi], scores, settings, difficulty <easy|medium|hard>, quit";

fn parse_direction(word: &str) -> Result<Direction, String> {
    match word {
        "up" | "u" => Ok(Direction::Up),
        "down" | "d" => Ok(Direction::Down),
        "left" | "l" => Ok(Direction::Left),
        "right" | "r" => Ok(Direction::Right),
        _ => Err(format!("Unknown direction '{}'", word)),
    }
}

pub fn parse_command(line: &str) -> Result<Command, String> {
    let lowered = line.trim().to_lowercase();
    let words: Vec<&str> = lowered.split_whitespace().collect();

    match words.as_slice() {
        [] => Err("Empty command".to_string()),
        ["pause"] => Ok(Command::Pause),
        ["resume"] => Ok(Command::Resume),
        ["restart"] => Ok(Command::Restart),
        ["menu"] | ["back"] => Ok(Command::Menu),
        ["start"] | ["start", "single"] => Ok(Command::Start(MatchMode::Single)),
        ["start", "multi"] => Ok(Command::Start(MatchMode::Multi)),
        ["scores"] => Ok(Command::Scores),
        ["settings"] => Ok(Command::Settings),
        ["difficulty", preset] => preset.parse().map(Command::Difficulty),
        ["quit"] | ["exit"] => Ok(Command::Quit),
        [player, direction] => {
            let index: u32 = player
                .parse()
                .map_err(|_| format!("Unknown command '{}'", line.trim()))?;
            if index == 0 {
                return Err("Players are numbered from 1".to_string());
            }
            Ok(Command::Steer(AgentId::new(index), parse_direction(direction)?))
        }
        _ => Err(format!("Unknown command '{}'", line.trim())),
    }
}
