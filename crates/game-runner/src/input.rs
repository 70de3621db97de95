//! Keyboard/text input to session commands.

use board_engine::engine::Direction;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Move(Direction),
    NewGame,
    Quit,
    Help,
}

pub const HELP: &str = "\
Moves: arrow keys, w/a/s/d, h/j/k/l, or up/down/left/right
n: new game (reports the current score)
q: quit
?: this help";

/// Parse one line of input. Returns `None` for anything unrecognised.
pub fn parse_command(line: &str) -> Option<Command> {
    let key = line.trim_end_matches(&['\r', '\n'][..]).trim_matches(' ');
    let cmd = match key {
        // ANSI cursor keys, as a line-buffered terminal echoes them.
        "\x1b[A" | "\x1bOA" => Command::Move(Direction::Up),
        "\x1b[B" | "\x1bOB" => Command::Move(Direction::Down),
        "\x1b[C" | "\x1bOC" => Command::Move(Direction::Right),
        "\x1b[D" | "\x1bOD" => Command::Move(Direction::Left),
        "w" | "k" => Command::Move(Direction::Up),
        "s" | "j" => Command::Move(Direction::Down),
        "a" | "h" => Command::Move(Direction::Left),
        "d" | "l" => Command::Move(Direction::Right),
        "n" | "new" => Command::NewGame,
        "q" | "quit" | "exit" => Command::Quit,
        "?" | "help" => Command::Help,
        other => return other.parse::<Direction>().ok().map(Command::Move),
    };
    Some(cmd)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_maps_keys() {
        assert_eq!(parse_command("w\n"), Some(Command::Move(Direction::Up)));
        assert_eq!(parse_command("a"), Some(Command::Move(Direction::Left)));
        assert_eq!(parse_command("j"), Some(Command::Move(Direction::Down)));
        assert_eq!(parse_command("l\r\n"), Some(Command::Move(Direction::Right)));
        assert_eq!(parse_command("\x1b[A"), Some(Command::Move(Direction::Up)));
        assert_eq!(parse_command("\x1b[D\n"), Some(Command::Move(Direction::Left)));
        assert_eq!(parse_command("Down"), Some(Command::Move(Direction::Down)));
    }

    #[test]
    fn it_maps_commands() {
        assert_eq!(parse_command("n"), Some(Command::NewGame));
        assert_eq!(parse_command("quit"), Some(Command::Quit));
        assert_eq!(parse_command("?"), Some(Command::Help));
        assert_eq!(parse_command("x"), None);
        assert_eq!(parse_command(""), None);
    }
}
