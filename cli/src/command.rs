use std::str::FromStr;

use thiserror::Error;

/// One line typed at the prompt.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    Reveal(i32, i32),
    NewGame,
    Width(i32),
    Height(i32),
    Mines(i32),
    Percent(f32),
    Draw,
    Snapshot,
    Help,
    Quit,
}

#[derive(Error, Debug, PartialEq)]
pub enum CommandError {
    #[error("Empty command")]
    Empty,
    #[error("Unknown command `{0}`, try `help`")]
    Unknown(String),
    #[error("`{command}` expects {expected}")]
    BadArguments {
        command: String,
        expected: &'static str,
    },
}

pub const HELP: &str = "\
commands:
  r X Y      reveal the cell at column X, row Y
  n          generate a new minefield
  w N        set the width (1-50)
  h N        set the height (1-50)
  m N        set the amount of mines
  p PCT      set the amount of mines as a percentage of the field
  d          draw the field
  s          print the field as JSON
  ?          show this help
  q          quit";

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let Some(name) = words.next() else {
            return Err(CommandError::Empty);
        };
        let args: Vec<&str> = words.collect();

        let bad = |expected| CommandError::BadArguments {
            command: name.to_owned(),
            expected,
        };

        let command = match name.to_ascii_lowercase().as_str() {
            "r" | "reveal" => match args.as_slice() {
                [x, y] => Command::Reveal(
                    x.parse().map_err(|_| bad("two integers"))?,
                    y.parse().map_err(|_| bad("two integers"))?,
                ),
                _ => return Err(bad("two integers")),
            },
            "w" | "width" => Command::Width(single(&args).ok_or_else(|| bad("an integer"))?),
            "h" | "height" => Command::Height(single(&args).ok_or_else(|| bad("an integer"))?),
            "m" | "mines" => Command::Mines(single(&args).ok_or_else(|| bad("an integer"))?),
            "p" | "percent" => Command::Percent(single(&args).ok_or_else(|| bad("a number"))?),
            other => {
                let command = match other {
                    "n" | "new" => Command::NewGame,
                    "d" | "draw" => Command::Draw,
                    "s" | "snapshot" => Command::Snapshot,
                    "?" | "help" => Command::Help,
                    "q" | "quit" | "exit" => Command::Quit,
                    _ => return Err(CommandError::Unknown(name.to_owned())),
                };
                if !args.is_empty() {
                    return Err(bad("no arguments"));
                }
                command
            }
        };
        Ok(command)
    }
}

fn single<T: FromStr>(args: &[&str]) -> Option<T> {
    match args {
        [value] => value.parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_reveal() {
        assert_eq!("r 3 4".parse::<Command>(), Ok(Command::Reveal(3, 4)));
        assert_eq!("  Reveal -1 0 ".parse::<Command>(), Ok(Command::Reveal(-1, 0)));
    }

    #[test]
    fn parses_settings() {
        assert_eq!("w 12".parse::<Command>(), Ok(Command::Width(12)));
        assert_eq!("height 7".parse::<Command>(), Ok(Command::Height(7)));
        assert_eq!("m 10".parse::<Command>(), Ok(Command::Mines(10)));
        assert_eq!("p 15.5".parse::<Command>(), Ok(Command::Percent(15.5)));
    }

    #[test]
    fn parses_bare_commands() {
        assert_eq!("n".parse::<Command>(), Ok(Command::NewGame));
        assert_eq!("Q".parse::<Command>(), Ok(Command::Quit));
        assert_eq!("?".parse::<Command>(), Ok(Command::Help));
    }

    #[test]
    fn reports_bad_input() {
        assert_eq!("".parse::<Command>(), Err(CommandError::Empty));
        assert_eq!(
            "jump".parse::<Command>(),
            Err(CommandError::Unknown("jump".to_owned()))
        );
        assert_eq!(
            "r 1".parse::<Command>(),
            Err(CommandError::BadArguments {
                command: "r".to_owned(),
                expected: "two integers",
            })
        );
        assert_eq!(
            "w wide".parse::<Command>(),
            Err(CommandError::BadArguments {
                command: "w".to_owned(),
                expected: "an integer",
            })
        );
        assert_eq!(
            "n 5".parse::<Command>(),
            Err(CommandError::BadArguments {
                command: "n".to_owned(),
                expected: "no arguments",
            })
        );
    }
}
