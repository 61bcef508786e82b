use crate::config::ExecCommand;
use std::process::{Command, Stdio};
use std::thread;
use thiserror::Error;

const VALUE_PLACEHOLDER: &str = "{value}";

#[derive(Debug, Error)]
pub enum ExecError {
    #[error("Failed to parse command: {0}")]
    Parse(#[from] shell_words::ParseError),
    #[error("Empty command")]
    Empty,
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Splits the command into argv and substitutes the value.
pub fn render_command(command: &ExecCommand, value: f64) -> Result<Vec<String>, ExecError> {
    let value = value.to_string();
    let argv: Vec<String> = shell_words::split(command)?
        .into_iter()
        .map(|word| word.replace(VALUE_PLACEHOLDER, &value))
        .collect();

    if argv.is_empty() {
        return Err(ExecError::Empty);
    }
    Ok(argv)
}

/// Runs the command in the background. A reaper thread waits on the child so finished
/// commands do not linger as zombies.
pub fn spawn_on_change(command: &ExecCommand, value: f64) -> Result<(), ExecError> {
    let argv = render_command(command, value)?;
    let (program, args) = argv.split_first().ok_or(ExecError::Empty)?;

    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()?;

    let program = program.clone();
    thread::Builder::new()
        .name("on-change-reaper".to_string())
        .spawn(move || match child.wait() {
            Ok(status) if !status.success() => {
                log::warn!("on_change '{}' exited with {}", program, status)
            }
            Ok(_) => {}
            Err(e) => log::error!("Failed to wait for on_change '{}': {}", program, e),
        })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};

    #[test]
    fn test_render_command_substitutes_value() {
        let cases = vec![
            (
                "pactl set-sink-volume @DEFAULT_SINK@ {value}%",
                40.0,
                vec!["pactl", "set-sink-volume", "@DEFAULT_SINK@", "40%"],
            ),
            ("notify-send 'Dial at {value}'", 2.5, vec!["notify-send", "Dial at 2.5"]),
        ];

        for (raw, value, expected) in cases {
            let argv = render_command(&ExecCommand::new(raw), value).unwrap();
            assert_eq!(argv, expected);
        }
    }

    #[test]
    fn test_render_command_rejects_bad_input() {
        assert!(matches!(
            render_command(&ExecCommand::new("   "), 1.0),
            Err(ExecError::Empty)
        ));
        assert!(matches!(
            render_command(&ExecCommand::new("echo 'unterminated"), 1.0),
            Err(ExecError::Parse(_))
        ));
    }

    /// Children of this process currently in the zombie state.
    fn zombie_children() -> usize {
        let me = std::process::id().to_string();
        fs_err::read_dir("/proc")
            .unwrap()
            .filter_map(|entry| fs_err::read_to_string(entry.ok()?.path().join("stat")).ok())
            .filter(|stat| {
                // "pid (comm) state ppid ...", comm may contain spaces
                let rest = stat.rsplit_once(')').map_or("", |(_, rest)| rest);
                let mut fields = rest.split_whitespace();
                fields.next() == Some("Z") && fields.next() == Some(me.as_str())
            })
            .count()
    }

    #[test]
    fn test_finished_commands_are_reaped() {
        let command = ExecCommand::new("true {value}");
        for value in 0..20 {
            spawn_on_change(&command, value as f64).unwrap();
        }

        let deadline = Instant::now() + Duration::from_secs(5);
        while zombie_children() > 0 && Instant::now() < deadline {
            thread::sleep(Duration::from_millis(20));
        }
        assert_eq!(zombie_children(), 0);
    }
}
