use clap::{Parser, Subcommand};
use dial::ipc::{self, Command, SOCKET_PATH};
use std::io::Write;
use std::os::unix::net::UnixStream;

#[derive(Parser, Debug)]
#[command(name = "dialctl", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
enum Commands {
    /// Show the dial overlay
    Show,
    /// Hide the dial overlay
    Hide,
    /// Show the overlay if hidden, hide it otherwise
    Toggle,
    /// Reload the config file
    Reload,
    /// Set the value of a dial (0 is the outermost ring)
    Set {
        index: usize,
        #[arg(allow_negative_numbers = true)]
        value: f64,
    },
    /// Change attributes of a dial, e.g. `max=200 color=#ff0000`
    Configure {
        index: usize,
        #[arg(required = true, value_parser = ipc::parse_attribute)]
        attributes: Vec<(String, String)>,
    },
}

impl From<Commands> for Command {
    fn from(command: Commands) -> Self {
        match command {
            Commands::Show => Command::Show,
            Commands::Hide => Command::Hide,
            Commands::Toggle => Command::Toggle,
            Commands::Reload => Command::Reload,
            Commands::Set { index, value } => Command::Set { index, value },
            Commands::Configure { index, attributes } => Command::Configure { index, attributes },
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    send_command(&Command::from(cli.command))
}

fn send_command(command: &Command) -> anyhow::Result<()> {
    let mut stream = UnixStream::connect(SOCKET_PATH).map_err(|e| {
        anyhow::anyhow!(
            "Failed to connect to dials at {}: {}. Is dials running?",
            SOCKET_PATH,
            e
        )
    })?;

    log::debug!("Sending '{}'", command);
    writeln!(stream, "{}", command)?;
    Ok(())
}
