use dial::ipc::Command;

#[derive(Debug, Clone)]
pub enum AppEvent {
    Show,
    Hide,
    Toggle,
    SetValue(usize, f64),
    Configure(usize, Vec<(String, String)>),
    ConfigReload,
}

impl From<Command> for AppEvent {
    fn from(command: Command) -> Self {
        match command {
            Command::Show => AppEvent::Show,
            Command::Hide => AppEvent::Hide,
            Command::Toggle => AppEvent::Toggle,
            Command::Reload => AppEvent::ConfigReload,
            Command::Set { index, value } => AppEvent::SetValue(index, value),
            Command::Configure { index, attributes } => AppEvent::Configure(index, attributes),
        }
    }
}
