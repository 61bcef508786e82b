use crate::events::AppEvent;
use async_channel::Sender;
use dial::ipc::{Command, SOCKET_PATH};
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::net::UnixListener;

pub async fn run_server(tx: Sender<AppEvent>) {
    // stale socket from a previous run
    if fs_err::metadata(SOCKET_PATH).is_ok() {
        let _ = fs_err::remove_file(SOCKET_PATH);
    }

    let listener = match UnixListener::bind(SOCKET_PATH) {
        Ok(l) => l,
        Err(e) => {
            log::error!("Failed to bind {}: {}", SOCKET_PATH, e);
            return;
        }
    };
    log::info!("Listening on {}", SOCKET_PATH);

    loop {
        match listener.accept().await {
            Ok((stream, _)) => {
                tokio::spawn(handle_connection(stream, tx.clone()));
            }
            Err(e) => log::error!("Failed to accept connection: {}", e),
        }
    }
}

/// Forwards one event per valid line until the peer hangs up or the GUI is gone.
async fn handle_connection(stream: impl AsyncRead + Unpin, tx: Sender<AppEvent>) {
    let mut lines = BufReader::new(stream).lines();

    while let Ok(Some(line)) = lines.next_line().await {
        if line.trim().is_empty() {
            continue;
        }
        match line.parse::<Command>() {
            Ok(command) => {
                log::debug!("Control command: {}", command);
                if tx.send(AppEvent::from(command)).await.is_err() {
                    break;
                }
            }
            Err(e) => log::warn!("Ignoring control line '{}': {}", line, e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_connection_forwards_valid_lines() {
        let (tx, rx) = async_channel::unbounded();
        let input: &[u8] = b"show\n\nbogus\nset 1 42\nconfigure 0 max=5\n";

        handle_connection(input, tx).await;

        let events: Vec<AppEvent> = std::iter::from_fn(|| rx.try_recv().ok()).collect();
        assert!(matches!(events[0], AppEvent::Show));
        assert!(matches!(events[1], AppEvent::SetValue(1, v) if v == 42.0));
        assert!(
            matches!(&events[2], AppEvent::Configure(0, attrs) if attrs == &[("max".to_string(), "5".to_string())])
        );
        assert_eq!(events.len(), 3);
    }
}
