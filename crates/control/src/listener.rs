use crate::commands::{parse_command, Command};
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::sync::mpsc;
use tracing::{info, warn};

/// Spawn a background task that reads operator commands from stdin.
///
/// The channel closes when stdin reaches EOF.
pub fn spawn_stdin_listener() -> mpsc::Receiver<Command> {
    spawn_listener(tokio::io::stdin())
}

/// Spawn a background task that reads one command per line from `reader`
/// and forwards typed [`Command`]s on the returned channel.  Blank lines are
/// skipped.
pub fn spawn_listener<R>(reader: R) -> mpsc::Receiver<Command>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    let (tx, rx) = mpsc::channel(16);

    tokio::spawn(async move {
        let mut lines = BufReader::new(reader).lines();

        loop {
            match lines.next_line().await {
                Ok(Some(line)) if line.trim().is_empty() => continue,
                Ok(Some(line)) => {
                    if tx.send(parse_command(&line)).await.is_err() {
                        return; // receiver dropped
                    }
                }
                Ok(None) => {
                    info!("Control input closed");
                    return;
                }
                Err(e) => {
                    warn!("Control input error: {e}");
                    return;
                }
            }
        }
    });

    rx
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use vitals_core::{BlockageStatus, Toggle};

    #[tokio::test]
    async fn forwards_parsed_lines_until_eof() {
        let input = Cursor::new(b"status full\n\ntoggle saline\nbogus\n".to_vec());
        let mut rx = spawn_listener(input);

        assert_eq!(rx.recv().await, Some(Command::Status(BlockageStatus::Full)));
        assert_eq!(rx.recv().await, Some(Command::Toggle(Toggle::Saline)));
        assert_eq!(rx.recv().await, Some(Command::Unknown("bogus".into())));
        assert_eq!(rx.recv().await, None);
    }
}
