//! Command builder and log streaming for the backend process.

use onlyfans_core::BackendCommand;
use std::process::Stdio;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::{Child, Command};
use tracing::debug;

/// Address the backend listens on; the host only talks to it locally.
pub const BACKEND_ADDRESS: &str = "127.0.0.1";

/// Build the tokio command for `backend`, appending the address and port
/// arguments the backend's gRPC server expects.
pub fn build_command(backend: &BackendCommand, port: u16) -> Command {
    let mut cmd = Command::new(&backend.program);
    cmd.args(&backend.args)
        .arg("--address")
        .arg(BACKEND_ADDRESS)
        .arg("--port")
        .arg(port.to_string())
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);
    cmd
}

/// Build and spawn the backend process.
pub fn build_and_spawn(backend: &BackendCommand, port: u16) -> anyhow::Result<Child> {
    let mut cmd = build_command(backend, port);
    cmd.spawn().map_err(|e| {
        anyhow::anyhow!(
            "Failed to spawn backend {}: {}",
            backend.program.display(),
            e
        )
    })
}

/// Spawn background tasks forwarding stdout/stderr lines to tracing.
///
/// Lines are decoded lossily. The tasks exit at EOF or on a read error.
pub fn spawn_log_readers(child: &mut Child, port: u16) {
    if let Some(stdout) = child.stdout.take() {
        tokio::spawn(forward_lines(stdout, port, "stdout"));
    }

    if let Some(stderr) = child.stderr.take() {
        tokio::spawn(forward_lines(stderr, port, "stderr"));
    }
}

async fn forward_lines<R>(stream: R, port: u16, name: &'static str)
where
    R: AsyncRead + Unpin,
{
    let mut reader = BufReader::new(stream);
    let mut buf = Vec::new();
    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf).await {
            Ok(0) => break,
            Ok(_) => {
                let text = String::from_utf8_lossy(&buf);
                debug!(port = %port, "backend {}: {}", name, text.trim_end());
            }
            Err(e) => {
                debug!(port = %port, error = %e, "backend {} closed", name);
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_build_command_appends_address_and_port() {
        let backend = BackendCommand::new("/opt/backend").with_args(vec!["--verbose".to_string()]);
        let cmd = build_command(&backend, 7856);

        let std_cmd = cmd.as_std();
        assert_eq!(std_cmd.get_program(), "/opt/backend");
        let args: Vec<_> = std_cmd
            .get_args()
            .map(|a| a.to_string_lossy().into_owned())
            .collect();
        assert_eq!(
            args,
            vec!["--verbose", "--address", "127.0.0.1", "--port", "7856"]
        );
    }

    #[tokio::test]
    async fn test_forward_lines_survives_invalid_utf8() {
        let input: &[u8] = b"ok\n\xff\xfe\nafter\n";
        let mut reader = BufReader::new(input);
        forward_lines(&mut reader, 7856, "stdout").await;

        let mut rest = Vec::new();
        reader.read_until(b'\n', &mut rest).await.unwrap();
        assert!(rest.is_empty());
    }

    #[tokio::test]
    async fn test_spawn_missing_binary_fails() {
        let backend = BackendCommand::new(PathBuf::from("/nonexistent/backend"));
        let result = build_and_spawn(&backend, 7856);
        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("/nonexistent/backend")
        );
    }
}
