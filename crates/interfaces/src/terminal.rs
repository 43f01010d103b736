use crate::traits::Interface;
use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Stdin};
use tokio::sync::Mutex;

/// stdin/stdout. The reader is kept so buffered input from a pipe is not lost
/// between lines.
pub struct TerminalInterface {
    reader: Mutex<BufReader<Stdin>>,
}

impl TerminalInterface {
    pub fn new() -> Self {
        Self {
            reader: Mutex::new(BufReader::new(tokio::io::stdin())),
        }
    }

    async fn write(&self, bytes: &[u8]) {
        let mut stdout = tokio::io::stdout();
        let _ = stdout.write_all(bytes).await;
        let _ = stdout.flush().await;
    }
}

impl Default for TerminalInterface {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Interface for TerminalInterface {
    async fn receive_input(&self) -> Option<String> {
        let mut reader = self.reader.lock().await;
        let mut line = String::new();

        match reader.read_line(&mut line).await {
            Ok(0) => None, // EOF
            Ok(_) => Some(line.trim_end_matches(['\r', '\n']).to_string()),
            Err(e) => {
                tracing::warn!("Failed to read stdin: {}", e);
                None
            }
        }
    }

    async fn send_output(&self, message: &str) {
        self.write(format!("{}\n", message).as_bytes()).await;
    }

    async fn send_prompt(&self, prompt: &str) {
        self.write(prompt.as_bytes()).await;
    }

    async fn read_secret(&self, prompt: &str) -> Option<String> {
        let prompt = prompt.to_string();
        match tokio::task::spawn_blocking(move || rpassword::prompt_password(prompt)).await {
            Ok(Ok(secret)) => Some(secret),
            Ok(Err(e)) => {
                tracing::warn!("Failed to read password: {}", e);
                None
            }
            Err(e) => {
                tracing::warn!("Password prompt task failed: {}", e);
                None
            }
        }
    }

    async fn show_status(&self, status: &str) {
        self.send_output(&format!(">> {}", status)).await;
    }
}
