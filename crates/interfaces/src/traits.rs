use async_trait::async_trait;

/// A line-oriented surface the shell talks through.
#[async_trait]
pub trait Interface: Send + Sync {
    /// Next input line without its terminator, `None` at end of input.
    async fn receive_input(&self) -> Option<String>;
    async fn send_output(&self, message: &str);
    /// Write `prompt` without a trailing newline.
    async fn send_prompt(&self, prompt: &str);
    /// Read a line without echoing it.
    async fn read_secret(&self, prompt: &str) -> Option<String>;
    async fn show_status(&self, status: &str);
}
