use crate::config::Config;
use cyac_interfaces::Interface;

pub const ACCESS_GRANTED: &str = "ACCESS GRANTED: Welcome, ADMIN";
pub const ACCESS_DENIED: &str = "ACCESS DENIED: Invalid credentials";

pub fn verify(config: &Config, username: &str, password: &str) -> bool {
    username == config.username && password == config.password
}

/// Ask for credentials. Falls back to a plain line read when the interface
/// cannot hide input (e.g. no tty).
pub async fn prompt_credentials(interface: &dyn Interface) -> Option<(String, String)> {
    interface.send_prompt("Username: ").await;
    let username = interface.receive_input().await?;

    let password = match interface.read_secret("Password: ").await {
        Some(password) => password,
        None => interface.receive_input().await?,
    };
    Some((username.trim().to_string(), password))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verify() {
        let config = Config::default();
        assert!(verify(&config, "admin", "password"));
        assert!(!verify(&config, "admin", "Password"));
        assert!(!verify(&config, "guest", "password"));
    }
}
