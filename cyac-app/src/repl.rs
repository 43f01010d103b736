//! Line loop in front of the shell. Plain lines are terminal commands; lines
//! starting with `:` drive the desktop around it (windows, settings, search,
//! scripted command runs).

use crate::config::Config;
use crate::login;
use async_trait::async_trait;
use cyac_interfaces::Interface;
use cyac_shell::{markup, Action, CommandQueue, CommandResponse, CommandSink, Shell};
use cyac_storage::settings::{load_bookmarks, load_history, record_visit};
use cyac_storage::{CrtEffect, CrtEffects, GameLibrary, KeyValueStore, Theme};
use cyac_vfs::MetaValue;
use cyac_windows::InputFocus;
use std::sync::Arc;
use tokio::sync::Mutex;

const META_HELP: &[&str] = &[
    ":run <cmd>; <cmd>...   run commands one after another",
    ":windows               list open windows, topmost first",
    ":focus|:min|:max|:close <id>",
    ":move <id> <x> <y>     :resize <id> <w> <h>",
    ":theme [name]          :crt [effect|all]",
    ":search <query>        :games  :install <id>",
    ":bookmarks  :history   :visit <url> [title]",
    ":exit                  leave",
];

fn render(line: &str, color: bool) -> String {
    if color {
        markup::to_ansi(line)
    } else {
        markup::to_plain(line)
    }
}

/// Runs queued lines against the shared shell and prints what they produce
/// as they happen.
pub struct EchoSink {
    shell: Arc<Mutex<Shell>>,
    interface: Arc<dyn Interface>,
    color: bool,
}

#[async_trait]
impl CommandSink for EchoSink {
    async fn dispatch(&self, line: &str) -> CommandResponse {
        let (echo, response) = {
            let mut shell = self.shell.lock().await;
            let echo = format!("{} {}", shell.prompt(), line);
            (echo, shell.run(line))
        };

        self.interface.send_output(&echo).await;
        for out in &response.output {
            self.interface.send_output(&render(out, self.color)).await;
        }
        response
    }
}

pub struct Repl {
    interface: Arc<dyn Interface>,
    shell: Arc<Mutex<Shell>>,
    queue: CommandQueue<EchoSink>,
    store: Arc<dyn KeyValueStore>,
    config: Config,
}

impl Repl {
    pub fn new(
        interface: Arc<dyn Interface>,
        shell: Shell,
        store: Arc<dyn KeyValueStore>,
        config: Config,
    ) -> Self {
        let shell = Arc::new(Mutex::new(shell));
        let sink = EchoSink {
            shell: shell.clone(),
            interface: interface.clone(),
            color: config.color,
        };
        let queue = CommandQueue::with_delay(Arc::new(sink), config.queue_delay());

        Self {
            interface,
            shell,
            queue,
            store,
            config,
        }
    }

    pub fn shell(&self) -> &Arc<Mutex<Shell>> {
        &self.shell
    }

    async fn say(&self, line: &str) {
        self.interface.send_output(&render(line, self.config.color)).await;
    }

    pub async fn run(&self) -> anyhow::Result<()> {
        if self.config.show_banner {
            let banner = self.shell.lock().await.scrollback().to_vec();
            for line in banner {
                self.say(&line).await;
            }
        }

        loop {
            let prompt = self.shell.lock().await.prompt();
            self.interface.send_prompt(&format!("{} ", prompt)).await;

            let Some(input) = self.interface.receive_input().await else {
                break;
            };
            let input = input.trim();
            if input.is_empty() {
                continue;
            }

            match input {
                "exit" | "quit" | ":exit" | ":quit" => break,
                meta if meta.starts_with(':') => self.meta(&meta[1..]).await,
                line => self.command(line).await,
            }
        }

        tracing::info!("REPL finished");
        Ok(())
    }

    async fn command(&self, line: &str) {
        let response = {
            let mut shell = self.shell.lock().await;
            shell.windows_mut().claim_input(InputFocus::Terminal);
            shell.run(line)
        };

        for out in &response.output {
            self.say(out).await;
        }

        if response.action == Some(Action::Login) {
            self.login().await;
        }
    }

    async fn login(&self) {
        let Some((username, password)) = login::prompt_credentials(self.interface.as_ref()).await
        else {
            self.say(login::ACCESS_DENIED).await;
            return;
        };

        let granted = login::verify(&self.config, &username, &password);
        let message = if granted {
            login::ACCESS_GRANTED
        } else {
            login::ACCESS_DENIED
        };

        {
            let mut shell = self.shell.lock().await;
            if granted {
                shell.login();
            }
            shell.print(message);
        }
        tracing::info!("Login attempt for '{}' (granted={})", username, granted);
        self.say(message).await;
    }

    async fn meta(&self, line: &str) {
        let (name, rest) = match line.split_once(char::is_whitespace) {
            Some((name, rest)) => (name, rest.trim()),
            None => (line, ""),
        };
        let args: Vec<&str> = rest.split_whitespace().collect();

        match name {
            "run" => self.run_script(rest).await,
            "windows" => self.list_windows().await,
            "focus" | "min" | "max" | "close" => self.window_op(name, &args).await,
            "move" | "resize" => self.geometry_op(name, &args).await,
            "theme" => self.theme(args.first().copied()).await,
            "crt" => self.crt(args.first().copied()).await,
            "search" => self.search(rest).await,
            "games" => self.games().await,
            "install" => self.install(args.first().copied()).await,
            "bookmarks" => {
                for bookmark in load_bookmarks(self.store.as_ref()) {
                    self.say(&format!("{} {}  {}", bookmark.icon, bookmark.title, bookmark.url))
                        .await;
                }
            }
            "history" => {
                let history = load_history(self.store.as_ref());
                if history.is_empty() {
                    self.say("No history").await;
                }
                for item in history {
                    self.say(&format!("{}  {}  {}", item.timestamp, item.title, item.url))
                        .await;
                }
            }
            "visit" => self.visit(&args).await,
            "help" => {
                for line in META_HELP {
                    self.say(line).await;
                }
            }
            other => self.say(&format!("[r]ERROR: Unknown meta command ':{}'[/r]", other)).await,
        }
    }

    async fn run_script(&self, script: &str) {
        let lines: Vec<String> = script
            .split(';')
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect();
        if lines.is_empty() {
            self.say("Usage: :run <cmd>; <cmd>...").await;
            return;
        }

        match self.queue.execute_command_queue(lines) {
            Some(handle) => {
                if let Err(e) = handle.await {
                    tracing::warn!("Command queue task failed: {}", e);
                }
            }
            None => self.say("Queued behind the running sequence").await,
        }
    }

    async fn list_windows(&self) {
        let shell = self.shell.lock().await;
        let store = shell.windows();
        if store.is_empty() {
            drop(shell);
            self.say("No open windows").await;
            return;
        }

        let mut windows = store.windows().to_vec();
        windows.sort_by(|a, b| b.z_index.cmp(&a.z_index));
        let active = store.active_window_id().map(str::to_string);
        drop(shell);

        for window in windows {
            let marker = if active.as_deref() == Some(window.id.as_str()) { "*" } else { " " };
            let mut line = format!(
                "{} {} \"{}\" z={} at {},{} size {}x{}",
                marker,
                window.id,
                window.title,
                window.z_index,
                window.x,
                window.y,
                window.width,
                window.height
            );
            if window.minimized {
                line.push_str(" [minimized]");
            }
            if window.maximized {
                line.push_str(" [maximized]");
            }
            self.say(&line).await;
        }
    }

    async fn window_op(&self, op: &str, args: &[&str]) {
        let Some(id) = args.first() else {
            self.say(&format!("Usage: :{} <id>", op)).await;
            return;
        };

        let found = {
            let mut shell = self.shell.lock().await;
            let windows = shell.windows_mut();
            if windows.get(id).is_none() {
                false
            } else {
                match op {
                    "focus" => windows.focus(id),
                    "min" => windows.minimize(id),
                    "max" => windows.maximize(id),
                    _ => windows.close(id),
                }
                true
            }
        };

        if !found {
            self.say(&format!("ERROR: No window '{}'", id)).await;
        }
    }

    async fn geometry_op(&self, op: &str, args: &[&str]) {
        let parsed = match args {
            [id, a, b] => a.parse::<f64>().ok().zip(b.parse::<f64>().ok()).map(|n| (*id, n)),
            _ => None,
        };
        let Some((id, (a, b))) = parsed else {
            let usage = if op == "move" { "<id> <x> <y>" } else { "<id> <w> <h>" };
            self.say(&format!("Usage: :{} {}", op, usage)).await;
            return;
        };

        let found = {
            let mut shell = self.shell.lock().await;
            let windows = shell.windows_mut();
            let found = windows.get(id).is_some();
            if op == "move" {
                windows.move_to(id, a, b);
            } else {
                windows.resize(id, a, b);
            }
            found
        };

        if !found {
            self.say(&format!("ERROR: No window '{}'", id)).await;
        }
    }

    async fn theme(&self, name: Option<&str>) {
        let Some(name) = name else {
            let current = Theme::load(self.store.as_ref());
            let names: Vec<&str> = Theme::ALL.iter().map(|theme| theme.name()).collect();
            self.say(&format!("Theme: {} (available: {})", current, names.join(", ")))
                .await;
            return;
        };

        match name.parse::<Theme>() {
            Ok(theme) => {
                if let Err(e) = theme.save(self.store.as_ref()) {
                    tracing::warn!("Failed to save theme: {}", e);
                }
                self.say(&format!("Theme set to {}", theme)).await;
            }
            Err(e) => self.say(&format!("ERROR: {}", e)).await,
        }
    }

    async fn crt(&self, target: Option<&str>) {
        let mut effects = CrtEffects::load(self.store.as_ref());

        match target {
            None => {}
            Some("all") => effects.toggle_all(),
            Some(name) => match name.parse::<CrtEffect>() {
                Ok(effect) => effects.toggle_effect(effect),
                Err(e) => {
                    self.say(&format!("ERROR: {}", e)).await;
                    return;
                }
            },
        }

        if target.is_some() {
            if let Err(e) = effects.save(self.store.as_ref()) {
                tracing::warn!("Failed to save CRT effects: {}", e);
            }
        }

        let Ok(serde_json::Value::Object(flags)) = serde_json::to_value(effects) else {
            return;
        };
        let summary: Vec<String> = flags
            .iter()
            .map(|(key, value)| format!("{}={}", key, value))
            .collect();
        self.say(&format!("CRT: {}", summary.join(" "))).await;
    }

    async fn search(&self, query: &str) {
        let hits = self.shell.lock().await.fs().search(query);
        if hits.is_empty() {
            self.say(&format!("No results for '{}'", query)).await;
            return;
        }
        for hit in hits {
            let path = match hit.metadata().get("path") {
                Some(MetaValue::Text(path)) => path.clone(),
                _ => hit.name().to_string(),
            };
            let marker = if hit.metadata().contains_key("matchesContent") {
                " (content)"
            } else {
                ""
            };
            self.say(&format!("{} <{}>{}", path, hit.kind(), marker)).await;
        }
    }

    async fn games(&self) {
        let library = GameLibrary::load(self.store.as_ref());
        for game in library.games() {
            let state = if game.installed { "installed" } else { "available" };
            self.say(&format!("{:<16} {:<16} {}", game.id, game.title, state)).await;
        }
    }

    async fn install(&self, id: Option<&str>) {
        let Some(id) = id else {
            self.say("Usage: :install <id>").await;
            return;
        };

        let mut library = GameLibrary::load(self.store.as_ref());
        if !library.install(id) {
            self.say(&format!("ERROR: Unknown game '{}'", id)).await;
            return;
        }
        if let Err(e) = library.save(self.store.as_ref()) {
            tracing::warn!("Failed to save game library: {}", e);
        }
        self.say(&format!("Installed {}", id)).await;
    }

    async fn visit(&self, args: &[&str]) {
        let Some(url) = args.first() else {
            self.say("Usage: :visit <url> [title]").await;
            return;
        };
        let title = if args.len() > 1 {
            args[1..].join(" ")
        } else {
            url.to_string()
        };

        match record_visit(self.store.as_ref(), &title, url) {
            Ok(item) => self.say(&format!("Visited {} at {}", item.url, item.timestamp)).await,
            Err(e) => self.say(&format!("ERROR: {}", e)).await,
        }
    }
}
