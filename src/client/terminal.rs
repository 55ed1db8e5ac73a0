use async_trait::async_trait;
use dialoguer::{theme::ColorfulTheme, Confirm};
use owo_colors::OwoColorize;

use crate::client::caps::{ClipboardWrite, ConfirmAction, Notify};

/// Notifications as single stderr lines, keeping stdout for data.
pub struct TerminalNotify;

impl Notify for TerminalNotify {
    fn notify(&self, message: &str) {
        eprintln!("{}", message.bold());
    }
}

/// Interactive yes/no prompt. Defaults to "no"; a broken terminal counts
/// as a decline.
pub struct TerminalConfirm;

#[async_trait]
impl ConfirmAction for TerminalConfirm {
    async fn confirm(&self, prompt: &str) -> bool {
        Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(prompt)
            .default(false)
            .interact()
            .unwrap_or(false)
    }
}

/// Writes the value to stdout so the shell can pipe it into a clipboard
/// tool (`passkeep copy <id> | xclip`).
pub struct StdoutClipboard;

impl ClipboardWrite for StdoutClipboard {
    fn copy(&self, text: &str) -> anyhow::Result<()> {
        println!("{text}");
        Ok(())
    }
}

/// Bullet mask for rendering passwords in listings.
pub fn mask(password: &str) -> String {
    "•".repeat(password.chars().count())
}
