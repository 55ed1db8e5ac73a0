use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand, ValueEnum};
use dialoguer::{theme::ColorfulTheme, Input, Password};
use tabled::{Table, Tabled};
use uuid::Uuid;

use passkeep::client::caps::ClipboardWrite;
use passkeep::client::terminal::{mask, StdoutClipboard, TerminalConfirm, TerminalNotify};
use passkeep::client::{
    CredentialForm, LocalVault, RecordCache, RemoteVault, SyncCoordinator, VaultBackend,
};

const DEFAULT_URL: &str = "http://localhost:8080";

#[derive(Parser)]
#[command(name = "passkeep", version, about = "Credential vault client")]
struct Cli {
    /// Record service base URL (defaults to PASSKEEP_URL, then localhost)
    #[arg(long)]
    url: Option<String>,

    /// Work against the device-local vault file instead of a service
    #[arg(long)]
    local: bool,

    /// Vault file path (local mode only)
    #[arg(long)]
    vault_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List stored credentials
    List {
        /// Print passwords in plain text instead of masked
        #[arg(long)]
        show: bool,
    },
    /// Add a credential
    Add,
    /// Edit a credential
    Edit { id: String },
    /// Delete a credential (asks for confirmation)
    Delete { id: String },
    /// Print one field of a credential, for piping into a clipboard tool
    Copy {
        id: String,
        #[arg(value_enum, default_value = "password")]
        field: CopyField,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum CopyField {
    Site,
    Username,
    Password,
}

#[derive(Tabled)]
struct VaultRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Site")]
    site: String,
    #[tabled(rename = "Username")]
    username: String,
    #[tabled(rename = "Password")]
    password: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "passkeep=warn".to_string());
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .init();

    let cli = Cli::parse();

    let backend: Arc<dyn VaultBackend> = if cli.local {
        let path = match cli.vault_file {
            Some(path) => path,
            None => LocalVault::default_path().context("no platform data directory")?,
        };
        Arc::new(LocalVault::open(path)?)
    } else {
        let url = cli
            .url
            .or_else(|| std::env::var("PASSKEEP_URL").ok())
            .unwrap_or_else(|| DEFAULT_URL.into());
        Arc::new(RemoteVault::new(url)?)
    };

    let coordinator = SyncCoordinator::new(
        backend,
        Arc::new(TerminalNotify),
        Arc::new(TerminalConfirm),
        cli.local,
    );
    let mut cache = coordinator.load().await.context("load records")?;
    let mut form = CredentialForm::new();

    match cli.command {
        Command::List { show } => render(&cache, show),
        Command::Add => {
            prompt_draft(&mut form, false)?;
            if !coordinator.save(&mut form, &mut cache).await {
                std::process::exit(1);
            }
        }
        Command::Edit { id } => {
            let id = parse_id(&id)?;
            if !coordinator.begin_edit(id, &mut form, &mut cache) {
                bail!("no record with id {id}");
            }
            prompt_draft(&mut form, true)?;
            if !coordinator.save(&mut form, &mut cache).await {
                std::process::exit(1);
            }
        }
        Command::Delete { id } => {
            let id = parse_id(&id)?;
            coordinator.delete(id, &mut cache).await;
        }
        Command::Copy { id, field } => {
            let id = parse_id(&id)?;
            let Some(record) = cache.get(id) else {
                bail!("no record with id {id}");
            };
            let value = match field {
                CopyField::Site => &record.site,
                CopyField::Username => &record.username,
                CopyField::Password => &record.password,
            };
            StdoutClipboard.copy(value)?;
        }
    }

    Ok(())
}

fn render(cache: &RecordCache, show: bool) {
    if cache.is_empty() {
        println!("No passwords to show");
        return;
    }
    let rows: Vec<VaultRow> = cache
        .records()
        .iter()
        .map(|r| VaultRow {
            id: r.id.to_string(),
            site: r.site.clone(),
            username: r.username.clone(),
            password: if show {
                r.password.clone()
            } else {
                mask(&r.password)
            },
        })
        .collect();
    println!("{}", Table::new(rows));
}

fn prompt_draft(form: &mut CredentialForm, editing: bool) -> anyhow::Result<()> {
    let theme = ColorfulTheme::default();

    form.draft.site = Input::with_theme(&theme)
        .with_prompt("Site URL")
        .with_initial_text(form.draft.site.clone())
        .interact_text()?;
    form.draft.username = Input::with_theme(&theme)
        .with_prompt("Username")
        .with_initial_text(form.draft.username.clone())
        .interact_text()?;

    let prompt = if editing {
        "Password (empty keeps the current one)"
    } else {
        "Password"
    };
    let password = Password::with_theme(&theme)
        .with_prompt(prompt)
        .allow_empty_password(editing)
        .interact()?;
    if !(editing && password.is_empty()) {
        form.draft.password = password;
    }

    Ok(())
}

fn parse_id(raw: &str) -> anyhow::Result<Uuid> {
    Uuid::parse_str(raw).with_context(|| format!("invalid record id: {raw}"))
}
