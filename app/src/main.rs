//! `todoit` terminal client.
//!
//! Signs in against the configured Supabase project (or reuses a session the
//! auth client already holds) and runs a line-oriented REPL over the list.

use anyhow::Context;
use clap::Parser;
use colored::Colorize;
use std::time::Duration;
use todoit::adapters::{SupabaseAuthProvider, SupabaseTodoRepository};
use todoit::command::{Command, HELP};
use todoit::providers::AuthProvider;
use todoit::{render, SessionHolder, TodoEnvironment, TodoReducer, TodoState, TodoStore, TodoitConfig};
use todoit_runtime::Store;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// How long to wait for a command's remote calls to settle before redrawing
const SETTLE_TIMEOUT: Duration = Duration::from_secs(30);

/// Sign-in attempts before giving up
const MAX_SIGN_IN_ATTEMPTS: usize = 3;

type Client = TodoStore<SupabaseTodoRepository, SupabaseAuthProvider>;

/// Personal todo list synced to Supabase
#[derive(Parser, Debug)]
#[command(name = "todoit", version, about)]
struct Cli {
    /// Sign in as this email (overrides `TODOIT_EMAIL`)
    #[arg(long)]
    email: Option<String>,

    /// Table holding the rows (overrides `TODOIT_TABLE`)
    #[arg(long)]
    table: Option<String>,

    /// Per-request HTTP timeout in seconds (overrides `TODOIT_REQUEST_TIMEOUT_SECS`)
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,
}

enum Exit {
    Quit,
    SignedOut,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "todoit=info,todoit_runtime=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let mut config = TodoitConfig::from_env().context("reading configuration")?;
    if let Some(table) = cli.table {
        config = config.with_table(table);
    }
    if let Some(secs) = cli.timeout {
        config = config.with_request_timeout(Duration::from_secs(secs));
    }
    if let Some(email) = cli.email {
        config.email = Some(email);
    }
    tracing::debug!(?config, "Configuration loaded");

    let client = config.client().context("building HTTP client")?;
    let env = TodoEnvironment::new(
        SupabaseTodoRepository::new(client.clone(), config.table.clone()),
        SupabaseAuthProvider::new(client),
    );
    let store: Client = Store::new(TodoState::new(), TodoReducer::new(), env);

    let holder = SessionHolder::mount(&store).await?;
    settle(&store).await;

    let mut use_configured = true;
    loop {
        if store.state(|s| s.identity.is_none()).await {
            sign_in(&store, &config, use_configured).await?;
            settle(&store).await;
        }

        print!("{}", render::todo_list(&store.state(Clone::clone).await));
        println!("{}", "type 'help' for commands".bright_black());

        match repl(&store).await? {
            Exit::Quit => break,
            Exit::SignedOut => {
                println!("Signed out.");
                use_configured = false;
            },
        }
    }

    holder.unmount();
    store.shutdown(Duration::from_secs(5)).await?;
    Ok(())
}

async fn settle(store: &Client) {
    if store.wait_until_idle(SETTLE_TIMEOUT).await.is_err() {
        tracing::warn!("Remote calls still running, showing current state");
    }
}

async fn sign_in(store: &Client, config: &TodoitConfig, use_configured: bool) -> anyhow::Result<()> {
    let auth = &store.environment().auth;

    for attempt in 1..=MAX_SIGN_IN_ATTEMPTS {
        let configured = if use_configured && attempt == 1 {
            config.email.clone().zip(config.password.clone())
        } else {
            None
        };
        let (email, password) = match configured {
            Some(credentials) => credentials,
            None => prompt_credentials(config.email.clone()).await?,
        };

        match auth.sign_in_with_password(&email, &password).await {
            Ok(session) => {
                println!("Signed in as {}", session.email.as_deref().unwrap_or(&email).bold());
                return Ok(());
            },
            Err(error) => eprintln!("{} {error}", "Sign-in failed:".red()),
        }
    }

    anyhow::bail!("giving up after {MAX_SIGN_IN_ATTEMPTS} failed sign-in attempts")
}

async fn prompt_credentials(default_email: Option<String>) -> anyhow::Result<(String, String)> {
    tokio::task::spawn_blocking(move || {
        let mut email = dialoguer::Input::<String>::new().with_prompt("Email");
        if let Some(default_email) = default_email {
            email = email.default(default_email);
        }
        let email = email.interact_text()?;
        let password = dialoguer::Password::new().with_prompt("Password").interact()?;
        Ok::<_, anyhow::Error>((email, password))
    })
    .await?
}

async fn read_line() -> anyhow::Result<Option<String>> {
    let line = tokio::task::spawn_blocking(|| {
        let mut line = String::new();
        let read = std::io::stdin().read_line(&mut line)?;
        Ok::<_, std::io::Error>((read > 0).then_some(line))
    })
    .await??;
    Ok(line)
}

async fn repl(store: &Client) -> anyhow::Result<Exit> {
    loop {
        print!("{} ", ">".purple().bold());
        std::io::Write::flush(&mut std::io::stdout())?;

        let Some(line) = read_line().await? else {
            return Ok(Exit::Quit);
        };

        let command = match Command::parse(&line) {
            Ok(command) => command,
            Err(message) => {
                eprintln!("{}", message.red());
                continue;
            },
        };

        match command {
            Command::Quit => return Ok(Exit::Quit),
            Command::Help => {
                println!("{HELP}");
                continue;
            },
            Command::List => {},
            other => {
                for action in other.into_actions() {
                    store.send(action).await?;
                }
                settle(store).await;
            },
        }

        if store.state(|s| s.identity.is_none()).await {
            return Ok(Exit::SignedOut);
        }
        print!("{}", render::todo_list(&store.state(Clone::clone).await));
    }
}
