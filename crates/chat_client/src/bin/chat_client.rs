//! chat-client: terminal front end for the chat endpoint.
//! Hydrates the page text from the server's `config.json`, then sends either the
//! question given on the command line or one question per stdin line, drawing
//! the typing placeholder while each answer is pending.

use std::io::{self, IsTerminal, Write};
use std::path::PathBuf;
use std::process;
use std::sync::Arc;

use chat_client::settings::{self, Settings};
use chat_client::{hydrate, ChatClient, ChatController, Submission, TerminalView, View};
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};

#[derive(Parser)]
#[command(name = "chat-client")]
#[command(about = "Ask questions to a chat endpoint from the terminal")]
#[command(version)]
struct Args {
    /// Settings file (default: $CHAT_CLIENT_CONFIG, then ~/.chat-client/config.yaml).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Server base URL; overrides `server.base_url` from the settings file.
    #[arg(long, value_name = "URL")]
    base_url: Option<String>,

    /// Ask this question and exit. Without it, questions are read from stdin.
    #[arg(value_name = "QUESTION")]
    question: Vec<String>,
}

fn load_settings(args: &Args) -> Settings {
    let explicit = args.config.is_some() || std::env::var_os(settings::CONFIG_ENV_VAR).is_some();
    let Some(path) = settings::resolve_config_path(args.config.as_deref()) else {
        tracing::debug!("cannot determine settings path, using defaults");
        return Settings::default();
    };
    // A settings file the user pointed at must exist; the default one may not.
    let loaded = if explicit {
        settings::load(&path)
    } else {
        settings::load_or_default(&path)
    };
    loaded.unwrap_or_else(|e| {
        eprintln!("Error: failed to load settings: {}", e);
        process::exit(1);
    })
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .init();

    let args = Args::parse();
    let cfg = load_settings(&args);
    let base_url = args
        .base_url
        .clone()
        .unwrap_or_else(|| cfg.base_url().to_string());

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap_or_else(|e| {
            eprintln!("Error: failed to create runtime: {}", e);
            process::exit(1);
        });

    let one_shot = (!args.question.is_empty()).then(|| args.question.join(" "));
    let live = one_shot.is_none() && io::stdout().is_terminal();

    let code = rt.block_on(async {
        let client = ChatClient::new(&base_url);
        let view = Arc::new(TerminalView::new(cfg.initial_page(), live));
        hydrate(&client, view.as_ref()).await;

        let controller = ChatController::new(client, view.clone())
            .with_tick_interval(cfg.tick_interval())
            .with_failure_policy(cfg.failure_policy());

        match one_shot {
            Some(question) => ask_once(&controller, &view, &question).await,
            None => repl(&controller, &view).await,
        }
    });
    process::exit(code);
}

async fn ask_once(controller: &ChatController, view: &TerminalView, question: &str) -> i32 {
    view.set_input(question);
    match controller.submit_from_input().await {
        Ok(_) => {
            view.print_log();
            0
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}

async fn repl(controller: &ChatController, view: &TerminalView) -> i32 {
    if view.is_live() {
        view.set_log("");
        show_prompt(view);
    }
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut failed = false;
    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                eprintln!("Error: failed to read stdin: {}", e);
                return 1;
            }
        };
        view.set_input(&line);
        match controller.submit_from_input().await {
            Ok(Submission::Answered(_)) if !view.is_live() => {
                if let Some(latest) = controller.exchanges().first() {
                    print!("{}", latest.render());
                    let _ = io::stdout().flush();
                }
            }
            Ok(_) => {}
            Err(e) => {
                eprintln!("Error: {}", e);
                failed = true;
            }
        }
        if view.is_live() {
            show_prompt(view);
        }
    }
    i32::from(failed)
}

fn show_prompt(view: &TerminalView) {
    let mut out = io::stdout();
    let _ = write!(out, "\n{}", view.prompt());
    let _ = out.flush();
}
