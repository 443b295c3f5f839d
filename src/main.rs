use anyhow::Result;
use clap::Parser;
use idea_assistant::app::App;
use idea_assistant::config::Config;
use idea_assistant::state::ViewState;
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "idea-assistant")]
#[command(about = "Generate creative ideas from a few keywords")]
struct CliArgs {
    /// Keywords for the idea. Starts an interactive session when omitted.
    #[arg(value_name = "PROMPT")]
    prompt: Vec<String>,

    /// Copy the generated idea to the clipboard (one-shot mode only).
    #[arg(long, requires = "prompt")]
    share: bool,

    /// Export the generated idea to PDF and open it (one-shot mode only).
    #[arg(long, requires = "prompt")]
    pdf: bool,

    /// Gemini API key (overrides GEMINI_API_KEY).
    #[arg(long, value_name = "KEY")]
    api_key: Option<String>,

    /// Gemini model ID (overrides GEMINI_MODEL).
    #[arg(long)]
    model: Option<String>,

    /// Directory for PDF exports (overrides EXPORT_DIR).
    #[arg(long, value_name = "DIR")]
    export_dir: Option<PathBuf>,
}

impl CliArgs {
    fn apply_to(&self, config: &mut Config) {
        if let Some(api_key) = &self.api_key {
            config.api_key = api_key.clone();
        }
        if let Some(model) = &self.model {
            config.model = model.clone();
        }
        if let Some(dir) = &self.export_dir {
            config.export_dir = dir.clone();
        }
    }
}

const HELP: &str = "Type keywords and press Enter to generate. Commands: /share, /pdf, /help, /quit";

/// Text for the output region: loading indicator, error, or content.
fn render_screen(state: &ViewState) -> String {
    if state.loading {
        "Generating ideas...".to_string()
    } else if let Some(error) = &state.error_message {
        format!("Error: {}", error)
    } else if state.can_export() {
        format!("{}\n\n[/share] [/pdf]", state.generated_content)
    } else {
        state.generated_content.clone()
    }
}

/// Generate once, then run the requested exports. Errors go to stderr only.
async fn run_once(app: &mut App, args: &CliArgs) -> bool {
    app.set_prompt(args.prompt.join(" "));
    if let Err(e) = app.submit().await {
        eprintln!("Error: {}", e);
        return false;
    }
    println!("{}", render_screen(app.state()));

    if args.share {
        if let Err(e) = app.share() {
            eprintln!("Error: {}", e);
            return false;
        }
        println!("Copied to clipboard.");
    }
    if args.pdf {
        match app.export_pdf() {
            Ok(path) => println!("Saved {}", path.display()),
            Err(e) => {
                eprintln!("Error: {}", e);
                return false;
            }
        }
    }
    true
}

async fn run_interactive(app: &mut App) -> Result<()> {
    println!("Creative Idea Assistant");
    println!("{}", HELP);
    println!("\n{}", render_screen(app.state()));

    app.on_change(|state| {
        if state.loading {
            println!("{}", render_screen(state));
        }
    });

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match line.trim() {
            "/quit" | "/exit" => break,
            "/help" => {
                println!("{}", HELP);
                continue;
            }
            "/share" => {
                if app.share().is_ok() {
                    println!("Copied to clipboard.");
                    continue;
                }
            }
            "/pdf" => {
                if let Ok(path) = app.export_pdf() {
                    println!("Saved {}", path.display());
                    continue;
                }
            }
            _ => {
                app.set_prompt(line.trim());
                let _ = app.submit().await;
            }
        }
        println!("\n{}", render_screen(app.state()));
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "idea_assistant=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = CliArgs::parse();

    let mut config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };
    args.apply_to(&mut config);

    let mut app = App::from_config(&config);
    info!("Starting idea-assistant");

    if args.prompt.is_empty() {
        run_interactive(&mut app).await
    } else if run_once(&mut app, &args).await {
        Ok(())
    } else {
        std::process::exit(1);
    }
}
