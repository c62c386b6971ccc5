use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use spotwidget::{
    config::{self, Settings},
    error, info,
    server::{self, AppState},
    warning,
};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Run the relay (default)
    Serve(ServeOptions),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone, Default)]
pub struct ServeOptions {
    /// Address to bind, overrides SERVER_HOST
    #[clap(long)]
    host: Option<String>,

    /// Port to listen on, overrides SERVER_PORT
    #[clap(long)]
    port: Option<u16>,

    /// Open /login in the default browser once the server is up
    #[clap(long)]
    open: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main]
async fn main() {
    if let Err(e) = config::load_env().await {
        warning!("{}. Relying on the process environment.", e);
    }

    let cli = Cli::parse();

    match cli.command.unwrap_or(Command::Serve(ServeOptions::default())) {
        Command::Serve(opt) => serve(opt).await,
        Command::Completions(opt) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}

async fn serve(opt: ServeOptions) {
    let mut settings = match Settings::from_env() {
        Ok(settings) => settings,
        Err(e) => error!("Cannot load configuration: {}", e),
    };
    if let Some(host) = opt.host {
        settings.host = host;
    }
    if let Some(port) = opt.port {
        settings.port = port;
    }

    let base_url = settings.public_url();
    let login_url = format!("{base_url}/login");

    info!("Relay listening on {}", base_url);
    info!("Log in at {}", login_url);
    info!("Widget available at {}/widget", base_url);
    warning!("Tokens are kept in memory only. After a restart, open /login again.");

    if opt.open {
        let url = login_url;
        tokio::task::spawn_blocking(move || {
            if webbrowser::open(&url).is_err() {
                warning!(
                    "Failed to open browser. Please navigate to the following URL manually:\n{}",
                    url
                )
            }
        });
    }

    let state = AppState::from_settings(&settings);
    if let Err(e) = server::start_api_server(&settings.server_addr(), state).await {
        error!("Server stopped: {}", e);
    }
}
