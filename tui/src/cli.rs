use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "widd", about = "Terminal chat client for the widd report webhook", version)]
pub struct Cli {
    /// Override the webhook URL from config.toml.
    #[arg(long, value_name = "URL")]
    pub webhook_url: Option<String>,

    /// Override the session identifier sent with every message.
    #[arg(long, value_name = "ID")]
    pub session_id: Option<String>,

    /// Skip the access-code screen.
    #[arg(long)]
    pub no_auth: bool,

    /// Enable verbose file logging (see $WIDD_HOME/log/widd-tui.log).
    #[arg(long)]
    pub debug: bool,
}
