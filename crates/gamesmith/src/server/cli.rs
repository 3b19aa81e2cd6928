use std::path::PathBuf;

#[derive(Debug, clap::Args)]
pub struct ServeOptions {
    /// Port to listen on
    #[arg(short, long, env = "GAMESMITH_PORT", default_value = "5000")]
    pub port: u16,

    /// Host to bind to
    #[arg(long, env = "GAMESMITH_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Directory where uploaded assets are stored
    #[arg(long, env = "GAMESMITH_ASSETS_DIR", default_value = "uploads/phaser")]
    pub assets_dir: PathBuf,

    /// Gemini model used for code generation
    #[arg(long, env = "GEMINI_MODEL", default_value = "gemini-1.5-pro")]
    pub model: String,

    /// Timeout for a single Gemini round trip, in seconds
    #[arg(long, env = "GAMESMITH_TIMEOUT_SECS", default_value = "120")]
    pub timeout_secs: u64,
}
