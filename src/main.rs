//! acrofill - Entry point
//!
//! Fills a remote AcroForm PDF template with user data and optionally
//! exports the result to the download directory.

use acrofill::config::{default_download_dir, DEFAULT_EXPORT_NAME};
use acrofill::source::{resolve, TemplateSource};
use acrofill::{generate, list_fields, AppConfig, UserData};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "acrofill", about = "Fill AcroForm PDF templates from user data", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Fetch the template, fill it, and optionally export the result
    Generate(GenerateArgs),
    /// List the form fields the template defines, as JSON
    Fields(FieldsArgs),
}

#[derive(Debug, Args)]
struct TemplateArgs {
    /// URL to download the template from
    #[arg(long = "template-url", value_name = "url", conflicts_with = "template_path")]
    template_url: Option<String>,
    /// Local template file, used instead of downloading
    #[arg(long = "template-path", value_name = "path")]
    template_path: Option<PathBuf>,
}

impl TemplateArgs {
    fn source(&self) -> Option<TemplateSource> {
        if let Some(path) = &self.template_path {
            return Some(TemplateSource::Path { path: path.clone() });
        }
        self.template_url
            .as_ref()
            .map(|url| TemplateSource::Url { url: url.clone() })
    }
}

#[derive(Debug, Args)]
struct GenerateArgs {
    /// First name, defaults match the demo form
    #[arg(long = "first-name", default_value = "Nur")]
    first_name: String,
    #[arg(long = "last-name", default_value = "Fahmi")]
    last_name: String,
    #[arg(long, default_value = "hello@rfahmi.com")]
    email: String,
    #[arg(long = "phone-area", default_value = "+62")]
    phone_area: String,
    #[arg(long = "phone-number", default_value = "8121328512")]
    phone_number: String,

    #[command(flatten)]
    template: TemplateArgs,

    /// Directory for cached artifacts
    #[arg(long = "cache-dir", value_name = "dir")]
    cache_dir: Option<PathBuf>,

    /// Also copy the filled document to the download directory
    #[arg(long)]
    download: bool,
    /// File name for the exported copy
    #[arg(long = "output-name", value_name = "name", default_value = DEFAULT_EXPORT_NAME)]
    output_name: String,
    /// Destination directory for the exported copy
    #[arg(long = "download-dir", value_name = "dir")]
    download_dir: Option<PathBuf>,
}

#[derive(Debug, Args)]
struct FieldsArgs {
    #[command(flatten)]
    template: TemplateArgs,
}

fn build_config(
    template: &TemplateArgs,
    cache_dir: Option<PathBuf>,
    download_dir: Option<PathBuf>,
) -> AppConfig {
    let mut config = AppConfig::default();
    if let Some(source) = template.source() {
        config.template_source = source;
    }
    if let Some(dir) = cache_dir {
        config.cache_dir = dir;
    }
    config.download_dir = download_dir.unwrap_or_else(default_download_dir);
    config
}

async fn run_generate(args: GenerateArgs) -> anyhow::Result<()> {
    let config = build_config(&args.template, args.cache_dir, args.download_dir);
    let user_data = UserData {
        first_name: args.first_name,
        last_name: args.last_name,
        email: args.email,
        phone_area: args.phone_area,
        phone_number: args.phone_number,
    };

    let Some(filled_path) = generate(&config, &user_data).await else {
        anyhow::bail!("generate produced no document");
    };
    println!("{}", filled_path.display());

    if args.download {
        let Some(dest) = acrofill::download(&config, &filled_path, &args.output_name) else {
            anyhow::bail!("download produced no file");
        };
        println!("{}", dest.display());
    }

    Ok(())
}

async fn run_fields(args: FieldsArgs) -> anyhow::Result<()> {
    let config = build_config(&args.template, None, None);
    let resolved = resolve(&config.template_source, config.max_download_bytes).await?;
    let fields = list_fields(&resolved.data)?;
    println!("{}", serde_json::to_string_pretty(&fields)?);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "acrofill=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Generate(args) => run_generate(args).await,
        Command::Fields(args) => run_fields(args).await,
    }
}
