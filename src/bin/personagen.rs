use anyhow::{anyhow, bail, Context, Result};
use clap::Parser;
use personagen::{
    archive_to_json, parse_identifier_list, runtime, AnthropicProvider, GenerationProvider,
    OpenAiProvider, PersonaRequest, ProfileIdentifier, ScrapeArgs, Synthesizer,
};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "personagen",
    about = "Scrape public professional profiles and synthesize a composite persona document"
)]
struct Cli {
    /// Path to a file with profile URLs (one per line, # for comments) or an
    /// inline comma-separated list
    #[arg(long)]
    urls: String,

    /// Name for the generated persona
    #[arg(long, default_value = "composite_persona")]
    name: String,

    /// Directory for the persona document and profile archive
    #[arg(long, default_value = "./output")]
    output: PathBuf,

    /// Target generation provider (openai or anthropic)
    #[arg(long, env = "PERSONAGEN_PROVIDER", default_value = "anthropic")]
    provider: String,

    /// OpenAI API key (required when --provider openai)
    #[arg(long, env = "OPENAI_API_KEY")]
    openai_api_key: Option<String>,

    /// OpenAI model used for synthesis
    #[arg(long, env = "PERSONAGEN_OPENAI_MODEL", default_value = "gpt-4o")]
    openai_model: String,

    /// Anthropic API key (required when --provider anthropic)
    #[arg(long, env = "ANTHROPIC_API_KEY")]
    anthropic_api_key: Option<String>,

    /// Anthropic model identifier
    #[arg(
        long,
        env = "PERSONAGEN_ANTHROPIC_MODEL",
        default_value = "claude-sonnet-4-20250514"
    )]
    anthropic_model: String,

    /// Seconds allowed for the single generation request
    #[arg(long, env = "PERSONAGEN_GENERATION_TIMEOUT_SECS", default_value_t = 180)]
    generation_timeout_secs: u64,

    /// Sampling temperature for the generation backend
    #[arg(long, default_value_t = 0.7)]
    temperature: f32,

    /// Maximum tokens requested from the generation backend
    #[arg(long, default_value_t = 4096)]
    max_completion_tokens: usize,

    /// Extract and archive profiles, print the synthesis prompt, skip generation
    #[arg(long, default_value_t = false)]
    dry_run: bool,

    #[command(flatten)]
    scrape: ScrapeArgs,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let identifiers = load_identifiers(&cli.urls)?;
    let controls = cli.scrape.build_controls();

    fs::create_dir_all(&cli.output)
        .with_context(|| format!("failed to create output directory {}", cli.output.display()))?;
    let archive_path = cli.output.join(format!("{}_profiles.json", cli.name));
    let persona_path = cli.output.join(format!("{}.md", cli.name));

    if cli.dry_run {
        let records = runtime::extract_all(&identifiers, controls)?;
        write_archive(&archive_path, &records)?;
        let request = PersonaRequest::new(records, cli.name.clone())
            .context("synthesis rejected the extracted batch")?;
        println!("--- Synthesis Prompt ---\n{}", request.build_prompt());
        println!("dry-run enabled; skipping generation.");
        return Ok(());
    }

    let provider = build_provider(&cli)?;
    let synthesizer =
        Synthesizer::new(provider).with_sampling(cli.temperature, cli.max_completion_tokens);

    // Persist the extracted batch before the generation call so a backend
    // failure cannot discard a browser run's worth of records.
    let records = runtime::extract_all(&identifiers, controls)?;
    write_archive(&archive_path, &records)?;

    let outcome = runtime::synthesize(records, &cli.name, &synthesizer)?;
    fs::write(&persona_path, &outcome.document.body)
        .with_context(|| format!("failed to write {}", persona_path.display()))?;

    println!("persona document: {}", persona_path.display());
    println!("profile archive: {}", archive_path.display());
    Ok(())
}

/// Reads the URL batch from a file path or an inline delimited string.
fn load_identifiers(input: &str) -> Result<Vec<ProfileIdentifier>> {
    let raw = if Path::new(input).is_file() {
        fs::read_to_string(input).with_context(|| format!("failed to read URL file {input}"))?
    } else {
        input.to_string()
    };
    let (accepted, rejected) =
        parse_identifier_list(&raw).context("no usable profile URLs in input")?;
    for err in &rejected {
        eprintln!("skipping invalid profile URL: {err}");
    }
    Ok(accepted)
}

fn write_archive(path: &Path, records: &[personagen::ProfileRecord]) -> Result<()> {
    let json = archive_to_json(records).context("failed to serialize profile archive")?;
    fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}

fn build_provider(cli: &Cli) -> Result<Box<dyn GenerationProvider>> {
    let timeout = Duration::from_secs(cli.generation_timeout_secs);
    match cli.provider.to_lowercase().as_str() {
        "openai" => {
            let key = cli
                .openai_api_key
                .clone()
                .ok_or_else(|| anyhow!("OPENAI_API_KEY must be set for the OpenAI provider"))?;
            Ok(Box::new(OpenAiProvider::new(
                key,
                cli.openai_model.clone(),
                timeout,
            )?))
        }
        "anthropic" => {
            let key = cli.anthropic_api_key.clone().ok_or_else(|| {
                anyhow!("ANTHROPIC_API_KEY must be set for the Anthropic provider")
            })?;
            Ok(Box::new(AnthropicProvider::new(
                key,
                cli.anthropic_model.clone(),
                timeout,
            )?))
        }
        other => bail!("unsupported provider '{}'; use openai or anthropic", other),
    }
}
