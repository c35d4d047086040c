//! Orb BDD - template and request tooling for the Orb integration suite
//!
//! The `orb-bdd` command exposes the harness engine outside of a test run,
//! which is handy when writing or debugging feature files.
//!
//! ## Commands
//!
//! - `resolve`: Resolve a template string against the environment
//! - `resolve-json`: Resolve every string leaf of a JSON file
//! - `hashlink`: Parse, create or verify `hl:` hashlinks
//! - `request`: Send a single templated HTTP request

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use orb_bdd_http::request::JSON_CONTENT_TYPE;
use orb_bdd_http::{url_path, HttpConfig, ReqwestSender, RequestBody, ScenarioClient};
use orb_bdd_state::{ScenarioContext, ScenarioSpan, DEFAULT_PREFIX};
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::{info, Instrument, Level};

#[derive(Parser)]
#[command(name = "orb-bdd")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Template resolution and request tooling for the Orb BDD suite", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit JSON-formatted log lines
    #[arg(long, global = true)]
    json: bool,

    /// Scenario name attached to every log line
    #[arg(long, global = true, env = "BDD_SCENARIO", default_value = "orb-bdd")]
    scenario: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve a template string
    Resolve {
        /// Template, e.g. '${domain1IRI}/activities/${followID}'
        template: String,

        /// Variable assignment (NAME=VALUE), may be repeated
        #[arg(long = "var", value_parser = parse_var)]
        vars: Vec<(String, String)>,

        /// Placeholder prefix
        #[arg(long, default_value = DEFAULT_PREFIX)]
        prefix: String,
    },

    /// Resolve every string in a JSON document
    ResolveJson {
        /// Path to the JSON template
        file: PathBuf,

        /// Variable assignment (NAME=VALUE), may be repeated
        #[arg(long = "var", value_parser = parse_var)]
        vars: Vec<(String, String)>,
    },

    /// Hashlink operations
    Hashlink {
        #[command(subcommand)]
        action: HashlinkAction,
    },

    /// Send one templated HTTP request and print the response
    Request {
        /// HTTP method
        method: String,

        /// URL template
        url: String,

        /// Body template file
        #[arg(long)]
        body_file: Option<PathBuf>,

        /// Content type of the body
        #[arg(long, default_value = JSON_CONTENT_TYPE)]
        content_type: String,

        /// Variable assignment (NAME=VALUE), may be repeated
        #[arg(long = "var", value_parser = parse_var)]
        vars: Vec<(String, String)>,

        /// Bearer token for this request
        #[arg(long, env = "BDD_AUTH_TOKEN")]
        token: Option<String>,

        /// Accept self-signed TLS certificates
        #[arg(long)]
        insecure: bool,

        /// Fail unless the response has this status
        #[arg(long)]
        expect_status: Option<u16>,
    },
}

#[derive(Subcommand)]
enum HashlinkAction {
    /// Show the resource hash and links of a hashlink
    Parse {
        /// Hashlink, e.g. hl:uEiA...:uoQ-...
        hashlink: String,
    },

    /// Create a hashlink for a file
    Create {
        /// File to hash
        file: PathBuf,

        /// Location of the content, may be repeated
        #[arg(short, long = "link")]
        links: Vec<String>,
    },

    /// Check that a file matches a hashlink
    Verify {
        /// Hashlink to check against
        hashlink: String,

        /// File to hash
        file: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    orb_bdd_state::init_tracing(cli.json, level);

    let scenario = ScenarioSpan::new(&cli.scenario);
    run(cli.command).instrument(scenario.span().clone()).await
}

async fn run(command: Commands) -> Result<()> {
    match command {
        Commands::Resolve {
            template,
            vars,
            prefix,
        } => {
            let ctx = build_context(vars);
            println!("{}", cmd_resolve(&ctx, &prefix, &template)?);
        }
        Commands::ResolveJson { file, vars } => {
            let ctx = build_context(vars);
            println!("{}", cmd_resolve_json(&ctx, &file)?);
        }
        Commands::Hashlink { action } => match action {
            HashlinkAction::Parse { hashlink } => println!("{}", cmd_hashlink_parse(&hashlink)?),
            HashlinkAction::Create { file, links } => {
                println!("{}", cmd_hashlink_create(&file, &links)?)
            }
            HashlinkAction::Verify { hashlink, file } => {
                cmd_hashlink_verify(&hashlink, &file)?;
                println!("Hashlink matches {:?}", file);
            }
        },
        Commands::Request {
            method,
            url,
            body_file,
            content_type,
            vars,
            token,
            insecure,
            expect_status,
        } => {
            let mut ctx = build_context(vars);
            let config = HttpConfig::from_env().with_insecure_tls(insecure);
            cmd_request(
                &mut ctx,
                config,
                &method.to_uppercase(),
                &url,
                body_file.as_deref(),
                &content_type,
                token.as_deref(),
                expect_status,
            )
            .await?;
        }
    }

    Ok(())
}

/// Parse a `NAME=VALUE` assignment
fn parse_var(s: &str) -> std::result::Result<(String, String), String> {
    match s.split_once('=') {
        Some((name, value)) if !name.is_empty() => Ok((name.to_string(), value.to_string())),
        _ => Err(format!("expected NAME=VALUE, got '{s}'")),
    }
}

/// Context seeded from the process environment, with `--var` overrides
fn build_context(vars: Vec<(String, String)>) -> ScenarioContext {
    let mut ctx = ScenarioContext::from_process_env();
    for (name, value) in vars {
        ctx.set_var(name, value);
    }
    ctx
}

fn cmd_resolve(ctx: &ScenarioContext, prefix: &str, template: &str) -> Result<String> {
    ctx.resolve_with_prefix(prefix, template)
        .with_context(|| format!("Failed to resolve '{template}'"))
}

fn cmd_resolve_json(ctx: &ScenarioContext, file: &Path) -> Result<String> {
    let content =
        std::fs::read_to_string(file).with_context(|| format!("Failed to read {:?}", file))?;
    let doc: Value =
        serde_json::from_str(&content).with_context(|| format!("Invalid JSON in {:?}", file))?;

    let resolved = ctx
        .resolve_vars(&doc)
        .with_context(|| format!("Failed to resolve {:?}", file))?;

    Ok(serde_json::to_string_pretty(&resolved)?)
}

fn cmd_hashlink_parse(hashlink: &str) -> Result<String> {
    let info = orb_hashlink::parse_hash_link(hashlink).context("Failed to parse hashlink")?;

    let digest = info.digest_hex().ok();
    let out = serde_json::json!({
        "resourceHash": info.resource_hash,
        "links": info.links,
        "sha256": digest,
    });

    Ok(serde_json::to_string_pretty(&out)?)
}

fn cmd_hashlink_create(file: &Path, links: &[String]) -> Result<String> {
    let content = std::fs::read(file).with_context(|| format!("Failed to read {:?}", file))?;
    orb_hashlink::create_hash_link(&content, links).context("Failed to create hashlink")
}

fn cmd_hashlink_verify(hashlink: &str, file: &Path) -> Result<()> {
    let content = std::fs::read(file).with_context(|| format!("Failed to read {:?}", file))?;
    orb_hashlink::verify_hash_link(hashlink, &content)
        .with_context(|| format!("{:?} does not match {}", file, hashlink))
}

#[allow(clippy::too_many_arguments)]
async fn cmd_request(
    ctx: &mut ScenarioContext,
    config: HttpConfig,
    method: &str,
    url: &str,
    body_file: Option<&Path>,
    content_type: &str,
    token: Option<&str>,
    expect_status: Option<u16>,
) -> Result<()> {
    if let Some(token) = token {
        let resolved = ctx.resolve(url)?;
        ctx.set_auth_token(url_path(&resolved)?, method, token);
    }

    let body = match body_file {
        Some(path) => Some(read_body(path, content_type)?),
        None => None,
    };

    let client = ScenarioClient::new(ReqwestSender::new(config)?);
    let response = client
        .send(ctx, method, url, body)
        .await
        .with_context(|| format!("{method} {url} failed"))?;

    info!(status = response.status, "Request complete");
    println!("{}", response.status);
    println!("{}", response.body);

    if let Some(expected) = expect_status {
        response.expect_status(expected)?;
    }

    Ok(())
}

/// Load a body template; JSON bodies are resolved leaf by leaf
fn read_body(path: &Path, content_type: &str) -> Result<RequestBody> {
    let content =
        std::fs::read_to_string(path).with_context(|| format!("Failed to read {:?}", path))?;

    if content_type == JSON_CONTENT_TYPE {
        let doc: Value =
            serde_json::from_str(&content).with_context(|| format!("Invalid JSON in {:?}", path))?;
        Ok(RequestBody::Json(doc))
    } else {
        Ok(RequestBody::raw(content, content_type))
    }
}
