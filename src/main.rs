use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use pharmdrive::config::Config;
use pharmdrive::diff::diff_texts;
use pharmdrive::extract::extract_text;
use pharmdrive::server;
use pharmdrive::summarize::{ApiKeyOverride, Summarizer, Summary};

#[derive(Parser, Debug)]
#[command(name = "pharmdrive")]
#[command(version = "0.1.0")]
#[command(about = "Compare document versions and summarize the changes")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compare two local documents and print the diff and summary
    Compare {
        /// Old version of the document
        old: PathBuf,

        /// New version of the document
        new: PathBuf,

        /// Mission context appended to the summarization prompt
        #[arg(long)]
        mission_context: Option<String>,

        /// API key override, `provider:secret` or a bare OpenAI key (repeatable)
        #[arg(long = "api-key")]
        api_keys: Vec<String>,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Run the HTTP comparison API
    Serve {
        /// Address to bind, overriding PHARMDRIVE_BIND
        #[arg(long)]
        bind: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("pharmdrive=info".parse()?)
                .add_directive("reqwest=warn".parse()?),
        )
        .init();

    // Load environment variables
    dotenvy::dotenv().ok();

    let args = Args::parse();
    let mut config = Config::from_env();

    match args.command {
        Command::Compare {
            old,
            new,
            mission_context,
            api_keys,
            format,
            output,
        } => {
            let data_old = std::fs::read(&old)?;
            let data_new = std::fs::read(&new)?;

            let text_old = extract_text(&old.to_string_lossy(), &data_old)?;
            let text_new = extract_text(&new.to_string_lossy(), &data_new)?;

            let diff = diff_texts(&text_old, &text_new);

            let api_keys = if api_keys.is_empty() {
                ApiKeyOverride::None
            } else {
                ApiKeyOverride::List(api_keys)
            };

            let summarizer = Summarizer::new(&config);
            let summary = summarizer
                .summarize(&diff, mission_context.as_deref(), &api_keys)
                .await;

            let report = match format.as_str() {
                "json" => serde_json::to_string_pretty(&serde_json::json!({
                    "diff": diff,
                    "summary": summary.text,
                    "method": summary.method,
                    "tokens_used": summary.tokens_used,
                    "truncated": summary.truncated,
                }))?,
                _ => format_text(&diff, &summary),
            };

            if let Some(ref path) = output {
                std::fs::write(path, &report)?;
                tracing::info!("Output written to: {}", path.display());
            } else {
                println!("{}", report);
            }
        }
        Command::Serve { bind } => {
            if let Some(bind) = bind {
                config.bind_addr = bind;
            }
            server::serve(config).await?;
        }
    }

    Ok(())
}

fn format_text(diff: &str, summary: &Summary) -> String {
    let mut output = String::new();

    output.push_str("=== Diff ===\n");
    if diff.is_empty() {
        output.push_str("(no changes)\n");
    } else {
        output.push_str(diff);
    }

    output.push_str("\n=== Summary ===\n");
    output.push_str(&summary.text);
    output.push('\n');

    output.push_str(&format!("\nMethod: {}\n", summary.method));
    if let Some(tokens) = summary.tokens_used {
        output.push_str(&format!("Tokens used: {}\n", tokens));
    }
    if summary.truncated {
        output.push_str("Summary covers the first 500 characters of the diff.\n");
    }

    output
}
