use anyhow::Result;
use clap::Parser;
use seriarr::{IdMode, ParseInput, parse};
use tracing::warn;
use tracing_subscriber::EnvFilter;

/// Parse series release titles.
#[derive(Parser)]
#[command(name = "seriarr", version)]
struct Cli {
    /// Series name to match against.
    #[arg(long)]
    name: String,

    /// Expected numbering scheme: ep, date, sequence, id or auto.
    #[arg(long, default_value = "auto")]
    mode: IdMode,

    /// Require the identifier to follow the name almost immediately.
    #[arg(long)]
    strict_name: bool,

    /// Reject episode numbers that carry no season.
    #[arg(long)]
    no_seasonless: bool,

    /// Accept only these release groups (repeatable).
    #[arg(long = "group")]
    groups: Vec<String>,

    /// Interpret ambiguous dates day-first.
    #[arg(long)]
    dayfirst: bool,

    /// Interpret ambiguous dates year-first.
    #[arg(long)]
    yearfirst: bool,

    /// Emit the full result as JSON, one object per title.
    #[arg(long)]
    json: bool,

    /// Release titles to parse.
    #[arg(required = true)]
    titles: Vec<String>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let mut any_valid = false;

    for title in &cli.titles {
        let mut input = ParseInput::new(&cli.name, title)
            .mode(cli.mode)
            .strict_name(cli.strict_name)
            .allow_seasonless(!cli.no_seasonless);
        if !cli.groups.is_empty() {
            input = input.allow_groups(cli.groups.iter().cloned());
        }
        if cli.dayfirst {
            input = input.date_dayfirst(true);
        }
        if cli.yearfirst {
            input = input.date_yearfirst(true);
        }

        let result = parse(&input)?;
        if let Some(warning) = &result.warning {
            warn!("{warning}");
        }

        if cli.json {
            println!("{}", serde_json::to_string_pretty(&result)?);
        } else if let Some(identifier) = result.identifier() {
            let mut line = format!("{title}: {identifier} [{}]", result.quality);
            if result.proper_count > 0 {
                line.push_str(&format!(" propers={}", result.proper_count));
            }
            if let Some(group) = &result.group {
                line.push_str(&format!(" group={group}"));
            }
            if result.special {
                line.push_str(" special");
            }
            println!("{line}");
        } else {
            println!("{title}: invalid");
        }
        any_valid |= result.valid();
    }

    if !any_valid {
        std::process::exit(1);
    }
    Ok(())
}
