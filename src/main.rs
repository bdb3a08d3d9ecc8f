/// sylvie: structural inspection of class-based component scripts.
///
/// Parses a file into its structural model and answers symbol queries
/// from the command line. Three commands:
/// - symbols: list every declaration of every class in a file
/// - deps: list the file's import dependencies with resolved paths
/// - resolve: resolve the member chain under a line/column position
use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use sylvie::model::SymbolRecord;
use sylvie::resolve::identifier_chain_at;
use sylvie::workspace::Workspace;

#[derive(Parser)]
#[command(name = "sylvie")]
#[command(about = "Structural code intelligence for component scripts", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List every declaration of every class in a file
    Symbols {
        /// Source file to parse
        file: PathBuf,

        /// Emit machine-readable JSON records
        #[arg(long)]
        json: bool,
    },

    /// List a file's import dependencies and their resolved locations
    Deps {
        /// Source file to parse
        file: PathBuf,
    },

    /// Resolve the member chain under a position and report where the
    /// final symbol is declared
    Resolve {
        /// Source file containing the use site
        file: PathBuf,

        /// Zero-based line of the use site
        #[arg(short, long)]
        line: usize,

        /// Zero-based column (byte offset) within the line
        #[arg(short, long)]
        column: usize,
    },
}

fn main() -> Result<()> {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let workspace = Workspace::new();

    match cli.command {
        Commands::Symbols { file, json } => {
            let model = workspace
                .parse_file(&file)
                .with_context(|| format!("cannot read {}", file.display()))?;
            if json {
                let records: Vec<SymbolRecord> = model
                    .classes
                    .iter()
                    .flat_map(|class| {
                        class
                            .members()
                            .map(|member| member.to_record(&class.name))
                            .collect::<Vec<_>>()
                    })
                    .collect();
                println!("{}", serde_json::to_string_pretty(&records)?);
            } else {
                for class in &model.classes {
                    for member in class.members() {
                        println!("{}\n", member.to_display_string(&class.name));
                    }
                }
            }
        }

        Commands::Deps { file } => {
            let model = workspace
                .parse_file(&file)
                .with_context(|| format!("cannot read {}", file.display()))?;
            for dependency in &model.dependencies {
                let target = if dependency.is_external_library {
                    "(external library)".to_string()
                } else {
                    dependency
                        .absolute_path
                        .as_ref()
                        .map(|path| path.display().to_string())
                        .unwrap_or_default()
                };
                println!("{} -> {}", dependency.specifier, target);
            }
        }

        Commands::Resolve { file, line, column } => {
            let model = workspace
                .parse_file(&file)
                .with_context(|| format!("cannot read {}", file.display()))?;
            let Some(line_text) = model.raw_text.split('\n').nth(line) else {
                bail!("line {line} is past the end of {}", file.display());
            };
            let chain = identifier_chain_at(line_text.strip_suffix('\r').unwrap_or(line_text), column);
            let Some(last) = chain.last().cloned() else {
                bail!("no identifier under {}:{line}:{column}", file.display());
            };

            let declaring = workspace.resolve_chain(&chain, model);
            match declaring.find_declaration(&last.name) {
                Some((class, member)) => {
                    let position = member.position();
                    println!(
                        "{}:{}:{}",
                        declaring.path.display(),
                        position.line,
                        position.start_column
                    );
                    println!("{}", member.to_display_string(&class.name));
                }
                None => println!("{} not found", last.name),
            }
        }
    }

    Ok(())
}
