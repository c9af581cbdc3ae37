use anyhow::Result;
use clap::{Parser, Subcommand};
use commit_deps::areas::repository::Repository;
use commit_deps::artifacts::extract::Strategy;
use commit_deps::commands::render::{DEFAULT_OUTPUT, RenderOptions};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "commit_deps=warn";

#[derive(Parser)]
#[command(
    name = "commit-deps",
    version = "0.1.0",
    author = "Sami Barbut-Dica",
    about = "Visualize which files each commit references",
    long_about = "Builds a commit -> file dependency graph from a repository, \
    either by decoding its loose objects directly or by reading `git log`, \
    and renders it as a Mermaid diagram.",
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

OPTIONS:
    {all-args}
",
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(
        name = "render",
        about = "Render the dependency graph to an image",
        long_about = "This command builds the dependency graph, hands the Mermaid text to the \
        renderer executable as `<renderer> -i <input> -o <output>` and opens the resulting image."
    )]
    Render {
        #[arg(index = 1, help = "Path to the diagram renderer executable (e.g. mmdc)")]
        visualizer_path: PathBuf,
        #[arg(index = 2, help = "Path to the repository to analyze")]
        repo_path: String,
        #[arg(short, long, default_value = DEFAULT_OUTPUT, help = "Image file to write")]
        output: PathBuf,
        #[arg(long, help = "Do not open the rendered image")]
        no_open: bool,
        #[arg(
            short,
            long,
            value_enum,
            env = "COMMIT_DEPS_STRATEGY",
            default_value_t = Strategy::ObjectStore,
            help = "How to extract the graph"
        )]
        strategy: Strategy,
    },
    #[command(
        name = "diagram",
        about = "Print the dependency graph as Mermaid text",
        long_about = "This command builds the dependency graph and prints its Mermaid flowchart to stdout."
    )]
    Diagram {
        #[arg(index = 1, help = "Path to the repository to analyze")]
        repo_path: String,
        #[arg(
            short,
            long,
            value_enum,
            env = "COMMIT_DEPS_STRATEGY",
            default_value_t = Strategy::ObjectStore,
            help = "How to extract the graph"
        )]
        strategy: Strategy,
    },
    #[command(
        name = "list",
        about = "List every commit with the files it references",
        long_about = "This command prints one line per commit: the commit id followed by its file names."
    )]
    List {
        #[arg(index = 1, help = "Path to the repository to analyze")]
        repo_path: String,
        #[arg(long = "abbrev-commit", help = "Show only the first 7 characters of each commit")]
        abbrev_commit: bool,
        #[arg(
            short,
            long,
            value_enum,
            env = "COMMIT_DEPS_STRATEGY",
            default_value_t = Strategy::ObjectStore,
            help = "How to extract the graph"
        )]
        strategy: Strategy,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match &cli.command {
        Commands::Render {
            visualizer_path,
            repo_path,
            output,
            no_open,
            strategy,
        } => {
            if !visualizer_path.exists() {
                anyhow::bail!("Renderer {} does not exist", visualizer_path.display());
            }
            if !is_executable::is_executable(visualizer_path) {
                anyhow::bail!("Renderer {} is not executable", visualizer_path.display());
            }

            let mut repository = Repository::new(repo_path, Box::new(std::io::stdout()))?;
            let opts = RenderOptions {
                visualizer: visualizer_path.clone(),
                output: output.clone(),
                strategy: *strategy,
                open: !no_open,
            };

            repository.render(&opts)?
        }
        Commands::Diagram {
            repo_path,
            strategy,
        } => {
            let mut repository = Repository::new(repo_path, Box::new(std::io::stdout()))?;

            repository.diagram(*strategy)?
        }
        Commands::List {
            repo_path,
            abbrev_commit,
            strategy,
        } => {
            let mut repository = Repository::new(repo_path, Box::new(std::io::stdout()))?;

            repository.list(*strategy, *abbrev_commit)?
        }
    }

    Ok(())
}
