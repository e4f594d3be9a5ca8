// file: src/main.rs
// description: commandline application entry point with command handling
// reference: application bootstrap and orchestration

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use nbpress::utils::logging::{format_count, format_error, format_success};
use nbpress::{
    Config, DiskStore, LinkRewriter, SitePreparer, Substitutions, TemplateRenderer, Validator,
    sync_tree, transform_notebook,
};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::info;

#[derive(Parser)]
#[command(name = "nbpress")]
#[command(version)]
#[command(about = "Pre- and post-processing passes for Jupyter Book style notebook sites", long_about = None)]
struct Cli {
    #[arg(
        short,
        long,
        value_name = "FILE",
        default_value = "config/default.toml"
    )]
    config: PathBuf,

    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    color: bool,

    #[arg(short, long, action = ArgAction::SetTrue)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Point Colab launch links in generated html at the published branch
    Links {
        #[arg(long, value_name = "DIR")]
        dir: Option<PathBuf>,

        /// Folder on the published branch holding notebook sources
        #[arg(long)]
        prefix: Option<String>,
    },

    /// Substitute book variables into one notebook or markdown file
    Render {
        file: PathBuf,

        #[arg(long, value_name = "FILE")]
        book_config: Option<PathBuf>,
    },

    /// Restyle exercise, hint and solution cells of one notebook
    Cells { file: PathBuf },

    /// Copy new and changed files from the source tree into the build tree
    Sync {
        #[arg(long, value_name = "DIR")]
        source: Option<PathBuf>,

        #[arg(long, value_name = "DIR")]
        dest: Option<PathBuf>,
    },

    /// Sync, then render every notebook and markdown file of the build tree
    Prepare {
        #[arg(long)]
        skip_sync: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    nbpress::utils::logging::init_logger(cli.color, cli.verbose);
    colored::control::set_override(cli.color);

    info!("Loading configuration from: {}", cli.config.display());
    let config = match Config::load(Some(cli.config.as_path())) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{}", format_error(&format!("Failed to load configuration: {}", err)));
            return ExitCode::FAILURE;
        }
    };

    let result = match cli.command {
        Commands::Links { dir, prefix } => cmd_links(&config, dir, prefix),
        Commands::Render { file, book_config } => cmd_render(&config, &file, book_config),
        Commands::Cells { file } => cmd_cells(&file),
        Commands::Sync { source, dest } => cmd_sync(&config, source, dest),
        Commands::Prepare { skip_sync } => cmd_prepare(&config, skip_sync, cli.color),
    };

    report(result)
}

/// Prints a failure once, with its context chain, and maps it to the exit code.
fn report(result: Result<()>) -> ExitCode {
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}", format_error(&format!("{:#}", err)));
            ExitCode::FAILURE
        }
    }
}

fn cmd_links(config: &Config, dir: Option<PathBuf>, prefix: Option<String>) -> Result<()> {
    let dir = dir.unwrap_or_else(|| config.paths.html_dir.clone());
    let prefix = prefix.unwrap_or_else(|| config.links.prefix.clone());

    Validator::validate_directory(&dir)?;
    let rewriter = LinkRewriter::new(prefix)?;

    info!(
        "Rewriting launch links under {} to gh-pages/{}",
        dir.display(),
        rewriter.prefix()
    );
    let report = rewriter
        .rewrite_tree(&DiskStore::new(), &dir)
        .with_context(|| format!("Link rewrite failed in {}", dir.display()))?;

    println!("{}", format_success("Launch links rewritten"));
    println!("{}", format_count("html files", report.html_files));
    println!("{}", format_count("files changed", report.files_changed));
    Ok(())
}

fn cmd_render(config: &Config, file: &Path, book_config: Option<PathBuf>) -> Result<()> {
    Validator::validate_file(file)?;
    Validator::validate_extension(file, &["ipynb", "md"])?;

    let store = DiskStore::new();
    let book_config = book_config.unwrap_or_else(|| config.book_config_path());
    let vars = Substitutions::load(&store, &book_config, &config.render.substitutions_key)
        .context("Failed to load substitutions")?;

    let renderer = TemplateRenderer::new();
    if file.extension().is_some_and(|ext| ext == "ipynb") {
        renderer.render_notebook(&store, file, &vars)?;
    } else {
        renderer.render_markdown(&store, file, &vars)?;
    }

    println!(
        "{}",
        format_success(&format!(
            "Rendered {} with {} substitutions",
            file.display(),
            vars.len()
        ))
    );
    Ok(())
}

fn cmd_cells(file: &Path) -> Result<()> {
    Validator::validate_file(file)?;
    Validator::validate_extension(file, &["ipynb"])?;

    let report = transform_notebook(&DiskStore::new(), file)?;

    println!("{}", format_success(&format!("Restyled {}", file.display())));
    println!("{}", format_count("exercises", report.exercises));
    println!("{}", format_count("hints", report.hints));
    println!("{}", format_count("solutions", report.solutions));
    Ok(())
}

fn cmd_sync(config: &Config, source: Option<PathBuf>, dest: Option<PathBuf>) -> Result<()> {
    let source = source.unwrap_or_else(|| config.paths.source_dir.clone());
    let dest = dest.unwrap_or_else(|| config.paths.build_dir.clone());
    Validator::validate_directory(&source)?;

    let report = sync_tree(&DiskStore::new(), &source, &dest, &config.sync.skip_dirs)
        .context("Directory sync failed")?;

    println!("{}", format_success("Sync complete"));
    println!("{}", format_count("copied", report.copied));
    println!("{}", format_count("unchanged", report.unchanged));
    println!("{}", format_count("skipped", report.skipped));
    Ok(())
}

fn cmd_prepare(config: &Config, skip_sync: bool, color: bool) -> Result<()> {
    let source = if skip_sync {
        &config.paths.build_dir
    } else {
        &config.paths.source_dir
    };
    Validator::validate_directory(source)?;

    let store = DiskStore::new();
    let stats = SitePreparer::new(config, &store)
        .with_color(color)
        .run(skip_sync)
        .context("Site preparation failed")?;

    println!("{}", format_success("Site prepared"));
    println!("{}", format_count("files synced", stats.files_synced));
    println!("{}", format_count("notebooks", stats.notebooks_rendered));
    println!("{}", format_count("markdown files", stats.markdown_rendered));
    println!("{}", format_count("cells restyled", stats.cells_restyled));
    info!(
        "Finished in {:.2}s ({:.1} files/s)",
        stats.duration_secs,
        stats.files_per_second()
    );
    Ok(())
}
