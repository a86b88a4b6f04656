use std::{
    fs,
    path::{Path, PathBuf},
    process::ExitCode,
    time::Instant,
};

use anyhow::{bail, Context, Result};
use clap::Parser;
use jackc::{
    ast::{render_tokens, render_tree, RenderOptions},
    compile, format_error,
};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

/// Compiles Jack classes to VM code and optionally dumps their parse trees.
#[derive(Parser, Debug)]
#[command(author, version, long_about = None)]
struct Args {
    /// A `.jack` file or a directory containing `.jack` files
    path: PathBuf,

    /// Write the annotated parse tree to `<Name>.xml`
    #[arg(long)]
    xml: bool,

    /// Write the token dump to `<Name>T.xml`
    #[arg(long)]
    tokens: bool,

    /// Do not write `<Name>.vm`
    #[arg(long)]
    no_vm: bool,

    /// Render the parse tree without identifier annotations
    #[arg(long)]
    plain: bool,

    /// Directory for output files; defaults to next to each source
    #[arg(long)]
    out_dir: Option<PathBuf>,
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let sources = collect_sources(&args.path)?;
    if sources.is_empty() {
        bail!("no .jack files found at {}", args.path.display());
    }

    if let Some(out_dir) = &args.out_dir {
        fs::create_dir_all(out_dir)
            .with_context(|| format!("failed to create {}", out_dir.display()))?;
    }

    let start = Instant::now();
    let mut failed = 0;

    for source in &sources {
        // A failing unit is reported and the rest of the batch still runs.
        if !compile_file(source, &args)? {
            failed += 1;
        }
    }

    info!(
        units = sources.len(),
        failed,
        elapsed = ?start.elapsed(),
        "finished"
    );

    if failed > 0 {
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}

/// The `.jack` files named by `path`, sorted by name.
fn collect_sources(path: &Path) -> Result<Vec<PathBuf>> {
    if path.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }

    let entries =
        fs::read_dir(path).with_context(|| format!("failed to read {}", path.display()))?;

    let mut sources = vec![];
    for entry in entries {
        let entry_path = entry?.path();
        if entry_path.extension().is_some_and(|ext| ext == "jack") {
            sources.push(entry_path);
        }
    }
    sources.sort();

    Ok(sources)
}

/// Compiles one file and writes the requested outputs.
///
/// Returns `Ok(false)` when the unit has a compile error. I/O failures are
/// returned as errors.
fn compile_file(source_path: &Path, args: &Args) -> Result<bool> {
    let contents = fs::read_to_string(source_path)
        .with_context(|| format!("failed to read {}", source_path.display()))?;

    let file_name = source_path
        .file_name()
        .map(|name| name.to_string_lossy().to_string());

    let unit = match compile(contents.clone(), file_name) {
        Ok(unit) => unit,
        Err(error) => {
            eprintln!("{}", format_error(&error, &contents));
            warn!(file = %source_path.display(), "unit failed");
            return Ok(false);
        }
    };

    let stem = source_path
        .file_stem()
        .map(|stem| stem.to_string_lossy().to_string())
        .unwrap_or_else(|| unit.class_name.clone());
    let out_dir = match &args.out_dir {
        Some(dir) => dir.clone(),
        None => source_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default(),
    };

    if !args.no_vm {
        write_output(&out_dir.join(format!("{}.vm", stem)), &unit.vm)?;
    }

    if args.xml {
        let options = RenderOptions {
            annotate: !args.plain,
            ..RenderOptions::default()
        };
        write_output(
            &out_dir.join(format!("{}.xml", stem)),
            &render_tree(&unit.tree, &options),
        )?;
    }

    if args.tokens {
        write_output(
            &out_dir.join(format!("{}T.xml", stem)),
            &render_tokens(&unit.tokens),
        )?;
    }

    Ok(true)
}

fn write_output(path: &Path, contents: &str) -> Result<()> {
    fs::write(path, contents).with_context(|| format!("failed to write {}", path.display()))?;
    debug!(path = %path.display(), "wrote output");
    Ok(())
}
