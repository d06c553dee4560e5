// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

use anyhow::{Context, Result};
use clap::Parser;
use folio::logging::init_logging;
use folio::{BlogId, EngineConfig, EntryId, SearchEngine};
use indicatif::{ProgressBar, ProgressStyle};
use serde_json::json;
use std::path::Path;

mod cli;
use cli::{display, load, Cli, Commands, QueryArgs};

fn main() {
    let cli = Cli::parse();
    init_logging(cli.log_level, cli.log_json);

    if let Err(e) = run(cli) {
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => EngineConfig::from_file(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => EngineConfig::default(),
    };
    let engine = SearchEngine::open_dir(&cli.dir, config)
        .with_context(|| format!("failed to open index at {}", cli.dir.display()))?;

    let outcome = match cli.command {
        Commands::Index { input, batch_size } => run_index(&engine, &input, batch_size),
        Commands::Remove { ids } => run_remove(&engine, &ids),
        Commands::Search { query, args } => run_search(&engine, &query, &args),
        Commands::Related { entry_id, args } => run_related(&engine, entry_id, &args),
        Commands::Stats { blog, json } => run_stats(&engine, &cli.dir, blog, json),
    };
    engine.close();
    outcome
}

fn create_progress_style() -> Result<ProgressStyle> {
    Ok(ProgressStyle::with_template(
        "{spinner:.cyan} {prefix:<10} [{bar:40.cyan/dim}] {pos}/{len} {msg}",
    )?
    .progress_chars("━━╸"))
}

fn run_index(engine: &SearchEngine, input: &Path, batch_size: usize) -> Result<()> {
    let documents = load::load_documents(input)?;
    if documents.is_empty() {
        eprintln!("no documents found in {}", input.display());
        return Ok(());
    }

    let total = documents.len();
    let progress = ProgressBar::new(total as u64);
    progress.set_style(create_progress_style()?);
    progress.set_prefix("Indexing");

    let mut pending = documents.into_iter().peekable();
    while pending.peek().is_some() {
        let batch: Vec<_> = pending.by_ref().take(batch_size.max(1)).collect();
        let count = engine.add_or_update_many(batch)?;
        progress.inc(count as u64);
    }
    progress.finish_with_message(format!(
        "{} live documents",
        engine.document_count(None)?
    ));
    Ok(())
}

fn run_remove(engine: &SearchEngine, ids: &[i64]) -> Result<()> {
    for &id in ids {
        let removed = engine.remove(EntryId(id))?;
        if !removed {
            eprintln!("entry {} was not indexed", id);
        }
    }
    Ok(())
}

fn run_search(engine: &SearchEngine, query: &str, args: &QueryArgs) -> Result<()> {
    let results = engine.search(query, args.limit, args.offset, args.blog.and_then(BlogId::scope))?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&results)?);
    } else {
        display::print_results(&format!("SEARCH \"{}\"", display::truncate(query, 40)), &results, args.offset);
    }
    Ok(())
}

fn run_related(engine: &SearchEngine, entry_id: i64, args: &QueryArgs) -> Result<()> {
    let entry_id = EntryId(entry_id);
    let results = engine.related_to(entry_id, args.limit, args.offset, args.blog.and_then(BlogId::scope))?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&results)?);
    } else {
        display::print_results(&format!("RELATED TO #{}", entry_id), &results, args.offset);
    }
    Ok(())
}

fn run_stats(engine: &SearchEngine, dir: &Path, blog: Option<i64>, json: bool) -> Result<()> {
    let scope = blog.and_then(BlogId::scope);
    let snapshot = engine.snapshot()?;
    let documents = snapshot.document_count(scope);
    let terms = snapshot.term_count();

    if json {
        let stats = json!({
            "directory": dir.display().to_string(),
            "blogId": scope,
            "documents": documents,
            "terms": terms,
            "generation": snapshot.generation(),
        });
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        let mut rows = vec![("directory", dir.display().to_string())];
        if let Some(blog) = scope {
            rows.push(("blog", blog.to_string()));
        }
        rows.push(("documents", documents.to_string()));
        rows.push(("terms", terms.to_string()));
        display::print_stats(&rows);
    }
    Ok(())
}
