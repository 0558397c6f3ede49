#![cfg_attr(test, allow(unused_crate_dependencies))]
//! Easel playground binary.
//!
//! Runs the playground engine behind a local preview server and a small
//! command prompt on stdin. With `--dir`, edits come from the workspace files.

mod cli;
mod prompt;
mod watch;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use cli::{Cli, Command};
use easel_config::Config;
use easel_engine::{
	Clipboard, ComposeOptions, Composer, Playground, PlaygroundOptions, SeedContent, SourceKind, SystemClipboard,
	export_document, spawn_playground,
};
use easel_preview::{PLAYGROUND_ROUTE, ServedPreview};
use easel_worker::{CancellationToken, TaskClass};
use tracing::{info, warn};

use crate::prompt::PromptExit;
use crate::watch::SourceWatcher;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
	let cli = Cli::parse();

	setup_tracing(cli.verbose);

	let mut config = Config::load_or_default(cli.config.as_deref()).context("failed to load config")?;
	cli.apply_overrides(&mut config);

	match &cli.command {
		None | Some(Command::Serve) => serve(&cli, config).await,
		Some(Command::Init { dir, force }) => init(dir, *force),
		Some(Command::Export { dir, out }) => export(&config, dir, out.as_deref().unwrap_or(dir)),
	}
}

async fn serve(cli: &Cli, config: Config) -> anyhow::Result<()> {
	let seeds = match &cli.dir {
		Some(dir) => SeedContent::from_dir(dir).with_context(|| format!("failed to read sources in {}", dir.display()))?,
		None => SeedContent::default(),
	};

	let host = ServedPreview::new(config.preview.sandbox, config.playground.export_name.clone());
	let site = host.site();
	let playground = Playground::new(PlaygroundOptions::from(&config.playground), seeds.clone(), host);

	let clipboard = SystemClipboard::detect();
	if !clipboard.is_available() {
		warn!("no clipboard tool found; copy will report an error");
	}
	let clipboard: Arc<dyn Clipboard> = Arc::new(clipboard);
	let (handle, actor) = spawn_playground(playground, clipboard);

	let listener = tokio::net::TcpListener::bind(config.preview.listen)
		.await
		.with_context(|| format!("failed to bind {}", config.preview.listen))?;
	let url = format!("http://{}{PLAYGROUND_ROUTE}", listener.local_addr()?);
	let shutdown = CancellationToken::new();
	let server = easel_worker::spawn(TaskClass::Background, site.serve(listener, shutdown.clone()));

	let _watcher = match &cli.dir {
		Some(dir) => Some(
			SourceWatcher::start(dir, seeds, handle.clone())
				.with_context(|| format!("failed to watch {}", dir.display()))?,
		),
		None => None,
	};

	println!("playground at {url}");
	println!("{}", prompt::HELP);
	if cli.open
		&& let Err(err) = open::that(&url)
	{
		warn!(error = %err, "failed to open browser");
	}

	let export_dir = cli.export_dir();
	let exit = tokio::select! {
		res = prompt::run(prompt::stdin_lines(), &handle, &export_dir) => Some(res?),
		res = tokio::signal::ctrl_c() => {
			res.context("failed to listen for ctrl-c")?;
			None
		}
	};
	// Without a terminal the server keeps running until interrupted.
	if exit == Some(PromptExit::EndOfInput) {
		info!("stdin closed; serving until ctrl-c");
		tokio::signal::ctrl_c().await.context("failed to listen for ctrl-c")?;
	}

	info!("shutting down");
	handle.shutdown();
	shutdown.cancel();
	server.await?.context("preview server failed")?;
	actor.await?;
	Ok(())
}

fn init(dir: &Path, force: bool) -> anyhow::Result<()> {
	let written = SeedContent::default()
		.write_to_dir(dir, force)
		.with_context(|| format!("failed to write sources into {}", dir.display()))?;
	if written.is_empty() {
		println!("all sources already exist in {} (use --force to overwrite)", dir.display());
	}
	for path in written {
		println!("wrote {}", path.display());
	}
	Ok(())
}

fn export(config: &Config, dir: &Path, out: &Path) -> anyhow::Result<()> {
	let seeds =
		SeedContent::from_dir(dir).with_context(|| format!("failed to read sources in {}", dir.display()))?;
	let composer = Composer::new(ComposeOptions::from(&config.playground));
	let document = composer.compose(
		seeds.get(SourceKind::Markup),
		seeds.get(SourceKind::Style),
		seeds.get(SourceKind::Script),
	);
	let path = export_document(&document, &config.playground.export_name).write_to(out)?;
	println!("wrote {}", path.display());
	Ok(())
}

fn setup_tracing(verbose: bool) {
	use std::fs::OpenOptions;

	use tracing_subscriber::EnvFilter;
	use tracing_subscriber::prelude::*;

	let filter = || {
		EnvFilter::try_from_default_env().unwrap_or_else(|_| {
			if verbose {
				EnvFilter::new("easel=debug,easel_engine=debug,easel_preview=debug,warn")
			} else {
				EnvFilter::new("easel=info,easel_engine=info,easel_preview=info,warn")
			}
		})
	};

	// EASEL_LOG_DIR keeps stderr free for the prompt.
	if let Some(log_dir) = std::env::var("EASEL_LOG_DIR").ok().map(PathBuf::from)
		&& std::fs::create_dir_all(&log_dir).is_ok()
	{
		let log_path = log_dir.join(format!("easel.{}.log", std::process::id()));
		if let Ok(file) = OpenOptions::new().create(true).append(true).open(&log_path) {
			let file_layer = tracing_subscriber::fmt::layer()
				.with_writer(file)
				.with_ansi(false)
				.with_target(true);
			tracing_subscriber::registry().with(filter()).with(file_layer).init();
			tracing::info!(path = ?log_path, "tracing initialized");
			return;
		}
	}

	tracing_subscriber::fmt()
		.with_env_filter(filter())
		.with_writer(std::io::stderr)
		.init();
}
