// ABOUTME: Main entry point for vendorbox with TUI and CLI support
//
// Binary: vendorbox
// Usage: vendorbox [--backend-url URL] [COMMAND]
// - No command: launches TUI
// - list: list vendors
// - show: a vendor's contacts, deals and notes
// - create / sample: create a vendor
// - onboard: run the onboarding wizard from flags
// - config: print or save the effective configuration

#![allow(missing_docs)]

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::Backend, prelude::*, Terminal};
use std::{
    io::{self, IsTerminal},
    time::{Duration, Instant},
};
use vendorbox::api::{VendorApi, VendorApiClient};
use vendorbox::app::{App, EventHandler};
use vendorbox::cli;
use vendorbox::components::LayoutComponent;
use vendorbox::config::AppConfig;

/// Terminal cleanup utility to ensure proper restoration
fn cleanup_terminal() {
    let _ = disable_raw_mode();
    let _ = execute!(io::stdout(), LeaveAlternateScreen);
}

/// Unified terminal cleanup that works with a terminal instance
fn cleanup_terminal_with_instance<B: Backend + std::io::Write>(terminal: &mut Terminal<B>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    setup_logging();
    setup_panic_handler();

    let args = cli::Cli::parse();
    let config = AppConfig::load(args.backend_url.clone())?;
    tracing::info!("Using backend {}", config.backend.base_url);

    let result = match args.command {
        Some(cli::Commands::Config(config_args)) => cli::settings::execute(&config, &config_args, args.format),

        // TUI mode (explicit or default)
        Some(cli::Commands::Tui) | None => {
            let mut app = App::new(&config)?;
            app.init().await;
            let layout = LayoutComponent::new();

            // Flush any pending terminal events to prevent stray keypresses
            while event::poll(Duration::from_millis(10)).unwrap_or(false) {
                let _ = event::read();
            }

            run_tui(&mut app, &layout, Duration::from_millis(config.ui.tick_rate_ms)).await
        }

        // CLI commands
        Some(command) => {
            let client = VendorApiClient::new(&config.backend)?;
            run_command(&client, command, args.format).await
        }
    };

    // Ensure terminal is cleaned up on any error
    if result.is_err() {
        cleanup_terminal();
    }

    result
}

async fn run_command(api: &dyn VendorApi, command: cli::Commands, format: cli::OutputFormat) -> Result<()> {
    match command {
        cli::Commands::List(list_args) => cli::list::execute(api, list_args, format).await,
        cli::Commands::Show(show_args) => cli::show::execute(api, show_args, format).await,
        cli::Commands::Create(create_args) => cli::create::execute(api, create_args, format).await,
        cli::Commands::Sample => cli::create::execute_sample(api, format).await,
        cli::Commands::Onboard(onboard_args) => cli::onboard::execute(api, onboard_args, format).await,
        cli::Commands::Tui | cli::Commands::Config(_) => Ok(()),
    }
}

async fn run_tui(app: &mut App, layout: &LayoutComponent, tick_rate: Duration) -> Result<()> {
    // Check if we have a proper TTY
    if !IsTerminal::is_terminal(&io::stdout()) {
        return Err(anyhow::anyhow!(
            "No TTY detected. This application requires a terminal.\n\
             Try running directly in a terminal instead of redirecting output."
        ));
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Ensure terminal cleanup happens even if there's an error
    let result = run_tui_loop(app, layout, &mut terminal, tick_rate).await;

    if let Err(e) = cleanup_terminal_with_instance(&mut terminal) {
        tracing::error!("Failed to cleanup terminal: {}", e);
        cleanup_terminal();
    }

    result
}

async fn run_tui_loop(
    app: &mut App,
    layout: &LayoutComponent,
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    tick_rate: Duration,
) -> Result<()> {
    let mut last_tick = Instant::now();

    loop {
        terminal.draw(|frame| layout.render(frame, &app.state))?;

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            if let Event::Key(key_event) = event::read()? {
                // Windows reports releases too
                if key_event.kind == KeyEventKind::Press {
                    if let Some(app_event) = EventHandler::handle_key_event(key_event, &mut app.state) {
                        EventHandler::process_event(app_event, &mut app.state);
                    }
                }
            }
        }

        // Run queued work right away so wizard submits feel immediate
        if app.state.pending_async_action.is_some() || last_tick.elapsed() >= tick_rate {
            app.tick().await?;
            last_tick = Instant::now();
        }

        if app.state.should_quit {
            break;
        }
    }

    Ok(())
}

fn setup_logging() {
    use std::fs::OpenOptions;
    use tracing_subscriber::prelude::*;

    let log_dir = vendorbox::config::base_dir()
        .map(|dir| dir.join("logs"))
        .unwrap_or_else(|_| std::path::PathBuf::from(".vendorbox/logs"));

    let _ = std::fs::create_dir_all(&log_dir);

    // Create JSONL log file with timestamp
    let log_file = log_dir.join(format!(
        "vendorbox-{}.jsonl",
        chrono::Local::now().format("%Y%m%d-%H%M%S")
    ));

    // The TUI owns the screen, so logs go to the file or nowhere
    let Ok(file) = OpenOptions::new().create(true).append(true).open(&log_file) else {
        return;
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_target(true)
                .with_writer(file)
                .with_ansi(false),
        )
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "vendorbox=info".into()),
        )
        .init();
}

fn setup_panic_handler() {
    use tracing::error;

    std::panic::set_hook(Box::new(|panic_info| {
        // Ensure terminal is restored before logging the panic
        cleanup_terminal();

        error!("Application panicked: {}", panic_info);
        eprintln!("Application panicked: {}", panic_info);
        eprintln!("Please check the logs for more details.");
    }));
}
