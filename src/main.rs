use std::io::{self, Write};
use std::panic;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use notewalk::app::App;
use notewalk::store::{HttpStore, NodeStore};
use notewalk::tree::{expand_path, flatten};
use notewalk::ui::{self, handle_key, ColorScheme};

#[derive(Parser, Debug)]
#[command(name = "notewalk")]
#[command(author = "Cassel")]
#[command(version)]
#[command(about = "Terminal tree browser for remote hierarchical note stores", long_about = None)]
struct Args {
    /// Base URL of the note store, e.g. http://localhost:7119
    server: String,

    /// Path to reveal on startup (empty for the root)
    #[arg(short, long, default_value = "")]
    path: String,

    /// How many levels of children each fetch materializes
    #[arg(long, default_value_t = 2)]
    depth: usize,

    /// Output the flattened tree as JSON instead of starting the TUI
    #[arg(long)]
    json: bool,

    /// Disable colors
    #[arg(long)]
    no_color: bool,

    /// Color scheme: dark, light, colorblind
    #[arg(long, default_value = "dark")]
    color_scheme: String,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let store = HttpStore::new(args.server.clone());

    if args.json {
        return run_json_mode(&store, &args.path, args.depth);
    }

    let color_scheme = if args.no_color {
        ColorScheme::default()
    } else {
        ColorScheme::by_name(&args.color_scheme)
    };

    run_tui_mode(store, args.path, args.depth, color_scheme)
}

/// Expand the target path and dump the flattened rows to stdout.
fn run_json_mode(store: &HttpStore, path: &str, depth: usize) -> Result<()> {
    let mut tree = store.fetch_subtree("", depth)?;
    let report = expand_path(&mut tree, store, path, depth)?;
    if !report.fully_revealed() {
        eprintln!("Warning: prefixes missing from the local tree: {}", report.missing.join(", "));
    }

    let rows = flatten(&tree);
    let stdout = io::stdout();
    serde_json::to_writer_pretty(stdout.lock(), &rows)?;
    println!();
    Ok(())
}

fn run_tui_mode(store: HttpStore, path: String, depth: usize, color_scheme: ColorScheme) -> Result<()> {
    // Set up panic handler to restore terminal on crash
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let mut app = App::new(Arc::new(store), color_scheme, depth);
    app.start_navigation(path);

    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    let cleanup_result = cleanup_terminal(&mut terminal);
    result.and(cleanup_result)
}

/// Clean up terminal state.
fn cleanup_terminal<B: ratatui::backend::Backend + Write>(terminal: &mut Terminal<B>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    loop {
        // Apply any finished background navigation
        app.update();

        // Render UI
        terminal.draw(|frame| {
            ui::render_ui(frame, app);
        })?;

        // Handle input with timeout so pending fetches keep the UI fresh
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                // Only handle key press, not release
                if key.kind == KeyEventKind::Press {
                    let command = handle_key(key, app.modes.current());
                    app.handle_command(command);
                }
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
