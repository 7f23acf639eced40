use std::io;

// Flux architecture modules
mod actions;
mod app;
mod dispatcher;
mod effects;
mod keyboard;
mod logger;
mod stores;
mod ui;

// Shared widgets and terminal plumbing
mod common;
mod tui;

// Re-export the main entry point
pub use app::App;

/// Main entry point for the TUI application
pub async fn tui_main() -> io::Result<()> {
    // Install color-eyre for better error messages BEFORE terminal init
    if let Err(e) = color_eyre::install() {
        eprintln!("Warning: Failed to install color-eyre: {}", e);
    }

    let mut terminal = tui::init()?;

    // Create the application and action receiver (this initializes the logger)
    let (mut app, action_receiver) = match App::new() {
        Ok(app) => app,
        Err(e) => {
            // Make sure to restore terminal before showing error
            let _ = tui::restore();
            eprintln!("Failed to initialize application: {}", e);
            return Err(io::Error::other(format!("{}", e)));
        }
    };

    let result = app.run(&mut terminal, action_receiver).await;

    // Always restore terminal
    let _ = tui::restore();

    if let Err(e) = result {
        eprintln!("Application error: {:?}", e);
        for line in app.recent_logs(20) {
            eprintln!("{line}");
        }
        return Err(e);
    }

    Ok(())
}
