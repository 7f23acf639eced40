/// Default values for the main CRAFTMEAL env configs.
/// All can be overridden by an ENV var of the same name. These should only
/// be primitive types.

/// Base URL of the CraftMeal REST backend
pub static CRAFTMEAL_API_BASE_URL: &'static str = "http://127.0.0.1:8000/api";

/// Timeout for a single HTTP request
pub static CRAFTMEAL_HTTP_TIMEOUT_MS: usize = 5000;

/// Poll interval of the TUI event loop
pub static CRAFTMEAL_TUI_TICK_MS: usize = 16;

/// Maximum number of log lines kept in the in-memory log buffer
pub static CRAFTMEAL_LOG_BUFFER_LINES: usize = 10_000;

/// How long a toast notification stays on screen
pub static CRAFTMEAL_TOAST_TTL_MS: usize = 4000;
