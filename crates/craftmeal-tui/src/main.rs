use std::io;

#[tokio::main]
async fn main() -> io::Result<()> {
    craftmeal_tui::tui_main().await
}
