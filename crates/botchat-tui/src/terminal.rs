//! Terminal setup and restoration

use ratatui::DefaultTerminal;

/// Enter raw mode and the alternate screen, restoring both on panic
pub fn init() -> DefaultTerminal {
    install_panic_hook();
    ratatui::init()
}

/// Leave raw mode and the alternate screen
pub fn restore() {
    ratatui::restore();
}

/// Install a panic hook that restores the terminal before the report prints
fn install_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        ratatui::restore();
        original_hook(panic_info);
    }));
}
