use terminal_size::{terminal_size, Width};

/// Width for wrapping `--help` output, `margin` characters less than
/// the terminal's (or 120 if stdout is not a terminal).
pub fn get_terminal_width(margin: usize) -> usize {
    match terminal_size() {
        Some((Width(width), _)) => usize::from(width).saturating_sub(margin).max(40),
        None => 120,
    }
}
