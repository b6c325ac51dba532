//! Inline button styles.

use crate::config::StyleConfig;

const BASE_DECLARATIONS: &[&str] = &[
    "border-radius: 100px",
    "border: none",
    "padding: 6px 16px",
    "text-decoration: none",
    "font-size: 16px",
    "cursor: pointer",
];

/// Inline `style` for a stopwatch button. `active` swaps in the running
/// background.
pub fn button_style(style: &StyleConfig, active: bool) -> String {
    let background = if active {
        &style.active_background
    } else {
        &style.base_background
    };

    let mut declarations: Vec<String> = BASE_DECLARATIONS.iter().map(|d| d.to_string()).collect();
    declarations.push(format!("color: {}", style.text_color));
    declarations.push(format!("background: {background}"));
    declarations.join("; ")
}
