//! `contrast` and `shift` commands: single-color inspection.

use hueshift::color::{Rgb, WcagLevel, contrast_ratio, relative_luminance, shift_hue};
use hueshift::image::recolor::{SearchParams, search_hue};
use hueshift::log;
use owo_colors::OwoColorize;

/// Print luminance, contrast ratio and WCAG level of a color pair.
pub fn show_contrast(foreground: Rgb, background: Rgb) {
    let ratio = contrast_ratio(foreground, background);
    let level = WcagLevel::from_ratio(ratio);

    log!("contrast"; "{foreground} on {background}");
    println!(
        "  luminance  {:.4} / {:.4}",
        relative_luminance(foreground),
        relative_luminance(background)
    );
    println!("  ratio      {}", format_ratio(ratio, level));
}

/// Run the hue search and print how it went.
pub fn show_shift(dominant: Rgb, background: Rgb, params: &SearchParams) {
    let search = search_hue(dominant, background, params);

    log!("shift"; "{dominant} on {background}");
    println!(
        "  original   hue {:>6.1}°  {}",
        search.original_hue,
        format_ratio(search.original_contrast, WcagLevel::from_ratio(search.original_contrast))
    );
    println!(
        "  best       hue {:>6.1}°  {}  ({} iteration{})",
        search.best_hue,
        format_ratio(search.best_contrast, WcagLevel::from_ratio(search.best_contrast)),
        search.iterations,
        if search.iterations == 1 { "" } else { "s" }
    );

    if search.shift == 0.0 {
        println!(
            "  shift      {} (gain below {:.2}x)",
            "none".dimmed(),
            params.min_gain
        );
    } else {
        let shifted = shift_hue(dominant, search.shift);
        println!("  shift      {:+.1}° -> {}", search.shift, shifted.to_hex().bold());
    }
}

fn format_ratio(ratio: f64, level: WcagLevel) -> String {
    let label = level.to_string();
    let label = if level.passes(WcagLevel::Aa) {
        label.green().to_string()
    } else if level == WcagLevel::AaLarge {
        label.yellow().to_string()
    } else {
        label.red().to_string()
    };
    format!("{ratio:.2}:1 {label}")
}
