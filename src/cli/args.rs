//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use hueshift::color::Rgb;
use hueshift::config::{Config, RecolorSection};
use std::path::PathBuf;

/// Contrast-aware hue shifting for site images
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path (default: hueshift.toml searched upward from cwd)
    #[arg(short = 'C', long, global = true, value_hint = clap::ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Show luminance, contrast ratio and WCAG level of two colors
    #[command(visible_alias = "c")]
    Contrast {
        /// Foreground color (`#rgb`, `#rrggbb` or a color name)
        foreground: Rgb,

        /// Background color
        background: Rgb,
    },

    /// Search the hue shift that raises a color's contrast against a background
    #[command(visible_alias = "s")]
    Shift {
        /// Dominant color to shift
        dominant: Rgb,

        /// Background color (default: `recolor.background` from config)
        background: Option<Rgb>,

        #[command(flatten)]
        search: SearchArgs,
    },

    /// Recolor images whose dominant color lacks contrast against the background
    #[command(visible_alias = "r")]
    Recolor {
        #[command(flatten)]
        args: RecolorArgs,
    },
}

/// Search tuning shared by Shift and Recolor.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct SearchArgs {
    /// Contrast ratio to aim for (default: 7.0, WCAG AAA)
    #[arg(short = 't', long)]
    pub target_contrast: Option<f64>,

    /// Minimum contrast gain factor worth recoloring for (default: 1.2)
    #[arg(short = 'g', long)]
    pub min_gain: Option<f64>,

    /// Initial search step in degrees (default: 30)
    #[arg(long)]
    pub step: Option<u32>,
}

/// Recolor command arguments.
#[derive(clap::Args, Debug, Clone)]
pub struct RecolorArgs {
    /// Image files or directories (scanned for png, jpg, jpeg, webp)
    #[arg(required = true, value_hint = clap::ValueHint::AnyPath)]
    pub paths: Vec<PathBuf>,

    /// Page background color (default: `recolor.background` from config)
    #[arg(short, long)]
    pub background: Option<Rgb>,

    /// Output directory (default: next to each source with `output.suffix`)
    #[arg(short, long, value_hint = clap::ValueHint::DirPath)]
    pub output: Option<PathBuf>,

    #[command(flatten)]
    pub search: SearchArgs,

    /// Only report what would be recolored
    #[arg(short = 'n', long)]
    pub dry: bool,

    /// Enable verbose output for debugging
    #[arg(short = 'V', long)]
    pub verbose: bool,
}

impl SearchArgs {
    /// Override `[recolor]` values given on the command line.
    pub fn apply(&self, section: &mut RecolorSection) {
        update_option(&mut section.target_contrast, self.target_contrast.as_ref());
        update_option(&mut section.min_gain, self.min_gain.as_ref());
        update_option(&mut section.initial_step, self.step.as_ref());
    }
}

impl RecolorArgs {
    /// Override config values given on the command line.
    pub fn apply(&self, config: &mut Config) {
        self.search.apply(&mut config.recolor);
        update_option(&mut config.recolor.background, self.background.as_ref());
        if let Some(dir) = &self.output {
            config.output.dir = Some(dir.clone());
        }
    }
}

/// Replace `target` when the CLI provided a value.
fn update_option<T: Clone>(target: &mut T, value: Option<&T>) {
    if let Some(v) = value {
        *target = v.clone();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_contrast_colors() {
        let cli = Cli::try_parse_from(["hueshift", "contrast", "#000", "white"]).unwrap();
        match cli.command {
            Commands::Contrast {
                foreground,
                background,
            } => {
                assert_eq!(foreground, Rgb::BLACK);
                assert_eq!(background, Rgb::WHITE);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_rejects_unknown_color() {
        assert!(Cli::try_parse_from(["hueshift", "contrast", "teal", "#fff"]).is_err());
    }

    #[test]
    fn test_recolor_args_override_config() {
        let cli = Cli::try_parse_from([
            "hueshift", "recolor", "img", "-b", "#111", "-o", "out", "-t", "4.5", "--step", "10",
        ])
        .unwrap();
        let Commands::Recolor { args } = cli.command else {
            panic!("expected recolor");
        };

        let mut config = Config::default();
        args.apply(&mut config);
        assert_eq!(config.recolor.background, Rgb::new(0x11, 0x11, 0x11));
        assert_eq!(config.recolor.target_contrast, 4.5);
        assert_eq!(config.recolor.min_gain, 1.2);
        assert_eq!(config.recolor.initial_step, 10);
        assert_eq!(config.output.dir, Some(PathBuf::from("out")));
    }

    #[test]
    fn test_config_flag_is_optional() {
        let cli = Cli::try_parse_from(["hueshift", "contrast", "#000", "#fff"]).unwrap();
        assert_eq!(cli.config, None);

        let cli = Cli::try_parse_from(["hueshift", "shift", "blue", "-C", "site.toml"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("site.toml")));
    }

    #[test]
    fn test_recolor_requires_paths() {
        assert!(Cli::try_parse_from(["hueshift", "recolor"]).is_err());
    }
}
