// CLI definitions using clap

use clap::{Parser, Subcommand, ValueEnum};
use kontrol_driver::ScreenId;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "kontrol")]
#[command(author, version, about = "Komplete Kontrol MK2 configurator")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable transport monitoring (prints every frame sent and received)
    #[arg(long, global = true)]
    pub monitor: bool,

    /// Print monitored frames as JSON lines
    #[arg(long, global = true)]
    pub json: bool,

    /// Show raw hex dump alongside monitored frames
    #[arg(long, global = true)]
    pub hex: bool,

    /// Filter monitored frames (all, in, out, tag=0xNN)
    #[arg(long, global = true)]
    pub filter: Option<String>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "info")]
    pub log_level: String,

    /// Settings file (default: ~/.config/kontrol/settings.toml)
    #[arg(long, global = true, value_name = "FILE")]
    pub settings: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List connected keyboards
    #[command(visible_alias = "ls")]
    List,

    /// Send a preset to the keyboard once
    #[command(visible_alias = "a")]
    Apply {
        /// Preset file, or a bare name looked up in the preset directory
        preset: PathBuf,
        /// Knob/button page to show (0-3)
        #[arg(short, long, default_value = "0", value_parser = clap::value_parser!(u8).range(0..=3))]
        page: u8,
    },

    /// Apply a preset and follow knobs and navigation buttons until Ctrl-C
    #[command(visible_alias = "r")]
    Run {
        preset: PathBuf,
        #[arg(short, long, default_value = "0", value_parser = clap::value_parser!(u8).range(0..=3))]
        page: u8,
    },

    /// Push an image to one of the displays
    #[command(visible_alias = "img")]
    Screen {
        /// Image file (png or jpeg)
        image: PathBuf,
        #[arg(short, long, value_enum, default_value = "left")]
        screen: ScreenArg,
        /// Left edge in pixels
        #[arg(short, long, default_value = "0")]
        x: u16,
        /// Top edge in pixels
        #[arg(short, long, default_value = "0")]
        y: u16,
    },

    /// Encode a preset without a keyboard and print the frames
    Dump {
        preset: PathBuf,
        #[arg(short, long, default_value = "0", value_parser = clap::value_parser!(u8).range(0..=3))]
        page: u8,
    },

    /// Write a default preset document
    Init {
        path: PathBuf,
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
        /// Also make this preset's directory the default preset directory
        #[arg(long)]
        set_default_dir: bool,
    },

    /// Send one raw HID report (hex bytes, e.g. "a0 00 00")
    Raw {
        /// Report bytes in hex; whitespace is ignored
        hex: String,
    },
}

/// Display selector for the screen command
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ScreenArg {
    Left,
    Right,
}

impl From<ScreenArg> for ScreenId {
    fn from(arg: ScreenArg) -> Self {
        match arg {
            ScreenArg::Left => ScreenId::Left,
            ScreenArg::Right => ScreenId::Right,
        }
    }
}
