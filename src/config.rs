use clap::Parser;
use rfd::FileDialog;
use std::path::PathBuf;

/// Preload a folder of images into RAM and triage them into a chosen/ folder.
#[derive(Parser, Debug)]
#[command(name = "triage-viewer", version, about)]
pub struct Cli {
    /// Directory to browse.
    #[arg(default_value = ".")]
    pub directory: PathBuf,

    /// Name of the output subdirectory holding links to accepted images.
    #[arg(long, default_value = "chosen", env = "TRIAGE_OUTPUT")]
    pub output: String,

    /// Pick the directory with a native folder dialog.
    #[arg(long)]
    pub pick: bool,

    /// Initial window width.
    #[arg(long, default_value_t = 1280)]
    pub width: u32,

    /// Initial window height.
    #[arg(long, default_value_t = 720)]
    pub height: u32,
}

/// Resolved runtime configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub root: PathBuf,
    pub output: String,
    pub window_size: (u32, u32),
}

impl Config {
    pub fn from_cli(cli: Cli) -> Self {
        let root = if cli.pick {
            // Show the native folder picker dialog
            match FileDialog::new().set_title("Select Folder with Photos").pick_folder() {
                Some(folder) => folder,
                None => {
                    tracing::info!("Folder picker cancelled, using {}", cli.directory.display());
                    cli.directory
                }
            }
        } else {
            cli.directory
        };

        Config {
            root,
            output: cli.output,
            window_size: (cli.width.max(1), cli.height.max(1)),
        }
    }
}
