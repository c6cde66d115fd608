use clap::{Parser, Subcommand};
use inkpress::init::{self, InitOptions};
use inkpress::pipeline::{self, BuildOptions};
use inkpress::site::SiteData;
use inkpress::{config, output};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "inkpress")]
#[command(about = "Static blog generator")]
#[command(long_about = "\
Static blog generator

A project is a directory with a config file, markdown content and a theme:

  my-blog/
  ├── config.toml                  # Site config (see 'inkpress gen-config')
  ├── content/
  │   ├── posts/                   # One .md per post, newest first by date
  │   │   └── hello-world.md
  │   └── pages/                   # Standalone pages, slug 'about/' → about/index.html
  │       └── about.md
  └── themes/
      └── default/
          ├── theme.toml           # name, static_dirs
          └── static/              # Copied to <output>/static/

Every .md file starts with a ```toml fenced front matter block
(title, slug, description, date, tags, author).

Run 'inkpress init' to create this layout with sample content.")]
#[command(version)]
struct Cli {
    /// Project root
    #[arg(long, default_value = ".", global = true)]
    root: PathBuf,

    /// Show debug logging
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create config, content directories, the default theme and sample content
    Init {
        /// Overwrite an existing config.toml
        #[arg(long)]
        force: bool,
    },
    /// Render the site and write it to the output directory
    Build {
        /// Output directory (overrides build.output_dir)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Print the build report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Load config, theme and content without writing anything
    Check,
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let filter = if cli.debug { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter)).init();

    match cli.command {
        Command::Init { force } => {
            println!("==> Initializing {}", cli.root.display());
            let report = init::init(&cli.root, &InitOptions { force })?;
            output::print_init_output(&report, &cli.root);
            println!("==> Run 'inkpress build' to render the sample site");
        }
        Command::Build { output: out, json } => {
            let options = BuildOptions { output_dir: out };
            if json {
                let report = pipeline::build(&cli.root, &options)?;
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("==> Building {}", cli.root.display());
                let report = pipeline::build(&cli.root, &options)?;
                output::print_build_output(&report, &cli.root);
                println!("==> Build complete: {}", report.output_dir.display());
            }
        }
        Command::Check => {
            println!("==> Checking {}", cli.root.display());
            let site = SiteData::load(&cli.root)?;
            println!(
                "    {} posts, {} pages, theme '{}'",
                site.posts.len(),
                site.pages.len(),
                site.theme.name()
            );
            println!("==> Project is valid");
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}
