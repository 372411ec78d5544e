//! Build helpers: man pages and shell completions for `drat`.
//!
//! ```text
//! cargo xtask man [--out-dir target/man]
//! cargo xtask completions [--out-dir target/completions]
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

#[derive(Parser)]
#[command(name = "xtask", about = "Project automation")]
struct Xtask {
    #[command(subcommand)]
    task: Task,
}

#[derive(Subcommand)]
enum Task {
    /// Generate man pages for drat and its subcommands
    Man {
        /// Output directory
        #[arg(long, default_value = "target/man")]
        out_dir: PathBuf,
    },
    /// Generate shell completion scripts
    Completions {
        /// Output directory
        #[arg(long, default_value = "target/completions")]
        out_dir: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    match Xtask::parse().task {
        Task::Man { out_dir } => generate_man(&out_dir),
        Task::Completions { out_dir } => generate_completions(&out_dir),
    }
}

fn generate_man(out_dir: &Path) -> anyhow::Result<()> {
    fs::create_dir_all(out_dir).with_context(|| format!("failed to create {}", out_dir.display()))?;
    let cmd = drat::command();
    clap_mangen::generate_to(cmd, out_dir)
        .with_context(|| format!("failed to write man pages to {}", out_dir.display()))?;
    println!("man pages written to {}", out_dir.display());
    Ok(())
}

fn generate_completions(out_dir: &Path) -> anyhow::Result<()> {
    fs::create_dir_all(out_dir).with_context(|| format!("failed to create {}", out_dir.display()))?;
    for &shell in Shell::value_variants() {
        let mut cmd = drat::command();
        let path = clap_complete::generate_to(shell, &mut cmd, "drat", out_dir)
            .with_context(|| format!("failed to write {shell} completions"))?;
        println!("{}", path.display());
    }
    Ok(())
}
