//! Development tasks for slotdelta
//!
//! Run with `cargo run -p xtask -- <task>`.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use clap_mangen::Man;

use slotdelta::cli::Cli;

#[derive(Parser)]
#[command(name = "xtask")]
struct Xtask {
    #[command(subcommand)]
    task: Task,
}

#[derive(Subcommand)]
enum Task {
    /// Generate man pages for slotdelta and its subcommands
    Man {
        /// Output directory
        #[arg(long, default_value = "target/man")]
        out_dir: PathBuf,
    },
}

fn main() -> Result<()> {
    match Xtask::parse().task {
        Task::Man { out_dir } => generate_man(&out_dir),
    }
}

fn generate_man(out_dir: &PathBuf) -> Result<()> {
    fs::create_dir_all(out_dir)
        .with_context(|| format!("Failed to create {}", out_dir.display()))?;

    let cmd = Cli::command();
    let name = cmd.get_name().to_string();
    write_page(out_dir, &name, cmd.clone())?;

    for sub in cmd.get_subcommands() {
        let page = format!("{}-{}", name, sub.get_name());
        write_page(out_dir, &page, sub.clone().name(page.clone()))?;
    }
    Ok(())
}

fn write_page(out_dir: &std::path::Path, name: &str, cmd: clap::Command) -> Result<()> {
    let mut buffer = Vec::new();
    Man::new(cmd).render(&mut buffer)?;

    let path = out_dir.join(format!("{}.1", name));
    fs::write(&path, buffer).with_context(|| format!("Failed to write {}", path.display()))?;
    println!("Wrote {}", path.display());
    Ok(())
}
