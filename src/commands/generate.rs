//! `generate` subcommand: man pages for `jt` and its subcommands.
use anyhow::{Context, Result};
use std::fs::File;
use std::path::{Path, PathBuf};

/// Write the man page of `cmd`, and one page per (nested) subcommand, into
/// `output_dir`, or the current directory when none is given.
///
/// Returns the paths of the written pages.
///
/// # Errors
///
/// Returns an [`anyhow::Error`] if the output directory or a page file cannot
/// be created.
pub fn generate_man_pages(
    cmd: &clap::Command,
    output_dir: Option<PathBuf>,
) -> Result<Vec<PathBuf>> {
    let output_dir = match output_dir {
        Some(dir) => dir,
        None => std::env::current_dir().context("Opening current directory")?,
    };
    std::fs::create_dir_all(&output_dir)
        .context("create output man directory")?;

    let mut written = Vec::new();
    let name = cmd.get_name().to_string();
    render_page(cmd.clone(), &output_dir, &name, &mut written)?;
    Ok(written)
}

/// Render `cmd` as `<name>.1`, then recurse into its subcommands with
/// `<name>-<sub>` names.
fn render_page(
    cmd: clap::Command,
    output_dir: &Path,
    name: &str,
    written: &mut Vec<PathBuf>,
) -> Result<()> {
    let path = output_dir.join(format!("{name}.1"));
    let mut file = File::create(&path)
        .with_context(|| format!("failed to create {}", path.display()))?;

    // clap_mangen takes NAME and SYNOPSIS from the command name, which must
    // be `'static` without clap's `string` feature; generation is one-shot
    let leaked_name: &'static str =
        Box::leak(name.to_string().into_boxed_str());
    let renamed = cmd.clone().name(leaked_name).disable_help_subcommand(true);
    clap_mangen::Man::new(renamed)
        .render(&mut file)
        .with_context(|| format!("failed to write {}", path.display()))?;
    log::info!("generated {}", path.display());
    written.push(path);

    for sub in cmd.get_subcommands() {
        let sub_name = format!("{name}-{}", sub.get_name());
        render_page(sub.clone(), output_dir, &sub_name, written)?;
    }
    Ok(())
}
