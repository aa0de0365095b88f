//! One-shot commands: `analyze` and `init`.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use color_eyre::eyre::{bail, WrapErr};
use color_eyre::Result;
use indicatif::{ProgressBar, ProgressStyle};
use landscape_core::config::PROJECT_CONFIG_FILE;
use landscape_core::{analyze_repository, Config, GraphData};

/// Analyze `path` and print (or write) the graph.
pub async fn analyze(
    path: PathBuf,
    output: Option<PathBuf>,
    compact: bool,
    config: Config,
) -> Result<()> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}")?);
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner.set_message(format!("Analyzing {}...", path.display()));

    let target = path.clone();
    let result = tokio::task::spawn_blocking(move || analyze_repository(&target, config)).await?;
    spinner.finish_and_clear();

    let data = result.wrap_err_with(|| format!("Failed to analyze {}", path.display()))?;
    let json = render(&data, compact)?;

    match output {
        Some(out) => {
            fs::write(&out, json).wrap_err_with(|| format!("Failed to write {}", out.display()))?;
            eprintln!(
                "Wrote {} nodes and {} edges to {}",
                data.stats.total_nodes,
                data.stats.total_edges,
                out.display()
            );
        }
        None => println!("{}", json),
    }

    Ok(())
}

fn render(data: &GraphData, compact: bool) -> Result<String> {
    let json = if compact {
        serde_json::to_string(data)?
    } else {
        serde_json::to_string_pretty(data)?
    };
    Ok(json)
}

/// Write the default configuration to `landscape.toml`.
pub fn init(force: bool) -> Result<()> {
    write_default_config(Path::new(PROJECT_CONFIG_FILE), force)?;
    println!("Created {}", PROJECT_CONFIG_FILE);
    Ok(())
}

fn write_default_config(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!("{} already exists (use --force to overwrite)", path.display());
    }
    fs::write(path, Config::default_config_string())
        .wrap_err_with(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_default_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(PROJECT_CONFIG_FILE);

        write_default_config(&path, false).unwrap();
        let config = Config::from_file(&path).unwrap();
        assert!(config.discovery.respect_gitignore);

        assert!(write_default_config(&path, false).is_err());
        assert!(write_default_config(&path, true).is_ok());
    }

    #[tokio::test]
    async fn test_analyze_writes_output() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("main.py"), "def main():\n    pass\n").unwrap();
        let out = dir.path().join("graph.json");

        analyze(dir.path().to_path_buf(), Some(out.clone()), true, Config::default())
            .await
            .unwrap();

        let written = fs::read_to_string(&out).unwrap();
        assert!(!written.contains('\n'));
        let json: serde_json::Value = serde_json::from_str(&written).unwrap();
        assert_eq!(json["stats"]["total_nodes"], 2);
    }

    #[tokio::test]
    async fn test_analyze_missing_dir_fails() {
        let result = analyze(PathBuf::from("/no/such/dir"), None, false, Config::default()).await;
        assert!(result.is_err());
    }
}
