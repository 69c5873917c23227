//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context as _, Result};
use pharmadesk_admin::AdminConfig;

use crate::output::Output;

/// Config file names searched for, in order, in each directory.
const CONFIG_NAMES: [&str; 3] = ["pharmadesk.toml", ".pharmadesk.toml", "pharmadesk.json"];

/// Execution context for CLI commands.
pub struct Context {
    /// Dashboard configuration.
    pub config: AdminConfig,
    /// File the configuration came from, if any.
    pub config_path: Option<PathBuf>,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
}

impl Context {
    /// Load context from an explicit config file, or the nearest one found
    /// walking up from the working directory.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (config, config_path) = if let Some(path) = config_path {
            let path = resolve(&cwd, Path::new(path));
            let config = AdminConfig::load(&path)
                .with_context(|| format!("Failed to load config {}", path.display()))?;
            (config, Some(path))
        } else {
            match Self::find_config(&cwd) {
                Some(path) => {
                    let config = AdminConfig::load(&path)
                        .with_context(|| format!("Failed to load config {}", path.display()))?;
                    (config, Some(path))
                }
                None => (AdminConfig::default(), None),
            }
        };

        Ok(Self {
            config,
            config_path,
            output,
            cwd,
        })
    }

    /// Find the nearest config file in the directory tree.
    fn find_config(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();
        loop {
            for name in &CONFIG_NAMES {
                let candidate = current.join(name);
                if candidate.is_file() {
                    return Some(candidate);
                }
            }

            if !current.pop() {
                return None;
            }
        }
    }

    /// Path of the product export to read.
    ///
    /// An explicit path is taken relative to the working directory; the
    /// configured `store.documents` relative to the config file.
    pub fn documents_path(&self, explicit: Option<&str>) -> Result<PathBuf> {
        if let Some(path) = explicit {
            return Ok(resolve(&self.cwd, Path::new(path)));
        }

        let Some(configured) = &self.config.store.documents else {
            bail!("No product export configured. Pass --documents or set store.documents.");
        };
        let base = self
            .config_path
            .as_deref()
            .and_then(Path::parent)
            .unwrap_or(self.cwd.as_path());
        Ok(resolve(base, configured))
    }
}

fn resolve(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context(config: AdminConfig, config_path: Option<&str>) -> Context {
        Context {
            config,
            config_path: config_path.map(PathBuf::from),
            output: Output::new(false, true),
            cwd: PathBuf::from("/work"),
        }
    }

    #[test]
    fn test_explicit_documents_resolve_against_cwd() {
        let ctx = context(AdminConfig::default(), None);
        assert_eq!(
            ctx.documents_path(Some("export.json")).unwrap(),
            PathBuf::from("/work/export.json")
        );
        assert_eq!(
            ctx.documents_path(Some("/data/export.json")).unwrap(),
            PathBuf::from("/data/export.json")
        );
    }

    #[test]
    fn test_configured_documents_resolve_against_config_dir() {
        let mut config = AdminConfig::default();
        config.store.documents = Some(PathBuf::from("demos/products.json"));

        let ctx = context(config.clone(), Some("/repo/pharmadesk.toml"));
        assert_eq!(
            ctx.documents_path(None).unwrap(),
            PathBuf::from("/repo/demos/products.json")
        );

        let ctx = context(config, None);
        assert_eq!(
            ctx.documents_path(None).unwrap(),
            PathBuf::from("/work/demos/products.json")
        );
    }

    #[test]
    fn test_missing_documents_is_an_error() {
        let ctx = context(AdminConfig::default(), None);
        assert!(ctx.documents_path(None).is_err());
    }

    #[test]
    fn test_find_config_walks_up() {
        let root = std::env::temp_dir().join(format!("pharmadesk-cli-{}", std::process::id()));
        let nested = root.join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(root.join("pharmadesk.toml"), "[products]\npage_size = 5\n").unwrap();

        let found = Context::find_config(&nested).unwrap();
        assert_eq!(found, root.join("pharmadesk.toml"));
        assert_eq!(AdminConfig::load(&found).unwrap().products.page_size, 5);

        std::fs::remove_dir_all(&root).unwrap();
    }
}
