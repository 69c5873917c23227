//! Configuration management commands.

use std::fs;

use anyhow::{bail, Context as _, Result};
use dialoguer::Confirm;
use pharmadesk_admin::{generate_default_config, LogFormat};

use super::{ConfigArgs, ConfigCommand};
use crate::context::Context;

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx),
        ConfigCommand::Init { force } => init_config(force, ctx),
        ConfigCommand::Validate => validate_config(ctx),
    }
}

fn show_config(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    ctx.output.header("Current Configuration");
    match &ctx.config_path {
        Some(path) => ctx.output.kv("file", &path.display().to_string()),
        None => ctx.output.kv("file", "(defaults)"),
    }

    let products = &ctx.config.products;
    ctx.output.info("");
    ctx.output.info("[products]");
    ctx.output.kv("page_size", &products.page_size.to_string());
    ctx.output.kv("debounce_ms", &products.debounce_ms.to_string());
    if let Some(ref tag) = products.tag {
        ctx.output.kv("tag", tag);
    }

    ctx.output.info("");
    ctx.output.info("[store]");
    match &ctx.config.store.documents {
        Some(path) => ctx.output.kv("documents", &path.display().to_string()),
        None => ctx.output.kv("documents", "(not set)"),
    }

    ctx.output.info("");
    ctx.output.info("[logging]");
    ctx.output.kv("level", &ctx.config.logging.level);
    let format = match ctx.config.logging.format {
        LogFormat::Human => "human",
        LogFormat::Json => "json",
    };
    ctx.output.kv("format", format);

    Ok(())
}

fn init_config(force: bool, ctx: &Context) -> Result<()> {
    let config_path = ctx.cwd.join("pharmadesk.toml");

    if config_path.exists() && !force {
        if ctx.output.is_json() {
            bail!(
                "Config file already exists: {}. Use --force to overwrite.",
                config_path.display()
            );
        }

        let confirmed = Confirm::new()
            .with_prompt(format!("Overwrite {}?", config_path.display()))
            .default(false)
            .interact()?;

        if !confirmed {
            ctx.output.warn("Cancelled");
            return Ok(());
        }
    }

    fs::write(&config_path, generate_default_config())
        .with_context(|| format!("Failed to write {}", config_path.display()))?;

    ctx.output.success(&format!("Created: {}", config_path.display()));

    Ok(())
}

fn validate_config(ctx: &Context) -> Result<()> {
    ctx.output.header("Validating configuration");

    ctx.config.validate()?;

    if let Some(documents) = &ctx.config.store.documents {
        let path = ctx.documents_path(None)?;
        if !path.is_file() {
            ctx.output.warn(&format!(
                "store.documents '{}' does not exist yet",
                documents.display()
            ));
        }
    } else {
        ctx.output.warn("store.documents is not set; product commands need --documents");
    }

    ctx.output.success("Configuration is valid");
    Ok(())
}
