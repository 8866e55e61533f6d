//! `cleanrules` command-line interface.
//!
//! Parsing lives here rather than in `main.rs` so the commands can be driven
//! from tests with an in-memory writer and a scratch settings directory.

use std::io::Write;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use cleanrules_core::settings::settings_path;
use cleanrules_core::{
    get_rule, list_rules, read_settings_from, render_all_as, render_as, render_index,
    write_settings_to, Error, Format, RenderOptions, Settings,
};

#[derive(Debug, Parser)]
#[command(name = "cleanrules", version, about = "Explain clean-code naming, error-handling and formatting rules")]
pub struct Cli {
    /// Output format: text, markdown or json. Defaults to the configured format.
    #[arg(long, global = true)]
    pub format: Option<Format>,

    /// Leave out the bad/good example pair
    #[arg(long, global = true)]
    pub no_examples: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print one rule with its description and examples
    Explain {
        /// Rule id, e.g. "naming" or "error-handling"
        rule_id: String,
    },
    /// List rule ids and titles
    List,
    /// Print every rule in guide order
    All,
    /// Inspect or change persistent settings
    Config {
        #[command(subcommand)]
        action: ConfigCommand,
    },
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Print the settings file location and effective settings
    Show,
    /// Update persistent settings
    Set {
        /// Default output format. `--format` is accepted as well.
        #[arg(long)]
        default_format: Option<Format>,
        /// Whether to include examples by default (true/false)
        #[arg(long)]
        examples: Option<bool>,
    },
}

pub fn run(cli: Cli, settings_dir: &Path, out: &mut dyn Write) -> Result<()> {
    tracing::debug!(command = ?cli.command, "running");

    match cli.command {
        Command::Explain { rule_id } => {
            let (format, opts) = render_settings(cli.format, cli.no_examples, settings_dir)?;
            let rule = get_rule(&rule_id).map_err(with_hint)?;
            emit(out, &render_as(rule, format, &opts)?)
        }
        Command::List => {
            let (format, _) = render_settings(cli.format, cli.no_examples, settings_dir)?;
            let text = match format {
                Format::Json => {
                    let entries: Vec<_> = list_rules()
                        .iter()
                        .map(|r| serde_json::json!({ "id": r.id, "title": r.title }))
                        .collect();
                    serde_json::to_string_pretty(&entries)?
                }
                Format::Text | Format::Markdown => render_index(list_rules()),
            };
            emit(out, &text)
        }
        Command::All => {
            let (format, opts) = render_settings(cli.format, cli.no_examples, settings_dir)?;
            emit(out, &render_all_as(list_rules(), format, &opts)?)
        }
        Command::Config { action } => match action {
            ConfigCommand::Show => {
                let settings = read_settings_from(settings_dir).context("loading settings")?;
                writeln!(out, "# {}", settings_path(settings_dir).display())?;
                emit(out, &serde_json::to_string_pretty(&settings)?)
            }
            ConfigCommand::Set {
                default_format,
                examples,
            } => {
                // `config set --format json` arrives through the global flag.
                let format = default_format.or(cli.format);
                if format.is_none() && examples.is_none() {
                    return Err(anyhow!("nothing to set; pass --format and/or --examples"));
                }
                let mut settings = match read_settings_from(settings_dir) {
                    Ok(settings) => settings,
                    Err(err @ Error::Settings { .. }) => {
                        tracing::warn!(error = ?err, "replacing unreadable settings");
                        Settings::default()
                    }
                    Err(err) => return Err(err).context("loading settings"),
                };
                if let Some(f) = format {
                    settings.format = f;
                }
                if let Some(e) = examples {
                    settings.examples = e;
                }
                write_settings_to(settings_dir, &settings).context("saving settings")?;
                writeln!(out, "Wrote {}", settings_path(settings_dir).display())?;
                Ok(())
            }
        },
    }
}

/// Output format and options for the rendering commands. Settings are only consulted
/// for what the flags leave open; an explicit `--format` wins even over an unreadable file.
fn render_settings(
    format: Option<Format>,
    no_examples: bool,
    settings_dir: &Path,
) -> Result<(Format, RenderOptions)> {
    let settings = match (read_settings_from(settings_dir), format) {
        (Ok(settings), _) => settings,
        (Err(err @ Error::Settings { .. }), Some(_)) => {
            tracing::warn!(error = ?err, "ignoring unreadable settings");
            Settings::default()
        }
        (Err(err), _) => return Err(err).context("loading settings"),
    };
    let format = format.unwrap_or(settings.format);
    let mut opts = settings.render_options();
    if no_examples {
        opts.examples = false;
    }
    tracing::debug!(%format, ?opts, "render settings");
    Ok((format, opts))
}

fn with_hint(err: Error) -> anyhow::Error {
    match &err {
        Error::NotFound {
            suggestion: Some(s),
            ..
        } => anyhow!("{err} (did you mean `{s}`?)"),
        Error::NotFound { .. } => anyhow!(
            "{err}; run `cleanrules list` to see the available rules"
        ),
        _ => err.into(),
    }
}

/// Write `text`, terminating it with a newline if it lacks one.
fn emit(out: &mut dyn Write, text: &str) -> Result<()> {
    out.write_all(text.as_bytes())?;
    if !text.ends_with('\n') {
        out.write_all(b"\n")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn run_args(dir: &Path, args: &[&str]) -> Result<String> {
        let cli = Cli::try_parse_from(std::iter::once("cleanrules").chain(args.iter().copied()))?;
        let mut buf = Vec::new();
        run(cli, dir, &mut buf)?;
        Ok(String::from_utf8(buf)?)
    }

    #[test]
    fn explain_prints_rule() {
        let dir = tempfile::tempdir().unwrap();
        let out = run_args(dir.path(), &["explain", "naming"]).unwrap();
        assert!(out.starts_with("Naming conventions [naming]"));
        assert!(out.contains("Avoid:"));
    }

    #[test]
    fn explain_unknown_suggests() {
        let dir = tempfile::tempdir().unwrap();
        let err = run_args(dir.path(), &["explain", "Naming"]).unwrap_err();
        assert_eq!(err.to_string(), "unknown rule `Naming` (did you mean `naming`?)");

        let err = run_args(dir.path(), &["explain", "nonexistent"]).unwrap_err();
        assert!(err.to_string().starts_with("unknown rule `nonexistent`;"));
    }

    #[test]
    fn global_flags_after_subcommand() {
        let dir = tempfile::tempdir().unwrap();
        let out = run_args(dir.path(), &["explain", "tests", "--format", "md", "--no-examples"]).unwrap();
        assert!(out.starts_with("## Readable tests\n"));
        assert!(!out.contains("**Avoid**"));
    }

    #[test]
    fn list_json() {
        let dir = tempfile::tempdir().unwrap();
        let out = run_args(dir.path(), &["--format", "json", "list"]).unwrap();
        let entries: Vec<serde_json::Value> = serde_json::from_str(&out).unwrap();
        assert_eq!(entries.len(), list_rules().len());
        assert_eq!(entries[2]["id"], "error-handling");
    }

    #[test]
    fn config_set_then_used_as_default() {
        let dir = tempfile::tempdir().unwrap();
        run_args(dir.path(), &["config", "set", "--default-format", "json", "--examples", "false"]).unwrap();
        assert_eq!(
            read_settings_from(dir.path()).unwrap(),
            Settings {
                format: Format::Json,
                examples: false,
            }
        );

        let out = run_args(dir.path(), &["explain", "comments"]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["id"], "comments");
        assert!(value.get("goodExample").is_none());
    }

    #[test]
    fn config_set_requires_a_value() {
        let dir = tempfile::tempdir().unwrap();
        assert!(run_args(dir.path(), &["config", "set"]).is_err());
    }

    #[test]
    fn config_show_prints_path_and_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let out = run_args(dir.path(), &["config", "show"]).unwrap();
        assert!(out.starts_with("# "));
        assert!(out.contains("settings.json"));
        assert!(out.contains("\"format\": \"text\""));
    }

    #[test]
    fn config_set_accepts_global_format_flag() {
        let dir = tempfile::tempdir().unwrap();
        run_args(dir.path(), &["config", "set", "--format", "markdown"]).unwrap();
        assert_eq!(read_settings_from(dir.path()).unwrap().format, Format::Markdown);
    }

    #[test]
    fn config_set_default_format_wins_over_global_flag() {
        let dir = tempfile::tempdir().unwrap();
        run_args(dir.path(), &["--format", "text", "config", "set", "--default-format", "json"]).unwrap();
        assert_eq!(read_settings_from(dir.path()).unwrap().format, Format::Json);
    }

    #[test]
    fn config_set_repairs_malformed_settings() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(settings_path(dir.path()), "{ not json").unwrap();

        run_args(dir.path(), &["config", "set", "--examples", "false"]).unwrap();

        assert_eq!(
            read_settings_from(dir.path()).unwrap(),
            Settings {
                format: Format::Text,
                examples: false,
            }
        );
    }

    #[test]
    fn explicit_format_overrides_malformed_settings() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(settings_path(dir.path()), "{ not json").unwrap();

        let out = run_args(dir.path(), &["explain", "naming", "--format", "text"]).unwrap();
        assert!(out.starts_with("Naming conventions [naming]"));

        let err = run_args(dir.path(), &["explain", "naming"]).unwrap_err();
        assert!(format!("{err:#}").starts_with("loading settings: settings file "));
    }
}
