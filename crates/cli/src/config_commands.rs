use std::{
    io::Write,
    path::{Path, PathBuf},
};

use {
    anyhow::Result,
    clap::Subcommand,
    herald_config::{DispatchSettings, find_config_file},
};

use crate::send_command::resolve_settings_with;

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Resolve and validate configuration, printing it with secrets redacted.
    Check {
        /// Config file path (default: ./herald.toml, then ~/.config/herald/).
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

pub fn handle_config(action: ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Check { config } => check(
            config.as_deref(),
            |name| std::env::var(name).ok(),
            &mut std::io::stdout(),
        ),
    }
}

/// Resolve settings and print the summary. Nothing is printed when any
/// required option is missing.
fn check(
    config: Option<&Path>,
    lookup: impl Fn(&str) -> Option<String>,
    out: &mut impl Write,
) -> Result<()> {
    let source = config.map(Path::to_path_buf).or_else(find_config_file);
    let settings = resolve_settings_with(config, None, None, lookup)?;
    write_summary(out, source.as_deref(), &settings)?;
    Ok(())
}

fn write_summary(
    out: &mut impl Write,
    source: Option<&Path>,
    settings: &DispatchSettings,
) -> std::io::Result<()> {
    let source = source.map_or_else(|| "(none, environment only)".to_string(), |p| {
        p.display().to_string()
    });
    writeln!(out, "config file        = {source}")?;
    writeln!(out, "sender_identity    = {}", settings.sender_identity)?;
    writeln!(out, "recipient_identity = {}", settings.recipient_identity)?;
    writeln!(out, "account_id         = {}", settings.account_id)?;
    writeln!(out, "auth_token         = [REDACTED]")?;
    writeln!(out, "api_base_url       = {}", settings.api_base_url)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        herald_config::{ConfigError, MissingOption},
        secrecy::Secret,
    };

    #[test]
    fn summary_redacts_token() {
        let settings = DispatchSettings {
            sender_identity: "whatsapp:+14155238886".into(),
            recipient_identity: "whatsapp:+5215550001111".into(),
            account_id: "AC123".into(),
            auth_token: Secret::new("super-secret-token".into()),
            api_base_url: "https://api.twilio.com".into(),
        };

        let mut out = Vec::new();
        write_summary(&mut out, None, &settings).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("(none, environment only)"));
        assert!(text.contains("account_id         = AC123"));
        assert!(text.contains("auth_token         = [REDACTED]"));
        assert!(!text.contains("super-secret-token"));
    }

    #[test]
    fn check_fails_on_missing_options_and_prints_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("herald.toml");
        std::fs::write(&path, "[twilio]\nsender_identity = \"whatsapp:+14155238886\"\n").unwrap();

        let mut out = Vec::new();
        let err = check(Some(&path), |_| None, &mut out).unwrap_err();

        assert!(out.is_empty());
        match err.downcast_ref::<ConfigError>() {
            Some(ConfigError::Missing(missing)) => assert_eq!(missing, &vec![
                MissingOption::RecipientIdentity,
                MissingOption::AccountId,
                MissingOption::AuthToken,
            ]),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn check_prints_summary_for_complete_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("herald.toml");
        std::fs::write(
            &path,
            "[twilio]\naccount_id = \"AC123\"\nauth_token = \"${HERALD_TOKEN}\"\n\
             sender_identity = \"whatsapp:+14155238886\"\n\
             recipient_identity = \"whatsapp:+5215550001111\"\n",
        )
        .unwrap();

        let mut out = Vec::new();
        check(
            Some(&path),
            |name| (name == "HERALD_TOKEN").then(|| "super-secret-token".to_string()),
            &mut out,
        )
        .unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains(&format!("config file        = {}", path.display())));
        assert!(text.contains("recipient_identity = whatsapp:+5215550001111"));
        assert!(!text.contains("super-secret-token"));
    }
}
