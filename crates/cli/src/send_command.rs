use std::{
    io::Write,
    path::{Path, PathBuf},
};

use {
    anyhow::Result,
    clap::Args,
    herald_channels::Dispatcher,
    herald_common::MessageId,
    herald_config::{DispatchSettings, discover_and_load_with},
    herald_twilio::{TwilioAccount, TwilioClient},
};

pub const DEFAULT_BODY: &str = "¡Hola! Este es un mensaje de prueba desde Twilio.";

#[derive(Args)]
pub struct SendArgs {
    /// Message text. Sent as-is, including when empty.
    #[arg(short, long, default_value = DEFAULT_BODY)]
    pub body: String,

    /// Sender address, overriding the configured sender_identity.
    #[arg(long)]
    pub from: Option<String>,

    /// Recipient address, overriding the configured recipient_identity.
    #[arg(long)]
    pub to: Option<String>,

    /// Config file path (default: ./herald.toml, then ~/.config/herald/).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

pub async fn handle_send(args: SendArgs) -> Result<()> {
    let settings = resolve_settings(args.config.as_deref(), args.from, args.to)?;
    send_and_report(&settings, &args.body, &mut std::io::stdout()).await?;
    Ok(())
}

/// File, then environment, then per-invocation identities.
pub fn resolve_settings(
    config_path: Option<&Path>,
    from: Option<String>,
    to: Option<String>,
) -> Result<DispatchSettings> {
    resolve_settings_with(config_path, from, to, |name| std::env::var(name).ok())
}

pub fn resolve_settings_with(
    config_path: Option<&Path>,
    from: Option<String>,
    to: Option<String>,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<DispatchSettings> {
    let mut config = discover_and_load_with(config_path, lookup)?;
    config.override_identities(from, to);
    Ok(config.resolve()?)
}

/// Submit one message and write its id as a single line to `out`.
/// Nothing is written when the submission fails.
pub async fn send_and_report(
    settings: &DispatchSettings,
    body: &str,
    out: &mut (dyn Write + Send),
) -> Result<MessageId> {
    let dispatcher = Dispatcher::new(TwilioClient::new(TwilioAccount::from(settings)));
    let id = dispatcher
        .send(&settings.sender_identity, &settings.recipient_identity, body)
        .await?;
    writeln!(out, "{id}")?;
    out.flush()?;
    Ok(id)
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        herald_common::SubmissionError,
        mockito::{Matcher, Server},
        secrecy::Secret,
    };

    const PATH: &str = "/2010-04-01/Accounts/AC123/Messages.json";

    fn settings(server: &Server, to: &str) -> DispatchSettings {
        DispatchSettings {
            sender_identity: "whatsapp:+14155238886".into(),
            recipient_identity: to.into(),
            account_id: "AC123".into(),
            auth_token: Secret::new("tok".into()),
            api_base_url: server.url(),
        }
    }

    #[tokio::test]
    async fn prints_message_id_verbatim() {
        let mut server = Server::new_async().await;
        server
            .mock("POST", PATH)
            .with_status(201)
            .with_body(r#"{"sid": "SMabcdef0123456789abcdef0123456789", "status": "queued"}"#)
            .create_async()
            .await;

        let mut out = Vec::new();
        let id = send_and_report(&settings(&server, "whatsapp:+5215550001111"), "hola", &mut out)
            .await
            .unwrap();

        assert_eq!(id.as_str(), "SMabcdef0123456789abcdef0123456789");
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "SMabcdef0123456789abcdef0123456789\n"
        );
    }

    #[tokio::test]
    async fn auth_failure_prints_nothing() {
        let mut server = Server::new_async().await;
        server
            .mock("POST", PATH)
            .with_status(401)
            .with_body(r#"{"code": 20003, "message": "Authenticate", "status": 401}"#)
            .create_async()
            .await;

        let mut out = Vec::new();
        let err = send_and_report(&settings(&server, "whatsapp:+5215550001111"), "hola", &mut out)
            .await
            .unwrap_err();

        assert!(out.is_empty());
        let submission = err.downcast_ref::<SubmissionError>().unwrap();
        assert_eq!(submission.status, Some(401));
    }

    #[tokio::test]
    async fn malformed_recipient_is_submission_failure() {
        let mut server = Server::new_async().await;
        server
            .mock("POST", PATH)
            .match_body(Matcher::UrlEncoded("To".into(), "5215550001111".into()))
            .with_status(400)
            .with_body(r#"{"code": 21211, "message": "Invalid 'To' Phone Number", "status": 400}"#)
            .create_async()
            .await;

        let mut out = Vec::new();
        let err = send_and_report(&settings(&server, "5215550001111"), "hola", &mut out)
            .await
            .unwrap_err();

        assert!(out.is_empty());
        assert!(err.to_string().starts_with("submission failed"));
    }

    #[tokio::test]
    async fn repeated_sends_hit_gateway_each_time() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", PATH)
            .with_status(201)
            .with_body(r#"{"sid": "SM00000000000000000000000000000042"}"#)
            .expect(2)
            .create_async()
            .await;

        let s = settings(&server, "whatsapp:+5215550001111");
        let mut out = Vec::new();
        send_and_report(&s, "same", &mut out).await.unwrap();
        send_and_report(&s, "same", &mut out).await.unwrap();

        mock.assert_async().await;
        assert_eq!(String::from_utf8(out).unwrap().lines().count(), 2);
    }

    #[test]
    fn cli_identities_override_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("herald.toml");
        std::fs::write(
            &path,
            r#"
            [twilio]
            account_id = "AC123"
            auth_token = "tok"
            sender_identity = "whatsapp:+14155238886"
            recipient_identity = "whatsapp:+5215550000000"
            "#,
        )
        .unwrap();

        let settings = resolve_settings_with(
            Some(&path),
            None,
            Some("whatsapp:+5215559999999".into()),
            |_| None,
        )
        .unwrap();
        assert_eq!(settings.recipient_identity, "whatsapp:+5215559999999");
    }

    #[test]
    fn cli_identities_override_env() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("herald.toml");
        std::fs::write(&path, "").unwrap();
        let env = |name: &str| {
            match name {
                "HERALD_ACCOUNT_ID" => Some("ACenv"),
                "HERALD_AUTH_TOKEN" => Some("tok-env"),
                "HERALD_SENDER_IDENTITY" => Some("whatsapp:+10000000000"),
                "HERALD_RECIPIENT_IDENTITY" => Some("whatsapp:+20000000000"),
                _ => None,
            }
            .map(str::to_string)
        };

        let settings = resolve_settings_with(
            Some(&path),
            Some("whatsapp:+14155238886".into()),
            Some("whatsapp:+5215559999999".into()),
            env,
        )
        .unwrap();
        assert_eq!(settings.sender_identity, "whatsapp:+14155238886");
        assert_eq!(settings.recipient_identity, "whatsapp:+5215559999999");
        assert_eq!(settings.account_id, "ACenv");

        // Without flags the environment wins.
        let settings = resolve_settings_with(Some(&path), None, None, env).unwrap();
        assert_eq!(settings.sender_identity, "whatsapp:+10000000000");
        assert_eq!(settings.recipient_identity, "whatsapp:+20000000000");
    }

    #[test]
    fn explicit_missing_config_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.toml");
        assert!(resolve_settings(Some(&missing), None, None).is_err());
    }
}
