use clap::{Parser, Subcommand};
use hasip_hub::{DispatchOutcome, HubClient, HubError, WebhookEvent};

#[derive(Debug, Parser)]
#[command(name = "hasip-bridge", version, about = "Bridge telephony events to a home-automation hub")]
pub struct Cli {
    /// Path to the TOML config file. Falls back to `HASIP_CONFIG_PATH`, then
    /// `config.toml`.
    #[arg(long, short)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Synthesize a message and print the path of the WAV file.
    Say {
        message: String,
        /// Language passed to the TTS engine. Defaults to the configured one.
        #[arg(long, short)]
        language: Option<String>,
        /// Keep the generated file instead of deleting it on exit.
        #[arg(long)]
        keep: bool,
    },
    /// Call a hub service on an entity, e.g. `service switch toggle switch.door`.
    Service {
        domain: String,
        service: String,
        entity_id: String,
    },
    /// Deliver a webhook event given as JSON, e.g. `{"event":"timeout"}`.
    Event {
        #[arg(value_parser = parse_event)]
        event: WebhookEvent,
    },
}

fn parse_event(raw: &str) -> Result<WebhookEvent, String> {
    serde_json::from_str(raw).map_err(|e| format!("invalid event: {}", e))
}

impl Cli {
    /// Resolves the config path and names where it came from.
    pub fn config_path(&self) -> (String, &'static str) {
        if let Some(path) = self.config.as_deref().filter(|p| !p.trim().is_empty()) {
            return (path.to_string(), "cli-arg");
        }

        if let Ok(path) = std::env::var("HASIP_CONFIG_PATH") {
            if !path.trim().is_empty() {
                return (path, "env-var");
            }
        }

        ("config.toml".to_string(), "default")
    }
}

/// Runs one subcommand against the hub.
pub async fn run(client: &HubClient, command: Command) -> Result<(), HubError> {
    match command {
        Command::Say {
            message,
            language,
            keep,
        } => {
            let audio = client.synthesize(&message, language.as_deref()).await?;
            println!("{}", audio.path.display());
            if audio.owned && !keep {
                audio.release()?;
            }
        }
        Command::Service {
            domain,
            service,
            entity_id,
        } => {
            let outcome = client.call_service(&domain, &service, &entity_id).await?;
            print_outcome(&outcome);
        }
        Command::Event { event } => {
            let outcome = client.trigger_webhook(&event).await?;
            print_outcome(&outcome);
        }
    }
    Ok(())
}

fn print_outcome(outcome: &DispatchOutcome) {
    match outcome {
        DispatchOutcome::Delivered { status, .. } => println!("delivered ({})", status),
        DispatchOutcome::Rejected { status, body } => println!("rejected ({}): {}", status, body),
        DispatchOutcome::Skipped { reason } => println!("skipped: {}", reason),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_service_command() {
        let cli = Cli::parse_from(["hasip-bridge", "service", "switch", "toggle", "switch.door"]);
        match cli.command {
            Command::Service {
                domain,
                service,
                entity_id,
            } => {
                assert_eq!(domain, "switch");
                assert_eq!(service, "toggle");
                assert_eq!(entity_id, "switch.door");
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn parses_event_json() {
        let cli = Cli::parse_from([
            "hasip-bridge",
            "event",
            r#"{"event":"dtmf_digit","caller":"sip:1@h","parsed_caller":"1","digit":"9"}"#,
        ]);
        match cli.command {
            Command::Event { event } => {
                assert_eq!(event, WebhookEvent::dtmf_digit("sip:1@h", Some("1".to_string()), '9'))
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn rejects_unknown_event() {
        let result = Cli::try_parse_from(["hasip-bridge", "event", r#"{"event":"nope"}"#]);
        assert!(result.is_err());
    }

    #[test]
    fn explicit_config_path_wins() {
        let cli = Cli::parse_from(["hasip-bridge", "--config", "/etc/hasip.toml", "say", "hi"]);
        assert_eq!(cli.config_path(), ("/etc/hasip.toml".to_string(), "cli-arg"));
    }
}
