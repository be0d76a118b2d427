use clap::{Parser, Subcommand};
use log::info;
use serde_json::{json, Value};
use std::net::IpAddr;
use std::process::ExitCode;
use std::time::Duration;

use elgato_keylight::config::{default_ips, DEFAULT_PORT};
use elgato_keylight::{Config, ElgatoError, KeyLightClient, Result, Status};

#[derive(Parser)]
#[command(name = "keylight", version, about = "Control your Elgato Key Light(s)")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Value to change to, ie. 40 || 600 || _40 || +40
    #[arg(long, global = true, allow_hyphen_values = true)]
    value: Option<String>,

    /// IP addresses, multiple supported
    #[arg(long = "ip", global = true, default_values_t = default_ips())]
    ips: Vec<IpAddr>,

    /// Port to use, single value support only
    #[arg(long, global = true, default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Per request timeout in seconds
    #[arg(long, global = true, default_value_t = 5)]
    timeout: u64,
}

#[derive(Subcommand, Clone, Copy)]
enum Command {
    /// Turn your light(s) on
    On,
    /// Turn your light(s) off
    Off,
    /// Toggle your light(s) on or off
    Toggle,
    /// Display your light(s) information
    Info,
    /// Display your light(s) state information
    State,
    /// Show brightness, or set it to a value or decrement/increment (between 3 and 100)
    Brightness,
    /// Show temperature, or set it to a value or decrement/increment (between 143 and 344)
    Temperature,
}

impl Command {
    /// Only the setters read `--value`; other commands ignore it.
    fn takes_value(self) -> bool {
        matches!(self, Command::Brightness | Command::Temperature)
    }
}

fn to_json(status: Status) -> Result<Value> {
    serde_json::to_value(status).map_err(ElgatoError::EncodeError)
}

async fn run(client: &KeyLightClient, command: Command, set: bool, ip: IpAddr) -> Result<Value> {
    match command {
        Command::On => to_json(client.set_on(ip).await?),
        Command::Off => to_json(client.set_off(ip).await?),
        Command::Toggle => to_json(client.toggle(ip).await?),
        Command::Info => to_json(client.info(ip).await?),
        Command::State => to_json(client.state(ip).await?),
        Command::Brightness if set => to_json(client.set_brightness(ip).await?),
        Command::Brightness => Ok(json!({ "brightness": client.brightness(ip).await? })),
        Command::Temperature if set => to_json(client.set_temperature(ip).await?),
        Command::Temperature => Ok(json!({ "temperature": client.temperature(ip).await? })),
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    pretty_env_logger::init();

    let cli = Cli::parse();
    let config = Config {
        ips: cli.ips,
        port: cli.port,
        timeout: Duration::from_secs(cli.timeout),
    };

    let mut client = match KeyLightClient::new(&config) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let mut failed = false;
    let command = &cli.command;
    if let Some(value) = cli.value.as_deref().filter(|_| command.takes_value()) {
        if let Err(e) = client.set_value(value) {
            eprintln!("{}", e);
            failed = true;
        }
    }
    info!("using {:?} on port {}", client.adjustment(), client.port());

    // A failing light never stops the remaining ones.
    for ip in &config.ips {
        match run(&client, cli.command, cli.value.is_some(), *ip).await {
            Ok(output) => println!("{}", output),
            Err(e) => {
                eprintln!("{}: {}", ip, e);
                failed = true;
            }
        }
    }

    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_only_matters_for_setters() {
        let cli = Cli::try_parse_from(["keylight", "on", "--value", "abc"]).unwrap();
        assert_eq!(cli.value.as_deref(), Some("abc"));
        assert!(!cli.command.takes_value());

        let cli = Cli::try_parse_from(["keylight", "brightness", "--value", "_40"]).unwrap();
        assert!(cli.command.takes_value());
        assert_eq!(cli.ips, default_ips());
        assert_eq!(cli.port, DEFAULT_PORT);
    }

    #[test]
    fn accepts_repeated_ips_and_negative_values() {
        let cli = Cli::try_parse_from([
            "keylight",
            "temperature",
            "--ip",
            "192.168.1.20",
            "--ip",
            "192.168.1.21",
            "--value",
            "-7",
        ])
        .unwrap();
        assert_eq!(cli.ips.len(), 2);
        assert_eq!(cli.value.as_deref(), Some("-7"));
    }
}
