use std::io::{IsTerminal, Write};
use std::time::{SystemTime, UNIX_EPOCH};

use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use ircprims_frame::Message;
use serde::Serialize;

#[derive(Clone, Debug, Copy, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Pretty,
    Raw,
}

impl OutputFormat {
    pub fn default_for_stdout() -> Self {
        if std::io::stdout().is_terminal() {
            Self::Pretty
        } else {
            Self::Json
        }
    }
}

#[derive(Serialize)]
struct MessageOutput<'a> {
    command: &'a str,
    command_name: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    origin: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    user: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    host: Option<&'a str>,
    arguments: &'a [String],
    #[serde(skip_serializing_if = "Option::is_none")]
    raw: Option<&'a str>,
    timestamp: String,
}

impl<'a> MessageOutput<'a> {
    fn new(message: &'a Message) -> Self {
        Self {
            command: &message.command,
            command_name: message.command_name(),
            origin: message.origin.as_deref(),
            user: message.user.as_deref(),
            host: message.host.as_deref(),
            arguments: &message.arguments,
            raw: message.raw.as_deref(),
            timestamp: now_unix_seconds(),
        }
    }
}

pub fn print_message(message: &Message, format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string(&MessageOutput::new(message))
                    .unwrap_or_else(|_| "{}".to_string())
            );
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["ORIGIN", "COMMAND", "NAME", "ARGUMENTS"])
                .add_row(vec![
                    prefix(message),
                    message.command.clone(),
                    message.command_name().unwrap_or("-").to_string(),
                    message.arguments.join(" | "),
                ]);
            println!("{table}");
        }
        OutputFormat::Pretty => println!("{}", pretty(message)),
        OutputFormat::Raw => print_raw(message),
    }
}

pub fn print_raw(message: &Message) {
    let line = match message.raw.as_deref() {
        Some(raw) if !raw.is_empty() => raw.to_string(),
        _ => message.serialize().unwrap_or_default(),
    };
    let mut out = std::io::stdout();
    let _ = writeln!(out, "{line}");
    let _ = out.flush();
}

fn pretty(message: &Message) -> String {
    let origin = message.origin.as_deref().unwrap_or("*");
    match (message.command.as_str(), message.arguments.as_slice()) {
        ("PRIVMSG", [target, text]) => format!("[{target}] <{origin}> {text}"),
        ("NOTICE", [target, text]) => format!("[{target}] -{origin}- {text}"),
        _ => {
            let name = match message.command_name() {
                Some(name) => name,
                None => message.command.as_str(),
            };
            format!("{origin} {name} {}", message.arguments.join(" "))
                .trim_end()
                .to_string()
        }
    }
}

fn prefix(message: &Message) -> String {
    let mut prefix = message.origin.clone().unwrap_or_default();
    if let Some(user) = &message.user {
        prefix.push('!');
        prefix.push_str(user);
    }
    if let Some(host) = &message.host {
        prefix.push('@');
        prefix.push_str(host);
    }
    prefix
}

fn now_unix_seconds() -> String {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs().to_string())
        .unwrap_or_else(|_| "0".to_string())
}
