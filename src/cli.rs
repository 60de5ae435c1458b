use anyhow::{bail, Result};

use crate::model::ticket::DeploymentTicket;
use crate::sync::{LoadStatus, TicketSync};
use crate::util::format::{format_status, format_timestamp, pluralize};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Dashboard,
    List { all: bool },
    Help,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliArgs {
    pub command: Command,
    pub base_url: Option<String>,
}

/// Parse process arguments (without the program name).
///
/// Supported forms:
///   tickets
///   tickets list [--all]
///   tickets [--api-base-url <url>] ...
///   tickets help | --help | -h
pub fn parse_args(args: &[String]) -> Result<CliArgs> {
    let mut command = None;
    let mut all = false;
    let mut base_url = None;
    let mut i = 0;

    while i < args.len() {
        match args[i].as_str() {
            "--api-base-url" => {
                i += 1;
                match args.get(i) {
                    Some(url) => base_url = Some(url.clone()),
                    None => bail!("Missing value for --api-base-url"),
                }
            }
            "--all" | "-a" => all = true,
            "help" | "--help" | "-h" => command = Some(Command::Help),
            "list" | "ls" => {
                if command.is_none() {
                    command = Some(Command::List { all: false });
                }
            }
            other => bail!("Unknown argument: {other}\n\nRun `tickets help` for usage."),
        }
        i += 1;
    }

    let command = match command {
        Some(Command::List { .. }) => Command::List { all },
        Some(cmd) => cmd,
        None if all => bail!("--all only applies to `tickets list`"),
        None => Command::Dashboard,
    };

    Ok(CliArgs { command, base_url })
}

/// Load once and print the tickets as plain text.
pub async fn handle_list(sync: &TicketSync, base_url: &str, all: bool) -> Result<()> {
    sync.load().await;
    let snapshot = sync.snapshot();

    if snapshot.status == LoadStatus::Error {
        let err = snapshot.error.unwrap_or_default();
        bail!("{err} (backend: {base_url})");
    }

    let active = snapshot.active_tickets();
    let shown: Vec<&DeploymentTicket> = if all {
        snapshot.tickets.iter().collect()
    } else {
        active.clone()
    };

    println!(
        "{} · monitoring {}",
        pluralize(active.len(), "active ticket"),
        pluralize(snapshot.tickets.len(), "total ticket")
    );
    print!("{}", format_plain(&shown));
    Ok(())
}

pub fn format_plain(tickets: &[&DeploymentTicket]) -> String {
    let mut out = String::new();
    for ticket in tickets {
        out.push_str(&format!(
            "\n{}  [{}]\n  Requested by {} · Workspace {}\n  Stage: {} · Env: {} · Updated: {}\n",
            ticket.title(),
            format_status(ticket.status),
            ticket.requested_by,
            ticket.terraform_workspace,
            ticket.current_stage,
            ticket.environment,
            format_timestamp(&ticket.updated_at),
        ));
    }
    out
}

pub fn print_help() {
    println!("tickets — terminal dashboard for deployment tickets\n");
    println!("USAGE:");
    println!("  tickets                 Launch the TUI dashboard");
    println!("  tickets list [--all]    Print active tickets (or all with --all) and exit");
    println!();
    println!("OPTIONS:");
    println!("  --api-base-url <url>    Backend base URL (default http://localhost:8000)");
    println!();
    println!("ENVIRONMENT:");
    println!("  TICKETS_API_BASE_URL    Backend base URL, used when the flag is absent");
    println!("  TICKETS_LOG             Log filter, e.g. debug or tickets=trace");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ticket::{sample_ticket, TicketStatus};

    fn args(strs: &[&str]) -> Vec<String> {
        strs.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn no_args_launches_dashboard() {
        let parsed = parse_args(&args(&[])).unwrap();
        assert_eq!(parsed.command, Command::Dashboard);
        assert_eq!(parsed.base_url, None);
    }

    #[test]
    fn list_with_all_flag() {
        let parsed = parse_args(&args(&["list", "--all"])).unwrap();
        assert_eq!(parsed.command, Command::List { all: true });

        let parsed = parse_args(&args(&["ls"])).unwrap();
        assert_eq!(parsed.command, Command::List { all: false });
    }

    #[test]
    fn base_url_flag_anywhere() {
        let parsed =
            parse_args(&args(&["--api-base-url", "http://example.com/", "list"])).unwrap();
        assert_eq!(parsed.command, Command::List { all: false });
        assert_eq!(parsed.base_url.as_deref(), Some("http://example.com/"));

        let parsed = parse_args(&args(&["--api-base-url", "http://x"])).unwrap();
        assert_eq!(parsed.command, Command::Dashboard);
    }

    #[test]
    fn missing_base_url_value_fails() {
        let err = parse_args(&args(&["--api-base-url"])).unwrap_err();
        assert!(err.to_string().contains("Missing value"));
    }

    #[test]
    fn all_without_list_fails() {
        assert!(parse_args(&args(&["--all"])).is_err());
    }

    #[test]
    fn unknown_argument_fails() {
        let err = parse_args(&args(&["deploy"])).unwrap_err();
        assert!(err.to_string().contains("Unknown argument: deploy"));
    }

    #[test]
    fn help_wins() {
        assert_eq!(
            parse_args(&args(&["list", "--help"])).unwrap().command,
            Command::Help
        );
    }

    #[test]
    fn plain_output_uses_title_and_status_label() {
        let mut ticket = sample_ticket("TCK-3", TicketStatus::PlanPending);
        ticket.intent_summary.clear();
        let out = format_plain(&[&ticket]);
        assert!(out.contains("TCK-3  [plan pending]"));
        assert!(out.contains("Requested by alice@example.com · Workspace homelab"));
        assert!(out.contains("Stage: planning · Env: dev"));
    }
}
