//! Command-line interface definitions

pub mod commands;

use clap::{Args, Parser, Subcommand};
use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "leadsync",
    version,
    about = "Synchronize leads with HubSpot contacts, deals and workflows",
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Config file (default: <config dir>/leadsync/config.toml)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Override the HubSpot API base URL
    #[arg(long, global = true, value_name = "URL")]
    pub base_url: Option<String>,

    /// Verify TLS certificates (disabled unless configured)
    #[arg(long, global = true)]
    pub verify_tls: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Interactive console menu
    Menu,
    /// Serve the web form
    Serve(ServeArgs),
    /// Find a contact by email
    Find(FindArgs),
    /// Create a contact, or update the one with the same email
    Upsert(UpsertArgs),
    /// Enroll a contact in a workflow
    Enroll(EnrollArgs),
    /// Create a deal associated with a contact
    Deal(DealArgs),
    /// Create or update every lead in a spreadsheet or CSV file
    Import(ImportArgs),
}

#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Address to listen on
    #[arg(long, default_value = "127.0.0.1:8501")]
    pub bind: SocketAddr,
}

#[derive(Args, Debug)]
pub struct FindArgs {
    pub email: String,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct UpsertArgs {
    #[arg(long)]
    pub email: String,
    #[arg(long, default_value = "")]
    pub first_name: String,
    #[arg(long, default_value = "")]
    pub last_name: String,
    #[arg(long, default_value = "")]
    pub company: String,
    #[arg(long, default_value = "")]
    pub phone: String,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct EnrollArgs {
    pub contact_id: String,
    pub workflow_id: String,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct DealArgs {
    pub contact_id: String,

    /// Deal property as key=value (repeatable)
    #[arg(long = "prop", value_name = "KEY=VALUE")]
    pub properties: Vec<String>,

    /// Require amount > 0 and stage qualifiedtobuy before sending
    #[arg(long)]
    pub enforce_rules: bool,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct ImportArgs {
    /// .xlsx, .xls, .xlsm, .ods or .csv file with First Name, Last Name, Email, Company, Phone columns
    pub file: PathBuf,

    /// Enroll every synced contact in this workflow
    #[arg(long, value_name = "ID")]
    pub workflow: Option<String>,

    /// Validate and list leads without calling HubSpot
    #[arg(long)]
    pub dry_run: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_deal_with_props() {
        let cli = Cli::parse_from([
            "leadsync",
            "--verify-tls",
            "deal",
            "42",
            "--prop",
            "amount=10",
            "--prop",
            "dealstage=qualifiedtobuy",
            "--enforce-rules",
        ]);

        assert!(cli.global.verify_tls);
        match cli.command {
            Commands::Deal(args) => {
                assert_eq!(args.contact_id, "42");
                assert_eq!(args.properties, vec!["amount=10", "dealstage=qualifiedtobuy"]);
                assert!(args.enforce_rules);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_json_flag_on_every_one_shot_command() {
        let cli = Cli::parse_from(["leadsync", "find", "a@x.com", "--json"]);
        assert!(matches!(cli.command, Commands::Find(args) if args.json));

        let cli = Cli::parse_from(["leadsync", "upsert", "--email", "a@x.com", "--json"]);
        assert!(matches!(cli.command, Commands::Upsert(args) if args.json));

        let cli = Cli::parse_from(["leadsync", "enroll", "11", "wf-1", "--json"]);
        assert!(matches!(cli.command, Commands::Enroll(args) if args.json));

        let cli = Cli::parse_from(["leadsync", "deal", "11", "--json"]);
        assert!(matches!(cli.command, Commands::Deal(args) if args.json));

        let cli = Cli::parse_from(["leadsync", "enroll", "11", "wf-1"]);
        assert!(matches!(cli.command, Commands::Enroll(args) if !args.json));
    }

    #[test]
    fn test_format_option_is_not_accepted() {
        assert!(Cli::try_parse_from(["leadsync", "find", "a@x.com", "--format", "json"]).is_err());
    }

    #[test]
    fn test_parse_import_defaults() {
        let cli = Cli::parse_from(["leadsync", "import", "leads.xlsx", "--dry-run"]);
        match cli.command {
            Commands::Import(args) => {
                assert_eq!(args.file, PathBuf::from("leads.xlsx"));
                assert!(args.dry_run);
                assert!(args.workflow.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
