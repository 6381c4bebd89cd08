//! CLI structure and command definitions

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use deployctl_core::ResourceKind;

use crate::output::OutputFormat;

/// Manage cloud deployments from the command line
#[derive(Parser, Debug)]
#[command(name = "deployctl")]
#[command(version, about = "Command line client for managing cloud deployments")]
#[command(long_about = "
Command line client for managing cloud deployments

EXAMPLES:
    # Save an API key in a profile
    deployctl profile set prod --api-key $API_KEY

    # Show a deployment as YAML
    deployctl deployment get f1d329b0fb34470ba8b18361cabdd2bc -o yaml

    # Upgrade every resource of a deployment to a new version
    deployctl deployment update f1d329b0fb34470ba8b18361cabdd2bc --version 8.12.0

    # Restart the Kibana instance of a deployment
    deployctl deployment resource restart f1d329b0fb34470ba8b18361cabdd2bc --kind kibana

For more help on a specific command, run:
    deployctl <command> --help
")]
pub struct Cli {
    /// Profile to use for this command
    #[arg(long, short, global = true, env = "DEPLOYCTL_PROFILE")]
    pub profile: Option<String>,

    /// Path to alternate configuration file
    #[arg(long, global = true, env = "DEPLOYCTL_CONFIG_FILE")]
    pub config_file: Option<PathBuf>,

    /// Output format
    #[arg(long, short = 'o', global = true, value_enum, default_value = "json")]
    pub output: OutputFormat,

    /// Enable verbose logging
    #[arg(long, short, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Deployment operations
    #[command(subcommand, visible_alias = "dep")]
    Deployment(DeploymentCommands),

    /// Profile management
    #[command(subcommand, visible_alias = "prof")]
    Profile(ProfileCommands),
}

#[derive(Subcommand, Debug)]
pub enum DeploymentCommands {
    /// List all deployments
    #[command(visible_alias = "ls")]
    List,

    /// Show a deployment, or one of its resources with --kind
    Get {
        /// Deployment ID
        id: String,
        /// Only show the resource of this kind
        #[arg(long, value_enum)]
        kind: Option<ResourceKind>,
        /// RefID of the resource; discovered when omitted
        #[arg(long, requires = "kind")]
        ref_id: Option<String>,
        #[command(flatten)]
        query: QueryArgs,
        /// Enrich the response with the deployment template
        #[arg(long, conflicts_with = "kind")]
        enrich_with_template: bool,
    },

    /// Create a deployment from a JSON payload
    Create {
        /// File holding the create request body
        #[arg(long, short)]
        file: PathBuf,
        /// Idempotency token; a random one is generated when omitted
        #[arg(long)]
        request_id: Option<String>,
        /// Deployment name
        #[arg(long)]
        name: Option<String>,
        #[command(flatten)]
        overrides: OverrideArgs,
        /// Only validate the payload
        #[arg(long)]
        validate_only: bool,
    },

    /// Update a deployment
    ///
    /// Without --file, the current state is fetched and turned into an
    /// update request before the overrides are applied.
    Update {
        /// Deployment ID
        id: String,
        /// File holding the update request body
        #[arg(long, short)]
        file: Option<PathBuf>,
        #[command(flatten)]
        overrides: OverrideArgs,
        /// Skip snapshots of removed Elasticsearch resources
        #[arg(long)]
        skip_snapshot: bool,
        /// Leave pruned resources out of the response
        #[arg(long)]
        hide_pruned_orphans: bool,
        /// Only validate the payload
        #[arg(long)]
        validate_only: bool,
    },

    /// Print the update request equivalent to a deployment's current state
    ShowUpdateRequest {
        /// Deployment ID
        id: String,
    },

    /// Search deployments
    Search {
        /// File holding the search request body; matches everything when omitted
        #[arg(long, short)]
        file: Option<PathBuf>,
    },

    /// Delete a deployment that has been shut down
    Delete {
        /// Deployment ID
        id: String,
    },

    /// Shut down every resource of a deployment
    Shutdown {
        /// Deployment ID
        id: String,
        /// Skip the final snapshot
        #[arg(long)]
        skip_snapshot: bool,
        /// Hide the deployment from listings afterwards
        #[arg(long)]
        hide: bool,
    },

    /// Restore a deployment that has been shut down
    Restore {
        /// Deployment ID
        id: String,
        /// Restore from the latest snapshot
        #[arg(long)]
        restore_snapshot: bool,
    },

    /// Resynchronize the search index of one deployment
    Resync {
        /// Deployment ID
        id: String,
    },

    /// Resynchronize the search index of every deployment
    ResyncAll {
        /// Skip deployments already at the current index version
        #[arg(long)]
        skip_matching_version: bool,
    },

    /// Show the update request needed to move a deployment to another template
    Migrate {
        /// Deployment ID
        id: String,
        /// Target template ID
        #[arg(long)]
        template_id: String,
    },

    /// Act on one resource of a deployment
    #[command(subcommand)]
    Resource(ResourceCommands),

    /// Remote clusters of an Elasticsearch resource
    #[command(subcommand)]
    RemoteClusters(RemoteClusterCommands),

    /// Deployment notes
    #[command(subcommand)]
    Note(NoteCommands),
}

/// Detail flags for get commands
#[derive(Args, Debug, Clone, Default)]
pub struct QueryArgs {
    #[arg(long)]
    pub show_plans: bool,
    #[arg(long)]
    pub show_plan_defaults: bool,
    #[arg(long)]
    pub show_plan_history: bool,
    #[arg(long)]
    pub show_plan_logs: bool,
    #[arg(long)]
    pub show_metadata: bool,
    #[arg(long)]
    pub show_settings: bool,
    #[arg(long)]
    pub convert_legacy_plans: bool,
}

/// Values forced onto a create or update payload
#[derive(Args, Debug, Clone, Default)]
pub struct OverrideArgs {
    /// Region of every resource that has none
    #[arg(long)]
    pub region: Option<String>,
    /// Version of every resource
    #[arg(long = "version", value_name = "VERSION")]
    pub stack_version: Option<String>,
    /// RefID of the Elasticsearch resource
    #[arg(long)]
    pub elasticsearch_ref_id: Option<String>,
    /// Give every resource its canonical RefID
    #[arg(long)]
    pub override_ref_ids: bool,
    /// Built-in plugin to enable with --version; repeatable
    #[arg(long = "plugin", value_name = "PLUGIN", requires = "stack_version")]
    pub plugins: Vec<String>,
}

/// Target of a resource command
#[derive(Args, Debug, Clone)]
pub struct ResourceTarget {
    /// Deployment ID
    pub id: String,
    /// Resource kind
    #[arg(long, value_enum)]
    pub kind: ResourceKind,
    /// RefID of the resource; discovered when omitted
    #[arg(long)]
    pub ref_id: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum ResourceCommands {
    /// Shut down the resource
    Shutdown {
        #[command(flatten)]
        target: ResourceTarget,
        /// Skip the final snapshot
        #[arg(long)]
        skip_snapshot: bool,
        /// Hide the resource afterwards
        #[arg(long)]
        hide: bool,
    },
    /// Start a stopped resource
    Start {
        #[command(flatten)]
        target: ResourceTarget,
    },
    /// Restart the resource
    Restart {
        #[command(flatten)]
        target: ResourceTarget,
        /// Cancel a pending plan first
        #[arg(long)]
        cancel_pending: bool,
    },
    /// Upgrade the resource to the version of its Elasticsearch cluster
    Upgrade {
        #[command(flatten)]
        target: ResourceTarget,
        /// Only validate the upgrade
        #[arg(long)]
        validate_only: bool,
    },
    /// Restore a shut down resource
    Restore {
        #[command(flatten)]
        target: ResourceTarget,
        /// Restore from the latest snapshot
        #[arg(long)]
        restore_snapshot: bool,
    },
    /// Delete a shut down stateless resource
    Delete {
        #[command(flatten)]
        target: ResourceTarget,
    },
}

#[derive(Subcommand, Debug)]
pub enum RemoteClusterCommands {
    /// Show the remote clusters
    Get {
        /// Deployment ID
        id: String,
        /// RefID of the Elasticsearch resource; discovered when omitted
        #[arg(long)]
        ref_id: Option<String>,
    },
    /// Replace the remote clusters with the ones in a JSON file
    Set {
        /// Deployment ID
        id: String,
        /// File holding the remote clusters
        #[arg(long, short)]
        file: PathBuf,
        /// RefID of the Elasticsearch resource; discovered when omitted
        #[arg(long)]
        ref_id: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum NoteCommands {
    /// List notes
    #[command(visible_alias = "ls")]
    List {
        /// Deployment ID
        id: String,
    },
    /// Add a note
    Add {
        /// Deployment ID
        id: String,
        /// Note text
        message: String,
    },
    /// Replace the text of a note
    Update {
        /// Deployment ID
        id: String,
        /// Note ID
        note_id: String,
        /// New note text
        message: String,
        /// Expected note version
        #[arg(long = "note-version")]
        version: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum ProfileCommands {
    /// List all configured profiles
    #[command(visible_alias = "ls")]
    List,

    /// Show the path to the configuration file
    Path,

    /// Show details of a specific profile
    Show {
        /// Profile name
        name: String,
    },

    /// Set or create a profile
    #[command(after_help = "EXAMPLES:
    # API key authentication
    deployctl profile set prod --api-key $API_KEY

    # Basic authentication against a self-hosted endpoint (password prompted)
    deployctl profile set local --host https://ece.local:12443 --username admin --insecure

    # Keep the key in the OS keyring
    deployctl profile set prod --api-key keyring:prod-api-key
")]
    Set {
        /// Profile name
        name: String,
        /// API host
        #[arg(long)]
        host: Option<String>,
        /// API key
        #[arg(long, conflicts_with = "username")]
        api_key: Option<String>,
        /// Username for basic authentication
        #[arg(long, required_unless_present = "api_key")]
        username: Option<String>,
        /// Password for basic authentication; prompted when omitted
        #[arg(long, requires = "username")]
        password: Option<String>,
        /// Skip TLS certificate verification
        #[arg(long)]
        insecure: bool,
        /// Request timeout in seconds
        #[arg(long)]
        timeout_secs: Option<u64>,
        /// Make this the default profile
        #[arg(long)]
        default: bool,
    },

    /// Remove a profile
    #[command(visible_alias = "rm")]
    Remove {
        /// Profile name
        name: String,
    },

    /// Set the default profile
    Default {
        /// Profile name
        name: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_resource_command() {
        let cli = Cli::try_parse_from([
            "deployctl",
            "deployment",
            "resource",
            "restart",
            "f1d329b0fb34470ba8b18361cabdd2bc",
            "--kind",
            "integrations_server",
            "--cancel-pending",
        ])
        .unwrap();

        match cli.command {
            Commands::Deployment(DeploymentCommands::Resource(ResourceCommands::Restart {
                target,
                cancel_pending,
            })) => {
                assert_eq!(target.kind, ResourceKind::IntegrationsServer);
                assert!(cancel_pending);
                assert!(target.ref_id.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn plugins_require_a_version() {
        let err = Cli::try_parse_from([
            "deployctl",
            "deployment",
            "update",
            "f1d329b0fb34470ba8b18361cabdd2bc",
            "--plugin",
            "repository-s3",
        ])
        .unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
    }
}
