//! Handlers for `deployctl deployment`

use std::path::Path;

use deployctl_core::DeploymentApi;
use deployctl_core::deployments::{
    self, AddNoteParams, CreateParams, DeleteParams, GetParams, GetResourceParams,
    GetRemoteClustersParams, ListParams, MigrateParams, NotesParams, PayloadOverrides,
    QueryParams, ResourceParams, RestoreParams, ResyncAllParams, ResyncParams, SearchParams,
    ShutdownParams, UpdateNoteParams, UpdateParams, UpdateRemoteClustersParams,
};
use deployctl_core::models::{
    DeploymentCreateRequest, DeploymentUpdateRequest, RemoteResources, SearchRequest,
};
use serde::de::DeserializeOwned;
use tracing::{debug, info};

use crate::cli::{
    DeploymentCommands, NoteCommands, OverrideArgs, QueryArgs, RemoteClusterCommands,
    ResourceCommands, ResourceTarget,
};
use crate::error::{CliError, Result};
use crate::output::{OutputFormat, print_output};

pub async fn handle_deployment_command(
    command: &DeploymentCommands,
    api: &DeploymentApi,
    output: OutputFormat,
) -> Result<()> {
    match command {
        DeploymentCommands::List => {
            let deployments = deployments::list(&ListParams::new(api)).await?;
            print_output(&deployments, output)
        }
        DeploymentCommands::Get {
            id,
            kind,
            ref_id,
            query,
            enrich_with_template,
        } => {
            if let Some(kind) = kind {
                let mut params = GetResourceParams::new(api, id.as_str())
                    .with_kind(*kind)
                    .with_query(query_params(query));
                if let Some(ref_id) = ref_id {
                    params = params.with_ref_id(ref_id.as_str());
                }
                print_output(&deployments::get_resource(&params).await?, output)
            } else {
                let params = GetParams::new(api, id.as_str())
                    .with_query(query_params(query))
                    .enrich_with_template(*enrich_with_template);
                print_output(&deployments::get(&params).await?, output)
            }
        }
        DeploymentCommands::Create {
            file,
            request_id,
            name,
            overrides,
            validate_only,
        } => {
            let request: DeploymentCreateRequest = read_json_file(file)?;
            let request_id = deployments::request_id(request_id.as_deref());
            info!("Creating deployment with request id {}", request_id);

            let mut payload_overrides = payload_overrides(overrides);
            if let Some(name) = name {
                payload_overrides = payload_overrides.with_name(name.as_str());
            }
            let params = CreateParams::new(api, request)
                .with_request_id(request_id)
                .with_overrides(payload_overrides)
                .validate_only(*validate_only);
            let response = deployments::create(&params).await?;
            print_output(&response.body, output)
        }
        DeploymentCommands::Update {
            id,
            file,
            overrides,
            skip_snapshot,
            hide_pruned_orphans,
            validate_only,
        } => {
            let request = match file {
                Some(file) => read_json_file(file)?,
                None => current_update_request(api, id).await?,
            };
            let params = UpdateParams::new(api, id.as_str(), request)
                .with_overrides(payload_overrides(overrides))
                .skip_snapshot(*skip_snapshot)
                .hide_pruned_orphans(*hide_pruned_orphans)
                .validate_only(*validate_only);
            let response = deployments::update(&params).await?;
            print_output(&response.body, output)
        }
        DeploymentCommands::ShowUpdateRequest { id } => {
            print_output(&current_update_request(api, id).await?, output)
        }
        DeploymentCommands::Search { file } => {
            let request: SearchRequest = match file {
                Some(file) => read_json_file(file)?,
                None => SearchRequest::match_all(),
            };
            let response = deployments::search(&SearchParams::new(api, request)).await?;
            print_output(&response, output)
        }
        DeploymentCommands::Delete { id } => {
            let response = deployments::delete(&DeleteParams::new(api, id.as_str())).await?;
            print_output(&response, output)
        }
        DeploymentCommands::Shutdown {
            id,
            skip_snapshot,
            hide,
        } => {
            let params = ShutdownParams::new(api, id.as_str())
                .skip_snapshot(*skip_snapshot)
                .hide(*hide);
            print_output(&deployments::shutdown(&params).await?, output)
        }
        DeploymentCommands::Restore {
            id,
            restore_snapshot,
        } => {
            let params = RestoreParams::new(api, id.as_str()).restore_snapshot(*restore_snapshot);
            print_output(&deployments::restore(&params).await?, output)
        }
        DeploymentCommands::Resync { id } => {
            let results = deployments::resync(&ResyncParams::new(api, id.as_str())).await?;
            print_output(&results, output)
        }
        DeploymentCommands::ResyncAll {
            skip_matching_version,
        } => {
            let params = ResyncAllParams::new(api).skip_matching_version(*skip_matching_version);
            print_output(&deployments::resync_all(&params).await?, output)
        }
        DeploymentCommands::Migrate { id, template_id } => {
            let params = MigrateParams::new(api, id.as_str(), template_id.as_str());
            print_output(&deployments::migrate(&params).await?, output)
        }
        DeploymentCommands::Resource(command) => handle_resource_command(command, api, output).await,
        DeploymentCommands::RemoteClusters(command) => {
            handle_remote_cluster_command(command, api, output).await
        }
        DeploymentCommands::Note(command) => handle_note_command(command, api, output).await,
    }
}

async fn handle_resource_command(
    command: &ResourceCommands,
    api: &DeploymentApi,
    output: OutputFormat,
) -> Result<()> {
    match command {
        ResourceCommands::Shutdown {
            target,
            skip_snapshot,
            hide,
        } => {
            let params = resource_params(api, target)
                .skip_snapshot(*skip_snapshot)
                .hide(*hide);
            print_output(&deployments::shutdown_resource(&params).await?, output)
        }
        ResourceCommands::Start { target } => {
            let params = resource_params(api, target);
            print_output(&deployments::start_resource(&params).await?, output)
        }
        ResourceCommands::Restart {
            target,
            cancel_pending,
        } => {
            let params = resource_params(api, target).cancel_pending(*cancel_pending);
            print_output(&deployments::restart_resource(&params).await?, output)
        }
        ResourceCommands::Upgrade {
            target,
            validate_only,
        } => {
            let params = resource_params(api, target).validate_only(*validate_only);
            print_output(&deployments::upgrade_resource(&params).await?, output)
        }
        ResourceCommands::Restore {
            target,
            restore_snapshot,
        } => {
            let params = resource_params(api, target).restore_snapshot(*restore_snapshot);
            print_output(&deployments::restore_resource(&params).await?, output)
        }
        ResourceCommands::Delete { target } => {
            let params = resource_params(api, target);
            print_output(&deployments::delete_resource(&params).await?, output)
        }
    }
}

async fn handle_remote_cluster_command(
    command: &RemoteClusterCommands,
    api: &DeploymentApi,
    output: OutputFormat,
) -> Result<()> {
    match command {
        RemoteClusterCommands::Get { id, ref_id } => {
            let mut params = GetRemoteClustersParams::new(api, id.as_str());
            if let Some(ref_id) = ref_id {
                params = params.with_ref_id(ref_id.as_str());
            }
            print_output(&deployments::get_remote_clusters(&params).await?, output)
        }
        RemoteClusterCommands::Set { id, file, ref_id } => {
            let remotes: RemoteResources = read_json_file(file)?;
            let count = remotes.resources.len();
            let mut params = UpdateRemoteClustersParams::new(api, id.as_str(), remotes);
            if let Some(ref_id) = ref_id {
                params = params.with_ref_id(ref_id.as_str());
            }
            deployments::update_remote_clusters(&params).await?;
            print_output(
                &serde_json::json!({ "deployment_id": id, "remote_clusters": count }),
                output,
            )
        }
    }
}

async fn handle_note_command(
    command: &NoteCommands,
    api: &DeploymentApi,
    output: OutputFormat,
) -> Result<()> {
    match command {
        NoteCommands::List { id } => {
            let notes = deployments::list_notes(&NotesParams::new(api, id.as_str())).await?;
            print_output(&notes, output)
        }
        NoteCommands::Add { id, message } => {
            let notes =
                deployments::add_note(&AddNoteParams::new(api, id.as_str(), message.as_str()))
                    .await?;
            print_output(&notes, output)
        }
        NoteCommands::Update {
            id,
            note_id,
            message,
            version,
        } => {
            let mut params =
                UpdateNoteParams::new(api, id.as_str(), note_id.as_str(), message.as_str());
            if let Some(version) = version {
                params = params.with_version(version.as_str());
            }
            print_output(&deployments::update_note(&params).await?, output)
        }
    }
}

/// Fetch a deployment and translate it into an update request
async fn current_update_request(api: &DeploymentApi, id: &str) -> Result<DeploymentUpdateRequest> {
    let params = GetParams::new(api, id).with_query(QueryParams::for_update());
    let current = deployments::get(&params).await?;
    deployments::new_update_request(Some(&current)).ok_or_else(|| CliError::InvalidInput {
        message: format!("deployment {} could not be translated into an update", id),
    })
}

fn resource_params<'a>(api: &'a DeploymentApi, target: &ResourceTarget) -> ResourceParams<'a> {
    let params = ResourceParams::new(api, target.id.as_str(), target.kind);
    match &target.ref_id {
        Some(ref_id) => params.with_ref_id(ref_id.as_str()),
        None => params,
    }
}

fn query_params(args: &QueryArgs) -> QueryParams {
    QueryParams {
        show_plans: args.show_plans,
        show_plan_defaults: args.show_plan_defaults,
        show_plan_history: args.show_plan_history,
        show_plan_logs: args.show_plan_logs,
        show_metadata: args.show_metadata,
        show_settings: args.show_settings,
        convert_legacy_plans: args.convert_legacy_plans,
    }
}

fn payload_overrides(args: &OverrideArgs) -> PayloadOverrides {
    let mut overrides = PayloadOverrides::new().with_override_ref_ids(args.override_ref_ids);
    if let Some(region) = &args.region {
        overrides = overrides.with_region(region.as_str());
    }
    if let Some(version) = &args.stack_version {
        overrides = overrides.with_version(version.as_str());
    }
    if let Some(ref_id) = &args.elasticsearch_ref_id {
        overrides = overrides.with_elasticsearch_ref_id(ref_id.as_str());
    }
    if !args.plugins.is_empty() {
        overrides = overrides.with_builtin_plugins(args.plugins.clone());
    }
    overrides
}

fn read_json_file<T: DeserializeOwned>(path: &Path) -> Result<T> {
    debug!("Reading request body from {:?}", path);
    let file_error = |message: String| CliError::FileError {
        path: path.display().to_string(),
        message,
    };
    let content = std::fs::read_to_string(path).map_err(|e| file_error(e.to_string()))?;
    serde_json::from_str(&content).map_err(|e| file_error(format!("invalid JSON: {}", e)))
}
