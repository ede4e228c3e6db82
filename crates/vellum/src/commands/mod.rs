//! Command dispatch: one provider call per invocation.

use std::path::Path;

use serde_json::{Map, Value};
use tracing::debug;

use vellum_core::{CallContext, ManagedDataSource, ManagedResource, Provider, Response};

use crate::cli::{ApplyArgs, Command, GlobalOpts, ImportArgs, LookupArgs, StateArgs, ValidateArgs};
use crate::error::CliError;
use crate::output;

/// Commands that never contact Vellum.
pub fn dispatch_offline(cmd: &Command, global: &GlobalOpts) -> Option<Result<(), CliError>> {
    match cmd {
        Command::Schema => Some(schema(global)),
        Command::Validate(args) => Some(validate(args, global)),
        _ => None,
    }
}

pub async fn dispatch(
    cmd: Command,
    provider: &Provider,
    ctx: &CallContext,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    debug!(command = ?cmd, "dispatching command");

    let response = match cmd {
        Command::Apply(args) => apply(provider, ctx, args).await?,
        Command::Read(args) => read(provider, ctx, &args).await?,
        Command::Import(args) => import(provider, ctx, &args).await?,
        Command::Destroy(args) => destroy(provider, ctx, &args).await?,
        Command::Lookup(args) => lookup(provider, ctx, args).await?,
        Command::Schema | Command::Validate(_) => return Ok(()),
    };

    report(&response, global)
}

// ── Offline ──────────────────────────────────────────────────────────

fn schema(global: &GlobalOpts) -> Result<(), CliError> {
    let provider = Provider::offline()?;
    output::print_output(&output::render(global.output, &provider.schema())?);
    Ok(())
}

fn validate(args: &ValidateArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let provider = Provider::offline()?;
    let document = read_document(&args.file)?;

    let diagnostics = if args.data_source {
        data_source(&provider, &args.type_name)?.validate(&document)
    } else {
        resource(&provider, &args.type_name)?.validate(&document)
    };

    report(
        &Response {
            state: None,
            diagnostics,
        },
        global,
    )
}

// ── Lifecycle ────────────────────────────────────────────────────────

async fn apply(
    provider: &Provider,
    ctx: &CallContext,
    args: ApplyArgs,
) -> Result<Response, CliError> {
    let resource = resource(provider, &args.type_name)?;
    let planned = read_document(&args.plan)?;

    Ok(match args.state {
        Some(path) => {
            let prior = read_document(&path)?;
            resource.update(ctx, planned, prior).await
        }
        None => resource.create(ctx, planned).await,
    })
}

async fn read(
    provider: &Provider,
    ctx: &CallContext,
    args: &StateArgs,
) -> Result<Response, CliError> {
    let resource = resource(provider, &args.type_name)?;
    let prior = read_document(&args.state)?;
    Ok(resource.read(ctx, prior).await)
}

async fn import(
    provider: &Provider,
    ctx: &CallContext,
    args: &ImportArgs,
) -> Result<Response, CliError> {
    let resource = resource(provider, &args.type_name)?;
    Ok(resource.import(ctx, &args.id).await)
}

async fn destroy(
    provider: &Provider,
    ctx: &CallContext,
    args: &StateArgs,
) -> Result<Response, CliError> {
    let resource = resource(provider, &args.type_name)?;
    let prior = read_document(&args.state)?;
    Ok(resource.delete(ctx, prior).await)
}

async fn lookup(
    provider: &Provider,
    ctx: &CallContext,
    args: LookupArgs,
) -> Result<Response, CliError> {
    let data_source = data_source(provider, &args.type_name)?;

    let mut config = Map::new();
    if let Some(id) = args.id {
        config.insert("id".into(), Value::String(id));
    }
    if let Some(name) = args.name {
        config.insert("name".into(), Value::String(name));
    }
    Ok(data_source.read(ctx, Value::Object(config)).await)
}

// ── Helpers ──────────────────────────────────────────────────────────

fn resource<'a>(provider: &'a Provider, name: &str) -> Result<&'a dyn ManagedResource, CliError> {
    provider.resource(name).ok_or_else(|| CliError::UnknownType {
        kind: "resource",
        name: name.to_owned(),
        available: provider.resource_types().collect::<Vec<_>>().join(", "),
    })
}

fn data_source<'a>(
    provider: &'a Provider,
    name: &str,
) -> Result<&'a dyn ManagedDataSource, CliError> {
    provider.data_source(name).ok_or_else(|| CliError::UnknownType {
        kind: "data source",
        name: name.to_owned(),
        available: provider.data_source_types().collect::<Vec<_>>().join(", "),
    })
}

/// Parse a JSON or YAML document; JSON is read as YAML.
fn read_document(path: &Path) -> Result<Value, CliError> {
    let text = std::fs::read_to_string(path).map_err(|source| CliError::Io {
        path: path.display().to_string(),
        source,
    })?;
    serde_yaml::from_str(&text).map_err(|e| CliError::Document {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}

/// Print the response; error diagnostics fail the command.
fn report(response: &Response, global: &GlobalOpts) -> Result<(), CliError> {
    output::print_output(&output::render(global.output, response)?);

    let count = response.diagnostics.errors().count();
    if count > 0 {
        return Err(CliError::Failed { count });
    }
    Ok(())
}
