//! Command implementations
//!
//! Every offline command runs the same application services the server
//! uses and renders the answer as pretty JSON (or TOML/text where noted).

use std::path::Path;

use anyhow::{Context, Result, bail};
use application::{AuthorizationService, PlacementService, RequestContext};
use domain::policy::{GRANTS, Grant};
use domain::{Action, Boundary, Principal, Resource, ResourceKind, Role};
use infrastructure::AppConfig;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::debug;

use crate::cli::{BoundaryCommand, PlacementCommand};
use crate::geojson;

/// Read a JSON argument: inline text, or `@path` to read a file
pub fn read_json<T: DeserializeOwned>(arg: &str, what: &str) -> Result<T> {
    let text = match arg.strip_prefix('@') {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {what} from {path}"))?,
        None => arg.to_string(),
    };
    serde_json::from_str(&text).with_context(|| format!("Invalid {what} JSON"))
}

/// Explicit file when given, otherwise `./config.toml` if present plus the environment
pub fn load_config(path: Option<&Path>) -> Result<AppConfig> {
    let config = match path {
        Some(path) => AppConfig::load_from(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => AppConfig::load().context("Failed to load config")?,
    };
    Ok(config)
}

fn placement_service(config: &AppConfig) -> Result<PlacementService> {
    let rules = config
        .placement
        .location_rules()
        .context("Invalid placement configuration")?;
    Ok(PlacementService::new(rules))
}

fn pretty<T: Serialize>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

pub fn authorize(principal: &str, resource: &str, action: Action) -> Result<String> {
    let principal: Principal = read_json(principal, "principal")?;
    let resource: Resource = read_json(resource, "resource")?;

    let decision =
        AuthorizationService::new().authorize(&RequestContext::new(), &principal, &resource, action);

    pretty(&json!({
        "allowed": decision.allowed,
        "reason": decision.reason,
        "integrityFault": decision.is_integrity_fault(),
    }))
}

pub fn scope(principal: &str, kind: ResourceKind) -> Result<String> {
    let principal: Principal = read_json(principal, "principal")?;
    let report = AuthorizationService::new().scope(&RequestContext::new(), &principal, kind);
    pretty(&report)
}

pub fn visible(principal: &str, resources: &str) -> Result<String> {
    let principal: Principal = read_json(principal, "principal")?;
    let resources: Vec<Resource> = read_json(resources, "resources")?;

    let visible = AuthorizationService::new().visible(&RequestContext::new(), &principal, &resources);
    debug!(total = resources.len(), visible = visible.len(), "Filtered");

    pretty(&json!({ "total": resources.len(), "visible": visible }))
}

pub fn placement(config: &AppConfig, command: PlacementCommand) -> Result<String> {
    let service = placement_service(config)?;
    let result = match command {
        PlacementCommand::Plant {
            point,
            plot_center,
            plot_size,
        } => service.validate_plant(point, plot_center, plot_size)?,
        PlacementCommand::Plot {
            point,
            domain_center,
            plot_sizes,
        } => {
            let sizes: Vec<Option<f64>> = plot_sizes.into_iter().map(Some).collect();
            service.validate_plot(point, domain_center, &sizes)?
        },
        PlacementCommand::Domain { point } => service.validate_domain(point)?,
    };
    pretty(&result)
}

pub fn boundary(config: &AppConfig, command: BoundaryCommand, as_geojson: bool) -> Result<String> {
    let service = placement_service(config)?;
    let boundary: Boundary = match command {
        BoundaryCommand::Plot { center, size } => service.plot_boundary(center, size)?,
        BoundaryCommand::Domain { center, plot_sizes } => {
            let sizes: Vec<Option<f64>> = plot_sizes.into_iter().map(Some).collect();
            service.domain_boundary(center, &sizes)?
        },
        BoundaryCommand::Region => service.region_boundary()?,
    };

    if as_geojson {
        pretty(&geojson::feature(&boundary))
    } else {
        pretty(&boundary)
    }
}

/// One line per grant row, optionally for a single role
pub fn grants(role: Option<Role>) -> String {
    let mut out = String::new();
    if role.is_none_or(|role| role == Role::SuperAdmin) {
        out.push_str("super_admin      everything (checked before the table)\n");
    }
    for grant in GRANTS.iter().filter(|g| role.is_none_or(|role| g.role == role)) {
        out.push_str(&grant_line(grant));
        out.push('\n');
    }
    out
}

fn grant_line(grant: &Grant) -> String {
    let actions: Vec<&str> = grant.actions.iter().map(Action::as_str).collect();
    let kinds: Vec<&str> = grant.kinds.iter().map(ResourceKind::as_str).collect();
    let scope = serde_json::to_value(grant.scope)
        .ok()
        .and_then(|v| v.as_str().map(str::to_string))
        .unwrap_or_default();
    format!(
        "{:<16} {:<28} on {:<44} scope={scope}",
        grant.role.as_str(),
        actions.join(","),
        kinds.join(","),
    )
}

/// Effective configuration after file and environment layering
pub fn config(config: &AppConfig) -> Result<String> {
    config.to_toml().context("Failed to render config as TOML")
}

/// Fetch `/ready` and fail when the server reports unhealthy
pub async fn status(client: &reqwest::Client, url: &str) -> Result<String> {
    let endpoint = endpoint_url(url, "/ready");
    let response = client
        .get(&endpoint)
        .send()
        .await
        .with_context(|| format!("Failed to reach {endpoint}"))?;

    let code = response.status();
    let body = response.json::<serde_json::Value>().await?;
    let rendered = pretty(&body)?;

    if !code.is_success() {
        bail!("Server not ready (HTTP {code}):\n{rendered}");
    }
    Ok(rendered)
}

/// Join a base URL and a path, tolerating a trailing slash on the base
pub fn endpoint_url(base_url: &str, path: &str) -> String {
    format!("{}{path}", base_url.trim_end_matches('/'))
}
