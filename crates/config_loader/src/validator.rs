//! Configuration validation
//!
//! Rules:
//! - filter.threshold >= 0
//! - sqlite stores need a path
//! - sink name non-empty
//! - file sinks need `params.path`

use contracts::{ContractError, Decimal, PipelineBlueprint, SinkType, StoreType};

/// Validate a PipelineBlueprint
///
/// Returns the first error encountered, or Ok(()).
pub fn validate(blueprint: &PipelineBlueprint) -> Result<(), ContractError> {
    validate_store(blueprint)?;
    validate_filter(blueprint)?;
    validate_sink(blueprint)?;
    Ok(())
}

fn validate_store(blueprint: &PipelineBlueprint) -> Result<(), ContractError> {
    let store = &blueprint.store;

    if store.store_type == StoreType::Sqlite {
        let has_path = store
            .path
            .as_ref()
            .is_some_and(|p| !p.as_os_str().is_empty());
        if !has_path {
            return Err(ContractError::config_validation(
                "store.path",
                "sqlite store requires a database path",
            ));
        }
    }
    Ok(())
}

fn validate_filter(blueprint: &PipelineBlueprint) -> Result<(), ContractError> {
    let threshold = blueprint.filter.threshold;
    if threshold < Decimal::ZERO {
        return Err(ContractError::config_validation(
            "filter.threshold",
            format!("threshold must be >= 0, got {threshold}"),
        ));
    }
    Ok(())
}

fn validate_sink(blueprint: &PipelineBlueprint) -> Result<(), ContractError> {
    let sink = &blueprint.sink;

    if sink.name.trim().is_empty() {
        return Err(ContractError::config_validation(
            "sink.name",
            "sink name cannot be empty",
        ));
    }

    if sink.sink_type == SinkType::File
        && sink.params.get("path").is_none_or(|p| p.trim().is_empty())
    {
        return Err(ContractError::config_validation(
            format!("sink[{}].params.path", sink.name),
            "file sink requires a 'path' parameter",
        ));
    }
    Ok(())
}
