//! Shared test helpers for configuration tests.

use ortho_config::MergeComposer;
use serde_json::Value;

use crate::PushReviewConfig;

/// Applies a configuration layer to the composer based on the layer type.
pub fn apply_layer(composer: &mut MergeComposer, layer_type: &str, value: Value) {
    match layer_type {
        "defaults" => composer.push_defaults(value),
        "file" => composer.push_file(value, None),
        "environment" => composer.push_environment(value),
        _ => panic!("unknown layer type: {layer_type}"),
    }
}

/// Composes a [`PushReviewConfig`] from `(layer_type, value)` pairs.
pub fn build_config_from_layers(layers: &[(&str, Value)]) -> PushReviewConfig {
    let mut composer = MergeComposer::new();

    for (layer_type, value) in layers {
        apply_layer(&mut composer, layer_type, value.clone());
    }

    PushReviewConfig::merge_from_layers(composer.layers()).expect("merge should succeed")
}
