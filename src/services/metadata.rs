//! Genome metadata cleanup for tooltips, and the tree node map.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::api::GenomeId;
use crate::resources::model::{MetadataMap, StatsFile};

/// One displayable metadata field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataField {
    pub name: String,
    pub value: String,
}

/// Cleaned metadata for one genome, in resource field order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenomeMetadata {
    pub genome_id: GenomeId,
    /// "GISAID:" for EPI accessions, empty otherwise.
    pub source_label: String,
    pub fields: Vec<MetadataField>,
}

/// Rendered-node id to genome accession, the lookup a tree front end
/// uses instead of parsing identifiers out of markup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeNodeMap {
    pub nodes: BTreeMap<String, String>,
}

/// Clean one genome's metadata for display. Placeholder values ("?",
/// "Unknown", empty, null, zero) are dropped. Field names get their
/// first underscore spaced out and the first letter uppercased.
pub fn genome_metadata(metadata: &MetadataMap, genome_id: &GenomeId) -> Option<GenomeMetadata> {
    let raw = metadata.get(genome_id.value())?;
    let is_gisaid = genome_id.value().starts_with("EPI");
    let is_group = genome_id.value().ends_with('+');

    let mut fields = Vec::with_capacity(raw.len());
    for (field, value) in raw {
        if !is_displayable(value) {
            continue;
        }
        let mut value = value_text(value);
        let mut field = field.as_str();
        if field == "taxonomy" {
            if is_gisaid {
                value = format!("hCoV19/{value}");
            }
            if is_group {
                field = "group";
            }
        }
        fields.push(MetadataField {
            name: display_name(field),
            value,
        });
    }

    Some(GenomeMetadata {
        genome_id: genome_id.clone(),
        source_label: if is_gisaid { "GISAID:" } else { "" }.to_string(),
        fields,
    })
}

pub fn tree_nodes(stats: &StatsFile) -> TreeNodeMap {
    TreeNodeMap {
        nodes: stats.tree.nid_to_acc.clone(),
    }
}

fn is_displayable(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|v| v != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty() && s != "?" && s != "Unknown",
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn display_name(field: &str) -> String {
    let spaced = field.replacen('_', " ", 1);
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => spaced,
    }
}
