// combine configs: reconcile top-level parameters, concatenate descriptions, offset IntendedFor

use crate::error::{CombineError, Result};
use crate::model::{Description, Document};
use serde_json::{Map, Value};
use std::collections::HashSet;

/// Combine an ordered list of configs into a single config.
///
/// Top-level parameters must agree wherever they repeat. Descriptions are
/// concatenated in input order, and every integer `IntendedFor` is shifted by
/// the number of descriptions contributed by the configs before it, so it keeps
/// pointing at the same description in the combined list.
///
/// Fails on the first conflict or malformed `IntendedFor`; nothing is partially returned.
pub fn combine(documents: &[Document]) -> Result<Document> {
    let parameters = reconcile_parameters(documents)?;

    let total = documents.iter().map(|d| d.descriptions.len()).sum();
    let mut descriptions = Vec::with_capacity(total);
    let mut seen_ids: HashSet<&str> = HashSet::new();
    let mut offset: i64 = 0;

    for document in documents {
        for description in &document.descriptions {
            if let Some(id) = description.id() {
                if !seen_ids.insert(id) {
                    return Err(CombineError::DescriptionId(id.to_string()));
                }
            }
            descriptions.push(update_intended_for(description, offset)?);
        }
        offset = i64::try_from(document.descriptions.len())
            .ok()
            .and_then(|len| offset.checked_add(len))
            .ok_or_else(|| {
                CombineError::InvalidDocument("too many descriptions to index".to_string())
            })?;
    }

    Ok(Document::new(parameters, descriptions))
}

/// First-seen value wins the position; a later differing value is a conflict.
pub fn reconcile_parameters(documents: &[Document]) -> Result<Map<String, Value>> {
    let mut merged = Map::new();

    for document in documents {
        for (name, value) in &document.parameters {
            match merged.get(name) {
                None => {
                    merged.insert(name.clone(), value.clone());
                }
                Some(first) if first == value => {}
                Some(first) => {
                    return Err(CombineError::TopLevelParameter {
                        name: name.clone(),
                        first: first.clone(),
                        second: value.clone(),
                    })
                }
            }
        }
    }

    Ok(merged)
}

/// Copy of `description` with integer `IntendedFor` targets shifted by `offset`.
pub fn update_intended_for(description: &Description, offset: i64) -> Result<Description> {
    let mut updated = description.clone();
    if let Some(intended_for) = description.intended_for()? {
        updated.set_intended_for(intended_for.offset(offset)?);
    }
    Ok(updated)
}
