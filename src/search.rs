//! Property search - scored text search over the full descriptor tree.

use crate::essentials::{simplify_property, SimplifiedProperty};
use crate::types::{PropertyDescriptor, MAX_NESTING_DEPTH};

/// Default number of results returned by [`search_properties`].
pub const DEFAULT_MAX_RESULTS: usize = 20;

const SCORE_EXACT: u8 = 10;
const SCORE_PREFIX: u8 = 8;
const SCORE_CONTAINS: u8 = 5;
const SCORE_DISPLAY_NAME: u8 = 4;
const SCORE_DESCRIPTION: u8 = 3;

/// Search properties by name, display name and description.
///
/// Walks nested collection members as well. Each result carries its dot path
/// (`options.timeout`, or `headers.parameters.name` for fixedCollection
/// members). Results are ordered by descending score; ties keep tree order.
pub fn search_properties(
    descriptors: &[PropertyDescriptor],
    query: &str,
    max_results: usize,
) -> Vec<SimplifiedProperty> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return Vec::new();
    }

    let mut matches = Vec::new();
    collect_matches(descriptors.iter(), &query, None, 0, &mut matches);

    // Stable: equal scores stay in traversal order
    matches.sort_by(|a, b| b.0.cmp(&a.0));
    matches.truncate(max_results);
    matches.into_iter().map(|(_, property)| property).collect()
}

/// Score one descriptor against a lowercase query. Zero means no match.
pub fn score_property(descriptor: &PropertyDescriptor, query: &str) -> u8 {
    let name = descriptor.name.to_lowercase();
    let mut score = if name == query {
        SCORE_EXACT
    } else if name.starts_with(query) {
        SCORE_PREFIX
    } else if name.contains(query) {
        SCORE_CONTAINS
    } else {
        0
    };

    if score < SCORE_DISPLAY_NAME && descriptor.display_name.to_lowercase().contains(query) {
        score = SCORE_DISPLAY_NAME;
    }
    if score < SCORE_DESCRIPTION
        && descriptor
            .description
            .as_deref()
            .is_some_and(|d| d.to_lowercase().contains(query))
    {
        score = SCORE_DESCRIPTION;
    }
    score
}

fn collect_matches<'a>(
    descriptors: impl Iterator<Item = &'a PropertyDescriptor>,
    query: &str,
    parent: Option<&str>,
    depth: usize,
    matches: &mut Vec<(u8, SimplifiedProperty)>,
) {
    for descriptor in descriptors {
        let path = match parent {
            Some(parent) => format!("{}.{}", parent, descriptor.name),
            None => descriptor.name.clone(),
        };

        let score = score_property(descriptor, query);
        if score > 0 {
            let mut simplified = simplify_property(descriptor);
            simplified.path = Some(path.clone());
            matches.push((score, simplified));
        }

        if !descriptor.property_type.is_container() {
            continue;
        }
        if depth + 1 >= MAX_NESTING_DEPTH {
            log::debug!("search depth limit reached at '{}'", path);
            continue;
        }
        for (group, child) in descriptor.nested() {
            let child_parent = match group {
                Some(group) => format!("{}.{}", path, group),
                None => path.clone(),
            };
            collect_matches(
                std::iter::once(child),
                query,
                Some(&child_parent),
                depth + 1,
                matches,
            );
        }
    }
}
