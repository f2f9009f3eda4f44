// Stage name abbreviation matching for the Leadboard CLI

use crate::models::PipelineStage;
use crate::utils::fuzzy::closest_match;

/// Find all stage slugs that start with the given prefix (case-insensitive)
pub fn find_matching_stages(prefix: &str) -> Vec<PipelineStage> {
    let prefix_lower = prefix.to_lowercase();
    PipelineStage::ALL
        .iter()
        .filter(|s| s.as_str().starts_with(&prefix_lower))
        .copied()
        .collect()
}

/// Resolve a stage argument: exact slug first, then a unique prefix.
/// Returns Err with a helpful message (ambiguous matches listed, or a
/// fuzzy "did you mean" suggestion) when resolution fails.
pub fn resolve_stage(input: &str) -> Result<PipelineStage, String> {
    let input_lower = input.to_lowercase();

    // Exact matches take precedence over prefix matches
    if let Some(stage) = PipelineStage::from_str(&input_lower) {
        return Ok(stage);
    }

    let matches = find_matching_stages(&input_lower);
    match matches.len() {
        1 => Ok(matches[0]),
        0 => {
            let slugs: Vec<&str> = PipelineStage::ALL.iter().map(|s| s.as_str()).collect();
            match closest_match(&input_lower, &slugs, 3) {
                Some(suggestion) => Err(format!(
                    "Unknown stage '{}'. Did you mean '{}'?",
                    input, suggestion
                )),
                None => Err(format!(
                    "Unknown stage '{}'. Valid stages: {}",
                    input,
                    slugs.join(", ")
                )),
            }
        }
        _ => Err(format!(
            "Ambiguous stage '{}'. Matches: {}",
            input,
            matches
                .iter()
                .map(|s| s.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        )),
    }
}
