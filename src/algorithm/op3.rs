//! OP3: most similar SA2 pair search within each SA3
//!
//! The pairwise cosine-similarity sweep is quadratic in the number of
//! member SA2s, so SA3 groups are processed in parallel. Groups only read
//! the immutable index, which needs no locking.

use itertools::Itertools;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::AnalysisConfig;
use crate::error::Result;
use crate::index::RegionIndex;
use crate::stats;
use crate::utils::round_to;

/// The best similarity match for one SA2 region
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarityMatch {
    /// Containing SA3 code
    pub sa3_code: String,
    /// The SA2's code
    pub sa2_code: String,
    /// The SA2's display name
    pub sa2_name: String,
    /// Code of the most similar other SA2 in the group
    pub best_match_code: String,
    /// Display name of the most similar other SA2
    pub best_match_name: String,
    /// Cosine similarity of the two age distributions
    pub similarity: f64,
}

impl SimilarityMatch {
    /// Copy with the similarity rounded for display
    #[must_use]
    pub fn rounded(&self, decimals: u32) -> Self {
        Self {
            similarity: round_to(self.similarity, decimals),
            ..self.clone()
        }
    }
}

/// For every SA2 inside an SA3 with at least
/// `config.min_similarity_group` populated members, find the other member
/// SA2 with the most similar age distribution.
///
/// A region is never matched against itself. Ties are broken by
/// first-encountered input order.
///
/// # Errors
/// Propagates `DimensionMismatch` from the statistics engine; unreachable
/// for vectors sharing the index's band ordering
pub fn op3_most_similar(
    index: &RegionIndex,
    config: &AnalysisConfig,
) -> Result<Vec<SimilarityMatch>> {
    let groups: Vec<(&str, Vec<&str>)> = index
        .sa3_codes_ordered()
        .into_iter()
        .filter_map(|sa3_code| {
            let members = index.populated_sa2s_in_sa3(sa3_code);
            (members.len() >= config.min_similarity_group).then_some((sa3_code, members))
        })
        .collect();

    log::debug!(
        "OP3 searching {} SA3 groups with at least {} populated SA2s",
        groups.len(),
        config.min_similarity_group
    );

    let per_group: Vec<Vec<SimilarityMatch>> = groups
        .par_iter()
        .map(|(sa3_code, members)| best_matches_in_group(index, sa3_code, members))
        .collect::<Result<_>>()?;

    Ok(per_group.into_iter().flatten().collect())
}

/// Best match per member over the full pairwise similarity matrix of one
/// SA3 group
fn best_matches_in_group(
    index: &RegionIndex,
    sa3_code: &str,
    members: &[&str],
) -> Result<Vec<SimilarityMatch>> {
    let vectors: Vec<Vec<f64>> = members
        .iter()
        .map(|sa2_code| {
            index
                .distribution_f64(sa2_code)
                .unwrap_or_else(|| vec![0.0; index.bands().len()])
        })
        .collect();

    // Each unordered pair is computed once and shared by both members
    let mut matrix = vec![0.0; members.len() * members.len()];
    for (i, j) in (0..members.len()).tuple_combinations::<(_, _)>() {
        let similarity = stats::cosine_similarity(&vectors[i], &vectors[j])?;
        matrix[i * members.len() + j] = similarity;
        matrix[j * members.len() + i] = similarity;
    }

    let mut matches = Vec::with_capacity(members.len());
    for (i, &sa2_code) in members.iter().enumerate() {
        let mut best: Option<(usize, f64)> = None;
        for j in 0..members.len() {
            if j == i {
                continue;
            }
            let similarity = matrix[i * members.len() + j];
            if best.is_none_or(|(_, best_similarity)| similarity > best_similarity) {
                best = Some((j, similarity));
            }
        }
        let Some((j, similarity)) = best else {
            continue;
        };

        let best_match_code = members[j];
        matches.push(SimilarityMatch {
            sa3_code: sa3_code.to_string(),
            sa2_code: sa2_code.to_string(),
            sa2_name: index.sa2_name(sa2_code).unwrap_or(sa2_code).to_string(),
            best_match_code: best_match_code.to_string(),
            best_match_name: index
                .sa2_name(best_match_code)
                .unwrap_or(best_match_code)
                .to_string(),
            similarity,
        });
    }
    Ok(matches)
}
