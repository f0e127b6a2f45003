//! The dispatch table from a parsed [`SearchStrategy`] to datastore calls.

use std::cmp::Ordering;

use ahash::AHashSet;
use tracing::debug;

use super::{SearchHit, SearchHits, error::Result};
use crate::{
    config::SearchConfig,
    datastore::{
        Geotarget, GeotargetCandidate, GeotargetKind, LibraryDatastore, MatchTier, NameMatch,
        ServiceScope,
    },
    location::Location,
    query::SearchStrategy,
};

pub(crate) fn execute<D: LibraryDatastore>(
    datastore: &D,
    strategy: &SearchStrategy,
    config: &SearchConfig,
) -> Result<SearchHits> {
    let hits = match strategy {
        SearchStrategy::SingleGeotarget { target } => single_geotarget(datastore, target, config)?,
        SearchStrategy::NearestOfMultiple { targets, location } => {
            nearest_of_multiple(datastore, targets, *location, config)?
        }
        SearchStrategy::UnionOfMultiple { targets } => {
            union_of_multiple(datastore, targets, config)?
        }
        SearchStrategy::LibrariesNear { terms, location } => {
            libraries_near(datastore, terms, *location, config)?
        }
        SearchStrategy::LibrariesByName { terms } => libraries_by_name(datastore, terms, config)?,
        SearchStrategy::Nothing => Vec::new(),
    };
    debug!(
        strategy = strategy_name(strategy),
        results = hits.len(),
        "executed search strategy"
    );
    Ok(hits)
}

fn strategy_name(strategy: &SearchStrategy) -> &'static str {
    match strategy {
        SearchStrategy::SingleGeotarget { .. } => "single_geotarget",
        SearchStrategy::NearestOfMultiple { .. } => "nearest_of_multiple",
        SearchStrategy::UnionOfMultiple { .. } => "union_of_multiple",
        SearchStrategy::LibrariesNear { .. } => "libraries_near",
        SearchStrategy::LibrariesByName { .. } => "libraries_by_name",
        SearchStrategy::Nothing => "nothing",
    }
}

fn single_geotarget<D: LibraryDatastore>(
    datastore: &D,
    target: &Geotarget,
    config: &SearchConfig,
) -> Result<SearchHits> {
    // State-wide targets have no slot ranking policy; list members
    // alphabetically instead.
    if target.kind() == GeotargetKind::State {
        return union_of_multiple(datastore, std::slice::from_ref(target), config);
    }
    let candidates = datastore.geotarget_candidates(target, config.single_geotarget_radius_m)?;
    Ok(rank_single_geotarget(candidates, config.focused_result_limit))
}

/// The three-slot ranking around one place: the library serving exactly
/// that place, then the nearest supra-local library, then the next nearest
/// of any scope. Slots without a match stay empty, so the list shortens
/// rather than reshuffles.
fn rank_single_geotarget(mut candidates: Vec<GeotargetCandidate>, limit: usize) -> SearchHits {
    // Stable sort keeps insertion order on equal distances.
    candidates.sort_by(|a, b| a.distance_m.total_cmp(&b.distance_m));

    let mut chosen: AHashSet<u64> = AHashSet::new();
    let mut hits = SearchHits::new();

    if let Some(local) = candidates
        .iter()
        .find(|c| c.serves_target && c.scope == ServiceScope::Local)
    {
        chosen.insert(local.library.id);
        hits.push(hit_from(local));
    }
    if let Some(supra) = candidates
        .iter()
        .find(|c| c.scope == ServiceScope::SupraLocal && !chosen.contains(&c.library.id))
    {
        chosen.insert(supra.library.id);
        hits.push(hit_from(supra));
    }
    if let Some(next) = candidates
        .iter()
        .find(|c| !chosen.contains(&c.library.id))
    {
        hits.push(hit_from(next));
    }

    hits.truncate(limit);
    hits
}

fn hit_from(candidate: &GeotargetCandidate) -> SearchHit {
    SearchHit {
        library: candidate.library.clone(),
        distance_m: Some(candidate.distance_m),
    }
}

fn nearest_of_multiple<D: LibraryDatastore>(
    datastore: &D,
    targets: &[Geotarget],
    location: Location,
    config: &SearchConfig,
) -> Result<SearchHits> {
    let mut nearest: Option<(&Geotarget, f64)> = None;
    for target in targets {
        let Some(distance) = datastore.geotarget_distance(target, location)? else {
            continue;
        };
        // Strict less-than keeps the earlier target on ties.
        match nearest {
            Some((_, best)) if distance >= best => {}
            _ => nearest = Some((target, distance)),
        }
    }
    match nearest {
        Some((target, _)) => single_geotarget(datastore, target, config),
        None => Ok(Vec::new()),
    }
}

fn union_of_multiple<D: LibraryDatastore>(
    datastore: &D,
    targets: &[Geotarget],
    config: &SearchConfig,
) -> Result<SearchHits> {
    let mut seen: AHashSet<u64> = AHashSet::new();
    let mut libraries = Vec::new();
    for target in targets {
        for library in datastore.geotarget_members(target)? {
            if seen.insert(library.id) {
                libraries.push(library);
            }
        }
    }
    libraries.sort_by(|a, b| {
        a.name
            .to_lowercase()
            .cmp(&b.name.to_lowercase())
            .then(a.id.cmp(&b.id))
    });
    Ok(libraries
        .into_iter()
        .take(config.broad_result_limit)
        .map(|library| SearchHit {
            library,
            distance_m: None,
        })
        .collect())
}

fn libraries_near<D: LibraryDatastore>(
    datastore: &D,
    terms: &[String],
    location: Location,
    config: &SearchConfig,
) -> Result<SearchHits> {
    let mut matches = datastore.libraries_matching(terms, Some(location))?;
    matches.retain(|m| m.tier == MatchTier::Name);
    matches.sort_by(|a, b| {
        cmp_distance(a, b).then_with(|| {
            a.library
                .name
                .to_lowercase()
                .cmp(&b.library.name.to_lowercase())
        })
    });
    Ok(matches
        .into_iter()
        .take(config.focused_result_limit)
        .map(|m| SearchHit {
            library: m.library,
            distance_m: m.distance_m,
        })
        .collect())
}

fn cmp_distance(a: &NameMatch, b: &NameMatch) -> Ordering {
    match (a.distance_m, b.distance_m) {
        (Some(x), Some(y)) => x.total_cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn libraries_by_name<D: LibraryDatastore>(
    datastore: &D,
    terms: &[String],
    config: &SearchConfig,
) -> Result<SearchHits> {
    let mut matches = datastore.libraries_matching(terms, None)?;
    matches.sort_by(|a, b| {
        a.tier.cmp(&b.tier).then_with(|| {
            a.library
                .name
                .to_lowercase()
                .cmp(&b.library.name.to_lowercase())
        })
    });
    Ok(matches
        .into_iter()
        .take(config.broad_result_limit)
        .map(|m| SearchHit {
            library: m.library,
            distance_m: None,
        })
        .collect())
}
