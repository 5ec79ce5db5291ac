//! Browser compile stats from Rolldown output

use reroute_manifest::ClientStats;
use rolldown_common::{Output, OutputAsset};

/// Group emitted files by chunk name
///
/// Each chunk lists its own file first, then its static imports. Stylesheets
/// are appended to the chunk they were emitted for.
pub fn collect_client_stats(outputs: &[Output]) -> ClientStats {
    let mut stats = ClientStats::default();

    for output in outputs {
        if let Output::Chunk(chunk) = output {
            let files = stats
                .assets_by_chunk_name
                .entry(chunk.name.to_string())
                .or_default();
            files.push(chunk.filename.to_string());
            files.extend(chunk.imports.iter().map(ToString::to_string));
        }
    }

    for output in outputs {
        if let Output::Asset(asset) = output {
            if !asset.filename.ends_with(".css") {
                continue;
            }
            if let Some(owner) = stylesheet_owner(&stats, asset) {
                if let Some(files) = stats.assets_by_chunk_name.get_mut(&owner) {
                    files.push(asset.filename.to_string());
                }
            }
        }
    }

    stats
}

fn stylesheet_owner(stats: &ClientStats, asset: &OutputAsset) -> Option<String> {
    asset
        .names
        .iter()
        .map(|name| name.as_str())
        .chain(std::iter::once(asset.filename.as_str()))
        .flat_map(|name| path_suffixes(name.trim_end_matches(".css")))
        .find(|candidate| stats.assets_by_chunk_name.contains_key(*candidate))
        .map(str::to_string)
}

/// `static/css/routes/home` -> itself, `css/routes/home`, `routes/home`, `home`
fn path_suffixes(path: &str) -> impl Iterator<Item = &str> {
    std::iter::once(path).chain(
        path.match_indices('/')
            .map(move |(index, _)| &path[index + 1..]),
    )
}
