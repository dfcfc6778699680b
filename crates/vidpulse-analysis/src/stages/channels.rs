//! Per-channel aggregation and ranking.

use std::collections::{HashMap, HashSet};

use vidpulse_core::{ChannelGrouping, Dataset, VideoRecord};

use crate::insights::{ChannelStats, TopChannels};

/// Identity of a channel group. Ids and display names never share a key,
/// even when their text is equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GroupKey<'a> {
    Id(&'a str),
    Name(&'a str),
}

impl<'a> GroupKey<'a> {
    #[must_use]
    pub fn as_str(self) -> &'a str {
        match self {
            GroupKey::Id(s) | GroupKey::Name(s) => s,
        }
    }
}

/// The grouping key of `record` under `grouping`.
///
/// Grouping by id falls back to the display name when the record carries
/// no channel id.
#[must_use]
pub fn group_key(record: &VideoRecord, grouping: ChannelGrouping) -> GroupKey<'_> {
    match grouping {
        ChannelGrouping::Id if !record.channel_id.is_empty() => GroupKey::Id(&record.channel_id),
        ChannelGrouping::Id | ChannelGrouping::Name => GroupKey::Name(&record.channel_name),
    }
}

/// Output label of each group. A name-keyed group whose name collides with
/// a channel id in the same output is labeled `name:<name>`.
fn labels(keys: &[GroupKey<'_>]) -> Vec<String> {
    let ids: HashSet<&str> = keys
        .iter()
        .filter_map(|key| match key {
            GroupKey::Id(id) => Some(*id),
            GroupKey::Name(_) => None,
        })
        .collect();
    keys.iter()
        .map(|key| match *key {
            GroupKey::Name(name) if ids.contains(name) => format!("name:{name}"),
            other => other.as_str().to_string(),
        })
        .collect()
}

/// Group records, sum their counters and keep the `top_n` groups with the
/// most total views. Ties keep first-seen group order.
#[must_use]
pub fn aggregate(dataset: &Dataset, grouping: ChannelGrouping, top_n: usize) -> TopChannels {
    let mut groups: Vec<(GroupKey<'_>, ChannelStats)> = Vec::new();
    let mut index: HashMap<GroupKey<'_>, usize> = HashMap::new();
    let mut ids_per_group: HashMap<usize, HashSet<&str>> = HashMap::new();

    for record in dataset.records() {
        let key = group_key(record, grouping);
        let slot = *index.entry(key).or_insert_with(|| {
            groups.push((
                key,
                ChannelStats {
                    channel_name: record.channel_name.clone(),
                    channel_id: record.channel_id.clone(),
                    ..ChannelStats::default()
                },
            ));
            groups.len() - 1
        });

        let stats = &mut groups[slot].1;
        stats.video_count += 1;
        stats.total_views = stats.total_views.saturating_add(record.view_count);
        stats.total_likes = stats.total_likes.saturating_add(record.like_count);
        stats.total_comments = stats.total_comments.saturating_add(record.comment_count);

        if !record.channel_id.is_empty() {
            ids_per_group
                .entry(slot)
                .or_default()
                .insert(record.channel_id.as_str());
        }
    }

    if grouping == ChannelGrouping::Name {
        for (slot, ids) in &ids_per_group {
            if ids.len() > 1 {
                tracing::warn!(
                    channel = groups[*slot].0.as_str(),
                    distinct_ids = ids.len(),
                    "channels sharing a display name were merged; group by id to keep them apart"
                );
            }
        }
    }

    let group_count = groups.len();
    // sort_by is stable, so equal totals keep first-seen order.
    groups.sort_by(|a, b| b.1.total_views.cmp(&a.1.total_views));
    groups.truncate(top_n);

    let keys: Vec<GroupKey<'_>> = groups.iter().map(|(key, _)| *key).collect();
    let named = labels(&keys)
        .into_iter()
        .zip(groups.into_iter().map(|(_, stats)| stats))
        .collect::<Vec<_>>();

    tracing::debug!(groups = group_count, kept = named.len(), %grouping, "channels aggregated");
    TopChannels(named)
}
