//! Derives the grouped view from the flat website and group lists.

use std::collections::HashMap;

use crate::types::group::{Group, GroupWithWebsites};
use crate::types::website::Website;

/// Groups ordered by `sort_order`, each holding its member websites ordered by
/// `sort_order` (missing counts as 0).
///
/// Both sorts are stable, so ties keep the input order. Websites pointing at an
/// unknown group are left out; ungrouped websites belong to no group.
pub fn reconcile(groups: &[Group], websites: &[Website]) -> Vec<GroupWithWebsites> {
    let mut ordered: Vec<&Group> = groups.iter().collect();
    ordered.sort_by_key(|g| g.sort_order);

    let mut members: HashMap<&str, Vec<Website>> = HashMap::new();
    for website in websites {
        if let Some(group_id) = website.group() {
            members
                .entry(group_id)
                .or_default()
                .push(website.clone());
        }
    }

    ordered
        .into_iter()
        .map(|group| {
            let mut websites = members.remove(group.id.as_str()).unwrap_or_default();
            websites.sort_by_key(|w| w.sort_order.unwrap_or(0));
            GroupWithWebsites {
                group: group.clone(),
                websites,
            }
        })
        .collect()
}

/// Websites that belong to no group, in list order.
pub fn ungrouped(websites: &[Website]) -> Vec<&Website> {
    websites.iter().filter(|w| w.group().is_none()).collect()
}

/// Copies group membership reported by the nested groups endpoint onto flat
/// websites that arrived without a `groupId`.
///
/// Returns the number of websites updated.
pub fn backfill_membership(websites: &mut [Website], nested: &[GroupWithWebsites]) -> usize {
    let mut owner: HashMap<&str, &str> = HashMap::new();
    for entry in nested {
        for website in &entry.websites {
            owner.insert(website.id.as_str(), entry.group.id.as_str());
        }
    }

    let mut updated = 0;
    for website in websites.iter_mut().filter(|w| w.group().is_none()) {
        if let Some(group_id) = owner.get(website.id.as_str()) {
            website.group_id = Some(group_id.to_string());
            updated += 1;
        }
    }
    updated
}
