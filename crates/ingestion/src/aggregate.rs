//! Folding records into the final [`Dataset`].

use std::collections::BTreeSet;

use site_common::{Dataset, DatasetStats, SiteRecord};

/// Accumulates records and their distinct facet values.
#[derive(Debug, Default)]
pub struct DatasetBuilder {
    sites: Vec<SiteRecord>,
    layouts: BTreeSet<String>,
    layout_groups: BTreeSet<String>,
    site_sizes: BTreeSet<String>,
    types: BTreeSet<String>,
    size_classifications: BTreeSet<String>,
}

fn insert_non_empty(set: &mut BTreeSet<String>, value: &str) {
    if !value.is_empty() && !set.contains(value) {
        set.insert(value.to_string());
    }
}

impl DatasetBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record, keeping source order.
    pub fn push(&mut self, site: SiteRecord) {
        insert_non_empty(&mut self.layouts, &site.layout);
        insert_non_empty(&mut self.layout_groups, &site.layout_group);
        insert_non_empty(&mut self.site_sizes, &site.site_size);
        insert_non_empty(&mut self.types, &site.site_type);
        insert_non_empty(&mut self.size_classifications, &site.size_classification);
        self.sites.push(site);
    }

    pub fn len(&self) -> usize {
        self.sites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }

    pub fn finish(self) -> Dataset {
        let stats = DatasetStats::from_sites(&self.sites);
        Dataset {
            sites: self.sites,
            layouts: self.layouts.into_iter().collect(),
            layout_groups: self.layout_groups.into_iter().collect(),
            site_sizes: self.site_sizes.into_iter().collect(),
            types: self.types.into_iter().collect(),
            size_classifications: self.size_classifications.into_iter().collect(),
            stats,
        }
    }
}

impl Extend<SiteRecord> for DatasetBuilder {
    fn extend<I: IntoIterator<Item = SiteRecord>>(&mut self, iter: I) {
        for site in iter {
            self.push(site);
        }
    }
}

impl FromIterator<SiteRecord> for DatasetBuilder {
    fn from_iter<I: IntoIterator<Item = SiteRecord>>(iter: I) -> Self {
        let mut builder = Self::new();
        builder.extend(iter);
        builder
    }
}
