use crate::index::build::SearchIndex;
use serde::Serialize;
use std::io::{self, Write};

/// Summary of a built index
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexStats {
    pub records: u64,
    pub distinct_terms: usize,
    pub author_keys: usize,
    pub first_year: Option<i32>,
    pub last_year: Option<i32>,
    /// Records per category, largest first
    pub by_category: Vec<(String, u64)>,
    /// Records per access code, largest first
    pub by_access_type: Vec<(String, u64)>,
}

impl IndexStats {
    pub fn collect(index: &SearchIndex) -> Self {
        let mut by_category: Vec<(String, u64)> = index
            .categories
            .iter()
            .map(|(category, ids)| (category.clone(), ids.len()))
            .collect();
        sort_counts(&mut by_category);

        let mut by_access_type: Vec<(String, u64)> = index
            .access_types
            .iter()
            .map(|(access, ids)| (access.code().to_string(), ids.len()))
            .collect();
        sort_counts(&mut by_access_type);

        Self {
            records: index.record_count(),
            distinct_terms: index.words.len(),
            author_keys: index.authors.len(),
            first_year: index.years.keys().next().copied(),
            last_year: index.years.keys().next_back().copied(),
            by_category,
            by_access_type,
        }
    }
}

/// Count descending, name ascending
fn sort_counts(counts: &mut [(String, u64)]) {
    counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
}

/// Display index statistics
pub fn write_stats<W: Write>(out: &mut W, stats: &IndexStats) -> io::Result<()> {
    writeln!(out, "Index Statistics")?;
    writeln!(out, "================")?;
    writeln!(out)?;
    writeln!(out, "Records:          {}", stats.records)?;
    writeln!(out, "Distinct terms:   {}", stats.distinct_terms)?;
    writeln!(out, "Author keys:      {}", stats.author_keys)?;

    match (stats.first_year, stats.last_year) {
        (Some(first), Some(last)) => writeln!(out, "Years:            {first}-{last}")?,
        _ => writeln!(out, "Years:            none")?,
    }

    writeln!(out)?;
    writeln!(out, "Records by category:")?;
    for (category, count) in &stats.by_category {
        writeln!(out, "  {category:24} {count}")?;
    }

    writeln!(out)?;
    writeln!(out, "Records by access type:")?;
    for (access, count) in &stats.by_access_type {
        writeln!(out, "  {access:24} {count}")?;
    }

    Ok(())
}
