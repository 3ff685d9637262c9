use std::io::BufRead;

use anyhow::bail;
use indexmap::IndexMap;
use itertools::Itertools;

use crate::libs::feature::Feature;

//----------------------------
// AnnotationFormat
//----------------------------
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnnotationFormat {
    Gff3,
    Gtf,
}

impl AnnotationFormat {
    /// Detects the format from the file name; `.gz` suffixes are
    /// transparent
    ///
    /// ```
    /// use gvt::libs::annotation::AnnotationFormat;
    /// assert_eq!(
    ///     AnnotationFormat::from_path("tests/gff/S288c.gff3").unwrap(),
    ///     AnnotationFormat::Gff3
    /// );
    /// assert_eq!(
    ///     AnnotationFormat::from_path("anno.gtf.gz").unwrap(),
    ///     AnnotationFormat::Gtf
    /// );
    /// assert!(AnnotationFormat::from_path("anno.bed").is_err());
    /// ```
    pub fn from_path(path: &str) -> anyhow::Result<Self> {
        let stripped = path.strip_suffix(".gz").unwrap_or(path);

        if stripped.ends_with(".gff3") || stripped.ends_with(".gff") {
            Ok(AnnotationFormat::Gff3)
        } else if stripped.ends_with(".gtf") {
            Ok(AnnotationFormat::Gtf)
        } else {
            bail!("{} is not in gtf/gff3 format (.gff3/.gtf/.gz)", path)
        }
    }

    fn parse_line(&self, line: &str) -> Option<Feature> {
        match self {
            AnnotationFormat::Gff3 => Feature::from_gff3_line(line),
            AnnotationFormat::Gtf => Feature::from_gtf_line(line),
        }
    }
}

//----------------------------
// Annotation
//----------------------------
/// An annotation file loaded into per-seqid, start-sorted feature lists.
///
/// Sorting at load time is what guarantees the non-decreasing `start`
/// order that `Level::assign` relies on.
#[derive(Debug, Clone)]
pub struct Annotation {
    name: String,
    format: AnnotationFormat,
    // seqid -> features sorted by (start, end)
    features: IndexMap<String, Vec<Feature>>,
}

impl Annotation {
    /// Loads a GFF3/GTF file, plain or gzipped
    pub fn from_file(infile: &str, name: Option<&str>) -> anyhow::Result<Self> {
        let format = AnnotationFormat::from_path(infile)?;

        if std::fs::metadata(infile).is_err() {
            bail!("{} is not readable", infile);
        }

        let name = match name {
            Some(s) => s.to_string(),
            None => file_stem(infile),
        };

        let reader = crate::reader(infile);
        Self::from_reader(reader, format, &name)
    }

    /// Loads from any buffered reader; comment and malformed lines are
    /// skipped
    pub fn from_reader<R: BufRead>(
        reader: R,
        format: AnnotationFormat,
        name: &str,
    ) -> anyhow::Result<Self> {
        let mut features: IndexMap<String, Vec<Feature>> = IndexMap::new();

        for line in reader.lines() {
            let line = line?;
            let seqid = match line.split('\t').next() {
                Some(s) if !s.is_empty() && !s.starts_with('#') => s.to_string(),
                _ => continue,
            };
            if let Some(ft) = format.parse_line(&line) {
                features.entry(seqid).or_insert_with(Vec::new).push(ft);
            }
        }

        // the sort bootstrap
        for list in features.values_mut() {
            list.sort_by_key(|ft| (ft.start, ft.end));
        }

        Ok(Self {
            name: name.to_string(),
            format,
            features,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn format(&self) -> AnnotationFormat {
        self.format
    }

    /// Sequence ids in file order
    pub fn seqids(&self) -> Vec<&str> {
        self.features.keys().map(|s| s.as_str()).collect()
    }

    pub fn n_seq(&self) -> usize {
        self.features.len()
    }

    pub fn all_feature_count(&self) -> usize {
        self.features.values().map(|v| v.len()).sum()
    }

    /// Feature counts per seqid, most populated first
    pub fn seqid_count(&self) -> Vec<(String, usize)> {
        self.features
            .iter()
            .map(|(k, v)| (k.clone(), v.len()))
            .sorted_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)))
            .collect()
    }

    /// Feature counts per type (GFF column 3), most frequent first
    pub fn feature_type_count(&self) -> Vec<(String, usize)> {
        let mut counts: IndexMap<String, usize> = IndexMap::new();
        for ft in self.features.values().flatten() {
            *counts.entry(ft.kind.clone()).or_insert(0) += 1;
        }

        counts
            .into_iter()
            .sorted_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)))
            .collect()
    }

    /// Features overlapping the half-open window `[start, end)` on one
    /// seqid, non-decreasing by start. An empty `types` list keeps every
    /// feature type; an unknown seqid yields an empty vec.
    pub fn interval_features(
        &self,
        seqid: &str,
        start: Option<usize>,
        end: Option<usize>,
        types: &[String],
    ) -> Vec<Feature> {
        let list = match self.features.get(seqid) {
            Some(list) => list,
            None => return vec![],
        };

        let start = start.unwrap_or(0);
        let end = end.unwrap_or(usize::MAX);

        list.iter()
            .filter(|ft| ft.end > start && ft.start < end)
            .filter(|ft| types.is_empty() || types.iter().any(|t| *t == ft.kind))
            .cloned()
            .collect()
    }
}

/// Base file name with all extensions removed
fn file_stem(path: &str) -> String {
    let base = std::path::Path::new(path)
        .file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();

    match base.split_once('.') {
        Some((stem, _)) => stem.to_string(),
        None => base,
    }
}
