use crate::libs::level::Strand;

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // gene_id "YAL069W"
    static ref RE_GTF_ATTR: Regex = Regex::new(r#"^(\S+)\s+"(.*)"$"#).unwrap();
}

//----------------------------
// Feature
//----------------------------
/// One annotation line, coordinates 0-based half-open
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feature {
    pub id: String,
    pub start: usize,
    pub end: usize,
    pub strand: Strand,
    pub kind: String, // GFF column 3, e.g. gene, exon, CDS
}

impl Feature {
    /// Parses one GFF3 line; the identifier comes from the `ID` attribute
    /// and defaults to an empty string.
    ///
    /// Comment lines and lines with missing columns or unparsable
    /// coordinates yield `None`.
    ///
    /// ```
    /// use gvt::libs::feature::Feature;
    /// let line = "I\tsgd\tgene\t335\t649\t.\t+\t.\tID=YAL069W;Name=YAL069W";
    /// let ft = Feature::from_gff3_line(line).unwrap();
    /// assert_eq!(ft.id, "YAL069W");
    /// assert_eq!(ft.start, 334); // 1-based to 0-based
    /// assert_eq!(ft.end, 649);
    /// ```
    pub fn from_gff3_line(line: &str) -> Option<Feature> {
        let (fields, start, end) = split_columns(line)?;

        let mut id = String::new();
        for attr in fields[8].split(';') {
            let attr = attr.trim();
            if let Some((key, value)) = attr.split_once('=') {
                if key == "ID" {
                    id = value.to_string();
                    break;
                }
            }
        }

        Some(Feature {
            id,
            start,
            end,
            strand: Strand::from_char(fields[6].chars().next().unwrap_or('.')),
            kind: fields[2].to_string(),
        })
    }

    /// Parses one GTF line. The identifier key depends on the feature
    /// type: `exon_id`, `cdsid`, `transcript_id` or `gene_id`; any other
    /// type gets an empty identifier.
    ///
    /// ```
    /// use gvt::libs::feature::Feature;
    /// let line = "I\tsgd\tgene\t335\t649\t.\t+\t.\tgene_id \"YAL069W\"; gene_version \"1\";";
    /// let ft = Feature::from_gtf_line(line).unwrap();
    /// assert_eq!(ft.id, "YAL069W");
    /// ```
    pub fn from_gtf_line(line: &str) -> Option<Feature> {
        let (fields, start, end) = split_columns(line)?;

        let kind = fields[2].to_string();
        let id_key = match kind.as_str() {
            "exon" => "exon_id",
            "CDS" => "cdsid",
            "transcript" => "transcript_id",
            "gene" => "gene_id",
            _ => "",
        };

        let mut id = String::new();
        if !id_key.is_empty() {
            for attr in fields[8].split(';') {
                let attr = attr.trim();
                if let Some(caps) = RE_GTF_ATTR.captures(attr) {
                    if &caps[1] == id_key {
                        id = caps[2].to_string();
                        break;
                    }
                }
            }
        }

        Some(Feature {
            id,
            start,
            end,
            strand: Strand::from_char(fields[6].chars().next().unwrap_or('.')),
            kind,
        })
    }
}

fn split_columns(line: &str) -> Option<(Vec<&str>, usize, usize)> {
    let line = line.trim_end();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }

    let fields: Vec<&str> = line.split('\t').collect();
    if fields.len() != 9 {
        return None;
    }

    // 1-based to 0-based
    let start: usize = fields[3].parse::<usize>().ok()?.saturating_sub(1);
    let end: usize = fields[4].parse().ok()?;
    if end < start {
        return None;
    }

    Some((fields, start, end))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gff3_line() {
        let line = "I\tsgd\tgene\t335\t649\t.\t+\t.\tID=YAL069W;Name=YAL069W;orf_classification=Dubious";
        let ft = Feature::from_gff3_line(line).unwrap();
        assert_eq!(ft.id, "YAL069W");
        assert_eq!(ft.start, 334);
        assert_eq!(ft.end, 649);
        assert_eq!(ft.strand, Strand::Plus);
        assert_eq!(ft.kind, "gene");
    }

    #[test]
    fn test_gff3_missing_id() {
        let line = "I\tsgd\tchromosome\t1\t230218\t.\t.\t.\tName=chrI";
        let ft = Feature::from_gff3_line(line).unwrap();
        assert_eq!(ft.id, "");
        assert_eq!(ft.strand, Strand::Unstranded);
    }

    #[test]
    fn test_gff3_rejects() {
        assert!(Feature::from_gff3_line("## gff-version 3").is_none());
        assert!(Feature::from_gff3_line("").is_none());
        assert!(Feature::from_gff3_line("I\tsgd\tgene\t335\t649").is_none());
        assert!(
            Feature::from_gff3_line("I\tsgd\tgene\tNA\t649\t.\t+\t.\tID=X").is_none(),
            "unparsable start"
        );
    }

    #[test]
    fn test_gtf_id_by_type() {
        let gene = "I\tsgd\tgene\t335\t649\t.\t+\t.\tgene_id \"YAL069W\"; gene_biotype \"protein_coding\";";
        assert_eq!(Feature::from_gtf_line(gene).unwrap().id, "YAL069W");

        let tx = "I\tsgd\ttranscript\t335\t649\t.\t+\t.\tgene_id \"YAL069W\"; transcript_id \"YAL069W_mRNA\";";
        assert_eq!(Feature::from_gtf_line(tx).unwrap().id, "YAL069W_mRNA");

        let exon = "I\tsgd\texon\t335\t649\t.\t+\t.\ttranscript_id \"YAL069W_mRNA\"; exon_id \"YAL069W.1\";";
        assert_eq!(Feature::from_gtf_line(exon).unwrap().id, "YAL069W.1");

        // unhandled types keep an empty identifier
        let sc = "I\tsgd\tstart_codon\t335\t337\t.\t+\t0\tgene_id \"YAL069W\";";
        let ft = Feature::from_gtf_line(sc).unwrap();
        assert_eq!(ft.id, "");
        assert_eq!(ft.kind, "start_codon");
    }

    #[test]
    fn test_gtf_minus_strand() {
        let line = "I\tsgd\tgene\t1807\t2169\t.\t-\t.\tgene_id \"YAL068C\";";
        let ft = Feature::from_gtf_line(line).unwrap();
        assert_eq!(ft.strand, Strand::Minus);
        assert_eq!(ft.start, 1806);
        assert_eq!(ft.end, 2169);
    }
}
