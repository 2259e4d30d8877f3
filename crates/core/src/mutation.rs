//! Genetic mutation entries recorded for breast cancer patients.
//!
//! `mutation` is constrained to the list for the entry's gene and is cleared whenever the
//! gene changes, so an entry is always either empty or consistent.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// One row of the repeatable "Genetic Mutations" list.
///
/// Only objects carrying a `gene` key read as entries. Keys the editor does not manage
/// (`variant`, `test_date`, `assay_method`, ...) are kept in `extra` and written back as is.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MutationEntry {
    #[serde(deserialize_with = "string_or_null")]
    pub gene: String,
    #[serde(default, deserialize_with = "string_or_null")]
    pub mutation: String,
    #[serde(default, deserialize_with = "string_or_null")]
    pub origin: String,
    #[serde(default, deserialize_with = "string_or_null")]
    pub interpretation: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn string_or_null<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

pub const GENE_OPTIONS: &[&str] = &[
    "BRCA1", "BRCA2", "TP53", "PIK3CA", "PTEN", "ATM", "CHEK2", "PALB2", "CDH1", "ERBB2",
];

pub const ORIGIN_OPTIONS: &[&str] = &["Germline", "Somatic", "Unknown"];

pub const INTERPRETATION_OPTIONS: &[&str] = &[
    "Pathogenic",
    "Likely Pathogenic",
    "Variant of Uncertain Significance",
    "Likely Benign",
    "Benign",
];

const BRCA1_MUTATIONS: &[&str] = &[
    "c.68_69delAG",
    "c.5266dupC",
    "c.181T>G",
    "c.3756_3759del",
    "185delAG",
    "Other",
];
const BRCA2_MUTATIONS: &[&str] = &[
    "c.5946delT",
    "c.9097dupA",
    "c.7617+1G>A",
    "6174delT",
    "c.8537_8538del",
    "Other",
];
const TP53_MUTATIONS: &[&str] = &["R175H", "R248Q", "R273H", "R248W", "R282W", "Other"];
const PIK3CA_MUTATIONS: &[&str] = &["E542K", "E545K", "H1047R", "H1047L", "E726K", "Other"];
const PTEN_MUTATIONS: &[&str] = &["R130*", "R173C", "R233*", "R335*", "c.209+1G>T", "Other"];
const ATM_MUTATIONS: &[&str] = &["c.5932G>T", "c.6095G>A", "c.8122G>A", "c.7271T>G", "Other"];
const CHEK2_MUTATIONS: &[&str] = &["1100delC", "I157T", "R117G", "IVS2+1G>A", "Other"];
const PALB2_MUTATIONS: &[&str] = &[
    "c.3113G>A",
    "c.1676del",
    "c.509_510delGA",
    "c.172_175delTTGT",
    "Other",
];
const CDH1_MUTATIONS: &[&str] = &["c.1018A>G", "c.1137G>A", "c.283C>T", "c.1901C>T", "Other"];
const ERBB2_MUTATIONS: &[&str] = &["L755S", "V777L", "G776delinsVC", "D769H", "Other"];

/// Canonical spelling of `gene` in [`GENE_OPTIONS`], ignoring ASCII case and surrounding
/// whitespace. Stored records use lowercase symbols such as `brca1`.
pub fn gene_option(gene: &str) -> Option<&'static str> {
    let gene = gene.trim();
    GENE_OPTIONS
        .iter()
        .copied()
        .find(|option| option.eq_ignore_ascii_case(gene))
}

/// Mutations selectable for `gene`. Unknown or empty genes have none.
pub fn mutation_options(gene: &str) -> &'static [&'static str] {
    match gene_option(gene) {
        Some("BRCA1") => BRCA1_MUTATIONS,
        Some("BRCA2") => BRCA2_MUTATIONS,
        Some("TP53") => TP53_MUTATIONS,
        Some("PIK3CA") => PIK3CA_MUTATIONS,
        Some("PTEN") => PTEN_MUTATIONS,
        Some("ATM") => ATM_MUTATIONS,
        Some("CHEK2") => CHEK2_MUTATIONS,
        Some("PALB2") => PALB2_MUTATIONS,
        Some("CDH1") => CDH1_MUTATIONS,
        Some("ERBB2") => ERBB2_MUTATIONS,
        _ => &[],
    }
}

impl MutationEntry {
    pub fn new(gene: impl Into<String>) -> Self {
        Self {
            gene: gene.into(),
            ..Self::default()
        }
    }

    /// `mutation` is empty or one of the options for `gene`.
    pub fn is_consistent(&self) -> bool {
        self.mutation.is_empty() || mutation_options(&self.gene).contains(&self.mutation.as_str())
    }

    /// HGVS variant recorded by the records API, if any.
    pub fn variant(&self) -> Option<&str> {
        self.extra
            .get("variant")
            .and_then(Value::as_str)
            .filter(|v| !v.is_empty())
    }

    /// One-line summary, e.g. `BRCA1 c.5266dupC (Germline, Pathogenic)`. Falls back to the
    /// stored variant when no mutation is selected.
    pub fn summary(&self) -> String {
        let mut line = self.gene.clone();
        let detail = Some(self.mutation.as_str())
            .filter(|m| !m.is_empty())
            .or_else(|| self.variant());
        if let Some(detail) = detail {
            line.push(' ');
            line.push_str(detail);
        }
        let qualifiers: Vec<&str> = [self.origin.as_str(), self.interpretation.as_str()]
            .into_iter()
            .filter(|q| !q.is_empty())
            .collect();
        if !qualifiers.is_empty() {
            line.push_str(&format!(" ({})", qualifiers.join(", ")));
        }
        line
    }
}

/// Sets the entry's gene and clears its mutation, whatever the previous values were.
pub fn on_gene_change(entry: &mut MutationEntry, new_gene: impl Into<String>) {
    entry.gene = new_gene.into();
    entry.mutation.clear();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_on_gene_change_always_clears_mutation() {
        let mut entry = MutationEntry {
            gene: "BRCA1".into(),
            mutation: "Other".into(),
            origin: "Germline".into(),
            interpretation: "Pathogenic".into(),
            ..MutationEntry::default()
        };
        // "Other" is also a valid TP53 mutation; it must still be cleared.
        assert!(mutation_options("TP53").contains(&"Other"));

        on_gene_change(&mut entry, "TP53");

        assert_eq!(entry.gene, "TP53");
        assert_eq!(entry.mutation, "");
        assert_eq!(entry.origin, "Germline");
        assert_eq!(entry.interpretation, "Pathogenic");
    }

    #[test]
    fn test_on_gene_change_to_same_gene_still_clears() {
        let mut entry = MutationEntry {
            gene: "TP53".into(),
            mutation: "R175H".into(),
            ..MutationEntry::default()
        };
        on_gene_change(&mut entry, "TP53");
        assert!(entry.mutation.is_empty());
    }

    #[test]
    fn test_every_gene_option_has_mutations() {
        for gene in GENE_OPTIONS {
            assert!(!mutation_options(gene).is_empty(), "{gene} has no mutations");
        }
        assert!(mutation_options("NOTAGENE").is_empty());
    }

    #[test]
    fn test_is_consistent() {
        let mut entry = MutationEntry::new("PIK3CA");
        assert!(entry.is_consistent());
        entry.mutation = "H1047R".into();
        assert!(entry.is_consistent());
        entry.mutation = "R175H".into();
        assert!(!entry.is_consistent());
    }

    #[test]
    fn test_summary_skips_empty_parts() {
        let entry = MutationEntry {
            gene: "BRCA2".into(),
            mutation: "c.9097dupA".into(),
            origin: "".into(),
            interpretation: "Likely Pathogenic".into(),
            ..MutationEntry::default()
        };
        assert_eq!(entry.summary(), "BRCA2 c.9097dupA (Likely Pathogenic)");
        assert_eq!(MutationEntry::new("ATM").summary(), "ATM");
    }

    #[test]
    fn test_gene_matching_ignores_case() {
        assert_eq!(gene_option(" brca1 "), Some("BRCA1"));
        assert_eq!(gene_option("KRAS"), None);
        assert_eq!(mutation_options("tp53"), mutation_options("TP53"));

        let mut entry = MutationEntry::new("pik3ca");
        entry.mutation = "H1047R".into();
        assert!(entry.is_consistent());
    }

    #[test]
    fn test_unmanaged_keys_survive_round_trip() {
        let stored = serde_json::json!({
            "gene": "brca1",
            "variant": "c.5096g>a",
            "origin": "somatic",
            "interpretation": "vus",
            "test_date": "2024-01-15",
            "assay_method": "Next Generation Sequencing"
        });
        let mut entry: MutationEntry = serde_json::from_value(stored.clone()).expect("entry");
        assert_eq!(entry.variant(), Some("c.5096g>a"));
        assert_eq!(entry.summary(), "brca1 c.5096g>a (somatic, vus)");
        assert_eq!(serde_json::to_value(&entry).expect("serialize")["test_date"], "2024-01-15");

        entry.origin = "Germline".into();
        let written = serde_json::to_value(&entry).expect("serialize");
        assert_eq!(written["variant"], stored["variant"]);
        assert_eq!(written["assay_method"], stored["assay_method"]);
        assert_eq!(written["origin"], "Germline");
    }

    #[test]
    fn test_entry_requires_gene_and_tolerates_nulls() {
        assert!(serde_json::from_value::<MutationEntry>(serde_json::json!({"name": "x"})).is_err());

        let entry: MutationEntry =
            serde_json::from_value(serde_json::json!({"gene": "tp53", "origin": null}))
                .expect("entry");
        assert_eq!(entry.gene, "tp53");
        assert!(entry.origin.is_empty());
        assert!(entry.extra.is_empty());
    }
}
