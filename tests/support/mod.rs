//! Shared fixtures: a small but complete dashboard data tree.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use assay_monitor::config::ResourceLocations;
use assay_monitor::resources::{FsFetcher, ResourceFetcher, ResourceStore};

pub fn write_file(root: &Path, rel: &str, contents: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

/// Lay out every resource the way the offline pipeline publishes them.
///
/// Three assays: CDC-N1 (minimal row), CDC-N2 (full row, quoted recall),
/// E-Sarbeco (no recall field). Germany is deliberately missing from the
/// coordinate lookup.
pub fn seed_dashboard_data(root: &Path) {
    write_file(
        root,
        "data/summary_table.json",
        r#"{
            "data": [
                {"name": "CDC-N1", "recall": 0.99, "perfect_match": 90,
                 "1_mm": 5, "2_mm": 3, "3_mm_p_fail": 2},
                {"name": "CDC-N2", "recall": "0.9937129", "perfect_match": 9500,
                 "1_mm": 200, "2_mm": 100, "3_mm": 20, "4_mm": 10, "5_mm": 5,
                 "6_mm": 3, "7_mm": 2, "8_mm_p_fail": 22, "3_mm_p_fail": 62},
                {"name": "E-Sarbeco", "perfect_match": 45, "1_mm": 3,
                 "2_mm": 1, "3_mm": 1}
            ],
            "Timestamp": "2020-04-27 12:00:00"
        }"#,
    );

    write_file(
        root,
        "data/SARS-CoV-2.xml.stats.json",
        r#"{
            "tree": {
                "collapsed_genome_num": 1500,
                "leaf_num": 1334,
                "nid_to_acc": {"17": "EPI_ISL_402125", "21": "MT072688"},
                "assay_stats": {
                    "CDC-N1": {
                        "assay_sequence": {
                            "forward_primer": "GACCCCAAAATCAGCGAAAT",
                            "reverse_primer": "TCTGGTTACTGCCAGTTGAATCTG",
                            "probe": "ACCCCGCATTACGTTTGGTGGACC"
                        },
                        "month": {"2020-03": {"0": 9}},
                        "country": {"USA": {"0": 9}}
                    },
                    "CDC-N2": {
                        "assay_sequence": {
                            "forward_primer": "TTACAAACATTGGCCGCAAA",
                            "reverse_primer": "GCGCGACATTCCGAAGAA",
                            "probe": "ACAATTTGCCCCCAGCGCTTCAG"
                        }
                    },
                    "E-Sarbeco": {
                        "assay_sequence": {
                            "forward_primer": "ACAGGTACGTTAATAGTTAATAGCGT",
                            "reverse_primer": "ATATTGCAGCAGTACGCACACA",
                            "probe": "ACACTAGCCATCCTTACTGCGCTTCG"
                        }
                    }
                }
            }
        }"#,
    );

    write_file(
        root,
        "data/SARS-CoV-2.xml.geo.json",
        r#"{
            "CDC-N1": {
                "Perfect match": {
                    "USA": {"2020-03-11": 7, "2020-03-12": 2, "2020-04-02": 5},
                    "Australia": {"2020-03-20": 1}
                },
                "1 mismatch": {"USA": {"2020-04-05": 4}},
                "8+/failures": {"Spain": {"2020-04-10": 2}},
                "Total failures": {"USA": {"2020-04-01": 3}, "Spain": {"2020-04-10": 2}}
            },
            "CDC-N2": {
                "Perfect match": {"USA": {"2020-03-15": 9}}
            },
            "E-Sarbeco": {
                "Perfect match": {"Germany": {"2020-03-01": 2}}
            }
        }"#,
    );

    write_file(
        root,
        "data/SARS-CoV-2.xml.json",
        r#"{
            "EPI_ISL_402125": {
                "taxonomy": "Wuhan/WIV04/2019",
                "country": "China",
                "division": "Hubei",
                "host": "Human",
                "age": "?",
                "sex": "Unknown",
                "GISAID_clade": "L",
                "pangolin_lineage": "B",
                "date": "2019-12-30"
            },
            "MT072688": {
                "taxonomy": "Severe acute respiratory syndrome coronavirus 2",
                "country": "USA",
                "collection_date": "2020-03-09"
            },
            "node12+": {
                "taxonomy": "B.1 and close relatives",
                "leaf_count": 41
            }
        }"#,
    );

    write_file(
        root,
        "country_latlngs.json",
        r#"{
            "USA": {"latitude": 37.09024, "longitude": -95.712891, "country": "United States"},
            "Australia": {"latitude": -25.274398, "longitude": 133.775136, "country": "Australia"},
            "Spain": {"latitude": 40.463667, "longitude": -3.74922, "country": "Spain"}
        }"#,
    );

    write_file(
        root,
        "data/db_totals.json",
        r#"{"GISAID_tot": 13541, "GenBank_tot": 229,
            "final_date": "2020-04-27 00:00:00",
            "final_db_tot": 13558, "overlap": 212}"#,
    );

    write_file(
        root,
        "data/SARS-CoV-2.xml",
        r#"<phyloxml><phylogeny rooted="true"></phylogeny></phyloxml>"#,
    );

    write_file(
        root,
        "data/assay_result_json/CDC-N1/EPI_ISL_402125.json",
        r#"{
            "Thermo": {
                "Forward Primer": {"dG": -30.2, "dH": -210.4, "dS": -580.9},
                "Reverse Primer": {"dG": "-28.9", "dH": "-198.7", "dS": "-546.1"},
                "Probe": {"dG": -33.5, "dH": -240.2, "dS": -648.0}
            },
            "Composition": {
                "amplicon length": 72,
                "amplicon range": [28287, 28358],
                "probe range": [28309, 28332],
                "forward primer %GC ": 40.0,
                "reverse primer %GC ": 41.7,
                "probe %GC": 62.5,
                "min 3' clamp": 1,
                "max 3' clamp": 3
            },
            "Alignments": {
                "Forward Primer": {
                    "5'": "5'-GACCCCAAAATCAGCGAAAT-3'",
                    "3'": "3'-CTGGGGTTTTAGTCGCTTTA-5'",
                    "pairing": "||||||||||||||||||||"
                },
                "Reverse Primer": {
                    "5'": "5'-TCTGGTTACTGCCAGTTGAATCTG-3'",
                    "3'": "3'-AGACCAATGACGGTCAACTTAGAC-5'",
                    "pairing": "|||||||||||||||||||||||."
                },
                "Probe": {
                    "5'": "5'-ACCCCGCATTACGTTTGGTGGACC-3'",
                    "3'": "3'-TGGGGCGTAATGCAAACCACCTGG-5'",
                    "pairing": "||||||||||||||||||||||||"
                }
            },
            "Values": {
                "Forward Primer": {"mismatches": "0", "gaps": "0", "tm": "59.1",
                                   "hairpin tm": "35.2", "homodimer tm": "10.8"},
                "Reverse Primer": {"mismatches": 1, "gaps": 0, "tm": 60.3,
                                   "hairpin tm": 41.0, "homodimer tm": 12.2},
                "Probe": {"mismatches": 0, "gaps": 0, "tm": 63.2,
                          "hairpin tm": 44.9, "homodimer tm": 15.6}
            },
            "Common Name": "nucleocapsid phosphoprotein"
        }"#,
    );

    write_file(
        root,
        "data/assay_result_json/CDC-N1/MT072688.json",
        r#"{
            "Values": {
                "Forward Primer": {"mismatches": -1},
                "Reverse Primer": {"mismatches": -1},
                "Probe": {"mismatches": -1}
            }
        }"#,
    );
}

pub async fn load_store(root: &Path) -> ResourceStore {
    let fetcher: Arc<dyn ResourceFetcher> = Arc::new(FsFetcher::new(root));
    ResourceStore::load(fetcher, &ResourceLocations::default()).await
}
