//! Query-layer properties and worked scenarios over the seed collection.

use std::collections::HashSet;
use std::path::PathBuf;

use medcontent_loader::loader::default_seed_path;
use medcontent_loader::{validate_collection, validate_record, ContentStore, LoadConfig};
use medcontent_types::{
    AutoimmuneCategory, Category, ConditionEntry, ContentBody, ContentRecord, EducationalEntry,
    KeyTerm, LevelContent, Levels, Searchable,
};

fn seed_path() -> PathBuf {
    default_seed_path(PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../.."))
}

fn seed_store() -> ContentStore {
    let (store, stats) = ContentStore::load(seed_path(), &LoadConfig::default()).unwrap();
    assert_eq!(stats.rejected, 0);
    store
}

fn ids(records: &[&ContentRecord]) -> Vec<String> {
    records.iter().map(|r| r.id.clone()).collect()
}

fn is_subsequence(sub: &[String], all: &[String]) -> bool {
    let mut rest = all.iter();
    sub.iter().all(|id| rest.any(|candidate| candidate == id))
}

fn condition(id: &str, name: &str, category: &str, description: &str) -> ContentRecord {
    ContentRecord::new(
        id,
        name,
        ContentBody::Condition(ConditionEntry {
            category: category.into(),
            description: description.into(),
            ..Default::default()
        }),
    )
}

// ═══════════════════════════════════════════════════════════════════════════
// Scenarios
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn get_by_id_returns_record_or_not_found() {
    let store = ContentStore::from_records(vec![condition(
        "systemic-lupus-erythematosus",
        "Systemic Lupus Erythematosus (SLE)",
        "systemic",
        "",
    )])
    .unwrap();

    let record = store.get_by_id("systemic-lupus-erythematosus").unwrap();
    assert_eq!(record.name, "Systemic Lupus Erythematosus (SLE)");
    assert_eq!(
        record.category(),
        Some(Category::Autoimmune(AutoimmuneCategory::Systemic))
    );
    assert!(store.get_by_id("nope").is_none());
}

#[test]
fn filter_by_rheumatologic_returns_only_ra() {
    let store = ContentStore::from_records(vec![
        condition("rheumatoid-arthritis", "Rheumatoid Arthritis", "rheumatologic", ""),
        condition("celiac-disease", "Celiac Disease", "gastrointestinal", ""),
    ])
    .unwrap();

    let set: HashSet<_> = Category::parse_any("rheumatologic").into_iter().collect();
    assert_eq!(ids(&store.filter_by_category(&set)), vec!["rheumatoid-arthritis"]);
}

#[test]
fn search_matches_description_text() {
    let store = seed_store();
    assert_eq!(
        ids(&store.search("butterfly")),
        vec!["systemic-lupus-erythematosus"]
    );
    assert!(store.search("xyz123").is_empty());
}

#[test]
fn empty_query_returns_everything_in_order() {
    let store = seed_store();
    let all: Vec<_> = store.records().map(|r| r.id.clone()).collect();
    assert_eq!(ids(&store.search("")), all);
    assert_eq!(store.search("").len(), store.count());
}

#[test]
fn missing_level_is_a_schema_violation() {
    let levels: Levels = [1, 2, 4, 5]
        .into_iter()
        .map(|rank| LevelContent {
            level: rank,
            summary: "s".into(),
            explanation: "e".into(),
            key_terms: vec![KeyTerm {
                term: "t".into(),
                definition: "d".into(),
            }],
            ..Default::default()
        })
        .collect();
    let record = ContentRecord::new(
        "concept-dialysis",
        "Dialysis",
        ContentBody::Educational(EducationalEntry {
            content_type: "process".into(),
            levels,
        }),
    );

    let report = validate_record(&record);
    assert!(!report.is_valid());
    let violation = report.errors().next().unwrap();
    assert_eq!(violation.record_id, "concept-dialysis");
    assert_eq!(violation.field, "levels.3");
    assert!(violation.message.contains("missing level 3"));
}

// ═══════════════════════════════════════════════════════════════════════════
// Properties
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn seed_ids_are_unique_and_collection_is_valid() {
    let store = seed_store();
    let unique: HashSet<_> = store.records().map(|r| r.id.as_str()).collect();
    assert_eq!(unique.len(), store.count());

    let records: Vec<_> = store.records().cloned().collect();
    let report = validate_collection(&records);
    assert!(report.is_valid(), "{:?}", report.violations());
    assert_eq!(report.warning_count(), 0);
}

#[test]
fn every_leveled_record_is_complete() {
    let store = seed_store();
    let mut leveled = 0;
    for record in store.records() {
        if let Some(levels) = record.levels() {
            leveled += 1;
            assert!(levels.is_complete(), "{} has incomplete levels", record.id);
            assert_eq!(levels.ranks().collect::<Vec<_>>(), vec![1, 2, 3, 4, 5]);
            for (rank, content) in levels.iter() {
                assert_eq!(content.level, rank);
            }
        }
    }
    assert!(leveled >= 2);
}

#[test]
fn get_by_id_is_idempotent() {
    let store = seed_store();
    for record in store.records() {
        let first = store.get_by_id(&record.id).cloned();
        let second = store.get_by_id(&record.id).cloned();
        assert_eq!(first, second);
        assert_eq!(first.as_ref(), Some(record));
    }
}

#[test]
fn filter_by_category_has_no_false_positives_or_negatives() {
    let store = seed_store();
    let all: Vec<Category> = store.records().filter_map(|r| r.category()).collect();

    // Every single-category set, then the set of all categories.
    let mut sets: Vec<HashSet<Category>> = all.iter().map(|c| HashSet::from([*c])).collect();
    sets.push(all.iter().copied().collect());

    for set in sets {
        let result = store.filter_by_category(&set);
        for record in &result {
            assert!(set.contains(&record.category().unwrap()));
        }
        let expected = store
            .records()
            .filter(|r| r.category().is_some_and(|c| set.contains(&c)))
            .count();
        assert_eq!(result.len(), expected);
    }

    assert!(store.filter_by_category(&HashSet::new()).is_empty());
}

#[test]
fn narrowing_a_query_never_adds_matches() {
    let store = seed_store();
    let chains = [
        ["r", "ra", "rash", "malar rash"],
        ["a", "an", "ant", "anti-"],
        ["d", "di", "dia", "dialysis"],
    ];
    for chain in chains {
        for pair in chain.windows(2) {
            let broad: HashSet<_> = ids(&store.search(pair[0])).into_iter().collect();
            let narrow: HashSet<_> = ids(&store.search(pair[1])).into_iter().collect();
            assert!(narrow.is_subset(&broad), "{:?} vs {:?}", pair[1], pair[0]);
        }
    }
}

#[test]
fn results_preserve_collection_order() {
    let store = seed_store();
    let all: Vec<_> = store.records().map(|r| r.id.clone()).collect();

    for query in ["a", "rash", "renal", "pain", "LDL"] {
        assert!(is_subsequence(&ids(&store.search(query)), &all));
    }

    let every: HashSet<Category> = store.records().filter_map(|r| r.category()).collect();
    assert_eq!(ids(&store.filter_by_category(&every)), all);
}

#[test]
fn search_is_case_insensitive_across_nested_text() {
    let store = seed_store();
    // Level 4 clinical notes of the dialysis record.
    assert_eq!(ids(&store.search("ETHYLENE GLYCOL")), vec!["concept-dialysis"]);
    // Localized name.
    assert_eq!(ids(&store.search("cólico")), vec!["acute-renal-colic"]);
    // Tag keyword.
    assert!(ids(&store.search("kidney stone")).contains(&"acute-renal-colic".to_string()));
}

#[cfg(feature = "parallel")]
#[test]
fn parallel_search_matches_serial_search() {
    let store = seed_store();
    for query in ["", "a", "rash", "statin", "nothing-matches-this"] {
        assert_eq!(ids(&store.search(query)), ids(&store.search_parallel(query)));
    }
}
