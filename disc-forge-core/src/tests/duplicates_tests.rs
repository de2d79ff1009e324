use super::*;
use crate::identifier::SERIES_KEY_LEN;
use crate::region::Region;
use std::path::PathBuf;

fn title(identifier: &str) -> TitleRecord {
    TitleRecord {
        identifier: identifier.to_string(),
        region: Region::from_identifier(identifier),
        name: format!("Game {identifier}"),
        source_path: PathBuf::from(format!("games/{identifier}/{identifier}.rvz")),
    }
}

#[test]
fn groups_regional_variants() {
    let titles = vec![title("ABCE01"), title("ABCP01"), title("XYZJ01")];
    let groups = detect_duplicates(&titles, SERIES_KEY_LEN);

    assert_eq!(groups.all().len(), 2);
    let dups: Vec<_> = groups.duplicates().collect();
    assert_eq!(dups.len(), 1);
    assert_eq!(dups[0].0, "ABC");
    assert_eq!(dups[0].1.len(), 2);
}

#[test]
fn every_member_yields_one_entry() {
    let titles = vec![
        title("ABCE01"),
        title("ABCP01"),
        title("ABCJ01"),
        title("DEFE01"),
        title("DEFP01"),
    ];
    let groups = detect_duplicates(&titles, SERIES_KEY_LEN);
    let entries = groups.duplicate_entries();

    assert_eq!(entries.len(), 5);
    assert_eq!(entries.iter().filter(|e| e.series_key == "ABC").count(), 3);
    assert_eq!(entries.iter().filter(|e| e.series_key == "DEF").count(), 2);
}

#[test]
fn singleton_series_yields_no_entry() {
    let titles = vec![title("ABCE01"), title("XYZE01")];
    let groups = detect_duplicates(&titles, SERIES_KEY_LEN);

    assert!(!groups.has_duplicates());
    assert_eq!(groups.duplicate_count(), 0);
    assert!(groups.duplicate_entries().is_empty());
    // Singletons still show up in the full grouping
    assert_eq!(groups.all().len(), 2);
}

#[test]
fn members_keep_accumulation_order() {
    let titles = vec![title("ABCP01"), title("ABCE01")];
    let groups = detect_duplicates(&titles, SERIES_KEY_LEN);
    let entries = groups.duplicate_entries();

    assert_eq!(entries[0].identifier, "ABCP01");
    assert_eq!(entries[0].region, Region::Eu);
    assert_eq!(entries[1].identifier, "ABCE01");
    assert_eq!(entries[1].region, Region::Us);
}

#[test]
fn same_identifier_twice_is_kept() {
    let titles = vec![title("ABCE01"), title("ABCE01")];
    let groups = detect_duplicates(&titles, SERIES_KEY_LEN);
    assert_eq!(groups.duplicate_entries().len(), 2);
}

#[test]
fn entries_carry_title_fields() {
    let titles = vec![title("ABCE01"), title("ABCP01")];
    let groups = detect_duplicates(&titles, SERIES_KEY_LEN);
    let entry = &groups.duplicate_entries()[0];

    assert_eq!(entry.name, "Game ABCE01");
    assert_eq!(entry.source_path, PathBuf::from("games/ABCE01/ABCE01.rvz"));
}

#[test]
fn empty_input() {
    let groups = detect_duplicates(&[], SERIES_KEY_LEN);
    assert!(groups.all().is_empty());
    assert!(!groups.has_duplicates());
}

#[test]
fn custom_key_length() {
    let titles = vec![title("ABCE01"), title("ABCP01")];
    let groups = detect_duplicates(&titles, 4);
    assert!(!groups.has_duplicates());
}
