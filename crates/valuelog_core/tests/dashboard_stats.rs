use valuelog_core::{
    compute_dashboard_stats, entries_for_child, EntryDraft, ExperienceEntry, Language,
    LocaleTable, TagCount,
};

fn entry(id: &str, child_id: &str, date: &str, satisfaction: u8) -> ExperienceEntry {
    let mut draft = EntryDraft::new(format!("Entry {id}"), date);
    draft.satisfaction = satisfaction;
    let mut entry = draft.into_entry("u1", child_id).expect("valid entry");
    entry.id = id.to_string();
    entry
}

fn tagged(mut entry: ExperienceEntry, activity: &[&str], competency: &[&str]) -> ExperienceEntry {
    entry.activity_tags = activity.iter().map(|tag| tag.to_string()).collect();
    entry.competency_tags = competency.iter().map(|tag| tag.to_string()).collect();
    entry
}

fn count(name: &str, value: u32) -> TagCount {
    TagCount {
        name: name.to_string(),
        value,
    }
}

fn english() -> LocaleTable {
    LocaleTable::for_language(Language::En)
}

#[test]
fn no_selected_child_yields_empty_stats() {
    let entries = vec![entry("a", "c1", "2025-01-01", 4)];
    let stats = compute_dashboard_stats(&entries, None, &english());

    assert_eq!(stats.total_entries, 0);
    assert_eq!(stats.avg_satisfaction, 0.0);
    assert!(stats.activity_distribution.is_empty());
    assert!(stats.competency_distribution.is_empty());
}

#[test]
fn child_without_entries_has_zero_average() {
    let entries = vec![entry("a", "c1", "2025-01-01", 4)];
    let stats = compute_dashboard_stats(&entries, Some("c2"), &english());

    assert_eq!(stats.total_entries, 0);
    assert_eq!(stats.avg_satisfaction, 0.0);
}

#[test]
fn counts_and_average_cover_only_selected_child() {
    let entries = vec![
        entry("a", "c1", "2025-01-01", 5),
        entry("b", "c2", "2025-01-02", 1),
        entry("c", "c1", "2025-01-03", 4),
        entry("d", "c1", "2025-01-04", 2),
    ];
    let stats = compute_dashboard_stats(&entries, Some("c1"), &english());

    assert_eq!(stats.total_entries, 3);
    // 11 / 3 = 3.666..
    assert_eq!(stats.avg_satisfaction, 3.7);
}

#[test]
fn bucket_totals_match_tag_occurrences() {
    let entries = vec![
        tagged(
            entry("a", "c1", "2025-03-01", 5),
            &["Science", "Leadership"],
            &["Grit"],
        ),
        tagged(entry("b", "c1", "2025-03-02", 4), &["Science"], &[]),
        tagged(
            entry("c", "c1", "2025-03-03", 3),
            &["Robotics"],
            &["Grit", "Creativity"],
        ),
        tagged(entry("d", "c2", "2025-03-04", 3), &["Science"], &["Grit"]),
    ];
    let stats = compute_dashboard_stats(&entries, Some("c1"), &english());

    assert_eq!(
        stats.activity_distribution,
        vec![count("Robotics", 1), count("Science", 2), count("Leadership", 1)]
    );
    assert_eq!(
        stats.competency_distribution,
        vec![count("Grit", 2), count("Creativity", 1)]
    );

    let activity_total: u32 = stats.activity_distribution.iter().map(|c| c.value).sum();
    assert_eq!(activity_total, 4);
}

#[test]
fn buckets_use_localized_labels() {
    let entries = vec![tagged(
        entry("a", "c1", "2025-03-01", 5),
        &["Music", "Chess"],
        &["Problem Solving"],
    )];
    let table = LocaleTable::for_language(Language::Ja);
    let stats = compute_dashboard_stats(&entries, Some("c1"), &table);

    assert_eq!(
        stats.activity_distribution,
        vec![count("音楽", 1), count("Chess", 1)]
    );
    assert_eq!(stats.competency_distribution.len(), 1);
    assert_ne!(stats.competency_distribution[0].name, "Problem Solving");
}

#[test]
fn keys_sharing_a_label_share_a_bucket() {
    let entries = vec![
        tagged(entry("a", "c1", "2025-03-01", 5), &["Art"], &[]),
        tagged(entry("b", "c1", "2025-03-02", 5), &["Arte"], &[]),
    ];
    let table = LocaleTable::for_language(Language::Es);
    let stats = compute_dashboard_stats(&entries, Some("c1"), &table);

    assert_eq!(stats.activity_distribution, vec![count("Arte", 2)]);

    let english_stats = compute_dashboard_stats(&entries, Some("c1"), &english());
    assert_eq!(english_stats.activity_distribution.len(), 2);
}

#[test]
fn timeline_is_newest_first_and_stable_for_equal_dates() {
    let entries = vec![
        entry("old", "c1", "2024-12-31", 3),
        entry("same-1", "c1", "2025-06-01", 3),
        entry("other", "c2", "2026-01-01", 3),
        entry("new", "c1", "2025-07-15", 3),
        entry("same-2", "c1", "2025-06-01", 3),
    ];
    let ids: Vec<&str> = entries_for_child(&entries, "c1")
        .into_iter()
        .map(|entry| entry.id.as_str())
        .collect();

    assert_eq!(ids, vec!["new", "same-1", "same-2", "old"]);
}

#[test]
fn stats_serialize_with_camel_case_fields() {
    let entries = vec![tagged(entry("a", "c1", "2025-03-01", 4), &["Art"], &[])];
    let stats = compute_dashboard_stats(&entries, Some("c1"), &english());
    let json = serde_json::to_value(&stats).unwrap();

    assert_eq!(json["totalEntries"], 1);
    assert_eq!(json["avgSatisfaction"], 4.0);
    assert_eq!(json["activityDistribution"][0]["name"], "Art");
    assert_eq!(json["activityDistribution"][0]["value"], 1);
}
