//! Torrent snapshot state and the pure view pipeline.
//!
//! # Design
//! - Every successful load replaces the snapshot wholesale; failures leave
//!   the prior snapshot in place.
//! - Triage partitions are derived per call and never stored.
//! - Selection is keyed by infohash and survives refreshes and tab switches;
//!   hashes that leave the snapshot go inert instead of being purged.

use relocarr_api_models::Torrent;
use std::cmp::Ordering;
use std::collections::BTreeSet;

/// Backend state token for torrents blocked fetching metadata.
pub const STUCK_STATE: &str = "metaDL";

/// Triage tabs presented by the console.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Tab {
    /// Torrents whose save path violates the placement policy.
    #[default]
    Misplaced,
    /// Torrents placed correctly.
    Ok,
    /// Torrents stuck fetching metadata.
    Stuck,
}

impl Tab {
    /// All tabs in display order.
    #[must_use]
    pub const fn all() -> [Self; 3] {
        [Self::Misplaced, Self::Ok, Self::Stuck]
    }

    /// Display label for the tab strip.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Misplaced => "Misplaced",
            Self::Ok => "OK",
            Self::Stuck => "Stuck",
        }
    }

    /// Membership predicate for this tab's partition.
    ///
    /// The partitions are not disjoint: a misplaced torrent stuck fetching
    /// metadata belongs to both `Misplaced` and `Stuck`.
    #[must_use]
    pub fn contains(self, torrent: &Torrent) -> bool {
        match self {
            Self::Misplaced => torrent.misplaced,
            Self::Ok => !torrent.misplaced,
            Self::Stuck => torrent.state == STUCK_STATE,
        }
    }
}

/// Sortable columns of the torrent table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum SortKey {
    /// Display name.
    #[default]
    Name,
    /// Infohash.
    Hash,
    /// Backend status token.
    State,
    /// Completion fraction.
    Progress,
    /// Payload size in bytes.
    Size,
    /// Current on-disk location.
    SavePath,
    /// Placement policy verdict.
    Misplaced,
    /// Recommended destination.
    SuggestedTarget,
}

/// Sort direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum SortDir {
    /// Ascending order.
    #[default]
    Asc,
    /// Descending order.
    Desc,
}

/// Active sort key and direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct SortSpec {
    /// Column the table is ordered by.
    pub key: SortKey,
    /// Direction applied to that column.
    pub dir: SortDir,
}

impl SortSpec {
    /// Apply a header click: the active key flips direction, a new key takes
    /// over with the direction reset to ascending.
    #[must_use]
    pub fn toggled(self, key: SortKey) -> Self {
        if self.key == key {
            let dir = match self.dir {
                SortDir::Asc => SortDir::Desc,
                SortDir::Desc => SortDir::Asc,
            };
            Self { key, dir }
        } else {
            Self {
                key,
                dir: SortDir::Asc,
            }
        }
    }
}

/// Comparable projection of one torrent field.
enum SortValue<'a> {
    Fraction(f64),
    Bytes(u64),
    Flag(bool),
    Text(&'a str),
}

impl SortValue<'_> {
    /// Comparison policy: numeric when both sides are numeric, boolean with
    /// `false < true`, otherwise case-insensitive text with missing values
    /// treated as empty strings.
    fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Fraction(a), Self::Fraction(b)) => a.total_cmp(b),
            (Self::Bytes(a), Self::Bytes(b)) => a.cmp(b),
            (Self::Flag(a), Self::Flag(b)) => a.cmp(b),
            (a, b) => a.folded().cmp(&b.folded()),
        }
    }

    fn folded(&self) -> String {
        match self {
            Self::Fraction(value) => value.to_string(),
            Self::Bytes(value) => value.to_string(),
            Self::Flag(value) => value.to_string(),
            Self::Text(value) => value.to_lowercase(),
        }
    }
}

fn sort_value(torrent: &Torrent, key: SortKey) -> SortValue<'_> {
    match key {
        SortKey::Name => SortValue::Text(&torrent.name),
        SortKey::Hash => SortValue::Text(&torrent.hash),
        SortKey::State => SortValue::Text(&torrent.state),
        SortKey::Progress => SortValue::Fraction(torrent.progress),
        SortKey::Size => SortValue::Bytes(torrent.size),
        SortKey::SavePath => SortValue::Text(&torrent.save_path),
        SortKey::Misplaced => SortValue::Flag(torrent.misplaced),
        SortKey::SuggestedTarget => {
            SortValue::Text(torrent.suggested_target.as_deref().unwrap_or(""))
        }
    }
}

/// Monotonic request ids guarding overlapping snapshot loads.
///
/// A response is accepted only when its id is newer than the last accepted
/// one, so a slow early response cannot clobber a newer snapshot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct LoadSequence {
    issued: u64,
    accepted: u64,
}

impl LoadSequence {
    /// Issue the id for a new load request.
    pub fn begin(&mut self) -> u64 {
        self.issued += 1;
        self.issued
    }

    /// Try to accept a completed response; stale responses are rejected.
    pub fn accept(&mut self, id: u64) -> bool {
        if id > self.accepted {
            self.accepted = id;
            true
        } else {
            false
        }
    }
}

/// Torrent slice of the app store.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct TorrentsState {
    /// Last successfully loaded snapshot.
    pub items: Vec<Torrent>,
    /// Active triage tab.
    pub tab: Tab,
    /// Search query applied before sorting.
    pub query: String,
    /// Active sort key and direction.
    pub sort: SortSpec,
    /// Bulk-selection set, keyed by infohash.
    pub selected: BTreeSet<String>,
    /// Stale-response guard for overlapping loads.
    pub loads: LoadSequence,
}

/// Replace the snapshot with a freshly loaded one.
///
/// Selection is deliberately left untouched: hashes that disappeared from
/// the snapshot remain in the set as inert entries until the operator clears
/// them.
pub fn set_snapshot(state: &mut TorrentsState, items: Vec<Torrent>) {
    state.items = items;
}

/// Torrents belonging to a tab's partition, in snapshot order.
#[must_use]
pub fn partition(items: &[Torrent], tab: Tab) -> Vec<&Torrent> {
    items.iter().filter(|t| tab.contains(t)).collect()
}

/// Filter predicate: case-insensitive substring match on the name, or
/// case-sensitive substring match on the hash.
#[must_use]
pub fn matches_query(torrent: &Torrent, query: &str) -> bool {
    torrent
        .name
        .to_lowercase()
        .contains(&query.to_lowercase())
        || torrent.hash.contains(query)
}

/// Derive the rendered rows: partition, then filter, then stable sort.
#[must_use]
pub fn visible_rows(items: &[Torrent], tab: Tab, query: &str, sort: SortSpec) -> Vec<Torrent> {
    let mut rows: Vec<Torrent> = items
        .iter()
        .filter(|t| tab.contains(t))
        .filter(|t| matches_query(t, query))
        .cloned()
        .collect();
    rows.sort_by(|a, b| {
        let ordering = sort_value(a, sort.key).compare(&sort_value(b, sort.key));
        match sort.dir {
            SortDir::Asc => ordering,
            SortDir::Desc => ordering.reverse(),
        }
    });
    rows
}

/// Toggle one hash in the selection set.
pub fn toggle_selection(selected: &mut BTreeSet<String>, hash: &str) {
    if !selected.remove(hash) {
        selected.insert(hash.to_string());
    }
}

/// Set membership for exactly the given hashes, leaving all others untouched.
///
/// The header "select all" control is view-scoped: it passes the rendered
/// hash set here, while per-row toggles stay global-keyed.
pub fn set_selection(selected: &mut BTreeSet<String>, hashes: &[String], value: bool) {
    for hash in hashes {
        if value {
            selected.insert(hash.clone());
        } else {
            selected.remove(hash);
        }
    }
}

/// Selected hashes in deterministic order.
#[must_use]
pub fn selected_hashes(selected: &BTreeSet<String>) -> Vec<String> {
    selected.iter().cloned().collect()
}

/// Human-friendly byte count using a 1024-step unit ladder.
#[must_use]
pub fn format_bytes(bytes: u64) -> String {
    const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];
    let mut unit = 0;
    let mut scale = 1u64;
    while bytes / scale >= 1024 && unit < UNITS.len() - 1 {
        scale *= 1024;
        unit += 1;
    }
    let tenths = bytes.saturating_mul(10) / scale;
    format!("{}.{} {}", tenths / 10, tenths % 10, UNITS[unit])
}

/// Completion fraction rendered as a percentage with one decimal.
#[must_use]
pub fn format_progress(progress: f64) -> String {
    format!("{:.1}%", progress * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn torrent(hash: &str, name: &str) -> Torrent {
        Torrent {
            name: name.to_string(),
            hash: hash.to_string(),
            size: 0,
            save_path: "/data/downloads".to_string(),
            state: "uploading".to_string(),
            progress: 1.0,
            category: None,
            tags: None,
            misplaced: false,
            suggested_target: None,
        }
    }

    #[test]
    fn misplaced_metadl_torrent_appears_in_both_partitions() {
        let mut stuck = torrent("aaa", "alpha");
        stuck.misplaced = true;
        stuck.state = STUCK_STATE.to_string();
        let items = vec![stuck, torrent("bbb", "beta")];

        let misplaced = partition(&items, Tab::Misplaced);
        let stuck_view = partition(&items, Tab::Stuck);
        let ok = partition(&items, Tab::Ok);
        assert!(misplaced.iter().any(|t| t.hash == "aaa"));
        assert!(stuck_view.iter().any(|t| t.hash == "aaa"));
        assert!(ok.iter().all(|t| t.hash != "aaa"));
        assert!(ok.iter().any(|t| t.hash == "bbb"));
    }

    #[test]
    fn filter_matches_name_case_insensitively_and_hash_exactly() {
        let row = torrent("AbCdEf123", "Ubuntu.ISO");
        assert!(matches_query(&row, "ubuntu"));
        assert!(matches_query(&row, "SO"));
        assert!(matches_query(&row, "AbC"));
        assert!(!matches_query(&row, "abcdef"));
        assert!(matches_query(&row, ""));
    }

    #[test]
    fn sort_by_state_is_stable_among_ties() {
        let mut items = vec![
            torrent("h1", "first"),
            torrent("h2", "second"),
            torrent("h3", "third"),
        ];
        for item in &mut items {
            item.state = "uploading".to_string();
        }
        let sort = SortSpec {
            key: SortKey::State,
            dir: SortDir::Asc,
        };
        let rows = visible_rows(&items, Tab::Ok, "", sort);
        let hashes: Vec<&str> = rows.iter().map(|t| t.hash.as_str()).collect();
        assert_eq!(hashes, ["h1", "h2", "h3"]);
    }

    #[test]
    fn sort_by_progress_orders_numerically() {
        let mut a = torrent("h1", "a");
        a.progress = 0.10;
        let mut b = torrent("h2", "b");
        b.progress = 0.9;
        let mut c = torrent("h3", "c");
        c.progress = 0.25;
        let sort = SortSpec {
            key: SortKey::Progress,
            dir: SortDir::Desc,
        };
        let rows = visible_rows(&[a, b, c], Tab::Ok, "", sort);
        let hashes: Vec<&str> = rows.iter().map(|t| t.hash.as_str()).collect();
        assert_eq!(hashes, ["h2", "h3", "h1"]);
    }

    #[test]
    fn sort_treats_missing_targets_as_empty_strings() {
        let mut with_target = torrent("h1", "a");
        with_target.misplaced = true;
        with_target.suggested_target = Some("/mnt/user/media".to_string());
        let mut without_target = torrent("h2", "b");
        without_target.misplaced = true;
        let sort = SortSpec {
            key: SortKey::SuggestedTarget,
            dir: SortDir::Asc,
        };
        let rows = visible_rows(&[with_target, without_target], Tab::Misplaced, "", sort);
        assert_eq!(rows[0].hash, "h2");
        assert_eq!(rows[1].hash, "h1");
    }

    #[test]
    fn header_click_flips_then_resets_direction() {
        let initial = SortSpec::default();
        let flipped = initial.toggled(SortKey::Name);
        assert_eq!(flipped.dir, SortDir::Desc);
        let switched = flipped.toggled(SortKey::Size);
        assert_eq!(switched.key, SortKey::Size);
        assert_eq!(switched.dir, SortDir::Asc);
    }

    #[test]
    fn selection_survives_tab_switches_and_refreshes() {
        let mut state = TorrentsState::default();
        let mut misplaced = torrent("h1", "alpha");
        misplaced.misplaced = true;
        set_snapshot(&mut state, vec![misplaced, torrent("h2", "beta")]);

        toggle_selection(&mut state.selected, "h1");
        state.tab = Tab::Stuck;
        assert_eq!(selected_hashes(&state.selected), ["h1"]);

        set_snapshot(&mut state, vec![torrent("h2", "beta")]);
        assert_eq!(selected_hashes(&state.selected), ["h1"]);
    }

    #[test]
    fn set_selection_is_scoped_to_the_given_hashes() {
        let mut selected = BTreeSet::new();
        toggle_selection(&mut selected, "other");
        let visible = vec!["h1".to_string(), "h2".to_string()];
        set_selection(&mut selected, &visible, true);
        assert_eq!(selected_hashes(&selected), ["h1", "h2", "other"]);
        set_selection(&mut selected, &visible, false);
        assert_eq!(selected_hashes(&selected), ["other"]);
    }

    #[test]
    fn load_sequence_rejects_stale_responses() {
        let mut loads = LoadSequence::default();
        let first = loads.begin();
        let second = loads.begin();
        assert!(loads.accept(second));
        assert!(!loads.accept(first));
        let third = loads.begin();
        assert!(loads.accept(third));
    }

    #[test]
    fn byte_formatting_walks_the_unit_ladder() {
        assert_eq!(format_bytes(0), "0.0 B");
        assert_eq!(format_bytes(1536), "1.5 KB");
        assert_eq!(format_bytes(1_073_741_824), "1.0 GB");
        assert_eq!(format_bytes(2_748_779_069_440), "2.5 TB");
    }

    #[test]
    fn progress_formatting_has_one_decimal() {
        assert_eq!(format_progress(0.0), "0.0%");
        assert_eq!(format_progress(0.125), "12.5%");
        assert_eq!(format_progress(1.0), "100.0%");
    }
}
