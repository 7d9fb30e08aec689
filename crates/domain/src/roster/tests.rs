use std::collections::{BTreeSet, HashMap};

use chrono::NaiveDate;
use proptest::prelude::*;

use crate::{EligibilityState, Match, MatchId, MatchStatus, Player, PlayerId, TeamId};

use super::{
    AvailabilityMap, AvailabilityRecord, AvailabilityStatus, HigherAppsMap, Position, RosterInputs,
    RosterQuery, SelectionMap, ViewMode, build_roster, filter_players, project_candidates,
};

fn fixture(team_id: TeamId) -> Match {
    let date = NaiveDate::from_ymd_opt(2026, 10, 24).unwrap_or_default();
    Match::new(
        MatchId::new(),
        team_id,
        2,
        date,
        "Harbour Rovers",
        MatchStatus::Scheduled,
    )
    .unwrap_or_else(|_| unreachable!())
}

fn player(first_name: &str, last_name: &str, team_ids: Vec<TeamId>) -> Player {
    Player::new(PlayerId::new(), first_name, last_name, team_ids).unwrap_or_else(|_| unreachable!())
}

fn position(label: &str) -> Position {
    Position::new(label).unwrap_or_else(|_| unreachable!())
}

fn availability(status: AvailabilityStatus) -> AvailabilityRecord {
    AvailabilityRecord { status, note: None }
}

struct Club {
    fixture: Match,
    players: Vec<Player>,
}

fn club() -> Club {
    let squad = TeamId::new();
    let other = TeamId::new();
    Club {
        fixture: fixture(squad),
        players: vec![
            player("Ava", "Young", vec![squad]),
            player("Ben", "Adams", vec![squad]),
            player("Cara", "Moss", vec![other]),
            player("Dan", "Baker", vec![squad, other]),
            player("Eve", "Clark", vec![]),
        ],
    }
}

fn last_names(candidates: &[super::RosterCandidate]) -> Vec<&str> {
    candidates
        .iter()
        .map(|candidate| candidate.player().last_name())
        .collect()
}

#[test]
fn squad_view_keeps_members_and_selected_players() {
    let club = club();
    let mut selections = SelectionMap::new();
    selections.insert(club.players[2].id(), Some(position("GK")));

    let kept = filter_players(
        &club.fixture,
        &club.players,
        &selections,
        &RosterQuery::view(ViewMode::Squad),
    );
    let names: BTreeSet<&str> = kept.iter().map(|player| player.last_name()).collect();

    assert_eq!(names, BTreeSet::from(["Young", "Adams", "Moss", "Baker"]));
}

#[test]
fn all_view_keeps_every_player() {
    let club = club();
    let kept = filter_players(
        &club.fixture,
        &club.players,
        &SelectionMap::new(),
        &RosterQuery::view(ViewMode::All),
    );
    assert_eq!(kept.len(), club.players.len());
}

#[test]
fn search_overrides_selection_and_squad_filters() {
    let club = club();
    let mut selections = SelectionMap::new();
    selections.insert(club.players[0].id(), None);

    let kept = filter_players(
        &club.fixture,
        &club.players,
        &selections,
        &RosterQuery::search(ViewMode::Squad, "CLA"),
    );

    assert_eq!(kept.len(), 1);
    assert_eq!(kept[0].last_name(), "Clark");
}

#[test]
fn search_matches_first_names() {
    let club = club();
    let kept = filter_players(
        &club.fixture,
        &club.players,
        &SelectionMap::new(),
        &RosterQuery::search(ViewMode::Squad, "car"),
    );

    assert_eq!(kept.len(), 1);
    assert_eq!(kept[0].first_name(), "Cara");
}

#[test]
fn blank_search_falls_back_to_view_mode() {
    let club = club();
    let kept = filter_players(
        &club.fixture,
        &club.players,
        &SelectionMap::new(),
        &RosterQuery::search(ViewMode::Squad, "   "),
    );
    assert_eq!(kept.len(), 3);
}

#[test]
fn annotation_fills_defaults() {
    let club = club();
    let mut selections = SelectionMap::new();
    selections.insert(club.players[0].id(), None);
    selections.insert(club.players[1].id(), Some(position("CB")));
    let mut higher_apps = HigherAppsMap::new();
    higher_apps.insert(club.players[1].id(), 5);
    higher_apps.insert(club.players[3].id(), 7);
    let mut replies = AvailabilityMap::new();
    replies.insert(
        club.players[3].id(),
        AvailabilityRecord {
            status: AvailabilityStatus::Unavailable,
            note: Some("away with school".to_owned()),
        },
    );

    let roster = build_roster(&RosterInputs {
        fixture: &club.fixture,
        players: &club.players,
        selections: &selections,
        availability: &replies,
        higher_apps: &higher_apps,
        limit: 5,
        query: &RosterQuery::view(ViewMode::Squad),
    });
    let by_name: HashMap<&str, &super::RosterCandidate> = roster
        .iter()
        .map(|candidate| (candidate.player().last_name(), candidate))
        .collect();

    let young = by_name["Young"];
    assert!(young.is_selected());
    assert_eq!(young.position().map(Position::as_str), Some("SUB"));
    assert_eq!(young.higher_apps(), 0);
    assert_eq!(young.compliance_status(), EligibilityState::Eligible);
    assert_eq!(young.availability(), &AvailabilityStatus::Unknown);

    let adams = by_name["Adams"];
    assert_eq!(adams.position().map(Position::as_str), Some("CB"));
    assert_eq!(adams.compliance_status(), EligibilityState::Risk);

    let baker = by_name["Baker"];
    assert!(!baker.is_selected());
    assert_eq!(baker.position(), None);
    assert_eq!(baker.compliance_status(), EligibilityState::Ineligible);
    assert_eq!(baker.availability_note(), Some("away with school"));
}

#[test]
fn sort_places_selected_then_available_then_last_name() {
    let players = vec![
        player("Zoe", "Ward", vec![]),
        player("Yan", "Abbott", vec![]),
        player("Xia", "Hughes", vec![]),
        player("Will", "Evans", vec![]),
        player("Val", "Carter", vec![]),
        player("Uma", "Brooks", vec![]),
    ];
    let mut selections = SelectionMap::new();
    selections.insert(players[0].id(), Some(position("ST")));
    selections.insert(players[2].id(), None);
    selections.insert(players[4].id(), Some(position("LB")));
    let mut replies = AvailabilityMap::new();
    replies.insert(players[2].id(), availability(AvailabilityStatus::Unavailable));
    replies.insert(players[1].id(), availability(AvailabilityStatus::Unavailable));
    replies.insert(players[3].id(), availability(AvailabilityStatus::Available));
    replies.insert(
        players[5].id(),
        availability(AvailabilityStatus::Other("Maybe".to_owned())),
    );

    let roster = project_candidates(&players, &selections, &replies, &HigherAppsMap::new(), 5);

    assert_eq!(
        last_names(&roster),
        vec!["Carter", "Ward", "Hughes", "Brooks", "Evans", "Abbott"]
    );
}

#[test]
fn last_names_sort_case_insensitively() {
    let players = vec![
        player("Virgil", "van Dijk", vec![]),
        player("Ashley", "Young", vec![]),
        player("Tony", "Adams", vec![]),
        player("Frenkie", "de Jong", vec![]),
    ];

    let roster = project_candidates(
        &players,
        &SelectionMap::new(),
        &AvailabilityMap::new(),
        &HigherAppsMap::new(),
        5,
    );

    assert_eq!(
        last_names(&roster),
        vec!["Adams", "de Jong", "van Dijk", "Young"]
    );
}

#[test]
fn last_names_differing_only_in_case_keep_a_fixed_order() {
    let players = vec![player("Lia", "macLeod", vec![]), player("Ian", "MacLeod", vec![])];

    let roster = project_candidates(
        &players,
        &SelectionMap::new(),
        &AvailabilityMap::new(),
        &HigherAppsMap::new(),
        5,
    );

    assert_eq!(last_names(&roster), vec!["MacLeod", "macLeod"]);
}

#[test]
fn substitute_position_is_recognised() {
    assert!(Position::substitute().is_substitute());
    assert_eq!(Position::substitute(), position("SUB"));
    assert_eq!(Position::from_stored(Some("  ")), None);
    assert_eq!(Position::from_stored(Some("GK")), Some(position("GK")));
}

#[test]
fn candidate_mutators_mirror_selection_changes() {
    let club = club();
    let mut roster = project_candidates(
        &club.players[..1],
        &SelectionMap::new(),
        &AvailabilityMap::new(),
        &HigherAppsMap::new(),
        5,
    );
    let candidate = &mut roster[0];

    candidate.mark_selected(position("RW"));
    assert!(candidate.is_selected());
    candidate.set_position(position("LW"));
    assert_eq!(candidate.position().map(Position::as_str), Some("LW"));
    candidate.mark_deselected();
    assert!(!candidate.is_selected());
    assert_eq!(candidate.position(), None);
}

#[test]
fn view_mode_parses_storage_values() {
    assert_eq!("all".parse::<ViewMode>().ok(), Some(ViewMode::All));
    assert!("everyone".parse::<ViewMode>().is_err());
}

const NAMES: [&str; 8] = [
    "Adams", "Baker", "Clark", "Doyle", "adams", "Evans", "Moss", "Young",
];

proptest! {
    #[test]
    fn filtering_is_idempotent(
        memberships in proptest::collection::vec(any::<bool>(), 8),
        selected in proptest::collection::vec(any::<bool>(), 8),
        all_view in any::<bool>(),
        search in proptest::option::of("[a-dA-D]{0,2}"),
    ) {
        let squad = TeamId::new();
        let fixture = fixture(squad);
        let players: Vec<Player> = NAMES
            .iter()
            .zip(&memberships)
            .map(|(name, member)| player("Sam", name, if *member { vec![squad] } else { vec![] }))
            .collect();
        let selections: SelectionMap = players
            .iter()
            .zip(&selected)
            .filter(|(_, chosen)| **chosen)
            .map(|(player, _)| (player.id(), None))
            .collect();
        let query = RosterQuery {
            view_mode: if all_view { ViewMode::All } else { ViewMode::Squad },
            search,
        };

        let once: Vec<Player> = filter_players(&fixture, &players, &selections, &query)
            .into_iter()
            .cloned()
            .collect();
        let twice: Vec<Player> = filter_players(&fixture, &once, &selections, &query)
            .into_iter()
            .cloned()
            .collect();

        prop_assert_eq!(once, twice);
    }

    #[test]
    fn selected_candidates_always_lead(
        selected in proptest::collection::vec(any::<bool>(), 8),
        unavailable in proptest::collection::vec(any::<bool>(), 8),
    ) {
        let players: Vec<Player> = NAMES.iter().map(|name| player("Sam", name, vec![])).collect();
        let selections: SelectionMap = players
            .iter()
            .zip(&selected)
            .filter(|(_, chosen)| **chosen)
            .map(|(player, _)| (player.id(), None))
            .collect();
        let replies: AvailabilityMap = players
            .iter()
            .zip(&unavailable)
            .filter(|(_, away)| **away)
            .map(|(player, _)| (player.id(), availability(AvailabilityStatus::Unavailable)))
            .collect();

        let roster = project_candidates(&players, &selections, &replies, &HigherAppsMap::new(), 5);
        let keys: Vec<(bool, bool)> = roster
            .iter()
            .map(|candidate| (!candidate.is_selected(), candidate.availability().is_unavailable()))
            .collect();
        let mut sorted = keys.clone();
        sorted.sort();

        prop_assert_eq!(keys, sorted);
    }
}
