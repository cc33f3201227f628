// System prompt assembled from the loaded reference data.
//
// The prompt carries compact team and player summaries so the model can
// answer simple questions without a tool call, the injury list with the rule
// that injured players are never recommended, and when to use each tool.

use crate::tools::catalog;
use gridline_core::config::EventConfig;
use gridline_core::reference::ReferenceData;

/// Players listed per team in the key-players section.
const KEY_PLAYERS_PER_TEAM: usize = 6;

pub fn system_prompt(data: &ReferenceData, event: &EventConfig) -> String {
    let mut prompt = String::with_capacity(4096);

    prompt.push_str(&format!(
        "You are a sports betting analyst covering {} @ {} (kickoff {}).\n\
         Give specific, data-backed answers. Quote lines and prices exactly as the tools return them.\n\n",
        event.away_team,
        event.home_team,
        event.commence_time.format("%Y-%m-%d %H:%M UTC"),
    ));

    // Teams
    prompt.push_str("## TEAMS\n");
    for team in data.league.teams() {
        prompt.push_str(&format!(
            "- {} ({}): {} | ATS {} ({:.1}%) | O/U {}-{} | {:.1} PPG, {:.1} allowed\n",
            team.name,
            team.abbreviation,
            team.record,
            team.ats,
            team.ats_pct,
            team.overs,
            team.unders,
            team.ppg,
            team.ppg_allowed,
        ));
    }

    // Key players
    prompt.push_str("\n## KEY PLAYERS (per-game averages)\n");
    for team in data.league.teams() {
        for player in data.roster.on_team(&team.key).take(KEY_PLAYERS_PER_TEAM) {
            let averages = player
                .averages
                .iter()
                .map(|(key, value)| format!("{} {:.1}", key.replace('_', " "), value))
                .collect::<Vec<_>>()
                .join(", ");
            let marker = if data.injuries.is_out(&player.name) {
                " [OUT]"
            } else {
                ""
            };
            prompt.push_str(&format!(
                "- {} ({}, {}){}: {}\n",
                player.name, player.position, team.abbreviation, marker, averages
            ));
        }
    }

    // Injuries
    prompt.push_str("\n## INJURIES\n");
    if data.injuries.is_empty() {
        prompt.push_str("No players are currently ruled out.\n");
    } else {
        for entry in data.injuries.entries() {
            prompt.push_str(&format!(
                "- {} ({}): {} - {}\n",
                entry.name, entry.team, entry.status, entry.detail
            ));
        }
        prompt.push_str(
            "NEVER recommend a bet on an injured player. If asked about one, say they are out.\n",
        );
    }

    // Tools
    prompt.push_str("\n## TOOLS\n");
    for spec in catalog() {
        let summary = spec.description.split(". ").next().unwrap_or(spec.description);
        prompt.push_str(&format!("- {}: {}\n", spec.name.as_str(), summary.trim_end_matches('.')));
    }

    prompt.push_str(
        "\n## RULES\n\
         - Use get_live_game_odds, get_player_props, compare_lines, or get_best_bets for any current price. Never invent odds.\n\
         - Use calculate_prop_value before calling a prop a good bet, and find_value_props to look for edges.\n\
         - Use get_player_game_log when recent form matters.\n\
         - If a tool reports an error, say so plainly instead of guessing.\n\
         - Keep answers concise and end with a clear recommendation when one is asked for.\n",
    );

    prompt
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridline_core::injury::{InjuryEntry, InjuryList};
    use gridline_core::reference::ReferenceData;
    use gridline_core::roster::{PlayerProfile, Roster, SeasonTotals};
    use gridline_core::teams::{League, ScoringSplits, TeamProfile};
    use std::collections::BTreeMap;

    fn event() -> EventConfig {
        EventConfig {
            id: "evt".into(),
            home_team: "New England Patriots".into(),
            away_team: "Seattle Seahawks".into(),
            commence_time: "2026-02-08T23:30:00Z".parse().unwrap(),
            match_terms: vec![],
        }
    }

    fn team() -> TeamProfile {
        TeamProfile {
            key: "seahawks".into(),
            name: "Seattle Seahawks".into(),
            abbreviation: "SEA".into(),
            aliases: vec![],
            record: "14-3".into(),
            ats: "12-5".into(),
            ats_pct: 70.6,
            overs: 8,
            unders: 9,
            over_pct: 47.1,
            ppg: 29.2,
            ppg_allowed: 17.1,
            avg_yards: 360.0,
            avg_rush_yards: 120.0,
            avg_pass_yards: 240.0,
            third_down_pct: 41.0,
            turnovers_pg: 1.1,
            home_record: "7-1".into(),
            road_record: "7-2".into(),
            home_ats: "6-2".into(),
            road_ats: "6-3".into(),
            scoring: ScoringSplits {
                q1: 6.0,
                q2: 9.0,
                q3: 6.0,
                q4: 8.0,
                first_half: 15.0,
                second_half: 14.0,
            },
            results: vec![],
            quarters: vec![],
        }
    }

    fn player(name: &str, position: &str) -> PlayerProfile {
        PlayerProfile {
            name: name.into(),
            team: "seahawks".into(),
            position: position.into(),
            aliases: vec![],
            games: 17,
            season: SeasonTotals::default(),
            averages: BTreeMap::from([("rush_yds".to_string(), 63.4)]),
            game_log: vec![],
        }
    }

    fn data(injuries: InjuryList) -> ReferenceData {
        ReferenceData {
            roster: Roster::new(vec![
                player("Kenneth Walker III", "RB"),
                player("Zach Charbonnet", "RB"),
            ]),
            league: League::new(vec![team()]),
            injuries,
            ..Default::default()
        }
    }

    #[test]
    fn prompt_has_teams_players_and_tools() {
        let prompt = system_prompt(&data(InjuryList::default()), &event());
        assert!(prompt.contains("Seattle Seahawks @ New England Patriots"));
        assert!(prompt.contains("- Seattle Seahawks (SEA): 14-3 | ATS 12-5 (70.6%)"));
        assert!(prompt.contains("- Kenneth Walker III (RB, SEA): rush yds 63.4"));
        assert!(prompt.contains("No players are currently ruled out."));
        for spec in catalog() {
            assert!(prompt.contains(spec.name.as_str()), "{} missing", spec.name.as_str());
        }
    }

    #[test]
    fn injured_players_are_flagged_with_rule() {
        let injuries = InjuryList::new(vec![InjuryEntry {
            name: "Zach Charbonnet".into(),
            team: "seahawks".into(),
            status: "OUT".into(),
            detail: "Ankle".into(),
        }]);
        let prompt = system_prompt(&data(injuries), &event());
        assert!(prompt.contains("- Zach Charbonnet (RB, SEA) [OUT]"));
        assert!(prompt.contains("- Zach Charbonnet (seahawks): OUT - Ankle"));
        assert!(prompt.contains("NEVER recommend a bet on an injured player"));
    }
}
