// Text rendering for tool outcomes. The output is read by the model, so it
// favours short labelled lines over tables, except for line comparisons.

use super::outcome::{TeamQuarters, TendencyFocus, ToolOutcome};
use gridline_core::injury::InjuryEntry;
use gridline_core::market::{market_label, Event, MarketSnapshot, OddsQuote};
use gridline_core::odds::format_american;
use gridline_core::roster::PlayerProfile;
use gridline_core::teams::{TeamProfile, TeamTendencies, TrendBook, Venue, ZoneSplit};
use gridline_props::shopping::{best_price, group_by_player};
use gridline_props::{PropValuation, Recommendation, Side, ValueScan, Verdict};

/// Quotes shown per game-odds section.
const MAX_SECTION_LINES: usize = 10;
/// Books shown per player in a props summary.
const MAX_BOOKS_PER_PLAYER: usize = 3;
/// Results shown in a team's game log.
const TEAM_LOG_GAMES: usize = 10;

pub fn render(outcome: &ToolOutcome) -> String {
    let text = match outcome {
        ToolOutcome::GameOdds { event, quotes } => game_odds(event, quotes),
        ToolOutcome::PlayerProps {
            prop_type,
            player_filter,
            snapshots,
            injured,
            errors,
        } => player_props(prop_type, player_filter.as_deref(), snapshots, injured, errors),
        ToolOutcome::NoProps { prop_type, player } => match player {
            Some(p) => format!("No {prop_type} props found for {p}."),
            None => format!("No {prop_type} props currently available from sportsbooks."),
        },
        ToolOutcome::LineComparison {
            player,
            market,
            quotes,
        } => line_comparison(player, market, quotes),
        ToolOutcome::NoLines { player, market } => format!("No {market} lines found for {player}"),
        ToolOutcome::InjuredPlayer(entry) => format!(
            "⚠️ {} is INJURED/OUT ({}) - DO NOT BET on this player!",
            entry.name, entry.detail
        ),
        ToolOutcome::BestGameLines { market, lines } => best_game_lines(market, lines),
        ToolOutcome::TeamStats(team) => team_stats(team),
        ToolOutcome::PlayerStats {
            player,
            team_name,
            injury,
        } => player_stats(player, team_name, injury.as_ref()),
        ToolOutcome::BettingTrends(book) => betting_trends(book),
        ToolOutcome::GameLog { player, injury } => game_log(player, injury.as_ref()),
        ToolOutcome::Tendencies {
            team_name,
            tendencies,
            focus,
        } => play_tendencies(team_name, tendencies, *focus),
        ToolOutcome::QuarterScoring(team) => quarter_scoring(team),
        ToolOutcome::QuarterComparison(teams) => quarter_comparison(teams),
        ToolOutcome::PropValue {
            valuation,
            recent_games,
        } => prop_value(valuation, *recent_games),
        ToolOutcome::ValueScan {
            min_edge,
            book_odds,
            scan,
        } => value_scan(*min_edge, *book_odds, scan),
        ToolOutcome::FetchError(e) => format!("Error fetching odds: {}", e.user_message()),
        ToolOutcome::NotFound(message) | ToolOutcome::NoData(message) => message.clone(),
        ToolOutcome::InvalidInput { tool, message } => {
            format!("Invalid input for {tool}: {message}")
        }
        ToolOutcome::UnknownTool(name) => format!("Unknown tool: {name}"),
    };
    text.trim_end().to_string()
}

// ---------------------------------------------------------------------------
// Number formatting
// ---------------------------------------------------------------------------

/// `249.5` stays as is, `45.0` becomes `45`.
fn num(v: f64) -> String {
    if v.fract() == 0.0 {
        format!("{v:.0}")
    } else {
        format!("{v}")
    }
}

/// Spread-style line with an explicit plus sign.
fn signed(v: f64) -> String {
    if v > 0.0 {
        format!("+{}", num(v))
    } else {
        num(v)
    }
}

fn odds(price: i32) -> String {
    format_american(Some(price))
}

fn opt<T: ToString>(v: Option<T>) -> String {
    v.map_or_else(|| "N/A".to_string(), |x| x.to_string())
}

// ---------------------------------------------------------------------------
// Odds tools
// ---------------------------------------------------------------------------

fn game_odds(event: &Event, quotes: &[OddsQuote]) -> String {
    let mut out = String::from("**LIVE ODDS - ALL SPORTSBOOKS**\n");
    out.push_str(&format!("Game: {}\n", event.matchup()));
    out.push_str(&format!(
        "Date: {}\n",
        event.commence_time.format("%Y-%m-%d %H:%M UTC")
    ));

    if quotes.is_empty() {
        out.push_str("\nNo odds currently available.\n");
        return out;
    }

    let sections = [
        ("spreads", "SPREAD"),
        ("totals", "TOTAL (O/U)"),
        ("h2h", "MONEYLINE"),
    ];
    for (market, title) in sections {
        let lines: Vec<&OddsQuote> = quotes.iter().filter(|q| q.market == market).collect();
        if lines.is_empty() {
            continue;
        }
        out.push_str(&format!("\n**{title}:**\n"));
        for q in lines.into_iter().take(MAX_SECTION_LINES) {
            out.push_str(&format!(
                "  {}: {}{} ({})\n",
                q.bookmaker,
                q.outcome,
                game_line(market, q.line),
                odds(q.price)
            ));
        }
    }
    out
}

/// ` -4.5` for spreads, ` 45.5` for totals, nothing for moneylines.
fn game_line(market: &str, line: Option<f64>) -> String {
    match (market, line) {
        ("spreads", Some(l)) => format!(" {}", signed(l)),
        (_, Some(l)) => format!(" {}", num(l)),
        (_, None) => String::new(),
    }
}

fn injury_banner(out: &mut String, injured: &[InjuryEntry]) {
    if injured.is_empty() {
        return;
    }
    out.push_str("⚠️ Injured players excluded from recommendations\n");
    for entry in injured {
        out.push_str(&format!(
            "🚫 {} is {} ({})\n",
            entry.name, entry.status, entry.detail
        ));
    }
}

fn player_props(
    prop_type: &str,
    player_filter: Option<&str>,
    snapshots: &[MarketSnapshot],
    injured: &[InjuryEntry],
    errors: &[String],
) -> String {
    let mut out = format!("**PLAYER PROPS - {}**\n", prop_type.to_uppercase());
    injury_banner(&mut out, injured);

    for snapshot in snapshots {
        let groups = group_by_player(snapshot, player_filter, MAX_BOOKS_PER_PLAYER);
        if groups.is_empty() {
            continue;
        }
        out.push_str(&format!("\n**{}:**\n", market_label(&snapshot.market)));
        for group in groups {
            out.push_str(&format!("\n  {}:\n", group.player));
            for q in group.quotes {
                let line = q.line.map(|l| format!("{} ", num(l))).unwrap_or_default();
                out.push_str(&format!(
                    "    • {}: {}{} ({})\n",
                    q.bookmaker,
                    line,
                    q.outcome,
                    odds(q.price)
                ));
            }
        }
    }

    if snapshots.is_empty() {
        out.push_str("\nNo props returned.\n");
    }
    if !errors.is_empty() {
        out.push_str("\n⚠️ Some markets could not be fetched:\n");
        for e in errors {
            out.push_str(&format!("  • Error fetching {e}\n"));
        }
    }
    out
}

fn line_comparison(player: &str, market: &str, quotes: &[OddsQuote]) -> String {
    let mut out = format!(
        "**LINE COMPARISON: {} - {}**\n\n",
        player,
        market_label(market)
    );
    out.push_str("| Sportsbook | Line | Over/Under | Odds |\n");
    out.push_str("|------------|------|------------|------|\n");
    for q in quotes {
        out.push_str(&format!(
            "| {} | {} | {} | {} |\n",
            q.bookmaker,
            q.line.map_or_else(|| "N/A".to_string(), num),
            q.outcome,
            odds(q.price)
        ));
    }

    out.push('\n');
    for side in [Side::Over, Side::Under] {
        if let Some(best) = best_price(quotes, side) {
            out.push_str(&format!(
                "✅ **BEST {}:** {} at {} ({})\n",
                side,
                best.bookmaker,
                best.line.map_or_else(|| "N/A".to_string(), num),
                odds(best.price)
            ));
        }
    }
    out
}

fn best_game_lines(market: &str, lines: &[OddsQuote]) -> String {
    let mut out = format!("**BEST LINES - {}**\n", market.to_uppercase());
    if lines.is_empty() {
        out.push_str(&format!("\nNo {market} lines currently available.\n"));
        return out;
    }
    for q in lines {
        out.push_str(&format!(
            "✅ {}{}: {} ({})\n",
            q.outcome,
            game_line(market, q.line),
            q.bookmaker,
            odds(q.price)
        ));
    }
    out
}

// ---------------------------------------------------------------------------
// Team and player reference tools
// ---------------------------------------------------------------------------

fn team_stats(team: &TeamProfile) -> String {
    let mut out = format!("**{}** ({})\n", team.name, team.record);

    out.push_str("\n**BETTING RECORD:**\n");
    out.push_str(&format!("• ATS: {} ({:.1}%)\n", team.ats, team.ats_pct));
    out.push_str(&format!(
        "• O/U: {} overs, {} unders ({:.1}% over)\n",
        team.overs, team.unders, team.over_pct
    ));
    out.push_str(&format!(
        "• Home: {} ({} ATS)\n",
        team.home_record, team.home_ats
    ));
    out.push_str(&format!(
        "• Road: {} ({} ATS)\n",
        team.road_record, team.road_ats
    ));

    out.push_str("\n**TEAM STATS:**\n");
    out.push_str(&format!(
        "• PPG: {:.1} (allowed: {:.1})\n",
        team.ppg, team.ppg_allowed
    ));
    out.push_str(&format!(
        "• Yards: {:.1}/game ({:.1} rush, {:.1} pass)\n",
        team.avg_yards, team.avg_rush_yards, team.avg_pass_yards
    ));
    out.push_str(&format!("• 3rd Down: {:.1}%\n", team.third_down_pct));
    out.push_str(&format!("• Turnovers: {:.1}/game\n", team.turnovers_pg));

    let s = &team.scoring;
    out.push_str("\n**SCORING BY QUARTER:**\n");
    out.push_str(&format!(
        "• Q1: {:.1} | Q2: {:.1} | Q3: {:.1} | Q4: {:.1}\n",
        s.q1, s.q2, s.q3, s.q4
    ));
    out.push_str(&format!(
        "• 1st Half: {:.1} | 2nd Half: {:.1}\n",
        s.first_half, s.second_half
    ));

    let recent = team.recent_results(TEAM_LOG_GAMES);
    if !recent.is_empty() {
        out.push_str("\n**GAME LOG:**\n");
        for g in recent {
            out.push_str(&format!(
                "• Wk {}: {} {} | ATS: {} | {}\n",
                g.week, g.opponent, g.result, g.ats, g.over_under
            ));
        }
    }
    out
}

/// Push a section only when it has at least one line.
fn section(out: &mut String, title: &str, lines: Vec<String>) {
    if lines.is_empty() {
        return;
    }
    out.push_str(&format!("\n**{title}:**\n"));
    for line in lines {
        out.push_str(&format!("• {line}\n"));
    }
}

fn with_average(total: String, player: &PlayerProfile, key: &str) -> String {
    match player.average(key) {
        Some(avg) => format!("{total} ({avg:.1}/game)"),
        None => total,
    }
}

fn passing_lines(p: &PlayerProfile) -> Vec<String> {
    let s = &p.season;
    let mut lines = Vec::new();
    if let Some(yds) = s.pass_yds {
        lines.push(with_average(format!("Yards: {yds}"), p, "pass_yds"));
    }
    if s.pass_td.is_some() || s.pass_int.is_some() {
        lines.push(format!("TDs: {} | INTs: {}", opt(s.pass_td), opt(s.pass_int)));
    }
    if let Some(pct) = s.comp_pct {
        lines.push(format!("Completion: {pct:.1}%"));
    }
    if let Some(avg) = p.average("completions") {
        lines.push(format!("Completions: {avg:.1}/game"));
    }
    lines
}

fn rushing_lines(p: &PlayerProfile) -> Vec<String> {
    let s = &p.season;
    let mut lines = Vec::new();
    if let Some(yds) = s.rush_yds {
        lines.push(with_average(format!("Yards: {yds}"), p, "rush_yds"));
    }
    if let Some(td) = s.rush_td {
        lines.push(format!("TDs: {td}"));
    }
    if let Some(att) = p.average("rush_att") {
        lines.push(format!("Attempts: {att:.1}/game"));
    }
    lines
}

fn receiving_lines(p: &PlayerProfile, with_targets: bool) -> Vec<String> {
    let s = &p.season;
    let mut lines = Vec::new();
    if let Some(rec) = s.receptions {
        lines.push(with_average(format!("Receptions: {rec}"), p, "receptions"));
    }
    if let Some(yds) = s.rec_yds {
        lines.push(with_average(format!("Yards: {yds}"), p, "rec_yds"));
    }
    if let Some(td) = s.rec_td {
        lines.push(format!("TDs: {td}"));
    }
    if with_targets {
        if let Some(t) = p.average("targets") {
            lines.push(format!("Targets/game: {t:.1}"));
        }
        if let Some(rz) = s.red_zone_targets {
            lines.push(format!("Red zone targets: {rz}"));
        }
    }
    lines
}

fn player_stats(p: &PlayerProfile, team_name: &str, injury: Option<&InjuryEntry>) -> String {
    let mut out = format!("**{}** ({}) - {}\n", p.name, p.position, team_name);
    if let Some(entry) = injury {
        out.push_str(&format!("🚫 **STATUS: {}** - {}\n", entry.status, entry.detail));
        out.push_str("⚠️ DO NOT BET ON THIS PLAYER\n");
    }
    out.push_str(&format!("Games Played: {}\n", p.games));

    match p.position.to_uppercase().as_str() {
        "QB" => {
            section(&mut out, "PASSING", passing_lines(p));
            section(&mut out, "RUSHING", rushing_lines(p));
        }
        "RB" => {
            section(&mut out, "RUSHING", rushing_lines(p));
            section(&mut out, "RECEIVING", receiving_lines(p, false));
        }
        _ => {
            section(&mut out, "RECEIVING", receiving_lines(p, true));
            section(&mut out, "RUSHING", rushing_lines(p));
        }
    }

    if let Some(first) = p.season.first_tds {
        out.push_str(&format!("\n• First TDs this season: {first}\n"));
    }
    out
}

fn betting_trends(book: &TrendBook) -> String {
    let mut out = format!("**{}**\n", book.title);
    for s in &book.sections {
        section(&mut out, &s.heading, s.notes.clone());
    }
    out
}

fn game_log(p: &PlayerProfile, injury: Option<&InjuryEntry>) -> String {
    let mut out = format!("**{} - Season Game Log**\n", p.name);
    if let Some(entry) = injury {
        out.push_str(&format!(
            "🚫 **STATUS: {} - Do not include in bet recommendations** ({})\n",
            entry.status, entry.detail
        ));
    }
    for g in &p.game_log {
        out.push_str(&format!("\n**Week {}** vs {}\n", g.week, g.opponent));
        if let Some(pass) = &g.passing {
            out.push_str(&format!("  Pass: {pass}\n"));
        }
        if let Some(rush) = &g.rushing {
            out.push_str(&format!("  Rush: {rush}\n"));
        }
        if let Some(rec) = &g.receiving {
            out.push_str(&format!("  Rec: {rec}\n"));
        }
    }
    out
}

// ---------------------------------------------------------------------------
// Tendencies and quarter scoring
// ---------------------------------------------------------------------------

fn zone(split: &ZoneSplit) -> Vec<String> {
    vec![
        format!("Plays: {}", split.total_plays),
        format!(
            "Run: {:.1}% | Pass: {:.1}% | TD rate: {:.1}%",
            split.run_pct, split.pass_pct, split.td_pct
        ),
    ]
}

fn play_tendencies(team_name: &str, t: &TeamTendencies, focus: TendencyFocus) -> String {
    let mut out = format!("**{team_name} - Play-by-Play Tendencies**\n");
    let all = focus == TendencyFocus::All;

    if all {
        section(
            &mut out,
            "OVERALL",
            vec![
                format!(
                    "Total plays: {} ({} run, {} pass)",
                    t.total_plays, t.run_plays, t.pass_plays
                ),
                format!("Run: {:.1}% | Pass: {:.1}%", t.run_pct, t.pass_pct),
            ],
        );
    }
    if all || focus == TendencyFocus::ByDown {
        let lines = t
            .by_down
            .iter()
            .map(|d| {
                format!(
                    "{} down: {:.1}% run, {:.1}% pass ({:.1} yds/play)",
                    d.down, d.run, d.pass, d.avg_yards
                )
            })
            .collect();
        section(&mut out, "BY DOWN", lines);
    }
    if all || focus == TendencyFocus::RedZone {
        section(&mut out, "RED ZONE", zone(&t.red_zone));
    }
    if all || focus == TendencyFocus::GoalLine {
        section(&mut out, "GOAL LINE", zone(&t.goal_line));
    }

    let situational: Vec<String> = t
        .situational
        .iter()
        .filter(|s| match focus {
            TendencyFocus::All => true,
            TendencyFocus::Situation(key) => s.situation == key,
            _ => false,
        })
        .map(|s| format!("{}: {:.1}% run, {:.1}% pass", s.label, s.run, s.pass))
        .collect();
    if let TendencyFocus::Situation(key) = focus {
        if situational.is_empty() {
            out.push_str(&format!("\nNo {key} data for {team_name}.\n"));
        }
    }
    section(&mut out, "SITUATIONAL", situational);

    if all {
        section(
            &mut out,
            "PASS DEPTH",
            vec![
                format!(
                    "Short: {:.1}% | Deep: {:.1}%",
                    t.pass_depth.short, t.pass_depth.deep
                ),
                format!(
                    "Direction: Left {:.1}% | Middle {:.1}% | Right {:.1}%",
                    t.pass_direction.left, t.pass_direction.middle, t.pass_direction.right
                ),
            ],
        );
        section(
            &mut out,
            "RUN DIRECTION",
            vec![format!(
                "Left {:.1}% | Middle {:.1}% | Right {:.1}%",
                t.run_direction.left, t.run_direction.middle, t.run_direction.right
            )],
        );
    }
    if all || focus == TendencyFocus::TargetShare {
        let lines = t
            .target_share
            .iter()
            .map(|s| format!("{}: {:.1}%", s.player, s.share))
            .collect();
        section(&mut out, "TARGET SHARE", lines);
    }
    if all {
        let e = &t.explosive_plays;
        section(
            &mut out,
            "EXPLOSIVE PLAYS (20+ yards)",
            vec![format!(
                "Total: {} ({} run, {} pass)",
                e.total, e.run_20plus, e.pass_20plus
            )],
        );
    }
    out
}

fn quarter_averages(team: &TeamQuarters) -> Vec<String> {
    let s = &team.summary;
    vec![
        format!(
            "Q1: {:.1} | Q2: {:.1} | Q3: {:.1} | Q4: {:.1}",
            s.averages[0], s.averages[1], s.averages[2], s.averages[3]
        ),
        format!(
            "1st Half: {:.1} | 2nd Half: {:.1} | Total: {:.1}",
            s.avg_first_half, s.avg_second_half, s.avg_total
        ),
    ]
}

fn quarter_scoring(team: &TeamQuarters) -> String {
    let s = &team.summary;
    let mut out = format!(
        "**{} - Quarter-by-Quarter Scoring ({} games)**\n",
        team.team, s.games
    );

    let mut scoreless: Vec<String> = (0..4)
        .map(|i| {
            format!(
                "Q{}: {} of {} ({:.1}%)",
                i + 1,
                s.scoreless[i],
                s.games,
                s.scoreless_pct(i)
            )
        })
        .collect();
    scoreless.push(format!("1st Half: {} of {}", s.scoreless_first_half, s.games));
    scoreless.push(format!("2nd Half: {} of {}", s.scoreless_second_half, s.games));
    section(&mut out, "SCORELESS QUARTERS", scoreless);
    section(&mut out, "AVERAGE SCORING", quarter_averages(team));

    let games = team
        .games
        .iter()
        .map(|g| {
            let venue = match g.venue {
                Venue::Home => "home",
                Venue::Road => "road",
            };
            let ot = g.ot.map(|p| format!(", OT={p}")).unwrap_or_default();
            format!(
                "Wk {} ({}): Q1={}, Q2={}, Q3={}, Q4={}{} (Final: {})",
                g.week, venue, g.q1, g.q2, g.q3, g.q4, ot, g.final_score
            )
        })
        .collect();
    section(&mut out, "GAME-BY-GAME BREAKDOWN", games);
    out
}

fn quarter_comparison(teams: &[TeamQuarters]) -> String {
    let mut out = String::from("**QUARTER SCORING COMPARISON**\n");
    for team in teams {
        let s = &team.summary;
        let mut lines = quarter_averages(team);
        lines.push(format!(
            "Scoreless: Q1 {} ({:.1}%) | Q2 {} ({:.1}%) | Q3 {} ({:.1}%) | Q4 {} ({:.1}%)",
            s.scoreless[0],
            s.scoreless_pct(0),
            s.scoreless[1],
            s.scoreless_pct(1),
            s.scoreless[2],
            s.scoreless_pct(2),
            s.scoreless[3],
            s.scoreless_pct(3)
        ));
        section(
            &mut out,
            &format!("{} ({} games)", team.team, s.games),
            lines,
        );
    }
    out
}

// ---------------------------------------------------------------------------
// Analyzer tools
// ---------------------------------------------------------------------------

fn prop_value(v: &PropValuation, recent_games: usize) -> String {
    let hr = &v.hit_rate;
    let n = hr.games();
    let line = num(hr.line);

    let mut out = format!(
        "**{} - {} Prop Analysis**\n",
        v.player,
        hr.stat.label().to_uppercase()
    );
    if let Some(entry) = &v.injury {
        out.push_str(&format!(
            "🚫 **WARNING: Player is {} - Do not bet** ({})\n",
            entry.status, entry.detail
        ));
    }
    out.push_str(&format!("Line: {line}\n"));

    section(
        &mut out,
        &format!("HISTORICAL DATA ({n} games)"),
        vec![
            format!("Season Average: {:.1}", hr.average),
            format!(
                "Hit OVER {line}: {}/{n} times ({:.1}%)",
                hr.over_count, hr.over_pct
            ),
            format!(
                "Hit UNDER {line}: {}/{n} times ({:.1}%)",
                hr.under_count, hr.under_pct
            ),
        ],
    );
    section(
        &mut out,
        "TRUE ODDS (based on history)",
        vec![
            format!("OVER: {}", format_american(hr.over_fair_odds)),
            format!("UNDER: {}", format_american(hr.under_fair_odds)),
        ],
    );

    out.push_str(&format!(
        "\n**VALUE ANALYSIS vs {} ({:.1}% implied):**\n",
        odds(v.book_odds),
        v.book_implied_pct
    ));
    for side in v.sides() {
        match side.verdict {
            Verdict::Value => {
                out.push_str(&format!(
                    "✅ **{} has VALUE**: {:+.1}% edge\n",
                    side.side, side.edge
                ));
                out.push_str(&format!(
                    "   True probability: {:.1}% vs {:.1}% implied\n",
                    side.hit_pct, v.book_implied_pct
                ));
            }
            Verdict::Bad => out.push_str(&format!(
                "❌ {} is BAD: {:.1}% edge (avoid)\n",
                side.side, side.edge
            )),
            Verdict::Fair => out.push_str(&format!(
                "⚖️ {} is FAIR: {:+.1}% edge\n",
                side.side, side.edge
            )),
        }
    }

    let recent = hr.recent(recent_games);
    if !recent.is_empty() {
        let values: Vec<String> = recent.iter().map(|x| num(*x)).collect();
        section(
            &mut out,
            &format!("RECENT TREND (last {} games)", recent.len()),
            vec![
                values.join(", "),
                format!(
                    "Went OVER {line} in {} of {}",
                    hr.recent_overs(recent_games),
                    recent.len()
                ),
            ],
        );
    }

    match v.recommendation() {
        Recommendation::DoNotBet => {
            out.push_str("\n🚫 **RECOMMENDATION: DO NOT BET** - player is ruled out\n")
        }
        Recommendation::Bet(side) => {
            out.push_str(&format!("\n**RECOMMENDATION:** {side} {line}\n"))
        }
        Recommendation::NoEdge => out.push_str(&format!(
            "\n**RECOMMENDATION:** No clear edge at {}\n",
            odds(v.book_odds)
        )),
    }
    out
}

fn value_scan(min_edge: f64, book_odds: i32, scan: &ValueScan) -> String {
    let implied = gridline_core::odds::american_to_probability(book_odds) * 100.0;
    let mut out = format!("**VALUE PROPS FINDER** (min edge: {}%)\n", num(min_edge));
    out.push_str(&format!(
        "Comparing historical data vs {} ({:.1}% implied)\n",
        odds(book_odds),
        implied
    ));

    if scan.props.is_empty() {
        out.push_str("\nNo significant value found at current lines.\n");
        return out;
    }

    out.push_str(&format!("\n**Found {} value opportunities:**\n", scan.found));
    if scan.found > scan.props.len() {
        out.push_str(&format!("(showing top {})\n", scan.props.len()));
    }
    for p in &scan.props {
        out.push_str(&format!("\n**{}** - {}\n", p.player, p.stat.label()));
        out.push_str(&format!(
            "  {} {}: {:.1}% hit rate ({:+.1}% edge)\n",
            p.side,
            num(p.line),
            p.hit_pct,
            p.edge
        ));
        out.push_str(&format!(
            "  Fair odds: {} | Avg: {:.1} | Games: {}\n",
            format_american(p.fair_odds),
            p.average,
            p.games
        ));
    }
    out
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
