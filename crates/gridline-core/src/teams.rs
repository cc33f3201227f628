// Team reference tables: season profiles, per-game results, quarter-by-quarter
// scoring, play-calling tendencies, and trend notes.

use serde::Deserialize;
use std::io::Read;
use tracing::warn;

// ---------------------------------------------------------------------------
// Profiles
// ---------------------------------------------------------------------------

/// Average points per quarter and half.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct ScoringSplits {
    pub q1: f64,
    pub q2: f64,
    pub q3: f64,
    pub q4: f64,
    pub first_half: f64,
    pub second_half: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TeamProfile {
    pub key: String,
    pub name: String,
    pub abbreviation: String,
    /// Lowercase fragments that identify the team inside a query.
    #[serde(default)]
    pub aliases: Vec<String>,
    pub record: String,
    pub ats: String,
    pub ats_pct: f64,
    pub overs: u32,
    pub unders: u32,
    pub over_pct: f64,
    pub ppg: f64,
    pub ppg_allowed: f64,
    pub avg_yards: f64,
    pub avg_rush_yards: f64,
    pub avg_pass_yards: f64,
    pub third_down_pct: f64,
    pub turnovers_pg: f64,
    pub home_record: String,
    pub road_record: String,
    pub home_ats: String,
    pub road_ats: String,
    pub scoring: ScoringSplits,
    #[serde(skip)]
    pub results: Vec<GameResult>,
    #[serde(skip)]
    pub quarters: Vec<QuarterLine>,
}

impl TeamProfile {
    fn matches(&self, query: &str) -> bool {
        query == self.key
            || query == self.abbreviation.to_lowercase()
            || query.contains(&self.key)
            || query.contains(&self.name.to_lowercase())
            || self
                .aliases
                .iter()
                .any(|a| !a.is_empty() && query.contains(&a.to_lowercase()))
    }

    /// Most recent `n` results, bye weeks skipped.
    pub fn recent_results(&self, n: usize) -> Vec<&GameResult> {
        let start = self.results.len().saturating_sub(n);
        self.results[start..].iter().filter(|g| !g.is_bye()).collect()
    }
}

/// The teams the assistant knows about, in file order.
#[derive(Debug, Clone, Default)]
pub struct League {
    teams: Vec<TeamProfile>,
}

impl League {
    pub fn new(teams: Vec<TeamProfile>) -> Self {
        Self { teams }
    }

    pub fn teams(&self) -> &[TeamProfile] {
        &self.teams
    }

    pub fn is_empty(&self) -> bool {
        self.teams.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&TeamProfile> {
        self.teams.iter().find(|t| t.key == key)
    }

    /// Resolve a free-text team reference ("Seattle", "the Patriots", "NE").
    pub fn find(&self, query: &str) -> Option<&TeamProfile> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return None;
        }
        self.teams.iter().find(|t| t.matches(&query))
    }

    /// `"seahawks, patriots"`, for prompts asking the caller to pick one.
    pub fn key_list(&self) -> String {
        self.teams
            .iter()
            .map(|t| t.key.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub(crate) fn attach_results(&mut self, rows: Vec<(String, GameResult)>) {
        for (team, result) in rows {
            match self.teams.iter_mut().find(|t| t.key == team) {
                Some(profile) => profile.results.push(result),
                None => warn!("result row for unknown team '{}' skipped", team),
            }
        }
    }

    pub(crate) fn attach_quarters(&mut self, rows: Vec<(String, QuarterLine)>) {
        for (team, line) in rows {
            match self.teams.iter_mut().find(|t| t.key == team) {
                Some(profile) => profile.quarters.push(line),
                None => warn!("quarter row for unknown team '{}' skipped", team),
            }
        }
    }
}

#[derive(Debug, Deserialize)]
struct TeamsFile {
    #[serde(default)]
    teams: Vec<TeamProfile>,
}

pub(crate) fn parse_teams(text: &str) -> Result<Vec<TeamProfile>, toml::de::Error> {
    let file: TeamsFile = toml::from_str(text)?;
    Ok(file.teams)
}

// ---------------------------------------------------------------------------
// Per-game results
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct GameResult {
    pub week: String,
    /// Opponent code, `@` prefix for road games, `BYE` for an off week.
    pub opponent: String,
    pub result: String,
    pub ats: String,
    pub over_under: String,
}

impl GameResult {
    pub fn is_bye(&self) -> bool {
        self.result.trim() == "-"
    }
}

#[derive(Debug, Deserialize)]
struct RawResultRow {
    team: String,
    week: String,
    opponent: String,
    result: String,
    ats: String,
    over_under: String,
}

pub(crate) fn load_results_from_reader<R: Read>(
    rdr: R,
) -> Result<Vec<(String, GameResult)>, csv::Error> {
    let mut reader = csv::Reader::from_reader(rdr);
    let mut rows = Vec::new();
    for result in reader.deserialize::<RawResultRow>() {
        match result {
            Ok(raw) => rows.push((
                raw.team.trim().to_string(),
                GameResult {
                    week: raw.week.trim().to_string(),
                    opponent: raw.opponent.trim().to_string(),
                    result: raw.result.trim().to_string(),
                    ats: raw.ats.trim().to_string(),
                    over_under: raw.over_under.trim().to_string(),
                },
            )),
            Err(e) => warn!("skipping malformed team result row: {}", e),
        }
    }
    Ok(rows)
}

// ---------------------------------------------------------------------------
// Quarter scoring
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Venue {
    Home,
    Road,
}

#[derive(Debug, Clone, PartialEq)]
pub struct QuarterLine {
    pub week: String,
    pub venue: Venue,
    pub q1: u32,
    pub q2: u32,
    pub q3: u32,
    pub q4: u32,
    pub ot: Option<u32>,
    pub final_score: u32,
}

impl QuarterLine {
    pub fn quarters(&self) -> [u32; 4] {
        [self.q1, self.q2, self.q3, self.q4]
    }

    pub fn first_half(&self) -> u32 {
        self.q1 + self.q2
    }

    /// Regulation only; overtime is not part of the second half.
    pub fn second_half(&self) -> u32 {
        self.q3 + self.q4
    }
}

/// Derived scoring profile over a set of games.
#[derive(Debug, Clone, PartialEq)]
pub struct QuarterSummary {
    pub games: usize,
    pub scoreless: [usize; 4],
    pub scoreless_first_half: usize,
    pub scoreless_second_half: usize,
    pub averages: [f64; 4],
    pub avg_first_half: f64,
    pub avg_second_half: f64,
    pub avg_total: f64,
}

impl QuarterSummary {
    /// Share of games scoreless in quarter `index` (0-based), one decimal.
    pub fn scoreless_pct(&self, index: usize) -> f64 {
        match self.scoreless.get(index) {
            Some(&count) if self.games > 0 => round1(count as f64 / self.games as f64 * 100.0),
            _ => 0.0,
        }
    }
}

/// Summarize per-game quarter lines. `None` when there are no games.
pub fn summarize_quarters(lines: &[QuarterLine]) -> Option<QuarterSummary> {
    if lines.is_empty() {
        return None;
    }
    let games = lines.len();
    let n = games as f64;

    let mut scoreless = [0usize; 4];
    let mut totals = [0u32; 4];
    for line in lines {
        for (i, points) in line.quarters().into_iter().enumerate() {
            totals[i] += points;
            if points == 0 {
                scoreless[i] += 1;
            }
        }
    }

    let first: u32 = lines.iter().map(QuarterLine::first_half).sum();
    let second: u32 = lines.iter().map(QuarterLine::second_half).sum();
    let total: u32 = lines.iter().map(|l| l.final_score).sum();

    Some(QuarterSummary {
        games,
        scoreless,
        scoreless_first_half: lines.iter().filter(|l| l.first_half() == 0).count(),
        scoreless_second_half: lines.iter().filter(|l| l.second_half() == 0).count(),
        averages: totals.map(|t| round1(f64::from(t) / n)),
        avg_first_half: round1(f64::from(first) / n),
        avg_second_half: round1(f64::from(second) / n),
        avg_total: round1(f64::from(total) / n),
    })
}

#[derive(Debug, Deserialize)]
struct RawQuarterRow {
    team: String,
    week: String,
    venue: Venue,
    q1: u32,
    q2: u32,
    q3: u32,
    q4: u32,
    ot: Option<u32>,
    #[serde(rename = "final")]
    final_score: u32,
}

pub(crate) fn load_quarters_from_reader<R: Read>(
    rdr: R,
) -> Result<Vec<(String, QuarterLine)>, csv::Error> {
    let mut reader = csv::Reader::from_reader(rdr);
    let mut rows = Vec::new();
    for result in reader.deserialize::<RawQuarterRow>() {
        match result {
            Ok(raw) => rows.push((
                raw.team.trim().to_string(),
                QuarterLine {
                    week: raw.week.trim().to_string(),
                    venue: raw.venue,
                    q1: raw.q1,
                    q2: raw.q2,
                    q3: raw.q3,
                    q4: raw.q4,
                    ot: raw.ot,
                    final_score: raw.final_score,
                },
            )),
            Err(e) => warn!("skipping malformed quarter row: {}", e),
        }
    }
    Ok(rows)
}

// ---------------------------------------------------------------------------
// Play-calling tendencies
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DownSplit {
    pub down: String,
    pub run: f64,
    pub pass: f64,
    pub avg_yards: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ZoneSplit {
    pub total_plays: u32,
    pub run_pct: f64,
    pub pass_pct: f64,
    pub td_pct: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SituationSplit {
    pub situation: String,
    pub label: String,
    pub run: f64,
    pub pass: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DirectionSplit {
    pub left: f64,
    pub middle: f64,
    pub right: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DepthSplit {
    pub short: f64,
    pub deep: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ExplosivePlays {
    pub total: u32,
    pub run_20plus: u32,
    pub pass_20plus: u32,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TargetShare {
    pub player: String,
    pub share: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TeamTendencies {
    pub team: String,
    pub total_plays: u32,
    pub run_plays: u32,
    pub pass_plays: u32,
    pub run_pct: f64,
    pub pass_pct: f64,
    #[serde(default)]
    pub by_down: Vec<DownSplit>,
    pub red_zone: ZoneSplit,
    pub goal_line: ZoneSplit,
    #[serde(default)]
    pub situational: Vec<SituationSplit>,
    pub pass_direction: DirectionSplit,
    pub pass_depth: DepthSplit,
    pub run_direction: DirectionSplit,
    pub explosive_plays: ExplosivePlays,
    #[serde(default)]
    pub target_share: Vec<TargetShare>,
}

#[derive(Debug, Deserialize)]
struct TendenciesFile {
    #[serde(default)]
    tendencies: Vec<TeamTendencies>,
}

pub(crate) fn parse_tendencies(text: &str) -> Result<Vec<TeamTendencies>, toml::de::Error> {
    let file: TendenciesFile = toml::from_str(text)?;
    Ok(file.tendencies)
}

// ---------------------------------------------------------------------------
// Trend notes
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TrendSection {
    pub heading: String,
    #[serde(default)]
    pub notes: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TrendBook {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub sections: Vec<TrendSection>,
}

pub(crate) fn parse_trends(text: &str) -> Result<TrendBook, toml::de::Error> {
    toml::from_str(text)
}

fn round1(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
