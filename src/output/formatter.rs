use std::io::IsTerminal;
use owo_colors::OwoColorize;
use terminal_size::{Width, terminal_size};

use crate::history::RoundRecord;
use crate::scoring::{performance, RoundOutcome, SeriesStanding};

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Truncate name to fit available width, accounting for Unicode
pub fn truncate_name(name: &str, max_width: usize) -> String {
    let chars: Vec<char> = name.chars().collect();
    if chars.len() <= max_width {
        name.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

/// Wrap a discarded score in parentheses
fn score_cell(value: impl std::fmt::Display, discarded: bool) -> String {
    if discarded {
        format!("({})", value)
    } else {
        value.to_string()
    }
}

fn rank_label(rank: Option<crate::scoring::Rank>) -> String {
    rank.map(|r| r.to_string()).unwrap_or_else(|| "-".to_string())
}

/// Name column width: whatever is left of the terminal after the fixed columns,
/// never below 12. Pipes get the full name.
fn name_width(fixed_width: usize, longest: usize) -> usize {
    match get_terminal_width() {
        Some(width) if width > fixed_width + 12 => longest.min(width - fixed_width),
        Some(_) => longest.min(12),
        None => longest,
    }
}

/// Lay out pre-rendered rows as left-aligned label columns followed by
/// right-aligned score columns.
fn layout(header: &[String], rows: &[Vec<String>], text_columns: usize, use_colors: bool) -> String {
    let mut widths: Vec<usize> = header.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }

    let render = |cells: &[String]| -> String {
        cells
            .iter()
            .enumerate()
            .map(|(i, cell)| {
                if i < text_columns {
                    format!("{:<width$}", cell, width = widths[i])
                } else {
                    format!("{:>width$}", cell, width = widths[i])
                }
            })
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let header_line = render(header);
    let mut lines = Vec::with_capacity(rows.len() + 1);
    if use_colors {
        lines.push(header_line.bold().to_string());
    } else {
        lines.push(header_line);
    }

    for row in rows {
        let line = render(row);
        // Leader rows stand out
        if use_colors && row.first().map(|r| r.trim_end_matches('=')) == Some("1") {
            lines.push(line.green().to_string());
        } else {
            lines.push(line);
        }
    }

    lines.join("\n")
}

/// Format a scored round as a table: rank, sail, name, one column per race
/// (discards in parentheses), wins, gross and net.
pub fn format_round_table(outcome: &RoundOutcome, use_colors: bool) -> String {
    if outcome.scores.is_empty() {
        return "No competitors scored.".to_string();
    }

    let mut header = vec!["Rank".to_string(), "Sail".to_string(), "Name".to_string()];
    header.extend((1..=outcome.race_count).map(|r| format!("R{}", r)));
    header.extend(["Wins", "Gross", "Net"].iter().map(|s| s.to_string()));

    let longest = outcome
        .scores
        .iter()
        .map(|s| s.competitor.name.chars().count())
        .max()
        .unwrap_or(0);
    let fixed_width = 4 + 8 + outcome.race_count * 6 + 3 * 7;
    let width = name_width(fixed_width, longest);

    let rows: Vec<Vec<String>> = outcome
        .scores
        .iter()
        .map(|score| {
            let mut row = vec![
                rank_label(score.rank),
                score.competitor.sail_number.clone(),
                truncate_name(&score.competitor.name, width),
            ];
            row.extend(
                score
                    .placements
                    .iter()
                    .zip(&score.discards)
                    .map(|(placement, discarded)| score_cell(placement, *discarded)),
            );
            row.push(performance(score).wins.to_string());
            row.push(score.gross.to_string());
            row.push(score.net.to_string());
            row
        })
        .collect();

    let table = layout(&header, &rows, 3, use_colors);
    format!(
        "{}\n\n{} races, {} attended, DNC scores {}",
        table, outcome.race_count, outcome.attendance, outcome.dnc_points
    )
}

/// Format series standings: rank, sail, name, one column per round
/// (discards in parentheses, absences marked with `*`), attended rounds,
/// gross and net.
pub fn format_series_table(standings: &[SeriesStanding], use_colors: bool) -> String {
    if standings.is_empty() {
        return "No rounds recorded.".to_string();
    }

    let round_count = standings[0].round_nets.len();
    let mut header = vec!["Rank".to_string(), "Sail".to_string(), "Name".to_string()];
    header.extend((1..=round_count).map(|r| format!("D{}", r)));
    header.extend(["Att", "Gross", "Net"].iter().map(|s| s.to_string()));

    let longest = standings
        .iter()
        .map(|s| s.competitor.name.chars().count())
        .max()
        .unwrap_or(0);
    let width = name_width(4 + 8 + round_count * 7 + 3 * 7, longest);

    let rows: Vec<Vec<String>> = standings
        .iter()
        .map(|standing| {
            let mut row = vec![
                rank_label(standing.rank),
                standing.competitor.sail_number.clone(),
                truncate_name(&standing.competitor.name, width),
            ];
            for ((net, discarded), absent) in standing
                .round_nets
                .iter()
                .zip(&standing.discards)
                .zip(&standing.absent)
            {
                let value = if *absent {
                    format!("{}*", net)
                } else {
                    net.to_string()
                };
                row.push(score_cell(value, *discarded));
            }
            row.push(standing.rounds_attended.to_string());
            row.push(standing.gross.to_string());
            row.push(standing.net.to_string());
            row
        })
        .collect();

    format!(
        "{}\n\n* no score posted, DNC applied",
        layout(&header, &rows, 3, use_colors)
    )
}

/// Format a scored round as tab-separated values for scripting
/// Columns: rank, sail, name, races..., gross, net (no headers, no colors)
pub fn format_round_tsv(outcome: &RoundOutcome) -> String {
    outcome
        .scores
        .iter()
        .map(|score| {
            let mut fields = vec![
                rank_label(score.rank),
                score.competitor.sail_number.clone(),
                score.competitor.name.clone(),
            ];
            fields.extend(
                score
                    .placements
                    .iter()
                    .zip(&score.discards)
                    .map(|(placement, discarded)| score_cell(placement, *discarded)),
            );
            fields.push(score.gross.to_string());
            fields.push(score.net.to_string());
            fields.join("\t")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format series standings as tab-separated values
/// Columns: rank, sail, name, round nets..., attended, gross, net
pub fn format_series_tsv(standings: &[SeriesStanding]) -> String {
    standings
        .iter()
        .map(|standing| {
            let mut fields = vec![
                rank_label(standing.rank),
                standing.competitor.sail_number.clone(),
                standing.competitor.name.clone(),
            ];
            fields.extend(
                standing
                    .round_nets
                    .iter()
                    .zip(&standing.discards)
                    .map(|(net, discarded)| score_cell(net, *discarded)),
            );
            fields.push(standing.rounds_attended.to_string());
            fields.push(standing.gross.to_string());
            fields.push(standing.net.to_string());
            fields.join("\t")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// One line per recorded round, in round order
pub fn format_rounds_list(rounds: &[&RoundRecord], use_colors: bool) -> String {
    if rounds.is_empty() {
        return "No rounds recorded.".to_string();
    }

    rounds
        .iter()
        .map(|record| {
            let number = format!("{:>3}.", record.round_number);
            let date = record
                .date
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_else(|| "----------".to_string());
            let title = record.regatta.as_deref().unwrap_or("(untitled)");
            let mut line = if use_colors {
                format!(
                    "{} {}  {}  {}  {} races, {} attended",
                    number.dimmed(),
                    date,
                    title.bold(),
                    record.event_id.cyan(),
                    record.race_count,
                    record.results.attendance
                )
            } else {
                format!(
                    "{} {}  {}  {}  {} races, {} attended",
                    number, date, title, record.event_id, record.race_count, record.results.attendance
                )
            };
            if let Some(note) = &record.note {
                line.push_str(&format!("  [{}]", note));
            }
            line
        })
        .collect::<Vec<_>>()
        .join("\n")
}
