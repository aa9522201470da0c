//! Terminal rendering of a finished roast

use std::fmt::Write as _;
use std::time::Duration;

use owo_colors::OwoColorize;
use tokio::time::Instant;

use crate::core::effects::ScoreCounter;
use crate::roast::RoastResponse;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreTone {
    Good,
    Middling,
    Bad,
}

pub fn tone(score: i64) -> ScoreTone {
    if score >= 80 {
        ScoreTone::Good
    } else if score >= 50 {
        ScoreTone::Middling
    } else {
        ScoreTone::Bad
    }
}

/// One-word verdict for a score
pub fn verdict(score: i64) -> &'static str {
    match score {
        s if s >= 90 => "GODLIKE",
        s if s >= 70 => "HIREABLE",
        s if s >= 50 => "MEH",
        s if s >= 30 => "TRAGIC",
        _ => "UNEMPLOYABLE",
    }
}

fn paint(text: &str, tone: ScoreTone, color: bool) -> String {
    if !color {
        return text.to_string();
    }
    match tone {
        ScoreTone::Good => text.green().bold().to_string(),
        ScoreTone::Middling => text.yellow().bold().to_string(),
        ScoreTone::Bad => text.red().bold().to_string(),
    }
}

pub struct ResultPresenter<'a> {
    response: &'a RoastResponse,
    counter: ScoreCounter,
    color: bool,
}

impl<'a> ResultPresenter<'a> {
    /// Starts the count-up immediately
    pub fn new(response: &'a RoastResponse, count_up: Duration, color: bool) -> Self {
        Self {
            response,
            counter: ScoreCounter::start(response.score, count_up),
            color,
        }
    }

    pub fn final_score(&self) -> i64 {
        self.counter.target()
    }

    pub fn displayed_score_at(&self, now: Instant) -> i64 {
        self.counter.value_at(now)
    }

    pub fn is_finished_at(&self, now: Instant) -> bool {
        self.counter.is_finished_at(now)
    }

    /// Score line; the colour follows the shown value, the verdict the final one
    pub fn score_line(&self, shown: i64) -> String {
        format!(
            "  {:>3}  {}",
            paint(&shown.to_string(), tone(shown), self.color),
            paint(verdict(self.final_score()), tone(shown), self.color)
        )
    }

    pub fn heading(&self) -> String {
        let heading = "VERDICT";
        if self.color {
            heading.dimmed().to_string()
        } else {
            heading.to_string()
        }
    }

    /// One-liner and sections
    pub fn body(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "\n  \"{}\"\n", self.response.one_liner);

        for section in &self.response.sections {
            let title = section.title.to_uppercase();
            if self.color {
                let _ = writeln!(out, "■ {}", title.bold());
            } else {
                let _ = writeln!(out, "■ {}", title);
            }
            for point in &section.content {
                let _ = writeln!(out, "  • {}", point);
            }
            out.push('\n');
        }

        out
    }

    /// The whole view with the final score
    pub fn render(&self) -> String {
        format!(
            "{}\n{}\n{}",
            self.heading(),
            self.score_line(self.final_score()),
            self.body()
        )
    }
}
