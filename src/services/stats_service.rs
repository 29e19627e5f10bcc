use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::Arc;

use crate::{
    errors::AppResult,
    models::{
        domain::{ScoreTotals, User},
        dto::response::LeaderboardEntry,
    },
    repositories::{QuizAttemptRepository, UserRepository},
};

/// Percentage of correct answers; zero when nothing was possible.
pub fn percentage(score: i64, possible: i64) -> f64 {
    if possible <= 0 {
        return 0.0;
    }
    score as f64 / possible as f64 * 100.0
}

/// Joins per-phone totals with registered users and orders by the unrounded
/// percentage, highest first. Phone breaks exact ties only. Phones with no
/// user are dropped.
pub fn rank_leaderboard(totals: Vec<ScoreTotals>, users: &[User]) -> Vec<LeaderboardEntry> {
    let by_phone: HashMap<&str, &User> = users.iter().map(|u| (u.phone.as_str(), u)).collect();

    let mut entries: Vec<LeaderboardEntry> = totals
        .into_iter()
        .filter_map(|t| {
            let user = by_phone.get(t.phone.as_str())?;
            Some(LeaderboardEntry {
                id: t.phone.clone(),
                name: user.name.clone(),
                phone: t.phone.clone(),
                average_score: percentage(t.total_score, t.total_possible),
                attempts: t.attempts,
            })
        })
        .collect();

    entries.sort_by(|a, b| {
        b.average_score
            .partial_cmp(&a.average_score)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.phone.cmp(&b.phone))
    });
    entries
}

pub struct StatsService {
    attempts: Arc<dyn QuizAttemptRepository>,
    users: Arc<dyn UserRepository>,
}

impl StatsService {
    pub fn new(attempts: Arc<dyn QuizAttemptRepository>, users: Arc<dyn UserRepository>) -> Self {
        Self { attempts, users }
    }

    /// Aggregate percentage over every attempt made with this phone.
    pub async fn average_score(&self, phone: &str) -> AppResult<f64> {
        let totals = self.attempts.score_totals_for_phone(phone.trim()).await?;
        Ok(totals
            .map(|t| percentage(t.total_score, t.total_possible))
            .unwrap_or(0.0))
    }

    pub async fn leaderboard(&self) -> AppResult<Vec<LeaderboardEntry>> {
        let totals = self.attempts.score_totals_by_phone().await?;
        let phones: Vec<String> = totals.iter().map(|t| t.phone.clone()).collect();
        let users = self.users.find_by_phones(&phones).await?;
        Ok(rank_leaderboard(totals, &users))
    }
}
