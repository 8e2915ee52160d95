//! Score Commands
//!
//! Frontend bindings for score records and the leaderboard.

use serde::Serialize;
use recycle_core::{Identity, ScoreEntry, UserProfile};
use super::{call_unit, call_with};

#[derive(Serialize)]
struct UidArgs<'a> {
    uid: &'a str,
}

#[derive(Serialize)]
struct IdentityArgs<'a> {
    identity: &'a Identity,
}

#[derive(Serialize)]
struct ScoreArgs<'a> {
    uid: &'a str,
    score: u64,
}

#[derive(Serialize)]
struct LimitArgs {
    limit: Option<u32>,
}

pub async fn get_user_record(uid: &str) -> Result<Option<UserProfile>, String> {
    call_with("get_user_record", &UidArgs { uid }).await
}

pub async fn create_user_record(identity: &Identity) -> Result<UserProfile, String> {
    call_with("create_user_record", &IdentityArgs { identity }).await
}

pub async fn update_score(uid: &str, score: u64) -> Result<(), String> {
    call_unit("update_score", &ScoreArgs { uid, score }).await
}

pub async fn top_scores(limit: u32) -> Result<Vec<ScoreEntry>, String> {
    call_with("top_scores", &LimitArgs { limit: Some(limit) }).await
}
