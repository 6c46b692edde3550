//! Group roster admission rules.
//!
//! Both the PostgreSQL store and test doubles call [`RosterPlanner::plan`]
//! while holding the group lock, so capacity and uniqueness are decided in one
//! place.

use std::collections::HashSet;

use crate::shared::error::AppError;

/// How a batch of users is admitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdmissionMode {
    /// Exactly one user; capacity and duplicate checks on that user
    Single,
    /// Several users; duplicates are skipped, capacity is checked before and
    /// after deduplication
    Bulk,
}

/// Domain service deciding which users may join a group.
pub struct RosterPlanner;

impl RosterPlanner {
    /// Decide which of `requested` get inserted.
    ///
    /// `current_count` is the live member count and `existing` the subset of
    /// `requested` that already belongs to the group. Returns the user ids to
    /// insert, in request order.
    pub fn plan(
        max_member: i32,
        current_count: i64,
        requested: &[i64],
        existing: &HashSet<i64>,
        mode: AdmissionMode,
    ) -> Result<Vec<i64>, AppError> {
        let capacity = i64::from(max_member);

        match mode {
            AdmissionMode::Single => {
                let user_id = match requested {
                    [user_id] => *user_id,
                    _ => {
                        return Err(AppError::InvalidArgument(
                            "Single admission takes exactly one user".into(),
                        ))
                    }
                };

                if current_count >= capacity {
                    return Err(AppError::ResourceExhausted(format!(
                        "Group is full ({} members)",
                        capacity
                    )));
                }

                if existing.contains(&user_id) {
                    return Err(AppError::AlreadyExists(
                        "User is already a member of this group".into(),
                    ));
                }

                Ok(vec![user_id])
            }
            AdmissionMode::Bulk => {
                if requested.is_empty() {
                    return Err(AppError::InvalidArgument("No users to add".into()));
                }

                if current_count + requested.len() as i64 > capacity {
                    return Err(AppError::ResourceExhausted(format!(
                        "Adding {} users would exceed the group limit of {}",
                        requested.len(),
                        capacity
                    )));
                }

                let mut seen = HashSet::with_capacity(requested.len());
                let fresh: Vec<i64> = requested
                    .iter()
                    .copied()
                    .filter(|id| !existing.contains(id) && seen.insert(*id))
                    .collect();

                if fresh.is_empty() {
                    return Err(AppError::AlreadyExists(
                        "All users are already members of this group".into(),
                    ));
                }

                // Raw request size and deduplicated size can differ
                if current_count + fresh.len() as i64 > capacity {
                    return Err(AppError::ResourceExhausted(format!(
                        "Adding {} users would exceed the group limit of {}",
                        fresh.len(),
                        capacity
                    )));
                }

                Ok(fresh)
            }
        }
    }
}
