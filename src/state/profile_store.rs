use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::Result;
use crate::models::{Goals, Profile};
use crate::state::persistence::KeyValueStore;

/// Storage key holding the saved profile.
pub const PROFILE_KEY: &str = "userProfile";

/// A profile together with the goals computed when it was saved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedProfile {
    #[serde(flatten)]
    pub profile: Profile,
    pub goals: Goals,
}

pub struct ProfileStore<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> ProfileStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Validate `profile`, recompute its goals and persist both.
    pub fn save(&mut self, profile: &Profile) -> Result<Goals> {
        let goals = profile.goals()?;
        let saved = SavedProfile {
            profile: profile.clone(),
            goals,
        };
        self.store
            .set(PROFILE_KEY, &serde_json::to_string_pretty(&saved)?)?;
        info!(
            calorie_goal = goals.calorie_goal,
            protein_goal = goals.protein_goal,
            carbs_goal = goals.carbs_goal,
            "saved profile"
        );
        Ok(goals)
    }

    pub fn load(&self) -> Result<Option<SavedProfile>> {
        match self.store.get(PROFILE_KEY)? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    /// Saved goals, or the defaults if no profile exists yet.
    pub fn current_goals(&self) -> Result<Goals> {
        Ok(self.load()?.map(|p| p.goals).unwrap_or_default())
    }
}
