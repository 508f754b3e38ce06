//! Local profiles and the signed-in session.

use tracing::{info, warn};
use uuid::Uuid;

use nova_domain::{CurrencyCode, Profile, Session};

use crate::{storage::ProfileStore, time::Clock, CoreError};

pub struct ProfileService;

impl ProfileService {
    pub fn list(store: &dyn ProfileStore) -> Result<Vec<Profile>, CoreError> {
        store.load_profiles()
    }

    pub fn create(
        store: &dyn ProfileStore,
        display_name: &str,
        currency: CurrencyCode,
    ) -> Result<Profile, CoreError> {
        let name = display_name.trim();
        if name.is_empty() {
            return Err(CoreError::Validation("profile name must not be empty".into()));
        }
        let profile = Profile::new(name, currency);
        store.save_profile(&profile)?;
        info!(uid = %profile.uid, name = %profile.display_name, "profile created");
        Ok(profile)
    }

    pub fn find(store: &dyn ProfileStore, uid: Uuid) -> Result<Profile, CoreError> {
        store
            .load_profiles()?
            .into_iter()
            .find(|profile| profile.uid == uid)
            .ok_or_else(|| CoreError::ProfileNotFound(uid.to_string()))
    }

    /// Looks a profile up by uid or, failing that, by case-insensitive display name.
    pub fn resolve(store: &dyn ProfileStore, needle: &str) -> Result<Profile, CoreError> {
        let needle = needle.trim();
        let profiles = store.load_profiles()?;
        if let Ok(uid) = Uuid::parse_str(needle) {
            if let Some(profile) = profiles.iter().find(|profile| profile.uid == uid) {
                return Ok(profile.clone());
            }
        }
        profiles
            .into_iter()
            .find(|profile| profile.display_name.eq_ignore_ascii_case(needle))
            .ok_or_else(|| CoreError::ProfileNotFound(needle.to_string()))
    }

    pub fn update_currency(
        store: &dyn ProfileStore,
        uid: Uuid,
        currency: CurrencyCode,
    ) -> Result<Profile, CoreError> {
        let mut profile = Self::find(store, uid)?;
        profile.currency = currency;
        store.save_profile(&profile)?;
        info!(uid = %uid, currency = %currency, "profile currency updated");
        Ok(profile)
    }

    pub fn login(
        store: &dyn ProfileStore,
        clock: &dyn Clock,
        uid: Uuid,
    ) -> Result<Session, CoreError> {
        let profile = Self::find(store, uid)?;
        let session = Session {
            uid: profile.uid,
            started_at: clock.now(),
        };
        store.save_session(Some(&session))?;
        info!(uid = %uid, name = %profile.display_name, "signed in");
        Ok(session)
    }

    pub fn logout(store: &dyn ProfileStore) -> Result<(), CoreError> {
        store.save_session(None)?;
        info!("signed out");
        Ok(())
    }

    /// The signed-in profile, if any. A session pointing at a missing profile is ignored.
    pub fn current(store: &dyn ProfileStore) -> Result<Option<Profile>, CoreError> {
        let Some(session) = store.load_session()? else {
            return Ok(None);
        };
        match Self::find(store, session.uid) {
            Ok(profile) => Ok(Some(profile)),
            Err(CoreError::ProfileNotFound(_)) => {
                warn!(uid = %session.uid, "session refers to an unknown profile");
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }
}
