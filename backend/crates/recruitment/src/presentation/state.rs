//! Shared handler state

use std::sync::Arc;

use auth::AuthConfig;
use platform::mail::Mailer;
use platform::media::UploadStore;

use crate::domain::repository::RecruitmentStore;

#[derive(Clone)]
pub struct RecruitmentState<S>
where
    S: RecruitmentStore,
{
    pub store: Arc<S>,
    pub auth: Arc<AuthConfig>,
    pub mailer: Mailer,
    pub uploads: UploadStore,
}

impl<S> RecruitmentState<S>
where
    S: RecruitmentStore,
{
    pub fn new(store: Arc<S>, auth: Arc<AuthConfig>, mailer: Mailer, uploads: UploadStore) -> Self {
        Self {
            store,
            auth,
            mailer,
            uploads,
        }
    }
}
