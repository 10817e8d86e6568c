// ── Entity source ──
//
// The exporter reads through `DogApi` rather than the concrete client, so
// the engine can be driven by an in-memory source in tests.

use std::future::Future;

use dogport_api::{DogClient, RulesetQuery};

use crate::error::CoreError;
use crate::model::{Fact, Group, Host, Link, Profile, Ruleset, Service, Zone};

/// One list call per entity kind, returning domain types.
pub trait DogApi {
    fn groups(&self) -> impl Future<Output = Result<Vec<Group>, CoreError>> + Send;
    fn hosts(&self) -> impl Future<Output = Result<Vec<Host>, CoreError>> + Send;
    fn links(&self) -> impl Future<Output = Result<Vec<Link>, CoreError>> + Send;
    fn services(&self) -> impl Future<Output = Result<Vec<Service>, CoreError>> + Send;
    fn zones(&self) -> impl Future<Output = Result<Vec<Zone>, CoreError>> + Send;
    /// Rule references come back as display names, not ids.
    fn rulesets(&self) -> impl Future<Output = Result<Vec<Ruleset>, CoreError>> + Send;
    fn profiles(&self) -> impl Future<Output = Result<Vec<Profile>, CoreError>> + Send;
    fn facts(&self) -> impl Future<Output = Result<Vec<Fact>, CoreError>> + Send;
}

fn convert_all<R, T: From<R>>(rows: Vec<R>) -> Vec<T> {
    rows.into_iter().map(T::from).collect()
}

impl DogApi for DogClient {
    async fn groups(&self) -> Result<Vec<Group>, CoreError> {
        Ok(convert_all(self.list_groups().await?))
    }

    async fn hosts(&self) -> Result<Vec<Host>, CoreError> {
        Ok(convert_all(self.list_hosts().await?))
    }

    async fn links(&self) -> Result<Vec<Link>, CoreError> {
        Ok(convert_all(self.list_links().await?))
    }

    async fn services(&self) -> Result<Vec<Service>, CoreError> {
        Ok(convert_all(self.list_services().await?))
    }

    async fn zones(&self) -> Result<Vec<Zone>, CoreError> {
        Ok(convert_all(self.list_zones().await?))
    }

    async fn rulesets(&self) -> Result<Vec<Ruleset>, CoreError> {
        let query = RulesetQuery { names: true };
        Ok(convert_all(self.list_rulesets(&query).await?))
    }

    async fn profiles(&self) -> Result<Vec<Profile>, CoreError> {
        Ok(convert_all(self.list_profiles().await?))
    }

    async fn facts(&self) -> Result<Vec<Fact>, CoreError> {
        Ok(convert_all(self.list_facts().await?))
    }
}
